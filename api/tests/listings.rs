mod common;

use axum::http::StatusCode;
use common::{ApiContext, DEVWORKS, MODERNTECH};
use serde_json::Value;
use test_context::test_context;

fn costs(body: &Value) -> Vec<f64> {
    body["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|course| course["cost"].as_f64().unwrap())
        .collect()
}

#[test_context(ApiContext)]
#[tokio::test]
async fn test_default_listing_is_newest_first_page_of_five(ctx: &mut ApiContext) {
    let response = ctx.server.get("/api/v1/courses").await;
    response.assert_status_ok();

    let body: Value = response.json();
    assert_eq!(body["success"], true);
    assert_eq!(body["error"], false);
    assert_eq!(body["count"], 12);
    assert_eq!(body["data"].as_array().unwrap().len(), 5);
    assert_eq!(body["data"][0]["title"], "Blockchain Finance");
    assert_eq!(body["pagination"]["previousPage"], Value::Null);
    assert_eq!(body["pagination"]["currentPage"], 1);
    assert_eq!(body["pagination"]["nextPage"], 2);
    assert!(body.get("percents").is_none());
}

#[test_context(ApiContext)]
#[tokio::test]
async fn test_second_page_of_sorted_courses(ctx: &mut ApiContext) {
    let response = ctx
        .server
        .get("/api/v1/courses")
        .add_query_param("page", 2)
        .add_query_param("limit", 5)
        .add_query_param("sort", "cost")
        .await;
    response.assert_status_ok();

    let body: Value = response.json();
    assert_eq!(body["count"], 12);
    assert_eq!(costs(&body), vec![10000.0, 11000.0, 12000.0, 13000.0, 14000.0]);
    assert_eq!(body["pagination"]["previousPage"], 1);
    assert_eq!(body["pagination"]["currentPage"], 2);
    assert_eq!(body["pagination"]["nextPage"], 3);
}

#[test_context(ApiContext)]
#[tokio::test]
async fn test_select_and_descending_sort(ctx: &mut ApiContext) {
    let response = ctx
        .server
        .get("/api/v1/courses")
        .add_query_param("select", "title,cost")
        .add_query_param("sort", "-cost")
        .await;
    response.assert_status_ok();

    let body: Value = response.json();
    assert_eq!(costs(&body), vec![16000.0, 15000.0, 14000.0, 13000.0, 12000.0]);
    for course in body["data"].as_array().unwrap() {
        let mut keys: Vec<&str> = course.as_object().unwrap().keys().map(String::as_str).collect();
        keys.sort_unstable();
        assert_eq!(keys, vec!["cost", "id", "title"]);
    }
}

#[test_context(ApiContext)]
#[tokio::test]
async fn test_comparison_operators_filter_and_count(ctx: &mut ApiContext) {
    let response = ctx
        .server
        .get("/api/v1/courses")
        .add_query_param("cost[gte]", 12000)
        .add_query_param("limit", 100)
        .await;
    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["count"], 5);
    assert!(costs(&body).iter().all(|cost| *cost >= 12000.0));

    let response = ctx
        .server
        .get("/api/v1/courses")
        .add_query_param("duration[lte]", "[3,6]")
        .add_query_param("limit", 100)
        .await;
    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["count"], 8);
    assert_eq!(body["pagination"]["nextPage"], Value::Null);
}

#[test_context(ApiContext)]
#[tokio::test]
async fn test_literal_and_membership_filters(ctx: &mut ApiContext) {
    let response = ctx
        .server
        .get("/api/v1/courses")
        .add_query_param("category[in]", "design,finance")
        .add_query_param("limit", 100)
        .await;
    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["count"], 4);

    let response = ctx
        .server
        .get("/api/v1/bootcamps")
        .add_query_param("housing", "true")
        .await;
    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["count"], 2);

    let response = ctx
        .server
        .get("/api/v1/bootcamps")
        .add_query_param("careers", "data science")
        .await;
    let body: Value = response.json();
    assert_eq!(body["count"], 2);
}

#[test_context(ApiContext)]
#[tokio::test]
async fn test_empty_result_is_success(ctx: &mut ApiContext) {
    let response = ctx
        .server
        .get("/api/v1/courses")
        .add_query_param("cost[gt]", 99999)
        .await;
    response.assert_status_ok();

    let body: Value = response.json();
    assert_eq!(body["success"], true);
    assert_eq!(body["count"], 0);
    assert_eq!(body["data"], Value::Array(vec![]));
    assert_eq!(body["pagination"]["nextPage"], Value::Null);
}

#[test_context(ApiContext)]
#[tokio::test]
async fn test_limit_is_clamped(ctx: &mut ApiContext) {
    let response = ctx
        .server
        .get("/api/v1/courses")
        .add_query_param("limit", 1000)
        .await;
    response.assert_status_ok();

    let body: Value = response.json();
    assert_eq!(body["data"].as_array().unwrap().len(), 12);
    assert_eq!(body["pagination"]["nextPage"], Value::Null);
}

#[test_context(ApiContext)]
#[tokio::test]
async fn test_bootcamps_embed_their_courses(ctx: &mut ApiContext) {
    let response = ctx
        .server
        .get("/api/v1/bootcamps")
        .add_query_param("sort", "name")
        .await;
    response.assert_status_ok();

    let body: Value = response.json();
    assert_eq!(body["count"], 4);
    let devworks = body["data"]
        .as_array()
        .unwrap()
        .iter()
        .find(|bootcamp| bootcamp["id"] == DEVWORKS)
        .unwrap();
    let titles: Vec<&str> = devworks["courses"]
        .as_array()
        .unwrap()
        .iter()
        .map(|course| course["title"].as_str().unwrap())
        .collect();
    assert_eq!(
        titles,
        vec!["Front End Web Development", "Full Stack Web Development", "UI/UX"]
    );
}

#[test_context(ApiContext)]
#[tokio::test]
async fn test_courses_embed_bootcamp_name(ctx: &mut ApiContext) {
    let response = ctx
        .server
        .get(&format!("/api/v1/bootcamps/{MODERNTECH}/courses"))
        .await;
    response.assert_status_ok();

    let body: Value = response.json();
    assert_eq!(body["count"], 3);
    for course in body["data"].as_array().unwrap() {
        assert_eq!(course["bootcamp"]["id"], MODERNTECH);
        assert_eq!(course["bootcamp"]["name"], "ModernTech Bootcamp");
        assert!(course["bootcamp"].get("careers").is_none());
    }
}

#[test_context(ApiContext)]
#[tokio::test]
async fn test_category_listings(ctx: &mut ApiContext) {
    let response = ctx.server.get("/api/v1/bootcamps/category/finance").await;
    response.assert_status_ok();
    let body: Value = response.json();
    let mut names: Vec<&str> = body["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|bootcamp| bootcamp["name"].as_str().unwrap())
        .collect();
    names.sort_unstable();
    assert_eq!(body["count"], 2);
    assert_eq!(names, vec!["Codemasters", "Devcentral Bootcamp"]);

    let response = ctx.server.get("/api/v1/courses/category/design").await;
    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["count"], 2);

    let response = ctx.server.get("/api/v1/courses/category/cooking").await;
    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["count"], 0);
}

#[test_context(ApiContext)]
#[tokio::test]
async fn test_query_errors(ctx: &mut ApiContext) {
    let cases = [
        ("page", "0", StatusCode::BAD_REQUEST),
        ("limit", "-3", StatusCode::BAD_REQUEST),
        ("sort", "-price", StatusCode::BAD_REQUEST),
        ("cost[gte]", "abc", StatusCode::BAD_REQUEST),
        ("cost[gte", "100", StatusCode::INTERNAL_SERVER_ERROR),
    ];

    for (key, value, status) in cases {
        let response = ctx
            .server
            .get("/api/v1/courses")
            .add_query_param(key, value)
            .expect_failure()
            .await;
        response.assert_status(status);

        let body: Value = response.json();
        assert_eq!(body["success"], false, "{key}={value}");
        assert_eq!(body["error"], true, "{key}={value}");
        assert!(body["data"].is_string(), "{key}={value}");
    }
}
