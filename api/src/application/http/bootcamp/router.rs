use super::handlers::get_bootcamp::{__path_get_bootcamp, get_bootcamp};
use super::handlers::get_bootcamp_courses::{__path_get_bootcamp_courses, get_bootcamp_courses};
use super::handlers::get_bootcamp_reviews::{__path_get_bootcamp_reviews, get_bootcamp_reviews};
use super::handlers::get_bootcamps::{__path_get_bootcamps, get_bootcamps};
use super::handlers::get_bootcamps_by_category::{
    __path_get_bootcamps_by_category, get_bootcamps_by_category,
};
use crate::application::http::server::app_state::AppState;

use axum::{Router, routing::get};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(paths(
    get_bootcamps,
    get_bootcamps_by_category,
    get_bootcamp,
    get_bootcamp_courses,
    get_bootcamp_reviews
))]
pub struct BootcampApiDoc;

pub fn bootcamp_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route(
            &format!("{}/api/v1/bootcamps", state.args.server.root_path),
            get(get_bootcamps),
        )
        .route(
            &format!(
                "{}/api/v1/bootcamps/category/{{category}}",
                state.args.server.root_path
            ),
            get(get_bootcamps_by_category),
        )
        .route(
            &format!("{}/api/v1/bootcamps/{{id}}", state.args.server.root_path),
            get(get_bootcamp),
        )
        .route(
            &format!(
                "{}/api/v1/bootcamps/{{id}}/courses",
                state.args.server.root_path
            ),
            get(get_bootcamp_courses),
        )
        .route(
            &format!(
                "{}/api/v1/bootcamps/{{id}}/reviews",
                state.args.server.root_path
            ),
            get(get_bootcamp_reviews),
        )
}
