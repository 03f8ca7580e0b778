use super::handlers::get_course::{__path_get_course, get_course};
use super::handlers::get_course_reviews::{__path_get_course_reviews, get_course_reviews};
use super::handlers::get_courses::{__path_get_courses, get_courses};
use super::handlers::get_courses_by_category::{
    __path_get_courses_by_category, get_courses_by_category,
};
use crate::application::http::server::app_state::AppState;

use axum::{Router, routing::get};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(paths(get_courses, get_courses_by_category, get_course, get_course_reviews))]
pub struct CourseApiDoc;

pub fn course_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route(
            &format!("{}/api/v1/courses", state.args.server.root_path),
            get(get_courses),
        )
        .route(
            &format!(
                "{}/api/v1/courses/category/{{category}}",
                state.args.server.root_path
            ),
            get(get_courses_by_category),
        )
        .route(
            &format!("{}/api/v1/courses/{{id}}", state.args.server.root_path),
            get(get_course),
        )
        .route(
            &format!(
                "{}/api/v1/courses/{{id}}/reviews",
                state.args.server.root_path
            ),
            get(get_course_reviews),
        )
}
