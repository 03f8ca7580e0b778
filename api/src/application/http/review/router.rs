use super::handlers::get_review::{__path_get_review, get_review};
use crate::application::http::server::app_state::AppState;

use axum::{Router, routing::get};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(paths(get_review))]
pub struct ReviewApiDoc;

pub fn review_routes(state: AppState) -> Router<AppState> {
    Router::new().route(
        &format!("{}/api/v1/reviews/{{id}}", state.args.server.root_path),
        get(get_review),
    )
}
