use axum::extract::{Path, State, rejection::PathRejection};
use bootcamp_core::domain::{
    model::REVIEW_BOOTCAMP,
    query::{
        envelope::ResponseEnvelope,
        ports::ResultsService,
        value_objects::{ReviewResultsInput, ReviewTarget},
    },
};
use uuid::Uuid;

use crate::application::http::{
    query_extractor::{AdvancedQuery, ReviewQueryParams},
    server::{
        api_entities::{
            api_error::{ApiError, ApiErrorResponse},
            response::Response,
        },
        app_state::AppState,
    },
};

#[utoipa::path(
    get,
    path = "/{id}/reviews",
    tag = "course",
    summary = "List the reviews of a course",
    params(
        ("id" = Uuid, Path, description = "Course id"),
        ReviewQueryParams
    ),
    responses(
        (status = 200, body = ResponseEnvelope),
        (status = 400, body = ApiErrorResponse)
    ),
)]
pub async fn get_course_reviews(
    path: Result<Path<Uuid>, PathRejection>,
    State(state): State<AppState>,
    AdvancedQuery(query): AdvancedQuery,
) -> Result<Response<ResponseEnvelope>, ApiError> {
    let Path(course_id) = path?;

    let envelope = state
        .service
        .advanced_review_results(ReviewResultsInput {
            target: Some(ReviewTarget::Course(course_id)),
            populate: vec![REVIEW_BOOTCAMP],
            query,
        })
        .await
        .map_err(ApiError::from)?;

    Ok(Response::OK(envelope))
}
