use axum::extract::{Path, State, rejection::PathRejection};
use bootcamp_core::domain::{
    model::{REVIEW, REVIEW_BOOTCAMP},
    query::{ports::ResultsService, value_objects::GetDocumentInput},
};
use uuid::Uuid;

use crate::application::http::server::{
    api_entities::{
        api_error::{ApiError, ApiErrorResponse},
        response::{DocumentResponse, Response},
    },
    app_state::AppState,
};

#[utoipa::path(
    get,
    path = "/{id}",
    tag = "review",
    summary = "Get a review",
    description = "One review with the name and careers of its bootcamp.",
    params(("id" = Uuid, Path, description = "Review id")),
    responses(
        (status = 200, body = DocumentResponse),
        (status = 400, body = ApiErrorResponse),
        (status = 404, body = ApiErrorResponse)
    ),
)]
pub async fn get_review(
    path: Result<Path<Uuid>, PathRejection>,
    State(state): State<AppState>,
) -> Result<Response<DocumentResponse>, ApiError> {
    let Path(id) = path?;

    let review = state
        .service
        .get_document(GetDocumentInput {
            model: &REVIEW,
            id,
            populate: vec![REVIEW_BOOTCAMP],
        })
        .await
        .map_err(ApiError::from)?;

    Ok(Response::OK(DocumentResponse::new(review)))
}
