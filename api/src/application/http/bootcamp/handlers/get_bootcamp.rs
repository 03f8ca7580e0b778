use axum::extract::{Path, State, rejection::PathRejection};
use bootcamp_core::domain::{
    model::{BOOTCAMP, BOOTCAMP_COURSES},
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
    tag = "bootcamp",
    summary = "Get a bootcamp",
    description = "One bootcamp with its courses.",
    params(("id" = Uuid, Path, description = "Bootcamp id")),
    responses(
        (status = 200, body = DocumentResponse),
        (status = 400, body = ApiErrorResponse),
        (status = 404, body = ApiErrorResponse)
    ),
)]
pub async fn get_bootcamp(
    path: Result<Path<Uuid>, PathRejection>,
    State(state): State<AppState>,
) -> Result<Response<DocumentResponse>, ApiError> {
    let Path(id) = path?;

    let bootcamp = state
        .service
        .get_document(GetDocumentInput {
            model: &BOOTCAMP,
            id,
            populate: vec![BOOTCAMP_COURSES],
        })
        .await
        .map_err(ApiError::from)?;

    Ok(Response::OK(DocumentResponse::new(bootcamp)))
}
