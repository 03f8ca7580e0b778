use axum::extract::{Path, State, rejection::PathRejection};
use bootcamp_core::domain::{
    model::{COURSE, COURSE_BOOTCAMP},
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
    tag = "course",
    summary = "Get a course",
    params(("id" = Uuid, Path, description = "Course id")),
    responses(
        (status = 200, body = DocumentResponse),
        (status = 400, body = ApiErrorResponse),
        (status = 404, body = ApiErrorResponse)
    ),
)]
pub async fn get_course(
    path: Result<Path<Uuid>, PathRejection>,
    State(state): State<AppState>,
) -> Result<Response<DocumentResponse>, ApiError> {
    let Path(id) = path?;

    let course = state
        .service
        .get_document(GetDocumentInput {
            model: &COURSE,
            id,
            populate: vec![COURSE_BOOTCAMP],
        })
        .await
        .map_err(ApiError::from)?;

    Ok(Response::OK(DocumentResponse::new(course)))
}
