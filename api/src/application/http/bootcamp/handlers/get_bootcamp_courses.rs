use axum::extract::{Path, State, rejection::PathRejection};
use bootcamp_core::domain::{
    model::{COURSE, COURSE_BOOTCAMP},
    query::{envelope::ResponseEnvelope, ports::ResultsService, value_objects::AdvancedResultsInput},
};
use uuid::Uuid;

use crate::application::http::{
    query_extractor::{AdvancedQuery, AdvancedQueryParams},
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
    path = "/{id}/courses",
    tag = "bootcamp",
    summary = "List the courses of a bootcamp",
    params(
        ("id" = Uuid, Path, description = "Bootcamp id"),
        AdvancedQueryParams
    ),
    responses(
        (status = 200, body = ResponseEnvelope),
        (status = 400, body = ApiErrorResponse)
    ),
)]
pub async fn get_bootcamp_courses(
    path: Result<Path<Uuid>, PathRejection>,
    State(state): State<AppState>,
    AdvancedQuery(query): AdvancedQuery,
) -> Result<Response<ResponseEnvelope>, ApiError> {
    let Path(bootcamp_id) = path?;

    let input = AdvancedResultsInput::new(&COURSE, query)
        .with_populate(vec![COURSE_BOOTCAMP])
        .with_parent("bootcamp", bootcamp_id);

    let envelope = state
        .service
        .advanced_results(input)
        .await
        .map_err(ApiError::from)?;

    Ok(Response::OK(envelope))
}
