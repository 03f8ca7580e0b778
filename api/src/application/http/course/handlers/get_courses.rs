use axum::extract::State;
use bootcamp_core::domain::{
    model::{COURSE, COURSE_BOOTCAMP},
    query::{envelope::ResponseEnvelope, ports::ResultsService, value_objects::AdvancedResultsInput},
};

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
    path = "",
    tag = "course",
    summary = "List courses",
    description = "Filtered, sorted and paginated courses with their bootcamp name.",
    params(AdvancedQueryParams),
    responses(
        (status = 200, body = ResponseEnvelope),
        (status = 400, body = ApiErrorResponse)
    ),
)]
pub async fn get_courses(
    State(state): State<AppState>,
    AdvancedQuery(query): AdvancedQuery,
) -> Result<Response<ResponseEnvelope>, ApiError> {
    let input = AdvancedResultsInput::new(&COURSE, query).with_populate(vec![COURSE_BOOTCAMP]);
    let envelope = state
        .service
        .advanced_results(input)
        .await
        .map_err(ApiError::from)?;

    Ok(Response::OK(envelope))
}
