use axum::extract::State;
use bootcamp_core::domain::{
    model::{BOOTCAMP, BOOTCAMP_COURSES},
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
    tag = "bootcamp",
    summary = "List bootcamps",
    description = "Filtered, sorted and paginated bootcamps, each with its courses.",
    params(AdvancedQueryParams),
    responses(
        (status = 200, body = ResponseEnvelope),
        (status = 400, body = ApiErrorResponse)
    ),
)]
pub async fn get_bootcamps(
    State(state): State<AppState>,
    AdvancedQuery(query): AdvancedQuery,
) -> Result<Response<ResponseEnvelope>, ApiError> {
    let input = AdvancedResultsInput::new(&BOOTCAMP, query).with_populate(vec![BOOTCAMP_COURSES]);
    let envelope = state
        .service
        .advanced_results(input)
        .await
        .map_err(ApiError::from)?;

    Ok(Response::OK(envelope))
}
