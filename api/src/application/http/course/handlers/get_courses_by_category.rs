use axum::extract::{Path, State};
use bootcamp_core::domain::{
    model::{COURSE, COURSE_BOOTCAMP, descriptors::ModelType},
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
    path = "/category/{category}",
    tag = "course",
    summary = "List courses in a category",
    params(
        ("category" = String, Path, description = "Course category, e.g. `design`"),
        AdvancedQueryParams
    ),
    responses(
        (status = 200, body = ResponseEnvelope),
        (status = 400, body = ApiErrorResponse)
    ),
)]
pub async fn get_courses_by_category(
    Path(category): Path<String>,
    State(state): State<AppState>,
    AdvancedQuery(query): AdvancedQuery,
) -> Result<Response<ResponseEnvelope>, ApiError> {
    let input = AdvancedResultsInput::new(&COURSE, query)
        .with_populate(vec![COURSE_BOOTCAMP])
        .with_category(ModelType::Course, category);

    let envelope = state
        .service
        .advanced_results(input)
        .await
        .map_err(ApiError::from)?;

    Ok(Response::OK(envelope))
}
