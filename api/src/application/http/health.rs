use axum::{Json, Router, extract::State, routing::get};
use bootcamp_core::domain::health::{entities::DatabaseHealthStatus, ports::HealthCheckService};
use serde::Serialize;
use utoipa::{OpenApi, ToSchema};

use crate::application::http::server::{
    api_entities::api_error::{ApiError, ApiErrorResponse},
    app_state::AppState,
};

#[derive(Debug, Serialize, ToSchema, PartialEq)]
pub struct LivenessResponse {
    pub status: String,
    pub latency_ms: u64,
}

#[utoipa::path(
    get,
    path = "/live",
    tag = "health",
    summary = "Liveness probe",
    responses(
        (status = 200, body = LivenessResponse),
        (status = 503, body = ApiErrorResponse)
    ),
)]
pub async fn live(State(state): State<AppState>) -> Result<Json<LivenessResponse>, ApiError> {
    let latency_ms = state.service.health().await.map_err(ApiError::from)?;

    Ok(Json(LivenessResponse {
        status: "alive".to_string(),
        latency_ms,
    }))
}

#[utoipa::path(
    get,
    path = "/ready",
    tag = "health",
    summary = "Readiness probe",
    description = "Storage backend and round-trip latency, or 503 when storage is down.",
    responses(
        (status = 200, body = DatabaseHealthStatus),
        (status = 503, body = ApiErrorResponse)
    ),
)]
pub async fn ready(State(state): State<AppState>) -> Result<Json<DatabaseHealthStatus>, ApiError> {
    let status = state.service.readness().await.map_err(ApiError::from)?;
    Ok(Json(status))
}

#[derive(OpenApi)]
#[openapi(paths(live, ready))]
pub struct HealthApiDoc;

pub fn health_routes(root_path: &str) -> Router<AppState> {
    Router::new()
        .route(&format!("{root_path}/health/live"), get(live))
        .route(&format!("{root_path}/health/ready"), get(ready))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{body::to_bytes, http::StatusCode, response::IntoResponse};
    use bootcamp_core::domain::common::entities::app_errors::CoreError;
    use serde_json::{Value, json};

    #[tokio::test]
    async fn test_unreachable_storage_is_service_unavailable() {
        let error = ApiError::from(CoreError::ServiceUnavailable("connection refused".into()));
        let response = error.into_response();
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);

        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body: Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(body["success"], json!(false));
        assert_eq!(body["error"], json!(true));
        assert!(body["data"].as_str().unwrap().contains("connection refused"));
    }
}
