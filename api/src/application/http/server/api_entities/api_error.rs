use axum::{
    Json,
    extract::rejection::PathRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use bootcamp_core::domain::common::entities::app_errors::CoreError;
use serde::Serialize;
use thiserror::Error;
use utoipa::ToSchema;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    UnprocessableEntity(String),

    #[error("{0}")]
    ServiceUnavailable(String),

    #[error("{0}")]
    InternalServerError(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::UnprocessableEntity(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::ServiceUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            ApiError::InternalServerError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// Failure body; `data` carries the message.
#[derive(Debug, Serialize, ToSchema, PartialEq)]
pub struct ApiErrorResponse {
    pub success: bool,
    pub data: String,
    pub error: bool,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = ApiErrorResponse {
            success: false,
            data: self.to_string(),
            error: true,
        };
        (status, Json(body)).into_response()
    }
}

impl From<CoreError> for ApiError {
    fn from(error: CoreError) -> Self {
        match error {
            CoreError::NotFound => ApiError::NotFound(error.to_string()),
            CoreError::InvalidQuery(_) | CoreError::MissingReviewTarget => {
                ApiError::BadRequest(error.to_string())
            }
            CoreError::InvalidDocument(_) => ApiError::UnprocessableEntity(error.to_string()),
            CoreError::ServiceUnavailable(_) => ApiError::ServiceUnavailable(error.to_string()),
            CoreError::QueryTranslation(_)
            | CoreError::Configuration(_)
            | CoreError::InternalServerError => ApiError::InternalServerError(error.to_string()),
        }
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        ApiError::BadRequest(format!(
            "No resource exists for the request: {}",
            rejection.body_text()
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_core_errors_map_to_statuses() {
        let cases = [
            (CoreError::NotFound, StatusCode::NOT_FOUND),
            (CoreError::InvalidQuery("page".into()), StatusCode::BAD_REQUEST),
            (CoreError::MissingReviewTarget, StatusCode::BAD_REQUEST),
            (
                CoreError::QueryTranslation("cost[gte".into()),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
            (
                CoreError::InvalidDocument("rating".into()),
                StatusCode::UNPROCESSABLE_ENTITY,
            ),
            (
                CoreError::ServiceUnavailable("down".into()),
                StatusCode::SERVICE_UNAVAILABLE,
            ),
            (CoreError::InternalServerError, StatusCode::INTERNAL_SERVER_ERROR),
        ];

        for (error, status) in cases {
            assert_eq!(ApiError::from(error).status(), status);
        }
    }

    #[test]
    fn test_message_is_kept() {
        let error = ApiError::from(CoreError::InvalidQuery("unknown sort field `price`".into()));
        assert_eq!(error.to_string(), "Invalid query: unknown sort field `price`");
    }
}
