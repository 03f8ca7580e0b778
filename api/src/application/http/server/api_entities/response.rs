use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response as AxumResponse},
};
use bootcamp_core::domain::document::Document;
use serde::Serialize;
use utoipa::ToSchema;

pub enum Response<T: Serialize> {
    OK(T),
}

impl<T: Serialize> IntoResponse for Response<T> {
    fn into_response(self) -> AxumResponse {
        match self {
            Response::OK(body) => (StatusCode::OK, Json(body)).into_response(),
        }
    }
}

/// Body of a single-document read.
#[derive(Debug, Serialize, ToSchema, PartialEq)]
pub struct DocumentResponse {
    pub success: bool,
    #[schema(value_type = Object)]
    pub data: Document,
    pub error: bool,
}

impl DocumentResponse {
    pub fn new(data: Document) -> Self {
        Self {
            success: true,
            data,
            error: false,
        }
    }
}
