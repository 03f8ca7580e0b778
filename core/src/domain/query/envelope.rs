use serde::Serialize;
use utoipa::ToSchema;

use crate::domain::{
    document::Document,
    query::{aggregation::RatingDistribution, pagination::PaginationDescriptor},
};

/// Body of every successful listing response.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct ResponseEnvelope {
    pub success: bool,
    /// Matches across all pages.
    pub count: u64,
    pub pagination: PaginationDescriptor,
    #[schema(value_type = Vec<Object>)]
    pub data: Vec<Document>,
    pub error: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub percents: Option<RatingDistribution>,
}

impl ResponseEnvelope {
    pub fn new(count: u64, pagination: PaginationDescriptor, data: Vec<Document>) -> Self {
        Self {
            success: true,
            count,
            pagination,
            data,
            error: false,
            percents: None,
        }
    }

    pub fn with_percents(mut self, percents: Option<RatingDistribution>) -> Self {
        self.percents = percents;
        self
    }
}
