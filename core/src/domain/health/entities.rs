use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct DatabaseHealthStatus {
    pub status: String,
    pub backend: String,
    /// Round-trip of the readiness probe.
    pub latency_ms: u64,
}

impl DatabaseHealthStatus {
    pub fn up(backend: impl Into<String>, latency_ms: u64) -> Self {
        Self {
            status: "up".to_string(),
            backend: backend.into(),
            latency_ms,
        }
    }
}
