use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::query::directives::PageRequest;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PaginationDescriptor {
    pub previous_page: Option<u64>,
    pub current_page: u64,
    pub next_page: Option<u64>,
}

impl PaginationDescriptor {
    /// Previous page exists past the first window, next page while the
    /// current window ends before `total`.
    pub fn compute(page: PageRequest, total: u64) -> Self {
        let start_index = (page.number - 1).saturating_mul(page.limit);
        let end_index = page.number.saturating_mul(page.limit);

        Self {
            previous_page: (start_index > 0).then(|| page.number - 1),
            current_page: page.number,
            next_page: (end_index < total).then(|| page.number + 1),
        }
    }
}
