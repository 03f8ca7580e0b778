use std::sync::Arc;

use crate::domain::common::QueryConfig;

pub struct Service<D> {
    pub(crate) document_repository: Arc<D>,
    pub(crate) query_config: QueryConfig,
}

impl<D> Service<D> {
    pub fn new(document_repository: D, query_config: QueryConfig) -> Self {
        Self {
            document_repository: Arc::new(document_repository),
            query_config,
        }
    }
}

impl<D> Clone for Service<D> {
    fn clone(&self) -> Self {
        Self {
            document_repository: Arc::clone(&self.document_repository),
            query_config: self.query_config,
        }
    }
}
