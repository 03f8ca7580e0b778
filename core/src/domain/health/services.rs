use crate::domain::{
    common::{entities::app_errors::CoreError, services::Service},
    health::{
        entities::DatabaseHealthStatus,
        ports::{HealthCheckRepository, HealthCheckService},
    },
};

impl<D> HealthCheckService for Service<D>
where
    D: HealthCheckRepository,
{
    async fn readness(&self) -> Result<DatabaseHealthStatus, CoreError> {
        self.document_repository.readness().await
    }

    async fn health(&self) -> Result<u64, CoreError> {
        self.document_repository.health().await
    }
}
