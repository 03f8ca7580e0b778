use tracing::info;

use crate::{
    domain::common::{
        BootcampConfig, StorageBackend, entities::app_errors::CoreError, services::Service,
    },
    infrastructure::{
        db::postgres::{Postgres, PostgresConfig},
        document::{AnyDocumentRepository, InMemoryDocumentRepository, PostgresDocumentRepository},
    },
};

pub type BootcampService = Service<AnyDocumentRepository>;

pub async fn create_service(config: BootcampConfig) -> Result<BootcampService, CoreError> {
    let repository = match config.storage {
        StorageBackend::Postgres => {
            let database_url = config.database.url.clone().ok_or_else(|| {
                CoreError::Configuration(
                    "a database url is required for postgres storage".to_string(),
                )
            })?;

            let postgres = Postgres::new(PostgresConfig {
                database_url,
                max_connections: config.database.max_connections,
            })
            .await
            .map_err(|e| CoreError::ServiceUnavailable(format!("{e:#}")))?;

            AnyDocumentRepository::Postgres(PostgresDocumentRepository::new(postgres.get_db()))
        }
        StorageBackend::Memory => {
            info!("using in-memory document storage");
            AnyDocumentRepository::Memory(InMemoryDocumentRepository::new())
        }
    };

    Ok(Service::new(repository, config.query))
}
