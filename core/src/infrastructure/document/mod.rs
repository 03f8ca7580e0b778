use uuid::Uuid;

use crate::domain::{
    common::entities::app_errors::CoreError,
    document::{
        entities::Document,
        ports::DocumentRepository,
        value_objects::{FindQuery, PageSlice},
    },
    health::{entities::DatabaseHealthStatus, ports::HealthCheckRepository},
};

pub mod memory;
pub mod postgres;
pub mod sql;

pub use memory::InMemoryDocumentRepository;
pub use postgres::PostgresDocumentRepository;

/// Storage backend selected at startup.
#[derive(Debug, Clone)]
pub enum AnyDocumentRepository {
    Postgres(PostgresDocumentRepository),
    Memory(InMemoryDocumentRepository),
}

impl DocumentRepository for AnyDocumentRepository {
    async fn find(&self, collection: &str, query: FindQuery) -> Result<Vec<Document>, CoreError> {
        match self {
            Self::Postgres(repository) => repository.find(collection, query).await,
            Self::Memory(repository) => repository.find(collection, query).await,
        }
    }

    async fn find_page(&self, collection: &str, query: FindQuery) -> Result<PageSlice, CoreError> {
        match self {
            Self::Postgres(repository) => repository.find_page(collection, query).await,
            Self::Memory(repository) => repository.find_page(collection, query).await,
        }
    }

    async fn get_by_id(&self, collection: &str, id: Uuid) -> Result<Option<Document>, CoreError> {
        match self {
            Self::Postgres(repository) => repository.get_by_id(collection, id).await,
            Self::Memory(repository) => repository.get_by_id(collection, id).await,
        }
    }

    async fn insert_many(
        &self,
        collection: &str,
        documents: Vec<Document>,
    ) -> Result<u64, CoreError> {
        match self {
            Self::Postgres(repository) => repository.insert_many(collection, documents).await,
            Self::Memory(repository) => repository.insert_many(collection, documents).await,
        }
    }

    async fn delete_all(&self, collection: &str) -> Result<u64, CoreError> {
        match self {
            Self::Postgres(repository) => repository.delete_all(collection).await,
            Self::Memory(repository) => repository.delete_all(collection).await,
        }
    }
}

impl HealthCheckRepository for AnyDocumentRepository {
    async fn health(&self) -> Result<u64, CoreError> {
        match self {
            Self::Postgres(repository) => repository.health().await,
            Self::Memory(repository) => repository.health().await,
        }
    }

    async fn readness(&self) -> Result<DatabaseHealthStatus, CoreError> {
        match self {
            Self::Postgres(repository) => repository.readness().await,
            Self::Memory(repository) => repository.readness().await,
        }
    }
}
