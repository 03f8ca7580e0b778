use std::time::Instant;

use sea_orm::{
    AccessMode, ConnectionTrait, DatabaseBackend, DatabaseConnection, DbErr, IsolationLevel,
    QueryResult, Statement, TransactionTrait,
};
use tracing::error;
use uuid::Uuid;

use crate::domain::{
    common::entities::app_errors::CoreError,
    document::{
        entities::{Document, document_id},
        ports::DocumentRepository,
        value_objects::{FindQuery, PageSlice, Projection, json_object},
    },
    health::{entities::DatabaseHealthStatus, ports::HealthCheckRepository},
};
use crate::infrastructure::document::sql::{count_statement, select_statement};

#[derive(Debug, Clone)]
pub struct PostgresDocumentRepository {
    pub db: DatabaseConnection,
}

impl PostgresDocumentRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

/// `COUNT(*)` always yields exactly one non-negative row.
fn decode_total(collection: &str, count: Result<Option<i64>, DbErr>) -> Result<u64, CoreError> {
    let count = count.map_err(|e| {
        error!("Failed to decode count of {}: {}", collection, e);
        CoreError::InternalServerError
    })?;
    let count = count.ok_or_else(|| {
        error!("Failed to decode count of {}: no row returned", collection);
        CoreError::InternalServerError
    })?;
    u64::try_from(count).map_err(|e| {
        error!("Failed to decode count of {}: {}", collection, e);
        CoreError::InternalServerError
    })
}

fn decode_rows(
    rows: Vec<QueryResult>,
    projection: Option<&Projection>,
) -> Result<Vec<Document>, CoreError> {
    rows.into_iter()
        .map(|row| {
            let body = row.try_get::<serde_json::Value>("", "body").map_err(|e| {
                error!("Failed to decode document body: {}", e);
                CoreError::InternalServerError
            })?;
            let document = json_object(body).ok_or_else(|| {
                error!("Stored document body is not an object");
                CoreError::InternalServerError
            })?;
            Ok(match projection {
                Some(projection) => projection.apply(document),
                None => document,
            })
        })
        .collect()
}

impl DocumentRepository for PostgresDocumentRepository {
    async fn find(&self, collection: &str, query: FindQuery) -> Result<Vec<Document>, CoreError> {
        let rows = self
            .db
            .query_all(select_statement(collection, &query))
            .await
            .map_err(|e| {
                error!("Failed to query {}: {}", collection, e);
                CoreError::InternalServerError
            })?;

        decode_rows(rows, query.projection.as_ref())
    }

    async fn find_page(&self, collection: &str, query: FindQuery) -> Result<PageSlice, CoreError> {
        let txn = self
            .db
            .begin_with_config(
                Some(IsolationLevel::RepeatableRead),
                Some(AccessMode::ReadOnly),
            )
            .await
            .map_err(|e| {
                error!("Failed to open read snapshot: {}", e);
                CoreError::InternalServerError
            })?;

        let count = txn
            .query_one(count_statement(collection, &query.filter))
            .await
            .map_err(|e| {
                error!("Failed to count {}: {}", collection, e);
                CoreError::InternalServerError
            })?;
        let total = decode_total(
            collection,
            count.map(|row| row.try_get::<i64>("", "count")).transpose(),
        )?;

        let rows = txn
            .query_all(select_statement(collection, &query))
            .await
            .map_err(|e| {
                error!("Failed to fetch page of {}: {}", collection, e);
                CoreError::InternalServerError
            })?;

        txn.commit().await.map_err(|e| {
            error!("Failed to close read snapshot: {}", e);
            CoreError::InternalServerError
        })?;

        Ok(PageSlice {
            total,
            documents: decode_rows(rows, query.projection.as_ref())?,
        })
    }

    async fn get_by_id(&self, collection: &str, id: Uuid) -> Result<Option<Document>, CoreError> {
        let statement = Statement::from_sql_and_values(
            DatabaseBackend::Postgres,
            "SELECT body FROM documents WHERE collection = $1 AND id = $2",
            [collection.into(), id.into()],
        );

        let row = self.db.query_one(statement).await.map_err(|e| {
            error!("Failed to get {} {}: {}", collection, id, e);
            CoreError::InternalServerError
        })?;

        Ok(decode_rows(row.into_iter().collect(), None)?.pop())
    }

    async fn insert_many(
        &self,
        collection: &str,
        documents: Vec<Document>,
    ) -> Result<u64, CoreError> {
        let txn = self.db.begin().await.map_err(|e| {
            error!("Failed to begin insert into {}: {}", collection, e);
            CoreError::InternalServerError
        })?;

        let mut inserted = 0;
        for document in documents {
            let id = document_id(&document)
                .and_then(|id| Uuid::parse_str(id).ok())
                .ok_or_else(|| {
                    CoreError::InvalidDocument(format!("document in {collection} has no valid id"))
                })?;

            let statement = Statement::from_sql_and_values(
                DatabaseBackend::Postgres,
                r#"
                INSERT INTO documents (collection, id, body, created_at)
                VALUES ($1, $2, $3, COALESCE(($3::jsonb ->> 'createdAt')::timestamptz, now()))
                ON CONFLICT (collection, id) DO UPDATE SET body = EXCLUDED.body
                "#,
                [
                    collection.into(),
                    id.into(),
                    serde_json::Value::Object(document).into(),
                ],
            );

            let result = txn.execute(statement).await.map_err(|e| {
                error!("Failed to insert into {}: {}", collection, e);
                CoreError::InternalServerError
            })?;
            inserted += result.rows_affected();
        }

        txn.commit().await.map_err(|e| {
            error!("Failed to commit insert into {}: {}", collection, e);
            CoreError::InternalServerError
        })?;

        Ok(inserted)
    }

    async fn delete_all(&self, collection: &str) -> Result<u64, CoreError> {
        let statement = Statement::from_sql_and_values(
            DatabaseBackend::Postgres,
            "DELETE FROM documents WHERE collection = $1",
            [collection.into()],
        );

        let result = self.db.execute(statement).await.map_err(|e| {
            error!("Failed to delete {}: {}", collection, e);
            CoreError::InternalServerError
        })?;

        Ok(result.rows_affected())
    }
}

impl HealthCheckRepository for PostgresDocumentRepository {
    async fn health(&self) -> Result<u64, CoreError> {
        let started = Instant::now();
        self.db.ping().await.map_err(|e| {
            error!("Database ping failed: {}", e);
            CoreError::ServiceUnavailable(e.to_string())
        })?;
        Ok(started.elapsed().as_millis() as u64)
    }

    async fn readness(&self) -> Result<DatabaseHealthStatus, CoreError> {
        let latency = self.health().await?;
        Ok(DatabaseHealthStatus::up("postgres", latency))
    }
}
