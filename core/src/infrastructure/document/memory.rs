use std::{cmp::Ordering, collections::HashMap, sync::Arc};

use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::{
    common::entities::app_errors::CoreError,
    document::{
        entities::{Document, ID_FIELD, compare_values, document_id, value_at_path},
        ports::DocumentRepository,
        value_objects::{FindQuery, PageSlice, SortDirection, SortSpec},
    },
    health::{entities::DatabaseHealthStatus, ports::HealthCheckRepository},
};

type Collections = HashMap<String, Vec<Document>>;

/// Process-local document store. Every read runs under one read guard, so a
/// count and its page always agree.
#[derive(Debug, Clone, Default)]
pub struct InMemoryDocumentRepository {
    collections: Arc<RwLock<Collections>>,
}

impl InMemoryDocumentRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

fn order(sort: &[SortSpec], left: &Document, right: &Document) -> Ordering {
    sort.iter()
        .map(|spec| {
            let ordering = compare_values(
                value_at_path(left, &spec.field),
                value_at_path(right, &spec.field),
            );
            match spec.direction {
                SortDirection::Asc => ordering,
                SortDirection::Desc => ordering.reverse(),
            }
        })
        .find(|ordering| *ordering != Ordering::Equal)
        .unwrap_or_else(|| document_id(left).cmp(&document_id(right)))
}

fn matching(collections: &Collections, collection: &str, query: &FindQuery) -> Vec<Document> {
    let mut documents: Vec<Document> = collections
        .get(collection)
        .map(|documents| {
            documents
                .iter()
                .filter(|document| query.filter.matches(document))
                .cloned()
                .collect()
        })
        .unwrap_or_default();

    documents.sort_by(|left, right| order(&query.sort, left, right));
    documents
}

fn window_and_project(documents: Vec<Document>, query: &FindQuery) -> Vec<Document> {
    let windowed: Vec<Document> = match query.window {
        Some(window) => documents
            .into_iter()
            .skip(usize::try_from(window.skip).unwrap_or(usize::MAX))
            .take(usize::try_from(window.limit).unwrap_or(usize::MAX))
            .collect(),
        None => documents,
    };

    match &query.projection {
        Some(projection) => windowed
            .into_iter()
            .map(|document| projection.apply(document))
            .collect(),
        None => windowed,
    }
}

impl DocumentRepository for InMemoryDocumentRepository {
    async fn find(&self, collection: &str, query: FindQuery) -> Result<Vec<Document>, CoreError> {
        let collections = self.collections.read().await;
        let documents = matching(&collections, collection, &query);
        Ok(window_and_project(documents, &query))
    }

    async fn find_page(&self, collection: &str, query: FindQuery) -> Result<PageSlice, CoreError> {
        let collections = self.collections.read().await;
        let documents = matching(&collections, collection, &query);
        let total = documents.len() as u64;

        Ok(PageSlice {
            total,
            documents: window_and_project(documents, &query),
        })
    }

    async fn get_by_id(&self, collection: &str, id: Uuid) -> Result<Option<Document>, CoreError> {
        let id = id.to_string();
        let collections = self.collections.read().await;
        Ok(collections.get(collection).and_then(|documents| {
            documents
                .iter()
                .find(|document| document_id(document) == Some(id.as_str()))
                .cloned()
        }))
    }

    async fn insert_many(
        &self,
        collection: &str,
        documents: Vec<Document>,
    ) -> Result<u64, CoreError> {
        for document in &documents {
            let valid = document_id(document).is_some_and(|id| Uuid::parse_str(id).is_ok());
            if !valid {
                return Err(CoreError::InvalidDocument(format!(
                    "document in {collection} has no valid {ID_FIELD}"
                )));
            }
        }

        let mut collections = self.collections.write().await;
        let stored = collections.entry(collection.to_string()).or_default();
        let inserted = documents.len() as u64;

        for document in documents {
            let id = document_id(&document).map(str::to_string);
            match stored
                .iter_mut()
                .find(|existing| document_id(existing).map(str::to_string) == id)
            {
                Some(existing) => *existing = document,
                None => stored.push(document),
            }
        }

        Ok(inserted)
    }

    async fn delete_all(&self, collection: &str) -> Result<u64, CoreError> {
        let mut collections = self.collections.write().await;
        Ok(collections
            .remove(collection)
            .map_or(0, |documents| documents.len() as u64))
    }
}

impl HealthCheckRepository for InMemoryDocumentRepository {
    /// No I/O happens in process, so the latency is always 0.
    async fn health(&self) -> Result<u64, CoreError> {
        Ok(0)
    }

    async fn readness(&self) -> Result<DatabaseHealthStatus, CoreError> {
        let latency = self.health().await?;
        Ok(DatabaseHealthStatus::up("memory", latency))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{
        document::value_objects::{Projection, Window, json_object},
        query::filter::{FilterExpression, FilterOperator},
    };
    use serde_json::{Value, json};

    fn doc(value: Value) -> Document {
        json_object(value).unwrap()
    }

    fn id(n: u8) -> String {
        format!("00000000-0000-0000-0000-0000000000{n:02}")
    }

    async fn repository() -> InMemoryDocumentRepository {
        let repository = InMemoryDocumentRepository::new();
        repository
            .insert_many(
                "courses",
                vec![
                    doc(json!({"id": id(1), "title": "A", "cost": 300})),
                    doc(json!({"id": id(2), "title": "B", "cost": 100})),
                    doc(json!({"id": id(3), "title": "C"})),
                    doc(json!({"id": id(4), "title": "D", "cost": 200})),
                ],
            )
            .await
            .unwrap();
        repository
    }

    #[tokio::test]
    async fn test_find_page_counts_before_windowing() {
        let repository = repository().await;
        let slice = repository
            .find_page(
                "courses",
                FindQuery {
                    filter: FilterExpression::new().with_operator(
                        "cost",
                        FilterOperator::Gte,
                        json!(100),
                    ),
                    sort: vec![SortSpec::asc("cost")],
                    window: Some(Window { skip: 1, limit: 1 }),
                    projection: Some(Projection::include(["title"])),
                },
            )
            .await
            .unwrap();

        assert_eq!(slice.total, 3);
        assert_eq!(
            slice.documents,
            vec![doc(json!({"id": id(4), "title": "D"}))]
        );
    }

    #[tokio::test]
    async fn test_missing_sort_values_come_first_ascending() {
        let repository = repository().await;
        let ascending = repository
            .find(
                "courses",
                FindQuery {
                    sort: vec![SortSpec::asc("cost")],
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(ascending[0]["title"], "C");

        let descending = repository
            .find(
                "courses",
                FindQuery {
                    sort: vec![SortSpec::desc("cost")],
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(descending[0]["title"], "A");
        assert_eq!(descending[3]["title"], "C");
    }

    #[tokio::test]
    async fn test_insert_replaces_by_id() {
        let repository = repository().await;
        let inserted = repository
            .insert_many("courses", vec![doc(json!({"id": id(1), "title": "A2"}))])
            .await
            .unwrap();
        assert_eq!(inserted, 1);

        let found = repository
            .get_by_id("courses", Uuid::parse_str(&id(1)).unwrap())
            .await
            .unwrap()
            .unwrap();
        assert_eq!(found["title"], "A2");
        assert_eq!(repository.delete_all("courses").await.unwrap(), 4);
    }

    #[tokio::test]
    async fn test_insert_rejects_documents_without_uuid() {
        let repository = InMemoryDocumentRepository::new();
        let result = repository
            .insert_many("courses", vec![doc(json!({"id": "nope"}))])
            .await;
        assert!(matches!(result, Err(CoreError::InvalidDocument(_))));
    }

    #[tokio::test]
    async fn test_unknown_collection_is_empty() {
        let repository = InMemoryDocumentRepository::new();
        let slice = repository
            .find_page("reviews", FindQuery::default())
            .await
            .unwrap();
        assert_eq!(slice.total, 0);
        assert!(slice.documents.is_empty());
    }

    #[tokio::test]
    async fn test_memory_backend_is_always_ready() {
        let repository = InMemoryDocumentRepository::new();
        assert_eq!(repository.health().await, Ok(0));
        assert_eq!(
            repository.readness().await,
            Ok(DatabaseHealthStatus::up("memory", 0))
        );
    }
}
