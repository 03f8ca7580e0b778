use std::future::Future;
use uuid::Uuid;

use crate::domain::{
    common::entities::app_errors::CoreError,
    document::{
        entities::Document,
        value_objects::{FindQuery, PageSlice},
    },
};

/// Document-query capability over named collections.
#[cfg_attr(test, mockall::automock)]
pub trait DocumentRepository: Send + Sync {
    /// All documents matching the query, sorted, windowed and projected.
    fn find(
        &self,
        collection: &str,
        query: FindQuery,
    ) -> impl Future<Output = Result<Vec<Document>, CoreError>> + Send;

    /// Count of every match plus the requested window. Both reads must
    /// observe the same snapshot.
    fn find_page(
        &self,
        collection: &str,
        query: FindQuery,
    ) -> impl Future<Output = Result<PageSlice, CoreError>> + Send;

    fn get_by_id(
        &self,
        collection: &str,
        id: Uuid,
    ) -> impl Future<Output = Result<Option<Document>, CoreError>> + Send;

    /// Inserts or replaces documents by id.
    fn insert_many(
        &self,
        collection: &str,
        documents: Vec<Document>,
    ) -> impl Future<Output = Result<u64, CoreError>> + Send;

    fn delete_all(&self, collection: &str)
    -> impl Future<Output = Result<u64, CoreError>> + Send;
}
