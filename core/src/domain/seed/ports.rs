use crate::domain::{
    common::entities::app_errors::CoreError,
    seed::entities::{SeedBatch, SeedReport},
};

pub trait SeedService: Send + Sync {
    /// Derives slugs and rating/cost aggregates, then stores every record.
    fn import_seed(
        &self,
        batch: SeedBatch,
    ) -> impl Future<Output = Result<SeedReport, CoreError>> + Send;

    /// Empties the bootcamp, course and review collections.
    fn destroy_seed(&self) -> impl Future<Output = Result<SeedReport, CoreError>> + Send;
}
