use crate::domain::{
    common::entities::app_errors::CoreError,
    document::Document,
    query::{
        envelope::ResponseEnvelope,
        value_objects::{AdvancedResultsInput, GetDocumentInput, ReviewResultsInput},
    },
};

pub trait ResultsService: Send + Sync {
    /// Filtered, sorted, paginated listing of one collection.
    fn advanced_results(
        &self,
        input: AdvancedResultsInput,
    ) -> impl Future<Output = Result<ResponseEnvelope, CoreError>> + Send;

    /// Reviews of one bootcamp or course, optionally with the rating
    /// distribution of every match.
    fn advanced_review_results(
        &self,
        input: ReviewResultsInput,
    ) -> impl Future<Output = Result<ResponseEnvelope, CoreError>> + Send;

    fn get_document(
        &self,
        input: GetDocumentInput,
    ) -> impl Future<Output = Result<Document, CoreError>> + Send;
}
