use uuid::Uuid;

use crate::domain::model::descriptors::{ModelDescriptor, ModelType, Population};

/// Query-string pairs in request order. Repeated keys are kept.
pub type RawQuery = Vec<(String, String)>;

/// Constrains a reference field to a parent document
/// (`/bootcamps/{id}/courses` scopes `bootcamp`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParentScope {
    pub field: &'static str,
    pub id: Uuid,
}

#[derive(Debug, Clone)]
pub struct AdvancedResultsInput {
    pub model: &'static ModelDescriptor,
    pub model_type: Option<ModelType>,
    pub populate: Vec<Population>,
    pub category: Option<String>,
    pub parent: Option<ParentScope>,
    pub query: RawQuery,
}

impl AdvancedResultsInput {
    pub fn new(model: &'static ModelDescriptor, query: RawQuery) -> Self {
        Self {
            model,
            model_type: None,
            populate: Vec::new(),
            category: None,
            parent: None,
            query,
        }
    }

    pub fn with_populate(mut self, populate: Vec<Population>) -> Self {
        self.populate = populate;
        self
    }

    pub fn with_category(mut self, model_type: ModelType, category: impl Into<String>) -> Self {
        self.model_type = Some(model_type);
        self.category = Some(category.into());
        self
    }

    pub fn with_parent(mut self, field: &'static str, id: Uuid) -> Self {
        self.parent = Some(ParentScope { field, id });
        self
    }
}

/// The document a review listing is scoped to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReviewTarget {
    Bootcamp(Uuid),
    Course(Uuid),
}

impl ReviewTarget {
    pub fn id(&self) -> Uuid {
        match self {
            ReviewTarget::Bootcamp(id) | ReviewTarget::Course(id) => *id,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ReviewResultsInput {
    pub target: Option<ReviewTarget>,
    pub populate: Vec<Population>,
    pub query: RawQuery,
}

#[derive(Debug, Clone)]
pub struct GetDocumentInput {
    pub model: &'static ModelDescriptor,
    pub id: Uuid,
    pub populate: Vec<Population>,
}
