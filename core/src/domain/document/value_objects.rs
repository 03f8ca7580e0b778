use serde_json::Value;

use crate::domain::{
    document::entities::{Document, ID_FIELD, remove_at_path, set_at_path, value_at_path},
    query::filter::FilterExpression,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Asc,
    Desc,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortSpec {
    pub field: String,
    pub direction: SortDirection,
}

impl SortSpec {
    pub fn asc(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            direction: SortDirection::Asc,
        }
    }

    pub fn desc(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            direction: SortDirection::Desc,
        }
    }
}

/// Field projection. Inclusion always keeps `id`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Projection {
    Include(Vec<String>),
    Exclude(Vec<String>),
}

impl Projection {
    pub fn include<I, S>(fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Projection::Include(fields.into_iter().map(Into::into).collect())
    }

    pub fn apply(&self, mut document: Document) -> Document {
        match self {
            Projection::Include(fields) => {
                let mut projected = Document::new();
                if let Some(id) = document.get(ID_FIELD) {
                    projected.insert(ID_FIELD.to_string(), id.clone());
                }
                for field in fields {
                    if let Some(value) = value_at_path(&document, field) {
                        set_at_path(&mut projected, field, value.clone());
                    }
                }
                projected
            }
            Projection::Exclude(fields) => {
                for field in fields {
                    remove_at_path(&mut document, field);
                }
                document
            }
        }
    }

    /// Adds a field to an inclusion projection; exclusions are left untouched
    /// unless they name the field.
    pub fn ensure(&mut self, field: &str) {
        match self {
            Projection::Include(fields) => {
                if !fields.iter().any(|f| f == field) {
                    fields.push(field.to_string());
                }
            }
            Projection::Exclude(fields) => fields.retain(|f| f != field),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Window {
    pub skip: u64,
    pub limit: u64,
}

/// A read against one collection, as handed to a [`DocumentRepository`].
///
/// [`DocumentRepository`]: crate::domain::document::ports::DocumentRepository
#[derive(Debug, Clone, Default)]
pub struct FindQuery {
    pub filter: FilterExpression,
    pub sort: Vec<SortSpec>,
    pub window: Option<Window>,
    pub projection: Option<Projection>,
}

impl FindQuery {
    pub fn new(filter: FilterExpression) -> Self {
        Self {
            filter,
            ..Default::default()
        }
    }

    pub fn with_projection(mut self, projection: Option<Projection>) -> Self {
        self.projection = projection;
        self
    }
}

/// Total matched count and the requested window, read from one snapshot.
#[derive(Debug, Clone, PartialEq)]
pub struct PageSlice {
    pub total: u64,
    pub documents: Vec<Document>,
}

pub fn json_object(value: Value) -> Option<Document> {
    match value {
        Value::Object(map) => Some(map),
        _ => None,
    }
}
