use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Storage kind of a declared field, used to cast query-string values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Id,
    Text,
    Number,
    Boolean,
    Date,
    TextList,
    NumberList,
    /// UUID of a document in another collection.
    Reference,
    Object,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    pub path: &'static str,
    pub kind: FieldKind,
}

const fn field(path: &'static str, kind: FieldKind) -> FieldSpec {
    FieldSpec { path, kind }
}

#[derive(Debug, PartialEq, Eq)]
pub struct ModelDescriptor {
    pub name: &'static str,
    pub collection: &'static str,
    pub fields: &'static [FieldSpec],
}

impl ModelDescriptor {
    pub fn field_kind(&self, path: &str) -> Option<FieldKind> {
        self.fields
            .iter()
            .find(|spec| spec.path == path)
            .map(|spec| spec.kind)
    }

    /// True for declared fields, their parents (`location` when
    /// `location.city` exists) and paths below an object field.
    pub fn has_field(&self, path: &str) -> bool {
        self.fields.iter().any(|spec| {
            spec.path == path
                || spec
                    .path
                    .strip_prefix(path)
                    .is_some_and(|rest| rest.starts_with('.'))
                || (spec.kind == FieldKind::Object
                    && path
                        .strip_prefix(spec.path)
                        .is_some_and(|rest| rest.starts_with('.')))
        })
    }
}

/// Route-level tag selecting how a category path segment is applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum ModelType {
    Bootcamp,
    Course,
}

/// Inline expansion of related documents.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Population {
    /// `path` holds the id of a document in `model`.
    Reference {
        path: &'static str,
        model: &'static ModelDescriptor,
        select: &'static [&'static str],
    },
    /// `path` is filled with every document of `model` whose
    /// `foreign_field` equals this document's id.
    Virtual {
        path: &'static str,
        model: &'static ModelDescriptor,
        foreign_field: &'static str,
        select: &'static [&'static str],
    },
}

pub static BOOTCAMP: ModelDescriptor = ModelDescriptor {
    name: "Bootcamp",
    collection: "bootcamps",
    fields: &[
        field("id", FieldKind::Id),
        field("name", FieldKind::Text),
        field("slug", FieldKind::Text),
        field("description", FieldKind::Text),
        field("user", FieldKind::Reference),
        field("website", FieldKind::Text),
        field("phone", FieldKind::Text),
        field("email", FieldKind::Text),
        field("address", FieldKind::Text),
        field("zipcode", FieldKind::Number),
        field("location.type", FieldKind::Text),
        field("location.coordinates", FieldKind::NumberList),
        field("location.formattedAddress", FieldKind::Text),
        field("location.street", FieldKind::Text),
        field("location.city", FieldKind::Text),
        field("location.state", FieldKind::Text),
        field("location.country", FieldKind::Text),
        field("location.zipCode", FieldKind::Text),
        field("careers", FieldKind::TextList),
        field("averageRating", FieldKind::Number),
        field("averageCost", FieldKind::Number),
        field("ratings", FieldKind::Number),
        field("photo", FieldKind::Text),
        field("housing", FieldKind::Boolean),
        field("jobAssistance", FieldKind::Boolean),
        field("jobGuarantee", FieldKind::Boolean),
        field("createdAt", FieldKind::Date),
    ],
};

pub static COURSE: ModelDescriptor = ModelDescriptor {
    name: "Course",
    collection: "courses",
    fields: &[
        field("id", FieldKind::Id),
        field("title", FieldKind::Text),
        field("description", FieldKind::Text),
        field("contentList", FieldKind::TextList),
        field("category", FieldKind::Text),
        field("weeks", FieldKind::Number),
        field("cost", FieldKind::Number),
        field("requirementDescription", FieldKind::Text),
        field("requiredSkillSet", FieldKind::Text),
        field("duration", FieldKind::Number),
        field("picture", FieldKind::Text),
        field("video", FieldKind::Text),
        field("bootcamp", FieldKind::Reference),
        field("user", FieldKind::Reference),
        field("averageRating", FieldKind::Number),
        field("ratings", FieldKind::Number),
        field("createdAt", FieldKind::Date),
    ],
};

pub static REVIEW: ModelDescriptor = ModelDescriptor {
    name: "Review",
    collection: "reviews",
    fields: &[
        field("id", FieldKind::Id),
        field("title", FieldKind::Text),
        field("review", FieldKind::Text),
        field("rating", FieldKind::Number),
        field("bootcamp", FieldKind::Reference),
        field("course", FieldKind::Reference),
        field("user", FieldKind::Reference),
        field("createdAt", FieldKind::Date),
    ],
};

/// Every course of a bootcamp, under `courses`.
pub static BOOTCAMP_COURSES: Population = Population::Virtual {
    path: "courses",
    model: &COURSE,
    foreign_field: "bootcamp",
    select: &[],
};

/// The owning bootcamp of a course, reduced to its name.
pub static COURSE_BOOTCAMP: Population = Population::Reference {
    path: "bootcamp",
    model: &BOOTCAMP,
    select: &["name"],
};

pub static REVIEW_BOOTCAMP: Population = Population::Reference {
    path: "bootcamp",
    model: &BOOTCAMP,
    select: &["name", "careers"],
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_has_field_accepts_parents_of_nested_fields() {
        assert!(BOOTCAMP.has_field("location"));
        assert!(BOOTCAMP.has_field("location.city"));
        assert!(!BOOTCAMP.has_field("loc"));
        assert!(!COURSE.has_field("price"));
    }

    #[test]
    fn test_field_kind_lookup() {
        assert_eq!(COURSE.field_kind("duration"), Some(FieldKind::Number));
        assert_eq!(REVIEW.field_kind("course"), Some(FieldKind::Reference));
        assert_eq!(REVIEW.field_kind("missing"), None);
    }
}
