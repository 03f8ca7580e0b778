use serde::Serialize;

use crate::domain::model::entities::{Bootcamp, Course, Review};

/// Validated records to load in one import.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SeedBatch {
    pub bootcamps: Vec<Bootcamp>,
    pub courses: Vec<Course>,
    pub reviews: Vec<Review>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SeedReport {
    pub bootcamps: u64,
    pub courses: u64,
    pub reviews: u64,
}
