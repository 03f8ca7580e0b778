pub mod common;
pub mod document;
pub mod health;
pub mod model;
pub mod query;
pub mod seed;
