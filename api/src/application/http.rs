pub mod bootcamp;
pub mod course;
pub mod health;
pub mod query_extractor;
pub mod review;
pub mod server;
