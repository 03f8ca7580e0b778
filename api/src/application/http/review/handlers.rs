pub mod get_review;
