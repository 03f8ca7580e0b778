pub mod descriptors;
pub mod entities;

pub use descriptors::{
    BOOTCAMP, BOOTCAMP_COURSES, COURSE, COURSE_BOOTCAMP, REVIEW, REVIEW_BOOTCAMP,
};
