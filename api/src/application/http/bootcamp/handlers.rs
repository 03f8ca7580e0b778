pub mod get_bootcamp;
pub mod get_bootcamp_courses;
pub mod get_bootcamp_reviews;
pub mod get_bootcamps;
pub mod get_bootcamps_by_category;
