pub mod get_course;
pub mod get_course_reviews;
pub mod get_courses;
pub mod get_courses_by_category;
