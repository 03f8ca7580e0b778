use std::borrow::Cow;

use bootcamp_core::domain::{
    common::generate_uuid_v7,
    model::entities::{Bootcamp, Course, Location, Review},
};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use uuid::Uuid;
use validator::{Validate, ValidationError};

pub const CAREERS: &[&str] = &[
    "web development",
    "native application development",
    "game development",
    "data structures and algorithms",
    "data science",
    "digital marketing",
    "devops",
];

pub const COURSE_CATEGORIES: &[&str] = &[
    "development",
    "design",
    "data science",
    "digital marketing",
    "finance",
];

pub const SKILL_LEVELS: &[&str] = &["beginner", "intermediate", "advanced"];

pub const DEFAULT_PHOTO: &str = "no-photo.jpg";

fn one_of(value: &str, allowed: &[&str], code: &'static str) -> Result<(), ValidationError> {
    if allowed.contains(&value) {
        return Ok(());
    }
    let mut error = ValidationError::new(code);
    error.message = Some(Cow::Owned(format!(
        "`{value}` is not one of: {}",
        allowed.join(", ")
    )));
    Err(error)
}

#[allow(clippy::ptr_arg)]
fn validate_careers(careers: &Vec<String>) -> Result<(), ValidationError> {
    careers
        .iter()
        .try_for_each(|career| one_of(career, CAREERS, "career"))
}

fn validate_category(category: &str) -> Result<(), ValidationError> {
    one_of(category, COURSE_CATEGORIES, "category")
}

fn validate_skill_level(level: &str) -> Result<(), ValidationError> {
    one_of(level, SKILL_LEVELS, "required_skill_set")
}

#[allow(clippy::ptr_arg)]
fn validate_content_list(content: &Vec<String>) -> Result<(), ValidationError> {
    if content.is_empty() {
        return Err(ValidationError::new("content_list")
            .with_message(Cow::Borrowed("a course needs at least one content entry")));
    }
    if content.iter().any(|entry| entry.chars().count() > 100) {
        return Err(ValidationError::new("content_list")
            .with_message(Cow::Borrowed("content entries are limited to 100 characters")));
    }
    Ok(())
}

fn validate_review_target(record: &ReviewRecord) -> Result<(), ValidationError> {
    if record.bootcamp.is_none() && record.course.is_none() {
        return Err(ValidationError::new("review_target")
            .with_message(Cow::Borrowed("a review needs a bootcamp or a course")));
    }
    Ok(())
}

fn default_photo() -> String {
    DEFAULT_PHOTO.to_string()
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct BootcampRecord {
    #[serde(default)]
    pub id: Option<Uuid>,

    #[validate(length(min = 1, max = 50, message = "name is required, at most 50 characters"))]
    pub name: String,

    #[validate(length(
        min = 1,
        max = 500,
        message = "description is required, at most 500 characters"
    ))]
    pub description: String,

    #[serde(default)]
    pub user: Option<Uuid>,

    #[validate(url(message = "website must be a valid url"))]
    pub website: Option<String>,

    #[validate(length(max = 20, message = "phone is at most 20 characters"))]
    pub phone: Option<String>,

    #[validate(email(message = "email must be a valid address"))]
    pub email: Option<String>,

    #[validate(length(min = 1, message = "address is required"))]
    pub address: String,

    #[serde(default)]
    pub zipcode: Option<i64>,

    #[serde(default)]
    pub location: Option<Location>,

    #[validate(
        length(min = 1, message = "at least one career is required"),
        custom(function = "validate_careers")
    )]
    pub careers: Vec<String>,

    #[serde(default = "default_photo")]
    pub photo: String,

    #[serde(default)]
    pub housing: bool,

    #[serde(default)]
    pub job_assistance: bool,

    #[serde(default)]
    pub job_guarantee: bool,

    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl BootcampRecord {
    /// Slug and aggregates are left empty; the import derives them.
    pub fn into_bootcamp(self) -> Bootcamp {
        Bootcamp {
            id: self.id.unwrap_or_else(generate_uuid_v7),
            name: self.name,
            slug: String::new(),
            description: self.description,
            user: self.user,
            website: self.website,
            phone: self.phone,
            email: self.email,
            address: self.address,
            zipcode: self.zipcode,
            location: self.location,
            careers: self.careers,
            average_rating: None,
            average_cost: None,
            ratings: 0,
            photo: self.photo,
            housing: self.housing,
            job_assistance: self.job_assistance,
            job_guarantee: self.job_guarantee,
            created_at: self.created_at.unwrap_or_else(Utc::now),
        }
    }
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CourseRecord {
    #[serde(default)]
    pub id: Option<Uuid>,

    #[validate(length(min = 1, max = 100, message = "title is required, at most 100 characters"))]
    pub title: String,

    #[validate(length(
        min = 1,
        max = 500,
        message = "description is required, at most 500 characters"
    ))]
    pub description: String,

    #[validate(custom(function = "validate_content_list"))]
    pub content_list: Vec<String>,

    #[validate(custom(function = "validate_category"))]
    pub category: String,

    #[validate(range(min = 1, message = "weeks must be positive"))]
    pub weeks: u32,

    #[validate(range(min = 0.0, message = "cost cannot be negative"))]
    pub cost: f64,

    #[validate(length(min = 1, message = "requirementDescription is required"))]
    pub requirement_description: String,

    #[validate(custom(function = "validate_skill_level"))]
    pub required_skill_set: String,

    #[validate(range(min = 0.0, message = "duration cannot be negative"))]
    pub duration: f64,

    #[serde(default = "default_photo")]
    pub picture: String,

    #[serde(default)]
    pub video: Option<String>,

    pub bootcamp: Uuid,

    #[serde(default)]
    pub user: Option<Uuid>,

    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl CourseRecord {
    pub fn into_course(self) -> Course {
        Course {
            id: self.id.unwrap_or_else(generate_uuid_v7),
            title: self.title,
            description: self.description,
            content_list: self.content_list,
            category: self.category,
            weeks: self.weeks,
            cost: self.cost,
            requirement_description: self.requirement_description,
            required_skill_set: self.required_skill_set,
            duration: self.duration,
            picture: self.picture,
            video: self.video,
            bootcamp: self.bootcamp,
            user: self.user,
            average_rating: None,
            ratings: 0,
            created_at: self.created_at.unwrap_or_else(Utc::now),
        }
    }
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
#[validate(schema(function = "validate_review_target"))]
pub struct ReviewRecord {
    #[serde(default)]
    pub id: Option<Uuid>,

    #[validate(length(min = 1, max = 100, message = "title is required, at most 100 characters"))]
    pub title: String,

    #[validate(length(min = 1, max = 500, message = "review is required, at most 500 characters"))]
    pub review: String,

    #[validate(range(min = 1.0, max = 5.0, message = "rating must be between 1 and 5"))]
    pub rating: f64,

    #[serde(default)]
    pub bootcamp: Option<Uuid>,

    #[serde(default)]
    pub course: Option<Uuid>,

    #[serde(default)]
    pub user: Option<Uuid>,

    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl ReviewRecord {
    pub fn into_review(self) -> Review {
        Review {
            id: self.id.unwrap_or_else(generate_uuid_v7),
            title: self.title,
            review: self.review,
            rating: self.rating,
            bootcamp: self.bootcamp,
            course: self.course,
            user: self.user,
            created_at: self.created_at.unwrap_or_else(Utc::now),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn course(overrides: serde_json::Value) -> CourseRecord {
        let mut value = json!({
            "title": "Front End Web Development",
            "description": "HTML, CSS and JavaScript",
            "contentList": ["HTML", "CSS"],
            "category": "development",
            "weeks": 8,
            "cost": 10000,
            "requirementDescription": "None",
            "requiredSkillSet": "beginner",
            "duration": 3,
            "bootcamp": "0b000000-0000-4000-8000-000000000001"
        });
        if let (Some(base), Some(extra)) = (value.as_object_mut(), overrides.as_object()) {
            base.extend(extra.clone());
        }
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_valid_course_gets_defaults() {
        let record = course(json!({}));
        assert!(record.validate().is_ok());

        let course = record.into_course();
        assert_eq!(course.picture, DEFAULT_PHOTO);
        assert_eq!(course.ratings, 0);
        assert!(course.average_rating.is_none());
    }

    #[test]
    fn test_course_enums_and_content_are_checked() {
        let errors = course(json!({"category": "cooking", "requiredSkillSet": "expert"}))
            .validate()
            .unwrap_err();
        let fields = errors.field_errors();
        assert!(fields.contains_key("category"));
        assert!(fields.contains_key("required_skill_set"));

        assert!(course(json!({"contentList": []})).validate().is_err());
        assert!(course(json!({"contentList": ["x".repeat(101)]})).validate().is_err());
    }

    #[test]
    fn test_review_needs_target_and_rating_range() {
        let orphan: ReviewRecord = serde_json::from_value(json!({
            "title": "Great",
            "review": "Learned a lot",
            "rating": 4
        }))
        .unwrap();
        assert!(orphan.validate().is_err());

        let out_of_range: ReviewRecord = serde_json::from_value(json!({
            "title": "Great",
            "review": "Learned a lot",
            "rating": 7,
            "course": "0c000000-0000-4000-8000-000000000001"
        }))
        .unwrap();
        assert!(out_of_range.validate().unwrap_err().field_errors().contains_key("rating"));
    }

    #[test]
    fn test_bootcamp_careers_and_contact_fields() {
        let record: BootcampRecord = serde_json::from_value(json!({
            "name": "Devworks Bootcamp",
            "description": "Full stack web development",
            "website": "not a url",
            "email": "devworks",
            "address": "233 Bay State Rd Boston MA 02215",
            "careers": ["web development", "basket weaving"]
        }))
        .unwrap();

        let errors = record.validate().unwrap_err();
        let fields = errors.field_errors();
        assert!(fields.contains_key("website"));
        assert!(fields.contains_key("email"));
        assert!(fields.contains_key("careers"));
    }
}
