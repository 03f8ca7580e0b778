use std::{collections::HashMap, sync::LazyLock};

use regex::Regex;
use tracing::info;
use uuid::Uuid;

use crate::domain::{
    common::{entities::app_errors::CoreError, services::Service},
    document::ports::DocumentRepository,
    model::{
        BOOTCAMP, COURSE, REVIEW,
        entities::{Bootcamp, Course, Review, to_document},
    },
    seed::{
        entities::{SeedBatch, SeedReport},
        ports::SeedService,
    },
};

static NON_SLUG_CHARS: LazyLock<Result<Regex, regex::Error>> =
    LazyLock::new(|| Regex::new(r"[^a-z0-9]+"));

/// Lowercase, dash-separated form of a name ("Devworks Bootcamp" gives
/// "devworks-bootcamp").
pub fn slugify(name: &str) -> Result<String, CoreError> {
    let pattern = NON_SLUG_CHARS
        .as_ref()
        .map_err(|e| CoreError::Configuration(e.to_string()))?;
    let lowered = name.to_lowercase();
    Ok(pattern
        .replace_all(&lowered, "-")
        .trim_matches('-')
        .to_string())
}

/// Rounds to two significant digits.
pub fn two_significant_digits(value: f64) -> f64 {
    if value == 0.0 || !value.is_finite() {
        return value;
    }
    let magnitude = value.abs().log10().floor() as i32;
    let factor = 10f64.powi(1 - magnitude);
    (value * factor).round() / factor
}

fn mean(values: &[f64]) -> Option<f64> {
    (!values.is_empty()).then(|| values.iter().sum::<f64>() / values.len() as f64)
}

#[derive(Default)]
struct RatingTally {
    ratings: Vec<f64>,
}

impl RatingTally {
    fn average(&self) -> Option<f64> {
        mean(&self.ratings).map(two_significant_digits)
    }

    fn count(&self) -> u64 {
        self.ratings.len() as u64
    }
}

/// Fills the derived fields of every bootcamp and course from the batch.
pub fn derive_aggregates(batch: &mut SeedBatch) -> Result<(), CoreError> {
    let mut course_costs: HashMap<Uuid, Vec<f64>> = HashMap::new();
    for course in &batch.courses {
        course_costs.entry(course.bootcamp).or_default().push(course.cost);
    }

    let mut bootcamp_reviews: HashMap<Uuid, RatingTally> = HashMap::new();
    let mut course_reviews: HashMap<Uuid, RatingTally> = HashMap::new();
    for review in &batch.reviews {
        if let Some(bootcamp) = review.bootcamp {
            bootcamp_reviews
                .entry(bootcamp)
                .or_default()
                .ratings
                .push(review.rating);
        }
        if let Some(course) = review.course {
            course_reviews
                .entry(course)
                .or_default()
                .ratings
                .push(review.rating);
        }
    }

    for bootcamp in &mut batch.bootcamps {
        bootcamp.slug = slugify(&bootcamp.name)?;
        bootcamp.average_cost = course_costs
            .get(&bootcamp.id)
            .and_then(|costs| mean(costs))
            .map(f64::floor);
        let tally = bootcamp_reviews.get(&bootcamp.id);
        bootcamp.average_rating = tally.and_then(RatingTally::average);
        bootcamp.ratings = tally.map(RatingTally::count).unwrap_or(0);
    }

    for course in &mut batch.courses {
        let tally = course_reviews.get(&course.id);
        course.average_rating = tally.and_then(RatingTally::average);
        course.ratings = tally.map(RatingTally::count).unwrap_or(0);
    }

    Ok(())
}

fn check_references(batch: &SeedBatch) -> Result<(), CoreError> {
    if let Some(review) = batch
        .reviews
        .iter()
        .find(|review| review.bootcamp.is_none() && review.course.is_none())
    {
        return Err(CoreError::InvalidDocument(format!(
            "review {} needs a bootcamp or a course",
            review.id
        )));
    }
    Ok(())
}

impl<D> Service<D>
where
    D: DocumentRepository,
{
    async fn store<T: serde::Serialize>(
        &self,
        collection: &str,
        records: &[T],
    ) -> Result<u64, CoreError> {
        if records.is_empty() {
            return Ok(0);
        }
        let documents = records
            .iter()
            .map(to_document)
            .collect::<Result<Vec<_>, _>>()?;
        self.document_repository
            .insert_many(collection, documents)
            .await
    }
}

impl<D> SeedService for Service<D>
where
    D: DocumentRepository,
{
    async fn import_seed(&self, mut batch: SeedBatch) -> Result<SeedReport, CoreError> {
        check_references(&batch)?;
        derive_aggregates(&mut batch)?;

        let report = SeedReport {
            bootcamps: self
                .store::<Bootcamp>(BOOTCAMP.collection, &batch.bootcamps)
                .await?,
            courses: self.store::<Course>(COURSE.collection, &batch.courses).await?,
            reviews: self.store::<Review>(REVIEW.collection, &batch.reviews).await?,
        };

        info!(
            bootcamps = report.bootcamps,
            courses = report.courses,
            reviews = report.reviews,
            "seed data imported"
        );
        Ok(report)
    }

    async fn destroy_seed(&self) -> Result<SeedReport, CoreError> {
        let report = SeedReport {
            reviews: self.document_repository.delete_all(REVIEW.collection).await?,
            courses: self.document_repository.delete_all(COURSE.collection).await?,
            bootcamps: self
                .document_repository
                .delete_all(BOOTCAMP.collection)
                .await?,
        };

        info!(
            bootcamps = report.bootcamps,
            courses = report.courses,
            reviews = report.reviews,
            "seed data destroyed"
        );
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        domain::{common::QueryConfig, document::value_objects::FindQuery},
        infrastructure::document::memory::InMemoryDocumentRepository,
    };
    use chrono::{TimeZone, Utc};

    fn bootcamp(id: Uuid, name: &str) -> Bootcamp {
        Bootcamp {
            id,
            name: name.to_string(),
            slug: String::new(),
            description: "Full stack".to_string(),
            user: None,
            website: None,
            phone: None,
            email: None,
            address: "233 Bay State Rd Boston MA 02215".to_string(),
            zipcode: Some(2215),
            location: None,
            careers: vec!["web development".to_string()],
            average_rating: None,
            average_cost: None,
            ratings: 0,
            photo: "no-photo.jpg".to_string(),
            housing: false,
            job_assistance: true,
            job_guarantee: false,
            created_at: Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap(),
        }
    }

    fn course(id: Uuid, bootcamp: Uuid, cost: f64) -> Course {
        Course {
            id,
            title: "Front End".to_string(),
            description: "HTML and CSS".to_string(),
            content_list: vec!["HTML".to_string()],
            category: "development".to_string(),
            weeks: 8,
            cost,
            requirement_description: "None".to_string(),
            required_skill_set: "beginner".to_string(),
            duration: 2.0,
            picture: "no-photo.jpg".to_string(),
            video: None,
            bootcamp,
            user: None,
            average_rating: None,
            ratings: 0,
            created_at: Utc.with_ymd_and_hms(2026, 1, 2, 0, 0, 0).unwrap(),
        }
    }

    fn review(bootcamp: Option<Uuid>, course: Option<Uuid>, rating: f64) -> Review {
        Review {
            id: Uuid::new_v4(),
            title: "Nice".to_string(),
            review: "Good teachers".to_string(),
            rating,
            bootcamp,
            course,
            user: None,
            created_at: Utc.with_ymd_and_hms(2026, 1, 3, 0, 0, 0).unwrap(),
        }
    }

    #[test]
    fn test_slugify() {
        assert_eq!(slugify("Devworks Bootcamp").unwrap(), "devworks-bootcamp");
        assert_eq!(slugify("  Codemasters (2.0)! ").unwrap(), "codemasters-2-0");
    }

    #[test]
    fn test_two_significant_digits() {
        assert_eq!(two_significant_digits(4.333), 4.3);
        assert_eq!(two_significant_digits(4.0), 4.0);
        assert_eq!(two_significant_digits(10.6), 11.0);
    }

    #[test]
    fn test_derive_aggregates() {
        let camp = Uuid::new_v4();
        let course_id = Uuid::new_v4();
        let mut batch = SeedBatch {
            bootcamps: vec![bootcamp(camp, "Devworks Bootcamp")],
            courses: vec![
                course(course_id, camp, 10000.0),
                course(Uuid::new_v4(), camp, 12501.0),
            ],
            reviews: vec![
                review(Some(camp), None, 4.0),
                review(Some(camp), None, 5.0),
                review(Some(camp), None, 4.0),
                review(None, Some(course_id), 3.0),
            ],
        };

        derive_aggregates(&mut batch).unwrap();

        let bootcamp = &batch.bootcamps[0];
        assert_eq!(bootcamp.slug, "devworks-bootcamp");
        assert_eq!(bootcamp.average_cost, Some(11250.0));
        assert_eq!(bootcamp.average_rating, Some(4.3));
        assert_eq!(bootcamp.ratings, 3);

        assert_eq!(batch.courses[0].average_rating, Some(3.0));
        assert_eq!(batch.courses[0].ratings, 1);
        assert_eq!(batch.courses[1].average_rating, None);
        assert_eq!(batch.courses[1].ratings, 0);
    }

    #[tokio::test]
    async fn test_import_then_destroy() {
        let service = Service::new(InMemoryDocumentRepository::new(), QueryConfig::default());
        let camp = Uuid::new_v4();

        let report = service
            .import_seed(SeedBatch {
                bootcamps: vec![bootcamp(camp, "Devworks")],
                courses: vec![course(Uuid::new_v4(), camp, 100.0)],
                reviews: vec![review(Some(camp), None, 5.0)],
            })
            .await
            .unwrap();
        assert_eq!(
            report,
            SeedReport {
                bootcamps: 1,
                courses: 1,
                reviews: 1
            }
        );

        let stored = service
            .document_repository
            .find("bootcamps", FindQuery::default())
            .await
            .unwrap();
        assert_eq!(stored[0]["slug"], "devworks");
        assert_eq!(stored[0]["averageCost"], 100.0);

        let destroyed = service.destroy_seed().await.unwrap();
        assert_eq!(destroyed, report);
    }

    #[tokio::test]
    async fn test_orphan_review_is_rejected() {
        let service = Service::new(InMemoryDocumentRepository::new(), QueryConfig::default());
        let result = service
            .import_seed(SeedBatch {
                reviews: vec![review(None, None, 3.0)],
                ..Default::default()
            })
            .await;
        assert!(matches!(result, Err(CoreError::InvalidDocument(_))));
    }
}
