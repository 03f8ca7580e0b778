use std::path::{Path, PathBuf};

use bootcamp_core::{
    application::create_service,
    domain::{
        common::BootcampConfig,
        seed::{entities::SeedBatch, ports::SeedService},
    },
};
use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::{info, warn};
use validator::{Validate, ValidationErrors};

use crate::args::{Args, SeedAction};

pub mod validators;

use validators::{BootcampRecord, CourseRecord, ReviewRecord};

pub const BOOTCAMPS_FILE: &str = "bootcamps.json";
pub const COURSES_FILE: &str = "courses.json";
pub const REVIEWS_FILE: &str = "reviews.json";

#[derive(Debug, Error)]
pub enum SeedError {
    #[error("failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("invalid record {index} in {}: {source}", .path.display())]
    Invalid {
        path: PathBuf,
        index: usize,
        source: ValidationErrors,
    },
}

fn read_records<T>(dir: &Path, file: &str) -> Result<Vec<T>, SeedError>
where
    T: DeserializeOwned + Validate,
{
    let path = dir.join(file);
    if !path.exists() {
        warn!("{} not found, skipping", path.display());
        return Ok(Vec::new());
    }

    let content = std::fs::read_to_string(&path).map_err(|source| SeedError::Read {
        path: path.clone(),
        source,
    })?;
    let records: Vec<T> = serde_json::from_str(&content).map_err(|source| SeedError::Parse {
        path: path.clone(),
        source,
    })?;

    for (index, record) in records.iter().enumerate() {
        record.validate().map_err(|source| SeedError::Invalid {
            path: path.clone(),
            index,
            source,
        })?;
    }

    Ok(records)
}

/// Reads and validates the seed files of `dir`. Missing files are skipped.
pub fn load_seed_dir(dir: &Path) -> Result<SeedBatch, SeedError> {
    let bootcamps: Vec<BootcampRecord> = read_records(dir, BOOTCAMPS_FILE)?;
    let courses: Vec<CourseRecord> = read_records(dir, COURSES_FILE)?;
    let reviews: Vec<ReviewRecord> = read_records(dir, REVIEWS_FILE)?;

    Ok(SeedBatch {
        bootcamps: bootcamps.into_iter().map(BootcampRecord::into_bootcamp).collect(),
        courses: courses.into_iter().map(CourseRecord::into_course).collect(),
        reviews: reviews.into_iter().map(ReviewRecord::into_review).collect(),
    })
}

pub async fn run_seed_command(args: &Args, action: SeedAction) -> Result<(), anyhow::Error> {
    let service = create_service(BootcampConfig::from(args.clone())).await?;

    match action {
        SeedAction::Import { dir } => {
            let batch = load_seed_dir(&dir)?;
            let report = service.import_seed(batch).await?;
            info!(
                bootcamps = report.bootcamps,
                courses = report.courses,
                reviews = report.reviews,
                "imported seed data from {}",
                dir.display()
            );
        }
        SeedAction::Delete => {
            let report = service.destroy_seed().await?;
            info!(
                bootcamps = report.bootcamps,
                courses = report.courses,
                reviews = report.reviews,
                "deleted seed data"
            );
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("bootcamp-seed-{name}-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn test_missing_files_are_skipped() {
        let dir = scratch_dir("empty");
        let batch = load_seed_dir(&dir).unwrap();
        assert_eq!(batch, SeedBatch::default());
    }

    #[test]
    fn test_invalid_record_reports_file_and_index() {
        let dir = scratch_dir("invalid");
        std::fs::write(
            dir.join(REVIEWS_FILE),
            r#"[{"title": "Great", "review": "Loved it", "rating": 9, "bootcamp": "0b000000-0000-4000-8000-000000000001"}]"#,
        )
        .unwrap();

        let error = load_seed_dir(&dir).unwrap_err();
        assert!(matches!(error, SeedError::Invalid { index: 0, .. }));
        assert!(error.to_string().contains(REVIEWS_FILE));
    }

    #[test]
    fn test_malformed_json_is_a_parse_error() {
        let dir = scratch_dir("malformed");
        std::fs::write(dir.join(COURSES_FILE), "[{").unwrap();
        assert!(matches!(load_seed_dir(&dir), Err(SeedError::Parse { .. })));
    }

    #[test]
    fn test_loads_bundled_data() {
        let dir = Path::new(env!("CARGO_MANIFEST_DIR")).join("../data");
        let batch = load_seed_dir(&dir).unwrap();
        assert_eq!(batch.bootcamps.len(), 4);
        assert_eq!(batch.courses.len(), 12);
        assert_eq!(batch.reviews.len(), 7);
    }
}
