// src/services/nco_dataset.rs
use crate::{
    error::{AppError, AppResult},
    models::job::{JobQuery, JobRecord},
    services::job_source::JobSource,
};
use async_trait::async_trait;
use serde::Deserialize;
use std::path::{Path, PathBuf};

pub const NCO_EMPLOYER: &str = "NCO";
pub const NCO_PUBLISHER: &str = "NCO Database";

// Only the two columns we map; the file carries more
#[derive(Debug, Deserialize)]
struct OccupationRow {
    #[serde(rename = "Occupation_Title", default)]
    occupation_title: Option<String>,
    #[serde(rename = "Industry", default)]
    industry: Option<String>,
}

impl From<OccupationRow> for JobRecord {
    fn from(row: OccupationRow) -> Self {
        JobRecord {
            job_title: row.occupation_title.unwrap_or_default(),
            employer_name: NCO_EMPLOYER.to_string(),
            job_city: row.industry.unwrap_or_default(),
            job_publisher: NCO_PUBLISHER.to_string(),
            job_apply_link: String::new(),
            ..Default::default()
        }
    }
}

/// Local job source backed by the National Classification of Occupations CSV.
///
/// The file is re-read on every call and every row is returned; the query
/// does not filter anything.
#[derive(Debug, Clone)]
pub struct NcoDataset {
    path: PathBuf,
}

impl NcoDataset {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

fn read_occupations(path: &Path) -> AppResult<Vec<JobRecord>> {
    let mut reader = csv::Reader::from_path(path)?;
    let mut jobs = Vec::new();
    for row in reader.deserialize::<OccupationRow>() {
        jobs.push(row?.into());
    }
    Ok(jobs)
}

#[async_trait]
impl JobSource for NcoDataset {
    async fn fetch_jobs(&self, _query: &JobQuery) -> AppResult<Vec<JobRecord>> {
        let path = self.path.clone();
        let jobs = tokio::task::spawn_blocking(move || read_occupations(&path))
            .await
            .map_err(|e| {
                tracing::error!("spawn_blocking task failed (read NCO dataset): {:?}", e);
                AppError::InternalServerError
            })?
            .map_err(|e| {
                tracing::error!("Could not read NCO dataset {}: {}", self.path.display(), e);
                e
            })?;

        tracing::debug!("Loaded {} occupations from {}", jobs.len(), self.path.display());
        Ok(jobs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn dataset(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    fn query(description: &str) -> JobQuery {
        JobQuery {
            description: description.to_string(),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn rows_map_into_job_records() {
        let file = dataset(
            "NCO_Code,Occupation_Title,Industry\n\
             2511.01,Software Developer,Information Technology\n\
             4131.02,Data Entry Operator,\n",
        );

        let jobs = NcoDataset::new(file.path()).fetch_jobs(&query("software")).await.unwrap();

        assert_eq!(jobs.len(), 2);
        assert_eq!(jobs[0].job_title, "Software Developer");
        assert_eq!(jobs[0].employer_name, "NCO");
        assert_eq!(jobs[0].job_city, "Information Technology");
        assert_eq!(jobs[0].job_publisher, "NCO Database");
        assert_eq!(jobs[0].job_apply_link, "");
        assert_eq!(jobs[1].job_city, "");
    }

    #[tokio::test]
    async fn description_does_not_filter_rows() {
        let file = dataset("Occupation_Title,Industry\nCarpenter,Construction\nNurse,Health\n");
        let source = NcoDataset::new(file.path());

        let for_nurse = source.fetch_jobs(&query("nurse")).await.unwrap();
        let for_nothing = source.fetch_jobs(&query("zzz unrelated")).await.unwrap();

        assert_eq!(for_nurse, for_nothing);
        assert_eq!(for_nurse.len(), 2);
    }

    #[tokio::test]
    async fn missing_title_column_defaults_to_empty() {
        let file = dataset("Industry\nMining\n");
        let jobs = NcoDataset::new(file.path()).fetch_jobs(&query("x")).await.unwrap();
        assert_eq!(jobs[0].job_title, "");
        assert_eq!(jobs[0].job_city, "Mining");
    }

    #[tokio::test]
    async fn missing_file_is_an_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let source = NcoDataset::new(dir.path().join("absent.csv"));

        let err = source.fetch_jobs(&query("x")).await.unwrap_err();
        assert!(matches!(err, AppError::Csv(_) | AppError::Io(_)));
    }

    #[tokio::test]
    async fn ragged_rows_are_malformed() {
        let file = dataset("Occupation_Title,Industry\nWelder,Manufacturing,extra\n");
        let err = NcoDataset::new(file.path()).fetch_jobs(&query("x")).await.unwrap_err();
        assert!(matches!(err, AppError::Csv(_)));
    }
}
