// src/services/search_service.rs
use crate::{
    error::{AppError, AppResult},
    models::job::{JobQuery, JobRecord, JobSourceTag},
    services::{embedding::Embedder, job_source::JobSource, ranker, snapshot},
};
use std::{path::PathBuf, sync::Arc};

/// How many jobs a search returns and snapshots.
pub const RESULTS_LIMIT: usize = 5;

/// Runs one search: both sources, ranking, merge, snapshot.
#[derive(Clone)]
pub struct JobSearchService {
    remote: Arc<dyn JobSource>,
    local: Arc<dyn JobSource>,
    embedder: Arc<dyn Embedder>,
    snapshot_path: PathBuf,
}

impl JobSearchService {
    pub fn new(
        remote: Arc<dyn JobSource>,
        local: Arc<dyn JobSource>,
        embedder: Arc<dyn Embedder>,
        snapshot_path: impl Into<PathBuf>,
    ) -> Self {
        Self {
            remote,
            local,
            embedder,
            snapshot_path: snapshot_path.into(),
        }
    }

    pub async fn search(
        &self,
        description: &str,
        industry: &str,
        experience: &str,
    ) -> AppResult<Vec<JobRecord>> {
        let description = description.trim();
        if description.is_empty() {
            return Err(AppError::Validation(
                "Please enter a job description or skills.".to_string(),
            ));
        }

        let query = JobQuery {
            description: description.to_string(),
            industry: industry.to_string(),
            experience: experience.to_string(),
        };

        let api_jobs = self.remote.fetch_jobs(&query).await?;
        let mut combined = self.rank_tagged(description, api_jobs, JobSourceTag::Api).await?;

        let nco_jobs = self.local.fetch_jobs(&query).await?;
        combined.extend(self.rank_tagged(description, nco_jobs, JobSourceTag::Nco).await?);

        combined.sort_by(|a, b| b.match_score.total_cmp(&a.match_score));
        combined.truncate(RESULTS_LIMIT);

        snapshot::write_snapshot(&self.snapshot_path, &combined).await?;
        tracing::info!(
            "Search '{}' produced {} results (top source: {})",
            description,
            combined.len(),
            combined.first().map(|j| j.source_label()).unwrap_or("-")
        );
        Ok(combined)
    }

    async fn rank_tagged(
        &self,
        description: &str,
        jobs: Vec<JobRecord>,
        tag: JobSourceTag,
    ) -> AppResult<Vec<JobRecord>> {
        let mut ranked = ranker::rank(self.embedder.as_ref(), description, jobs).await?;
        for job in &mut ranked {
            job.source = Some(tag);
        }
        Ok(ranked)
    }
}
