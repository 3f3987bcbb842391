// src/services/job_api.rs
//! Remote job source: RapidAPI JSearch. Failures of any kind degrade to an
//! empty list; the caller never sees an error from here.

use crate::{
    config::JSearchConfig,
    error::{AppError, AppResult},
    models::job::{JobQuery, JobRecord},
    services::job_source::JobSource,
};
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use std::time::Duration;

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    data: Vec<serde_json::Value>,
}

#[derive(Clone)]
pub struct JSearchClient {
    client: Client,
    config: JSearchConfig,
}

impl JSearchClient {
    pub fn new(config: JSearchConfig, timeout: Duration) -> AppResult<Self> {
        let client = Client::builder().timeout(timeout).build().map_err(|e| {
            tracing::error!("Failed to build job API HTTP client: {}", e);
            AppError::ExternalService(e.to_string())
        })?;
        Ok(Self { client, config })
    }

    /// Description, then " <industry>", then " <experience> level", skipping empty parts.
    pub fn compose_query(query: &JobQuery) -> String {
        let mut composed = query.description.clone();
        if !query.industry.is_empty() {
            composed.push(' ');
            composed.push_str(&query.industry);
        }
        if !query.experience.is_empty() {
            composed.push_str(&format!(" {} level", query.experience));
        }
        composed
    }

    async fn request_jobs(&self, api_key: &str, query: &str) -> Result<Vec<JobRecord>, String> {
        let url = format!("{}/search", self.config.base_url.trim_end_matches('/'));
        let response = self
            .client
            .get(&url)
            .header("X-RapidAPI-Key", api_key)
            .header("X-RapidAPI-Host", &self.config.api_host)
            .query(&[
                ("query", query),
                ("page", "1"),
                ("num_pages", "1"),
                ("date_posted", self.config.date_posted.as_str()),
                ("country", self.config.country.as_str()),
                ("language", self.config.language.as_str()),
            ])
            .send()
            .await
            .map_err(|e| format!("transport error: {e}"))?;

        let status = response.status();
        if status != StatusCode::OK {
            let body = response.text().await.unwrap_or_default();
            return Err(format!("status {status}: {body}"));
        }

        let body: SearchResponse = response
            .json()
            .await
            .map_err(|e| format!("undecodable body: {e}"))?;

        Ok(body
            .data
            .into_iter()
            .filter_map(|raw| match serde_json::from_value::<JobRecord>(raw) {
                Ok(job) => Some(job),
                Err(e) => {
                    tracing::warn!("Skipping malformed job record: {}", e);
                    None
                }
            })
            .collect())
    }
}

#[async_trait]
impl JobSource for JSearchClient {
    async fn fetch_jobs(&self, query: &JobQuery) -> AppResult<Vec<JobRecord>> {
        let Some(api_key) = self.config.api_key.as_deref() else {
            tracing::warn!("JSEARCH_API_KEY not set; skipping remote job search.");
            return Ok(Vec::new());
        };

        let composed = Self::compose_query(query);
        tracing::debug!("Querying job API for '{}'", composed);

        match self.request_jobs(api_key, &composed).await {
            Ok(jobs) => {
                tracing::info!("Job API returned {} jobs for '{}'", jobs.len(), composed);
                Ok(jobs)
            }
            Err(diagnostic) => {
                tracing::warn!("Error fetching data from job API: {}", diagnostic);
                Ok(Vec::new())
            }
        }
    }
}
