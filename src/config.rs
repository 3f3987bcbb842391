// src/config.rs
use anyhow::{Context, Result};
use std::{net::SocketAddr, path::PathBuf, time::Duration};

/// Outbound HTTP timeout used when `HTTP_TIMEOUT_SECS` is not set.
pub const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 10;

/// Settings for the RapidAPI JSearch adapter.
#[derive(Debug, Clone)]
pub struct JSearchConfig {
    pub api_key: Option<String>,
    pub api_host: String,
    pub base_url: String,
    pub country: String,
    pub language: String,
    pub date_posted: String,
}

impl Default for JSearchConfig {
    fn default() -> Self {
        let api_host = "jsearch.p.rapidapi.com".to_string();
        Self {
            api_key: None,
            base_url: format!("https://{}", api_host),
            api_host,
            country: "in".to_string(),
            language: "en".to_string(),
            date_posted: "all".to_string(),
        }
    }
}

/// Application configuration, read once at startup from the environment.
/// `main` loads `.env` before calling [`Config::from_env`].
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub session_secret: String,
    pub bind_addr: SocketAddr,
    pub jsearch: JSearchConfig,
    /// Base URL of a text-embeddings-inference server. `None` runs the model in-process.
    pub embedding_url: Option<String>,
    /// Where fastembed keeps downloaded model files.
    pub embedding_cache_dir: Option<PathBuf>,
    pub nco_dataset_path: PathBuf,
    pub results_snapshot_path: PathBuf,
    pub translate_base_url: String,
    pub translate_target: String,
    pub http_timeout: Duration,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        let session_secret = require_env("SESSION_SECRET")?;
        // tower-cookies refuses signing keys shorter than 64 bytes
        if session_secret.len() < 64 {
            anyhow::bail!("SESSION_SECRET must be at least 64 bytes long");
        }

        let jsearch_defaults = JSearchConfig::default();
        let api_host = optional_env("JSEARCH_API_HOST").unwrap_or(jsearch_defaults.api_host);
        let jsearch = JSearchConfig {
            api_key: optional_env("JSEARCH_API_KEY"),
            base_url: optional_env("JSEARCH_BASE_URL")
                .unwrap_or_else(|| format!("https://{}", api_host)),
            api_host,
            country: optional_env("JSEARCH_COUNTRY").unwrap_or(jsearch_defaults.country),
            language: optional_env("JSEARCH_LANGUAGE").unwrap_or(jsearch_defaults.language),
            date_posted: optional_env("JSEARCH_DATE_POSTED").unwrap_or(jsearch_defaults.date_posted),
        };

        let http_timeout_secs = match optional_env("HTTP_TIMEOUT_SECS") {
            Some(raw) => raw
                .parse::<u64>()
                .context("HTTP_TIMEOUT_SECS must be a whole number of seconds")?,
            None => DEFAULT_HTTP_TIMEOUT_SECS,
        };

        Ok(Config {
            database_url: require_env("DATABASE_URL")?,
            session_secret,
            bind_addr: optional_env("BIND_ADDR")
                .unwrap_or_else(|| "0.0.0.0:3000".to_string())
                .parse()
                .context("BIND_ADDR must be a socket address such as 0.0.0.0:3000")?,
            jsearch,
            embedding_url: optional_env("EMBEDDING_URL"),
            embedding_cache_dir: optional_env("EMBEDDING_CACHE_DIR").map(PathBuf::from),
            nco_dataset_path: optional_env("NCO_DATASET_PATH")
                .unwrap_or_else(|| "nco_2015_occupations.csv".to_string())
                .into(),
            results_snapshot_path: optional_env("RESULTS_SNAPSHOT_PATH")
                .unwrap_or_else(|| "job_results.csv".to_string())
                .into(),
            translate_base_url: optional_env("TRANSLATE_BASE_URL")
                .unwrap_or_else(|| "https://translate.googleapis.com".to_string()),
            translate_target: optional_env("TRANSLATE_TARGET").unwrap_or_else(|| "en".to_string()),
            http_timeout: Duration::from_secs(http_timeout_secs),
        })
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

// Empty values count as unset
fn optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}
