// src/state.rs
use crate::services::{search_service::JobSearchService, translation_service::Translator};
use sqlx::SqlitePool;
use std::sync::Arc;

// Built once in main, then shared read-only by every handler
#[derive(Clone)]
pub struct AppState {
    pub db_pool: SqlitePool,
    pub job_search: JobSearchService,
    pub translator: Arc<dyn Translator>,
}

