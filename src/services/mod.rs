// src/services/mod.rs
pub mod auth_service;
pub mod embedding;
pub mod job_api;
pub mod job_source;
pub mod nco_dataset;
pub mod ranker;
pub mod search_service;
pub mod snapshot;
pub mod translation_service;
pub mod user_service;
