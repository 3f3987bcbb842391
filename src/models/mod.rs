// src/models/mod.rs
pub mod job;
pub mod translation;
pub mod user;
