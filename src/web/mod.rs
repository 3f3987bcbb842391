// src/web/mod.rs
pub mod auth_handlers;
pub mod flash;
pub mod landing_handlers;
pub mod mw_auth;
pub mod routes;
pub mod search_handlers;
pub mod translate_handlers;
pub mod user_handlers;
