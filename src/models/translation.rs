// src/models/translation.rs
use serde::{Deserialize, Serialize};

#[derive(Debug, Default, Deserialize)]
pub struct TranslateRequest {
    #[serde(default)]
    pub text: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct TranslateResponse {
    pub text: String,
}

#[derive(Debug, Serialize)]
pub struct TranslateErrorResponse {
    pub error: String,
}
