// src/services/translation_service.rs
use crate::error::{AppError, AppResult};
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;

/// Auto-detecting translation into one fixed target language.
#[async_trait]
pub trait Translator: Send + Sync {
    async fn translate(&self, text: &str) -> AppResult<String>;
}

/// Rejects blank input, otherwise hands the trimmed text to `translator`.
pub async fn translate_text(translator: &dyn Translator, text: &str) -> AppResult<String> {
    let text = text.trim();
    if text.is_empty() {
        return Err(AppError::Validation("No text provided".to_string()));
    }
    translator.translate(text).await
}

/// Client for the public Google Translate endpoint (`client=gtx`).
#[derive(Clone)]
pub struct GoogleTranslator {
    client: Client,
    base_url: String,
    target: String,
}

impl GoogleTranslator {
    pub fn new(base_url: impl Into<String>, target: impl Into<String>, timeout: Duration) -> AppResult<Self> {
        let client = Client::builder().timeout(timeout).build().map_err(|e| {
            tracing::error!("Failed to build translation HTTP client: {}", e);
            AppError::ExternalService(e.to_string())
        })?;
        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            target: target.into(),
        })
    }
}

/// The body is `[[["<translated>", "<source>", ...], ...], ...]`; the
/// translation is the concatenation of every segment's first element.
fn extract_translation(body: &serde_json::Value) -> Option<String> {
    let segments = body.get(0)?.as_array()?;
    let translated: String = segments
        .iter()
        .filter_map(|segment| segment.get(0).and_then(|s| s.as_str()))
        .collect();
    if translated.is_empty() {
        None
    } else {
        Some(translated)
    }
}

#[async_trait]
impl Translator for GoogleTranslator {
    async fn translate(&self, text: &str) -> AppResult<String> {
        tracing::debug!("Translating {} chars to '{}'", text.len(), self.target);
        let response = self
            .client
            .get(format!("{}/translate_a/single", self.base_url))
            .query(&[
                ("client", "gtx"),
                ("sl", "auto"),
                ("tl", self.target.as_str()),
                ("dt", "t"),
                ("q", text),
            ])
            .send()
            .await
            .map_err(|e| AppError::ExternalService(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::warn!("Translation service returned {}: {}", status, body);
            return Err(AppError::ExternalService(format!(
                "translation service returned {status}"
            )));
        }

        let body: serde_json::Value = response
            .json()
            .await
            .map_err(|e| AppError::ExternalService(e.to_string()))?;
        extract_translation(&body).ok_or_else(|| {
            AppError::ExternalService("translation service returned no text".to_string())
        })
    }
}
