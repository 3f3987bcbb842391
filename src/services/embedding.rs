// src/services/embedding.rs
//! Text → vector capability used by the ranker.
//!
//! Both backends produce `sentence-transformers/all-MiniLM-L12-v2` vectors.
//! `FastEmbedder` runs the model in-process and is the default;
//! `HttpEmbedder` talks to a text-embeddings-inference server instead.

use crate::error::{AppError, AppResult};
use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use fastembed::{EmbeddingModel, InitOptions, TextEmbedding};
use std::{
    path::PathBuf,
    sync::{Arc, Mutex},
    time::Duration,
};

/// Dimension of all-MiniLM-L12-v2 vectors.
pub const EMBEDDING_DIM: usize = 384;

const HTTP_BATCH_SIZE: usize = 64;
const LOCAL_BATCH_SIZE: usize = 32;

#[async_trait]
pub trait Embedder: Send + Sync {
    async fn encode(&self, text: &str) -> AppResult<Vec<f32>>;

    /// One vector per input, in input order.
    async fn encode_batch(&self, texts: &[String]) -> AppResult<Vec<Vec<f32>>> {
        let mut vectors = Vec::with_capacity(texts.len());
        for text in texts {
            vectors.push(self.encode(text).await?);
        }
        Ok(vectors)
    }
}

/// `dot(a, b) / (‖a‖·‖b‖)`, or `0.0` when either vector has zero norm.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f64 {
    let (mut dot, mut norm_a, mut norm_b) = (0.0f64, 0.0f64, 0.0f64);
    for (x, y) in a.iter().zip(b) {
        let (x, y) = (f64::from(*x), f64::from(*y));
        dot += x * y;
        norm_a += x * x;
        norm_b += y * y;
    }
    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }
    (dot / (norm_a.sqrt() * norm_b.sqrt())).clamp(-1.0, 1.0)
}

// ────────────────────────────────────────────────────────────────────────────
// HttpEmbedder
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
struct EmbedRequest<'a> {
    inputs: &'a [String],
}

#[derive(Clone)]
pub struct HttpEmbedder {
    client: Client,
    base_url: String,
}

impl HttpEmbedder {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> AppResult<Self> {
        let client = Client::builder().timeout(timeout).build().map_err(|e| {
            tracing::error!("Failed to build embedding HTTP client: {}", e);
            AppError::ExternalService(e.to_string())
        })?;
        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    async fn embed_chunk(&self, inputs: &[String]) -> AppResult<Vec<Vec<f32>>> {
        let response = self
            .client
            .post(format!("{}/embed", self.base_url))
            .json(&EmbedRequest { inputs })
            .send()
            .await
            .map_err(|e| AppError::ExternalService(format!("embedding request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::warn!("Embedding service returned {}: {}", status, body);
            return Err(AppError::ExternalService(format!(
                "embedding service returned {status}"
            )));
        }

        let vectors: Vec<Vec<f32>> = response
            .json()
            .await
            .map_err(|e| AppError::ExternalService(format!("bad embedding response: {e}")))?;
        if vectors.len() != inputs.len() {
            return Err(AppError::ExternalService(format!(
                "embedding service returned {} vectors for {} inputs",
                vectors.len(),
                inputs.len()
            )));
        }
        Ok(vectors)
    }
}

#[async_trait]
impl Embedder for HttpEmbedder {
    async fn encode(&self, text: &str) -> AppResult<Vec<f32>> {
        let mut vectors = self.embed_chunk(&[text.to_string()]).await?;
        vectors.pop().ok_or_else(|| {
            AppError::ExternalService("embedding service returned no vector".to_string())
        })
    }

    async fn encode_batch(&self, texts: &[String]) -> AppResult<Vec<Vec<f32>>> {
        let mut vectors = Vec::with_capacity(texts.len());
        for chunk in texts.chunks(HTTP_BATCH_SIZE) {
            vectors.extend(self.embed_chunk(chunk).await?);
        }
        tracing::debug!("Embedded {} texts via {}", texts.len(), self.base_url);
        Ok(vectors)
    }
}

// ────────────────────────────────────────────────────────────────────────────
// FastEmbedder
// ────────────────────────────────────────────────────────────────────────────

/// In-process all-MiniLM-L12-v2 through fastembed's ONNX runtime.
///
/// Inference is CPU-bound, so every call runs on the blocking pool.
#[derive(Clone)]
pub struct FastEmbedder {
    model: Arc<Mutex<TextEmbedding>>,
}

impl FastEmbedder {
    /// Loads the model, downloading it into `cache_dir` on first use.
    /// Blocking; call it from `spawn_blocking` inside a runtime.
    pub fn try_new(cache_dir: Option<PathBuf>) -> AppResult<Self> {
        let mut options =
            InitOptions::new(EmbeddingModel::AllMiniLML12V2).with_show_download_progress(false);
        if let Some(dir) = cache_dir {
            options = options.with_cache_dir(dir);
        }
        let model = TextEmbedding::try_new(options).map_err(|e| {
            tracing::error!("Failed to load embedding model: {}", e);
            AppError::ExternalService(format!("failed to load embedding model: {e}"))
        })?;
        Ok(Self {
            model: Arc::new(Mutex::new(model)),
        })
    }

    async fn embed_all(&self, texts: Vec<String>) -> AppResult<Vec<Vec<f32>>> {
        let model = Arc::clone(&self.model);
        let count = texts.len();
        let vectors = tokio::task::spawn_blocking(move || {
            let guard = model.lock().map_err(|_| {
                tracing::error!("Embedding model mutex poisoned");
                AppError::InternalServerError
            })?;
            guard
                .embed(texts, Some(LOCAL_BATCH_SIZE))
                .map_err(|e| AppError::ExternalService(format!("embedding failed: {e}")))
        })
        .await
        .map_err(|e| {
            tracing::error!("spawn_blocking task failed (embed): {:?}", e);
            AppError::InternalServerError
        })??;

        if vectors.len() != count {
            return Err(AppError::ExternalService(format!(
                "embedding model returned {} vectors for {} inputs",
                vectors.len(),
                count
            )));
        }
        Ok(vectors)
    }
}

#[async_trait]
impl Embedder for FastEmbedder {
    async fn encode(&self, text: &str) -> AppResult<Vec<f32>> {
        let mut vectors = self.embed_all(vec![text.to_string()]).await?;
        vectors
            .pop()
            .ok_or_else(|| AppError::ExternalService("embedding model returned no vector".to_string()))
    }

    async fn encode_batch(&self, texts: &[String]) -> AppResult<Vec<Vec<f32>>> {
        let vectors = self.embed_all(texts.to_vec()).await?;
        tracing::debug!("Embedded {} texts locally", texts.len());
        Ok(vectors)
    }
}
