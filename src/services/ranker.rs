// src/services/ranker.rs
use crate::{
    error::{AppError, AppResult},
    models::job::JobRecord,
    services::embedding::{cosine_similarity, Embedder},
};

/// Scores every job title against `query` and sorts by score, highest first.
///
/// `match_score` is the cosine similarity times 100, rounded to two decimals,
/// so it lies in `[-100, 100]`. The sort is stable: equal scores keep input order.
pub async fn rank(
    embedder: &dyn Embedder,
    query: &str,
    mut jobs: Vec<JobRecord>,
) -> AppResult<Vec<JobRecord>> {
    if jobs.is_empty() {
        return Ok(jobs);
    }

    let titles: Vec<String> = jobs.iter().map(|job| job.job_title.clone()).collect();
    let query_vector = embedder.encode(query).await?;
    let title_vectors = embedder.encode_batch(&titles).await?;

    if title_vectors.len() != jobs.len() {
        return Err(AppError::ExternalService(format!(
            "expected {} title embeddings, got {}",
            jobs.len(),
            title_vectors.len()
        )));
    }

    for (job, title_vector) in jobs.iter_mut().zip(&title_vectors) {
        if title_vector.len() != query_vector.len() {
            return Err(AppError::ExternalService(format!(
                "embedding dimension mismatch: {} vs {}",
                title_vector.len(),
                query_vector.len()
            )));
        }
        let similarity = cosine_similarity(&query_vector, title_vector);
        job.match_score = round_score(similarity * 100.0);
    }

    jobs.sort_by(|a, b| b.match_score.total_cmp(&a.match_score));
    tracing::debug!(
        "Ranked {} jobs for '{}' (best {:.2})",
        jobs.len(),
        query,
        jobs[0].match_score
    );
    Ok(jobs)
}

fn round_score(score: f64) -> f64 {
    (score * 100.0).round() / 100.0
}
