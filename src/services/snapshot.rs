// src/services/snapshot.rs
use crate::{
    error::{AppError, AppResult},
    models::job::JobRecord,
};
use std::path::{Path, PathBuf};

pub const SNAPSHOT_HEADER: [&str; 6] = ["Title", "Company", "Location", "Source", "Match Score", "Link"];

/// Replaces the results snapshot at `path` with `jobs`.
///
/// Rows go to a temporary file next to `path` which is then renamed over it,
/// so readers see either the old snapshot or the new one.
pub async fn write_snapshot(path: &Path, jobs: &[JobRecord]) -> AppResult<()> {
    let path = path.to_path_buf();
    let jobs = jobs.to_vec();
    let count = jobs.len();
    let target = path.clone();

    tokio::task::spawn_blocking(move || write_atomically(&path, &jobs))
        .await
        .map_err(|e| {
            tracing::error!("spawn_blocking task failed (write snapshot): {:?}", e);
            AppError::InternalServerError
        })??;

    tracing::debug!("Wrote {} results to {}", count, target.display());
    Ok(())
}

fn write_atomically(path: &Path, jobs: &[JobRecord]) -> AppResult<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    };
    let temp = tempfile::NamedTempFile::new_in(&dir)?;

    let mut writer = csv::Writer::from_writer(temp.as_file());
    writer.write_record(SNAPSHOT_HEADER)?;
    for job in jobs {
        let score = format_score(job.match_score);
        writer.write_record([
            job.job_title.as_str(),
            job.employer_name.as_str(),
            job.job_city.as_str(),
            job.job_publisher.as_str(),
            score.as_str(),
            job.job_apply_link.as_str(),
        ])?;
    }
    writer.flush()?;
    drop(writer);

    temp.persist(path).map_err(|e| AppError::Io(e.error))?;
    Ok(())
}

// Whole scores keep their ".0" (42.0, not 42)
fn format_score(score: f64) -> String {
    format!("{score:?}")
}
