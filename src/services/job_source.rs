// src/services/job_source.rs
use crate::{error::AppResult, models::job::{JobQuery, JobRecord}};
use async_trait::async_trait;

/// Anything that can produce candidate jobs for a query.
///
/// Carried in `JobSearchService` as `Arc<dyn JobSource>`; results come back unranked.
#[async_trait]
pub trait JobSource: Send + Sync {
    async fn fetch_jobs(&self, query: &JobQuery) -> AppResult<Vec<JobRecord>>;
}

#[cfg(test)]
pub mod test_support {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Returns the same titles for every query and counts how often it was asked.
    #[derive(Default)]
    pub struct StaticJobSource {
        jobs: Vec<JobRecord>,
        calls: AtomicUsize,
    }

    impl StaticJobSource {
        pub fn titled(titles: &[&str]) -> Self {
            Self {
                jobs: titles.iter().map(|t| JobRecord::titled(*t)).collect(),
                calls: AtomicUsize::new(0),
            }
        }

        pub fn call_count(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl JobSource for StaticJobSource {
        async fn fetch_jobs(&self, _query: &JobQuery) -> AppResult<Vec<JobRecord>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(self.jobs.clone())
        }
    }
}
