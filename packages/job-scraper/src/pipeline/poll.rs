//! Crawl status poller.
//!
//! One poll session per call:
//!
//! ```text
//! querying ──► found in bucket ──────────────► pending | running | finished | failed
//!    │    ──► listing call failed ───────────► error (no retry)
//!    └──────► not found ─► sleep(interval) ─► querying   (until budget spent)
//!                                             └─► not_found
//! ```
//!
//! The execution service registers jobs asynchronously, so a freshly
//! scheduled id may be missing from the first few listings. The budget is a
//! hard ceiling: a listing call still in flight at the deadline is abandoned
//! and the session ends `not_found`.

use std::sync::Arc;
use tokio::time::{sleep, timeout_at, Instant};

use crate::traits::registry::JobRegistry;
use crate::types::{
    config::PollConfig,
    status::{CrawlStatus, PollOutcome},
};

pub struct StatusPoller {
    registry: Arc<dyn JobRegistry>,
    config: PollConfig,
}

impl StatusPoller {
    pub fn new(registry: Arc<dyn JobRegistry>, config: PollConfig) -> Self {
        Self { registry, config }
    }

    pub fn config(&self) -> &PollConfig {
        &self.config
    }

    /// Poll the configured project for `job_id`.
    pub async fn poll(&self, job_id: &str) -> PollOutcome {
        self.poll_project(&self.config.project, job_id).await
    }

    /// Poll `project` for `job_id` until found, a listing error, or the
    /// wall-clock budget runs out.
    pub async fn poll_project(&self, project: &str, job_id: &str) -> PollOutcome {
        let deadline = Instant::now() + self.config.budget;
        let mut attempts = 0u32;

        loop {
            attempts += 1;

            let listing = match timeout_at(deadline, self.registry.list_jobs(project)).await {
                Ok(listing) => listing,
                Err(_) => {
                    tracing::warn!(project, job_id, attempts, "Listing call outlived poll budget");
                    break;
                }
            };

            match listing {
                Err(e) => {
                    tracing::error!(project, job_id, error = %e, "Failed to list crawl jobs");
                    return PollOutcome::error();
                }
                Ok(listing) => {
                    if let Some((bucket, job)) = listing.find(job_id) {
                        let status = CrawlStatus::from_bucket(bucket);
                        tracing::debug!(project, job_id, %status, attempts, "Crawl job located");
                        return PollOutcome::found(status, job.clone());
                    }
                }
            }

            if Instant::now() + self.config.interval >= deadline {
                break;
            }
            sleep(self.config.interval).await;
        }

        tracing::info!(project, job_id, attempts, "Crawl job not found within poll budget");
        PollOutcome::not_found()
    }
}
