//! Execution-service seam used by the dispatcher and poller.

use async_trait::async_trait;
use scrapyd_client::{JobListing, ScheduleRequest, ScrapydClient, ScrapydError};

/// A crawl execution service that accepts spider runs and lists jobs.
#[async_trait]
pub trait JobRegistry: Send + Sync {
    /// Schedule a run. Returns the service-assigned job id; any response
    /// without a success marker and an id is an error.
    async fn schedule(&self, request: &ScheduleRequest) -> Result<String, ScrapydError>;

    /// List a project's jobs grouped by state bucket.
    async fn list_jobs(&self, project: &str) -> Result<JobListing, ScrapydError>;
}

#[async_trait]
impl JobRegistry for ScrapydClient {
    async fn schedule(&self, request: &ScheduleRequest) -> Result<String, ScrapydError> {
        ScrapydClient::schedule(self, request)
            .await?
            .accepted_job_id()
    }

    async fn list_jobs(&self, project: &str) -> Result<JobListing, ScrapydError> {
        ScrapydClient::list_jobs(self, project).await
    }
}
