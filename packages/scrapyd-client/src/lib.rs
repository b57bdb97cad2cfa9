//! Pure Scrapyd JSON API client.
//!
//! A minimal client for a Scrapyd-compatible crawl execution service.
//! Supports scheduling spider runs, listing jobs by state bucket, and a
//! daemon liveness probe.
//!
//! # Example
//!
//! ```rust,ignore
//! use scrapyd_client::{ScheduleRequest, ScrapydClient};
//!
//! let client = ScrapydClient::new("http://localhost:6800");
//!
//! let job_id = client
//!     .schedule(&ScheduleRequest {
//!         project: "jobscrapper".into(),
//!         spider: "linkedin_jobs".into(),
//!         domain: "rust developer".into(),
//!         location: "remote".into(),
//!         user_id: "user-1".into(),
//!     })
//!     .await?
//!     .accepted_job_id()?;
//!
//! let listing = client.list_jobs("jobscrapper").await?;
//! println!("{:?}", listing.find(&job_id));
//! ```

pub mod error;
pub mod types;

pub use error::{Result, ScrapydError};
pub use types::{DaemonStatus, JobListing, JobRecord, ScheduleRequest, ScheduleResponse};

use std::time::Duration;

use serde::de::DeserializeOwned;

#[derive(Debug, Clone)]
pub struct ScrapydClient {
    client: reqwest::Client,
    base_url: String,
    request_timeout: Option<Duration>,
}

impl ScrapydClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            request_timeout: None,
        }
    }

    /// Apply a per-request timeout to every call.
    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = Some(timeout);
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Schedule a spider run. Returns the raw response; use
    /// [`ScheduleResponse::accepted_job_id`] to enforce the success marker.
    pub async fn schedule(&self, request: &ScheduleRequest) -> Result<ScheduleResponse> {
        let url = format!("{}/schedule.json", self.base_url);
        let resp = self.timed(self.client.post(&url).form(request)).send().await?;
        let data: ScheduleResponse = Self::decode(resp).await?;

        tracing::debug!(
            spider = %request.spider,
            status = %data.status,
            jobid = ?data.jobid,
            "Scrapyd schedule response"
        );
        Ok(data)
    }

    /// List pending/running/finished jobs for a project.
    pub async fn list_jobs(&self, project: &str) -> Result<JobListing> {
        let url = format!("{}/listjobs.json", self.base_url);
        let resp = self
            .timed(self.client.get(&url).query(&[("project", project)]))
            .send()
            .await?;
        let value: serde_json::Value = Self::decode(resp).await?;
        JobListing::from_value(value)
    }

    /// Lightweight liveness probe.
    pub async fn daemon_status(&self) -> Result<DaemonStatus> {
        let url = format!("{}/daemonstatus.json", self.base_url);
        let resp = self.timed(self.client.get(&url)).send().await?;
        Self::decode(resp).await
    }

    fn timed(&self, builder: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match self.request_timeout {
            Some(timeout) => builder.timeout(timeout),
            None => builder,
        }
    }

    async fn decode<T: DeserializeOwned>(resp: reqwest::Response) -> Result<T> {
        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(ScrapydError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        let bytes = resp.bytes().await?;
        serde_json::from_slice(&bytes).map_err(|e| ScrapydError::Malformed(e.to_string()))
    }
}
