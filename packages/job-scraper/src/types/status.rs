//! Caller-facing crawl status vocabulary and dispatch/poll outcomes.

use scrapyd_client::JobRecord;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::source::Source;

/// Stable status vocabulary, independent of execution-service bucket names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CrawlStatus {
    Pending,
    Running,
    Finished,
    Failed,
    NotFound,
    Error,
}

impl CrawlStatus {
    /// Map a `listjobs.json` bucket name to the caller vocabulary.
    pub fn from_bucket(bucket: &str) -> Self {
        match bucket {
            "pending" => CrawlStatus::Pending,
            "running" => CrawlStatus::Running,
            "finished" => CrawlStatus::Finished,
            "failed" | "cancelled" => CrawlStatus::Failed,
            _ => CrawlStatus::Error,
        }
    }

    /// Only `not_found` warrants another poll.
    pub fn is_terminal(&self) -> bool {
        !matches!(self, CrawlStatus::NotFound)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            CrawlStatus::Pending => "pending",
            CrawlStatus::Running => "running",
            CrawlStatus::Finished => "finished",
            CrawlStatus::Failed => "failed",
            CrawlStatus::NotFound => "not_found",
            CrawlStatus::Error => "error",
        }
    }
}

impl fmt::Display for CrawlStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of one status poll session.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PollOutcome {
    pub status: CrawlStatus,
    pub job: Option<JobRecord>,
}

impl PollOutcome {
    pub fn found(status: CrawlStatus, job: JobRecord) -> Self {
        Self {
            status,
            job: Some(job),
        }
    }

    pub fn not_found() -> Self {
        Self {
            status: CrawlStatus::NotFound,
            job: None,
        }
    }

    pub fn error() -> Self {
        Self {
            status: CrawlStatus::Error,
            job: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DispatchStatus {
    Scheduled,
    Failed,
}

/// Per-source result of a dispatch fan-out.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DispatchOutcome {
    pub source: Source,
    pub job_id: Option<String>,
    pub status: DispatchStatus,
}

impl DispatchOutcome {
    pub fn scheduled(source: Source, job_id: impl Into<String>) -> Self {
        Self {
            source,
            job_id: Some(job_id.into()),
            status: DispatchStatus::Scheduled,
        }
    }

    pub fn failed(source: Source) -> Self {
        Self {
            source,
            job_id: None,
            status: DispatchStatus::Failed,
        }
    }

    pub fn is_scheduled(&self) -> bool {
        self.status == DispatchStatus::Scheduled
    }
}
