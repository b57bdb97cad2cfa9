//! Configuration types for dispatching and polling crawls.

use serde::{Deserialize, Serialize};
use std::time::Duration;

use super::source::Source;

/// Default Scrapyd project the spiders are deployed under.
pub const DEFAULT_PROJECT: &str = "jobscrapper";

/// Configuration for the crawl dispatcher.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DispatchConfig {
    /// Scrapyd project name.
    pub project: String,

    /// Upper bound on a single scheduling call.
    ///
    /// One slow source must not hold the fan-in open indefinitely.
    /// Default: 15 seconds.
    pub timeout: Duration,
}

impl Default for DispatchConfig {
    fn default() -> Self {
        Self {
            project: DEFAULT_PROJECT.to_string(),
            timeout: Duration::from_secs(15),
        }
    }
}

impl DispatchConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_project(mut self, project: impl Into<String>) -> Self {
        self.project = project.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

/// Configuration for the crawl status poller.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PollConfig {
    /// Scrapyd project queried when the caller does not name one.
    pub project: String,

    /// Sleep between `not_found` retries. Default: 1 second.
    pub interval: Duration,

    /// Wall-clock budget per poll session. Default: 10 seconds.
    pub budget: Duration,
}

impl Default for PollConfig {
    fn default() -> Self {
        Self {
            project: DEFAULT_PROJECT.to_string(),
            interval: Duration::from_secs(1),
            budget: Duration::from_secs(10),
        }
    }
}

impl PollConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_project(mut self, project: impl Into<String>) -> Self {
        self.project = project.into();
        self
    }

    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    pub fn with_budget(mut self, budget: Duration) -> Self {
        self.budget = budget;
        self
    }
}

/// The parameters a crawl run was dispatched with.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CrawlQuery {
    pub source: Source,
    pub job_role: String,
    pub location: String,
    pub user_id: String,
}

impl CrawlQuery {
    pub fn new(
        source: Source,
        job_role: impl Into<String>,
        location: impl Into<String>,
        user_id: impl Into<String>,
    ) -> Self {
        Self {
            source,
            job_role: job_role.into(),
            location: location.into(),
            user_id: user_id.into(),
        }
    }
}
