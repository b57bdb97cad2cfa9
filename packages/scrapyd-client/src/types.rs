use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{Result, ScrapydError};

/// Form body for `schedule.json`.
///
/// Every field besides `project` and `spider` is forwarded to the spider as
/// a spider argument.
#[derive(Debug, Clone, Serialize)]
pub struct ScheduleRequest {
    pub project: String,
    pub spider: String,
    pub domain: String,
    pub location: String,
    pub user_id: String,
}

/// Raw `schedule.json` response.
#[derive(Debug, Clone, Deserialize)]
pub struct ScheduleResponse {
    pub status: String,
    pub jobid: Option<String>,
    pub message: Option<String>,
    pub node_name: Option<String>,
}

impl ScheduleResponse {
    /// The job id, if Scrapyd accepted the request.
    pub fn accepted_job_id(self) -> Result<String> {
        if self.status != "ok" {
            return Err(ScrapydError::Rejected(
                self.message.unwrap_or(self.status),
            ));
        }
        self.jobid
            .ok_or_else(|| ScrapydError::Malformed("missing jobid".to_string()))
    }
}

/// One job entry from `listjobs.json`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobRecord {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub spider: Option<String>,
    /// Remaining fields (pid, start_time, log_url, ...) passed through untouched.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl JobRecord {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            spider: None,
            extra: Map::new(),
        }
    }

    pub fn with_spider(mut self, spider: impl Into<String>) -> Self {
        self.spider = Some(spider.into());
        self
    }
}

/// Parsed `listjobs.json` response: bucket name to jobs, in response order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct JobListing {
    pub node_name: Option<String>,
    pub buckets: IndexMap<String, Vec<JobRecord>>,
}

impl JobListing {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a job to a bucket (builder style, mostly for tests).
    pub fn with_job(mut self, bucket: impl Into<String>, job: JobRecord) -> Self {
        self.buckets.entry(bucket.into()).or_default().push(job);
        self
    }

    /// Find a job by id across every bucket.
    pub fn find(&self, job_id: &str) -> Option<(&str, &JobRecord)> {
        self.buckets.iter().find_map(|(bucket, jobs)| {
            jobs.iter()
                .find(|job| job.id == job_id)
                .map(|job| (bucket.as_str(), job))
        })
    }

    /// Build a listing from the raw JSON object.
    ///
    /// Scalar keys (`status`, `node_name`) are not buckets; only array values
    /// are. Array entries without a string `id` are skipped.
    pub fn from_value(value: Value) -> Result<Self> {
        let Value::Object(map) = value else {
            return Err(ScrapydError::Malformed(
                "listjobs response is not an object".to_string(),
            ));
        };

        if let Some(Value::String(status)) = map.get("status") {
            if status != "ok" {
                let message = map
                    .get("message")
                    .and_then(Value::as_str)
                    .unwrap_or(status)
                    .to_string();
                return Err(ScrapydError::Rejected(message));
            }
        }

        let mut listing = JobListing {
            node_name: map
                .get("node_name")
                .and_then(Value::as_str)
                .map(String::from),
            buckets: IndexMap::new(),
        };

        for (bucket, jobs) in map {
            let Value::Array(jobs) = jobs else {
                continue;
            };
            let parsed = jobs
                .into_iter()
                .filter_map(|job| serde_json::from_value::<JobRecord>(job).ok())
                .collect();
            listing.buckets.insert(bucket, parsed);
        }

        Ok(listing)
    }
}

/// `daemonstatus.json` response.
#[derive(Debug, Clone, Deserialize)]
pub struct DaemonStatus {
    pub status: String,
    pub node_name: Option<String>,
    #[serde(default)]
    pub pending: u32,
    #[serde(default)]
    pub running: u32,
    #[serde(default)]
    pub finished: u32,
}
