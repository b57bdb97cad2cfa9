//! Testing utilities including mock implementations.
//!
//! Lets applications exercise dispatch, polling and ingestion without a
//! running execution service or a real site scraper.

use async_trait::async_trait;
use chrono::NaiveDate;
use futures::stream::{self, BoxStream, StreamExt};
use scrapyd_client::{JobListing, ScheduleRequest, ScrapydError};
use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, RwLock};
use std::time::Duration;

use crate::error::{CrawlResult, StoreError, StoreResult};
use crate::traits::{
    feed::RawItemFeed,
    registry::JobRegistry,
    store::{AcceptOutcome, PostingStore},
};
use crate::types::{
    config::CrawlQuery,
    posting::{Posting, RawPosting, UserJobsDocument},
    source::Source,
};

/// A canonical posting with deterministic filler fields.
pub fn posting(source: Source, user_id: &str, title: &str, company: &str) -> Posting {
    let slug = format!("{title}-{company}").to_lowercase().replace(' ', "-");
    Posting {
        title: title.to_string(),
        company: company.to_string(),
        location: "Remote".to_string(),
        salary: None,
        url: format!("https://jobs.test/{}/{slug}", source.as_str()),
        source,
        published: NaiveDate::from_ymd_opt(2024, 1, 15).unwrap_or_default(),
        user_id: Some(user_id.to_string()),
    }
}

#[derive(Debug, Clone, Default)]
struct ScheduleScript {
    job_id: Option<String>,
    delay: Option<Duration>,
}

#[derive(Debug, Clone)]
enum ListingScript {
    Listing(JobListing),
    Failure(u16),
}

/// A scripted execution service.
///
/// Spiders without a scripted job id are rejected with a 503. Listings are
/// served from a queue; the last one repeats once the queue drains, and an
/// unscripted registry lists nothing.
#[derive(Default)]
pub struct MockJobRegistry {
    schedules: Arc<RwLock<HashMap<String, ScheduleScript>>>,
    listings: Arc<RwLock<VecDeque<ListingScript>>>,
    listing_delay: Arc<RwLock<Option<Duration>>>,

    /// Call tracking for assertions
    schedule_calls: Arc<RwLock<Vec<ScheduleRequest>>>,
    listed_projects: Arc<RwLock<Vec<String>>>,
}

impl MockJobRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Accept runs of `spider` with the given job id.
    pub fn with_job_id(self, spider: impl Into<String>, job_id: impl Into<String>) -> Self {
        self.schedules
            .write()
            .unwrap()
            .entry(spider.into())
            .or_default()
            .job_id = Some(job_id.into());
        self
    }

    /// Delay the scheduling response for `spider`.
    pub fn with_schedule_delay(self, spider: impl Into<String>, delay: Duration) -> Self {
        self.schedules
            .write()
            .unwrap()
            .entry(spider.into())
            .or_default()
            .delay = Some(delay);
        self
    }

    /// Queue a listing response.
    pub fn with_listing(self, listing: JobListing) -> Self {
        self.listings
            .write()
            .unwrap()
            .push_back(ListingScript::Listing(listing));
        self
    }

    /// Queue a failed listing call with the given HTTP status.
    pub fn with_listing_failure(self, status: u16) -> Self {
        self.listings
            .write()
            .unwrap()
            .push_back(ListingScript::Failure(status));
        self
    }

    /// Delay every listing response.
    pub fn with_listing_delay(self, delay: Duration) -> Self {
        *self.listing_delay.write().unwrap() = Some(delay);
        self
    }

    /// Every scheduling request received, in call order.
    pub fn schedule_calls(&self) -> Vec<ScheduleRequest> {
        self.schedule_calls.read().unwrap().clone()
    }

    /// Number of listing calls received.
    pub fn list_calls(&self) -> usize {
        self.listed_projects.read().unwrap().len()
    }

    /// Projects named by each listing call, in call order.
    pub fn listed_projects(&self) -> Vec<String> {
        self.listed_projects.read().unwrap().clone()
    }

    fn next_listing(&self) -> Option<ListingScript> {
        let mut queue = self.listings.write().unwrap();
        if queue.len() > 1 {
            queue.pop_front()
        } else {
            queue.front().cloned()
        }
    }
}

#[async_trait]
impl JobRegistry for MockJobRegistry {
    async fn schedule(&self, request: &ScheduleRequest) -> Result<String, ScrapydError> {
        self.schedule_calls.write().unwrap().push(request.clone());

        let script = self
            .schedules
            .read()
            .unwrap()
            .get(&request.spider)
            .cloned()
            .unwrap_or_default();

        if let Some(delay) = script.delay {
            tokio::time::sleep(delay).await;
        }

        script.job_id.ok_or_else(|| ScrapydError::Api {
            status: 503,
            message: format!("spider {} is not deployed", request.spider),
        })
    }

    async fn list_jobs(&self, project: &str) -> Result<JobListing, ScrapydError> {
        self.listed_projects.write().unwrap().push(project.to_string());

        let delay = *self.listing_delay.read().unwrap();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }

        match self.next_listing() {
            Some(ListingScript::Listing(listing)) => Ok(listing),
            Some(ListingScript::Failure(status)) => Err(ScrapydError::Api {
                status,
                message: "listing failed".to_string(),
            }),
            None => Ok(JobListing::new()),
        }
    }
}

/// A feed that yields canned items.
pub struct MockFeed {
    items: Vec<CrawlResult<RawPosting>>,
}

impl MockFeed {
    pub fn new(items: Vec<RawPosting>) -> Self {
        Self {
            items: items.into_iter().map(Ok).collect(),
        }
    }

    /// Canned items including feed-level failures.
    pub fn from_results(items: Vec<CrawlResult<RawPosting>>) -> Self {
        Self { items }
    }
}

impl RawItemFeed for MockFeed {
    fn fetch_raw_items(self, _query: &CrawlQuery) -> BoxStream<'static, CrawlResult<RawPosting>> {
        stream::iter(self.items).boxed()
    }
}

/// A store whose backend is always down.
pub struct FailingStore;

#[async_trait]
impl PostingStore for FailingStore {
    async fn accept(&self, _posting: &Posting) -> StoreResult<AcceptOutcome> {
        Err(offline())
    }

    async fn user_jobs(&self, _user_id: &str) -> StoreResult<Option<UserJobsDocument>> {
        Err(offline())
    }

    async fn ping(&self) -> StoreResult<()> {
        Err(offline())
    }
}

fn offline() -> StoreError {
    StoreError::Backend(Box::new(std::io::Error::new(
        std::io::ErrorKind::ConnectionRefused,
        "store offline",
    )))
}
