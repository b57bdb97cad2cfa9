//! # Job Scraper
//!
//! Turns raw scraped job items into canonical postings, keeps one
//! deduplicated document per user, and drives crawls on a Scrapyd-style
//! execution service.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use job_scraper::{Dispatcher, DispatchConfig, ScrapydClient, Source};
//! use std::sync::Arc;
//!
//! let registry = Arc::new(ScrapydClient::new("http://localhost:6800"));
//! let dispatcher = Dispatcher::new(registry, DispatchConfig::default());
//!
//! let outcomes = dispatcher
//!     .dispatch(&Source::ALL, "rust developer", "remote", "user-1")
//!     .await;
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Postings, sources, crawl status vocabulary, configs
//! - [`normalize`] - Relative date parsing and posting normalization
//! - [`sources`] - Per-site adapters
//! - [`traits`] - Store, registry and feed seams
//! - [`stores`] - MemoryStore, SqliteStore, PostgresStore
//! - [`feeds`] - Raw item feeds
//! - [`pipeline`] - Dispatcher, StatusPoller, ingest
//! - [`testing`] - Mock implementations for testing

pub mod error;
pub mod feeds;
pub mod normalize;
pub mod pipeline;
pub mod sources;
pub mod stores;
pub mod testing;
pub mod traits;
pub mod types;

pub use error::{CrawlError, Result, ScraperError, StoreError};
pub use feeds::JsonLinesFeed;
pub use normalize::{normalize_posting, parse_posted_date, posted_date_today, Incomplete};
pub use pipeline::{ingest, Dispatcher, IngestReport, StatusPoller};
pub use sources::{adapter_for, SourceAdapter};
pub use traits::{
    feed::RawItemFeed,
    registry::JobRegistry,
    store::{AcceptOutcome, PostingStore},
};
pub use types::{
    config::{CrawlQuery, DispatchConfig, PollConfig, DEFAULT_PROJECT},
    posting::{DuplicateKey, Posting, RawPosting, UserJobsDocument},
    source::{Source, UnknownSource},
    status::{CrawlStatus, DispatchOutcome, DispatchStatus, PollOutcome},
};

pub use scrapyd_client::{JobListing, JobRecord, ScrapydClient, ScrapydError};

pub use stores::MemoryStore;

#[cfg(feature = "sqlite")]
pub use stores::SqliteStore;

#[cfg(feature = "postgres")]
pub use stores::PostgresStore;

pub use testing::{MockFeed, MockJobRegistry};
