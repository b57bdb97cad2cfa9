// Job Scraper - API Core
//
// HTTP surface over the job-scraper pipeline: dispatches crawls to the
// execution service, reports their status, and serves each user's
// deduplicated postings.

pub mod config;
pub mod kernel;
pub mod server;

pub use config::*;
