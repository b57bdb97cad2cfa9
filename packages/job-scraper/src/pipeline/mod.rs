//! Crawl pipeline stages.
//!
//! - [`Dispatcher`] fans a crawl request out to every source.
//! - [`StatusPoller`] follows one scheduled crawl until it shows up.
//! - [`ingest`] turns a feed of raw items into deduplicated postings.

pub mod dispatch;
pub mod ingest;
pub mod poll;

pub use dispatch::Dispatcher;
pub use ingest::{ingest, IngestReport};
pub use poll::StatusPoller;
