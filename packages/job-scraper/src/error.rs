//! Typed errors for the job scraper library.
//!
//! Uses `thiserror` for library errors (not `anyhow`). Transport failures
//! against the execution service never reach callers of the dispatcher or
//! poller; they are folded into typed outcomes there. Storage failures and
//! feed read failures propagate out of ingestion.

use thiserror::Error;

/// Top-level error for pipeline operations.
#[derive(Debug, Error)]
pub enum ScraperError {
    /// Storage operation failed
    #[error("storage error: {0}")]
    Store(#[from] StoreError),

    /// Raw item feed could not be read
    #[error("crawl feed error: {0}")]
    Crawl(#[from] CrawlError),
}

/// Errors raised by posting stores.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Backend I/O failed (connection, query, pool exhaustion)
    #[error("backend error: {0}")]
    Backend(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// The user-document scheme partitions by user; a posting without one
    /// has nowhere to go.
    #[error("posting has no user_id: {url}")]
    MissingUserId { url: String },

    /// A stored row could not be turned back into a posting
    #[error("corrupt stored row: {0}")]
    Corrupt(String),
}

/// Errors raised while reading raw items from a feed.
#[derive(Debug, Error)]
pub enum CrawlError {
    /// Reading the underlying source failed
    #[error("feed I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A line could not be decoded as a raw item
    #[error("undecodable item on line {line}: {source}")]
    Decode {
        line: usize,
        #[source]
        source: serde_json::Error,
    },
}

#[cfg(any(feature = "sqlite", feature = "postgres"))]
impl StoreError {
    pub(crate) fn backend(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        StoreError::Backend(Box::new(err))
    }
}

/// Result type alias for pipeline operations.
pub type Result<T> = std::result::Result<T, ScraperError>;

/// Result type alias for store operations.
pub type StoreResult<T> = std::result::Result<T, StoreError>;

/// Result type alias for feed operations.
pub type CrawlResult<T> = std::result::Result<T, CrawlError>;
