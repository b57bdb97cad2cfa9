//! Storage trait for deduplicated postings.

use async_trait::async_trait;
use serde::Serialize;

use crate::error::StoreResult;
use crate::types::posting::{Posting, UserJobsDocument};

/// Verdict of [`PostingStore::accept`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AcceptOutcome {
    Inserted,
    DuplicateDropped,
}

/// Per-user, per-source posting store with duplicate suppression.
///
/// Implementations must make the duplicate check and the append a single
/// atomic step so concurrent crawls for the same user and source cannot
/// both insert the same `(title, company)`.
#[async_trait]
pub trait PostingStore: Send + Sync {
    /// Insert `posting` into `jobs[source]` of its user's document, or drop
    /// it when that list already holds the same `(title, company)`.
    ///
    /// Creates the user's document on first insert. Never touches other
    /// sources' lists.
    async fn accept(&self, posting: &Posting) -> StoreResult<AcceptOutcome>;

    /// Load a user's document. `None` until the first insert.
    async fn user_jobs(&self, user_id: &str) -> StoreResult<Option<UserJobsDocument>>;

    /// Cheap reachability check for health endpoints.
    async fn ping(&self) -> StoreResult<()> {
        Ok(())
    }
}
