//! In-memory storage implementation for testing and development.

use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;

use crate::error::{StoreError, StoreResult};
use crate::traits::store::{AcceptOutcome, PostingStore};
use crate::types::posting::{Posting, UserJobsDocument};

/// In-memory user job documents.
///
/// The duplicate check and the append happen under one write lock, so
/// concurrent accepts for the same key insert exactly once. Data is lost on
/// restart.
#[derive(Default)]
pub struct MemoryStore {
    documents: RwLock<HashMap<String, UserJobsDocument>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of user documents.
    pub async fn user_count(&self) -> usize {
        self.documents.read().await.len()
    }

    /// Number of postings across all users and sources.
    pub async fn posting_count(&self) -> usize {
        self.documents
            .read()
            .await
            .values()
            .map(UserJobsDocument::total)
            .sum()
    }
}

#[async_trait]
impl PostingStore for MemoryStore {
    async fn accept(&self, posting: &Posting) -> StoreResult<AcceptOutcome> {
        let user_id = posting
            .user_id
            .as_deref()
            .ok_or_else(|| StoreError::MissingUserId {
                url: posting.url.clone(),
            })?;

        let mut documents = self.documents.write().await;
        let document = documents
            .entry(user_id.to_string())
            .or_insert_with(|| UserJobsDocument::new(user_id));
        let postings = document.jobs.entry(posting.source).or_default();

        if postings.iter().any(|existing| existing.is_duplicate_of(posting)) {
            return Ok(AcceptOutcome::DuplicateDropped);
        }

        postings.push(posting.clone());
        Ok(AcceptOutcome::Inserted)
    }

    async fn user_jobs(&self, user_id: &str) -> StoreResult<Option<UserJobsDocument>> {
        Ok(self.documents.read().await.get(user_id).cloned())
    }
}
