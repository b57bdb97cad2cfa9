//! Posting types: raw crawled items and the canonical record.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::source::Source;

/// A record as emitted by a site scraper, before normalization.
///
/// Every field is optional and untrimmed; selector extraction on unstable
/// markup routinely yields `None` or padded text.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawPosting {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub company: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub salary: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    /// Free-text "posted" phrase, e.g. "3 days ago".
    #[serde(default)]
    pub published: Option<String>,
    #[serde(default)]
    pub user_id: Option<String>,
}

impl RawPosting {
    pub fn new(
        title: impl Into<String>,
        company: impl Into<String>,
        url: impl Into<String>,
    ) -> Self {
        Self {
            title: Some(title.into()),
            company: Some(company.into()),
            url: Some(url.into()),
            ..Default::default()
        }
    }

    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    pub fn with_salary(mut self, salary: impl Into<String>) -> Self {
        self.salary = Some(salary.into());
        self
    }

    pub fn with_published(mut self, published: impl Into<String>) -> Self {
        self.published = Some(published.into());
        self
    }

    pub fn with_user_id(mut self, user_id: impl Into<String>) -> Self {
        self.user_id = Some(user_id.into());
        self
    }
}

/// Canonical job posting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Posting {
    pub title: String,
    pub company: String,
    pub location: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub salary: Option<String>,
    pub url: String,
    pub source: Source,
    /// Absolute date, serialized as `YYYY-MM-DD`.
    pub published: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
}

impl Posting {
    /// Duplicate key within a `(user_id, source)` partition.
    pub fn duplicate_key(&self) -> DuplicateKey<'_> {
        DuplicateKey {
            title: &self.title,
            company: &self.company,
        }
    }

    /// Whether `other` would be dropped as a duplicate of `self` in the same
    /// partition.
    pub fn is_duplicate_of(&self, other: &Posting) -> bool {
        self.duplicate_key() == other.duplicate_key()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DuplicateKey<'a> {
    pub title: &'a str,
    pub company: &'a str,
}

/// All postings stored for one user, grouped by source.
///
/// Lists are append-only and kept in discovery order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UserJobsDocument {
    pub user_id: String,
    #[serde(default)]
    pub jobs: BTreeMap<Source, Vec<Posting>>,
}

impl UserJobsDocument {
    /// Empty skeleton, as created on first insert.
    pub fn new(user_id: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            jobs: BTreeMap::new(),
        }
    }

    pub fn postings(&self, source: Source) -> &[Posting] {
        self.jobs.get(&source).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn total(&self) -> usize {
        self.jobs.values().map(Vec::len).sum()
    }
}
