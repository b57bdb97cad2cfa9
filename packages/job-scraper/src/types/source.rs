//! Job-listing source identifiers.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// An external job-listing site.
///
/// Serializes as the lowercase identifier (`"linkedin"`), which is also the
/// key of the per-source lists in a user's jobs document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Source {
    LinkedIn,
    Internshala,
}

impl Source {
    /// Every known source, in default dispatch order.
    pub const ALL: [Source; 2] = [Source::LinkedIn, Source::Internshala];

    /// Lowercase identifier used as storage and API key.
    pub fn as_str(&self) -> &'static str {
        match self {
            Source::LinkedIn => "linkedin",
            Source::Internshala => "internshala",
        }
    }

    /// Spider name registered with the execution service.
    pub fn spider(&self) -> &'static str {
        match self {
            Source::LinkedIn => "linkedin_jobs",
            Source::Internshala => "internshala_jobs",
        }
    }

    /// Parse a comma-separated list, e.g. from an env var.
    pub fn parse_list(input: &str) -> Result<Vec<Source>, UnknownSource> {
        input
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::parse)
            .collect()
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a source id matches no known site.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown source: {0}")]
pub struct UnknownSource(pub String);

impl FromStr for Source {
    type Err = UnknownSource;

    /// Accepts the identifier or the spider name, case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim().to_lowercase();
        Source::ALL
            .into_iter()
            .find(|source| needle == source.as_str() || needle == source.spider())
            .ok_or_else(|| UnknownSource(s.to_string()))
    }
}
