//! Row mapping shared by the SQL backends.

use chrono::NaiveDate;
use sqlx::FromRow;

use crate::error::{StoreError, StoreResult};
use crate::types::posting::{Posting, UserJobsDocument};
use crate::types::source::Source;

#[derive(Debug, FromRow)]
pub(crate) struct PostingRow {
    user_id: String,
    source: String,
    title: String,
    company: String,
    location: String,
    salary: Option<String>,
    url: String,
    published: NaiveDate,
}

impl PostingRow {
    fn into_posting(self) -> StoreResult<Posting> {
        let source: Source = self
            .source
            .parse()
            .map_err(|e| StoreError::Corrupt(format!("{e} (url {})", self.url)))?;

        Ok(Posting {
            title: self.title,
            company: self.company,
            location: self.location,
            salary: self.salary,
            url: self.url,
            source,
            published: self.published,
            user_id: Some(self.user_id),
        })
    }
}

/// Group rows (already in discovery order) into a user document.
pub(crate) fn assemble_document(
    user_id: &str,
    rows: Vec<PostingRow>,
) -> StoreResult<UserJobsDocument> {
    let mut document = UserJobsDocument::new(user_id);
    for row in rows {
        let posting = row.into_posting()?;
        document.jobs.entry(posting.source).or_default().push(posting);
    }
    Ok(document)
}
