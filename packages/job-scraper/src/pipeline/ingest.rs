//! Feed ingestion: normalize each raw item and hand it to the store.
//!
//! Items are processed strictly in emission order, so a duplicate inside a
//! single feed is dropped against the copy emitted before it.

use chrono::NaiveDate;
use futures::StreamExt;
use serde::Serialize;

use crate::error::{CrawlError, Result};
use crate::normalize::normalize_posting;
use crate::sources::adapter_for;
use crate::traits::{
    feed::RawItemFeed,
    store::{AcceptOutcome, PostingStore},
};
use crate::types::config::CrawlQuery;

/// Tally of one ingestion run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct IngestReport {
    /// Items the feed yielded, including undecodable ones.
    pub seen: usize,
    pub inserted: usize,
    pub duplicates: usize,
    /// Items skipped for a missing title, company or URL, or that failed to
    /// decode.
    pub incomplete: usize,
}

/// Drain `feed` for `query` into `store`.
///
/// Items without a `user_id` inherit the query's. Item-level problems are
/// counted and skipped. A feed read failure or a store failure aborts the run.
pub async fn ingest<F: RawItemFeed>(
    feed: F,
    query: &CrawlQuery,
    store: &dyn PostingStore,
    today: NaiveDate,
) -> Result<IngestReport> {
    let adapter = adapter_for(query.source);
    let mut items = feed.fetch_raw_items(query);
    let mut report = IngestReport::default();

    while let Some(item) = items.next().await {
        report.seen += 1;

        let mut raw = match item {
            Ok(raw) => raw,
            Err(e @ CrawlError::Decode { .. }) => {
                tracing::debug!(source = %query.source, error = %e, "Skipping unreadable item");
                report.incomplete += 1;
                continue;
            }
            Err(e) => {
                tracing::error!(source = %query.source, error = %e, seen = report.seen, "Feed read failed");
                return Err(e.into());
            }
        };
        if raw.user_id.as_deref().map_or(true, |id| id.trim().is_empty()) {
            raw.user_id = Some(query.user_id.clone());
        }

        let posting = match normalize_posting(adapter, &raw, today) {
            Ok(posting) => posting,
            Err(reason) => {
                tracing::debug!(source = %query.source, ?reason, url = ?raw.url, "Skipping incomplete item");
                report.incomplete += 1;
                continue;
            }
        };

        match store.accept(&posting).await? {
            AcceptOutcome::Inserted => report.inserted += 1,
            AcceptOutcome::DuplicateDropped => report.duplicates += 1,
        }
    }

    tracing::info!(
        source = %query.source,
        user_id = %query.user_id,
        seen = report.seen,
        inserted = report.inserted,
        duplicates = report.duplicates,
        incomplete = report.incomplete,
        "Feed ingested"
    );

    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ScraperError;
    use crate::feeds::JsonLinesFeed;
    use crate::stores::MemoryStore;
    use crate::testing::MockFeed;
    use crate::types::{posting::RawPosting, source::Source};

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 5, 20).unwrap()
    }

    #[tokio::test]
    async fn test_duplicate_within_one_feed_keeps_first() {
        let store = MemoryStore::new();
        let query = CrawlQuery::new(Source::Internshala, "rust", "pune", "u1");
        let feed = MockFeed::new(vec![
            RawPosting::new(" Dev ", "Acme", "/jobs/1").with_published("today"),
            RawPosting::new("Dev", " Acme", "/jobs/1-repost").with_published("3 days ago"),
            RawPosting::new("Dev", "Beta", "/jobs/2").with_salary("10,000 /month"),
        ]);

        let report = ingest(feed, &query, &store, today()).await.unwrap();

        assert_eq!(
            report,
            IngestReport { seen: 3, inserted: 2, duplicates: 1, incomplete: 0 }
        );

        let doc = store.user_jobs("u1").await.unwrap().unwrap();
        let stored = doc.postings(Source::Internshala);
        assert_eq!(stored.len(), 2);
        assert_eq!(stored[0].url, "https://internshala.com/jobs/1");
        assert_eq!(stored[0].published, today());
        assert_eq!(stored[1].company, "Beta");
        assert_eq!(stored[1].salary.as_deref(), Some("10,000 /month"));
    }

    #[tokio::test]
    async fn test_incomplete_and_unreadable_items_are_counted() {
        let store = MemoryStore::new();
        let query = CrawlQuery::new(Source::LinkedIn, "rust", "remote", "u1");
        let bad_line = serde_json::from_str::<RawPosting>("{").unwrap_err();
        let feed = MockFeed::from_results(vec![
            Ok(RawPosting { title: Some("No company".into()), ..Default::default() }),
            Err(CrawlError::Decode { line: 2, source: bad_line }),
            Ok(RawPosting::new("Dev", "Acme", "https://www.linkedin.com/jobs/view/1")),
        ]);

        let report = ingest(feed, &query, &store, today()).await.unwrap();

        assert_eq!(report.seen, 3);
        assert_eq!(report.incomplete, 2);
        assert_eq!(report.inserted, 1);
    }

    #[tokio::test]
    async fn test_undecodable_bytes_do_not_end_the_feed() {
        let store = MemoryStore::new();
        let query = CrawlQuery::new(Source::LinkedIn, "rust", "remote", "u1");
        let mut input = Vec::new();
        input.extend_from_slice(b"{\"title\": \"A\", \"company\": \"Acme\", \"url\": \"https://x.test/a\"}\n");
        input.extend_from_slice(b"{\"title\": \"caf\xe9\", \"company\": \"Acme\", \"url\": \"https://x.test/e\"}\n");
        input.extend_from_slice(b"{\"title\": \"B\", \"company\": \"Acme\", \"url\": \"https://x.test/b\"}\n");
        input.extend_from_slice(b"{\"title\": \"C\", \"company\": \"Acme\", \"url\": \"https://x.test/c\"}\n");

        let feed = JsonLinesFeed::new(std::io::Cursor::new(input));
        let report = ingest(feed, &query, &store, today()).await.unwrap();

        assert_eq!(
            report,
            IngestReport { seen: 4, inserted: 3, duplicates: 0, incomplete: 1 }
        );
        assert_eq!(store.user_jobs("u1").await.unwrap().unwrap().total(), 3);
    }

    #[tokio::test]
    async fn test_feed_read_failure_aborts_run() {
        let store = MemoryStore::new();
        let query = CrawlQuery::new(Source::LinkedIn, "rust", "remote", "u1");
        let feed = MockFeed::from_results(vec![
            Ok(RawPosting::new("Dev", "Acme", "https://x.test/1")),
            Err(CrawlError::Io(std::io::Error::new(
                std::io::ErrorKind::ConnectionReset,
                "pipe closed",
            ))),
            Ok(RawPosting::new("QA", "Acme", "https://x.test/2")),
        ]);

        let err = ingest(feed, &query, &store, today()).await.unwrap_err();

        assert!(matches!(err, ScraperError::Crawl(CrawlError::Io(_))));
        assert_eq!(store.user_jobs("u1").await.unwrap().unwrap().total(), 1);
    }

    #[tokio::test]
    async fn test_item_user_id_wins_over_query() {
        let store = MemoryStore::new();
        let query = CrawlQuery::new(Source::LinkedIn, "rust", "remote", "u1");
        let feed = MockFeed::new(vec![
            RawPosting::new("Dev", "Acme", "https://www.linkedin.com/jobs/view/1").with_user_id("u2"),
            RawPosting::new("Dev", "Acme", "https://www.linkedin.com/jobs/view/1").with_user_id("  "),
        ]);

        let report = ingest(feed, &query, &store, today()).await.unwrap();

        assert_eq!(report.inserted, 2);
        assert_eq!(store.user_jobs("u2").await.unwrap().unwrap().total(), 1);
        assert_eq!(store.user_jobs("u1").await.unwrap().unwrap().total(), 1);
    }

    #[tokio::test]
    async fn test_store_failure_aborts_run() {
        let query = CrawlQuery::new(Source::LinkedIn, "rust", "remote", "u1");
        let feed = MockFeed::new(vec![RawPosting::new("Dev", "Acme", "https://x.test/1")]);

        let err = ingest(feed, &query, &crate::testing::FailingStore, today())
            .await
            .unwrap_err();

        assert!(matches!(err, ScraperError::Store(_)));
    }
}
