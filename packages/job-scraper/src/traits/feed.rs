//! Raw item feed abstraction.
//!
//! Site scrapers are pluggable: anything that can hand over a finite stream
//! of [`RawPosting`]s for a crawl query is a feed. Feeds are consumed once.

use futures::stream::BoxStream;

use crate::error::CrawlResult;
use crate::types::{config::CrawlQuery, posting::RawPosting};

pub trait RawItemFeed: Send {
    /// Consume the feed, yielding raw items in emission order.
    fn fetch_raw_items(self, query: &CrawlQuery) -> BoxStream<'static, CrawlResult<RawPosting>>;
}
