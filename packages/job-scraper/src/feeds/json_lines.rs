//! Newline-delimited JSON feed.
//!
//! Site scrapers that run out of process (the execution service's spiders,
//! ad-hoc scripts) hand their items over as one JSON object per line.

use futures::stream::BoxStream;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};

use crate::error::{CrawlError, CrawlResult};
use crate::traits::feed::RawItemFeed;
use crate::types::{config::CrawlQuery, posting::RawPosting};

pub struct JsonLinesFeed<R> {
    reader: R,
}

impl<R> JsonLinesFeed<R> {
    pub fn new(reader: R) -> Self {
        Self { reader }
    }
}

impl<R> RawItemFeed for JsonLinesFeed<R>
where
    R: AsyncBufRead + Unpin + Send + 'static,
{
    /// Lines are split on raw bytes and decoded one at a time, so a line
    /// that is not valid UTF-8 or JSON fails alone. A read error ends the
    /// stream.
    fn fetch_raw_items(self, query: &CrawlQuery) -> BoxStream<'static, CrawlResult<RawPosting>> {
        let source = query.source;
        let mut reader = self.reader;

        Box::pin(async_stream::stream! {
            let mut line_no = 0usize;
            let mut buf = Vec::new();
            loop {
                buf.clear();
                match reader.read_until(b'\n', &mut buf).await {
                    Ok(0) => {
                        tracing::debug!(%source, lines = line_no, "Feed exhausted");
                        break;
                    }
                    Ok(_) => {
                        line_no += 1;
                        if buf.iter().all(u8::is_ascii_whitespace) {
                            continue;
                        }
                        yield serde_json::from_slice::<RawPosting>(&buf)
                            .map_err(|e| CrawlError::Decode { line: line_no, source: e });
                    }
                    Err(e) => {
                        yield Err(CrawlError::Io(e));
                        break;
                    }
                }
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::source::Source;
    use futures::StreamExt;

    #[tokio::test]
    async fn test_reads_items_and_reports_bad_lines() {
        let input = concat!(
            r#"{"title": "Dev", "company": "Acme", "url": "https://example.com/1"}"#,
            "\n\n",
            "not json\n",
            r#"{"title": "QA", "company": "Beta", "url": "/jobs/2", "published": "today"}"#,
            "\n",
        );
        let feed = JsonLinesFeed::new(input.as_bytes());
        let query = CrawlQuery::new(Source::Internshala, "dev", "pune", "u-1");

        let items: Vec<_> = feed.fetch_raw_items(&query).collect().await;

        assert_eq!(items.len(), 3);
        assert_eq!(items[0].as_ref().unwrap().title.as_deref(), Some("Dev"));
        assert!(matches!(items[1], Err(CrawlError::Decode { line: 3, .. })));
        assert_eq!(items[2].as_ref().unwrap().published.as_deref(), Some("today"));
    }

    #[tokio::test]
    async fn test_invalid_utf8_line_fails_alone() {
        let mut input = Vec::new();
        input.extend_from_slice(br#"{"title": "A", "company": "Acme", "url": "https://x.test/a"}"#);
        input.extend_from_slice(b"\n{\"title\": \"\xff\"}\n");
        input.extend_from_slice(br#"{"title": "B", "company": "Acme", "url": "https://x.test/b"}"#);
        input.extend_from_slice(b"\r\n");
        input.extend_from_slice(br#"{"title": "C", "company": "Acme", "url": "https://x.test/c"}"#);

        let feed = JsonLinesFeed::new(std::io::Cursor::new(input));
        let query = CrawlQuery::new(Source::LinkedIn, "dev", "remote", "u-1");

        let items: Vec<_> = feed.fetch_raw_items(&query).collect().await;

        assert_eq!(items.len(), 4);
        assert!(matches!(items[1], Err(CrawlError::Decode { line: 2, .. })));
        let titles: Vec<_> = items
            .iter()
            .filter_map(|item| item.as_ref().ok())
            .map(|raw| raw.title.clone().unwrap())
            .collect();
        assert_eq!(titles, vec!["A", "B", "C"]);
    }
}
