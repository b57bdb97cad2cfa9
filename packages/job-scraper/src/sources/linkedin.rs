use super::SourceAdapter;
use crate::types::source::Source;

/// LinkedIn public job search. Links are absolute; no salary, no posted date.
#[derive(Debug, Clone, Copy, Default)]
pub struct LinkedInAdapter;

impl SourceAdapter for LinkedInAdapter {
    fn source(&self) -> Source {
        Source::LinkedIn
    }

    fn base_url(&self) -> &'static str {
        "https://www.linkedin.com"
    }
}
