use super::SourceAdapter;
use crate::types::source::Source;

/// Internshala fresher jobs. Listing links are site-relative and every card
/// has a salary slot, even when empty.
#[derive(Debug, Clone, Copy, Default)]
pub struct InternshalaAdapter;

impl SourceAdapter for InternshalaAdapter {
    fn source(&self) -> Source {
        Source::Internshala
    }

    fn base_url(&self) -> &'static str {
        "https://internshala.com"
    }

    fn exposes_salary(&self) -> bool {
        true
    }
}
