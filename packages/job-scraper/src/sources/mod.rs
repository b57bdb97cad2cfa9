//! Per-source adapters.
//!
//! An adapter carries the site facts the normalizer needs: which
//! [`Source`] it stamps on postings, the base URL relative links resolve
//! against, and whether the site exposes salaries. Selector scraping itself
//! lives with the site scrapers, outside this crate.

mod internshala;
mod linkedin;

pub use internshala::InternshalaAdapter;
pub use linkedin::LinkedInAdapter;

use crate::types::source::Source;

pub trait SourceAdapter: Send + Sync {
    fn source(&self) -> Source;

    /// Base URL used to resolve relative posting links.
    fn base_url(&self) -> &'static str;

    /// Whether postings from this site carry a salary field at all.
    fn exposes_salary(&self) -> bool {
        false
    }
}

/// The adapter registered for `source`.
pub fn adapter_for(source: Source) -> &'static dyn SourceAdapter {
    match source {
        Source::LinkedIn => &LinkedInAdapter,
        Source::Internshala => &InternshalaAdapter,
    }
}
