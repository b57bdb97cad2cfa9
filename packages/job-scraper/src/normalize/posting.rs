//! Raw item to canonical [`Posting`].

use chrono::NaiveDate;
use url::Url;

use crate::sources::SourceAdapter;
use crate::types::posting::{Posting, RawPosting};

use super::date::parse_posted_date;

/// Why a raw item produced no posting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Incomplete {
    MissingTitle,
    MissingCompany,
    UnresolvableUrl,
}

/// Normalize a raw item for `adapter`'s source.
///
/// Strings are trimmed, absent optional fields become empty strings, and
/// `salary` is dropped entirely for sources that never expose it. Items
/// lacking a title, a company, or a resolvable URL are rejected so the
/// duplicate key is always well-defined.
pub fn normalize_posting(
    adapter: &dyn SourceAdapter,
    raw: &RawPosting,
    today: NaiveDate,
) -> Result<Posting, Incomplete> {
    let title = clean_text(raw.title.as_deref());
    if title.is_empty() {
        return Err(Incomplete::MissingTitle);
    }

    let company = clean_text(raw.company.as_deref());
    if company.is_empty() {
        return Err(Incomplete::MissingCompany);
    }

    let url = resolve_url(adapter.base_url(), raw.url.as_deref())
        .ok_or(Incomplete::UnresolvableUrl)?;

    let salary = if adapter.exposes_salary() {
        Some(clean_text(raw.salary.as_deref()))
    } else {
        None
    };

    let published = parse_posted_date(raw.published.as_deref().unwrap_or_default(), today);

    let user_id = raw
        .user_id
        .as_deref()
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .map(String::from);

    Ok(Posting {
        title,
        company,
        location: clean_text(raw.location.as_deref()),
        salary,
        url,
        source: adapter.source(),
        published,
        user_id,
    })
}

fn clean_text(text: Option<&str>) -> String {
    text.map(str::trim).unwrap_or_default().to_string()
}

/// Absolute URLs pass through; relative ones are joined onto `base`.
fn resolve_url(base: &str, href: Option<&str>) -> Option<String> {
    let href = href.map(str::trim).filter(|h| !h.is_empty())?;

    match Url::parse(href) {
        Ok(url) if matches!(url.scheme(), "http" | "https") => Some(url.to_string()),
        Ok(_) => None,
        Err(url::ParseError::RelativeUrlWithoutBase) => Url::parse(base)
            .and_then(|base| base.join(href))
            .ok()
            .map(String::from),
        Err(_) => None,
    }
}
