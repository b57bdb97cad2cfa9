//! Normalizers turning scraped text into canonical values.

pub mod date;
pub mod posting;

pub use date::{parse_posted_date, posted_date_today};
pub use posting::{normalize_posting, Incomplete};
