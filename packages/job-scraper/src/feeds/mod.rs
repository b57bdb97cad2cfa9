//! Raw item feed implementations.
//!
//! Available feeds:
//! - `JsonLinesFeed` - newline-delimited JSON from any async reader
//! - `MockFeed` (in [`crate::testing`]) - canned items for tests

pub mod json_lines;

pub use json_lines::JsonLinesFeed;
