pub mod feed;
pub mod registry;
pub mod store;
