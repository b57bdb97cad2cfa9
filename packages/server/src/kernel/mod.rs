//! Kernel module - server infrastructure and dependencies.

pub mod deps;
pub mod keepalive;

pub use deps::connect_store;
pub use keepalive::{spawn_keepalive, KeepAliveConfig};
