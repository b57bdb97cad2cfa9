pub mod config;
pub mod posting;
pub mod source;
pub mod status;
