//! Command line helpers
pub mod client;
pub mod log;
