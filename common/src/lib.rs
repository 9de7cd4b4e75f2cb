#![deny(clippy::unwrap_used)]

#[cfg(feature = "cli")]
pub mod cli;
pub mod sender;
pub mod utils;
