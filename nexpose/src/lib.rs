#![deny(clippy::unwrap_used)]

//! A client for the XML management API of a Nexpose console
//!
//! ## Idea
//!
//! Every operation builds a small request document, posts it to the console's XML endpoint, and
//! projects a few attributes of the response into a record. Responses are read by element and
//! attribute name, without a schema.
//!
//! A [`client::NexposeClient`] holds the session of one login. All operations, except logging
//! in, require that session.
//!
//! ## Example
//!
//! ```rust,no_run
//! use nexpose::client::{ApiVersion, NexposeClient};
//! use nexpose_common::sender::Options;
//!
//! async fn list() -> anyhow::Result<()> {
//!     // consoles often use a self-signed certificate
//!     let options = Options::new().tls_insecure(true);
//!     let mut client = NexposeClient::new("console.local", 3780, ApiVersion::V1_1, options)?;
//!
//!     client.login("admin", "secret").await?;
//!     for site in client.list_sites().await? {
//!         log::info!("{}: {}", site.id, site.name);
//!     }
//!     client.logout().await?;
//!
//!     Ok(())
//! }
//! ```

pub mod client;
pub mod model;
pub mod request;
pub mod response;
pub mod xml;

mod error;

pub use error::*;
