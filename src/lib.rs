//! Read-only access to Google Sheets ranges for a declarative configuration
//! host.
//!
//! The crate is laid out in layers:
//! - [`domain`] holds the value types (credential configuration, range
//!   queries, cell matrices, sensitive strings).
//! - [`ports`] declares the seams to the outside world: the spreadsheet values
//!   service, the connector that authenticates it and the process environment.
//! - [`adapters`] implements those ports on top of `google-sheets4` and the
//!   `config` crate.
//! - [`application`] resolves credentials, fetches ranges and projects them to
//!   JSON.
//! - [`provider`] is what the host talks to: provider configuration, the static
//!   surface registry and the three retrieval surfaces.

pub mod adapters;
pub mod application;
pub mod domain;
pub mod error;
pub mod ports;
pub mod provider;

pub use error::ProviderError;
pub use provider::{GoogleSheetsProvider, PROVIDER_TYPE_NAME};
