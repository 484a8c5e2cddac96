//! SEC EDGAR filing retrieval for tenk.
//!
//! Resolves a ticker symbol to a company's most recent annual filing and
//! fetches the filing's document index, manifest, and rendered report pages.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod edgar;
pub mod error;

pub use error::{DataError, Result};

/// Version information.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
