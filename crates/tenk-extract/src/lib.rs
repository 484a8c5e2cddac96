//! Statement selection and table normalization for tenk.
//!
//! This crate is the core of the pipeline: it matches a filing's sub-reports
//! to the four canonical financial statements and turns each statement's
//! rendered HTML table into a clean, typed, labeled table suitable for
//! lookups by account name: header consumption, currency cleansing,
//! footnote extraction, numeric conversion, and section replay.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod cleanse;
pub mod error;
pub mod footnote;
pub mod normalize;
pub mod scrape;
pub mod select;
pub mod table;

pub use error::{ExtractError, Result};
pub use normalize::{normalize, normalize_html};
pub use scrape::{RawRow, StatementBlock, parse_statement_table};
pub use select::{SelectedStatement, StatementKind, StatementSelection, select_statements};
pub use table::{Footnote, NormalizedStatement};

/// Version information.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
