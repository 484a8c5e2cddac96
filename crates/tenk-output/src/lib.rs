//! Flat-file export for tenk.
//!
//! Serializes normalized statements, footnote sidecars, and ratio tables to
//! CSV or JSON.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod export;

pub use export::{
    ExportError, ExportFormat, export_footnotes, export_ratio_report, export_statement,
    footnotes_csv, ratio_report_csv, statement_csv,
};

/// Version information.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
