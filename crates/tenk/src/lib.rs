//! tenk: annual-filing statement extraction and ratio analysis.
//!
//! Retrieves a public company's most recent 10-K filing from SEC EDGAR,
//! normalizes the rendered tables of its four primary financial statements,
//! and derives standard profitability, liquidity, and solvency ratios.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod pipeline;

// Re-export main types from sub-crates
pub use tenk_data as data;
pub use tenk_extract as extract;
pub use tenk_output as output;
pub use tenk_ratios as ratios;

pub use pipeline::{
    FilingAnalysis, MAX_FILING_ATTEMPTS, Pipeline, PipelineError, StatementFailure,
};

/// Version information.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
