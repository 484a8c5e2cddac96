//! Financial ratio derivation for tenk.
//!
//! Resolves semantic concepts ("Revenue", "Total Current Assets", ...)
//! against normalized statement tables through a priority list of candidate
//! account labels, then derives profitability, liquidity, and solvency
//! ratios. Unresolved concepts and zero denominators degrade to missing
//! values; nothing here aborts the run.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod arith;
pub mod concepts;
pub mod liquidity;
pub mod profitability;
pub mod report;
pub mod solvency;
pub mod table;

pub use concepts::{Concept, ConceptDictionary, ResolvedAccount};
pub use liquidity::compute_liquidity;
pub use profitability::compute_profitability;
pub use report::RatioReport;
pub use solvency::compute_solvency;
pub use table::RatioTable;

/// Version information.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
