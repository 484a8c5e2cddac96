//! SEC EDGAR data fetching and parsing.
//!
//! This module provides access to SEC EDGAR filings including:
//! - Company CIK lookup from ticker symbols
//! - 10-K filing retrieval with company metadata
//! - Filing document index (`index.json`) resolution
//! - FilingSummary.xml manifest parsing into report records
//!
//! # Example
//!
//! ```no_run
//! use tenk_data::edgar::{CikLookup, CompanyFilings, EdgarClient, FilingIndex, FilingSummary};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = EdgarClient::new()?;
//!
//!     let lookup = CikLookup::fetch(&client).await?;
//!     let (cik, name) = lookup.get_cik("AAPL").ok_or("unknown ticker")?;
//!     println!("{name}: CIK {cik}");
//!
//!     let filings = CompanyFilings::fetch(&client, cik).await?;
//!     let filing = filings.latest_10k().ok_or("no 10-K on file")?;
//!
//!     let index = FilingIndex::fetch(&client, cik, &filing.accession_number).await?;
//!     let summary_url = index.filing_summary_url()?;
//!     let summary = FilingSummary::fetch(&client, &summary_url).await?;
//!     println!("{} reports in manifest", summary.reports.len());
//!
//!     Ok(())
//! }
//! ```

pub mod client;
pub mod filings;
pub mod index;
pub mod summary;

// Re-export main types
pub use client::EdgarClient;
pub use filings::{CikLookup, CompanyFilings, FilingHistory, FilingInfo, RecentFilings};
pub use index::{FilingIndex, IndexDirectory, IndexItem};
pub use summary::{FilingSummary, ReportRecord, STATEMENTS_CATEGORY};
