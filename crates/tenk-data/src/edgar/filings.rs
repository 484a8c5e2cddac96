//! SEC EDGAR filings API integration.
//!
//! This module provides functionality to:
//! - Look up CIK numbers by ticker symbols
//! - Fetch company filing history from SEC EDGAR
//! - Enumerate annual (10-K) filings, newest first

use crate::edgar::client::EdgarClient;
use crate::error::{DataError, Result};
use chrono::NaiveDate;
use serde::Deserialize;
use std::collections::HashMap;

/// Lookup table for converting ticker symbols to CIK numbers.
///
/// CIK (Central Index Key) is a unique identifier assigned by the SEC to
/// companies filing with EDGAR.
#[derive(Debug, Clone)]
pub struct CikLookup {
    /// Map from ticker to (CIK, company name)
    ticker_to_cik: HashMap<String, (String, String)>,
}

/// Raw company ticker data from SEC JSON.
#[derive(Debug, Deserialize)]
struct CompanyTicker {
    cik_str: u64,
    ticker: String,
    title: String,
}

impl CikLookup {
    /// Fetch and parse the company tickers JSON from SEC.
    ///
    /// Downloads the latest ticker-to-CIK mapping from the SEC website.
    /// This includes all companies with public filings.
    ///
    /// # Errors
    /// Returns error if the network request fails or JSON parsing fails
    pub async fn fetch(client: &EdgarClient) -> Result<Self> {
        // Hosted at www.sec.gov, not data.sec.gov
        let url = format!("{}/files/company_tickers.json", client.archives_base());

        // The response is a map from a meaningless index to company data
        let data: HashMap<String, CompanyTicker> = client.get_json(&url).await?;

        let mut ticker_to_cik = HashMap::new();
        for (_idx, company) in data {
            let cik = company.cik_str.to_string();
            let ticker = company.ticker.to_uppercase();
            ticker_to_cik.insert(ticker, (cik, company.title));
        }

        Ok(Self { ticker_to_cik })
    }

    /// Look up CIK by ticker symbol.
    ///
    /// # Arguments
    /// * `ticker` - The stock ticker symbol (case-insensitive)
    ///
    /// # Returns
    /// Optional tuple of (CIK, company name)
    pub fn get_cik(&self, ticker: &str) -> Option<&(String, String)> {
        self.ticker_to_cik.get(&ticker.to_uppercase())
    }

    /// Look up CIK by ticker symbol, returning an error for unknown tickers.
    pub fn require_cik(&self, ticker: &str) -> Result<&(String, String)> {
        self.get_cik(ticker)
            .ok_or_else(|| DataError::CikNotFound(ticker.to_string()))
    }

    /// Pad CIK to 10 digits as required by SEC.
    ///
    /// SEC EDGAR URLs require CIKs to be zero-padded to 10 digits.
    ///
    /// # Example
    /// ```
    /// # use tenk_data::edgar::filings::CikLookup;
    /// let padded = CikLookup::pad_cik("320193");
    /// assert_eq!(padded, "0000320193");
    /// ```
    pub fn pad_cik(cik: &str) -> String {
        format!("{:0>10}", cik)
    }
}

/// Company filings data from SEC EDGAR submissions API.
///
/// Besides the filing history this payload carries the company metadata the
/// pipeline reports alongside the analysis: official name, SIC
/// classification, and fiscal year end.
#[derive(Debug, Clone, Deserialize)]
pub struct CompanyFilings {
    /// Central Index Key
    pub cik: String,
    /// Company name
    pub name: String,
    /// Standard Industrial Classification code
    #[serde(default)]
    pub sic: String,
    /// SIC description
    #[serde(rename = "sicDescription", default)]
    pub sic_description: String,
    /// Fiscal year end as MMDD, e.g. "0930"
    #[serde(rename = "fiscalYearEnd", default)]
    pub fiscal_year_end: String,
    /// Ticker symbols registered for this company
    #[serde(default)]
    pub tickers: Vec<String>,
    /// Filing history
    pub filings: FilingHistory,
}

/// Container for filing history data.
#[derive(Debug, Clone, Deserialize)]
pub struct FilingHistory {
    /// Recent filings
    pub recent: RecentFilings,
}

/// Recent filings data.
///
/// The SEC API returns filing information as parallel arrays where
/// each index corresponds to a single filing.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecentFilings {
    /// Accession numbers (unique filing identifiers)
    pub accession_number: Vec<String>,
    /// Form types (e.g., "10-K", "10-Q", "8-K")
    pub form: Vec<String>,
    /// Filing dates in YYYY-MM-DD format
    pub filing_date: Vec<String>,
    /// Primary document filenames
    pub primary_document: Vec<String>,
}

/// Information about a specific filing.
#[derive(Debug, Clone)]
pub struct FilingInfo {
    /// Accession number (unique filing identifier)
    pub accession_number: String,
    /// Form type (e.g., "10-K", "10-Q")
    pub form: String,
    /// Filing date
    pub filing_date: NaiveDate,
    /// Primary document filename
    pub primary_document: String,
}

impl CompanyFilings {
    /// Fetch company filings from the SEC EDGAR submissions API.
    ///
    /// # Arguments
    /// * `client` - EDGAR HTTP client
    /// * `cik` - Central Index Key (will be padded to 10 digits)
    ///
    /// # Errors
    /// Returns error if the network request fails or JSON parsing fails
    pub async fn fetch(client: &EdgarClient, cik: &str) -> Result<Self> {
        let padded_cik = CikLookup::pad_cik(cik);
        let url = format!("{}/submissions/CIK{}.json", client.data_base(), padded_cik);
        client.get_json(&url).await
    }

    /// Get the most recent 10-K filing.
    pub fn latest_10k(&self) -> Option<FilingInfo> {
        self.all_10k().into_iter().next()
    }

    /// Get all 10-K filings, newest first.
    ///
    /// 10-K forms are annual reports. The list order matters: when the
    /// newest filing turns out to be an amendment without statement data,
    /// the pipeline advances to the next entry.
    pub fn all_10k(&self) -> Vec<FilingInfo> {
        self.find_all_by_form("10-K")
    }

    /// Find all filings of a specific form type, newest first.
    pub fn find_all_by_form(&self, form_type: &str) -> Vec<FilingInfo> {
        let recent = &self.filings.recent;
        let mut filings = Vec::new();

        // The submissions API lists filings most recent first already
        for i in 0..recent.form.len() {
            if recent.form[i] == form_type
                && let Ok(filing) = self.filing_at_index(i)
            {
                filings.push(filing);
            }
        }

        filings
    }

    /// Extract filing information at a specific index.
    fn filing_at_index(&self, idx: usize) -> Result<FilingInfo> {
        let recent = &self.filings.recent;

        let filing_date = NaiveDate::parse_from_str(&recent.filing_date[idx], "%Y-%m-%d")
            .map_err(|e| DataError::Parse(format!("Invalid filing date: {}", e)))?;

        Ok(FilingInfo {
            accession_number: recent.accession_number[idx].clone(),
            form: recent.form[idx].clone(),
            filing_date,
            primary_document: recent.primary_document[idx].clone(),
        })
    }
}

impl FilingInfo {
    /// Accession number with the dashes removed, as used in archive paths.
    pub fn accession_no_dashes(&self) -> String {
        self.accession_number.replace('-', "")
    }

    /// Base URL of this filing's archive folder (no trailing slash).
    ///
    /// # Example
    /// ```
    /// # use tenk_data::edgar::filings::FilingInfo;
    /// # use chrono::NaiveDate;
    /// let filing = FilingInfo {
    ///     accession_number: "0000320193-23-000077".to_string(),
    ///     form: "10-K".to_string(),
    ///     filing_date: NaiveDate::from_ymd_opt(2023, 11, 3).unwrap(),
    ///     primary_document: "aapl-20230930.htm".to_string(),
    /// };
    /// assert_eq!(
    ///     filing.folder_url("https://www.sec.gov", "320193"),
    ///     "https://www.sec.gov/Archives/edgar/data/320193/000032019323000077"
    /// );
    /// ```
    pub fn folder_url(&self, archives_base: &str, cik: &str) -> String {
        format!(
            "{}/Archives/edgar/data/{}/{}",
            archives_base,
            cik,
            self.accession_no_dashes()
        )
    }

    /// URL of a named document inside this filing's archive folder.
    pub fn document_url(&self, archives_base: &str, cik: &str, document: &str) -> String {
        format!("{}/{}", self.folder_url(archives_base, cik), document)
    }
}
