//! The sequential analysis pipeline.
//!
//! One run is strictly sequential: locate the filing, fetch the manifest,
//! select the statements, then fetch and normalize each statement in turn
//! before computing ratios. The only retry is the bounded fall-back to the
//! next-older filing when the chosen one lacks statement data; it is an
//! explicit loop with an attempt count, never recursion.

use std::collections::BTreeMap;
use tenk_data::DataError;
use tenk_data::edgar::{
    CikLookup, CompanyFilings, EdgarClient, FilingIndex, FilingInfo, FilingSummary,
};
use tenk_extract::{
    ExtractError, NormalizedStatement, StatementKind, normalize_html, select_statements,
};
use tenk_ratios::{ConceptDictionary, RatioReport};
use thiserror::Error;
use tracing::{info, warn};

/// How many filings to try before giving up on finding statement data.
///
/// Amendments (10-K/A) often carry no FilingSummary or no Statements
/// category; falling back a handful of filings reaches the last complete
/// annual report without walking the whole history.
pub const MAX_FILING_ATTEMPTS: usize = 6;

/// Errors that terminate a pipeline run.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// Filing retrieval failed
    #[error(transparent)]
    Data(#[from] DataError),

    /// The bounded filing fall-back was exhausted
    #[error(
        "None of the {attempts} most recent {form} filings for {ticker} carry financial statements"
    )]
    StatementsUnavailable {
        /// Ticker that was analyzed
        ticker: String,
        /// Form type that was searched
        form: String,
        /// Number of filings tried
        attempts: usize,
    },
}

/// Why one statement failed while the rest of the run continued.
#[derive(Debug, Error)]
pub enum StatementError {
    /// The report page could not be fetched
    #[error(transparent)]
    Fetch(#[from] DataError),

    /// The table could not be normalized
    #[error(transparent)]
    Extract(#[from] ExtractError),
}

/// A per-statement failure, surfaced without aborting the other statements.
#[derive(Debug)]
pub struct StatementFailure {
    /// Which statement failed
    pub kind: StatementKind,
    /// URL of the report page
    pub url: String,
    /// What went wrong
    pub error: StatementError,
}

/// The company a filing belongs to.
#[derive(Debug, Clone)]
pub struct CompanySummary {
    /// Ticker the analysis was requested for
    pub ticker: String,
    /// Central Index Key
    pub cik: String,
    /// Official company name
    pub name: String,
    /// SIC description, when reported
    pub sic_description: String,
    /// Fiscal year end as MMDD, when reported
    pub fiscal_year_end: String,
}

/// Everything one pipeline run produced.
#[derive(Debug)]
pub struct FilingAnalysis {
    /// Company identity
    pub company: CompanySummary,
    /// The filing the statements came from
    pub filing: FilingInfo,
    /// Successfully normalized statements
    pub statements: BTreeMap<StatementKind, NormalizedStatement>,
    /// Statements that failed, with context for a human to diagnose
    pub failures: Vec<StatementFailure>,
    /// Derived ratio tables
    pub ratios: RatioReport,
}

/// The analysis pipeline.
#[derive(Debug)]
pub struct Pipeline {
    client: EdgarClient,
    dictionary: ConceptDictionary,
}

impl Pipeline {
    /// Create a pipeline with the default concept dictionary.
    pub fn new() -> Result<Self, PipelineError> {
        Self::with_dictionary(ConceptDictionary::default())
    }

    /// Create a pipeline with a custom concept dictionary.
    pub fn with_dictionary(dictionary: ConceptDictionary) -> Result<Self, PipelineError> {
        Ok(Self {
            client: EdgarClient::new()?,
            dictionary,
        })
    }

    /// The underlying EDGAR client.
    pub fn client(&self) -> &EdgarClient {
        &self.client
    }

    /// Analyze a company's most recent annual filing.
    pub async fn analyze(&self, ticker: &str) -> Result<FilingAnalysis, PipelineError> {
        let lookup = CikLookup::fetch(&self.client).await?;
        let (cik, _) = lookup.require_cik(ticker)?.clone();

        let filings = CompanyFilings::fetch(&self.client, &cik).await?;
        let company = CompanySummary {
            ticker: ticker.to_uppercase(),
            cik: cik.clone(),
            name: filings.name.clone(),
            sic_description: filings.sic_description.clone(),
            fiscal_year_end: filings.fiscal_year_end.clone(),
        };

        let (filing, summary) = self.locate_statements(&cik, &filings, ticker).await?;
        info!(
            accession = %filing.accession_number,
            date = %filing.filing_date,
            "using filing"
        );

        let selection = select_statements(summary.reports.iter());
        let mut statements = BTreeMap::new();
        let mut failures = Vec::new();

        for selected in selection.iter() {
            info!(kind = %selected.kind, url = %selected.url, "normalizing statement");
            match self.normalize_statement(&selected.url).await {
                Ok(statement) => {
                    statements.insert(selected.kind, statement);
                }
                Err(error) => {
                    warn!(kind = %selected.kind, %error, "statement failed");
                    failures.push(StatementFailure {
                        kind: selected.kind,
                        url: selected.url.clone(),
                        error,
                    });
                }
            }
        }

        let ratios = RatioReport::compute(
            statements.get(&StatementKind::BalanceSheet),
            statements.get(&StatementKind::IncomeStatement),
            statements.get(&StatementKind::CashFlow),
            &self.dictionary,
        );

        Ok(FilingAnalysis {
            company,
            filing,
            statements,
            failures,
            ratios,
        })
    }

    /// Fetch and parse one filing's manifest. Used by the CLI listing
    /// commands.
    pub async fn filing_summary(
        &self,
        cik: &str,
        filing: &FilingInfo,
    ) -> Result<FilingSummary, PipelineError> {
        let index = FilingIndex::fetch(&self.client, cik, &filing.accession_number).await?;
        let summary_url = index.filing_summary_url()?;
        Ok(FilingSummary::fetch(&self.client, &summary_url).await?)
    }

    /// Walk annual filings newest-first until one carries statement data.
    ///
    /// A filing without a FilingSummary manifest, or whose manifest has no
    /// `Statements` category, advances the loop. Exceeding the attempt
    /// bound is terminal.
    async fn locate_statements(
        &self,
        cik: &str,
        filings: &CompanyFilings,
        ticker: &str,
    ) -> Result<(FilingInfo, FilingSummary), PipelineError> {
        let candidates = filings.all_10k();
        if candidates.is_empty() {
            return Err(DataError::FilingNotFound {
                form: "10-K".to_string(),
                cik: cik.to_string(),
            }
            .into());
        }

        let mut attempts = 0;
        for filing in candidates.iter().take(MAX_FILING_ATTEMPTS) {
            attempts += 1;

            let index = FilingIndex::fetch(&self.client, cik, &filing.accession_number).await?;
            let summary_url = match index.filing_summary_url() {
                Ok(url) => url,
                Err(DataError::MissingManifest { accession }) => {
                    warn!(%accession, "no manifest, falling back to next-older filing");
                    continue;
                }
                Err(e) => return Err(e.into()),
            };

            let summary = FilingSummary::fetch(&self.client, &summary_url).await?;
            if !summary.has_statements() {
                warn!(
                    accession = %filing.accession_number,
                    "manifest has no Statements category, falling back"
                );
                continue;
            }

            return Ok((filing.clone(), summary));
        }

        Err(PipelineError::StatementsUnavailable {
            ticker: ticker.to_uppercase(),
            form: "10-K".to_string(),
            attempts,
        })
    }

    async fn normalize_statement(
        &self,
        url: &str,
    ) -> Result<NormalizedStatement, StatementError> {
        let html = self.client.get_text(url).await.map_err(StatementError::Fetch)?;
        Ok(normalize_html(&html)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    #[ignore = "hits sec.gov"]
    async fn test_analyze_live() {
        let pipeline = Pipeline::new().unwrap();
        let analysis = pipeline.analyze("AAPL").await.unwrap();
        assert!(!analysis.statements.is_empty());
        assert!(
            analysis
                .statements
                .contains_key(&StatementKind::BalanceSheet)
        );
    }
}
