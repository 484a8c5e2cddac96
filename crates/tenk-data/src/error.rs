//! Error types for filing retrieval.

use thiserror::Error;

/// Result type for filing retrieval operations.
pub type Result<T> = std::result::Result<T, DataError>;

/// Errors that can occur while locating and fetching filing documents.
#[derive(Debug, Error)]
pub enum DataError {
    /// Network error
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Non-success HTTP status
    #[error("HTTP error: {0}")]
    Http(String),

    /// Data parsing error
    #[error("Data parsing error: {0}")]
    Parse(String),

    /// XML parsing error
    #[error("XML parsing error: {0}")]
    XmlParse(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// CIK not found for ticker
    #[error("CIK not found for ticker: {0}")]
    CikNotFound(String),

    /// No filing of the requested form type is available
    #[error("No {form} filing found for CIK {cik}")]
    FilingNotFound {
        /// Form type that was requested
        form: String,
        /// CIK that was queried
        cik: String,
    },

    /// The filing's document index carries no FilingSummary manifest
    #[error("Filing {accession} has no FilingSummary.xml manifest")]
    MissingManifest {
        /// Accession number of the filing
        accession: String,
    },
}
