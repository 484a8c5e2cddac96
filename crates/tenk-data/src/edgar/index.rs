//! Filing document index (`index.json`) resolution.
//!
//! Every filing folder on the EDGAR archive serves an `index.json` listing
//! the documents it contains. The pipeline uses it to locate the
//! `FilingSummary.xml` manifest; a filing without one (typically a 10-K/A
//! amendment) signals the caller to fall back to the next-older filing.

use crate::edgar::client::EdgarClient;
use crate::error::{DataError, Result};
use serde::Deserialize;

/// Filename of the manifest every complete filing carries.
const FILING_SUMMARY_NAME: &str = "FilingSummary.xml";

/// Parsed `index.json` of one filing folder.
#[derive(Debug, Clone, Deserialize)]
pub struct FilingIndex {
    /// The directory listing
    pub directory: IndexDirectory,
    /// URL of the filing folder this index was fetched from (no trailing slash)
    #[serde(skip)]
    pub folder_url: String,
}

/// Directory listing inside `index.json`.
#[derive(Debug, Clone, Deserialize)]
pub struct IndexDirectory {
    /// Archive path of the folder, e.g. `/Archives/edgar/data/320193/000032019323000077`
    pub name: String,
    /// Documents in the folder
    pub item: Vec<IndexItem>,
}

/// One document entry in the directory listing.
#[derive(Debug, Clone, Deserialize)]
pub struct IndexItem {
    /// Document filename
    pub name: String,
    /// Document type as reported by EDGAR (often empty)
    #[serde(rename = "type", default)]
    pub doc_type: String,
}

impl FilingIndex {
    /// Fetch the document index of a filing folder.
    ///
    /// # Arguments
    /// * `client` - EDGAR HTTP client
    /// * `cik` - Central Index Key (unpadded form used in archive paths)
    /// * `accession` - Accession number, with or without dashes
    pub async fn fetch(client: &EdgarClient, cik: &str, accession: &str) -> Result<Self> {
        let accession_no_dashes = accession.replace('-', "");
        let folder_url = format!(
            "{}/Archives/edgar/data/{}/{}",
            client.archives_base(),
            cik,
            accession_no_dashes
        );
        let url = format!("{}/index.json", folder_url);

        let mut index: Self = client.get_json(&url).await?;
        index.folder_url = folder_url;
        Ok(index)
    }

    /// Whether the filing carries a `FilingSummary.xml` manifest.
    pub fn has_filing_summary(&self) -> bool {
        self.directory
            .item
            .iter()
            .any(|item| item.name == FILING_SUMMARY_NAME)
    }

    /// URL of the filing's `FilingSummary.xml`.
    ///
    /// # Errors
    /// Returns [`DataError::MissingManifest`] when the index lists no
    /// manifest, which the caller treats as a signal to advance to the
    /// next-older filing.
    pub fn filing_summary_url(&self) -> Result<String> {
        if !self.has_filing_summary() {
            return Err(DataError::MissingManifest {
                accession: self.directory.name.clone(),
            });
        }
        Ok(format!("{}/{}", self.folder_url, FILING_SUMMARY_NAME))
    }

    /// URL of a named document inside the filing folder.
    pub fn document_url(&self, name: &str) -> String {
        format!("{}/{}", self.folder_url, name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE_INDEX: &str = r#"{
        "directory": {
            "name": "/Archives/edgar/data/320193/000032019323000077",
            "item": [
                {"name": "aapl-20230930.htm", "type": "10-K"},
                {"name": "FilingSummary.xml", "type": ""},
                {"name": "R2.htm", "type": ""}
            ]
        }
    }"#;

    const AMENDMENT_INDEX: &str = r#"{
        "directory": {
            "name": "/Archives/edgar/data/320193/000032019399000001",
            "item": [
                {"name": "amendment.htm", "type": "10-K/A"}
            ]
        }
    }"#;

    fn parse(json: &str, folder_url: &str) -> FilingIndex {
        let mut index: FilingIndex = serde_json::from_str(json).unwrap();
        index.folder_url = folder_url.to_string();
        index
    }

    #[test]
    fn test_finds_filing_summary() {
        let index = parse(SAMPLE_INDEX, "https://www.sec.gov/Archives/edgar/data/320193/000032019323000077");
        assert!(index.has_filing_summary());
        assert_eq!(
            index.filing_summary_url().unwrap(),
            "https://www.sec.gov/Archives/edgar/data/320193/000032019323000077/FilingSummary.xml"
        );
    }

    #[test]
    fn test_missing_manifest_is_an_error() {
        let index = parse(AMENDMENT_INDEX, "https://www.sec.gov/Archives/edgar/data/320193/000032019399000001");
        assert!(!index.has_filing_summary());
        assert!(matches!(
            index.filing_summary_url(),
            Err(DataError::MissingManifest { .. })
        ));
    }

    #[test]
    fn test_document_url() {
        let index = parse(SAMPLE_INDEX, "https://www.sec.gov/Archives/edgar/data/320193/000032019323000077");
        assert_eq!(
            index.document_url("R4.htm"),
            "https://www.sec.gov/Archives/edgar/data/320193/000032019323000077/R4.htm"
        );
    }
}
