//! SEC EDGAR HTTP client.

use crate::error::{DataError, Result};
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::debug;

/// SEC EDGAR data API base URL
const EDGAR_DATA_URL: &str = "https://data.sec.gov";

/// SEC EDGAR archives base URL (filing documents and rendered reports)
const EDGAR_ARCHIVES_URL: &str = "https://www.sec.gov";

/// User agent for SEC EDGAR requests (SEC requires identifying information)
const USER_AGENT: &str = "tenk/0.1 (contact@example.com)";

/// HTTP client for SEC EDGAR endpoints.
///
/// Wraps a [`reqwest::Client`] configured with the User-Agent header the SEC
/// requires and a request timeout. All fetches in this crate go through this
/// type so the status handling stays in one place.
pub struct EdgarClient {
    client: reqwest::Client,
    data_base: String,
    archives_base: String,
}

impl EdgarClient {
    /// Create a new EDGAR client.
    pub fn new() -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(DataError::Network)?;

        Ok(Self {
            client,
            data_base: EDGAR_DATA_URL.to_string(),
            archives_base: EDGAR_ARCHIVES_URL.to_string(),
        })
    }

    /// Base URL of the data API (`https://data.sec.gov`).
    pub fn data_base(&self) -> &str {
        &self.data_base
    }

    /// Base URL of the filing archives (`https://www.sec.gov`).
    pub fn archives_base(&self) -> &str {
        &self.archives_base
    }

    /// Fetch a URL and deserialize the JSON response body.
    pub async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T> {
        debug!(url, "fetching JSON");
        let response = self.client.get(url).send().await?;

        if !response.status().is_success() {
            return Err(DataError::Http(format!(
                "GET {} returned HTTP {}",
                url,
                response.status()
            )));
        }

        let value = response
            .json()
            .await
            .map_err(|e| DataError::Parse(format!("Failed to parse JSON from {}: {}", url, e)))?;
        Ok(value)
    }

    /// Fetch a URL and return the response body as text.
    pub async fn get_text(&self, url: &str) -> Result<String> {
        debug!(url, "fetching text");
        let response = self.client.get(url).send().await?;

        if !response.status().is_success() {
            return Err(DataError::Http(format!(
                "GET {} returned HTTP {}",
                url,
                response.status()
            )));
        }

        let body = response
            .text()
            .await
            .map_err(|e| DataError::Parse(format!("Failed to read body from {}: {}", url, e)))?;
        Ok(body)
    }
}

impl std::fmt::Debug for EdgarClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EdgarClient")
            .field("data_base", &self.data_base)
            .field("archives_base", &self.archives_base)
            .finish_non_exhaustive()
    }
}
