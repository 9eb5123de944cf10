//! HTTP fetching for registry files and mod artifacts.
//!
//! The [`Downloader`] trait is the seam between the repository/install code
//! and the network, so tests can substitute canned responses.

use crate::error::{CreepError, Result};
use std::time::Duration;

// Several mod hosts answer bot-looking agents with 403, so the client
// identifies as a desktop browser.
const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
     AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Fetches URLs to bytes.
pub trait Downloader {
    /// Fetch a URL and return the response body.
    ///
    /// # Errors
    ///
    /// Returns [`CreepError::Network`] on transport failures or non-success
    /// status codes.
    fn fetch(&self, url: &str) -> Result<Vec<u8>>;
}

/// Blocking HTTP downloader.
pub struct HttpDownloader {
    client: reqwest::blocking::Client,
}

impl HttpDownloader {
    /// Create a downloader with the default timeout.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn new() -> Result<Self> {
        Self::with_timeout(DEFAULT_TIMEOUT)
    }

    /// Create a downloader with a specific per-request timeout.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn with_timeout(timeout: Duration) -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .build()
            .map_err(|e| CreepError::Configuration(format!("cannot build HTTP client: {e}")))?;
        Ok(Self { client })
    }
}

impl Downloader for HttpDownloader {
    fn fetch(&self, url: &str) -> Result<Vec<u8>> {
        let network = |e: reqwest::Error| CreepError::Network {
            url: url.to_string(),
            reason: e.to_string(),
        };

        let response = self.client.get(url).send().map_err(network)?;
        let response = response.error_for_status().map_err(network)?;
        Ok(response.bytes().map_err(network)?.to_vec())
    }
}
