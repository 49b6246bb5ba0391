//! HTTP client for listing and detail pages
//!
//! A thin wrapper around `reqwest::Client`: one GET per call, non-success
//! status codes become errors, no caching and no retries. Throttling between
//! requests is the crawler's job.

use std::time::Duration;

use crate::error::Result;

/// Browser-like User-Agent sent by sites that reject unknown clients
pub const BROWSER_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

/// Configuration for the HTTP client
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClientConfig {
    /// User-Agent header; `None` keeps reqwest's default
    pub user_agent: Option<String>,
    /// Request timeout in seconds; `None` keeps reqwest's default
    pub timeout_secs: Option<u64>,
}

impl ClientConfig {
    /// Configuration that identifies as a desktop browser.
    pub fn browser() -> Self {
        Self {
            user_agent: Some(BROWSER_USER_AGENT.to_string()),
            timeout_secs: None,
        }
    }
}

/// HTTP client used by the crawler
pub struct HttpClient {
    /// Underlying HTTP client
    client: reqwest::Client,
}

impl HttpClient {
    /// Create a new client with default configuration
    ///
    /// # Errors
    /// Returns an error if the HTTP client cannot be created
    pub fn new() -> Result<Self> {
        Self::with_config(&ClientConfig::default())
    }

    /// Create a new client with custom configuration
    ///
    /// # Errors
    /// Returns an error if the HTTP client cannot be created
    pub fn with_config(config: &ClientConfig) -> Result<Self> {
        let mut builder = reqwest::Client::builder();

        if let Some(user_agent) = &config.user_agent {
            builder = builder.user_agent(user_agent.as_str());
        }
        if let Some(secs) = config.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }

        Ok(Self {
            client: builder.build()?,
        })
    }

    /// Fetch a page and return its body as text
    ///
    /// # Arguments
    /// * `url` - Absolute URL of the page
    ///
    /// # Errors
    /// - `ScrapeError::Http` - Network failure, timeout, or a 4xx/5xx status
    pub async fn fetch(&self, url: &str) -> Result<String> {
        tracing::debug!(url = %url, "GET");

        let response = self.client.get(url).send().await?;
        let response = response.error_for_status()?;

        Ok(response.text().await?)
    }
}
