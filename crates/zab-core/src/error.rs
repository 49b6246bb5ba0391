//! Error types for the Bürgernetz scraper
//!
//! This module defines all error types used throughout the library.

use thiserror::Error;

/// Error type for scraping operations
#[derive(Error, Debug)]
pub enum ScrapeError {
    /// HTTP request failed (network error or 4xx/5xx status)
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Failed to parse HTML content
    #[error("Failed to parse HTML: {0}")]
    ParseError(String),

    /// Invalid URL format
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// Filesystem error while writing output
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV serialization failed
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// JSON serialization failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for scraping operations
pub type Result<T> = std::result::Result<T, ScrapeError>;
