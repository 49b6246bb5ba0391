//! Data types for the Bürgernetz scraper
//!
//! Records are serialized with the German column names the exported CSV and
//! JSON files have always used (`titel`, `beschreibung`, ...).

use serde::{Deserialize, Serialize};

/// One volunteer opportunity from the Bürgernetz listing.
///
/// The serialized field names, in this order, are the CSV columns listed in
/// `CsvRecord::HEADERS` (see `persist.rs`); keep both in sync.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Opportunity {
    /// Link text from the listing page
    #[serde(rename = "titel")]
    pub title: String,
    /// Absolute, normalized detail page URL
    pub link: String,
    /// Fixed organisation label of the site
    pub organisation: String,
    /// Full text of the "Zeitaufwand:" annotation
    #[serde(rename = "zeitaufwand")]
    pub time_commitment: String,
    /// Full text of the "Einsatzgebiet:" annotation
    #[serde(rename = "einsatzgebiet")]
    pub area: String,
    /// First paragraph after the detail page heading
    #[serde(rename = "beschreibung")]
    pub description: String,
}

/// One project from a grouped project listing.
///
/// Field order and names must match `CsvRecord::HEADERS` in `persist.rs`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    /// Link text from the listing page
    #[serde(rename = "titel")]
    pub title: String,
    /// Absolute, normalized detail page URL
    pub link: String,
    /// Heading of the listing block the link appeared in
    #[serde(rename = "kategorie")]
    pub category: String,
    /// Visible text of the detail page's main content region
    pub details: String,
}

/// Fields extracted from an opportunity detail page.
///
/// Every field is empty when the corresponding element is missing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OpportunityDetail {
    pub title: String,
    pub description: String,
    pub time_commitment: String,
    pub area: String,
}

/// A link discovered on a listing page, before its detail page is visited.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingEntry {
    /// Trimmed link text
    pub title: String,
    /// Raw `href` attribute (empty if the link has none)
    pub href: String,
    /// Heading of the enclosing block, for grouped listings
    pub group: Option<String>,
}

/// Outcome of one crawl: the records plus per-run counters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CrawlReport<T> {
    /// Records in discovery order
    pub records: Vec<T>,
    /// Items whose detail fields fell back to empty strings
    pub fallbacks: usize,
    /// Detail pages written to the HTML directory
    pub pages_saved: usize,
}

impl<T> Default for CrawlReport<T> {
    fn default() -> Self {
        Self {
            records: Vec::new(),
            fallbacks: 0,
            pages_saved: 0,
        }
    }
}
