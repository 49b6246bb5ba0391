//! End-to-end run: crawl a site, then write CSV and JSON
//!
//! Output files are only written after the whole crawl succeeded; a
//! run-level error leaves them untouched.

use std::path::PathBuf;

use crate::client::HttpClient;
use crate::crawler::Crawler;
use crate::error::Result;
use crate::persist::{write_csv, write_json, CsvRecord};
use crate::site::{ListingLayout, SiteProfile};
use crate::types::CrawlReport;

/// What a finished run produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineSummary {
    /// Records written to CSV and JSON
    pub records: usize,
    /// Items whose detail fields fell back to empty strings
    pub fallbacks: usize,
    /// Detail pages saved as HTML
    pub pages_saved: usize,
    pub csv_path: PathBuf,
    pub json_path: PathBuf,
    pub html_dir: Option<PathBuf>,
}

/// Crawl the site described by `profile` and persist the records.
///
/// # Errors
/// Fails if the HTTP client cannot be built, the listing page cannot be
/// fetched or parsed, or an output file cannot be written.
///
/// # Example
/// ```no_run
/// use zab_core::{pipeline, SiteProfile};
///
/// # async fn example() -> Result<(), zab_core::ScrapeError> {
/// let summary = pipeline::run(&SiteProfile::buergernetz()).await?;
/// println!("{} records in {}", summary.records, summary.csv_path.display());
/// # Ok(())
/// # }
/// ```
pub async fn run(profile: &SiteProfile) -> Result<PipelineSummary> {
    let client = HttpClient::with_config(&profile.client)?;
    let crawler = Crawler::with_client(client);

    match &profile.layout {
        ListingLayout::Paragraphs {
            max_items,
            organisation,
        } => {
            tracing::info!("Starting to scrape volunteer opportunities");
            let report = crawler
                .crawl_opportunities(profile, organisation, *max_items)
                .await?;
            persist(profile, report)
        }
        ListingLayout::Groups {
            block_selector,
            heading_selector,
            content_selector,
        } => {
            tracing::info!("Starting to scrape projects");
            let report = crawler
                .crawl_projects(profile, block_selector, heading_selector, content_selector)
                .await?;
            persist(profile, report)
        }
    }
}

fn persist<R: CsvRecord>(profile: &SiteProfile, report: CrawlReport<R>) -> Result<PipelineSummary> {
    let csv_path = profile.output.csv_path();
    let json_path = profile.output.json_path();

    write_csv(&csv_path, &report.records)?;
    write_json(&json_path, &report.records)?;

    Ok(PipelineSummary {
        records: report.records.len(),
        fallbacks: report.fallbacks,
        pages_saved: report.pages_saved,
        csv_path,
        json_path,
        html_dir: profile.output.html_path(),
    })
}
