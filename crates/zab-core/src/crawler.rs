//! Sequential crawl loop
//!
//! Fetches the listing page once, then visits every discovered item in
//! order: normalize link, fetch and extract the detail page, optionally save
//! its raw HTML, append the record. A failure on one item is logged and the
//! item keeps empty detail fields; only a failed listing fetch aborts the
//! crawl.

use std::path::Path;
use std::time::Duration;

use tokio::time::sleep;

use crate::client::HttpClient;
use crate::error::Result;
use crate::parser::{
    parse_grouped_listing, parse_main_content, parse_opportunity_detail, parse_paragraph_listing,
};
use crate::persist::save_html;
use crate::site::SiteProfile;
use crate::types::{CrawlReport, ListingEntry, Opportunity, OpportunityDetail, Project};

/// Result of visiting one detail page.
struct DetailVisit<T> {
    link: String,
    /// `None` when fetching or extracting failed
    fields: Option<T>,
    /// Raw page, if it could be fetched
    html: Option<String>,
}

/// Crawler bound to one HTTP client
///
/// # Example
/// ```no_run
/// use zab_core::{Crawler, HttpClient, ListingLayout, SiteProfile};
///
/// # async fn example() -> Result<(), zab_core::ScrapeError> {
/// let profile = SiteProfile::buergernetz();
/// let crawler = Crawler::with_client(HttpClient::with_config(&profile.client)?);
/// if let ListingLayout::Paragraphs { max_items, organisation } = &profile.layout {
///     let report = crawler.crawl_opportunities(&profile, organisation, *max_items).await?;
///     println!("{} opportunities", report.records.len());
/// }
/// # Ok(())
/// # }
/// ```
pub struct Crawler {
    client: HttpClient,
}

impl Crawler {
    /// Create a crawler around a pre-configured client.
    pub fn with_client(client: HttpClient) -> Self {
        Self { client }
    }

    /// Crawl a paragraph listing into opportunity records.
    ///
    /// # Arguments
    /// * `profile` - Site to crawl
    /// * `organisation` - Value of every record's `organisation` field
    /// * `max_items` - Cap on processed items; paragraphs without a link
    ///   do not count toward it
    ///
    /// # Errors
    /// Only fetching or parsing the listing page fails the crawl.
    pub async fn crawl_opportunities(
        &self,
        profile: &SiteProfile,
        organisation: &str,
        max_items: Option<usize>,
    ) -> Result<CrawlReport<Opportunity>> {
        tracing::info!(url = %profile.listing_url, "Fetching listing page");
        let listing = self.client.fetch(&profile.listing_url).await?;

        let mut entries = parse_paragraph_listing(&listing)?;
        tracing::info!(count = entries.len(), "Found linked paragraphs");

        if let Some(max) = max_items {
            if entries.len() > max {
                tracing::info!(max, "Reached item cap, ignoring remaining entries");
                entries.truncate(max);
            }
        }

        let html_dir = profile.output.html_path();
        let mut report = CrawlReport::default();

        for (index, entry) in entries.iter().enumerate() {
            if index > 0 {
                self.throttle(profile.delay).await;
            }
            tracing::info!(item = index + 1, title = %entry.title, "Processing opportunity");

            let visit = self
                .visit(profile, entry, parse_opportunity_detail)
                .await;

            let detail = match visit.fields {
                Some(detail) => {
                    log_opportunity_detail(&detail);
                    detail
                }
                None => {
                    report.fallbacks += 1;
                    OpportunityDetail::default()
                }
            };

            if self.persist_page(html_dir.as_deref(), &entry.title, visit.html.as_deref()) {
                report.pages_saved += 1;
            }

            report.records.push(Opportunity {
                title: entry.title.clone(),
                link: visit.link,
                organisation: organisation.to_string(),
                time_commitment: detail.time_commitment,
                area: detail.area,
                description: detail.description,
            });
        }

        Ok(report)
    }

    /// Crawl a grouped listing into project records.
    ///
    /// Every link of every block becomes one record; there is no cap.
    ///
    /// # Errors
    /// Fails if the listing page cannot be fetched or a selector is invalid.
    pub async fn crawl_projects(
        &self,
        profile: &SiteProfile,
        block_selector: &str,
        heading_selector: &str,
        content_selector: &str,
    ) -> Result<CrawlReport<Project>> {
        tracing::info!(url = %profile.listing_url, "Fetching listing page");
        let listing = self.client.fetch(&profile.listing_url).await?;

        let entries = parse_grouped_listing(&listing, block_selector, heading_selector)?;
        tracing::info!(count = entries.len(), "Found project links");

        let html_dir = profile.output.html_path();
        let mut report = CrawlReport::default();

        for (index, entry) in entries.iter().enumerate() {
            if index > 0 {
                self.throttle(profile.delay).await;
            }
            tracing::info!(
                item = index + 1,
                title = %entry.title,
                category = entry.group.as_deref().unwrap_or_default(),
                "Processing project"
            );

            let visit = self
                .visit(profile, entry, |html| parse_main_content(html, content_selector))
                .await;

            let details = visit.fields.unwrap_or_else(|| {
                report.fallbacks += 1;
                String::new()
            });

            if self.persist_page(html_dir.as_deref(), &entry.title, visit.html.as_deref()) {
                report.pages_saved += 1;
            }

            report.records.push(Project {
                title: entry.title.clone(),
                link: visit.link,
                category: entry.group.clone().unwrap_or_default(),
                details,
            });
        }

        Ok(report)
    }

    /// Normalize the entry's link, fetch the page and run `extract` on it.
    ///
    /// Never fails: every error is logged and reflected as `None` fields.
    /// An href that cannot be resolved is kept verbatim as the link, so that
    /// record is the one case where `link` may not be absolute.
    async fn visit<T, F>(&self, profile: &SiteProfile, entry: &ListingEntry, extract: F) -> DetailVisit<T>
    where
        F: Fn(&str) -> Result<T>,
    {
        let link = match profile.link_rule.normalize(&profile.listing_url, &entry.href) {
            Ok(link) => link,
            Err(e) => {
                tracing::warn!(title = %entry.title, href = %entry.href, error = %e, "Could not resolve link");
                return DetailVisit {
                    link: entry.href.clone(),
                    fields: None,
                    html: None,
                };
            }
        };

        tracing::info!(url = %link, "Fetching content");
        let html = match self.client.fetch(&link).await {
            Ok(html) => html,
            Err(e) => {
                tracing::warn!(url = %link, error = %e, "Error extracting content");
                return DetailVisit {
                    link,
                    fields: None,
                    html: None,
                };
            }
        };

        let fields = match extract(&html) {
            Ok(fields) => Some(fields),
            Err(e) => {
                tracing::warn!(url = %link, error = %e, "Error extracting content");
                None
            }
        };

        DetailVisit {
            link,
            fields,
            html: Some(html),
        }
    }

    /// Best-effort save of a fetched page. Returns whether a file was written.
    fn persist_page(&self, html_dir: Option<&Path>, title: &str, html: Option<&str>) -> bool {
        let (Some(dir), Some(html)) = (html_dir, html) else {
            return false;
        };

        match save_html(dir, title, html) {
            Ok(_) => true,
            Err(e) => {
                tracing::warn!(title = %title, error = %e, "Error saving HTML content");
                false
            }
        }
    }

    async fn throttle(&self, delay: Duration) {
        if delay.is_zero() {
            return;
        }
        tracing::debug!(delay_ms = delay.as_millis() as u64, "Waiting before next request");
        sleep(delay).await;
    }
}

fn log_opportunity_detail(detail: &OpportunityDetail) {
    tracing::debug!(title = %preview(&detail.title), "Found title");
    tracing::debug!(description = %preview(&detail.description), "Found description");
    tracing::debug!(time_commitment = %detail.time_commitment, "Found Zeitaufwand");
    tracing::debug!(area = %detail.area, "Found Einsatzgebiet");
}

/// First 50 characters of `text`, with an ellipsis if it was longer.
fn preview(text: &str) -> String {
    if text.chars().count() > 50 {
        format!("{}...", text.chars().take(50).collect::<String>())
    } else {
        text.to_string()
    }
}
