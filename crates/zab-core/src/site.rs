//! Site profiles
//!
//! Everything that used to be a hard-coded constant of a crawl (listing URL,
//! link rule, throttle delay, item cap, output file names) lives in a
//! [`SiteProfile`]. The constructors reproduce the production settings;
//! tests point a profile at a mock server instead.

use std::path::PathBuf;
use std::time::Duration;

use crate::client::ClientConfig;
use crate::link::{LinkRule, BUERGERNETZ_SORT_MARKER};

/// "No filter" search over the whole Bürgernetz database.
pub const BUERGERNETZ_LISTING_URL: &str = "https://www.iska-nuernberg.de/zab/buergernetz_alle.html?database%5Bsort%5D=angebot&database%5Bcsv%5D=be-stellen&database%5Bfields%5D%5Bzkinder%5D=&database%5Bfields%5D%5Bzjugendliche%5D=&database%5Bfields%5D%5Bzerwachsene%5D=&database%5Bfields%5D%5Bzsenioren%5D=&database%5Bfields%5D%5Bwvor%5D=&database%5Bfields%5D%5Bwnach%5D=&database%5Bfields%5D%5Bwabend%5D=&database%5Bfields%5D%5Bwwochend%5D=&database%5Bfields%5D%5Bwkurz%5D=&database%5Bfields%5D%5Btberatung%5D=&database%5Bfields%5D%5Btbetreuung%5D=&database%5Bfields%5D%5Btbuero%5D=&database%5Bfields%5D%5Btfinanzen%5D=&database%5Bfields%5D%5Bthandwerk%5D=&database%5Bfields%5D%5Btit%5D=&database%5Bfields%5D%5Btkreativ%5D=&database%5Bfields%5D%5Btoeff%5D=&database%5Bfields%5D%5Btorga%5D=&database%5Bfields%5D%5Btpate%5D=&database%5Bfields%5D%5Btsport%5D=&database%5Bfields%5D%5Btsprach%5D=&database%5Bfields%5D%5Btoutdoor%5D=&database%5Bfields%5D%5Btunterricht%5D=&database%5Bfields%5D%5Bbarbeitslos%5D=&database%5Bfields%5D%5Bbarmut%5D=&database%5Bfields%5D%5Bbbildung%5D=&database%5Bfields%5D%5Bbinternat%5D=&database%5Bfields%5D%5Bbfamilie%5D=&database%5Bfields%5D%5Bbforschung%5D=&database%5Bfields%5D%5Bbfrieden%5D=&database%5Bfields%5D%5Bbgesund%5D=&database%5Bfields%5D%5Bbkultur%5D=&database%5Bfields%5D%5Bbbehind%5D=&database%5Bfields%5D%5Bbfluechtlinge%5D=&database%5Bfields%5D%5Bbmobil%5D=&database%5Bfields%5D%5Bboeko%5D=&database%5Bfields%5D%5Bbreligion%5D=&database%5Bfields%5D%5Bbsport%5D=&database%5Bfields%5D%5Bbresoz%5D=&database%5Bfields%5D%5Bbtiere%5D=&database%5Bfields%5D%5Bbwohn%5D=&database%5Bfields%5D%5Bsjung%5D=&database%5Bfields%5D%5B_einrichtung%5D=&database%5Bfields%5D%5B_kurzinfo%5D=&Senden=Suche";

/// Organisation label stored on every Bürgernetz record
pub const BUERGERNETZ_ORGANISATION: &str = "Zentrum Aktiver Bürger";

/// Maximum number of Bürgernetz opportunities per run
pub const BUERGERNETZ_MAX_ITEMS: usize = 10;

/// Session parameter appended to project detail links
pub const PROJECTS_SESSION_PARAM: &str = "sid";

/// How items are laid out on the listing page and what a detail page yields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListingLayout {
    /// Every paragraph with a link is an item; details are discrete fields.
    Paragraphs {
        /// Stop after this many items; `None` crawls all of them
        max_items: Option<usize>,
        /// Constant stored in every record's `organisation` column
        organisation: String,
    },
    /// Links grouped in blocks under a category heading; details are the
    /// visible text of the main content region.
    Groups {
        /// Selector for the grouping blocks
        block_selector: String,
        /// Selector for the category heading inside a block
        heading_selector: String,
        /// Selector for the detail page's main content region
        content_selector: String,
    },
}

/// Where a run writes its files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputConfig {
    /// Base directory for all outputs
    pub dir: PathBuf,
    /// CSV file name inside `dir`
    pub csv_file: String,
    /// JSON file name inside `dir`
    pub json_file: String,
    /// Subdirectory for raw detail pages; `None` disables saving them
    pub html_dir: Option<String>,
}

impl OutputConfig {
    pub fn csv_path(&self) -> PathBuf {
        self.dir.join(&self.csv_file)
    }

    pub fn json_path(&self) -> PathBuf {
        self.dir.join(&self.json_file)
    }

    pub fn html_path(&self) -> Option<PathBuf> {
        self.html_dir.as_ref().map(|d| self.dir.join(d))
    }
}

/// Complete configuration of one crawl.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SiteProfile {
    /// Listing page; also the base for relative detail links
    pub listing_url: String,
    /// Normalization applied to every resolved detail link
    pub link_rule: LinkRule,
    /// Pause between consecutive detail requests
    pub delay: Duration,
    /// HTTP client settings
    pub client: ClientConfig,
    /// Listing structure and detail extraction
    pub layout: ListingLayout,
    /// Output file locations
    pub output: OutputConfig,
}

impl SiteProfile {
    /// The ZAB Bürgernetz volunteer database.
    ///
    /// # Examples
    /// ```
    /// use zab_core::SiteProfile;
    ///
    /// let profile = SiteProfile::buergernetz();
    /// assert_eq!(profile.delay.as_secs(), 1);
    /// assert_eq!(profile.output.csv_file, "volunteer_opportunities.csv");
    /// ```
    pub fn buergernetz() -> Self {
        Self {
            listing_url: BUERGERNETZ_LISTING_URL.to_string(),
            link_rule: LinkRule::TruncateAfter(BUERGERNETZ_SORT_MARKER.to_string()),
            delay: Duration::from_secs(1),
            client: ClientConfig::default(),
            layout: ListingLayout::Paragraphs {
                max_items: Some(BUERGERNETZ_MAX_ITEMS),
                organisation: BUERGERNETZ_ORGANISATION.to_string(),
            },
            output: OutputConfig {
                dir: PathBuf::from("."),
                csv_file: "volunteer_opportunities.csv".to_string(),
                json_file: "volunteer_opportunities.json".to_string(),
                html_dir: Some("html_content".to_string()),
            },
        }
    }

    /// A municipal project listing grouped by category.
    ///
    /// # Arguments
    /// * `listing_url` - Absolute URL of the project overview page
    pub fn projects(listing_url: impl Into<String>) -> Self {
        Self {
            listing_url: listing_url.into(),
            link_rule: LinkRule::StripQueryParam(PROJECTS_SESSION_PARAM.to_string()),
            delay: Duration::from_millis(500),
            client: ClientConfig::browser(),
            layout: ListingLayout::Groups {
                block_selector: "div.projektgruppe".to_string(),
                heading_selector: "h2, h3".to_string(),
                content_selector: "main, #content".to_string(),
            },
            output: OutputConfig {
                dir: PathBuf::from("."),
                csv_file: "projekte.csv".to_string(),
                json_file: "projekte.json".to_string(),
                html_dir: None,
            },
        }
    }

    /// Same profile writing into another directory.
    pub fn with_output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output.dir = dir.into();
        self
    }
}
