//! Bürgernetz Scraper Core Library
//!
//! This crate crawls municipal volunteering listings and exports the
//! collected opportunities as CSV and JSON.
//!
//! # Features
//! - Discover items on a listing page (linked paragraphs or grouped blocks)
//! - Extract text fields from each detail page
//! - Save raw detail pages as HTML files
//! - Sequential crawl with a fixed delay between requests

pub mod client;
pub mod crawler;
pub mod error;
pub mod link;
pub mod parser;
pub mod persist;
pub mod pipeline;
pub mod site;
pub mod types;

// Re-export main types for convenience
pub use client::{ClientConfig, HttpClient};
pub use crawler::Crawler;
pub use error::{Result, ScrapeError};
pub use link::LinkRule;
pub use pipeline::PipelineSummary;
pub use site::{ListingLayout, OutputConfig, SiteProfile};
pub use types::{CrawlReport, ListingEntry, Opportunity, OpportunityDetail, Project};
