//! HTML parsers for listing and detail pages
//!
//! - `listing`: discover detail links on a listing page
//! - `detail`: extract fields from a detail page

pub mod detail;
pub mod listing;

// Re-export main parsing functions
pub use detail::{parse_main_content, parse_opportunity_detail, AREA_LABEL, TIME_COMMITMENT_LABEL};
pub use listing::{parse_grouped_listing, parse_paragraph_listing};
