//! Listing page parsers
//!
//! Discovers detail links on a listing page, either from plain paragraphs
//! (Bürgernetz) or from blocks grouped under a category heading (project
//! listings).

use scraper::{ElementRef, Html, Selector};

use crate::error::{Result, ScrapeError};
use crate::types::ListingEntry;

/// Parse a selector, mapping failures to `ScrapeError::ParseError`.
pub(crate) fn selector(css: &str) -> Result<Selector> {
    Selector::parse(css).map_err(|e| ScrapeError::ParseError(format!("Invalid selector {:?}: {:?}", css, e)))
}

/// Collect the first link of every paragraph, in document order.
///
/// Paragraphs without an `<a>` element are skipped. A link without `href`
/// yields an empty `href`, which later resolves to the listing URL itself.
///
/// # Arguments
/// * `html` - Raw HTML content of the listing page
///
/// # Examples
/// ```
/// use zab_core::parser::parse_paragraph_listing;
///
/// let html = r#"<p>Intro</p><p><a href="detail?id=1"> Lesepate </a></p>"#;
/// let entries = parse_paragraph_listing(html).unwrap();
/// assert_eq!(entries.len(), 1);
/// assert_eq!(entries[0].title, "Lesepate");
/// assert_eq!(entries[0].href, "detail?id=1");
/// ```
pub fn parse_paragraph_listing(html: &str) -> Result<Vec<ListingEntry>> {
    let document = Html::parse_document(html);
    let paragraph_selector = selector("p")?;
    let link_selector = selector("a")?;

    let entries = document
        .select(&paragraph_selector)
        .filter_map(|p| p.select(&link_selector).next())
        .map(|link| entry_from_link(&link, None))
        .collect();

    Ok(entries)
}

/// Collect every link inside each grouping block, tagged with the block's heading.
///
/// # Arguments
/// * `html` - Raw HTML content of the listing page
/// * `block_css` - Selector for the grouping blocks
/// * `heading_css` - Selector for the heading inside a block; the first match
///   is the category, an absent heading gives an empty category
///
/// # Errors
/// Returns `ScrapeError::ParseError` if one of the selectors is invalid.
pub fn parse_grouped_listing(
    html: &str,
    block_css: &str,
    heading_css: &str,
) -> Result<Vec<ListingEntry>> {
    let document = Html::parse_document(html);
    let block_selector = selector(block_css)?;
    let heading_selector = selector(heading_css)?;
    let link_selector = selector("a")?;

    let mut entries = Vec::new();

    for block in document.select(&block_selector) {
        let category = block
            .select(&heading_selector)
            .next()
            .map(|heading| element_text(&heading))
            .unwrap_or_default();

        for link in block.select(&link_selector) {
            entries.push(entry_from_link(&link, Some(category.clone())));
        }
    }

    Ok(entries)
}

fn entry_from_link(link: &ElementRef, group: Option<String>) -> ListingEntry {
    ListingEntry {
        title: element_text(link),
        href: link.value().attr("href").unwrap_or_default().to_string(),
        group,
    }
}

/// Concatenated text of an element, trimmed.
pub(crate) fn element_text(element: &ElementRef) -> String {
    element.text().collect::<String>().trim().to_string()
}
