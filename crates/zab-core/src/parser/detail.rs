//! Detail page parsers
//!
//! Pure functions from detail page HTML to extracted fields. Missing
//! elements give empty strings, never errors.

use scraper::{ElementRef, Html};

use crate::error::Result;
use crate::types::OpportunityDetail;

use super::listing::{element_text, selector};

/// Label of the time commitment annotation
pub const TIME_COMMITMENT_LABEL: &str = "Zeitaufwand:";

/// Label of the area of engagement annotation
pub const AREA_LABEL: &str = "Einsatzgebiet:";

/// Parse an opportunity detail page.
///
/// - title: text of the first `<h2>`
/// - description: text of the first `<p>` after that heading in document order
/// - time commitment / area: full text of the first `<small>` containing the
///   respective label
///
/// # Examples
/// ```
/// use zab_core::parser::parse_opportunity_detail;
///
/// let html = "<h2>Title 1</h2><p>Desc 1</p><small>Zeitaufwand: 2 Std.</small>";
/// let detail = parse_opportunity_detail(html).unwrap();
/// assert_eq!(detail.title, "Title 1");
/// assert_eq!(detail.description, "Desc 1");
/// assert_eq!(detail.time_commitment, "Zeitaufwand: 2 Std.");
/// assert_eq!(detail.area, "");
/// ```
pub fn parse_opportunity_detail(html: &str) -> Result<OpportunityDetail> {
    let document = Html::parse_document(html);

    let heading = document.select(&selector("h2")?).next();
    let title = heading.as_ref().map(element_text).unwrap_or_default();

    // Description only exists relative to the heading
    let description = heading
        .and_then(|h2| first_paragraph_after(&document, h2))
        .map(|p| element_text(&p))
        .unwrap_or_default();

    let small_selector = selector("small")?;
    let labelled = |label: &str| {
        document
            .select(&small_selector)
            .map(|small| element_text(&small))
            .find(|text| text.contains(label))
            .unwrap_or_default()
    };

    Ok(OpportunityDetail {
        title,
        description,
        time_commitment: labelled(TIME_COMMITMENT_LABEL),
        area: labelled(AREA_LABEL),
    })
}

/// Extract the visible text of the first element matching `region_css`.
///
/// Text nodes are trimmed, empty ones dropped, and the rest joined with
/// newlines. Text inside `<script>` and `<style>` is skipped. Returns an
/// empty string when no element matches.
///
/// # Errors
/// Returns `ScrapeError::ParseError` if the selector is invalid.
///
/// # Examples
/// ```
/// use zab_core::parser::parse_main_content;
///
/// let html = "<main><h1> Projekt </h1><script>var x;</script><p>Mitmachen!</p></main>";
/// assert_eq!(parse_main_content(html, "main").unwrap(), "Projekt\nMitmachen!");
/// ```
pub fn parse_main_content(html: &str, region_css: &str) -> Result<String> {
    let document = Html::parse_document(html);
    let region_selector = selector(region_css)?;

    let Some(region) = document.select(&region_selector).next() else {
        return Ok(String::new());
    };

    Ok(visible_text(region))
}

fn first_paragraph_after<'a>(document: &'a Html, anchor: ElementRef<'a>) -> Option<ElementRef<'a>> {
    document
        .root_element()
        .descendants()
        .skip_while(|node| node.id() != anchor.id())
        .skip(1)
        .filter_map(ElementRef::wrap)
        .find(|el| el.value().name() == "p")
}

fn visible_text(region: ElementRef) -> String {
    let lines: Vec<&str> = region
        .descendants()
        .filter(|node| {
            !node
                .ancestors()
                .filter_map(ElementRef::wrap)
                .any(|el| matches!(el.value().name(), "script" | "style"))
        })
        .filter_map(|node| node.value().as_text())
        .map(|text| text.trim())
        .filter(|text| !text.is_empty())
        .collect();

    lines.join("\n").trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    const DETAIL_PAGE: &str = r#"
        <html><body>
          <p>Navigation</p>
          <div class="inhalt">
            <h2> Lesepatin/Lesepate gesucht </h2>
            <div><p> Kinder in der Grundschule beim Lesen unterstützen. </p></div>
            <p>Zweiter Absatz</p>
            <small>Träger: Stadtbibliothek</small>
            <small>Zeitaufwand: 2 Stunden pro Woche</small>
            <small>Einsatzgebiet: Nürnberg-Süd</small>
            <small>Zeitaufwand: wird ignoriert</small>
          </div>
        </body></html>"#;

    #[test]
    fn test_parse_opportunity_detail_all_fields() {
        let detail = parse_opportunity_detail(DETAIL_PAGE).unwrap();
        assert_eq!(detail.title, "Lesepatin/Lesepate gesucht");
        assert_eq!(detail.description, "Kinder in der Grundschule beim Lesen unterstützen.");
        assert_eq!(detail.time_commitment, "Zeitaufwand: 2 Stunden pro Woche");
        assert_eq!(detail.area, "Einsatzgebiet: Nürnberg-Süd");
    }

    #[test]
    fn test_parse_opportunity_detail_paragraph_before_heading_ignored() {
        let detail = parse_opportunity_detail("<p>Vorher</p><h2>Titel</h2><p>Nachher</p>").unwrap();
        assert_eq!(detail.description, "Nachher");
    }

    #[test]
    fn test_parse_opportunity_detail_without_heading() {
        let html = "<p>Absatz</p><small>Einsatzgebiet: Fürth</small>";
        let detail = parse_opportunity_detail(html).unwrap();
        assert_eq!(detail.title, "");
        assert_eq!(detail.description, "");
        assert_eq!(detail.time_commitment, "");
        assert_eq!(detail.area, "Einsatzgebiet: Fürth");
    }

    #[test]
    fn test_parse_opportunity_detail_heading_without_paragraph() {
        let detail = parse_opportunity_detail("<p>Davor</p><h2>Nur Titel</h2>").unwrap();
        assert_eq!(detail.title, "Nur Titel");
        assert_eq!(detail.description, "");
    }

    #[test]
    fn test_parse_opportunity_detail_empty_document() {
        let detail = parse_opportunity_detail("").unwrap();
        assert_eq!(detail, OpportunityDetail::default());
    }

    #[test]
    fn test_parse_main_content_skips_script_and_style() {
        let html = r#"
            <header>Kopf</header>
            <main id="content">
              <h1>Projekt Grünfläche</h1>
              <style>.x { color: red; }</style>
              <p>Wir pflanzen <b>Bäume</b>.</p>
              <script>console.log("nope")</script>
            </main>"#;
        let text = parse_main_content(html, "main").unwrap();
        assert_eq!(text, "Projekt Grünfläche\nWir pflanzen\nBäume\n.");
    }

    #[test]
    fn test_parse_main_content_missing_region() {
        let text = parse_main_content("<div>Text</div>", "main").unwrap();
        assert_eq!(text, "");
    }

    #[test]
    fn test_parse_main_content_first_region_only() {
        let html = "<main>Erster</main><main>Zweiter</main>";
        assert_eq!(parse_main_content(html, "main").unwrap(), "Erster");
    }
}
