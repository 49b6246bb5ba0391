//! Output files: CSV, JSON and raw detail pages
//!
//! CSV and JSON writes replace the whole file. Both are UTF-8 without BOM,
//! non-ASCII text is written as is.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::error::Result;
use crate::types::{Opportunity, Project};

/// Extension of saved detail pages
pub const HTML_EXTENSION: &str = "html";

/// A record type with a fixed CSV column order.
///
/// `HEADERS` must list the serialized field names in declaration order,
/// i.e. the `#[serde(rename)]` names on the record struct in `types.rs`.
pub trait CsvRecord: Serialize {
    const HEADERS: &'static [&'static str];
}

impl CsvRecord for Opportunity {
    const HEADERS: &'static [&'static str] = &[
        "titel",
        "link",
        "organisation",
        "zeitaufwand",
        "einsatzgebiet",
        "beschreibung",
    ];
}

impl CsvRecord for Project {
    const HEADERS: &'static [&'static str] = &["titel", "link", "kategorie", "details"];
}

/// Write records as CSV with a header row.
///
/// The header is written even when `records` is empty.
pub fn write_csv<R: CsvRecord>(path: &Path, records: &[R]) -> Result<()> {
    tracing::info!(path = %path.display(), count = records.len(), "Saving CSV");

    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_path(path)?;

    writer.write_record(R::HEADERS)?;
    for record in records {
        writer.serialize(record)?;
    }
    writer.flush()?;

    Ok(())
}

/// Write records as a pretty-printed JSON array.
pub fn write_json<R: Serialize>(path: &Path, records: &[R]) -> Result<()> {
    tracing::info!(path = %path.display(), count = records.len(), "Saving JSON");

    let json = serde_json::to_string_pretty(records)?;
    fs::write(path, json)?;

    Ok(())
}

/// Derive a file name from an item title.
///
/// Keeps alphanumerics (including umlauts), spaces, hyphens and underscores,
/// trims the result and appends `.html`.
///
/// # Examples
/// ```
/// use zab_core::persist::sanitize_filename;
///
/// assert_eq!(sanitize_filename("Hilfe/Begleitung: Ärzte?"), "HilfeBegleitung Ärzte.html");
/// ```
pub fn sanitize_filename(title: &str) -> String {
    let safe: String = title
        .chars()
        .filter(|c| c.is_alphanumeric() || matches!(c, ' ' | '-' | '_'))
        .collect();
    format!("{}.{}", safe.trim(), HTML_EXTENSION)
}

/// Save a detail page under `dir`, named after `title`.
///
/// Creates `dir` if needed. An existing file with the same sanitized name is
/// overwritten.
pub fn save_html(dir: &Path, title: &str, html: &str) -> Result<PathBuf> {
    if !dir.exists() {
        tracing::info!(dir = %dir.display(), "Creating directory");
        fs::create_dir_all(dir)?;
    }

    let path = dir.join(sanitize_filename(title));
    tracing::info!(path = %path.display(), "Saving HTML content");
    fs::write(&path, html)?;

    Ok(path)
}
