//! README listing of published PURLs.
//!
//! The README holds a marker-delimited region that is regenerated from the
//! table; everything outside the markers is left alone.

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;
use thiserror::Error;

use crate::config::PurlConfig;
use crate::storage;
use crate::table::RedirectTable;

pub const START_MARKER: &str = "<!-- Existing PURLs -->";
pub const END_MARKER: &str = "<!-- End PURLs -->";

#[derive(Debug, Error)]
pub enum ListingError {
    #[error("README has no `<!-- Existing PURLs -->` ... `<!-- End PURLs -->` section")]
    MissingMarkers,
}

/// Markdown lines for every row with both a file name and a URL.
pub fn render_listing(table: &RedirectTable, base_url: &str) -> String {
    let mut lines = Vec::new();
    for row in 0..table.len() {
        let (Some(file), url) = (table.file_name(row), table.url(row)) else {
            continue;
        };
        if url.is_empty() {
            continue;
        }
        let purl = format!("{base_url}{file}");
        lines.push(format!("* [{purl}]({purl}) ->  "));
        lines.push(format!("[{url}]({url})"));
    }
    lines.join("\n")
}

/// Replace the marker region of `readme` (markers included) with `listing`.
/// Spans from the first start marker to the last end marker.
pub fn replace_section(readme: &str, listing: &str) -> Result<String, ListingError> {
    let start = readme.find(START_MARKER).ok_or(ListingError::MissingMarkers)?;
    let end = readme.rfind(END_MARKER).ok_or(ListingError::MissingMarkers)?;
    if end < start {
        return Err(ListingError::MissingMarkers);
    }
    let mut out = String::with_capacity(readme.len() + listing.len());
    out.push_str(&readme[..start]);
    out.push_str(START_MARKER);
    out.push('\n');
    out.push_str(listing);
    out.push('\n');
    out.push_str(END_MARKER);
    out.push_str(&readme[end + END_MARKER.len()..]);
    Ok(out)
}

/// Regenerate the README listing. Returns the number of rows listed.
pub fn run(cfg: &PurlConfig) -> Result<usize> {
    let table = RedirectTable::load(&cfg.table_path)?;
    let listing = render_listing(&table, &cfg.listing.public_base_url);
    let count = listing.lines().filter(|l| l.starts_with("* ")).count();

    let path: &Path = &cfg.listing.readme_path;
    let readme = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    let updated = replace_section(&readme, &listing)
        .with_context(|| format!("update {}", path.display()))?;
    if updated != readme {
        storage::replace_atomically(path, updated.as_bytes())?;
    }
    tracing::info!(count, "listed PURLs in {}", path.display());
    Ok(count)
}
