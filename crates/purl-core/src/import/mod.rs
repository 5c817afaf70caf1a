//! Append URLs from an arbitrary CSV export to the redirect table.
//!
//! The source delimiter is sniffed, one column (0-based) is read from every
//! record, and URLs not yet in the table are appended with a blank `File`
//! so the next sync assigns them a page.

mod delimiter;

pub use delimiter::{detect_delimiter, CANDIDATES};

use anyhow::{Context, Result};
use std::collections::HashSet;
use std::fs;
use std::path::Path;

use crate::table::{RedirectEntry, RedirectTable};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ImportReport {
    pub added: usize,
    pub skipped_empty: usize,
    pub skipped_duplicates: usize,
}

/// Trimmed values of `column` from every non-blank record of `text`.
/// Records too short to have the column are ignored; blank cells are kept as `""`.
pub fn extract_column(text: &str, delimiter: u8, column: usize) -> Result<Vec<String>> {
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .delimiter(delimiter)
        .from_reader(text.as_bytes());

    let mut values = Vec::new();
    for (i, record) in rdr.records().enumerate() {
        let record = record.with_context(|| format!("parse source record {}", i + 1))?;
        if record.iter().all(|c| c.trim().is_empty()) {
            continue;
        }
        if let Some(cell) = record.get(column) {
            values.push(cell.trim().to_string());
        }
    }
    Ok(values)
}

/// Append unseen URLs to `table`. Matching is exact (case-sensitive).
pub fn append_new_urls<I>(table: &mut RedirectTable, urls: I) -> ImportReport
where
    I: IntoIterator<Item = String>,
{
    let mut existing: HashSet<String> =
        (0..table.len()).map(|i| table.url(i).to_string()).collect();
    let mut report = ImportReport::default();

    for url in urls {
        if url.is_empty() {
            report.skipped_empty += 1;
        } else if !existing.insert(url.clone()) {
            report.skipped_duplicates += 1;
        } else {
            table.push(RedirectEntry::new(url));
            report.added += 1;
        }
    }
    report
}

/// Import `column` of `source` into the table at `table_path`, creating the table if needed.
/// The table is only rewritten when at least one URL was added.
pub fn run(source: &Path, column: usize, table_path: &Path) -> Result<ImportReport> {
    let text = fs::read_to_string(source)
        .with_context(|| format!("read source CSV {}", source.display()))?;
    let delimiter = detect_delimiter(&text);
    tracing::debug!(
        delimiter = %(delimiter as char).escape_default(),
        "detected delimiter of {}",
        source.display()
    );

    let urls = extract_column(&text, delimiter, column)
        .with_context(|| format!("read source CSV {}", source.display()))?;
    let mut table = RedirectTable::load_or_init(table_path)?;
    let report = append_new_urls(&mut table, urls);

    if report.added > 0 {
        table.save(table_path)?;
        tracing::info!(added = report.added, "appended URLs to {}", table_path.display());
    } else {
        tracing::info!("no new URLs to append");
    }
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extract_column_handles_ragged_rows() {
        let text = "id;title;link\n1;A;https://a.example\n2;B\n\n3;C; https://c.example \n4;D;\n";
        let got = extract_column(text, b';', 2).unwrap();
        assert_eq!(
            got,
            vec!["link", "https://a.example", "https://c.example", ""]
        );
    }

    #[test]
    fn append_skips_existing_and_repeats() {
        let mut table = RedirectTable::new();
        table.push(RedirectEntry::new("https://a.example"));
        let report = append_new_urls(
            &mut table,
            ["https://a.example", "", "https://b.example", "https://b.example", "https://A.example"]
                .map(String::from),
        );
        assert_eq!(
            report,
            ImportReport {
                added: 2,
                skipped_empty: 1,
                skipped_duplicates: 2,
            }
        );
        assert_eq!(table.len(), 3);
        assert_eq!(table.url(1), "https://b.example");
        assert_eq!(table.file_name(1), None);
    }

    #[test]
    fn run_creates_table_and_is_repeatable() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("export.csv");
        fs::write(&source, "\u{feff}name;url\nA;https://a.example\nB;https://b.example\n").unwrap();
        let table_path = dir.path().join("data").join("redirects.csv");

        let first = run(&source, 1, &table_path).unwrap();
        // The header cell is imported like any other value.
        assert_eq!(first.added, 3);
        let text = fs::read_to_string(&table_path).unwrap();
        assert_eq!(text, "URL,File\nurl,\nhttps://a.example,\nhttps://b.example,\n");

        let second = run(&source, 1, &table_path).unwrap();
        assert_eq!(second.added, 0);
        assert_eq!(second.skipped_duplicates, 3);
        assert_eq!(fs::read_to_string(&table_path).unwrap(), text);
    }

    #[test]
    fn run_keeps_extra_columns_of_existing_table() {
        let dir = tempfile::tempdir().unwrap();
        let table_path = dir.path().join("redirects.csv");
        fs::write(&table_path, "URL,File,Owner\nhttps://a.example,a.html,lib\n").unwrap();
        let source = dir.path().join("in.csv");
        fs::write(&source, "https://b.example\n").unwrap();

        let report = run(&source, 0, &table_path).unwrap();
        assert_eq!(report.added, 1);
        assert_eq!(
            fs::read_to_string(&table_path).unwrap(),
            "URL,File,Owner\nhttps://a.example,a.html,lib\nhttps://b.example,,\n"
        );
    }

    #[test]
    fn run_missing_source_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = run(&dir.path().join("nope.csv"), 0, &dir.path().join("t.csv")).unwrap_err();
        assert!(format!("{:#}", err).contains("read source CSV"));
    }
}
