//! The redirect table: an ordered CSV of `URL,File` rows.
//!
//! Columns are located by header name and every other column is carried
//! through untouched, so a table round-trips through load/save with only
//! `URL`/`File` whitespace normalized.

mod error;
mod io;

pub use error::TableError;

/// Header of the target URL column.
pub const URL_COLUMN: &str = "URL";
/// Header of the generated page name column.
pub const FILE_COLUMN: &str = "File";

/// One row of the table, as seen by the synchronizer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RedirectEntry {
    pub url: String,
    /// Page file name; `None` when the cell is blank.
    pub file_name: Option<String>,
}

impl RedirectEntry {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            file_name: None,
        }
    }
}

/// In-memory redirect table with column order and extra columns preserved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RedirectTable {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
    url_idx: usize,
    file_idx: usize,
}

impl Default for RedirectTable {
    fn default() -> Self {
        Self::new()
    }
}

impl RedirectTable {
    /// Empty table with just the `URL,File` header.
    pub fn new() -> Self {
        Self {
            headers: vec![URL_COLUMN.to_string(), FILE_COLUMN.to_string()],
            rows: Vec::new(),
            url_idx: 0,
            file_idx: 1,
        }
    }

    /// Build a table from raw header and row cells.
    ///
    /// `URL` and `File` are matched exactly first, then case-insensitively;
    /// missing ones are appended as blank columns. Short rows are padded and
    /// both columns are trimmed.
    pub fn from_parts(mut headers: Vec<String>, mut rows: Vec<Vec<String>>) -> Self {
        let url_idx = column_index(&mut headers, URL_COLUMN);
        let file_idx = column_index(&mut headers, FILE_COLUMN);
        let width = headers.len();

        for row in &mut rows {
            if row.len() < width {
                row.resize(width, String::new());
            }
            for idx in [url_idx, file_idx] {
                let trimmed = row[idx].trim();
                if trimmed.len() != row[idx].len() {
                    row[idx] = trimmed.to_string();
                }
            }
        }

        Self {
            headers,
            rows,
            url_idx,
            file_idx,
        }
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn url(&self, row: usize) -> &str {
        &self.rows[row][self.url_idx]
    }

    pub fn file_name(&self, row: usize) -> Option<&str> {
        let f = self.rows[row][self.file_idx].as_str();
        (!f.is_empty()).then_some(f)
    }

    pub fn entry(&self, row: usize) -> RedirectEntry {
        RedirectEntry {
            url: self.url(row).to_string(),
            file_name: self.file_name(row).map(str::to_string),
        }
    }

    pub fn entries(&self) -> impl Iterator<Item = RedirectEntry> + '_ {
        (0..self.len()).map(|i| self.entry(i))
    }

    pub fn set_url(&mut self, row: usize, url: impl Into<String>) {
        self.rows[row][self.url_idx] = url.into();
    }

    pub fn set_file_name(&mut self, row: usize, file_name: impl Into<String>) {
        self.rows[row][self.file_idx] = file_name.into();
    }

    /// Append a row; extra columns are left blank.
    pub fn push(&mut self, entry: RedirectEntry) {
        let mut row = vec![String::new(); self.headers.len()];
        row[self.url_idx] = entry.url;
        row[self.file_idx] = entry.file_name.unwrap_or_default();
        self.rows.push(row);
    }

    /// Non-empty URLs in table order, first occurrence only.
    pub fn distinct_urls(&self) -> Vec<String> {
        let mut seen = std::collections::HashSet::new();
        (0..self.len())
            .map(|i| self.url(i))
            .filter(|u| !u.is_empty() && seen.insert(*u))
            .map(str::to_string)
            .collect()
    }

    pub(crate) fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }
}

fn column_index(headers: &mut Vec<String>, name: &str) -> usize {
    if let Some(i) = headers.iter().position(|h| h == name) {
        return i;
    }
    if let Some(i) = headers.iter().position(|h| h.eq_ignore_ascii_case(name)) {
        return i;
    }
    headers.push(name.to_string());
    headers.len() - 1
}
