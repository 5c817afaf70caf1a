//! Offline consistency check: does every named page on disk match its table row?

use anyhow::Result;
use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use crate::config::PurlConfig;
use crate::naming::{ensure_html_ext, is_plain_file_name};
use crate::page::render_page;
use crate::table::RedirectTable;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageProblem {
    Missing,
    /// Page exists but is not the rendering of the row's URL.
    Stale,
    Unreadable(String),
    /// The name would resolve outside the output directory; nothing was read.
    InvalidName,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageIssue {
    pub row: usize,
    pub file_name: String,
    pub url: String,
    pub problem: PageProblem,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VerifyReport {
    pub checked: usize,
    pub issues: Vec<PageIssue>,
}

impl VerifyReport {
    pub fn is_clean(&self) -> bool {
        self.issues.is_empty()
    }
}

/// Compare each row that has both URL and file name against its page in `output_dir`.
pub fn verify_pages(table: &RedirectTable, output_dir: &Path, lang: &str) -> VerifyReport {
    let mut report = VerifyReport::default();
    for row in 0..table.len() {
        let url = table.url(row);
        let Some(file_name) = table.file_name(row).map(ensure_html_ext) else {
            continue;
        };
        if url.is_empty() {
            continue;
        }
        report.checked += 1;

        let read = if is_plain_file_name(&file_name) {
            Some(fs::read(output_dir.join(&file_name)))
        } else {
            None
        };
        let problem = match read {
            None => PageProblem::InvalidName,
            Some(Ok(bytes)) if bytes == render_page(url, lang).as_bytes() => continue,
            Some(Ok(_)) => PageProblem::Stale,
            Some(Err(e)) if e.kind() == ErrorKind::NotFound => PageProblem::Missing,
            Some(Err(e)) => PageProblem::Unreadable(e.to_string()),
        };
        tracing::warn!(row, "page {} for {} is {:?}", file_name, url, problem);
        report.issues.push(PageIssue {
            row,
            file_name,
            url: url.to_string(),
            problem,
        });
    }
    report
}

pub fn run(cfg: &PurlConfig) -> Result<VerifyReport> {
    let table = RedirectTable::load(&cfg.table_path)?;
    Ok(verify_pages(&table, &cfg.output_dir, &cfg.html_lang))
}
