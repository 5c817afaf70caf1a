//! Redirect-table synchronizer.
//!
//! One pass over the table: every row with a URL ends up with a unique page
//! name and a page on disk whose bytes equal `render_page(url)`. Pages are
//! only rewritten when their content differs, so repeated runs are no-ops.
//! Newly assigned names are written back to the table atomically.

mod report;

pub use report::{RowOutcome, RowReport, SyncReport, TableUpdate};

use anyhow::{Context, Result};
use rand::Rng;
use std::collections::HashSet;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::naming::{ensure_html_ext, is_plain_file_name, unique_page_name};
use crate::page::{render_page, PAGE_EXTENSION};
use crate::storage;
use crate::table::RedirectTable;

/// Inputs of a synchronizer run.
#[derive(Debug, Clone)]
pub struct SyncConfig {
    pub table_path: PathBuf,
    pub output_dir: PathBuf,
    pub html_lang: String,
}

/// Load the table, reconcile it against `output_dir`, and persist assigned names.
///
/// Only a missing or unreadable table (or output directory) is an error;
/// row-level problems are recorded in the report.
pub fn run(cfg: &SyncConfig) -> Result<SyncReport> {
    run_with_rng(cfg, &mut rand::thread_rng())
}

/// `run` with an explicit random source for generated names.
pub fn run_with_rng<R: Rng + ?Sized>(cfg: &SyncConfig, rng: &mut R) -> Result<SyncReport> {
    run_saving_to(cfg, &cfg.table_path, rng)
}

/// Like `run_with_rng`, but assigned names are saved to `save_path`.
fn run_saving_to<R: Rng + ?Sized>(
    cfg: &SyncConfig,
    save_path: &Path,
    rng: &mut R,
) -> Result<SyncReport> {
    let mut table = RedirectTable::load(&cfg.table_path)?;
    let mut report = reconcile(&mut table, &cfg.output_dir, &cfg.html_lang, rng)?;

    let assigned = report.assigned().count();
    if assigned > 0 {
        report.table = match table.save(save_path) {
            Ok(()) => {
                tracing::info!(
                    assigned,
                    "updated {} with new file names",
                    save_path.display()
                );
                TableUpdate::Rewritten { assigned }
            }
            Err(e) => {
                tracing::warn!("failed to update redirect table: {:#}", e);
                TableUpdate::Failed {
                    assigned,
                    error: format!("{:#}", e),
                }
            }
        };
    }

    Ok(report)
}

/// Write pages for every row of `table` into `output_dir`, assigning names in place.
/// The table is not saved.
pub fn reconcile<R: Rng + ?Sized>(
    table: &mut RedirectTable,
    output_dir: &Path,
    lang: &str,
    rng: &mut R,
) -> Result<SyncReport> {
    let on_disk = existing_pages(output_dir)?;

    // Every provided name is reserved up front so a generated name can't
    // steal one that a later row asks for.
    let reserved: HashSet<String> = (0..table.len())
        .filter_map(|i| table.file_name(i))
        .map(ensure_html_ext)
        .filter(|n| !n.is_empty())
        .collect();
    let mut used: HashSet<String> = HashSet::new();

    let mut report = SyncReport::default();

    for row in 0..table.len() {
        let url = table.url(row).to_string();
        if url.is_empty() {
            tracing::warn!(row, "skipping row without URL");
            report.rows.push(RowReport {
                row,
                url,
                outcome: RowOutcome::SkippedNoUrl,
            });
            continue;
        }

        let provided = table.file_name(row).map(ensure_html_ext);
        let (file_name, assigned) = match provided {
            Some(name) if !is_plain_file_name(&name) => {
                tracing::warn!(
                    row,
                    file_name = %name,
                    "file name points outside the output directory, skipping row"
                );
                report.rows.push(RowReport {
                    row,
                    url,
                    outcome: RowOutcome::SkippedInvalidName { file_name: name },
                });
                continue;
            }
            Some(name) if used.contains(&name) => {
                tracing::warn!(row, file_name = %name, "duplicate file name, skipping row");
                report.rows.push(RowReport {
                    row,
                    url,
                    outcome: RowOutcome::SkippedDuplicateName { file_name: name },
                });
                continue;
            }
            Some(name) => (name, false),
            None => (unique_page_name(rng, &[&on_disk, &reserved, &used]), true),
        };
        used.insert(file_name.clone());

        let path = output_dir.join(&file_name);
        let content = render_page(&url, lang);
        let outcome = match storage::write_if_changed(&path, content.as_bytes()) {
            Ok(outcome) => {
                tracing::info!(row, "{}: {} -> {}", outcome.as_str(), file_name, url);
                // Only a name whose page exists goes into the table.
                if assigned {
                    table.set_file_name(row, file_name.clone());
                }
                RowOutcome::Written {
                    file_name,
                    outcome,
                    assigned,
                }
            }
            Err(e) => {
                tracing::warn!(row, "failed to write {}: {:#}", file_name, e);
                RowOutcome::Failed {
                    file_name,
                    error: format!("{:#}", e),
                }
            }
        };
        report.rows.push(RowReport { row, url, outcome });
    }

    Ok(report)
}

/// Names of `*.html` entries directly inside `dir`. A missing directory counts as empty.
fn existing_pages(dir: &Path) -> Result<HashSet<String>> {
    let entries = match fs::read_dir(dir) {
        Ok(e) => e,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(HashSet::new()),
        Err(e) => {
            return Err(e).with_context(|| format!("list output directory {}", dir.display()))
        }
    };
    let mut names = HashSet::new();
    for entry in entries {
        let entry = entry.with_context(|| format!("list output directory {}", dir.display()))?;
        if let Some(name) = entry.file_name().to_str() {
            if name.ends_with(PAGE_EXTENSION) {
                names.insert(name.to_string());
            }
        }
    }
    Ok(names)
}
