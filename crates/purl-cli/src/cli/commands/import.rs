//! `purl import <source> <column>` – append URLs from another CSV.

use anyhow::Result;
use purl_core::config::PurlConfig;
use purl_core::import;
use std::path::Path;

pub fn run_import(cfg: &PurlConfig, source: &Path, column: usize) -> Result<i32> {
    let report = import::run(source, column, &cfg.table_path)?;
    if report.added > 0 {
        println!(
            "Appended {} new URL(s) to {}",
            report.added,
            cfg.table_path.display()
        );
    } else {
        println!("No new URLs to append.");
    }
    println!("Summary:");
    println!("  Added: {}", report.added);
    println!("  Skipped (empty): {}", report.skipped_empty);
    println!("  Skipped (duplicates): {}", report.skipped_duplicates);
    Ok(0)
}
