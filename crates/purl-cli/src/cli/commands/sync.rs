//! `purl sync` – generate/refresh redirect pages from the table.

use anyhow::Result;
use purl_core::config::PurlConfig;
use purl_core::sync::{self, RowOutcome};

pub fn run_sync(cfg: &PurlConfig) -> Result<i32> {
    let report = sync::run(&cfg.sync_config())?;

    for r in &report.rows {
        match &r.outcome {
            RowOutcome::Written {
                file_name, outcome, ..
            } => {
                let label = format!("{}:", capitalize(outcome.as_str()));
                println!("{:<10} {} -> {}", label, file_name, r.url);
            }
            RowOutcome::SkippedNoUrl => {
                eprintln!("Skipping row without URL at index {}", r.row);
            }
            RowOutcome::SkippedDuplicateName { file_name } => {
                eprintln!(
                    "Duplicate file name in table for index {}: {}. Skipping this row.",
                    r.row, file_name
                );
            }
            RowOutcome::SkippedInvalidName { file_name } => {
                eprintln!(
                    "Invalid file name in table for index {}: {}. Skipping this row.",
                    r.row, file_name
                );
            }
            RowOutcome::Failed { file_name, error } => {
                eprintln!("Failed to write {}: {}", file_name, error);
            }
        }
    }

    println!("\n{}", report);
    Ok(0)
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
