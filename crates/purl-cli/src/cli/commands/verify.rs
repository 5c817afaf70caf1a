//! `purl verify` – compare pages on disk against the table.

use anyhow::Result;
use purl_core::config::PurlConfig;
use purl_core::verify::{self, PageProblem};

pub fn run_verify(cfg: &PurlConfig) -> Result<i32> {
    let report = verify::run(cfg)?;
    for issue in &report.issues {
        let what = match &issue.problem {
            PageProblem::Missing => "missing".to_string(),
            PageProblem::Stale => "does not redirect to table URL".to_string(),
            PageProblem::Unreadable(e) => format!("unreadable: {e}"),
            PageProblem::InvalidName => "name points outside the output directory".to_string(),
        };
        println!("{} ({}): {}", issue.file_name, issue.url, what);
    }
    println!(
        "Verified {} page(s), {} problem(s)",
        report.checked,
        report.issues.len()
    );
    Ok(if report.is_clean() { 0 } else { 1 })
}
