//! `purl check` – check URL liveness and notify on failures.

use anyhow::Result;
use purl_core::check::{self, Failure};
use purl_core::config::PurlConfig;

pub fn run_check(cfg: &PurlConfig) -> Result<i32> {
    let report = check::run(cfg)?;
    if report.checked == 0 {
        println!("No URLs found in {}.", cfg.table_path.display());
        return Ok(0);
    }
    for f in &report.failed {
        match &f.failure {
            Failure::Status(code) => println!("{}: Error ({})", f.url, code),
            Failure::Transport(e) => println!("{}: Error ({})", f.url, e),
        }
    }
    println!(
        "Checked {} URL(s), {} failed{}",
        report.checked,
        report.failed.len(),
        if report.notified { "; notification sent" } else { "" }
    );
    // Failures are reported through the chat channel, not the exit code.
    Ok(0)
}
