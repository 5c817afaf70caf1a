//! `purl utm` – fill in default UTM parameters.

use anyhow::Result;
use purl_core::config::PurlConfig;
use purl_core::utm;

pub fn run_utm(cfg: &PurlConfig) -> Result<i32> {
    let report = utm::run(&cfg.table_path, &cfg.utm)?;
    println!(
        "Updated table written to: {} ({} changed, {} unchanged, {} unparsable)",
        cfg.utm.output_path.display(),
        report.changed,
        report.unchanged,
        report.invalid
    );
    Ok(0)
}
