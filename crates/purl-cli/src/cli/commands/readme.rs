//! `purl readme` – regenerate the README PURL list.

use anyhow::Result;
use purl_core::config::PurlConfig;
use purl_core::listing;

pub fn run_readme(cfg: &PurlConfig) -> Result<i32> {
    let count = listing::run(cfg)?;
    println!(
        "{} updated with {} PURL(s).",
        cfg.listing.readme_path.display(),
        count
    );
    Ok(0)
}
