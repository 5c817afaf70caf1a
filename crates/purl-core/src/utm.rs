//! UTM defaults: make sure every redirect target carries `utm_source` and `utm_campaign`.

use anyhow::Result;
use std::path::Path;
use url::Url;

use crate::config::UtmConfig;
use crate::table::RedirectTable;

pub const SOURCE_PARAM: &str = "utm_source";
pub const CAMPAIGN_PARAM: &str = "utm_campaign";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UtmReport {
    pub changed: usize,
    pub unchanged: usize,
    /// URLs that could not be parsed and were left as they were.
    pub invalid: usize,
}

/// Set `key` to `default` unless some occurrence already has a non-empty value.
/// An existing empty parameter keeps its position; a missing one is appended.
fn ensure_param(pairs: &mut Vec<(String, String)>, key: &str, default: &str) {
    if pairs.iter().any(|(k, v)| k == key && !v.is_empty()) {
        return;
    }
    match pairs.iter().position(|(k, _)| k == key) {
        Some(first) => {
            pairs[first].1 = default.to_string();
            let mut i = 0;
            pairs.retain(|(k, _)| {
                let keep = k != key || i == first;
                i += 1;
                keep
            });
        }
        None => pairs.push((key.to_string(), default.to_string())),
    }
}

/// Return `raw` with UTM defaults filled in. Blank input is returned as is.
pub fn add_utm_defaults(
    raw: &str,
    source: &str,
    campaign: &str,
) -> Result<String, url::ParseError> {
    if raw.trim().is_empty() {
        return Ok(raw.to_string());
    }
    let mut url = Url::parse(raw)?;
    let mut pairs: Vec<(String, String)> = url.query_pairs().into_owned().collect();
    let before = pairs.clone();

    ensure_param(&mut pairs, SOURCE_PARAM, source);
    ensure_param(&mut pairs, CAMPAIGN_PARAM, campaign);
    if pairs == before {
        return Ok(raw.to_string());
    }

    url.query_pairs_mut().clear().extend_pairs(pairs);
    Ok(url.to_string())
}

/// Apply `add_utm_defaults` to every URL of `table` in place.
pub fn apply(table: &mut RedirectTable, cfg: &UtmConfig) -> UtmReport {
    let mut report = UtmReport::default();
    for row in 0..table.len() {
        let raw = table.url(row).to_string();
        if raw.is_empty() {
            continue;
        }
        match add_utm_defaults(&raw, &cfg.source, &cfg.campaign) {
            Ok(updated) if updated != raw => {
                table.set_url(row, updated);
                report.changed += 1;
            }
            Ok(_) => report.unchanged += 1,
            Err(e) => {
                tracing::warn!(row, "leaving unparsable URL {:?} untouched: {}", raw, e);
                report.invalid += 1;
            }
        }
    }
    report
}

/// Read the table at `table_path`, fill in UTM defaults, and write the result to `cfg.output_path`.
pub fn run(table_path: &Path, cfg: &UtmConfig) -> Result<UtmReport> {
    let mut table = RedirectTable::load(table_path)?;
    let report = apply(&mut table, cfg);
    table.save(&cfg.output_path)?;
    tracing::info!(
        changed = report.changed,
        "wrote UTM-updated table to {}",
        cfg.output_path.display()
    );
    Ok(report)
}
