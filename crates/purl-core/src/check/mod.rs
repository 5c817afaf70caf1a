//! URL liveness check.
//!
//! Every distinct URL of the redirect table is fetched in turn (following
//! redirects) with a pause between requests. URLs that error out or end in
//! a 4xx/5xx status are collected and reported in one chat message.

mod probe;

pub use probe::{CurlProbe, ProbeError, UrlProbe};

use anyhow::Result;
use std::time::Duration;

use crate::config::PurlConfig;
use crate::notify;
use crate::table::RedirectTable;

/// Why a URL counted as down.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Failure {
    Status(u32),
    Transport(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FailedUrl {
    pub url: String,
    pub failure: Failure,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CheckReport {
    pub checked: usize,
    pub failed: Vec<FailedUrl>,
    /// Whether the failure notification went out.
    pub notified: bool,
}

/// Final statuses below 400 count as reachable.
pub fn is_success(code: u32) -> bool {
    (200..400).contains(&code)
}

/// Probe each URL in order, sleeping `delay` between requests.
pub fn check_urls<P: UrlProbe + ?Sized>(
    probe: &mut P,
    urls: &[String],
    delay: Duration,
) -> CheckReport {
    let mut report = CheckReport::default();
    tracing::info!("checking {} URLs", urls.len());

    for (i, url) in urls.iter().enumerate() {
        if i > 0 && !delay.is_zero() {
            std::thread::sleep(delay);
        }
        report.checked += 1;
        let failure = match probe.probe(url) {
            Ok(code) if is_success(code) => {
                tracing::debug!(code, "{} ok", url);
                continue;
            }
            Ok(code) => {
                tracing::error!("URL check failed for {}: HTTP {}", url, code);
                Failure::Status(code)
            }
            Err(e) => {
                tracing::error!("URL check threw error for {}: {}", url, e);
                Failure::Transport(e.to_string())
            }
        };
        report.failed.push(FailedUrl {
            url: url.clone(),
            failure,
        });
    }
    report
}

/// Chat message listing failed URLs, one per line.
pub fn failure_message(failed: &[FailedUrl]) -> String {
    let mut msg = String::from("The following URLs failed:");
    for f in failed {
        msg.push('\n');
        msg.push_str(&f.url);
    }
    msg
}

/// Check the table's URLs with `probe` and notify through the configured webhook on failure.
pub fn run_with_probe<P: UrlProbe + ?Sized>(
    cfg: &PurlConfig,
    probe: &mut P,
) -> Result<CheckReport> {
    tracing::info!("loading URLs from {}", cfg.table_path.display());
    let table = RedirectTable::load(&cfg.table_path)?;
    let urls = table.distinct_urls();
    if urls.is_empty() {
        tracing::warn!("no URLs found in {}", cfg.table_path.display());
        return Ok(CheckReport::default());
    }

    let delay = Duration::from_secs(cfg.check.delay_between_requests_secs);
    let mut report = check_urls(probe, &urls, delay);

    if report.failed.is_empty() {
        tracing::info!("all URLs responded OK");
    } else {
        tracing::error!("{} URLs failed, sending notification", report.failed.len());
        let timeout = Duration::from_secs(cfg.check.request_timeout_secs);
        report.notified = notify::notify(&cfg.notify, &failure_message(&report.failed), timeout);
    }
    Ok(report)
}

/// `run_with_probe` using libcurl with the configured timeout and user agent.
pub fn run(cfg: &PurlConfig) -> Result<CheckReport> {
    let mut probe = CurlProbe::new(
        Duration::from_secs(cfg.check.request_timeout_secs),
        cfg.check.user_agent.clone(),
    );
    run_with_probe(cfg, &mut probe)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    /// Canned statuses; unknown URLs fail with a transport error.
    struct FakeProbe {
        statuses: HashMap<String, u32>,
        seen: Vec<String>,
    }

    impl FakeProbe {
        fn new(statuses: &[(&str, u32)]) -> Self {
            Self {
                statuses: statuses.iter().map(|(u, c)| (u.to_string(), *c)).collect(),
                seen: Vec::new(),
            }
        }
    }

    impl UrlProbe for FakeProbe {
        fn probe(&mut self, url: &str) -> Result<u32, ProbeError> {
            self.seen.push(url.to_string());
            self.statuses
                .get(url)
                .copied()
                .ok_or_else(|| ProbeError::Curl(curl::Error::new(6)))
        }
    }

    #[test]
    fn success_range() {
        assert!(is_success(200));
        assert!(is_success(302));
        assert!(!is_success(404));
        assert!(!is_success(500));
        assert!(!is_success(101));
    }

    #[test]
    fn collects_failures_in_order() {
        let mut probe = FakeProbe::new(&[
            ("https://ok", 200),
            ("https://gone", 404),
            ("https://moved", 301),
        ]);
        let urls: Vec<String> = ["https://ok", "https://gone", "https://dns", "https://moved"]
            .map(String::from)
            .to_vec();
        let report = check_urls(&mut probe, &urls, Duration::ZERO);
        assert_eq!(report.checked, 4);
        assert_eq!(report.failed.len(), 2);
        assert_eq!(report.failed[0].url, "https://gone");
        assert_eq!(report.failed[0].failure, Failure::Status(404));
        assert!(matches!(report.failed[1].failure, Failure::Transport(_)));
        assert_eq!(probe.seen, urls);
    }

    #[test]
    fn message_lists_urls() {
        let failed = vec![
            FailedUrl {
                url: "https://a".to_string(),
                failure: Failure::Status(500),
            },
            FailedUrl {
                url: "https://b".to_string(),
                failure: Failure::Transport("timeout".to_string()),
            },
        ];
        assert_eq!(
            failure_message(&failed),
            "The following URLs failed:\nhttps://a\nhttps://b"
        );
    }

    #[test]
    fn run_dedupes_and_skips_notify_without_webhook() {
        let dir = tempfile::tempdir().unwrap();
        let table_path = dir.path().join("redirects.csv");
        std::fs::write(
            &table_path,
            "URL,File\nhttps://ok,a.html\nhttps://gone,b.html\nhttps://ok,c.html\n,d.html\n",
        )
        .unwrap();
        let mut cfg = PurlConfig {
            table_path,
            ..PurlConfig::default()
        };
        cfg.check.delay_between_requests_secs = 0;

        let mut probe = FakeProbe::new(&[("https://ok", 200), ("https://gone", 410)]);
        let report = run_with_probe(&cfg, &mut probe).unwrap();
        assert_eq!(probe.seen, vec!["https://ok", "https://gone"]);
        assert_eq!(report.failed.len(), 1);
        assert!(!report.notified);
    }

    #[test]
    fn run_missing_table_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = PurlConfig {
            table_path: dir.path().join("none.csv"),
            ..PurlConfig::default()
        };
        let mut probe = FakeProbe::new(&[]);
        assert!(run_with_probe(&cfg, &mut probe).is_err());
    }
}
