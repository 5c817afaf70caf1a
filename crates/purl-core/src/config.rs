use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

use crate::sync::SyncConfig;

/// Default location of the redirect table, relative to the working directory.
pub const DEFAULT_TABLE_PATH: &str = "data/redirects.csv";

/// URL liveness check parameters (`[check]` section).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckConfig {
    /// Total time allowed per request, in seconds.
    pub request_timeout_secs: u64,
    /// Pause between consecutive requests, in seconds.
    pub delay_between_requests_secs: u64,
    /// `User-Agent` header sent with each request.
    pub user_agent: String,
}

impl Default for CheckConfig {
    fn default() -> Self {
        Self {
            request_timeout_secs: 10,
            delay_between_requests_secs: 1,
            user_agent: "purl-checker/1.0".to_string(),
        }
    }
}

/// Chat notification settings (`[notify]` section).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NotifyConfig {
    /// Mattermost incoming webhook. When unset, failures are only logged.
    #[serde(default)]
    pub mattermost_webhook_url: Option<String>,
}

/// UTM default parameters (`[utm]` section).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UtmConfig {
    pub source: String,
    pub campaign: String,
    /// Where the rewritten table is written. Point it at `table_path` to rewrite in place.
    pub output_path: PathBuf,
}

impl Default for UtmConfig {
    fn default() -> Self {
        Self {
            source: "qr".to_string(),
            campaign: "default".to_string(),
            output_path: PathBuf::from("data/redirects.updated.csv"),
        }
    }
}

/// README listing settings (`[listing]` section).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListingConfig {
    pub readme_path: PathBuf,
    /// Public prefix that generated page names are appended to.
    pub public_base_url: String,
}

impl Default for ListingConfig {
    fn default() -> Self {
        Self {
            readme_path: PathBuf::from("README.md"),
            public_base_url: "https://purl.example.org/".to_string(),
        }
    }
}

/// Global configuration loaded from `~/.config/purl/config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PurlConfig {
    /// Redirect table (CSV with `URL,File` header).
    pub table_path: PathBuf,
    /// Directory that generated pages are written to.
    pub output_dir: PathBuf,
    /// `lang` attribute of generated pages.
    pub html_lang: String,
    #[serde(default)]
    pub check: CheckConfig,
    #[serde(default)]
    pub notify: NotifyConfig,
    #[serde(default)]
    pub utm: UtmConfig,
    #[serde(default)]
    pub listing: ListingConfig,
}

impl Default for PurlConfig {
    fn default() -> Self {
        Self {
            table_path: PathBuf::from(DEFAULT_TABLE_PATH),
            output_dir: PathBuf::from("."),
            html_lang: "da".to_string(),
            check: CheckConfig::default(),
            notify: NotifyConfig::default(),
            utm: UtmConfig::default(),
            listing: ListingConfig::default(),
        }
    }
}

impl PurlConfig {
    /// Settings for a synchronizer run.
    pub fn sync_config(&self) -> SyncConfig {
        SyncConfig {
            table_path: self.table_path.clone(),
            output_dir: self.output_dir.clone(),
            html_lang: self.html_lang.clone(),
        }
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("purl")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<PurlConfig> {
    let path = config_path()?;
    if !path.exists() {
        let default_cfg = PurlConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, toml)?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }

    let data = fs::read_to_string(&path)?;
    let cfg: PurlConfig = toml::from_str(&data)?;
    Ok(cfg)
}
