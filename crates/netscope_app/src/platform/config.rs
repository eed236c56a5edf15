//! Start-up configuration for netscope_app.
//!
//! Read from `./netscope.ron` (or `$NETSCOPE_CONFIG`). Every field is
//! optional; a missing file means defaults.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use netscope_engine::{ScrapeSettings, DEFAULT_SERVICE_URL};
use netscope_logging::{LevelFilter, LogDestination, LogSettings};
use serde::{Deserialize, Serialize};

const CONFIG_FILENAME: &str = "netscope.ron";
const CONFIG_PATH_VAR: &str = "NETSCOPE_CONFIG";
const SERVICE_URL_VAR: &str = "NETSCOPE_SERVICE_URL";
const MIN_LOADING_INTERVAL_MS: u64 = 50;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config {path:?}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse config {path:?}: {source}")]
    Parse {
        path: PathBuf,
        source: ron::error::SpannedError,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub service_base_url: String,
    pub connect_timeout_secs: Option<u64>,
    pub request_timeout_secs: Option<u64>,
    pub max_response_bytes: u64,
    pub loading_interval_ms: u64,
    pub log_level: String,
    pub log_destination: LogDestination,
    pub log_file: PathBuf,
}

impl Default for AppConfig {
    fn default() -> Self {
        let scrape = ScrapeSettings::default();
        let log = LogSettings::default();
        Self {
            service_base_url: DEFAULT_SERVICE_URL.to_string(),
            connect_timeout_secs: scrape.connect_timeout.map(|t| t.as_secs()),
            request_timeout_secs: scrape.request_timeout.map(|t| t.as_secs()),
            max_response_bytes: scrape.max_bytes,
            loading_interval_ms: 500,
            log_level: log.level.to_string(),
            log_destination: log.destination,
            log_file: log.file,
        }
    }
}

impl AppConfig {
    pub fn scrape_settings(&self) -> ScrapeSettings {
        ScrapeSettings {
            base_url: self.service_base_url.clone(),
            connect_timeout: self.connect_timeout_secs.map(Duration::from_secs),
            request_timeout: self.request_timeout_secs.map(Duration::from_secs),
            max_bytes: self.max_response_bytes,
        }
    }

    pub fn loading_interval(&self) -> Duration {
        Duration::from_millis(self.loading_interval_ms.max(MIN_LOADING_INTERVAL_MS))
    }

    /// Parsed log level, or `None` when `log_level` is not a level name.
    pub fn level_filter(&self) -> Option<LevelFilter> {
        self.log_level.parse().ok()
    }

    pub fn log_settings(&self) -> LogSettings {
        LogSettings {
            level: self.level_filter().unwrap_or(LevelFilter::Info),
            destination: self.log_destination,
            file: self.log_file.clone(),
        }
    }
}

/// Config file location: `$NETSCOPE_CONFIG` or `./netscope.ron`.
pub fn config_path(lookup: impl Fn(&str) -> Option<String>) -> PathBuf {
    lookup(CONFIG_PATH_VAR)
        .filter(|value| !value.trim().is_empty())
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(".").join(CONFIG_FILENAME))
}

pub fn load(path: &Path) -> Result<AppConfig, ConfigError> {
    let content = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            return Ok(AppConfig::default());
        }
        Err(source) => {
            return Err(ConfigError::Read {
                path: path.to_path_buf(),
                source,
            });
        }
    };

    ron::from_str(&content).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

pub fn apply_env_overrides(
    mut config: AppConfig,
    lookup: impl Fn(&str) -> Option<String>,
) -> AppConfig {
    if let Some(url) = lookup(SERVICE_URL_VAR).filter(|value| !value.trim().is_empty()) {
        config.service_base_url = url.trim().to_string();
    }
    config
}
