//! Configuration file for the showroom.
//!
//! The configuration is a small JSON document stored in the standard
//! configuration directory (`~/.config/showroom/config.json` on most
//! platforms). Every field is optional; missing fields fall back to defaults.
//! Environment variables override the file, and the binary's flags override
//! both.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use dirs_next::{config_dir, data_local_dir, home_dir};
use serde::{Deserialize, Serialize};
use showroom_types::Platform;
use thiserror::Error;
use tracing::warn;

/// Environment variable allowing callers to override the configuration file path.
pub const CONFIG_PATH_ENV: &str = "SHOWROOM_CONFIG_PATH";
/// Environment variable overriding the configured platform class.
pub const PLATFORM_ENV: &str = "SHOWROOM_PLATFORM";
/// Environment variable overriding the TUI log file path.
pub const LOG_PATH_ENV: &str = "SHOWROOM_LOG_PATH";

/// Default filename for the JSON payload.
pub const CONFIG_FILE_NAME: &str = "config.json";
/// Default filename for the TUI log file.
pub const LOG_FILE_NAME: &str = "showroom.log";
/// Delay before re-issuing a scroll whose target was not measured yet.
pub const DEFAULT_SCROLL_RETRY_DELAY_MS: u64 = 50;

const APP_DIR: &str = "showroom";

/// Error surfaced when reading the configuration fails.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// I/O failure other than a missing file (for example, permissions).
    #[error("configuration I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Persisted configuration values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShowroomConfig {
    /// Platform class deciding between the drawer layout and the TV layout.
    pub platform: Platform,
    /// Delay before the one-shot scroll retry, in milliseconds.
    pub scroll_retry_delay_ms: u64,
    /// Whether programmatic scrolls are animated.
    pub animate_scroll: bool,
    /// Optional registration file replacing the embedded catalog.
    pub catalog_path: Option<PathBuf>,
}

impl Default for ShowroomConfig {
    fn default() -> Self {
        Self {
            platform: Platform::default(),
            scroll_retry_delay_ms: DEFAULT_SCROLL_RETRY_DELAY_MS,
            animate_scroll: true,
            catalog_path: None,
        }
    }
}

impl ShowroomConfig {
    /// Loads the configuration from the default location and applies
    /// environment overrides.
    pub fn load() -> Result<Self, ConfigError> {
        let mut config = Self::load_from(&default_config_path())?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Loads the configuration at `path`.
    ///
    /// A missing file yields defaults. A file that cannot be parsed is logged
    /// and also yields defaults, so a broken config never blocks startup.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let mut config = match fs::read_to_string(path) {
            Ok(data) => match serde_json::from_str::<Self>(&data) {
                Ok(config) => config,
                Err(error) => {
                    warn!(
                        path = %path.display(),
                        error = %error,
                        "Failed to parse configuration file; using defaults"
                    );
                    Self::default()
                }
            },
            Err(error) if error.kind() == std::io::ErrorKind::NotFound => Self::default(),
            Err(source) => {
                return Err(ConfigError::Io {
                    path: path.to_path_buf(),
                    source,
                });
            }
        };
        config.catalog_path = config.catalog_path.take().map(|path| expand_tilde(&path.to_string_lossy()));
        Ok(config)
    }

    /// Applies `SHOWROOM_PLATFORM`; an unknown value is logged and ignored.
    pub fn apply_env_overrides(&mut self) {
        let Ok(raw) = env::var(PLATFORM_ENV) else {
            return;
        };
        if raw.trim().is_empty() {
            return;
        }
        match raw.parse::<Platform>() {
            Ok(platform) => self.platform = platform,
            Err(error) => warn!(%error, "Ignoring {PLATFORM_ENV}"),
        }
    }

    pub fn scroll_retry_delay(&self) -> Duration {
        Duration::from_millis(self.scroll_retry_delay_ms)
    }
}

/// Resolves the configuration file path, honoring `SHOWROOM_CONFIG_PATH`.
pub fn default_config_path() -> PathBuf {
    if let Some(path) = env_path(CONFIG_PATH_ENV) {
        return path;
    }
    config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_DIR)
        .join(CONFIG_FILE_NAME)
}

/// Resolves the TUI log file path, honoring `SHOWROOM_LOG_PATH`.
pub fn default_log_path() -> PathBuf {
    if let Some(path) = env_path(LOG_PATH_ENV) {
        return path;
    }
    data_local_dir()
        .unwrap_or_else(env::temp_dir)
        .join(APP_DIR)
        .join(LOG_FILE_NAME)
}

fn env_path(key: &str) -> Option<PathBuf> {
    let value = env::var(key).ok()?;
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| expand_tilde(trimmed))
}

fn expand_tilde(path: &str) -> PathBuf {
    let trimmed = path.trim();
    let home = || home_dir().unwrap_or_else(|| PathBuf::from("~"));
    if trimmed == "~" {
        return home();
    }
    match trimmed.strip_prefix("~/").or_else(|| trimmed.strip_prefix("~\\")) {
        Some(rest) => home().join(rest),
        None => PathBuf::from(trimmed),
    }
}
