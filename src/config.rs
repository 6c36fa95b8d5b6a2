// Application configuration.
// Loads optional settings from config.json in the platform config directory.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::cache::REVALIDATE_AFTER;
use crate::error::{Result, WikiError};

/// Base URL of the published catalog data.
pub const DEFAULT_BASE_URL: &str =
    "https://raw.githubusercontent.com/dupitydumb/wiki-data/refs/heads/main/data";

/// User-tunable settings. Every field is optional in the file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Base URL serving categories.json and the per-category documents.
    pub base_url: String,
    /// Seconds a stored response may be reused before refetching.
    pub revalidate_secs: u64,
    /// Per-request timeout enforced by the HTTP client.
    pub request_timeout_secs: u64,
    /// Keep responses on disk between runs.
    pub disk_cache: bool,
    /// Directory the editor writes categories.json into.
    pub export_dir: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            revalidate_secs: REVALIDATE_AFTER.as_secs(),
            request_timeout_secs: 30,
            disk_cache: true,
            export_dir: None,
        }
    }
}

impl Config {
    /// Path to the config file (~/.config/sitewiki/config.json on Linux).
    pub fn path() -> Option<PathBuf> {
        ProjectDirs::from("", "", "sitewiki").map(|dirs| dirs.config_dir().join("config.json"))
    }

    /// Load the config from its default location, falling back to defaults.
    pub fn load() -> Result<Self> {
        match Self::path() {
            Some(path) => Self::load_from(&path),
            None => Ok(Self::default()),
        }
    }

    /// Load the config from a specific file. A missing file yields defaults.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path)?;
        let config: Config = serde_json::from_str(&contents)
            .map_err(|e| WikiError::Config(format!("{}: {}", path.display(), e)))?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if !self.base_url.starts_with("https://") && !self.base_url.starts_with("http://") {
            return Err(WikiError::Config(format!(
                "base_url must be an http(s) URL, got {:?}",
                self.base_url
            )));
        }
        if self.request_timeout_secs == 0 {
            return Err(WikiError::Config(
                "request_timeout_secs must be positive".to_string(),
            ));
        }
        Ok(())
    }

    pub fn revalidate_after(&self) -> Duration {
        Duration::from_secs(self.revalidate_secs)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Directory for editor exports; the working directory when unset.
    pub fn export_dir(&self) -> PathBuf {
        self.export_dir
            .clone()
            .unwrap_or_else(|| PathBuf::from("."))
    }
}
