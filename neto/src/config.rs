//! Client configuration.
//!
//! Read from `<config dir>/neto/config.toml` unless another path is given.
//! Every field has a default, so a missing file is the same as an empty one.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::api::DEFAULT_BASE_URL;
use crate::store::FileStore;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Backend root, without the endpoint paths.
    #[serde(default = "default_base_url")]
    pub base_url: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Where the token and profile are kept. Defaults to `<data dir>/neto`.
    pub dir: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// `EnvFilter` directive used when `NETO_LOG` is unset.
    #[serde(default = "default_log_level")]
    pub level: String,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_log_level() -> String {
    "warn".to_string()
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

impl Config {
    /// `~/.config/neto/config.toml` (platform equivalent).
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("neto").join("config.toml"))
    }

    /// Load from `path`, or from the default location when `None`.
    ///
    /// An explicit path must exist; the default one may be missing.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load_from_file(path),
            None => match Self::default_path() {
                Some(path) if path.exists() => Self::load_from_file(&path),
                _ => Ok(Self::default()),
            },
        }
    }

    pub fn load_from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config {}", path.display()))?;
        toml::from_str(&contents).with_context(|| format!("Failed to parse config {}", path.display()))
    }

    /// Storage directory, falling back to the platform data dir.
    pub fn storage_dir(&self) -> Result<PathBuf> {
        self.storage
            .dir
            .clone()
            .or_else(FileStore::default_dir)
            .context("Could not determine a data directory; set storage.dir")
    }
}
