// Configuration loaded from YAML

use crate::filter::PAGE_SIZE;
use crate::seed::DEFAULT_SEED_URL;
use crate::store::IdStrategy;
use eyre::{Context, Result, eyre};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// URL returning the JSON array of seed users
    pub seed_url: String,
    /// Rows per page in listings
    pub page_size: usize,
    pub id_strategy: IdStrategy,
    /// Used when RUST_LOG is not set
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            seed_url: DEFAULT_SEED_URL.to_string(),
            page_size: PAGE_SIZE,
            id_strategy: IdStrategy::default(),
            log_level: "info".to_string(),
        }
    }
}

impl Config {
    /// Default location: `<config_dir>/roster/roster.yml`
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("roster").join("roster.yml"))
    }

    /// Load from `path` if given, else from the default location if that
    /// file exists, else fall back to defaults
    pub fn load(path: Option<&Path>) -> Result<Self> {
        if let Some(path) = path {
            return Self::from_file(path);
        }

        match Self::default_path() {
            Some(default) if default.exists() => Self::from_file(&default),
            _ => {
                debug!("No config file found, using defaults");
                Ok(Self::default())
            }
        }
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).with_context(|| format!("Failed to read config file {:?}", path))?;
        let config = Self::from_yaml(&content).with_context(|| format!("Invalid config file {:?}", path))?;
        debug!(path = ?path, "Loaded config");
        Ok(config)
    }

    pub fn from_yaml(content: &str) -> Result<Self> {
        let config: Config = serde_yaml::from_str(content).context("Failed to parse YAML")?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if self.page_size == 0 {
            return Err(eyre!("page_size must be at least 1"));
        }
        if self.seed_url.trim().is_empty() {
            return Err(eyre!("seed_url cannot be empty"));
        }
        Ok(())
    }
}
