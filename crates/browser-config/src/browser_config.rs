//! Browser store configuration
//!
//! Loaded from `.browser-state.toml`; every field falls back to its default.
//!
//! ```toml
//! [thumbnails]
//! directory = "/var/cache/browser/thumbnails"
//!
//! [engine]
//! close_timeout_ms = 2000
//! include_parent_by_default = true
//! ```

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BrowserConfig {
    #[serde(default)]
    pub thumbnails: ThumbnailsConfig,

    #[serde(default)]
    pub engine: EngineConfig,
}

/// Where tab thumbnails are cached on disk
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ThumbnailsConfig {
    /// Cache directory; defaults to `<cache dir>/browser-state/thumbnails`
    #[serde(default)]
    pub directory: Option<PathBuf>,
}

impl ThumbnailsConfig {
    /// The configured directory, or the default one in the user cache
    pub fn resolve_directory(&self) -> Result<PathBuf> {
        match &self.directory {
            Some(directory) => Ok(directory.clone()),
            None => crate::paths::thumbnails_dir(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// How long a background engine-session close may take before it is abandoned
    #[serde(default = "default_close_timeout_ms")]
    pub close_timeout_ms: u64,

    /// Whether sessions created on demand use the parent tab's session as referrer
    #[serde(default)]
    pub include_parent_by_default: bool,
}

fn default_close_timeout_ms() -> u64 {
    5000
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            close_timeout_ms: default_close_timeout_ms(),
            include_parent_by_default: false,
        }
    }
}

impl EngineConfig {
    pub fn close_timeout(&self) -> Duration {
        Duration::from_millis(self.close_timeout_ms)
    }
}

impl BrowserConfig {
    /// Load config from CWD first, then home directory, or use defaults
    pub fn load() -> Self {
        if let Some(content) = crate::load_config_file() {
            match Self::from_toml_str(&content) {
                Ok(config) => {
                    log::info!("Loaded browser config from file");
                    return config;
                }
                Err(e) => {
                    log::warn!("Failed to parse config file: {:#}", e);
                }
            }
        }

        log::debug!("Using default browser config");
        Self::default()
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).context("Invalid browser config")
    }

    /// Load config from an explicit file
    pub fn from_file(path: &std::path::Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        Self::from_toml_str(&content)
    }
}
