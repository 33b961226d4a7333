//! Configuration and cache directory paths
//!
//! Uses XDG directories via `dirs` crate.
//!
//! Platform-specific locations:
//! - Linux: `~/.config/browser-state/`, `~/.cache/browser-state/`
//! - macOS: `~/Library/Application Support/browser-state/`, `~/Library/Caches/browser-state/`
//! - Windows: `%APPDATA%\browser-state\`, `%LOCALAPPDATA%\browser-state\`

use anyhow::{Context, Result};
use std::path::PathBuf;

const APP_NAME: &str = "browser-state";
const THUMBNAILS_DIR: &str = "thumbnails";

/// Get the application config directory, creating it if needed
pub fn config_dir() -> Result<PathBuf> {
    let base = dirs::config_dir().context("Could not determine config directory")?;
    let dir = base.join(APP_NAME);
    std::fs::create_dir_all(&dir)
        .with_context(|| format!("Failed to create config directory {}", dir.display()))?;
    Ok(dir)
}

/// Get the application cache directory, creating it if needed
pub fn cache_dir() -> Result<PathBuf> {
    let base = dirs::cache_dir().context("Could not determine cache directory")?;
    let dir = base.join(APP_NAME);
    std::fs::create_dir_all(&dir)
        .with_context(|| format!("Failed to create cache directory {}", dir.display()))?;
    Ok(dir)
}

/// Default location of the on-disk thumbnail cache
pub fn thumbnails_dir() -> Result<PathBuf> {
    Ok(cache_dir()?.join(THUMBNAILS_DIR))
}
