//! Configuration and file management for the browser state store
//!
//! This crate provides:
//! - File path utilities for config and cache directories
//! - Configuration file loading (TOML)
//! - Browser store configuration (BrowserConfig)

pub mod browser_config;
pub mod config_file;
pub mod paths;

pub use browser_config::{BrowserConfig, EngineConfig, ThumbnailsConfig};
pub use config_file::load_config_file;
