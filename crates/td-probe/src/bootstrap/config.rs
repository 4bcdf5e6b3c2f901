//! # Configuration loader
//!
//! Reads a TOML file into [`DashboardConfig`]. Pure data loading: whatever
//! the file says is accepted, and missing keys keep their defaults.

use std::path::Path;

use anyhow::Context;
use td_core::DashboardConfig;

pub fn load_config(config_path: &Path) -> anyhow::Result<DashboardConfig> {
    let content = std::fs::read_to_string(config_path)
        .with_context(|| format!("Failed to read config file: {}", config_path.display()))?;
    DashboardConfig::from_toml_str(&content).context("Failed to parse config as TOML")
}

/// The file when given, the defaults otherwise.
pub fn load_or_default(config_path: Option<&Path>) -> anyhow::Result<DashboardConfig> {
    match config_path {
        Some(path) => load_config(path),
        None => Ok(DashboardConfig::default()),
    }
}
