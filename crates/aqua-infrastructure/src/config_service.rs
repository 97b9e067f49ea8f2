//! Configuration service.
//!
//! Loads `WidgetConfig` from `~/.config/aqua/config.toml` and applies
//! environment overrides on top.

use crate::paths::AquaPaths;
use aqua_core::config::WidgetConfig;
use aqua_core::error::{Result, StorageError};
use std::fs;
use std::path::{Path, PathBuf};

/// Loads widget configuration from a TOML file plus the environment.
#[derive(Debug, Clone)]
pub struct ConfigService {
    path: PathBuf,
}

impl ConfigService {
    /// Uses the platform default config file.
    pub fn new() -> Result<Self> {
        Ok(Self {
            path: AquaPaths::config_file()?,
        })
    }

    /// Uses a custom config file path (for testing).
    pub fn with_path(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads the file only. A missing or empty file yields defaults.
    pub fn load_file(&self) -> Result<WidgetConfig> {
        if !self.path.exists() {
            tracing::debug!(
                "[ConfigService] No config at {}, using defaults",
                self.path.display()
            );
            return Ok(WidgetConfig::default());
        }

        let content = fs::read_to_string(&self.path)?;
        if content.trim().is_empty() {
            return Ok(WidgetConfig::default());
        }

        toml::from_str(&content).map_err(|e| {
            StorageError::config(format!(
                "Failed to parse configuration file at {}: {}",
                self.path.display(),
                e
            ))
        })
    }

    /// Loads the file, then applies `AQUA_*` environment overrides.
    pub fn load(&self) -> Result<WidgetConfig> {
        let mut config = self.load_file()?;
        for warning in config.apply_env(|key| std::env::var(key).ok()) {
            tracing::warn!("[ConfigService] Ignoring environment override {}", warning);
        }
        Ok(config)
    }
}
