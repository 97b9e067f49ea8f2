//! Path management for Aqua configuration and state files.
//!
//! ```text
//! ~/.config/aqua/
//! ├── config.toml     # WidgetConfig
//! └── session.toml    # Session slots, one key per brand
//! ```

use aqua_core::error::StorageError;
use std::path::PathBuf;

const APP_DIR: &str = "aqua";
const CONFIG_FILE: &str = "config.toml";
const SESSION_FILE: &str = "session.toml";

/// Resolves Aqua's files under the platform config directory.
pub struct AquaPaths;

impl AquaPaths {
    /// Returns the Aqua configuration directory (e.g. `~/.config/aqua/`).
    pub fn config_dir() -> Result<PathBuf, StorageError> {
        dirs::config_dir()
            .map(|dir| dir.join(APP_DIR))
            .ok_or_else(|| StorageError::config("Could not determine config directory"))
    }

    /// Returns the path to `config.toml`.
    pub fn config_file() -> Result<PathBuf, StorageError> {
        Ok(Self::config_dir()?.join(CONFIG_FILE))
    }

    /// Returns the path to the session slot file.
    pub fn session_file() -> Result<PathBuf, StorageError> {
        Ok(Self::config_dir()?.join(SESSION_FILE))
    }
}
