//! Widget configuration model.
//!
//! Loaded from `config.toml` by `aqua-infrastructure`; environment variables
//! override file values.

use crate::brand::Brand;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

pub const ENV_API_BASE: &str = "AQUA_API_BASE";
pub const ENV_BRAND: &str = "AQUA_BRAND";
pub const ENV_REQUEST_TIMEOUT_SECS: &str = "AQUA_REQUEST_TIMEOUT_SECS";

/// Runtime settings for one widget deployment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WidgetConfig {
    /// Which site this widget belongs to.
    pub brand: Brand,
    /// Base URL of the chat backend. Empty means paths are used as-is.
    pub api_base: String,
    /// Client-wide timeout applied to every request.
    pub request_timeout_secs: u64,
    /// Where the session slot file lives. `None` uses the platform default.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub storage_path: Option<PathBuf>,
}

impl Default for WidgetConfig {
    fn default() -> Self {
        Self {
            brand: Brand::default(),
            api_base: String::new(),
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
            storage_path: None,
        }
    }
}

impl WidgetConfig {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs.max(1))
    }

    /// Applies environment overrides using `lookup` to read variables.
    ///
    /// Unparseable values are reported and leave the current value in place.
    pub fn apply_env<F>(&mut self, lookup: F) -> Vec<String>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut warnings = Vec::new();

        if let Some(api_base) = lookup(ENV_API_BASE) {
            self.api_base = api_base.trim().to_string();
        }

        if let Some(brand) = lookup(ENV_BRAND) {
            match brand.parse::<Brand>() {
                Ok(brand) => self.brand = brand,
                Err(e) => warnings.push(format!("{}: {}", ENV_BRAND, e)),
            }
        }

        if let Some(timeout) = lookup(ENV_REQUEST_TIMEOUT_SECS) {
            match timeout.trim().parse::<u64>() {
                Ok(secs) if secs > 0 => self.request_timeout_secs = secs,
                _ => warnings.push(format!(
                    "{}: expected a positive number of seconds, got '{}'",
                    ENV_REQUEST_TIMEOUT_SECS, timeout
                )),
            }
        }

        warnings
    }

    /// Joins the configured base with an API path.
    ///
    /// A trailing slash on the base is dropped; an empty base returns `path`.
    pub fn build_url(&self, path: &str) -> String {
        build_api_url(&self.api_base, path)
    }
}

/// Joins `api_base` and `path` the way every endpoint call expects.
pub fn build_api_url(api_base: &str, path: &str) -> String {
    if api_base.is_empty() {
        return path.to_string();
    }

    format!("{}{}", api_base.trim_end_matches('/'), path)
}
