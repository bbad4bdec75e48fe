//! Sub-configuration structs with their defaults.

use serde::{Deserialize, Serialize};

/// Transform settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterConfig {
    /// Gaussian sigma used by the blur filter
    pub blur_sigma: f32,
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self { blur_sigma: 5.0 }
    }
}

/// Logging settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level: error, warn, info, debug, trace
    pub level: String,

    /// Log format: "pretty" or "json"
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
        }
    }
}
