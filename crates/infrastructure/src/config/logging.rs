//! Logging configuration

use serde::{Deserialize, Serialize};

use crate::telemetry::LogFormat;

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Filter directive (e.g., "info", "application=debug,info")
    #[serde(default = "default_level")]
    pub level: String,

    /// Line format
    #[serde(default)]
    pub format: LogFormat,
}

fn default_level() -> String {
    "info".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_level(),
            format: LogFormat::default(),
        }
    }
}
