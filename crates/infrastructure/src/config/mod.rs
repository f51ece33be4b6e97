//! Application configuration
//!
//! Split into focused sub-modules:
//! - `location`: fallback position, sensor timeout, positioning provider
//! - `integrations`: maps, recommendation backend, routing
//! - `logging`: log filter and format
//!
//! Sources are layered: built-in defaults, then `lifeline.toml` in the
//! working directory (or an explicit file), then `LIFELINE_*` environment
//! variables with `__` between nested keys, e.g. `LIFELINE_MAPS__API_KEY`.

mod integrations;
mod location;
mod logging;

use std::path::Path;

use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

pub use integrations::{MapsAppConfig, RecommendationAppConfig, RoutingConfig};
pub use location::{LocationAppConfig, PositioningProvider};
pub use logging::LoggingConfig;

/// Shared default for boolean `true` fields across config structs
pub(crate) const fn default_true() -> bool {
    true
}

/// Errors raised while loading or validating configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A source could not be read or deserialized
    #[error("Failed to load configuration: {0}")]
    Load(#[from] config::ConfigError),

    /// The merged configuration is unusable
    #[error("Invalid configuration: {}", .0.join("; "))]
    Invalid(Vec<String>),
}

/// Main application configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Location stage configuration
    #[serde(default)]
    pub location: LocationAppConfig,

    /// Google Maps configuration
    #[serde(default)]
    pub maps: MapsAppConfig,

    /// Recommendation backend configuration
    #[serde(default)]
    pub recommendation: RecommendationAppConfig,

    /// Walking route configuration
    #[serde(default)]
    pub routing: RoutingConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from defaults, an optional file and the environment
    ///
    /// With `path = None`, `lifeline.toml` in the working directory is used
    /// if present. An explicit path must exist.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut builder = config::Config::builder()
            // Start with defaults
            .set_default("logging.level", "info")?
            .set_default("location.provider", "static")?;

        builder = match path {
            Some(path) => builder.add_source(config::File::from(path).required(true)),
            None => builder.add_source(config::File::with_name("lifeline").required(false)),
        };

        // Override with environment variables (e.g., LIFELINE_RECOMMENDATION__ENDPOINT_URL)
        let builder = builder.add_source(
            config::Environment::with_prefix("LIFELINE")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let config: Self = builder.build()?.try_deserialize()?;
        debug!(
            provider = %config.location.provider,
            contract = %config.recommendation.contract,
            routing = config.routing.enabled,
            "Configuration loaded"
        );
        Ok(config)
    }

    /// Check the merged configuration, reporting every problem found
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut problems = Vec::new();

        if self.location.default_location().is_none() {
            problems.push(format!(
                "location: default coordinates ({}, {}) out of range",
                self.location.default_latitude, self.location.default_longitude
            ));
        }
        if self.location.default_address().is_none() {
            problems.push("location: default_address must not be empty".to_string());
        }
        if self.location.timeout_secs == 0 {
            problems.push("location: timeout_secs must be greater than 0".to_string());
        }
        if self.location.provider == PositioningProvider::Ip
            && self.location.ip.base_url.trim().is_empty()
        {
            problems.push("location.ip: base_url must not be empty".to_string());
        }

        if let Err(e) = self.maps.to_maps_config().validate() {
            problems.push(format!("maps: {e}"));
        }
        if let Err(e) = self.recommendation.to_recommendation_config().validate() {
            problems.push(format!("recommendation: {e}"));
        }

        if problems.is_empty() {
            Ok(())
        } else {
            Err(ConfigError::Invalid(problems))
        }
    }
}
