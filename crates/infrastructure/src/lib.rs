//! Infrastructure layer - Adapters for external systems
//!
//! Implements the ports defined in the application layer on top of the
//! maps and recommendation integration crates, loads [`AppConfig`], and
//! installs the tracing subscriber.

pub mod adapters;
pub mod config;
pub mod telemetry;

pub use adapters::*;
pub use config::{
    AppConfig, ConfigError, LocationAppConfig, LoggingConfig, MapsAppConfig,
    PositioningProvider, RecommendationAppConfig, RoutingConfig,
};
pub use telemetry::{LogFormat, TelemetryError, init_tracing};
