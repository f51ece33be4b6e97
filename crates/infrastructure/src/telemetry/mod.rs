//! Logging infrastructure
//!
//! Structured logging via `tracing`, rendered as text or JSON.

mod subscriber;

pub use subscriber::{LogFormat, TelemetryError, init_tracing};
