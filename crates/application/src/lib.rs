//! Application layer - Use cases and orchestration
//!
//! Contains the guidance pipeline: port definitions for every external
//! collaborator, the per-stage services with their fallbacks, and the
//! `GuidanceService` that sequences them into a single run.

pub mod error;
pub mod pipeline_context;
pub mod ports;
pub mod services;

pub use error::ApplicationError;
pub use pipeline_context::PipelineContext;
pub use ports::*;
pub use services::*;
