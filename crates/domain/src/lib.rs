//! Domain layer for Lifeline
//!
//! Contains the value objects and entities a guidance run produces:
//! coordinates, addresses, resolved shelters, walking routes and the
//! terminal `GuidanceResult`. This layer has no I/O and defines the
//! ubiquitous language of the pipeline.

pub mod entities;
pub mod errors;
pub mod value_objects;

pub use entities::*;
pub use errors::DomainError;
pub use value_objects::*;
