//! Domain entities produced by a guidance run

mod guidance;
mod place;

pub use guidance::{Degradation, GuidanceResult};
pub use place::{ADDRESS_UNKNOWN, ResolvedPlace, RouteInfo};
