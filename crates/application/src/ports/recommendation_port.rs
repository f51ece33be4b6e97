//! Shelter recommendation port
//!
//! Defines the interface to the backend that decides which evacuation
//! facility a user should head for.

use async_trait::async_trait;
use domain::value_objects::{Address, GeoLocation};
#[cfg(test)]
use mockall::automock;
use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// What the pipeline knows about the user's position
///
/// The pipeline always fills both fields; the adapter's contract version
/// decides which of them go on the wire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecommendationRequest {
    /// Human-readable address
    pub address: Option<Address>,
    /// User coordinates
    pub coordinates: Option<GeoLocation>,
}

impl RecommendationRequest {
    /// Create a request carrying both address and coordinates
    #[must_use]
    pub const fn new(address: Address, coordinates: GeoLocation) -> Self {
        Self {
            address: Some(address),
            coordinates: Some(coordinates),
        }
    }

    /// Whether the request carries anything a backend could use
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.address.is_none() && self.coordinates.is_none()
    }
}

/// The backend's answer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecommendationResponse {
    /// Name of the recommended facility, never blank
    pub facility_name: String,
}

impl RecommendationResponse {
    /// Create a new response
    #[must_use]
    pub fn new(facility_name: impl Into<String>) -> Self {
        Self {
            facility_name: facility_name.into(),
        }
    }
}

/// Why a recommendation could not be obtained
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RecommendationFailure {
    /// The backend could not be reached or answered with an error status
    #[error("transport failure (status {status:?}): {message}")]
    Transport {
        /// HTTP status, if the backend answered
        status: Option<u16>,
        /// Diagnostic message
        message: String,
    },

    /// The backend's answer did not match the agreed contract
    #[error("contract violation on '{field}': {message}")]
    Contract {
        /// Field that was missing or unusable
        field: String,
        /// Diagnostic message
        message: String,
    },
}

/// Port for the recommendation backend
#[cfg_attr(test, automock)]
#[async_trait]
pub trait RecommendationPort: Send + Sync {
    /// Request a recommendation; exactly one attempt
    async fn recommend(
        &self,
        request: &RecommendationRequest,
        token: &SecretString,
    ) -> Result<RecommendationResponse, RecommendationFailure>;
}
