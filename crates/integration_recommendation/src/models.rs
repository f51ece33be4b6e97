//! Recommendation request/response models

use std::fmt;

use serde::{Deserialize, Serialize};

/// Request/response shape agreed with the recommendation backend
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContractVersion {
    /// `{"address"}` in, `facility_name` out
    #[default]
    AddressV1,
    /// `{"latitude", "longitude"}` in, `facility_name` out
    CoordinatesV1,
    /// Every known field in, free-text `answer` out
    AnswerV0,
}

impl ContractVersion {
    /// Name of the response field carrying the facility name
    #[must_use]
    pub const fn response_field(self) -> &'static str {
        match self {
            Self::AddressV1 | Self::CoordinatesV1 => "facility_name",
            Self::AnswerV0 => "answer",
        }
    }

    /// Configuration name of this version
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::AddressV1 => "address_v1",
            Self::CoordinatesV1 => "coordinates_v1",
            Self::AnswerV0 => "answer_v0",
        }
    }
}

impl fmt::Display for ContractVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How the opaque token is placed in the `Authorization` header
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AuthScheme {
    /// Token sent as-is
    #[default]
    Raw,
    /// Token prefixed with `Bearer `
    Bearer,
}

impl AuthScheme {
    /// Render the header value for a token
    #[must_use]
    pub fn header_value(self, token: &str) -> String {
        match self {
            Self::Raw => token.to_string(),
            Self::Bearer => format!("Bearer {token}"),
        }
    }
}

/// What the client knows about the user's position
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ShelterQuery {
    /// Human-readable address
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    /// Latitude coordinate
    #[serde(skip_serializing_if = "Option::is_none")]
    pub latitude: Option<f64>,
    /// Longitude coordinate
    #[serde(skip_serializing_if = "Option::is_none")]
    pub longitude: Option<f64>,
}

impl ShelterQuery {
    /// Create an empty query
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach an address
    #[must_use]
    pub fn with_address(mut self, address: impl Into<String>) -> Self {
        self.address = Some(address.into());
        self
    }

    /// Attach coordinates
    #[must_use]
    pub const fn with_coords(mut self, latitude: f64, longitude: f64) -> Self {
        self.latitude = Some(latitude);
        self.longitude = Some(longitude);
        self
    }

    /// Non-blank address, if any
    #[must_use]
    pub fn address(&self) -> Option<&str> {
        self.address.as_deref().filter(|a| !a.trim().is_empty())
    }

    /// Coordinates, if both halves are known
    #[must_use]
    pub const fn coordinates(&self) -> Option<(f64, f64)> {
        match (self.latitude, self.longitude) {
            (Some(lat), Some(lon)) => Some((lat, lon)),
            _ => None,
        }
    }
}

/// The backend's recommendation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recommendation {
    /// Name of the recommended evacuation facility
    pub facility_name: String,
}
