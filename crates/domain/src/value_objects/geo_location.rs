//! WGS-84 coordinates of a user or facility

use serde::{Deserialize, Serialize};
use std::fmt;

const MEAN_EARTH_RADIUS_KM: f64 = 6371.0;

/// A validated latitude/longitude pair in decimal degrees
///
/// Deserialization goes through the same range check as [`GeoLocation::new`],
/// so a payload with `latitude: 120` never becomes a location.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawCoordinates", into = "RawCoordinates")]
pub struct GeoLocation {
    latitude: f64,
    longitude: f64,
}

#[derive(Serialize, Deserialize)]
struct RawCoordinates {
    latitude: f64,
    longitude: f64,
}

/// Which axis of a coordinate pair was out of range (or not a number)
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InvalidCoordinates {
    Latitude(f64),
    Longitude(f64),
}

impl fmt::Display for InvalidCoordinates {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Latitude(value) => write!(f, "latitude {value} is outside -90..=90"),
            Self::Longitude(value) => write!(f, "longitude {value} is outside -180..=180"),
        }
    }
}

impl std::error::Error for InvalidCoordinates {}

impl From<InvalidCoordinates> for crate::DomainError {
    fn from(err: InvalidCoordinates) -> Self {
        Self::InvalidCoordinates(err.to_string())
    }
}

impl TryFrom<RawCoordinates> for GeoLocation {
    type Error = InvalidCoordinates;

    fn try_from(raw: RawCoordinates) -> Result<Self, Self::Error> {
        Self::new(raw.latitude, raw.longitude)
    }
}

impl From<GeoLocation> for RawCoordinates {
    fn from(location: GeoLocation) -> Self {
        Self {
            latitude: location.latitude,
            longitude: location.longitude,
        }
    }
}

impl GeoLocation {
    /// # Errors
    ///
    /// Fails on the first axis that is out of range; NaN is never in range.
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, InvalidCoordinates> {
        if !(-90.0..=90.0).contains(&latitude) {
            return Err(InvalidCoordinates::Latitude(latitude));
        }
        if !(-180.0..=180.0).contains(&longitude) {
            return Err(InvalidCoordinates::Longitude(longitude));
        }
        Ok(Self {
            latitude,
            longitude,
        })
    }

    /// For literals known to be in range; usable in `const` context
    #[must_use]
    pub const fn new_unchecked(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    #[must_use]
    pub const fn latitude(&self) -> f64 {
        self.latitude
    }

    #[must_use]
    pub const fn longitude(&self) -> f64 {
        self.longitude
    }

    /// `"35.6896, 139.7006"`: the address text used when reverse geocoding
    /// finds nothing
    #[must_use]
    pub fn format_fixed4(&self) -> String {
        format!("{}, {}", to_fixed4(self.latitude), to_fixed4(self.longitude))
    }

    /// `"35.6896,139.7006"` for map link parameters
    #[must_use]
    pub fn to_query_pair(&self) -> String {
        format!("{},{}", self.latitude, self.longitude)
    }

    /// Great-circle distance on a spherical earth
    #[must_use]
    pub fn distance_km(&self, other: &Self) -> f64 {
        let (phi1, phi2) = (self.latitude.to_radians(), other.latitude.to_radians());
        let half_dphi = (phi2 - phi1) / 2.0;
        let half_dlambda = (other.longitude - self.longitude).to_radians() / 2.0;

        let h = (phi1.cos() * phi2.cos())
            .mul_add(half_dlambda.sin().powi(2), half_dphi.sin().powi(2))
            .clamp(0.0, 1.0);

        2.0 * MEAN_EARTH_RADIUS_KM * h.sqrt().asin()
    }

    /// Shinjuku Station, the built-in fallback position
    #[must_use]
    pub const fn shinjuku() -> Self {
        Self::new_unchecked(35.6896, 139.7006)
    }
}

/// Four decimals, ties away from zero, no negative zero
///
/// `{:.4}` is correctly rounded except on exact ties, where it picks the even
/// digit. A value sits exactly halfway at the fifth decimal only when it is an
/// odd multiple of 1/32, and scaling by 32 is exact.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn to_fixed4(value: f64) -> String {
    let value = if value == 0.0 { 0.0 } else { value };
    let thirty_seconds = value.abs() * 32.0;
    if thirty_seconds.fract() == 0.0 && thirty_seconds % 2.0 == 1.0 {
        let units = (value.abs() * 10_000.0).ceil() as u64;
        let sign = if value < 0.0 { "-" } else { "" };
        return format!("{sign}{}.{:04}", units / 10_000, units % 10_000);
    }
    format!("{value:.4}")
}

impl fmt::Display for GeoLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.6}, {:.6}", self.latitude, self.longitude)
    }
}
