//! Location configuration: fallback position, sensor timeout, provider

use std::fmt;

use domain::value_objects::{Address, GeoLocation};
use integration_maps::IpGeolocationConfig;
use serde::{Deserialize, Serialize};

/// Where live positions come from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PositioningProvider {
    /// Coordinates given on the command line; none given means no sensor
    #[default]
    Static,
    /// IP geolocation service
    Ip,
}

impl fmt::Display for PositioningProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Static => write!(f, "static"),
            Self::Ip => write!(f, "ip"),
        }
    }
}

/// Location stage configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LocationAppConfig {
    /// Fallback latitude used when no live position is available
    #[serde(default = "default_latitude")]
    pub default_latitude: f64,

    /// Fallback longitude used when no live position is available
    #[serde(default = "default_longitude")]
    pub default_longitude: f64,

    /// Address sent along with the fallback coordinates
    #[serde(default = "default_address")]
    pub default_address: String,

    /// How long to wait for the positioning provider
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Live position provider
    #[serde(default)]
    pub provider: PositioningProvider,

    /// IP geolocation service settings (used when `provider = "ip"`)
    #[serde(default)]
    pub ip: IpGeolocationConfig,
}

const fn default_latitude() -> f64 {
    35.6896
}

const fn default_longitude() -> f64 {
    139.7006
}

fn default_address() -> String {
    "東京都新宿区西新宿".to_string()
}

const fn default_timeout_secs() -> u64 {
    10
}

impl Default for LocationAppConfig {
    fn default() -> Self {
        Self {
            default_latitude: default_latitude(),
            default_longitude: default_longitude(),
            default_address: default_address(),
            timeout_secs: default_timeout_secs(),
            provider: PositioningProvider::default(),
            ip: IpGeolocationConfig::default(),
        }
    }
}

impl LocationAppConfig {
    /// Fallback coordinates as a domain value
    ///
    /// Returns `None` if the configured pair is out of range.
    #[must_use]
    pub fn default_location(&self) -> Option<GeoLocation> {
        GeoLocation::new(self.default_latitude, self.default_longitude).ok()
    }

    /// Fallback address as a domain value
    ///
    /// Returns `None` if the configured address is blank.
    #[must_use]
    pub fn default_address(&self) -> Option<Address> {
        Address::new(self.default_address.clone()).ok()
    }
}
