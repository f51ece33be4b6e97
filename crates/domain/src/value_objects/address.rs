//! Human-readable address value object
//!
//! An `Address` is never empty. It is either a provider-formatted string,
//! a coordinate string synthesized from a [`GeoLocation`], or a configured
//! static default.
//!
//! # Examples
//!
//! ```
//! use domain::{Address, GeoLocation};
//!
//! let address = Address::new("Tokyo, Shinjuku").unwrap();
//! assert_eq!(address.as_str(), "Tokyo, Shinjuku");
//!
//! let synthesized = Address::from_coordinates(&GeoLocation::shinjuku());
//! assert_eq!(synthesized.as_str(), "35.6896, 139.7006");
//!
//! assert!(Address::new("   ").is_err());
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::errors::DomainError;
use crate::value_objects::GeoLocation;

/// A validated, non-empty address string
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Address {
    value: String,
}

impl Address {
    /// Create a new address, trimming surrounding whitespace
    ///
    /// # Errors
    ///
    /// Returns an error if the address is empty after trimming.
    pub fn new(address: impl Into<String>) -> Result<Self, DomainError> {
        let value = address.into().trim().to_string();
        if value.is_empty() {
            return Err(DomainError::InvalidAddress(
                "address must not be empty".to_string(),
            ));
        }
        Ok(Self { value })
    }

    /// Synthesize an address from coordinates using fixed 4-decimal formatting
    #[must_use]
    pub fn from_coordinates(location: &GeoLocation) -> Self {
        Self {
            value: location.format_fixed4(),
        }
    }

    /// Shinjuku Station area, Tokyo; pairs with [`GeoLocation::shinjuku`]
    #[must_use]
    pub fn shinjuku() -> Self {
        Self {
            value: "東京都新宿区西新宿".to_string(),
        }
    }

    /// Get the address as a string slice
    pub fn as_str(&self) -> &str {
        &self.value
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.value)
    }
}

impl TryFrom<String> for Address {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Address> for String {
    fn from(address: Address) -> Self {
        address.value
    }
}

impl AsRef<str> for Address {
    fn as_ref(&self) -> &str {
        &self.value
    }
}
