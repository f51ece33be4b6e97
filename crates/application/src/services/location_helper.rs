//! Location helper utilities
//!
//! Pure functions for generating Google Maps deep links to a recommended
//! shelter. No network calls.

use domain::entities::{GuidanceResult, ResolvedPlace};
use domain::value_objects::GeoLocation;

/// Starting point of a route link
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RouteOrigin<'a> {
    /// Known coordinates
    Coordinates(GeoLocation),
    /// Free text, e.g. the displayed address when no coordinates are known
    Text(&'a str),
}

/// Generate a walking-directions link from `origin` to `place`
///
/// The destination is the place's address when known, otherwise its name.
#[must_use]
pub fn route_link(origin: RouteOrigin<'_>, place: &ResolvedPlace) -> String {
    let origin = match origin {
        RouteOrigin::Coordinates(location) => location.to_query_pair(),
        RouteOrigin::Text(text) => url_encode(text),
    };
    let destination = url_encode(place.destination_text());
    format!(
        "https://www.google.com/maps/dir/?api=1&origin={origin}&destination={destination}&travelmode=walking"
    )
}

/// Generate a Google Maps search link for a facility name
#[must_use]
pub fn search_link(name: &str) -> String {
    let encoded = url_encode(name);
    format!("https://www.google.com/maps/search/?api=1&query={encoded}")
}

/// Pick the link to show for a result
///
/// Directions when a route was computed, a plain search otherwise.
#[must_use]
pub fn maps_link(result: &GuidanceResult, origin: RouteOrigin<'_>) -> String {
    if result.route.is_some() {
        route_link(origin, &result.place)
    } else {
        search_link(&result.place.name)
    }
}

/// Percent-encode a string for use as a query component
///
/// Matches the unreserved set of JavaScript's `encodeURIComponent`.
fn url_encode(input: &str) -> String {
    let mut result = String::with_capacity(input.len() * 3);
    for byte in input.bytes() {
        match byte {
            b'A'..=b'Z'
            | b'a'..=b'z'
            | b'0'..=b'9'
            | b'-'
            | b'_'
            | b'.'
            | b'~'
            | b'!'
            | b'*'
            | b'\''
            | b'('
            | b')' => {
                result.push(byte as char);
            },
            _ => {
                result.push('%');
                result.push_str(&format!("{byte:02X}"));
            },
        }
    }
    result
}
