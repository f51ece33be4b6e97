//! Terminal and JSON rendering of guidance outcomes

use application::{GuidanceOutcome, RouteOrigin, maps_link};
use domain::entities::{ADDRESS_UNKNOWN, GuidanceResult};
use domain::value_objects::GeoLocation;
use serde_json::{Value, json};

/// Distance line: walking route if computed, straight line if only
/// coordinates are known, nothing otherwise
fn distance_line(result: &GuidanceResult, origin: GeoLocation) -> Option<String> {
    if let Some(route) = &result.route {
        return Some(format!(
            "Walking: {} ({})",
            route.distance_text, route.duration_text
        ));
    }
    result.place.coordinates.map(|destination| {
        format!(
            "Distance: ~{:.1} km (straight line)",
            origin.distance_km(&destination)
        )
    })
}

/// Human-readable rendering
pub fn render_text(outcome: &GuidanceOutcome, origin: GeoLocation) -> String {
    let mut out = String::new();
    match outcome {
        GuidanceOutcome::Done(result) => {
            let address = result.place.address.as_deref().unwrap_or(ADDRESS_UNKNOWN);
            out.push_str(&format!("Shelter: {}\n", result.place.name));
            out.push_str(&format!("Address: {address}\n"));
            if let Some(line) = distance_line(result, origin) {
                out.push_str(&format!("{line}\n"));
            }
            out.push_str(&format!(
                "Map: {}\n",
                maps_link(result, RouteOrigin::Coordinates(origin))
            ));
            if result.is_degraded() {
                let tags: Vec<&str> = result.degradations.iter().map(|d| d.tag()).collect();
                out.push_str(&format!("Degraded: {}\n", tags.join(", ")));
            }
        },
        GuidanceOutcome::Errored(failure) => {
            out.push_str(failure.user_message());
            out.push('\n');
        },
        GuidanceOutcome::Superseded { generation } => {
            out.push_str(&format!(
                "Run {generation} was superseded by a newer request.\n"
            ));
        },
    }
    out
}

/// Machine-readable rendering
pub fn render_json(outcome: &GuidanceOutcome, origin: GeoLocation) -> Value {
    let state = outcome.state();
    match outcome {
        GuidanceOutcome::Done(result) => json!({
            "state": state,
            "result": result,
            "link": maps_link(result, RouteOrigin::Coordinates(origin)),
        }),
        GuidanceOutcome::Errored(failure) => json!({
            "state": state,
            "failure": failure.tag(),
            "message": failure.user_message(),
        }),
        GuidanceOutcome::Superseded { generation } => json!({
            "state": state,
            "generation": generation,
        }),
    }
}
