//! Locations and destinations
//!
//! One tagged type serves both persisted "where the ship is" records and the
//! volatile "where the ship is going" selection, so a planet id can never be
//! mistaken for a waypoint id.

use serde::{Deserialize, Serialize};

use super::waypoint::CustomWaypoint;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Location {
    Planet { system: String, planet: String },
    Waypoint { waypoint: String },
}

impl Location {
    pub fn planet(system: impl Into<String>, planet: impl Into<String>) -> Self {
        Location::Planet {
            system: system.into(),
            planet: planet.into(),
        }
    }

    pub fn waypoint(waypoint: impl Into<String>) -> Self {
        Location::Waypoint {
            waypoint: waypoint.into(),
        }
    }

    pub fn is_waypoint(&self) -> bool {
        matches!(self, Location::Waypoint { .. })
    }
}

/// The untagged `{system, planet}` shape written by earlier versions. The
/// `planet` field may actually hold a waypoint id; only a lookup against the
/// live waypoint list can tell.
#[derive(Debug, Deserialize)]
struct LegacyLocation {
    system: String,
    planet: String,
}

/// Decode a stored location record, accepting both the tagged form and the
/// legacy untagged form. Returns None for unreadable records so storage
/// corruption degrades to "no location" instead of an error.
pub fn decode_stored_location(json: &str, waypoints: &[CustomWaypoint]) -> Option<Location> {
    if let Ok(loc) = serde_json::from_str::<Location>(json) {
        return Some(loc);
    }
    let legacy: LegacyLocation = serde_json::from_str(json).ok()?;
    if waypoints.iter().any(|w| w.id == legacy.planet) {
        Some(Location::waypoint(legacy.planet))
    } else {
        Some(Location::planet(legacy.system, legacy.planet))
    }
}
