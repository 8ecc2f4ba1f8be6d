//! User-defined destinations, stored separately from the catalog.

use serde::{Deserialize, Serialize};

use super::constants::{
    WAYPOINT_DEFAULT_KIND, WAYPOINT_DEFAULT_MASS, WAYPOINT_DEFAULT_RADIUS,
    WAYPOINT_DEFAULT_SUMMARY,
};

/// A user-created destination. `system` must name a valid catalog system at
/// creation time; a reference that later dangles degrades to "not found" at
/// lookup. Serialized field names match the web client's stored records.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomWaypoint {
    pub id: String,
    pub name: String,
    pub system: String,
    #[serde(rename = "orbitalAU")]
    pub orbital_au: f64,
    #[serde(default = "default_radius")]
    pub radius_earth: f64,
    #[serde(default = "default_mass")]
    pub mass_earth: f64,
    #[serde(rename = "type", default = "default_kind")]
    pub kind: String,
    #[serde(default = "default_summary")]
    pub summary: String,
}

fn default_radius() -> f64 {
    WAYPOINT_DEFAULT_RADIUS
}

fn default_mass() -> f64 {
    WAYPOINT_DEFAULT_MASS
}

fn default_kind() -> String {
    WAYPOINT_DEFAULT_KIND.to_string()
}

fn default_summary() -> String {
    WAYPOINT_DEFAULT_SUMMARY.to_string()
}

impl CustomWaypoint {
    pub fn new(id: String, name: String, system: String, orbital_au: f64) -> Self {
        CustomWaypoint {
            id,
            name,
            system,
            orbital_au,
            radius_earth: WAYPOINT_DEFAULT_RADIUS,
            mass_earth: WAYPOINT_DEFAULT_MASS,
            kind: WAYPOINT_DEFAULT_KIND.to_string(),
            summary: WAYPOINT_DEFAULT_SUMMARY.to_string(),
        }
    }
}
