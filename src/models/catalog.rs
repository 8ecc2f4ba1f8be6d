//! Catalog model
//!
//! The static tree of star systems and planets loaded once at startup.
//! Immutable after load; all navigation resolves against it.

use serde::Deserialize;

use super::errors::{NavError, NavResult};

#[derive(Debug, Clone, Deserialize)]
pub struct Star {
    pub name: String,
}

/// A catalog body. `orbital_au` is used only for relative layout and
/// `radius_earth` only for render sizing; neither is physically simulated.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Planet {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(rename = "orbitalAU")]
    pub orbital_au: f64,
    pub radius_earth: f64,
    #[serde(default)]
    pub mass_earth: Option<f64>,
    #[serde(default)]
    pub summary: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StarSystem {
    pub id: String,
    pub name: String,
    pub star: Star,
    pub planets: Vec<Planet>,
}

impl StarSystem {
    pub fn planet(&self, planet_id: &str) -> Option<&Planet> {
        self.planets.iter().find(|p| p.id == planet_id)
    }

    /// Position of a planet in this system's list. Drives the deterministic
    /// vertical jitter, so ordering is load order, never sorted.
    pub fn planet_ordinal(&self, planet_id: &str) -> Option<usize> {
        self.planets.iter().position(|p| p.id == planet_id)
    }

    /// Largest orbital distance among catalog planets, 0.0 for an empty
    /// system. Callers guard the zero case before dividing.
    pub fn max_orbital_au(&self) -> f64 {
        self.planets
            .iter()
            .map(|p| p.orbital_au)
            .fold(0.0, f64::max)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Catalog {
    pub systems: Vec<StarSystem>,
}

impl Catalog {
    pub fn from_json(json: &str) -> NavResult<Catalog> {
        serde_json::from_str(json).map_err(|e| NavError::CatalogLoad(e.to_string()))
    }

    pub fn system(&self, system_id: &str) -> Option<&StarSystem> {
        self.systems.iter().find(|s| s.id == system_id)
    }

    /// Case-insensitive lookup by id or display name, for user-typed text.
    pub fn find_system(&self, text: &str) -> Option<&StarSystem> {
        self.systems
            .iter()
            .find(|s| s.id.eq_ignore_ascii_case(text) || s.name.eq_ignore_ascii_case(text))
    }
}
