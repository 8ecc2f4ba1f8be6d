//! Catalog loading
//!
//! The catalog is read once at startup, either from a file named on the
//! command line or from the embedded fallback dataset. An explicitly named
//! file that cannot be read or parsed is a hard error: without a catalog no
//! destination can ever be selected, so the session must not limp on.

use std::fs;
use std::path::Path;

use crate::models::catalog::Catalog;
use crate::models::errors::{NavError, NavResult};

/// Built-in dataset used when no catalog file is given.
const EMBEDDED_CATALOG: &str = r#"{
  "systems": [
    {
      "id": "sol",
      "name": "Sol",
      "star": { "name": "The Sun" },
      "planets": [
        { "id": "mercury", "name": "Mercury", "type": "Rocky",
          "orbitalAU": 0.39, "radiusEarth": 0.38,
          "summary": "Scorched innermost world, a sunrise that lasts weeks." },
        { "id": "venus", "name": "Venus", "type": "Rocky",
          "orbitalAU": 0.72, "radiusEarth": 0.95,
          "summary": "Runaway greenhouse under permanent acid cloud." },
        { "id": "earth", "name": "Earth", "type": "Terrestrial",
          "orbitalAU": 1.0, "radiusEarth": 1.0, "massEarth": 1.0,
          "summary": "Home port. Liquid water, breathable air, paperwork." },
        { "id": "mars", "name": "Mars", "type": "Rocky",
          "orbitalAU": 1.52, "radiusEarth": 0.53,
          "summary": "Cold desert with the tallest volcano on record." },
        { "id": "jupiter", "name": "Jupiter", "type": "Gas giant",
          "orbitalAU": 5.2, "radiusEarth": 11.2,
          "summary": "Storm king of the outer system." }
      ]
    },
    {
      "id": "centauri",
      "name": "Alpha Centauri",
      "star": { "name": "Rigil Kentaurus" },
      "planets": [
        { "id": "proxima-b", "name": "Proxima b", "type": "Rocky",
          "orbitalAU": 0.05, "radiusEarth": 1.1,
          "summary": "Tidally locked world hugging its red dwarf." },
        { "id": "proxima-d", "name": "Proxima d", "type": "Rocky",
          "orbitalAU": 0.029, "radiusEarth": 0.81,
          "summary": "Sub-Earth on a two-day year." }
      ]
    },
    {
      "id": "tau-ceti",
      "name": "Tau Ceti",
      "star": { "name": "Tau Ceti" },
      "planets": [
        { "id": "tau-ceti-e", "name": "Tau Ceti e", "type": "Super-Earth",
          "orbitalAU": 0.55, "radiusEarth": 1.8,
          "summary": "Warm super-Earth at the inner habitable edge." },
        { "id": "tau-ceti-f", "name": "Tau Ceti f", "type": "Super-Earth",
          "orbitalAU": 1.35, "radiusEarth": 1.8,
          "summary": "Dim, cold, and stubbornly promising." }
      ]
    }
  ]
}"#;

pub fn builtin_catalog() -> NavResult<Catalog> {
    Catalog::from_json(EMBEDDED_CATALOG)
}

pub fn load_catalog(path: Option<&Path>) -> NavResult<Catalog> {
    match path {
        Some(path) => {
            let contents = fs::read_to_string(path)
                .map_err(|err| NavError::CatalogLoad(format!("{}: {}", path.display(), err)))?;
            Catalog::from_json(&contents)
        }
        None => builtin_catalog(),
    }
}
