//! Destination text parser
//!
//! Resolves free text against the catalog. Accepts `"<system>/<planet>"`
//! (case-insensitive id or name on both parts), a bare planet id or name
//! searched across all systems, or a bare system id or name. A matched
//! system whose planet part misses is a distinct outcome from no match at
//! all, so callers can open the system view instead of giving up.

use crate::models::catalog::Catalog;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DestinationMatch {
    /// Both a system and one of its planets matched.
    Full { system: String, planet: String },
    /// A system matched but no planet did (or none was given).
    SystemOnly { system: String },
    /// Nothing in the catalog matched.
    NoMatch,
}

pub fn parse_destination(catalog: &Catalog, text: &str) -> DestinationMatch {
    let raw = text.trim();
    if raw.is_empty() {
        return DestinationMatch::NoMatch;
    }

    if raw.contains('/') {
        let mut parts = raw.split('/');
        let system_part = parts.next().unwrap_or("").trim();
        let planet_part = parts.next().unwrap_or("").trim();

        let Some(system) = catalog.find_system(system_part) else {
            return DestinationMatch::NoMatch;
        };
        let planet = system.planets.iter().find(|p| {
            p.id.eq_ignore_ascii_case(planet_part) || p.name.eq_ignore_ascii_case(planet_part)
        });
        return match planet {
            Some(p) => DestinationMatch::Full {
                system: system.id.clone(),
                planet: p.id.clone(),
            },
            None => DestinationMatch::SystemOnly {
                system: system.id.clone(),
            },
        };
    }

    // Bare text: planet ids take precedence over planet names, names over
    // system matches, searched in catalog order.
    for system in &catalog.systems {
        if let Some(p) = system.planets.iter().find(|p| p.id.eq_ignore_ascii_case(raw)) {
            return DestinationMatch::Full {
                system: system.id.clone(),
                planet: p.id.clone(),
            };
        }
    }
    for system in &catalog.systems {
        if let Some(p) = system
            .planets
            .iter()
            .find(|p| p.name.eq_ignore_ascii_case(raw))
        {
            return DestinationMatch::Full {
                system: system.id.clone(),
                planet: p.id.clone(),
            };
        }
    }
    match catalog.find_system(raw) {
        Some(system) => DestinationMatch::SystemOnly {
            system: system.id.clone(),
        },
        None => DestinationMatch::NoMatch,
    }
}
