//! Map scene builder
//!
//! Decides what the map shows and pushes it through the renderer capability
//! trait. When either end of the trip is a custom waypoint the scene drops
//! to minimal mode: only the involved star(s), the ship, and the destination
//! marker, with origin and destination systems split left/right when they
//! differ. Otherwise the viewed system is drawn in full.

use crate::models::catalog::{Catalog, StarSystem};
use crate::models::location::Location;
use crate::models::position::MapPoint;
use crate::models::waypoint::CustomWaypoint;
use crate::services::projector::{project_planet, project_waypoint, MapLayout, SystemSlot};

/// Emphasis for a drawn body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BodyKind {
    Planet,
    Destination,
}

/// Drawing surface capability. Concrete renderers (terminal grid, SVG,
/// recording test double) implement these four operations; the scene
/// builder and navigation machine never touch a surface directly.
pub trait MapRenderer {
    fn clear(&mut self);
    fn draw_star(&mut self, point: MapPoint, name: &str);
    fn draw_body(&mut self, point: MapPoint, name: &str, radius: f64, kind: BodyKind);
    fn draw_ship(&mut self, point: MapPoint);
}

/// Everything the scene builder needs for one frame.
pub struct SceneInput<'a> {
    pub catalog: &'a Catalog,
    pub waypoints: &'a [CustomWaypoint],
    /// The system the user is viewing; the destination side in two-system
    /// layouts.
    pub view_system: &'a StarSystem,
    pub current: Option<&'a Location>,
    pub selected: Option<&'a Location>,
    /// Interpolated ship position while a trip animates; overrides the
    /// resting position derived from the current location.
    pub ship_override: Option<MapPoint>,
    pub layout: MapLayout,
}

fn find_waypoint<'a>(waypoints: &'a [CustomWaypoint], id: &str) -> Option<&'a CustomWaypoint> {
    waypoints.iter().find(|w| w.id == id)
}

/// Render radius for a catalog planet in the full view.
pub fn planet_render_radius(radius_earth: f64) -> f64 {
    (radius_earth * 5.0).clamp(6.0, 16.0)
}

/// Render radius for the destination marker.
pub fn destination_render_radius(radius_earth: f64) -> f64 {
    (radius_earth * 5.0).max(8.0)
}

/// A location's owning system, resolved against live data. None when the
/// reference dangles.
fn owning_system<'a>(
    location: &Location,
    catalog: &'a Catalog,
    waypoints: &[CustomWaypoint],
) -> Option<&'a StarSystem> {
    match location {
        Location::Planet { system, .. } => catalog.system(system),
        Location::Waypoint { waypoint } => {
            let wp = find_waypoint(waypoints, waypoint)?;
            catalog.system(&wp.system)
        }
    }
}

fn is_live_waypoint(location: Option<&Location>, waypoints: &[CustomWaypoint]) -> bool {
    match location {
        Some(Location::Waypoint { waypoint }) => find_waypoint(waypoints, waypoint).is_some(),
        _ => false,
    }
}

pub fn render_map(input: &SceneInput, renderer: &mut dyn MapRenderer) {
    renderer.clear();

    let minimal = is_live_waypoint(input.current, input.waypoints)
        || is_live_waypoint(input.selected, input.waypoints);

    let origin_system = input
        .current
        .and_then(|loc| owning_system(loc, input.catalog, input.waypoints));
    let dest_system = input
        .selected
        .and_then(|loc| owning_system(loc, input.catalog, input.waypoints))
        .unwrap_or(input.view_system);

    let two_system = minimal
        && origin_system.map_or(false, |origin| origin.id != dest_system.id);

    if minimal {
        render_minimal(input, renderer, origin_system, dest_system, two_system);
    } else {
        render_full(input, renderer, dest_system);
    }
}

fn render_minimal(
    input: &SceneInput,
    renderer: &mut dyn MapRenderer,
    origin_system: Option<&StarSystem>,
    dest_system: &StarSystem,
    two_system: bool,
) {
    let (origin_slot, dest_slot) = if two_system {
        (SystemSlot::Left, SystemSlot::Right)
    } else {
        (SystemSlot::Only, SystemSlot::Only)
    };

    if two_system {
        if let Some(origin) = origin_system {
            renderer.draw_star(input.layout.star_anchor(origin_slot), &origin.name);
        }
    }
    renderer.draw_star(input.layout.star_anchor(dest_slot), &dest_system.name);

    // Origin: project the current location in its own system, defaulting to
    // the origin-side anchor when nothing resolves.
    let mut ship = input.layout.star_anchor(origin_slot);
    if let Some(location) = input.current {
        let system = origin_system.unwrap_or(dest_system);
        let projected = match location {
            Location::Planet { planet, .. } => {
                project_planet(system, planet, &input.layout, origin_slot)
            }
            Location::Waypoint { waypoint } => find_waypoint(input.waypoints, waypoint)
                .map(|wp| project_waypoint(system, wp, &input.layout, origin_slot)),
        };
        if let Some(point) = projected {
            ship = point;
        }
    }

    if let Some(selected) = input.selected {
        match selected {
            Location::Planet { planet, .. } => {
                if let Some(point) = project_planet(dest_system, planet, &input.layout, dest_slot) {
                    if let Some(body) = dest_system.planet(planet) {
                        renderer.draw_body(
                            point,
                            &body.name,
                            destination_render_radius(body.radius_earth),
                            BodyKind::Destination,
                        );
                    }
                }
            }
            Location::Waypoint { waypoint } => {
                if let Some(wp) = find_waypoint(input.waypoints, waypoint) {
                    let point = project_waypoint(dest_system, wp, &input.layout, dest_slot);
                    renderer.draw_body(
                        point,
                        &wp.name,
                        destination_render_radius(wp.radius_earth),
                        BodyKind::Destination,
                    );
                }
            }
        }
    }

    renderer.draw_ship(input.ship_override.unwrap_or(ship));
}

fn render_full(input: &SceneInput, renderer: &mut dyn MapRenderer, system: &StarSystem) {
    renderer.draw_star(input.layout.star_anchor(SystemSlot::Only), &system.name);

    let selected_planet = match input.selected {
        Some(Location::Planet {
            system: sel_system,
            planet,
        }) if sel_system == &system.id => Some(planet.as_str()),
        _ => None,
    };

    for planet in &system.planets {
        if let Some(point) = project_planet(system, &planet.id, &input.layout, SystemSlot::Only) {
            let kind = if selected_planet == Some(planet.id.as_str()) {
                BodyKind::Destination
            } else {
                BodyKind::Planet
            };
            renderer.draw_body(
                point,
                &planet.name,
                planet_render_radius(planet.radius_earth),
                kind,
            );
        }
    }

    let mut ship = input.layout.star_anchor(SystemSlot::Only);
    if let Some(Location::Planet {
        system: loc_system,
        planet,
    }) = input.current
    {
        if loc_system == &system.id {
            if let Some(point) = project_planet(system, planet, &input.layout, SystemSlot::Only) {
                ship = point;
            }
        }
    }
    renderer.draw_ship(input.ship_override.unwrap_or(ship));
}

#[cfg(test)]
pub mod test_utils {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    pub enum Drawn {
        Clear,
        Star(String),
        Body { name: String, kind: BodyKind },
        Ship(MapPoint),
    }

    /// Records draw calls for assertions.
    #[derive(Default)]
    pub struct RecordingRenderer {
        pub calls: Vec<Drawn>,
    }

    impl MapRenderer for RecordingRenderer {
        fn clear(&mut self) {
            self.calls.push(Drawn::Clear);
        }

        fn draw_star(&mut self, _point: MapPoint, name: &str) {
            self.calls.push(Drawn::Star(name.to_string()));
        }

        fn draw_body(&mut self, _point: MapPoint, name: &str, _radius: f64, kind: BodyKind) {
            self.calls.push(Drawn::Body {
                name: name.to_string(),
                kind,
            });
        }

        fn draw_ship(&mut self, point: MapPoint) {
            self.calls.push(Drawn::Ship(point));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::test_utils::{Drawn, RecordingRenderer};
    use super::*;
    use crate::models::catalog::Catalog;

    fn catalog() -> Catalog {
        Catalog::from_json(
            r#"{
              "systems": [
                {
                  "id": "sol", "name": "Sol", "star": {"name": "The Sun"},
                  "planets": [
                    {"id": "mercury", "name": "Mercury", "type": "Rocky",
                     "orbitalAU": 0.39, "radiusEarth": 0.38},
                    {"id": "earth", "name": "Earth", "type": "Terrestrial",
                     "orbitalAU": 1.0, "radiusEarth": 1.0}
                  ]
                },
                {
                  "id": "centauri", "name": "Alpha Centauri", "star": {"name": "Rigil Kentaurus"},
                  "planets": [
                    {"id": "proxima-b", "name": "Proxima b", "type": "Rocky",
                     "orbitalAU": 0.05, "radiusEarth": 1.1}
                  ]
                }
              ]
            }"#,
        )
        .unwrap()
    }

    fn outpost() -> CustomWaypoint {
        CustomWaypoint::new("custom-1".into(), "Outpost".into(), "centauri".into(), 0.65)
    }

    #[test]
    fn full_mode_draws_every_planet_and_marks_the_destination() {
        let catalog = catalog();
        let selected = Location::planet("sol", "mercury");
        let mut renderer = RecordingRenderer::default();
        render_map(
            &SceneInput {
                catalog: &catalog,
                waypoints: &[],
                view_system: catalog.system("sol").unwrap(),
                current: None,
                selected: Some(&selected),
                ship_override: None,
                layout: MapLayout::default(),
            },
            &mut renderer,
        );

        assert_eq!(renderer.calls[0], Drawn::Clear);
        assert!(renderer.calls.contains(&Drawn::Star("Sol".into())));
        assert!(renderer.calls.contains(&Drawn::Body {
            name: "Mercury".into(),
            kind: BodyKind::Destination
        }));
        assert!(renderer.calls.contains(&Drawn::Body {
            name: "Earth".into(),
            kind: BodyKind::Planet
        }));
    }

    #[test]
    fn waypoint_selection_switches_to_minimal_mode() {
        let catalog = catalog();
        let waypoints = [outpost()];
        let current = Location::planet("sol", "earth");
        let selected = Location::waypoint("custom-1");
        let mut renderer = RecordingRenderer::default();
        render_map(
            &SceneInput {
                catalog: &catalog,
                waypoints: &waypoints,
                view_system: catalog.system("centauri").unwrap(),
                current: Some(&current),
                selected: Some(&selected),
                ship_override: None,
                layout: MapLayout::default(),
            },
            &mut renderer,
        );

        // origin and destination systems differ, so both stars render and
        // no catalog planet list is drawn
        assert!(renderer.calls.contains(&Drawn::Star("Sol".into())));
        assert!(renderer.calls.contains(&Drawn::Star("Alpha Centauri".into())));
        assert!(renderer.calls.contains(&Drawn::Body {
            name: "Outpost".into(),
            kind: BodyKind::Destination
        }));
        assert!(!renderer
            .calls
            .iter()
            .any(|c| matches!(c, Drawn::Body { name, .. } if name == "Proxima b")));
    }

    #[test]
    fn dangling_waypoint_selection_falls_back_to_full_mode() {
        let catalog = catalog();
        let selected = Location::waypoint("custom-gone");
        let mut renderer = RecordingRenderer::default();
        render_map(
            &SceneInput {
                catalog: &catalog,
                waypoints: &[],
                view_system: catalog.system("sol").unwrap(),
                current: None,
                selected: Some(&selected),
                ship_override: None,
                layout: MapLayout::default(),
            },
            &mut renderer,
        );
        // not a live waypoint: the scene renders the viewed system in full
        assert!(renderer.calls.contains(&Drawn::Body {
            name: "Mercury".into(),
            kind: BodyKind::Planet
        }));
    }

    #[test]
    fn ship_rests_at_the_current_location_in_full_mode() {
        let catalog = catalog();
        let system = catalog.system("sol").unwrap();
        let current = Location::planet("sol", "earth");
        let expected = project_planet(system, "earth", &MapLayout::default(), SystemSlot::Only)
            .unwrap();
        let mut renderer = RecordingRenderer::default();
        render_map(
            &SceneInput {
                catalog: &catalog,
                waypoints: &[],
                view_system: system,
                current: Some(&current),
                selected: None,
                ship_override: None,
                layout: MapLayout::default(),
            },
            &mut renderer,
        );
        assert!(renderer.calls.contains(&Drawn::Ship(expected)));
    }

    #[test]
    fn ship_override_wins_while_animating() {
        let catalog = catalog();
        let over = MapPoint::new(321.0, 150.0);
        let mut renderer = RecordingRenderer::default();
        render_map(
            &SceneInput {
                catalog: &catalog,
                waypoints: &[],
                view_system: catalog.system("sol").unwrap(),
                current: None,
                selected: None,
                ship_override: Some(over),
                layout: MapLayout::default(),
            },
            &mut renderer,
        );
        assert!(renderer.calls.contains(&Drawn::Ship(over)));
    }
}
