//! Coordinate projector
//!
//! Pure, deterministic mapping from a body (catalog planet or custom
//! waypoint) to a point on the logical canvas. The same inputs always yield
//! the same point; there is no randomness and no dependence on render state.

use crate::models::catalog::StarSystem;
use crate::models::constants::{
    JITTER_STEP, MAP_HEIGHT, MAP_WIDTH, MARGIN_LEFT, MARGIN_RIGHT, ORBIT_TRACK_OFFSET,
    ORBIT_TRACK_TAIL, SECOND_STAR_INSET, TWO_SYSTEM_SPAN_REDUCTION,
};
use crate::models::position::MapPoint;
use crate::models::waypoint::CustomWaypoint;

/// Layout parameters for one projection pass. Constructed once per render
/// or travel; identical layouts guarantee identical projections.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MapLayout {
    pub width: f64,
    pub height: f64,
    pub margin_left: f64,
    pub margin_right: f64,
}

impl Default for MapLayout {
    fn default() -> Self {
        MapLayout {
            width: MAP_WIDTH,
            height: MAP_HEIGHT,
            margin_left: MARGIN_LEFT,
            margin_right: MARGIN_RIGHT,
        }
    }
}

/// Which side of the canvas a system occupies. `Only` when a single system
/// fills the canvas; `Left`/`Right` when origin and destination systems
/// share it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SystemSlot {
    Only,
    Left,
    Right,
}

impl MapLayout {
    /// The star anchor point for a system in the given slot. Left and single
    /// systems anchor at the left margin; the second of two systems anchors
    /// near the right margin.
    pub fn star_anchor(&self, slot: SystemSlot) -> MapPoint {
        let x = match slot {
            SystemSlot::Only | SystemSlot::Left => self.margin_left,
            SystemSlot::Right => self.width - self.margin_right - SECOND_STAR_INSET,
        };
        MapPoint::new(x, self.height / 2.0)
    }

    fn orbit_span(&self, slot: SystemSlot) -> f64 {
        let span = self.width - self.margin_left - self.margin_right;
        match slot {
            SystemSlot::Only => span,
            SystemSlot::Left | SystemSlot::Right => span - TWO_SYSTEM_SPAN_REDUCTION,
        }
    }
}

/// Shared placement math. `ordinal` drives the vertical jitter; the
/// effective max is guarded so an all-zero or empty system cannot divide
/// by zero.
fn body_point(
    layout: &MapLayout,
    slot: SystemSlot,
    orbital_au: f64,
    effective_max: f64,
    ordinal: usize,
) -> MapPoint {
    let anchor = layout.star_anchor(slot);
    let track = layout.orbit_span(slot) - ORBIT_TRACK_TAIL;
    let max = if effective_max > 0.0 { effective_max } else { 1.0 };
    let jitter = ((ordinal % 3) as f64 - 1.0) * JITTER_STEP;
    MapPoint::new(
        anchor.x + ORBIT_TRACK_OFFSET + (orbital_au / max) * track,
        anchor.y + jitter,
    )
}

/// Project a catalog planet within its system. Returns None when the planet
/// id is not present in the system; callers treat that as "cannot render /
/// cannot travel", never as a failure to unwind.
pub fn project_planet(
    system: &StarSystem,
    planet_id: &str,
    layout: &MapLayout,
    slot: SystemSlot,
) -> Option<MapPoint> {
    let ordinal = system.planet_ordinal(planet_id)?;
    let planet = &system.planets[ordinal];
    Some(body_point(
        layout,
        slot,
        planet.orbital_au,
        system.max_orbital_au(),
        ordinal,
    ))
}

/// Project a custom waypoint against its owning system. Waypoints sit on the
/// same track as catalog planets but widen the scale when they lie beyond
/// the farthest planet, and take the jitter ordinal just past the catalog
/// list (as if appended last).
pub fn project_waypoint(
    system: &StarSystem,
    waypoint: &CustomWaypoint,
    layout: &MapLayout,
    slot: SystemSlot,
) -> MapPoint {
    let effective_max = system.max_orbital_au().max(waypoint.orbital_au);
    body_point(
        layout,
        slot,
        waypoint.orbital_au,
        effective_max,
        system.planets.len(),
    )
}
