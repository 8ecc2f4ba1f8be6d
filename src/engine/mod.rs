//! Navigation engine
//!
//! Top-level coordinator: owns the catalog, the persistence store, the
//! custom-waypoint list, travel history, and the navigation state machine,
//! and wires them together. All mutation goes through engine operations;
//! collaborators read state through accessors.

use chrono::Utc;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, info, warn};

use crate::io::store::KeyValueStore;
use crate::models::catalog::{Catalog, StarSystem};
use crate::models::constants::{
    KEY_HISTORY, KEY_LOCATION, KEY_WAYPOINTS, WAYPOINT_ORBIT_MARGIN_AU,
};
use crate::models::errors::{NavError, NavResult};
use crate::models::location::{decode_stored_location, Location};
use crate::models::position::MapPoint;
use crate::models::travel::TravelMode;
use crate::models::waypoint::CustomWaypoint;
use crate::services::history::TravelHistory;
use crate::services::navigation::{NavEvent, Navigator, TravelPlan};
use crate::services::parser::{parse_destination, DestinationMatch};
use crate::services::projector::{project_planet, project_waypoint, MapLayout, SystemSlot};
use crate::services::scene::{render_map, MapRenderer, SceneInput};

/// Pre-selection requested on the command line, the flag analog of the
/// web client's deep-link query parameters. Unknown ids are ignored.
#[derive(Debug, Default, Clone)]
pub struct DeepLink {
    pub system: Option<String>,
    pub planet: Option<String>,
    pub custom: Option<String>,
}

/// What the UI should open after startup or a free-text go.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewState {
    SystemView { system: String },
    PlanetDetail { system: String, planet: String },
    WaypointDetail { waypoint: String },
}

/// Result of a free-text go operation.
#[derive(Debug, Clone, PartialEq)]
pub enum GoOutcome {
    /// The text matched a catalog planet; it is selected and a trip started.
    TravelStarted { destination: Location },
    /// Only a system matched; the UI opens it without travelling.
    SystemOpened { system: String },
    /// Nothing matched; a waypoint was created (or updated), selected, and
    /// a trip started.
    WaypointCreated { waypoint: CustomWaypoint },
}

pub struct NavEngine {
    catalog: Catalog,
    store: Box<dyn KeyValueStore>,
    waypoints: Vec<CustomWaypoint>,
    history: TravelHistory,
    navigator: Navigator,
    layout: MapLayout,
    rng: StdRng,
}

impl NavEngine {
    /// Build an engine over a loaded catalog and an opened store, restoring
    /// waypoints, history, and the last committed location. Unreadable
    /// stored records degrade to empty defaults.
    pub fn new(catalog: Catalog, store: Box<dyn KeyValueStore>, seed: u64) -> Self {
        let waypoints: Vec<CustomWaypoint> = store
            .get(KEY_WAYPOINTS)
            .and_then(|json| match serde_json::from_str(&json) {
                Ok(list) => Some(list),
                Err(err) => {
                    warn!("stored waypoint list is unreadable, ignoring: {}", err);
                    None
                }
            })
            .unwrap_or_default();

        let history: TravelHistory = store
            .get(KEY_HISTORY)
            .and_then(|json| match serde_json::from_str(&json) {
                Ok(history) => Some(history),
                Err(err) => {
                    warn!("stored travel history is unreadable, ignoring: {}", err);
                    None
                }
            })
            .unwrap_or_default();

        let mut navigator = Navigator::new();
        navigator.restore_location(
            store
                .get(KEY_LOCATION)
                .and_then(|json| decode_stored_location(&json, &waypoints)),
        );

        NavEngine {
            catalog,
            store,
            waypoints,
            history,
            navigator,
            layout: MapLayout::default(),
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn navigator(&self) -> &Navigator {
        &self.navigator
    }

    pub fn waypoints(&self) -> &[CustomWaypoint] {
        &self.waypoints
    }

    pub fn history(&self) -> &TravelHistory {
        &self.history
    }

    pub fn store(&self) -> &dyn KeyValueStore {
        self.store.as_ref()
    }

    pub fn waypoint(&self, id: &str) -> Option<&CustomWaypoint> {
        self.waypoints.iter().find(|w| w.id == id)
    }

    // --- selection ---

    pub fn select_planet(&mut self, system_id: &str, planet_id: &str) -> NavResult<()> {
        let system = self
            .catalog
            .system(system_id)
            .ok_or_else(|| NavError::UnknownSystem(system_id.to_string()))?;
        if system.planet(planet_id).is_none() {
            return Err(NavError::UnknownBody {
                system: system_id.to_string(),
                body: planet_id.to_string(),
            });
        }
        self.navigator
            .select(Location::planet(system_id, planet_id));
        Ok(())
    }

    pub fn select_waypoint(&mut self, waypoint_id: &str) -> NavResult<()> {
        if !self.waypoints.iter().any(|w| w.id == waypoint_id) {
            return Err(NavError::UnknownWaypoint(waypoint_id.to_string()));
        }
        self.navigator.select(Location::waypoint(waypoint_id));
        Ok(())
    }

    pub fn clear_selection(&mut self) {
        self.navigator.clear_selection();
    }

    // --- waypoints ---

    /// Create a waypoint in a system, placed just beyond its farthest
    /// catalog planet. A waypoint with the same (case-insensitive) name in
    /// the same system is replaced in place, keeping its id.
    pub fn create_waypoint(&mut self, name: &str, system_id: &str) -> NavResult<CustomWaypoint> {
        let name = name.trim();
        if name.is_empty() {
            return Err(NavError::InvalidInput("waypoint name is empty".to_string()));
        }
        let system = self
            .catalog
            .system(system_id)
            .ok_or_else(|| NavError::UnknownSystem(system_id.to_string()))?;

        let max_au = system.max_orbital_au();
        let base = if max_au > 0.0 { max_au } else { 1.0 };
        let orbital_au = base + WAYPOINT_ORBIT_MARGIN_AU;
        let system_id = system.id.clone();

        let existing = self.waypoints.iter().position(|w| {
            w.system == system_id && w.name.eq_ignore_ascii_case(name)
        });
        let id = match existing {
            Some(index) => self.waypoints[index].id.clone(),
            None => self.generate_waypoint_id(),
        };
        let waypoint = CustomWaypoint::new(id, name.to_string(), system_id, orbital_au);

        match existing {
            Some(index) => self.waypoints[index] = waypoint.clone(),
            None => self.waypoints.push(waypoint.clone()),
        }
        self.persist_waypoints();
        debug!("waypoint {} saved in {}", waypoint.id, waypoint.system);
        Ok(waypoint)
    }

    /// Remove a waypoint. A selection pointing at it is cleared; the
    /// persisted current location is left alone and will degrade to
    /// "unknown location" at resolution time.
    pub fn delete_waypoint(&mut self, waypoint_id: &str) -> bool {
        let before = self.waypoints.len();
        self.waypoints.retain(|w| w.id != waypoint_id);
        if self.waypoints.len() == before {
            return false;
        }
        if self.navigator.selected() == Some(&Location::waypoint(waypoint_id)) {
            self.navigator.clear_selection();
        }
        self.persist_waypoints();
        true
    }

    fn generate_waypoint_id(&mut self) -> String {
        loop {
            let id = format!("custom-{:08x}", self.rng.gen::<u32>());
            let taken = self.waypoints.iter().any(|w| w.id == id)
                || self
                    .catalog
                    .systems
                    .iter()
                    .any(|s| s.planets.iter().any(|p| p.id == id));
            if !taken {
                return id;
            }
        }
    }

    // --- travel ---

    /// Start a trip to the selected destination. Route resolution happens
    /// now; a failed resolution still enters Preparing and aborts at the
    /// transit boundary with nothing committed.
    pub fn begin_travel(&mut self, mode: TravelMode) -> NavResult<()> {
        if self.navigator.travel_active() {
            return Err(NavError::TravelInProgress);
        }
        let destination = self
            .navigator
            .selected()
            .cloned()
            .ok_or(NavError::NoDestinationSelected)?;
        let route = self.resolve_route(&destination, mode);
        if route.is_none() {
            debug!("route to {:?} did not resolve", destination);
        }
        self.navigator.begin_travel(mode, route)
    }

    /// Advance the active trip by an elapsed wall-clock delta, persisting
    /// any commit it produces. Events are returned for the UI.
    pub fn tick(&mut self, dt_ms: f64) -> Vec<NavEvent> {
        let events = self.navigator.tick(dt_ms);
        for event in &events {
            match event {
                NavEvent::Arrived { location } => self.commit_arrival(location.clone()),
                NavEvent::EnginesEngaged { flash } => {
                    debug!(flash = *flash, "engines engaged");
                }
                NavEvent::TravelFailed => info!("travel aborted: route did not resolve"),
                NavEvent::ReturnedToIdle => {}
            }
        }
        events
    }

    pub fn cancel_travel(&mut self) -> bool {
        let cancelled = self.navigator.cancel_travel();
        if cancelled {
            info!("travel cancelled, nothing committed");
        }
        cancelled
    }

    fn commit_arrival(&mut self, location: Location) {
        match serde_json::to_string(&location) {
            Ok(json) => self.store.set(KEY_LOCATION, &json),
            Err(err) => warn!("could not serialize location: {}", err),
        }
        self.history.record(location.clone(), Utc::now());
        self.persist_history();
        info!("arrived: {:?}", location);
    }

    /// Resolve origin and destination to canvas points and build the trip
    /// geometry. None when either end fails to resolve.
    fn resolve_route(&self, destination: &Location, mode: TravelMode) -> Option<TravelPlan> {
        let dest_system = self.owning_system(destination)?;
        let origin = self.navigator.current_location();
        let origin_system = origin.and_then(|loc| self.owning_system(loc));

        let minimal = origin.map_or(false, |loc| self.is_live_waypoint(loc))
            || self.is_live_waypoint(destination);
        let two_system =
            minimal && origin_system.map_or(false, |sys| sys.id != dest_system.id);
        let (origin_slot, dest_slot) = if two_system {
            (SystemSlot::Left, SystemSlot::Right)
        } else {
            (SystemSlot::Only, SystemSlot::Only)
        };

        let dest_point = self.project_location(destination, dest_system, dest_slot)?;
        let origin_point = match origin {
            // Never travelled: the ship waits at the origin-side anchor.
            None => self.layout.star_anchor(origin_slot),
            Some(location) => {
                let origin_system = origin_system?;
                if two_system || origin_system.id == dest_system.id {
                    self.project_location(location, origin_system, origin_slot)?
                } else {
                    // Catalog-to-catalog trip across systems shares no
                    // canvas; the ship departs from the anchor.
                    self.layout.star_anchor(origin_slot)
                }
            }
        };

        Some(TravelPlan::new(origin_point, dest_point, mode.duration_ms()))
    }

    fn project_location(
        &self,
        location: &Location,
        system: &StarSystem,
        slot: SystemSlot,
    ) -> Option<MapPoint> {
        match location {
            Location::Planet { planet, .. } => {
                project_planet(system, planet, &self.layout, slot)
            }
            Location::Waypoint { waypoint } => self
                .waypoint(waypoint)
                .map(|wp| project_waypoint(system, wp, &self.layout, slot)),
        }
    }

    fn owning_system(&self, location: &Location) -> Option<&StarSystem> {
        match location {
            Location::Planet { system, .. } => self.catalog.system(system),
            Location::Waypoint { waypoint } => {
                let wp = self.waypoint(waypoint)?;
                self.catalog.system(&wp.system)
            }
        }
    }

    fn is_live_waypoint(&self, location: &Location) -> bool {
        matches!(location, Location::Waypoint { waypoint } if self.waypoint(waypoint).is_some())
    }

    // --- free-text go ---

    /// The free-text go operation: travel to a full match, open a
    /// system-only match, or turn unmatched text into a waypoint in the
    /// viewed system and travel there.
    pub fn go_to_text(
        &mut self,
        text: &str,
        mode: TravelMode,
        view_system: Option<&str>,
    ) -> NavResult<GoOutcome> {
        let raw = text.trim();
        if raw.is_empty() {
            return Err(NavError::InvalidInput("type a destination".to_string()));
        }
        if self.navigator.travel_active() {
            return Err(NavError::TravelInProgress);
        }

        match parse_destination(&self.catalog, raw) {
            DestinationMatch::Full { system, planet } => {
                self.select_planet(&system, &planet)?;
                self.begin_travel(mode)?;
                Ok(GoOutcome::TravelStarted {
                    destination: Location::planet(system, planet),
                })
            }
            DestinationMatch::SystemOnly { system } => {
                if matches!(self.navigator.selected(), Some(loc) if loc.is_waypoint()) {
                    self.navigator.clear_selection();
                }
                Ok(GoOutcome::SystemOpened { system })
            }
            DestinationMatch::NoMatch => {
                let system_id = view_system
                    .and_then(|id| self.catalog.system(id))
                    .or_else(|| self.catalog.systems.first())
                    .map(|s| s.id.clone())
                    .ok_or_else(|| {
                        NavError::InvalidInput("no system available".to_string())
                    })?;
                let waypoint = self.create_waypoint(raw, &system_id)?;
                self.select_waypoint(&waypoint.id)?;
                self.begin_travel(mode)?;
                Ok(GoOutcome::WaypointCreated { waypoint })
            }
        }
    }

    // --- startup ---

    /// Decide the startup view: a valid deep link first, then the last
    /// committed location, then the first catalog system. Unknown ids in
    /// the link are ignored rather than failing. Restoring a location also
    /// re-selects it, so the restored destination is ready to travel.
    pub fn startup_view(&mut self, link: &DeepLink) -> Option<ViewState> {
        if let Some(system_id) = &link.system {
            if let Some(system) = self.catalog.system(system_id) {
                let system_id = system.id.clone();
                if let Some(custom_id) = &link.custom {
                    if self.waypoints.iter().any(|w| &w.id == custom_id) {
                        self.navigator.select(Location::waypoint(custom_id.clone()));
                        return Some(ViewState::WaypointDetail {
                            waypoint: custom_id.clone(),
                        });
                    }
                } else if let Some(planet_id) = &link.planet {
                    if self
                        .catalog
                        .system(&system_id)
                        .and_then(|s| s.planet(planet_id))
                        .is_some()
                    {
                        self.navigator
                            .select(Location::planet(system_id.clone(), planet_id.clone()));
                        return Some(ViewState::PlanetDetail {
                            system: system_id,
                            planet: planet_id.clone(),
                        });
                    }
                }
                return Some(ViewState::SystemView { system: system_id });
            }
        }

        if let Some(location) = self.navigator.current_location().cloned() {
            match &location {
                Location::Waypoint { waypoint } => {
                    if self.waypoints.iter().any(|w| &w.id == waypoint) {
                        self.navigator.select(location.clone());
                        return Some(ViewState::WaypointDetail {
                            waypoint: waypoint.clone(),
                        });
                    }
                }
                Location::Planet { system, planet } => {
                    if self
                        .catalog
                        .system(system)
                        .and_then(|s| s.planet(planet))
                        .is_some()
                    {
                        self.navigator.select(location.clone());
                        return Some(ViewState::PlanetDetail {
                            system: system.clone(),
                            planet: planet.clone(),
                        });
                    }
                }
            }
        }

        self.catalog
            .systems
            .first()
            .map(|s| ViewState::SystemView { system: s.id.clone() })
    }

    // --- rendering ---

    /// Draw the map for a viewed system through the renderer capability.
    pub fn render_view(
        &self,
        view_system_id: &str,
        renderer: &mut dyn MapRenderer,
    ) -> NavResult<()> {
        let system = self
            .catalog
            .system(view_system_id)
            .ok_or_else(|| NavError::UnknownSystem(view_system_id.to_string()))?;
        let ship_override = if self.navigator.travel_active() {
            self.navigator.ship_position()
        } else {
            None
        };
        render_map(
            &SceneInput {
                catalog: &self.catalog,
                waypoints: &self.waypoints,
                view_system: system,
                current: self.navigator.current_location(),
                selected: self.navigator.selected(),
                ship_override,
                layout: self.layout,
            },
            renderer,
        );
        Ok(())
    }

    fn persist_waypoints(&mut self) {
        match serde_json::to_string(&self.waypoints) {
            Ok(json) => self.store.set(KEY_WAYPOINTS, &json),
            Err(err) => warn!("could not serialize waypoints: {}", err),
        }
    }

    fn persist_history(&mut self) {
        match serde_json::to_string(&self.history) {
            Ok(json) => self.store.set(KEY_HISTORY, &json),
            Err(err) => warn!("could not serialize history: {}", err),
        }
    }
}
