//! Navigation state machine
//!
//! Owns the current location, the selected destination, and the travel
//! transition. The machine is advanced only by [`Navigator::tick`] with
//! wall-clock deltas supplied by the host loop; it performs no I/O and
//! reports commits as events for the owner to persist.

mod plan;

pub use plan::{ease_in_out_cubic, TravelPlan, TravelSample};

use crate::models::constants::{ARRIVED_DISPLAY_MS, PREPARE_DELAY_MS};
use crate::models::errors::{NavError, NavResult};
use crate::models::location::Location;
use crate::models::position::MapPoint;
use crate::models::travel::TravelMode;

/// Public view of the machine's phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TravelPhase {
    Idle,
    Preparing,
    InTransit,
    Arrived,
}

/// Emitted by [`Navigator::tick`] as transitions happen, in order.
#[derive(Debug, Clone, PartialEq)]
pub enum NavEvent {
    /// Preparing finished and the trip engaged. `flash` requests the
    /// full-screen cue for hyper-mode trips.
    EnginesEngaged { flash: bool },
    /// Preparing finished but origin or destination coordinates could not
    /// be resolved; the machine is back at Idle with nothing committed.
    TravelFailed,
    /// The arrival leg completed and the new location was committed.
    Arrived { location: Location },
    /// The post-arrival display delay elapsed.
    ReturnedToIdle,
}

#[derive(Debug, Clone)]
enum Phase {
    Idle,
    Preparing {
        mode: TravelMode,
        destination: Location,
        route: Option<TravelPlan>,
        elapsed_ms: f64,
    },
    InTransit {
        destination: Location,
        plan: TravelPlan,
        elapsed_ms: f64,
    },
    Arrived {
        elapsed_ms: f64,
    },
}

pub struct Navigator {
    current_location: Option<Location>,
    selected: Option<Location>,
    phase: Phase,
    ship_position: Option<MapPoint>,
}

impl Default for Navigator {
    fn default() -> Self {
        Self::new()
    }
}

impl Navigator {
    pub fn new() -> Self {
        Navigator {
            current_location: None,
            selected: None,
            phase: Phase::Idle,
            ship_position: None,
        }
    }

    pub fn current_location(&self) -> Option<&Location> {
        self.current_location.as_ref()
    }

    /// Restore a persisted location at startup. Not valid mid-travel.
    pub fn restore_location(&mut self, location: Option<Location>) {
        if !self.travel_active() {
            self.current_location = location;
        }
    }

    pub fn selected(&self) -> Option<&Location> {
        self.selected.as_ref()
    }

    /// Set the destination slot. There is exactly one slot: selecting a
    /// planet drops any waypoint selection and vice versa.
    pub fn select(&mut self, destination: Location) {
        self.selected = Some(destination);
    }

    pub fn clear_selection(&mut self) {
        self.selected = None;
    }

    pub fn phase(&self) -> TravelPhase {
        match self.phase {
            Phase::Idle => TravelPhase::Idle,
            Phase::Preparing { .. } => TravelPhase::Preparing,
            Phase::InTransit { .. } => TravelPhase::InTransit,
            Phase::Arrived { .. } => TravelPhase::Arrived,
        }
    }

    /// True while a trip holds the ship (Preparing or InTransit). The
    /// Arrived display delay does not block a new trip.
    pub fn travel_active(&self) -> bool {
        matches!(self.phase, Phase::Preparing { .. } | Phase::InTransit { .. })
    }

    /// Reported progress fraction of the active trip, if any.
    pub fn progress(&self) -> Option<f64> {
        match &self.phase {
            Phase::Idle => None,
            Phase::Preparing { .. } => Some(0.0),
            Phase::InTransit { plan, elapsed_ms, .. } => Some(plan.sample(*elapsed_ms).progress),
            Phase::Arrived { .. } => Some(1.0),
        }
    }

    /// The ship's interpolated position while a trip is animating, and its
    /// resting point afterwards. None before the first trip of a session;
    /// renderers then place the ship from the current location instead.
    pub fn ship_position(&self) -> Option<MapPoint> {
        self.ship_position
    }

    /// Start a trip toward the current selection.
    ///
    /// `route` carries the resolved trip geometry, or None when origin or
    /// destination coordinates failed to resolve; resolution failure is
    /// reported only at the Preparing/InTransit boundary, matching the
    /// fixed preparation delay the user sees.
    ///
    /// # Errors
    ///
    /// * `NoDestinationSelected` if the selection slot is empty
    /// * `TravelInProgress` if a trip is already preparing or in transit;
    ///   overlapping requests are rejected, never queued
    pub fn begin_travel(&mut self, mode: TravelMode, route: Option<TravelPlan>) -> NavResult<()> {
        if self.travel_active() {
            return Err(NavError::TravelInProgress);
        }
        let destination = self
            .selected
            .clone()
            .ok_or(NavError::NoDestinationSelected)?;
        self.phase = Phase::Preparing {
            mode,
            destination,
            route,
            elapsed_ms: 0.0,
        };
        Ok(())
    }

    /// Abort the active trip without committing. The ship snaps back to the
    /// trip origin, so it never rests mid-flight. Returns false when no
    /// trip was active.
    pub fn cancel_travel(&mut self) -> bool {
        match std::mem::replace(&mut self.phase, Phase::Idle) {
            Phase::Preparing { .. } => true,
            Phase::InTransit { plan, .. } => {
                self.ship_position = Some(plan.origin);
                true
            }
            other => {
                self.phase = other;
                false
            }
        }
    }

    /// Advance the machine by an elapsed wall-clock delta. A single large
    /// delta cascades through as many transitions as it covers, emitting
    /// their events in order.
    pub fn tick(&mut self, dt_ms: f64) -> Vec<NavEvent> {
        let mut events = Vec::new();
        let mut remaining = dt_ms.max(0.0);

        loop {
            match std::mem::replace(&mut self.phase, Phase::Idle) {
                Phase::Idle => break,
                Phase::Preparing {
                    mode,
                    destination,
                    route,
                    mut elapsed_ms,
                } => {
                    let needed = PREPARE_DELAY_MS - elapsed_ms;
                    if remaining < needed {
                        elapsed_ms += remaining;
                        self.phase = Phase::Preparing {
                            mode,
                            destination,
                            route,
                            elapsed_ms,
                        };
                        break;
                    }
                    remaining -= needed;
                    match route {
                        Some(plan) => {
                            self.ship_position = Some(plan.origin);
                            events.push(NavEvent::EnginesEngaged {
                                flash: mode.flash_cue(),
                            });
                            self.phase = Phase::InTransit {
                                destination,
                                plan,
                                elapsed_ms: 0.0,
                            };
                        }
                        None => {
                            events.push(NavEvent::TravelFailed);
                        }
                    }
                }
                Phase::InTransit {
                    destination,
                    plan,
                    mut elapsed_ms,
                } => {
                    let needed = plan.total_ms() - elapsed_ms;
                    if remaining < needed {
                        elapsed_ms += remaining;
                        self.ship_position = Some(plan.sample(elapsed_ms).position);
                        self.phase = Phase::InTransit {
                            destination,
                            plan,
                            elapsed_ms,
                        };
                        break;
                    }
                    remaining -= needed;
                    // Commit: the trip cannot fail past this point.
                    self.ship_position = Some(plan.destination);
                    self.current_location = Some(destination.clone());
                    self.selected = None;
                    events.push(NavEvent::Arrived {
                        location: destination,
                    });
                    self.phase = Phase::Arrived { elapsed_ms: 0.0 };
                }
                Phase::Arrived { mut elapsed_ms } => {
                    let needed = ARRIVED_DISPLAY_MS - elapsed_ms;
                    if remaining < needed {
                        elapsed_ms += remaining;
                        self.phase = Phase::Arrived { elapsed_ms };
                        break;
                    }
                    remaining -= needed;
                    events.push(NavEvent::ReturnedToIdle);
                }
            }
        }
        events
    }
}
