/// Logical map canvas, in render units. All projection math targets this
/// fixed canvas; concrete renderers scale it to their own surface.
pub const MAP_WIDTH: f64 = 1000.0;
pub const MAP_HEIGHT: f64 = 320.0;
pub const MARGIN_LEFT: f64 = 120.0;
pub const MARGIN_RIGHT: f64 = 80.0;

/// Inset of the right-hand star anchor from the right margin when two
/// systems share the canvas.
pub const SECOND_STAR_INSET: f64 = 140.0;
/// Gap between a star anchor and the innermost orbit position.
pub const ORBIT_TRACK_OFFSET: f64 = 60.0;
/// Canvas units removed from the orbit span when two systems share the canvas.
pub const TWO_SYSTEM_SPAN_REDUCTION: f64 = 200.0;
/// The usable orbit track is the span minus this tail reserve.
pub const ORBIT_TRACK_TAIL: f64 = 120.0;
/// Vertical de-overlap step. A body's offset is ((ordinal mod 3) - 1) * step.
pub const JITTER_STEP: f64 = 14.0;

pub const PREPARE_DELAY_MS: f64 = 240.0;
pub const INTER_LEG_PAUSE_MS: f64 = 90.0;
pub const ARRIVED_DISPLAY_MS: f64 = 900.0;

/// Approach-leg geometry: the intermediate point sits this fraction of the
/// total distance short of the destination, clamped to [min, max] units.
pub const APPROACH_FRACTION: f64 = 0.28;
pub const APPROACH_MIN: f64 = 40.0;
pub const APPROACH_MAX: f64 = 140.0;

pub const LEG1_FRACTION: f64 = 0.7;
pub const LEG1_MIN_MS: f64 = 200.0;
pub const LEG2_FRACTION: f64 = 0.3;
pub const LEG2_MIN_MS: f64 = 120.0;
/// Share of overall reported progress consumed by the approach leg.
pub const LEG1_PROGRESS_SHARE: f64 = 0.85;

pub const HISTORY_CAP: usize = 10;

/// A new waypoint is placed this far beyond the system's farthest planet.
pub const WAYPOINT_ORBIT_MARGIN_AU: f64 = 0.6;
pub const WAYPOINT_DEFAULT_RADIUS: f64 = 1.2;
pub const WAYPOINT_DEFAULT_MASS: f64 = 1.0;
pub const WAYPOINT_DEFAULT_KIND: &str = "Waypoint";
pub const WAYPOINT_DEFAULT_SUMMARY: &str = "Temporary destination saved as custom location";

/// Storage keys. Same keys as the web client's local storage so records
/// written there remain readable.
pub const KEY_LOCATION: &str = "nav:loc:v1";
pub const KEY_WAYPOINTS: &str = "nav:customs_v1";
pub const KEY_HISTORY: &str = "nav:history:v1";
