use crate::models::constants::{
    APPROACH_FRACTION, APPROACH_MAX, APPROACH_MIN, INTER_LEG_PAUSE_MS, LEG1_FRACTION,
    LEG1_MIN_MS, LEG1_PROGRESS_SHARE, LEG2_FRACTION, LEG2_MIN_MS,
};
use crate::models::position::MapPoint;

/// Cubic ease-in-out over normalized progress.
pub fn ease_in_out_cubic(t: f64) -> f64 {
    if t < 0.5 {
        4.0 * t * t * t
    } else {
        1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
    }
}

/// The fixed geometry and timing of one trip, computed once when the
/// engines engage. The ship travels two contiguous legs: origin to an
/// approach point short of the destination, then approach point to the
/// destination exactly, with a brief pause in between.
#[derive(Debug, Clone, PartialEq)]
pub struct TravelPlan {
    pub origin: MapPoint,
    pub approach: MapPoint,
    pub destination: MapPoint,
    pub leg1_ms: f64,
    pub leg2_ms: f64,
}

/// Interpolated state at one instant of a trip.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TravelSample {
    pub position: MapPoint,
    pub progress: f64,
}

impl TravelPlan {
    pub fn new(origin: MapPoint, destination: MapPoint, total_duration_ms: f64) -> Self {
        let dist = origin.distance_to(destination);
        // Zero-distance trips keep a unit divisor so the approach point
        // degenerates to the destination instead of NaN.
        let dist = if dist == 0.0 { 1.0 } else { dist };
        let back = (dist * APPROACH_FRACTION).clamp(APPROACH_MIN, APPROACH_MAX);
        let ux = (destination.x - origin.x) / dist;
        let uy = (destination.y - origin.y) / dist;
        let approach = MapPoint::new(destination.x - ux * back, destination.y - uy * back);

        TravelPlan {
            origin,
            approach,
            destination,
            leg1_ms: (total_duration_ms * LEG1_FRACTION).max(LEG1_MIN_MS),
            leg2_ms: (total_duration_ms * LEG2_FRACTION).max(LEG2_MIN_MS),
        }
    }

    /// Wall-clock length of the whole trip, pause included.
    pub fn total_ms(&self) -> f64 {
        self.leg1_ms + INTER_LEG_PAUSE_MS + self.leg2_ms
    }

    /// Sample position and reported progress at `elapsed_ms` since engage.
    ///
    /// Progress blends the legs unevenly: the approach leg spans [0, 0.85)
    /// of reported progress regardless of its wall-clock share, the pause
    /// pins exactly 0.85, and the arrival leg covers the rest, landing on
    /// exactly 1.0 at the destination.
    pub fn sample(&self, elapsed_ms: f64) -> TravelSample {
        if elapsed_ms < 0.0 {
            return TravelSample {
                position: self.origin,
                progress: 0.0,
            };
        }
        if elapsed_ms < self.leg1_ms {
            let eased = ease_in_out_cubic(elapsed_ms / self.leg1_ms);
            return TravelSample {
                position: self.origin.lerp(self.approach, eased),
                progress: eased * LEG1_PROGRESS_SHARE,
            };
        }
        if elapsed_ms < self.leg1_ms + INTER_LEG_PAUSE_MS {
            return TravelSample {
                position: self.approach,
                progress: LEG1_PROGRESS_SHARE,
            };
        }
        let into_leg2 = elapsed_ms - self.leg1_ms - INTER_LEG_PAUSE_MS;
        if into_leg2 < self.leg2_ms {
            let eased = ease_in_out_cubic(into_leg2 / self.leg2_ms);
            return TravelSample {
                position: self.approach.lerp(self.destination, eased),
                progress: LEG1_PROGRESS_SHARE + eased * (1.0 - LEG1_PROGRESS_SHARE),
            };
        }
        TravelSample {
            position: self.destination,
            progress: 1.0,
        }
    }
}
