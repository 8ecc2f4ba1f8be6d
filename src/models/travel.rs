//! Travel mode selection

use std::fmt;

/// How hard the engines are pushed for a trip. Selects the total animation
/// duration and the visual treatment; `Hyper` additionally requests a
/// full-screen flash cue when the engines engage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TravelMode {
    Regular,
    Warp,
    Hyper,
}

/// Visual emphasis applied to the ship while a mode is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VisualIntensity {
    Normal,
    Strong,
}

impl TravelMode {
    /// Parse a mode name as entered by the user.
    ///
    /// # Returns
    /// Ok(TravelMode) if recognized, Err with message if not
    pub fn parse(value: &str) -> Result<Self, &'static str> {
        match value.trim().to_ascii_lowercase().as_str() {
            "regular" => Ok(TravelMode::Regular),
            "warp" => Ok(TravelMode::Warp),
            "hyper" => Ok(TravelMode::Hyper),
            _ => Err("Travel mode must be regular, warp, or hyper"),
        }
    }

    /// Requested total trip duration. The two legs derive from this value
    /// but each has its own floor, so short modes still animate.
    pub fn duration_ms(&self) -> f64 {
        match self {
            TravelMode::Regular => 1200.0,
            TravelMode::Warp => 700.0,
            TravelMode::Hyper => 260.0,
        }
    }

    pub fn intensity(&self) -> VisualIntensity {
        match self {
            TravelMode::Regular => VisualIntensity::Normal,
            TravelMode::Warp | TravelMode::Hyper => VisualIntensity::Strong,
        }
    }

    /// Whether engaging this mode should fire a full-screen flash cue.
    pub fn flash_cue(&self) -> bool {
        matches!(self, TravelMode::Hyper)
    }

    pub fn label(&self) -> &'static str {
        match self {
            TravelMode::Regular => "regular",
            TravelMode::Warp => "warp",
            TravelMode::Hyper => "hyper",
        }
    }
}

impl fmt::Display for TravelMode {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}
