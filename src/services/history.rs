//! Travel history
//!
//! A capped log of past arrivals. One entry per distinct location: arriving
//! somewhere already logged moves it to the front with a fresh timestamp.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::constants::HISTORY_CAP;
use crate::models::location::Location;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub location: Location,
    pub recorded_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TravelHistory {
    entries: Vec<HistoryEntry>,
}

impl TravelHistory {
    pub fn new() -> Self {
        TravelHistory::default()
    }

    /// Newest first.
    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Append an arrival. Drops any older entry for the same location and
    /// trims to the cap.
    pub fn record(&mut self, location: Location, recorded_at: DateTime<Utc>) {
        self.entries.retain(|e| e.location != location);
        self.entries.insert(
            0,
            HistoryEntry {
                location,
                recorded_at,
            },
        );
        self.entries.truncate(HISTORY_CAP);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(minute: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 8, 6, 12, minute, 0).unwrap()
    }

    #[test]
    fn newest_entries_come_first() {
        let mut history = TravelHistory::new();
        history.record(Location::planet("sol", "earth"), at(0));
        history.record(Location::planet("sol", "mercury"), at(1));
        assert_eq!(history.entries()[0].location, Location::planet("sol", "mercury"));
        assert_eq!(history.entries()[1].location, Location::planet("sol", "earth"));
    }

    #[test]
    fn revisits_keep_only_the_most_recent_entry() {
        let mut history = TravelHistory::new();
        history.record(Location::planet("sol", "earth"), at(0));
        history.record(Location::planet("sol", "mercury"), at(1));
        history.record(Location::planet("sol", "earth"), at(2));

        assert_eq!(history.entries().len(), 2);
        assert_eq!(history.entries()[0].location, Location::planet("sol", "earth"));
        assert_eq!(history.entries()[0].recorded_at, at(2));
    }

    #[test]
    fn history_is_capped() {
        let mut history = TravelHistory::new();
        for i in 0..15 {
            history.record(Location::planet("sol", format!("p{}", i)), at(i));
        }
        assert_eq!(history.entries().len(), HISTORY_CAP);
        // the oldest entries fell off
        assert_eq!(history.entries()[0].location, Location::planet("sol", "p14"));
        assert!(history
            .entries()
            .iter()
            .all(|e| e.location != Location::planet("sol", "p0")));
    }

    #[test]
    fn waypoint_and_planet_entries_are_distinct() {
        let mut history = TravelHistory::new();
        history.record(Location::waypoint("custom-1"), at(0));
        history.record(Location::planet("sol", "custom-1"), at(1));
        assert_eq!(history.entries().len(), 2);
    }

    #[test]
    fn round_trips_through_json() {
        let mut history = TravelHistory::new();
        history.record(Location::planet("sol", "earth"), at(3));
        let json = serde_json::to_string(&history).unwrap();
        let back: TravelHistory = serde_json::from_str(&json).unwrap();
        assert_eq!(back.entries(), history.entries());
    }
}
