use chrono::{DateTime, Utc};

use crate::io::OutputWriter;
use crate::models::catalog::Catalog;
use crate::models::location::Location;
use crate::models::waypoint::CustomWaypoint;
use crate::services::history::TravelHistory;
use crate::services::navigation::{Navigator, TravelPhase};

pub struct StatusPresenter;

impl StatusPresenter {
    /// One-line travel status for the status strip.
    pub fn status_line(navigator: &Navigator) -> String {
        match navigator.phase() {
            TravelPhase::Idle => "Idle".to_string(),
            TravelPhase::Preparing => "Preparing engines...".to_string(),
            TravelPhase::InTransit => {
                let progress = navigator.progress().unwrap_or(0.0);
                format!("In transit... {}%", (progress * 100.0).round() as i32)
            }
            TravelPhase::Arrived => "Arrived".to_string(),
        }
    }

    pub fn show(navigator: &Navigator, output: &mut dyn OutputWriter) {
        output.writeln(&format!("Status: {}", Self::status_line(navigator)));
    }
}

pub struct LocationPresenter;

impl LocationPresenter {
    /// Human-readable form of a location, resolving ids to display names.
    /// Dangling references render as "unknown location" rather than failing.
    pub fn describe(
        location: Option<&Location>,
        catalog: &Catalog,
        waypoints: &[CustomWaypoint],
    ) -> String {
        let Some(location) = location else {
            return "-".to_string();
        };
        match location {
            Location::Planet { system, planet } => {
                match catalog.system(system).and_then(|s| s.planet(planet)) {
                    Some(body) => {
                        // system resolves whenever the planet does
                        let system_name = catalog
                            .system(system)
                            .map(|s| s.name.as_str())
                            .unwrap_or(system);
                        format!("{} / {}", system_name, body.name)
                    }
                    None => "unknown location".to_string(),
                }
            }
            Location::Waypoint { waypoint } => {
                match waypoints.iter().find(|w| &w.id == waypoint) {
                    Some(wp) => {
                        let system_name = catalog
                            .system(&wp.system)
                            .map(|s| s.name.as_str())
                            .unwrap_or(wp.system.as_str());
                        format!("{} (waypoint in {})", wp.name, system_name)
                    }
                    None => "unknown location".to_string(),
                }
            }
        }
    }

    pub fn show_badge(
        location: Option<&Location>,
        catalog: &Catalog,
        waypoints: &[CustomWaypoint],
        output: &mut dyn OutputWriter,
    ) {
        output.writeln(&format!(
            "Location: {}",
            Self::describe(location, catalog, waypoints)
        ));
    }
}

pub struct WaypointPresenter;

impl WaypointPresenter {
    pub fn show_list(waypoints: &[CustomWaypoint], output: &mut dyn OutputWriter) {
        if waypoints.is_empty() {
            output.writeln("No custom waypoints yet - create one with the GO command.");
            return;
        }
        for wp in waypoints {
            output.writeln(&format!(
                "{:<20} {} * {:.2} AU   [{}]",
                wp.name, wp.system, wp.orbital_au, wp.id
            ));
        }
    }
}

pub struct HistoryPresenter;

impl HistoryPresenter {
    fn timestamp(at: &DateTime<Utc>) -> String {
        at.format("%Y-%m-%d %H:%M UTC").to_string()
    }

    pub fn show(
        history: &TravelHistory,
        catalog: &Catalog,
        waypoints: &[CustomWaypoint],
        output: &mut dyn OutputWriter,
    ) {
        if history.is_empty() {
            output.writeln("No travels recorded yet.");
            return;
        }
        for (index, entry) in history.entries().iter().enumerate() {
            output.writeln(&format!(
                "{:>2}. {}  ({})",
                index + 1,
                LocationPresenter::describe(Some(&entry.location), catalog, waypoints),
                Self::timestamp(&entry.recorded_at),
            ));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::test_utils::MockOutput;
    use crate::models::catalog::Catalog;
    use chrono::TimeZone;

    fn catalog() -> Catalog {
        Catalog::from_json(
            r#"{"systems":[{"id":"sol","name":"Sol","star":{"name":"The Sun"},
                "planets":[{"id":"earth","name":"Earth","type":"Terrestrial",
                            "orbitalAU":1.0,"radiusEarth":1.0}]}]}"#,
        )
        .unwrap()
    }

    #[test]
    fn idle_navigator_reports_idle() {
        let nav = Navigator::new();
        assert_eq!(StatusPresenter::status_line(&nav), "Idle");
    }

    #[test]
    fn planet_location_resolves_to_names() {
        let loc = Location::planet("sol", "earth");
        let text = LocationPresenter::describe(Some(&loc), &catalog(), &[]);
        assert_eq!(text, "Sol / Earth");
    }

    #[test]
    fn dangling_references_render_as_unknown() {
        let loc = Location::planet("sol", "vulcan");
        assert_eq!(
            LocationPresenter::describe(Some(&loc), &catalog(), &[]),
            "unknown location"
        );
        let loc = Location::waypoint("custom-gone");
        assert_eq!(
            LocationPresenter::describe(Some(&loc), &catalog(), &[]),
            "unknown location"
        );
    }

    #[test]
    fn waypoint_location_names_its_system() {
        let wp = CustomWaypoint::new("custom-1".into(), "Outpost".into(), "sol".into(), 1.6);
        let loc = Location::waypoint("custom-1");
        let text = LocationPresenter::describe(Some(&loc), &catalog(), &[wp]);
        assert_eq!(text, "Outpost (waypoint in Sol)");
    }

    #[test]
    fn history_lists_newest_first_with_timestamps() {
        let mut history = TravelHistory::new();
        history.record(
            Location::planet("sol", "earth"),
            Utc.with_ymd_and_hms(2026, 8, 6, 12, 0, 0).unwrap(),
        );
        let mut output = MockOutput::new();
        HistoryPresenter::show(&history, &catalog(), &[], &mut output);
        assert!(output.contains("Sol / Earth"));
        assert!(output.contains("2026-08-06 12:00 UTC"));
    }
}
