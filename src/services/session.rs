//! Interactive console session
//!
//! Thin command loop over the engine. Travel animation is driven here: the
//! loop sleeps a frame at a time and feeds measured wall-clock deltas to
//! the engine, so actual tick rate never changes trip timing.

use std::thread;
use std::time::{Duration, Instant};

use crate::engine::{GoOutcome, NavEngine, ViewState};
use crate::io::{InputReader, OutputWriter, TerminalIO};
use crate::models::errors::NavResult;
use crate::models::travel::TravelMode;
use crate::services::navigation::{NavEvent, TravelPhase};
use crate::services::parser::{parse_destination, DestinationMatch};
use crate::services::projector::MapLayout;
use crate::ui::map_view::AsciiMapRenderer;
use crate::ui::presenters::{
    HistoryPresenter, LocationPresenter, StatusPresenter, WaypointPresenter,
};

const FRAME_INTERVAL: Duration = Duration::from_millis(16);

pub struct Session {
    engine: NavEngine,
    view_system: Option<String>,
    io: TerminalIO,
    output: TerminalIO,
}

impl Session {
    pub fn new(engine: NavEngine, view: Option<ViewState>) -> Self {
        let view_system = match &view {
            Some(ViewState::SystemView { system }) => Some(system.clone()),
            Some(ViewState::PlanetDetail { system, .. }) => Some(system.clone()),
            Some(ViewState::WaypointDetail { waypoint }) => {
                engine.waypoint(waypoint).map(|w| w.system.clone())
            }
            None => None,
        };
        Session {
            engine,
            view_system,
            io: TerminalIO,
            output: TerminalIO,
        }
    }

    pub fn run(&mut self) -> NavResult<()> {
        LocationPresenter::show_badge(
            self.engine.navigator().current_location(),
            self.engine.catalog(),
            self.engine.waypoints(),
            &mut self.output,
        );
        StatusPresenter::show(self.engine.navigator(), &mut self.output);
        self.show_map();

        loop {
            let input = self.io.read_line("COMMAND")?;
            let input = input.trim().to_string();

            let result = match input.as_str() {
                "1" => self.list_systems(),
                "2" => self.open_system(),
                "3" => self.select_destination(),
                "4" => self.travel(),
                "5" => self.go(),
                "6" => self.waypoints(),
                "7" => {
                    HistoryPresenter::show(
                        self.engine.history(),
                        self.engine.catalog(),
                        self.engine.waypoints(),
                        &mut self.output,
                    );
                    Ok(())
                }
                "8" => {
                    self.show_map();
                    Ok(())
                }
                "9" => {
                    LocationPresenter::show_badge(
                        self.engine.navigator().current_location(),
                        self.engine.catalog(),
                        self.engine.waypoints(),
                        &mut self.output,
                    );
                    StatusPresenter::show(self.engine.navigator(), &mut self.output);
                    Ok(())
                }
                "q" | "Q" => {
                    self.output.writeln("Safe travels, captain.");
                    break;
                }
                _ => {
                    Self::print_command_menu(&mut self.output);
                    Ok(())
                }
            };

            if let Err(e) = result {
                self.output.writeln(&format!("Error: {}", e));
            }
        }
        Ok(())
    }

    fn print_command_menu(output: &mut dyn OutputWriter) {
        output.writeln("COMMANDS");
        output.writeln("   1 = LIST SYSTEMS");
        output.writeln("   2 = OPEN SYSTEM");
        output.writeln("   3 = SELECT DESTINATION");
        output.writeln("   4 = TRAVEL TO SELECTION");
        output.writeln("   5 = GO (free text, makes a waypoint if nothing matches)");
        output.writeln("   6 = CUSTOM WAYPOINTS");
        output.writeln("   7 = TRAVEL HISTORY");
        output.writeln("   8 = MAP");
        output.writeln("   9 = STATUS");
        output.writeln("   q = QUIT");
    }

    fn list_systems(&mut self) -> NavResult<()> {
        for system in &self.engine.catalog().systems {
            self.output.writeln(&format!(
                "{:<12} {:<18} {} planets  (star: {})",
                system.id,
                system.name,
                system.planets.len(),
                system.star.name
            ));
        }
        Ok(())
    }

    fn open_system(&mut self) -> NavResult<()> {
        let input = self.io.read_line("SYSTEM (id or name)")?;
        let Some(system) = self.engine.catalog().find_system(input.trim()) else {
            self.output.writeln("No such system");
            return Ok(());
        };
        let system_id = system.id.clone();
        let lines: Vec<String> = system
            .planets
            .iter()
            .map(|p| {
                format!(
                    "{:<14} {:<12} {:>6.2} AU   {}",
                    p.name, p.kind, p.orbital_au, p.summary
                )
            })
            .collect();
        self.output.writeln(&format!("--- {} ---", system.name));
        for line in lines {
            self.output.writeln(&line);
        }
        self.view_system = Some(system_id);
        self.show_map();
        Ok(())
    }

    /// Select without travelling, the console stand-in for clicking a
    /// planet on the map.
    fn select_destination(&mut self) -> NavResult<()> {
        let input = self.io.read_line("DESTINATION")?;
        match parse_destination(self.engine.catalog(), input.trim()) {
            DestinationMatch::Full { system, planet } => {
                self.engine.select_planet(&system, &planet)?;
                let name = self
                    .engine
                    .catalog()
                    .system(&system)
                    .and_then(|s| s.planet(&planet))
                    .map(|p| p.name.clone())
                    .unwrap_or_else(|| planet.clone());
                self.view_system = Some(system);
                self.output.writeln(&format!("Destination set: {}", name));
            }
            DestinationMatch::SystemOnly { system } => {
                self.view_system = Some(system.clone());
                self.output.writeln(&format!("Opened system {}", system));
            }
            DestinationMatch::NoMatch => {
                self.output
                    .writeln("No match in the catalog. Use GO to create a waypoint.");
            }
        }
        Ok(())
    }

    fn read_mode(&mut self) -> NavResult<Option<TravelMode>> {
        let input = self.io.read_line("MODE (regular/warp/hyper)")?;
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Ok(Some(TravelMode::Regular));
        }
        match TravelMode::parse(trimmed) {
            Ok(mode) => Ok(Some(mode)),
            Err(msg) => {
                self.output.writeln(msg);
                Ok(None)
            }
        }
    }

    fn travel(&mut self) -> NavResult<()> {
        let Some(mode) = self.read_mode()? else {
            return Ok(());
        };
        match self.engine.begin_travel(mode) {
            Ok(()) => {
                self.output.writeln("Preparing engines...");
                self.drive_travel();
            }
            Err(e) => self.output.writeln(&format!("{}", e)),
        }
        Ok(())
    }

    fn go(&mut self) -> NavResult<()> {
        let input = self.io.read_line("DESTINATION")?;
        let Some(mode) = self.read_mode()? else {
            return Ok(());
        };
        let view = self.view_system.clone();
        match self.engine.go_to_text(input.trim(), mode, view.as_deref()) {
            Ok(GoOutcome::TravelStarted { .. }) => {
                self.output.writeln("Preparing engines...");
                self.drive_travel();
            }
            Ok(GoOutcome::SystemOpened { system }) => {
                self.output.writeln(&format!("Opened system {}", system));
                self.view_system = Some(system);
            }
            Ok(GoOutcome::WaypointCreated { waypoint }) => {
                self.output.writeln(&format!(
                    "Waypoint {} saved in {}",
                    waypoint.name, waypoint.system
                ));
                self.view_system = Some(waypoint.system.clone());
                self.output.writeln("Preparing engines...");
                self.drive_travel();
            }
            Err(e) => self.output.writeln(&format!("{}", e)),
        }
        Ok(())
    }

    fn waypoints(&mut self) -> NavResult<()> {
        WaypointPresenter::show_list(self.engine.waypoints(), &mut self.output);
        if self.engine.waypoints().is_empty() {
            return Ok(());
        }
        let input = self.io.read_line("DELETE ID (blank to keep all)")?;
        let id = input.trim();
        if !id.is_empty() {
            if self.engine.delete_waypoint(id) {
                self.output.writeln("Waypoint deleted");
            } else {
                self.output.writeln("No waypoint with that id");
            }
        }
        Ok(())
    }

    fn show_map(&mut self) {
        let Some(system_id) = self
            .view_system
            .clone()
            .or_else(|| self.engine.catalog().systems.first().map(|s| s.id.clone()))
        else {
            self.output.writeln("No system to display");
            return;
        };
        let mut renderer = AsciiMapRenderer::new(MapLayout::default());
        match self.engine.render_view(&system_id, &mut renderer) {
            Ok(()) => renderer.present(&mut self.output),
            Err(e) => self.output.writeln(&format!("{}", e)),
        }
    }

    /// Pump the engine with wall-clock deltas until the trip resolves.
    fn drive_travel(&mut self) {
        let mut last = Instant::now();
        let mut last_bucket: i32 = -1;
        loop {
            thread::sleep(FRAME_INTERVAL);
            let now = Instant::now();
            let dt_ms = now.duration_since(last).as_secs_f64() * 1000.0;
            last = now;

            let events = self.engine.tick(dt_ms);
            let mut finished = false;
            for event in &events {
                match event {
                    NavEvent::EnginesEngaged { flash } => {
                        if *flash {
                            self.output.writeln("*** HYPERSPACE FLASH ***");
                        }
                    }
                    NavEvent::TravelFailed => {
                        self.output.writeln("Unable to navigate to target");
                        finished = true;
                    }
                    NavEvent::Arrived { location } => {
                        let text = LocationPresenter::describe(
                            Some(location),
                            self.engine.catalog(),
                            self.engine.waypoints(),
                        );
                        self.output.writeln(&format!("Arrived at {}", text));
                        self.show_map();
                    }
                    NavEvent::ReturnedToIdle => finished = true,
                }
            }

            if self.engine.navigator().phase() == TravelPhase::InTransit {
                if let Some(progress) = self.engine.navigator().progress() {
                    let bucket = (progress * 10.0).floor() as i32;
                    if bucket > last_bucket {
                        last_bucket = bucket;
                        self.output.writeln(&format!(
                            "In transit... {}%",
                            (progress * 100.0).round() as i32
                        ));
                    }
                }
            }

            if finished {
                break;
            }
        }
    }
}
