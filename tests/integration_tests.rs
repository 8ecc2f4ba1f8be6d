use starnav::io::store::{JsonFileStore, KeyValueStore, MemoryStore};
use starnav::models::catalog::Catalog;
use starnav::models::constants::{KEY_LOCATION, KEY_WAYPOINTS};
use starnav::services::projector::{project_planet, MapLayout, SystemSlot};
use starnav::{DeepLink, GoOutcome, Location, NavEngine, NavEvent, TravelMode, TravelPhase, ViewState};

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

fn engine_with_memory_store() -> NavEngine {
    NavEngine::new(catalog(), Box::new(MemoryStore::new()), 42)
}

/// Drive a trip to completion with small frame-sized ticks, recording every
/// phase the machine passes through.
fn drive_to_idle(engine: &mut NavEngine) -> Vec<TravelPhase> {
    let mut phases = vec![engine.navigator().phase()];
    for _ in 0..100_000 {
        let events = engine.tick(16.0);
        let phase = engine.navigator().phase();
        if phases.last() != Some(&phase) {
            phases.push(phase);
        }
        if events.iter().any(|e| {
            matches!(e, NavEvent::ReturnedToIdle) || matches!(e, NavEvent::TravelFailed)
        }) {
            break;
        }
    }
    phases
}

#[test]
fn earth_to_mercury_regular_runs_the_full_state_sequence() {
    let mut engine = engine_with_memory_store();

    // start from a committed location at Earth
    engine.select_planet("sol", "earth").unwrap();
    engine.begin_travel(TravelMode::Regular).unwrap();
    drive_to_idle(&mut engine);

    engine.select_planet("sol", "mercury").unwrap();
    engine.begin_travel(TravelMode::Regular).unwrap();
    let phases = drive_to_idle(&mut engine);

    assert_eq!(
        phases,
        vec![
            TravelPhase::Preparing,
            TravelPhase::InTransit,
            TravelPhase::Arrived,
            TravelPhase::Idle,
        ]
    );

    // persisted current location matches the selection identity
    let stored = engine.store().get(KEY_LOCATION).unwrap();
    let stored: Location = serde_json::from_str(&stored).unwrap();
    assert_eq!(stored, Location::planet("sol", "mercury"));

    // final ship coordinate equals Mercury's projected point exactly
    let system = engine.catalog().system("sol").unwrap();
    let expected =
        project_planet(system, "mercury", &MapLayout::default(), SystemSlot::Only).unwrap();
    assert_eq!(engine.navigator().ship_position(), Some(expected));
    assert_eq!(engine.navigator().selected(), None);
}

#[test]
fn waypoint_creation_in_sol_lands_beyond_every_catalog_planet() {
    let mut engine = engine_with_memory_store();
    let wp = engine.create_waypoint("Outpost", "sol").unwrap();

    assert_eq!(wp.system, "sol");
    assert!(wp.orbital_au > 1.0, "must clear max(0.39, 1.0)");
    let unique = engine
        .catalog()
        .systems
        .iter()
        .flat_map(|s| &s.planets)
        .all(|p| p.id != wp.id);
    assert!(unique, "waypoint id must not collide with catalog ids");
}

#[test]
fn sol_slash_mars_opens_the_system_without_travelling() {
    let mut engine = engine_with_memory_store();
    let outcome = engine
        .go_to_text("Sol/Mars", TravelMode::Regular, None)
        .unwrap();
    assert_eq!(outcome, GoOutcome::SystemOpened { system: "sol".into() });
    assert_eq!(engine.navigator().phase(), TravelPhase::Idle);
    assert!(engine.store().get(KEY_LOCATION).is_none());
}

#[test]
fn unknown_destination_aborts_to_idle_without_touching_the_store() {
    let mut engine = engine_with_memory_store();
    engine.select_planet("sol", "earth").unwrap();
    engine.begin_travel(TravelMode::Regular).unwrap();
    drive_to_idle(&mut engine);
    let stored_before = engine.store().get(KEY_LOCATION).unwrap();

    // waypoint vanishes between selection and travel; deleting it clears
    // the selection, so the trip is refused before it can even prepare
    let wp = engine.create_waypoint("Ghost", "sol").unwrap();
    engine.select_waypoint(&wp.id).unwrap();
    engine.delete_waypoint(&wp.id);
    assert!(engine.begin_travel(TravelMode::Warp).is_err());

    assert_eq!(engine.store().get(KEY_LOCATION).unwrap(), stored_before);
    assert_eq!(engine.navigator().phase(), TravelPhase::Idle);
    assert_eq!(
        engine.navigator().current_location(),
        Some(&Location::planet("sol", "earth"))
    );
}

#[test]
fn cancellation_never_commits_and_parks_the_ship_at_the_origin() {
    let mut engine = engine_with_memory_store();
    engine.select_planet("sol", "earth").unwrap();
    engine.begin_travel(TravelMode::Regular).unwrap();
    drive_to_idle(&mut engine);
    let stored_before = engine.store().get(KEY_LOCATION).unwrap();

    engine.select_planet("sol", "mercury").unwrap();
    engine.begin_travel(TravelMode::Regular).unwrap();
    // into transit, mid-flight
    engine.tick(240.0);
    engine.tick(300.0);
    assert_eq!(engine.navigator().phase(), TravelPhase::InTransit);
    assert!(engine.cancel_travel());

    assert_eq!(engine.navigator().phase(), TravelPhase::Idle);
    assert_eq!(engine.store().get(KEY_LOCATION).unwrap(), stored_before);
    // the ship rests at the trip origin: Earth's projected point
    let system = engine.catalog().system("sol").unwrap();
    let expected =
        project_planet(system, "earth", &MapLayout::default(), SystemSlot::Only).unwrap();
    assert_eq!(engine.navigator().ship_position(), Some(expected));
}

#[test]
fn locations_and_waypoints_survive_a_restart() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("store.json");

    {
        let store = JsonFileStore::open(&path);
        let mut engine = NavEngine::new(catalog(), Box::new(store), 7);
        engine.create_waypoint("Outpost", "centauri").unwrap();
        engine.select_planet("sol", "mercury").unwrap();
        engine.begin_travel(TravelMode::Hyper).unwrap();
        drive_to_idle(&mut engine);
        assert_eq!(engine.history().entries().len(), 1);
    }

    let store = JsonFileStore::open(&path);
    let mut engine = NavEngine::new(catalog(), Box::new(store), 8);
    assert_eq!(
        engine.navigator().current_location(),
        Some(&Location::planet("sol", "mercury"))
    );
    assert_eq!(engine.waypoints().len(), 1);
    assert_eq!(engine.waypoints()[0].name, "Outpost");
    assert_eq!(engine.history().entries().len(), 1);

    // restart restores the last location as the startup view
    let view = engine.startup_view(&DeepLink::default());
    assert_eq!(
        view,
        Some(ViewState::PlanetDetail {
            system: "sol".into(),
            planet: "mercury".into()
        })
    );
}

#[test]
fn records_written_by_the_web_client_are_readable() {
    let mut store = MemoryStore::new();
    store.set(
        KEY_WAYPOINTS,
        r#"[{"id":"custom-1714670000000","name":"Outpost","system":"centauri",
             "orbitalAU":0.65,"radiusEarth":1.2,"massEarth":1.0,
             "type":"Waypoint","summary":"Temporary destination saved as custom location"}]"#,
    );
    store.set(
        KEY_LOCATION,
        r#"{"system":"centauri","planet":"custom-1714670000000"}"#,
    );

    let mut engine = NavEngine::new(catalog(), Box::new(store), 1);
    assert_eq!(
        engine.navigator().current_location(),
        Some(&Location::waypoint("custom-1714670000000"))
    );

    // and a trip away from the restored waypoint works
    engine.select_planet("sol", "earth").unwrap();
    engine.begin_travel(TravelMode::Warp).unwrap();
    let phases = drive_to_idle(&mut engine);
    assert!(phases.contains(&TravelPhase::Arrived));
    assert_eq!(
        engine.navigator().current_location(),
        Some(&Location::planet("sol", "earth"))
    );
}

#[test]
fn same_seed_generates_identical_waypoint_ids() {
    let mut a = NavEngine::new(catalog(), Box::new(MemoryStore::new()), 100);
    let mut b = NavEngine::new(catalog(), Box::new(MemoryStore::new()), 100);
    let wa = a.create_waypoint("Outpost", "sol").unwrap();
    let wb = b.create_waypoint("Outpost", "sol").unwrap();
    assert_eq!(wa.id, wb.id);

    let mut c = NavEngine::new(catalog(), Box::new(MemoryStore::new()), 101);
    let wc = c.create_waypoint("Outpost", "sol").unwrap();
    assert_ne!(wc.id, wa.id);
}

#[test]
fn free_text_waypoint_trip_commits_a_tagged_waypoint_location() {
    let mut engine = engine_with_memory_store();
    let outcome = engine
        .go_to_text("Outpost Nine", TravelMode::Regular, Some("sol"))
        .unwrap();
    let GoOutcome::WaypointCreated { waypoint } = outcome else {
        panic!("expected a waypoint outcome");
    };
    drive_to_idle(&mut engine);

    let stored = engine.store().get(KEY_LOCATION).unwrap();
    let stored: Location = serde_json::from_str(&stored).unwrap();
    assert_eq!(stored, Location::waypoint(waypoint.id));
}

#[test]
fn deep_link_preselects_a_known_planet() {
    let mut engine = engine_with_memory_store();
    let view = engine.startup_view(&DeepLink {
        system: Some("centauri".into()),
        planet: Some("proxima-b".into()),
        custom: None,
    });
    assert_eq!(
        view,
        Some(ViewState::PlanetDetail {
            system: "centauri".into(),
            planet: "proxima-b".into()
        })
    );
    assert_eq!(
        engine.navigator().selected(),
        Some(&Location::planet("centauri", "proxima-b"))
    );
}
