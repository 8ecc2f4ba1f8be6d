//! Star Map Navigation Engine
//!
//! A headless reimplementation of a star-map navigation app: browse a
//! static catalog of systems and planets, select a destination (catalog
//! planet or user-created waypoint), and run an animated two-leg travel
//! that commits the new location to persistent storage on arrival.
//!
//! # Overview
//!
//! The core is deliberately UI-free. The state machine advances only
//! through tick calls carrying elapsed wall-clock time, the renderer is a
//! four-operation capability trait, and persistence is a key-value surface,
//! so the whole travel pipeline runs headlessly under test. The console
//! binary is a thin shell over the same API.
//!
//! # Modules
//!
//! - [`engine`] - Top-level coordinator owning catalog, store, and machine
//! - [`models`] - Domain models (Catalog, Location, CustomWaypoint, etc.)
//! - [`services`] - Projector, parser, navigation machine, history, scene
//! - [`io`] - Input/output and persistence abstractions for testing
//! - [`ui`] - Presenters and the terminal map renderer
//!
//! # Example
//!
//! ```rust,no_run
//! use starnav::io::catalog::builtin_catalog;
//! use starnav::io::store::MemoryStore;
//! use starnav::{NavEngine, TravelMode};
//!
//! let catalog = builtin_catalog().expect("embedded catalog");
//! let mut engine = NavEngine::new(catalog, Box::new(MemoryStore::new()), 42);
//! engine.select_planet("sol", "mercury").expect("known planet");
//! engine.begin_travel(TravelMode::Warp).expect("trip starts");
//! // host loop: engine.tick(elapsed_ms) until ReturnedToIdle
//! ```

pub mod cli;
pub mod engine;
pub mod io;
pub mod models;
pub mod services;
pub mod ui;

// Re-export commonly used types
pub use engine::{DeepLink, GoOutcome, NavEngine, ViewState};
pub use models::errors::{NavError, NavResult};
pub use models::location::Location;
pub use models::travel::TravelMode;
pub use services::navigation::{NavEvent, Navigator, TravelPhase};
