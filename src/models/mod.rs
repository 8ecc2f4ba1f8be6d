//! Domain models
//!
//! This module contains all domain models representing navigation entities
//! and concepts. Models are pure data structures with minimal logic.

pub mod catalog;
pub mod constants;
pub mod errors;
pub mod location;
pub mod position;
pub mod travel;
pub mod waypoint;
