//! Test fixtures for route-planner.
//!
//! Real Las Vegas / Henderson locations (from OpenStreetMap) usable both as
//! stub-geocoder answers and as pre-resolved waypoints.

pub mod las_vegas_locations;

pub use las_vegas_locations::*;
