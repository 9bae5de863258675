//! route-planner core
//!
//! Multi-stop route planning: resolve addresses to coordinates through an
//! injected geocoder, then order the stops for a short total drive.

pub mod traits;
pub mod waypoint;
pub mod haversine;
pub mod optimizer;
pub mod geocoding;
pub mod planner;
pub mod nominatim;
