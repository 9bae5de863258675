//! Great-circle distance and travel-time estimation.
//!
//! Straight-line distance only; road geometry is out of scope. Estimated
//! times come from a fixed average-speed assumption, so treat them as rough.

use std::time::Duration;

use crate::waypoint::Coordinate;

/// Average driving speed assumption for time estimation, in meters per
/// second. Roughly 35 mph, a mixed urban/suburban figure.
const DEFAULT_SPEED_MPS: f64 = 15.6;

/// Earth radius in kilometers.
const EARTH_RADIUS_KM: f64 = 6371.0;

/// Great-circle distance between two coordinates in kilometers.
pub fn distance_km(from: Coordinate, to: Coordinate) -> f64 {
    let lat1_rad = from.latitude.to_radians();
    let lat2_rad = to.latitude.to_radians();
    let delta_lat = (to.latitude - from.latitude).to_radians();
    let delta_lng = (to.longitude - from.longitude).to_radians();

    let a = (delta_lat / 2.0).sin().powi(2)
        + lat1_rad.cos() * lat2_rad.cos() * (delta_lng / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().asin();

    EARTH_RADIUS_KM * c
}

/// Fixed average-speed model converting distance to estimated travel time.
///
/// The speed is a configuration value; override it per request or in tests.
#[derive(Debug, Clone)]
pub struct SpeedModel {
    /// Assumed average driving speed in meters per second.
    pub meters_per_second: f64,
}

impl Default for SpeedModel {
    fn default() -> Self {
        Self {
            meters_per_second: DEFAULT_SPEED_MPS,
        }
    }
}

impl SpeedModel {
    pub fn new(meters_per_second: f64) -> Self {
        Self { meters_per_second }
    }

    /// Estimated travel time in seconds for a distance in kilometers.
    ///
    /// Full precision; rounding for display is the caller's concern.
    pub fn duration_secs_for_km(&self, km: f64) -> f64 {
        km * 1000.0 / self.meters_per_second
    }

    /// The same estimate as a [`Duration`].
    pub fn duration_for_km(&self, km: f64) -> Duration {
        Duration::from_secs_f64(self.duration_secs_for_km(km))
    }
}
