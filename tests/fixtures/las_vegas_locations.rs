//! Real Las Vegas / Henderson locations for realistic test fixtures.
//!
//! Coordinates sourced from OpenStreetMap. The name doubles as the address
//! string fed to stub geocoders.

use route_planner::waypoint::{Coordinate, Waypoint};

/// A named location with coordinates.
#[derive(Debug, Clone)]
pub struct Location {
    pub name: &'static str,
    pub lat: f64,
    pub lng: f64,
}

impl Location {
    pub const fn new(name: &'static str, lat: f64, lng: f64) -> Self {
        Self { name, lat, lng }
    }

    pub fn coordinate(&self) -> Coordinate {
        Coordinate::new(self.lat, self.lng)
    }

    pub fn waypoint(&self) -> Waypoint {
        Waypoint::new(self.name, self.coordinate())
    }
}

// ============================================================================
// Strip Hotels (good start points)
// ============================================================================

pub const STRIP_HOTELS: &[Location] = &[
    Location::new("Wynn Las Vegas", 36.1263781, -115.1658180),
    Location::new("MGM Grand", 36.1023654, -115.1688720),
    Location::new("Bellagio", 36.1126, -115.1767),
    Location::new("Caesars Palace", 36.1162, -115.1745),
];

// ============================================================================
// Destinations spread across the metro area
// ============================================================================

pub const METRO_SPREAD: &[Location] = &[
    // North
    Location::new("Rivas Mexican Grill North", 36.1450055, -115.0482587),
    Location::new("Beers and Bets", 36.1428945, -115.1573836),
    // Central Strip
    Location::new("Hard Rock Cafe", 36.1041592, -115.1722166),
    Location::new("Brooklyn Bowl", 36.1175388, -115.1695094),
    // South
    Location::new("Bootlegger Bistro", 36.0492047, -115.1715744),
    Location::new("Budget Suites South", 36.0366259, -115.1713361),
    // East / Henderson
    Location::new("Green Valley Ranch Area", 36.0308, -115.0825),
    Location::new("Sunset Station Area", 36.0614, -115.0631),
    Location::new("Longhorn Casino", 36.1070664, -115.0591256),
    Location::new("I Love Sushi Henderson", 35.9916660, -115.1028343),
    Location::new("Islander's Grill", 36.0335058, -114.9856162),
];

/// Waypoints for the metro-area destinations.
pub fn metro_waypoints() -> Vec<Waypoint> {
    METRO_SPREAD.iter().map(Location::waypoint).collect()
}
