//! Core data model: coordinates, waypoints, and planned tours.
//!
//! Waypoints are immutable once created and move by value through the
//! pipeline. A tour owns its stops; derived quantities (total distance,
//! estimated duration) are computed on demand, never stored.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::haversine::{self, SpeedModel};

/// A geographic coordinate in decimal degrees.
///
/// Latitude is in `[-90, 90]`, longitude in `[-180, 180]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinate {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}

/// A resolved address: the original address text paired with its coordinate.
///
/// Equality is by label and both coordinate components.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Waypoint {
    label: String,
    coordinate: Coordinate,
}

impl Waypoint {
    pub fn new(label: impl Into<String>, coordinate: Coordinate) -> Self {
        Self {
            label: label.into(),
            coordinate,
        }
    }

    /// The original address text.
    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn coordinate(&self) -> Coordinate {
        self.coordinate
    }
}

/// Rejected stop reorderings.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TourError {
    #[error("stop index out of range")]
    IndexOutOfRange,
    #[error("order is not a permutation of the current stops")]
    InvalidPermutation,
}

/// A start point plus an ordered sequence of destination stops.
///
/// The stops are a permutation of the destinations the tour was planned
/// with; reordering changes only their order. The start is fixed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tour {
    start: Waypoint,
    stops: Vec<Waypoint>,
}

impl Tour {
    pub fn new(start: Waypoint, stops: Vec<Waypoint>) -> Self {
        Self { start, stops }
    }

    pub fn start(&self) -> &Waypoint {
        &self.start
    }

    pub fn stops(&self) -> &[Waypoint] {
        &self.stops
    }

    /// Consumes the tour and returns the start and the ordered stops.
    pub fn into_parts(self) -> (Waypoint, Vec<Waypoint>) {
        (self.start, self.stops)
    }

    /// Total great-circle length of `[start] + stops` in kilometers.
    ///
    /// The tour is an open path; there is no closing leg back to the start.
    pub fn total_distance_km(&self) -> f64 {
        let mut total = 0.0;
        let mut previous = &self.start;
        for stop in &self.stops {
            total += haversine::distance_km(previous.coordinate(), stop.coordinate());
            previous = stop;
        }
        total
    }

    /// Estimated driving time for the whole tour under the given speed model.
    pub fn estimated_duration(&self, speed: &SpeedModel) -> Duration {
        speed.duration_for_km(self.total_distance_km())
    }

    /// Moves the stop at `from` to position `to`, shifting the stops in
    /// between.
    pub fn move_stop(&mut self, from: usize, to: usize) -> Result<(), TourError> {
        if from >= self.stops.len() || to >= self.stops.len() {
            return Err(TourError::IndexOutOfRange);
        }
        let stop = self.stops.remove(from);
        self.stops.insert(to, stop);
        Ok(())
    }

    /// Replaces the stop order with a caller-supplied permutation of the
    /// current indices. Rejected orders leave the tour unchanged.
    pub fn reorder(&mut self, order: &[usize]) -> Result<(), TourError> {
        if order.len() != self.stops.len() {
            return Err(TourError::InvalidPermutation);
        }
        let mut seen = vec![false; self.stops.len()];
        for &index in order {
            if index >= self.stops.len() {
                return Err(TourError::IndexOutOfRange);
            }
            if seen[index] {
                return Err(TourError::InvalidPermutation);
            }
            seen[index] = true;
        }
        let reordered = order.iter().map(|&index| self.stops[index].clone()).collect();
        self.stops = reordered;
        Ok(())
    }
}
