//! Core traits for the route planner.
//!
//! These are the injection seams: concrete apps supply a geocoding backend,
//! and tests may swap the tour-ordering strategy.

use async_trait::async_trait;
use thiserror::Error;

use crate::waypoint::{Coordinate, Waypoint};

/// Failure modes of a single address lookup.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ResolveError {
    /// The resolver found no candidate for the address.
    #[error("no location found")]
    NotFound,
    /// The resolver could not be reached or answered abnormally.
    #[error("resolver failure: {0}")]
    Transient(String),
}

/// Resolves a free-form address to a coordinate.
///
/// Implementations return the first candidate when several match. Latency
/// is unbounded from the caller's perspective; the resolution pipeline
/// applies its own deadline.
#[async_trait]
pub trait AddressResolver: Send + Sync {
    async fn resolve(&self, address: &str) -> Result<Coordinate, ResolveError>;
}

/// Orders a set of destination waypoints into a visiting sequence.
pub trait TourOptimizer {
    /// Returns a permutation of `destinations` to visit starting from
    /// `start`. Never fails; the worst acceptable answer is the input order.
    fn optimize(&self, start: &Waypoint, destinations: &[Waypoint]) -> Vec<Waypoint>;
}
