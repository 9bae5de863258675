//! Route planning service: validation, geocoding, tour construction.

use std::time::Duration;

use thiserror::Error;
use tokio::sync::watch;
use tracing::{debug, info};

use crate::geocoding::{
    CancelToken, GeocodingPipeline, Resolution, ResolutionAbort, ResolutionState,
};
use crate::haversine::SpeedModel;
use crate::optimizer::{OptimizeOptions, TwoOptOptimizer};
use crate::traits::{AddressResolver, TourOptimizer};
use crate::waypoint::Tour;

/// Terminal failures of a planning request.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PlanError {
    #[error("missing start or destination addresses")]
    InvalidAddresses,
    #[error("couldn't find location for: {0}")]
    GeocodingFailed(String),
    #[error("need at least a start and one destination to plan a route")]
    NotEnoughValidLocations,
    /// Defensive: surfaces an unexpected internal fault distinctly from
    /// input validation. The shipped optimizer has no failure path.
    #[error("failed to plan the route")]
    OptimizationFailed,
    #[error("route planning took too long")]
    Timeout,
    #[error("route planning was cancelled")]
    Cancelled,
}

impl From<ResolutionAbort> for PlanError {
    fn from(abort: ResolutionAbort) -> Self {
        match abort {
            ResolutionAbort::InvalidAddresses => Self::InvalidAddresses,
            ResolutionAbort::StartAddressFailed(address) => Self::GeocodingFailed(address),
            ResolutionAbort::NotEnoughResolved => Self::NotEnoughValidLocations,
            ResolutionAbort::DeadlineElapsed => Self::Timeout,
            ResolutionAbort::Cancelled => Self::Cancelled,
        }
    }
}

/// Tunable parameters of a planning request.
#[derive(Debug, Clone)]
pub struct PlannerConfig {
    /// Overall deadline for the whole resolution sequence.
    pub deadline: Duration,
    /// Pause between successful resolver calls.
    pub pacing_delay: Duration,
    /// Average-speed assumption for duration estimates.
    pub speed: SpeedModel,
    /// 2-opt stopping thresholds.
    pub optimize: OptimizeOptions,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            deadline: Duration::from_secs(30),
            pacing_delay: Duration::from_millis(500),
            speed: SpeedModel::default(),
            optimize: OptimizeOptions::default(),
        }
    }
}

/// One route-planning request: geocode the addresses, then order the stops.
///
/// Create one instance per in-flight request; the cancel token and progress
/// channel belong to that request alone. The request completes exactly once,
/// with a [`Tour`] or one [`PlanError`].
pub struct RoutePlanner<R, O = TwoOptOptimizer> {
    pipeline: GeocodingPipeline<R>,
    optimizer: O,
    speed: SpeedModel,
    cancel: CancelToken,
}

impl<R: AddressResolver> RoutePlanner<R> {
    pub fn new(resolver: R, config: PlannerConfig) -> Self {
        let optimizer = TwoOptOptimizer::new(config.optimize.clone());
        Self::with_optimizer(resolver, optimizer, config)
    }
}

impl<R: AddressResolver, O: TourOptimizer> RoutePlanner<R, O> {
    pub fn with_optimizer(resolver: R, optimizer: O, config: PlannerConfig) -> Self {
        let cancel = CancelToken::new();
        let pipeline = GeocodingPipeline::new(
            resolver,
            config.deadline,
            config.pacing_delay,
            cancel.clone(),
        );
        Self {
            pipeline,
            optimizer,
            speed: config.speed,
            cancel,
        }
    }

    /// Token for cancelling this request from another task.
    pub fn cancel_token(&self) -> CancelToken {
        self.cancel.clone()
    }

    /// Cancels the in-flight request. No-op once the request completed.
    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    /// Observe progress of the resolution phase.
    pub fn progress(&self) -> watch::Receiver<ResolutionState> {
        self.pipeline.subscribe()
    }

    /// Estimated driving time for a tour under this planner's speed model.
    pub fn estimated_duration(&self, tour: &Tour) -> Duration {
        tour.estimated_duration(&self.speed)
    }

    /// Plans a tour visiting every resolvable destination, starting from the
    /// start address.
    pub async fn plan_route(
        &self,
        start_address: &str,
        destination_addresses: &[String],
    ) -> Result<Tour, PlanError> {
        let has_destination = destination_addresses
            .iter()
            .any(|address| !address.trim().is_empty());
        if start_address.trim().is_empty() || !has_destination {
            return Err(PlanError::InvalidAddresses);
        }

        info!(
            destinations = destination_addresses.len(),
            "starting route planning"
        );

        let Resolution {
            mut waypoints,
            skipped,
        } = self
            .pipeline
            .run(start_address, destination_addresses)
            .await?;

        if !skipped.is_empty() {
            debug!(?skipped, "planning around skipped destinations");
        }

        // The pipeline guarantees at least two waypoints, start first.
        let start = waypoints.remove(0);
        let stops = self.optimizer.optimize(&start, &waypoints);
        if stops.len() != waypoints.len() {
            return Err(PlanError::OptimizationFailed);
        }

        let tour = Tour::new(start, stops);
        info!(
            stops = tour.stops().len(),
            total_km = tour.total_distance_km(),
            "route planned"
        );
        Ok(tour)
    }
}
