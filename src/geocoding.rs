//! Sequential address resolution with pacing, a global deadline, and
//! cooperative cancellation.
//!
//! Addresses are resolved one at a time, never concurrently, to stay inside
//! the resolver's rate limits. A fixed pause separates successful lookups.
//! One deadline governs the whole run; the start address is fatal on
//! failure, destinations are skipped.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use thiserror::Error;
use tokio::sync::watch;
use tracing::{debug, warn};

use crate::traits::AddressResolver;
use crate::waypoint::Waypoint;

/// Fire-once cancellation token shared between a planning request and its
/// caller.
///
/// Whichever of completion, deadline, or cancellation happens first wins;
/// the others become no-ops. Cancelling never interrupts an already
/// dispatched resolver call; its result is discarded when it arrives.
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    cancelled: Arc<AtomicBool>,
}

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    /// Requests cancellation. Idempotent; safe to call at any time,
    /// including after the request already completed.
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }
}

/// Where a resolution run currently stands.
///
/// `Resolving { index }` counts through `[start] + destinations`, so index 0
/// is always the start address. These are progress observations only; the
/// terminal outcome is the run's return value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolutionState {
    Idle,
    Resolving { index: usize },
    Completed,
    Aborted,
    TimedOut,
}

/// Why a resolution run ended without a usable waypoint list.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ResolutionAbort {
    #[error("no start address or no usable destinations")]
    InvalidAddresses,
    #[error("could not resolve start address: {0}")]
    StartAddressFailed(String),
    #[error("fewer than two addresses resolved")]
    NotEnoughResolved,
    #[error("deadline elapsed before resolution finished")]
    DeadlineElapsed,
    #[error("cancelled by caller")]
    Cancelled,
}

/// Outcome of a completed resolution run.
#[derive(Debug, Clone)]
pub struct Resolution {
    /// Resolved waypoints in processed order; the start is index 0.
    pub waypoints: Vec<Waypoint>,
    /// Destination addresses that failed to resolve and were skipped.
    pub skipped: Vec<String>,
}

/// Drives an [`AddressResolver`] over `[start] + destinations`, one address
/// at a time.
pub struct GeocodingPipeline<R> {
    resolver: R,
    deadline: Duration,
    pacing_delay: Duration,
    cancel: CancelToken,
    state: watch::Sender<ResolutionState>,
}

impl<R: AddressResolver> GeocodingPipeline<R> {
    pub fn new(
        resolver: R,
        deadline: Duration,
        pacing_delay: Duration,
        cancel: CancelToken,
    ) -> Self {
        let (state, _) = watch::channel(ResolutionState::Idle);
        Self {
            resolver,
            deadline,
            pacing_delay,
            cancel,
            state,
        }
    }

    /// Observe resolution progress. Intermediate states are never terminal
    /// outcomes; the run's return value is.
    pub fn subscribe(&self) -> watch::Receiver<ResolutionState> {
        self.state.subscribe()
    }

    /// Resolves the start address and every non-blank destination, in
    /// submitted order, under this pipeline's deadline.
    pub async fn run(
        &self,
        start_address: &str,
        destination_addresses: &[String],
    ) -> Result<Resolution, ResolutionAbort> {
        let destinations: Vec<&str> = destination_addresses
            .iter()
            .map(String::as_str)
            .filter(|address| !address.trim().is_empty())
            .collect();

        if start_address.trim().is_empty() || destinations.is_empty() {
            return Err(ResolutionAbort::InvalidAddresses);
        }

        match tokio::time::timeout(self.deadline, self.resolve_all(start_address, &destinations))
            .await
        {
            Ok(outcome) => outcome,
            Err(_) => {
                // The in-flight step was dropped with the timed-out future;
                // any late resolver result is discarded with it.
                warn!(deadline_secs = self.deadline.as_secs_f64(), "resolution deadline elapsed");
                self.state.send_replace(ResolutionState::TimedOut);
                Err(ResolutionAbort::DeadlineElapsed)
            }
        }
    }

    async fn resolve_all(
        &self,
        start_address: &str,
        destinations: &[&str],
    ) -> Result<Resolution, ResolutionAbort> {
        let total = destinations.len() + 1;
        let mut waypoints = Vec::with_capacity(total);
        let mut skipped = Vec::new();

        for index in 0..total {
            if self.cancel.is_cancelled() {
                self.state.send_replace(ResolutionState::Aborted);
                return Err(ResolutionAbort::Cancelled);
            }

            let address = if index == 0 {
                start_address
            } else {
                destinations[index - 1]
            };

            self.state.send_replace(ResolutionState::Resolving { index });
            debug!(index, address, "resolving address");

            let resolved = self.resolver.resolve(address).await;

            // A cancellation that raced the call wins; discard the result.
            if self.cancel.is_cancelled() {
                self.state.send_replace(ResolutionState::Aborted);
                return Err(ResolutionAbort::Cancelled);
            }

            match resolved {
                Ok(coordinate) => {
                    debug!(
                        index,
                        latitude = coordinate.latitude,
                        longitude = coordinate.longitude,
                        "address resolved"
                    );
                    waypoints.push(Waypoint::new(address, coordinate));

                    // Pace requests to respect the resolver's rate limits.
                    if index + 1 < total {
                        tokio::time::sleep(self.pacing_delay).await;
                    }
                }
                Err(err) if index == 0 => {
                    warn!(address, %err, "start address failed to resolve");
                    self.state.send_replace(ResolutionState::Aborted);
                    return Err(ResolutionAbort::StartAddressFailed(start_address.to_string()));
                }
                Err(err) => {
                    warn!(index, address, %err, "skipping unresolvable destination");
                    skipped.push(address.to_string());
                }
            }
        }

        if waypoints.len() < 2 {
            self.state.send_replace(ResolutionState::Aborted);
            return Err(ResolutionAbort::NotEnoughResolved);
        }

        self.state.send_replace(ResolutionState::Completed);
        Ok(Resolution { waypoints, skipped })
    }
}
