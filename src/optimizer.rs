//! Tour ordering: nearest-neighbor construction followed by 2-opt refinement.

use crate::haversine::distance_km;
use crate::traits::TourOptimizer;
use crate::waypoint::{Coordinate, Waypoint};

/// Stopping thresholds for the 2-opt refinement loop.
///
/// The loop normally runs until a full pass finds no improving swap. The
/// caps bound worst-case latency: `max_passes` always stops the loop, and
/// on routes with more than `soft_pass_min_stops` stops the loop also stops
/// after `soft_max_passes` passes.
#[derive(Debug, Clone)]
pub struct OptimizeOptions {
    /// Hard cap on full 2-opt passes.
    pub max_passes: usize,
    /// Early-exit pass count for larger routes.
    pub soft_max_passes: usize,
    /// Stop count above which the early exit applies.
    pub soft_pass_min_stops: usize,
}

impl Default for OptimizeOptions {
    fn default() -> Self {
        Self {
            max_passes: 100,
            soft_max_passes: 20,
            soft_pass_min_stops: 8,
        }
    }
}

/// Nearest-neighbor construction followed by bounded 2-opt local search.
///
/// Quadratic per pass; fine for the handful-of-stops routes it is built
/// for, unsuitable for very large destination counts by design.
#[derive(Debug, Clone, Default)]
pub struct TwoOptOptimizer {
    pub options: OptimizeOptions,
}

impl TwoOptOptimizer {
    pub fn new(options: OptimizeOptions) -> Self {
        Self { options }
    }

    /// Greedy construction: always step to the closest unvisited stop.
    ///
    /// Ties keep the first candidate encountered, so the result is stable
    /// in the input order.
    fn nearest_neighbor_order(start: Coordinate, destinations: &[Waypoint]) -> Vec<Waypoint> {
        let mut unvisited: Vec<Waypoint> = destinations.to_vec();
        let mut order = Vec::with_capacity(unvisited.len());
        let mut current = start;

        while !unvisited.is_empty() {
            let mut nearest = 0;
            let mut nearest_distance = distance_km(current, unvisited[0].coordinate());
            for (i, candidate) in unvisited.iter().enumerate().skip(1) {
                let dist = distance_km(current, candidate.coordinate());
                if dist < nearest_distance {
                    nearest_distance = dist;
                    nearest = i;
                }
            }
            let next = unvisited.remove(nearest);
            current = next.coordinate();
            order.push(next);
        }

        order
    }

    /// 2-opt passes over the full route, start pinned at index 0.
    fn two_opt(&self, route: &mut [Waypoint]) {
        let n = route.len();
        if n < 4 {
            // Fewer than two non-adjacent edges; nothing to swap.
            return;
        }
        let stops = n - 1;

        for pass in 0..self.options.max_passes {
            if pass >= self.options.soft_max_passes && stops > self.options.soft_pass_min_stops {
                break;
            }

            let mut improved = false;
            for i in 0..n - 2 {
                for j in i + 2..n {
                    if Self::swap_improves(route, i, j) {
                        route[i + 1..=j].reverse();
                        improved = true;
                    }
                }
            }

            if !improved {
                break;
            }
        }
    }

    /// Whether reversing `route[i+1..=j]` strictly shortens the tour.
    ///
    /// The closing edge wraps around to the start, so the comparison treats
    /// the route as a cycle even though the planned tour is an open path.
    fn swap_improves(route: &[Waypoint], i: usize, j: usize) -> bool {
        let wrap = (j + 1) % route.len();

        let current = distance_km(route[i].coordinate(), route[i + 1].coordinate())
            + distance_km(route[j].coordinate(), route[wrap].coordinate());
        let swapped = distance_km(route[i].coordinate(), route[j].coordinate())
            + distance_km(route[i + 1].coordinate(), route[wrap].coordinate());

        swapped < current
    }
}

impl TourOptimizer for TwoOptOptimizer {
    fn optimize(&self, start: &Waypoint, destinations: &[Waypoint]) -> Vec<Waypoint> {
        if destinations.is_empty() {
            return Vec::new();
        }

        let mut route = Vec::with_capacity(destinations.len() + 1);
        route.push(start.clone());
        route.extend(Self::nearest_neighbor_order(start.coordinate(), destinations));

        self.two_opt(&mut route);

        route.remove(0);
        route
    }
}
