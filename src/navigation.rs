//! Navigation collaborator seam and path planning.
//!
//! The walkable-surface solver is external. It answers a single question:
//! which corners lead from an origin to a goal. [`plan_path`] turns that
//! answer into the dense smoothed path the steering controller tracks.

use glam::Vec2;
use log::{debug, warn};
use thiserror::Error;

use crate::config::SteeringConfig;
use crate::path_smoothing::{path_length, smooth_with_resolution};

/// Failures reported by a [`Navigator`] or by [`plan_path`].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum NavigationError {
    /// The surface offers no connection between origin and goal, or the
    /// connection is too short to track.
    #[error("no path found from {origin} to {goal}")]
    NoPathFound {
        /// Where the query started.
        origin: Vec2,
        /// Where the query was headed.
        goal: Vec2,
    },
    /// The solver could not be queried at all.
    #[error("navigation unavailable: {0}")]
    Unavailable(String),
}

/// Computes corner paths across a static walkable surface.
#[cfg_attr(test, mockall::automock)]
pub trait Navigator {
    /// Returns the ordered corners from `origin` to `goal`, both included.
    ///
    /// # Errors
    /// Returns [`NavigationError::NoPathFound`] when the goal is unreachable.
    fn query_path(&self, origin: Vec2, goal: Vec2) -> Result<Vec<Vec2>, NavigationError>;
}

impl<F> Navigator for F
where
    F: Fn(Vec2, Vec2) -> Result<Vec<Vec2>, NavigationError>,
{
    fn query_path(&self, origin: Vec2, goal: Vec2) -> Result<Vec<Vec2>, NavigationError> {
        self(origin, goal)
    }
}

/// Open floor: every goal is reachable in a straight line.
#[derive(Debug, Clone, Copy, Default)]
pub struct DirectNavigator;

impl Navigator for DirectNavigator {
    fn query_path(&self, origin: Vec2, goal: Vec2) -> Result<Vec<Vec2>, NavigationError> {
        Ok(vec![origin, goal])
    }
}

/// Routes every query through a fixed list of intermediate corners.
///
/// Useful for scripted detours around obstacles the caller knows about.
#[derive(Debug, Clone, Default)]
pub struct CorridorNavigator {
    waypoints: Vec<Vec2>,
}

impl CorridorNavigator {
    /// Creates a navigator passing through `waypoints` in order.
    #[must_use]
    pub const fn new(waypoints: Vec<Vec2>) -> Self {
        Self { waypoints }
    }
}

impl Navigator for CorridorNavigator {
    fn query_path(&self, origin: Vec2, goal: Vec2) -> Result<Vec<Vec2>, NavigationError> {
        let mut corners = Vec::with_capacity(self.waypoints.len() + 2);
        corners.push(origin);
        corners.extend_from_slice(&self.waypoints);
        corners.push(goal);
        Ok(corners)
    }
}

/// Queries `navigator` and smooths the resulting corners.
///
/// # Errors
/// Returns [`NavigationError::NoPathFound`] when the navigator fails, returns
/// fewer than two corners, or the corners are too close together to yield a
/// single tracked point.
pub fn plan_path<N>(
    navigator: &N,
    origin: Vec2,
    goal: Vec2,
    config: &SteeringConfig,
) -> Result<Vec<Vec2>, NavigationError>
where
    N: Navigator + ?Sized,
{
    let corners = navigator.query_path(origin, goal).inspect_err(|e| {
        warn!("navigation query failed: {e}");
    })?;
    if corners.len() < 2 {
        warn!(
            "navigation returned {} corner(s) from {origin} to {goal}",
            corners.len()
        );
        return Err(NavigationError::NoPathFound { origin, goal });
    }

    let points = smooth_with_resolution(&corners, config.smoothing_window, config.points_per_unit);
    if points.is_empty() {
        warn!("path from {origin} to {goal} is too short to track");
        return Err(NavigationError::NoPathFound { origin, goal });
    }
    debug!(
        "planned path: {} corners, {} points, {:.2} units",
        corners.len(),
        points.len(),
        path_length(&corners)
    );
    Ok(points)
}
