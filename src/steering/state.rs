//! Per-agent steering state.

use std::fmt;

use glam::Vec2;
use serde::Serialize;

use crate::goal::Goal;

/// Phase of the steering state machine.
///
/// `Idle -> Decelerating -> Following`, with any goal change or (by default)
/// goal movement sending the agent back to `Decelerating`, and a cleared goal
/// returning it to `Idle`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SteeringPhase {
    /// No goal; nothing is driven.
    #[default]
    Idle,
    /// Damping speed towards zero before committing to a (new) path.
    Decelerating,
    /// Tracking sub-goals along the current path.
    Following,
}

impl fmt::Display for SteeringPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Idle => "idle",
            Self::Decelerating => "decelerating",
            Self::Following => "following",
        };
        f.write_str(name)
    }
}

/// Everything the controller remembers between ticks.
///
/// Created with the agent and mutated once per tick; it is never torn down
/// while the agent lives.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SteeringState {
    /// Current phase of the state machine.
    pub phase: SteeringPhase,
    /// Internal speed in `[0, max_speed]`, before calibration.
    pub speed: f32,
    /// Turn signal in degrees, already sign-flipped for the actuator.
    pub direction: f32,
    /// Index of the tracked sub-goal in `path`.
    pub progress: usize,
    /// Smoothed path being tracked; empty when there is none.
    pub path: Vec<Vec2>,
    /// Sub-goal the agent is steering at.
    pub target_sub: Option<Vec2>,
    /// Active goal.
    pub goal: Option<Goal>,
    /// Goal position at the time `path` was planned.
    pub sampled_goal_position: Option<Vec2>,
    /// Ticks left before an unreachable goal is queried again.
    pub retry_cooldown: u32,
    /// Result of the last reach check.
    pub reached: bool,
}

impl SteeringState {
    /// Drops the current path and sub-goal.
    pub fn clear_path(&mut self) {
        self.path.clear();
        self.progress = 0;
        self.target_sub = None;
    }

    /// `true` once `progress` has run past the end of the path.
    #[must_use]
    pub const fn path_exhausted(&self) -> bool {
        self.progress > self.path.len()
    }
}
