//! Per-agent steering configuration.
//!
//! Every tuning constant of the controller is exposed here so that different
//! locomotion rigs and tick rates can be accommodated without code changes.
//! Configurations deserialize from JSON with missing fields taking their
//! defaults; [`SteeringConfig::validate`] rejects values the controller
//! cannot work with.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{
    ACTUATOR_AXIS_OFFSET_DEGREES, ACTUATOR_SPEED_SCALE, APPROACH_GAIN,
    DEFAULT_DECELERATION_FACTOR, DEFAULT_DECELERATION_STOP_THRESHOLD, DEFAULT_LOOKAHEAD_START,
    DEFAULT_MAX_SPEED, DEFAULT_MIN_DISTANCE, DEFAULT_REACHED_MARGIN, DEFAULT_SMOOTHING_WINDOW,
    DEFAULT_SUBGOAL_ADVANCE, DEFAULT_TURN_CLAMP_DEGREES, GOAL_MOVE_EPSILON, NO_PATH_RETRY_TICKS,
    POINTS_PER_UNIT, SUBGOAL_RADIUS, SUBGOAL_SPEED_GAIN,
};

/// How the controller reacts when the active goal moves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GoalMovePolicy {
    /// Damp speed to a standstill and re-plan, as for a new goal.
    #[default]
    Decelerate,
    /// Re-plan immediately and keep walking. Suited to goals that drift
    /// continuously, which would otherwise keep the agent decelerating.
    Replan,
}

/// Scaling between the controller's output and the locomotion rig.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ActuatorCalibration {
    /// Multiplier applied to the internal speed before it is emitted.
    pub speed_scale: f32,
    /// Added to the raw `atan2` angle so that `0` means straight ahead.
    pub axis_offset_degrees: f32,
}

impl Default for ActuatorCalibration {
    fn default() -> Self {
        Self {
            speed_scale: ACTUATOR_SPEED_SCALE,
            axis_offset_degrees: ACTUATOR_AXIS_OFFSET_DEGREES,
        }
    }
}

/// Tuning for a single walking agent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SteeringConfig {
    /// Upper speed bound in `(0, 1]`; 1 is a full run, 0.5 a brisk walk.
    pub max_speed: f32,
    /// Distance the agent keeps from the goal's boundary.
    pub min_distance: f32,
    /// Largest turn angle emitted; anything beyond snaps to a left turn.
    pub turn_clamp_degrees: f32,
    /// Half-width of the smoothing kernel, in densified points.
    pub smoothing_window: usize,
    /// Per-tick speed multiplier while decelerating, in `(0, 1)`.
    pub deceleration_factor: f32,
    /// Speed below which deceleration ends and planning starts.
    pub deceleration_stop_threshold: f32,
    /// First tracked index of a freshly planned path.
    pub lookahead_start: usize,
    /// Indices skipped each time the sub-goal is captured.
    pub subgoal_advance: usize,
    /// Goal counts as reached at `min_distance + reached_margin`.
    pub reached_margin: f32,
    /// Goal displacement since the last plan that counts as a move.
    pub goal_move_epsilon: f32,
    /// Reaction to a goal that moves while being followed.
    pub goal_move_policy: GoalMovePolicy,
    /// Speed gained per unit of distance beyond `min_distance`.
    pub approach_gain: f32,
    /// Sub-goal capture radius at zero speed.
    pub subgoal_radius: f32,
    /// Capture radius added per unit of speed.
    pub subgoal_speed_gain: f32,
    /// Densification resolution of planned paths.
    pub points_per_unit: f32,
    /// Ticks to wait before querying again for a goal that had no path.
    pub no_path_retry_ticks: u32,
    /// Mapping from internal values to actuator units.
    pub calibration: ActuatorCalibration,
}

impl Default for SteeringConfig {
    fn default() -> Self {
        Self {
            max_speed: DEFAULT_MAX_SPEED,
            min_distance: DEFAULT_MIN_DISTANCE,
            turn_clamp_degrees: DEFAULT_TURN_CLAMP_DEGREES,
            smoothing_window: DEFAULT_SMOOTHING_WINDOW,
            deceleration_factor: DEFAULT_DECELERATION_FACTOR,
            deceleration_stop_threshold: DEFAULT_DECELERATION_STOP_THRESHOLD,
            lookahead_start: DEFAULT_LOOKAHEAD_START,
            subgoal_advance: DEFAULT_SUBGOAL_ADVANCE,
            reached_margin: DEFAULT_REACHED_MARGIN,
            goal_move_epsilon: GOAL_MOVE_EPSILON,
            goal_move_policy: GoalMovePolicy::default(),
            approach_gain: APPROACH_GAIN,
            subgoal_radius: SUBGOAL_RADIUS,
            subgoal_speed_gain: SUBGOAL_SPEED_GAIN,
            points_per_unit: POINTS_PER_UNIT,
            no_path_retry_ticks: NO_PATH_RETRY_TICKS,
            calibration: ActuatorCalibration::default(),
        }
    }
}

/// Reasons a [`SteeringConfig`] is rejected.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    /// `max_speed` outside `(0, 1]`.
    #[error("max_speed must lie in (0, 1], got {0}")]
    MaxSpeed(f32),
    /// Negative or non-finite `min_distance`.
    #[error("min_distance must be a finite value >= 0, got {0}")]
    MinDistance(f32),
    /// `turn_clamp_degrees` outside `(0, 180]`.
    #[error("turn_clamp_degrees must lie in (0, 180], got {0}")]
    TurnClamp(f32),
    /// `deceleration_factor` outside `(0, 1)`.
    #[error("deceleration_factor must lie in (0, 1), got {0}")]
    DecelerationFactor(f32),
    /// Non-positive `deceleration_stop_threshold`.
    #[error("deceleration_stop_threshold must be positive, got {0}")]
    StopThreshold(f32),
    /// `subgoal_advance` of zero would never move past a sub-goal.
    #[error("subgoal_advance must be at least 1")]
    SubgoalAdvance,
    /// A distance or gain that must be non-negative.
    #[error("{field} must be a finite value >= 0, got {value}")]
    Negative {
        /// Name of the offending field.
        field: &'static str,
        /// Rejected value.
        value: f32,
    },
    /// Non-positive `points_per_unit`.
    #[error("points_per_unit must be positive, got {0}")]
    Resolution(f32),
}

impl SteeringConfig {
    /// Checks every field against the range the controller relies on.
    ///
    /// # Errors
    /// Returns the first offending field as a [`ConfigError`].
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.max_speed > 0.0 && self.max_speed <= 1.0) {
            return Err(ConfigError::MaxSpeed(self.max_speed));
        }
        if !is_non_negative(self.min_distance) {
            return Err(ConfigError::MinDistance(self.min_distance));
        }
        if !(self.turn_clamp_degrees > 0.0 && self.turn_clamp_degrees <= 180.0) {
            return Err(ConfigError::TurnClamp(self.turn_clamp_degrees));
        }
        if !(self.deceleration_factor > 0.0 && self.deceleration_factor < 1.0) {
            return Err(ConfigError::DecelerationFactor(self.deceleration_factor));
        }
        if !(self.deceleration_stop_threshold > 0.0 && self.deceleration_stop_threshold.is_finite())
        {
            return Err(ConfigError::StopThreshold(self.deceleration_stop_threshold));
        }
        if self.subgoal_advance == 0 {
            return Err(ConfigError::SubgoalAdvance);
        }
        if !(self.points_per_unit > 0.0 && self.points_per_unit.is_finite()) {
            return Err(ConfigError::Resolution(self.points_per_unit));
        }
        let non_negative = [
            ("reached_margin", self.reached_margin),
            ("goal_move_epsilon", self.goal_move_epsilon),
            ("approach_gain", self.approach_gain),
            ("subgoal_radius", self.subgoal_radius),
            ("subgoal_speed_gain", self.subgoal_speed_gain),
            ("calibration.speed_scale", self.calibration.speed_scale),
        ];
        for (field, value) in non_negative {
            if !is_non_negative(value) {
                return Err(ConfigError::Negative { field, value });
            }
        }
        Ok(())
    }

    /// Distance at which the goal counts as reached.
    #[must_use]
    pub const fn reached_distance(&self) -> f32 {
        self.min_distance + self.reached_margin
    }
}

const fn is_non_negative(value: f32) -> bool {
    value.is_finite() && value >= 0.0
}
