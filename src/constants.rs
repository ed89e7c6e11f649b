//! Default steering constants used across the controller and its callers.
//!
//! These are the values the locomotion rig was tuned against at a fixed
//! simulation rate of 60 ticks per second. Changing the tick rate means
//! retuning the deceleration pair below.

/// Upper bound of the internal speed, a walk rather than a run.
pub const DEFAULT_MAX_SPEED: f32 = 0.5;
/// Distance from the goal at which the approach speed reaches zero.
pub const DEFAULT_MIN_DISTANCE: f32 = 1.0;
/// Turn angle magnitude (degrees) beyond which the agent always turns left.
pub const DEFAULT_TURN_CLAMP_DEGREES: f32 = 150.0;
/// Half-width, in densified points, of the midpoint smoothing kernel.
pub const DEFAULT_SMOOTHING_WINDOW: usize = 60;
/// Per-tick speed multiplier while decelerating.
pub const DEFAULT_DECELERATION_FACTOR: f32 = 0.95;
/// Speed below which a decelerating agent counts as stopped.
pub const DEFAULT_DECELERATION_STOP_THRESHOLD: f32 = 0.02;
/// First tracked index of a freshly planned path (one metre at 100 points
/// per unit).
pub const DEFAULT_LOOKAHEAD_START: usize = 100;
/// Points skipped along the path each time a sub-goal is captured.
pub const DEFAULT_SUBGOAL_ADVANCE: usize = 10;
/// Extra distance beyond `min_distance` at which a goal counts as reached.
pub const DEFAULT_REACHED_MARGIN: f32 = 0.2;
/// Displacement above which a goal is considered to have moved.
pub const GOAL_MOVE_EPSILON: f32 = 0.01;
/// Speed gained per unit of distance beyond `min_distance`.
pub const APPROACH_GAIN: f32 = 0.2;
/// Capture radius of a sub-goal for an agent standing still.
pub const SUBGOAL_RADIUS: f32 = 0.5;
/// Extra sub-goal capture radius per unit of speed.
pub const SUBGOAL_SPEED_GAIN: f32 = 2.0;
/// Densification resolution of the path smoother.
pub const POINTS_PER_UNIT: f32 = 100.0;
/// Ticks to wait before querying an unreachable goal again.
pub const NO_PATH_RETRY_TICKS: u32 = 30;
/// Factor converting internal speed into the actuator's magnitude range.
pub const ACTUATOR_SPEED_SCALE: f32 = 6.0;
/// Offset between the atan2 convention and the actuator's forward axis.
pub const ACTUATOR_AXIS_OFFSET_DEGREES: f32 = 90.0;
/// Simulation rate the defaults were tuned for.
pub const TICKS_PER_SECOND: f32 = 60.0;
