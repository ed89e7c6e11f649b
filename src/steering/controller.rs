//! The steering state machine.
//!
//! Each tick runs, in order: goal-movement detection, deceleration and
//! re-planning, sub-goal tracking, and output. A newly selected goal always
//! passes through [`SteeringPhase::Decelerating`] first, so the agent never
//! swings mid-stride towards a new destination. From a standstill the damped
//! speed is already below the stop threshold and the path is planned on the
//! same tick.

use glam::Vec2;
use log::{debug, info};
use serde::Serialize;

use crate::actuator::{AgentPose, LocomotionCommand};
use crate::config::{ConfigError, GoalMovePolicy, SteeringConfig};
use crate::goal::Goal;
use crate::navigation::{plan_path, NavigationError, Navigator};
use crate::numeric::ceil_to_u32;
use crate::vector_math::{to_local, wrap_degrees};

use super::state::{SteeringPhase, SteeringState};

/// Result of one steering tick.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct SteeringOutput {
    /// Calibrated speed for the actuator.
    pub speed: f32,
    /// Turn signal in degrees within `[-turn_clamp, turn_clamp]`.
    pub direction: f32,
    /// The agent is within the reached distance of its goal.
    pub reached: bool,
    /// Phase the controller ended the tick in.
    pub phase: SteeringPhase,
    /// The last planning attempt for this goal found no path.
    pub no_path: bool,
}

impl SteeringOutput {
    /// The actuator command carried by this output.
    #[must_use]
    pub const fn command(&self) -> LocomotionCommand {
        LocomotionCommand {
            speed: self.speed,
            direction: self.direction,
        }
    }
}

/// Capability shared by every steering implementation.
pub trait Steering {
    /// Makes `goal` the active goal; `None` stops steering.
    ///
    /// Reselecting the active goal (same identity) is not a goal change; its
    /// position and bounds are refreshed.
    fn select_goal(&mut self, goal: Option<Goal>);

    /// Advances the state machine by one tick.
    fn tick(&mut self, pose: AgentPose, navigator: &dyn Navigator) -> SteeringOutput;
}

/// Steers one agent towards its goal.
#[derive(Debug, Clone, Default)]
pub struct SteeringController {
    config: SteeringConfig,
    state: SteeringState,
}

impl SteeringController {
    /// Creates an idle controller.
    ///
    /// # Errors
    /// Returns [`ConfigError`] when `config` fails validation.
    pub fn try_new(config: SteeringConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            config,
            state: SteeringState::default(),
        })
    }

    /// Validated configuration.
    #[must_use]
    pub const fn config(&self) -> &SteeringConfig {
        &self.config
    }

    /// Full per-agent state, for inspection.
    #[must_use]
    pub const fn state(&self) -> &SteeringState {
        &self.state
    }

    /// Current phase.
    #[must_use]
    pub const fn phase(&self) -> SteeringPhase {
        self.state.phase
    }

    /// Smoothed path currently being tracked; empty when there is none.
    #[must_use]
    pub const fn path(&self) -> &[Vec2] {
        self.state.path.as_slice()
    }

    /// Sub-goal the agent is steering at.
    #[must_use]
    pub const fn target_sub(&self) -> Option<Vec2> {
        self.state.target_sub
    }

    fn output(&self, no_path: bool) -> SteeringOutput {
        SteeringOutput {
            speed: self.state.speed * self.config.calibration.speed_scale,
            direction: self.state.direction,
            reached: self.state.reached,
            phase: self.state.phase,
            no_path,
        }
    }

    fn enter(&mut self, phase: SteeringPhase) {
        if self.state.phase != phase {
            debug!("steering {} -> {}", self.state.phase, phase);
            self.state.phase = phase;
        }
    }

    fn goal_moved(&self, goal: &Goal) -> bool {
        self.state
            .sampled_goal_position
            .is_some_and(|sampled| goal.position.distance(sampled) > self.config.goal_move_epsilon)
    }

    fn replan(
        &mut self,
        origin: Vec2,
        goal: &Goal,
        navigator: &dyn Navigator,
    ) -> Result<(), NavigationError> {
        self.state.sampled_goal_position = Some(goal.position);
        match plan_path(navigator, origin, goal.position, &self.config) {
            Ok(path) => {
                self.state.path = path;
                self.state.progress = self.config.lookahead_start;
                self.state.target_sub = None;
                self.state.retry_cooldown = 0;
                self.enter(SteeringPhase::Following);
                Ok(())
            }
            Err(e) => {
                self.state.clear_path();
                self.state.speed = 0.0;
                self.state.direction = 0.0;
                self.state.reached = false;
                self.state.retry_cooldown = self.config.no_path_retry_ticks;
                self.enter(SteeringPhase::Decelerating);
                debug!(
                    "no path to {:?}; retrying in {} ticks",
                    goal.id, self.state.retry_cooldown
                );
                Err(e)
            }
        }
    }

    /// Damps speed and plans once it has dropped below the stop threshold.
    /// Returns `true` while the goal has no path.
    fn decelerate(&mut self, pose: AgentPose, goal: &Goal, navigator: &dyn Navigator) -> bool {
        self.state.speed *= self.config.deceleration_factor;
        self.state.direction = 0.0;
        if self.state.speed >= self.config.deceleration_stop_threshold {
            return false;
        }
        if self.state.retry_cooldown > 0 {
            if self.goal_moved(goal) {
                self.state.retry_cooldown = 0;
            } else {
                self.state.retry_cooldown -= 1;
                return true;
            }
        }
        self.replan(pose.position, goal, navigator).is_err()
    }

    /// Computes speed and direction while tracking the path.
    fn follow(&mut self, pose: AgentPose, goal: &Goal) {
        let config = &self.config;
        let distance = goal.distance_from(pose.position);
        let reached = distance <= config.reached_distance();
        let mut speed = if reached {
            0.0
        } else {
            ((distance - config.min_distance) * config.approach_gain)
                .max(0.0)
                .min(config.max_speed)
        };

        if let Some(point) = self.state.path.get(self.state.progress) {
            self.state.target_sub = Some(*point);
        } else if self.state.target_sub.is_none() {
            // Lookahead beyond a short path: aim at its end.
            self.state.target_sub = self.state.path.last().copied();
        }
        let Some(target) = self.state.target_sub else {
            self.state.speed = 0.0;
            self.state.direction = 0.0;
            self.state.reached = reached;
            return;
        };

        // Faster agents capture sub-goals earlier to avoid S-curving.
        let capture_radius = config.subgoal_radius + speed * config.subgoal_speed_gain;
        if pose.position.distance(target) < capture_radius {
            self.state.progress += config.subgoal_advance;
        }
        if self.state.path_exhausted() {
            speed = 0.0;
        }

        self.state.direction = turn_signal(pose, target, config);
        self.state.speed = speed;
        if reached && !self.state.reached {
            info!("goal {:?} reached at distance {distance:.2}", goal.id);
        }
        self.state.reached = reached;
    }
}

impl Steering for SteeringController {
    fn select_goal(&mut self, selected: Option<Goal>) {
        let Some(goal) = selected else {
            if self.state.goal.take().is_some() {
                debug!("goal unset");
            }
            self.state.clear_path();
            self.state.direction = 0.0;
            self.state.reached = false;
            self.state.sampled_goal_position = None;
            self.state.retry_cooldown = 0;
            self.enter(SteeringPhase::Idle);
            return;
        };

        let changed = self.state.goal.is_none_or(|current| current.id != goal.id);
        self.state.goal = Some(goal);
        if changed {
            debug!("goal changed to {:?} at {}", goal.id, goal.position);
            if goal.bounds.is_none() {
                debug!("goal {:?} has no bounds; using its position", goal.id);
            }
            self.state.reached = false;
            self.state.retry_cooldown = 0;
            self.state.sampled_goal_position = None;
            self.enter(SteeringPhase::Decelerating);
        }
    }

    fn tick(&mut self, pose: AgentPose, navigator: &dyn Navigator) -> SteeringOutput {
        let Some(goal) = self.state.goal else {
            self.enter(SteeringPhase::Idle);
            return SteeringOutput::default();
        };

        let mut no_path = false;
        let mut planned = false;
        if self.state.phase == SteeringPhase::Following && self.goal_moved(&goal) {
            debug!("goal {:?} moved to {}", goal.id, goal.position);
            self.state.reached = false;
            match self.config.goal_move_policy {
                GoalMovePolicy::Decelerate => self.enter(SteeringPhase::Decelerating),
                GoalMovePolicy::Replan => {
                    no_path = self.replan(pose.position, &goal, navigator).is_err();
                    planned = true;
                }
            }
        }

        // A failed re-plan starts its cooldown on the next tick.
        if self.state.phase == SteeringPhase::Decelerating && !planned {
            no_path = self.decelerate(pose, &goal, navigator);
        }

        if self.state.phase == SteeringPhase::Following {
            self.follow(pose, &goal);
        }
        self.output(no_path)
    }
}

/// Turn signal, in degrees, that points an agent at `pose` towards `target`.
///
/// The offset from the target back to the agent is taken in the agent's
/// frame, converted to an angle and shifted by the calibrated axis offset so
/// that a target straight ahead yields `0` and one to the right a positive
/// value. Angles beyond the clamp, which includes everything near straight
/// behind, snap to a full left turn so the sign cannot flicker between ticks.
///
/// # Examples
/// ```
/// use glam::Vec2;
/// use strider::{turn_signal, AgentPose, SteeringConfig};
/// let pose = AgentPose::new(Vec2::ZERO, 0.0);
/// let config = SteeringConfig::default();
/// assert!(turn_signal(pose, Vec2::new(0.0, 1.0), &config).abs() < 1e-4);
/// assert!((turn_signal(pose, Vec2::new(1.0, 0.0), &config) - 90.0).abs() < 1e-4);
/// assert_eq!(turn_signal(pose, Vec2::new(0.0, -1.0), &config), -150.0);
/// ```
#[must_use]
pub fn turn_signal(pose: AgentPose, target: Vec2, config: &SteeringConfig) -> f32 {
    let local = to_local(pose.position - target, pose.heading);
    let raw = local.y.atan2(local.x).to_degrees() + config.calibration.axis_offset_degrees;
    let wrapped = wrap_degrees(raw);
    let clamp = config.turn_clamp_degrees;
    let angle = if wrapped < -clamp || wrapped > clamp {
        clamp
    } else {
        wrapped
    };
    -angle
}

/// Ticks of deceleration needed to bring `initial` speed below `threshold`.
///
/// Equals `ceil(ln(threshold / initial) / ln(factor))`, or `0` when the speed
/// is already below the threshold.
///
/// # Examples
/// ```
/// use strider::steering::deceleration_ticks;
/// assert_eq!(deceleration_ticks(0.5, 0.95, 0.02), 63);
/// assert_eq!(deceleration_ticks(0.0, 0.95, 0.02), 0);
/// ```
#[must_use]
pub fn deceleration_ticks(initial: f32, factor: f32, threshold: f32) -> u32 {
    if initial < threshold || !(factor > 0.0 && factor < 1.0) {
        return 0;
    }
    let ratio = f64::from(threshold) / f64::from(initial);
    ceil_to_u32(ratio.ln() / f64::from(factor).ln())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::goal::{BoundingShape, GoalId};
    use crate::navigation::{DirectNavigator, MockNavigator};
    use approx::assert_relative_eq;
    use rstest::rstest;
    use std::cell::Cell;

    fn config() -> SteeringConfig {
        SteeringConfig {
            max_speed: 0.5,
            min_distance: 1.0,
            reached_margin: 0.0,
            ..SteeringConfig::default()
        }
    }

    fn controller(config: SteeringConfig) -> SteeringController {
        SteeringController::try_new(config).expect("valid config")
    }

    fn north() -> Goal {
        Goal::new(GoalId(1), Vec2::new(0.0, 10.0))
    }

    fn at(x: f32, y: f32) -> AgentPose {
        AgentPose::new(Vec2::new(x, y), 0.0)
    }

    #[test]
    fn idle_without_goal_never_queries() {
        let mut navigator = MockNavigator::new();
        navigator.expect_query_path().times(0);
        let mut steering = controller(config());
        let out = steering.tick(at(0.0, 0.0), &navigator);
        assert_eq!(out, SteeringOutput::default());
        assert_eq!(out.phase, SteeringPhase::Idle);
    }

    #[test]
    fn first_goal_plans_and_moves_on_the_same_tick() {
        let mut navigator = MockNavigator::new();
        navigator
            .expect_query_path()
            .times(1)
            .returning(|origin, goal| Ok(vec![origin, goal]));
        let mut steering = controller(config());
        steering.select_goal(Some(north()));
        assert_eq!(steering.phase(), SteeringPhase::Decelerating);

        let out = steering.tick(at(0.0, 0.0), &navigator);
        assert_eq!(out.phase, SteeringPhase::Following);
        assert_relative_eq!(out.speed, 0.5 * 6.0);
        assert_relative_eq!(out.direction, 0.0, epsilon = 1e-4);
        assert_eq!(steering.path().len(), 1000);
        // The lookahead sub-goal one unit ahead is inside the capture radius.
        assert_eq!(steering.state().progress, 110);
        let target = steering.target_sub().expect("sub-goal");
        assert_relative_eq!(target.x, 0.0, epsilon = 1e-4);
        assert_relative_eq!(target.y, 1.0, epsilon = 1e-4);
    }

    #[rstest]
    #[case::far(0.0, 0.5, false)]
    #[case::ramp(7.0, 0.4, false)]
    #[case::near(8.5, 0.1, false)]
    #[case::at_min_distance(9.0, 0.0, true)]
    #[case::inside_min_distance(9.5, 0.0, true)]
    fn speed_ramps_down_with_distance(
        #[case] start_y: f32,
        #[case] expected_speed: f32,
        #[case] reached: bool,
    ) {
        let mut steering = controller(config());
        steering.select_goal(Some(north()));
        let out = steering.tick(at(0.0, start_y), &DirectNavigator);
        assert_relative_eq!(out.speed, expected_speed * 6.0, epsilon = 1e-4);
        assert_eq!(out.reached, reached);
    }

    #[test]
    fn reached_margin_stops_early() {
        let mut steering = controller(SteeringConfig {
            reached_margin: 0.2,
            ..config()
        });
        steering.select_goal(Some(north()));
        let out = steering.tick(at(0.0, 8.85), &DirectNavigator);
        assert!(out.reached);
        assert_eq!(out.speed, 0.0);
    }

    #[test]
    fn distance_is_measured_to_bounds() {
        let mut steering = controller(config());
        steering.select_goal(Some(north().with_bounds(BoundingShape::Circle {
            center: Vec2::new(0.0, 10.0),
            radius: 2.0,
        })));
        let out = steering.tick(at(0.0, 6.0), &DirectNavigator);
        assert_relative_eq!(out.speed, 0.2 * 6.0, epsilon = 1e-4);
    }

    #[test]
    fn goal_switch_decelerates_before_replanning() {
        let queries = Cell::new(0_u32);
        let navigator = |origin: Vec2, goal: Vec2| -> Result<Vec<Vec2>, NavigationError> {
            queries.set(queries.get() + 1);
            Ok(vec![origin, goal])
        };
        let cfg = SteeringConfig {
            max_speed: 0.4,
            ..config()
        };
        let expected = deceleration_ticks(0.4, cfg.deceleration_factor, cfg.deceleration_stop_threshold);
        assert_eq!(expected, 59);

        let mut steering = controller(cfg);
        let pose = at(0.0, 0.0);
        steering.select_goal(Some(north()));
        for _ in 0..9 {
            let out = steering.tick(pose, &navigator);
            assert_relative_eq!(out.speed, 0.4 * 6.0, epsilon = 1e-4);
        }
        assert_eq!(queries.get(), 1);

        steering.select_goal(Some(Goal::new(GoalId(2), Vec2::new(10.0, 0.0))));
        let mut speed = 0.4_f32;
        for k in 1..expected {
            let out = steering.tick(pose, &navigator);
            speed *= 0.95;
            assert_eq!(out.phase, SteeringPhase::Decelerating, "tick {k}");
            assert_eq!(out.direction, 0.0);
            assert_relative_eq!(out.speed, speed * 6.0, epsilon = 1e-4);
            assert!(speed >= 0.02);
            assert_eq!(queries.get(), 1, "re-planned early at deceleration tick {k}");
        }

        let out = steering.tick(pose, &navigator);
        assert_eq!(queries.get(), 2);
        assert_eq!(out.phase, SteeringPhase::Following);
        assert_eq!(steering.path().last().map(|p| p.y), Some(0.0));
        assert_eq!(steering.state().progress, 110);
        assert_relative_eq!(out.direction, 90.0, epsilon = 1e-3);
    }

    #[test]
    fn reselecting_the_same_goal_is_not_a_change() {
        let mut steering = controller(config());
        steering.select_goal(Some(north()));
        steering.tick(at(0.0, 0.0), &DirectNavigator);
        steering.select_goal(Some(north()));
        let out = steering.tick(at(0.0, 0.0), &DirectNavigator);
        assert_eq!(out.phase, SteeringPhase::Following);
        assert_relative_eq!(out.speed, 3.0);
    }

    #[test]
    fn moved_goal_decelerates_by_default() {
        let mut steering = controller(config());
        steering.select_goal(Some(north()));
        steering.tick(at(0.0, 0.0), &DirectNavigator);

        let mut moved = north();
        moved.position.x += 0.5;
        steering.select_goal(Some(moved));
        let out = steering.tick(at(0.0, 0.0), &DirectNavigator);
        assert_eq!(out.phase, SteeringPhase::Decelerating);
        assert_relative_eq!(out.speed, 0.5 * 0.95 * 6.0, epsilon = 1e-4);
    }

    #[test]
    fn tiny_goal_jitter_is_ignored() {
        let mut steering = controller(config());
        steering.select_goal(Some(north()));
        steering.tick(at(0.0, 0.0), &DirectNavigator);

        let mut nudged = north();
        nudged.position.x += 0.005;
        steering.select_goal(Some(nudged));
        let out = steering.tick(at(0.0, 0.0), &DirectNavigator);
        assert_eq!(out.phase, SteeringPhase::Following);
    }

    #[test]
    fn slow_drift_accumulates_until_it_counts_as_a_move() {
        let mut steering = controller(config());
        steering.select_goal(Some(north()));
        steering.tick(at(0.0, 0.0), &DirectNavigator);

        let mut drifting = north();
        let mut phases = Vec::new();
        for _ in 0..3 {
            drifting.position.x += 0.004;
            steering.select_goal(Some(drifting));
            phases.push(steering.tick(at(0.0, 0.0), &DirectNavigator).phase);
        }
        assert_eq!(
            phases,
            vec![
                SteeringPhase::Following,
                SteeringPhase::Following,
                SteeringPhase::Decelerating
            ]
        );
    }

    #[test]
    fn moving_a_reached_goal_out_of_reach_clears_reached() {
        let navigator = |origin: Vec2, goal: Vec2| -> Result<Vec<Vec2>, NavigationError> {
            if goal.y > 20.0 {
                Err(NavigationError::NoPathFound { origin, goal })
            } else {
                Ok(vec![origin, goal])
            }
        };
        let mut steering = controller(config());
        steering.select_goal(Some(north()));
        let arrived = steering.tick(at(0.0, 9.0), &navigator);
        assert!(arrived.reached);

        let mut moved = north();
        moved.position.y = 30.0;
        steering.select_goal(Some(moved));
        for tick in 0..70 {
            let out = steering.tick(at(0.0, 9.0), &navigator);
            assert!(!out.reached, "still reached on tick {tick}");
            assert!(out.no_path, "tick {tick}");
        }
    }

    #[rstest]
    #[case::decelerate(GoalMovePolicy::Decelerate)]
    #[case::replan(GoalMovePolicy::Replan)]
    fn failed_replans_retry_on_the_same_cadence(#[case] goal_move_policy: GoalMovePolicy) {
        let queries = Cell::new(0_u32);
        let navigator = |origin: Vec2, goal: Vec2| -> Result<Vec<Vec2>, NavigationError> {
            queries.set(queries.get() + 1);
            if queries.get() == 1 {
                Ok(vec![origin, goal])
            } else {
                Err(NavigationError::NoPathFound { origin, goal })
            }
        };
        let mut steering = controller(SteeringConfig {
            no_path_retry_ticks: 3,
            goal_move_policy,
            ..config()
        });
        steering.select_goal(Some(north()));
        steering.tick(at(0.0, 9.0), &navigator);

        let mut moved = north();
        moved.position.x = 4.0;
        steering.select_goal(Some(moved));
        let mut query_ticks = Vec::new();
        for tick in 0..12 {
            let before = queries.get();
            steering.tick(at(0.0, 9.0), &navigator);
            if queries.get() > before {
                query_ticks.push(tick);
            }
        }
        assert_eq!(query_ticks, vec![0, 4, 8]);
    }

    #[test]
    fn replan_policy_keeps_walking() {
        let queries = Cell::new(0_u32);
        let navigator = |origin: Vec2, goal: Vec2| -> Result<Vec<Vec2>, NavigationError> {
            queries.set(queries.get() + 1);
            Ok(vec![origin, goal])
        };
        let mut steering = controller(SteeringConfig {
            goal_move_policy: GoalMovePolicy::Replan,
            ..config()
        });
        steering.select_goal(Some(north()));
        steering.tick(at(0.0, 0.0), &navigator);

        let mut moved = north();
        moved.position.x += 0.5;
        steering.select_goal(Some(moved));
        let out = steering.tick(at(0.0, 0.0), &navigator);
        assert_eq!(queries.get(), 2);
        assert_eq!(out.phase, SteeringPhase::Following);
        assert_relative_eq!(out.speed, 3.0);
        assert_eq!(steering.path().last().map(|p| p.x > 0.0), Some(true));
    }

    #[test]
    fn unreachable_goal_holds_still_and_retries_on_a_timer() {
        let queries = Cell::new(0_u32);
        let navigator = |origin: Vec2, goal: Vec2| -> Result<Vec<Vec2>, NavigationError> {
            queries.set(queries.get() + 1);
            Err(NavigationError::NoPathFound { origin, goal })
        };
        let mut steering = controller(SteeringConfig {
            no_path_retry_ticks: 3,
            ..config()
        });
        steering.select_goal(Some(north()));

        let out = steering.tick(at(0.0, 0.0), &navigator);
        assert!(out.no_path);
        assert_eq!(out.speed, 0.0);
        assert_eq!(out.phase, SteeringPhase::Decelerating);
        assert!(steering.path().is_empty());
        assert_eq!(queries.get(), 1);

        for _ in 0..3 {
            let waiting = steering.tick(at(0.0, 0.0), &navigator);
            assert!(waiting.no_path);
        }
        assert_eq!(queries.get(), 1);
        steering.tick(at(0.0, 0.0), &navigator);
        assert_eq!(queries.get(), 2);
    }

    #[test]
    fn exhausted_path_stops_without_reaching() {
        // The surface only leads two units towards a goal ten units away.
        let navigator = |origin: Vec2, _: Vec2| -> Result<Vec<Vec2>, NavigationError> {
            Ok(vec![origin, Vec2::new(0.0, 2.0)])
        };
        let mut steering = controller(config());
        steering.select_goal(Some(north()));
        steering.tick(at(0.0, 0.0), &navigator);

        let mut last = SteeringOutput::default();
        for _ in 0..20 {
            last = steering.tick(at(0.0, 2.0), &navigator);
        }
        assert!(steering.state().path_exhausted());
        assert_eq!(last.speed, 0.0);
        assert!(!last.reached);
        assert_eq!(last.phase, SteeringPhase::Following);
    }

    #[test]
    fn short_path_targets_its_end() {
        let mut steering = controller(SteeringConfig {
            min_distance: 0.0,
            ..config()
        });
        steering.select_goal(Some(Goal::new(GoalId(4), Vec2::new(0.0, 0.6))));
        let out = steering.tick(at(0.0, 0.0), &DirectNavigator);
        assert_eq!(steering.path().len(), 60);
        assert_eq!(steering.target_sub(), steering.path().last().copied());
        assert_relative_eq!(out.direction, 0.0, epsilon = 1e-3);
    }

    #[test]
    fn clearing_the_goal_goes_idle() {
        let mut steering = controller(config());
        steering.select_goal(Some(north()));
        steering.tick(at(0.0, 0.0), &DirectNavigator);
        steering.select_goal(None);
        let out = steering.tick(at(0.0, 0.0), &DirectNavigator);
        assert_eq!(out.phase, SteeringPhase::Idle);
        assert!(steering.path().is_empty());
    }

    #[test]
    fn target_behind_turns_left() {
        let mut steering = controller(config());
        steering.select_goal(Some(north()));
        let out = steering.tick(AgentPose::new(Vec2::ZERO, 180.0), &DirectNavigator);
        assert_eq!(out.direction, -150.0);
    }

    #[test]
    fn turn_signal_stays_clamped() {
        let config = config();
        for step in 0_u16..720 {
            let heading = f32::from(step) * 0.5;
            let pose = AgentPose::new(Vec2::new(1.0, -2.0), heading);
            for target in [Vec2::new(1.0, 3.0), Vec2::new(-4.0, -2.0), Vec2::new(1.5, -7.0)] {
                let direction = turn_signal(pose, target, &config);
                assert!(
                    (-150.0..=150.0).contains(&direction),
                    "heading {heading}: {direction}"
                );
            }
        }
    }

    #[test]
    fn nearly_behind_targets_never_flicker() {
        let config = config();
        let pose = AgentPose::new(Vec2::ZERO, 0.0);
        for x in [-0.2_f32, -0.05, 0.0, 0.05, 0.2] {
            let direction = turn_signal(pose, Vec2::new(x, -1.0), &config);
            assert_eq!(direction, -150.0, "target x {x}");
        }
    }

    #[test]
    fn clamp_is_configurable() {
        let config = SteeringConfig {
            turn_clamp_degrees: 120.0,
            ..config()
        };
        let pose = AgentPose::new(Vec2::ZERO, 0.0);
        assert_eq!(turn_signal(pose, Vec2::new(1.0, -1.0), &config), -120.0);
    }

    #[rstest]
    #[case::walking(0.5, 63)]
    #[case::running(1.0, 77)]
    #[case::already_slow(0.01, 0)]
    fn deceleration_matches_simulation(#[case] initial: f32, #[case] ticks: u32) {
        assert_eq!(deceleration_ticks(initial, 0.95, 0.02), ticks);
        let mut speed = initial;
        let mut simulated = 0;
        while speed >= 0.02 {
            speed *= 0.95;
            simulated += 1;
        }
        assert_eq!(simulated, ticks);
    }
}
