//! Ready-made walks driven through a [`KinematicBody`].

use glam::Vec2;
use strider::{
    AgentPose, Goal, GoalId, GuidedWalker, KinematicBody, Navigator, SteeringConfig,
    SteeringOutput,
};

/// Outcome of [`walk_until_reached`].
#[derive(Debug, Clone)]
pub struct WalkResult {
    /// Tick on which the goal was reached, if it was.
    pub reached_at: Option<u32>,
    /// Pose after the last tick.
    pub final_pose: AgentPose,
    /// Controller output of every tick walked.
    pub outputs: Vec<SteeringOutput>,
}

/// Walks a body from `start` towards `goal` for at most `max_ticks` ticks.
///
/// # Panics
/// Panics if `config` is invalid.
pub fn walk_until_reached<N: Navigator>(
    config: SteeringConfig,
    navigator: N,
    start: AgentPose,
    goal: Goal,
    max_ticks: u32,
) -> WalkResult {
    let mut walker = GuidedWalker::new(config, navigator, KinematicBody::at(start))
        .expect("test config must be valid");
    let mut outputs = Vec::new();
    let mut reached_at = None;
    for tick in 0..max_ticks {
        let pose = walker.actuator().pose;
        let reached = walker.walk_to(Some(goal), pose);
        outputs.push(walker.last_output());
        if reached {
            reached_at = Some(tick);
            break;
        }
    }
    WalkResult {
        reached_at,
        final_pose: walker.actuator().pose,
        outputs,
    }
}

/// Walks from the origin, facing `+y`, to a goal at `(0, distance)`.
///
/// # Examples
/// ```
/// use test_utils::straight_walk;
/// let walk = straight_walk(4.0, strider::SteeringConfig::default());
/// assert!(walk.reached_at.is_some());
/// ```
pub fn straight_walk(distance: f32, config: SteeringConfig) -> WalkResult {
    walk_until_reached(
        config,
        strider::DirectNavigator,
        AgentPose::new(Vec2::ZERO, 0.0),
        Goal::new(GoalId(1), Vec2::new(0.0, distance)),
        1000,
    )
}
