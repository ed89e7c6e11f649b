#![cfg_attr(docsrs, feature(doc_cfg))]
//! Goal-directed walking for humanoid agents.
//!
//! Turns corner paths from a walkable-surface solver into dense smoothed
//! paths and steers an agent along them with a speed and turn signal for its
//! locomotion rig. See [`SteeringController`] for the state machine and
//! [`path_smoothing`] for the smoother.
pub mod actuator;
pub mod config;
pub mod constants;
pub mod goal;
pub mod logging;
pub mod navigation;
pub mod numeric;
pub mod path_smoothing;
pub mod plugin;
pub mod scenario;
pub mod steering;
pub mod vector_math;
pub use constants::*;

// Re-export commonly used items
pub use actuator::{Actuator, AgentPose, KinematicBody, LocomotionCommand, RecordingActuator};
pub use config::{ActuatorCalibration, ConfigError, GoalMovePolicy, SteeringConfig};
pub use goal::{BoundingShape, Goal, GoalCommand, GoalId, GoalSlots};
pub use logging::init as init_logging;
pub use navigation::{plan_path, CorridorNavigator, DirectNavigator, NavigationError, Navigator};
pub use path_smoothing::{densify, smooth};
pub use plugin::{steer_walkers_system, Locomotion, NavigationMesh, Pose, SteeringPlugin, Walker};
pub use scenario::{Scenario, ScenarioError, ScenarioReport};
pub use steering::{
    deceleration_ticks, turn_signal, AutonomousWalker, GuidedWalker, Steering, SteeringController,
    SteeringOutput, SteeringPhase, SteeringState,
};

pub mod prelude {
    //! Prelude exports used in documentation examples.
    //!
    //! ```rust,no_run
    //! use strider::prelude::*;
    //! ```

    pub use crate::AgentPose;
    pub use crate::DirectNavigator;
    pub use crate::Goal;
    pub use crate::GoalId;
    pub use crate::Steering;
    pub use crate::SteeringConfig;
    pub use crate::SteeringController;
    pub use glam::Vec2;
}
