//! Speed and direction steering towards a goal along a smoothed path.
//!
//! [`SteeringController`] owns the state machine; [`AutonomousWalker`] and
//! [`GuidedWalker`] are the two ways of driving it, from explicit per-tick
//! goal commands or from an orchestrator that names the goal every tick.

pub mod controller;
pub mod state;
pub mod walker;

pub use controller::{
    deceleration_ticks, turn_signal, Steering, SteeringController, SteeringOutput,
};
pub use state::{SteeringPhase, SteeringState};
pub use walker::{AutonomousWalker, GuidedWalker};
