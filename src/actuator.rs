//! Locomotion actuator seam.
//!
//! The animation rig consumes one `(speed, direction)` pair per tick and
//! acknowledges nothing. [`KinematicBody`] stands in for a rig in headless
//! runs by integrating those commands into a pose.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::vector_math::{heading_vector, wrap_degrees};
use crate::TICKS_PER_SECOND;

/// Command handed to the actuator once per tick while a goal is active.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct LocomotionCommand {
    /// Calibrated speed, `>= 0`.
    pub speed: f32,
    /// Turn signal in degrees; positive turns right.
    pub direction: f32,
}

/// Consumer of locomotion commands.
#[cfg_attr(test, mockall::automock)]
pub trait Actuator {
    /// Drives the rig for one tick.
    fn drive(&mut self, command: LocomotionCommand);
}

/// Keeps every command it receives, in order.
#[derive(Debug, Clone, Default)]
pub struct RecordingActuator {
    /// Commands in the order they were driven.
    pub commands: Vec<LocomotionCommand>,
}

impl RecordingActuator {
    /// Most recent command, if any was issued.
    #[must_use]
    pub fn last(&self) -> Option<&LocomotionCommand> {
        self.commands.last()
    }
}

impl Actuator for RecordingActuator {
    fn drive(&mut self, command: LocomotionCommand) {
        self.commands.push(command);
    }
}

/// Position and facing of an agent on the walkable plane.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct AgentPose {
    /// Planar position.
    pub position: Vec2,
    /// Yaw in degrees, clockwise seen from above, `0` facing planar `+y`.
    pub heading: f32,
}

impl AgentPose {
    /// Creates a pose at `position` facing `heading` degrees.
    #[must_use]
    pub const fn new(position: Vec2, heading: f32) -> Self {
        Self { position, heading }
    }
}

/// Minimal stand-in for an animation rig.
///
/// Each tick the heading turns by `direction * turn_response` degrees and the
/// body advances `speed * units_per_speed / TICKS_PER_SECOND` along the new
/// heading. The defaults convert the calibrated speed scale of 6 back to
/// 0.1 units per tick at full internal speed.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct KinematicBody {
    /// Current pose, advanced by every command.
    pub pose: AgentPose,
    /// Fraction of the commanded turn applied per tick.
    pub turn_response: f32,
    /// Units per second travelled per unit of calibrated speed.
    pub units_per_speed: f32,
}

impl Default for KinematicBody {
    fn default() -> Self {
        Self {
            pose: AgentPose::default(),
            turn_response: 0.1,
            units_per_speed: 1.0,
        }
    }
}

impl KinematicBody {
    /// Places a body with default response at `pose`.
    #[must_use]
    pub fn at(pose: AgentPose) -> Self {
        Self {
            pose,
            ..Self::default()
        }
    }
}

impl Actuator for KinematicBody {
    fn drive(&mut self, command: LocomotionCommand) {
        let turn = command.direction * self.turn_response;
        self.pose.heading = wrap_degrees(self.pose.heading + turn);
        let step = command.speed.max(0.0) * self.units_per_speed / TICKS_PER_SECOND;
        self.pose.position += heading_vector(self.pose.heading) * step;
    }
}
