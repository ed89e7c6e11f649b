//! Bevy integration for steering walkers.
//!
//! [`SteeringPlugin`] registers [`steer_walkers_system`], which steps the
//! controller of every entity carrying a [`Walker`], a [`Pose`] and a
//! [`Locomotion`] once per frame. The walkable surface is supplied through
//! the [`NavigationMesh`] resource; when the app does not provide one the
//! plugin falls back to open floor.

use bevy::prelude::*;
use log::debug;

use crate::actuator::{AgentPose, LocomotionCommand};
use crate::config::{ConfigError, SteeringConfig};
use crate::goal::{Goal, GoalCommand, GoalSlots};
use crate::navigation::{DirectNavigator, Navigator};
use crate::steering::{Steering, SteeringController, SteeringOutput};

/// Bevy plugin that drives [`Walker`] entities.
#[derive(Default)]
pub struct SteeringPlugin;

impl Plugin for SteeringPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<NavigationMesh>()
            .add_systems(Update, steer_walkers_system);
    }
}

/// Walkable-surface solver shared by all walkers.
#[derive(Resource)]
pub struct NavigationMesh(pub Box<dyn Navigator + Send + Sync>);

impl NavigationMesh {
    /// Wraps `navigator` as a resource.
    pub fn new(navigator: impl Navigator + Send + Sync + 'static) -> Self {
        Self(Box::new(navigator))
    }
}

impl Default for NavigationMesh {
    fn default() -> Self {
        Self::new(DirectNavigator)
    }
}

/// Steering state of an agent together with the goals it can walk to.
///
/// Goal commands issued between frames are queued and resolved by
/// [`steer_walkers_system`] on the next frame.
#[derive(Component, Debug, Clone, Default)]
pub struct Walker {
    controller: SteeringController,
    slots: GoalSlots,
    pending: Vec<GoalCommand>,
}

impl Walker {
    /// Creates a walker choosing between `slots`, without an active goal.
    ///
    /// # Errors
    /// Returns [`ConfigError`] when `config` fails validation.
    pub fn new(config: SteeringConfig, slots: GoalSlots) -> Result<Self, ConfigError> {
        Ok(Self {
            controller: SteeringController::try_new(config)?,
            slots,
            pending: Vec::new(),
        })
    }

    /// Queues `command` for the next frame.
    pub fn issue(&mut self, command: GoalCommand) {
        self.pending.push(command);
    }

    /// Goal the walker is currently heading for.
    #[must_use]
    pub const fn goal(&self) -> Option<&Goal> {
        self.slots.current()
    }

    /// Goal slots, for placing or moving goals between frames.
    pub const fn slots_mut(&mut self) -> &mut GoalSlots {
        &mut self.slots
    }

    /// The walker's steering controller.
    #[must_use]
    pub const fn controller(&self) -> &SteeringController {
        &self.controller
    }
}

/// Planar pose of a walker, written by whatever moves the agent.
#[derive(Component, Debug, Clone, Copy, Default, PartialEq)]
pub struct Pose(pub AgentPose);

/// Latest locomotion request for the animation rig.
#[derive(Component, Debug, Clone, Copy, Default, PartialEq)]
pub struct Locomotion {
    /// `None` while the walker has no goal; the rig should not be driven.
    pub command: Option<LocomotionCommand>,
    /// Full controller output of the last frame.
    pub output: SteeringOutput,
}

/// Steps every walker's controller and publishes its locomotion command.
pub fn steer_walkers_system(
    navigation: Res<NavigationMesh>,
    mut walkers: Query<(Entity, &mut Walker, &Pose, &mut Locomotion)>,
) {
    let navigator: &dyn Navigator = navigation.0.as_ref();
    for (entity, mut walker, pose, mut locomotion) in &mut walkers {
        let Walker {
            controller,
            slots,
            pending,
        } = &mut *walker;
        let goal = slots.apply(pending);
        pending.clear();
        controller.select_goal(goal);
        let output = controller.tick(pose.0, navigator);
        if output.no_path {
            debug!("walker {entity:?} has no path to its goal");
        }
        locomotion.output = output;
        locomotion.command = goal.map(|_| output.command());
    }
}
