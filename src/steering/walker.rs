//! Drivers that connect a [`SteeringController`] to its collaborators.
//!
//! Both walkers run the same tick: hand the goal to the controller, step the
//! state machine against the navigator, and forward the command to the
//! actuator while a goal is active. They differ only in where the goal comes
//! from.

use crate::actuator::{Actuator, AgentPose};
use crate::config::{ConfigError, SteeringConfig};
use crate::goal::{Goal, GoalCommand, GoalSlots};
use crate::navigation::Navigator;

use super::controller::{Steering, SteeringController, SteeringOutput};

fn step<N, A>(
    controller: &mut SteeringController,
    navigator: &N,
    actuator: &mut A,
    goal: Option<Goal>,
    pose: AgentPose,
) -> SteeringOutput
where
    N: Navigator,
    A: Actuator,
{
    let active = goal.is_some();
    controller.select_goal(goal);
    let output = controller.tick(pose, navigator);
    if active {
        actuator.drive(output.command());
    }
    output
}

/// Walker that chooses its own goal from per-tick slot commands.
#[derive(Debug)]
pub struct AutonomousWalker<N, A> {
    controller: SteeringController,
    navigator: N,
    actuator: A,
    slots: GoalSlots,
}

impl<N: Navigator, A: Actuator> AutonomousWalker<N, A> {
    /// Creates an idle walker.
    ///
    /// # Errors
    /// Returns [`ConfigError`] when `config` fails validation.
    pub fn new(
        config: SteeringConfig,
        navigator: N,
        actuator: A,
        slots: GoalSlots,
    ) -> Result<Self, ConfigError> {
        Ok(Self {
            controller: SteeringController::try_new(config)?,
            navigator,
            actuator,
            slots,
        })
    }

    /// Applies `commands` to the goal slots and runs one steering tick.
    pub fn tick(&mut self, pose: AgentPose, commands: &[GoalCommand]) -> SteeringOutput {
        let goal = self.slots.apply(commands);
        step(
            &mut self.controller,
            &self.navigator,
            &mut self.actuator,
            goal,
            pose,
        )
    }

    /// The underlying controller.
    #[must_use]
    pub const fn controller(&self) -> &SteeringController {
        &self.controller
    }

    /// Goal slots and the current selection.
    #[must_use]
    pub const fn slots(&self) -> &GoalSlots {
        &self.slots
    }

    /// Slots are mutable between ticks so goals can be placed or moved.
    pub const fn slots_mut(&mut self) -> &mut GoalSlots {
        &mut self.slots
    }

    /// The driven actuator.
    #[must_use]
    pub const fn actuator(&self) -> &A {
        &self.actuator
    }

    /// Mutable access to the actuator, e.g. to reposition a body.
    pub const fn actuator_mut(&mut self) -> &mut A {
        &mut self.actuator
    }

    /// Navigator used for planning.
    #[must_use]
    pub const fn navigator(&self) -> &N {
        &self.navigator
    }
}

/// Walker whose goal is named every tick by an external orchestrator.
#[derive(Debug)]
pub struct GuidedWalker<N, A> {
    controller: SteeringController,
    navigator: N,
    actuator: A,
    last: SteeringOutput,
}

impl<N: Navigator, A: Actuator> GuidedWalker<N, A> {
    /// Creates an idle walker.
    ///
    /// # Errors
    /// Returns [`ConfigError`] when `config` fails validation.
    pub fn new(config: SteeringConfig, navigator: N, actuator: A) -> Result<Self, ConfigError> {
        Ok(Self {
            controller: SteeringController::try_new(config)?,
            navigator,
            actuator,
            last: SteeringOutput::default(),
        })
    }

    /// Walks one tick towards `goal` and reports whether it has been reached.
    pub fn walk_to(&mut self, goal: Option<Goal>, pose: AgentPose) -> bool {
        self.last = step(
            &mut self.controller,
            &self.navigator,
            &mut self.actuator,
            goal,
            pose,
        );
        self.last.reached
    }

    /// Output of the most recent [`walk_to`](Self::walk_to).
    #[must_use]
    pub const fn last_output(&self) -> SteeringOutput {
        self.last
    }

    /// The underlying controller.
    #[must_use]
    pub const fn controller(&self) -> &SteeringController {
        &self.controller
    }

    /// The driven actuator.
    #[must_use]
    pub const fn actuator(&self) -> &A {
        &self.actuator
    }

    /// Mutable access to the actuator.
    pub const fn actuator_mut(&mut self) -> &mut A {
        &mut self.actuator
    }
}
