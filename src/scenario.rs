//! Headless walking scenarios.
//!
//! A [`Scenario`] describes one agent on open floor (optionally routed
//! through a fixed corridor), its goal slots, and a timeline of goal commands
//! and goal movements. [`Scenario::run`] plays it through an
//! [`AutonomousWalker`] whose actuator is a [`KinematicBody`] and summarises
//! what happened in a [`ScenarioReport`].

use std::fs;
use std::path::{Path, PathBuf};

use glam::Vec2;
use log::{debug, info};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::actuator::{AgentPose, KinematicBody};
use crate::config::{ConfigError, SteeringConfig};
use crate::goal::{BoundingShape, Goal, GoalCommand, GoalId, GoalSlots};
use crate::navigation::CorridorNavigator;
use crate::steering::{AutonomousWalker, SteeringOutput, SteeringPhase};

/// Failures while loading or running a scenario.
#[derive(Debug, Error)]
pub enum ScenarioError {
    /// The scenario file could not be read.
    #[error("failed to read scenario {path}: {source}")]
    Io {
        /// File that was being read.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },
    /// The JSON does not describe a scenario.
    #[error("invalid scenario: {0}")]
    Parse(#[from] serde_json::Error),
    /// The embedded steering configuration is invalid.
    #[error("invalid steering config: {0}")]
    Config(#[from] ConfigError),
    /// An event names a slot past the end of `goals`.
    #[error("event at tick {tick} refers to unknown goal slot {slot}")]
    UnknownSlot {
        /// Tick of the offending event.
        tick: u32,
        /// Slot it refers to.
        slot: usize,
    },
}

/// Something that happens to the goal slots at a given tick.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum EventAction {
    /// Selects the goal in `slot`.
    Select {
        /// Goal slot to walk to.
        slot: usize,
    },
    /// Clears the current goal.
    Clear,
    /// Moves the goal in `slot` without changing its identity.
    MoveGoal {
        /// Goal slot to move.
        slot: usize,
        /// New planar position.
        position: Vec2,
    },
}

/// Timeline entry of a [`Scenario`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScenarioEvent {
    /// Tick the event fires on, before the controller runs.
    pub tick: u32,
    /// What happens.
    #[serde(flatten)]
    pub action: EventAction,
}

impl ScenarioEvent {
    const fn command(&self) -> Option<GoalCommand> {
        match self.action {
            EventAction::Select { slot } => Some(GoalCommand::Select(slot)),
            EventAction::Clear => Some(GoalCommand::Clear),
            EventAction::MoveGoal { .. } => None,
        }
    }

    const fn slot(&self) -> Option<usize> {
        match self.action {
            EventAction::Select { slot } | EventAction::MoveGoal { slot, .. } => Some(slot),
            EventAction::Clear => None,
        }
    }
}

const fn default_ticks() -> u32 {
    1000
}

/// A scripted walk.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scenario {
    /// Steering configuration; defaults apply to missing fields.
    #[serde(default)]
    pub config: SteeringConfig,
    /// Starting pose and turn response of the agent.
    #[serde(default)]
    pub body: KinematicBody,
    /// Goal slots; `null` entries are empty slots.
    #[serde(default)]
    pub goals: Vec<Option<Goal>>,
    /// Corners every path is routed through, in order.
    #[serde(default)]
    pub corridor: Vec<Vec2>,
    /// Timeline of goal changes.
    #[serde(default)]
    pub events: Vec<ScenarioEvent>,
    /// Ticks to play when the caller gives no override.
    #[serde(default = "default_ticks")]
    pub ticks: u32,
}

/// Summary of a scenario run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScenarioReport {
    /// Ticks that were played.
    pub ticks_run: u32,
    /// Pose of the body after the last tick.
    pub final_pose: AgentPose,
    /// Controller phase after the last tick.
    pub final_phase: SteeringPhase,
    /// Ticks at which a goal was first reached, one entry per arrival.
    pub arrivals: Vec<(u32, GoalId)>,
    /// Ticks on which the active goal had no path.
    pub no_path_ticks: u32,
    /// Largest absolute turn signal emitted.
    pub max_turn: f32,
    /// Per-tick controller output.
    pub trace: Vec<SteeringOutput>,
    /// Path being tracked when the run ended.
    pub path: Vec<Vec2>,
}

impl ScenarioReport {
    /// `true` when `goal` was reached at least once.
    #[must_use]
    pub fn reached(&self, goal: GoalId) -> bool {
        self.arrivals.iter().any(|(_, id)| *id == goal)
    }
}

impl Scenario {
    /// Parses a scenario from JSON text.
    ///
    /// # Errors
    /// Returns [`ScenarioError::Parse`] for malformed JSON and the
    /// [`validate`](Self::validate) errors for inconsistent content.
    pub fn from_json(text: &str) -> Result<Self, ScenarioError> {
        let scenario: Self = serde_json::from_str(text)?;
        scenario.validate()?;
        Ok(scenario)
    }

    /// Reads and parses a scenario file.
    ///
    /// # Errors
    /// Returns [`ScenarioError::Io`] when the file cannot be read, otherwise
    /// as [`from_json`](Self::from_json).
    pub fn from_path(path: &Path) -> Result<Self, ScenarioError> {
        let text = fs::read_to_string(path).map_err(|source| ScenarioError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&text)
    }

    /// Checks the config and that every event names an existing slot.
    ///
    /// # Errors
    /// Returns [`ScenarioError::Config`] or [`ScenarioError::UnknownSlot`].
    pub fn validate(&self) -> Result<(), ScenarioError> {
        self.config.validate()?;
        for event in &self.events {
            if let Some(slot) = event.slot() {
                if slot >= self.goals.len() {
                    return Err(ScenarioError::UnknownSlot {
                        tick: event.tick,
                        slot,
                    });
                }
            }
        }
        Ok(())
    }

    /// Walks to three goals in turn, the last two with bounds.
    #[must_use]
    pub fn demo() -> Self {
        let goals = vec![
            Some(Goal::new(GoalId(1), Vec2::new(0.0, 8.0))),
            Some(
                Goal::new(GoalId(2), Vec2::new(6.0, 8.0)).with_bounds(BoundingShape::Circle {
                    center: Vec2::new(6.0, 8.0),
                    radius: 0.5,
                }),
            ),
            Some(
                Goal::new(GoalId(3), Vec2::new(6.0, 0.0)).with_bounds(BoundingShape::Aabb {
                    min: Vec2::new(5.0, -0.5),
                    max: Vec2::new(7.0, 0.5),
                }),
            ),
        ];
        let select = |tick, slot| ScenarioEvent {
            tick,
            action: EventAction::Select { slot },
        };
        Self {
            config: SteeringConfig::default(),
            body: KinematicBody::default(),
            goals,
            corridor: Vec::new(),
            events: vec![select(0, 0), select(700, 1), select(1400, 2)],
            ticks: 2100,
        }
    }

    /// Plays the scenario for `ticks` ticks, or its own tick count.
    ///
    /// # Errors
    /// Returns the [`validate`](Self::validate) errors; the walk itself
    /// cannot fail.
    pub fn run(&self, ticks: Option<u32>) -> Result<ScenarioReport, ScenarioError> {
        self.validate()?;
        let tick_count = ticks.unwrap_or(self.ticks);

        let mut slots = GoalSlots::with_capacity(self.goals.len());
        for (slot, goal) in self.goals.iter().enumerate() {
            slots.assign(slot, *goal);
        }
        let mut walker = AutonomousWalker::new(
            self.config.clone(),
            CorridorNavigator::new(self.corridor.clone()),
            self.body,
            slots,
        )?;

        let mut report = ScenarioReport {
            ticks_run: tick_count,
            final_pose: self.body.pose,
            final_phase: SteeringPhase::Idle,
            arrivals: Vec::new(),
            no_path_ticks: 0,
            max_turn: 0.0,
            trace: Vec::with_capacity(usize::try_from(tick_count).unwrap_or_default()),
            path: Vec::new(),
        };
        let mut was_reached = false;
        for tick in 0..tick_count {
            let mut commands = Vec::new();
            for event in self.events.iter().filter(|e| e.tick == tick) {
                if let EventAction::MoveGoal { slot, position } = event.action {
                    debug!("tick {tick}: goal slot {slot} moves to {position}");
                    walker.slots_mut().update_position(slot, position);
                }
                commands.extend(event.command());
            }

            let pose = walker.actuator().pose;
            let output = walker.tick(pose, &commands);
            if output.reached && !was_reached {
                if let Some(goal) = walker.slots().current() {
                    report.arrivals.push((tick, goal.id));
                }
            }
            was_reached = output.reached;
            if output.no_path {
                report.no_path_ticks += 1;
            }
            report.max_turn = report.max_turn.max(output.direction.abs());
            report.trace.push(output);
        }

        report.final_pose = walker.actuator().pose;
        report.final_phase = walker.controller().phase();
        report.path = walker.controller().path().to_vec();
        info!(
            "scenario finished after {tick_count} ticks at {} heading {:.1}; {} arrival(s)",
            report.final_pose.position,
            report.final_pose.heading,
            report.arrivals.len()
        );
        Ok(report)
    }
}
