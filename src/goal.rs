//! Goals and the per-tick goal selection source.
//!
//! A [`Goal`] is compared by [`GoalId`], never by position: two goals at the
//! same spot are still different destinations. Movement of the active goal is
//! tracked separately by the steering controller.

use glam::Vec2;
use log::debug;
use serde::{Deserialize, Serialize};

/// Stable identity of a goal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct GoalId(pub u64);

impl From<u64> for GoalId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

/// Planar extent of a goal object.
///
/// Agents stop in front of the shape rather than in front of its centre.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "shape", rename_all = "snake_case")]
pub enum BoundingShape {
    /// Axis-aligned box given by its minimum and maximum corners.
    Aabb {
        /// Lower-left corner.
        min: Vec2,
        /// Upper-right corner.
        max: Vec2,
    },
    /// Disc around `center`.
    Circle {
        /// Centre of the disc.
        center: Vec2,
        /// Radius; negative values act as zero.
        radius: f32,
    },
}

impl BoundingShape {
    /// Returns the point of the shape closest to `from`.
    ///
    /// Points inside the shape are returned unchanged.
    ///
    /// # Examples
    /// ```
    /// use glam::Vec2;
    /// use strider::goal::BoundingShape;
    /// let table = BoundingShape::Aabb { min: Vec2::new(-1.0, 4.0), max: Vec2::new(1.0, 6.0) };
    /// assert_eq!(table.closest_point(Vec2::ZERO), Vec2::new(0.0, 4.0));
    /// ```
    #[must_use]
    pub fn closest_point(&self, from: Vec2) -> Vec2 {
        match *self {
            Self::Aabb { min, max } => from.clamp(min.min(max), max.max(min)),
            Self::Circle { center, radius } => {
                let offset = from - center;
                let reach = radius.max(0.0);
                if offset.length() <= reach {
                    from
                } else {
                    center + offset.normalize_or_zero() * reach
                }
            }
        }
    }
}

/// A destination an agent can be sent to.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Goal {
    /// Identity used to tell a new goal from a moved one.
    pub id: GoalId,
    /// Planar position the path is planned to.
    pub position: Vec2,
    /// Extent to stop in front of; `None` measures to `position`.
    #[serde(default)]
    pub bounds: Option<BoundingShape>,
}

impl Goal {
    /// Creates a point goal without a bounding shape.
    #[must_use]
    pub const fn new(id: GoalId, position: Vec2) -> Self {
        Self {
            id,
            position,
            bounds: None,
        }
    }

    /// Attaches a bounding shape used for distance checks.
    #[must_use]
    pub const fn with_bounds(mut self, bounds: BoundingShape) -> Self {
        self.bounds = Some(bounds);
        self
    }

    /// Point the agent measures its remaining distance against.
    ///
    /// Goals without a bounding shape fall back to their raw position.
    #[must_use]
    pub fn approach_point(&self, from: Vec2) -> Vec2 {
        self.bounds
            .map_or(self.position, |bounds| bounds.closest_point(from))
    }

    /// Planar distance from `from` to the goal's approach point.
    #[must_use]
    pub fn distance_from(&self, from: Vec2) -> f32 {
        from.distance(self.approach_point(from))
    }
}

/// Explicit goal-selection command for one tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "command", content = "slot", rename_all = "snake_case")]
pub enum GoalCommand {
    /// Walk to the goal held in the given slot.
    Select(usize),
    /// Forget the current goal and stand still.
    Clear,
}

/// Fixed set of goal slots an operator can choose between.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GoalSlots {
    slots: Vec<Option<Goal>>,
    #[serde(skip)]
    current: Option<Goal>,
}

impl GoalSlots {
    /// Creates `count` empty slots.
    #[must_use]
    pub fn with_capacity(count: usize) -> Self {
        Self {
            slots: vec![None; count],
            current: None,
        }
    }

    /// Creates slots pre-filled with `goals`, in priority order.
    #[must_use]
    pub fn from_goals(goals: impl IntoIterator<Item = Goal>) -> Self {
        Self {
            slots: goals.into_iter().map(Some).collect(),
            current: None,
        }
    }

    /// Number of slots, filled or not.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.slots.len()
    }

    /// `true` when there are no slots at all.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Places `goal` in `slot`, growing the slot list if needed.
    pub fn assign(&mut self, slot: usize, goal: Option<Goal>) {
        if slot >= self.slots.len() {
            self.slots.resize(slot + 1, None);
        }
        if let Some(entry) = self.slots.get_mut(slot) {
            *entry = goal;
        }
        self.refresh_current();
    }

    /// Goal stored in `slot`, if any.
    #[must_use]
    pub fn get(&self, slot: usize) -> Option<&Goal> {
        self.slots.get(slot).and_then(Option::as_ref)
    }

    /// Moves the goal in `slot`. Returns `false` when the slot is empty.
    pub fn update_position(&mut self, slot: usize, position: Vec2) -> bool {
        let Some(goal) = self.slots.get_mut(slot).and_then(Option::as_mut) else {
            return false;
        };
        let delta = position - goal.position;
        goal.position = position;
        if let Some(bounds) = goal.bounds.as_mut() {
            translate(bounds, delta);
        }
        self.refresh_current();
        true
    }

    /// The currently selected goal.
    #[must_use]
    pub const fn current(&self) -> Option<&Goal> {
        self.current.as_ref()
    }

    /// Applies this tick's commands and returns the resulting goal.
    ///
    /// Selections are processed in slot order regardless of the order they
    /// were issued in, so the highest slot selected in a tick wins. A `Clear`
    /// issued in the same tick is applied before any selection. Selecting an
    /// empty slot is ignored.
    pub fn apply(&mut self, commands: &[GoalCommand]) -> Option<Goal> {
        if commands.contains(&GoalCommand::Clear) {
            debug!("goal cleared");
            self.current = None;
        }
        let mut selected: Vec<usize> = commands
            .iter()
            .filter_map(|command| match command {
                GoalCommand::Select(slot) => Some(*slot),
                GoalCommand::Clear => None,
            })
            .collect();
        selected.sort_unstable();
        selected.dedup();

        for slot in selected {
            match self.get(slot).copied() {
                Some(goal) if self.current.map(|c| c.id) != Some(goal.id) => {
                    debug!("goal slot {slot} selected: {:?}", goal.id);
                    self.current = Some(goal);
                }
                Some(_) => {}
                None => debug!("ignoring selection of empty goal slot {slot}"),
            }
        }
        self.current
    }

    fn refresh_current(&mut self) {
        let Some(current) = self.current else { return };
        let refreshed = self.slots.iter().flatten().find(|g| g.id == current.id);
        if let Some(goal) = refreshed {
            self.current = Some(*goal);
        }
    }
}

fn translate(bounds: &mut BoundingShape, delta: Vec2) {
    match bounds {
        BoundingShape::Aabb { min, max } => {
            *min += delta;
            *max += delta;
        }
        BoundingShape::Circle { center, .. } => *center += delta,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rstest::{fixture, rstest};

    #[fixture]
    fn slots() -> GoalSlots {
        GoalSlots::from_goals([
            Goal::new(GoalId(1), Vec2::new(0.0, 10.0)),
            Goal::new(GoalId(2), Vec2::new(10.0, 0.0)),
            Goal::new(GoalId(3), Vec2::new(-10.0, 0.0)),
        ])
    }

    #[rstest]
    #[case::outside_below(Vec2::new(0.0, 0.0), Vec2::new(0.0, 4.0))]
    #[case::outside_corner(Vec2::new(5.0, 10.0), Vec2::new(1.0, 6.0))]
    #[case::inside(Vec2::new(0.5, 5.0), Vec2::new(0.5, 5.0))]
    fn aabb_closest_point(#[case] from: Vec2, #[case] expected: Vec2) {
        let shape = BoundingShape::Aabb {
            min: Vec2::new(-1.0, 4.0),
            max: Vec2::new(1.0, 6.0),
        };
        assert_eq!(shape.closest_point(from), expected);
    }

    #[test]
    fn circle_closest_point_lies_on_rim() {
        let shape = BoundingShape::Circle {
            center: Vec2::new(0.0, 10.0),
            radius: 2.0,
        };
        let closest = shape.closest_point(Vec2::ZERO);
        assert_relative_eq!(closest.x, 0.0);
        assert_relative_eq!(closest.y, 8.0);
        assert_eq!(shape.closest_point(Vec2::new(0.5, 10.5)), Vec2::new(0.5, 10.5));
    }

    #[test]
    fn distance_falls_back_to_position_without_bounds() {
        let goal = Goal::new(GoalId(7), Vec2::new(3.0, 4.0));
        assert_relative_eq!(goal.distance_from(Vec2::ZERO), 5.0);
        let boxed = goal.with_bounds(BoundingShape::Circle {
            center: Vec2::new(3.0, 4.0),
            radius: 1.0,
        });
        assert_relative_eq!(boxed.distance_from(Vec2::ZERO), 4.0);
    }

    #[rstest]
    fn highest_slot_wins_within_a_tick(mut slots: GoalSlots) {
        let goal = slots.apply(&[GoalCommand::Select(2), GoalCommand::Select(0)]);
        assert_eq!(goal.map(|g| g.id), Some(GoalId(3)));
    }

    #[rstest]
    fn empty_slot_selection_is_ignored(mut slots: GoalSlots) {
        slots.apply(&[GoalCommand::Select(1)]);
        let goal = slots.apply(&[GoalCommand::Select(9)]);
        assert_eq!(goal.map(|g| g.id), Some(GoalId(2)));
    }

    #[rstest]
    fn clear_then_select_in_same_tick_selects(mut slots: GoalSlots) {
        slots.apply(&[GoalCommand::Select(0)]);
        assert!(slots.apply(&[GoalCommand::Clear]).is_none());
        let goal = slots.apply(&[GoalCommand::Select(1), GoalCommand::Clear]);
        assert_eq!(goal.map(|g| g.id), Some(GoalId(2)));
    }

    #[rstest]
    fn no_commands_keep_current_goal(mut slots: GoalSlots) {
        slots.apply(&[GoalCommand::Select(0)]);
        assert_eq!(slots.apply(&[]).map(|g| g.id), Some(GoalId(1)));
    }

    #[rstest]
    fn moving_a_slot_moves_current_goal_and_bounds(mut slots: GoalSlots) {
        slots.assign(
            0,
            Some(
                Goal::new(GoalId(1), Vec2::new(0.0, 10.0)).with_bounds(BoundingShape::Circle {
                    center: Vec2::new(0.0, 10.0),
                    radius: 1.0,
                }),
            ),
        );
        slots.apply(&[GoalCommand::Select(0)]);
        assert!(slots.update_position(0, Vec2::new(2.0, 10.0)));
        let current = slots.current().copied().expect("goal selected");
        assert_eq!(current.position, Vec2::new(2.0, 10.0));
        assert_eq!(
            current.bounds,
            Some(BoundingShape::Circle {
                center: Vec2::new(2.0, 10.0),
                radius: 1.0,
            })
        );
        assert!(!slots.update_position(5, Vec2::ZERO));
    }
}
