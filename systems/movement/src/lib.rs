#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Deterministic movement system that decides the robot's next step.

use maze_robot_core::{CellCoord, Command, Direction, RobotSnapshot};

/// Result of a single move resolution.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MoveDecision {
    /// The cell ahead was passable, so the robot keeps its heading.
    Forward(Direction),
    /// The cell ahead was blocked and the priority scan picked a new heading.
    Redirected(Direction),
    /// No direction in the priority order was passable.
    Stuck,
}

impl MoveDecision {
    /// Direction the robot travels, unless it is stuck.
    #[must_use]
    pub const fn direction(self) -> Option<Direction> {
        match self {
            Self::Forward(direction) | Self::Redirected(direction) => Some(direction),
            Self::Stuck => None,
        }
    }
}

/// Pure system that resolves the robot's next direction from passability.
#[derive(Clone, Copy, Debug)]
pub struct MoveResolver {
    columns: u32,
    rows: u32,
}

impl MoveResolver {
    /// Creates a resolver for a grid of `columns` by `rows` cells.
    #[must_use]
    pub const fn new(columns: u32, rows: u32) -> Self {
        Self { columns, rows }
    }

    /// Decides which way the robot travels without emitting commands.
    ///
    /// Cells outside the grid are never passable. `is_passable` is only asked
    /// about in-bounds cells and should mirror the world's
    /// `query::is_passable` helper.
    pub fn resolve<F>(&self, robot: &RobotSnapshot, mut is_passable: F) -> MoveDecision
    where
        F: FnMut(CellCoord) -> bool,
    {
        let mut open = |direction: Direction| {
            robot
                .cell
                .step(direction, self.columns, self.rows)
                .is_some_and(&mut is_passable)
        };

        if open(robot.facing) {
            return MoveDecision::Forward(robot.facing);
        }

        Direction::priority(robot.inverted)
            .into_iter()
            .find(|direction| open(*direction))
            .map_or(MoveDecision::Stuck, MoveDecision::Redirected)
    }

    /// Resolves the next move and emits the matching step command.
    pub fn handle<F>(
        &self,
        robot: &RobotSnapshot,
        is_passable: F,
        out: &mut Vec<Command>,
    ) -> MoveDecision
    where
        F: FnMut(CellCoord) -> bool,
    {
        let decision = self.resolve(robot, is_passable);
        if let Some(direction) = decision.direction() {
            out.push(Command::StepRobot { direction });
        }
        decision
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn robot(cell: CellCoord, facing: Direction, inverted: bool) -> RobotSnapshot {
        RobotSnapshot {
            cell,
            facing,
            breaker: false,
            inverted,
        }
    }

    #[test]
    fn open_field_keeps_heading() {
        let resolver = MoveResolver::new(3, 3);
        let decision = resolver.resolve(
            &robot(CellCoord::new(1, 1), Direction::West, false),
            |_| true,
        );
        assert_eq!(decision, MoveDecision::Forward(Direction::West));
    }

    #[test]
    fn grid_edge_counts_as_blocked() {
        let resolver = MoveResolver::new(1, 2);
        let decision = resolver.resolve(
            &robot(CellCoord::new(0, 1), Direction::South, false),
            |_| true,
        );
        assert_eq!(decision, MoveDecision::Redirected(Direction::North));
    }

    #[test]
    fn nothing_passable_is_stuck() {
        let resolver = MoveResolver::new(3, 3);
        let mut out = Vec::new();
        let decision = resolver.handle(
            &robot(CellCoord::new(1, 1), Direction::South, false),
            |_| false,
            &mut out,
        );
        assert_eq!(decision, MoveDecision::Stuck);
        assert_eq!(decision.direction(), None);
        assert!(out.is_empty());
    }
}
