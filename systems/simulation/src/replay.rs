//! Replays a recorded path against a freshly loaded grid.

use maze_robot_core::{CellCoord, Direction};
use maze_robot_world::{query, Grid};
use thiserror::Error;

use crate::Simulation;

/// Reasons a recorded path fails to reproduce a successful run.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum ReplayError {
    /// The movement policy picks a different direction than the one recorded.
    #[error("move {index} was recorded as {recorded} but the robot travels {resolved:?}")]
    Diverged {
        /// Zero-based index of the mismatching move.
        index: usize,
        /// Direction stored in the path.
        recorded: Direction,
        /// Direction the policy resolves, or `None` when the robot is stuck.
        resolved: Option<Direction>,
    },
    /// The path continues after the robot already stands on a goal.
    #[error("path continues past the goal at move {index}")]
    Overrun {
        /// Zero-based index of the first move past the goal.
        index: usize,
    },
    /// The path ends before the robot reaches a goal.
    #[error("path ends at {cell:?} without reaching a goal")]
    Incomplete {
        /// Cell the robot occupies after the final move.
        cell: CellCoord,
    },
}

/// State reproduced by a successful replay.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReplayOutcome {
    /// Goal cell the robot ends on.
    pub final_cell: CellCoord,
    /// Walls destroyed along the way, in row-major order.
    pub destroyed_walls: Vec<CellCoord>,
    /// Number of teleporter hops taken.
    pub teleports: usize,
}

/// Replays `path` on a pristine copy of `grid` using the engine's tile effect
/// and move rules, checking every recorded move against the policy.
pub fn replay(grid: &Grid, path: &[Direction]) -> Result<ReplayOutcome, ReplayError> {
    let mut simulation = Simulation::new(grid.clone());

    for (index, &recorded) in path.iter().enumerate() {
        if query::at_goal(simulation.world()) {
            return Err(ReplayError::Overrun { index });
        }

        simulation.apply_tile_effect();
        let resolved = simulation.resolve_move().direction();
        if resolved != Some(recorded) {
            return Err(ReplayError::Diverged {
                index,
                recorded,
                resolved,
            });
        }
    }

    let world = simulation.world();
    let final_cell = query::robot(world).cell;
    if !query::at_goal(world) {
        return Err(ReplayError::Incomplete { cell: final_cell });
    }

    Ok(ReplayOutcome {
        final_cell,
        destroyed_walls: query::destroyed_walls(world),
        teleports: simulation.teleports,
    })
}
