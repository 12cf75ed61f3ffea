#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative world state for the maze robot.
//!
//! The base [`Grid`] never changes once loaded. Wall destruction is tracked as
//! a delta layered over it, so the loaded layout stays available for replay
//! and the delta can be fingerprinted for loop detection.

mod grid;

use maze_robot_core::{CellCoord, Command, Direction, Event, RobotSnapshot, Tile, WallFingerprint};

pub use grid::{Grid, GridError, MAX_CELLS};

/// Direction the robot faces when a run begins.
pub const INITIAL_FACING: Direction = Direction::South;

/// Mutable robot state owned exclusively by the world.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct Robot {
    cell: CellCoord,
    facing: Direction,
    breaker: bool,
    inverted: bool,
}

impl Robot {
    const fn at_start(cell: CellCoord) -> Self {
        Self {
            cell,
            facing: INITIAL_FACING,
            breaker: false,
            inverted: false,
        }
    }

    const fn snapshot(&self) -> RobotSnapshot {
        RobotSnapshot {
            cell: self.cell,
            facing: self.facing,
            breaker: self.breaker,
            inverted: self.inverted,
        }
    }
}

/// Represents the authoritative maze robot world state.
#[derive(Clone, Debug)]
pub struct World {
    grid: Grid,
    destroyed: WallFingerprint,
    robot: Robot,
}

impl World {
    /// Creates a world with the robot on the start cell facing south, both
    /// mode flags cleared and every wall intact.
    #[must_use]
    pub fn new(grid: Grid) -> Self {
        let destroyed = WallFingerprint::with_capacity(grid.breakable_walls().len());
        let robot = Robot::at_start(grid.start());
        Self {
            grid,
            destroyed,
            robot,
        }
    }

    fn effective_tile(&self, cell: CellCoord) -> Option<Tile> {
        let tile = self.grid.tile(cell)?;
        if tile == Tile::BreakableWall && self.is_destroyed(cell) {
            return Some(Tile::Empty);
        }
        Some(tile)
    }

    fn is_destroyed(&self, cell: CellCoord) -> bool {
        self.grid
            .breakable_slot(cell)
            .is_some_and(|slot| self.destroyed.contains(slot))
    }

    fn can_enter(&self, cell: CellCoord, breaker: bool) -> bool {
        match self.effective_tile(cell) {
            None | Some(Tile::Wall) => false,
            Some(Tile::BreakableWall) => breaker,
            Some(_) => true,
        }
    }

    fn face(&mut self, direction: Direction, out_events: &mut Vec<Event>) {
        let from = self.robot.facing;
        if from != direction {
            self.robot.facing = direction;
            out_events.push(Event::FacingChanged {
                from,
                to: direction,
            });
        }
    }

    fn step(&mut self, direction: Direction, out_events: &mut Vec<Event>) {
        let from = self.robot.cell;
        let target = from
            .step(direction, self.grid.columns(), self.grid.rows())
            .filter(|cell| self.can_enter(*cell, self.robot.breaker));

        let Some(to) = target else {
            out_events.push(Event::StepBlocked {
                cell: from,
                direction,
            });
            return;
        };

        self.face(direction, out_events);

        if let Some(slot) = self.grid.breakable_slot(to) {
            if self.destroyed.insert(slot) {
                out_events.push(Event::WallDestroyed { cell: to });
            }
        }

        self.robot.cell = to;
        out_events.push(Event::RobotStepped {
            from,
            to,
            direction,
        });
    }
}

/// Applies the provided command to the world, mutating state deterministically.
pub fn apply(world: &mut World, command: Command, out_events: &mut Vec<Event>) {
    match command {
        Command::FaceRobot { direction } => world.face(direction, out_events),
        Command::ToggleBreaker => {
            world.robot.breaker = !world.robot.breaker;
            out_events.push(Event::BreakerToggled {
                active: world.robot.breaker,
            });
        }
        Command::ToggleInverted => {
            world.robot.inverted = !world.robot.inverted;
            out_events.push(Event::InvertedToggled {
                active: world.robot.inverted,
            });
        }
        Command::TeleportRobot { destination } => {
            let from = world.robot.cell;
            if world.grid.tile(destination).is_none() {
                out_events.push(Event::TeleportRejected {
                    cell: from,
                    destination,
                });
                return;
            }
            world.robot.cell = destination;
            out_events.push(Event::RobotTeleported {
                from,
                to: destination,
            });
        }
        Command::StepRobot { direction } => world.step(direction, out_events),
    }
}

/// Query functions that provide read-only access to the world state.
pub mod query {
    use maze_robot_core::{CellCoord, RobotSnapshot, Signature, Tile, WallFingerprint};

    use super::{Grid, World};

    /// Provides read-only access to the immutable base grid.
    #[must_use]
    pub fn grid(world: &World) -> &Grid {
        &world.grid
    }

    /// Captures the robot's current state.
    #[must_use]
    pub fn robot(world: &World) -> RobotSnapshot {
        world.robot.snapshot()
    }

    /// Tile currently at `cell`, with destroyed walls reported as empty floor.
    #[must_use]
    pub fn tile_at(world: &World, cell: CellCoord) -> Option<Tile> {
        world.effective_tile(cell)
    }

    /// Reports whether the robot may occupy `cell` on its next step given the
    /// current breaker flag and the walls destroyed so far.
    #[must_use]
    pub fn is_passable(world: &World, cell: CellCoord) -> bool {
        world.can_enter(cell, world.robot.breaker)
    }

    /// Opposite end of the teleporter pair anchored at `cell`.
    #[must_use]
    pub fn teleporter_partner(world: &World, cell: CellCoord) -> Option<CellCoord> {
        world.grid.teleporter_partner(cell)
    }

    /// Reports whether the robot currently stands on a goal cell.
    #[must_use]
    pub fn at_goal(world: &World) -> bool {
        world.grid.tile(world.robot.cell) == Some(Tile::Goal)
    }

    /// Fingerprint of the walls destroyed so far.
    #[must_use]
    pub fn destroyed_fingerprint(world: &World) -> &WallFingerprint {
        &world.destroyed
    }

    /// Cells of the walls destroyed so far, in row-major order.
    #[must_use]
    pub fn destroyed_walls(world: &World) -> Vec<CellCoord> {
        let walls = world.grid.breakable_walls();
        world
            .destroyed
            .iter()
            .filter_map(|slot| walls.get(slot).copied())
            .collect()
    }

    /// Captures the full configuration key used for loop detection.
    #[must_use]
    pub fn signature(world: &World) -> Signature {
        Signature {
            robot: world.robot.snapshot(),
            destroyed: world.destroyed.clone(),
        }
    }
}
