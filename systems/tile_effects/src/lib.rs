#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure system that translates the tile under the robot into world commands.

use maze_robot_core::{CellCoord, Command, RobotSnapshot, TeleporterId, Tile};

/// Tile effect resolver applied before every move decision.
///
/// Effects resolve as an explicit bounded chain. Only teleporters relocate the
/// robot, and the pad a hop lands on is consumed by that hop, so in practice
/// a chain is at most one teleport long. The bound still caps the loop at the
/// number of grid cells.
#[derive(Clone, Copy, Debug)]
pub struct TileEffects {
    chain_limit: usize,
}

impl TileEffects {
    /// Creates a resolver whose effect chains never exceed `chain_limit` hops.
    ///
    /// Callers typically pass the number of grid cells.
    #[must_use]
    pub const fn new(chain_limit: usize) -> Self {
        Self { chain_limit }
    }

    /// Emits the commands that apply the effect of the robot's current tile.
    ///
    /// `tile_at` should mirror the world's `query::tile_at` helper and
    /// `partner_of` its `query::teleporter_partner` helper.
    pub fn handle<T, P>(
        &self,
        robot: &RobotSnapshot,
        mut tile_at: T,
        mut partner_of: P,
        out: &mut Vec<Command>,
    ) where
        T: FnMut(CellCoord) -> Option<Tile>,
        P: FnMut(CellCoord) -> Option<CellCoord>,
    {
        let mut cell = robot.cell;
        let mut arrived_through: Option<TeleporterId> = None;
        let mut hops = 0;

        while hops < self.chain_limit {
            let Some(tile) = tile_at(cell) else {
                break;
            };

            match tile {
                Tile::Override(direction) => {
                    out.push(Command::FaceRobot { direction });
                    break;
                }
                Tile::Breaker => {
                    out.push(Command::ToggleBreaker);
                    break;
                }
                Tile::Inverter => {
                    out.push(Command::ToggleInverted);
                    break;
                }
                Tile::Teleporter(id) => {
                    if arrived_through == Some(id) {
                        break;
                    }
                    let Some(destination) = partner_of(cell) else {
                        break;
                    };
                    out.push(Command::TeleportRobot { destination });
                    arrived_through = Some(id);
                    cell = destination;
                    hops += 1;
                }
                Tile::Empty | Tile::Wall | Tile::BreakableWall | Tile::Start | Tile::Goal => break,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use maze_robot_core::Direction;

    fn robot_at(cell: CellCoord) -> RobotSnapshot {
        RobotSnapshot {
            cell,
            facing: Direction::South,
            breaker: false,
            inverted: false,
        }
    }

    #[test]
    fn zero_chain_limit_emits_nothing() {
        let effects = TileEffects::new(0);
        let mut out = Vec::new();
        effects.handle(
            &robot_at(CellCoord::new(0, 0)),
            |_| Some(Tile::Breaker),
            |_| None,
            &mut out,
        );
        assert!(out.is_empty());
    }

    #[test]
    fn teleport_without_partner_is_ignored() {
        let effects = TileEffects::new(4);
        let pad = Tile::Teleporter(TeleporterId::new(1).expect("digit"));
        let mut out = Vec::new();
        effects.handle(
            &robot_at(CellCoord::new(0, 0)),
            |_| Some(pad),
            |_| None,
            &mut out,
        );
        assert!(out.is_empty());
    }
}
