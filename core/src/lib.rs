#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the maze robot engine.
//!
//! This crate defines the message surface that connects adapters, the
//! authoritative world, and pure systems. Systems inspect immutable
//! [`RobotSnapshot`] values and tiles, then submit [`Command`] values
//! describing desired mutations. The world executes those commands via its
//! `apply` entry point and broadcasts [`Event`] values describing what changed.

use std::fmt;

use serde::Serialize;

/// Token reported when no terminating path exists from the start cell.
pub const LOOP_SENTINEL: &str = "LOOP";

/// Cardinal directions the robot can face and travel in.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Direction {
    /// Movement toward increasing row indices.
    South,
    /// Movement toward increasing column indices.
    East,
    /// Movement toward decreasing row indices.
    North,
    /// Movement toward decreasing column indices.
    West,
}

impl Direction {
    /// Fallback order scanned when the forward cell is blocked in normal mode.
    pub const PRIORITY: [Direction; 4] = [
        Direction::South,
        Direction::East,
        Direction::North,
        Direction::West,
    ];

    /// Fallback order scanned when the forward cell is blocked in inverted mode.
    pub const INVERTED_PRIORITY: [Direction; 4] = [
        Direction::West,
        Direction::North,
        Direction::East,
        Direction::South,
    ];

    /// Selects the fallback order matching the robot's inverted flag.
    #[must_use]
    pub const fn priority(inverted: bool) -> [Direction; 4] {
        if inverted {
            Self::INVERTED_PRIORITY
        } else {
            Self::PRIORITY
        }
    }

    /// Upper-case name emitted for the direction in a move listing.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::South => "SOUTH",
            Self::East => "EAST",
            Self::North => "NORTH",
            Self::West => "WEST",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Location of a single grid cell expressed as column and row coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct CellCoord {
    column: u32,
    row: u32,
}

impl CellCoord {
    /// Creates a new grid cell coordinate.
    #[must_use]
    pub const fn new(column: u32, row: u32) -> Self {
        Self { column, row }
    }

    /// Zero-based column index of the cell.
    #[must_use]
    pub const fn column(&self) -> u32 {
        self.column
    }

    /// Zero-based row index of the cell.
    #[must_use]
    pub const fn row(&self) -> u32 {
        self.row
    }

    /// Neighbouring cell in the provided direction, if it lies inside a grid
    /// of `columns` by `rows` cells.
    #[must_use]
    pub fn step(self, direction: Direction, columns: u32, rows: u32) -> Option<CellCoord> {
        let (column, row) = match direction {
            Direction::South => (Some(self.column), self.row.checked_add(1)),
            Direction::East => (self.column.checked_add(1), Some(self.row)),
            Direction::North => (Some(self.column), self.row.checked_sub(1)),
            Direction::West => (self.column.checked_sub(1), Some(self.row)),
        };
        let (column, row) = (column?, row?);

        if column < columns && row < rows {
            Some(CellCoord::new(column, row))
        } else {
            None
        }
    }
}

/// Identifier shared by the two cells of a teleporter pair.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TeleporterId(u8);

impl TeleporterId {
    /// Creates a teleporter identifier from its digit value (1 through 9).
    #[must_use]
    pub const fn new(digit: u8) -> Option<Self> {
        if digit >= 1 && digit <= 9 {
            Some(Self(digit))
        } else {
            None
        }
    }

    /// Digit value carried by the teleporter marker.
    #[must_use]
    pub const fn get(&self) -> u8 {
        self.0
    }
}

/// Contents of a single grid cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Tile {
    /// Open floor without any effect.
    Empty,
    /// Permanent wall (`#`).
    Wall,
    /// Wall that a robot in breaker mode destroys on entry (`X`).
    BreakableWall,
    /// Cell the robot starts on (`@`).
    Start,
    /// Cell that ends the run successfully (`$`).
    Goal,
    /// Forces the robot to face the carried direction (`S`, `E`, `N`, `W`).
    Override(Direction),
    /// Flips the breaker flag (`B`).
    Breaker,
    /// Flips the inverted flag (`I`).
    Inverter,
    /// One end of a teleporter pair (`1` through `9`).
    Teleporter(TeleporterId),
}

impl Tile {
    /// Decodes a grid symbol. Blank cells decode as [`Tile::Empty`].
    #[must_use]
    pub fn from_symbol(symbol: char) -> Option<Self> {
        let tile = match symbol {
            ' ' => Self::Empty,
            '#' => Self::Wall,
            'X' => Self::BreakableWall,
            '@' => Self::Start,
            '$' => Self::Goal,
            'S' => Self::Override(Direction::South),
            'E' => Self::Override(Direction::East),
            'N' => Self::Override(Direction::North),
            'W' => Self::Override(Direction::West),
            'B' => Self::Breaker,
            'I' => Self::Inverter,
            '1'..='9' => {
                let digit = symbol.to_digit(10)?;
                Self::Teleporter(TeleporterId::new(u8::try_from(digit).ok()?)?)
            }
            _ => return None,
        };
        Some(tile)
    }
}

/// Immutable representation of the robot's state used for queries.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct RobotSnapshot {
    /// Grid cell currently occupied by the robot.
    pub cell: CellCoord,
    /// Direction the robot attempts to travel first.
    pub facing: Direction,
    /// Indicates whether breakable walls are currently passable.
    pub breaker: bool,
    /// Indicates whether the fallback priority order is reversed.
    pub inverted: bool,
}

/// Commands that express all permissible world mutations.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    /// Turns the robot to face the provided direction.
    FaceRobot {
        /// Direction the robot should face.
        direction: Direction,
    },
    /// Flips the robot's breaker flag.
    ToggleBreaker,
    /// Flips the robot's inverted flag.
    ToggleInverted,
    /// Relocates the robot without consuming a move.
    TeleportRobot {
        /// Cell the robot should occupy after the hop.
        destination: CellCoord,
    },
    /// Requests that the robot advance a single cell in the specified direction.
    StepRobot {
        /// Direction of travel for the attempted step.
        direction: Direction,
    },
}

/// Events broadcast by the world after processing commands.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Event {
    /// Announces that the robot now faces a different direction.
    FacingChanged {
        /// Direction the robot faced before the change.
        from: Direction,
        /// Direction the robot faces after the change.
        to: Direction,
    },
    /// Announces the new value of the breaker flag.
    BreakerToggled {
        /// Whether breaker mode is active after the toggle.
        active: bool,
    },
    /// Announces the new value of the inverted flag.
    InvertedToggled {
        /// Whether inverted mode is active after the toggle.
        active: bool,
    },
    /// Confirms that the robot hopped between the cells of a teleporter pair.
    RobotTeleported {
        /// Cell the robot occupied before the hop.
        from: CellCoord,
        /// Cell the robot occupies after the hop.
        to: CellCoord,
    },
    /// Reports that a teleport targeted a cell outside the grid and the robot
    /// stayed put.
    TeleportRejected {
        /// Cell the robot remains on.
        cell: CellCoord,
        /// Destination that was refused.
        destination: CellCoord,
    },
    /// Reports that a breakable wall was permanently removed.
    WallDestroyed {
        /// Cell that held the destroyed wall.
        cell: CellCoord,
    },
    /// Confirms that the robot moved between two adjacent cells.
    RobotStepped {
        /// Cell the robot occupied before moving.
        from: CellCoord,
        /// Cell the robot occupies after completing the move.
        to: CellCoord,
        /// Direction of travel.
        direction: Direction,
    },
    /// Reports that a requested step targeted an impassable cell.
    StepBlocked {
        /// Cell the robot remains on.
        cell: CellCoord,
        /// Direction of the rejected step.
        direction: Direction,
    },
}

/// Compact record of which breakable walls have been destroyed.
///
/// Bit `i` corresponds to the `i`-th breakable wall in the grid's fixed
/// row-major enumeration, so two fingerprints compare equal exactly when the
/// same walls are gone.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct WallFingerprint {
    words: Vec<u64>,
}

impl WallFingerprint {
    /// Creates an empty fingerprint able to track `walls` breakable walls.
    #[must_use]
    pub fn with_capacity(walls: usize) -> Self {
        Self {
            words: vec![0; walls.div_ceil(64)],
        }
    }

    /// Marks the wall at `index` as destroyed, returning `true` when the bit was
    /// previously clear.
    pub fn insert(&mut self, index: usize) -> bool {
        let (word, mask) = Self::locate(index);
        if word >= self.words.len() {
            self.words.resize(word + 1, 0);
        }
        let fresh = self.words[word] & mask == 0;
        self.words[word] |= mask;
        fresh
    }

    /// Reports whether the wall at `index` is destroyed.
    #[must_use]
    pub fn contains(&self, index: usize) -> bool {
        let (word, mask) = Self::locate(index);
        self.words.get(word).is_some_and(|bits| bits & mask != 0)
    }

    /// Number of destroyed walls recorded.
    #[must_use]
    pub fn count(&self) -> usize {
        self.words
            .iter()
            .map(|word| word.count_ones() as usize)
            .sum()
    }

    /// Indices of the destroyed walls in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = usize> + '_ {
        self.words.iter().enumerate().flat_map(|(word, bits)| {
            (0..64)
                .filter(move |bit| bits & (1_u64 << bit) != 0)
                .map(move |bit| word * 64 + bit)
        })
    }

    const fn locate(index: usize) -> (usize, u64) {
        (index / 64, 1_u64 << (index % 64))
    }
}

/// Value key identifying a complete simulation configuration.
///
/// The transition function depends on every field, including the destroyed
/// walls, so equal signatures imply identical futures.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Signature {
    /// Robot state at the time the signature was captured.
    pub robot: RobotSnapshot,
    /// Destroyed-wall fingerprint at the time the signature was captured.
    pub destroyed: WallFingerprint,
}

/// Why a run ended without reaching the goal.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LoopReason {
    /// A previously observed configuration was reached again.
    CycleDetected,
    /// No direction in the priority order was passable.
    Stuck,
}

/// Terminal result of a simulation run.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    /// The robot reached a goal cell by following the recorded moves.
    Success {
        /// Directions taken, in travel order.
        path: Vec<Direction>,
    },
    /// The robot can never reach a goal.
    Loop {
        /// Terminal condition that ended the run.
        reason: LoopReason,
    },
}

impl Outcome {
    /// Moves taken when the run succeeded.
    #[must_use]
    pub fn path(&self) -> Option<&[Direction]> {
        match self {
            Self::Success { path } => Some(path),
            Self::Loop { .. } => None,
        }
    }

    /// Lines printed for the outcome: one direction name per move, or the
    /// loop sentinel.
    #[must_use]
    pub fn lines(&self) -> Vec<&'static str> {
        match self {
            Self::Success { path } => path.iter().map(|direction| direction.name()).collect(),
            Self::Loop { .. } => vec![LOOP_SENTINEL],
        }
    }
}
