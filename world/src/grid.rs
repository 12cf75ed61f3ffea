//! Immutable base grid the robot traverses.

use maze_robot_core::{CellCoord, Tile};
use thiserror::Error;

/// Largest number of cells a grid may hold.
pub const MAX_CELLS: usize = 1 << 24;

/// Reasons a grid layout may be rejected before simulation starts.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum GridError {
    /// The layout contained no rows or no columns.
    #[error("grid must contain at least one row and one column")]
    Empty,
    /// The layout exceeds [`MAX_CELLS`] or the 32-bit coordinate space.
    #[error("grid dimensions exceed the supported size of {} cells", MAX_CELLS)]
    TooLarge,
    /// A row did not match the width of the first row.
    #[error("row {row} has {found} cells, expected {expected}")]
    Ragged {
        /// Zero-based index of the offending row.
        row: usize,
        /// Width established by the first row.
        expected: usize,
        /// Width of the offending row.
        found: usize,
    },
    /// The tile buffer did not hold exactly `columns * rows` entries.
    #[error("expected {expected} tiles, found {found}")]
    TileCount {
        /// Number of cells implied by the dimensions.
        expected: usize,
        /// Number of tiles supplied.
        found: usize,
    },
    /// A cell contained a character outside the grid alphabet.
    #[error("unknown symbol {symbol:?} at column {column}, row {row}")]
    UnknownSymbol {
        /// Character that could not be decoded.
        symbol: char,
        /// Column of the offending cell.
        column: u32,
        /// Row of the offending cell.
        row: u32,
    },
    /// No start cell (`@`) was present.
    #[error("grid has no start cell")]
    MissingStart,
    /// More than one start cell (`@`) was present.
    #[error("grid has more than one start cell ({first:?} and {second:?})")]
    MultipleStarts {
        /// First start cell in row-major order.
        first: CellCoord,
        /// Second start cell in row-major order.
        second: CellCoord,
    },
    /// No goal cell (`$`) was present.
    #[error("grid has no goal cell")]
    MissingGoal,
    /// A teleporter digit appeared a number of times other than two.
    #[error("teleporter {digit} appears {count} times, expected exactly 2")]
    UnpairedTeleporter {
        /// Digit carried by the malformed teleporter.
        digit: u8,
        /// Number of cells carrying the digit.
        count: usize,
    },
}

/// Rectangular table of tiles established once at load time.
///
/// Breakable walls are enumerated in row-major order when the grid is built.
/// That enumeration assigns every wall a stable slot used by destroyed-wall
/// fingerprints.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Grid {
    columns: u32,
    rows: u32,
    tiles: Vec<Tile>,
    start: CellCoord,
    goals: Vec<CellCoord>,
    breakable: Vec<CellCoord>,
    breakable_slots: Vec<Option<usize>>,
    partners: Vec<Option<CellCoord>>,
}

impl Grid {
    /// Builds a grid from text rows of equal width.
    ///
    /// Rows are expected to be padded already; ragged input is rejected rather
    /// than silently repaired.
    pub fn from_rows<S>(rows: &[S]) -> Result<Self, GridError>
    where
        S: AsRef<str>,
    {
        let expected = rows.first().map_or(0, |row| row.as_ref().chars().count());
        let mut tiles = Vec::with_capacity(expected * rows.len());

        for (row_index, row) in rows.iter().enumerate() {
            let found = row.as_ref().chars().count();
            if found != expected {
                return Err(GridError::Ragged {
                    row: row_index,
                    expected,
                    found,
                });
            }

            for (column_index, symbol) in row.as_ref().chars().enumerate() {
                let Some(tile) = Tile::from_symbol(symbol) else {
                    return Err(GridError::UnknownSymbol {
                        symbol,
                        column: u32::try_from(column_index).map_err(|_| GridError::TooLarge)?,
                        row: u32::try_from(row_index).map_err(|_| GridError::TooLarge)?,
                    });
                };
                tiles.push(tile);
            }
        }

        let columns = u32::try_from(expected).map_err(|_| GridError::TooLarge)?;
        let row_count = u32::try_from(rows.len()).map_err(|_| GridError::TooLarge)?;
        Self::from_tiles(columns, row_count, tiles)
    }

    /// Builds a grid from row-major tiles.
    pub fn from_tiles(columns: u32, rows: u32, tiles: Vec<Tile>) -> Result<Self, GridError> {
        if columns == 0 || rows == 0 {
            return Err(GridError::Empty);
        }

        let width = usize::try_from(columns).map_err(|_| GridError::TooLarge)?;
        let height = usize::try_from(rows).map_err(|_| GridError::TooLarge)?;
        let cell_count = width
            .checked_mul(height)
            .filter(|count| *count <= MAX_CELLS)
            .ok_or(GridError::TooLarge)?;
        if tiles.len() != cell_count {
            return Err(GridError::TileCount {
                expected: cell_count,
                found: tiles.len(),
            });
        }

        let mut start = None;
        let mut goals = Vec::new();
        let mut breakable = Vec::new();
        let mut breakable_slots = vec![None; cell_count];
        let mut pads: [Vec<usize>; 9] = Default::default();

        for (offset, tile) in tiles.iter().enumerate() {
            let cell = coord(width, offset).ok_or(GridError::TooLarge)?;
            match tile {
                Tile::Start => {
                    if let Some(first) = start {
                        return Err(GridError::MultipleStarts {
                            first,
                            second: cell,
                        });
                    }
                    start = Some(cell);
                }
                Tile::Goal => goals.push(cell),
                Tile::BreakableWall => {
                    breakable_slots[offset] = Some(breakable.len());
                    breakable.push(cell);
                }
                Tile::Teleporter(id) => pads[usize::from(id.get() - 1)].push(offset),
                _ => {}
            }
        }

        let start = start.ok_or(GridError::MissingStart)?;
        if goals.is_empty() {
            return Err(GridError::MissingGoal);
        }

        let mut partners = vec![None; cell_count];
        for (slot, offsets) in pads.iter().enumerate() {
            match offsets.as_slice() {
                [] => {}
                [first, second] => {
                    partners[*first] = coord(width, *second);
                    partners[*second] = coord(width, *first);
                }
                _ => {
                    return Err(GridError::UnpairedTeleporter {
                        digit: u8::try_from(slot + 1).unwrap_or(u8::MAX),
                        count: offsets.len(),
                    });
                }
            }
        }

        Ok(Self {
            columns,
            rows,
            tiles,
            start,
            goals,
            breakable,
            breakable_slots,
            partners,
        })
    }

    /// Number of columns contained in the grid.
    #[must_use]
    pub const fn columns(&self) -> u32 {
        self.columns
    }

    /// Number of rows contained in the grid.
    #[must_use]
    pub const fn rows(&self) -> u32 {
        self.rows
    }

    /// Total number of cells.
    #[must_use]
    pub fn cell_count(&self) -> usize {
        self.tiles.len()
    }

    /// Tile stored at the provided cell in the base layout.
    #[must_use]
    pub fn tile(&self, cell: CellCoord) -> Option<Tile> {
        self.offset(cell)
            .and_then(|offset| self.tiles.get(offset).copied())
    }

    /// Cell holding the start marker.
    #[must_use]
    pub const fn start(&self) -> CellCoord {
        self.start
    }

    /// Goal cells in row-major order.
    #[must_use]
    pub fn goals(&self) -> &[CellCoord] {
        &self.goals
    }

    /// Breakable walls in the fixed row-major enumeration order.
    #[must_use]
    pub fn breakable_walls(&self) -> &[CellCoord] {
        &self.breakable
    }

    /// Enumeration slot of the breakable wall at `cell`, if one is there.
    #[must_use]
    pub fn breakable_slot(&self, cell: CellCoord) -> Option<usize> {
        self.offset(cell)
            .and_then(|offset| self.breakable_slots.get(offset).copied().flatten())
    }

    /// Opposite end of the teleporter pair anchored at `cell`.
    #[must_use]
    pub fn teleporter_partner(&self, cell: CellCoord) -> Option<CellCoord> {
        self.offset(cell)
            .and_then(|offset| self.partners.get(offset).copied().flatten())
    }

    fn offset(&self, cell: CellCoord) -> Option<usize> {
        if cell.column() >= self.columns || cell.row() >= self.rows {
            return None;
        }

        let width = usize::try_from(self.columns).ok()?;
        index(width, cell)
    }
}

fn index(width: usize, cell: CellCoord) -> Option<usize> {
    let column = usize::try_from(cell.column()).ok()?;
    let row = usize::try_from(cell.row()).ok()?;
    row.checked_mul(width)?.checked_add(column)
}

fn coord(width: usize, offset: usize) -> Option<CellCoord> {
    let column = u32::try_from(offset % width).ok()?;
    let row = u32::try_from(offset / width).ok()?;
    Some(CellCoord::new(column, row))
}
