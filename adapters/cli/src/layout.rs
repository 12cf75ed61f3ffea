//! Text layout parsing for grids supplied on standard input or from a file.

use maze_robot_world::{Grid, GridError, MAX_CELLS};
use thiserror::Error;

/// Padding symbol used for missing or short rows.
const FILL: char = ' ';

/// Errors raised while turning layout text into a grid.
#[derive(Debug, Error)]
pub(crate) enum LayoutError {
    /// The input contained no header line.
    #[error("layout is missing the `H W` header line")]
    MissingHeader,
    /// The header line did not hold two integers in the 32-bit range.
    #[error("line {line}: could not parse grid dimensions from '{header}'")]
    InvalidHeader {
        /// One-based line number of the header.
        line: usize,
        /// Header text as read.
        header: String,
    },
    /// The header declared a grid without any cells.
    #[error("line {line}: grid dimensions {rows}x{columns} contain no cells")]
    EmptyDimensions {
        /// One-based line number of the header.
        line: usize,
        /// Declared number of rows.
        rows: u32,
        /// Declared number of columns.
        columns: u32,
    },
    /// The normalised rows were rejected by the grid builder.
    #[error("invalid grid: {0}")]
    Grid(#[from] GridError),
}

/// Parses layout text: a header line `H W` followed by `H` rows.
///
/// Blank lines before the header are skipped. Rows are padded with spaces or
/// truncated to `W` characters and absent rows are treated as blank.
pub(crate) fn parse_layout(input: &str) -> Result<Grid, LayoutError> {
    let mut lines = input.lines().enumerate().skip_while(|(_, line)| line.trim().is_empty());
    let Some((index, header)) = lines.next() else {
        return Err(LayoutError::MissingHeader);
    };
    let line = index + 1;
    let (rows, columns) = parse_header(header).ok_or_else(|| LayoutError::InvalidHeader {
        line,
        header: header.to_owned(),
    })?;
    if rows == 0 || columns == 0 {
        return Err(LayoutError::EmptyDimensions {
            line,
            rows,
            columns,
        });
    }

    let width = usize::try_from(columns).map_err(|_| GridError::TooLarge)?;
    let height = usize::try_from(rows).map_err(|_| GridError::TooLarge)?;
    if width.checked_mul(height).map_or(true, |cells| cells > MAX_CELLS) {
        return Err(GridError::TooLarge.into());
    }

    let mut body = lines.map(|(_, row)| row);
    let normalised: Vec<String> = (0..rows)
        .map(|_| normalise_row(body.next().unwrap_or(""), width))
        .collect();

    Ok(Grid::from_rows(&normalised)?)
}

fn parse_header(header: &str) -> Option<(u32, u32)> {
    let mut fields = header.split_whitespace();
    let rows = fields.next()?.parse().ok()?;
    let columns = fields.next()?.parse().ok()?;
    Some((rows, columns))
}

fn normalise_row(row: &str, columns: usize) -> String {
    let row = row.trim_end_matches('\r');
    let mut normalised: String = row.chars().take(columns).collect();
    let missing = columns - normalised.chars().count();
    normalised.extend(std::iter::repeat(FILL).take(missing));
    normalised
}
