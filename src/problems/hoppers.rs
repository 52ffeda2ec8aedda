//! Frogs jumping over frogs on a diamond-lattice pond.
//!
//! A frog jumps over a green frog into an empty cell, removing it. The puzzle
//! is solved when only the red frog remains.
//!
//! Boards use a grid where only every other cell is in play, so orthogonal
//! jumps cover 4 cells and diagonal ones 2.

use std::path::Path;

use derive_more::Display;
use thiserror::Error;

use crate::space::State;

#[derive(Copy, Clone, Debug, Display, PartialEq, Eq, Hash)]
pub enum Cell {
    #[display(".")]
    Empty,
    #[display("G")]
    Green,
    #[display("R")]
    Red,
    /// Not a lily pad.
    #[display("*")]
    Invalid,
}

impl Cell {
    pub fn is_frog(&self) -> bool {
        matches!(self, Cell::Green | Cell::Red)
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CellParseError {
    #[error("Invalid character '{0}' found.")]
    InvalidCharacter(char),
}

impl std::convert::TryFrom<char> for Cell {
    type Error = CellParseError;

    fn try_from(ch: char) -> Result<Self, Self::Error> {
        match ch {
            '.' => Ok(Cell::Empty),
            'G' => Ok(Cell::Green),
            'R' => Ok(Cell::Red),
            '*' => Ok(Cell::Invalid),
            ch => Err(CellParseError::InvalidCharacter(ch)),
        }
    }
}

/// Directions a frog may jump in.
#[derive(Copy, Clone, Debug, Display, PartialEq, Eq, Hash)]
pub enum Direction {
    #[display("↑")]
    Up,
    #[display("→")]
    Right,
    #[display("←")]
    Left,
    #[display("↓")]
    Down,
    #[display("↘")]
    DownRight,
    #[display("↙")]
    DownLeft,
    #[display("↗")]
    UpRight,
    #[display("↖")]
    UpLeft,
}

impl Direction {
    /// Tried from cells on even rows and columns.
    pub const ALL: [Direction; 8] = [
        Direction::Up,
        Direction::Right,
        Direction::Left,
        Direction::Down,
        Direction::DownRight,
        Direction::DownLeft,
        Direction::UpRight,
        Direction::UpLeft,
    ];
    /// Tried from cells on odd rows and columns.
    pub const DIAGONALS: [Direction; 4] = [
        Direction::DownRight,
        Direction::DownLeft,
        Direction::UpRight,
        Direction::UpLeft,
    ];

    /// `(rows, cols)` from the jumping frog to where it lands.
    #[rustfmt::skip]
    pub fn offset(&self) -> (isize, isize) {
        match self {
            Direction::Up        => (-4,  0),
            Direction::Right     => ( 0,  4),
            Direction::Left      => ( 0, -4),
            Direction::Down      => ( 4,  0),
            Direction::DownRight => ( 2,  2),
            Direction::DownLeft  => ( 2, -2),
            Direction::UpRight   => (-2,  2),
            Direction::UpLeft    => (-2, -2),
        }
    }

    pub fn from_offset(rows: isize, cols: isize) -> Option<Direction> {
        Direction::ALL
            .into_iter()
            .find(|d| d.offset() == (rows, cols))
    }
}

/// A jump from a cell.
#[derive(Copy, Clone, Debug, Display, PartialEq, Eq, Hash)]
#[display("({row}, {col}) {direction}")]
pub struct Jump {
    pub row: usize,
    pub col: usize,
    pub direction: Direction,
}

#[derive(Debug, Error)]
pub enum HoppersParseError {
    #[error("Empty input")]
    EmptyInput,
    #[error("Invalid dimensions '{line}'. Expected 'rows cols'.")]
    InvalidDimensions { line: String },
    #[error("Missing row {row}. Expected {rows} rows.")]
    MissingRow { row: usize, rows: usize },
    #[error("Row {row} has {found} cells. Expected {cols}.")]
    ShortRow { row: usize, found: usize, cols: usize },
    #[error("Invalid cell at ({row},{col}): {e}")]
    InvalidCell {
        e: CellParseError,
        row: usize,
        col: usize,
    },
    #[error("I/O error when loading '{p}': {e}")]
    IOError {
        p: std::path::PathBuf,
        e: std::io::Error,
    },
}

/// A pond with frogs.
///
/// Cells are stored row-major. Each jump copies the grid, so States never
/// share it.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct HoppersState {
    rows: usize,
    cols: usize,
    cells: Box<[Cell]>,
}

impl HoppersState {
    pub fn new_from_rows(rows: Vec<Vec<Cell>>) -> Self {
        let cols = rows.first().map_or(0, |r| r.len());
        debug_assert!(rows.iter().all(|r| r.len() == cols));
        Self {
            rows: rows.len(),
            cols,
            cells: rows.into_iter().flatten().collect(),
        }
    }

    pub fn dimensions(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    pub fn at(&self, row: usize, col: usize) -> Option<Cell> {
        if row < self.rows && col < self.cols {
            Some(self.cells[row * self.cols + col])
        } else {
            None
        }
    }

    fn at_offset(&self, row: usize, col: usize, dr: isize, dc: isize) -> Option<Cell> {
        let row = row.checked_add_signed(dr)?;
        let col = col.checked_add_signed(dc)?;
        self.at(row, col)
    }

    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> {
        // `max(1)` keeps `chunks` happy on 0-column boards.
        self.cells.chunks(self.cols.max(1))
    }

    pub fn count(&self, cell: Cell) -> usize {
        self.cells.iter().filter(|c| **c == cell).count()
    }

    /// Whether the frog at `(row, col)` can jump in `direction`.
    ///
    /// Only checks the lattice around the move: a frog over a green one and
    /// an empty landing cell.
    pub fn can_jump(&self, row: usize, col: usize, direction: Direction) -> bool {
        if !self.at(row, col).is_some_and(|c| c.is_frog()) {
            return false;
        }
        let (dr, dc) = direction.offset();
        self.at_offset(row, col, dr / 2, dc / 2) == Some(Cell::Green)
            && self.at_offset(row, col, dr, dc) == Some(Cell::Empty)
    }

    /// Directions tried from a cell. Depends on the row and column parity.
    pub fn directions(row: usize, col: usize) -> &'static [Direction] {
        match (row % 2, col % 2) {
            (0, 0) => &Direction::ALL,
            (1, 1) => &Direction::DIAGONALS,
            _ => &[],
        }
    }

    /// Legal jumps, in the order neighbours are generated.
    pub fn jumps(&self) -> Vec<Jump> {
        let mut v = Vec::<Jump>::new();
        for row in 0..self.rows {
            for col in 0..self.cols {
                if !self.at(row, col).is_some_and(|c| c.is_frog()) {
                    continue;
                }
                for direction in HoppersState::directions(row, col) {
                    if self.can_jump(row, col, *direction) {
                        v.push(Jump {
                            row,
                            col,
                            direction: *direction,
                        });
                    }
                }
            }
        }
        v
    }

    /// Applies a jump, or `None` if it's illegal.
    pub fn jump(&self, jump: &Jump) -> Option<HoppersState> {
        if !self.can_jump(jump.row, jump.col, jump.direction) {
            return None;
        }
        let (dr, dc) = jump.direction.offset();
        let index = |dr: isize, dc: isize| -> usize {
            let row = jump.row.wrapping_add_signed(dr);
            let col = jump.col.wrapping_add_signed(dc);
            row * self.cols + col
        };

        let mut cells = self.cells.clone();
        let frog = cells[index(0, 0)];
        cells[index(0, 0)] = Cell::Empty;
        cells[index(dr / 2, dc / 2)] = Cell::Empty;
        cells[index(dr, dc)] = frog;

        Some(HoppersState {
            rows: self.rows,
            cols: self.cols,
            cells,
        })
    }

    pub fn load(p: &Path) -> Result<Self, HoppersParseError> {
        let s = std::fs::read_to_string(p).map_err(|e| HoppersParseError::IOError {
            p: p.to_path_buf(),
            e,
        })?;
        HoppersState::try_from(s.as_str())
    }
}

impl State for HoppersState {
    /// Only the red frog is left.
    fn is_goal(&self) -> bool {
        self.count(Cell::Green) == 0 && self.count(Cell::Red) == 1
    }

    fn neighbours(&self) -> Vec<Self> {
        #[cfg(feature = "coz_profile")]
        coz::scope!("StateExpansion");

        self.jumps().iter().filter_map(|j| self.jump(j)).collect()
    }
}

/// Parses a board.
///
/// The first line holds `rows cols`, followed by `rows` lines of `cols`
/// whitespace-separated cells.
impl std::convert::TryFrom<&str> for HoppersState {
    type Error = HoppersParseError;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        let mut lines = s.lines();

        let header = lines.next().ok_or(HoppersParseError::EmptyInput)?;
        let invalid_dimensions = || HoppersParseError::InvalidDimensions {
            line: header.to_string(),
        };
        let fields: Vec<&str> = header.split_whitespace().collect();
        let &[rows, cols] = fields.as_slice() else {
            return Err(invalid_dimensions());
        };
        let rows: usize = rows.parse().map_err(|_| invalid_dimensions())?;
        let cols: usize = cols.parse().map_err(|_| invalid_dimensions())?;

        // `rows` is untrusted until every row has been read.
        let mut grid = Vec::<Vec<Cell>>::new();
        for row in 0..rows {
            let line = lines
                .next()
                .ok_or(HoppersParseError::MissingRow { row, rows })?;
            let tokens: Vec<&str> = line.split_whitespace().collect();
            if tokens.len() < cols {
                return Err(HoppersParseError::ShortRow {
                    row,
                    found: tokens.len(),
                    cols,
                });
            }

            let mut cells = Vec::<Cell>::with_capacity(cols);
            for (col, token) in tokens.iter().take(cols).enumerate() {
                // Only the first character of a token counts.
                let ch = token.chars().next().unwrap_or(' ');
                let cell = Cell::try_from(ch)
                    .map_err(|e| HoppersParseError::InvalidCell { e, row, col })?;
                cells.push(cell);
            }
            grid.push(cells);
        }

        Ok(HoppersState::new_from_rows(grid))
    }
}

impl std::fmt::Display for HoppersState {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        for row in self.rows() {
            for cell in row {
                write!(f, " {cell}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
