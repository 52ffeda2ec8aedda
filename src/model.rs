//! Interactive play on a Hoppers board.
//!
//! The model owns the current board and the pending selection. Views register
//! as observers and get a message after every operation.

use std::path::Path;
use std::path::PathBuf;

use derive_more::Display;

use crate::algorithms::bfs::solve;
use crate::problems::hoppers::Direction;
use crate::problems::hoppers::HoppersParseError;
use crate::problems::hoppers::HoppersState;
use crate::problems::hoppers::Jump;

/// Gets notified after every model operation.
pub trait Observer {
    fn update(&self, model: &HoppersModel, msg: &str);
}

impl<F> Observer for F
where
    F: Fn(&HoppersModel, &str),
{
    fn update(&self, model: &HoppersModel, msg: &str) {
        self(model, msg)
    }
}

#[derive(Copy, Clone, Debug, Display, PartialEq, Eq)]
pub enum HintOutcome {
    #[display("Next step!")]
    Moved,
    #[display("Already solved!")]
    AlreadySolved,
    #[display("There is no solution :(")]
    NoSolution,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum SelectOutcome {
    /// A frog was picked. The next selection is its landing cell.
    Selected,
    InvalidSelection,
    Jumped(Jump),
    /// The frog at `from` can't land on the second selection.
    CannotJump { from: (usize, usize) },
}

pub struct HoppersModel {
    observers: Vec<Box<dyn Observer>>,
    current: HoppersState,
    /// Reloaded on reset.
    board: PathBuf,
    /// The frog picked by the first half of a move.
    selection: Option<(usize, usize)>,
}

impl HoppersModel {
    pub fn new(board: &Path) -> Result<Self, HoppersParseError> {
        Ok(Self {
            observers: vec![],
            current: HoppersState::load(board)?,
            board: board.to_path_buf(),
            selection: None,
        })
    }

    pub fn add_observer<O>(&mut self, observer: O)
    where
        O: Observer + 'static,
    {
        self.observers.push(Box::new(observer));
    }

    fn alert_observers(&self, msg: &str) {
        for observer in &self.observers {
            observer.update(self, msg);
        }
    }

    pub fn current(&self) -> &HoppersState {
        &self.current
    }

    pub fn board(&self) -> &Path {
        &self.board
    }

    pub fn selection(&self) -> Option<(usize, usize)> {
        self.selection
    }

    /// Makes the first move of a shortest solution.
    pub fn hint(&mut self) -> HintOutcome {
        let solution = solve(self.current.clone(), None);
        let outcome = match solution.path.get(1) {
            Some(next) => {
                self.current = next.clone();
                HintOutcome::Moved
            }
            None if solution.path.is_empty() => HintOutcome::NoSolution,
            None => HintOutcome::AlreadySolved,
        };
        log::info!("Hint: {outcome} ({} configs explored)", solution.unique);

        self.alert_observers(&outcome.to_string());
        outcome
    }

    /// Whether the current board can still be solved.
    pub fn check(&self) -> bool {
        let solvable = !solve(self.current.clone(), None).path.is_empty();
        if solvable {
            self.alert_observers("There is a solution left!");
        } else {
            self.alert_observers("There is no solution :(");
        }
        solvable
    }

    /// Switches to a new board file. Keeps the current one on failure.
    pub fn load(&mut self, board: &Path) -> Result<(), HoppersParseError> {
        match HoppersState::load(board) {
            Ok(state) => {
                self.current = state;
                self.board = board.to_path_buf();
                self.selection = None;

                let name = board
                    .file_name()
                    .map_or_else(|| board.display().to_string(), |n| n.to_string_lossy().into());
                log::info!("Loaded {}", board.display());
                self.alert_observers(&format!("Loaded: {name}"));
                Ok(())
            }
            Err(e) => {
                log::warn!("{e}");
                self.alert_observers(&format!("Failed to load: {}", board.display()));
                Err(e)
            }
        }
    }

    /// Picks a frog, or its landing cell when a frog was already picked.
    pub fn select(&mut self, row: isize, col: isize) -> SelectOutcome {
        let outcome = match self.selection.take() {
            None => self.select_frog(row, col),
            Some(from) => self.select_landing(from, row, col),
        };

        let msg = match outcome {
            SelectOutcome::Selected => format!("Selected ({row}, {col})"),
            SelectOutcome::InvalidSelection => format!("Invalid selection ({row}, {col})"),
            SelectOutcome::Jumped(j) => {
                format!("Jumped from ({}, {})  to ({row}, {col})", j.row, j.col)
            }
            SelectOutcome::CannotJump {
                from: (from_row, from_col),
            } => format!("Can't jump from ({from_row}, {from_col})  to ({row}, {col})"),
        };
        self.alert_observers(&msg);
        outcome
    }

    fn select_frog(&mut self, row: isize, col: isize) -> SelectOutcome {
        let cell = usize::try_from(row)
            .ok()
            .zip(usize::try_from(col).ok())
            .and_then(|(r, c)| Some((r, c, self.current.at(r, c)?)));
        match cell {
            Some((r, c, cell)) if cell.is_frog() => {
                self.selection = Some((r, c));
                SelectOutcome::Selected
            }
            _ => SelectOutcome::InvalidSelection,
        }
    }

    fn select_landing(&mut self, from: (usize, usize), row: isize, col: isize) -> SelectOutcome {
        let (from_row, from_col) = from;
        let rows = row.checked_sub(from_row as isize);
        let cols = col.checked_sub(from_col as isize);
        let jump = rows
            .zip(cols)
            .and_then(|(rows, cols)| Direction::from_offset(rows, cols))
            .map(|direction| Jump {
                row: from_row,
                col: from_col,
                direction,
            });

        match jump.and_then(|j| Some((j, self.current.jump(&j)?))) {
            Some((j, next)) => {
                log::info!("Jump {j}");
                self.current = next;
                SelectOutcome::Jumped(j)
            }
            None => SelectOutcome::CannotJump { from },
        }
    }

    /// Reloads the board file.
    pub fn reset(&mut self) -> Result<(), HoppersParseError> {
        match HoppersState::load(&self.board) {
            Ok(state) => {
                self.current = state;
                self.selection = None;
                log::info!("Reset {}", self.board.display());
                self.alert_observers("Puzzle Reset!");
                Ok(())
            }
            Err(e) => {
                log::warn!("{e}");
                self.alert_observers(&format!("Failed to reset: {}", self.board.display()));
                Err(e)
            }
        }
    }
}

impl std::fmt::Debug for HoppersModel {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        f.debug_struct("HoppersModel")
            .field("board", &self.board)
            .field("selection", &self.selection)
            .field("observers", &self.observers.len())
            .finish()
    }
}

/// The board with row and column labels.
impl std::fmt::Display for HoppersModel {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        let (_, cols) = self.current.dimensions();
        write!(f, "   ")?;
        for c in 0..cols {
            write!(f, "{c} ")?;
        }
        writeln!(f)?;
        writeln!(f, "   {}", "--".repeat(cols))?;
        for (r, row) in self.current.rows().enumerate() {
            write!(f, "{r}| ")?;
            for cell in row {
                write!(f, " {cell}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
