use thiserror::Error;

use crate::{CellCount, Coord};

/// Precondition violations raised when constructing a difficulty config.
///
/// Everything a player (or an automation hook feeding player-like input)
/// can trigger at runtime is a silent no-op instead, never an error.
#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("grid dimensions must be positive, got {rows}x{cols}")]
    EmptyGrid { rows: Coord, cols: Coord },
    #[error("{mines} mines do not leave a safe cell on a board of {total_cells} cells")]
    TooManyMines {
        mines: CellCount,
        total_cells: CellCount,
    },
}

pub type Result<T> = core::result::Result<T, GameError>;
