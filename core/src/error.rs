use thiserror::Error;

use crate::CellCount;

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Invalid coordinates")]
    InvalidCoords,
    #[error("Board needs at least one row and one column")]
    EmptyBoard,
    #[error("Too many mines: {mines} requested but the board only has {cells} cells")]
    TooManyMines { mines: CellCount, cells: CellCount },
}

impl GameError {
    /// Whether the error was caused by an unsatisfiable board configuration.
    pub const fn is_invalid_settings(self) -> bool {
        matches!(self, Self::EmptyBoard | Self::TooManyMines { .. })
    }
}

pub type Result<T> = core::result::Result<T, GameError>;
