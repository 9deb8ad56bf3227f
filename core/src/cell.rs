use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::*;

/// In-bounds neighbor coordinates of a cell, at most eight.
pub type Neighbors = SmallVec<[Coord2; 8]>;

/// One square of the board.
///
/// Neighbors are stored as coordinates into the owning [`Board`], so cells never reference each other directly.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Cell {
    coords: Coord2,
    is_mine: bool,
    is_revealed: bool,
    is_flagged: bool,
    adjacent_mines: u8,
    triggered_game_over: bool,
    neighbors: Neighbors,
}

impl Cell {
    pub fn new(coords: Coord2) -> Self {
        Self {
            coords,
            is_mine: false,
            is_revealed: false,
            is_flagged: false,
            adjacent_mines: 0,
            triggered_game_over: false,
            neighbors: SmallVec::new(),
        }
    }

    pub fn coords(&self) -> Coord2 {
        self.coords
    }

    pub fn row(&self) -> Coord {
        self.coords.0
    }

    pub fn column(&self) -> Coord {
        self.coords.1
    }

    pub fn is_mine(&self) -> bool {
        self.is_mine
    }

    pub fn is_revealed(&self) -> bool {
        self.is_revealed
    }

    pub fn is_flagged(&self) -> bool {
        self.is_flagged
    }

    pub fn adjacent_mines(&self) -> u8 {
        self.adjacent_mines
    }

    /// Set only on the mine whose reveal lost the game.
    pub fn triggered_game_over(&self) -> bool {
        self.triggered_game_over
    }

    pub fn neighbors(&self) -> &[Coord2] {
        &self.neighbors
    }

    /// Reveals the cell unless it is flagged or already open, returns whether it changed.
    pub fn reveal(&mut self) -> bool {
        if self.is_flagged || self.is_revealed {
            return false;
        }
        self.is_revealed = true;
        true
    }

    /// Reveals the cell even when flagged, used for the end-of-game mine sweep.
    pub fn expose(&mut self) -> bool {
        let changed = !self.is_revealed;
        self.is_revealed = true;
        changed
    }

    /// Flips the flag of a hidden cell, returns whether it changed.
    pub fn toggle_flag(&mut self) -> bool {
        if self.is_revealed {
            return false;
        }
        self.is_flagged = !self.is_flagged;
        true
    }

    pub fn view(&self) -> CellView {
        match (self.is_revealed, self.is_mine, self.is_flagged) {
            (true, true, _) if self.triggered_game_over => CellView::TriggeredMine,
            (true, true, _) => CellView::Mine,
            (true, false, _) => CellView::Revealed(self.adjacent_mines),
            (false, _, true) => CellView::Flagged,
            (false, _, false) => CellView::Hidden,
        }
    }

    pub(crate) fn set_mine(&mut self, is_mine: bool) {
        self.is_mine = is_mine;
    }

    pub(crate) fn set_adjacency(&mut self, neighbors: Neighbors, adjacent_mines: u8) {
        self.neighbors = neighbors;
        self.adjacent_mines = adjacent_mines;
    }

    pub(crate) fn set_adjacent_mines(&mut self, adjacent_mines: u8) {
        self.adjacent_mines = adjacent_mines;
    }

    pub(crate) fn mark_triggered(&mut self) {
        self.triggered_game_over = true;
    }
}

/// Player-visible state of a cell, what a UI needs to draw it.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CellView {
    Hidden,
    Flagged,
    Revealed(u8),
    Mine,
    TriggeredMine,
}

impl CellView {
    /// Whether the cell is visually closed
    pub const fn is_closed(self) -> bool {
        matches!(self, Self::Hidden | Self::Flagged)
    }
}

impl Default for CellView {
    fn default() -> Self {
        Self::Hidden
    }
}
