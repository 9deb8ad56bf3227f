use alloc::vec;
use alloc::vec::Vec;
use core::ops::{Index, IndexMut};
use ndarray::{Array2, ArrayView1};
use serde::{Deserialize, Serialize};

use crate::*;

/// Rectangular grid of cells, owner of every [`Cell`] in a game.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Board {
    size: Coord2,
    cells: Array2<Cell>,
    mine_count: CellCount,
}

impl Board {
    /// Allocates a `rows`×`columns` grid of fresh cells without mines or adjacency.
    pub fn new(size: Coord2) -> Result<Self> {
        if size.0 == 0 || size.1 == 0 {
            return Err(GameError::EmptyBoard);
        }
        let cells = Array2::from_shape_fn(size.to_nd_index(), |(row, column)| {
            Cell::new((row as Coord, column as Coord))
        });
        Ok(Self {
            size,
            cells,
            mine_count: 0,
        })
    }

    /// Builds a board with mines at exactly `mine_coords`, adjacency included.
    pub fn from_mines(size: Coord2, mine_coords: &[Coord2]) -> Result<Self> {
        let mut board = Self::new(size)?;
        for &coords in mine_coords {
            let coords = board.validate_coords(coords)?;
            board.set_mine(coords, true);
        }
        if board.mine_count >= board.total_cells() {
            return Err(GameError::TooManyMines {
                mines: board.mine_count,
                cells: board.total_cells(),
            });
        }
        board.compute_adjacency();
        Ok(board)
    }

    pub fn validate_coords(&self, coords: Coord2) -> Result<Coord2> {
        if coords.0 < self.size.0 && coords.1 < self.size.1 {
            Ok(coords)
        } else {
            Err(GameError::InvalidCoords)
        }
    }

    pub fn size(&self) -> Coord2 {
        self.size
    }

    pub fn rows(&self) -> Coord {
        self.size.0
    }

    pub fn columns(&self) -> Coord {
        self.size.1
    }

    pub fn total_cells(&self) -> CellCount {
        cell_count(self.size)
    }

    pub fn mine_count(&self) -> CellCount {
        self.mine_count
    }

    pub fn safe_cell_count(&self) -> CellCount {
        self.total_cells() - self.mine_count
    }

    pub fn flagged_count(&self) -> CellCount {
        self.cells.iter().filter(|cell| cell.is_flagged()).count() as CellCount
    }

    /// In-bounds neighbors of `coords` on this board, computed rather than read from the cell cache.
    pub fn neighbors_of(&self, coords: Coord2) -> NeighborIter {
        NeighborIter::new(coords, self.size)
    }

    pub fn cell(&self, coords: Coord2) -> Result<&Cell> {
        let coords = self.validate_coords(coords)?;
        Ok(&self[coords])
    }

    pub fn iter(&self) -> impl Iterator<Item = &Cell> {
        self.cells.iter()
    }

    /// Rows of the grid, top to bottom.
    pub fn iter_rows(&self) -> impl Iterator<Item = ArrayView1<'_, Cell>> {
        self.cells.outer_iter()
    }

    pub(crate) fn set_mine(&mut self, coords: Coord2, is_mine: bool) {
        match (self[coords].is_mine(), is_mine) {
            (false, true) => self.mine_count += 1,
            (true, false) => self.mine_count -= 1,
            _ => return,
        }
        self[coords].set_mine(is_mine);
    }

    /// Reveals a cell and flood-fills outward through zero-count cells.
    ///
    /// Returns every cell that went from hidden to revealed. Flagged cells, already revealed cells and mines stop the
    /// cascade, the mine is only revealed when it is the target itself.
    pub fn reveal(&mut self, coords: Coord2) -> Result<Vec<Coord2>> {
        let coords = self.validate_coords(coords)?;
        let mut revealed = Vec::new();

        if !self[coords].reveal() {
            return Ok(revealed);
        }
        revealed.push(coords);
        let cell = &self[coords];
        log::debug!(
            "Revealed cell at {:?}, mine: {}, adjacent mines: {}",
            coords,
            cell.is_mine(),
            cell.adjacent_mines()
        );

        if cell.is_mine() || cell.adjacent_mines() != 0 {
            return Ok(revealed);
        }

        // is_revealed doubles as the visited marker
        let mut worklist = vec![coords];
        while let Some(visit_coords) = worklist.pop() {
            let neighbors = Neighbors::from_slice(self[visit_coords].neighbors());
            for neighbor in neighbors {
                let cell = &mut self[neighbor];
                if cell.is_mine() || !cell.reveal() {
                    continue;
                }
                revealed.push(neighbor);
                log::trace!(
                    "Flood revealed cell at {:?}, adjacent mines: {}",
                    neighbor,
                    cell.adjacent_mines()
                );

                if cell.adjacent_mines() == 0 {
                    worklist.push(neighbor);
                }
            }
        }

        log::debug!("Flood fill from {:?} revealed {} cells", coords, revealed.len());
        Ok(revealed)
    }

    /// Reveals every mine regardless of flags, returning the ones that changed.
    pub fn reveal_all_mines(&mut self) -> Vec<Coord2> {
        self.cells
            .iter_mut()
            .filter(|cell| cell.is_mine())
            .filter_map(|cell| cell.expose().then(|| cell.coords()))
            .collect()
    }

    /// True when no mine is revealed and every safe cell is.
    pub fn is_cleared(&self) -> bool {
        self.cells.iter().all(|cell| {
            if cell.is_mine() {
                !cell.is_revealed()
            } else {
                cell.is_revealed()
            }
        })
    }

    pub(crate) fn mark_triggered(&mut self, coords: Coord2) {
        self[coords].mark_triggered();
    }
}

impl Index<Coord2> for Board {
    type Output = Cell;

    fn index(&self, coords: Coord2) -> &Self::Output {
        &self.cells[coords.to_nd_index()]
    }
}

impl IndexMut<Coord2> for Board {
    fn index_mut(&mut self, coords: Coord2) -> &mut Self::Output {
        &mut self.cells[coords.to_nd_index()]
    }
}
