use crate::*;

impl Board {
    /// Creates, mines and indexes a board for `setting`, ready for play.
    pub fn generate(setting: Setting, sampler: &mut impl MineSampler) -> Result<Self> {
        setting.validate()?;
        let mut board = Self::new(setting.size())?;
        board.populate_mines(setting.mines, sampler)?;
        board.compute_adjacency();
        log::debug!(
            "Generated {}x{} board with {} mines",
            setting.rows,
            setting.columns,
            board.mine_count()
        );
        Ok(board)
    }

    /// Adds `mines` mines by rejection sampling, at least one safe cell must remain.
    pub fn populate_mines(&mut self, mines: CellCount, sampler: &mut impl MineSampler) -> Result<()> {
        let requested = self.mine_count().saturating_add(mines);
        if requested >= self.total_cells() {
            return Err(GameError::TooManyMines {
                mines: requested,
                cells: self.total_cells(),
            });
        }

        for _ in 0..mines {
            let coords = self.sample_free_cell(sampler, None);
            self.set_mine(coords, true);
        }
        Ok(())
    }

    /// Places one extra mine on a random safe cell other than `exclude`.
    ///
    /// Returns `None` without touching the board when there is no such cell.
    pub fn place_random_mine(
        &mut self,
        exclude: Coord2,
        sampler: &mut impl MineSampler,
    ) -> Option<Coord2> {
        let excluded_is_free = self
            .validate_coords(exclude)
            .is_ok_and(|coords| !self[coords].is_mine());
        let candidates = self.safe_cell_count() - CellCount::from(excluded_is_free);
        if candidates == 0 {
            log::warn!("No safe cell left to move a mine to");
            return None;
        }

        let coords = self.sample_free_cell(sampler, Some(exclude));
        self.set_mine(coords, true);
        Some(coords)
    }

    /// Caches the neighbor list and the adjacent mine count of every cell.
    pub fn compute_adjacency(&mut self) {
        let (rows, columns) = self.size();
        for row in 0..rows {
            for column in 0..columns {
                let coords = (row, column);
                let neighbors: Neighbors = self.neighbors_of(coords).collect();
                let count = self.count_mines(&neighbors);
                self[coords].set_adjacency(neighbors, count);
            }
        }
    }

    /// Recounts adjacent mines for `coords` and its neighbors after a mine moved.
    pub(crate) fn refresh_adjacency_around(&mut self, coords: Coord2) {
        let neighbors = Neighbors::from_slice(self[coords].neighbors());
        for pos in core::iter::once(coords).chain(neighbors) {
            let count = self.count_mines(self[pos].neighbors());
            self[pos].set_adjacent_mines(count);
        }
    }

    fn count_mines(&self, coords: &[Coord2]) -> u8 {
        coords
            .iter()
            .filter(|&&pos| self[pos].is_mine())
            .fold(0, |count, _| count + 1)
    }

    fn sample_free_cell(&self, sampler: &mut impl MineSampler, exclude: Option<Coord2>) -> Coord2 {
        loop {
            let coords = sampler.sample(self.size());
            if self.validate_coords(coords).is_err() || Some(coords) == exclude {
                continue;
            }
            if !self[coords].is_mine() {
                return coords;
            }
        }
    }
}
