use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

/// Everything a UI needs to draw one frame.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub size: Coord2,
    pub cells: Array2<CellView>,
    pub mines_remaining: i32,
    pub elapsed_secs: u32,
    pub lifecycle: Lifecycle,
    pub current_preset: Preset,
    pub settings: Settings,
}

impl Snapshot {
    pub fn from_engine<S: MineSampler>(engine: &Engine<S>) -> Self {
        let board = engine.board();
        let size = board.size();
        let cells = Array2::from_shape_fn(size.to_nd_index(), |(row, column)| {
            board[(row as Coord, column as Coord)].view()
        });

        Self {
            size,
            cells,
            mines_remaining: engine.mines_remaining(),
            elapsed_secs: engine.elapsed_secs(),
            lifecycle: engine.lifecycle(),
            current_preset: engine.current_preset(),
            settings: engine.settings().clone(),
        }
    }

    pub fn cell_at(&self, coords: Coord2) -> CellView {
        self.cells[coords.to_nd_index()]
    }
}
