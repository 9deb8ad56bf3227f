/// Single coordinate axis used for board rows, columns and positions.
pub type Coord = u8;

/// Count type used for mine counts and total-cell counts.
pub type CellCount = u16;

/// Two-dimensional coordinates `(row, column)`.
pub type Coord2 = (Coord, Coord);

pub trait ToNdIndex {
    type Output;
    fn to_nd_index(self) -> Self::Output;
}

impl ToNdIndex for Coord2 {
    type Output = [usize; 2];

    fn to_nd_index(self) -> Self::Output {
        [self.0.into(), self.1.into()]
    }
}

/// Number of cells on a `rows`×`columns` board.
pub const fn cell_count((rows, columns): Coord2) -> CellCount {
    (rows as CellCount).saturating_mul(columns as CellCount)
}

/// Walks the 3×3 block around `center`, clipped to the board, skipping `center` itself.
///
/// Yields in row-major order.
#[derive(Clone, Debug)]
pub struct NeighborIter {
    center: Coord2,
    first_column: Coord,
    last: Coord2,
    next: Option<Coord2>,
}

impl NeighborIter {
    pub fn new(center: Coord2, (rows, columns): Coord2) -> Self {
        let (row, column) = center;
        if rows == 0 || columns == 0 {
            return Self {
                center,
                first_column: 0,
                last: (0, 0),
                next: None,
            };
        }

        let first = (row.saturating_sub(1), column.saturating_sub(1));
        let last = (
            row.saturating_add(1).min(rows - 1),
            column.saturating_add(1).min(columns - 1),
        );
        let in_bounds = first.0 <= last.0 && first.1 <= last.1;
        Self {
            center,
            first_column: first.1,
            last,
            next: in_bounds.then_some(first),
        }
    }

    fn advance(&self, (row, column): Coord2) -> Option<Coord2> {
        if column < self.last.1 {
            Some((row, column + 1))
        } else if row < self.last.0 {
            Some((row + 1, self.first_column))
        } else {
            None
        }
    }
}

impl Iterator for NeighborIter {
    type Item = Coord2;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let current = self.next?;
            self.next = self.advance(current);
            if current != self.center {
                return Some(current);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn corner_has_three_neighbors() {
        let neighbors: smallvec::SmallVec<[Coord2; 8]> = NeighborIter::new((0, 0), (9, 9)).collect();
        assert_eq!(neighbors.as_slice(), &[(0, 1), (1, 0), (1, 1)]);
    }

    #[test]
    fn interior_has_eight_neighbors() {
        assert_eq!(NeighborIter::new((4, 4), (9, 9)).count(), 8);
        assert_eq!(NeighborIter::new((0, 4), (9, 9)).count(), 5);
    }

    #[test]
    fn interior_order_is_row_major() {
        let neighbors: smallvec::SmallVec<[Coord2; 8]> = NeighborIter::new((1, 1), (3, 3)).collect();
        assert_eq!(
            neighbors.as_slice(),
            &[(0, 0), (0, 1), (0, 2), (1, 0), (1, 2), (2, 0), (2, 1), (2, 2)]
        );
    }

    #[test]
    fn far_edges_are_clipped() {
        assert_eq!(NeighborIter::new((8, 4), (9, 9)).count(), 5);
        assert_eq!(NeighborIter::new((8, 8), (9, 9)).count(), 3);
        assert_eq!(NeighborIter::new((0, 2), (1, 3)).next(), Some((0, 1)));
        assert_eq!(NeighborIter::new((0, 2), (1, 3)).count(), 1);
    }

    #[test]
    fn center_outside_board_has_no_neighbors() {
        assert_eq!(NeighborIter::new((5, 5), (3, 3)).count(), 0);
        assert_eq!(NeighborIter::new((0, 0), (0, 4)).count(), 0);
    }

    #[test]
    fn single_cell_board_has_no_neighbors() {
        assert_eq!(NeighborIter::new((0, 0), (1, 1)).count(), 0);
    }

    #[test]
    fn board_edge_at_coordinate_limit() {
        let bounds = (Coord::MAX, Coord::MAX);
        assert_eq!(NeighborIter::new((Coord::MAX - 1, Coord::MAX - 1), bounds).count(), 3);
    }

    #[test]
    fn cell_count_fits_largest_board() {
        assert_eq!(cell_count((16, 30)), 480);
        assert_eq!(cell_count((Coord::MAX, Coord::MAX)), 65025);
    }
}
