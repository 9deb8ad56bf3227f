use crate::*;

/// Clock reading shown on the welcome board.
pub const SPLASH_ELAPSED_SECS: u32 = 404;

/// Mines spelling "404" on the default 12x16 custom board.
pub const SPLASH_MINES: [Coord2; 50] = [
    // 4
    (2, 1),
    (3, 1),
    (4, 1),
    (5, 1),
    (6, 1),
    (6, 2),
    (6, 3),
    (6, 4),
    (2, 4),
    (3, 4),
    (4, 4),
    (5, 4),
    (7, 4),
    (8, 4),
    (9, 4),
    // 0
    (2, 6),
    (3, 6),
    (4, 6),
    (5, 6),
    (6, 6),
    (7, 6),
    (8, 6),
    (9, 6),
    (2, 7),
    (2, 8),
    (2, 9),
    (3, 9),
    (4, 9),
    (5, 9),
    (6, 9),
    (7, 9),
    (8, 9),
    (9, 9),
    (9, 8),
    (9, 7),
    // 4
    (2, 14),
    (2, 11),
    (3, 11),
    (4, 11),
    (5, 11),
    (6, 11),
    (6, 12),
    (6, 13),
    (7, 14),
    (3, 14),
    (4, 14),
    (5, 14),
    (6, 14),
    (8, 14),
    (9, 14),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splash_fits_default_custom_board() {
        let size = Setting::default_custom().size();
        let board = Board::from_mines(size, &SPLASH_MINES).unwrap();

        assert_eq!(board.mine_count(), 50);
    }
}
