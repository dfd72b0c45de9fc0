//! Knight jump geometry.

use crate::game_state::chess_types::Square;

pub const KNIGHT_OFFSETS: [(i8, i8); 8] = [
    (-2, -1),
    (-2, 1),
    (-1, -2),
    (-1, 2),
    (1, -2),
    (1, 2),
    (2, -1),
    (2, 1),
];

#[inline]
pub fn knight_attacks(from: Square, to: Square) -> bool {
    let d_row = (to.row - from.row).abs();
    let d_col = (to.col - from.col).abs();
    (d_row == 2 && d_col == 1) || (d_row == 1 && d_col == 2)
}

/// On-board knight targets from `from`, in offset order.
pub fn knight_targets(from: Square) -> impl Iterator<Item = Square> {
    KNIGHT_OFFSETS
        .into_iter()
        .filter_map(move |(d_row, d_col)| from.offset(d_row, d_col))
}
