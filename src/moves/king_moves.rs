//! King step geometry.

use crate::game_state::chess_types::Square;

pub const KING_OFFSETS: [(i8, i8); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

#[inline]
pub fn king_attacks(from: Square, to: Square) -> bool {
    let d_row = (to.row - from.row).abs();
    let d_col = (to.col - from.col).abs();
    d_row <= 1 && d_col <= 1 && (d_row != 0 || d_col != 0)
}

pub fn king_targets(from: Square) -> impl Iterator<Item = Square> {
    KING_OFFSETS
        .into_iter()
        .filter_map(move |(d_row, d_col)| from.offset(d_row, d_col))
}
