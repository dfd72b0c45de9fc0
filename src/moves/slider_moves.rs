//! Ray geometry for bishops, rooks and queens.
//!
//! Sliders attack along a rank, file or diagonal as long as every square
//! strictly between origin and target is empty. The same line stepping is
//! reused to list interposition squares for check responses.

use crate::game_state::board::Board;
use crate::game_state::chess_types::{PieceKind, Square};

pub const BISHOP_DIRECTIONS: [(i8, i8); 4] = [(-1, -1), (-1, 1), (1, -1), (1, 1)];
pub const ROOK_DIRECTIONS: [(i8, i8); 4] = [(-1, 0), (1, 0), (0, -1), (0, 1)];
pub const QUEEN_DIRECTIONS: [(i8, i8); 8] = [
    (-1, -1),
    (-1, 1),
    (1, -1),
    (1, 1),
    (-1, 0),
    (1, 0),
    (0, -1),
    (0, 1),
];

/// Ray directions for a sliding kind, empty for everything else.
pub fn slider_directions(kind: PieceKind) -> &'static [(i8, i8)] {
    match kind {
        PieceKind::Bishop => &BISHOP_DIRECTIONS,
        PieceKind::Rook => &ROOK_DIRECTIONS,
        PieceKind::Queen => &QUEEN_DIRECTIONS,
        _ => &[],
    }
}

/// Unit step from `from` toward `to` when both share a rank, file or diagonal.
pub fn line_step(from: Square, to: Square) -> Option<(i8, i8)> {
    let d_row = to.row - from.row;
    let d_col = to.col - from.col;
    if d_row == 0 && d_col == 0 {
        return None;
    }
    if d_row == 0 || d_col == 0 || d_row.abs() == d_col.abs() {
        Some((d_row.signum(), d_col.signum()))
    } else {
        None
    }
}

/// Squares strictly between `from` and `to` along their common line.
///
/// Returns an empty list when the two squares are not aligned (knight
/// geometry) or adjacent.
pub fn squares_between(from: Square, to: Square) -> Vec<Square> {
    let Some((step_row, step_col)) = line_step(from, to) else {
        return Vec::new();
    };

    let mut squares = Vec::new();
    let mut current = Square::new(from.row + step_row, from.col + step_col);
    while current != to {
        squares.push(current);
        current = Square::new(current.row + step_row, current.col + step_col);
    }
    squares
}

#[inline]
pub fn ray_clear(board: &Board, from: Square, to: Square) -> bool {
    squares_between(from, to)
        .into_iter()
        .all(|sq| board.is_empty(sq))
}

/// Whether a slider of `kind` on `from` attacks `to` on this board.
pub fn slider_attacks(board: &Board, kind: PieceKind, from: Square, to: Square) -> bool {
    let d_row = (to.row - from.row).abs();
    let d_col = (to.col - from.col).abs();
    if d_row == 0 && d_col == 0 {
        return false;
    }

    let diagonal = d_row == d_col;
    let straight = d_row == 0 || d_col == 0;
    let on_line = match kind {
        PieceKind::Bishop => diagonal,
        PieceKind::Rook => straight,
        PieceKind::Queen => diagonal || straight,
        _ => false,
    };

    on_line && ray_clear(board, from, to)
}
