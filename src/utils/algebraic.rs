//! Square conversions for algebraic coordinates.
//!
//! Row 0 is rank 8 and column 0 is file a, so `a8` is `(0, 0)` and `h1` is
//! `(7, 7)`.

use crate::chess_errors::ChessErrors;
use crate::game_state::chess_types::Square;

/// Convert algebraic notation (for example: "e4") to a square.
pub fn algebraic_to_square(square: &str) -> Result<Square, ChessErrors> {
    let bytes = square.trim().as_bytes();
    if bytes.len() != 2 {
        return Err(ChessErrors::InvalidAlgebraic(square.to_owned()));
    }

    let file = bytes[0].to_ascii_lowercase();
    let rank = bytes[1];

    if !(b'a'..=b'h').contains(&file) || !(b'1'..=b'8').contains(&rank) {
        return Err(ChessErrors::InvalidAlgebraic(square.to_owned()));
    }

    let col = (file - b'a') as i8;
    let row = (b'8' - rank) as i8;
    Ok(Square::new(row, col))
}

/// Convert a square to algebraic notation (for example: "e4").
#[inline]
pub fn square_to_algebraic(square: Square) -> String {
    square.to_string()
}
