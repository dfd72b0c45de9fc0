//! 8x8 mailbox board.
//!
//! Squares are stored row-major with row 0 being Black's back rank. All
//! scans (`pieces`, `pieces_of`) walk rows 0..8 and columns 0..8 in order,
//! which is the tie-break order used by move selection.

use crate::game_state::chess_types::{Color, Piece, PieceKind, Square};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Board {
    buffer: [[Option<Piece>; 8]; 8],
}

impl Board {
    #[inline]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Piece on `square`, if any. Off-board squares read as empty.
    #[inline]
    pub fn piece_at(&self, square: Square) -> Option<Piece> {
        if !square.is_valid() {
            return None;
        }
        self.buffer[square.row as usize][square.col as usize]
    }

    #[inline]
    pub fn is_empty(&self, square: Square) -> bool {
        self.piece_at(square).is_none()
    }

    /// Overwrite `square` and return whatever stood there before.
    #[inline]
    pub fn set(&mut self, square: Square, piece: Option<Piece>) -> Option<Piece> {
        std::mem::replace(
            &mut self.buffer[square.row as usize][square.col as usize],
            piece,
        )
    }

    #[inline]
    pub fn place(&mut self, square: Square, piece: Piece) {
        self.set(square, Some(piece));
    }

    #[inline]
    pub fn remove(&mut self, square: Square) -> Option<Piece> {
        self.set(square, None)
    }

    /// All occupied squares in board-scan order.
    pub fn pieces(&self) -> impl Iterator<Item = (Square, Piece)> + '_ {
        Square::all().filter_map(move |sq| self.piece_at(sq).map(|p| (sq, p)))
    }

    pub fn pieces_of(&self, color: Color) -> impl Iterator<Item = (Square, Piece)> + '_ {
        self.pieces().filter(move |(_, p)| p.color == color)
    }

    /// First king of `color` in scan order.
    pub fn king_square(&self, color: Color) -> Option<Square> {
        self.pieces_of(color)
            .find(|(_, p)| p.kind == PieceKind::King)
            .map(|(sq, _)| sq)
    }

    pub fn king_count(&self, color: Color) -> usize {
        self.pieces_of(color)
            .filter(|(_, p)| p.kind == PieceKind::King)
            .count()
    }

    /// Sum of current hit points over every non-king piece of `color`.
    pub fn total_side_hp(&self, color: Color) -> u32 {
        self.pieces_of(color)
            .filter(|(_, p)| !p.is_king())
            .map(|(_, p)| u32::from(p.current_hp()))
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::Board;
    use crate::game_state::chess_types::{Color, Piece, PieceKind, Square};

    #[test]
    fn total_side_hp_skips_kings_and_uses_current_hp() {
        let mut board = Board::empty();
        board.place(Square::new(7, 4), Piece::new(PieceKind::King, Color::White));
        board.place(Square::new(7, 0), Piece::new(PieceKind::Rook, Color::White));
        board.place(Square::new(6, 0), Piece::with_hp(PieceKind::Pawn, Color::White, 1));
        board.place(Square::new(0, 4), Piece::new(PieceKind::Queen, Color::Black));

        assert_eq!(board.total_side_hp(Color::White), 7);
        assert_eq!(board.total_side_hp(Color::Black), 8);
        assert_eq!(board.king_square(Color::White), Some(Square::new(7, 4)));
        assert_eq!(board.king_square(Color::Black), None);
    }

    #[test]
    fn set_returns_previous_occupant() {
        let mut board = Board::empty();
        let sq = Square::new(3, 3);
        let knight = Piece::new(PieceKind::Knight, Color::Black);
        assert_eq!(board.set(sq, Some(knight)), None);
        assert_eq!(board.remove(sq), Some(knight));
        assert!(board.is_empty(sq));
    }
}
