//! Core value types shared by every subsystem.
//!
//! Pieces carry an optional hit-point counter on top of the usual kind/color
//! pair. Per-kind constants (max HP, base damage, material value) live in
//! `chess_rules` and are indexed through `PieceKind::index`.

use std::fmt;

use crate::game_state::chess_rules::{BASE_DAMAGE, MATERIAL_VALUE, MAX_HP};

/// Side of a piece.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Color {
    White,
    Black,
}

impl Color {
    #[inline]
    pub const fn index(self) -> usize {
        match self {
            Color::White => 0,
            Color::Black => 1,
        }
    }

    #[inline]
    pub const fn opposite(self) -> Self {
        match self {
            Color::White => Color::Black,
            Color::Black => Color::White,
        }
    }

    /// Row delta of a forward pawn step. White advances toward row 0.
    #[inline]
    pub const fn pawn_direction(self) -> i8 {
        match self {
            Color::White => -1,
            Color::Black => 1,
        }
    }

    #[inline]
    pub const fn pawn_start_row(self) -> i8 {
        match self {
            Color::White => 6,
            Color::Black => 1,
        }
    }

    /// Row on which this color's pawns promote.
    #[inline]
    pub const fn promotion_row(self) -> i8 {
        match self {
            Color::White => 0,
            Color::Black => 7,
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Color::White => write!(f, "white"),
            Color::Black => write!(f, "black"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceKind {
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
}

impl PieceKind {
    pub const ALL: [PieceKind; 6] = [
        PieceKind::Pawn,
        PieceKind::Knight,
        PieceKind::Bishop,
        PieceKind::Rook,
        PieceKind::Queen,
        PieceKind::King,
    ];

    #[inline]
    pub const fn index(self) -> usize {
        match self {
            PieceKind::Pawn => 0,
            PieceKind::Knight => 1,
            PieceKind::Bishop => 2,
            PieceKind::Rook => 3,
            PieceKind::Queen => 4,
            PieceKind::King => 5,
        }
    }

    /// Maximum hit points. Kings report 0 and never take combat damage.
    #[inline]
    pub const fn max_hp(self) -> u8 {
        MAX_HP[self.index()]
    }

    /// Unboosted damage dealt by a base attack.
    #[inline]
    pub const fn base_damage(self) -> u8 {
        BASE_DAMAGE[self.index()]
    }

    #[inline]
    pub const fn material_value(self) -> f64 {
        MATERIAL_VALUE[self.index()]
    }

    #[inline]
    pub const fn fen_char(self) -> char {
        match self {
            PieceKind::Pawn => 'p',
            PieceKind::Knight => 'n',
            PieceKind::Bishop => 'b',
            PieceKind::Rook => 'r',
            PieceKind::Queen => 'q',
            PieceKind::King => 'k',
        }
    }
}

/// A piece on the board. `hp == None` means "at max HP for its kind".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Piece {
    pub kind: PieceKind,
    pub color: Color,
    pub hp: Option<u8>,
}

impl Piece {
    #[inline]
    pub const fn new(kind: PieceKind, color: Color) -> Self {
        Self {
            kind,
            color,
            hp: None,
        }
    }

    #[inline]
    pub const fn with_hp(kind: PieceKind, color: Color, hp: u8) -> Self {
        Self {
            kind,
            color,
            hp: Some(hp),
        }
    }

    #[inline]
    pub fn current_hp(&self) -> u8 {
        self.hp.unwrap_or(self.kind.max_hp())
    }

    /// Remaining health as a fraction of max. Kings always count as whole.
    pub fn hp_fraction(&self) -> f64 {
        let max = self.kind.max_hp();
        if self.kind == PieceKind::King || max == 0 {
            return 1.0;
        }
        f64::from(self.current_hp()) / f64::from(max)
    }

    #[inline]
    pub fn is_king(&self) -> bool {
        self.kind == PieceKind::King
    }
}

/// Board coordinate. Row 0 is Black's back rank (rank 8), column 0 is file a.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Square {
    pub row: i8,
    pub col: i8,
}

impl Square {
    #[inline]
    pub const fn new(row: i8, col: i8) -> Self {
        Self { row, col }
    }

    #[inline]
    pub const fn in_bounds(row: i8, col: i8) -> bool {
        row >= 0 && row < 8 && col >= 0 && col < 8
    }

    #[inline]
    pub const fn is_valid(self) -> bool {
        Self::in_bounds(self.row, self.col)
    }

    /// Square shifted by `(d_row, d_col)`, or `None` when it leaves the board.
    #[inline]
    pub const fn offset(self, d_row: i8, d_col: i8) -> Option<Square> {
        let row = self.row + d_row;
        let col = self.col + d_col;
        if Self::in_bounds(row, col) {
            Some(Square { row, col })
        } else {
            None
        }
    }

    /// Every square in board-scan order (row-major from a8).
    pub fn all() -> impl Iterator<Item = Square> {
        (0..8i8).flat_map(|row| (0..8i8).map(move |col| Square { row, col }))
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let file = char::from(b'a' + self.col as u8);
        let rank = char::from(b'8' - self.row as u8);
        write!(f, "{file}{rank}")
    }
}

#[cfg(test)]
mod tests {
    use super::{Color, Piece, PieceKind, Square};

    #[test]
    fn piece_without_hp_is_at_max() {
        let rook = Piece::new(PieceKind::Rook, Color::White);
        assert_eq!(rook.current_hp(), 6);
        assert_eq!(rook.hp_fraction(), 1.0);

        let hurt = Piece::with_hp(PieceKind::Queen, Color::Black, 2);
        assert_eq!(hurt.hp_fraction(), 0.25);
    }

    #[test]
    fn square_display_uses_rank_8_for_row_0() {
        assert_eq!(Square::new(0, 0).to_string(), "a8");
        assert_eq!(Square::new(7, 7).to_string(), "h1");
        assert_eq!(Square::new(6, 4).to_string(), "e2");
    }

    #[test]
    fn offset_rejects_off_board_targets() {
        assert_eq!(Square::new(0, 0).offset(-1, 0), None);
        assert_eq!(Square::new(0, 0).offset(1, 2), Some(Square::new(1, 2)));
        assert_eq!(Square::all().count(), 64);
    }
}
