//! Pawn attack geometry. Pawns only attack diagonally forward.

use crate::game_state::chess_types::{Color, Square};

#[inline]
pub fn pawn_attacks(color: Color, from: Square, to: Square) -> bool {
    to.row - from.row == color.pawn_direction() && (to.col - from.col).abs() == 1
}

/// The (up to two) squares a pawn of `color` on `from` attacks.
pub fn pawn_attack_targets(color: Color, from: Square) -> impl Iterator<Item = Square> {
    let dir = color.pawn_direction();
    [-1i8, 1]
        .into_iter()
        .filter_map(move |d_col| from.offset(dir, d_col))
}

#[cfg(test)]
mod tests {
    use super::{pawn_attack_targets, pawn_attacks};
    use crate::game_state::chess_types::{Color, Square};

    #[test]
    fn white_pawns_attack_toward_row_zero() {
        let e2 = Square::new(6, 4);
        assert!(pawn_attacks(Color::White, e2, Square::new(5, 3)));
        assert!(pawn_attacks(Color::White, e2, Square::new(5, 5)));
        assert!(!pawn_attacks(Color::White, e2, Square::new(7, 5)));
        assert!(!pawn_attacks(Color::White, e2, Square::new(5, 4)));
    }

    #[test]
    fn edge_pawn_has_one_attack_target() {
        let a7 = Square::new(1, 0);
        let targets: Vec<Square> = pawn_attack_targets(Color::Black, a7).collect();
        assert_eq!(targets, vec![Square::new(2, 1)]);
    }
}
