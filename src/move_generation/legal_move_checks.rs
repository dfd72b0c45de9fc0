//! Attack detection and check classification.
//!
//! Everything here is a brute-force scan over the 64 squares. None of these
//! functions report a missing king: a side without a king is simply never in
//! check. Entry points validate the board before relying on that.

use crate::game_state::board::Board;
use crate::game_state::chess_types::{Color, PieceKind, Square};
use crate::moves::king_moves::king_attacks;
use crate::moves::knight_moves::knight_attacks;
use crate::moves::pawn_moves::pawn_attacks;
use crate::moves::slider_moves::{slider_attacks, squares_between};

/// Whether the piece on `from` attacks `to`. Empty origins attack nothing.
pub fn piece_attacks(board: &Board, from: Square, to: Square) -> bool {
    let Some(piece) = board.piece_at(from) else {
        return false;
    };

    match piece.kind {
        PieceKind::Pawn => pawn_attacks(piece.color, from, to),
        PieceKind::Knight => knight_attacks(from, to),
        PieceKind::King => king_attacks(from, to),
        PieceKind::Bishop | PieceKind::Rook | PieceKind::Queen => {
            slider_attacks(board, piece.kind, from, to)
        }
    }
}

pub fn is_square_attacked(board: &Board, square: Square, attacker_color: Color) -> bool {
    board
        .pieces_of(attacker_color)
        .any(|(from, _)| piece_attacks(board, from, square))
}

/// Squares of every `attacker_color` piece attacking `square`, in scan order.
pub fn attackers_to_square(board: &Board, square: Square, attacker_color: Color) -> Vec<Square> {
    board
        .pieces_of(attacker_color)
        .filter(|(from, _)| piece_attacks(board, *from, square))
        .map(|(from, _)| from)
        .collect()
}

#[inline]
pub fn is_king_in_check(board: &Board, color: Color) -> bool {
    let Some(king_sq) = board.king_square(color) else {
        return false;
    };
    is_square_attacked(board, king_sq, color.opposite())
}

/// Enemy pieces currently giving check to `color`'s king.
pub fn king_checkers(board: &Board, color: Color) -> Vec<Square> {
    let Some(king_sq) = board.king_square(color) else {
        return Vec::new();
    };
    attackers_to_square(board, king_sq, color.opposite())
}

/// Squares a quiet move could occupy to block a check from `attacker`.
///
/// Empty when the attacker is not on a line with the king (knights) or
/// stands adjacent to it.
#[inline]
pub fn interpose_squares(attacker: Square, king: Square) -> Vec<Square> {
    squares_between(attacker, king)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckStatus {
    NotInCheck,
    SingleCheck { checker: Square },
    DoubleCheck,
}

impl CheckStatus {
    #[inline]
    pub fn is_check(self) -> bool {
        !matches!(self, CheckStatus::NotInCheck)
    }
}

pub fn check_status(board: &Board, color: Color) -> CheckStatus {
    let checkers = king_checkers(board, color);
    match checkers.as_slice() {
        [] => CheckStatus::NotInCheck,
        [checker] => CheckStatus::SingleCheck { checker: *checker },
        _ => CheckStatus::DoubleCheck,
    }
}

#[cfg(test)]
mod tests {
    use super::{check_status, interpose_squares, is_square_attacked, king_checkers, CheckStatus};
    use crate::game_state::board::Board;
    use crate::game_state::chess_types::{Color, Piece, PieceKind, Square};
    use crate::move_generation::pseudo_moves::pseudo_moves_for_color;
    use crate::utils::fen_parser::parse_fen;

    fn board(fen: &str) -> Board {
        parse_fen(fen).expect("test FEN should parse").0
    }

    #[test]
    fn square_attacked_matches_capture_generation() {
        // Independent oracle: put an enemy pawn on the target and ask the
        // pseudo-move generator whether anything of `color` can capture it.
        for fen in [
            "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w",
            "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w",
            "4k3/1P4p1/8/2b5/5N2/8/1p4P1/R3K2q b",
        ] {
            let board = board(fen);
            for color in [Color::White, Color::Black] {
                for target in Square::all() {
                    let mut bait = board.clone();
                    bait.place(target, Piece::new(PieceKind::Pawn, color.opposite()));
                    let expected = pseudo_moves_for_color(&bait, color)
                        .iter()
                        .any(|mv| mv.capture && mv.to == target);
                    assert_eq!(
                        is_square_attacked(&board, target, color),
                        expected,
                        "{fen}: {color} on {target}"
                    );
                }
            }
        }
    }

    #[test]
    fn knight_check_has_no_interposition() {
        let board = board("4k3/8/3N4/8/8/8/8/4K3 b");
        let checkers = king_checkers(&board, Color::Black);
        assert_eq!(checkers, vec![Square::new(2, 3)]);
        assert!(interpose_squares(checkers[0], Square::new(0, 4)).is_empty());
    }

    #[test]
    fn rook_check_lists_blocking_squares() {
        let board = board("4k3/8/8/8/8/8/8/4RK2 b");
        assert_eq!(
            check_status(&board, Color::Black),
            CheckStatus::SingleCheck {
                checker: Square::new(7, 4)
            }
        );
        assert_eq!(interpose_squares(Square::new(7, 4), Square::new(0, 4)).len(), 6);
    }

    #[test]
    fn two_checkers_are_double_check() {
        let board = board("4k3/8/3N4/8/8/8/8/4RK2 b");
        assert_eq!(check_status(&board, Color::Black), CheckStatus::DoubleCheck);
        assert!(!check_status(&board, Color::White).is_check());
    }

    #[test]
    fn missing_king_reads_as_not_in_check() {
        let board = board("8/8/8/8/8/8/8/4RK2 b");
        assert_eq!(check_status(&board, Color::Black), CheckStatus::NotInCheck);
    }
}
