//! Full legal move generation pipeline.
//!
//! Collects pseudo-legal moves, drops king captures, and keeps only moves
//! that leave the mover's own king unattacked. Safety is probed with a single
//! scratch board and make/unmake instead of cloning per candidate.

use crate::game_state::board::Board;
use crate::game_state::chess_types::Color;
use crate::game_state::game_state::GameState;
use crate::move_generation::check_response::check_response_moves;
use crate::move_generation::legal_move_apply::{make_move, unmake_move};
use crate::move_generation::legal_move_checks::is_square_attacked;
use crate::move_generation::move_generator::{MoveGenResult, MoveGenerationError, MoveGenerator};
use crate::move_generation::pseudo_moves::pseudo_moves_for_color;
use crate::moves::move_descriptions::Move;

/// Generator honouring the check-response restriction.
pub struct LegalMoveGenerator;

impl MoveGenerator for LegalMoveGenerator {
    fn generate_legal_moves(
        &self,
        game_state: &GameState,
        color: Color,
    ) -> MoveGenResult<Vec<Move>> {
        if game_state.board.king_square(color).is_none() {
            return Err(MoveGenerationError::NoKingForSide(color));
        }
        Ok(check_response_moves(game_state, color))
    }
}

/// Moves of `color` that do not leave its king attacked.
///
/// Captures are simulated as the mover landing on the target; combat odds
/// play no part in legality. A side without a king has no legal moves.
pub fn legal_moves(board: &Board, color: Color) -> Vec<Move> {
    let mut scratch = board.clone();
    pseudo_moves_for_color(board, color)
        .into_iter()
        .filter(|mv| !board.piece_at(mv.to).is_some_and(|p| p.is_king()))
        .filter(|mv| keeps_king_safe(&mut scratch, mv, color))
        .collect()
}

/// Play `mv` on `scratch`, test the king, and take it back.
pub fn keeps_king_safe(scratch: &mut Board, mv: &Move, color: Color) -> bool {
    let Some(undo) = make_move(scratch, mv) else {
        return false;
    };
    let safe = scratch
        .king_square(color)
        .is_some_and(|king| !is_square_attacked(scratch, king, color.opposite()));
    unmake_move(scratch, undo);
    safe
}

#[cfg(test)]
mod tests {
    use super::{legal_moves, LegalMoveGenerator};
    use crate::game_state::chess_types::{Color, Square};
    use crate::game_state::game_state::GameState;
    use crate::move_generation::legal_move_apply::simulate_move;
    use crate::move_generation::legal_move_checks::is_king_in_check;
    use crate::move_generation::move_generator::{MoveGenerationError, MoveGenerator};
    use crate::utils::fen_parser::parse_fen;

    #[test]
    fn starting_position_has_twenty_legal_moves() {
        let state = GameState::new_game().expect("starting FEN should parse");
        assert_eq!(legal_moves(&state.board, Color::White).len(), 20);
        let generated = LegalMoveGenerator
            .generate_legal_moves(&state, Color::Black)
            .expect("generation should succeed");
        assert_eq!(generated.len(), 20);
    }

    #[test]
    fn no_legal_move_leaves_own_king_attacked() {
        for fen in [
            "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w",
            "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w",
            "4k3/4r3/8/8/8/8/4B3/4K3 w",
            "rnb1kbnr/pppp1ppp/8/4p3/6Pq/5P2/PPPPP2P/RNBQKBNR w",
        ] {
            let (board, _) = parse_fen(fen).expect("test FEN should parse");
            for color in [Color::White, Color::Black] {
                for mv in legal_moves(&board, color) {
                    let next = simulate_move(&board, &mv).expect("origin is occupied");
                    assert!(!is_king_in_check(&next, color), "{fen}: {mv} exposes king");
                }
            }
        }
    }

    #[test]
    fn pinned_bishop_cannot_leave_file() {
        let (board, _) = parse_fen("4k3/4r3/8/8/8/8/4B3/4K3 w").expect("FEN should parse");
        let bishop_moves = legal_moves(&board, Color::White)
            .into_iter()
            .filter(|m| m.from == Square::new(6, 4))
            .count();
        assert_eq!(bishop_moves, 0);
    }

    #[test]
    fn king_captures_are_never_generated() {
        // Illegal position: black king already attacked by the white rook.
        let (board, _) = parse_fen("4k3/8/8/8/8/8/8/4RK2 w").expect("FEN should parse");
        assert!(legal_moves(&board, Color::White)
            .iter()
            .all(|m| m.to != Square::new(0, 4)));
    }

    #[test]
    fn kingless_side_is_rejected_by_generator() {
        let state = GameState::from_fen("4k3/8/8/8/8/8/8/4R3 w").expect("FEN should parse");
        assert_eq!(
            LegalMoveGenerator.generate_legal_moves(&state, Color::White),
            Err(MoveGenerationError::NoKingForSide(Color::White))
        );
    }
}
