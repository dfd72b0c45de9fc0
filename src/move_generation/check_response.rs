//! Check-response restriction.
//!
//! In tChess a side in check cannot gamble its way out. With two checkers
//! only the king may move. With one checker the legal replies are:
//! - any king move,
//! - a quiet move onto a square between the checker and the king,
//! - a capture of the checker whose base damage alone kills it.
//!
//! Every surviving capture of the checker is marked `forced = Base` and
//! `defend_locked`, so the owner of the checker may not spend a token on it.

use crate::combat::damage::{base_damage, is_lethal};
use crate::game_state::board::Board;
use crate::game_state::chess_types::{Color, PieceKind, Square};
use crate::game_state::game_state::GameState;
use crate::move_generation::legal_move_checks::{check_status, interpose_squares, CheckStatus};
use crate::move_generation::legal_move_generator::legal_moves;
use crate::moves::move_descriptions::{AttackMode, Move};

/// Legal moves for `color` with the check-response restriction applied.
pub fn check_response_moves(state: &GameState, color: Color) -> Vec<Move> {
    let board = &state.board;
    let legal = legal_moves(board, color);

    match check_status(board, color) {
        CheckStatus::NotInCheck => legal,
        CheckStatus::DoubleCheck => legal
            .into_iter()
            .filter(|mv| is_king_move(board, mv))
            .collect(),
        CheckStatus::SingleCheck { checker } => {
            restrict_single_check(state, legal, checker, color)
        }
    }
}

fn restrict_single_check(
    state: &GameState,
    legal: Vec<Move>,
    checker: Square,
    color: Color,
) -> Vec<Move> {
    let board = &state.board;
    let Some(king) = board.king_square(color) else {
        return legal;
    };
    let Some(checker_piece) = board.piece_at(checker) else {
        return legal;
    };
    let blocks = interpose_squares(checker, king);
    let checker_hp = checker_piece.current_hp();

    legal
        .into_iter()
        .filter_map(|mut mv| {
            let mover = board.piece_at(mv.from)?;
            if mover.kind == PieceKind::King {
                return Some(mv);
            }
            if mv.capture {
                let kills = mv.to == checker
                    && is_lethal(base_damage(mover.kind, state.accelerated), checker_hp);
                if !kills {
                    return None;
                }
                mv.forced = Some(AttackMode::Base);
                mv.defend_locked = true;
                return Some(mv);
            }
            blocks.contains(&mv.to).then_some(mv)
        })
        .collect()
}

#[inline]
fn is_king_move(board: &Board, mv: &Move) -> bool {
    board
        .piece_at(mv.from)
        .is_some_and(|p| p.kind == PieceKind::King)
}

#[cfg(test)]
mod tests {
    use super::check_response_moves;
    use crate::game_state::chess_types::{Color, PieceKind, Square};
    use crate::game_state::game_state::GameState;
    use crate::moves::move_descriptions::AttackMode;

    fn state(fen: &str) -> GameState {
        GameState::from_fen(fen).expect("test FEN should parse")
    }

    #[test]
    fn double_check_allows_only_king_moves() {
        let state = state("4k3/8/3N4/8/8/8/3r4/4RK2 b");
        let moves = check_response_moves(&state, Color::Black);
        assert!(!moves.is_empty());
        for mv in moves {
            let mover = state.board.piece_at(mv.from).expect("mover exists");
            assert_eq!(mover.kind, PieceKind::King);
        }
    }

    #[test]
    fn knight_check_allows_king_moves_and_lethal_captures_only() {
        // The c7 bishop deals 2: not enough for a fresh knight, enough at 2 hp.
        let mut state = state("4k3/2b5/3N4/8/8/8/8/4K3 b");
        let knight = Square::new(2, 3);
        let moves = check_response_moves(&state, Color::Black);
        assert!(moves
            .iter()
            .all(|m| state.board.piece_at(m.from).map(|p| p.kind) == Some(PieceKind::King)));

        let mut hurt = state.board.piece_at(knight).expect("knight exists");
        hurt.hp = Some(2);
        state.board.place(knight, hurt);
        let moves = check_response_moves(&state, Color::Black);
        let captures: Vec<_> = moves.iter().filter(|m| m.capture).collect();
        assert_eq!(captures.len(), 1);
        assert_eq!(captures[0].from, Square::new(1, 2));
        assert_eq!(captures[0].to, knight);
        assert_eq!(captures[0].forced, Some(AttackMode::Base));
        assert!(captures[0].defend_locked);
        assert!(moves
            .iter()
            .filter(|m| !m.capture)
            .all(|m| state.board.piece_at(m.from).map(|p| p.kind) == Some(PieceKind::King)));
    }

    #[test]
    fn acceleration_can_make_a_capture_lethal() {
        let mut state = state("4k3/2b5/3N4/8/8/8/8/4K3 b");
        let knight = Square::new(2, 3);
        let mut hurt = state.board.piece_at(knight).expect("knight exists");
        hurt.hp = Some(3);
        state.board.place(knight, hurt);

        assert!(!check_response_moves(&state, Color::Black)
            .iter()
            .any(|m| m.to == knight));
        state.accelerated = true;
        assert!(check_response_moves(&state, Color::Black)
            .iter()
            .any(|m| m.to == knight && m.defend_locked));
    }

    #[test]
    fn slider_check_can_be_blocked_but_not_chipped() {
        let state = state("4k3/8/8/8/8/8/5R1R/4K2r w");
        let moves = check_response_moves(&state, Color::White);

        let from_f2: Vec<_> = moves.iter().filter(|m| m.from == Square::new(6, 5)).collect();
        assert_eq!(from_f2.len(), 1);
        assert_eq!(from_f2[0].to, Square::new(7, 5));
        assert!(!from_f2[0].capture);

        // Rook on h2 hits h1 for 3 of 6 hp: not a legal reply.
        assert!(moves.iter().all(|m| m.from != Square::new(6, 7)));
    }

    #[test]
    fn not_in_check_keeps_full_move_list() {
        let state = GameState::new_game().expect("starting FEN should parse");
        assert_eq!(check_response_moves(&state, Color::White).len(), 20);
    }
}
