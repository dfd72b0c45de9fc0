//! Pseudo-legal move generation per piece.
//!
//! Standard chess movement without castling or en passant. Pawns step one
//! square (two from their start row) onto empty squares and capture only
//! diagonally onto occupied enemy squares. Own-king safety is not checked.

use crate::game_state::board::Board;
use crate::game_state::chess_types::{Color, PieceKind, Square};
use crate::moves::king_moves::king_targets;
use crate::moves::knight_moves::knight_targets;
use crate::moves::move_descriptions::Move;
use crate::moves::pawn_moves::pawn_attack_targets;
use crate::moves::slider_moves::slider_directions;

/// Pseudo-legal moves for the piece on `from`, empty if the square is empty.
pub fn pseudo_moves(board: &Board, from: Square) -> Vec<Move> {
    let mut moves = Vec::with_capacity(16);
    let Some(piece) = board.piece_at(from) else {
        return moves;
    };

    match piece.kind {
        PieceKind::Pawn => generate_pawn_moves(board, from, piece.color, &mut moves),
        PieceKind::Knight => {
            generate_step_moves(board, from, piece.color, knight_targets(from), &mut moves)
        }
        PieceKind::King => {
            generate_step_moves(board, from, piece.color, king_targets(from), &mut moves)
        }
        PieceKind::Bishop | PieceKind::Rook | PieceKind::Queen => {
            generate_slider_moves(board, from, piece.color, piece.kind, &mut moves)
        }
    }

    moves
}

/// Pseudo-legal moves for every piece of `color`, in board-scan order.
pub fn pseudo_moves_for_color(board: &Board, color: Color) -> Vec<Move> {
    board
        .pieces_of(color)
        .flat_map(|(from, _)| pseudo_moves(board, from))
        .collect()
}

fn generate_pawn_moves(board: &Board, from: Square, color: Color, out: &mut Vec<Move>) {
    let dir = color.pawn_direction();

    if let Some(one) = from.offset(dir, 0) {
        if board.is_empty(one) {
            out.push(Move::quiet(from, one));
            if from.row == color.pawn_start_row() {
                if let Some(two) = one.offset(dir, 0) {
                    if board.is_empty(two) {
                        out.push(Move::quiet(from, two));
                    }
                }
            }
        }
    }

    for target in pawn_attack_targets(color, from) {
        if let Some(victim) = board.piece_at(target) {
            if victim.color != color {
                out.push(Move::capture(from, target));
            }
        }
    }
}

fn generate_step_moves(
    board: &Board,
    from: Square,
    color: Color,
    targets: impl Iterator<Item = Square>,
    out: &mut Vec<Move>,
) {
    for target in targets {
        match board.piece_at(target) {
            None => out.push(Move::quiet(from, target)),
            Some(victim) if victim.color != color => out.push(Move::capture(from, target)),
            Some(_) => {}
        }
    }
}

fn generate_slider_moves(
    board: &Board,
    from: Square,
    color: Color,
    kind: PieceKind,
    out: &mut Vec<Move>,
) {
    for &(d_row, d_col) in slider_directions(kind) {
        let mut cursor = from.offset(d_row, d_col);
        while let Some(target) = cursor {
            match board.piece_at(target) {
                None => out.push(Move::quiet(from, target)),
                Some(victim) => {
                    if victim.color != color {
                        out.push(Move::capture(from, target));
                    }
                    break;
                }
            }
            cursor = target.offset(d_row, d_col);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{pseudo_moves, pseudo_moves_for_color};
    use crate::game_state::chess_types::{Color, Square};
    use crate::game_state::game_state::GameState;
    use crate::utils::fen_parser::parse_fen;

    #[test]
    fn starting_position_has_twenty_pseudo_moves() {
        let state = GameState::new_game().expect("starting FEN should parse");
        assert_eq!(pseudo_moves_for_color(&state.board, Color::White).len(), 20);
        assert_eq!(pseudo_moves_for_color(&state.board, Color::Black).len(), 20);
    }

    #[test]
    fn pawn_captures_only_onto_enemies() {
        let (board, _) = parse_fen("4k3/8/8/8/8/3p1P2/4P3/4K3 w").expect("FEN should parse");
        let moves = pseudo_moves(&board, Square::new(6, 4));
        let captures: Vec<_> = moves.iter().filter(|m| m.capture).collect();
        assert_eq!(captures.len(), 1);
        assert_eq!(captures[0].to, Square::new(5, 3));
        assert_eq!(moves.len(), 3);
    }

    #[test]
    fn blocked_double_step_is_not_generated() {
        let (board, _) = parse_fen("4k3/8/8/8/4p3/8/4P3/4K3 w").expect("FEN should parse");
        assert_eq!(pseudo_moves(&board, Square::new(6, 4)).len(), 1);
    }

    #[test]
    fn slider_stops_at_first_piece() {
        let (board, _) = parse_fen("4k3/8/8/8/R2p4/8/8/4K3 w").expect("FEN should parse");
        let moves = pseudo_moves(&board, Square::new(4, 0));
        // 2 squares right plus the capture, 4 up, 3 down.
        assert_eq!(moves.len(), 10);
        assert_eq!(moves.iter().filter(|m| m.capture).count(), 1);
    }
}
