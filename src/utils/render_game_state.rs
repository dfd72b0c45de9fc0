//! Terminal-oriented Unicode board renderer.
//!
//! Creates a human-readable board view for debugging, tests and the `d`
//! protocol command. Damaged pieces are listed under the board with their
//! remaining hit points.

use crate::game_state::board::Board;
use crate::game_state::chess_types::{Color, Piece, PieceKind, Square};
use crate::game_state::game_state::GameState;

/// Render the board to a Unicode string, rank 8 at the top.
pub fn render_board(board: &Board) -> String {
    let mut out = String::new();

    out.push_str("  a b c d e f g h\n");

    for row in 0..8i8 {
        let rank = char::from(b'8' - row as u8);
        out.push(rank);
        out.push(' ');

        for col in 0..8i8 {
            match board.piece_at(Square::new(row, col)) {
                Some(piece) => out.push(piece_to_unicode(piece.color, piece.kind)),
                None => out.push('·'),
            }

            if col < 7 {
                out.push(' ');
            }
        }

        out.push(' ');
        out.push(rank);
        out.push('\n');
    }

    out.push_str("  a b c d e f g h");

    let damaged: Vec<String> = board
        .pieces()
        .filter(|(_, piece)| is_damaged(piece))
        .map(|(sq, piece)| {
            format!(
                "{}{}={}/{}",
                piece_to_unicode(piece.color, piece.kind),
                sq,
                piece.current_hp(),
                piece.kind.max_hp()
            )
        })
        .collect();
    if !damaged.is_empty() {
        out.push_str("\nhp: ");
        out.push_str(&damaged.join(" "));
    }

    out
}

/// Board view plus acceleration and token counts.
pub fn render_game_state(state: &GameState) -> String {
    format!(
        "{}\naccelerated: {}  defends: white {} black {}",
        render_board(&state.board),
        state.accelerated,
        state.defends_of(Color::White),
        state.defends_of(Color::Black)
    )
}

fn is_damaged(piece: &Piece) -> bool {
    piece.kind != PieceKind::King && piece.current_hp() < piece.kind.max_hp()
}

fn piece_to_unicode(color: Color, piece: PieceKind) -> char {
    match (color, piece) {
        (Color::White, PieceKind::Pawn) => '♙',
        (Color::White, PieceKind::Knight) => '♘',
        (Color::White, PieceKind::Bishop) => '♗',
        (Color::White, PieceKind::Rook) => '♖',
        (Color::White, PieceKind::Queen) => '♕',
        (Color::White, PieceKind::King) => '♔',
        (Color::Black, PieceKind::Pawn) => '♟',
        (Color::Black, PieceKind::Knight) => '♞',
        (Color::Black, PieceKind::Bishop) => '♝',
        (Color::Black, PieceKind::Rook) => '♜',
        (Color::Black, PieceKind::Queen) => '♛',
        (Color::Black, PieceKind::King) => '♚',
    }
}

#[cfg(test)]
mod tests {
    use super::{render_board, render_game_state};
    use crate::game_state::game_state::GameState;

    #[test]
    fn damaged_pieces_are_listed() {
        let state = GameState::from_fen("4k3/8/8/8/4R(2)3/8/8/4K3 w").expect("FEN should parse");
        let text = render_board(&state.board);
        assert!(text.starts_with("  a b c d e f g h\n8 "));
        assert!(text.ends_with("hp: ♖e4=2/6"));
    }

    #[test]
    fn healthy_board_has_no_hp_line() {
        let state = GameState::new_game().expect("starting FEN should parse");
        let text = render_game_state(&state);
        assert!(!text.contains("hp:"));
        assert!(text.ends_with("defends: white 2 black 2"));
    }
}
