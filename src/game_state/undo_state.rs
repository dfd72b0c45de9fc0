use crate::game_state::chess_types::{Piece, Square};

/// Single undo record for `make_move` / `unmake_move`.
#[derive(Debug, Clone, Copy)]
pub struct UndoState {
    pub from: Square,
    pub to: Square,
    pub moved_piece: Piece,
    pub displaced_piece: Option<Piece>,
}
