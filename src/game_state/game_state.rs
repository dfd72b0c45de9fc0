//! Caller-owned game snapshot.
//!
//! `GameState` bundles the board with the two pieces of global combat state:
//! the acceleration flag and each side's defend-token count. The decision core
//! only ever reads it; what-if simulation happens on scratch boards.

use crate::chess_errors::ChessErrors;
use crate::game_state::board::Board;
use crate::game_state::chess_rules::STARTING_POSITION_FEN;
use crate::game_state::chess_types::{Color, PieceKind};
use crate::utils::fen_parser::parse_fen;

/// Defend tokens each side starts a game with.
pub const DEFAULT_DEFEND_TOKENS: u8 = 2;

#[derive(Debug, Clone, PartialEq)]
pub struct GameState {
    pub board: Board,
    /// Global damage boost: +1 to every base damage computation.
    pub accelerated: bool,
    /// Remaining defend tokens, indexed by `Color::index()`.
    pub defends: [u8; 2],
}

impl Default for GameState {
    fn default() -> Self {
        Self {
            board: Board::empty(),
            accelerated: false,
            defends: [DEFAULT_DEFEND_TOKENS; 2],
        }
    }
}

impl GameState {
    pub fn new_game() -> Result<Self, ChessErrors> {
        Self::from_fen(STARTING_POSITION_FEN)
    }

    /// Build a state from a FEN placement. Token counts take their defaults.
    pub fn from_fen(fen: &str) -> Result<Self, ChessErrors> {
        let (board, _) = parse_fen(fen)?;
        Ok(Self {
            board,
            ..Self::default()
        })
    }

    #[inline]
    pub fn defends_of(&self, color: Color) -> u8 {
        self.defends[color.index()]
    }

    #[inline]
    pub fn set_defends(&mut self, color: Color, count: u8) {
        self.defends[color.index()] = count;
    }

    /// Check the one-king-per-side and hp-range preconditions.
    ///
    /// Attack and check queries assume a single king per color and silently
    /// answer "not in check" when it is missing; entry points call this first
    /// so that such boards are reported instead.
    pub fn validate(&self) -> Result<(), ChessErrors> {
        for color in [Color::White, Color::Black] {
            match self.board.king_count(color) {
                0 => return Err(ChessErrors::MissingKing(color)),
                1 => {}
                n => return Err(ChessErrors::MultipleKings(color, n)),
            }
        }

        for (square, piece) in self.board.pieces() {
            if piece.kind == PieceKind::King {
                continue;
            }
            if let Some(hp) = piece.hp {
                let max = piece.kind.max_hp();
                if hp > max {
                    return Err(ChessErrors::InvalidHitPoints { square, hp, max });
                }
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::GameState;
    use crate::chess_errors::ChessErrors;
    use crate::game_state::chess_types::{Color, Piece, PieceKind, Square};

    #[test]
    fn starting_position_validates() {
        let state = GameState::new_game().expect("starting FEN should parse");
        assert!(state.validate().is_ok());
        assert_eq!(state.defends_of(Color::White), 2);
        assert!(!state.accelerated);
    }

    #[test]
    fn missing_king_is_reported() {
        let state = GameState::from_fen("8/8/8/8/8/8/8/4K3 w").expect("FEN should parse");
        assert_eq!(state.validate(), Err(ChessErrors::MissingKing(Color::Black)));
    }

    #[test]
    fn extra_king_is_reported() {
        let state = GameState::from_fen("k6k/8/8/8/8/8/8/4K3 w").expect("FEN should parse");
        assert_eq!(
            state.validate(),
            Err(ChessErrors::MultipleKings(Color::Black, 2))
        );
    }

    #[test]
    fn overfull_hp_is_reported() {
        let mut state = GameState::from_fen("k7/8/8/8/8/8/8/4K3 w").expect("FEN should parse");
        let sq = Square::new(4, 4);
        state
            .board
            .place(sq, Piece::with_hp(PieceKind::Pawn, Color::White, 3));
        assert_eq!(
            state.validate(),
            Err(ChessErrors::InvalidHitPoints {
                square: sq,
                hp: 3,
                max: 2
            })
        );
    }
}
