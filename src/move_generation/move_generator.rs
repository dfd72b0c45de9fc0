use std::error::Error;
use std::fmt;

use crate::game_state::chess_types::Color;
use crate::game_state::game_state::GameState;
use crate::moves::move_descriptions::Move;

pub type MoveGenResult<T> = Result<T, MoveGenerationError>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoveGenerationError {
    /// The side asked to move has no king, so check safety is undefined.
    NoKingForSide(Color),
}

impl fmt::Display for MoveGenerationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MoveGenerationError::NoKingForSide(color) => {
                write!(f, "cannot generate moves: no {color} king")
            }
        }
    }
}

impl Error for MoveGenerationError {}

pub trait MoveGenerator: Send + Sync {
    fn generate_legal_moves(&self, game_state: &GameState, color: Color)
        -> MoveGenResult<Vec<Move>>;
}
