//! Errors used throughout the decision core.
//!
//! `ChessErrors` is the single error type returned at the public boundary
//! (`pick`, `should_defend`, position parsing, option handling). The decision
//! models themselves never fail on well-formed input; every variant here
//! describes input that was rejected before any decision was attempted.
//!
//! Usage guidelines:
//! - Validate a `GameState` with `GameState::validate` before handing it to
//!   anything that assumes one king per side.
//! - Parsing variants (`InvalidFen`, `InvalidAlgebraic`) are recoverable and
//!   suitable for showing to an operator.
//! - Board-shape variants (`MissingKing`, `MultipleKings`, `InvalidHitPoints`)
//!   mean the caller built an impossible position.

use std::error::Error;
use std::fmt;

use crate::game_state::chess_types::{Color, Square};
use crate::move_generation::move_generator::MoveGenerationError;

/// Unified error type for the decision core.
#[derive(Debug, Clone, PartialEq)]
pub enum ChessErrors {
    /// The board has no king of the given color.
    MissingKing(Color),

    /// The board has more than one king of the given color.
    ///
    /// Payload: (color, number of kings found)
    MultipleKings(Color, usize),

    /// A piece carries more hit points than its kind allows.
    InvalidHitPoints { square: Square, hp: u8, max: u8 },

    /// A FEN-like position string failed to parse.
    InvalidFen(String),

    /// An algebraic square such as `e4` failed to parse.
    InvalidAlgebraic(String),

    /// Attempted to read or edit a piece on an empty square.
    EmptySquare(Square),

    /// An engine option name or value was not understood.
    InvalidOption(String),

    /// A combat outcome that the move's rules rule out, such as blocking a
    /// defend-locked capture.
    IllegalOutcome(String),

    /// Move generation reported an inconsistent state.
    MoveGeneration(MoveGenerationError),
}

impl fmt::Display for ChessErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChessErrors::MissingKing(color) => write!(f, "no {color} king on the board"),
            ChessErrors::MultipleKings(color, count) => {
                write!(f, "expected one {color} king, found {count}")
            }
            ChessErrors::InvalidHitPoints { square, hp, max } => {
                write!(f, "piece on {square} has {hp} hp, max is {max}")
            }
            ChessErrors::InvalidFen(msg) => write!(f, "invalid FEN: {msg}"),
            ChessErrors::InvalidAlgebraic(s) => write!(f, "invalid algebraic square: {s}"),
            ChessErrors::EmptySquare(square) => write!(f, "no piece on {square}"),
            ChessErrors::InvalidOption(msg) => write!(f, "invalid option: {msg}"),
            ChessErrors::IllegalOutcome(msg) => write!(f, "illegal outcome: {msg}"),
            ChessErrors::MoveGeneration(err) => write!(f, "{err}"),
        }
    }
}

impl Error for ChessErrors {}

impl From<MoveGenerationError> for ChessErrors {
    fn from(err: MoveGenerationError) -> Self {
        ChessErrors::MoveGeneration(err)
    }
}
