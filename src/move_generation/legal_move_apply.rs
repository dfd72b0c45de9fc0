//! Board mutation: reversible make/unmake for legality probes, and outcome
//! application for real moves.
//!
//! Legality probes place the mover on its target as if the capture always
//! kills. Real application instead takes the combat outcome into account.

use crate::chess_errors::ChessErrors;
use crate::combat::damage::promote_on_arrival;
use crate::game_state::board::Board;
use crate::game_state::game_state::GameState;
use crate::game_state::undo_state::UndoState;
use crate::moves::move_descriptions::Move;

/// Move the piece on `mv.from` to `mv.to`, promoting if it arrives on its
/// promotion row. Returns `None` if `mv.from` is empty.
pub fn make_move(board: &mut Board, mv: &Move) -> Option<UndoState> {
    let moved_piece = board.remove(mv.from)?;
    let displaced_piece = board.set(mv.to, Some(promote_on_arrival(moved_piece, mv.to)));
    Some(UndoState {
        from: mv.from,
        to: mv.to,
        moved_piece,
        displaced_piece,
    })
}

pub fn unmake_move(board: &mut Board, undo: UndoState) {
    board.set(undo.to, undo.displaced_piece);
    board.set(undo.from, Some(undo.moved_piece));
}

/// Copy of `board` with `mv` played as a deterministic placement.
pub fn simulate_move(board: &Board, mv: &Move) -> Option<Board> {
    let mut next = board.clone();
    make_move(&mut next, mv)?;
    Some(next)
}

/// What actually happened when a move resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveOutcome {
    /// No target, or the target died: the mover advances.
    Advance,
    /// The target survived with `damage` subtracted; the attacker stays put.
    Damaged { damage: u8 },
    /// The defender spent a token and blocked the hit.
    Blocked,
    /// A super attack missed.
    Missed,
}

/// Resolve `mv` on a copy of `state` with the given `outcome`.
///
/// A `Damaged` outcome that drops the target to zero HP is treated as a kill.
/// `Blocked` spends one of the defender's tokens. A defend-locked capture can
/// be neither blocked nor missed.
pub fn apply_move(
    state: &GameState,
    mv: &Move,
    outcome: MoveOutcome,
) -> Result<GameState, ChessErrors> {
    let mut next = state.clone();
    if next.board.is_empty(mv.from) {
        return Err(ChessErrors::EmptySquare(mv.from));
    }
    if mv.escapes_defend() && matches!(outcome, MoveOutcome::Blocked | MoveOutcome::Missed) {
        return Err(ChessErrors::IllegalOutcome(format!(
            "{mv} is a forced base capture and always lands"
        )));
    }

    match outcome {
        MoveOutcome::Advance => {
            make_move(&mut next.board, mv);
        }
        MoveOutcome::Damaged { damage } => {
            let mut target = next
                .board
                .piece_at(mv.to)
                .ok_or(ChessErrors::EmptySquare(mv.to))?;
            let remaining = target.current_hp().saturating_sub(damage);
            if remaining == 0 {
                make_move(&mut next.board, mv);
            } else {
                target.hp = Some(remaining);
                next.board.place(mv.to, target);
            }
        }
        MoveOutcome::Blocked => {
            let target = next
                .board
                .piece_at(mv.to)
                .ok_or(ChessErrors::EmptySquare(mv.to))?;
            let tokens = &mut next.defends[target.color.index()];
            *tokens = tokens.saturating_sub(1);
        }
        MoveOutcome::Missed => {}
    }

    Ok(next)
}
