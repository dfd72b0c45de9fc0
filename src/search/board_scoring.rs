//! Static evaluation for quiet-move selection.
//!
//! Scores are from the perspective of an explicit side: positive is good for
//! `color`. Material is weighted by remaining HP so a wounded queen is worth
//! less than a fresh one.

use crate::engines::policy_config::PolicyConfig;
use crate::game_state::board::Board;
use crate::game_state::chess_types::Color;
use crate::move_generation::legal_move_checks::is_king_in_check;
use crate::move_generation::legal_move_generator::legal_moves;
use crate::moves::move_descriptions::Move;

const BOARD_CENTER: f64 = 3.5;

pub trait BoardScorer: Send + Sync {
    /// Score from the perspective of `color`.
    fn score(&self, board: &Board, color: Color) -> f64;
}

/// Material, mobility and king safety, weighted per `PolicyConfig`.
#[derive(Debug, Clone, Copy)]
pub struct HpWeightedScorer {
    pub mobility_weight: f64,
    pub king_safety_weight: f64,
}

impl HpWeightedScorer {
    pub fn from_config(config: &PolicyConfig) -> Self {
        Self {
            mobility_weight: config.mobility_weight,
            king_safety_weight: config.king_safety_weight,
        }
    }
}

impl Default for HpWeightedScorer {
    fn default() -> Self {
        Self::from_config(&PolicyConfig::default())
    }
}

impl BoardScorer for HpWeightedScorer {
    fn score(&self, board: &Board, color: Color) -> f64 {
        material_eval(board, color)
            + mobility_eval(board, color, self.mobility_weight)
            + king_safety_eval(board, color, self.king_safety_weight)
    }
}

/// HP-weighted material of `color` minus that of the opponent.
pub fn material_eval(board: &Board, color: Color) -> f64 {
    board
        .pieces()
        .map(|(_, piece)| {
            let value = piece.kind.material_value() * piece.hp_fraction();
            if piece.color == color {
                value
            } else {
                -value
            }
        })
        .sum()
}

/// Weighted difference in legal-move counts.
///
/// Counts come from `legal_moves`, which never includes king captures, so a
/// side giving check scores one move fewer than a raw pseudo-move count.
pub fn mobility_eval(board: &Board, color: Color, weight: f64) -> f64 {
    let own = legal_moves(board, color).len() as f64;
    let theirs = legal_moves(board, color.opposite()).len() as f64;
    weight * (own - theirs)
}

/// Penalty while `color` is in check, bonus while the opponent is.
pub fn king_safety_eval(board: &Board, color: Color, weight: f64) -> f64 {
    let mut score = 0.0;
    if is_king_in_check(board, color) {
        score -= weight;
    }
    if is_king_in_check(board, color.opposite()) {
        score += weight;
    }
    score
}

/// Small preference for destinations near the middle of the board.
pub fn center_bias(mv: &Move, weight: f64) -> f64 {
    let dx = (f64::from(mv.to.col) - BOARD_CENTER).abs();
    let dy = (f64::from(mv.to.row) - BOARD_CENTER).abs();
    weight * (BOARD_CENTER - dx.hypot(dy))
}
