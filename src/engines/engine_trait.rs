//! Engine abstraction layer used by the text protocol.
//!
//! Defines common input parameters and output payloads so different move
//! policies can be selected at runtime behind a single trait interface.

use crate::chess_errors::ChessErrors;
use crate::decision::capture_ev::CaptureEvaluation;
use crate::decision::defend_economy::{AttackContext, DefendDecision};
use crate::game_state::chess_types::Color;
use crate::game_state::game_state::GameState;
use crate::moves::move_descriptions::{AttackMode, Move};

#[derive(Debug, Clone, Default)]
pub struct GoParams {
    /// Accepted for protocol compatibility; policies may ignore it.
    pub depth: Option<u8>,
}

/// Why a move was chosen.
#[derive(Debug, Clone, PartialEq)]
pub enum PickKind {
    Capture { ev: f64, detail: CaptureEvaluation },
    Quiet { eval: f64 },
}

#[derive(Debug, Clone, PartialEq)]
pub struct PickTrace {
    pub kind: PickKind,
    pub from: String,
    pub to: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PickedMove {
    pub mv: Move,
    pub attack: AttackMode,
    pub trace: PickTrace,
}

#[derive(Debug, Clone, Default)]
pub struct EngineOutput {
    pub best_move: Option<PickedMove>,
    pub info_lines: Vec<String>,
}

pub trait Engine: Send {
    fn name(&self) -> &str;

    fn new_game(&mut self) {}

    fn set_option(&mut self, _name: &str, _value: &str) -> Result<(), ChessErrors> {
        Ok(())
    }

    /// Choose a move for `color`. `best_move == None` means no legal move.
    fn choose_move(
        &mut self,
        game_state: &GameState,
        color: Color,
        params: &GoParams,
    ) -> Result<EngineOutput, ChessErrors>;

    /// Decide whether the attacked side spends a defend token.
    fn decide_defend(
        &mut self,
        game_state: &GameState,
        ctx: &AttackContext,
    ) -> Result<DefendDecision, ChessErrors>;
}
