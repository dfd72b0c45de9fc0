//! One-ply EV-greedy tChess engine.
//!
//! Captures are scored by the expected-value model and the best one is played
//! whenever any capture exists. Otherwise each quiet move is scored by static
//! evaluation of the resulting board plus a small centralisation bonus. Ties
//! go to the first move in board-scan order. No deeper search is attempted.

use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};
use tracing::{debug, trace, warn};

use crate::chess_errors::ChessErrors;
use crate::decision::capture_ev::{evaluate_capture, CaptureEvaluation};
use crate::decision::defend_economy::{evaluate_defend, AttackContext, DefendDecision};
use crate::engines::engine_trait::{
    Engine, EngineOutput, GoParams, PickKind, PickTrace, PickedMove,
};
use crate::engines::policy_config::{PolicyConfig, SuperConnectModel};
use crate::game_state::chess_types::Color;
use crate::game_state::game_state::GameState;
use crate::move_generation::legal_move_apply::{make_move, unmake_move};
use crate::move_generation::legal_move_checks::is_king_in_check;
use crate::move_generation::legal_move_generator::LegalMoveGenerator;
use crate::move_generation::move_generator::MoveGenerator;
use crate::moves::move_descriptions::{AttackMode, Move};
use crate::search::board_scoring::{center_bias, BoardScorer, HpWeightedScorer};
use crate::utils::algebraic::square_to_algebraic;

pub struct EvGreedyEngine {
    config: PolicyConfig,
    move_generator: LegalMoveGenerator,
    scorer: HpWeightedScorer,
    rng: StdRng,
}

impl EvGreedyEngine {
    pub fn new() -> Self {
        Self::with_config(PolicyConfig::default())
    }

    pub fn with_config(config: PolicyConfig) -> Self {
        Self {
            config,
            move_generator: LegalMoveGenerator,
            scorer: HpWeightedScorer::from_config(&config),
            rng: StdRng::seed_from_u64(seed_of(&config)),
        }
    }

    #[inline]
    pub fn config(&self) -> &PolicyConfig {
        &self.config
    }

    fn reseed(&mut self) {
        self.rng = StdRng::seed_from_u64(seed_of(&self.config));
    }

    fn best_capture(
        &self,
        game_state: &GameState,
        moves: &[Move],
        out: &mut EngineOutput,
    ) -> Option<(Move, CaptureEvaluation)> {
        let mut best: Option<(Move, CaptureEvaluation)> = None;

        for mv in moves.iter().filter(|m| m.capture) {
            if game_state.board.piece_at(mv.to).is_some_and(|p| p.is_king()) {
                warn!(mv = %mv, "rejected king capture");
                out.info_lines
                    .push(format!("info string ev_engine rejected_king_capture {mv}"));
                continue;
            }

            let Some(eval) = evaluate_capture(game_state, mv, &self.config) else {
                continue;
            };
            trace!(mv = %mv, ev = eval.ev, choice = %eval.choice, "scored capture");

            if best.as_ref().map_or(true, |(_, b)| eval.ev > b.ev) {
                best = Some((*mv, eval));
            }
        }

        best
    }

    fn best_quiet(&self, game_state: &GameState, moves: &[Move], color: Color) -> Option<(Move, f64)> {
        let mut scratch = game_state.board.clone();
        let mut best: Option<(Move, f64)> = None;

        for mv in moves.iter().filter(|m| !m.capture) {
            let Some(undo) = make_move(&mut scratch, mv) else {
                continue;
            };
            let score = self.scorer.score(&scratch, color) + center_bias(mv, self.config.center_weight);
            unmake_move(&mut scratch, undo);
            trace!(mv = %mv, score, "scored quiet move");

            if best.map_or(true, |(_, s)| score > s) {
                best = Some((*mv, score));
            }
        }

        best
    }
}

impl Default for EvGreedyEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl Engine for EvGreedyEngine {
    fn name(&self) -> &str {
        "tChess EV Greedy"
    }

    fn new_game(&mut self) {
        self.reseed();
    }

    fn set_option(&mut self, name: &str, value: &str) -> Result<(), ChessErrors> {
        self.config.set_option(name, value)?;
        self.scorer = HpWeightedScorer::from_config(&self.config);
        self.reseed();
        Ok(())
    }

    fn choose_move(
        &mut self,
        game_state: &GameState,
        color: Color,
        params: &GoParams,
    ) -> Result<EngineOutput, ChessErrors> {
        game_state.validate()?;

        let in_check = is_king_in_check(&game_state.board, color);
        let legal_moves = self.move_generator.generate_legal_moves(game_state, color)?;

        let mut out = EngineOutput::default();
        out.info_lines.push(format!(
            "info string ev_engine legal_moves {} in_check {}",
            legal_moves.len(),
            in_check
        ));
        if let Some(depth) = params.depth {
            out.info_lines
                .push(format!("info string ev_engine requested_depth {depth} searched 1"));
        }

        if legal_moves.is_empty() {
            debug!(%color, in_check, "no legal move");
            return Ok(out);
        }

        if let Some((mv, eval)) = self.best_capture(game_state, &legal_moves, &mut out) {
            let attack = mv.forced.unwrap_or(eval.choice);
            debug!(mv = %mv, ev = eval.ev, %attack, "picked capture");
            out.info_lines.push(format!(
                "info string ev_engine capture {mv} ev {:.3} base {:.3} super {:.3} attack {attack}",
                eval.ev, eval.ev_base, eval.ev_super
            ));
            out.best_move = Some(PickedMove {
                mv,
                attack,
                trace: PickTrace {
                    kind: PickKind::Capture {
                        ev: eval.ev,
                        detail: eval,
                    },
                    from: square_to_algebraic(mv.from),
                    to: square_to_algebraic(mv.to),
                },
            });
            return Ok(out);
        }

        if let Some((mv, eval)) = self.best_quiet(game_state, &legal_moves, color) {
            debug!(mv = %mv, eval, "picked quiet move");
            out.info_lines
                .push(format!("info string ev_engine quiet {mv} eval {eval:.3}"));
            out.best_move = Some(PickedMove {
                mv,
                attack: AttackMode::Base,
                trace: PickTrace {
                    kind: PickKind::Quiet { eval },
                    from: square_to_algebraic(mv.from),
                    to: square_to_algebraic(mv.to),
                },
            });
        }

        Ok(out)
    }

    fn decide_defend(
        &mut self,
        game_state: &GameState,
        ctx: &AttackContext,
    ) -> Result<DefendDecision, ChessErrors> {
        game_state.validate()?;

        let connect_source: Option<&mut dyn RngCore> = match self.config.super_connect {
            SuperConnectModel::Expected => None,
            SuperConnectModel::Sampled { .. } => Some(&mut self.rng as &mut dyn RngCore),
        };
        let decision = evaluate_defend(game_state, ctx, &self.config, connect_source);
        debug!(
            attack = %ctx.attack,
            use_token = decision.use_token,
            reason = decision.reason.as_str(),
            value = decision.decision_value,
            "defend decision"
        );
        Ok(decision)
    }
}

fn seed_of(config: &PolicyConfig) -> u64 {
    match config.super_connect {
        SuperConnectModel::Sampled { seed } => seed,
        SuperConnectModel::Expected => 0,
    }
}

/// Pick a move for `color` with the default policy.
///
/// `Ok(None)` means `color` has no legal move; use
/// `legal_move_checks::check_status` to tell checkmate from stalemate.
pub fn pick(
    game_state: &GameState,
    color: Color,
    params: &GoParams,
) -> Result<Option<PickedMove>, ChessErrors> {
    let mut engine = EvGreedyEngine::new();
    Ok(engine.choose_move(game_state, color, params)?.best_move)
}

/// Decide a defend-token spend with the default policy.
pub fn should_defend(
    game_state: &GameState,
    ctx: &AttackContext,
) -> Result<DefendDecision, ChessErrors> {
    EvGreedyEngine::new().decide_defend(game_state, ctx)
}

#[cfg(test)]
mod tests {
    use super::{pick, should_defend, EvGreedyEngine};
    use crate::chess_errors::ChessErrors;
    use crate::decision::defend_economy::AttackContext;
    use crate::engines::engine_trait::{Engine, GoParams, PickKind};
    use crate::game_state::chess_types::{Color, Piece, PieceKind, Square};
    use crate::game_state::game_state::GameState;
    use crate::move_generation::legal_move_checks::{check_status, CheckStatus};
    use crate::moves::move_descriptions::AttackMode;

    const EPS: f64 = 1e-9;

    fn state(fen: &str, white_tokens: u8, black_tokens: u8) -> GameState {
        let mut state = GameState::from_fen(fen).expect("test FEN should parse");
        state.set_defends(Color::White, white_tokens);
        state.set_defends(Color::Black, black_tokens);
        state
    }

    #[test]
    fn opening_pick_for_black_is_e7e5() {
        let state = GameState::new_game().expect("starting FEN should parse");
        let picked = pick(&state, Color::Black, &GoParams::default())
            .expect("pick should succeed")
            .expect("opening has legal moves");

        assert_eq!(picked.mv.from, Square::new(1, 4));
        assert_eq!(picked.mv.to, Square::new(3, 4));
        assert_eq!(picked.attack, AttackMode::Base);
        assert_eq!((picked.trace.from.as_str(), picked.trace.to.as_str()), ("e7", "e5"));
        match picked.trace.kind {
            PickKind::Quiet { eval } => assert!((eval - 0.227929).abs() < 1e-6, "{eval}"),
            PickKind::Capture { .. } => panic!("no capture exists in the opening"),
        }

        let again = pick(&state, Color::Black, &GoParams::default()).expect("pick should succeed");
        assert_eq!(again, Some(picked));
    }

    #[test]
    fn depth_does_not_change_the_pick() {
        let state = GameState::new_game().expect("starting FEN should parse");
        let shallow = pick(&state, Color::White, &GoParams::default()).expect("pick should succeed");
        let deep = pick(&state, Color::White, &GoParams { depth: Some(4) }).expect("pick should succeed");
        assert_eq!(shallow, deep);
    }

    #[test]
    fn checkmated_side_gets_no_move() {
        let state = state(
            "rnb1kbnr/pppp1ppp/8/4p3/6Pq/5P2/PPPPP2P/RNBQKBNR w",
            2,
            2,
        );
        assert_eq!(pick(&state, Color::White, &GoParams::default()), Ok(None));
        assert!(check_status(&state.board, Color::White).is_check());
    }

    #[test]
    fn forced_checker_capture_is_played_as_base() {
        let state = state("k7/pp6/1N(1)6/4B3/8/8/8/4K3 b", 2, 2);
        assert!(matches!(
            check_status(&state.board, Color::Black),
            CheckStatus::SingleCheck { .. }
        ));

        let picked = pick(&state, Color::Black, &GoParams::default())
            .expect("pick should succeed")
            .expect("a reply exists");
        assert_eq!(picked.mv.from, Square::new(1, 0));
        assert_eq!(picked.mv.to, Square::new(2, 1));
        assert!(picked.mv.defend_locked);
        assert_eq!(picked.attack, AttackMode::Base);
        match picked.trace.kind {
            PickKind::Capture { ev, detail } => {
                assert_eq!(detail.p_kill_base, 1.0);
                assert!((ev - 3.0).abs() < EPS);
            }
            PickKind::Quiet { .. } => panic!("expected a capture"),
        }
        assert_eq!(picked.trace.from, "a7");
        assert_eq!(picked.trace.to, "b6");
    }

    #[test]
    fn rook_takes_undefended_pawn() {
        let state = state("4k3/8/8/3p4/8/8/8/3RK3 w", 2, 0);
        let picked = pick(&state, Color::White, &GoParams::default())
            .expect("pick should succeed")
            .expect("a move exists");
        assert_eq!(picked.mv.to, Square::new(3, 3));
        assert_eq!(picked.attack, AttackMode::Base);
        match picked.trace.kind {
            PickKind::Capture { ev, .. } => assert!((ev - 1.0).abs() < EPS),
            PickKind::Quiet { .. } => panic!("expected a capture"),
        }
    }

    #[test]
    fn super_is_recommended_when_it_clearly_wins() {
        let state = state("3qk3/8/8/8/8/8/8/3QK3 w", 2, 0);
        let picked = pick(&state, Color::White, &GoParams::default())
            .expect("pick should succeed")
            .expect("a move exists");
        assert_eq!(picked.mv.to, Square::new(0, 3));
        assert_eq!(picked.attack, AttackMode::Super);
    }

    #[test]
    fn picks_never_land_on_a_king() {
        for (fen, color) in [
            ("4k3/8/8/8/8/8/8/4RK2 w", Color::White),
            ("4k3/3P4/8/8/8/8/8/4K3 w", Color::White),
            ("r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w", Color::White),
            ("r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R b", Color::Black),
        ] {
            let state = state(fen, 2, 2);
            if let Some(picked) = pick(&state, color, &GoParams::default()).expect("pick should succeed") {
                let target = state.board.piece_at(picked.mv.to);
                assert!(!target.is_some_and(|p| p.is_king()), "{fen}: {}", picked.mv);
            }
        }
    }

    #[test]
    fn malformed_board_is_reported() {
        let state = state("8/8/8/8/8/8/8/4K3 w", 2, 2);
        assert_eq!(
            pick(&state, Color::White, &GoParams::default()),
            Err(ChessErrors::MissingKing(Color::Black))
        );
    }

    #[test]
    fn locked_attacks_are_never_defended() {
        let state = state("4k3/8/8/3n4/8/8/8/3QK3 w", 2, 2);
        let ctx = AttackContext {
            attack: AttackMode::Base,
            attacker: Piece::new(PieceKind::Queen, Color::White),
            defender: Piece::new(PieceKind::Knight, Color::Black),
            defend_locked: true,
        };
        let decision = should_defend(&state, &ctx).expect("defend should evaluate");
        assert!(!decision.use_token);
    }

    #[test]
    fn seeded_engines_agree_on_sampled_defends() {
        let state = state("4k3/8/8/3n4/8/8/8/3RK3 w", 2, 1);
        let ctx = AttackContext {
            attack: AttackMode::Super,
            attacker: Piece::new(PieceKind::Rook, Color::White),
            defender: Piece::new(PieceKind::Knight, Color::Black),
            defend_locked: false,
        };

        let mut a = EvGreedyEngine::new();
        let mut b = EvGreedyEngine::new();
        a.set_option("Seed", "99").expect("seed should parse");
        b.set_option("Seed", "99").expect("seed should parse");

        for _ in 0..12 {
            let da = a.decide_defend(&state, &ctx).expect("defend should evaluate");
            let db = b.decide_defend(&state, &ctx).expect("defend should evaluate");
            assert_eq!(da, db);
        }
    }

    #[test]
    fn info_lines_report_move_count() {
        let state = GameState::new_game().expect("starting FEN should parse");
        let out = EvGreedyEngine::new()
            .choose_move(&state, Color::White, &GoParams { depth: Some(3) })
            .expect("engine should run");
        assert_eq!(
            out.info_lines[0],
            "info string ev_engine legal_moves 20 in_check false"
        );
        assert_eq!(out.info_lines[1], "info string ev_engine requested_depth 3 searched 1");
    }
}
