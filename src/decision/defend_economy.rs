//! Defend-token economy: should the defender spend a token on this hit?
//!
//! The value of saving the piece (its full value if the hit would kill it,
//! a share proportional to the damage otherwise) is discounted by scarcity:
//! holding two or more tokens, or plenty of HP on the board, makes the side
//! keep its tokens for later.
//!
//! Whether a super attack would kill depends on it connecting. By default that
//! chance is folded in as an expectation; a caller may instead supply a
//! random source so the decision is a reproducible draw.

use rand::{Rng, RngCore};

use crate::combat::damage::{base_damage, is_lethal, super_damage};
use crate::engines::policy_config::PolicyConfig;
use crate::game_state::chess_types::Piece;
use crate::game_state::game_state::GameState;
use crate::moves::move_descriptions::AttackMode;

const RESERVE_TOKEN_SCARCITY: f64 = 0.85;

/// An incoming attack, seen from the defender's side.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AttackContext {
    pub attack: AttackMode,
    pub attacker: Piece,
    pub defender: Piece,
    /// The attack is a forced capture of a checking piece.
    pub defend_locked: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DefendReason {
    Locked,
    NoneLeft,
    WorthToken,
    SaveToken,
}

impl DefendReason {
    pub const fn as_str(self) -> &'static str {
        match self {
            DefendReason::Locked => "locked",
            DefendReason::NoneLeft => "none_left",
            DefendReason::WorthToken => "worth_token",
            DefendReason::SaveToken => "save_token",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DefendDecision {
    pub use_token: bool,
    pub reason: DefendReason,
    pub decision_value: f64,
    pub score_to_save: f64,
    pub scarcity: f64,
    /// Chance the attack kills if undefended, as used in `score_to_save`.
    pub kill_probability: f64,
}

impl DefendDecision {
    fn declined(reason: DefendReason) -> Self {
        Self {
            use_token: false,
            reason,
            decision_value: 0.0,
            score_to_save: 0.0,
            scarcity: 0.0,
            kill_probability: 0.0,
        }
    }
}

/// Decide whether the owner of `ctx.defender` spends a token.
///
/// With `connect_source == None` a lethal super attack contributes its
/// connect probability as a weight; with a source, one draw decides whether
/// it connects.
pub fn evaluate_defend(
    state: &GameState,
    ctx: &AttackContext,
    config: &PolicyConfig,
    connect_source: Option<&mut dyn RngCore>,
) -> DefendDecision {
    if ctx.defend_locked {
        return DefendDecision::declined(DefendReason::Locked);
    }
    let tokens = state.defends_of(ctx.defender.color);
    if tokens == 0 {
        return DefendDecision::declined(DefendReason::NoneLeft);
    }

    let b_dmg = base_damage(ctx.attacker.kind, state.accelerated);
    let s_dmg = super_damage(ctx.attacker.kind, state.accelerated);
    let defender_hp = ctx.defender.current_hp().max(1);
    let p_hit = config.super_hit_probability.clamp(0.0, 1.0);

    let (kill_probability, expected_damage) = match ctx.attack {
        AttackMode::Base => (
            if is_lethal(b_dmg, defender_hp) { 1.0 } else { 0.0 },
            f64::from(b_dmg),
        ),
        AttackMode::Super => {
            let lethal = is_lethal(s_dmg, defender_hp);
            let p_kill = match connect_source {
                _ if !lethal => 0.0,
                Some(rng) => {
                    if rng.random::<f64>() < p_hit {
                        1.0
                    } else {
                        0.0
                    }
                }
                None => p_hit,
            };
            (p_kill, p_hit * f64::from(s_dmg))
        }
    };

    let value = ctx.defender.kind.material_value();
    let damage_fraction = (expected_damage / f64::from(defender_hp)).min(1.0);
    let chip_share = config.chip_weight * damage_fraction;
    let score_to_save = value * (kill_probability + (1.0 - kill_probability) * chip_share);

    let scarcity = token_scarcity(tokens) * hp_scarcity(state.board.total_side_hp(ctx.defender.color));
    let decision_value = score_to_save * scarcity;
    let use_token = decision_value >= config.defend_threshold;

    DefendDecision {
        use_token,
        reason: if use_token {
            DefendReason::WorthToken
        } else {
            DefendReason::SaveToken
        },
        decision_value,
        score_to_save,
        scarcity,
        kill_probability,
    }
}

#[inline]
fn token_scarcity(tokens: u8) -> f64 {
    if tokens >= 2 {
        RESERVE_TOKEN_SCARCITY
    } else {
        1.0
    }
}

#[inline]
fn hp_scarcity(total_hp: u32) -> f64 {
    if total_hp > 14 {
        0.85
    } else if total_hp > 8 {
        0.95
    } else {
        1.0
    }
}
