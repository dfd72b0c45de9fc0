//! Expected value of a capture under an uncertain defender.
//!
//! For a capturing move the model scores a base and a super attack:
//!
//! `EV(mode) = P(kill) * value(defender) + chip(mode) - P(no kill) * hang`
//!
//! where `chip` credits expected non-lethal damage and `hang` is the risk of
//! losing the attacker when its origin square is attacked. The defender's
//! token use is modelled by a propensity that grows with the target's value
//! and lethality and shrinks while the defender still has plenty of HP or
//! tokens. Super is recommended only when it beats base by a clear margin.

use crate::combat::damage::{base_damage, is_lethal, super_damage};
use crate::engines::policy_config::PolicyConfig;
use crate::game_state::chess_types::Piece;
use crate::game_state::game_state::GameState;
use crate::move_generation::legal_move_checks::is_square_attacked;
use crate::moves::move_descriptions::{AttackMode, Move};

const LETHAL_PROPENSITY_BASE: f64 = 0.20;
const LETHAL_PROPENSITY_PER_VALUE: f64 = 0.10;
const LETHAL_PROPENSITY_CAP: f64 = 0.95;
const CHIP_PROPENSITY_BASE: f64 = 0.08;
const CHIP_PROPENSITY_PER_FRACTION: f64 = 0.25;
const CHIP_PROPENSITY_HEAVY_BONUS: f64 = 0.05;
const HEAVY_PIECE_VALUE: f64 = 5.0;
const RESERVE_TOKEN_DISCOUNT: f64 = 0.85;

/// Breakdown of a capture's expected value for both attack modes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CaptureEvaluation {
    /// EV of the better mode.
    pub ev: f64,
    pub ev_base: f64,
    pub ev_super: f64,
    /// Recommended attack mode.
    pub choice: AttackMode,
    pub base_damage: u8,
    pub super_damage: u8,
    pub lethal_base: bool,
    pub lethal_super: bool,
    pub forced_base_escape: bool,
    pub p_use_base: f64,
    pub p_use_super: f64,
    pub p_kill_base: f64,
    pub p_kill_super: f64,
    pub value_kill: f64,
    pub value_chip_base: f64,
    pub value_chip_super: f64,
    pub hanging_factor: f64,
}

/// Score the capture `mv` in `state`.
///
/// Returns `None` when either square is empty or the target is a king; kings
/// are never capture targets.
pub fn evaluate_capture(
    state: &GameState,
    mv: &Move,
    config: &PolicyConfig,
) -> Option<CaptureEvaluation> {
    let board = &state.board;
    let attacker = board.piece_at(mv.from)?;
    let defender = board.piece_at(mv.to)?;
    if defender.is_king() {
        return None;
    }

    let b_dmg = base_damage(attacker.kind, state.accelerated);
    let s_dmg = super_damage(attacker.kind, state.accelerated);
    let defender_hp = defender.current_hp();
    let lethal_base = is_lethal(b_dmg, defender_hp);
    let lethal_super = is_lethal(s_dmg, defender_hp);
    let forced_base_escape = mv.escapes_defend();

    let p_use_base =
        opponent_defend_propensity(state, &defender, lethal_base, b_dmg, forced_base_escape, config);
    let p_use_super =
        opponent_defend_propensity(state, &defender, lethal_super, b_dmg, forced_base_escape, config);

    let p_block = config.block_probability;
    let p_hit_super = config.super_hit_probability;

    let p_land_base = if forced_base_escape {
        1.0
    } else {
        1.0 - p_use_base * p_block
    };
    let p_land_super = if forced_base_escape {
        p_hit_super
    } else {
        p_hit_super * (1.0 - p_use_super * p_block)
    };

    let p_kill_base = if lethal_base { p_land_base } else { 0.0 };
    let p_kill_super = if lethal_super { p_land_super } else { 0.0 };

    let exp_dmg_base = if lethal_base {
        0.0
    } else {
        f64::from(b_dmg) * p_land_base
    };
    let exp_dmg_super = if lethal_super {
        0.0
    } else {
        f64::from(s_dmg) * p_land_super
    };

    let value_kill = defender.kind.material_value();
    let max_hp = f64::from(defender.kind.max_hp().max(1));
    let chip_per_hp = config.chip_weight * value_kill / max_hp;
    let value_chip_base = chip_per_hp * exp_dmg_base;
    let value_chip_super = chip_per_hp * exp_dmg_super;

    let origin_threatened = is_square_attacked(board, mv.from, attacker.color.opposite());
    let hanging_factor = if origin_threatened {
        attacker.kind.material_value() * config.hanging_factor
    } else {
        0.0
    };

    // Any outcome short of a kill counts as a bounce, chip damage included.
    let ev_base = p_kill_base * value_kill + value_chip_base - (1.0 - p_kill_base) * hanging_factor;
    let ev_super =
        p_kill_super * value_kill + value_chip_super - (1.0 - p_kill_super) * hanging_factor;

    let choice = if ev_super - ev_base > config.super_margin {
        AttackMode::Super
    } else {
        AttackMode::Base
    };

    Some(CaptureEvaluation {
        ev: ev_base.max(ev_super),
        ev_base,
        ev_super,
        choice,
        base_damage: b_dmg,
        super_damage: s_dmg,
        lethal_base,
        lethal_super,
        forced_base_escape,
        p_use_base,
        p_use_super,
        p_kill_base,
        p_kill_super,
        value_kill,
        value_chip_base,
        value_chip_super,
        hanging_factor,
    })
}

/// Probability that the owner of `defender` spends a token on this hit.
///
/// Non-lethal propensity is driven by the base-damage share of the target's
/// HP for both modes.
pub fn opponent_defend_propensity(
    state: &GameState,
    defender: &Piece,
    lethal: bool,
    base_damage: u8,
    forced_base_escape: bool,
    config: &PolicyConfig,
) -> f64 {
    let tokens = state.defends_of(defender.color);
    if tokens == 0 || forced_base_escape {
        return 0.0;
    }

    let value = defender.kind.material_value();
    let mut p = if lethal {
        (LETHAL_PROPENSITY_BASE + LETHAL_PROPENSITY_PER_VALUE * value).min(LETHAL_PROPENSITY_CAP)
    } else {
        let hp = f64::from(defender.current_hp().max(1));
        let fraction = (f64::from(base_damage) / hp).min(1.0);
        let heavy = if value >= HEAVY_PIECE_VALUE {
            CHIP_PROPENSITY_HEAVY_BONUS
        } else {
            0.0
        };
        CHIP_PROPENSITY_BASE + CHIP_PROPENSITY_PER_FRACTION * fraction + heavy
    };

    p *= conserve_factor(state.board.total_side_hp(defender.color));
    if tokens >= 2 {
        p *= RESERVE_TOKEN_DISCOUNT;
    }

    p.min(config.max_defend_propensity).max(0.0)
}

/// Early in the game, with lots of HP left, tokens are hoarded.
#[inline]
fn conserve_factor(total_hp: u32) -> f64 {
    if total_hp > 18 {
        0.8
    } else if total_hp > 10 {
        0.9
    } else {
        1.0
    }
}
