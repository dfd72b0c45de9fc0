//! Combat arithmetic: damage, lethality and promotion.
//!
//! Every capture in tChess is an attack. A base attack deals the attacker's
//! base damage (plus one while the game is accelerated); a super attack deals
//! twice that but only sometimes connects. The target dies when damage meets
//! or exceeds its current HP.

use crate::game_state::chess_rules::{ACCELERATION_BONUS, SUPER_DAMAGE_MULTIPLIER};
use crate::game_state::chess_types::{Piece, PieceKind, Square};

#[inline]
pub fn base_damage(kind: PieceKind, accelerated: bool) -> u8 {
    let bonus = if accelerated { ACCELERATION_BONUS } else { 0 };
    kind.base_damage() + bonus
}

#[inline]
pub fn super_damage(kind: PieceKind, accelerated: bool) -> u8 {
    SUPER_DAMAGE_MULTIPLIER * base_damage(kind, accelerated)
}

#[inline]
pub fn is_lethal(damage: u8, defender_hp: u8) -> bool {
    damage >= defender_hp
}

/// The piece as it stands after arriving on `to`.
///
/// A pawn reaching its promotion row becomes a full-health queen; anything
/// else is returned unchanged. Legality simulation and real move application
/// both go through here.
pub fn promote_on_arrival(piece: Piece, to: Square) -> Piece {
    if piece.kind == PieceKind::Pawn && to.row == piece.color.promotion_row() {
        Piece::with_hp(PieceKind::Queen, piece.color, PieceKind::Queen.max_hp())
    } else {
        piece
    }
}
