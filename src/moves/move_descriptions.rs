//! Move records and attack modes.
//!
//! A `Move` is a plain from/to pair plus a capture flag. Check-response
//! filtering may additionally mark a capture as `forced` to a base attack and
//! `defend_locked`, meaning the defender cannot spend a token against it.

use std::fmt;
use std::str::FromStr;

use crate::chess_errors::ChessErrors;
use crate::game_state::chess_types::Square;

/// How hard an attacker swings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AttackMode {
    /// The kind's base damage, always connects.
    #[default]
    Base,
    /// Double damage that only connects some of the time.
    Super,
}

impl AttackMode {
    pub const fn as_str(self) -> &'static str {
        match self {
            AttackMode::Base => "base",
            AttackMode::Super => "super",
        }
    }
}

impl fmt::Display for AttackMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AttackMode {
    type Err = ChessErrors;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "base" => Ok(AttackMode::Base),
            "super" => Ok(AttackMode::Super),
            _ => Err(ChessErrors::InvalidOption(format!(
                "unknown attack mode '{s}'"
            ))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Move {
    pub from: Square,
    pub to: Square,
    pub capture: bool,
    /// Attack mode imposed by the rules, if any.
    pub forced: Option<AttackMode>,
    pub defend_locked: bool,
}

impl Move {
    #[inline]
    pub const fn quiet(from: Square, to: Square) -> Self {
        Self {
            from,
            to,
            capture: false,
            forced: None,
            defend_locked: false,
        }
    }

    #[inline]
    pub const fn capture(from: Square, to: Square) -> Self {
        Self {
            from,
            to,
            capture: true,
            forced: None,
            defend_locked: false,
        }
    }

    /// Defender tokens cannot be used against this move.
    #[inline]
    pub fn escapes_defend(&self) -> bool {
        self.defend_locked || self.forced == Some(AttackMode::Base)
    }
}

/// Coordinate form such as `e2e4`.
impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.from, self.to)
    }
}

#[cfg(test)]
mod tests {
    use super::{AttackMode, Move};
    use crate::game_state::chess_types::Square;

    #[test]
    fn forced_or_locked_moves_escape_defend() {
        let mut mv = Move::capture(Square::new(4, 4), Square::new(3, 3));
        assert!(!mv.escapes_defend());
        mv.forced = Some(AttackMode::Base);
        assert!(mv.escapes_defend());
        mv.forced = None;
        mv.defend_locked = true;
        assert!(mv.escapes_defend());
    }

    #[test]
    fn attack_mode_parses_case_insensitively() {
        assert_eq!("SUPER".parse::<AttackMode>(), Ok(AttackMode::Super));
        assert!("heavy".parse::<AttackMode>().is_err());
        assert_eq!(Move::quiet(Square::new(6, 4), Square::new(4, 4)).to_string(), "e2e4");
    }
}
