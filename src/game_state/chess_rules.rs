//! Canonical tChess rule constants.
//!
//! Per-kind lookup tables indexed by `PieceKind::index()` (pawn, knight,
//! bishop, rook, queen, king) plus the standard starting layout.

/// Standard starting position in FEN. Every piece begins at full HP.
pub const STARTING_POSITION_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w";

/// Maximum hit points per kind. Kings are outside combat.
pub const MAX_HP: [u8; 6] = [2, 4, 4, 6, 8, 0];

/// Base attack damage per kind before the acceleration bonus.
pub const BASE_DAMAGE: [u8; 6] = [1, 2, 2, 3, 4, 0];

/// Material value per kind, used both for evaluation and EV scoring.
pub const MATERIAL_VALUE: [f64; 6] = [1.0, 3.0, 3.0, 5.0, 9.0, 100.0];

/// Extra damage added to every base attack while the game is accelerated.
pub const ACCELERATION_BONUS: u8 = 1;

/// Super attacks deal this multiple of base damage.
pub const SUPER_DAMAGE_MULTIPLIER: u8 = 2;
