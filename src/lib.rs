//! Crate root module declarations for the tChess decision core.
//!
//! tChess is a chess variant where pieces carry hit points, deal variable
//! damage, and each side holds a few defend tokens that can block an attack.
//! This file exposes the board model, the attack/legality engine, the combat
//! and decision models, and the move-selection engine so binaries, benches,
//! and external tooling can import stable module paths.

pub mod chess_errors;

pub mod game_state {
    pub mod board;
    pub mod chess_rules;
    pub mod chess_types;
    pub mod game_state;
    pub mod undo_state;
}

pub mod moves {
    pub mod king_moves;
    pub mod knight_moves;
    pub mod move_descriptions;
    pub mod pawn_moves;
    pub mod slider_moves;
}

pub mod move_generation {
    pub mod check_response;
    pub mod legal_move_apply;
    pub mod legal_move_checks;
    pub mod legal_move_generator;
    pub mod move_generator;
    pub mod pseudo_moves;
}

pub mod combat {
    pub mod damage;
}

pub mod decision {
    pub mod capture_ev;
    pub mod defend_economy;
}

pub mod search {
    pub mod board_scoring;
}

pub mod engines {
    pub mod engine_ev_greedy;
    pub mod engine_trait;
    pub mod policy_config;
}

pub mod protocol {
    pub mod text_protocol;
}

pub mod utils {
    pub mod algebraic;
    pub mod fen_parser;
    pub mod render_game_state;
}

pub use engines::engine_ev_greedy::{pick, should_defend};
