//! Line-oriented text front end modelled on UCI.
//!
//! Holds the current position, side to move and combat state, routes `go`
//! and `defend` requests to the engine, and prints one-line replies. Errors
//! are reported as `info string` lines and never end the loop.

use std::io::{self, BufRead, Write};

use tracing::{debug, info};

use crate::chess_errors::ChessErrors;
use crate::decision::defend_economy::AttackContext;
use crate::engines::engine_ev_greedy::EvGreedyEngine;
use crate::engines::engine_trait::{Engine, GoParams};
use crate::game_state::chess_types::Color;
use crate::game_state::game_state::GameState;
use crate::move_generation::legal_move_apply::{apply_move, MoveOutcome};
use crate::move_generation::check_response::check_response_moves;
use crate::move_generation::legal_move_checks::check_status;
use crate::moves::move_descriptions::AttackMode;
use crate::utils::algebraic::algebraic_to_square;
use crate::utils::fen_parser::parse_fen;
use crate::utils::render_game_state::render_game_state;

const ENGINE_AUTHOR: &str = "tChess";

pub fn run_stdio_loop() -> io::Result<()> {
    let stdin = io::stdin();
    let mut stdout = io::stdout();
    let mut protocol = TextProtocol::new();

    for line in stdin.lock().lines() {
        let line = line?;
        let should_quit = protocol.handle_command(&line, &mut stdout)?;
        stdout.flush()?;
        if should_quit {
            break;
        }
    }

    Ok(())
}

pub struct TextProtocol {
    game_state: GameState,
    side_to_move: Color,
    engine: Box<dyn Engine>,
}

impl Default for TextProtocol {
    fn default() -> Self {
        Self::new()
    }
}

impl TextProtocol {
    pub fn new() -> Self {
        Self {
            game_state: GameState::default(),
            side_to_move: Color::White,
            engine: Box::new(EvGreedyEngine::new()),
        }
    }

    /// Handle one input line. Returns `Ok(true)` once `quit` is seen.
    pub fn handle_command(&mut self, line: &str, out: &mut impl Write) -> io::Result<bool> {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            return Ok(false);
        }

        let mut parts = trimmed.split_whitespace();
        let cmd = parts.next().unwrap_or_default();
        let args: Vec<&str> = parts.collect();
        debug!(cmd, ?args, "protocol command");

        let result = match cmd {
            "uci" => {
                writeln!(out, "id name {}", self.engine.name())?;
                writeln!(out, "id author {ENGINE_AUTHOR}")?;
                writeln!(out, "uciok")?;
                Ok(())
            }
            "isready" => {
                writeln!(out, "readyok")?;
                Ok(())
            }
            "newgame" => self.handle_newgame(),
            "position" => self.handle_position(&args),
            "hp" => self.handle_hp(&args),
            "defends" => self.handle_defends(&args),
            "accelerated" => self.handle_accelerated(&args),
            "setoption" => self.handle_setoption(trimmed),
            "play" => self.handle_play(&args),
            "go" => return self.handle_go(&args, out).map(|_| false),
            "defend" => return self.handle_defend(&args, out).map(|_| false),
            "d" => {
                writeln!(out, "{}", render_game_state(&self.game_state))?;
                writeln!(out, "side: {}", self.side_to_move)?;
                Ok(())
            }
            "quit" => return Ok(true),
            _ => Err(ChessErrors::InvalidOption(format!("unknown command '{cmd}'"))),
        };

        if let Err(err) = result {
            writeln!(out, "info string {cmd} error: {err}")?;
        }
        Ok(false)
    }

    fn handle_newgame(&mut self) -> Result<(), ChessErrors> {
        self.game_state = GameState::new_game()?;
        self.side_to_move = Color::White;
        self.engine.new_game();
        Ok(())
    }

    fn handle_position(&mut self, args: &[&str]) -> Result<(), ChessErrors> {
        let (board, side) = match args.split_first() {
            Some((&"startpos", _)) => {
                let state = GameState::new_game()?;
                (state.board, Color::White)
            }
            Some((&"fen", rest)) if !rest.is_empty() => parse_fen(&rest.join(" "))?,
            Some((&"fen", _)) => {
                return Err(ChessErrors::InvalidFen("missing FEN after 'position fen'".to_owned()))
            }
            Some((other, _)) => {
                return Err(ChessErrors::InvalidOption(format!(
                    "unsupported position token '{other}'"
                )))
            }
            None => {
                return Err(ChessErrors::InvalidOption("incomplete position command".to_owned()))
            }
        };

        // Combat state survives a position change; only the placement is replaced.
        self.game_state.board = board;
        self.side_to_move = side;
        Ok(())
    }

    fn handle_hp(&mut self, args: &[&str]) -> Result<(), ChessErrors> {
        let [square, hp] = args else {
            return Err(ChessErrors::InvalidOption("usage: hp <square> <n>".to_owned()));
        };
        let square = algebraic_to_square(square)?;
        let hp = parse_arg::<u8>("hp", hp)?;

        let mut piece = self
            .game_state
            .board
            .piece_at(square)
            .ok_or(ChessErrors::EmptySquare(square))?;
        let max = piece.kind.max_hp();
        if piece.is_king() || hp == 0 || hp > max {
            return Err(ChessErrors::InvalidHitPoints { square, hp, max });
        }
        piece.hp = Some(hp);
        self.game_state.board.place(square, piece);
        Ok(())
    }

    fn handle_defends(&mut self, args: &[&str]) -> Result<(), ChessErrors> {
        let [white, black] = args else {
            return Err(ChessErrors::InvalidOption(
                "usage: defends <white> <black>".to_owned(),
            ));
        };
        self.game_state
            .set_defends(Color::White, parse_arg::<u8>("defends", white)?);
        self.game_state
            .set_defends(Color::Black, parse_arg::<u8>("defends", black)?);
        Ok(())
    }

    fn handle_accelerated(&mut self, args: &[&str]) -> Result<(), ChessErrors> {
        self.game_state.accelerated = match args.first().map(|s| s.to_ascii_lowercase()) {
            Some(v) if matches!(v.as_str(), "on" | "true" | "1") => true,
            Some(v) if matches!(v.as_str(), "off" | "false" | "0") => false,
            _ => {
                return Err(ChessErrors::InvalidOption(
                    "usage: accelerated on|off".to_owned(),
                ))
            }
        };
        Ok(())
    }

    fn handle_setoption(&mut self, line: &str) -> Result<(), ChessErrors> {
        let mut tokens = line.split_whitespace();
        let _ = tokens.next(); // setoption

        let mut name_tokens = Vec::<&str>::new();
        let mut value_tokens = Vec::<&str>::new();
        let mut mode = "";

        for tok in tokens {
            match tok {
                "name" => mode = "name",
                "value" => mode = "value",
                _ if mode == "name" => name_tokens.push(tok),
                _ if mode == "value" => value_tokens.push(tok),
                _ => {}
            }
        }

        let name = name_tokens.join(" ");
        let value = value_tokens.join(" ");
        self.engine.set_option(&name, &value)?;
        info!(%name, %value, "option set");
        Ok(())
    }

    /// `play <from><to> [advance | damaged <n> | blocked | missed]`
    fn handle_play(&mut self, args: &[&str]) -> Result<(), ChessErrors> {
        let Some((coords, rest)) = args.split_first() else {
            return Err(ChessErrors::InvalidOption("usage: play <move> [outcome]".to_owned()));
        };
        if coords.len() != 4 || !coords.is_ascii() {
            return Err(ChessErrors::InvalidAlgebraic((*coords).to_owned()));
        }
        let from = algebraic_to_square(&coords[..2])?;
        let to = algebraic_to_square(&coords[2..])?;

        self.game_state.validate()?;
        // Check-response moves carry the forced/defend-locked annotations apply_move needs.
        let mv = check_response_moves(&self.game_state, self.side_to_move)
            .into_iter()
            .find(|m| m.from == from && m.to == to)
            .ok_or_else(|| ChessErrors::InvalidOption(format!("illegal move '{coords}'")))?;

        let outcome = match rest {
            [] | ["advance"] => MoveOutcome::Advance,
            ["damaged", n] => MoveOutcome::Damaged {
                damage: parse_arg::<u8>("damage", n)?,
            },
            ["blocked"] => MoveOutcome::Blocked,
            ["missed"] => MoveOutcome::Missed,
            _ => {
                return Err(ChessErrors::InvalidOption(format!(
                    "unknown outcome '{}'",
                    rest.join(" ")
                )))
            }
        };

        self.game_state = apply_move(&self.game_state, &mv, outcome)?;
        self.side_to_move = self.side_to_move.opposite();
        Ok(())
    }

    fn handle_go(&mut self, args: &[&str], out: &mut impl Write) -> io::Result<()> {
        let params = parse_go_params(args);
        let result = match self
            .engine
            .choose_move(&self.game_state, self.side_to_move, &params)
        {
            Ok(result) => result,
            Err(err) => {
                writeln!(out, "info string go error: {err}")?;
                writeln!(out, "bestmove 0000")?;
                return Ok(());
            }
        };

        for line in &result.info_lines {
            writeln!(out, "{line}")?;
        }

        match result.best_move {
            Some(picked) => writeln!(out, "bestmove {} {}", picked.mv, picked.attack)?,
            None => {
                let status = if check_status(&self.game_state.board, self.side_to_move).is_check() {
                    "checkmate"
                } else {
                    "stalemate"
                };
                writeln!(out, "info string {status}")?;
                writeln!(out, "bestmove 0000")?;
            }
        }
        Ok(())
    }

    /// `defend <base|super> <attacker-sq> <defender-sq> [locked]`
    fn handle_defend(&mut self, args: &[&str], out: &mut impl Write) -> io::Result<()> {
        let decision = self
            .attack_context(args)
            .and_then(|ctx| self.engine.decide_defend(&self.game_state, &ctx));

        match decision {
            Ok(d) => writeln!(
                out,
                "defend {} {} {:.4}",
                d.use_token,
                d.reason.as_str(),
                d.decision_value
            ),
            Err(err) => writeln!(out, "info string defend error: {err}"),
        }
    }

    fn attack_context(&self, args: &[&str]) -> Result<AttackContext, ChessErrors> {
        let (mode, attacker_sq, defender_sq, locked) = match args {
            [mode, a, d] => (mode, a, d, false),
            [mode, a, d, flag] if flag.eq_ignore_ascii_case("locked") => (mode, a, d, true),
            _ => {
                return Err(ChessErrors::InvalidOption(
                    "usage: defend <base|super> <attacker> <defender> [locked]".to_owned(),
                ))
            }
        };

        let attack = mode.parse::<AttackMode>()?;
        let attacker_sq = algebraic_to_square(attacker_sq)?;
        let defender_sq = algebraic_to_square(defender_sq)?;
        let board = &self.game_state.board;

        Ok(AttackContext {
            attack,
            attacker: board
                .piece_at(attacker_sq)
                .ok_or(ChessErrors::EmptySquare(attacker_sq))?,
            defender: board
                .piece_at(defender_sq)
                .ok_or(ChessErrors::EmptySquare(defender_sq))?,
            defend_locked: locked,
        })
    }
}

fn parse_arg<T: std::str::FromStr>(what: &str, raw: &str) -> Result<T, ChessErrors> {
    raw.parse::<T>()
        .map_err(|_| ChessErrors::InvalidOption(format!("invalid {what} value '{raw}'")))
}

fn parse_go_params(args: &[&str]) -> GoParams {
    let mut params = GoParams::default();
    let mut tokens = args.iter();
    while let Some(tok) = tokens.next() {
        if *tok == "depth" {
            params.depth = tokens.next().and_then(|x| x.parse::<u8>().ok());
        }
    }
    params
}
