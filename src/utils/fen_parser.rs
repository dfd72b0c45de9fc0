//! FEN-to-board parser.
//!
//! Reads the placement and side-to-move fields of a Forsyth-Edwards Notation
//! string. Any piece letter may be followed by `(n)` to give its current hit
//! points, e.g. `R(3)` for a white rook on 3 hp. Further FEN fields (castling,
//! en passant, clocks) are accepted and ignored since tChess does not use them.

use crate::chess_errors::ChessErrors;
use crate::game_state::board::Board;
use crate::game_state::chess_types::{Color, Piece, PieceKind, Square};

/// Parse a FEN string into a board and the side to move.
///
/// A missing side-to-move field defaults to White.
pub fn parse_fen(fen: &str) -> Result<(Board, Color), ChessErrors> {
    let mut parts = fen.split_whitespace();

    let board_part = parts
        .next()
        .ok_or_else(|| ChessErrors::InvalidFen("missing board layout".to_owned()))?;
    let side = match parts.next() {
        Some(side_part) => parse_side_to_move(side_part)?,
        None => Color::White,
    };

    Ok((parse_board(board_part)?, side))
}

fn parse_board(board_part: &str) -> Result<Board, ChessErrors> {
    let ranks: Vec<&str> = board_part.split('/').collect();
    if ranks.len() != 8 {
        return Err(ChessErrors::InvalidFen(
            "board layout must contain 8 ranks".to_owned(),
        ));
    }

    let mut board = Board::empty();
    for (row, rank_str) in ranks.iter().enumerate() {
        let mut col = 0usize;
        let mut chars = rank_str.chars().peekable();

        while let Some(ch) = chars.next() {
            if let Some(empty_count) = ch.to_digit(10) {
                if !(1..=8).contains(&empty_count) {
                    return Err(ChessErrors::InvalidFen(format!(
                        "invalid empty-square count '{ch}'"
                    )));
                }
                col += empty_count as usize;
                continue;
            }

            let (color, kind) = piece_from_fen_char(ch).ok_or_else(|| {
                ChessErrors::InvalidFen(format!("invalid piece character '{ch}'"))
            })?;

            if col >= 8 {
                return Err(ChessErrors::InvalidFen(format!(
                    "rank {} has too many files",
                    8 - row
                )));
            }

            let square = Square::new(row as i8, col as i8);
            let mut piece = Piece::new(kind, color);
            if chars.peek() == Some(&'(') {
                chars.next();
                let hp = parse_hp_suffix(&mut chars)?;
                if kind != PieceKind::King && hp > kind.max_hp() {
                    return Err(ChessErrors::InvalidHitPoints {
                        square,
                        hp,
                        max: kind.max_hp(),
                    });
                }
                piece.hp = Some(hp);
            }

            board.place(square, piece);
            col += 1;
        }

        if col != 8 {
            return Err(ChessErrors::InvalidFen(format!(
                "rank {} does not sum to 8 files",
                8 - row
            )));
        }
    }

    Ok(board)
}

fn parse_hp_suffix(chars: &mut impl Iterator<Item = char>) -> Result<u8, ChessErrors> {
    let mut digits = String::new();
    for ch in chars.by_ref() {
        if ch == ')' {
            return digits
                .parse::<u8>()
                .map_err(|_| ChessErrors::InvalidFen(format!("invalid hp value '{digits}'")));
        }
        digits.push(ch);
    }
    Err(ChessErrors::InvalidFen("unterminated hp suffix".to_owned()))
}

fn parse_side_to_move(side_part: &str) -> Result<Color, ChessErrors> {
    match side_part {
        "w" => Ok(Color::White),
        "b" => Ok(Color::Black),
        _ => Err(ChessErrors::InvalidFen(format!(
            "invalid side-to-move field: {side_part}"
        ))),
    }
}

fn piece_from_fen_char(ch: char) -> Option<(Color, PieceKind)> {
    let color = if ch.is_ascii_uppercase() {
        Color::White
    } else if ch.is_ascii_lowercase() {
        Color::Black
    } else {
        return None;
    };

    let lower = ch.to_ascii_lowercase();
    let kind = PieceKind::ALL.into_iter().find(|kind| kind.fen_char() == lower)?;

    Some((color, kind))
}
