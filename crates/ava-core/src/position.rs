//! [`GameState`] over the `chess` crate's board.
//!
//! `chess::Board` knows piece placement, castling and en-passant rights but
//! nothing about the game it belongs to. [`Position`] adds the halfmove
//! clock, the fullmove number and the hashes of earlier positions, which is
//! what the repetition and 75-move rules need.

use std::fmt;
use std::str::FromStr;

use chess::{BitBoard, Board, BoardStatus, ChessMove, EMPTY, MoveGen, Piece};
use tracing::debug;

use crate::color::Color;
use crate::error::RulesError;
use crate::piece_kind::PieceKind;
use crate::rules::{DrawReason, GameState, MoveHint};

/// FEN of the standard starting position.
pub const STARTING_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

/// Halfmove clock at which the 75-move rule ends the game.
const SEVENTY_FIVE_MOVE_LIMIT: u32 = 150;

/// Light squares (b1, d1, ..., a2, c2, ...).
const LIGHT_SQUARES: u64 = 0x55AA_55AA_55AA_55AA;

/// A legal chess move: origin, destination and optional promotion.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Move(ChessMove);

impl Move {
    /// Find the legal move in `position` written as `uci` (e.g. `e2e4`, `e7e8q`).
    pub fn from_uci(uci: &str, position: &Position) -> Option<Move> {
        position
            .legal_moves()
            .into_iter()
            .find(|mv| mv.to_uci() == uci)
    }

    /// UCI long algebraic notation.
    pub fn to_uci(self) -> String {
        self.0.to_string()
    }

    /// Origin square index (A1 = 0, H8 = 63).
    pub fn source(self) -> usize {
        self.0.get_source().to_index()
    }

    /// Destination square index (A1 = 0, H8 = 63).
    pub fn dest(self) -> usize {
        self.0.get_dest().to_index()
    }

    /// Promotion piece, if any.
    pub fn promotion(self) -> Option<PieceKind> {
        self.0.get_promotion().map(PieceKind::from)
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Debug for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Move({})", self.0)
    }
}

/// A chess position with the game context needed for draw rules.
#[derive(Clone)]
pub struct Position {
    board: Board,
    halfmove_clock: u32,
    fullmove_number: u32,
    /// Hashes of earlier positions since the last capture or pawn move.
    history: Vec<u64>,
}

impl Position {
    /// The standard starting position.
    pub fn starting() -> Self {
        Self {
            board: Board::default(),
            halfmove_clock: 0,
            fullmove_number: 1,
            history: Vec::new(),
        }
    }

    /// Parse a FEN string. The move counters are optional and default to `0 1`.
    pub fn from_fen(fen: &str) -> Result<Self, RulesError> {
        let invalid = |reason: String| RulesError::InvalidFen {
            fen: fen.to_string(),
            reason,
        };

        let fields: Vec<&str> = fen.split_whitespace().collect();
        if fields.len() < 4 || fields.len() > 6 {
            return Err(invalid(format!(
                "expected 4 to 6 fields, found {}",
                fields.len()
            )));
        }

        let halfmove_clock = match fields.get(4) {
            Some(field) => field
                .parse()
                .map_err(|_| invalid(format!("bad halfmove clock \"{field}\"")))?,
            None => 0,
        };
        let fullmove_number = match fields.get(5) {
            Some(field) => field
                .parse()
                .map_err(|_| invalid(format!("bad fullmove number \"{field}\"")))?,
            None => 1,
        };

        let board = Board::from_str(&format!("{} 0 1", fields[..4].join(" "))).map_err(|e| {
            debug!(fen, error = ?e, "board rejected FEN");
            invalid(format!("{e:?}"))
        })?;

        Ok(Self {
            board,
            halfmove_clock,
            fullmove_number,
            history: Vec::new(),
        })
    }

    /// Serialize to FEN, including this position's move counters.
    pub fn to_fen(&self) -> String {
        let board_fen = self.board.to_string();
        let head: Vec<&str> = board_fen.split_whitespace().take(4).collect();
        format!(
            "{} {} {}",
            head.join(" "),
            self.halfmove_clock,
            self.fullmove_number
        )
    }

    /// The position after the move written as `uci`.
    pub fn play_uci(&self, uci: &str) -> Result<Self, RulesError> {
        let mv = Move::from_uci(uci, self).ok_or_else(|| RulesError::IllegalMove {
            mv: uci.to_string(),
            fen: self.to_fen(),
        })?;
        self.apply(mv)
    }

    /// The color-mirrored position: ranks flipped, colors swapped, side to
    /// move swapped. Repetition history is not carried over.
    pub fn mirrored(&self) -> Result<Self, RulesError> {
        Self::from_fen(&mirror_fen(&self.to_fen()))
    }

    /// The side to move.
    pub fn side_to_move(&self) -> Color {
        self.board.side_to_move().into()
    }

    /// Every piece on the board as `(color, kind, square index)`.
    pub fn pieces(&self) -> impl Iterator<Item = (Color, PieceKind, usize)> + '_ {
        let occupied = *self.board.combined();
        occupied.filter_map(move |square| {
            let kind = self.board.piece_on(square)?;
            let color = self.board.color_on(square)?;
            Some((color.into(), kind.into(), square.to_index()))
        })
    }

    /// Number of `kind` pieces owned by `color`.
    pub fn count(&self, color: Color, kind: PieceKind) -> u32 {
        (*self.board.pieces(kind.into()) & *self.board.color_combined(color.into())).popcnt()
    }

    /// Number of `kind` pieces on the board, both colors.
    pub fn count_kind(&self, kind: PieceKind) -> u32 {
        self.board.pieces(kind.into()).popcnt()
    }

    /// Zobrist hash of the board (placement, side, castling, en passant).
    pub fn hash(&self) -> u64 {
        self.board.get_hash()
    }

    /// Plies since the last capture or pawn move.
    pub fn halfmove_clock(&self) -> u32 {
        self.halfmove_clock
    }

    /// Fullmove number, starting at 1 and incremented after Black moves.
    pub fn fullmove_number(&self) -> u32 {
        self.fullmove_number
    }

    /// How many times the current position occurred before.
    pub fn repetitions(&self) -> usize {
        let hash = self.hash();
        self.history.iter().filter(|&&h| h == hash).count()
    }

    fn is_insufficient_material(&self) -> bool {
        let board = &self.board;
        let heavy = *board.pieces(Piece::Pawn) | *board.pieces(Piece::Rook) | *board.pieces(Piece::Queen);
        if heavy != EMPTY {
            return false;
        }

        let knights = board.pieces(Piece::Knight).popcnt();
        let bishops = *board.pieces(Piece::Bishop);
        if knights + bishops.popcnt() <= 1 {
            return true;
        }

        // Bishops only, all on one square color.
        let light = bishops & BitBoard::new(LIGHT_SQUARES);
        knights == 0 && (light == EMPTY || light == bishops)
    }
}

impl GameState for Position {
    type Move = Move;

    fn legal_moves(&self) -> Vec<Move> {
        MoveGen::new_legal(&self.board).map(Move).collect()
    }

    fn apply(&self, mv: Move) -> Result<Self, RulesError> {
        if !self.board.legal(mv.0) {
            return Err(RulesError::IllegalMove {
                mv: mv.to_uci(),
                fen: self.to_fen(),
            });
        }

        let irreversible = self.board.piece_on(mv.0.get_source()) == Some(Piece::Pawn)
            || self.board.piece_on(mv.0.get_dest()).is_some();

        let (halfmove_clock, history) = if irreversible {
            (0, Vec::new())
        } else {
            let mut history = Vec::with_capacity(self.history.len() + 1);
            history.extend_from_slice(&self.history);
            history.push(self.hash());
            (self.halfmove_clock + 1, history)
        };

        let fullmove_number = match self.side_to_move() {
            Color::White => self.fullmove_number,
            Color::Black => self.fullmove_number + 1,
        };

        Ok(Self {
            board: self.board.make_move_new(mv.0),
            halfmove_clock,
            fullmove_number,
            history,
        })
    }

    fn in_check(&self) -> bool {
        *self.board.checkers() != EMPTY
    }

    fn draw_by_rule(&self) -> Option<DrawReason> {
        if self.is_insufficient_material() {
            Some(DrawReason::InsufficientMaterial)
        } else if self.halfmove_clock >= SEVENTY_FIVE_MOVE_LIMIT {
            Some(DrawReason::SeventyFiveMoves)
        } else if self.repetitions() >= 2 {
            Some(DrawReason::Repetition)
        } else {
            None
        }
    }

    fn move_hint(&self, mv: Move) -> MoveHint {
        let source = mv.0.get_source();
        let dest = mv.0.get_dest();
        let attacker = self.board.piece_on(source);

        // En passant lands on an empty square.
        let victim = match self.board.piece_on(dest) {
            Some(piece) => Some(piece),
            None if attacker == Some(Piece::Pawn) && source.get_file() != dest.get_file() => {
                Some(Piece::Pawn)
            }
            None => None,
        };

        MoveHint {
            victim: victim.map(PieceKind::from),
            attacker: attacker.map(PieceKind::from),
            promotion: mv.promotion(),
            gives_check: *self.board.make_move_new(mv.0).checkers() != EMPTY,
        }
    }

    fn is_checkmate(&self) -> bool {
        self.board.status() == BoardStatus::Checkmate
    }
}

impl Default for Position {
    fn default() -> Self {
        Self::starting()
    }
}

impl FromStr for Position {
    type Err = RulesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_fen(s)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_fen())
    }
}

impl fmt::Debug for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Position")
            .field("fen", &self.to_fen())
            .field("history", &self.history.len())
            .finish()
    }
}

/// Flip a FEN top to bottom and swap the colors of everything in it.
fn mirror_fen(fen: &str) -> String {
    let fields: Vec<&str> = fen.split_whitespace().collect();
    let field = |i: usize, default: &'static str| fields.get(i).copied().unwrap_or(default);

    let placement = field(0, "8/8/8/8/8/8/8/8")
        .split('/')
        .rev()
        .map(swap_case)
        .collect::<Vec<_>>()
        .join("/");

    let side = if field(1, "w") == "w" { "b" } else { "w" };

    let castling = match field(2, "-") {
        "-" => "-".to_string(),
        rights => {
            let swapped = swap_case(rights);
            let white: String = swapped.chars().filter(char::is_ascii_uppercase).collect();
            let black: String = swapped.chars().filter(char::is_ascii_lowercase).collect();
            white + &black
        }
    };

    let en_passant = match field(3, "-") {
        "-" => "-".to_string(),
        square => square
            .chars()
            .map(|c| match c {
                '3' => '6',
                '6' => '3',
                other => other,
            })
            .collect(),
    };

    format!(
        "{placement} {side} {castling} {en_passant} {} {}",
        field(4, "0"),
        field(5, "1")
    )
}

fn swap_case(s: &str) -> String {
    s.chars()
        .map(|c| {
            if c.is_ascii_uppercase() {
                c.to_ascii_lowercase()
            } else {
                c.to_ascii_uppercase()
            }
        })
        .collect()
}
