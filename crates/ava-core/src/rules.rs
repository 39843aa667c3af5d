//! The capability set the search needs from a rules engine.
//!
//! Anything that can enumerate legal moves, produce successor positions and
//! report check can be searched. Terminal classification is derived from
//! those primitives; implementors only override it when they can answer
//! more cheaply.

use std::fmt;

use crate::error::RulesError;
use crate::piece_kind::PieceKind;

/// Why a game is drawn while moves may still be available.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DrawReason {
    /// The same position occurred for the third time.
    Repetition,
    /// 75 moves by each side without a capture or pawn move.
    SeventyFiveMoves,
    /// Neither side has enough material to deliver mate.
    InsufficientMaterial,
}

/// Outcome classification of a position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameStatus {
    Ongoing,
    Checkmate,
    Stalemate,
    Draw(DrawReason),
}

/// Tactical facts about a move, consumed by move ordering only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MoveHint {
    /// Piece removed from the board, if the move captures.
    pub victim: Option<PieceKind>,
    /// Piece making the move.
    pub attacker: Option<PieceKind>,
    /// Piece a pawn promotes to.
    pub promotion: Option<PieceKind>,
    /// Whether the opponent is in check afterwards.
    pub gives_check: bool,
}

impl MoveHint {
    /// A move with no tactical content.
    pub const QUIET: MoveHint = MoveHint {
        victim: None,
        attacker: None,
        promotion: None,
        gives_check: false,
    };

    /// Whether the move neither captures, promotes nor checks.
    pub fn is_quiet(&self) -> bool {
        self.victim.is_none() && self.promotion.is_none() && !self.gives_check
    }
}

/// A game position the search can explore.
///
/// Positions are values: [`apply`](GameState::apply) returns the successor
/// and leaves `self` untouched, so sibling branches never observe each
/// other's moves.
pub trait GameState: Clone {
    /// A move in this game.
    type Move: Copy + Eq + fmt::Debug + fmt::Display;

    /// All legal moves, in the rules engine's enumeration order.
    ///
    /// The order is stable for a given position; the search breaks score
    /// ties in favor of earlier moves.
    fn legal_moves(&self) -> Vec<Self::Move>;

    /// The position after `mv`, or an error if the move is not legal here.
    fn apply(&self, mv: Self::Move) -> Result<Self, RulesError>;

    /// Whether the side to move is in check.
    fn in_check(&self) -> bool;

    /// A draw that holds even though moves remain (repetition, move limit,
    /// dead position).
    fn draw_by_rule(&self) -> Option<DrawReason> {
        None
    }

    /// Ordering hints for `mv`.
    fn move_hint(&self, _mv: Self::Move) -> MoveHint {
        MoveHint::QUIET
    }

    /// The side to move is in check and has no legal move.
    fn is_checkmate(&self) -> bool {
        self.in_check() && self.legal_moves().is_empty()
    }

    /// Stalemate, or a draw by rule.
    fn is_stalemate_or_draw(&self) -> bool {
        matches!(self.status(), GameStatus::Stalemate | GameStatus::Draw(_))
    }

    /// Full classification. Checkmate and stalemate take precedence over
    /// draws by rule.
    fn status(&self) -> GameStatus {
        if self.legal_moves().is_empty() {
            if self.in_check() {
                GameStatus::Checkmate
            } else {
                GameStatus::Stalemate
            }
        } else if let Some(reason) = self.draw_by_rule() {
            GameStatus::Draw(reason)
        } else {
            GameStatus::Ongoing
        }
    }
}
