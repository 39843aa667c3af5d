//! Core chess types: colors, piece kinds, the rules interface the search
//! consumes, and the position adapter over the `chess` crate.

mod color;
mod error;
mod piece_kind;
mod position;
mod rules;

pub use color::Color;
pub use error::RulesError;
pub use piece_kind::PieceKind;
pub use position::{Move, Position, STARTING_FEN};
pub use rules::{DrawReason, GameState, GameStatus, MoveHint};
