//! Game phase calculation based on remaining non-pawn material.

use ava_core::{PieceKind, Position};

/// Maximum game phase value, corresponding to a full starting-position complement
/// of non-pawn material.
///
/// Weights: Knight=1, Bishop=1, Rook=2, Queen=4.
/// Starting totals: 4×1 + 4×1 + 4×2 + 2×4 = 24.
pub const MAX_PHASE: i32 = 24;

/// Phase weight per piece kind, indexed by [`PieceKind::index()`].
const PHASE_WEIGHT: [i32; PieceKind::COUNT] = [0, 1, 1, 2, 4, 0];

/// Calculate the game phase from non-pawn, non-king material on the board.
///
/// Returns a value in `0..=MAX_PHASE`; promoted pieces cannot push it above
/// the maximum.
pub fn game_phase(pos: &Position) -> i32 {
    let phase: i32 = PieceKind::ALL
        .iter()
        .map(|&kind| PHASE_WEIGHT[kind.index()] * pos.count_kind(kind) as i32)
        .sum();
    phase.min(MAX_PHASE)
}
