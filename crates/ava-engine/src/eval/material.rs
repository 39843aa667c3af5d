//! Material balance evaluation.
//!
//! Counts weighted piece material for each side. Scores are returned from
//! White's perspective (positive = White ahead).

use ava_core::{Color, PieceKind, Position};

use crate::eval::score::{S, Score};

/// Base material values indexed by [`PieceKind::index()`].
///
/// | Piece  | value |
/// |--------|-------|
/// | Pawn   | 100   |
/// | Knight | 320   |
/// | Bishop | 330   |
/// | Rook   | 500   |
/// | Queen  | 900   |
/// | King   | 0     |
///
/// Both sides always have exactly one king, so the king carries no value.
pub const MATERIAL_VALUE: [Score; PieceKind::COUNT] = [
    S(100, 100), // Pawn
    S(320, 320), // Knight
    S(330, 330), // Bishop
    S(500, 500), // Rook
    S(900, 900), // Queen
    S(0, 0),     // King
];

/// Evaluate material balance from White's perspective.
pub fn material(pos: &Position) -> Score {
    let mut score = Score::ZERO;

    for kind in PieceKind::ALL {
        let white = pos.count(Color::White, kind) as i32;
        let black = pos.count(Color::Black, kind) as i32;
        score += MATERIAL_VALUE[kind.index()] * (white - black);
    }

    score
}

#[cfg(test)]
mod tests {
    use ava_core::{PieceKind, Position};

    use super::{MATERIAL_VALUE, material};
    use crate::eval::score::{S, Score};

    #[test]
    fn starting_position_is_zero() {
        assert_eq!(material(&Position::starting()), Score::ZERO);
    }

    #[test]
    fn missing_black_queen_gives_queen_advantage() {
        let pos: Position = "rnb1kbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1"
            .parse()
            .unwrap();
        assert_eq!(material(&pos), S(900, 900));
    }

    #[test]
    fn score_is_negated_when_black_is_ahead() {
        let pos: Position = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNB1KBNR w KQkq - 0 1"
            .parse()
            .unwrap();
        assert_eq!(material(&pos), MATERIAL_VALUE[PieceKind::Queen.index()] * -1);
    }

    #[test]
    fn minor_pieces_and_pawns_add_up() {
        // White: knight + bishop + 2 pawns; Black: rook + pawn.
        let pos: Position = "4k2r/4p3/8/8/8/8/3PP3/2BNK3 w - - 0 1".parse().unwrap();
        assert_eq!(material(&pos), S(320 + 330 + 200 - 500 - 100, 320 + 330 + 200 - 500 - 100));
    }

    #[test]
    fn king_is_worth_nothing() {
        assert_eq!(MATERIAL_VALUE[PieceKind::King.index()], S(0, 0));
        let pos: Position = "8/8/4k3/8/8/4K3/8/8 w - - 0 1".parse().unwrap();
        assert_eq!(material(&pos), Score::ZERO);
    }
}
