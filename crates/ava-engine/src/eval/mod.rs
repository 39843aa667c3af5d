//! Static position evaluation: material plus piece-square tables, blended
//! between middlegame and endgame by game phase.

pub mod material;
pub mod phase;
pub mod pst;
pub mod score;

use ava_core::{Color, Position};

use material::material;
use phase::game_phase;
use pst::pst_value;
use score::Score;

/// Static evaluations are clipped to `[-EVAL_LIMIT, EVAL_LIMIT]`, which lies
/// strictly inside the range of mate scores.
pub const EVAL_LIMIT: i32 = 30_000;

/// Scores a position at a search leaf.
///
/// Implementations must be pure: the same position always gets the same
/// score, from the point of view of the side to move.
pub trait Evaluator<G> {
    fn evaluate(&self, state: &G) -> i32;
}

/// The built-in material and piece-square evaluator.
#[derive(Debug, Clone, Copy, Default)]
pub struct HandCrafted;

impl Evaluator<Position> for HandCrafted {
    #[inline]
    fn evaluate(&self, pos: &Position) -> i32 {
        evaluate(pos)
    }
}

/// Evaluate `pos` from White's perspective (positive = White is better).
pub fn evaluate_white(pos: &Position) -> i32 {
    let mut score: Score = material(pos);

    for (color, kind, sq) in pos.pieces() {
        let bonus = pst_value(kind, color, sq);
        match color {
            Color::White => score += bonus,
            Color::Black => score -= bonus,
        }
    }

    score
        .taper(game_phase(pos))
        .clamp(-EVAL_LIMIT, EVAL_LIMIT)
}

/// Evaluate `pos` from the side to move's perspective.
pub fn evaluate(pos: &Position) -> i32 {
    evaluate_white(pos) * pos.side_to_move().sign()
}

#[cfg(test)]
mod tests {
    use super::*;

    const POSITIONS: [&str; 6] = [
        "rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq e3 0 1",
        "r1bqkb1r/pppp1ppp/2n2n2/4p2Q/2B1P3/8/PPPP1PPP/RNB1K1NR w KQkq - 4 4",
        "r3k2r/pp1n1ppp/2p1b3/q7/3P4/2N2N2/PPQ2PPP/R3K2R w KQkq - 4 12",
        "8/5k2/8/3P4/8/8/5K2/8 b - - 0 50",
        "6k1/5ppp/8/8/8/8/5PPP/3R2K1 w - - 0 30",
        "4k3/8/8/8/8/8/8/4K2Q w - - 0 1",
    ];

    #[test]
    fn starting_position_is_balanced() {
        assert_eq!(evaluate(&Position::starting()), 0);
        assert_eq!(evaluate_white(&Position::starting()), 0);
    }

    #[test]
    fn score_is_relative_to_the_side_to_move() {
        let white_to_move: Position = "4k3/8/8/8/8/8/8/4K2Q w - - 0 1".parse().unwrap();
        let black_to_move: Position = "4k3/8/8/8/8/8/8/4K2Q b - - 0 1".parse().unwrap();
        assert!(evaluate(&white_to_move) > 800);
        assert_eq!(evaluate(&black_to_move), -evaluate(&white_to_move));
    }

    #[test]
    fn mirrored_position_scores_the_same_for_its_mover() {
        for fen in POSITIONS {
            let pos: Position = fen.parse().unwrap();
            let mirrored = pos.mirrored().unwrap();
            assert_eq!(evaluate(&pos), evaluate(&mirrored), "{fen}");
            assert_eq!(evaluate_white(&pos), -evaluate_white(&mirrored), "{fen}");
        }
    }

    #[test]
    fn evaluation_stays_inside_the_limit() {
        for fen in POSITIONS {
            let pos: Position = fen.parse().unwrap();
            assert!(evaluate(&pos).abs() <= EVAL_LIMIT, "{fen}");
        }
    }

    #[test]
    fn evaluation_is_deterministic() {
        let pos: Position = POSITIONS[2].parse().unwrap();
        assert_eq!(evaluate(&pos), evaluate(&pos.clone()));
    }

    #[test]
    fn endgame_king_wants_the_center() {
        let center: Position = "8/8/8/4k3/8/3K4/8/8 w - - 0 1".parse().unwrap();
        let corner: Position = "8/8/8/4k3/8/8/8/K7 w - - 0 1".parse().unwrap();
        assert!(evaluate(&center) > evaluate(&corner));
    }

    #[test]
    fn trait_object_matches_free_function() {
        let pos: Position = POSITIONS[1].parse().unwrap();
        let eval: &dyn Evaluator<Position> = &HandCrafted;
        assert_eq!(eval.evaluate(&pos), evaluate(&pos));
    }
}
