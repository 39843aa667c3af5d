//! Errors reported by the rules engine.

/// A position or move the rules engine refuses to work with.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RulesError {
    /// A FEN string could not be turned into a valid position.
    #[error("invalid FEN \"{fen}\": {reason}")]
    InvalidFen {
        /// The rejected FEN string.
        fen: String,
        /// What was wrong with it.
        reason: String,
    },

    /// A move is not legal in the position it was applied to.
    #[error("illegal move {mv} in {fen}")]
    IllegalMove {
        /// The move, in UCI notation.
        mv: String,
        /// FEN of the position that rejected it.
        fen: String,
    },
}
