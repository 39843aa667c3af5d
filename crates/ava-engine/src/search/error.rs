//! Errors reported by the search.

use ava_core::RulesError;

/// A search request that could not be carried out.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SearchError {
    /// The requested depth was negative.
    #[error("search depth must be non-negative, got {depth}")]
    NegativeDepth { depth: i32 },

    /// The requested depth exceeds the recursion limit.
    #[error("search depth {depth} exceeds the maximum of {max}")]
    DepthTooLarge { depth: i32, max: i32 },

    /// The rules engine rejected a position or move during the search.
    #[error(transparent)]
    Rules(#[from] RulesError),
}
