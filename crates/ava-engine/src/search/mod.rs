//! Fixed-depth game-tree search and move ordering.

pub mod error;
pub mod negamax;
pub mod ordering;

use ava_core::{GameState, Move, Position};
use tracing::{debug, info};

use crate::eval::{Evaluator, HandCrafted};
use error::SearchError;
use negamax::{MAX_PLY, SearchContext, mated_in, search_root};

/// Switches for the two search optimisations. Neither changes the chosen
/// move or its score.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchOptions {
    /// Skip siblings that cannot affect the result.
    pub alpha_beta: bool,
    /// Search promotions, captures and checks before quiet moves.
    pub move_ordering: bool,
}

impl SearchOptions {
    /// Plain full-width minimax in enumeration order.
    pub const MINIMAX: SearchOptions = SearchOptions {
        alpha_beta: false,
        move_ordering: false,
    };
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            alpha_beta: true,
            move_ordering: true,
        }
    }
}

/// Result of a completed search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchResult<M> {
    /// Best move at the root.
    pub best_move: M,
    /// Score in centipawns for the side to move (or a mate score).
    pub score: i32,
    /// Principal variation line, starting with `best_move`.
    pub pv: Vec<M>,
    /// Total nodes visited.
    pub nodes: u64,
    /// Depth searched.
    pub depth: u8,
}

/// Why the root position has no move to play.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoMoveReason {
    Checkmate,
    Stalemate,
}

/// What a search returns: a move, or the reason there is none.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchOutcome<M> {
    Move(SearchResult<M>),
    NoMove { reason: NoMoveReason, score: i32 },
}

impl<M: Copy> SearchOutcome<M> {
    /// The chosen move, if there is one.
    pub fn best_move(&self) -> Option<M> {
        match self {
            SearchOutcome::Move(result) => Some(result.best_move),
            SearchOutcome::NoMove { .. } => None,
        }
    }

    /// Score for the side to move.
    pub fn score(&self) -> i32 {
        match self {
            SearchOutcome::Move(result) => result.score,
            SearchOutcome::NoMove { score, .. } => *score,
        }
    }

    /// The full result, if a move was found.
    pub fn result(&self) -> Option<&SearchResult<M>> {
        match self {
            SearchOutcome::Move(result) => Some(result),
            SearchOutcome::NoMove { .. } => None,
        }
    }
}

/// Fixed-depth alpha-beta searcher.
///
/// Holds only the evaluator and the option switches; every call to
/// [`search`](Searcher::search) starts from scratch.
pub struct Searcher<E = HandCrafted> {
    evaluator: E,
    options: SearchOptions,
}

impl Searcher {
    /// Create a searcher with the built-in evaluator and default options.
    pub fn new() -> Self {
        Self::with_options(SearchOptions::default())
    }

    /// Create a searcher with the built-in evaluator.
    pub fn with_options(options: SearchOptions) -> Self {
        Self::with_evaluator(HandCrafted, options)
    }
}

impl<E> Searcher<E> {
    /// Create a searcher with a custom leaf evaluator.
    pub fn with_evaluator(evaluator: E, options: SearchOptions) -> Self {
        Self { evaluator, options }
    }

    /// The option switches this searcher runs with.
    pub fn options(&self) -> SearchOptions {
        self.options
    }

    /// Search `root` to `depth` plies and return the best move.
    ///
    /// A root without legal moves yields [`SearchOutcome::NoMove`]. Depth 0
    /// returns the first legal move with the root's static evaluation.
    pub fn search<G>(&self, root: &G, depth: i32) -> Result<SearchOutcome<G::Move>, SearchError>
    where
        G: GameState,
        E: Evaluator<G>,
    {
        if depth < 0 {
            return Err(SearchError::NegativeDepth { depth });
        }
        if depth > MAX_PLY as i32 {
            return Err(SearchError::DepthTooLarge {
                depth,
                max: MAX_PLY as i32,
            });
        }

        let moves = root.legal_moves();
        if moves.is_empty() {
            let outcome = if root.in_check() {
                SearchOutcome::NoMove {
                    reason: NoMoveReason::Checkmate,
                    score: mated_in(0),
                }
            } else {
                SearchOutcome::NoMove {
                    reason: NoMoveReason::Stalemate,
                    score: 0,
                }
            };
            debug!(?outcome, "no legal moves at root");
            return Ok(outcome);
        }

        if depth == 0 {
            let best_move = moves[0];
            return Ok(SearchOutcome::Move(SearchResult {
                best_move,
                score: self.evaluator.evaluate(root),
                pv: vec![best_move],
                nodes: 1,
                depth: 0,
            }));
        }

        let mut ctx = SearchContext::new(&self.evaluator, self.options);
        let (best_move, score) = search_root(root, &moves, depth as usize, &mut ctx)?;

        let mut pv = ctx.pv.root_pv().to_vec();
        if pv.first() != Some(&best_move) {
            pv = vec![best_move];
        }

        info!(depth, score, nodes = ctx.nodes, %best_move, "search complete");

        Ok(SearchOutcome::Move(SearchResult {
            best_move,
            score,
            pv,
            nodes: ctx.nodes,
            depth: depth as u8,
        }))
    }
}

impl<E> std::fmt::Debug for Searcher<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Searcher")
            .field("options", &self.options)
            .finish()
    }
}

impl Default for Searcher {
    fn default() -> Self {
        Self::new()
    }
}

/// Best move in `pos` at `depth` with the built-in evaluator and default
/// options.
pub fn best_move(pos: &Position, depth: i32) -> Result<SearchOutcome<Move>, SearchError> {
    Searcher::new().search(pos, depth)
}
