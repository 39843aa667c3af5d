//! Search and evaluation for ava.

pub mod eval;
pub mod search;
pub mod strategy;

pub use eval::{EVAL_LIMIT, Evaluator, HandCrafted, evaluate, evaluate_white};
pub use search::error::SearchError;
pub use search::negamax::{INF, MATE_SCORE, MATE_THRESHOLD, MAX_PLY, mate_distance};
pub use search::{NoMoveReason, SearchOptions, SearchOutcome, SearchResult, Searcher, best_move};
pub use strategy::{Ava, Strategy};
