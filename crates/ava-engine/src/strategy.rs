//! Named move-selection strategies, the interface a host plays through.

use ava_core::{Move, Position};
use tracing::debug;

use crate::search::error::SearchError;
use crate::search::{SearchOptions, SearchOutcome, Searcher};

/// A named move chooser. The host calls [`choose`](Strategy::choose) once
/// per turn; nothing carries over between calls except configuration.
pub trait Strategy {
    /// Name the strategy is registered under.
    fn name(&self) -> &str;

    /// Search depth used by the next [`choose`](Strategy::choose).
    fn depth(&self) -> u8;

    /// Change the search depth.
    fn set_depth(&mut self, depth: u8);

    /// Pick a move for the side to move in `pos`.
    fn choose(&mut self, pos: &Position) -> Result<SearchOutcome<Move>, SearchError>;
}

/// Fixed-depth alpha-beta search over the hand-crafted evaluation.
#[derive(Debug)]
pub struct Ava {
    searcher: Searcher,
    depth: u8,
}

impl Ava {
    /// Registered strategy name.
    pub const NAME: &'static str = "ava";

    /// Depth used unless configured otherwise.
    pub const DEFAULT_DEPTH: u8 = 4;

    /// Create the strategy searching to `depth` plies.
    pub fn new(depth: u8) -> Self {
        Self::with_options(depth, SearchOptions::default())
    }

    /// Create the strategy with explicit search switches.
    pub fn with_options(depth: u8, options: SearchOptions) -> Self {
        Self {
            searcher: Searcher::with_options(options),
            depth,
        }
    }
}

impl Default for Ava {
    fn default() -> Self {
        Self::new(Self::DEFAULT_DEPTH)
    }
}

impl Strategy for Ava {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn depth(&self) -> u8 {
        self.depth
    }

    fn set_depth(&mut self, depth: u8) {
        debug!(depth, "strategy depth changed");
        self.depth = depth;
    }

    fn choose(&mut self, pos: &Position) -> Result<SearchOutcome<Move>, SearchError> {
        self.searcher.search(pos, i32::from(self.depth))
    }
}
