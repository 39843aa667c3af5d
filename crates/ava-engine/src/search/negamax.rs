//! Fixed-depth negamax with fail-soft alpha-beta pruning.

use ava_core::GameState;
use tracing::debug;

use crate::eval::Evaluator;
use crate::search::SearchOptions;
use crate::search::error::SearchError;
use crate::search::ordering::MovePicker;

/// Score representing an unreachable upper/lower bound.
pub const INF: i32 = 32_000;

/// Base score for checkmate (adjusted by ply for mate distance).
pub const MATE_SCORE: i32 = 31_000;

/// Maximum search depth (in plies) for table sizing and recursion limits.
pub const MAX_PLY: usize = 128;

/// Scores at or above this magnitude indicate a forced mate.
pub const MATE_THRESHOLD: i32 = MATE_SCORE - MAX_PLY as i32;

/// Score for the side to move when it is checkmated `ply` plies from the root.
#[inline]
pub const fn mated_in(ply: usize) -> i32 {
    -(MATE_SCORE - ply as i32)
}

/// Score for the side to move when it delivers mate `ply` plies from the root.
#[inline]
pub const fn mate_in(ply: usize) -> i32 {
    MATE_SCORE - ply as i32
}

/// Whether `score` encodes a forced mate rather than an evaluation.
#[inline]
pub fn is_mate_score(score: i32) -> bool {
    score.abs() >= MATE_THRESHOLD
}

/// Full moves until mate: positive when the side to move mates, negative when
/// it gets mated, `None` for ordinary scores.
pub fn mate_distance(score: i32) -> Option<i32> {
    if !is_mate_score(score) {
        return None;
    }
    let moves = (MATE_SCORE - score.abs() + 1) / 2;
    Some(if score > 0 { moves } else { -moves })
}

/// Triangular PV table for collecting principal variation lines.
///
/// Row `ply` holds the best line found from that ply onward.
pub struct PvTable<M> {
    lines: Vec<Vec<M>>,
}

impl<M: Copy> PvTable<M> {
    /// Create an empty PV table.
    pub fn new() -> Self {
        Self {
            lines: (0..=MAX_PLY).map(|_| Vec::new()).collect(),
        }
    }

    /// Clear the PV line at `ply` (called at the top of each node).
    pub fn clear_ply(&mut self, ply: usize) {
        if let Some(line) = self.lines.get_mut(ply) {
            line.clear();
        }
    }

    /// Set `mv` as the best move at `ply`, followed by the line from `ply + 1`.
    pub fn update(&mut self, ply: usize, mv: M) {
        if ply >= MAX_PLY {
            return;
        }
        let (top, bottom) = self.lines.split_at_mut(ply + 1);
        let line = &mut top[ply];
        line.clear();
        line.push(mv);
        line.extend_from_slice(&bottom[0]);
    }

    /// The principal variation from the root.
    pub fn root_pv(&self) -> &[M] {
        &self.lines[0]
    }
}

impl<M: Copy> Default for PvTable<M> {
    fn default() -> Self {
        Self::new()
    }
}

/// Search state threaded through negamax calls.
pub(super) struct SearchContext<'a, M, E> {
    /// Total nodes visited.
    pub nodes: u64,
    /// Principal variation table.
    pub pv: PvTable<M>,
    /// Leaf evaluator.
    pub evaluator: &'a E,
    /// Pruning and ordering switches.
    pub options: SearchOptions,
}

impl<'a, M: Copy, E> SearchContext<'a, M, E> {
    pub fn new(evaluator: &'a E, options: SearchOptions) -> Self {
        Self {
            nodes: 0,
            pv: PvTable::new(),
            evaluator,
            options,
        }
    }
}

/// Search every root move and pick the best.
///
/// `moves` must be the non-empty legal move list of `root`, in enumeration
/// order, and `depth` at least 1. Among moves with equal scores the one
/// enumerated first wins, even when ordering searches it later: a move
/// enumerated before the current best is searched with its bound lowered by
/// one so that a tie comes back as an exact score.
pub(super) fn search_root<G, E>(
    root: &G,
    moves: &[G::Move],
    depth: usize,
    ctx: &mut SearchContext<'_, G::Move, E>,
) -> Result<(G::Move, i32), SearchError>
where
    G: GameState,
    E: Evaluator<G>,
{
    ctx.pv.clear_ply(0);
    ctx.nodes += 1;

    let mut best_score = -INF;
    let mut best_index = usize::MAX;
    let mut best_move = moves[0];
    let mut picker = MovePicker::new(root, moves, ctx.options.move_ordering);

    while let Some((index, mv)) = picker.pick_next() {
        let child = root.apply(mv)?;

        let floor = if index < best_index && best_score > -INF {
            best_score - 1
        } else {
            best_score
        };
        let beta = if ctx.options.alpha_beta { -floor } else { INF };

        let score = -negamax(&child, depth - 1, 1, -INF, beta, ctx)?;
        debug!(%mv, index, score, "root move searched");

        if score > best_score || (score == best_score && index < best_index) {
            best_score = score;
            best_index = index;
            best_move = mv;
            ctx.pv.update(0, mv);
        }
    }

    Ok((best_move, best_score))
}

/// Negamax alpha-beta search below the root.
///
/// Returns the score for the side to move in `state`. With pruning on the
/// result is fail-soft: exact inside `(alpha, beta)`, otherwise a bound on
/// the correct side of the window.
pub(super) fn negamax<G, E>(
    state: &G,
    depth: usize,
    ply: usize,
    mut alpha: i32,
    beta: i32,
    ctx: &mut SearchContext<'_, G::Move, E>,
) -> Result<i32, SearchError>
where
    G: GameState,
    E: Evaluator<G>,
{
    ctx.pv.clear_ply(ply);
    ctx.nodes += 1;

    let moves = state.legal_moves();

    // No legal moves: checkmate or stalemate
    if moves.is_empty() {
        return Ok(if state.in_check() { mated_in(ply) } else { 0 });
    }

    if state.draw_by_rule().is_some() {
        return Ok(0);
    }

    if depth == 0 {
        return Ok(ctx.evaluator.evaluate(state));
    }

    let pruning = ctx.options.alpha_beta;
    let mut best_score = -INF;
    let mut picker = MovePicker::new(state, &moves, ctx.options.move_ordering);

    while let Some((_, mv)) = picker.pick_next() {
        let child = state.apply(mv)?;
        let (child_alpha, child_beta) = if pruning { (-beta, -alpha) } else { (-INF, INF) };
        let score = -negamax(&child, depth - 1, ply + 1, child_alpha, child_beta, ctx)?;

        if score > best_score {
            best_score = score;
            if score > alpha {
                alpha = score;
                ctx.pv.update(ply, mv);
            }
        }

        if pruning && alpha >= beta {
            break;
        }
    }

    Ok(best_score)
}
