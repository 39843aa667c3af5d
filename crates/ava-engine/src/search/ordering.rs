//! Move ordering: promotions, captures by MVV-LVA, then checks, then quiet
//! moves.
//!
//! Ordering only decides which siblings are searched first. The picker
//! reports each move's enumeration index so the search can still break score
//! ties in enumeration order.

use ava_core::{GameState, MoveHint, PieceKind};

/// Rough piece weights for victim/attacker ranking, indexed by
/// [`PieceKind::index()`].
const ORDER_WEIGHT: [i32; PieceKind::COUNT] = [1, 3, 3, 5, 9, 0];

const fn build_mvv_lva() -> [[i32; PieceKind::COUNT]; PieceKind::COUNT] {
    let mut table = [[0; PieceKind::COUNT]; PieceKind::COUNT];
    let mut victim = 0;
    while victim < PieceKind::COUNT {
        let mut attacker = 0;
        while attacker < PieceKind::COUNT {
            table[victim][attacker] = ORDER_WEIGHT[victim] * 16 - ORDER_WEIGHT[attacker];
            attacker += 1;
        }
        victim += 1;
    }
    table
}

/// MVV-LVA scores indexed by `[victim][attacker]`: the most valuable victim
/// first, and among equal victims the cheapest attacker.
const MVV_LVA: [[i32; PieceKind::COUNT]; PieceKind::COUNT] = build_mvv_lva();

const QUEEN_PROMOTION: i32 = 20_000;
const UNDER_PROMOTION: i32 = 100;
const CAPTURE: i32 = 10_000;
const CHECK: i32 = 5_000;

/// MVV-LVA score for `attacker` taking `victim`.
#[inline]
pub fn mvv_lva(victim: PieceKind, attacker: PieceKind) -> i32 {
    MVV_LVA[victim.index()][attacker.index()]
}

/// Ordering score for a move; higher is searched first.
///
/// Score bands:
/// - Queen promotion: 20,000 (plus capture/check bonuses)
/// - Captures: 10,000 + MVV-LVA
/// - Checks: 5,000
/// - Under-promotion: 100
/// - Quiet: 0
pub fn score_move(hint: MoveHint) -> i32 {
    if hint.is_quiet() {
        return 0;
    }

    let mut score = 0;

    match hint.promotion {
        Some(PieceKind::Queen) => score += QUEEN_PROMOTION,
        Some(_) => score += UNDER_PROMOTION,
        None => {}
    }

    if let Some(victim) = hint.victim {
        let attacker = hint.attacker.unwrap_or(PieceKind::Pawn);
        score += CAPTURE + mvv_lva(victim, attacker);
    }

    if hint.gives_check {
        score += CHECK;
    }

    score
}

struct Entry<M> {
    mv: M,
    score: i32,
    index: usize,
}

/// Incremental move picker using selection sort.
///
/// Yields `(enumeration index, move)` in descending score order; equal
/// scores come out in enumeration order. An unordered picker yields the
/// moves exactly as enumerated.
pub struct MovePicker<M> {
    entries: Vec<Entry<M>>,
    cursor: usize,
    ordered: bool,
}

impl<M: Copy> MovePicker<M> {
    /// Create a picker over `moves`, scoring them with the state's move
    /// hints when `ordered` is set.
    pub fn new<G>(state: &G, moves: &[M], ordered: bool) -> Self
    where
        G: GameState<Move = M>,
    {
        let entries = moves
            .iter()
            .enumerate()
            .map(|(index, &mv)| Entry {
                mv,
                score: if ordered {
                    score_move(state.move_hint(mv))
                } else {
                    0
                },
                index,
            })
            .collect();

        Self {
            entries,
            cursor: 0,
            ordered,
        }
    }

    /// Yield the next move, or `None` once every move has been yielded.
    pub fn pick_next(&mut self) -> Option<(usize, M)> {
        if self.cursor >= self.entries.len() {
            return None;
        }

        if self.ordered {
            let mut best = self.cursor;
            for i in (self.cursor + 1)..self.entries.len() {
                let (candidate, current) = (&self.entries[i], &self.entries[best]);
                if candidate.score > current.score
                    || (candidate.score == current.score && candidate.index < current.index)
                {
                    best = i;
                }
            }
            self.entries.swap(self.cursor, best);
        }

        let entry = &self.entries[self.cursor];
        self.cursor += 1;
        Some((entry.index, entry.mv))
    }
}

impl<M: Copy> Iterator for MovePicker<M> {
    type Item = (usize, M);

    fn next(&mut self) -> Option<Self::Item> {
        self.pick_next()
    }
}
