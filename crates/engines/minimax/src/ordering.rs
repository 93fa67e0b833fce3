//! Move ordering: MVV-LVA capture ranking, killer moves, history heuristic.
//!
//! Good ordering is what makes alpha-beta prune; nothing here changes which
//! move the search ultimately prefers, only how fast it gets there.

use std::collections::HashMap;

use game_core::{Move, PieceKind, Square};

/// Upper bound on search depth from the root, used to size the killer table.
pub const MAX_PLY: usize = 64;

/// Captures always outrank quiet moves; killers outrank other quiet moves.
const CAPTURE_BASE: i32 = 1_000_000;
const KILLER_BONUS: i32 = 500_000;

/// Two killer slots per ply: quiet moves that produced a beta cutoff at
/// that ply earlier in the current search. Reset at every top-level search.
#[derive(Debug)]
pub struct KillerTable {
    slots: [[Option<Move>; 2]; MAX_PLY],
}

impl Default for KillerTable {
    fn default() -> Self {
        Self::new()
    }
}

impl KillerTable {
    pub fn new() -> Self {
        Self {
            slots: [[None; 2]; MAX_PLY],
        }
    }

    pub fn clear(&mut self) {
        self.slots = [[None; 2]; MAX_PLY];
    }

    /// Promotes a cutoff move into the first slot, demoting the previous
    /// occupant. A move already in the first slot stays put.
    pub fn record(&mut self, ply: usize, mv: Move) {
        if ply >= MAX_PLY {
            return;
        }
        let [first, _] = self.slots[ply];
        if first == Some(mv) {
            return;
        }
        self.slots[ply][1] = first;
        self.slots[ply][0] = Some(mv);
    }

    pub fn is_killer(&self, ply: usize, mv: &Move) -> bool {
        if ply >= MAX_PLY {
            return false;
        }
        self.slots[ply].iter().any(|slot| slot.as_ref() == Some(mv))
    }
}

/// History heuristic: (from, to) -> accumulated cutoff score. Unlike the
/// killer table this persists across searches within one session, biasing
/// ordering toward historically strong quiet moves.
#[derive(Debug, Default)]
pub struct HistoryTable {
    scores: HashMap<(Square, Square), i32>,
}

impl HistoryTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.scores.clear();
    }

    /// Credits a cutoff at the given remaining depth (depth squared, so
    /// cutoffs near the root weigh more).
    pub fn bump(&mut self, mv: &Move, depth: u8) {
        let credit = i32::from(depth) * i32::from(depth);
        *self.scores.entry((mv.from, mv.to)).or_insert(0) += credit;
    }

    pub fn score(&self, mv: &Move) -> i32 {
        self.scores.get(&(mv.from, mv.to)).copied().unwrap_or(0)
    }
}

/// Orders moves in place, best first:
/// captures by victim-value x 100 minus attacker value, then killer moves
/// for this ply, then quiet moves by history score. The sort is stable, so
/// otherwise-equal moves keep their generation order and search results
/// stay reproducible.
pub fn order_moves<F>(
    moves: &mut [Move],
    ply: usize,
    killers: &KillerTable,
    history: &HistoryTable,
    piece_value: F,
) where
    F: Fn(PieceKind) -> i32,
{
    moves.sort_by_key(|mv| {
        let score = match mv.capture {
            Some(victim) => CAPTURE_BASE + piece_value(victim) * 100 - piece_value(mv.piece),
            None if killers.is_killer(ply, mv) => KILLER_BONUS,
            None => history.score(mv),
        };
        std::cmp::Reverse(score)
    });
}

#[cfg(test)]
#[path = "ordering_tests.rs"]
mod ordering_tests;
