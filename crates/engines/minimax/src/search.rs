//! Minimax search with alpha-beta pruning, quiescence at the horizon, and
//! iterative deepening under a wall-clock budget.
//!
//! Scores are always from the root side's perspective; the side being
//! maximized is tracked explicitly per call rather than by sign-flipping
//! the board. Pruning never changes the value returned for a fixed
//! position and depth - it only skips subtrees that cannot matter.
//!
//! Cancellation is cooperative: the clock is checked at the top of every
//! interior call, and a timeout short-circuits the entire call stack via
//! the `timed_out` flag. Adapter failures (a malformed child state) abort
//! the whole search as an error, never a silent score.

use std::marker::PhantomData;

use log::debug;

use game_core::{Color, Evaluate, GamePosition, Move, PositionError, SearchClock, SearchLimits};

use crate::eval::{MATE_SCORE, MATE_THRESHOLD};
use crate::ordering::{order_moves, HistoryTable, KillerTable, MAX_PLY};
use crate::tt::{TranspositionEntry, TranspositionTable};

/// Window bound; well above any mate score.
pub const INFINITY: i32 = 1_000_000;

/// Hard cap on quiescence extension beyond the horizon.
const QUIESCENCE_PLIES: u8 = 6;

/// Result of one recursive search call. When `timed_out` is set the score
/// is a static fallback and must not be mistaken for a genuine evaluation;
/// callers check the flag first.
#[derive(Debug, Clone, Copy)]
pub struct SearchOutcome {
    pub score: i32,
    pub mv: Option<Move>,
    pub timed_out: bool,
}

impl SearchOutcome {
    fn done(score: i32, mv: Option<Move>) -> Self {
        Self {
            score,
            mv,
            timed_out: false,
        }
    }

    fn timeout(score: i32) -> Self {
        Self {
            score,
            mv: None,
            timed_out: true,
        }
    }
}

/// Result of a full top-level search.
#[derive(Debug, Clone, Copy)]
pub struct SearchReport {
    pub mv: Option<Move>,
    pub score: i32,
    /// Deepest fully completed iteration.
    pub depth: u8,
    pub timed_out: bool,
}

/// One search in flight: borrows the session's tables, owns the clock and
/// the root perspective. The tables must never be shared by two concurrent
/// searches; a session owns exactly one of each.
pub struct Searcher<'a, P: GamePosition, E: Evaluate<P>> {
    evaluator: &'a E,
    tt: &'a mut TranspositionTable,
    killers: &'a mut KillerTable,
    history: &'a mut HistoryTable,
    clock: SearchClock,
    root_side: Color,
    nodes: &'a mut u64,
    _position: PhantomData<P>,
}

impl<'a, P: GamePosition, E: Evaluate<P>> Searcher<'a, P, E> {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        evaluator: &'a E,
        tt: &'a mut TranspositionTable,
        killers: &'a mut KillerTable,
        history: &'a mut HistoryTable,
        clock: SearchClock,
        root_side: Color,
        nodes: &'a mut u64,
    ) -> Self {
        Self {
            evaluator,
            tt,
            killers,
            history,
            clock,
            root_side,
            nodes,
            _position: PhantomData,
        }
    }

    /// Static evaluation from the root side's perspective, with mate
    /// scores pulled toward zero by ply so that faster mates strictly
    /// outrank slower ones.
    pub fn eval_at(&self, pos: &P, ply: usize) -> i32 {
        let mut score = self.root_side.sign() * self.evaluator.evaluate(pos);
        if score >= MATE_THRESHOLD {
            score = MATE_SCORE - ply as i32;
        } else if score <= -MATE_THRESHOLD {
            score = -MATE_SCORE + ply as i32;
        }
        score
    }

    /// Recursive alpha-beta. `depth` is remaining depth, `ply` is distance
    /// from the root.
    pub fn alpha_beta(
        &mut self,
        pos: &P,
        depth: u8,
        ply: usize,
        mut alpha: i32,
        mut beta: i32,
    ) -> Result<SearchOutcome, PositionError> {
        *self.nodes += 1;

        // Deadline first: a timeout unwinds the entire stack
        if self.clock.expired() {
            return Ok(SearchOutcome::timeout(self.eval_at(pos, ply)));
        }

        let key = pos.key();
        if let Some(entry) = self.tt.lookup(&key, depth) {
            return Ok(SearchOutcome::done(entry.score, entry.mv));
        }

        let mut moves = pos.legal_moves();
        if moves.is_empty() {
            // Terminal: checkmate or stalemate, never an error
            return Ok(SearchOutcome::done(self.eval_at(pos, ply), None));
        }
        if depth == 0 {
            return self.quiescence(pos, QUIESCENCE_PLIES, ply, alpha, beta);
        }
        if ply + 1 >= MAX_PLY {
            return Ok(SearchOutcome::done(self.eval_at(pos, ply), None));
        }

        let maximizing = pos.side_to_move() == self.root_side;
        let evaluator = self.evaluator;
        order_moves(&mut moves, ply, self.killers, self.history, |k| {
            evaluator.piece_value(k)
        });

        let (orig_alpha, orig_beta) = (alpha, beta);
        let mut best_score = if maximizing { -INFINITY } else { INFINITY };
        let mut best_move: Option<Move> = None;
        let mut cut = false;

        for mv in &moves {
            let child = pos.apply(mv)?;
            let outcome = self.alpha_beta(&child, depth - 1, ply + 1, alpha, beta)?;
            if outcome.timed_out {
                return Ok(SearchOutcome {
                    score: outcome.score,
                    mv: best_move,
                    timed_out: true,
                });
            }

            if maximizing {
                if outcome.score > best_score {
                    best_score = outcome.score;
                    best_move = Some(*mv);
                }
                alpha = alpha.max(best_score);
            } else {
                if outcome.score < best_score {
                    best_score = outcome.score;
                    best_move = Some(*mv);
                }
                beta = beta.min(best_score);
            }

            if beta <= alpha {
                // Quiet cutoff moves feed the ordering heuristics
                if !mv.is_capture() {
                    self.killers.record(ply, *mv);
                    self.history.bump(mv, depth);
                }
                cut = true;
                break;
            }
        }

        // Only exact values are cached: a cut or edge-of-window result is a
        // bound, and replaying a bound as a value would corrupt later
        // searches
        if !cut && best_score > orig_alpha && best_score < orig_beta {
            self.tt.insert(
                key,
                TranspositionEntry {
                    depth,
                    score: best_score,
                    mv: best_move,
                },
            );
        }

        Ok(SearchOutcome::done(best_score, best_move))
    }

    /// Capture-only search past the horizon with a stand-pat cutoff, so a
    /// favorable-looking exchange cut off mid-sequence cannot fool the
    /// evaluation.
    fn quiescence(
        &mut self,
        pos: &P,
        qdepth: u8,
        ply: usize,
        mut alpha: i32,
        mut beta: i32,
    ) -> Result<SearchOutcome, PositionError> {
        *self.nodes += 1;

        if self.clock.expired() {
            return Ok(SearchOutcome::timeout(self.eval_at(pos, ply)));
        }

        let stand_pat = self.eval_at(pos, ply);
        if qdepth == 0 || ply + 1 >= MAX_PLY {
            return Ok(SearchOutcome::done(stand_pat, None));
        }

        let maximizing = pos.side_to_move() == self.root_side;
        // Doing nothing is itself a candidate score
        if maximizing {
            if stand_pat >= beta {
                return Ok(SearchOutcome::done(stand_pat, None));
            }
            alpha = alpha.max(stand_pat);
        } else {
            if stand_pat <= alpha {
                return Ok(SearchOutcome::done(stand_pat, None));
            }
            beta = beta.min(stand_pat);
        }

        let mut captures: Vec<Move> = pos
            .legal_moves()
            .into_iter()
            .filter(|m| m.is_capture())
            .collect();
        let evaluator = self.evaluator;
        order_moves(&mut captures, ply, self.killers, self.history, |k| {
            evaluator.piece_value(k)
        });

        let mut best = stand_pat;
        for mv in &captures {
            let child = pos.apply(mv)?;
            let outcome = self.quiescence(&child, qdepth - 1, ply + 1, alpha, beta)?;
            if outcome.timed_out {
                return Ok(SearchOutcome::timeout(outcome.score));
            }
            if maximizing {
                best = best.max(outcome.score);
                alpha = alpha.max(best);
            } else {
                best = best.min(outcome.score);
                beta = beta.min(best);
            }
            if beta <= alpha {
                break;
            }
        }
        Ok(SearchOutcome::done(best, None))
    }
}

/// Top-level search: iterative deepening from depth 2 within the time
/// budget, keeping the result of the deepest completed iteration. A cheap
/// depth-1 static scan runs first so that even a zero budget produces a
/// legal move.
#[allow(clippy::too_many_arguments)]
pub fn search_position<P, E>(
    pos: &P,
    limits: &SearchLimits,
    evaluator: &E,
    tt: &mut TranspositionTable,
    killers: &mut KillerTable,
    history: &mut HistoryTable,
    nodes: &mut u64,
) -> Result<SearchReport, PositionError>
where
    P: GamePosition,
    E: Evaluate<P>,
{
    // Killer slots are scoped to one top-level search; history persists
    killers.clear();

    let moves = pos.legal_moves();
    let clock = limits.start();
    let mut searcher = Searcher::new(
        evaluator,
        tt,
        killers,
        history,
        clock,
        pos.side_to_move(),
        nodes,
    );

    if moves.is_empty() {
        return Ok(SearchReport {
            mv: None,
            score: searcher.eval_at(pos, 0),
            depth: 0,
            timed_out: false,
        });
    }

    // Depth-1 fallback, deliberately not deadline-checked
    let mut best_mv: Option<Move> = None;
    let mut best_score = -INFINITY;
    for mv in &moves {
        let child = pos.apply(mv)?;
        let score = searcher.eval_at(&child, 1);
        if score > best_score {
            best_score = score;
            best_mv = Some(*mv);
        }
    }
    let mut report = SearchReport {
        mv: best_mv,
        score: best_score,
        depth: 1,
        timed_out: false,
    };

    for depth in 2..=limits.max_depth {
        let outcome = searcher.alpha_beta(pos, depth, 0, -INFINITY, INFINITY)?;
        if outcome.timed_out {
            report.timed_out = true;
            break;
        }
        report.mv = outcome.mv.or(report.mv);
        report.score = outcome.score;
        report.depth = depth;
        debug!(
            "depth {depth} score {} nodes {} best {:?}",
            outcome.score,
            *searcher.nodes,
            outcome.mv.map(|m| (m.from, m.to)),
        );
        if outcome.score.abs() >= MATE_THRESHOLD {
            // Mate proven; deeper iterations cannot improve on it
            break;
        }
    }

    Ok(report)
}

#[cfg(test)]
#[path = "search_tests.rs"]
mod search_tests;
