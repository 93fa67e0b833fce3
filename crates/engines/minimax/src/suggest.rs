//! Multi-candidate suggester for coaching and analysis flows.
//!
//! Unlike single-best-move play, this ranks several moves: a shallow
//! static pass keeps the most promising candidates, each survivor gets a
//! full depth-bounded search under an equal slice of the time budget, and
//! the results are re-ranked by search score with a win probability and a
//! deterministic explanation attached.

use std::cmp::Reverse;
use std::time::Duration;

use game_core::{file_of, rank_of, Evaluate, GamePosition, Move, PositionError, SearchClock,
    Square};

use crate::ordering::{HistoryTable, KillerTable};
use crate::search::{Searcher, INFINITY};
use crate::tt::TranspositionTable;

/// Static pre-ranking keeps only this many candidates for full search. A
/// strong move ranked below the cut by static evaluation alone is missed;
/// that throughput/quality tradeoff is intentional.
pub const CANDIDATE_CAP: usize = 8;

/// Scale constant for the score -> win-probability logistic transform.
const WIN_PROB_SCALE: f64 = 400.0;

/// Pre-rank penalty for a move that exactly undoes the caller's most
/// recent move, so shuffle-back suggestions cannot crowd out fresh ones.
const UNDO_PENALTY: i32 = 150;

/// One ranked suggestion.
#[derive(Debug, Clone)]
pub struct RankedMove {
    pub mv: Move,
    pub score: i32,
    pub win_probability: f64,
    pub explanation: String,
}

/// Logistic transform from a centipawn-equivalent score to a win
/// probability, clamped to an open interval so consumers never see a
/// false certainty.
pub fn win_probability(score: i32) -> f64 {
    let p = 1.0 / (1.0 + (-f64::from(score) / WIN_PROB_SCALE).exp());
    p.clamp(0.001, 0.999)
}

/// Within one file/rank step of the board center.
fn central(sq: Square, width: u8, height: u8) -> bool {
    let df = (2 * i32::from(file_of(sq, width)) + 1 - i32::from(width)).abs();
    let dr = (2 * i32::from(rank_of(sq, width)) + 1 - i32::from(height)).abs();
    df <= 1 && dr <= 1
}

/// Deterministic explanation from move attributes alone; the search result
/// never feeds back into the wording.
pub fn explain<P, E>(mv: &Move, resulting: &P, evaluator: &E) -> String
where
    P: GamePosition,
    E: Evaluate<P>,
{
    let mut parts: Vec<String> = Vec::new();
    if let Some(victim) = mv.capture {
        parts.push(format!(
            "captures material worth {}",
            evaluator.piece_value(victim)
        ));
    }
    if mv.promotion.is_some() {
        parts.push("promotes".into());
    }
    if resulting.in_check() {
        parts.push("gives check".into());
    }
    let (width, height) = resulting.board_size();
    if central(mv.to, width, height) && !central(mv.from, width, height) {
        parts.push("develops toward the center".into());
    }
    if parts.is_empty() {
        "quiet positional move".into()
    } else {
        parts.join(", ")
    }
}

/// Ranks the top `n` moves of the position. See the module doc for the
/// two-pass shape; `depth` and `budget` come from the difficulty profile.
#[allow(clippy::too_many_arguments)]
pub fn rank_candidates<P, E>(
    pos: &P,
    n: usize,
    depth: u8,
    budget: Duration,
    recent: &[Move],
    evaluator: &E,
    tt: &mut TranspositionTable,
    killers: &mut KillerTable,
    history: &mut HistoryTable,
    nodes: &mut u64,
) -> Result<Vec<RankedMove>, PositionError>
where
    P: GamePosition,
    E: Evaluate<P>,
{
    let moves = pos.legal_moves();
    if moves.is_empty() || n == 0 {
        return Ok(Vec::new());
    }
    let root_side = pos.side_to_move();
    let undone = recent.last().map(|last| (last.to, last.from));

    // Pass 1: shallow static ranking of every legal move
    let mut scored: Vec<(Move, i32, P)> = Vec::with_capacity(moves.len());
    {
        let searcher = Searcher::new(
            evaluator,
            tt,
            killers,
            history,
            SearchClock::unlimited(),
            root_side,
            nodes,
        );
        for mv in &moves {
            let child = pos.apply(mv)?;
            let mut score = searcher.eval_at(&child, 1);
            if undone == Some((mv.from, mv.to)) {
                score -= UNDO_PENALTY;
            }
            scored.push((*mv, score, child));
        }
    }
    scored.sort_by_key(|(_, score, _)| Reverse(*score));
    scored.truncate(CANDIDATE_CAP);

    // Pass 2: full search per candidate, budget divided equally
    let slice = budget / scored.len() as u32;
    let mut ranked = Vec::with_capacity(scored.len());
    for (mv, _, child) in &scored {
        let clock = SearchClock::start(Some(slice));
        let mut searcher =
            Searcher::new(evaluator, tt, killers, history, clock, root_side, nodes);
        let outcome = searcher.alpha_beta(child, depth.saturating_sub(1), 1, -INFINITY, INFINITY)?;
        ranked.push(RankedMove {
            mv: *mv,
            score: outcome.score,
            win_probability: win_probability(outcome.score),
            explanation: explain(mv, child, evaluator),
        });
    }

    ranked.sort_by_key(|r| Reverse(r.score));
    ranked.truncate(n);
    Ok(ranked)
}

#[cfg(test)]
#[path = "suggest_tests.rs"]
mod suggest_tests;
