//! Adversarial game-tree search engine.
//!
//! Recursive minimax with alpha-beta pruning and quiescence extension, a
//! bounded transposition cache, killer/history move ordering, an opening
//! book, and an anti-repetition guard, all driven by iterative deepening
//! under a wall-clock budget. The engine is game-agnostic: it consumes any
//! position type implementing `game_core::GamePosition` plus a static
//! evaluator implementing `game_core::Evaluate`.
//!
//! All mutable search state (cache, killer and history tables, repetition
//! ledger, RNG) is owned by one `SearchSession` per game. Sessions must
//! not be shared between concurrent searches; `new_game` clears the whole
//! state set together.

pub mod book;
pub mod eval;
pub mod ordering;
pub mod repetition;
pub mod search;
pub mod suggest;
pub mod tt;

use std::cmp::Reverse;
use std::marker::PhantomData;
use std::time::Duration;

use log::debug;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use game_core::{coord, Evaluate, GamePhase, GamePosition, Move, PositionError, SearchClock,
    SearchLimits};

pub use book::{BookEntry, OpeningBook};
pub use eval::{EvalWeights, TableEvaluator, MATE_SCORE, MATE_THRESHOLD};
pub use ordering::{HistoryTable, KillerTable};
pub use repetition::RepetitionLedger;
pub use search::{SearchOutcome, SearchReport, Searcher, INFINITY};
pub use suggest::{win_probability, RankedMove, CANDIDATE_CAP};
pub use tt::{TranspositionEntry, TranspositionTable};

/// Errors surfaced by the engine entry points. A position with no legal
/// moves is a terminal result, never an error.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error(transparent)]
    Position(#[from] PositionError),
}

/// Difficulty level, a closed 1..=5 range. Out-of-range input clamps.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct Difficulty(u8);

impl Difficulty {
    pub const MIN: Difficulty = Difficulty(1);
    pub const MAX: Difficulty = Difficulty(5);

    pub fn new(level: u8) -> Self {
        Self(level.clamp(1, 5))
    }

    pub fn level(self) -> u8 {
        self.0
    }
}

impl Default for Difficulty {
    fn default() -> Self {
        Difficulty(3)
    }
}

/// Search budget for one difficulty level.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DifficultyProfile {
    pub max_depth: u8,
    pub time_limit_ms: u64,
}

/// Difficulty level -> (max depth, time budget). The only tunable exposed
/// to callers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DifficultyTable {
    pub profiles: [DifficultyProfile; 5],
}

impl Default for DifficultyTable {
    fn default() -> Self {
        Self {
            profiles: [
                DifficultyProfile { max_depth: 2, time_limit_ms: 400 },
                DifficultyProfile { max_depth: 3, time_limit_ms: 900 },
                DifficultyProfile { max_depth: 4, time_limit_ms: 1_800 },
                DifficultyProfile { max_depth: 5, time_limit_ms: 3_500 },
                DifficultyProfile { max_depth: 6, time_limit_ms: 6_000 },
            ],
        }
    }
}

impl DifficultyTable {
    pub fn profile(&self, difficulty: Difficulty) -> &DifficultyProfile {
        &self.profiles[usize::from(difficulty.level() - 1)]
    }
}

/// Opening book is consulted at this difficulty and above.
const BOOK_MIN_LEVEL: u8 = 2;
/// At the lowest difficulty, probability of playing a casual move from the
/// top-scoring half of legal moves instead of the search result.
const CASUAL_MOVE_PROBABILITY: f64 = 0.35;
/// A non-repeating alternative may be at most this much worse than the
/// search's choice.
const REPETITION_TOLERANCE: i32 = 200;

/// Session construction knobs.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    pub cache_capacity: usize,
    pub difficulty_table: DifficultyTable,
    /// Fixed RNG seed for reproducible play; None seeds from the OS.
    pub seed: Option<u64>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            cache_capacity: 200_000,
            difficulty_table: DifficultyTable::default(),
            seed: None,
        }
    }
}

/// Where the chosen move came from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MoveSource {
    Book,
    Search,
}

/// Result of `find_best_move`. `mv` is None only in terminal positions.
/// When `timed_out` is set the move is still the best found at the last
/// depth that completed before the deadline.
#[derive(Debug, Clone)]
pub struct BestMove {
    pub mv: Option<Move>,
    pub score: i32,
    pub depth: u8,
    pub nodes: u64,
    pub timed_out: bool,
    pub source: MoveSource,
}

/// Result of `evaluate_position`.
#[derive(Debug, Clone)]
pub struct EvalReport {
    pub score: i32,
    pub label: &'static str,
    pub win_probability: f64,
}

fn score_label(score: i32) -> &'static str {
    if score >= MATE_THRESHOLD {
        "forced mate"
    } else if score <= -MATE_THRESHOLD {
        "getting mated"
    } else if score >= 300 {
        "clearly better"
    } else if score >= 80 {
        "slightly better"
    } else if score > -80 {
        "balanced"
    } else if score > -300 {
        "slightly worse"
    } else {
        "clearly worse"
    }
}

/// One playing session: the evaluator plus every piece of mutable search
/// state for one game. Scores reported by the entry points are from the
/// perspective of the side to move in the queried position.
pub struct SearchSession<P: GamePosition, E: Evaluate<P>> {
    evaluator: E,
    config: SessionConfig,
    book: OpeningBook,
    tt: TranspositionTable,
    killers: KillerTable,
    history: HistoryTable,
    ledger: RepetitionLedger,
    rng: StdRng,
    nodes: u64,
    _position: PhantomData<P>,
}

impl<P: GamePosition, E: Evaluate<P>> SearchSession<P, E> {
    pub fn new(evaluator: E) -> Self {
        Self::with_config(evaluator, SessionConfig::default())
    }

    pub fn with_config(evaluator: E, config: SessionConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self {
            tt: TranspositionTable::new(config.cache_capacity),
            evaluator,
            config,
            book: OpeningBook::new(),
            killers: KillerTable::new(),
            history: HistoryTable::new(),
            ledger: RepetitionLedger::new(),
            rng,
            nodes: 0,
            _position: PhantomData,
        }
    }

    /// Installs opening lines for this session's game.
    pub fn set_book(&mut self, book: OpeningBook) {
        self.book = book;
    }

    pub fn evaluator(&self) -> &E {
        &self.evaluator
    }

    pub fn cache(&self) -> &TranspositionTable {
        &self.tt
    }

    pub fn ledger(&self) -> &RepetitionLedger {
        &self.ledger
    }

    /// Records a position the game passed through without the engine
    /// choosing a move there (e.g. after an opponent move), so the
    /// repetition guard sees the whole game.
    pub fn note_position(&mut self, pos: &P) {
        self.ledger.record(&pos.key());
    }

    /// Resets every piece of per-game state together: transposition cache,
    /// killer and history tables, and the repetition ledger. Call at the
    /// start of each new game; skipping it leaks stale state across games.
    pub fn new_game(&mut self) {
        self.tt.clear();
        self.killers.clear();
        self.history.clear();
        self.ledger.reset();
        self.nodes = 0;
    }

    /// Picks a move for the side to move. Consults the opening book first
    /// while the game is in its opening phase, then runs an iterative
    /// deepening search, then steers away from repetitions when a
    /// near-equal fresh move exists.
    pub fn find_best_move(
        &mut self,
        pos: &P,
        difficulty: Difficulty,
    ) -> Result<BestMove, EngineError> {
        let profile = self.config.difficulty_table.profile(difficulty).clone();
        self.ledger.record(&pos.key());

        let legal = pos.legal_moves();
        if legal.is_empty() {
            // Terminal: definitive score, no move
            let score = pos.side_to_move().sign() * self.evaluator.evaluate(pos);
            return Ok(BestMove {
                mv: None,
                score,
                depth: 0,
                nodes: 0,
                timed_out: false,
                source: MoveSource::Search,
            });
        }

        if difficulty.level() >= BOOK_MIN_LEVEL
            && self.evaluator.phase(pos) == GamePhase::Opening
        {
            if let Some((mv, entry)) = self.book.pick(&pos.key(), &legal, &mut self.rng) {
                debug!("book: {} ({} -> {})", entry.name, mv.from, mv.to);
                let child = pos.apply(&mv)?;
                self.ledger.record(&child.key());
                let score = pos.side_to_move().sign() * self.evaluator.evaluate(&child);
                return Ok(BestMove {
                    mv: Some(mv),
                    score,
                    depth: 0,
                    nodes: 0,
                    timed_out: false,
                    source: MoveSource::Book,
                });
            }
        }

        let limits = SearchLimits::depth_and_time(
            profile.max_depth,
            Duration::from_millis(profile.time_limit_ms),
        );
        let nodes_before = self.nodes;
        let report = search::search_position(
            pos,
            &limits,
            &self.evaluator,
            &mut self.tt,
            &mut self.killers,
            &mut self.history,
            &mut self.nodes,
        )?;
        let mut chosen = report.mv;
        let mut score = report.score;

        // Deliberately imperfect play at the lowest level
        if difficulty.level() == 1 && self.rng.gen::<f64>() < CASUAL_MOVE_PROBABILITY {
            let (mv, casual_score) = self.casual_move(pos, &legal)?;
            chosen = Some(mv);
            score = casual_score;
        }

        // Repetition guard inspects the final choice
        if let Some(mv) = chosen {
            let child = pos.apply(&mv)?;
            if self.ledger.count_of(&child.key()) >= 1 {
                if let Some((alt, alt_score)) =
                    self.non_repeating_alternative(pos, &legal, &profile, score)?
                {
                    let (width, _) = pos.board_size();
                    debug!(
                        "repetition guard: {}{} replaces {}{}",
                        coord(alt.from, width),
                        coord(alt.to, width),
                        coord(mv.from, width),
                        coord(mv.to, width),
                    );
                    chosen = Some(alt);
                    score = alt_score;
                }
            }
        }

        if let Some(mv) = chosen {
            self.ledger.record(&pos.apply(&mv)?.key());
        }

        Ok(BestMove {
            mv: chosen,
            score,
            depth: report.depth,
            nodes: self.nodes - nodes_before,
            timed_out: report.timed_out,
            source: MoveSource::Search,
        })
    }

    /// Ranks the top `n` candidate moves with win probabilities and
    /// explanations. `recent` is the caller's move history, newest last;
    /// the move undoing the newest entry is damped in the pre-ranking.
    pub fn top_moves(
        &mut self,
        pos: &P,
        n: usize,
        difficulty: Difficulty,
        recent: &[Move],
    ) -> Result<Vec<RankedMove>, EngineError> {
        let profile = self.config.difficulty_table.profile(difficulty).clone();
        Ok(suggest::rank_candidates(
            pos,
            n,
            profile.max_depth,
            Duration::from_millis(profile.time_limit_ms),
            recent,
            &self.evaluator,
            &mut self.tt,
            &mut self.killers,
            &mut self.history,
            &mut self.nodes,
        )?)
    }

    /// Evaluates the position by a fixed-depth search (depth is clamped to
    /// at least 1) and wraps the score with a qualitative label and a win
    /// probability.
    pub fn evaluate_position(&mut self, pos: &P, depth: u8) -> Result<EvalReport, EngineError> {
        let limits = SearchLimits::depth(depth.max(1));
        let report = search::search_position(
            pos,
            &limits,
            &self.evaluator,
            &mut self.tt,
            &mut self.killers,
            &mut self.history,
            &mut self.nodes,
        )?;
        Ok(EvalReport {
            score: report.score,
            label: score_label(report.score),
            win_probability: win_probability(report.score),
        })
    }

    /// Uniform pick among the top-scoring half of legal moves by static
    /// evaluation.
    fn casual_move(&mut self, pos: &P, legal: &[Move]) -> Result<(Move, i32), EngineError> {
        let sign = pos.side_to_move().sign();
        let mut scored: Vec<(Move, i32)> = Vec::with_capacity(legal.len());
        for mv in legal {
            let child = pos.apply(mv)?;
            scored.push((*mv, sign * self.evaluator.evaluate(&child)));
        }
        scored.sort_by_key(|(_, score)| Reverse(*score));
        let half = (scored.len() + 1) / 2;
        Ok(scored[self.rng.gen_range(0..half)])
    }

    /// Cheaper re-search over moves whose resulting position is fresh.
    /// Returns the best of them only when it is within the tolerance of
    /// the original choice; a clearly worse move is never forced just to
    /// avoid repetition.
    fn non_repeating_alternative(
        &mut self,
        pos: &P,
        legal: &[Move],
        profile: &DifficultyProfile,
        baseline: i32,
    ) -> Result<Option<(Move, i32)>, EngineError> {
        let depth = (profile.max_depth / 2).max(2);
        let budget = Duration::from_millis(profile.time_limit_ms / 4 + 1);
        let root_side = pos.side_to_move();

        let mut best: Option<(Move, i32)> = None;
        for mv in legal {
            let child = pos.apply(mv)?;
            if self.ledger.count_of(&child.key()) > 0 {
                continue;
            }
            let mut searcher = Searcher::new(
                &self.evaluator,
                &mut self.tt,
                &mut self.killers,
                &mut self.history,
                SearchClock::start(Some(budget)),
                root_side,
                &mut self.nodes,
            );
            let outcome = searcher.alpha_beta(&child, depth - 1, 1, -INFINITY, INFINITY)?;
            if best.map_or(true, |(_, s)| outcome.score > s) {
                best = Some((*mv, outcome.score));
            }
        }
        Ok(best.filter(|(_, s)| *s >= baseline - REPETITION_TOLERANCE))
    }
}

#[cfg(test)]
#[path = "lib_tests.rs"]
mod lib_tests;
