//! Table-driven static evaluation.
//!
//! `TableEvaluator` scores a position as material + piece-square bonuses +
//! phase-dependent terms + a check term, with a large-magnitude override
//! for decided positions. Weights are per-game tunables supplied through
//! `EvalWeights`; the contract that must hold regardless of tuning is
//! symmetry: swapping both sides' pieces and mirroring the board negates
//! the score exactly.

use game_core::{mirror_square, rank_of, Color, Evaluate, GamePhase, GamePosition, GameStatus,
    PieceKind};

/// Score magnitude for a checkmated position. Interior search additionally
/// adjusts mate scores by ply so faster mates win out.
pub const MATE_SCORE: i32 = 100_000;

/// Scores at or above this magnitude are treated as proven mates.
pub const MATE_THRESHOLD: i32 = MATE_SCORE - 1_000;

/// Per-game evaluation weights. Piece-square tables are written from the
/// first player's point of view and mirrored vertically for the second.
#[derive(Debug, Clone)]
pub struct EvalWeights {
    pub board_width: u8,
    pub board_height: u8,
    /// Material value per piece kind, indexed by `PieceKind::idx()`.
    pub piece_values: Vec<i32>,
    /// Optional per-kind square bonus tables; an empty table means zero.
    pub piece_square: Vec<Vec<i32>>,
    /// Total material (both sides) above which the game counts as opening.
    pub opening_material: i32,
    /// Total material below which the game counts as endgame.
    pub endgame_material: i32,
    /// Opening bonus per developed piece (off its home rank) of a
    /// development kind.
    pub development_bonus: i32,
    pub development_kinds: Vec<PieceKind>,
    /// Endgame bonus per rank of advancement for the advance kind.
    pub advance_bonus: i32,
    pub advance_kind: Option<PieceKind>,
    /// Penalty against the side currently in check.
    pub check_penalty: i32,
}

impl EvalWeights {
    fn pst(&self, kind: PieceKind, square: u8, color: Color) -> i32 {
        let table = match self.piece_square.get(kind.idx()) {
            Some(t) if !t.is_empty() => t,
            _ => return 0,
        };
        let sq = match color {
            Color::First => square,
            Color::Second => mirror_square(square, self.board_width, self.board_height),
        };
        table.get(sq as usize).copied().unwrap_or(0)
    }

    fn home_rank(&self, color: Color) -> u8 {
        match color {
            Color::First => 0,
            Color::Second => self.board_height - 1,
        }
    }

    /// Ranks advanced from the home rank, color-relative.
    fn advancement(&self, square: u8, color: Color) -> i32 {
        let rank = rank_of(square, self.board_width);
        match color {
            Color::First => i32::from(rank),
            Color::Second => i32::from(self.board_height - 1 - rank),
        }
    }
}

/// The stock evaluator: deterministic, side-symmetric, no side effects.
/// Scores are from `Color::First`'s perspective in centipawn-equivalents.
#[derive(Debug, Clone)]
pub struct TableEvaluator {
    weights: EvalWeights,
}

impl TableEvaluator {
    pub fn new(weights: EvalWeights) -> Self {
        Self { weights }
    }

    pub fn weights(&self) -> &EvalWeights {
        &self.weights
    }

    fn total_material<P: GamePosition>(&self, pos: &P) -> i32 {
        pos.pieces()
            .iter()
            .map(|p| self.weights.piece_values.get(p.kind.idx()).copied().unwrap_or(0))
            .sum()
    }
}

impl<P: GamePosition> Evaluate<P> for TableEvaluator {
    fn evaluate(&self, pos: &P) -> i32 {
        // Decided positions short-circuit the term sum
        match pos.status() {
            GameStatus::Checkmate => return -pos.side_to_move().sign() * MATE_SCORE,
            GameStatus::Stalemate => return 0,
            GameStatus::InProgress => {}
        }

        let w = &self.weights;
        let phase = self.phase(pos);
        let mut score = 0i32;

        for p in pos.pieces() {
            let sign = p.color.sign();
            score += sign * w.piece_values.get(p.kind.idx()).copied().unwrap_or(0);
            score += sign * w.pst(p.kind, p.square, p.color);

            match phase {
                GamePhase::Opening => {
                    if w.development_kinds.contains(&p.kind)
                        && rank_of(p.square, w.board_width) != w.home_rank(p.color)
                    {
                        score += sign * w.development_bonus;
                    }
                }
                GamePhase::Endgame => {
                    if Some(p.kind) == w.advance_kind {
                        score += sign * w.advance_bonus * w.advancement(p.square, p.color);
                    }
                }
                GamePhase::Middlegame => {}
            }
        }

        if pos.in_check() {
            score -= pos.side_to_move().sign() * w.check_penalty;
        }

        score
    }

    fn piece_value(&self, kind: PieceKind) -> i32 {
        self.weights.piece_values.get(kind.idx()).copied().unwrap_or(0)
    }

    fn phase(&self, pos: &P) -> GamePhase {
        let total = self.total_material(pos);
        if total >= self.weights.opening_material {
            GamePhase::Opening
        } else if total <= self.weights.endgame_material {
            GamePhase::Endgame
        } else {
            GamePhase::Middlegame
        }
    }
}

#[cfg(test)]
#[path = "eval_tests.rs"]
mod eval_tests;
