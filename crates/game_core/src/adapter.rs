//! The seam between the search engine and a concrete game.
//!
//! The engine never implements game rules. It consumes a position through
//! `GamePosition` (legal moves, clone-apply, terminal queries, a canonical
//! string key) and a static evaluator through `Evaluate`. Any two-player
//! perfect-information game that can supply these two traits can plug into
//! the search core unchanged.

use crate::error::PositionError;
use crate::types::{Color, GameStatus, Move, PlacedPiece};

/// Position adapter: the engine-facing view of one game state.
///
/// Implementations must guarantee:
/// - `key()` is canonical: two positions with identical keys are the same
///   position, and the key incorporates the side to move.
/// - `legal_moves()` returns moves in a stable, deterministic order for a
///   given position (search reproducibility depends on it).
/// - `apply()` is clone-apply with value semantics: the receiver is never
///   mutated, so sibling search branches cannot observe each other.
pub trait GamePosition: Clone {
    /// Parses a canonical position key. Fails with a `PositionError` on
    /// malformed input; the engine surfaces this distinctly from a
    /// "no legal moves" terminal state.
    fn decode(key: &str) -> Result<Self, PositionError>
    where
        Self: Sized;

    /// Canonical serialization of this position, side to move included.
    fn key(&self) -> String;

    /// Board geometry as (width, height). Constant per game.
    fn board_size(&self) -> (u8, u8);

    fn side_to_move(&self) -> Color;

    /// All legal moves for the side to move, in stable generation order.
    fn legal_moves(&self) -> Vec<Move>;

    /// Applies a move to a clone of this position. Errs if the move is not
    /// legal here; the engine treats that as a fatal search abort, never a
    /// silent score.
    fn apply(&self, mv: &Move) -> Result<Self, PositionError>
    where
        Self: Sized;

    /// Whether the side to move is currently in check.
    fn in_check(&self) -> bool;

    /// Every piece on the board.
    fn pieces(&self) -> Vec<PlacedPiece>;

    /// Status of the side to move, derived from move availability.
    /// "No legal moves" is a terminal state, not an error.
    fn status(&self) -> GameStatus {
        if !self.legal_moves().is_empty() {
            GameStatus::InProgress
        } else if self.in_check() {
            GameStatus::Checkmate
        } else {
            GameStatus::Stalemate
        }
    }
}

/// Coarse game phase, detected from remaining material.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GamePhase {
    Opening,
    Middlegame,
    Endgame,
}

/// Static evaluator seam.
///
/// `evaluate` must be deterministic and side-symmetric: swapping both
/// sides' pieces and mirroring the board negates the score exactly.
pub trait Evaluate<P: GamePosition> {
    /// Static score of the position from `Color::First`'s perspective,
    /// in centipawn-equivalent units.
    fn evaluate(&self, pos: &P) -> i32;

    /// Material value of a piece kind (used for capture ordering as well
    /// as evaluation).
    fn piece_value(&self, kind: crate::types::PieceKind) -> i32;

    /// Phase of the game, by total remaining material.
    fn phase(&self, pos: &P) -> GamePhase;
}
