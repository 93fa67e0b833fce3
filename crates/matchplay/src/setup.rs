//! Session wiring for the Skirmish demo game.

use minimax_engine::{EvalWeights, OpeningBook, SearchSession, SessionConfig, TableEvaluator};
use skirmish::{Skirmish, GUARD};

/// Evaluation weights tuned for Skirmish. Material only plus light
/// development/advancement shaping; the game is small enough that
/// piece-square tables add nothing.
pub fn skirmish_weights() -> EvalWeights {
    EvalWeights {
        board_width: skirmish::BOARD_W,
        board_height: skirmish::BOARD_H,
        piece_values: vec![0, 100, 300], // general, guard, tower
        piece_square: vec![],
        opening_material: 1500,
        endgame_material: 600,
        development_bonus: 15,
        development_kinds: vec![GUARD],
        advance_bonus: 10,
        advance_kind: Some(GUARD),
        check_penalty: 40,
    }
}

/// A ready-to-play session: Skirmish evaluator plus the built-in opening
/// lines.
pub fn make_session(config: SessionConfig) -> SearchSession<Skirmish, TableEvaluator> {
    let mut session = SearchSession::with_config(TableEvaluator::new(skirmish_weights()), config);
    match OpeningBook::from_json(skirmish::openings_json()) {
        Ok(book) => session.set_book(book),
        Err(e) => eprintln!("Warning: built-in opening book is unreadable: {e}"),
    }
    session
}
