use super::*;
use game_core::GamePosition;
use skirmish::{Skirmish, GUARD, TOWER};

fn weights() -> EvalWeights {
    EvalWeights {
        board_width: 5,
        board_height: 5,
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

fn eval_key(key: &str, evaluator: &TableEvaluator) -> i32 {
    evaluator.evaluate(&Skirmish::decode(key).unwrap())
}

/// Swaps both sides' pieces and mirrors the board vertically.
fn mirror_key(key: &str) -> String {
    let (board, side) = key.split_once(' ').unwrap();
    let rows: Vec<&str> = (0..5).map(|r| &board[r * 5..r * 5 + 5]).collect();
    let mut out = String::new();
    for r in (0..5).rev() {
        for c in rows[r].chars() {
            if c.is_ascii_uppercase() {
                out.push(c.to_ascii_lowercase());
            } else if c.is_ascii_lowercase() {
                out.push(c.to_ascii_uppercase());
            } else {
                out.push('.');
            }
        }
    }
    format!("{out} {}", if side == "f" { "s" } else { "f" })
}

#[test]
fn start_position_is_balanced() {
    let evaluator = TableEvaluator::new(weights());
    assert_eq!(evaluator.evaluate(&Skirmish::start()), 0);
}

#[test]
fn material_edge_counts() {
    let evaluator = TableEvaluator::new(weights());
    // Start position with one second-player home guard removed
    let key = concat!("TDGDT", "..D..", ".....", "..d..", "t.gdt", " f");
    assert_eq!(eval_key(key, &evaluator), 100);
}

#[test]
fn development_bonus_applies_in_opening() {
    let evaluator = TableEvaluator::new(weights());
    // Start position after the b1 guard steps to b2: one extra developed
    // first-player guard
    let key = concat!("T.GDT", ".DD..", ".....", "..d..", "tdgdt", " s");
    assert_eq!(eval_key(key, &evaluator), 15);
}

#[test]
fn advancement_bonus_applies_in_endgame() {
    let evaluator = TableEvaluator::new(weights());
    // Two guards left: first player's is two ranks up, second's is one
    let key = concat!("G....", ".....", "..D..", "..d..", "....g", " f");
    assert_eq!(eval_key(key, &evaluator), 10);
}

#[test]
fn check_penalizes_the_checked_side() {
    let evaluator = TableEvaluator::new(weights());
    // Lone second-player general under tower check, escapes available
    let key = concat!("....G", ".....", ".....", "T....", "g....", " s");
    assert_eq!(eval_key(key, &evaluator), 340);
}

#[test]
fn checkmate_overrides_the_term_sum() {
    let evaluator = TableEvaluator::new(weights());
    let mate = concat!("....G", ".....", ".D...", "T.D..", "g....", " s");
    assert_eq!(eval_key(mate, &evaluator), MATE_SCORE);
}

#[test]
fn stalemate_scores_zero() {
    let evaluator = TableEvaluator::new(weights());
    let stalemate = concat!("....G", ".....", ".D...", "..D..", "g....", " s");
    assert_eq!(eval_key(stalemate, &evaluator), 0);
}

#[test]
fn mirrored_positions_negate_exactly() {
    // Include a non-trivial piece-square table to exercise mirroring
    let mut w = weights();
    w.piece_square = vec![vec![], (0..25).collect(), vec![]];
    let evaluator = TableEvaluator::new(w);

    let keys = [
        concat!("....G", ".....", ".....", "T....", "g....", " s"),
        concat!("G.T.D", ".....", "..D..", ".d...", "g.t..", " f"),
        concat!("TDGDT", "..D..", ".....", "..d..", "tdgdt", " f"),
    ];
    for key in keys {
        let pos = eval_key(key, &evaluator);
        let mirrored = eval_key(&mirror_key(key), &evaluator);
        assert_eq!(pos, -mirrored, "key {key}");
    }
}

#[test]
fn phase_follows_material_thresholds() {
    let evaluator = TableEvaluator::new(weights());
    assert_eq!(evaluator.phase(&Skirmish::start()), GamePhase::Opening);

    let middle = concat!("G.T.D", ".....", ".....", ".....", "g.t.d", " f");
    assert_eq!(
        evaluator.phase(&Skirmish::decode(middle).unwrap()),
        GamePhase::Middlegame
    );

    let sparse = concat!("G....", ".....", "..D..", "..d..", "....g", " f");
    assert_eq!(
        evaluator.phase(&Skirmish::decode(sparse).unwrap()),
        GamePhase::Endgame
    );
}

#[test]
fn piece_values_come_from_the_table() {
    let evaluator = TableEvaluator::new(weights());
    assert_eq!(Evaluate::<Skirmish>::piece_value(&evaluator, GUARD), 100);
    assert_eq!(Evaluate::<Skirmish>::piece_value(&evaluator, TOWER), 300);
    // Unknown kinds default to zero rather than panicking
    assert_eq!(Evaluate::<Skirmish>::piece_value(&evaluator, PieceKind(9)), 0);
}
