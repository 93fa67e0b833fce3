use super::*;

#[test]
fn difficulty_clamps_to_range() {
    assert_eq!(Difficulty::new(0).level(), 1);
    assert_eq!(Difficulty::new(3).level(), 3);
    assert_eq!(Difficulty::new(99).level(), 5);
}

#[test]
fn difficulty_table_scales_depth_and_time() {
    let table = DifficultyTable::default();
    let mut last_depth = 0;
    let mut last_time = 0;
    for level in 1..=5 {
        let profile = table.profile(Difficulty::new(level));
        assert!(profile.max_depth > last_depth, "level {level}");
        assert!(profile.time_limit_ms > last_time, "level {level}");
        last_depth = profile.max_depth;
        last_time = profile.time_limit_ms;
    }
}

#[test]
fn difficulty_table_round_trips_through_serde() {
    // The table is the one caller-facing tunable; it must survive config
    // (de)serialization
    let table = DifficultyTable::default();
    let json = serde_json::to_string(&table).unwrap();
    let back: DifficultyTable = serde_json::from_str(&json).unwrap();
    assert_eq!(back.profile(Difficulty::MAX).max_depth, 6);
}

#[test]
fn score_labels_band_correctly() {
    assert_eq!(score_label(MATE_SCORE - 3), "forced mate");
    assert_eq!(score_label(-(MATE_SCORE - 3)), "getting mated");
    assert_eq!(score_label(450), "clearly better");
    assert_eq!(score_label(120), "slightly better");
    assert_eq!(score_label(0), "balanced");
    assert_eq!(score_label(-120), "slightly worse");
    assert_eq!(score_label(-450), "clearly worse");
}
