use super::*;

#[test]
fn counts_accumulate_per_key() {
    let mut ledger = RepetitionLedger::new();
    assert_eq!(ledger.count_of("a"), 0);

    ledger.record("a");
    ledger.record("a");
    ledger.record("b");

    assert_eq!(ledger.count_of("a"), 2);
    assert_eq!(ledger.count_of("b"), 1);
    assert_eq!(ledger.len(), 2);
}

#[test]
fn reset_clears_everything() {
    let mut ledger = RepetitionLedger::new();
    ledger.record("a");
    ledger.reset();
    assert!(ledger.is_empty());
    assert_eq!(ledger.count_of("a"), 0);
}
