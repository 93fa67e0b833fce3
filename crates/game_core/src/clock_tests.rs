use super::*;

#[test]
fn zero_budget_expires_immediately() {
    let clock = SearchClock::start(Some(Duration::ZERO));
    assert!(clock.expired());
    // The stop flag latches
    assert!(clock.is_stopped());
}

#[test]
fn unlimited_clock_never_expires() {
    let clock = SearchClock::unlimited();
    assert!(!clock.expired());
    assert!(clock.remaining().is_none());
}

#[test]
fn stop_is_shared_across_clones() {
    let clock = SearchClock::start(Some(Duration::from_secs(3600)));
    let handle = clock.clone();
    assert!(!clock.expired());
    handle.stop();
    assert!(clock.expired());
}

#[test]
fn generous_budget_does_not_expire_at_start() {
    let limits = SearchLimits::depth_and_time(4, Duration::from_secs(3600));
    let clock = limits.start();
    assert!(!clock.expired());
    assert!(clock.remaining().unwrap() > Duration::from_secs(3599));
}
