//! Time control and search limits.
//!
//! A search runs under a wall-clock budget. The clock is checked at the top
//! of every interior search call; when the deadline passes, the stop flag
//! latches and the search unwinds cooperatively via its `timed_out` result
//! flag. There is no external cancellation signal.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Limits for one search invocation: a depth ceiling and an optional
/// wall-clock budget. The time budget takes precedence - when it runs out
/// the engine returns the best move found so far.
#[derive(Debug, Clone)]
pub struct SearchLimits {
    /// Maximum search depth in plies.
    pub max_depth: u8,
    /// Wall-clock budget for this move (None = unlimited).
    pub move_time: Option<Duration>,
}

impl SearchLimits {
    /// Limits with only a depth ceiling.
    pub fn depth(max_depth: u8) -> Self {
        Self {
            max_depth,
            move_time: None,
        }
    }

    /// Limits with a depth ceiling and a wall-clock budget.
    pub fn depth_and_time(max_depth: u8, move_time: Duration) -> Self {
        Self {
            max_depth,
            move_time: Some(move_time),
        }
    }

    /// Starts the clock for these limits. Call once, when search begins.
    pub fn start(&self) -> SearchClock {
        SearchClock::start(self.move_time)
    }
}

impl Default for SearchLimits {
    fn default() -> Self {
        Self::depth(4)
    }
}

/// Running wall clock for one search. Cheaply cloneable; clones share the
/// stop flag, so stopping any handle stops them all.
#[derive(Debug, Clone)]
pub struct SearchClock {
    stopped: Arc<AtomicBool>,
    started: Instant,
    budget: Option<Duration>,
}

impl SearchClock {
    pub fn start(budget: Option<Duration>) -> Self {
        Self {
            stopped: Arc::new(AtomicBool::new(false)),
            started: Instant::now(),
            budget,
        }
    }

    /// A clock that never expires (for fixed-depth searches and tests).
    pub fn unlimited() -> Self {
        Self::start(None)
    }

    /// Force-stop the search.
    pub fn stop(&self) {
        self.stopped.store(true, Ordering::SeqCst);
    }

    /// Fast check of the latched stop flag.
    #[inline]
    pub fn is_stopped(&self) -> bool {
        self.stopped.load(Ordering::Relaxed)
    }

    /// Checks the deadline, latching the stop flag once it has passed.
    /// Returns true if the search must unwind.
    pub fn expired(&self) -> bool {
        if self.is_stopped() {
            return true;
        }
        if let Some(budget) = self.budget {
            if self.started.elapsed() >= budget {
                self.stop();
                return true;
            }
        }
        false
    }

    pub fn elapsed(&self) -> Duration {
        self.started.elapsed()
    }

    /// Remaining budget (None if unlimited).
    pub fn remaining(&self) -> Option<Duration> {
        let budget = self.budget?;
        Some(budget.saturating_sub(self.started.elapsed()))
    }
}

#[cfg(test)]
#[path = "clock_tests.rs"]
mod clock_tests;
