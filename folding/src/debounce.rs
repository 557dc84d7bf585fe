use std::time::{Duration, Instant};

/// Default quiet period between the last trigger and the scan it
/// schedules.
pub const DEFAULT_QUIET: Duration = Duration::from_millis(100);

/// Trailing-edge debounce timer, driven explicitly by the caller.
///
/// Every [`trigger`](Debouncer::trigger) pushes the deadline back by
/// the quiet period; [`poll`](Debouncer::poll) fires at most once per
/// deadline. Time is passed in rather than read from a clock, so the
/// coalescing behavior is fully deterministic under test.
#[derive(Debug)]
pub struct Debouncer {
    quiet: Duration,
    deadline: Option<Instant>,
}

impl Debouncer {
    pub fn new(quiet: Duration) -> Self {
        Debouncer {
            quiet,
            deadline: None,
        }
    }

    /// Record an event. Supersedes any pending deadline.
    pub fn trigger(&mut self, now: Instant) {
        self.deadline = Some(now + self.quiet);
    }

    /// True exactly once after the quiet period elapses with no
    /// further triggers.
    pub fn poll(&mut self, now: Instant) -> bool {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }

    pub fn is_pending(&self) -> bool {
        self.deadline.is_some()
    }
}

impl Default for Debouncer {
    fn default() -> Self {
        Debouncer::new(DEFAULT_QUIET)
    }
}
