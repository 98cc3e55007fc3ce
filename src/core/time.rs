//! Clock abstraction for time-dependent scanning logic
//!
//! Classification and cooldown take their timestamps from a [`Clock`] so that
//! sessions can be driven deterministically in tests.

use chrono::{DateTime, Utc};
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

/// Source of monotonic and wall-clock time
pub trait Clock: Send + Sync {
    /// Monotonic time, used for cooldown intervals
    fn now(&self) -> Instant;

    /// Wall-clock time, used for exported timestamps
    fn wall_clock(&self) -> DateTime<Utc>;
}

/// Production clock backed by the operating system
#[derive(Debug, Default, Clone)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }

    fn wall_clock(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Manually advanced clock
///
/// Clones share the same time, so a test can keep one handle and give the
/// other to the code under test.
#[derive(Debug, Clone)]
pub struct ManualClock {
    state: Arc<Mutex<(Instant, DateTime<Utc>)>>,
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new()
    }
}

impl ManualClock {
    pub fn new() -> Self {
        Self {
            state: Arc::new(Mutex::new((Instant::now(), Utc::now()))),
        }
    }

    /// Advance both monotonic and wall-clock time
    pub fn advance(&self, duration: Duration) {
        let mut state = match self.state.lock() {
            Ok(state) => state,
            Err(poisoned) => poisoned.into_inner(),
        };
        state.0 += duration;
        state.1 += chrono::Duration::from_std(duration).unwrap_or(chrono::Duration::zero());
    }

    fn read(&self) -> (Instant, DateTime<Utc>) {
        match self.state.lock() {
            Ok(state) => *state,
            Err(poisoned) => *poisoned.into_inner(),
        }
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Instant {
        self.read().0
    }

    fn wall_clock(&self) -> DateTime<Utc> {
        self.read().1
    }
}
