//! Non-blocking result pacing
//!
//! A code that stays in front of the camera is decoded on every poll. The
//! cooldown decides whether a fresh result for such a code is worth forwarding
//! to the presentation layer. It never sleeps and never changes a
//! classification; it only filters what gets rendered.

use std::collections::HashMap;
use std::time::{Duration, Instant};

/// Default minimum interval between two forwarded results for the same code
pub const DEFAULT_COOLDOWN: Duration = Duration::from_secs(1);

/// Per-code minimum interval between forwarded results
#[derive(Debug)]
pub struct Cooldown {
    interval: Duration,
    last_admitted: HashMap<String, Instant>,
    suppressed: u64,
}

impl Default for Cooldown {
    fn default() -> Self {
        Self::new(DEFAULT_COOLDOWN)
    }
}

impl Cooldown {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            last_admitted: HashMap::new(),
            suppressed: 0,
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Returns true when a result for `code` may be forwarded at `now`.
    ///
    /// Admission restarts the window for that code. A zero interval admits
    /// everything.
    pub fn admit(&mut self, code: &str, now: Instant) -> bool {
        if self.interval.is_zero() {
            return true;
        }

        self.prune(now);

        if let Some(last) = self.last_admitted.get(code) {
            if now.saturating_duration_since(*last) < self.interval {
                self.suppressed += 1;
                log::trace!("Cooldown suppressed result for '{}'", code);
                return false;
            }
        }

        self.last_admitted.insert(code.to_string(), now);
        true
    }

    /// Number of results held back since creation
    pub fn suppressed(&self) -> u64 {
        self.suppressed
    }

    /// Codes currently inside their cooldown window
    pub fn tracked(&self) -> usize {
        self.last_admitted.len()
    }

    // Expired windows carry no information, drop them so the map stays small
    fn prune(&mut self, now: Instant) {
        let interval = self.interval;
        self.last_admitted
            .retain(|_, last| now.saturating_duration_since(*last) < interval);
    }
}
