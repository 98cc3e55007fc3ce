//! Scanning session state
//!
//! A session lives from scan-start to scan-stop. It owns the approved-code
//! set, the cooldown windows and the counters; all of it is discarded when
//! the session ends.

use chrono::{DateTime, Utc};
use std::time::Duration;

use super::cooldown::Cooldown;
use super::dedup::ScanDeduplicator;
use super::export::ApprovedRecord;
use super::types::{ScanResult, SessionStats};
use crate::core::time::Clock;

/// State of one scanning session
#[derive(Debug)]
pub struct ScanSession {
    dedup: ScanDeduplicator,
    cooldown: Cooldown,
    stats: SessionStats,
    records: Vec<ApprovedRecord>,
    started_at: DateTime<Utc>,
}

impl ScanSession {
    pub fn new(cooldown: Duration, started_at: DateTime<Utc>) -> Self {
        Self {
            dedup: ScanDeduplicator::new(),
            cooldown: Cooldown::new(cooldown),
            stats: SessionStats::default(),
            records: Vec::new(),
            started_at,
        }
    }

    /// Classify one decoded code.
    ///
    /// Returns `None` when the result was classified but held back by the
    /// cooldown. Empty or whitespace-only codes are dropped without touching
    /// any state.
    pub fn handle_code(&mut self, code: &str, clock: &dyn Clock) -> Option<ScanResult> {
        if code.trim().is_empty() {
            log::trace!("Dropped empty decode result");
            return None;
        }

        let now = clock.now();
        let result = self.dedup.process(code, now);
        self.stats.record(&result);
        if result.is_approved() {
            self.records.push(ApprovedRecord {
                code: code.to_string(),
                approved_at: clock.wall_clock(),
            });
        }

        if self.cooldown.admit(code, now) {
            Some(result)
        } else {
            self.stats.suppressed += 1;
            None
        }
    }

    pub fn record_frame(&mut self) {
        self.stats.frames += 1;
    }

    pub fn record_failed_frame(&mut self) {
        self.stats.frames += 1;
        self.stats.failed_frames += 1;
    }

    pub fn stats(&self) -> SessionStats {
        self.stats
    }

    pub fn deduplicator(&self) -> &ScanDeduplicator {
        &self.dedup
    }

    /// Approved codes with their approval time, in approval order
    pub fn records(&self) -> &[ApprovedRecord] {
        &self.records
    }

    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }
}
