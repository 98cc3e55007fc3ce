//! Approved-code deduplication
//!
//! The set of approved codes is the single source of truth for classification:
//! a code is approved at most once per session, every later sighting is rejected.
//! Membership grows without eviction for the lifetime of the session.

use std::collections::HashSet;
use std::sync::{Arc, Mutex};
use std::time::Instant;

use super::types::{ScanEvent, ScanResult};

/// Classifies decoded codes as newly approved or already used
#[derive(Debug, Default)]
pub struct ScanDeduplicator {
    approved: HashSet<String>,
    // first-approval order, kept for export
    order: Vec<String>,
}

impl ScanDeduplicator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Classify `code` and record it if it has not been approved yet.
    ///
    /// Callers must not pass empty codes. The timestamp is part of the call so
    /// pacing can sit in front of it; classification never depends on it.
    pub fn process(&mut self, code: &str, _now: Instant) -> ScanResult {
        debug_assert!(!code.is_empty(), "empty codes must be filtered by the caller");

        if self.approved.contains(code) {
            log::debug!("Rejected already used code '{}'", code);
            return ScanResult::already_used(code);
        }

        self.approved.insert(code.to_string());
        self.order.push(code.to_string());
        log::debug!(
            "Approved code '{}' ({} approved this session)",
            code,
            self.order.len()
        );
        ScanResult::approved(code)
    }

    pub fn process_event(&mut self, event: &ScanEvent) -> ScanResult {
        self.process(&event.code, event.timestamp)
    }

    pub fn is_approved(&self, code: &str) -> bool {
        self.approved.contains(code)
    }

    pub fn approved_count(&self) -> usize {
        self.approved.len()
    }

    pub fn is_empty(&self) -> bool {
        self.approved.is_empty()
    }

    /// Approved codes in the order they were first approved
    pub fn approved_codes(&self) -> impl Iterator<Item = &str> {
        self.order.iter().map(String::as_str)
    }
}

/// Cloneable handle serializing access to one deduplicator
///
/// Check and insert happen under the same lock, so concurrent decoders can
/// never approve the same code twice.
#[derive(Debug, Clone, Default)]
pub struct SharedDeduplicator {
    inner: Arc<Mutex<ScanDeduplicator>>,
}

impl SharedDeduplicator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn process(&self, code: &str, now: Instant) -> ScanResult {
        let mut guard = match self.inner.lock() {
            Ok(guard) => guard,
            // a panicking holder cannot leave the set half-updated
            Err(poisoned) => poisoned.into_inner(),
        };
        guard.process(code, now)
    }

    pub fn approved_count(&self) -> usize {
        match self.inner.lock() {
            Ok(guard) => guard.approved_count(),
            Err(poisoned) => poisoned.into_inner().approved_count(),
        }
    }

    /// Take a copy of the approved codes in approval order
    pub fn snapshot(&self) -> Vec<String> {
        let guard = match self.inner.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        guard.approved_codes().map(str::to_string).collect()
    }
}

impl From<ScanDeduplicator> for SharedDeduplicator {
    fn from(dedup: ScanDeduplicator) -> Self {
        Self {
            inner: Arc::new(Mutex::new(dedup)),
        }
    }
}
