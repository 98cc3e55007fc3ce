//! Scanner Types and Enums
//!
//! Shared types used throughout the scanner module.

use std::fmt;
use std::time::Instant;

/// A single decoded code observed in a polled frame
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanEvent {
    pub code: String,
    pub timestamp: Instant,
}

impl ScanEvent {
    pub fn new<S: Into<String>>(code: S, timestamp: Instant) -> Self {
        Self {
            code: code.into(),
            timestamp,
        }
    }
}

/// Why a decoded code was not approved
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RejectReason {
    /// The code was already approved earlier in this session
    AlreadyUsed,
}

impl fmt::Display for RejectReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RejectReason::AlreadyUsed => write!(f, "already used"),
        }
    }
}

/// Classification of one decoded code
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "result", rename_all = "snake_case")]
pub enum ScanResult {
    Approved { code: String },
    Rejected { code: String, reason: RejectReason },
}

impl ScanResult {
    pub fn approved<S: Into<String>>(code: S) -> Self {
        ScanResult::Approved { code: code.into() }
    }

    pub fn already_used<S: Into<String>>(code: S) -> Self {
        ScanResult::Rejected {
            code: code.into(),
            reason: RejectReason::AlreadyUsed,
        }
    }

    /// The code this result refers to
    pub fn code(&self) -> &str {
        match self {
            ScanResult::Approved { code } | ScanResult::Rejected { code, .. } => code,
        }
    }

    pub fn is_approved(&self) -> bool {
        matches!(self, ScanResult::Approved { .. })
    }
}

/// Counters kept for the lifetime of one scanning session
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Serialize)]
pub struct SessionStats {
    /// Frames delivered by the source, including failed reads
    pub frames: u64,
    pub failed_frames: u64,
    pub approved: u64,
    pub rejected: u64,
    /// Results classified but held back by the cooldown
    pub suppressed: u64,
}

impl SessionStats {
    pub fn record(&mut self, result: &ScanResult) {
        if result.is_approved() {
            self.approved += 1;
        } else {
            self.rejected += 1;
        }
    }
}

impl fmt::Display for SessionStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} frames ({} failed), {} approved, {} rejected, {} suppressed",
            self.frames, self.failed_frames, self.approved, self.rejected, self.suppressed
        )
    }
}
