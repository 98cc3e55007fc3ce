//! Scanner API
//!
//! Public surface of the scanner module, consolidating the exports external
//! code and integration tests rely on.

// Classification core
pub use crate::scanner::cooldown::{Cooldown, DEFAULT_COOLDOWN};
pub use crate::scanner::dedup::{ScanDeduplicator, SharedDeduplicator};

// Session control
pub use crate::scanner::controller::{Command, ControllerConfig, Notice, ScanController, StatusKind};
pub use crate::scanner::session::ScanSession;

// Scheduling and input
pub use crate::scanner::polling::{Flow, PollStep, PollingTask, StopReason, DEFAULT_POLL_INTERVAL};
pub use crate::scanner::runner::{run_scan, RunSummary};
pub use crate::scanner::source::{FrameSource, ReplaySource, ScriptedSource, FAIL_MARKER};

// Export
pub use crate::scanner::export::{ApprovedRecord, SessionExporter};

// Error handling
pub use crate::scanner::error::{ScanError, ScanOutcome};

// Core data types
pub use crate::scanner::types::{RejectReason, ScanEvent, ScanResult, SessionStats};
