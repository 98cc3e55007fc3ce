//! Scanner Component
//!
//! Consumes decoded codes from a frame source and classifies each one as newly
//! approved or already used within the current session.
//!
//! ## Core Features
//!
//! - **ScanDeduplicator**: at-most-once approval per session, hash-set backed
//! - **Cooldown**: non-blocking pacing of repeated results for a still-visible code
//! - **ScanController**: command dispatch for session start, stop and frames
//! - **PollingTask**: fixed-interval schedule, independent of any UI toolkit
//! - **Session export**: approved codes written to CSV when a session stops

pub mod api;
pub mod controller;
pub mod cooldown;
pub mod dedup;
pub mod error;
pub mod export;
pub mod polling;
pub mod runner;
pub mod session;
pub mod source;
pub mod types;

pub use error::{ScanError, ScanOutcome};
pub use types::{RejectReason, ScanEvent, ScanResult, SessionStats};
