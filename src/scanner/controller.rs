//! Command dispatch for scanning sessions
//!
//! Every user or timer action is one [`Command`]; the controller turns it into
//! zero or more [`Notice`]s for the presentation layer. Nothing here knows
//! about windows, widgets or terminals.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use super::cooldown::DEFAULT_COOLDOWN;
use super::export::SessionExporter;
use super::session::ScanSession;
use super::types::{ScanResult, SessionStats};
use crate::core::time::{Clock, SystemClock};

/// Discrete actions driving a session
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Start,
    Stop,
    /// Decoded texts of one polled frame
    Frame(Vec<String>),
    /// The frame for this poll could not be read
    FrameFailed(String),
}

/// Session status shown to the user
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StatusKind {
    Scanning,
    Stopped,
}

/// Something the presentation layer should show
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum Notice {
    Status {
        status: StatusKind,
    },
    Result {
        #[serde(flatten)]
        result: ScanResult,
    },
    FrameError {
        reason: String,
    },
    Exported {
        path: PathBuf,
        count: usize,
    },
    ExportFailed {
        path: PathBuf,
        reason: String,
    },
}

/// Settings applied to every new session
#[derive(Debug, Clone)]
pub struct ControllerConfig {
    pub cooldown: Duration,
    /// Where to write approved codes when a session stops
    pub export_path: Option<PathBuf>,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            cooldown: DEFAULT_COOLDOWN,
            export_path: None,
        }
    }
}

/// Owns at most one active session and dispatches commands to it
pub struct ScanController {
    config: ControllerConfig,
    clock: Arc<dyn Clock>,
    session: Option<ScanSession>,
    last_stats: Option<SessionStats>,
}

impl ScanController {
    pub fn new(config: ControllerConfig) -> Self {
        Self::with_clock(config, Arc::new(SystemClock))
    }

    pub fn with_clock(config: ControllerConfig, clock: Arc<dyn Clock>) -> Self {
        Self {
            config,
            clock,
            session: None,
            last_stats: None,
        }
    }

    pub fn is_scanning(&self) -> bool {
        self.session.is_some()
    }

    /// The active session, if scanning
    pub fn session(&self) -> Option<&ScanSession> {
        self.session.as_ref()
    }

    /// Counters of the most recently stopped session
    pub fn last_stats(&self) -> Option<SessionStats> {
        self.last_stats
    }

    pub fn dispatch(&mut self, command: Command) -> Vec<Notice> {
        match command {
            Command::Start => self.start(),
            Command::Stop => self.stop(),
            Command::Frame(codes) => self.frame(codes),
            Command::FrameFailed(reason) => self.frame_failed(reason),
        }
    }

    fn start(&mut self) -> Vec<Notice> {
        if self.session.is_some() {
            log::warn!("Start requested while already scanning; ignored");
            return Vec::new();
        }

        log::info!(
            "Scanning session started (cooldown {:?})",
            self.config.cooldown
        );
        self.session = Some(ScanSession::new(
            self.config.cooldown,
            self.clock.wall_clock(),
        ));
        vec![Notice::Status {
            status: StatusKind::Scanning,
        }]
    }

    fn stop(&mut self) -> Vec<Notice> {
        let Some(session) = self.session.take() else {
            log::warn!("Stop requested while not scanning; ignored");
            return Vec::new();
        };

        let stats = session.stats();
        let elapsed = self.clock.wall_clock() - session.started_at();
        log::info!(
            "Scanning session stopped after {}s: {}",
            elapsed.num_seconds(),
            stats
        );
        self.last_stats = Some(stats);

        let mut notices = vec![Notice::Status {
            status: StatusKind::Stopped,
        }];

        if let Some(path) = self.config.export_path.clone() {
            let exporter = SessionExporter::for_path(&path);
            match exporter.write(&path, session.records()) {
                Ok(count) => notices.push(Notice::Exported { path, count }),
                Err(e) => {
                    log::error!("{}", e);
                    notices.push(Notice::ExportFailed {
                        path,
                        reason: e.to_string(),
                    });
                }
            }
        }

        notices
    }

    fn frame(&mut self, codes: Vec<String>) -> Vec<Notice> {
        let Some(session) = self.session.as_mut() else {
            log::debug!("Frame received while not scanning; ignored");
            return Vec::new();
        };

        session.record_frame();
        codes
            .iter()
            .filter_map(|code| session.handle_code(code, self.clock.as_ref()))
            .map(|result| Notice::Result { result })
            .collect()
    }

    fn frame_failed(&mut self, reason: String) -> Vec<Notice> {
        let Some(session) = self.session.as_mut() else {
            return Vec::new();
        };

        log::warn!("Failed to capture frame: {}", reason);
        session.record_failed_frame();
        vec![Notice::FrameError { reason }]
    }
}
