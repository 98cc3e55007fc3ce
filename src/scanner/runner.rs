//! Scan loop
//!
//! Wires a frame source, the session controller and a renderer to the
//! polling schedule: start a session, poll frames until the source runs dry
//! or shutdown is requested, then stop the session.

use async_trait::async_trait;
use tokio::sync::broadcast;

use super::controller::{Command, Notice, ScanController};
use super::error::{ScanError, ScanOutcome};
use super::polling::{Flow, PollStep, PollingTask, StopReason};
use super::source::FrameSource;
use super::types::SessionStats;
use crate::display::Renderer;

/// Summary of a finished scan run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    pub stop_reason: StopReason,
    pub ticks: u64,
    pub stats: SessionStats,
}

struct ScanStep<'a> {
    source: &'a mut dyn FrameSource,
    controller: &'a mut ScanController,
    renderer: &'a mut dyn Renderer,
    fatal: Option<ScanError>,
    output_closed: bool,
}

impl ScanStep<'_> {
    fn emit(&mut self, notices: Vec<Notice>) -> Flow {
        for notice in &notices {
            match self.renderer.render(notice) {
                Ok(()) => {}
                Err(e) if e.kind() == std::io::ErrorKind::BrokenPipe => {
                    // reader went away (e.g. `| head`); stop the session normally
                    log::info!("Output closed; stopping scan");
                    self.output_closed = true;
                    return Flow::Break;
                }
                Err(e) => {
                    self.fatal = Some(e.into());
                    return Flow::Break;
                }
            }
        }
        Flow::Continue
    }
}

#[async_trait]
impl PollStep for ScanStep<'_> {
    async fn poll(&mut self) -> Flow {
        match self.source.next_frame().await {
            Ok(Some(codes)) => {
                let notices = self.controller.dispatch(Command::Frame(codes));
                self.emit(notices)
            }
            Ok(None) => {
                log::debug!("Frame source exhausted");
                Flow::Break
            }
            Err(e) if e.is_transient() => {
                let notices = self.controller.dispatch(Command::FrameFailed(e.to_string()));
                self.emit(notices)
            }
            Err(e) => {
                self.fatal = Some(e);
                Flow::Break
            }
        }
    }
}

/// Run one scanning session over `source`.
///
/// The session is always stopped, so a configured export is written even
/// when polling ends because of shutdown, a closed output or a fatal source
/// error.
pub async fn run_scan(
    source: &mut dyn FrameSource,
    controller: &mut ScanController,
    renderer: &mut dyn Renderer,
    task: &PollingTask,
    shutdown_rx: broadcast::Receiver<()>,
) -> ScanOutcome<RunSummary> {
    log::info!(
        "Polling {} every {:?}",
        source.describe(),
        task.interval()
    );

    let mut step = ScanStep {
        source,
        controller,
        renderer,
        fatal: None,
        output_closed: false,
    };

    let start = step.controller.dispatch(Command::Start);
    step.emit(start);

    let (mut stop_reason, ticks) = if step.fatal.is_none() && !step.output_closed {
        task.run(&mut step, shutdown_rx).await
    } else {
        (StopReason::Completed, 0)
    };
    if step.output_closed {
        stop_reason = StopReason::OutputClosed;
    }

    let stop = step.controller.dispatch(Command::Stop);
    let stats = step.controller.last_stats().unwrap_or_default();
    if step.fatal.is_none() && !step.output_closed {
        step.emit(stop);
    }

    if let Some(e) = step.fatal {
        return Err(e);
    }

    Ok(RunSummary {
        stop_reason,
        ticks,
        stats,
    })
}
