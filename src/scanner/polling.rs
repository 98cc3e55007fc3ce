//! Fixed-interval polling task
//!
//! Runs an async step once per tick until the step asks to stop or a
//! shutdown is broadcast. The task knows nothing about cameras or windows; it
//! only owns the schedule.

use async_trait::async_trait;
use std::future::Future;
use std::time::Duration;
use tokio::sync::broadcast;
use tokio::time::MissedTickBehavior;

use super::error::{ScanError, ScanOutcome};

/// Default polling interval between two frames
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(100);

/// What the polling task should do after a step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Break,
}

/// Why a polling run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    /// The step returned [`Flow::Break`]
    Completed,
    /// A shutdown signal was received
    Shutdown,
    /// Nobody is reading the output any more
    OutputClosed,
}

/// One unit of work run per tick
#[async_trait]
pub trait PollStep: Send {
    async fn poll(&mut self) -> Flow;
}

#[async_trait]
impl<F, Fut> PollStep for F
where
    F: FnMut() -> Fut + Send,
    Fut: Future<Output = Flow> + Send,
{
    async fn poll(&mut self) -> Flow {
        (self)().await
    }
}

/// Repeats a step at a fixed interval
#[derive(Debug, Clone)]
pub struct PollingTask {
    interval: Duration,
}

impl PollingTask {
    pub fn new(interval: Duration) -> ScanOutcome<Self> {
        if interval.is_zero() {
            return Err(ScanError::Configuration {
                message: "Polling interval must be greater than 0".to_string(),
            });
        }
        Ok(Self { interval })
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Run `step` once per tick. The first tick fires immediately.
    ///
    /// Shutdown is honoured while a step is still pending; the step future is
    /// dropped, so steps must only await cancel-safe operations.
    ///
    /// A late tick is delayed rather than bursted, so a slow step never
    /// causes a flurry of back-to-back polls.
    pub async fn run<S>(
        &self,
        step: &mut S,
        mut shutdown_rx: broadcast::Receiver<()>,
    ) -> (StopReason, u64)
    where
        S: PollStep + ?Sized,
    {
        let mut ticker = tokio::time::interval(self.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        let mut ticks: u64 = 0;

        loop {
            tokio::select! {
                biased;
                // Lagged or closed both mean nobody can un-request shutdown
                _ = shutdown_rx.recv() => {
                    log::debug!("Polling stopped by shutdown after {} ticks", ticks);
                    return (StopReason::Shutdown, ticks);
                }
                _ = ticker.tick() => {}
            }

            ticks += 1;
            // a step may wait on its source indefinitely; shutdown cancels it
            tokio::select! {
                biased;
                _ = shutdown_rx.recv() => {
                    log::debug!("Polling stopped by shutdown during tick {}", ticks);
                    return (StopReason::Shutdown, ticks);
                }
                flow = step.poll() => {
                    if flow == Flow::Break {
                        log::debug!("Polling completed after {} ticks", ticks);
                        return (StopReason::Completed, ticks);
                    }
                }
            }
        }
    }
}
