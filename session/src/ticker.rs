//! Periodic tick sources that drive the movement loop.

use std::{
    io,
    sync::mpsc::{self, Receiver, RecvTimeoutError, Sender},
    thread::{self, JoinHandle},
    time::Duration,
};

use thiserror::Error;
use tracing::debug;

/// Source of movement ticks owned by a game session.
pub trait TickSource {
    /// Returns how many ticks fired since the previous poll.
    ///
    /// A stopped source always reports zero.
    fn poll_ticks(&mut self) -> u32;

    /// Stops future ticks and releases the source's resources.
    fn stop(&mut self);

    /// Reports whether the source still fires ticks.
    fn is_running(&self) -> bool;
}

/// Failures raised while starting a tick source.
#[derive(Debug, Error)]
pub enum TickerError {
    /// The interval must be longer than zero.
    #[error("tick interval must be positive")]
    ZeroInterval,
    /// The background timer thread could not be spawned.
    #[error("failed to spawn the tick thread")]
    Spawn(#[from] io::Error),
}

/// Tick source backed by a timer thread that fires at a fixed interval.
#[derive(Debug)]
pub struct IntervalTicker {
    interval: Duration,
    ticks: Receiver<()>,
    shutdown: Option<Sender<()>>,
    worker: Option<JoinHandle<()>>,
}

impl IntervalTicker {
    /// Starts firing ticks every `interval`.
    pub fn start(interval: Duration) -> Result<Self, TickerError> {
        if interval.is_zero() {
            return Err(TickerError::ZeroInterval);
        }

        let (tick_tx, ticks) = mpsc::channel();
        let (shutdown, shutdown_rx) = mpsc::channel::<()>();
        let worker = thread::Builder::new()
            .name("snake-ticker".into())
            .spawn(move || loop {
                match shutdown_rx.recv_timeout(interval) {
                    Err(RecvTimeoutError::Timeout) => {
                        if tick_tx.send(()).is_err() {
                            break;
                        }
                    }
                    Ok(()) | Err(RecvTimeoutError::Disconnected) => break,
                }
            })?;

        debug!(interval_ms = interval.as_millis() as u64, "ticker started");
        Ok(Self {
            interval,
            ticks,
            shutdown: Some(shutdown),
            worker: Some(worker),
        })
    }

    /// Starts firing ticks at `updates_per_second`.
    pub fn with_rate(updates_per_second: u32) -> Result<Self, TickerError> {
        if updates_per_second == 0 {
            return Err(TickerError::ZeroInterval);
        }
        Self::start(Duration::from_micros(
            1_000_000 / u64::from(updates_per_second),
        ))
    }

    /// Interval between two ticks.
    #[must_use]
    pub const fn interval(&self) -> Duration {
        self.interval
    }

    /// Blocks until the next tick fires or `timeout` elapses.
    ///
    /// Returns whether a tick was consumed.
    pub fn wait_tick(&mut self, timeout: Duration) -> bool {
        self.worker.is_some() && self.ticks.recv_timeout(timeout).is_ok()
    }
}

impl TickSource for IntervalTicker {
    fn poll_ticks(&mut self) -> u32 {
        if self.worker.is_none() {
            return 0;
        }
        let fired = self.ticks.try_iter().count();
        u32::try_from(fired).unwrap_or(u32::MAX)
    }

    fn stop(&mut self) {
        if let Some(shutdown) = self.shutdown.take() {
            let _ = shutdown.send(());
        }
        if let Some(worker) = self.worker.take() {
            let _ = worker.join();
            debug!("ticker stopped");
        }
        let _ = self.ticks.try_iter().count();
    }

    fn is_running(&self) -> bool {
        self.worker.is_some()
    }
}

impl Drop for IntervalTicker {
    fn drop(&mut self) {
        self.stop();
    }
}

/// Tick source fired by hand, for tests and stepped replays.
#[derive(Debug)]
pub struct ManualTicker {
    pending: u32,
    running: bool,
}

impl ManualTicker {
    /// Creates a running ticker with no pending ticks.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            pending: 0,
            running: true,
        }
    }

    /// Queues `count` ticks for the next poll. Ignored once stopped.
    pub fn fire(&mut self, count: u32) {
        if self.running {
            self.pending = self.pending.saturating_add(count);
        }
    }
}

impl Default for ManualTicker {
    fn default() -> Self {
        Self::new()
    }
}

impl TickSource for ManualTicker {
    fn poll_ticks(&mut self) -> u32 {
        std::mem::take(&mut self.pending)
    }

    fn stop(&mut self) {
        self.running = false;
        self.pending = 0;
    }

    fn is_running(&self) -> bool {
        self.running
    }
}
