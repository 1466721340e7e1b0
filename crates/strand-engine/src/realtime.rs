//! Background planning thread for hosts that want fixed-rate relaxation.
//!
//! The planner thread owns the [`Planner`] exclusively. Grid, tuning,
//! cost, and path updates arrive over a bounded crossbeam channel at
//! whatever rate the provider produces them; consumers read the latest
//! snapshot through a [`PlanReader`] at their own rate.
//!
//! ```text
//! Provider thread(s)          Planner thread              Consumer thread(s)
//!     |                           |                             |
//!     |--set_cost()/set_path()--->| cmd_rx.try_recv()           |
//!     |   [bounded channel]       | apply command               |
//!     |                           | planner.iterate()           |
//!     |                           | publish snapshot ---------->| reader.latest()
//!     |                           | park(budget - elapsed)      |
//! ```

use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use crossbeam_channel::{Receiver, Sender, TrySendError};
use strand_core::{ConfigError, DetourMode, Point2};
use strand_grid::{CostBuffer, GridGeometry};

use crate::config::{RealtimeConfig, RelaxationConfig};
use crate::planner::Planner;
use crate::publish::{PlanReader, PlanSnapshot};

// ── Error types ──────────────────────────────────────────────────

/// Error sending a command to the planner thread.
#[derive(Debug, PartialEq, Eq)]
pub enum SubmitError {
    /// The planner thread has shut down.
    Shutdown,
    /// The command channel is full (back-pressure).
    ChannelFull,
}

impl fmt::Display for SubmitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Shutdown => write!(f, "planner thread has shut down"),
            Self::ChannelFull => write!(f, "command channel full"),
        }
    }
}

impl std::error::Error for SubmitError {}

/// Error starting the planner thread.
#[derive(Debug)]
pub enum RealtimeError {
    /// The realtime configuration was rejected.
    Config(ConfigError),
    /// The OS refused to spawn the thread.
    Spawn(std::io::Error),
}

impl fmt::Display for RealtimeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Config(e) => write!(f, "realtime configuration error: {e}"),
            Self::Spawn(e) => write!(f, "failed to spawn planner thread: {e}"),
        }
    }
}

impl std::error::Error for RealtimeError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Config(e) => Some(e),
            Self::Spawn(e) => Some(e),
        }
    }
}

impl From<ConfigError> for RealtimeError {
    fn from(e: ConfigError) -> Self {
        Self::Config(e)
    }
}

// ── Commands ─────────────────────────────────────────────────────

/// An update applied by the planner thread before its next step.
#[derive(Debug)]
pub enum PlannerCommand {
    /// Install grid geometry and detour mode.
    Configure {
        /// New geometry.
        geometry: GridGeometry,
        /// New detour side.
        mode: DetourMode,
    },
    /// Replace the relaxation tuning.
    SetConfig(RelaxationConfig),
    /// Ingest and prepare a new reference path.
    SetPath(Vec<Point2>),
    /// Install a fresh cost buffer.
    SetCost(CostBuffer),
}

// ── PlanThreadState ──────────────────────────────────────────────

struct PlanThreadState {
    planner: Planner,
    cmd_rx: Receiver<PlannerCommand>,
    shutdown_flag: Arc<AtomicBool>,
    budget: Duration,
}

impl PlanThreadState {
    fn run(mut self) -> Planner {
        tracing::info!(budget_us = self.budget.as_micros() as u64, "planner thread started");
        while !self.shutdown_flag.load(Ordering::Acquire) {
            let started = Instant::now();

            // 1. Apply pending updates.
            self.drain_command_channel();

            // 2. One bounded relaxation step.
            if self.planner.phase().can_iterate() {
                if let Err(e) = self.planner.iterate() {
                    tracing::warn!(error = %e, "relaxation step rejected");
                }
            }

            // 3. Sleep for the remaining budget. `shutdown` unparks us.
            if let Some(remaining) = self.budget.checked_sub(started.elapsed()) {
                thread::park_timeout(remaining);
            }
        }
        tracing::info!(iterations = self.planner.iteration(), "planner thread stopped");
        self.planner
    }

    fn drain_command_channel(&mut self) {
        while let Ok(cmd) = self.cmd_rx.try_recv() {
            if let Err(e) = self.apply(cmd) {
                tracing::warn!(error = %e, "planner command rejected");
            }
        }
    }

    fn apply(&mut self, cmd: PlannerCommand) -> Result<(), strand_core::PlanError> {
        match cmd {
            PlannerCommand::Configure { geometry, mode } => {
                self.planner.configure_grid(geometry, mode);
            }
            PlannerCommand::SetConfig(config) => self.planner.set_config(config)?,
            PlannerCommand::SetPath(path) => {
                self.planner.ingest(&path)?;
                self.planner.prepare()?;
            }
            PlannerCommand::SetCost(buffer) => self.planner.set_cost(buffer)?,
        }
        Ok(())
    }
}

// ── RealtimePlanner ──────────────────────────────────────────────

/// A [`Planner`] driven by a dedicated background thread.
pub struct RealtimePlanner {
    cmd_tx: Option<Sender<PlannerCommand>>,
    reader: PlanReader,
    shutdown_flag: Arc<AtomicBool>,
    thread: Option<JoinHandle<Planner>>,
}

impl RealtimePlanner {
    /// Move `planner` onto a new thread stepping at `config.plan_rate_hz`.
    pub fn spawn(planner: Planner, config: RealtimeConfig) -> Result<Self, RealtimeError> {
        config.validate()?;
        let budget = Duration::from_secs_f64(1.0 / config.plan_rate_hz);
        let reader = planner.reader();
        let (cmd_tx, cmd_rx) = crossbeam_channel::bounded(config.command_capacity);
        let shutdown_flag = Arc::new(AtomicBool::new(false));

        let state = PlanThreadState {
            planner,
            cmd_rx,
            shutdown_flag: Arc::clone(&shutdown_flag),
            budget,
        };
        let thread = thread::Builder::new()
            .name("strand-plan".into())
            .spawn(move || state.run())
            .map_err(RealtimeError::Spawn)?;

        Ok(Self {
            cmd_tx: Some(cmd_tx),
            reader,
            shutdown_flag,
            thread: Some(thread),
        })
    }

    /// Queue a command for the planner thread. Never blocks.
    pub fn submit(&self, cmd: PlannerCommand) -> Result<(), SubmitError> {
        let cmd_tx = self.cmd_tx.as_ref().ok_or(SubmitError::Shutdown)?;
        cmd_tx.try_send(cmd).map_err(|e| match e {
            TrySendError::Full(_) => SubmitError::ChannelFull,
            TrySendError::Disconnected(_) => SubmitError::Shutdown,
        })
    }

    /// Queue new grid geometry and detour mode.
    pub fn configure(&self, geometry: GridGeometry, mode: DetourMode) -> Result<(), SubmitError> {
        self.submit(PlannerCommand::Configure { geometry, mode })
    }

    /// Queue new relaxation tuning.
    pub fn set_config(&self, config: RelaxationConfig) -> Result<(), SubmitError> {
        self.submit(PlannerCommand::SetConfig(config))
    }

    /// Queue a new reference path; it is ingested and prepared together.
    pub fn set_path(&self, path: Vec<Point2>) -> Result<(), SubmitError> {
        self.submit(PlannerCommand::SetPath(path))
    }

    /// Queue a fresh cost buffer.
    pub fn set_cost(&self, buffer: impl Into<CostBuffer>) -> Result<(), SubmitError> {
        self.submit(PlannerCommand::SetCost(buffer.into()))
    }

    /// A handle for reading plans from other threads.
    pub fn reader(&self) -> PlanReader {
        self.reader.clone()
    }

    /// The most recently published snapshot.
    pub fn latest(&self) -> Arc<PlanSnapshot> {
        self.reader.latest()
    }

    /// `true` until [`shutdown`](Self::shutdown) runs.
    pub fn is_running(&self) -> bool {
        self.thread.is_some()
    }

    /// Stop the planner thread and recover the planner.
    ///
    /// Returns `None` if already shut down or if the thread panicked.
    pub fn shutdown(&mut self) -> Option<Planner> {
        let handle = self.thread.take()?;
        self.shutdown_flag.store(true, Ordering::Release);
        handle.thread().unpark();
        self.cmd_tx.take();
        handle.join().ok()
    }
}

impl Drop for RealtimePlanner {
    fn drop(&mut self) {
        self.shutdown();
    }
}
