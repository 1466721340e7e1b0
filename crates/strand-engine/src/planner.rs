//! The planner: lifecycle state machine over grid, chain, and relaxation.

use std::sync::Arc;
use std::time::Instant;

use strand_core::{ConfigError, DetourMode, PlanError, PlanPhase, Point2};
use strand_grid::{CostBuffer, GridAdapter, GridGeometry};
use strand_path::PathGraph;

use crate::config::RelaxationConfig;
use crate::forces::ForceModel;
use crate::metrics::IterateMetrics;
use crate::publish::{PlanBuffers, PlanReader, PlanSnapshot};
use crate::relax::{Relaxation, StepLimits};

/// Tuning resolved against the grid at `prepare` time.
#[derive(Clone, Copy, Debug)]
struct Session {
    model: ForceModel,
    limits: StepLimits,
}

/// Anytime path-refinement planner.
///
/// Call order: [`configure`](Self::configure), then
/// [`ingest`](Self::ingest), then [`prepare`](Self::prepare), then
/// [`iterate`](Self::iterate) repeatedly. [`set_cost`](Self::set_cost)
/// may be called at any point after `configure`; each step reads the
/// most recently installed buffer. [`get_plan`](Self::get_plan) and any
/// [`PlanReader`] work in every phase.
///
/// Every fallible call either applies its whole effect or fails before
/// touching state.
///
/// # Examples
///
/// ```
/// use strand_core::{DetourMode, Point2};
/// use strand_engine::Planner;
///
/// let mut planner = Planner::default();
/// planner.configure(10, 10, 0.0, 0.0, 1.0, DetourMode::Right)?;
/// planner.set_cost(vec![0u8; 100])?;
/// planner.ingest(&[Point2::new(0.0, 0.0), Point2::new(9.0, 0.0)])?;
/// planner.prepare()?;
/// while !planner.iterate()? {}
/// assert_eq!(planner.get_plan().len(), 19);
/// # Ok::<(), strand_core::PlanError>(())
/// ```
#[derive(Debug, Default)]
pub struct Planner {
    config: RelaxationConfig,
    grid: GridAdapter,
    graph: Option<PathGraph>,
    session: Option<Session>,
    phase: PlanPhase,
    iteration: u64,
    relax: Relaxation,
    buffers: PlanBuffers,
    metrics: IterateMetrics,
}

impl Planner {
    /// Create a planner with validated tuning.
    pub fn new(config: RelaxationConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            config,
            ..Self::default()
        })
    }

    // ── Configuration ────────────────────────────────────────────

    /// Install grid geometry and detour mode.
    ///
    /// A new detour mode takes effect at the next [`prepare`](Self::prepare).
    /// A changed geometry releases the installed cost buffer.
    pub fn configure(
        &mut self,
        width: u32,
        height: u32,
        origin_x: f64,
        origin_y: f64,
        resolution: f64,
        mode: DetourMode,
    ) -> Result<(), ConfigError> {
        let geometry = GridGeometry::new(width, height, origin_x, origin_y, resolution)?;
        self.configure_grid(geometry, mode);
        Ok(())
    }

    /// Install an already validated geometry and detour mode.
    pub fn configure_grid(&mut self, geometry: GridGeometry, mode: DetourMode) {
        self.grid.configure(geometry, mode);
    }

    /// Replace the tuning.
    ///
    /// Spacing applies from the next [`ingest`](Self::ingest); weights and
    /// thresholds from the next [`prepare`](Self::prepare).
    pub fn set_config(&mut self, config: RelaxationConfig) -> Result<(), ConfigError> {
        config.validate()?;
        self.config = config;
        Ok(())
    }

    /// Install the current cost buffer. Does not copy the bytes.
    ///
    /// A buffer other than the installed one restarts step damping, and a
    /// [`PlanPhase::Converged`] chain resumes relaxing against the new
    /// costs. An [`PlanPhase::Aborted`] chain stays aborted; its budget is
    /// spent. Re-installing the same buffer changes nothing.
    ///
    /// # Errors
    ///
    /// [`ConfigError::Unconfigured`] before `configure`, or
    /// [`ConfigError::CostBufferSize`] if the length is not
    /// `width * height`.
    pub fn set_cost(&mut self, buffer: impl Into<CostBuffer>) -> Result<(), ConfigError> {
        let buffer = buffer.into();
        let fresh = self.grid.cost().is_none_or(|current| !current.ptr_eq(&buffer));
        self.grid.set_cost(buffer)?;
        if !fresh || self.session.is_none() {
            return Ok(());
        }

        self.relax.restart_damping();
        if self.phase == PlanPhase::Converged {
            self.phase = PlanPhase::Iterating;
            tracing::debug!(
                iteration = self.iteration,
                "cost changed after convergence, resuming"
            );
            self.buffers
                .publish(self.graph.as_ref(), self.iteration, self.phase);
        }
        Ok(())
    }

    // ── Lifecycle ────────────────────────────────────────────────

    /// Resample a reference path into a fresh chain.
    ///
    /// Abandons any in-progress relaxation and returns to
    /// [`PlanPhase::Unprepared`]. The new, unrelaxed chain is published.
    ///
    /// # Errors
    ///
    /// - [`PlanError::Config`] with [`ConfigError::Unconfigured`] before
    ///   `configure`.
    /// - [`PlanError::EmptyPath`] for fewer than two points.
    /// - [`PlanError::NonFinitePoint`] for NaN or infinite coordinates.
    /// - [`PlanError::PathTooLong`] if the chain would exceed
    ///   [`RelaxationConfig::max_nodes`].
    pub fn ingest(&mut self, path: &[Point2]) -> Result<(), PlanError> {
        let geometry = self.grid.geometry().ok_or(ConfigError::Unconfigured)?;
        let spacing = self.config.spacing_cells * geometry.resolution();
        let graph = PathGraph::ingest(path, spacing, self.config.max_nodes)?;

        self.graph = Some(graph);
        self.session = None;
        self.phase = PlanPhase::Unprepared;
        self.iteration = 0;
        self.metrics = IterateMetrics::default();
        self.buffers
            .publish(self.graph.as_ref(), self.iteration, self.phase);
        Ok(())
    }

    /// Tag the chain with the detour side and reset it onto its anchors.
    ///
    /// Valid in any phase once a path has been ingested; preparing again
    /// restarts relaxation from the anchors.
    ///
    /// # Errors
    ///
    /// [`PlanError::NotPrepared`] if no path has been ingested.
    pub fn prepare(&mut self) -> Result<(), PlanError> {
        let phase = self.phase;
        let graph = self.graph.as_mut().ok_or(PlanError::NotPrepared {
            operation: "prepare",
            phase,
        })?;
        let resolution = self
            .grid
            .geometry()
            .map(GridGeometry::resolution)
            .ok_or(ConfigError::Unconfigured)?;

        let mode = self.grid.mode();
        graph.prepare(mode);
        self.relax.reset(graph.len());
        self.session = Some(Session {
            model: ForceModel::new(&self.config, resolution),
            limits: StepLimits {
                max_step: self.config.max_step_cells * resolution,
                tolerance: self.config.tolerance_cells * resolution,
                max_iterations: self.config.max_iterations,
            },
        });
        tracing::debug!(nodes = graph.len(), %mode, "chain prepared");

        self.phase = PlanPhase::Ready;
        self.iteration = 0;
        self.metrics = IterateMetrics::default();
        self.buffers
            .publish(self.graph.as_ref(), self.iteration, self.phase);
        Ok(())
    }

    /// Perform one relaxation step and publish the result.
    ///
    /// Returns `true` once the chain is terminal: converged, or out of
    /// iteration budget. Later calls keep returning `true` without
    /// touching the chain until a new path is ingested or prepared.
    ///
    /// # Errors
    ///
    /// [`PlanError::NotPrepared`] in [`PlanPhase::Unprepared`].
    pub fn iterate(&mut self) -> Result<bool, PlanError> {
        if self.phase.is_terminal() {
            return Ok(true);
        }
        let phase = self.phase;
        let (graph, session) = match (self.graph.as_mut(), self.session.as_ref()) {
            (Some(graph), Some(session)) if phase.can_iterate() => (graph, session),
            _ => {
                return Err(PlanError::NotPrepared {
                    operation: "iterate",
                    phase,
                })
            }
        };
        let view = self.grid.view().ok_or(ConfigError::Unconfigured)?;

        let started = Instant::now();
        let report = self
            .relax
            .compute(graph, &view, &session.model, &session.limits);
        graph.apply(self.relax.displacements());
        let compute_us = started.elapsed().as_micros() as u64;

        // A settled chain with nodes still on near-obstacle cost has only
        // run out of gain; lift their damping and keep going.
        let settled = report.max_displacement < session.limits.tolerance;
        let released = if settled {
            self.relax.release_blocked(graph, &view, &session.model)
        } else {
            0
        };

        self.iteration += 1;
        self.phase = if settled && released == 0 {
            PlanPhase::Converged
        } else if self.iteration >= session.limits.max_iterations {
            PlanPhase::Aborted
        } else {
            PlanPhase::Iterating
        };

        let publish_started = Instant::now();
        self.buffers
            .publish(self.graph.as_ref(), self.iteration, self.phase);
        let publish_us = publish_started.elapsed().as_micros() as u64;

        self.metrics = IterateMetrics {
            iteration: self.iteration,
            max_displacement: report.max_displacement,
            dropped_contributions: report.dropped_contributions,
            detour_nodes: report.detour_nodes,
            released_nodes: released,
            compute_us,
            publish_us,
        };

        if report.dropped_contributions > 0 {
            tracing::debug!(
                iteration = self.iteration,
                dropped = report.dropped_contributions,
                "dropped non-finite force contributions"
            );
        }
        tracing::trace!(
            iteration = self.iteration,
            max_displacement = report.max_displacement,
            detour_nodes = report.detour_nodes,
            released_nodes = released,
            compute_us,
            "relaxation step"
        );
        match self.phase {
            PlanPhase::Converged => tracing::info!(
                iterations = self.iteration,
                max_displacement = report.max_displacement,
                "relaxation converged"
            ),
            PlanPhase::Aborted => tracing::warn!(
                iterations = self.iteration,
                max_displacement = report.max_displacement,
                "iteration budget exhausted before convergence"
            ),
            _ => {}
        }

        Ok(self.phase.is_terminal())
    }

    // ── Queries ──────────────────────────────────────────────────

    /// The most recently published plan. Never fails; empty before the
    /// first ingest.
    pub fn get_plan(&self) -> Arc<PlanSnapshot> {
        self.buffers.latest()
    }

    /// A handle for reading plans from other threads.
    pub fn reader(&self) -> PlanReader {
        self.buffers.reader()
    }

    /// Current lifecycle phase.
    pub fn phase(&self) -> PlanPhase {
        self.phase
    }

    /// Steps taken on the current chain.
    pub fn iteration(&self) -> u64 {
        self.iteration
    }

    /// Metrics from the most recent step.
    pub fn last_metrics(&self) -> &IterateMetrics {
        &self.metrics
    }

    /// Active tuning.
    pub fn config(&self) -> &RelaxationConfig {
        &self.config
    }

    /// Grid adapter, for cost queries against the installed buffer.
    pub fn grid(&self) -> &GridAdapter {
        &self.grid
    }

    /// The working chain, if a path has been ingested.
    pub fn graph(&self) -> Option<&PathGraph> {
        self.graph.as_ref()
    }
}
