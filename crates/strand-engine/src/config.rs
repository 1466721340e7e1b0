//! Relaxation tuning and realtime driver configuration.
//!
//! Distances are expressed in grid cells so a configuration carries over
//! between maps of different resolution. They are converted to world
//! units when a path is ingested (spacing) or prepared (everything else).

use std::time::Duration;

use strand_core::ConfigError;
use strand_path::DEFAULT_MAX_NODES;

// ── RelaxationConfig ──────────────────────────────────────────────

/// Force weights, spacing, and termination thresholds.
#[derive(Clone, Debug, PartialEq)]
pub struct RelaxationConfig {
    /// Node spacing along the reference path, in cells. Default: 0.5.
    pub spacing_cells: f64,
    /// Pull toward the neighbours' midpoint. Default: 0.4.
    pub smoothness: f64,
    /// Pull toward the anchor. Default: 0.05.
    pub fidelity: f64,
    /// Push down the cost gradient. Default: 8.0.
    pub obstacle: f64,
    /// Sideways push toward the detour side near obstacles. Default: 0.3.
    pub detour: f64,
    /// Cost above which the detour force applies. Default: 128.
    pub near_obstacle_cost: u8,
    /// Largest per-node move in one step, in cells. Default: 0.5.
    pub max_step_cells: f64,
    /// Convergence threshold on the largest node move, in cells.
    /// Default: 0.005.
    pub tolerance_cells: f64,
    /// Step budget before the planner aborts. Default: 1000.
    pub max_iterations: u64,
    /// Largest chain a reference path may resample into. Bounds the work
    /// of one step. Default: 65536.
    pub max_nodes: usize,
}

impl Default for RelaxationConfig {
    fn default() -> Self {
        Self {
            spacing_cells: 0.5,
            smoothness: 0.4,
            fidelity: 0.05,
            obstacle: 8.0,
            detour: 0.3,
            near_obstacle_cost: 128,
            max_step_cells: 0.5,
            tolerance_cells: 0.005,
            max_iterations: 1000,
            max_nodes: DEFAULT_MAX_NODES,
        }
    }
}

impl RelaxationConfig {
    /// Check every parameter.
    ///
    /// # Errors
    ///
    /// [`ConfigError::InvalidParameter`] naming the first offending field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        // 1. Spacing must be a usable distance.
        positive("spacing_cells", self.spacing_cells)?;
        // 2. Weights are finite and non-negative.
        non_negative("smoothness", self.smoothness)?;
        non_negative("fidelity", self.fidelity)?;
        non_negative("obstacle", self.obstacle)?;
        non_negative("detour", self.detour)?;
        // 3. The two attracting terms together must not overshoot their
        //    targets in a single step.
        if self.smoothness + self.fidelity > 1.0 {
            return Err(ConfigError::InvalidParameter {
                name: "smoothness",
                reason: format!(
                    "smoothness + fidelity must be <= 1.0, got {}",
                    self.smoothness + self.fidelity
                ),
            });
        }
        // 4. Step clamp and tolerance.
        positive("max_step_cells", self.max_step_cells)?;
        positive("tolerance_cells", self.tolerance_cells)?;
        // 5. At least one step per preparation.
        if self.max_iterations == 0 {
            return Err(ConfigError::InvalidParameter {
                name: "max_iterations",
                reason: "must be >= 1".into(),
            });
        }
        // 6. Room for the two boundary nodes.
        if self.max_nodes < 2 {
            return Err(ConfigError::InvalidParameter {
                name: "max_nodes",
                reason: format!("must be >= 2, got {}", self.max_nodes),
            });
        }
        Ok(())
    }
}

fn positive(name: &'static str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::InvalidParameter {
            name,
            reason: format!("must be finite and > 0, got {value}"),
        })
    }
}

fn non_negative(name: &'static str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ConfigError::InvalidParameter {
            name,
            reason: format!("must be finite and >= 0, got {value}"),
        })
    }
}

// ── RealtimeConfig ────────────────────────────────────────────────

/// Configuration for [`RealtimePlanner`](crate::realtime::RealtimePlanner).
#[derive(Clone, Debug, PartialEq)]
pub struct RealtimeConfig {
    /// Relaxation steps per second. Default: 30.
    pub plan_rate_hz: f64,
    /// Capacity of the bounded command channel. Default: 16.
    pub command_capacity: usize,
}

impl Default for RealtimeConfig {
    fn default() -> Self {
        Self {
            plan_rate_hz: 30.0,
            command_capacity: 16,
        }
    }
}

impl RealtimeConfig {
    /// Check the rate and channel capacity.
    ///
    /// The period `1 / plan_rate_hz` must also fit in a `Duration`, which
    /// rejects rates so small the period would overflow.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let hz = self.plan_rate_hz;
        let period = 1.0 / hz;
        if !hz.is_finite() || hz <= 0.0 || period >= Duration::MAX.as_secs_f64() {
            return Err(ConfigError::InvalidPlanRate { value: hz });
        }
        if self.command_capacity == 0 {
            return Err(ConfigError::InvalidParameter {
                name: "command_capacity",
                reason: "must be >= 1".into(),
            });
        }
        Ok(())
    }
}
