//! One relaxation step over the whole chain.
//!
//! Displacements are computed from a read-only view of the chain into a
//! separate buffer and applied afterwards, so the result does not depend
//! on traversal order.

use strand_core::{CostField, Vec2};
use strand_path::PathGraph;

use crate::forces::ForceModel;

/// Per-step limits resolved to world units.
#[derive(Clone, Copy, Debug)]
pub(crate) struct StepLimits {
    /// Largest move of any node in one step.
    pub max_step: f64,
    /// Convergence threshold on the largest move.
    pub tolerance: f64,
    /// Step budget.
    pub max_iterations: u64,
}

/// Outcome of [`Relaxation::compute`].
#[derive(Clone, Copy, Debug, Default)]
pub(crate) struct StepReport {
    pub max_displacement: f64,
    pub dropped_contributions: u32,
    pub detour_nodes: u32,
}

/// Damping state and the displacement buffer for one prepared chain.
///
/// Each node carries a step gain starting at 1. When a node's raw force
/// reverses direction between consecutive steps its gain halves. On a
/// piecewise-constant cost grid this stops nodes chattering across a
/// cell boundary and lets the step sizes decay to the tolerance.
///
/// Gains only recover through [`restart_damping`](Self::restart_damping)
/// (a new cost buffer) or [`release_blocked`](Self::release_blocked) (a
/// settled node still resting on high cost).
#[derive(Debug, Default)]
pub(crate) struct Relaxation {
    gains: Vec<f64>,
    last_forces: Vec<Vec2>,
    displacements: Vec<Vec2>,
}

impl Relaxation {
    /// Reset damping for a chain of `len` nodes.
    pub fn reset(&mut self, len: usize) {
        self.gains.clear();
        self.gains.resize(len, 1.0);
        self.last_forces.clear();
        self.last_forces.resize(len, Vec2::ZERO);
        self.displacements.clear();
        self.displacements.resize(len, Vec2::ZERO);
    }

    /// Restore full gain on every node and forget the previous forces.
    ///
    /// Called when the cost data changes underneath a chain, so damping
    /// earned against the old obstacles does not pin nodes against the
    /// new ones.
    pub fn restart_damping(&mut self) {
        self.gains.fill(1.0);
        self.last_forces.fill(Vec2::ZERO);
    }

    /// Restore full gain on interior nodes that rest on known high cost.
    ///
    /// Returns how many nodes were released. A chain with released nodes
    /// has not converged.
    pub fn release_blocked<F: CostField + ?Sized>(
        &mut self,
        graph: &PathGraph,
        field: &F,
        model: &ForceModel,
    ) -> u32 {
        let nodes = graph.nodes();
        let mut released = 0;
        for i in graph.interior() {
            if model.blocks_convergence(field.cost_at(nodes[i].position)) {
                if let Some(gain) = self.gains.get_mut(i) {
                    *gain = 1.0;
                    released += 1;
                }
            }
        }
        released
    }

    /// Compute the displacement of every interior node.
    ///
    /// Boundary entries stay zero.
    pub fn compute<F: CostField + ?Sized>(
        &mut self,
        graph: &PathGraph,
        field: &F,
        model: &ForceModel,
        limits: &StepLimits,
    ) -> StepReport {
        if self.displacements.len() != graph.len() {
            self.reset(graph.len());
        }
        let nodes = graph.nodes();
        let mut report = StepReport::default();

        for i in graph.interior() {
            let node = &nodes[i];
            let forces = model.forces(nodes[i - 1].position, node, nodes[i + 1].position, field);
            let (force, dropped) = forces.total();
            report.dropped_contributions += dropped;
            if forces.detour != Vec2::ZERO {
                report.detour_nodes += 1;
            }

            if force.dot(self.last_forces[i]) < 0.0 {
                self.gains[i] *= 0.5;
            }
            self.last_forces[i] = force;

            let step = (force * self.gains[i]).clamp_length(limits.max_step);
            report.max_displacement = report.max_displacement.max(step.norm());
            self.displacements[i] = step;
        }
        report
    }

    /// Displacements from the last [`compute`](Self::compute).
    pub fn displacements(&self) -> &[Vec2] {
        &self.displacements
    }
}
