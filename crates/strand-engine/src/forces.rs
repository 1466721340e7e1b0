//! The weighted force model acting on one interior node.
//!
//! Four independent terms, each with its own weight:
//!
//! ```text
//! smoothness = w_s * (midpoint(prev, next) - p)
//! fidelity   = w_f * (anchor - p)
//! obstacle   = -w_o * (min(c, LETHAL) / LETHAL) * (grad / LETHAL) * res^2
//! detour     =  w_d * lateral * res            when c > near_obstacle_cost
//! ```
//!
//! The obstacle term is scaled by the normalized local cost, so it
//! vanishes on free cells and saturates at the lethal level. The `res^2`
//! factor turns a per-world-unit gradient into a per-cell step.

use strand_core::{CostField, Point2, Vec2};
use strand_grid::LETHAL;
use strand_path::PathNode;

use crate::config::RelaxationConfig;

const LETHAL_COST: f64 = LETHAL as f64;

/// The four force contributions on one node for one step.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct NodeForces {
    /// Pull toward the neighbours' midpoint.
    pub smoothness: Vec2,
    /// Pull toward the anchor.
    pub fidelity: Vec2,
    /// Push down the cost gradient.
    pub obstacle: Vec2,
    /// Sideways push toward the detour side.
    pub detour: Vec2,
}

impl NodeForces {
    /// Sum the finite contributions.
    ///
    /// Returns the total and the number of contributions dropped for
    /// being non-finite. If the finite terms still overflow, the whole
    /// total is dropped as well.
    pub fn total(&self) -> (Vec2, u32) {
        let mut sum = Vec2::ZERO;
        let mut dropped = 0;
        for term in [self.smoothness, self.fidelity, self.obstacle, self.detour] {
            if term.is_finite() {
                sum += term;
            } else {
                dropped += 1;
            }
        }
        if sum.is_finite() {
            (sum, dropped)
        } else {
            (Vec2::ZERO, dropped + 1)
        }
    }
}

/// Force weights resolved against a grid resolution.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ForceModel {
    smoothness: f64,
    fidelity: f64,
    obstacle: f64,
    detour: f64,
    near_obstacle_cost: f64,
    resolution: f64,
}

impl ForceModel {
    /// Build a model from validated tuning and the grid resolution.
    pub fn new(config: &RelaxationConfig, resolution: f64) -> Self {
        Self {
            smoothness: config.smoothness,
            fidelity: config.fidelity,
            obstacle: config.obstacle,
            detour: config.detour,
            near_obstacle_cost: config.near_obstacle_cost as f64,
            resolution,
        }
    }

    /// Evaluate every term for `node` between neighbours `prev` and `next`.
    pub fn forces<F: CostField + ?Sized>(
        &self,
        prev: Point2,
        node: &PathNode,
        next: Point2,
        field: &F,
    ) -> NodeForces {
        let p = node.position;
        let cost = field.cost_at(p);
        let res = self.resolution;

        let smoothness = (prev.midpoint(next) - p) * self.smoothness;
        let fidelity = -node.offset() * self.fidelity;

        let obstacle = if cost > 0.0 {
            let saturation = cost.min(LETHAL_COST) / LETHAL_COST;
            field.gradient_at(p) * (-self.obstacle * saturation / LETHAL_COST * res * res)
        } else {
            Vec2::ZERO
        };

        let detour = if self.detour_active(cost) {
            node.lateral() * (self.detour * res)
        } else {
            Vec2::ZERO
        };

        NodeForces {
            smoothness,
            fidelity,
            obstacle,
            detour,
        }
    }

    /// `true` if the detour term is active at cost `cost`.
    pub fn detour_active(&self, cost: f64) -> bool {
        cost > self.near_obstacle_cost
    }

    /// `true` if a node at cost `cost` sits on known near-obstacle cost:
    /// above the detour threshold but not unknown or off the grid.
    pub fn blocks_convergence(&self, cost: f64) -> bool {
        self.detour_active(cost) && cost <= LETHAL_COST
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strand_test_utils::MockCostField;

    fn node_at(position: Point2, anchor: Point2) -> PathNode {
        PathNode {
            position,
            anchor,
            tangent: Vec2::new(1.0, 0.0),
            bias: 1.0,
        }
    }

    fn model() -> ForceModel {
        ForceModel::new(&RelaxationConfig::default(), 1.0)
    }

    #[test]
    fn free_field_only_smooths_and_anchors() {
        let field = MockCostField::uniform(0.0);
        let node = node_at(Point2::new(1.0, 1.0), Point2::new(1.0, 0.0));
        let f = model().forces(Point2::new(0.0, 0.0), &node, Point2::new(2.0, 0.0), &field);
        assert!(f.smoothness.distance(Vec2::new(0.0, -0.4)) < 1e-12);
        assert!(f.fidelity.distance(Vec2::new(0.0, -0.05)) < 1e-12);
        assert_eq!(f.obstacle, Vec2::ZERO);
        assert_eq!(f.detour, Vec2::ZERO);
    }

    #[test]
    fn obstacle_pushes_down_gradient() {
        let field = MockCostField::new(127.0, Vec2::new(0.0, 254.0));
        let node = node_at(Point2::new(1.0, 0.0), Point2::new(1.0, 0.0));
        let f = model().forces(Point2::new(0.0, 0.0), &node, Point2::new(2.0, 0.0), &field);
        // -8 * 0.5 * (254 / 254) = -4 along y.
        assert!(f.obstacle.distance(Vec2::new(0.0, -4.0)) < 1e-12);
        assert_eq!(f.detour, Vec2::ZERO, "127 is below the near threshold");
    }

    #[test]
    fn obstacle_saturates_above_lethal() {
        let grad = Vec2::new(100.0, 0.0);
        let node = node_at(Point2::ZERO, Point2::ZERO);
        let lethal = model().forces(Point2::ZERO, &node, Point2::ZERO, &MockCostField::new(254.0, grad));
        let unknown = model().forces(Point2::ZERO, &node, Point2::ZERO, &MockCostField::new(255.0, grad));
        assert_eq!(lethal.obstacle, unknown.obstacle);
    }

    #[test]
    fn detour_follows_lateral_above_threshold() {
        let field = MockCostField::new(200.0, Vec2::ZERO);
        let node = node_at(Point2::new(1.0, 0.0), Point2::new(1.0, 0.0));
        let f = model().forces(Point2::new(0.0, 0.0), &node, Point2::new(2.0, 0.0), &field);
        assert!(f.detour.distance(Vec2::new(0.0, -0.3)) < 1e-12);
        assert!(model().detour_active(200.0));
        assert!(!model().detour_active(128.0));
    }

    #[test]
    fn only_known_high_cost_blocks_convergence() {
        let m = model();
        assert!(m.blocks_convergence(200.0));
        assert!(m.blocks_convergence(LETHAL_COST));
        assert!(!m.blocks_convergence(128.0));
        assert!(!m.blocks_convergence(255.0), "unknown and off-grid cost never blocks");
    }

    #[test]
    fn scales_with_resolution() {
        let field = MockCostField::new(200.0, Vec2::ZERO);
        let coarse = ForceModel::new(&RelaxationConfig::default(), 2.0);
        let node = node_at(Point2::ZERO, Point2::ZERO);
        let f = coarse.forces(Point2::ZERO, &node, Point2::ZERO, &field);
        assert!(f.detour.distance(Vec2::new(0.0, -0.6)) < 1e-12);
    }

    #[test]
    fn non_finite_terms_are_dropped() {
        let forces = NodeForces {
            smoothness: Vec2::new(1.0, 0.0),
            fidelity: Vec2::new(f64::NAN, 0.0),
            obstacle: Vec2::new(0.0, f64::INFINITY),
            detour: Vec2::new(0.0, 2.0),
        };
        assert_eq!(forces.total(), (Vec2::new(1.0, 2.0), 2));
    }

    #[test]
    fn overflowing_sum_is_dropped() {
        let forces = NodeForces {
            smoothness: Vec2::new(f64::MAX, 0.0),
            fidelity: Vec2::new(f64::MAX, 0.0),
            ..Default::default()
        };
        assert_eq!(forces.total(), (Vec2::ZERO, 1));
    }
}
