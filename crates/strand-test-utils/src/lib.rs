//! Test utilities and mock types for Strand development.
//!
//! Provides a [`MockCostField`] for driving the force model without a
//! grid, cost-buffer [`fixtures`], and a catalog of named planning
//! [`scenarios`] shared by integration tests, benchmarks, and examples.

#![forbid(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod fixtures;
pub mod scenarios;

use strand_core::{CostField, Point2, Vec2};

/// Mock implementation of [`CostField`].
///
/// Reports the same cost and gradient everywhere.
#[derive(Clone, Copy, Debug)]
pub struct MockCostField {
    pub cost: f64,
    pub gradient: Vec2,
    pub resolution: f64,
}

impl MockCostField {
    pub fn new(cost: f64, gradient: Vec2) -> Self {
        Self {
            cost,
            gradient,
            resolution: 1.0,
        }
    }

    /// Constant cost with zero gradient.
    pub fn uniform(cost: f64) -> Self {
        Self::new(cost, Vec2::ZERO)
    }
}

impl CostField for MockCostField {
    fn cost_at(&self, _p: Point2) -> f64 {
        self.cost
    }

    fn gradient_at(&self, _p: Point2) -> Vec2 {
        self.gradient
    }

    fn resolution(&self) -> f64 {
        self.resolution
    }
}
