//! Core abstraction trait for cost queries.

use crate::geometry::{Point2, Vec2};

/// Read-only obstacle-cost queries in world coordinates.
///
/// Implemented by the grid adapter's per-cycle view. The relaxation
/// engine reads costs exclusively through this trait, so tests can drive
/// it with synthetic fields.
pub trait CostField {
    /// Obstacle cost at a world position.
    ///
    /// Higher is more hazardous. Positions outside the field report the
    /// field's out-of-bounds cost rather than failing.
    fn cost_at(&self, p: Point2) -> f64;

    /// Cost change per world unit along x and y at `p`.
    fn gradient_at(&self, p: Point2) -> Vec2;

    /// World units per cell.
    fn resolution(&self) -> f64;
}

impl<T: CostField + ?Sized> CostField for &T {
    fn cost_at(&self, p: Point2) -> f64 {
        (**self).cost_at(p)
    }

    fn gradient_at(&self, p: Point2) -> Vec2 {
        (**self).gradient_at(p)
    }

    fn resolution(&self) -> f64 {
        (**self).resolution()
    }
}
