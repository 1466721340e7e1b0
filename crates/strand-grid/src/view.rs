//! Borrowed per-cycle view over geometry and cost bytes.

use strand_core::{CostField, Point2, Vec2};

use crate::cost::OUT_OF_BOUNDS_COST;
use crate::geometry::GridGeometry;

/// A read-only view of the grid for one planning cycle.
///
/// With no cost bytes installed every query reports zero cost and zero
/// gradient: no obstacle information yet.
///
/// # Gradient
///
/// ```text
/// gx = (cost(x + res, y) - cost(x - res, y)) / (2 * res)
/// gy = (cost(x, y + res) - cost(x, y - res)) / (2 * res)
/// ```
///
/// An axis component is zero when either of its samples falls outside
/// the grid, so edges never extrapolate the out-of-bounds cost.
#[derive(Clone, Copy, Debug)]
pub struct CostView<'a> {
    geometry: &'a GridGeometry,
    cells: Option<&'a [u8]>,
}

impl<'a> CostView<'a> {
    /// Build a view. `cells`, when present, must hold
    /// `geometry.cell_count()` bytes; shorter slices read as out of bounds
    /// past their end.
    pub fn new(geometry: &'a GridGeometry, cells: Option<&'a [u8]>) -> Self {
        Self { geometry, cells }
    }

    /// The geometry this view reads through.
    pub fn geometry(&self) -> &GridGeometry {
        self.geometry
    }

    /// `true` if cost bytes are installed.
    pub fn has_costs(&self) -> bool {
        self.cells.is_some()
    }

    /// Raw byte at `p`, or `None` if `p` is outside the grid or no
    /// bytes are installed.
    pub fn cell_cost(&self, p: Point2) -> Option<u8> {
        let cells = self.cells?;
        let idx = self.geometry.world_to_index(p)?;
        cells.get(idx).copied()
    }

    fn central_difference(&self, lo: Point2, hi: Point2) -> f64 {
        match (self.cell_cost(lo), self.cell_cost(hi)) {
            (Some(a), Some(b)) => (b as f64 - a as f64) / (2.0 * self.geometry.resolution()),
            _ => 0.0,
        }
    }
}

impl CostField for CostView<'_> {
    fn cost_at(&self, p: Point2) -> f64 {
        if self.cells.is_none() {
            return 0.0;
        }
        self.cell_cost(p)
            .map_or(OUT_OF_BOUNDS_COST, |c| c as f64)
    }

    fn gradient_at(&self, p: Point2) -> Vec2 {
        if self.cells.is_none() {
            return Vec2::ZERO;
        }
        let r = self.geometry.resolution();
        Vec2::new(
            self.central_difference(p - Vec2::new(r, 0.0), p + Vec2::new(r, 0.0)),
            self.central_difference(p - Vec2::new(0.0, r), p + Vec2::new(0.0, r)),
        )
    }

    fn resolution(&self) -> f64 {
        self.geometry.resolution()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cost::LETHAL;
    use proptest::prelude::*;

    /// 5x5 grid, resolution 1, with a ramp rising along +x: cost = 10 * col.
    fn ramp() -> (GridGeometry, Vec<u8>) {
        let g = GridGeometry::new(5, 5, 0.0, 0.0, 1.0).unwrap();
        let cells = (0..25).map(|i| (i % 5) as u8 * 10).collect();
        (g, cells)
    }

    #[test]
    fn no_buffer_reads_as_free() {
        let g = GridGeometry::new(5, 5, 0.0, 0.0, 1.0).unwrap();
        let view = CostView::new(&g, None);
        assert_eq!(view.cost_at(Point2::new(2.5, 2.5)), 0.0);
        assert_eq!(view.cost_at(Point2::new(-50.0, 2.5)), 0.0);
        assert_eq!(view.gradient_at(Point2::new(2.5, 2.5)), Vec2::ZERO);
    }

    #[test]
    fn out_of_bounds_is_maximal_hazard() {
        let (g, cells) = ramp();
        let view = CostView::new(&g, Some(&cells));
        assert_eq!(view.cost_at(Point2::new(5.0, 0.0)), OUT_OF_BOUNDS_COST);
        assert_eq!(view.cost_at(Point2::new(0.0, -0.1)), OUT_OF_BOUNDS_COST);
        assert_eq!(view.cost_at(Point2::new(f64::NAN, 1.0)), OUT_OF_BOUNDS_COST);
    }

    #[test]
    fn cost_is_stored_byte() {
        let (g, cells) = ramp();
        let view = CostView::new(&g, Some(&cells));
        assert_eq!(view.cost_at(Point2::new(3.2, 1.7)), 30.0);
    }

    #[test]
    fn gradient_follows_ramp() {
        let (g, cells) = ramp();
        let view = CostView::new(&g, Some(&cells));
        let grad = view.gradient_at(Point2::new(2.5, 2.5));
        assert_eq!(grad, Vec2::new(10.0, 0.0));
    }

    #[test]
    fn gradient_is_zero_at_edges() {
        let (g, cells) = ramp();
        let view = CostView::new(&g, Some(&cells));
        // x - 1 falls off the left edge; y samples stay inside.
        let grad = view.gradient_at(Point2::new(0.5, 2.5));
        assert_eq!(grad, Vec2::ZERO);
        let grad = view.gradient_at(Point2::new(4.5, 0.5));
        assert_eq!(grad.x, 0.0);
    }

    #[test]
    fn gradient_scales_with_resolution() {
        let g = GridGeometry::new(5, 5, 0.0, 0.0, 0.5).unwrap();
        let mut cells = vec![0u8; 25];
        cells[2 * 5 + 3] = LETHAL;
        let view = CostView::new(&g, Some(&cells));
        // Centre of cell (2, 2); the +x sample lands in the lethal cell.
        let grad = view.gradient_at(g.cell_center(2, 2));
        assert_eq!(grad, Vec2::new(LETHAL as f64 / 1.0, 0.0));
    }

    proptest! {
        #[test]
        fn every_query_is_finite(x in -20.0f64..20.0, y in -20.0f64..20.0) {
            let (g, cells) = ramp();
            let view = CostView::new(&g, Some(&cells));
            let p = Point2::new(x, y);
            prop_assert!(view.cost_at(p).is_finite());
            prop_assert!(view.gradient_at(p).is_finite());
            if !g.contains(p) {
                prop_assert_eq!(view.cost_at(p), OUT_OF_BOUNDS_COST);
            }
        }
    }
}
