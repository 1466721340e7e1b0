//! Named planning scenarios.
//!
//! Each [`Scenario`] bundles a grid, an optional cost buffer, a reference
//! path, and a detour side. [`catalog`] returns them in a stable order so
//! benchmark and example output lines up run to run.

use indexmap::IndexMap;
use strand_core::{DetourMode, Point2};
use strand_grid::{CostBuffer, GridGeometry};

use crate::fixtures;

/// One planning problem.
#[derive(Clone, Debug)]
pub struct Scenario {
    pub label: &'static str,
    pub geometry: GridGeometry,
    /// `None` leaves the planner without obstacle information.
    pub cost: Option<CostBuffer>,
    pub path: Vec<Point2>,
    pub mode: DetourMode,
}

fn p(x: f64, y: f64) -> Point2 {
    Point2::new(x, y)
}

/// Straight path across the centred 10x10 grid.
pub fn straight_line() -> Vec<Point2> {
    vec![p(0.0, 0.0), p(9.0, 0.0)]
}

/// Zigzag through the centred 10x10 grid.
pub fn zigzag() -> Vec<Point2> {
    vec![
        p(0.0, 0.0),
        p(2.0, 0.6),
        p(4.0, -0.6),
        p(6.0, 0.6),
        p(8.0, 0.0),
    ]
}

/// Right-angle turn through the centred 10x10 grid.
pub fn l_turn() -> Vec<Point2> {
    vec![p(0.0, -3.0), p(6.0, -3.0), p(6.0, 3.0)]
}

fn scenario(
    label: &'static str,
    geometry: GridGeometry,
    cost: Option<CostBuffer>,
    path: Vec<Point2>,
    mode: DetourMode,
) -> (&'static str, Scenario) {
    (
        label,
        Scenario {
            label,
            geometry,
            cost,
            path,
            mode,
        },
    )
}

/// Every scenario, keyed by label.
pub fn catalog() -> IndexMap<&'static str, Scenario> {
    let g = fixtures::centered_grid();
    let field = GridGeometry::new(80, 80, -1.0, -4.0, 0.1).expect("valid fixture geometry");
    let field_path = vec![p(-0.5, 0.0), p(6.5, 0.0)];
    let scattered =
        fixtures::scattered_obstacles(&field, 120, 42, &[field_path[0], field_path[1]], 0.5);

    [
        scenario("straight-free", g, Some(fixtures::free(&g)), straight_line(), DetourMode::Right),
        scenario("straight-unknown", g, None, straight_line(), DetourMode::Right),
        scenario(
            "block-right",
            g,
            Some(fixtures::inflated_block(&g, (5, 5))),
            straight_line(),
            DetourMode::Right,
        ),
        scenario(
            "block-left",
            g,
            Some(fixtures::inflated_block(&g, (5, 5))),
            straight_line(),
            DetourMode::Left,
        ),
        scenario(
            "lethal-block-right",
            g,
            Some(fixtures::lethal_block(&g, (5, 5))),
            straight_line(),
            DetourMode::Right,
        ),
        scenario("zigzag-free", g, Some(fixtures::free(&g)), zigzag(), DetourMode::Right),
        scenario("l-turn-free", g, Some(fixtures::free(&g)), l_turn(), DetourMode::Left),
        scenario("scattered-right", field, Some(scattered), field_path, DetourMode::Right),
    ]
    .into_iter()
    .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_labels_match_keys() {
        let catalog = catalog();
        assert_eq!(catalog.len(), 8);
        for (key, scenario) in &catalog {
            assert_eq!(*key, scenario.label);
            assert!(scenario.path.len() >= 2);
            if let Some(cost) = &scenario.cost {
                assert_eq!(cost.len(), scenario.geometry.cell_count());
            }
        }
        assert_eq!(catalog.get_index(0).map(|(k, _)| *k), Some("straight-free"));
    }
}
