//! Reusable cost-buffer fixtures.
//!
//! - [`centered_grid`]: 10x10 unit grid with the x axis through its middle row.
//! - [`block`]: a lethal square with optional Chebyshev inflation rings.
//! - [`scattered_obstacles`]: seeded random lethal cells.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use strand_core::Point2;
use strand_grid::{CostBuffer, GridGeometry, FREE, LETHAL};

/// Inflation rings used by [`inflated_block`]: one ring at 200, one at 100.
pub const INFLATION_RINGS: [u8; 2] = [200, 100];

/// 10x10 grid at resolution 1 whose cell centres sit on integer
/// coordinates `x in 0..=9`, `y in -5..=4`. Cell `(5, 5)` is centred on
/// world `(5, 0)`.
pub fn centered_grid() -> GridGeometry {
    GridGeometry::new(10, 10, -0.5, -5.5, 1.0).expect("valid fixture geometry")
}

/// 10x10 grid at resolution 1 with its corner at the world origin.
pub fn corner_grid() -> GridGeometry {
    GridGeometry::new(10, 10, 0.0, 0.0, 1.0).expect("valid fixture geometry")
}

/// All-free buffer for `geometry`.
pub fn free(geometry: &GridGeometry) -> CostBuffer {
    CostBuffer::filled(geometry.cell_count(), FREE)
}

/// A lethal square of side `2 * half + 1` centred on cell `center`,
/// surrounded by rings of decreasing cost.
///
/// A cell at Chebyshev distance `d >= 1` from the square gets
/// `rings[d - 1]` when present, otherwise free.
pub fn block(geometry: &GridGeometry, center: (u32, u32), half: u32, rings: &[u8]) -> CostBuffer {
    let (cc, cr) = (center.0 as i64, center.1 as i64);
    let half = half as i64;
    let mut cells = Vec::with_capacity(geometry.cell_count());
    for row in 0..geometry.height() as i64 {
        for col in 0..geometry.width() as i64 {
            let dx = ((col - cc).abs() - half).max(0);
            let dy = ((row - cr).abs() - half).max(0);
            let d = dx.max(dy) as usize;
            let cost = match d {
                0 => LETHAL,
                d => rings.get(d - 1).copied().unwrap_or(FREE),
            };
            cells.push(cost);
        }
    }
    cells.into()
}

/// A bare 3x3 lethal block centred on cell `center`.
pub fn lethal_block(geometry: &GridGeometry, center: (u32, u32)) -> CostBuffer {
    block(geometry, center, 1, &[])
}

/// A 3x3 lethal block centred on cell `center` with [`INFLATION_RINGS`].
pub fn inflated_block(geometry: &GridGeometry, center: (u32, u32)) -> CostBuffer {
    block(geometry, center, 1, &INFLATION_RINGS)
}

/// `count` random lethal cells, deterministic in `seed`.
///
/// Cells within `clearance` world units of any point in `keep_clear` are
/// left free, so path endpoints never start inside an obstacle.
pub fn scattered_obstacles(
    geometry: &GridGeometry,
    count: usize,
    seed: u64,
    keep_clear: &[Point2],
    clearance: f64,
) -> CostBuffer {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut cells = vec![FREE; geometry.cell_count()];
    if cells.is_empty() {
        return cells.into();
    }
    for _ in 0..count {
        let col = rng.random_range(0..geometry.width());
        let row = rng.random_range(0..geometry.height());
        let center = geometry.cell_center(col, row);
        if keep_clear.iter().any(|p| p.distance(center) < clearance) {
            continue;
        }
        cells[row as usize * geometry.width() as usize + col as usize] = LETHAL;
    }
    cells.into()
}
