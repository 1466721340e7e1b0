//! Benchmark profiles and utilities for the Strand path planner.
//!
//! Provides pre-built [`Profile`]s for benchmarks and examples:
//!
//! - [`reference_profile`]: 200x200 grid (40K cells), 0.05 m cells
//! - [`stress_profile`]: 1000x1000 grid (1M cells), 0.02 m cells
//! - [`run_to_completion`]: drive a prepared planner until it terminates

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use std::time::{Duration, Instant};

use strand_core::{DetourMode, PlanError, PlanPhase, Point2};
use strand_engine::{Planner, RelaxationConfig};
use strand_grid::{CostBuffer, GridGeometry};
use strand_test_utils::fixtures;

/// A grid, a cost buffer, and a reference path to refine across it.
#[derive(Clone, Debug)]
pub struct Profile {
    /// Grid the cost buffer is laid out on.
    pub geometry: GridGeometry,
    /// Scattered lethal cells plus one inflated block on the path.
    pub cost: CostBuffer,
    /// Straight reference path from west to east.
    pub path: Vec<Point2>,
    /// Side the chain detours to.
    pub mode: DetourMode,
}

/// Build a reference benchmark profile: 200x200 grid (40K cells).
///
/// The map spans 10 m x 10 m. A 9 m reference path runs along the x axis
/// through an inflated block, with 300 seeded lethal cells scattered
/// around it.
pub fn reference_profile(seed: u64) -> Profile {
    build_profile(200, 0.05, 300, seed)
}

/// Build a stress benchmark profile: 1000x1000 grid (1M cells).
///
/// Same extent and layout as [`reference_profile`] at 2.5x the linear
/// resolution, so the chain carries 2.5x the nodes.
pub fn stress_profile(seed: u64) -> Profile {
    build_profile(1000, 0.02, 1500, seed)
}

fn build_profile(side: u32, resolution: f64, obstacles: usize, seed: u64) -> Profile {
    let extent = side as f64 * resolution;
    let geometry = GridGeometry::new(side, side, -0.5, -extent / 2.0, resolution)
        .expect("profile geometry is valid");
    let path = vec![Point2::new(0.0, 0.0), Point2::new(extent - 1.0, 0.0)];

    let scattered = fixtures::scattered_obstacles(&geometry, obstacles, seed, &path, 0.5);
    let center = geometry
        .world_to_cell(Point2::new(path[1].x / 2.0, 0.0))
        .expect("block centre lies on the grid");
    // Half a metre of lethal core, half a metre of inflation.
    let half = (0.25 / resolution).round() as u32;
    let ring_count = (0.5 / resolution).round() as usize;
    let rings: Vec<u8> = (0..ring_count)
        .map(|i| (200 - (190 * i / ring_count.max(1))) as u8)
        .collect();
    let block = fixtures::block(&geometry, center, half, &rings);

    let cells: Vec<u8> = scattered
        .as_slice()
        .iter()
        .zip(block.as_slice())
        .map(|(&a, &b)| a.max(b))
        .collect();

    Profile {
        geometry,
        cost: cells.into(),
        path,
        mode: DetourMode::Right,
    }
}

/// Configure, load, ingest, and prepare a planner for `profile`.
///
/// # Errors
///
/// Whatever the planner reports for the profile's inputs.
pub fn prepared_planner(profile: &Profile, config: RelaxationConfig) -> Result<Planner, PlanError> {
    let mut planner = Planner::new(config)?;
    planner.configure_grid(profile.geometry, profile.mode);
    planner.set_cost(profile.cost.clone())?;
    planner.ingest(&profile.path)?;
    planner.prepare()?;
    Ok(planner)
}

/// Outcome of [`run_to_completion`].
#[derive(Clone, Copy, Debug)]
pub struct RunSummary {
    /// Steps taken since preparation.
    pub iterations: u64,
    /// Terminal phase reached.
    pub phase: PlanPhase,
    /// Wall time spent inside `iterate`.
    pub elapsed: Duration,
}

/// Iterate `planner` until it converges or aborts.
///
/// # Errors
///
/// Propagates [`PlanError`] from [`Planner::iterate`].
pub fn run_to_completion(planner: &mut Planner) -> Result<RunSummary, PlanError> {
    let start = Instant::now();
    while !planner.iterate()? {}
    Ok(RunSummary {
        iterations: planner.iteration(),
        phase: planner.phase(),
        elapsed: start.elapsed(),
    })
}

/// Install a `fmt` subscriber filtered by `RUST_LOG` (default `info`).
///
/// Safe to call more than once; later calls are ignored.
pub fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init();
}
