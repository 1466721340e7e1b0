//! Time every catalog scenario from preparation to termination.
//!
//! Run with `RUST_LOG=strand_engine=debug` to see per-phase planner logs.

use std::time::Duration;

use strand_bench::{init_tracing, run_to_completion};
use strand_engine::Planner;
use strand_test_utils::scenarios;

const RUNS: u32 = 100;

fn main() {
    init_tracing();
    println!("=== Strand Scenario Timing ({RUNS} runs each) ===\n");
    println!(
        "  {:<20} {:>8} {:>10} {:>10}",
        "scenario", "phase", "iters", "mean ms"
    );

    for (label, scenario) in scenarios::catalog() {
        let mut planner = Planner::default();
        planner.configure_grid(scenario.geometry, scenario.mode);
        if let Some(cost) = scenario.cost.clone() {
            planner.set_cost(cost).unwrap();
        }
        planner.ingest(&scenario.path).unwrap();

        let mut total = Duration::ZERO;
        let mut last = None;
        for _ in 0..RUNS {
            planner.prepare().unwrap();
            let summary = run_to_completion(&mut planner).unwrap();
            total += summary.elapsed;
            last = Some(summary);
        }

        let summary = last.unwrap();
        tracing::info!(label, iterations = summary.iterations, "scenario done");
        println!(
            "  {:<20} {:>8} {:>10} {:>10.3}",
            label,
            summary.phase.to_string(),
            summary.iterations,
            total.as_secs_f64() * 1000.0 / RUNS as f64,
        );
    }
}
