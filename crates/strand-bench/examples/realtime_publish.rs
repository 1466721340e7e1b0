//! Dual-cadence demo: a slow producer swaps cost maps and paths while a
//! fast consumer polls the published plan.
//!
//! The producer stands in for a costmap updater running at 1 Hz. The
//! consumer stands in for a 30 Hz controller that only ever reads the
//! latest snapshot.

use std::thread;
use std::time::{Duration, Instant};

use strand_bench::{init_tracing, reference_profile};
use strand_core::{DetourMode, Point2};
use strand_engine::{Planner, RealtimeConfig, RealtimePlanner};

fn main() {
    init_tracing();
    println!("=== Strand Realtime Publish Example ===\n");

    let mut rt = RealtimePlanner::spawn(Planner::default(), RealtimeConfig::default()).unwrap();
    let reader = rt.reader();

    let consumer = thread::spawn(move || {
        let start = Instant::now();
        let mut last_version = 0;
        let mut polls = 0u32;
        while start.elapsed() < Duration::from_secs(4) {
            let plan = reader.latest();
            polls += 1;
            if plan.version() != last_version {
                last_version = plan.version();
                if let Some(pose) = plan.poses().get(plan.len() / 2) {
                    println!(
                        "  [{:>5} ms] v{:<4} iter {:>4} {:<10} mid=({:.2}, {:.2})",
                        start.elapsed().as_millis(),
                        plan.version(),
                        plan.iteration(),
                        plan.phase().to_string(),
                        pose.position.x,
                        pose.position.y,
                    );
                }
            }
            thread::sleep(Duration::from_millis(33));
        }
        polls
    });

    for (round, seed) in [42u64, 7, 1234, 99].into_iter().enumerate() {
        let profile = reference_profile(seed);
        let mode = if round % 2 == 0 {
            DetourMode::Right
        } else {
            DetourMode::Left
        };
        tracing::info!(round, seed, %mode, "producer update");
        rt.configure(profile.geometry, mode).unwrap();
        rt.set_cost(profile.cost).unwrap();
        // Nudge the goal each round so the chain restarts from a new reference.
        let mut path = profile.path;
        if let Some(goal) = path.last_mut() {
            *goal = Point2::new(goal.x - round as f64 * 0.5, goal.y);
        }
        rt.set_path(path).unwrap();
        thread::sleep(Duration::from_secs(1));
    }

    let polls = consumer.join().unwrap();
    let planner = rt.shutdown().unwrap();
    println!(
        "\nConsumer polled {polls} times; final plan v{} ({})",
        planner.get_plan().version(),
        planner.phase()
    );
}
