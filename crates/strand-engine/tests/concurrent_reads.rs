//! Plan readers on other threads never observe a partially updated chain.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;

use strand_core::{DetourMode, Point2};
use strand_engine::{PlanSnapshot, Planner};
use strand_test_utils::{fixtures, scenarios};

#[test]
fn reader_sees_only_whole_published_steps() {
    let g = fixtures::centered_grid();
    let mut planner = Planner::default();
    planner.configure_grid(g, DetourMode::Right);
    planner.set_cost(fixtures::inflated_block(&g, (5, 5))).unwrap();
    planner.ingest(&scenarios::straight_line()).unwrap();
    planner.prepare().unwrap();

    let reader = planner.reader();
    let done = Arc::new(AtomicBool::new(false));
    let reader_done = Arc::clone(&done);
    let handle = thread::spawn(move || {
        let mut seen: Vec<Arc<PlanSnapshot>> = Vec::new();
        let mut last_version = 0;
        while !reader_done.load(Ordering::Acquire) {
            let snap = reader.latest();
            assert!(snap.version() >= last_version, "versions went backwards");
            if snap.version() != last_version {
                last_version = snap.version();
                seen.push(snap);
            }
        }
        seen
    });

    let mut published: HashMap<u64, Vec<Point2>> = HashMap::new();
    let first = planner.get_plan();
    published.insert(first.version(), first.points().to_vec());
    loop {
        let done_iterating = planner.iterate().unwrap();
        let snap = planner.get_plan();
        published.insert(snap.version(), snap.points().to_vec());
        if done_iterating {
            break;
        }
    }
    done.store(true, Ordering::Release);
    let seen = handle.join().unwrap();

    assert!(!seen.is_empty());
    for snap in seen {
        let expected = published
            .get(&snap.version())
            .unwrap_or_else(|| panic!("reader saw unpublished version {}", snap.version()));
        assert_eq!(snap.points(), expected.as_slice());
    }
}

#[test]
fn readers_outlive_reingest() {
    let g = fixtures::centered_grid();
    let mut planner = Planner::default();
    planner.configure_grid(g, DetourMode::Left);
    planner.ingest(&scenarios::straight_line()).unwrap();
    planner.prepare().unwrap();
    let reader = planner.reader();
    let held = reader.latest();

    planner.ingest(&scenarios::zigzag()).unwrap();
    assert_eq!(held.len(), 19);
    assert_ne!(reader.latest().len(), held.len());
    assert_eq!(reader.version(), planner.get_plan().version());
}
