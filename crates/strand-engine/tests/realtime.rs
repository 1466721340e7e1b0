//! The background planning thread converges and publishes on its own.

use std::thread;
use std::time::{Duration, Instant};

use strand_core::{CostField, DetourMode, PlanPhase};
use strand_engine::{PlanSnapshot, Planner, RealtimeConfig, RealtimePlanner};
use strand_grid::CostView;
use strand_test_utils::{fixtures, scenarios};

fn wait_for_terminal(rt: &RealtimePlanner) -> std::sync::Arc<PlanSnapshot> {
    let deadline = Instant::now() + Duration::from_secs(10);
    loop {
        let snap = rt.latest();
        if snap.phase().is_terminal() {
            return snap;
        }
        assert!(Instant::now() < deadline, "planner did not terminate in time");
        thread::sleep(Duration::from_millis(2));
    }
}

#[test]
fn realtime_planner_converges_around_block() {
    let g = fixtures::centered_grid();
    let cost = fixtures::inflated_block(&g, (5, 5));
    let mut rt = RealtimePlanner::spawn(
        Planner::default(),
        RealtimeConfig {
            plan_rate_hz: 2000.0,
            ..Default::default()
        },
    )
    .unwrap();

    rt.configure(g, DetourMode::Right).unwrap();
    rt.set_cost(cost.clone()).unwrap();
    rt.set_path(scenarios::straight_line()).unwrap();

    let snap = wait_for_terminal(&rt);
    assert_eq!(snap.phase(), PlanPhase::Converged);
    let view = CostView::new(&g, Some(cost.as_slice()));
    assert!(snap.points().iter().all(|&p| view.cost_at(p) < 128.0));
    assert!(snap.points().iter().any(|p| p.y < -1.5));

    let planner = rt.shutdown().unwrap();
    assert_eq!(planner.get_plan().version(), snap.version());
}

#[test]
fn new_path_restarts_planning() {
    let g = fixtures::centered_grid();
    let mut rt = RealtimePlanner::spawn(
        Planner::default(),
        RealtimeConfig {
            plan_rate_hz: 2000.0,
            ..Default::default()
        },
    )
    .unwrap();
    rt.configure(g, DetourMode::Left).unwrap();
    rt.set_cost(fixtures::free(&g)).unwrap();

    rt.set_path(scenarios::straight_line()).unwrap();
    let first = wait_for_terminal(&rt);
    assert_eq!(first.len(), 19);

    rt.set_path(scenarios::zigzag()).unwrap();
    let deadline = Instant::now() + Duration::from_secs(10);
    let second = loop {
        let snap = rt.latest();
        if snap.len() != first.len() && snap.phase().is_terminal() {
            break snap;
        }
        assert!(Instant::now() < deadline, "second path never finished");
        thread::sleep(Duration::from_millis(2));
    };
    assert_eq!(second.phase(), PlanPhase::Converged);
    assert!(second.version() > first.version());
    rt.shutdown();
}
