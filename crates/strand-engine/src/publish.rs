//! Double-buffered plan publication.
//!
//! The planner fills a back buffer from the path graph, then swaps it
//! into the shared slot. The swap is the only critical section readers
//! contend on; force computation never holds the lock. The retired front
//! buffer becomes the next back buffer when no reader still holds it, so
//! steady-state publishing reuses its position storage.
//!
//! ```text
//! planner thread                       reader threads
//!   compute forces (no lock)
//!   apply displacements
//!   fill back buffer
//!   lock ─ swap front/back ─ unlock      lock ─ clone Arc ─ unlock
//! ```

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

use strand_core::{PlanPhase, Point2, Pose2};
use strand_path::PathGraph;

// ── PlanSnapshot ─────────────────────────────────────────────────

/// An immutable, consistent view of the chain after one planner update.
///
/// Every point comes from the same relaxation step.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PlanSnapshot {
    version: u64,
    iteration: u64,
    phase: PlanPhase,
    points: Vec<Point2>,
}

impl PlanSnapshot {
    /// Publish counter; 0 for the initial empty snapshot.
    pub fn version(&self) -> u64 {
        self.version
    }

    /// Relaxation steps taken on the chain when this was published.
    pub fn iteration(&self) -> u64 {
        self.iteration
    }

    /// Planner phase when this was published.
    pub fn phase(&self) -> PlanPhase {
        self.phase
    }

    /// Node positions in chain order.
    pub fn points(&self) -> &[Point2] {
        &self.points
    }

    /// Node poses in chain order.
    ///
    /// Each heading points toward the next node; the last pose repeats
    /// the previous heading.
    pub fn poses(&self) -> Vec<Pose2> {
        let mut poses: Vec<Pose2> = self
            .points
            .windows(2)
            .map(|w| Pose2::new(w[0], (w[1] - w[0]).angle()))
            .collect();
        if let Some(&last) = self.points.last() {
            let heading = poses.last().map_or(0.0, |p| p.heading);
            poses.push(Pose2::new(last, heading));
        }
        poses
    }

    /// Number of nodes.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// `true` before any path has been ingested.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

// ── PlanSlot ─────────────────────────────────────────────────────

/// The shared front buffer.
#[derive(Debug, Default)]
struct PlanSlot {
    front: Mutex<Arc<PlanSnapshot>>,
    version: AtomicU64,
}

// Compile-time assertion: readers on other threads share the slot.
const _: fn() = || {
    fn assert<T: Send + Sync>() {}
    assert::<PlanSlot>();
    assert::<PlanReader>();
};

impl PlanSlot {
    fn latest(&self) -> Arc<PlanSnapshot> {
        // The guarded value is a whole `Arc`, never a partial write, so a
        // poisoned lock still holds a consistent snapshot.
        Arc::clone(&self.front.lock().unwrap_or_else(PoisonError::into_inner))
    }

    fn swap(&self, next: Arc<PlanSnapshot>) -> Arc<PlanSnapshot> {
        let version = next.version;
        let prev = {
            let mut front = self.front.lock().unwrap_or_else(PoisonError::into_inner);
            std::mem::replace(&mut *front, next)
        };
        self.version.store(version, Ordering::Release);
        prev
    }
}

// ── PlanReader ───────────────────────────────────────────────────

/// Cloneable handle for reading published plans from any thread.
#[derive(Clone, Debug)]
pub struct PlanReader {
    slot: Arc<PlanSlot>,
}

impl PlanReader {
    /// The most recently published snapshot. Never blocks on relaxation.
    pub fn latest(&self) -> Arc<PlanSnapshot> {
        self.slot.latest()
    }

    /// Version of the most recent snapshot, read without locking.
    pub fn version(&self) -> u64 {
        self.slot.version.load(Ordering::Acquire)
    }
}

// ── PlanBuffers ──────────────────────────────────────────────────

/// Planner-side owner of the front slot and the back buffer.
#[derive(Debug, Default)]
pub(crate) struct PlanBuffers {
    slot: Arc<PlanSlot>,
    back: Option<Arc<PlanSnapshot>>,
    next_version: u64,
}

impl PlanBuffers {
    /// Fill the back buffer from `graph` and make it the front.
    ///
    /// With no graph, publishes an empty plan. Returns the new version.
    pub fn publish(&mut self, graph: Option<&PathGraph>, iteration: u64, phase: PlanPhase) -> u64 {
        self.next_version += 1;
        let mut staged = self
            .back
            .take()
            .and_then(|retired| Arc::try_unwrap(retired).ok())
            .unwrap_or_default();
        staged.version = self.next_version;
        staged.iteration = iteration;
        staged.phase = phase;
        match graph {
            Some(graph) => graph.positions_into(&mut staged.points),
            None => staged.points.clear(),
        }
        self.back = Some(self.slot.swap(Arc::new(staged)));
        self.next_version
    }

    pub fn latest(&self) -> Arc<PlanSnapshot> {
        self.slot.latest()
    }

    pub fn reader(&self) -> PlanReader {
        PlanReader {
            slot: Arc::clone(&self.slot),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strand_core::DetourMode;

    fn graph() -> PathGraph {
        let mut g = PathGraph::ingest(
            &[Point2::new(0.0, 0.0), Point2::new(2.0, 0.0)],
            0.5,
            strand_path::DEFAULT_MAX_NODES,
        )
        .unwrap();
        g.prepare(DetourMode::Right);
        g
    }

    #[test]
    fn initial_snapshot_is_empty_version_zero() {
        let buffers = PlanBuffers::default();
        let snap = buffers.latest();
        assert!(snap.is_empty());
        assert_eq!(snap.version(), 0);
        assert_eq!(snap.phase(), PlanPhase::Unprepared);
        assert_eq!(buffers.reader().version(), 0);
    }

    #[test]
    fn publish_bumps_version_and_copies_positions() {
        let mut buffers = PlanBuffers::default();
        let reader = buffers.reader();
        let g = graph();
        assert_eq!(buffers.publish(Some(&g), 0, PlanPhase::Ready), 1);
        let snap = reader.latest();
        assert_eq!(snap.version(), 1);
        assert_eq!(snap.points(), g.positions().as_slice());
        assert_eq!(reader.version(), 1);
    }

    #[test]
    fn held_snapshot_is_not_overwritten() {
        let mut buffers = PlanBuffers::default();
        let g = graph();
        buffers.publish(Some(&g), 0, PlanPhase::Ready);
        let held = buffers.latest();
        buffers.publish(None, 0, PlanPhase::Unprepared);
        buffers.publish(Some(&g), 3, PlanPhase::Iterating);
        assert_eq!(held.version(), 1);
        assert_eq!(held.len(), g.len());
        assert_eq!(buffers.latest().version(), 3);
        assert_eq!(buffers.latest().iteration(), 3);
    }

    #[test]
    fn poses_head_toward_next_node() {
        let snap = PlanSnapshot {
            points: vec![
                Point2::new(0.0, 0.0),
                Point2::new(1.0, 0.0),
                Point2::new(1.0, 1.0),
            ],
            ..Default::default()
        };
        let poses = snap.poses();
        assert_eq!(poses.len(), 3);
        assert_eq!(poses[0].heading, 0.0);
        assert!((poses[1].heading - std::f64::consts::FRAC_PI_2).abs() < 1e-12);
        assert_eq!(poses[2].heading, poses[1].heading);
        assert_eq!(poses[2].position, Point2::new(1.0, 1.0));
        assert!(PlanSnapshot::default().poses().is_empty());
    }
}
