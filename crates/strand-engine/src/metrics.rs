//! Per-iteration metrics for the relaxation engine.

/// Measurements from the most recent `iterate` call that did work.
///
/// Durations are in microseconds.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct IterateMetrics {
    /// Steps taken on the current chain, including this one.
    pub iteration: u64,
    /// Largest node move this step, in world units.
    pub max_displacement: f64,
    /// Non-finite force contributions dropped this step.
    pub dropped_contributions: u32,
    /// Interior nodes whose detour term was active.
    pub detour_nodes: u32,
    /// Settled nodes whose damping was lifted because they still rest on
    /// near-obstacle cost.
    pub released_nodes: u32,
    /// Time spent computing and applying displacements.
    pub compute_us: u64,
    /// Time spent publishing the snapshot.
    pub publish_us: u64,
}
