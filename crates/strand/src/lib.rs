//! Strand: anytime path refinement over occupancy grids.
//!
//! This is the top-level facade crate that re-exports the public API from
//! all Strand sub-crates. For most users, adding `strand` as a single
//! dependency is sufficient.
//!
//! # Quick start
//!
//! ```rust
//! use strand::prelude::*;
//!
//! // 10x10 unit grid centred on the x axis, with a lethal cell in the way.
//! let mut cost = vec![0u8; 100];
//! cost[5 * 10 + 5] = 254;
//!
//! let mut planner = Planner::new(RelaxationConfig::default())?;
//! planner.configure(10, 10, -0.5, -5.5, 1.0, DetourMode::Right)?;
//! planner.set_cost(cost)?;
//! planner.ingest(&[Point2::new(0.0, 0.0), Point2::new(9.0, 0.0)])?;
//! planner.prepare()?;
//!
//! // Any thread can hold a reader and poll it while we iterate.
//! let reader = planner.reader();
//! while !planner.iterate()? {}
//!
//! let plan = reader.latest();
//! assert!(plan.phase().is_terminal());
//! assert_eq!(plan.points()[0], Point2::new(0.0, 0.0));
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! # Modules
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`types`] | `strand-core` | Geometry, detour mode, phases, errors, `CostField` |
//! | [`grid`] | `strand-grid` | Grid geometry, cost buffers, cost views |
//! | [`path`] | `strand-path` | Resampling and the path chain |
//! | [`engine`] | `strand-engine` | Planner, snapshots, realtime driver |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Core types, traits, and errors (`strand-core`).
pub use strand_core as types;

/// Grid geometry and cost queries (`strand-grid`).
///
/// [`grid::GridAdapter`] holds the session's geometry and current
/// [`grid::CostBuffer`]; [`grid::CostView`] is the per-cycle borrowed view.
pub use strand_grid as grid;

/// Deformable path chain (`strand-path`).
pub use strand_path as path;

/// Relaxation engine (`strand-engine`).
///
/// [`engine::Planner`] for caller-driven stepping,
/// [`engine::RealtimePlanner`] for a background planning thread.
pub use strand_engine as engine;

/// Common imports for typical Strand usage.
///
/// ```rust
/// use strand::prelude::*;
/// ```
pub mod prelude {
    // Core types and traits
    pub use strand_core::{CostField, DetourMode, PlanPhase, Point2, Pose2, Vec2};

    // Errors
    pub use strand_core::{ConfigError, PlanError};

    // Grid
    pub use strand_grid::{CostBuffer, GridGeometry};

    // Engine
    pub use strand_engine::{
        IterateMetrics, PlanReader, PlanSnapshot, Planner, RealtimeConfig, RealtimePlanner,
        RelaxationConfig, SubmitError,
    };
}
