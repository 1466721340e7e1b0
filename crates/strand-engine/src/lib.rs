//! Relaxation engine for the Strand path planner.
//!
//! [`Planner`] owns the grid adapter and the path graph and exposes the
//! planning lifecycle: `configure`, `ingest`, `prepare`, `set_cost`,
//! `iterate`, and `get_plan`. Each `iterate` call performs one bounded
//! relaxation step and publishes an immutable [`PlanSnapshot`]; any
//! number of [`PlanReader`]s on other threads can fetch the latest
//! snapshot without waiting on force computation.
//!
//! The planner spawns no threads. [`RealtimePlanner`] is an optional host
//! driver that runs a planner on a background thread at a fixed rate.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod config;
pub mod forces;
pub mod metrics;
pub mod planner;
pub mod publish;
pub mod realtime;
pub(crate) mod relax;

pub use config::{RealtimeConfig, RelaxationConfig};
pub use forces::{ForceModel, NodeForces};
pub use metrics::IterateMetrics;
pub use planner::Planner;
pub use publish::{PlanReader, PlanSnapshot};
pub use realtime::{PlannerCommand, RealtimeError, RealtimePlanner, SubmitError};
