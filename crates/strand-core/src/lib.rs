//! Core types and traits for the Strand path-refinement planner.
//!
//! This is the leaf crate with zero internal dependencies. It defines
//! the planar geometry primitives, the detour and phase enumerations,
//! the [`CostField`] trait that decouples relaxation from grid storage,
//! and the error taxonomy shared by every other crate.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod error;
pub mod geometry;
pub mod mode;
pub mod traits;

pub use error::{ConfigError, PlanError};
pub use geometry::{Point2, Pose2, Vec2};
pub use mode::{DetourMode, PlanPhase};
pub use traits::CostField;
