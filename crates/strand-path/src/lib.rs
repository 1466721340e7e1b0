//! Deformable path representation for the Strand planner.
//!
//! A [`PathGraph`] is an ordered chain of [`PathNode`]s produced by
//! [`resample`]-ing a reference path at fixed spacing. Each node keeps
//! its anchor (the resampled reference position) and, once prepared, a
//! lateral bias toward the configured detour side.
//!
//! Chain topology is fixed at ingest: nodes never reorder, merge, or
//! split. Relaxation only moves interior node positions; the two
//! boundary nodes stay pinned to their anchors.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod graph;
pub mod node;
pub mod resample;

pub use graph::PathGraph;
pub use node::PathNode;
pub use resample::{polyline_length, resample, segment_count, DEFAULT_MAX_NODES};
