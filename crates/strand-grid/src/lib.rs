//! Grid adapter for the Strand planner.
//!
//! Wraps an externally owned, row-major cost buffer together with its
//! [`GridGeometry`] and answers world-frame cost and gradient queries.
//!
//! # Ownership
//!
//! The provider hands the adapter a [`CostBuffer`], a cheap handle to a
//! shared `Arc<[u8]>`. The adapter never copies or mutates the bytes.
//! Each planning cycle borrows a [`CostView`] that lives only for that
//! cycle, so a refreshed buffer is picked up on the very next step.
//!
//! # Cost scale
//!
//! Bytes follow the usual costmap ordinal scale: [`FREE`] through
//! [`INSCRIBED`] and [`LETHAL`], with [`NO_INFORMATION`] for unknown
//! cells. Queries outside the grid report [`OUT_OF_BOUNDS_COST`].

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod adapter;
pub mod cost;
pub mod geometry;
pub mod view;

pub use adapter::GridAdapter;
pub use cost::{CostBuffer, FREE, INSCRIBED, LETHAL, NO_INFORMATION, OUT_OF_BOUNDS_COST};
pub use geometry::GridGeometry;
pub use view::CostView;
