//! The path chain: ingest, prepare, and position updates.

use std::ops::Range;

use strand_core::{ConfigError, DetourMode, PlanError, Point2, Vec2};

use crate::node::PathNode;
use crate::resample::{polyline_length, resample};

/// Ordered chain of path nodes derived from a reference path.
///
/// Always holds at least two nodes: the first and last are boundary
/// nodes pinned to the reference path's endpoints.
#[derive(Clone, Debug, PartialEq)]
pub struct PathGraph {
    nodes: Vec<PathNode>,
    spacing: f64,
}

impl PathGraph {
    /// Resample `reference` at `spacing` and build one node per sample.
    ///
    /// Nodes start on their anchors with no lateral bias; call
    /// [`prepare`](Self::prepare) before relaxing.
    ///
    /// # Errors
    ///
    /// - [`PlanError::EmptyPath`] if `reference` has fewer than two points.
    /// - [`PlanError::NonFinitePoint`] if any coordinate is NaN or infinite.
    /// - [`PlanError::Config`] if `spacing` is not finite and positive.
    /// - [`PlanError::PathTooLong`] if the chain would exceed `max_nodes`.
    pub fn ingest(reference: &[Point2], spacing: f64, max_nodes: usize) -> Result<Self, PlanError> {
        if reference.len() < 2 {
            return Err(PlanError::EmptyPath {
                points: reference.len(),
            });
        }
        if let Some(index) = reference.iter().position(|p| !p.is_finite()) {
            return Err(PlanError::NonFinitePoint { index });
        }
        if !spacing.is_finite() || spacing <= 0.0 {
            return Err(ConfigError::InvalidParameter {
                name: "spacing",
                reason: format!("must be finite and > 0, got {spacing}"),
            }
            .into());
        }

        let samples =
            resample(reference, spacing, max_nodes).ok_or_else(|| PlanError::PathTooLong {
                length: polyline_length(reference),
                spacing,
                max_nodes,
            })?;
        let nodes: Vec<PathNode> = samples
            .into_iter()
            .map(PathNode::at_anchor)
            .collect();
        tracing::debug!(
            reference_points = reference.len(),
            nodes = nodes.len(),
            spacing,
            "path ingested"
        );
        Ok(Self { nodes, spacing })
    }

    /// Reset every node onto its anchor, compute anchor tangents, and tag
    /// each node with the lateral bias sign for `mode`.
    ///
    /// The tangent at node `i` is the normalized chord between anchors
    /// `i - 1` and `i + 1`, with indices clamped at the chain ends.
    pub fn prepare(&mut self, mode: DetourMode) {
        let sign = mode.bias_sign();
        let last = self.nodes.len() - 1;
        let tangents: Vec<Vec2> = (0..self.nodes.len())
            .map(|i| {
                let prev = self.nodes[i.saturating_sub(1)].anchor;
                let next = self.nodes[(i + 1).min(last)].anchor;
                (next - prev).normalized()
            })
            .collect();
        for (node, tangent) in self.nodes.iter_mut().zip(tangents) {
            node.position = node.anchor;
            node.tangent = tangent;
            node.bias = sign;
        }
    }

    /// Nodes in chain order.
    pub fn nodes(&self) -> &[PathNode] {
        &self.nodes
    }

    /// Number of nodes (at least two).
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Always `false`; present for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Spacing the reference path was resampled at.
    pub fn spacing(&self) -> f64 {
        self.spacing
    }

    /// Indices of the movable interior nodes.
    pub fn interior(&self) -> Range<usize> {
        1..self.nodes.len().saturating_sub(1)
    }

    /// First reference point.
    pub fn start(&self) -> Point2 {
        self.nodes[0].anchor
    }

    /// Last reference point.
    pub fn goal(&self) -> Point2 {
        self.nodes[self.nodes.len() - 1].anchor
    }

    /// Copy current positions, in chain order, into `out`.
    pub fn positions_into(&self, out: &mut Vec<Point2>) {
        out.clear();
        out.extend(self.nodes.iter().map(|n| n.position));
    }

    /// Current positions in chain order.
    pub fn positions(&self) -> Vec<Point2> {
        let mut out = Vec::with_capacity(self.nodes.len());
        self.positions_into(&mut out);
        out
    }

    /// Add `displacements[i]` to every interior node `i` at once.
    ///
    /// Boundary entries are ignored and boundary nodes are re-pinned to
    /// their anchors. `displacements` must have one entry per node.
    pub fn apply(&mut self, displacements: &[Vec2]) {
        debug_assert_eq!(displacements.len(), self.nodes.len());
        for i in self.interior() {
            self.nodes[i].position += displacements[i];
        }
        let last = self.nodes.len() - 1;
        self.nodes[0].position = self.nodes[0].anchor;
        self.nodes[last].position = self.nodes[last].anchor;
    }
}
