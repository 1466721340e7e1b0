//! A single movable node in the path chain.

use strand_core::{Point2, Vec2};

/// Working state for one node of the path chain.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PathNode {
    /// Current world position.
    pub position: Point2,
    /// Resampled reference position; the fidelity target.
    pub anchor: Point2,
    /// Unit tangent of the reference path at the anchor. Zero until
    /// prepared, or where the reference path is degenerate.
    pub tangent: Vec2,
    /// Lateral bias sign from the detour mode: `+1` right, `-1` left,
    /// `0` until prepared.
    pub bias: f64,
}

impl PathNode {
    /// A node sitting on its anchor with no bias assigned.
    pub fn at_anchor(anchor: Point2) -> Self {
        Self {
            position: anchor,
            anchor,
            tangent: Vec2::ZERO,
            bias: 0.0,
        }
    }

    /// Unit vector toward the preferred detour side.
    ///
    /// The right-hand normal of tangent `(tx, ty)` is `(ty, -tx)`; the
    /// bias sign flips it for left detours.
    pub fn lateral(&self) -> Vec2 {
        Vec2::new(self.bias * self.tangent.y, -self.bias * self.tangent.x)
    }

    /// Current offset from the anchor.
    pub fn offset(&self) -> Vec2 {
        self.position - self.anchor
    }
}
