//! Planar vector and pose primitives in the world frame.

use std::fmt;
use std::ops::{Add, AddAssign, Mul, Neg, Sub};

/// A 2D vector in world units.
///
/// Used both for displacements and, through the [`Point2`] alias, for
/// absolute world-frame positions.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Vec2 {
    /// World-frame x component.
    pub x: f64,
    /// World-frame y component.
    pub y: f64,
}

/// A world-frame position.
pub type Point2 = Vec2;

impl Vec2 {
    /// The zero vector.
    pub const ZERO: Vec2 = Vec2 { x: 0.0, y: 0.0 };

    /// Construct a vector from components.
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Dot product.
    pub fn dot(self, other: Vec2) -> f64 {
        self.x * other.x + self.y * other.y
    }

    /// Euclidean length.
    pub fn norm(self) -> f64 {
        self.x.hypot(self.y)
    }

    /// Euclidean distance to `other`.
    pub fn distance(self, other: Vec2) -> f64 {
        (other - self).norm()
    }

    /// Unit vector in the same direction.
    ///
    /// A zero (or non-finite) vector has no direction and normalizes to
    /// [`Vec2::ZERO`].
    pub fn normalized(self) -> Vec2 {
        let n = self.norm();
        if n > 0.0 && n.is_finite() {
            self * (1.0 / n)
        } else {
            Vec2::ZERO
        }
    }

    /// Point halfway between `self` and `other`.
    pub fn midpoint(self, other: Vec2) -> Vec2 {
        Vec2::new(0.5 * (self.x + other.x), 0.5 * (self.y + other.y))
    }

    /// Linear interpolation: `t = 0` yields `self`, `t = 1` yields `other`.
    pub fn lerp(self, other: Vec2, t: f64) -> Vec2 {
        self + (other - self) * t
    }

    /// `true` if both components are finite.
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    /// Heading of this vector in radians, measured from +x toward +y.
    pub fn angle(self) -> f64 {
        self.y.atan2(self.x)
    }

    /// Scale this vector down so its length does not exceed `max_len`.
    pub fn clamp_length(self, max_len: f64) -> Vec2 {
        let n = self.norm();
        if n > max_len && n > 0.0 {
            self * (max_len / n)
        } else {
            self
        }
    }
}

impl Add for Vec2 {
    type Output = Vec2;
    fn add(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl AddAssign for Vec2 {
    fn add_assign(&mut self, rhs: Vec2) {
        self.x += rhs.x;
        self.y += rhs.y;
    }
}

impl Sub for Vec2 {
    type Output = Vec2;
    fn sub(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Neg for Vec2 {
    type Output = Vec2;
    fn neg(self) -> Vec2 {
        Vec2::new(-self.x, -self.y)
    }
}

impl Mul<f64> for Vec2 {
    type Output = Vec2;
    fn mul(self, rhs: f64) -> Vec2 {
        Vec2::new(self.x * rhs, self.y * rhs)
    }
}

impl From<(f64, f64)> for Vec2 {
    fn from((x, y): (f64, f64)) -> Self {
        Vec2::new(x, y)
    }
}

impl fmt::Display for Vec2 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.3}, {:.3})", self.x, self.y)
    }
}

/// A world-frame position with a heading.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Pose2 {
    /// Position in world units.
    pub position: Point2,
    /// Heading in radians, measured from +x toward +y.
    pub heading: f64,
}

impl Pose2 {
    /// Construct a pose from a position and heading.
    pub const fn new(position: Point2, heading: f64) -> Self {
        Self { position, heading }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn normalized_zero_stays_zero() {
        assert_eq!(Vec2::ZERO.normalized(), Vec2::ZERO);
        assert_eq!(Vec2::new(f64::NAN, 1.0).normalized(), Vec2::ZERO);
    }

    #[test]
    fn midpoint_and_lerp_agree() {
        let a = Vec2::new(1.0, -2.0);
        let b = Vec2::new(3.0, 4.0);
        assert_eq!(a.midpoint(b), a.lerp(b, 0.5));
    }

    #[test]
    fn clamp_length_only_shrinks() {
        let v = Vec2::new(3.0, 4.0);
        assert_eq!(v.clamp_length(10.0), v);
        let c = v.clamp_length(1.0);
        assert!((c.norm() - 1.0).abs() < 1e-12);
        assert!((c.angle() - v.angle()).abs() < 1e-12);
    }

    #[test]
    fn angle_of_axes() {
        assert_eq!(Vec2::new(1.0, 0.0).angle(), 0.0);
        assert!((Vec2::new(0.0, 1.0).angle() - std::f64::consts::FRAC_PI_2).abs() < 1e-12);
    }

    proptest! {
        #[test]
        fn normalized_has_unit_length(x in -1e6f64..1e6, y in -1e6f64..1e6) {
            prop_assume!(x.hypot(y) > 1e-9);
            let n = Vec2::new(x, y).normalized().norm();
            prop_assert!((n - 1.0).abs() < 1e-9);
        }
    }
}
