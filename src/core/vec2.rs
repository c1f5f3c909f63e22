//! 2D Vector
//!
//! Plain `f64` vector for map coordinates, velocities and directions.
//! All operations are IEEE-754 basic arithmetic plus `sqrt`/`atan2`, which
//! give identical results for identical inputs on a given target.

use std::fmt;
use std::ops::{Add, Sub, Neg};
use serde::{Serialize, Deserialize};

/// 2D vector in map units.
#[derive(Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Vec2 {
    /// X component
    pub x: f64,
    /// Y component
    pub y: f64,
}

impl Vec2 {
    /// Zero vector
    pub const ZERO: Self = Self { x: 0.0, y: 0.0 };

    /// Unit vector pointing right (+X)
    pub const RIGHT: Self = Self { x: 1.0, y: 0.0 };

    /// Create a new vector.
    #[inline]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Scale by a scalar.
    #[inline]
    pub fn scale(self, scalar: f64) -> Self {
        Self {
            x: self.x * scalar,
            y: self.y * scalar,
        }
    }

    /// Squared length.
    #[inline]
    pub fn length_squared(self) -> f64 {
        self.x * self.x + self.y * self.y
    }

    /// Length (magnitude).
    #[inline]
    pub fn length(self) -> f64 {
        self.length_squared().sqrt()
    }

    /// Distance to another point.
    #[inline]
    pub fn distance(self, other: Self) -> f64 {
        (other - self).length()
    }

    /// Unit vector in the same direction, or `fallback` for a zero vector.
    #[inline]
    pub fn normalize_or(self, fallback: Self) -> Self {
        let len = self.length();
        if len > 0.0 {
            Self::new(self.x / len, self.y / len)
        } else {
            fallback
        }
    }

    /// Heading of this vector in degrees, normalized to [0, 360).
    #[inline]
    pub fn heading_degrees(self) -> f64 {
        let deg = self.y.atan2(self.x).to_degrees();
        let wrapped = deg.rem_euclid(360.0);
        // rem_euclid can round up to exactly 360.0 for tiny negative angles
        if wrapped >= 360.0 { 0.0 } else { wrapped }
    }

    /// Check if inside the axis-aligned box [0, width] x [0, height].
    #[inline]
    pub fn is_within(self, width: f64, height: f64) -> bool {
        self.x >= 0.0 && self.x <= width && self.y >= 0.0 && self.y <= height
    }
}

impl Add for Vec2 {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self::new(self.x + other.x, self.y + other.y)
    }
}

impl Sub for Vec2 {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        Self::new(self.x - other.x, self.y - other.y)
    }
}

impl Neg for Vec2 {
    type Output = Self;

    fn neg(self) -> Self {
        Self::new(-self.x, -self.y)
    }
}

impl fmt::Debug for Vec2 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Vec2({:.3}, {:.3})", self.x, self.y)
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vec2_ops() {
        let a = Vec2::new(3.0, 4.0);
        let b = Vec2::new(1.0, 1.0);

        assert_eq!(a + b, Vec2::new(4.0, 5.0));
        assert_eq!(a - b, Vec2::new(2.0, 3.0));
        assert_eq!(-b, Vec2::new(-1.0, -1.0));
        assert_eq!(a.scale(2.0), Vec2::new(6.0, 8.0));
        assert_eq!(a.length(), 5.0);
        assert_eq!(Vec2::ZERO.distance(a), 5.0);
    }

    #[test]
    fn test_normalize_or() {
        let n = Vec2::new(0.0, 10.0).normalize_or(Vec2::RIGHT);
        assert!((n.length() - 1.0).abs() < 1e-12);
        assert_eq!(n, Vec2::new(0.0, 1.0));

        assert_eq!(Vec2::ZERO.normalize_or(Vec2::RIGHT), Vec2::RIGHT);
    }

    #[test]
    fn test_heading_degrees() {
        assert_eq!(Vec2::RIGHT.heading_degrees(), 0.0);
        assert!((Vec2::new(0.0, 1.0).heading_degrees() - 90.0).abs() < 1e-9);
        assert!((Vec2::new(-1.0, 0.0).heading_degrees() - 180.0).abs() < 1e-9);
        assert!((Vec2::new(0.0, -1.0).heading_degrees() - 270.0).abs() < 1e-9);
    }

    #[test]
    fn test_is_within() {
        assert!(Vec2::new(0.0, 0.0).is_within(10.0, 10.0));
        assert!(Vec2::new(10.0, 10.0).is_within(10.0, 10.0));
        assert!(!Vec2::new(-0.1, 5.0).is_within(10.0, 10.0));
        assert!(!Vec2::new(5.0, 10.1).is_within(10.0, 10.0));
    }
}
