//! 2D point and direction vector type.

use serde::{Deserialize, Serialize};
use std::ops::{Add, Mul, Neg, Sub};

use super::EPS;

/// A 2D point, also used as a direction vector.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Point2D {
    /// X coordinate.
    pub x: f64,
    /// Y coordinate.
    pub y: f64,
}

impl Point2D {
    /// Create a new point.
    #[inline]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// The origin.
    pub const ZERO: Point2D = Point2D { x: 0.0, y: 0.0 };

    /// Dot product with another vector.
    #[inline]
    pub fn dot(&self, other: Point2D) -> f64 {
        self.x * other.x + self.y * other.y
    }

    /// Squared length of the vector (avoids sqrt).
    #[inline]
    pub fn length_squared(&self) -> f64 {
        self.x * self.x + self.y * self.y
    }

    /// Euclidean length of the vector.
    #[inline]
    pub fn length(&self) -> f64 {
        self.length_squared().sqrt()
    }

    /// Euclidean distance to another point.
    #[inline]
    pub fn distance(&self, other: Point2D) -> f64 {
        (*self - other).length()
    }

    /// This vector rotated 90 degrees counterclockwise.
    #[inline]
    pub fn perpendicular(&self) -> Point2D {
        Point2D::new(-self.y, self.x)
    }

    /// This vector rotated counterclockwise by `angle` radians.
    #[inline]
    pub fn rotated(&self, angle: f64) -> Point2D {
        let (sin_a, cos_a) = angle.sin_cos();
        Point2D::new(
            cos_a * self.x - sin_a * self.y,
            sin_a * self.x + cos_a * self.y,
        )
    }

    /// Unit vector in the same direction.
    #[inline]
    pub fn normalized(&self) -> Point2D {
        let len = self.length();
        Point2D::new(self.x / len, self.y / len)
    }

    /// Midpoint between two points.
    #[inline]
    pub fn midpoint(a: Point2D, b: Point2D) -> Point2D {
        Point2D::new(0.5 * (a.x + b.x), 0.5 * (a.y + b.y))
    }

    /// Check coincidence with another point under the global tolerance.
    #[inline]
    pub fn approx_eq(&self, other: Point2D) -> bool {
        (*self - other).length() < EPS
    }

    /// Copy with coordinates within the tolerance of zero snapped to zero.
    ///
    /// Used when formatting coordinates for display so that `-0.0000`
    /// never appears in instructions.
    #[inline]
    pub fn chopped(&self) -> Point2D {
        Point2D::new(
            if self.x.abs() < EPS { 0.0 } else { self.x },
            if self.y.abs() < EPS { 0.0 } else { self.y },
        )
    }
}

impl Add for Point2D {
    type Output = Point2D;

    #[inline]
    fn add(self, other: Point2D) -> Point2D {
        Point2D::new(self.x + other.x, self.y + other.y)
    }
}

impl Sub for Point2D {
    type Output = Point2D;

    #[inline]
    fn sub(self, other: Point2D) -> Point2D {
        Point2D::new(self.x - other.x, self.y - other.y)
    }
}

impl Mul<f64> for Point2D {
    type Output = Point2D;

    #[inline]
    fn mul(self, s: f64) -> Point2D {
        Point2D::new(self.x * s, self.y * s)
    }
}

impl Mul<Point2D> for f64 {
    type Output = Point2D;

    #[inline]
    fn mul(self, p: Point2D) -> Point2D {
        Point2D::new(self * p.x, self * p.y)
    }
}

impl Neg for Point2D {
    type Output = Point2D;

    #[inline]
    fn neg(self) -> Point2D {
        Point2D::new(-self.x, -self.y)
    }
}
