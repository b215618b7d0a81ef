//! Infinite 2D line in unit-normal / signed-distance form.

use serde::{Deserialize, Serialize};

use super::point::Point2D;
use super::EPS;

/// An infinite line represented by a unit normal `u` and a scalar `d`.
///
/// The point `d * u` is the point on the line closest to the origin, so
/// a point `p` lies on the line iff `p · u == d`. Note that `(d, u)` and
/// `(-d, -u)` describe the same line; reference lines stored in the
/// database are canonicalized to `d >= 0`.
///
/// If `u` is not a unit vector most operations here break, so lines are
/// only built through the constructors, which normalize.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct Line2D {
    /// Signed distance from the origin.
    pub d: f64,
    /// Unit normal to the line.
    pub u: Point2D,
}

impl Line2D {
    /// Create a line from its signed distance and unit normal.
    ///
    /// `u` is assumed to already be a unit vector.
    #[inline]
    pub const fn new(d: f64, u: Point2D) -> Self {
        Self { d, u }
    }

    /// The line through two distinct points.
    #[inline]
    pub fn through_points(p1: Point2D, p2: Point2D) -> Self {
        let u = (p2 - p1).normalized().perpendicular();
        Self { d: p1.dot(u), u }
    }

    /// Reflect a point across the line.
    #[inline]
    pub fn fold(&self, p: Point2D) -> Point2D {
        p + 2.0 * (self.d - p.dot(self.u)) * self.u
    }

    /// True if the two lines are parallel (or antiparallel).
    #[inline]
    pub fn is_parallel_to(&self, other: &Line2D) -> bool {
        self.u.dot(other.u.perpendicular()).abs() < EPS
    }

    /// True if the two lines describe the same geometric line, in either
    /// orientation.
    #[inline]
    pub fn coincides_with(&self, other: &Line2D) -> bool {
        (self.d - other.d * self.u.dot(other.u)).abs() < EPS && self.is_parallel_to(other)
    }

    /// True if the point lies on the line.
    #[inline]
    pub fn contains(&self, p: Point2D) -> bool {
        (self.d - p.dot(self.u)).abs() < EPS
    }

    /// Intersection point with another line, or `None` if parallel.
    pub fn intersection(&self, other: &Line2D) -> Option<Point2D> {
        let denom = self.u.x * other.u.y - self.u.y * other.u.x;
        if denom.abs() < EPS {
            return None;
        }
        Some(Point2D::new(
            (self.d * other.u.y - other.d * self.u.y) / denom,
            (other.d * self.u.x - self.d * other.u.x) / denom,
        ))
    }
}
