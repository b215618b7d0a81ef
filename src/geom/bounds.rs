//! Axis-aligned bounding box.

use super::point::Point2D;
use super::EPS;

/// Axis-aligned bounding box given by its bottom-left and top-right corners.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Bounds {
    /// Bottom-left corner.
    pub min: Point2D,
    /// Top-right corner.
    pub max: Point2D,
}

impl Bounds {
    /// Create a bounding box from its corners.
    #[inline]
    pub const fn new(min: Point2D, max: Point2D) -> Self {
        Self { min, max }
    }

    /// The degenerate box containing a single point.
    #[inline]
    pub fn from_point(p: Point2D) -> Self {
        Self { min: p, max: p }
    }

    /// The bounding box of two points.
    #[inline]
    pub fn of_two(p1: Point2D, p2: Point2D) -> Self {
        let mut b = Self::from_point(p1);
        b.expand_to_include(p2);
        b
    }

    /// The bounding box of three points.
    #[inline]
    pub fn of_three(p1: Point2D, p2: Point2D, p3: Point2D) -> Self {
        let mut b = Self::of_two(p1, p2);
        b.expand_to_include(p3);
        b
    }

    /// Grow the box so that it encloses `p`.
    pub fn expand_to_include(&mut self, p: Point2D) {
        if self.min.x > p.x {
            self.min.x = p.x;
        }
        if self.min.y > p.y {
            self.min.y = p.y;
        }
        if self.max.x < p.x {
            self.max.x = p.x;
        }
        if self.max.y < p.y {
            self.max.y = p.y;
        }
    }

    /// Width of the box (x extent).
    #[inline]
    pub fn width(&self) -> f64 {
        self.max.x - self.min.x
    }

    /// Height of the box (y extent).
    #[inline]
    pub fn height(&self) -> f64 {
        self.max.y - self.min.y
    }

    /// True if the box has no area, i.e. degenerates to a segment or point.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.width().abs() < EPS || self.height().abs() < EPS
    }

    /// True if the point lies inside the box, padded by the tolerance.
    #[inline]
    pub fn encloses(&self, p: Point2D) -> bool {
        p.x >= self.min.x - EPS
            && p.x <= self.max.x + EPS
            && p.y >= self.min.y - EPS
            && p.y <= self.max.y + EPS
    }

    /// Aspect ratio: the smaller dimension divided by the larger one.
    ///
    /// Returns 0 for a point-like box. The result is negative when the
    /// corners are improperly ordered.
    pub fn aspect_ratio(&self) -> f64 {
        let wd = self.width();
        let ht = self.height();
        if wd.abs() < EPS && ht.abs() < EPS {
            return 0.0;
        }
        if wd.abs() <= ht.abs() {
            wd / ht
        } else {
            ht / wd
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_expand_to_include() {
        let mut b = Bounds::from_point(Point2D::new(1.0, 1.0));
        b.expand_to_include(Point2D::new(-2.0, 3.0));
        assert_eq!(b.min, Point2D::new(-2.0, 1.0));
        assert_eq!(b.max, Point2D::new(1.0, 3.0));
    }

    #[test]
    fn test_encloses_with_padding() {
        let b = Bounds::new(Point2D::ZERO, Point2D::new(1.0, 1.0));
        assert!(b.encloses(Point2D::new(0.5, 0.5)));
        assert!(b.encloses(Point2D::new(1.0 + 1e-9, 0.5)));
        assert!(!b.encloses(Point2D::new(1.1, 0.5)));
    }

    #[test]
    fn test_aspect_ratio() {
        let b = Bounds::new(Point2D::ZERO, Point2D::new(4.0, 2.0));
        assert_relative_eq!(b.aspect_ratio(), 0.5);

        let tall = Bounds::new(Point2D::ZERO, Point2D::new(1.0, 10.0));
        assert_relative_eq!(tall.aspect_ratio(), 0.1);

        // A segment has aspect ratio zero.
        let flat = Bounds::of_two(Point2D::ZERO, Point2D::new(3.0, 0.0));
        assert_relative_eq!(flat.aspect_ratio(), 0.0);

        let point = Bounds::from_point(Point2D::new(0.3, 0.3));
        assert_relative_eq!(point.aspect_ratio(), 0.0);
    }
}
