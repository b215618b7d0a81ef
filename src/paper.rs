//! The sheet of paper: its edges, corners, diagonals, and the geometric
//! predicates used to validate candidate fold lines.

use crate::geom::{Bounds, Line2D, Point2D, EPS};

/// A rectangular sheet of paper with its bottom-left corner at the origin.
///
/// Caches the four corner points, the four edge lines and the two
/// diagonals, which seed the reference database and are consulted by the
/// validity predicates below.
#[derive(Clone, Debug)]
pub struct Paper {
    bounds: Bounds,
    width: f64,
    height: f64,
    width_text: String,
    height_text: String,

    bot_left: Point2D,
    bot_right: Point2D,
    top_left: Point2D,
    top_right: Point2D,

    bottom_edge: Line2D,
    left_edge: Line2D,
    right_edge: Line2D,
    top_edge: Line2D,
    upward_diagonal: Line2D,
    downward_diagonal: Line2D,
}

impl Paper {
    /// Create a paper of the given dimensions.
    pub fn new(width: f64, height: f64) -> Self {
        let wt = format!("{}", width);
        let ht = format!("{}", height);
        Self::with_text(width, height, wt, ht)
    }

    /// Create a paper retaining the user-entered dimension expressions
    /// for display.
    pub fn with_text(width: f64, height: f64, width_text: String, height_text: String) -> Self {
        let bot_left = Point2D::new(0.0, 0.0);
        let bot_right = Point2D::new(width, 0.0);
        let top_left = Point2D::new(0.0, height);
        let top_right = Point2D::new(width, height);
        Self {
            bounds: Bounds::new(bot_left, top_right),
            width,
            height,
            width_text,
            height_text,
            bot_left,
            bot_right,
            top_left,
            top_right,
            bottom_edge: Line2D::through_points(bot_left, bot_right),
            left_edge: Line2D::through_points(bot_left, top_left),
            right_edge: Line2D::through_points(bot_right, top_right),
            top_edge: Line2D::through_points(top_left, top_right),
            upward_diagonal: Line2D::through_points(bot_left, top_right),
            downward_diagonal: Line2D::through_points(top_left, bot_right),
        }
    }

    /// Width of the paper.
    #[inline]
    pub fn width(&self) -> f64 {
        self.width
    }

    /// Height of the paper.
    #[inline]
    pub fn height(&self) -> f64 {
        self.height
    }

    /// The width as the user entered it.
    pub fn width_text(&self) -> &str {
        &self.width_text
    }

    /// The height as the user entered it.
    pub fn height_text(&self) -> &str {
        &self.height_text
    }

    /// Length of the paper's diagonal.
    #[inline]
    pub fn diagonal_length(&self) -> f64 {
        (self.width * self.width + self.height * self.height).sqrt()
    }

    /// Corner points in bottom-left, bottom-right, top-left, top-right order.
    pub fn corners(&self) -> [Point2D; 4] {
        [self.bot_left, self.bot_right, self.top_left, self.top_right]
    }

    /// Corner points in counterclockwise polygon order, for painting the
    /// paper outline.
    pub fn corners_ccw(&self) -> [Point2D; 4] {
        [self.bot_left, self.bot_right, self.top_right, self.top_left]
    }

    /// The bottom-left corner.
    pub fn bot_left(&self) -> Point2D {
        self.bot_left
    }

    /// The bottom-right corner.
    pub fn bot_right(&self) -> Point2D {
        self.bot_right
    }

    /// The top-left corner.
    pub fn top_left(&self) -> Point2D {
        self.top_left
    }

    /// The top-right corner.
    pub fn top_right(&self) -> Point2D {
        self.top_right
    }

    /// The bottom edge line.
    pub fn bottom_edge(&self) -> &Line2D {
        &self.bottom_edge
    }

    /// The left edge line.
    pub fn left_edge(&self) -> &Line2D {
        &self.left_edge
    }

    /// The right edge line.
    pub fn right_edge(&self) -> &Line2D {
        &self.right_edge
    }

    /// The top edge line.
    pub fn top_edge(&self) -> &Line2D {
        &self.top_edge
    }

    /// The diagonal from the bottom-left to the top-right corner.
    pub fn upward_diagonal(&self) -> &Line2D {
        &self.upward_diagonal
    }

    /// The diagonal from the top-left to the bottom-right corner.
    pub fn downward_diagonal(&self) -> &Line2D {
        &self.downward_diagonal
    }

    /// True if the point lies on the paper, padded by the tolerance.
    #[inline]
    pub fn encloses(&self, p: Point2D) -> bool {
        self.bounds.encloses(p)
    }

    /// True if the point lies on one of the four edge lines.
    pub fn point_on_edge(&self, p: Point2D) -> bool {
        self.left_edge.contains(p)
            || self.right_edge.contains(p)
            || self.top_edge.contains(p)
            || self.bottom_edge.contains(p)
    }

    /// True if the line coincides with one of the four edges.
    pub fn line_is_edge(&self, l: &Line2D) -> bool {
        self.left_edge.coincides_with(l)
            || self.right_edge.coincides_with(l)
            || self.top_edge.coincides_with(l)
            || self.bottom_edge.coincides_with(l)
    }

    /// Clip a line to the paper.
    ///
    /// Returns the endpoints of the clipped segment ordered by increasing
    /// parameter along the line's tangent, or `None` if the line misses
    /// the paper entirely. A line touching only a corner yields a
    /// degenerate segment with both endpoints equal.
    pub fn clip_line(&self, l: &Line2D) -> Option<(Point2D, Point2D)> {
        // Collect the intersections with the four edge lines that land on
        // the paper.
        let mut pts = [Point2D::ZERO; 4];
        let mut npts = 0;
        for edge in [
            &self.top_edge,
            &self.left_edge,
            &self.right_edge,
            &self.bottom_edge,
        ] {
            if let Some(p) = edge.intersection(l) {
                if self.encloses(p) {
                    pts[npts] = p;
                    npts += 1;
                }
            }
        }
        if npts == 0 {
            return None;
        }

        // Parameterize the hits along the line and keep the extremes.
        let pt = l.d * l.u;
        let up = l.u.perpendicular();
        let mut tmin = (pts[0] - pt).dot(up);
        let mut tmax = tmin;
        for p in pts.iter().take(npts).skip(1) {
            let t = (*p - pt).dot(up);
            tmin = tmin.min(t);
            tmax = tmax.max(t);
        }
        Some((pt + tmin * up, pt + tmax * up))
    }

    /// True if the line crosses the paper's interior.
    ///
    /// Returns false if the line misses the paper, only touches a corner,
    /// or only runs along an edge.
    pub fn interior_overlaps(&self, l: &Line2D) -> bool {
        let Some((pa, pb)) = self.clip_line(l) else {
            return false;
        };

        if (pa - pb).length() < EPS {
            return false; // touches at a single point (a corner)
        }

        if !Bounds::of_two(pa, pb).is_empty() {
            return true;
        }

        // The clipped segment is axis-aligned; it crosses the interior
        // only if its midpoint is off every edge.
        let mp = Point2D::midpoint(pa, pb);
        !(self.top_edge.contains(mp)
            || self.bottom_edge.contains(mp)
            || self.left_edge.contains(mp)
            || self.right_edge.contains(mp))
    }

    /// True if folding along the line would create a flap too skinny to
    /// fold accurately.
    ///
    /// The line divides the paper into two parts; each part is bounded
    /// against the clipped fold segment plus one endpoint of its
    /// perpendicular bisector, and the resulting box's aspect ratio is
    /// compared against `min_aspect_ratio`. Degenerate clips count as
    /// skinny.
    pub fn makes_skinny_flap(&self, l: &Line2D, min_aspect_ratio: f64) -> bool {
        let Some((p1, p2)) = self.clip_line(l) else {
            return true;
        };

        let bu = l.u.perpendicular();
        let bisector = Line2D::new(Point2D::midpoint(p1, p2).dot(bu), bu);
        let Some((bp1, bp2)) = self.clip_line(&bisector) else {
            return true;
        };

        Bounds::of_three(p1, p2, bp1).aspect_ratio().abs() < min_aspect_ratio
            || Bounds::of_three(p1, p2, bp2).aspect_ratio().abs() < min_aspect_ratio
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn unit_square() -> Paper {
        Paper::new(1.0, 1.0)
    }

    #[test]
    fn test_cached_edges_and_corners() {
        let p = unit_square();
        assert!(p.bottom_edge().contains(Point2D::new(0.3, 0.0)));
        assert!(p.left_edge().contains(Point2D::new(0.0, 0.7)));
        assert!(p.upward_diagonal().contains(Point2D::new(0.5, 0.5)));
        assert!(p.downward_diagonal().contains(Point2D::new(0.5, 0.5)));
        assert_eq!(p.corners()[3], Point2D::new(1.0, 1.0));
    }

    #[test]
    fn test_clip_diagonal() {
        let p = unit_square();
        let diag = Line2D::through_points(Point2D::new(0.0, 0.0), Point2D::new(1.0, 1.0));
        let (a, b) = p.clip_line(&diag).unwrap();
        let len = (a - b).length();
        assert_relative_eq!(len, 2f64.sqrt(), epsilon = 1e-9);
    }

    #[test]
    fn test_clip_missing_line() {
        let p = unit_square();
        let far = Line2D::through_points(Point2D::new(2.0, 0.0), Point2D::new(2.0, 1.0));
        assert!(p.clip_line(&far).is_none());
    }

    #[test]
    fn test_interior_overlaps() {
        let p = unit_square();

        // Interior vertical line: overlaps.
        let mid = Line2D::through_points(Point2D::new(0.5, 0.0), Point2D::new(0.5, 1.0));
        assert!(p.interior_overlaps(&mid));

        // An edge itself: does not.
        assert!(!p.interior_overlaps(p.bottom_edge()));

        // Line through a single corner only.
        let corner = Line2D::through_points(Point2D::new(-1.0, 1.0), Point2D::new(1.0, -1.0));
        assert!(!p.interior_overlaps(&corner));

        // Line missing the paper.
        let far = Line2D::through_points(Point2D::new(3.0, 0.0), Point2D::new(3.0, 1.0));
        assert!(!p.interior_overlaps(&far));
    }

    #[test]
    fn test_skinny_flap() {
        let p = unit_square();

        // Fold down the middle: fine.
        let mid = Line2D::through_points(Point2D::new(0.5, 0.0), Point2D::new(0.5, 1.0));
        assert!(!p.makes_skinny_flap(&mid, 0.1));

        // A sliver just inside the left edge: skinny.
        let sliver = Line2D::through_points(Point2D::new(0.01, 0.0), Point2D::new(0.01, 1.0));
        assert!(p.makes_skinny_flap(&sliver, 0.1));

        // An edge-coincident line clips to a degenerate box: skinny.
        assert!(p.makes_skinny_flap(p.left_edge(), 0.1));
    }

    #[test]
    fn test_point_on_edge() {
        let p = unit_square();
        assert!(p.point_on_edge(Point2D::new(0.4, 0.0)));
        assert!(p.point_on_edge(Point2D::new(0.0, 0.0)));
        assert!(!p.point_on_edge(Point2D::new(0.4, 0.4)));
    }
}
