//! Reference lines: creases and edges on the paper.

use crate::config::Config;
use crate::geom::{Line2D, EPS};
use crate::paper::Paper;
use crate::pool::PoolItem;

use super::{LineId, MarkId, Rank, RefKey, Step};

/// Which of two points moves during a fold.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PointMover {
    /// The first point moves.
    P1,
    /// The second point moves.
    P2,
}

/// Which of two lines moves during a fold.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LineMover {
    /// The first line moves.
    L1,
    /// The second line moves.
    L2,
}

/// Whether the point or the line moves in a point-to-line alignment.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PointOrLine {
    /// The point moves to the line.
    Point,
    /// The line moves to the point.
    Line,
}

/// Which pair of elements moves in a two-point two-line alignment.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PairMover {
    /// Both points move onto their lines.
    BothPoints,
    /// Both lines move onto their points.
    BothLines,
    /// The first point and the second line move.
    P1L2,
    /// The second point and the first line move.
    P2L1,
}

/// How a line came to be: an original edge or diagonal, or one variant
/// per Huzita-Hatori axiom.
#[derive(Clone, Debug)]
pub enum LineDef {
    /// A line present before any folding: an edge or a diagonal.
    Original {
        /// Display name, e.g. "the bottom edge".
        name: String,
    },
    /// O1: the crease through two points.
    ThroughTwoPoints {
        /// First point.
        p1: MarkId,
        /// Second point.
        p2: MarkId,
    },
    /// O2: bring one point onto another.
    PointToPoint {
        /// First point.
        p1: MarkId,
        /// Second point.
        p2: MarkId,
        /// Which point moves.
        moves: PointMover,
    },
    /// O3: bring one line onto another (angle bisector).
    LineToLine {
        /// First line.
        l1: LineId,
        /// Second line.
        l2: LineId,
        /// Which of the two bisectors this is.
        root: u8,
        /// Which line moves.
        moves: LineMover,
    },
    /// O4: fold a line onto itself with the crease through a point.
    LineOntoSelf {
        /// The line folded onto itself.
        l1: LineId,
        /// The point the crease passes through.
        p1: MarkId,
    },
    /// O5: bring a point onto a line with the crease through a second
    /// point.
    PointToLineThroughPoint {
        /// The moving point.
        p1: MarkId,
        /// The destination line.
        l1: LineId,
        /// The pivot the crease passes through.
        p2: MarkId,
        /// Which of the two tangent solutions this is.
        root: u8,
        /// Whether the point or the line moves.
        moves: PointOrLine,
    },
    /// O6: bring two points onto two lines simultaneously (the cubic).
    TwoPointsToTwoLines {
        /// First point.
        p1: MarkId,
        /// First line.
        l1: LineId,
        /// Second point.
        p2: MarkId,
        /// Second line.
        l2: LineId,
        /// Which root of the cubic this is.
        root: u8,
        /// Which pair of elements moves.
        moves: PairMover,
    },
    /// O7: fold a line onto itself so that a point lands on another line.
    LineOntoSelfPointToLine {
        /// The line the point lands on.
        l1: LineId,
        /// The moving point.
        p1: MarkId,
        /// The line folded onto itself.
        l2: LineId,
        /// Whether the point or the line moves.
        moves: PointOrLine,
    },
}

impl LineDef {
    /// Axiom number O1-O7, or `None` for originals.
    pub fn axiom(&self) -> Option<u8> {
        match self {
            LineDef::Original { .. } => None,
            LineDef::ThroughTwoPoints { .. } => Some(1),
            LineDef::PointToPoint { .. } => Some(2),
            LineDef::LineToLine { .. } => Some(3),
            LineDef::LineOntoSelf { .. } => Some(4),
            LineDef::PointToLineThroughPoint { .. } => Some(5),
            LineDef::TwoPointsToTwoLines { .. } => Some(6),
            LineDef::LineOntoSelfPointToLine { .. } => Some(7),
        }
    }
}

/// A reference line: a crease or edge together with its rank, bucket key
/// and derivation.
#[derive(Clone, Debug)]
pub struct LineRef {
    /// Geometry of the line, canonicalized so that `d >= 0`.
    pub l: Line2D,
    /// Number of creases needed to construct it.
    pub rank: Rank,
    /// Bucket key; non-zero for every stored line.
    pub key: RefKey,
    /// Derivation record.
    pub def: LineDef,
}

impl LineRef {
    /// Finish constructing a line whose geometry has passed validation:
    /// canonicalize the orientation and assign the bucket key.
    pub(crate) fn finish(
        mut l: Line2D,
        rank: Rank,
        def: LineDef,
        paper: &Paper,
        cfg: &Config,
    ) -> Self {
        // Resolve the (d, u) / (-d, -u) ambiguity by requiring d >= 0.
        if l.d < 0.0 {
            l.d = -l.d;
            l.u = -l.u;
        }
        Self {
            l,
            rank,
            key: line_key(&l, paper, cfg.num_a, cfg.num_d),
            def,
        }
    }

    /// An original (pre-existing) line such as an edge or diagonal.
    pub(crate) fn original(l: Line2D, rank: Rank, name: &str, paper: &Paper, cfg: &Config) -> Self {
        Self::finish(l, rank, LineDef::Original { name: name.to_string() }, paper, cfg)
    }

    /// Distance between this line and a target line.
    ///
    /// With `line_worst_case_error` set, this is the smaller of the two
    /// endpoint pairings of the clipped segments: the worst separation a
    /// folder would actually see on the paper. Lines that miss the paper
    /// compare as very far away. Otherwise a cheaper Pythagorean proxy
    /// over the (angle, distance) parameters is used.
    pub fn distance_to(&self, target: &Line2D, paper: &Paper, cfg: &Config) -> f64 {
        if cfg.line_worst_case_error {
            match (paper.clip_line(&self.l), paper.clip_line(target)) {
                (Some((p1a, p1b)), Some((p2a, p2b))) => {
                    let err1 = p1a.distance(p2a).max(p1b.distance(p2b));
                    let err2 = p1a.distance(p2b).max(p1b.distance(p2a));
                    err1.min(err2)
                }
                _ => 1.0 / EPS,
            }
        } else {
            let du = self.l.u.dot(target.u.perpendicular());
            let dd = self.l.d - target.d * self.l.u.dot(target.u);
            (du * du + dd * dd).sqrt()
        }
    }

    /// True if the line coincides with one of the paper's edges.
    pub fn is_on_edge(&self, paper: &Paper) -> bool {
        paper.line_is_edge(&self.l)
    }

    /// False for originals, true for constructed lines.
    pub fn is_derived(&self) -> bool {
        !matches!(self.def, LineDef::Original { .. })
    }

    /// True for every derived line: a crease that is folded as the focus
    /// of a diagram step.
    pub fn is_action_line(&self) -> bool {
        self.is_derived()
    }

    /// True if `other` is one of this line's direct parents.
    pub fn uses_immediate(&self, other: Step) -> bool {
        match self.def {
            LineDef::Original { .. } => false,
            LineDef::ThroughTwoPoints { p1, p2 } | LineDef::PointToPoint { p1, p2, .. } => {
                other == Step::Mark(p1) || other == Step::Mark(p2)
            }
            LineDef::LineToLine { l1, l2, .. } => {
                other == Step::Line(l1) || other == Step::Line(l2)
            }
            LineDef::LineOntoSelf { l1, p1 } => {
                other == Step::Line(l1) || other == Step::Mark(p1)
            }
            LineDef::PointToLineThroughPoint { p1, l1, p2, .. } => {
                other == Step::Mark(p1) || other == Step::Line(l1) || other == Step::Mark(p2)
            }
            LineDef::TwoPointsToTwoLines { p1, l1, p2, l2, .. } => {
                other == Step::Mark(p1)
                    || other == Step::Line(l1)
                    || other == Step::Mark(p2)
                    || other == Step::Line(l2)
            }
            LineDef::LineOntoSelfPointToLine { l1, p1, l2, .. } => {
                other == Step::Line(l1) || other == Step::Mark(p1) || other == Step::Line(l2)
            }
        }
    }
}

impl PoolItem for LineRef {
    fn key(&self) -> RefKey {
        self.key
    }

    fn rank(&self) -> Rank {
        self.rank
    }
}

/// Discretize a line into its bucket key.
///
/// The key combines a quantized normal angle with a quantized distance
/// from the origin, scaled by the paper's diagonal. At `d == 0` the
/// orientations `u` and `-u` describe the same line, so the angle
/// fraction is remapped modulo one half-turn before quantization.
pub(crate) fn line_key(l: &Line2D, paper: &Paper, num_a: u32, num_d: u32) -> RefKey {
    let mut fa = 0.5 * (1.0 + l.u.y.atan2(l.u.x) / std::f64::consts::PI);
    let fd = l.d / paper.diagonal_length();

    let nd = (0.5 + fd * num_d as f64).floor() as u64;
    if nd == 0 {
        fa = (2.0 * fa) % 1.0;
    }
    let na = (0.5 + fa * num_a as f64).floor() as u64;
    (1 + na * num_d as u64 + nd) as RefKey
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geom::Point2D;

    fn setup() -> (Paper, Config) {
        (Paper::new(1.0, 1.0), Config::default())
    }

    fn original(l: Line2D, paper: &Paper, cfg: &Config) -> LineRef {
        LineRef::original(l, 0, "test line", paper, cfg)
    }

    #[test]
    fn test_canonicalization_flips_negative_d() {
        let (paper, cfg) = setup();
        let l = Line2D::new(-0.5, Point2D::new(0.0, 1.0));
        let r = original(l, &paper, &cfg);
        assert!(r.l.d >= 0.0);
        assert!(r.l.coincides_with(&l));
    }

    #[test]
    fn test_key_identifies_opposite_orientations_at_origin() {
        let (paper, cfg) = setup();
        // A line through the origin has d == 0, where u and -u describe
        // the same geometry and must share a bucket.
        let u = Point2D::new(1.0, 1.0).normalized();
        let a = original(Line2D::new(0.0, u), &paper, &cfg);
        let b = original(Line2D::new(0.0, -u), &paper, &cfg);
        assert_eq!(a.key, b.key);
        assert_ne!(a.key, 0);
    }

    #[test]
    fn test_keys_distinguish_parallel_lines() {
        let (paper, cfg) = setup();
        let up = Point2D::new(0.0, 1.0);
        let a = original(Line2D::new(0.25, up), &paper, &cfg);
        let b = original(Line2D::new(0.5, up), &paper, &cfg);
        assert_ne!(a.key, b.key);
    }

    #[test]
    fn test_worst_case_distance() {
        let (paper, cfg) = setup();
        let quarter = original(Line2D::new(0.25, Point2D::new(0.0, 1.0)), &paper, &cfg);

        // Same line: zero error.
        let same = Line2D::new(0.25, Point2D::new(0.0, 1.0));
        assert!(quarter.distance_to(&same, &paper, &cfg) < EPS);

        // Parallel line 0.1 away: worst-case endpoint separation is 0.1.
        let shifted = Line2D::new(0.35, Point2D::new(0.0, 1.0));
        let d = quarter.distance_to(&shifted, &paper, &cfg);
        assert!((d - 0.1).abs() < 1e-9);

        // A target missing the paper compares as very far away.
        let off = Line2D::new(5.0, Point2D::new(0.0, 1.0));
        assert!(quarter.distance_to(&off, &paper, &cfg) > 1.0e7);
    }

    #[test]
    fn test_pythagorean_distance() {
        let (paper, mut cfg) = setup();
        cfg.line_worst_case_error = false;
        let quarter = original(Line2D::new(0.25, Point2D::new(0.0, 1.0)), &paper, &cfg);
        let shifted = Line2D::new(0.35, Point2D::new(0.0, 1.0));
        let d = quarter.distance_to(&shifted, &paper, &cfg);
        assert!((d - 0.1).abs() < 1e-9);
    }

    #[test]
    fn test_is_on_edge() {
        let (paper, cfg) = setup();
        let bottom = original(*paper.bottom_edge(), &paper, &cfg);
        assert!(bottom.is_on_edge(&paper));

        let mid = original(
            Line2D::through_points(Point2D::new(0.5, 0.0), Point2D::new(0.5, 1.0)),
            &paper,
            &cfg,
        );
        assert!(!mid.is_on_edge(&paper));
    }
}
