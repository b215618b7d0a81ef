//! Axiom O6: bring two points onto two lines simultaneously.
//!
//! The strongest of the single-fold alignments: the fold point on the
//! first line is parameterized by the root of a cubic, so a single
//! parent tuple yields up to three creases. This is the axiom that
//! reaches cube roots, which no compass-and-straightedge construction
//! can.

use crate::builder::{Builder, Halt};
use crate::config::Config;
use crate::geom::{Line2D, Point2D, EPS};
use crate::paper::Paper;
use crate::refs::{LineDef, LineRef, PairMover, Rank};

use super::{LineView, MarkView};

/// Real roots of the alignment's polynomial, in the order the root
/// selector counts them.
#[derive(Clone, Copy, Debug, Default)]
pub(crate) struct Roots {
    vals: [f64; 3],
    len: usize,
}

impl Roots {
    fn push(&mut self, r: f64) {
        self.vals[self.len] = r;
        self.len += 1;
    }

    /// The roots as a slice.
    pub fn as_slice(&self) -> &[f64] {
        &self.vals[..self.len]
    }
}

/// Solve for the fold points of the alignment taking `m1` onto `v1` and
/// `m2` onto `v2`.
///
/// Each root parameterizes the image of `m1` along `v1`. Degenerate
/// tuples (a point already on its line, coincident points or lines)
/// yield no roots. Eliminating the fold from the two tangency
/// constraints leaves one polynomial in the image parameter; depending
/// on which leading coefficients vanish it is cubic, quadratic or
/// linear, solved by Cardano's formula in the cubic case.
pub(crate) fn fold_roots(m1: &MarkView, v1: &LineView, m2: &MarkView, v2: &LineView) -> Roots {
    let p1 = m1.p;
    let (u1, d1) = (v1.l.u, v1.l.d);
    let p2 = m2.p;
    let (u2, d2) = (v2.l.u, v2.l.d);

    let mut roots = Roots::default();

    if v1.l.contains(p1) || v2.l.contains(p2) {
        return roots;
    }
    if p1.approx_eq(p2) || v1.l.coincides_with(&v2.l) {
        return roots;
    }

    let u1p = u1.perpendicular();
    let v1v = p1 + d1 * u1 - 2.0 * p2;
    let v2v = d1 * u1 - p1;

    let c1 = p2.dot(u2) - d2;
    let c2 = 2.0 * v2v.dot(u1p);
    let c3 = v2v.dot(v2v);
    let c4 = (v1v + v2v).dot(u1p);
    let c5 = v1v.dot(v2v);
    let c6 = u1p.dot(u2);
    let c7 = v2v.dot(u2);

    // a r^3 + b r^2 + c r + d == 0
    let a = c6;
    let b = c1 + c4 * c6 + c7;
    let c = c1 * c2 + c5 * c6 + c4 * c7;
    let d = c1 * c3 + c5 * c7;

    if a.abs() > EPS {
        // Cubic: Cardano's formula.
        let a2 = b / a;
        let a1 = c / a;
        let a0 = d / a;

        let q = (3.0 * a1 - a2 * a2) / 9.0;
        let r = (9.0 * a2 * a1 - 27.0 * a0 - 2.0 * a2 * a2 * a2) / 54.0;
        let discr = q * q * q + r * r;
        let offset = -a2 / 3.0;

        if discr > 0.0 {
            // One real root.
            let rd = discr.sqrt();
            roots.push(offset + (r + rd).cbrt() + (r - rd).cbrt());
        } else if discr.abs() < EPS {
            // Two real roots (one repeated).
            let s = r.cbrt();
            roots.push(offset + 2.0 * s);
            roots.push(offset - s);
        } else {
            // Three real roots, via the trigonometric form.
            let rd = (-discr).sqrt();
            let phi = rd.atan2(r) / 3.0;
            let rs = (r * r - discr).powf(1.0 / 6.0);
            let sr = rs * phi.cos();
            let si = rs * phi.sin();
            roots.push(offset + 2.0 * sr);
            roots.push(offset - sr - 3f64.sqrt() * si);
            roots.push(offset - sr + 3f64.sqrt() * si);
        }
    } else if b.abs() > EPS {
        // Quadratic.
        let disc = c * c - 4.0 * b * d;
        let q1 = -c / (2.0 * b);
        if disc < 0.0 {
            return roots;
        } else if disc.abs() < EPS {
            roots.push(q1);
        } else {
            let q2 = disc.sqrt() / (2.0 * b);
            roots.push(q1 + q2);
            roots.push(q1 - q2);
        }
    } else if c.abs() > EPS {
        // Linear.
        roots.push(-d / c);
    }
    // All coefficients vanishing: an ill-formed equation, no roots.

    roots
}

/// Build the crease for one root of the alignment.
pub(crate) fn construct(
    cfg: &Config,
    paper: &Paper,
    m1: &MarkView,
    v1: &LineView,
    m2: &MarkView,
    v2: &LineView,
    rc: f64,
    root: u8,
) -> Option<LineRef> {
    let (u1, d1) = (v1.l.u, v1.l.d);
    let u1p = u1.perpendicular();

    let p1_image = d1 * u1 + rc * u1p;
    if p1_image.approx_eq(m1.p) {
        return None; // the fold would be through p1 itself
    }

    let u = (p1_image - m1.p).normalized();
    let l = Line2D::new(u.dot(Point2D::midpoint(p1_image, m1.p)), u);
    let p2_image = l.fold(m2.p);

    if !paper.encloses(p1_image) || !paper.encloses(p2_image) {
        return None;
    }

    // If the points sit on the same side of the crease, both points (or
    // both lines) move together; on opposite sides, one of each moves.
    let same_side = (m1.p.dot(l.u) - l.d) * (m2.p.dot(l.u) - l.d) >= 0.0;

    let moves = if cfg.visibility_matters {
        if same_side {
            if m1.on_edge && m2.on_edge {
                PairMover::BothPoints
            } else if v1.on_edge && v2.on_edge {
                PairMover::BothLines
            } else {
                return None;
            }
        } else if m1.on_edge && v2.on_edge {
            PairMover::P1L2
        } else if m2.on_edge && v1.on_edge {
            PairMover::P2L1
        } else {
            return None;
        }
    } else if same_side {
        PairMover::BothPoints
    } else {
        PairMover::P1L2
    };

    if paper.makes_skinny_flap(&l, cfg.min_aspect_ratio) {
        return None;
    }

    Some(LineRef::finish(
        l,
        1 + m1.rank + v1.rank + m2.rank + v2.rank,
        LineDef::TwoPointsToTwoLines {
            p1: m1.id,
            l1: v1.id,
            p2: m2.id,
            l2: v2.id,
            root,
            moves,
        },
        paper,
        cfg,
    ))
}

/// Enumerate all (mark, line, mark, line) tuples whose ranks sum to
/// `rank - 1`.
///
/// The two points are order-irrelevant, so their rank split follows the
/// diagonal rule; the two lines play distinct roles, so every ordered
/// split is visited.
pub(crate) fn make_all(b: &mut Builder, rank: Rank) -> Result<(), Halt> {
    for psrank in 0..=(rank - 1) {
        let lsrank = rank - 1 - psrank;
        for irank in 0..=(psrank / 2) {
            let jrank = psrank - irank;
            let psame = irank == jrank;
            for krank in 0..=lsrank {
                let lrank = lsrank - krank;
                let lsame = krank == lrank;

                let ni = b.marks_in_rank(irank);
                for i in usize::from(psame)..ni {
                    let m1 = b.mark_view(irank, i);
                    let nj = if psame { i } else { b.marks_in_rank(jrank) };
                    for j in 0..nj {
                        let m2 = b.mark_view(jrank, j);
                        let nk = b.lines_in_rank(krank);
                        for k in 0..nk {
                            let v1 = b.line_view(krank, k);
                            let nl = b.lines_in_rank(lrank);
                            for ll in 0..nl {
                                if lsame && k == ll {
                                    continue;
                                }
                                let v2 = b.line_view(lrank, ll);

                                let roots = fold_roots(&m1, &v1, &m2, &v2);
                                if roots.as_slice().is_empty() {
                                    b.tick()?;
                                    continue;
                                }
                                for (root, rc) in roots.as_slice().iter().enumerate() {
                                    if b.lines_full() {
                                        return Ok(());
                                    }
                                    let cand = construct(
                                        &b.cfg, &b.paper, &m1, &v1, &m2, &v2, *rc, root as u8,
                                    );
                                    b.add_line(cand)?;
                                }
                            }
                        }
                    }
                }
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::refs::{LineId, MarkId};

    fn mark(id: u32, x: f64, y: f64, paper: &Paper) -> MarkView {
        MarkView {
            id: MarkId(id),
            p: Point2D::new(x, y),
            rank: 0,
            on_edge: paper.point_on_edge(Point2D::new(x, y)),
        }
    }

    fn line(id: u32, l: Line2D, paper: &Paper) -> LineView {
        LineView {
            id: LineId(id),
            l,
            rank: 0,
            on_edge: paper.line_is_edge(&l),
        }
    }

    #[test]
    fn test_messer_cube_root_of_two() {
        // Peter Messer's construction: on a unit square creased into
        // horizontal thirds, bring the bottom-right corner to the left
        // edge while (1, 1/3) lands on the upper third line. The corner
        // then divides the left edge in the ratio cbrt(2) : 1.
        let paper = Paper::new(1.0, 1.0);
        let cfg = Config::default();

        let corner = mark(0, 1.0, 0.0, &paper);
        let left = line(0, *paper.left_edge(), &paper);
        let third = mark(1, 1.0, 1.0 / 3.0, &paper);
        let upper = line(
            1,
            Line2D::through_points(Point2D::new(0.0, 2.0 / 3.0), Point2D::new(1.0, 2.0 / 3.0)),
            &paper,
        );

        let roots = fold_roots(&corner, &left, &third, &upper);
        assert!(!roots.as_slice().is_empty(), "alignment must have a root");

        let rc = roots.as_slice()[0];
        let fold = construct(&cfg, &paper, &corner, &left, &third, &upper, rc, 0)
            .expect("root 0 must give a valid fold");

        // Image of the corner on the left edge: it lands at
        // y = 1 / (1 + cbrt(2)), dividing the edge so that the segment
        // above it is cbrt(2) times the one below.
        let image = fold.l.fold(corner.p);
        assert!(image.x.abs() < 1e-9, "corner must land on the left edge");
        let ratio = (1.0 - image.y) / image.y;
        assert!(
            (ratio - 2f64.cbrt()).abs() < 1e-6,
            "expected cbrt(2), got {}",
            ratio
        );

        // And (1, 1/3) must land on the upper third line.
        let third_image = fold.l.fold(third.p);
        assert!((third_image.y - 2.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_degenerate_tuples_have_no_roots() {
        let paper = Paper::new(1.0, 1.0);

        let on_line = mark(0, 0.0, 0.5, &paper); // on the left edge
        let left = line(0, *paper.left_edge(), &paper);
        let other = mark(1, 0.7, 0.2, &paper);
        let bottom = line(1, *paper.bottom_edge(), &paper);

        assert!(fold_roots(&on_line, &left, &other, &bottom)
            .as_slice()
            .is_empty());

        // Coincident lines.
        let p = mark(2, 0.5, 0.5, &paper);
        let q = mark(3, 0.2, 0.8, &paper);
        assert!(fold_roots(&p, &left, &q, &left).as_slice().is_empty());
    }
}
