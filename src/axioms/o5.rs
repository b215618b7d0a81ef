//! Axiom O5: bring a point onto a line with the crease through a second
//! point.

use crate::builder::{Builder, Halt};
use crate::config::Config;
use crate::geom::{Line2D, EPS};
use crate::paper::Paper;
use crate::refs::{LineDef, LineRef, PointOrLine, Rank};

use super::{LineView, MarkView};

/// One of the up-to-two creases through `m2` that bring `m1` onto the
/// line.
///
/// The landing point is where a circle around `m2` through `m1` meets
/// the line; `root` selects the tangent side. Alignments where either
/// mark already lies on the line are trivial and rejected.
pub(crate) fn construct(
    cfg: &Config,
    paper: &Paper,
    m1: &MarkView,
    v1: &LineView,
    m2: &MarkView,
    root: u8,
) -> Option<LineRef> {
    let l1 = &v1.l;
    let (u1, d1) = (l1.u, l1.d);

    if l1.contains(m1.p) || l1.contains(m2.p) {
        return None;
    }

    let a = d1 - m2.p.dot(u1);
    let b2 = (m2.p - m1.p).length_squared() - a * a;
    if b2 < 0.0 {
        return None; // the circle around m2 misses the line
    }
    let b = b2.sqrt();
    if b < EPS && root == 1 {
        return None; // tangent case: the two roots coincide
    }

    let u1p = u1.perpendicular();
    let landing = if root == 0 {
        m2.p + a * u1 + b * u1p
    } else {
        m2.p + a * u1 - b * u1p
    };
    if !paper.encloses(landing) {
        return None;
    }

    let u = (landing - m1.p).normalized();
    let l = Line2D::new(m2.p.dot(u), u);

    let moves = if cfg.visibility_matters {
        if m1.on_edge {
            PointOrLine::Point
        } else if v1.on_edge {
            PointOrLine::Line
        } else {
            return None;
        }
    } else {
        PointOrLine::Point
    };

    if paper.makes_skinny_flap(&l, cfg.min_aspect_ratio) {
        return None;
    }

    Some(LineRef::finish(
        l,
        1 + m1.rank + v1.rank + m2.rank,
        LineDef::PointToLineThroughPoint {
            p1: m1.id,
            l1: v1.id,
            p2: m2.id,
            root,
            moves,
        },
        paper,
        cfg,
    ))
}

/// Enumerate all (mark, line, mark) triples whose ranks sum to
/// `rank - 1`, trying both roots of each triple.
pub(crate) fn make_all(b: &mut Builder, rank: Rank) -> Result<(), Halt> {
    for irank in 0..=(rank - 1) {
        for jrank in 0..=(rank - 1 - irank) {
            let krank = rank - 1 - irank - jrank;
            let ni = b.marks_in_rank(irank);
            for i in 0..ni {
                let m1 = b.mark_view(irank, i);
                let nj = b.lines_in_rank(jrank);
                for j in 0..nj {
                    let v1 = b.line_view(jrank, j);
                    let nk = b.marks_in_rank(krank);
                    for k in 0..nk {
                        if irank == krank && i == k {
                            continue; // the pivot must be a different mark
                        }
                        let m2 = b.mark_view(krank, k);
                        for root in 0..2 {
                            if b.lines_full() {
                                return Ok(());
                            }
                            let cand = construct(&b.cfg, &b.paper, &m1, &v1, &m2, root);
                            b.add_line(cand)?;
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
    use crate::geom::Point2D;
    use crate::refs::{LineId, MarkId};

    fn setup() -> (Paper, Config) {
        (Paper::new(1.0, 1.0), Config::default())
    }

    fn mark(id: u32, x: f64, y: f64, paper: &Paper) -> MarkView {
        MarkView {
            id: MarkId(id),
            p: Point2D::new(x, y),
            rank: 0,
            on_edge: paper.point_on_edge(Point2D::new(x, y)),
        }
    }

    #[test]
    fn test_fold_lands_point_on_line() {
        let (paper, cfg) = setup();
        let m1 = mark(0, 1.0, 0.0, &paper); // bottom-right corner
        let m2 = mark(1, 0.0, 0.0, &paper); // pivot at bottom-left
        let top = LineView {
            id: LineId(0),
            l: *paper.top_edge(),
            rank: 0,
            on_edge: true,
        };

        for root in 0..2 {
            if let Some(line) = construct(&cfg, &paper, &m1, &top, &m2, root) {
                // The crease passes through the pivot and the folded
                // image of m1 lies on the top edge.
                assert!(line.l.contains(m2.p));
                let image = line.l.fold(m1.p);
                assert!(top.l.contains(image), "root {}: image off the line", root);
                assert!(paper.encloses(image));
            }
        }
    }

    #[test]
    fn test_point_already_on_line_rejected() {
        let (paper, cfg) = setup();
        let m1 = mark(0, 0.5, 1.0, &paper); // already on the top edge
        let m2 = mark(1, 0.0, 0.0, &paper);
        let top = LineView {
            id: LineId(0),
            l: *paper.top_edge(),
            rank: 0,
            on_edge: true,
        };

        assert!(construct(&cfg, &paper, &m1, &top, &m2, 0).is_none());
    }

    #[test]
    fn test_unreachable_line_rejected() {
        let (paper, cfg) = setup();
        // Pivot at the bottom-left corner, moving point right next to
        // it: the circle around the pivot cannot reach the top edge.
        let m1 = mark(0, 0.1, 0.0, &paper);
        let m2 = mark(1, 0.0, 0.0, &paper);
        let top = LineView {
            id: LineId(0),
            l: *paper.top_edge(),
            rank: 0,
            on_edge: true,
        };

        assert!(construct(&cfg, &paper, &m1, &top, &m2, 0).is_none());
        assert!(construct(&cfg, &paper, &m1, &top, &m2, 1).is_none());
    }
}
