//! Axiom O4: fold a line onto itself with the crease through a point.

use crate::builder::{Builder, Halt};
use crate::config::Config;
use crate::geom::Line2D;
use crate::paper::Paper;
use crate::refs::{LineDef, LineRef, Rank};

use super::{LineView, MarkView};

/// The crease perpendicular to a line passing through a mark.
///
/// The crease meets the folded line at the projection of the mark onto
/// it; that meeting point must lie on the paper. Always visible.
pub(crate) fn construct(
    cfg: &Config,
    paper: &Paper,
    v1: &LineView,
    m1: &MarkView,
) -> Option<LineRef> {
    let (u1, d1) = (v1.l.u, v1.l.d);

    let u = u1.perpendicular();
    let l = Line2D::new(m1.p.dot(u), u);

    let projection = m1.p + (d1 - m1.p.dot(u1)) * u1;
    if !paper.encloses(projection) {
        return None;
    }

    if paper.makes_skinny_flap(&l, cfg.min_aspect_ratio) {
        return None;
    }

    Some(LineRef::finish(
        l,
        1 + v1.rank + m1.rank,
        LineDef::LineOntoSelf {
            l1: v1.id,
            p1: m1.id,
        },
        paper,
        cfg,
    ))
}

/// Enumerate all (line, mark) pairs whose ranks sum to `rank - 1`.
pub(crate) fn make_all(b: &mut Builder, rank: Rank) -> Result<(), Halt> {
    for irank in 0..=(rank - 1) {
        let jrank = rank - 1 - irank;
        let ni = b.lines_in_rank(irank);
        for i in 0..ni {
            let v1 = b.line_view(irank, i);
            let nj = b.marks_in_rank(jrank);
            for j in 0..nj {
                if b.lines_full() {
                    return Ok(());
                }
                let m1 = b.mark_view(jrank, j);
                let cand = construct(&b.cfg, &b.paper, &v1, &m1);
                b.add_line(cand)?;
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

    #[test]
    fn test_perpendicular_through_point() {
        let paper = Paper::new(1.0, 1.0);
        let cfg = Config::default();
        let bottom = LineView {
            id: LineId(0),
            l: *paper.bottom_edge(),
            rank: 0,
            on_edge: true,
        };
        let mark = MarkView {
            id: MarkId(0),
            p: Point2D::new(0.25, 0.5),
            rank: 1,
            on_edge: false,
        };

        let line = construct(&cfg, &paper, &bottom, &mark).unwrap();
        // Vertical crease through x = 0.25.
        assert!(line.l.contains(Point2D::new(0.25, 0.0)));
        assert!(line.l.contains(Point2D::new(0.25, 1.0)));
        assert_eq!(line.rank, 2);
    }

    #[test]
    fn test_projection_off_paper_rejected() {
        let paper = Paper::new(1.0, 1.0);
        let cfg = Config::default();
        // A line whose nearby portion is off the paper: x = 2.
        let offside = LineView {
            id: LineId(0),
            l: Line2D::through_points(Point2D::new(2.0, 0.0), Point2D::new(2.0, 1.0)),
            rank: 0,
            on_edge: false,
        };
        let mark = MarkView {
            id: MarkId(0),
            p: Point2D::new(0.5, 0.5),
            rank: 0,
            on_edge: false,
        };

        assert!(construct(&cfg, &paper, &offside, &mark).is_none());
    }
}
