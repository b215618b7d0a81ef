//! Axiom O2: bring one point onto another.

use crate::builder::{Builder, Halt};
use crate::config::Config;
use crate::geom::Line2D;
use crate::paper::Paper;
use crate::refs::{LineDef, LineRef, PointMover, Rank};

use super::MarkView;

/// The perpendicular bisector crease that maps one mark onto the other.
///
/// With opaque paper the moving point must be visible, i.e. on an edge;
/// the first mark on an edge becomes the mover.
pub(crate) fn construct(
    cfg: &Config,
    paper: &Paper,
    m1: &MarkView,
    m2: &MarkView,
) -> Option<LineRef> {
    let u = (m2.p - m1.p).normalized();
    let d = 0.5 * (m1.p + m2.p).dot(u);
    let l = Line2D::new(d, u);

    let moves = if cfg.visibility_matters {
        if m1.on_edge {
            PointMover::P1
        } else if m2.on_edge {
            PointMover::P2
        } else {
            return None;
        }
    } else {
        PointMover::P1
    };

    if paper.makes_skinny_flap(&l, cfg.min_aspect_ratio) {
        return None;
    }

    Some(LineRef::finish(
        l,
        1 + m1.rank + m2.rank,
        LineDef::PointToPoint {
            p1: m1.id,
            p2: m2.id,
            moves,
        },
        paper,
        cfg,
    ))
}

/// Enumerate all mark pairs whose ranks sum to `rank - 1`.
pub(crate) fn make_all(b: &mut Builder, rank: Rank) -> Result<(), Halt> {
    for irank in 0..=((rank - 1) / 2) {
        let jrank = rank - 1 - irank;
        let same = irank == jrank;
        let ni = b.marks_in_rank(irank);
        for i in usize::from(same)..ni {
            let m1 = b.mark_view(irank, i);
            let nj = if same { i } else { b.marks_in_rank(jrank) };
            for j in 0..nj {
                if b.lines_full() {
                    return Ok(());
                }
                let m2 = b.mark_view(jrank, j);
                let cand = construct(&b.cfg, &b.paper, &m1, &m2);
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
    use crate::refs::MarkId;

    fn mark(id: u32, x: f64, y: f64, paper: &Paper) -> MarkView {
        MarkView {
            id: MarkId(id),
            p: Point2D::new(x, y),
            rank: 0,
            on_edge: paper.point_on_edge(Point2D::new(x, y)),
        }
    }

    #[test]
    fn test_corner_to_corner_gives_center_line() {
        let paper = Paper::new(1.0, 1.0);
        let cfg = Config::default();
        let m1 = mark(0, 0.0, 0.0, &paper);
        let m2 = mark(1, 1.0, 0.0, &paper);

        let line = construct(&cfg, &paper, &m1, &m2).unwrap();
        // Perpendicular bisector of the bottom edge: x = 0.5.
        assert!(line.l.contains(Point2D::new(0.5, 0.0)));
        assert!(line.l.contains(Point2D::new(0.5, 1.0)));
        assert_eq!(line.rank, 1);
        assert!(matches!(
            line.def,
            LineDef::PointToPoint {
                moves: PointMover::P1,
                ..
            }
        ));
    }

    #[test]
    fn test_interior_points_invisible() {
        let paper = Paper::new(1.0, 1.0);
        let cfg = Config::default();
        let m1 = mark(0, 0.3, 0.3, &paper);
        let m2 = mark(1, 0.7, 0.7, &paper);

        // Neither point is on an edge, so the alignment cannot be made
        // with opaque paper.
        assert!(construct(&cfg, &paper, &m1, &m2).is_none());

        let mut translucent = cfg.clone();
        translucent.visibility_matters = false;
        assert!(construct(&translucent, &paper, &m1, &m2).is_some());
    }
}
