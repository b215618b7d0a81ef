//! Axiom O1: fold a crease through two points.

use crate::builder::{Builder, Halt};
use crate::config::Config;
use crate::geom::Line2D;
use crate::paper::Paper;
use crate::refs::{LineDef, LineRef, Rank};

use super::MarkView;

/// The crease connecting two marks. Always visible; rejected only if it
/// would make a skinny flap.
pub(crate) fn construct(
    cfg: &Config,
    paper: &Paper,
    m1: &MarkView,
    m2: &MarkView,
) -> Option<LineRef> {
    let u = (m2.p - m1.p).perpendicular().normalized();
    let d = 0.5 * (m1.p + m2.p).dot(u);
    let l = Line2D::new(d, u);

    if paper.makes_skinny_flap(&l, cfg.min_aspect_ratio) {
        return None;
    }

    Some(LineRef::finish(
        l,
        1 + m1.rank + m2.rank,
        LineDef::ThroughTwoPoints {
            p1: m1.id,
            p2: m2.id,
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
    fn test_diagonal_through_corners() {
        let paper = Paper::new(1.0, 1.0);
        let cfg = Config::default();
        let m1 = mark(0, 0.0, 0.0, &paper);
        let m2 = mark(1, 1.0, 1.0, &paper);

        let line = construct(&cfg, &paper, &m1, &m2).unwrap();
        assert!(line.l.contains(Point2D::new(0.5, 0.5)));
        assert_eq!(line.rank, 1);
    }

    #[test]
    fn test_crease_along_edge_rejected_as_skinny() {
        let paper = Paper::new(1.0, 1.0);
        let cfg = Config::default();
        let m1 = mark(0, 0.0, 0.0, &paper);
        let m2 = mark(1, 1.0, 0.0, &paper);

        // The "crease" would coincide with the bottom edge and fold
        // nothing over; the flap test rejects it.
        assert!(construct(&cfg, &paper, &m1, &m2).is_none());
    }
}
