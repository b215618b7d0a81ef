//! Axiom O3: bring one line onto another (angle bisector).

use crate::builder::{Builder, Halt};
use crate::config::Config;
use crate::geom::Line2D;
use crate::paper::Paper;
use crate::refs::{LineDef, LineMover, LineRef, Rank};

use super::LineView;

/// One of the two bisector creases that map one line onto the other.
///
/// Parallel lines have a single solution (the midline), taken as root 0.
/// Visibility: an on-edge argument moves; failing that, whichever line
/// folds entirely onto the paper moves.
pub(crate) fn construct(
    cfg: &Config,
    paper: &Paper,
    v1: &LineView,
    v2: &LineView,
    root: u8,
) -> Option<LineRef> {
    let (l1, l2) = (&v1.l, &v2.l);

    let l = if l1.is_parallel_to(l2) {
        if root != 0 {
            return None; // parallel lines have no second bisector
        }
        Line2D::new(0.5 * (l1.d + l2.d * l2.u.dot(l1.u)), l1.u)
    } else {
        let q = l1.intersection(l2)?;
        let u = if root == 0 {
            (l1.u + l2.u).normalized()
        } else {
            (l1.u - l2.u).normalized()
        };
        Line2D::new(q.dot(u), u)
    };

    if !paper.interior_overlaps(&l) {
        return None;
    }

    let moves = if cfg.visibility_matters {
        if v1.on_edge {
            LineMover::L1
        } else if v2.on_edge {
            LineMover::L2
        } else {
            // Neither argument is an edge; accept only if one of them
            // folds entirely onto the paper.
            let folds_inside = |arg: &Line2D| {
                paper.clip_line(arg).is_some_and(|(a, b)| {
                    paper.encloses(l.fold(a)) && paper.encloses(l.fold(b))
                })
            };
            if folds_inside(l1) {
                LineMover::L1
            } else if folds_inside(l2) {
                LineMover::L2
            } else {
                return None;
            }
        }
    } else {
        LineMover::L1
    };

    if paper.makes_skinny_flap(&l, cfg.min_aspect_ratio) {
        return None;
    }

    Some(LineRef::finish(
        l,
        1 + v1.rank + v2.rank,
        LineDef::LineToLine {
            l1: v1.id,
            l2: v2.id,
            root,
            moves,
        },
        paper,
        cfg,
    ))
}

/// Enumerate all line pairs whose ranks sum to `rank - 1`, trying both
/// roots of each pair.
pub(crate) fn make_all(b: &mut Builder, rank: Rank) -> Result<(), Halt> {
    for irank in 0..=((rank - 1) / 2) {
        let jrank = rank - 1 - irank;
        let same = irank == jrank;
        let ni = b.lines_in_rank(irank);
        for i in usize::from(same)..ni {
            let v1 = b.line_view(irank, i);
            let nj = if same { i } else { b.lines_in_rank(jrank) };
            for j in 0..nj {
                let v2 = b.line_view(jrank, j);
                for root in 0..2 {
                    if b.lines_full() {
                        return Ok(());
                    }
                    let cand = construct(&b.cfg, &b.paper, &v1, &v2, root);
                    b.add_line(cand)?;
                }
            }
        }
    }
    Ok(())
}
