//! Axiom O7: fold a line onto itself so that a point lands on another
//! line.

use crate::builder::{Builder, Halt};
use crate::config::Config;
use crate::geom::{Line2D, EPS};
use crate::paper::Paper;
use crate::refs::{LineDef, LineRef, PointOrLine, Rank};

use super::{LineView, MarkView};

/// The crease perpendicular to `v2` that carries `m1` onto `v1`.
///
/// Folding `v2` onto itself forces the crease perpendicular to it, which
/// leaves one degree of freedom: sliding along `v2` until `m1` reaches
/// `v1`. No solution exists when `v1` is parallel to the crease.
pub(crate) fn construct(
    cfg: &Config,
    paper: &Paper,
    v1: &LineView,
    m1: &MarkView,
    v2: &LineView,
) -> Option<LineRef> {
    let (u1, d1) = (v1.l.u, v1.l.d);
    let p1 = m1.p;

    let u = v2.l.u.perpendicular();
    let uf1 = u.dot(u1);
    if uf1.abs() < EPS {
        return None; // crease parallel to the target line
    }
    let d = (d1 + 2.0 * p1.dot(u) * uf1 - p1.dot(u1)) / (2.0 * uf1);
    let l = Line2D::new(d, u);

    // The crease must meet v2 on the paper.
    let pivot = l.intersection(&v2.l)?;
    if !paper.encloses(pivot) {
        return None;
    }

    // The image of the moving point must land on the paper.
    let p1_image = l.fold(p1);
    if !paper.encloses(p1_image) {
        return None;
    }

    // A point already on its target line makes the alignment ill-defined.
    if v1.l.contains(p1) {
        return None;
    }

    let moves = if cfg.visibility_matters {
        // The fold flips everything on one side of the crease. The
        // moving element must be visible on the side that flips, taken
        // as the shorter side for the point and the longer for the line.
        let (lp1, lp2) = paper.clip_line(&l)?;
        let tangent = l.u.perpendicular();
        let mut t1 = (lp1 - pivot).dot(tangent);
        let mut t2 = (lp2 - pivot).dot(tangent);
        let tp = (p1 - pivot).dot(tangent);
        if t1 * tp < 0.0 {
            std::mem::swap(&mut t1, &mut t2);
        }
        // t1 now parameterizes the crease endpoint on the p1 side.
        if m1.on_edge && t1.abs() <= t2.abs() {
            PointOrLine::Point
        } else if v1.on_edge && t1.abs() >= t2.abs() {
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
        1 + v1.rank + m1.rank + v2.rank,
        LineDef::LineOntoSelfPointToLine {
            l1: v1.id,
            p1: m1.id,
            l2: v2.id,
            moves,
        },
        paper,
        cfg,
    ))
}

/// Enumerate all (line, mark, line) triples whose ranks sum to
/// `rank - 1`.
pub(crate) fn make_all(b: &mut Builder, rank: Rank) -> Result<(), Halt> {
    for irank in 0..=(rank - 1) {
        for jrank in 0..=(rank - 1 - irank) {
            let krank = rank - 1 - irank - jrank;
            let ni = b.lines_in_rank(irank);
            for i in 0..ni {
                let v1 = b.line_view(irank, i);
                let nj = b.marks_in_rank(jrank);
                for j in 0..nj {
                    let m1 = b.mark_view(jrank, j);
                    let nk = b.lines_in_rank(krank);
                    for k in 0..nk {
                        if irank == krank && i == k {
                            continue; // the two lines must differ
                        }
                        if b.lines_full() {
                            return Ok(());
                        }
                        let v2 = b.line_view(krank, k);
                        let cand = construct(&b.cfg, &b.paper, &v1, &m1, &v2);
                        b.add_line(cand)?;
                    }
                }
            }
        }
    }
    Ok(())
}
