//! Marks from the intersection of two reference lines.

use crate::builder::{Builder, Halt};
use crate::config::Config;
use crate::paper::Paper;
use crate::refs::{Mark, MarkDef, Rank};

use super::LineView;

/// The mark where two lines cross.
///
/// Rejected if the crossing is off the paper or the lines meet at too
/// shallow an angle to locate the point precisely.
pub(crate) fn construct(
    cfg: &Config,
    paper: &Paper,
    v1: &LineView,
    v2: &LineView,
) -> Option<Mark> {
    let p = v1.l.intersection(&v2.l)?;

    if !paper.encloses(p) {
        return None;
    }

    if v1.l.u.dot(v2.l.u.perpendicular()).abs() < cfg.min_angle_sine {
        return None;
    }

    Some(Mark::finish(
        p,
        v1.rank + v2.rank,
        MarkDef::Intersection {
            l1: v1.id,
            l2: v2.id,
        },
        paper,
        cfg,
    ))
}

/// Enumerate all line pairs whose ranks sum to `rank`.
pub(crate) fn make_all(b: &mut Builder, rank: Rank) -> Result<(), Halt> {
    for irank in 0..=(rank / 2) {
        let jrank = rank - irank;
        let same = irank == jrank;
        let ni = b.lines_in_rank(irank);
        for i in usize::from(same)..ni {
            let v1 = b.line_view(irank, i);
            let nj = if same { i } else { b.lines_in_rank(jrank) };
            for j in 0..nj {
                if b.marks_full() {
                    return Ok(());
                }
                let v2 = b.line_view(jrank, j);
                let cand = construct(&b.cfg, &b.paper, &v1, &v2);
                b.add_mark(cand)?;
            }
        }
    }
    Ok(())
}
