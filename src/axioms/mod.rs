//! The Huzita-Hatori axiom constructors.
//!
//! One module per single-fold alignment (O1-O7) plus the line-line
//! intersection that produces marks. Each constructor takes snapshots of
//! its parent references, computes the candidate fold line, and applies
//! the axiom's validity filters; a candidate that fails any filter is
//! simply dropped. Rejection is the norm: the vast majority of parent
//! combinations are geometrically impossible, invisible on opaque paper,
//! or would make a flap too skinny to fold.
//!
//! Each module's `make_all` enumerates every admissible combination of
//! parent ranks for a target rank, stopping early if the population cap
//! is reached.

pub(crate) mod intersection;
pub(crate) mod o1;
pub(crate) mod o2;
pub(crate) mod o3;
pub(crate) mod o4;
pub(crate) mod o5;
pub(crate) mod o6;
pub(crate) mod o7;

use crate::geom::{Line2D, Point2D};
use crate::refs::{LineId, MarkId, Rank};

/// Construction-time snapshot of a parent mark.
#[derive(Clone, Copy, Debug)]
pub(crate) struct MarkView {
    pub id: MarkId,
    pub p: Point2D,
    pub rank: Rank,
    pub on_edge: bool,
}

/// Construction-time snapshot of a parent line.
#[derive(Clone, Copy, Debug)]
pub(crate) struct LineView {
    pub id: LineId,
    pub l: Line2D,
    pub rank: Rank,
    pub on_edge: bool,
}
