//! Reference marks: points on the paper.

use crate::config::Config;
use crate::geom::Point2D;
use crate::paper::Paper;
use crate::pool::PoolItem;

use super::{LineId, Rank, RefKey, Step};

/// How a mark came to be.
#[derive(Clone, Debug)]
pub enum MarkDef {
    /// A mark present before any folding, such as a corner.
    Original {
        /// Display name, e.g. "the bottom left corner".
        name: String,
    },
    /// The intersection of two reference lines.
    Intersection {
        /// First line.
        l1: LineId,
        /// Second line.
        l2: LineId,
    },
}

/// A reference mark: a point on the paper together with its rank, bucket
/// key and derivation.
#[derive(Clone, Debug)]
pub struct Mark {
    /// Location of the mark.
    pub p: Point2D,
    /// Number of creases needed to construct it.
    pub rank: Rank,
    /// Bucket key; non-zero for every stored mark.
    pub key: RefKey,
    /// Derivation record.
    pub def: MarkDef,
}

impl Mark {
    /// Finish constructing a mark whose geometry has passed validation,
    /// assigning its bucket key.
    pub(crate) fn finish(p: Point2D, rank: Rank, def: MarkDef, paper: &Paper, cfg: &Config) -> Self {
        Self {
            p,
            rank,
            key: mark_key(p, paper, cfg.num_x, cfg.num_y),
            def,
        }
    }

    /// An original (pre-existing) mark such as a corner.
    pub(crate) fn original(p: Point2D, rank: Rank, name: &str, paper: &Paper, cfg: &Config) -> Self {
        Self::finish(p, rank, MarkDef::Original { name: name.to_string() }, paper, cfg)
    }

    /// Euclidean distance to a target point.
    #[inline]
    pub fn distance_to(&self, target: Point2D) -> f64 {
        self.p.distance(target)
    }

    /// True if the mark lies on one of the paper's edges.
    pub fn is_on_edge(&self, paper: &Paper) -> bool {
        paper.point_on_edge(self.p)
    }

    /// False for originals, true for constructed marks.
    pub fn is_derived(&self) -> bool {
        !matches!(self.def, MarkDef::Original { .. })
    }

    /// Always false: marks are never the focus of a fold.
    pub fn is_action_line(&self) -> bool {
        false
    }

    /// True if `other` is one of this mark's direct parents.
    pub fn uses_immediate(&self, other: Step) -> bool {
        match self.def {
            MarkDef::Original { .. } => false,
            MarkDef::Intersection { l1, l2 } => {
                other == Step::Line(l1) || other == Step::Line(l2)
            }
        }
    }
}

impl PoolItem for Mark {
    fn key(&self) -> RefKey {
        self.key
    }

    fn rank(&self) -> Rank {
        self.rank
    }
}

/// Discretize a point into its bucket key.
///
/// The paper is divided into `num_x` by `num_y` cells; the key is the
/// cell index plus one, so zero never denotes a valid mark.
pub(crate) fn mark_key(p: Point2D, paper: &Paper, num_x: u32, num_y: u32) -> RefKey {
    let fx = p.x / paper.width();
    let fy = p.y / paper.height();
    let nx = (0.5 + fx * num_x as f64).floor() as u64;
    let ny = (0.5 + fy * num_y as f64).floor() as u64;
    (1 + nx * num_y as u64 + ny) as RefKey
}

#[cfg(test)]
mod tests {
    use super::*;

    fn setup() -> (Paper, Config) {
        (Paper::new(1.0, 1.0), Config::default())
    }

    #[test]
    fn test_key_is_nonzero_and_bucketed() {
        let (paper, cfg) = setup();
        let a = Mark::original(Point2D::new(0.0, 0.0), 0, "a", &paper, &cfg);
        let b = Mark::original(Point2D::new(1.0, 1.0), 0, "b", &paper, &cfg);
        assert_ne!(a.key, 0);
        assert_ne!(b.key, 0);
        assert_ne!(a.key, b.key);

        // Points closer together than a bucket share a key.
        let c = Mark::original(Point2D::new(0.5, 0.5), 0, "c", &paper, &cfg);
        let d = Mark::original(Point2D::new(0.500_000_01, 0.5), 0, "d", &paper, &cfg);
        assert_eq!(c.key, d.key);
    }

    #[test]
    fn test_distance_and_edges() {
        let (paper, cfg) = setup();
        let corner = Mark::original(Point2D::new(0.0, 0.0), 0, "corner", &paper, &cfg);
        assert!((corner.distance_to(Point2D::new(3.0, 4.0)) - 5.0).abs() < 1e-12);
        assert!(corner.is_on_edge(&paper));
        assert!(!corner.is_derived());

        let mid = Mark::finish(
            Point2D::new(0.5, 0.5),
            2,
            MarkDef::Intersection {
                l1: LineId(0),
                l2: LineId(1),
            },
            &paper,
            &cfg,
        );
        assert!(!mid.is_on_edge(&paper));
        assert!(mid.is_derived());
        assert!(mid.uses_immediate(Step::Line(LineId(0))));
        assert!(!mid.uses_immediate(Step::Line(LineId(2))));
    }
}
