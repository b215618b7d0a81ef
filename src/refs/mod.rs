//! Reference objects: the marks (points) and lines stored in the database.
//!
//! A reference knows its geometry, its rank (how many creases it takes to
//! construct), a bucket key used for deduplication, and a derivation
//! record naming the axiom and the parent references it was built from.
//! Parents are identified by typed handles into the database's flat
//! per-family arrays; parents always precede their children, so handles
//! never dangle.

pub mod line;
pub mod mark;

pub use line::{LineDef, LineMover, LineRef, PairMover, PointMover, PointOrLine};
pub use mark::{Mark, MarkDef};

/// Number of creases needed to construct a reference.
pub type Rank = u16;

/// Bucket key discretizing a reference's geometry. Valid keys are
/// non-zero; a reference that fails construction never receives a key
/// and is never stored.
pub type RefKey = u32;

/// Handle of a mark in its database's mark array.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct MarkId(pub(crate) u32);

/// Handle of a line in its database's line array.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct LineId(pub(crate) u32);

impl MarkId {
    /// Position of the mark in [`crate::Database::marks`].
    #[inline]
    pub fn index(&self) -> usize {
        self.0 as usize
    }
}

impl LineId {
    /// Position of the line in [`crate::Database::lines`].
    #[inline]
    pub fn index(&self) -> usize {
        self.0 as usize
    }
}

/// A reference of either family.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Step {
    /// A mark.
    Mark(MarkId),
    /// A line.
    Line(LineId),
}
