//! # Orifold: folding-sequence references for origami design
//!
//! Orifold computes short folding sequences that approximately locate an
//! arbitrary point or line on a rectangular sheet of paper. It builds an
//! exhaustive, rank-bounded database of every mark and crease reachable
//! from the paper's edges and diagonals through the seven Huzita-Hatori
//! axioms, then searches that database for the references closest to a
//! target.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use orifold::{Config, Database, Point2D, Step};
//! use orifold::sequence::Sequence;
//!
//! // Build the reference database (seconds for the default settings).
//! let db = Database::build(Config::default()).unwrap();
//!
//! // Where can I fold to find the point (0.3, 0.7)?
//! let target = Point2D::new(0.3, 0.7);
//! for id in db.find_best_marks(target, 5).unwrap() {
//!     println!("{}", db.mark_report(id, target));
//! }
//!
//! // Folding instructions step by step.
//! let best = db.find_best_marks(target, 1).unwrap()[0];
//! let seq = Sequence::build(&db, Step::Mark(best));
//! for i in 0..seq.len() {
//!     if let Some(sentence) = seq.howto(&db, i) {
//!         println!("{}.", sentence);
//!     }
//! }
//! ```
//!
//! ## Architecture
//!
//! - [`geom`]: points, lines in unit-normal form, bounding boxes
//! - [`paper`]: the sheet, line clipping and fold-validity predicates
//! - [`config`]: build options, YAML-loadable
//! - [`refs`]: the mark and line reference types and their derivations
//! - `axioms` (internal): the seven axiom constructors
//! - [`database`]: the built database and its query engine
//! - [`sequence`]: folding sequences, numbering, diagram blocks, wording
//! - [`diagram`]: the renderer trait and diagram drawing
//! - [`stats`]: accuracy statistics over random trials
//!
//! ## Data Flow
//!
//! ```text
//!  Config ──► Builder ──seeds──► edges, corners, diagonals
//!                │
//!                ├─ per rank: O3 O2 O7 O6 O5 O4 O1 ──► line candidates
//!                │            line × line ───────────► mark candidates
//!                │                  │
//!                │        validity filters (visibility,
//!                │        skinny flaps, paper interior)
//!                │                  │
//!                └──────► bucketed dedup (first key wins) ──► Database
//!                                                               │
//!             find_best_marks / find_best_lines ◄───────────────┘
//!                                │
//!                 Sequence::build (ancestor walk)
//!                                │
//!              diagrams + captions + RefDgmr drawing
//! ```
//!
//! Building is synchronous and single-threaded; hosts that want a
//! responsive UI run it on a worker and use the progress callback, which
//! can also cancel the build and keep the partial database.

mod axioms;
pub mod builder;
pub mod config;
pub mod database;
pub mod diagram;
pub mod error;
pub mod geom;
pub mod paper;
mod pool;
pub mod refs;
pub mod sequence;
pub mod stats;

// Re-export the main types at the crate root.
pub use builder::{BuildProgress, Signal};
pub use config::Config;
pub use database::Database;
pub use diagram::{
    calc_arrow, draw_diagram, ArrowGeometry, LabelStyle, LineStyle, PointStyle, PolyStyle, RefDgmr,
};
pub use error::{Error, Result};
pub use geom::{Bounds, Line2D, Point2D, EPS};
pub use paper::Paper;
pub use refs::{
    LineDef, LineId, LineMover, LineRef, Mark, MarkDef, MarkId, PairMover, PointMover,
    PointOrLine, Rank, RefKey, Step,
};
pub use sequence::{DgmInfo, Sequence};
pub use stats::{StatOptions, StatProgress};
