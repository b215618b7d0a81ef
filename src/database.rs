//! The reference database and its query engine.

use std::cmp::Ordering;
use std::fmt::Write as _;

use crate::builder::{BuildProgress, Builder, Signal};
use crate::config::Config;
use crate::error::{Error, Result};
use crate::geom::{Line2D, Point2D, EPS};
use crate::paper::Paper;
use crate::pool::RefPool;
use crate::refs::{LineId, LineRef, Mark, MarkId, Rank, Step};
use crate::sequence::Sequence;

/// A built reference database: every mark and line reachable within the
/// configured rank, deduplicated into buckets, ready to be searched.
///
/// The database is immutable once built; to change any option, build a
/// new one.
pub struct Database {
    cfg: Config,
    paper: Paper,
    lines: RefPool<LineRef>,
    marks: RefPool<Mark>,
}

impl Database {
    /// Build a database from the given configuration.
    pub fn build(cfg: Config) -> Result<Self> {
        cfg.validate()?;
        Ok(Builder::new(cfg, None).run())
    }

    /// Build a database, reporting progress to a callback.
    ///
    /// The callback may return [`Signal::Cancel`] to stop the build at
    /// the next opportunity; the partially built database is still
    /// internally consistent and queryable.
    pub fn build_with_progress(
        cfg: Config,
        progress: &mut dyn FnMut(&BuildProgress) -> Signal,
    ) -> Result<Self> {
        cfg.validate()?;
        Ok(Builder::new(cfg, Some(progress)).run())
    }

    pub(crate) fn from_parts(
        cfg: Config,
        paper: Paper,
        lines: RefPool<LineRef>,
        marks: RefPool<Mark>,
    ) -> Self {
        Self {
            cfg,
            paper,
            lines,
            marks,
        }
    }

    /// The configuration the database was built with.
    pub fn config(&self) -> &Config {
        &self.cfg
    }

    /// The paper the database was built on.
    pub fn paper(&self) -> &Paper {
        &self.paper
    }

    /// Number of stored lines.
    pub fn num_lines(&self) -> usize {
        self.lines.total()
    }

    /// Number of stored marks.
    pub fn num_marks(&self) -> usize {
        self.marks.total()
    }

    /// All stored lines, in construction order.
    pub fn lines(&self) -> &[LineRef] {
        self.lines.items()
    }

    /// All stored marks, in construction order.
    pub fn marks(&self) -> &[Mark] {
        self.marks.items()
    }

    /// Fetch a line by handle.
    pub fn line(&self, id: LineId) -> &LineRef {
        self.lines.get(id.0)
    }

    /// Fetch a mark by handle.
    pub fn mark(&self, id: MarkId) -> &Mark {
        self.marks.get(id.0)
    }

    /// True if `of` directly uses `other` as a parent.
    pub fn uses_immediate(&self, of: Step, other: Step) -> bool {
        match of {
            Step::Mark(id) => self.mark(id).uses_immediate(other),
            Step::Line(id) => self.line(id).uses_immediate(other),
        }
    }

    /// Check that a target point lies on the paper.
    pub fn validate_mark_target(&self, p: Point2D) -> Result<()> {
        if p.x < 0.0 || p.x > self.paper.width() {
            return Err(Error::TargetOutOfRange(format!(
                "x coordinate should lie between 0 and {}",
                self.paper.width()
            )));
        }
        if p.y < 0.0 || p.y > self.paper.height() {
            return Err(Error::TargetOutOfRange(format!(
                "y coordinate should lie between 0 and {}",
                self.paper.height()
            )));
        }
        Ok(())
    }

    /// Check that two points define a line and return it.
    pub fn validate_line_target(&self, p1: Point2D, p2: Point2D) -> Result<Line2D> {
        if (p1 - p2).length() <= EPS {
            return Err(Error::TargetOutOfRange(format!(
                "the two points must be distinct (separated by at least {:e})",
                EPS
            )));
        }
        Ok(Line2D::through_points(p1, p2))
    }

    /// The best `n` marks for a target point, most preferred first.
    ///
    /// Candidates within `good_enough_error` of the target are ranked by
    /// simplicity (rank) before accuracy; all others by accuracy alone.
    /// Returns an empty list when the database holds no marks.
    pub fn find_best_marks(&self, target: Point2D, n: usize) -> Result<Vec<MarkId>> {
        self.validate_mark_target(target)?;
        let good = self.cfg.good_enough_error;
        let keyed = self
            .marks
            .items()
            .iter()
            .enumerate()
            .map(|(i, m)| (m.distance_to(target), m.rank, i as u32))
            .collect();
        Ok(partial_sort(keyed, n, good)
            .into_iter()
            .map(|(_, _, id)| MarkId(id))
            .collect())
    }

    /// The best `n` lines for a target line, most preferred first.
    ///
    /// Same preference rule as [`Self::find_best_marks`].
    pub fn find_best_lines(&self, target: &Line2D, n: usize) -> Vec<LineId> {
        let good = self.cfg.good_enough_error;
        let keyed = self
            .lines
            .items()
            .iter()
            .enumerate()
            .map(|(i, l)| {
                (
                    l.distance_to(target, &self.paper, &self.cfg),
                    l.rank,
                    i as u32,
                )
            })
            .collect();
        partial_sort(keyed, n, good)
            .into_iter()
            .map(|(_, _, id)| LineId(id))
            .collect()
    }

    /// The best `n` lines for the line through two target points.
    pub fn find_best_lines_between(
        &self,
        p1: Point2D,
        p2: Point2D,
        n: usize,
    ) -> Result<Vec<LineId>> {
        let target = self.validate_line_target(p1, p2)?;
        Ok(self.find_best_lines(&target, n))
    }

    /// The single mark closest to a point by pure distance, rank
    /// breaking ties. Used by the statistics trials.
    pub fn find_nearest_mark(&self, target: Point2D) -> Option<MarkId> {
        self.marks
            .items()
            .iter()
            .enumerate()
            .map(|(i, m)| (m.distance_to(target), m.rank, i as u32))
            .min_by(|a, b| {
                a.0.total_cmp(&b.0)
                    .then_with(|| a.1.cmp(&b.1))
                    .then_with(|| a.2.cmp(&b.2))
            })
            .map(|(_, _, id)| MarkId(id))
    }

    /// One-line summary of a found mark: its position, error and rank.
    pub fn mark_solution_line(&self, id: MarkId, target: Point2D) -> String {
        let mark = self.mark(id);
        let p = mark.p.chopped();
        format!(
            "Solution ({:.4},{:.4}): err = {:.4} (rank {})",
            p.x,
            p.y,
            mark.distance_to(target),
            mark.rank
        )
    }

    /// One-line summary of a found line: its parameters, error and rank.
    pub fn line_solution_line(&self, id: LineId, target: &Line2D) -> String {
        let line = self.line(id);
        format!(
            "Solution ({:.4},({:.4},{:.4})): err = {:.4} (rank {})",
            line.l.d,
            line.l.u.x,
            line.l.u.y,
            line.distance_to(target, &self.paper, &self.cfg),
            line.rank
        )
    }

    /// Full verbal report for a found mark: the summary line followed by
    /// the numbered folding sequence.
    pub fn mark_report(&self, id: MarkId, target: Point2D) -> String {
        let mut out = self.mark_solution_line(id, target);
        out.push('\n');
        let seq = Sequence::build(self, Step::Mark(id));
        let _ = write!(out, "{}", seq.howto_text(self));
        out
    }

    /// Full verbal report for a found line.
    pub fn line_report(&self, id: LineId, target: &Line2D) -> String {
        let mut out = self.line_solution_line(id, target);
        out.push('\n');
        let seq = Sequence::build(self, Step::Line(id));
        let _ = write!(out, "{}", seq.howto_text(self));
        out
    }
}

/// Keep the best `n` of `keyed` under the composite comparator and sort
/// them, most preferred first.
fn partial_sort(
    mut keyed: Vec<(f64, Rank, u32)>,
    n: usize,
    good_enough: f64,
) -> Vec<(f64, Rank, u32)> {
    let cmp = |a: &(f64, Rank, u32), b: &(f64, Rank, u32)| -> Ordering {
        let order = if a.0 > good_enough || b.0 > good_enough {
            // At least one candidate is inaccurate: accuracy first.
            a.0.total_cmp(&b.0).then_with(|| a.1.cmp(&b.1))
        } else {
            // Both accurate enough: prefer the simpler fold.
            a.1.cmp(&b.1).then_with(|| a.0.total_cmp(&b.0))
        };
        order.then_with(|| a.2.cmp(&b.2))
    };

    let n = n.min(keyed.len());
    if n == 0 {
        return Vec::new();
    }
    if n < keyed.len() {
        keyed.select_nth_unstable_by(n - 1, cmp);
        keyed.truncate(n);
    }
    keyed.sort_by(cmp);
    keyed
}
