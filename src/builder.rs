//! Database construction driver.
//!
//! Seeds the original references (edges, corners, diagonals), then drives
//! the axiom constructors one rank at a time. Within a rank the
//! constructors run in a fixed preference order; the first valid
//! candidate for a bucket key owns that bucket, so the order decides
//! which kind of fold a reference resolves to. Creases that do not
//! require folding through a point are easier to make accurately, so
//! their constructors run first.

use log::{debug, info};

use crate::axioms::{self, LineView, MarkView};
use crate::config::Config;
use crate::database::Database;
use crate::paper::Paper;
use crate::pool::RefPool;
use crate::refs::{LineId, LineRef, Mark, MarkId, Rank};

/// Answer a progress callback gives the engine.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Signal {
    /// Keep going.
    Continue,
    /// Stop cooperatively at the next opportunity.
    Cancel,
}

/// Snapshot of a build in progress.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BuildProgress {
    /// The build is starting.
    Initializing,
    /// Periodic heartbeat while constructing a rank.
    Working {
        /// Rank under construction.
        rank: Rank,
        /// Lines so far, including pending ones.
        lines: usize,
        /// Marks so far, including pending ones.
        marks: usize,
    },
    /// A rank finished and its references were flushed.
    RankComplete {
        /// The completed rank.
        rank: Rank,
        /// Lines so far.
        lines: usize,
        /// Marks so far.
        marks: usize,
    },
    /// The database is complete and queryable.
    Ready {
        /// Final line count.
        lines: usize,
        /// Final mark count.
        marks: usize,
    },
}

/// Internal sentinel raised when a callback requests cancellation.
pub(crate) struct Halt;

/// One build in progress. Owns the pools that become the database.
pub(crate) struct Builder<'cb> {
    pub(crate) cfg: Config,
    pub(crate) paper: Paper,
    pub(crate) lines: RefPool<LineRef>,
    pub(crate) marks: RefPool<Mark>,
    progress: Option<&'cb mut dyn FnMut(&BuildProgress) -> Signal>,
    ticks: usize,
    cur_rank: Rank,
}

impl<'cb> Builder<'cb> {
    /// Create a builder for a validated configuration.
    pub(crate) fn new(
        cfg: Config,
        progress: Option<&'cb mut dyn FnMut(&BuildProgress) -> Signal>,
    ) -> Self {
        let width_text = cfg
            .paper_width_text
            .clone()
            .unwrap_or_else(|| format!("{}", cfg.paper_width));
        let height_text = cfg
            .paper_height_text
            .clone()
            .unwrap_or_else(|| format!("{}", cfg.paper_height));
        let paper = Paper::with_text(cfg.paper_width, cfg.paper_height, width_text, height_text);
        let max_rank = cfg.max_rank;
        Self {
            cfg,
            paper,
            lines: RefPool::new(max_rank),
            marks: RefPool::new(max_rank),
            progress,
            ticks: 0,
            cur_rank: 0,
        }
    }

    /// Run the build to completion or cancellation and hand over the
    /// finished database.
    pub(crate) fn run(mut self) -> Database {
        if self.build_all().is_err() {
            // Cancelled: flush whatever the current pass produced so the
            // partial database stays internally consistent.
            info!("database build cancelled at rank {}", self.cur_rank);
            self.lines.flush();
            self.marks.flush();
        }

        self.lines.clear_rank_index();
        self.marks.clear_rank_index();

        let (lines, marks) = (self.lines.total(), self.marks.total());
        info!("database ready: {} lines, {} marks", lines, marks);
        self.report(BuildProgress::Ready { lines, marks });

        Database::from_parts(self.cfg, self.paper, self.lines, self.marks)
    }

    fn build_all(&mut self) -> Result<(), Halt> {
        self.check(BuildProgress::Initializing)?;
        self.seed_originals()?;
        for rank in 1..=self.cfg.max_rank {
            self.build_rank(rank)?;
        }
        Ok(())
    }

    /// Emit the rank-0 originals (edges and corners) and, when ranked
    /// references are wanted at all, the two rank-1 diagonals.
    fn seed_originals(&mut self) -> Result<(), Halt> {
        let paper = self.paper.clone();

        for (line, name) in [
            (paper.bottom_edge(), "the bottom edge"),
            (paper.left_edge(), "the left edge"),
            (paper.right_edge(), "the right edge"),
            (paper.top_edge(), "the top edge"),
        ] {
            let r = LineRef::original(*line, 0, name, &paper, &self.cfg);
            self.lines.add_if_new(r);
        }

        for (corner, name) in [
            (paper.bot_left(), "the bottom left corner"),
            (paper.bot_right(), "the bottom right corner"),
            (paper.top_left(), "the top left corner"),
            (paper.top_right(), "the top right corner"),
        ] {
            let m = Mark::original(corner, 0, name, &paper, &self.cfg);
            self.marks.add_if_new(m);
        }

        self.check(BuildProgress::RankComplete {
            rank: 0,
            lines: self.lines.total(),
            marks: self.marks.total(),
        })?;

        if self.cfg.max_rank >= 1 {
            for (line, name) in [
                (paper.upward_diagonal(), "the upward diagonal"),
                (paper.downward_diagonal(), "the downward diagonal"),
            ] {
                let r = LineRef::original(*line, 1, name, &paper, &self.cfg);
                self.lines.add_if_new(r);
            }
        }

        self.lines.flush();
        self.marks.flush();
        Ok(())
    }

    /// Construct every line and mark of the given rank.
    fn build_rank(&mut self, rank: Rank) -> Result<(), Halt> {
        self.cur_rank = rank;

        if self.cfg.use_axiom_3 {
            axioms::o3::make_all(self, rank)?;
        }
        if self.cfg.use_axiom_2 {
            axioms::o2::make_all(self, rank)?;
        }
        if self.cfg.use_axiom_7 {
            axioms::o7::make_all(self, rank)?;
        }
        if self.cfg.use_axiom_6 {
            axioms::o6::make_all(self, rank)?;
        }
        if self.cfg.use_axiom_5 {
            axioms::o5::make_all(self, rank)?;
        }
        if self.cfg.use_axiom_4 {
            axioms::o4::make_all(self, rank)?;
        }
        if self.cfg.use_axiom_1 {
            axioms::o1::make_all(self, rank)?;
        }
        self.lines.flush();

        axioms::intersection::make_all(self, rank)?;
        self.marks.flush();

        debug!(
            "rank {} complete: {} lines, {} marks",
            rank,
            self.lines.total(),
            self.marks.total()
        );
        self.check(BuildProgress::RankComplete {
            rank,
            lines: self.lines.total(),
            marks: self.marks.total(),
        })
    }

    /// Count one construction attempt, periodically reporting progress
    /// and honoring a cancel request.
    pub(crate) fn tick(&mut self) -> Result<(), Halt> {
        if self.ticks < self.cfg.database_status_skip {
            self.ticks += 1;
            return Ok(());
        }
        self.ticks = 0;
        self.check(BuildProgress::Working {
            rank: self.cur_rank,
            lines: self.lines.total(),
            marks: self.marks.total(),
        })
    }

    /// Register a line candidate (or a rejected attempt) and tick.
    pub(crate) fn add_line(&mut self, candidate: Option<LineRef>) -> Result<(), Halt> {
        if let Some(line) = candidate {
            self.lines.add_if_new(line);
        }
        self.tick()
    }

    /// Register a mark candidate (or a rejected attempt) and tick.
    pub(crate) fn add_mark(&mut self, candidate: Option<Mark>) -> Result<(), Halt> {
        if let Some(mark) = candidate {
            self.marks.add_if_new(mark);
        }
        self.tick()
    }

    /// True once the line population cap is reached.
    pub(crate) fn lines_full(&self) -> bool {
        self.lines.total() >= self.cfg.max_lines
    }

    /// True once the mark population cap is reached.
    pub(crate) fn marks_full(&self) -> bool {
        self.marks.total() >= self.cfg.max_marks
    }

    /// Number of flushed marks of the given rank.
    pub(crate) fn marks_in_rank(&self, rank: Rank) -> usize {
        self.marks.rank_len(rank)
    }

    /// Number of flushed lines of the given rank.
    pub(crate) fn lines_in_rank(&self, rank: Rank) -> usize {
        self.lines.rank_len(rank)
    }

    /// Snapshot of the `i`-th mark of a rank for use by constructors.
    pub(crate) fn mark_view(&self, rank: Rank, i: usize) -> MarkView {
        let id = self.marks.rank_id(rank, i);
        let mark = self.marks.get(id);
        MarkView {
            id: MarkId(id),
            p: mark.p,
            rank: mark.rank,
            on_edge: mark.is_on_edge(&self.paper),
        }
    }

    /// Snapshot of the `i`-th line of a rank for use by constructors.
    pub(crate) fn line_view(&self, rank: Rank, i: usize) -> LineView {
        let id = self.lines.rank_id(rank, i);
        let line = self.lines.get(id);
        LineView {
            id: LineId(id),
            l: line.l,
            rank: line.rank,
            on_edge: line.is_on_edge(&self.paper),
        }
    }

    fn report(&mut self, progress: BuildProgress) -> Signal {
        match self.progress.as_mut() {
            Some(cb) => cb(&progress),
            None => Signal::Continue,
        }
    }

    fn check(&mut self, progress: BuildProgress) -> Result<(), Halt> {
        match self.report(progress) {
            Signal::Continue => Ok(()),
            Signal::Cancel => Err(Halt),
        }
    }
}
