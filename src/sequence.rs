//! Folding sequences: linearizing a reference's ancestor graph into
//! numbered steps, grouping the steps into diagrams, and wording the
//! instructions.

use std::fmt::Write as _;

use crate::database::Database;
use crate::geom::Point2D;
use crate::refs::{LineDef, LineMover, MarkDef, PairMover, PointMover, PointOrLine, Step};

/// Label alphabets for constructed marks and lines.
const MARK_LABELS: &str = "PQRSTUVWXYZ";
const LINE_LABELS: &str = "ABCDEFGHIJ";

/// One diagram's slice of a folding sequence.
///
/// A diagram shows the references defined at positions
/// `first..=action`; the reference at `action` is the action line the
/// diagram's fold produces (for the final diagram of a mark sequence it
/// may be the mark itself).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DgmInfo {
    /// First sequence position introduced in this diagram.
    pub first: usize,
    /// Position whose construction terminates this diagram.
    pub action: usize,
}

/// The ordered list of references that construct one reference, parents
/// before children, each non-original step assigned a letter.
pub struct Sequence {
    steps: Vec<Step>,
    labels: Vec<Option<char>>,
}

impl Sequence {
    /// Linearize the ancestor graph of `root`.
    ///
    /// Parents are visited in an order matching the folding narrative:
    /// for an alignment the fixed elements come first and the moving
    /// element last, so the mover reads as the subject of the
    /// instruction that follows.
    pub fn build(db: &Database, root: Step) -> Self {
        let mut steps = Vec::new();
        push_step(db, &mut steps, root);

        // Number the derived references, one counter per family.
        let mut labels = Vec::with_capacity(steps.len());
        let mut mark_count = 0usize;
        let mut line_count = 0usize;
        for step in &steps {
            let label = match step {
                Step::Mark(id) => db.mark(*id).is_derived().then(|| {
                    let c = MARK_LABELS.chars().nth(mark_count).unwrap_or('?');
                    mark_count += 1;
                    c
                }),
                Step::Line(id) => db.line(*id).is_derived().then(|| {
                    let c = LINE_LABELS.chars().nth(line_count).unwrap_or('?');
                    line_count += 1;
                    c
                }),
            };
            labels.push(label);
        }

        Self { steps, labels }
    }

    /// The steps in order.
    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    /// Number of steps.
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// True if the sequence is empty (never the case for a built one).
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// The letter assigned to the step at `i`, if it is a derived
    /// reference.
    pub fn label(&self, i: usize) -> Option<char> {
        self.labels.get(i).copied().flatten()
    }

    /// Display name of the step at `i`: an original's given name, or
    /// "point P" / "line A" for constructed references.
    pub fn name(&self, db: &Database, i: usize) -> String {
        self.name_of(db, self.steps[i])
    }

    fn label_of(&self, step: Step) -> char {
        self.steps
            .iter()
            .position(|s| *s == step)
            .and_then(|i| self.labels[i])
            .unwrap_or('?')
    }

    fn name_of(&self, db: &Database, step: Step) -> String {
        match step {
            Step::Mark(id) => match &db.mark(id).def {
                MarkDef::Original { name } => name.clone(),
                _ => format!("point {}", self.label_of(step)),
            },
            Step::Line(id) => match &db.line(id).def {
                LineDef::Original { name } => name.clone(),
                _ => format!("line {}", self.label_of(step)),
            },
        }
    }

    /// The instruction sentence for the step at `i`, without its
    /// terminating period. Originals need no instruction and yield
    /// `None`.
    pub fn howto(&self, db: &Database, i: usize) -> Option<String> {
        match self.steps[i] {
            Step::Mark(id) => self.mark_howto(db, i, id),
            Step::Line(id) => self.line_howto(db, i, id),
        }
    }

    fn mark_howto(&self, db: &Database, i: usize, id: crate::refs::MarkId) -> Option<String> {
        let mark = db.mark(id);
        let MarkDef::Intersection { l1, l2 } = &mark.def else {
            return None;
        };
        let mut s = format!(
            "The intersection of {} with {} is {}",
            self.name_of(db, Step::Line(*l1)),
            self.name_of(db, Step::Line(*l2)),
            self.name(db, i),
        );
        if db.config().clarify_verbal_ambiguities {
            let p = mark.p.chopped();
            let _ = write!(s, " = ({:.4},{:.4})", p.x, p.y);
        }
        Some(s)
    }

    fn line_howto(&self, db: &Database, i: usize, id: crate::refs::LineId) -> Option<String> {
        let line = db.line(id);
        let cfg = db.config();
        let axiom = line.def.axiom()?;

        let mut s = String::new();
        if cfg.axioms_in_verbal_directions {
            let _ = write!(s, "[0{}] ", axiom);
        }
        let me = self.name(db, i);

        match &line.def {
            LineDef::Original { .. } => return None,

            LineDef::ThroughTwoPoints { p1, p2 } => {
                let _ = write!(
                    s,
                    "Form a crease connecting {} with {}, making {}",
                    self.name_of(db, Step::Mark(*p1)),
                    self.name_of(db, Step::Mark(*p2)),
                    me
                );
            }

            LineDef::PointToPoint { p1, p2, moves } => {
                let (mover, fixed) = match moves {
                    PointMover::P1 => (*p1, *p2),
                    PointMover::P2 => (*p2, *p1),
                };
                let _ = write!(
                    s,
                    "Bring {} to {}, making {}",
                    self.name_of(db, Step::Mark(mover)),
                    self.name_of(db, Step::Mark(fixed)),
                    me
                );
            }

            LineDef::LineToLine { l1, l2, moves, .. } => {
                let (mover, fixed) = match moves {
                    LineMover::L1 => (*l1, *l2),
                    LineMover::L2 => (*l2, *l1),
                };
                let _ = write!(
                    s,
                    "Fold {} to {}, making {}",
                    self.name_of(db, Step::Line(mover)),
                    self.name_of(db, Step::Line(fixed)),
                    me
                );
                if cfg.clarify_verbal_ambiguities {
                    // Disambiguate the two bisectors by a point where the
                    // crease leaves the paper. Parallel arguments have a
                    // single bisector and need no clarification.
                    let la = &db.line(*l1).l;
                    let lb = &db.line(*l2).l;
                    if let (Some(q), Some((pa, pb))) =
                        (la.intersection(lb), db.paper().clip_line(&line.l))
                    {
                        let end = if q.approx_eq(pa) { pb } else { pa };
                        let end = end.chopped();
                        let _ = write!(s, " through ({:.2},{:.2})", end.x, end.y);
                    }
                }
            }

            LineDef::LineOntoSelf { l1, p1 } => {
                let _ = write!(
                    s,
                    "Fold {} onto itself, making {} through {}",
                    self.name_of(db, Step::Line(*l1)),
                    me,
                    self.name_of(db, Step::Mark(*p1)),
                );
            }

            LineDef::PointToLineThroughPoint {
                p1,
                l1,
                p2,
                moves,
                ..
            } => {
                let (mover, fixed) = match moves {
                    PointOrLine::Point => (self.name_of(db, Step::Mark(*p1)), self.name_of(db, Step::Line(*l1))),
                    PointOrLine::Line => (self.name_of(db, Step::Line(*l1)), self.name_of(db, Step::Mark(*p1))),
                };
                let _ = write!(s, "Bring {} to {}", mover, fixed);
                if cfg.clarify_verbal_ambiguities {
                    let _ = write!(
                        s,
                        " so the crease goes through {}",
                        self.name_of(db, Step::Mark(*p2))
                    );
                }
                let _ = write!(s, ", making {}", me);
            }

            LineDef::TwoPointsToTwoLines {
                p1,
                l1,
                p2,
                l2,
                moves,
                ..
            } => {
                let np1 = self.name_of(db, Step::Mark(*p1));
                let nl1 = self.name_of(db, Step::Line(*l1));
                let np2 = self.name_of(db, Step::Mark(*p2));
                let nl2 = self.name_of(db, Step::Line(*l2));
                let at1 = clarify_point(cfg.clarify_verbal_ambiguities, line.l.fold(db.mark(*p1).p));
                let at2 = clarify_point(cfg.clarify_verbal_ambiguities, line.l.fold(db.mark(*p2).p));
                match moves {
                    PairMover::BothPoints => {
                        let _ = write!(
                            s,
                            "Bring {} to {}{} and {} to {}, making {}",
                            np1, nl1, at1, np2, nl2, me
                        );
                    }
                    PairMover::BothLines => {
                        let touch = if at1.is_empty() {
                            String::new()
                        } else {
                            format!(" so that point{}", &at1[" at point".len()..])
                        };
                        let _ = write!(
                            s,
                            "Bring {}{} touches {} and {} to {}, making {}",
                            nl1, touch, np1, nl2, np2, me
                        );
                    }
                    PairMover::P1L2 => {
                        let _ = write!(
                            s,
                            "Bring {} to {}{} and {} to {}, making {}",
                            np1, nl1, at1, nl2, np2, me
                        );
                    }
                    PairMover::P2L1 => {
                        let _ = write!(
                            s,
                            "Bring {} to {} and {} to {}{}, making {}",
                            nl1, np1, np2, nl2, at2, me
                        );
                    }
                }
            }

            LineDef::LineOntoSelfPointToLine { l1, p1, l2, moves } => {
                let (mover, fixed) = match moves {
                    PointOrLine::Point => (self.name_of(db, Step::Mark(*p1)), self.name_of(db, Step::Line(*l1))),
                    PointOrLine::Line => (self.name_of(db, Step::Line(*l1)), self.name_of(db, Step::Mark(*p1))),
                };
                let _ = write!(
                    s,
                    "Bring {} onto itself so that {} touches {}, making {}",
                    self.name_of(db, Step::Line(*l2)),
                    mover,
                    fixed,
                    me
                );
            }
        }
        Some(s)
    }

    /// The full numbered sequence as text, one sentence per line.
    pub fn howto_text(&self, db: &Database) -> String {
        let mut out = String::new();
        for i in 0..self.len() {
            if let Some(sentence) = self.howto(db, i) {
                out.push_str(&sentence);
                out.push_str(".\n");
            }
        }
        out
    }

    /// Partition the sequence into diagram blocks.
    ///
    /// Each action line terminates a diagram; the final step always
    /// belongs to one, and there is always at least one diagram even for
    /// a sequence of originals.
    pub fn diagrams(&self, db: &Database) -> Vec<DgmInfo> {
        let mut dgms: Vec<DgmInfo> = self
            .steps
            .iter()
            .enumerate()
            .filter(|(_, step)| match step {
                Step::Line(id) => db.line(*id).is_action_line(),
                Step::Mark(_) => false,
            })
            .map(|(i, _)| DgmInfo { first: i, action: i })
            .collect();

        if dgms.is_empty() {
            dgms.push(DgmInfo {
                first: 0,
                action: 0,
            });
        }
        let last = self.len() - 1;
        if dgms.last().map(|d| d.action) != Some(last) {
            dgms.push(DgmInfo {
                first: 0,
                action: last,
            });
        }

        // Each diagram introduces everything after the previous one's
        // action.
        let mut first = 0;
        for dgm in &mut dgms {
            dgm.first = first;
            first = dgm.action + 1;
        }
        dgms
    }

    /// Caption for one diagram: the instructions for every step it
    /// introduces, as period-terminated sentences.
    pub fn caption(&self, db: &Database, dgm: &DgmInfo) -> String {
        let mut out = String::new();
        for i in dgm.first..=dgm.action {
            if let Some(sentence) = self.howto(db, i) {
                out.push_str(&sentence);
                out.push_str(". ");
            }
        }
        out
    }
}

fn clarify_point(enabled: bool, p: Point2D) -> String {
    if enabled {
        let p = p.chopped();
        format!(" at point ({:.2},{:.2})", p.x, p.y)
    } else {
        String::new()
    }
}

/// Append `step` to `seq`, its ancestors first, skipping anything
/// already present.
fn push_step(db: &Database, seq: &mut Vec<Step>, step: Step) {
    if seq.contains(&step) {
        return;
    }
    match step {
        Step::Mark(id) => match db.mark(id).def {
            MarkDef::Original { .. } => {}
            MarkDef::Intersection { l1, l2 } => {
                push_step(db, seq, Step::Line(l1));
                push_step(db, seq, Step::Line(l2));
            }
        },
        Step::Line(id) => match db.line(id).def.clone() {
            LineDef::Original { .. } => {}
            LineDef::ThroughTwoPoints { p1, p2 } => {
                push_step(db, seq, Step::Mark(p1));
                push_step(db, seq, Step::Mark(p2));
            }
            LineDef::PointToPoint { p1, p2, moves } => {
                // The fixed point first, the mover last.
                let (first, second) = match moves {
                    PointMover::P1 => (p2, p1),
                    PointMover::P2 => (p1, p2),
                };
                push_step(db, seq, Step::Mark(first));
                push_step(db, seq, Step::Mark(second));
            }
            LineDef::LineToLine { l1, l2, moves, .. } => {
                let (first, second) = match moves {
                    LineMover::L1 => (l2, l1),
                    LineMover::L2 => (l1, l2),
                };
                push_step(db, seq, Step::Line(first));
                push_step(db, seq, Step::Line(second));
            }
            LineDef::LineOntoSelf { l1, p1 } => {
                push_step(db, seq, Step::Mark(p1));
                push_step(db, seq, Step::Line(l1));
            }
            LineDef::PointToLineThroughPoint {
                p1,
                l1,
                p2,
                moves,
                ..
            } => {
                push_step(db, seq, Step::Mark(p2));
                match moves {
                    PointOrLine::Point => {
                        push_step(db, seq, Step::Line(l1));
                        push_step(db, seq, Step::Mark(p1));
                    }
                    PointOrLine::Line => {
                        push_step(db, seq, Step::Mark(p1));
                        push_step(db, seq, Step::Line(l1));
                    }
                }
            }
            LineDef::TwoPointsToTwoLines {
                p1,
                l1,
                p2,
                l2,
                moves,
                ..
            } => {
                let order = match moves {
                    PairMover::BothPoints => {
                        [Step::Line(l2), Step::Line(l1), Step::Mark(p2), Step::Mark(p1)]
                    }
                    PairMover::BothLines => {
                        [Step::Mark(p2), Step::Mark(p1), Step::Line(l2), Step::Line(l1)]
                    }
                    PairMover::P1L2 => {
                        [Step::Mark(p2), Step::Line(l1), Step::Line(l2), Step::Mark(p1)]
                    }
                    PairMover::P2L1 => {
                        [Step::Line(l2), Step::Mark(p1), Step::Line(l1), Step::Mark(p2)]
                    }
                };
                for parent in order {
                    push_step(db, seq, parent);
                }
            }
            LineDef::LineOntoSelfPointToLine { l1, p1, l2, moves } => {
                match moves {
                    PointOrLine::Point => {
                        push_step(db, seq, Step::Line(l1));
                        push_step(db, seq, Step::Mark(p1));
                    }
                    PointOrLine::Line => {
                        push_step(db, seq, Step::Mark(p1));
                        push_step(db, seq, Step::Line(l1));
                    }
                }
                push_step(db, seq, Step::Line(l2));
            }
        },
    }
    seq.push(step);
}
