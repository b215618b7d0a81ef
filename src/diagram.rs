//! Diagram rendering: the renderer trait, drawing styles, and the
//! stacking-pass driver that paints one diagram of a folding sequence.
//!
//! The crate draws nothing itself. A host supplies a [`RefDgmr`]
//! implementation (screen, PostScript, SVG, ...) with five primitive
//! operations; everything else, including the fold arrows, is composed
//! on top of those primitives here and can be overridden per renderer.

use crate::database::Database;
use crate::geom::{Line2D, Point2D};
use crate::paper::Paper;
use crate::refs::{LineDef, MarkDef, PairMover, PointMover, PointOrLine, Step};
use crate::sequence::{DgmInfo, Sequence};

/// Style of a drawn point.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PointStyle {
    /// A point already on the paper.
    Normal,
    /// A point participating in the current action.
    Hilite,
    /// The point being constructed.
    Action,
}

/// Style of a drawn line.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LineStyle {
    /// An existing crease.
    Crease,
    /// The paper's edge.
    Edge,
    /// A line participating in the current action.
    Hilite,
    /// A valley fold.
    Valley,
    /// A mountain fold.
    Mountain,
    /// An arrow shaft or head.
    Arrow,
}

/// Style of a filled polygon.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PolyStyle {
    /// The white side of the paper.
    White,
    /// The colored side of the paper.
    Colored,
    /// A filled arrowhead.
    Arrow,
}

/// Style of a text label.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LabelStyle {
    /// Ordinary text.
    Normal,
    /// A label on a hilited reference.
    Hilite,
    /// A label on the action reference.
    Action,
}

/// Everything needed to draw a fold arrow between two mated points.
#[derive(Clone, Copy, Debug)]
pub struct ArrowGeometry {
    /// Center of the arrow's arc.
    pub center: Point2D,
    /// Radius of the arc.
    pub radius: f64,
    /// Angle of the arc's start, radians.
    pub from_angle: f64,
    /// Angle of the arc's end, radians.
    pub to_angle: f64,
    /// True if the arc runs counterclockwise.
    pub ccw: bool,
    /// Arrowhead size.
    pub head_size: f64,
    /// Arrowhead direction at the start.
    pub from_dir: Point2D,
    /// Arrowhead direction at the end.
    pub to_dir: Point2D,
}

/// Half-angle subtended by a fold arrow's arc.
const ARROW_HALF_ANGLE: f64 = std::f64::consts::PI / 6.0;

/// Compute the arc and arrowhead parameters for an arrow from one point
/// to its folded mate.
///
/// Of the two candidate arc centers the farther one from the paper's
/// center is chosen, so the arc always bulges toward the paper's
/// interior. Arrowheads are sized to the paper but never more than 40%
/// of the chord.
pub fn calc_arrow(paper: &Paper, from: Point2D, to: Point2D) -> ArrowGeometry {
    use std::f64::consts::{PI, TAU};

    let mp = Point2D::midpoint(from, to);
    let mu = to - from;
    let mup = 0.5 * mu.perpendicular() * (1.0 / ARROW_HALF_ANGLE.tan());

    let paper_mid = Point2D::midpoint(paper.bot_left(), paper.top_right());
    let ctr1 = mp + mup;
    let ctr2 = mp - mup;
    let center = if (ctr1 - paper_mid).length() > (ctr2 - paper_mid).length() {
        ctr1
    } else {
        ctr2
    };

    let radius = (to - center).length();
    let fp = from - center;
    let from_angle = fp.y.atan2(fp.x);
    let tp = to - center;
    let to_angle = tp.y.atan2(tp.x);

    let mut ra = to_angle - from_angle;
    while ra < 0.0 {
        ra += TAU;
    }
    while ra > TAU {
        ra -= TAU;
    }
    let ccw = ra < PI;

    let mut head_size = 0.15 * paper.width().min(paper.height());
    head_size = head_size.min(0.4 * (to - from).length());

    let dir = mu.normalized();
    let to_dir = if ccw {
        dir.rotated(ARROW_HALF_ANGLE)
    } else {
        dir.rotated(-ARROW_HALF_ANGLE)
    };
    let back = -dir;
    let from_dir = if ccw {
        back.rotated(-ARROW_HALF_ANGLE)
    } else {
        back.rotated(ARROW_HALF_ANGLE)
    };

    ArrowGeometry {
        center,
        radius,
        from_angle,
        to_angle,
        ccw,
        head_size,
        from_dir,
        to_dir,
    }
}

/// Renderer interface for folding diagrams.
///
/// Implementations provide the five primitives; the arrow methods have
/// default compositions but may be overridden for a different arrow
/// style.
pub trait RefDgmr {
    /// Draw a point.
    fn draw_point(&mut self, p: Point2D, style: PointStyle);

    /// Draw a straight line segment.
    fn draw_line(&mut self, from: Point2D, to: Point2D, style: LineStyle);

    /// Draw a circular arc.
    fn draw_arc(
        &mut self,
        center: Point2D,
        radius: f64,
        from_angle: f64,
        to_angle: f64,
        ccw: bool,
        style: LineStyle,
    );

    /// Draw a filled polygon.
    fn draw_polygon(&mut self, vertices: &[Point2D], style: PolyStyle);

    /// Draw a text label anchored at a point.
    fn draw_label(&mut self, p: Point2D, text: &str, style: LabelStyle);

    /// Draw a valley-fold arrowhead with its tip at `loc`.
    fn draw_valley_arrowhead(&mut self, loc: Point2D, dir: Point2D, len: f64) {
        self.draw_line(loc, loc - len * dir.rotated(ARROW_HALF_ANGLE), LineStyle::Arrow);
        self.draw_line(
            loc,
            loc - len * dir.rotated(-ARROW_HALF_ANGLE),
            LineStyle::Arrow,
        );
    }

    /// Draw a mountain-fold arrowhead with its tip at `loc`.
    fn draw_mountain_arrowhead(&mut self, loc: Point2D, dir: Point2D, len: f64) {
        let ldir = len * dir;
        let poly = [
            loc,
            loc - ldir.rotated(ARROW_HALF_ANGLE),
            loc - 0.8 * ldir,
        ];
        self.draw_polygon(&poly, PolyStyle::Arrow);
    }

    /// Draw an unfold arrowhead with its tip at `loc`.
    fn draw_unfold_arrowhead(&mut self, loc: Point2D, dir: Point2D, len: f64) {
        let ldir = len * dir;
        let poly = [
            loc,
            loc - ldir.rotated(ARROW_HALF_ANGLE),
            loc - 0.8 * ldir,
            loc - ldir.rotated(-ARROW_HALF_ANGLE),
        ];
        self.draw_polygon(&poly, PolyStyle::Arrow);
    }

    /// Draw a valley-fold arrow from a moving point to its destination.
    fn draw_valley_arrow(&mut self, paper: &Paper, from: Point2D, to: Point2D) {
        let a = calc_arrow(paper, from, to);
        self.draw_arc(a.center, a.radius, a.from_angle, a.to_angle, a.ccw, LineStyle::Arrow);
        self.draw_valley_arrowhead(to, a.to_dir, a.head_size);
    }

    /// Draw a mountain-fold arrow from a moving point to its destination.
    fn draw_mountain_arrow(&mut self, paper: &Paper, from: Point2D, to: Point2D) {
        let a = calc_arrow(paper, from, to);
        self.draw_arc(a.center, a.radius, a.from_angle, a.to_angle, a.ccw, LineStyle::Arrow);
        self.draw_mountain_arrowhead(to, a.to_dir, a.head_size);
    }

    /// Draw an unfold arrow from a moving point to its destination.
    fn draw_unfold_arrow(&mut self, paper: &Paper, from: Point2D, to: Point2D) {
        let a = calc_arrow(paper, from, to);
        self.draw_arc(a.center, a.radius, a.from_angle, a.to_angle, a.ccw, LineStyle::Arrow);
        self.draw_unfold_arrowhead(to, a.to_dir, a.head_size);
    }

    /// Draw a fold-and-unfold arrow between two points mated by a crease.
    fn draw_fold_and_unfold_arrow(&mut self, paper: &Paper, from: Point2D, to: Point2D) {
        let a = calc_arrow(paper, from, to);
        self.draw_arc(a.center, a.radius, a.from_angle, a.to_angle, a.ccw, LineStyle::Arrow);
        self.draw_valley_arrowhead(to, a.to_dir, a.head_size);
        self.draw_unfold_arrowhead(from, a.from_dir, a.head_size);
    }
}

/// How a reference is emphasized within one diagram.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum RefStyle {
    Normal,
    Hilite,
    Action,
}

/// Stacking passes; later passes draw on top.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum DrawPass {
    Lines,
    HiliteLines,
    Points,
    Arrows,
    Labels,
}

const PASSES: [DrawPass; 5] = [
    DrawPass::Lines,
    DrawPass::HiliteLines,
    DrawPass::Points,
    DrawPass::Arrows,
    DrawPass::Labels,
];

/// Draw one diagram of a sequence.
///
/// The paper is painted first. References introduced in this diagram,
/// and anything the action line aligns against, are hilited; the action
/// line itself is drawn as a valley fold with its arrows. Drawing runs
/// in fixed stacking passes so labels always land on top.
pub fn draw_diagram(db: &Database, seq: &Sequence, dgm: &DgmInfo, dgmr: &mut dyn RefDgmr) {
    dgmr.draw_polygon(&db.paper().corners_ccw(), PolyStyle::White);

    let action = seq.steps()[dgm.action];
    for pass in PASSES {
        for i in 0..dgm.action {
            let step = seq.steps()[i];
            let derived = match step {
                Step::Mark(id) => db.mark(id).is_derived(),
                Step::Line(id) => db.line(id).is_derived(),
            };
            let style = if (i >= dgm.first && derived) || db.uses_immediate(action, step) {
                RefStyle::Hilite
            } else {
                RefStyle::Normal
            };
            draw_step(db, seq, i, style, pass, dgmr);
        }
        draw_step(db, seq, dgm.action, RefStyle::Action, pass, dgmr);
    }
}

fn draw_step(
    db: &Database,
    seq: &Sequence,
    i: usize,
    style: RefStyle,
    pass: DrawPass,
    dgmr: &mut dyn RefDgmr,
) {
    match seq.steps()[i] {
        Step::Mark(id) => draw_mark(db, seq, i, id, style, pass, dgmr),
        Step::Line(id) => draw_line_ref(db, seq, i, id, style, pass, dgmr),
    }
}

fn draw_mark(
    db: &Database,
    seq: &Sequence,
    i: usize,
    id: crate::refs::MarkId,
    style: RefStyle,
    pass: DrawPass,
    dgmr: &mut dyn RefDgmr,
) {
    let mark = db.mark(id);
    let original = matches!(mark.def, MarkDef::Original { .. });

    match pass {
        DrawPass::Points => {
            if original {
                // Originals are only shown while they participate in an
                // action, and never in action style themselves.
                if style != RefStyle::Normal {
                    dgmr.draw_point(mark.p, PointStyle::Hilite);
                }
            } else {
                let ps = match style {
                    RefStyle::Normal => PointStyle::Normal,
                    RefStyle::Hilite => PointStyle::Hilite,
                    RefStyle::Action => PointStyle::Action,
                };
                dgmr.draw_point(mark.p, ps);
            }
        }
        DrawPass::Labels if !original => {
            if let Some(label) = seq.label(i) {
                let ls = match style {
                    RefStyle::Normal => return, // normal points keep quiet
                    RefStyle::Hilite => LabelStyle::Hilite,
                    RefStyle::Action => LabelStyle::Action,
                };
                dgmr.draw_label(mark.p, &label.to_string(), ls);
            }
        }
        _ => {}
    }
}

fn draw_line_ref(
    db: &Database,
    seq: &Sequence,
    i: usize,
    id: crate::refs::LineId,
    style: RefStyle,
    pass: DrawPass,
    dgmr: &mut dyn RefDgmr,
) {
    let line = db.line(id);
    let Some((p1, p2)) = db.paper().clip_line(&line.l) else {
        return;
    };
    let original = matches!(line.def, LineDef::Original { .. });

    match pass {
        DrawPass::Lines => {
            if style == RefStyle::Normal {
                dgmr.draw_line(p1, p2, LineStyle::Crease);
            }
        }
        DrawPass::HiliteLines => match style {
            RefStyle::Hilite => dgmr.draw_line(p1, p2, LineStyle::Hilite),
            RefStyle::Action => {
                // An original can't be re-folded; it is merely shown.
                if original {
                    dgmr.draw_line(p1, p2, LineStyle::Hilite)
                } else {
                    dgmr.draw_line(p1, p2, LineStyle::Valley)
                }
            }
            RefStyle::Normal => {}
        },
        DrawPass::Labels if !original => {
            if let Some(label) = seq.label(i) {
                let ls = match style {
                    RefStyle::Normal => return,
                    RefStyle::Hilite => LabelStyle::Hilite,
                    RefStyle::Action => LabelStyle::Action,
                };
                dgmr.draw_label(Point2D::midpoint(p1, p2), &label.to_string(), ls);
            }
        }
        DrawPass::Arrows if style == RefStyle::Action && !original => {
            draw_action_arrows(db, id, dgmr);
        }
        _ => {}
    }
}

/// The fold arrows for an action line, computed from the axiom geometry.
fn draw_action_arrows(db: &Database, id: crate::refs::LineId, dgmr: &mut dyn RefDgmr) {
    let paper = db.paper();
    let line = db.line(id);
    let l = line.l;

    match &line.def {
        LineDef::Original { .. } => {}

        LineDef::ThroughTwoPoints { p1, p2 } => {
            // Mate two paper-interior points across the crease.
            let mp = Point2D::midpoint(db.mark(*p1).p, db.mark(*p2).p);
            let bu = l.u.perpendicular();
            let bisector = Line2D::new(mp.dot(bu), bu);
            if let Some((p3, p4)) = paper.clip_line(&bisector) {
                let t3 = (p3 - mp).dot(l.u).abs();
                let t4 = (p4 - mp).dot(l.u).abs();
                let dp = t3.min(t4) * l.u;
                dgmr.draw_fold_and_unfold_arrow(paper, mp + dp, mp - dp);
            }
        }

        LineDef::PointToPoint { p1, p2, moves } => {
            let (a, b) = (db.mark(*p1).p, db.mark(*p2).p);
            match moves {
                PointMover::P1 => dgmr.draw_fold_and_unfold_arrow(paper, a, b),
                PointMover::P2 => dgmr.draw_fold_and_unfold_arrow(paper, b, a),
            }
        }

        LineDef::LineToLine { l1, l2, .. } => {
            // Pick the middle of the overlap of both lines as seen along
            // l1, and mate it across the fold.
            let la = db.line(*l1).l;
            let lb = db.line(*l2).l;
            if let (Some((p1a, p1b)), Some((p2a, p2b))) =
                (paper.clip_line(&la), paper.clip_line(&lb))
            {
                let du1 = la.d * la.u;
                let up1 = la.u.perpendicular();
                let mut tvals = [
                    (p1a - du1).dot(up1),
                    (p1b - du1).dot(up1),
                    (l.fold(p2a) - du1).dot(up1),
                    (l.fold(p2b) - du1).dot(up1),
                ];
                tvals.sort_by(f64::total_cmp);
                let p1c = du1 + 0.5 * (tvals[1] + tvals[2]) * up1;
                dgmr.draw_fold_and_unfold_arrow(paper, p1c, l.fold(p1c));
            }
        }

        LineDef::LineOntoSelf { l1, .. } => {
            let la = db.line(*l1).l;
            if let (Some((p1, p2)), Some(pi)) = (paper.clip_line(&la), l.intersection(&la)) {
                let u1p = la.u.perpendicular();
                let t1 = (p1 - pi).dot(u1p).abs();
                let t2 = (p2 - pi).dot(u1p).abs();
                let tmin = t1.min(t2);
                dgmr.draw_fold_and_unfold_arrow(paper, pi + tmin * u1p, pi - tmin * u1p);
            }
        }

        LineDef::PointToLineThroughPoint { p1, moves, .. } => {
            let p = db.mark(*p1).p;
            let pf = l.fold(p);
            match moves {
                PointOrLine::Point => dgmr.draw_fold_and_unfold_arrow(paper, p, pf),
                PointOrLine::Line => dgmr.draw_fold_and_unfold_arrow(paper, pf, p),
            }
        }

        LineDef::TwoPointsToTwoLines { p1, p2, moves, .. } => {
            let p1a = db.mark(*p1).p;
            let p1b = l.fold(p1a);
            let p2a = db.mark(*p2).p;
            let p2b = l.fold(p2a);
            match moves {
                PairMover::BothPoints => {
                    dgmr.draw_fold_and_unfold_arrow(paper, p1a, p1b);
                    dgmr.draw_fold_and_unfold_arrow(paper, p2a, p2b);
                }
                PairMover::BothLines => {
                    dgmr.draw_fold_and_unfold_arrow(paper, p1b, p1a);
                    dgmr.draw_fold_and_unfold_arrow(paper, p2b, p2a);
                }
                PairMover::P1L2 => {
                    dgmr.draw_fold_and_unfold_arrow(paper, p1a, p1b);
                    dgmr.draw_fold_and_unfold_arrow(paper, p2b, p2a);
                }
                PairMover::P2L1 => {
                    dgmr.draw_fold_and_unfold_arrow(paper, p1b, p1a);
                    dgmr.draw_fold_and_unfold_arrow(paper, p2a, p2b);
                }
            }
        }

        LineDef::LineOntoSelfPointToLine { p1, l2, moves, .. } => {
            // The line-onto-itself arrow on l2.
            let lb = db.line(*l2).l;
            if let (Some((q1, q2)), Some(pi)) = (paper.clip_line(&lb), l.intersection(&lb)) {
                let u2p = lb.u.perpendicular();
                let t1 = (q1 - pi).dot(u2p).abs();
                let t2 = (q2 - pi).dot(u2p).abs();
                let tmin = t1.min(t2);
                dgmr.draw_fold_and_unfold_arrow(paper, pi + tmin * u2p, pi - tmin * u2p);
            }
            // And the point-to-line arrow.
            let p = db.mark(*p1).p;
            let pf = l.fold(p);
            match moves {
                PointOrLine::Point => dgmr.draw_fold_and_unfold_arrow(paper, p, pf),
                PointOrLine::Line => dgmr.draw_fold_and_unfold_arrow(paper, pf, p),
            }
        }
    }
}
