//! End-to-end tests of database construction and queries on a unit
//! square.

use orifold::{
    BuildProgress, Config, Database, Line2D, LineDef, MarkDef, Point2D, Signal, EPS,
};

fn build(max_rank: u16) -> Database {
    Database::build(Config::default().with_max_rank(max_rank)).unwrap()
}

/// True if some stored mark sits at the given point.
fn has_mark_at(db: &Database, x: f64, y: f64) -> bool {
    db.marks()
        .iter()
        .any(|m| m.p.approx_eq(Point2D::new(x, y)))
}

/// True if some stored line coincides with the line through two points.
fn has_line_through(db: &Database, a: Point2D, b: Point2D) -> bool {
    let target = Line2D::through_points(a, b);
    db.lines().iter().any(|l| l.l.coincides_with(&target))
}

#[test]
fn test_rank_zero_database_is_edges_and_corners() {
    let db = build(0);
    assert_eq!(db.num_lines(), 4);
    assert_eq!(db.num_marks(), 4);
    assert!(db.lines().iter().all(|l| !l.is_derived()));
    assert!(db.marks().iter().all(|m| !m.is_derived()));
}

#[test]
fn test_corner_target_returns_corner() {
    let db = build(2);
    for (x, y) in [(0.0, 0.0), (1.0, 0.0), (0.0, 1.0), (1.0, 1.0)] {
        let target = Point2D::new(x, y);
        let best = db.find_best_marks(target, 1).unwrap()[0];
        let mark = db.mark(best);
        assert!(mark.distance_to(target) <= EPS);
        assert_eq!(mark.rank, 0);
        assert!(matches!(mark.def, MarkDef::Original { .. }));
    }
}

#[test]
fn test_bottom_edge_midpoint() {
    let db = build(2);
    let target = Point2D::new(0.5, 0.0);
    let best = db.find_best_marks(target, 1).unwrap()[0];
    let mark = db.mark(best);

    assert!(mark.distance_to(target) <= EPS);
    assert!(mark.p.approx_eq(target));
    assert!(mark.rank <= 2);
    // The midpoint comes from crossing the bottom edge with the
    // center crease made by folding corner onto corner.
    assert!(matches!(mark.def, MarkDef::Intersection { .. }));
}

#[test]
fn test_paper_center() {
    let db = build(2);
    let target = Point2D::new(0.5, 0.5);
    let best = db.find_best_marks(target, 1).unwrap()[0];
    let mark = db.mark(best);

    assert!(mark.distance_to(target) <= EPS);
    assert!(mark.rank <= 2);
}

#[test]
fn test_interior_point_within_tolerance_at_rank_four() {
    let db = build(4);
    let target = Point2D::new(0.3, 0.7);
    let best = db.find_best_marks(target, 1).unwrap()[0];
    let mark = db.mark(best);

    assert!(
        mark.distance_to(target) <= 0.01,
        "best mark {:?} is {} away",
        mark.p,
        mark.distance_to(target)
    );
    assert!(mark.rank <= 4);
}

#[test]
fn test_quarter_line() {
    let db = build(3);
    let target = Line2D::new(0.25, Point2D::new(0.0, 1.0));
    let best = db.find_best_lines(&target, 1)[0];
    let line = db.line(best);

    assert!(line.l.coincides_with(&target));
    assert!(line.rank <= 3);
    assert!(line.distance_to(&target, db.paper(), db.config()) <= EPS);
}

#[test]
fn test_axiom_one_alone_reaches_only_diagonal_geometry() {
    // O1 can only connect existing marks, and at low rank the corners
    // only produce edges and diagonals, so the single new mark is the
    // diagonals' crossing.
    let db = Database::build(Config::default().with_max_rank(2).with_only_axiom(1)).unwrap();

    assert_eq!(db.num_lines(), 6); // 4 edges + 2 diagonals
    assert_eq!(db.num_marks(), 5); // 4 corners + center
    assert!(has_mark_at(&db, 0.5, 0.5));
}

#[test]
fn test_point_to_point_alone_reaches_midpoints() {
    // Folding corner onto corner yields the two center creases; their
    // crossings with the edges and each other give the six pairwise
    // corner midpoints (the two diagonal midpoints coincide at the
    // center).
    let db = Database::build(Config::default().with_max_rank(2).with_only_axiom(2)).unwrap();

    for (x, y) in [(0.5, 0.0), (1.0, 0.5), (0.5, 1.0), (0.0, 0.5), (0.5, 0.5)] {
        assert!(has_mark_at(&db, x, y), "missing mark ({}, {})", x, y);
    }
    for (a, b) in [
        (Point2D::new(0.5, 0.0), Point2D::new(0.5, 1.0)),
        (Point2D::new(0.0, 0.5), Point2D::new(1.0, 0.5)),
    ] {
        assert!(has_line_through(&db, a, b));
    }
    // The four corners are still there.
    assert!(has_mark_at(&db, 0.0, 0.0));
    assert!(has_mark_at(&db, 1.0, 1.0));
}

#[test]
fn test_stored_reference_invariants() {
    let db = build(3);
    let paper = db.paper();
    let cfg = db.config();

    // Keys are non-zero and unique within each family.
    let mut line_keys: Vec<_> = db.lines().iter().map(|l| l.key).collect();
    line_keys.sort_unstable();
    assert!(line_keys.iter().all(|k| *k != 0));
    let before = line_keys.len();
    line_keys.dedup();
    assert_eq!(before, line_keys.len(), "duplicate line keys");

    let mut mark_keys: Vec<_> = db.marks().iter().map(|m| m.key).collect();
    mark_keys.sort_unstable();
    assert!(mark_keys.iter().all(|k| *k != 0));
    let before = mark_keys.len();
    mark_keys.dedup();
    assert_eq!(before, mark_keys.len(), "duplicate mark keys");

    // Canonical orientation.
    assert!(db.lines().iter().all(|l| l.l.d >= 0.0));

    for line in db.lines() {
        // Rank is one more than the parents' total, and parents are
        // strictly simpler.
        let parent_ranks: Vec<u16> = match &line.def {
            LineDef::Original { .. } => continue,
            LineDef::ThroughTwoPoints { p1, p2 } | LineDef::PointToPoint { p1, p2, .. } => {
                vec![db.mark(*p1).rank, db.mark(*p2).rank]
            }
            LineDef::LineToLine { l1, l2, .. } => vec![db.line(*l1).rank, db.line(*l2).rank],
            LineDef::LineOntoSelf { l1, p1 } => vec![db.line(*l1).rank, db.mark(*p1).rank],
            LineDef::PointToLineThroughPoint { p1, l1, p2, .. } => {
                vec![db.mark(*p1).rank, db.line(*l1).rank, db.mark(*p2).rank]
            }
            LineDef::TwoPointsToTwoLines { p1, l1, p2, l2, .. } => vec![
                db.mark(*p1).rank,
                db.line(*l1).rank,
                db.mark(*p2).rank,
                db.line(*l2).rank,
            ],
            LineDef::LineOntoSelfPointToLine { l1, p1, l2, .. } => {
                vec![db.line(*l1).rank, db.mark(*p1).rank, db.line(*l2).rank]
            }
        };
        assert_eq!(line.rank, 1 + parent_ranks.iter().sum::<u16>());
        assert!(parent_ranks.iter().all(|r| *r < line.rank));

        // Derived lines cross the interior and never make skinny flaps.
        assert!(paper.interior_overlaps(&line.l));
        assert!(!paper.makes_skinny_flap(&line.l, cfg.min_aspect_ratio));
    }

    for mark in db.marks() {
        let MarkDef::Intersection { l1, l2 } = &mark.def else {
            continue;
        };
        let (la, lb) = (db.line(*l1), db.line(*l2));
        assert_eq!(mark.rank, la.rank + lb.rank);
        assert!(paper.encloses(mark.p));
        assert!(la.l.u.dot(lb.l.u.perpendicular()).abs() >= cfg.min_angle_sine);
        // The mark really is the crossing of its parents.
        assert!(la.l.contains(mark.p));
        assert!(lb.l.contains(mark.p));
    }
}

#[test]
fn test_bisectors_fold_line_onto_line() {
    let db = build(3);
    for line in db.lines() {
        let LineDef::LineToLine { l1, l2, .. } = &line.def else {
            continue;
        };
        let la = db.line(*l1).l;
        let lb = db.line(*l2).l;
        // Reflect two points of l1 across the bisector; the images must
        // land on l2.
        let Some((a, b)) = db.paper().clip_line(&la) else {
            continue;
        };
        assert!(lb.contains(line.l.fold(a)));
        assert!(lb.contains(line.l.fold(b)));
    }
}

#[test]
fn test_rebuild_is_deterministic() {
    let a = build(3);
    let b = build(3);
    assert_eq!(a.num_lines(), b.num_lines());
    assert_eq!(a.num_marks(), b.num_marks());

    let line_ranks = |db: &Database| db.lines().iter().map(|l| l.rank).collect::<Vec<_>>();
    let mark_ranks = |db: &Database| db.marks().iter().map(|m| m.rank).collect::<Vec<_>>();
    assert_eq!(line_ranks(&a), line_ranks(&b));
    assert_eq!(mark_ranks(&a), mark_ranks(&b));

    let line_keys = |db: &Database| db.lines().iter().map(|l| l.key).collect::<Vec<_>>();
    assert_eq!(line_keys(&a), line_keys(&b));
}

#[test]
fn test_query_monotonicity() {
    let db = build(3);
    let target = Point2D::new(0.3, 0.7);
    let ten = db.find_best_marks(target, 10).unwrap();
    let three = db.find_best_marks(target, 3).unwrap();
    assert_eq!(&ten[..3], &three[..]);

    let line_target = Line2D::new(0.3, Point2D::new(0.0, 1.0));
    let five = db.find_best_lines(&line_target, 5);
    let two = db.find_best_lines(&line_target, 2);
    assert_eq!(&five[..2], &two[..]);
}

#[test]
fn test_target_validation() {
    let db = build(1);

    let err = db
        .find_best_marks(Point2D::new(1.5, 0.5), 3)
        .unwrap_err();
    assert!(err.to_string().contains("x coordinate"));

    let err = db
        .find_best_marks(Point2D::new(0.5, -0.1), 3)
        .unwrap_err();
    assert!(err.to_string().contains("y coordinate"));

    let err = db
        .validate_line_target(Point2D::new(0.5, 0.5), Point2D::new(0.5, 0.5))
        .unwrap_err();
    assert!(err.to_string().contains("distinct"));
}

#[test]
fn test_invalid_configuration_rejected_before_build() {
    let cfg = Config::default().with_paper(-1.0, 1.0);
    assert!(Database::build(cfg).is_err());
}

#[test]
fn test_cancellation_leaves_consistent_database() {
    let mut cfg = Config::default();
    cfg.max_rank = 10;
    cfg.database_status_skip = 2000;

    // Cancel once construction reaches rank 2, whether the heartbeat or
    // the rank boundary reports it first.
    let mut cancel_rank = None;
    let db = Database::build_with_progress(cfg, &mut |progress| match progress {
        BuildProgress::Working { rank, .. } | BuildProgress::RankComplete { rank, .. }
            if *rank >= 2 =>
        {
            cancel_rank.get_or_insert(*rank);
            Signal::Cancel
        }
        _ => Signal::Continue,
    })
    .unwrap();

    // Only ranks up to the cancellation point exist.
    let limit = cancel_rank.expect("build must reach rank 2");
    assert_eq!(limit, 2);
    assert!(db.lines().iter().all(|l| l.rank <= limit));
    assert!(db.marks().iter().all(|m| m.rank <= limit));
    assert!(db.num_marks() >= 4);

    // The partial database still answers queries.
    let best = db.find_best_marks(Point2D::new(0.0, 0.0), 1).unwrap()[0];
    assert_eq!(db.mark(best).rank, 0);

    // And still upholds the uniqueness invariant.
    let mut keys: Vec<_> = db.marks().iter().map(|m| m.key).collect();
    keys.sort_unstable();
    let before = keys.len();
    keys.dedup();
    assert_eq!(before, keys.len());
}

#[test]
fn test_progress_reports_ranks_in_order() {
    let mut completed = Vec::new();
    let cfg = Config::default().with_max_rank(2);
    Database::build_with_progress(cfg, &mut |progress| {
        if let BuildProgress::RankComplete { rank, .. } = progress {
            completed.push(*rank);
        }
        Signal::Continue
    })
    .unwrap();
    assert_eq!(completed, vec![0, 1, 2]);
}
