//! Unit tests for finish line geometry

use laptrack::racing::{ccw, FinishLine, Point};

fn p(x: i32, y: i32) -> Point {
    Point::new(x, y)
}

/// Any segment is a non-crossing while either endpoint is missing
#[test]
fn test_unready_line_rejects_all_segments() {
    let segments = [
        (p(50, 90), p(50, 110)),
        (p(-1000, -1000), p(1000, 1000)),
        (p(0, 0), p(0, 0)),
    ];

    let empty = FinishLine::new();
    let mut half = FinishLine::new();
    half.set_point1(p(0, 100));

    for (a, b) in segments {
        assert!(!empty.crossed(a, b));
        assert!(!half.crossed(a, b));
    }
}

/// Collinear triples are never counter-clockwise, in any order
#[test]
fn test_ccw_collinear_both_orderings() {
    let (a, b, c) = (p(0, 100), p(100, 100), p(200, 100));
    assert!(!ccw(a, b, c));
    assert!(!ccw(a, c, b));
    assert!(!ccw(b, a, c));
    assert!(!ccw(c, b, a));
}

/// Strictness: ccw flips with orientation but never for ties
#[test]
fn test_ccw_orientation() {
    let a = p(0, 0);
    let b = p(10, 0);
    let above = p(5, 5);
    let below = p(5, -5);
    assert_ne!(ccw(a, b, above), ccw(a, b, below));
}

/// Grazing along the finish line is not a crossing
#[test]
fn test_motion_along_line_not_crossing() {
    let line = FinishLine::from_points(p(0, 100), p(200, 100));
    assert!(!line.crossed(p(10, 100), p(190, 100)));
}

/// Touching the line at an endpoint of the motion is not a proper crossing
#[test]
fn test_touching_line_from_one_side() {
    let line = FinishLine::from_points(p(0, 100), p(200, 100));
    assert!(!line.crossed(p(50, 90), p(50, 100)));
}

/// Diagonal line crossing
#[test]
fn test_diagonal_line() {
    let line = FinishLine::from_points(p(0, 0), p(100, 100));
    assert!(line.crossed(p(0, 100), p(100, 0)));
    assert!(!line.crossed(p(200, 100), p(300, 0)));
}
