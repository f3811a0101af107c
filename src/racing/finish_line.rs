//! Finish line geometry and crossing detection.

use serde::{Deserialize, Serialize};

/// Integer pixel position in the processed frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

impl From<(i32, i32)> for Point {
    fn from((x, y): (i32, i32)) -> Self {
        Self { x, y }
    }
}

impl std::fmt::Display for Point {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Returns true if `a`, `b`, `c` wind counter-clockwise.
///
/// The comparison is strict, so collinear triples are `false` in every order.
/// Products are taken in `i128` so any pair of `i32` coordinates is safe.
pub fn ccw(a: Point, b: Point, c: Point) -> bool {
    let (ax, ay) = (a.x as i128, a.y as i128);
    let (bx, by) = (b.x as i128, b.y as i128);
    let (cx, cy) = (c.x as i128, c.y as i128);
    (cy - ay) * (bx - ax) > (by - ay) * (cx - ax)
}

/// One of the two finish line endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    P1,
    P2,
}

impl std::fmt::Display for Endpoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Endpoint::P1 => write!(f, "P1"),
            Endpoint::P2 => write!(f, "P2"),
        }
    }
}

/// The start/finish line, defined by two points placed during setup.
///
/// The line is geometry rather than race state: resetting a race leaves it
/// untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FinishLine {
    p1: Option<Point>,
    p2: Option<Point>,
}

impl FinishLine {
    /// Create an empty (not ready) finish line.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a finish line with both endpoints already placed.
    pub fn from_points(p1: Point, p2: Point) -> Self {
        Self {
            p1: Some(p1),
            p2: Some(p2),
        }
    }

    pub fn set_point1(&mut self, point: Point) {
        self.p1 = Some(point);
    }

    pub fn set_point2(&mut self, point: Point) {
        self.p2 = Some(point);
    }

    /// Place the next endpoint from a setup click.
    ///
    /// The first click sets `p1`; every later click sets `p2`. Returns the
    /// endpoint that was placed.
    pub fn click(&mut self, point: Point) -> Endpoint {
        if self.p1.is_none() {
            self.set_point1(point);
            Endpoint::P1
        } else {
            self.set_point2(point);
            Endpoint::P2
        }
    }

    pub fn point1(&self) -> Option<Point> {
        self.p1
    }

    pub fn point2(&self) -> Option<Point> {
        self.p2
    }

    /// Both endpoints, once the line is fully defined.
    pub fn points(&self) -> Option<(Point, Point)> {
        self.p1.zip(self.p2)
    }

    /// Whether both endpoints have been placed.
    pub fn is_ready(&self) -> bool {
        self.p1.is_some() && self.p2.is_some()
    }

    /// Whether the motion segment `prev -> curr` properly intersects the line.
    ///
    /// Always false while the line is not ready.
    pub fn crossed(&self, prev: Point, curr: Point) -> bool {
        let Some((c, d)) = self.points() else {
            return false;
        };

        ccw(prev, c, d) != ccw(curr, c, d) && ccw(prev, curr, c) != ccw(prev, curr, d)
    }
}
