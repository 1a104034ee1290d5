use super::tessellation::{circle_outline, CIRCLE_SEGMENTS};
use super::utils_2d::{distance_squared, line_x_at, line_y_at, perpendicular_foot, points_equal};
use super::{GeometryError, GeometryResult, CANVAS_EXTENT};
use serde::{Deserialize, Serialize};

/// Type tag of a construction primitive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PrimitiveKind {
    Point,
    Line,
    Circle,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub pos: [f64; 2],
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { pos: [x, y] }
    }

    pub fn contains(&self, p: [f64; 2], tolerance: f64) -> bool {
        distance_squared(self.pos, p) < tolerance * tolerance
    }
}

/// An infinite line, stored as its clipped segment on the canvas.
///
/// `slope` is `±∞` for vertical lines, in which case `intercept` is NaN and
/// the line is `x = start[0]`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Line {
    pub start: [f64; 2],
    pub end: [f64; 2],
    pub slope: f64,
    pub intercept: f64,
}

impl Line {
    /// Build the line through `p` and `q`, clipped to the canvas square.
    pub fn through(p: [f64; 2], q: [f64; 2]) -> GeometryResult<Self> {
        if points_equal(p, q) {
            return Err(GeometryError::DegenerateLine);
        }

        let slope = (q[1] - p[1]) / (q[0] - p[0]);

        if slope.is_infinite() {
            return Ok(Self {
                start: [p[0], CANVAS_EXTENT],
                end: [q[0], -CANVAS_EXTENT],
                slope,
                intercept: f64::NAN,
            });
        }

        let intercept = p[1] - slope * p[0];

        if slope == 0.0 {
            return Ok(Self {
                start: [-CANVAS_EXTENT, p[1]],
                end: [CANVAS_EXTENT, q[1]],
                slope,
                intercept,
            });
        }

        let (start, end) = clip_to_canvas(slope, intercept).unwrap_or((p, q));
        Ok(Self { start, end, slope, intercept })
    }

    pub fn is_vertical(&self) -> bool {
        self.slope.is_infinite()
    }

    pub fn is_horizontal(&self) -> bool {
        self.slope == 0.0
    }

    pub fn contains(&self, p: [f64; 2], tolerance: f64) -> bool {
        if self.is_vertical() {
            (p[0] - self.start[0]).abs() <= tolerance
        } else if self.is_horizontal() {
            (p[1] - self.intercept).abs() <= tolerance
        } else {
            let foot = perpendicular_foot(self.slope, self.intercept, p);
            distance_squared(foot, p).sqrt() <= tolerance
        }
    }
}

/// Canvas boundary crossings of `y = m*x + c`, tested right, bottom, left, top.
///
/// The half-open acceptance ranges make every corner belong to exactly one
/// edge. The first accepted crossing is the start, the next one the end.
fn clip_to_canvas(slope: f64, intercept: f64) -> Option<([f64; 2], [f64; 2])> {
    let e = CANVAS_EXTENT;

    let right = line_y_at(slope, intercept, e);
    let bottom = line_x_at(slope, intercept, -e);
    let left = line_y_at(slope, intercept, -e);
    let top = line_x_at(slope, intercept, e);

    let candidates = [
        (right > -e && right <= e).then_some([e, right]),
        (bottom > -e && bottom <= e).then_some([bottom, -e]),
        (left >= -e && left < e).then_some([-e, left]),
        (top >= -e && top < e).then_some([top, e]),
    ];

    let mut hits = candidates.into_iter().flatten();
    let start = hits.next()?;
    let end = hits.next()?;
    Some((start, end))
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Circle {
    pub center: [f64; 2],
    pub radius: f64,
    /// Closed polygon approximation used for drawing.
    pub outline: Vec<[f64; 2]>,
}

impl Circle {
    pub fn new(center: [f64; 2], radius: f64) -> GeometryResult<Self> {
        if !radius.is_finite() || radius <= 0.0 {
            return Err(GeometryError::InvalidRadius(radius));
        }
        Ok(Self {
            center,
            radius,
            outline: circle_outline(center, radius, CIRCLE_SEGMENTS),
        })
    }

    /// Ring test: the point must lie within `tolerance` of the circumference.
    pub fn contains(&self, p: [f64; 2], tolerance: f64) -> bool {
        let d_sq = distance_squared(self.center, p);
        let inner = self.radius - tolerance;
        let outer = self.radius + tolerance;
        d_sq > inner * inner && d_sq < outer * outer
    }
}

/// A construction primitive.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Primitive {
    Point(Point),
    Line(Line),
    Circle(Circle),
}

impl Primitive {
    pub fn kind(&self) -> PrimitiveKind {
        match self {
            Primitive::Point(_) => PrimitiveKind::Point,
            Primitive::Line(_) => PrimitiveKind::Line,
            Primitive::Circle(_) => PrimitiveKind::Circle,
        }
    }

    pub fn contains(&self, p: [f64; 2], tolerance: f64) -> bool {
        match self {
            Primitive::Point(point) => point.contains(p, tolerance),
            Primitive::Line(line) => line.contains(p, tolerance),
            Primitive::Circle(circle) => circle.contains(p, tolerance),
        }
    }

    /// Compact per-type encoding:
    /// Point `(x, y, 0, 0)`, Line `(m, c, x0, y0)`, Circle `(cx, cy, r, 0)`.
    pub fn property_vector(&self) -> [f64; 4] {
        match self {
            Primitive::Point(point) => [point.pos[0], point.pos[1], 0.0, 0.0],
            Primitive::Line(line) => [line.slope, line.intercept, line.start[0], line.start[1]],
            Primitive::Circle(circle) => [circle.center[0], circle.center[1], circle.radius, 0.0],
        }
    }

    /// Vertices handed to the renderer.
    pub fn vertices(&self) -> Vec<[f64; 2]> {
        match self {
            Primitive::Point(point) => vec![point.pos],
            Primitive::Line(line) => vec![line.start, line.end],
            Primitive::Circle(circle) => circle.outline.clone(),
        }
    }
}

impl From<Point> for Primitive {
    fn from(p: Point) -> Self {
        Primitive::Point(p)
    }
}

impl From<Line> for Primitive {
    fn from(l: Line) -> Self {
        Primitive::Line(l)
    }
}

impl From<Circle> for Primitive {
    fn from(c: Circle) -> Self {
        Primitive::Circle(c)
    }
}
