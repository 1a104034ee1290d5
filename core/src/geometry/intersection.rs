//! Closed-form intersections between construction primitives.
//!
//! Lines are infinite (slope-intercept form, `±∞` slope for vertical lines),
//! circles are full circles. Every solver returns 0, 1 or 2 points and never
//! touches its inputs.

use super::primitives::{Circle, Line, Primitive};
use super::utils_2d::{distance, line_y_at};
use super::{GeometryError, GeometryResult, EPSILON};

/// Discriminant / offset threshold below which two roots are merged into one
/// tangent point.
pub const TANGENCY_EPSILON: f64 = 1e-9;

/// Intersect two primitives. Points cannot be intersected.
pub fn intersect(a: &Primitive, b: &Primitive) -> GeometryResult<Vec<[f64; 2]>> {
    match (a, b) {
        (Primitive::Line(l1), Primitive::Line(l2)) => Ok(line_line(l1, l2).into_iter().collect()),
        (Primitive::Line(line), Primitive::Circle(circle))
        | (Primitive::Circle(circle), Primitive::Line(line)) => Ok(line_circle(line, circle)),
        (Primitive::Circle(c1), Primitive::Circle(c2)) => circle_circle(c1, c2),
        _ => Err(GeometryError::UnsupportedOperands {
            first: a.kind(),
            second: b.kind(),
        }),
    }
}

/// Intersection of two infinite lines. `None` for parallel or coincident lines.
pub fn line_line(l1: &Line, l2: &Line) -> Option<[f64; 2]> {
    match (l1.is_vertical(), l2.is_vertical()) {
        (true, true) => None,
        (true, false) => {
            let x = l1.start[0];
            Some([x, line_y_at(l2.slope, l2.intercept, x)])
        }
        (false, true) => {
            let x = l2.start[0];
            Some([x, line_y_at(l1.slope, l1.intercept, x)])
        }
        (false, false) => {
            let dm = l1.slope - l2.slope;
            if dm.abs() < EPSILON {
                return None;
            }
            let x = (l2.intercept - l1.intercept) / dm;
            Some([x, line_y_at(l1.slope, l1.intercept, x)])
        }
    }
}

/// Intersection of an infinite line with a circle.
///
/// Substitutes the line into the circle equation and solves the quadratic in
/// `x` (or in `y` for vertical lines).
pub fn line_circle(line: &Line, circle: &Circle) -> Vec<[f64; 2]> {
    let [cx, cy] = circle.center;
    let r = circle.radius;

    if line.is_vertical() {
        let x0 = line.start[0];
        let qb = -2.0 * cy;
        let qc = cy * cy - r * r + (x0 - cx) * (x0 - cx);
        let discr = qb * qb - 4.0 * qc;

        return if discr > TANGENCY_EPSILON {
            let root = discr.sqrt();
            vec![[x0, (-qb - root) / 2.0], [x0, (-qb + root) / 2.0]]
        } else if discr.abs() <= TANGENCY_EPSILON {
            vec![[x0, cy]]
        } else {
            vec![]
        };
    }

    let m = line.slope;
    let c = line.intercept;
    let qa = m * m + 1.0;
    let qb = 2.0 * (m * c - m * cy - cx);
    let qc = cy * cy - r * r + cx * cx - 2.0 * c * cy + c * c;
    let discr = qb * qb - 4.0 * qa * qc;

    if discr > TANGENCY_EPSILON {
        let root = discr.sqrt();
        let x1 = (-qb + root) / (2.0 * qa);
        let x2 = (-qb - root) / (2.0 * qa);
        vec![[x1, line_y_at(m, c, x1)], [x2, line_y_at(m, c, x2)]]
    } else if discr.abs() <= TANGENCY_EPSILON {
        let x = -qb / (2.0 * qa);
        vec![[x, line_y_at(m, c, x)]]
    } else {
        vec![]
    }
}

/// Intersection of two circles.
///
/// Circles too far apart yield no points. A circle strictly inside the other
/// has no real solution and is reported as [`GeometryError::NestedCircles`].
/// Center distances within [`TANGENCY_EPSILON`] of `r1 + r2` or `|r1 - r2|`
/// count as tangency and give exactly one point.
pub fn circle_circle(c1: &Circle, c2: &Circle) -> GeometryResult<Vec<[f64; 2]>> {
    let (r1, r2) = (c1.radius, c2.radius);
    let dx = c2.center[0] - c1.center[0];
    let dy = c2.center[1] - c1.center[1];
    let d = distance(c1.center, c2.center);

    // Positive when the circles are apart, resp. one is inside the other
    let outside_gap = d - (r1 + r2);
    let inside_gap = (r1 - r2).abs() - d;

    if outside_gap > TANGENCY_EPSILON {
        return Ok(vec![]);
    }
    if d < EPSILON && (r1 - r2).abs() < EPSILON {
        return Err(GeometryError::CoincidentCircles);
    }
    if inside_gap > TANGENCY_EPSILON {
        return Err(GeometryError::NestedCircles);
    }

    let a = (r1 * r1 - r2 * r2 + d * d) / (2.0 * d);
    let px = c1.center[0] + a * dx / d;
    let py = c1.center[1] + a * dy / d;

    if outside_gap.abs() <= TANGENCY_EPSILON || inside_gap.abs() <= TANGENCY_EPSILON {
        return Ok(vec![[px, py]]);
    }

    let h = (r1 * r1 - a * a).max(0.0).sqrt();
    if h <= TANGENCY_EPSILON {
        return Ok(vec![[px, py]]);
    }

    let ox = h * dy / d;
    let oy = h * dx / d;
    Ok(vec![[px + ox, py - oy], [px - ox, py + oy]])
}
