//! 2D geometry utilities for the construction canvas.
//!
//! Points are plain `[x, y]` arrays in normalized device coordinates. These
//! helpers are shared by hit-testing, the intersection solvers and the
//! circle outline generator.

use std::f64::consts::PI;

use super::EPSILON;

// =============================================================================
// Point Operations
// =============================================================================

/// Check if two 2D points are approximately equal within EPSILON.
#[inline]
pub fn points_equal(p1: [f64; 2], p2: [f64; 2]) -> bool {
    (p1[0] - p2[0]).abs() < EPSILON && (p1[1] - p2[1]).abs() < EPSILON
}

/// Compute squared distance between two 2D points.
#[inline]
pub fn distance_squared(p1: [f64; 2], p2: [f64; 2]) -> f64 {
    let dx = p2[0] - p1[0];
    let dy = p2[1] - p1[1];
    dx * dx + dy * dy
}

/// Compute distance between two 2D points.
#[inline]
pub fn distance(p1: [f64; 2], p2: [f64; 2]) -> f64 {
    distance_squared(p1, p2).sqrt()
}

// =============================================================================
// Slope-Intercept Lines
// =============================================================================

/// Foot of the perpendicular dropped from `point` onto `y = m*x + c`.
///
/// Only meaningful for finite slopes; vertical lines are handled by callers.
pub fn perpendicular_foot(slope: f64, intercept: f64, point: [f64; 2]) -> [f64; 2] {
    let x = (point[0] + slope * point[1] - slope * intercept) / (slope * slope + 1.0);
    [x, slope * x + intercept]
}

/// Evaluate `y = m*x + c`.
#[inline]
pub fn line_y_at(slope: f64, intercept: f64, x: f64) -> f64 {
    slope * x + intercept
}

/// Solve `y = m*x + c` for `x`.
#[inline]
pub fn line_x_at(slope: f64, intercept: f64, y: f64) -> f64 {
    (y - intercept) / slope
}

// =============================================================================
// Circle Utilities
// =============================================================================

/// Compute a point on a circle given center, radius, and angle (radians).
#[inline]
pub fn arc_point(center: [f64; 2], radius: f64, angle: f64) -> [f64; 2] {
    [
        center[0] + radius * angle.cos(),
        center[1] + radius * angle.sin(),
    ]
}

/// Discretize a full circle into `segments` points, counter-clockwise from angle 0.
pub fn discretize_circle(center: [f64; 2], radius: f64, segments: usize) -> Vec<[f64; 2]> {
    let segments = segments.max(3);
    let mut points = Vec::with_capacity(segments);

    for i in 0..segments {
        let angle = (i as f64 / segments as f64) * 2.0 * PI;
        points.push(arc_point(center, radius, angle));
    }

    points
}

// =============================================================================
// Tests
// =============================================================================
