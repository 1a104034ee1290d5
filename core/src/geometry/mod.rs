use nalgebra as na;

pub type Point3 = na::Point3<f64>;
pub type Vector3 = na::Vector3<f64>;
pub type Vector4 = na::Vector4<f64>;
pub type Matrix4 = na::Matrix4<f64>;

pub const EPSILON: f64 = 1e-6;

/// Half-extent of the drawing canvas in normalized device coordinates.
pub const CANVAS_EXTENT: f64 = 1.0;

/// Default hit-test tolerance, matching the input snapping resolution.
pub const PICK_TOLERANCE: f64 = 0.02;

pub trait ApproxEq {
    fn approx_eq(&self, other: &Self) -> bool;
}

impl ApproxEq for f64 {
    fn approx_eq(&self, other: &Self) -> bool {
        (self - other).abs() < EPSILON
    }
}

impl ApproxEq for [f64; 2] {
    fn approx_eq(&self, other: &Self) -> bool {
        utils_2d::distance_squared(*self, *other) < EPSILON * EPSILON
    }
}

impl ApproxEq for Point3 {
    fn approx_eq(&self, other: &Self) -> bool {
        na::distance_squared(self, other) < EPSILON * EPSILON
    }
}

impl ApproxEq for Vector3 {
    fn approx_eq(&self, other: &Self) -> bool {
        (self - other).norm_squared() < EPSILON * EPSILON
    }
}

pub mod utils_2d;

pub mod primitives;
pub use primitives::*;

pub mod tessellation;
pub use tessellation::{circle_outline, StripMesh};

pub mod intersection;
pub use intersection::*;

use thiserror::Error;

/// Geometric conditions that prevent a construction from producing a result.
///
/// Parallel lines and circles that are too far apart are not errors: the
/// solvers simply report no intersection points for them.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum GeometryError {
    #[error("Cannot build a line through two coincident points")]
    DegenerateLine,

    #[error("Invalid circle radius: {0}")]
    InvalidRadius(f64),

    #[error("One circle lies strictly inside the other")]
    NestedCircles,

    #[error("Circles are coincident")]
    CoincidentCircles,

    #[error("Cannot intersect {first:?} with {second:?}")]
    UnsupportedOperands {
        first: PrimitiveKind,
        second: PrimitiveKind,
    },
}

pub type GeometryResult<T> = Result<T, GeometryError>;
