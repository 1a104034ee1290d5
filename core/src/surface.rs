//! Parametric surfaces with analytic normals.
//!
//! A surface maps `(u, v) ∈ [0, 1]²` to a point in space. Evaluating it on
//! [`Dual2`] parameters yields the partial derivatives alongside the position,
//! and their cross product is the surface normal.

use crate::dual::Dual2;
use crate::geometry::{Point3, StripMesh, Vector3};
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

/// Upper bound on either tessellation level; larger requests are clamped.
pub const MAX_TESSELLATION_LEVEL: u32 = 256;

/// Position and (unnormalized) normal of one surface sample.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurfaceVertex {
    pub position: Point3,
    pub normal: Vector3,
}

pub trait ParamSurface {
    /// Coordinates `[x, y, z]` at `(u, v)`.
    fn eval(&self, u: Dual2, v: Dual2) -> [Dual2; 3];

    fn vertex(&self, u: f64, v: f64) -> SurfaceVertex {
        let [x, y, z] = self.eval(Dual2::variable(u, 0), Dual2::variable(v, 1));
        let dr_du = Vector3::new(x.deriv.x, y.deriv.x, z.deriv.x);
        let dr_dv = Vector3::new(x.deriv.y, y.deriv.y, z.deriv.y);
        SurfaceVertex {
            position: Point3::new(x.value, y.value, z.value),
            normal: dr_du.cross(&dr_dv),
        }
    }

    /// Sample the surface into `n` triangle strips of `2 * (m + 1)` vertices.
    ///
    /// Strip `i` zig-zags between the rows `v = i/n` and `v = (i+1)/n`.
    /// Both levels are clamped to `1..=MAX_TESSELLATION_LEVEL`.
    fn tessellate(&self, n: u32, m: u32) -> StripMesh {
        let n = n.clamp(1, MAX_TESSELLATION_LEVEL);
        let m = m.clamp(1, MAX_TESSELLATION_LEVEL);
        let mut mesh = StripMesh::new(n, 2 * (m + 1));
        for i in 0..n {
            for j in 0..=m {
                let u = j as f64 / m as f64;
                for row in [i, i + 1] {
                    let sample = self.vertex(u, row as f64 / n as f64);
                    mesh.push_vertex(sample.position, sample.normal);
                }
            }
        }
        mesh
    }
}

/// Unit sphere around the origin.
#[derive(Debug, Clone, Copy, Default)]
pub struct Sphere;

impl ParamSurface for Sphere {
    fn eval(&self, u: Dual2, v: Dual2) -> [Dual2; 3] {
        let (u, v) = (u * (2.0 * PI), v * PI);
        [u.cos() * v.sin(), u.sin() * v.sin(), v.cos()]
    }
}

/// Unit-radius cylinder along +Y with height 1.
#[derive(Debug, Clone, Copy, Default)]
pub struct Cylinder;

impl ParamSurface for Cylinder {
    fn eval(&self, u: Dual2, v: Dual2) -> [Dual2; 3] {
        let u = u * (2.0 * PI);
        [u.cos(), v, u.sin()]
    }
}

/// Unit disc in the XZ plane.
#[derive(Debug, Clone, Copy, Default)]
pub struct Disc;

impl ParamSurface for Disc {
    fn eval(&self, u: Dual2, v: Dual2) -> [Dual2; 3] {
        let (u, v) = (u * (2.0 * PI), v * PI);
        [u.cos() * v.sin(), Dual2::constant(0.0), u.sin() * v.sin()]
    }
}

/// Paraboloid `y = x² + z²` opening towards +Y, up to radius π.
#[derive(Debug, Clone, Copy, Default)]
pub struct Paraboloid;

impl ParamSurface for Paraboloid {
    fn eval(&self, u: Dual2, v: Dual2) -> [Dual2; 3] {
        let (u, v) = (u * (2.0 * PI), v * PI);
        [v * u.cos(), v * v, v * u.sin()]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SurfaceKind {
    Sphere,
    Cylinder,
    Disc,
    Paraboloid,
}

impl SurfaceKind {
    pub const ALL: [SurfaceKind; 4] = [
        SurfaceKind::Sphere,
        SurfaceKind::Cylinder,
        SurfaceKind::Disc,
        SurfaceKind::Paraboloid,
    ];
}

impl ParamSurface for SurfaceKind {
    fn eval(&self, u: Dual2, v: Dual2) -> [Dual2; 3] {
        match self {
            SurfaceKind::Sphere => Sphere.eval(u, v),
            SurfaceKind::Cylinder => Cylinder.eval(u, v),
            SurfaceKind::Disc => Disc.eval(u, v),
            SurfaceKind::Paraboloid => Paraboloid.eval(u, v),
        }
    }
}
