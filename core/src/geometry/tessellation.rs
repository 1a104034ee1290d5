use super::utils_2d::discretize_circle;
use super::{Point3, Vector3};
use serde::{Deserialize, Serialize};

/// Number of vertices in the polygon approximation of a construction circle.
pub const CIRCLE_SEGMENTS: usize = 360;

/// Closed polygon approximating a circle, suitable for a line-loop draw.
pub fn circle_outline(center: [f64; 2], radius: f64, segments: usize) -> Vec<[f64; 2]> {
    discretize_circle(center, radius, segments)
}

/// Cap on the buffer space reserved up front by [`StripMesh::new`], in floats.
const MAX_RESERVED_FLOATS: usize = 1 << 20;

/// Triangle-strip mesh of a parametric surface.
///
/// Every strip holds `vertices_per_strip` consecutive vertices; strips are
/// drawn one after another.
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct StripMesh {
    pub vertices: Vec<f32>, // Flattened x, y, z
    pub normals: Vec<f32>,  // Flattened nx, ny, nz
    pub strip_count: u32,
    pub vertices_per_strip: u32,
}

impl StripMesh {
    pub fn new(strip_count: u32, vertices_per_strip: u32) -> Self {
        let total = (strip_count as usize)
            .saturating_mul(vertices_per_strip as usize)
            .saturating_mul(3)
            .min(MAX_RESERVED_FLOATS);
        Self {
            vertices: Vec::with_capacity(total),
            normals: Vec::with_capacity(total),
            strip_count,
            vertices_per_strip,
        }
    }

    pub fn push_vertex(&mut self, position: Point3, normal: Vector3) {
        self.vertices.push(position.x as f32); self.vertices.push(position.y as f32); self.vertices.push(position.z as f32);
        self.normals.push(normal.x as f32); self.normals.push(normal.y as f32); self.normals.push(normal.z as f32);
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len() / 3
    }

    /// Position of vertex `index` as read back from the flattened buffer.
    pub fn position(&self, index: usize) -> Option<Point3> {
        let v = self.vertices.get(index * 3..index * 3 + 3)?;
        Some(Point3::new(v[0] as f64, v[1] as f64, v[2] as f64))
    }

    /// Normal of vertex `index` as read back from the flattened buffer.
    pub fn normal(&self, index: usize) -> Option<Vector3> {
        let n = self.normals.get(index * 3..index * 3 + 3)?;
        Some(Vector3::new(n[0] as f64, n[1] as f64, n[2] as f64))
    }
}
