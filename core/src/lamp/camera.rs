use crate::geometry::{Matrix4, Point3, Vector3};
use nalgebra as na;
use serde::{Deserialize, Serialize};

/// Perspective camera looking at a fixed target.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Camera {
    pub eye: Point3,
    pub look_at: Point3,
    pub up: Vector3,
    /// Vertical field of view in radians
    pub fov: f64,
    pub aspect: f64,
    pub near: f64,
    pub far: f64,
}

impl Camera {
    pub fn new(eye: Point3, look_at: Point3, aspect: f64) -> Self {
        Self {
            eye,
            look_at,
            up: Vector3::y(),
            fov: 45.0_f64.to_radians(),
            aspect,
            near: 1.0,
            far: 20.0,
        }
    }

    /// World-to-camera transform.
    pub fn view(&self) -> Matrix4 {
        na::Isometry3::look_at_rh(&self.eye, &self.look_at, &self.up).to_homogeneous()
    }

    pub fn projection(&self) -> Matrix4 {
        na::Perspective3::new(self.aspect, self.fov, self.near, self.far).to_homogeneous()
    }

    /// Orbit the eye around the vertical axis through the look-at point.
    pub fn animate(&mut self, dt: f64) {
        let rotation = na::Rotation3::from_axis_angle(&Vector3::y_axis(), dt);
        let offset = self.eye - self.look_at;
        self.eye = self.look_at + rotation * offset;
    }
}
