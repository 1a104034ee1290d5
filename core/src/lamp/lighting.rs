//! Phong reflectance with ambient, directional, point and spot lights.

use crate::geometry::{Point3, Vector3, Vector4, EPSILON};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Material {
    /// Diffuse reflectance
    pub kd: Vector3,
    /// Specular reflectance
    pub ks: Vector3,
    /// Ambient reflectance
    pub ka: Vector3,
    pub shininess: f64,
}

/// Cone restricting a light to the points around `axis`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Spot {
    pub axis: Vector3,
    /// Cosine of the largest lit angle between `axis` and the light-to-point direction
    pub cos_cutoff: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Light {
    /// Ambient intensity (La)
    pub ambient: Vector3,
    /// Emitted intensity (Le)
    pub emission: Vector3,
    /// Homogeneous position; `w = 0` is a directional light
    pub position: Vector4,
    pub spot: Option<Spot>,
}

impl Light {
    pub fn directional(direction: Vector3, ambient: Vector3, emission: Vector3) -> Self {
        Self { ambient, emission, position: direction.push(0.0), spot: None }
    }

    pub fn point(position: Point3, ambient: Vector3, emission: Vector3) -> Self {
        Self { ambient, emission, position: position.coords.push(1.0), spot: None }
    }

    pub fn with_spot(mut self, spot: Spot) -> Self {
        self.spot = Some(spot);
        self
    }

    pub fn is_directional(&self) -> bool {
        self.position.w.abs() < EPSILON
    }

    /// Unnormalized direction from `point` towards the light.
    pub fn towards(&self, point: &Point3) -> Vector3 {
        self.position.xyz() - point.coords * self.position.w
    }

    /// Whether `point` lies inside the spot cone. Lights without a cone light everything.
    pub fn illuminates(&self, point: &Point3) -> bool {
        let Some(spot) = &self.spot else {
            return true;
        };
        let (Some(out), Some(axis)) = (
            (-self.towards(point)).try_normalize(EPSILON),
            spot.axis.try_normalize(EPSILON),
        ) else {
            return true;
        };
        out.dot(&axis) > spot.cos_cutoff
    }
}

/// Radiance leaving `position` towards the viewer.
///
/// `view` points from the surface to the eye. A normal facing away from the
/// viewer is flipped, so both sides of a surface are shaded.
pub fn phong_radiance(
    material: &Material,
    lights: &[Light],
    normal: &Vector3,
    view: &Vector3,
    position: &Point3,
) -> Vector3 {
    let Some(v) = view.try_normalize(EPSILON) else {
        return Vector3::zeros();
    };
    let mut n = normal.try_normalize(EPSILON).unwrap_or(v);
    if n.dot(&v) < 0.0 {
        n = -n;
    }

    let mut radiance = Vector3::zeros();
    for light in lights.iter().filter(|l| l.illuminates(position)) {
        let Some(l) = light.towards(position).try_normalize(EPSILON) else {
            continue;
        };
        let h = (l + v).try_normalize(EPSILON).unwrap_or(n);
        let cos_theta = n.dot(&l).max(0.0);
        let cos_delta = n.dot(&h).max(0.0);

        radiance += material.ka.component_mul(&light.ambient);
        let reflected = material.kd * cos_theta + material.ks * cos_delta.powf(material.shininess);
        radiance += reflected.component_mul(&light.emission);
    }
    radiance
}
