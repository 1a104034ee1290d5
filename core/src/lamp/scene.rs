use super::camera::Camera;
use super::lighting::{Light, Material, Spot};
use super::rig::{JointSlot, Rig};
use crate::config::LampConfig;
use crate::geometry::{Matrix4, Point3, StripMesh, Vector3, EPSILON};
use crate::surface::{ParamSurface, SurfaceKind};
use nalgebra as na;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// Scale, then rotate, then translate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transform {
    pub scale: Vector3,
    pub rotation_axis: na::Unit<Vector3>,
    pub rotation_angle: f64,
    pub translation: Vector3,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            scale: Vector3::new(1.0, 1.0, 1.0),
            rotation_axis: Vector3::z_axis(),
            rotation_angle: 0.0,
            translation: Vector3::zeros(),
        }
    }
}

impl Transform {
    pub fn at(translation: Vector3) -> Self {
        Self { translation, ..Self::default() }
    }

    pub fn scaled(mut self, scale: Vector3) -> Self {
        self.scale = scale;
        self
    }

    fn rotation(&self) -> Matrix4 {
        na::Rotation3::from_axis_angle(&self.rotation_axis, self.rotation_angle).to_homogeneous()
    }

    /// Model matrix `T * R * S`.
    pub fn model(&self) -> Matrix4 {
        Matrix4::new_translation(&self.translation)
            * self.rotation()
            * Matrix4::new_nonuniform_scaling(&self.scale)
    }

    /// Inverse model matrix `S^-1 * R^-1 * T^-1`. Scale components must be nonzero.
    pub fn inverse(&self) -> Matrix4 {
        let inverse_rotation =
            na::Rotation3::from_axis_angle(&self.rotation_axis, -self.rotation_angle).to_homogeneous();
        Matrix4::new_nonuniform_scaling(&self.scale.map(|s| 1.0 / s))
            * inverse_rotation
            * Matrix4::new_translation(&-self.translation)
    }
}

/// How an object follows the rig.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Behavior {
    /// Never moves.
    Fixed,
    /// Sits on the joint pivot and turns with the joint.
    Arm(JointSlot),
    /// Sits at the joint tip plus an offset, without turning.
    AtTip(JointSlot, Vector3),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LampObject {
    pub name: String,
    pub surface: SurfaceKind,
    pub material: Material,
    pub transform: Transform,
    pub behavior: Behavior,
}

impl LampObject {
    pub fn new(name: &str, surface: SurfaceKind, material: &Material, transform: Transform, behavior: Behavior) -> Self {
        Self {
            name: name.to_string(),
            surface,
            material: material.clone(),
            transform,
            behavior,
        }
    }

    /// Move to the position the behavior dictates for the current rig pose.
    pub fn place(&mut self, rig: &Rig) {
        match self.behavior {
            Behavior::Fixed => {}
            Behavior::Arm(slot) => {
                let joint = rig.joint(slot);
                self.transform.translation = rig.pivot(slot).coords;
                self.transform.rotation_axis = joint.axis;
                self.transform.rotation_angle = joint.angle;
            }
            Behavior::AtTip(slot, offset) => {
                self.transform.translation = rig.tip(slot).coords + offset;
            }
        }
    }
}

/// Everything a renderer needs to draw one object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderState {
    pub mvp: Matrix4,
    pub model: Matrix4,
    pub model_inverse: Matrix4,
    pub view: Matrix4,
    pub projection: Matrix4,
    pub material: Material,
    pub lights: Vec<Light>,
    pub eye: Point3,
}

/// Sink for surface draw calls.
pub trait SurfaceRenderer {
    fn draw_surface(&mut self, surface: SurfaceKind, state: &RenderState);
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObjectFrame {
    pub name: String,
    pub surface: SurfaceKind,
    pub material: Material,
    pub model: Matrix4,
    pub model_inverse: Matrix4,
}

/// Per-frame snapshot of the scene, independent of any graphics API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LampFrame {
    pub eye: Point3,
    pub view: Matrix4,
    pub projection: Matrix4,
    pub lights: Vec<Light>,
    pub objects: Vec<ObjectFrame>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LampScene {
    pub objects: Vec<LampObject>,
    pub rig: Rig,
    pub camera: Camera,
    pub ambient_light: Light,
    pub bulb_light: Light,
    pub config: LampConfig,
}

impl LampScene {
    pub fn build(config: &LampConfig) -> Self {
        let blue = Material {
            kd: Vector3::new(0.1, 0.1, 0.4),
            ks: Vector3::new(0.5, 0.5, 0.5),
            ka: Vector3::new(0.1, 0.1, 0.4),
            shininess: 50.0,
        };
        let wood = Material {
            kd: Vector3::new(0.4, 0.2, 0.05),
            ks: Vector3::new(0.2, 0.2, 0.2),
            ka: Vector3::new(0.4, 0.2, 0.05),
            shininess: 30.0,
        };
        let glow = Material {
            kd: Vector3::new(0.9, 0.9, 0.9),
            ks: Vector3::new(10.2, 10.2, 10.2),
            ka: Vector3::new(0.9, 0.9, 0.9),
            shininess: 1.0,
        };

        let lift = Vector3::new(0.0, 0.15, 0.0);
        let joint_ball = Vector3::new(0.2, 0.2, 0.2);
        let arm = Vector3::new(0.1, 2.0, 0.1);

        let objects = vec![
            LampObject::new(
                "floor",
                SurfaceKind::Disc,
                &wood,
                Transform::default().scaled(Vector3::new(30.0, 30.0, 30.0)),
                Behavior::Fixed,
            ),
            LampObject::new(
                "base",
                SurfaceKind::Cylinder,
                &blue,
                Transform::default().scaled(Vector3::new(1.0, 0.167, 1.0)),
                Behavior::Fixed,
            ),
            LampObject::new(
                "base_joint",
                SurfaceKind::Sphere,
                &blue,
                Transform::at(Vector3::new(0.0, 0.17, 0.0)).scaled(joint_ball),
                Behavior::Fixed,
            ),
            LampObject::new(
                "base_cap",
                SurfaceKind::Disc,
                &blue,
                Transform::at(Vector3::new(0.0, 0.165, 0.0)),
                Behavior::Fixed,
            ),
            LampObject::new(
                "lower_arm",
                SurfaceKind::Cylinder,
                &blue,
                Transform::default().scaled(arm),
                Behavior::Arm(JointSlot::Lower),
            ),
            LampObject::new(
                "elbow",
                SurfaceKind::Sphere,
                &blue,
                Transform::default().scaled(joint_ball),
                Behavior::AtTip(JointSlot::Lower, lift),
            ),
            LampObject::new(
                "upper_arm",
                SurfaceKind::Cylinder,
                &blue,
                Transform::default().scaled(arm),
                Behavior::Arm(JointSlot::Upper),
            ),
            LampObject::new(
                "wrist",
                SurfaceKind::Sphere,
                &blue,
                Transform::default().scaled(joint_ball),
                Behavior::AtTip(JointSlot::Upper, lift),
            ),
            LampObject::new(
                "shade",
                SurfaceKind::Paraboloid,
                &blue,
                Transform::default().scaled(Vector3::new(0.3, 0.15, 0.3)),
                Behavior::Arm(JointSlot::Shade),
            ),
            LampObject::new(
                "bulb",
                SurfaceKind::Sphere,
                &glow,
                Transform::default().scaled(Vector3::new(0.3, 0.3, 0.3)),
                Behavior::AtTip(JointSlot::Shade, Vector3::zeros()),
            ),
        ];

        let ambient_light = Light::directional(
            Vector3::new(1.0, 1.0, 1.0),
            Vector3::new(0.2, 0.2, 0.2),
            Vector3::new(0.6, 0.6, 0.6),
        );
        let bulb_light = Light::point(Point3::origin(), Vector3::zeros(), Vector3::new(2.9, 2.9, 2.9))
            .with_spot(Spot { axis: Vector3::y(), cos_cutoff: (std::f64::consts::PI / 3.0).cos() });

        let mut scene = Self {
            objects,
            rig: Rig::desk_lamp(config),
            camera: Camera::new(Point3::new(0.0, 10.0, 6.0), Point3::new(0.0, 2.0, 0.0), config.aspect),
            ambient_light,
            bulb_light,
            config: config.clone(),
        };
        scene.place_objects();
        info!("Lamp scene built with {} objects", scene.objects.len());
        scene
    }

    /// Advance the animation by `dt` seconds.
    pub fn animate(&mut self, dt: f64) {
        self.rig.step(dt);
        self.place_objects();
        self.camera.animate(dt);
        debug!("Lamp animated by {}, bulb at {:?}", dt, self.rig.tip(JointSlot::Shade));
    }

    fn place_objects(&mut self) {
        for object in &mut self.objects {
            object.place(&self.rig);
        }

        let focus = self.rig.tip(JointSlot::Shade);
        self.bulb_light.position = focus.coords.push(1.0);
        if let Some(spot) = &mut self.bulb_light.spot {
            let axis = focus - self.rig.pivot(JointSlot::Shade);
            if let Some(axis) = axis.try_normalize(EPSILON) {
                spot.axis = axis;
            }
        }
    }

    pub fn lights(&self) -> Vec<Light> {
        vec![self.ambient_light.clone(), self.bulb_light.clone()]
    }

    pub fn object(&self, name: &str) -> Option<&LampObject> {
        self.objects.iter().find(|o| o.name == name)
    }

    pub fn render<R: SurfaceRenderer + ?Sized>(&self, renderer: &mut R) {
        let view = self.camera.view();
        let projection = self.camera.projection();
        let lights = self.lights();

        for object in &self.objects {
            let model = object.transform.model();
            let state = RenderState {
                mvp: projection * view * model,
                model,
                model_inverse: object.transform.inverse(),
                view,
                projection,
                material: object.material.clone(),
                lights: lights.clone(),
                eye: self.camera.eye,
            };
            renderer.draw_surface(object.surface, &state);
        }
    }

    pub fn frame(&self) -> LampFrame {
        LampFrame {
            eye: self.camera.eye,
            view: self.camera.view(),
            projection: self.camera.projection(),
            lights: self.lights(),
            objects: self
                .objects
                .iter()
                .map(|o| ObjectFrame {
                    name: o.name.clone(),
                    surface: o.surface,
                    material: o.material.clone(),
                    model: o.transform.model(),
                    model_inverse: o.transform.inverse(),
                })
                .collect(),
        }
    }

    /// Tessellation of every surface kind at the configured level.
    pub fn meshes(&self) -> Vec<(SurfaceKind, StripMesh)> {
        let level = self.config.tessellation_level;
        SurfaceKind::ALL
            .iter()
            .map(|&kind| (kind, kind.tessellate(level, level)))
            .collect()
    }
}
