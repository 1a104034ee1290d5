//! Animated desk lamp: parametric surfaces placed by a three-joint rig,
//! lit with the Phong model and viewed by an orbiting camera.

pub mod camera;
pub mod lighting;
pub mod rig;
pub mod scene;

pub use camera::Camera;
pub use lighting::{phong_radiance, Light, Material, Spot};
pub use rig::{Joint, JointSlot, Rig};
pub use scene::{Behavior, LampFrame, LampObject, LampScene, ObjectFrame, RenderState, SurfaceRenderer, Transform};

#[cfg(test)]
mod tests_scene;
