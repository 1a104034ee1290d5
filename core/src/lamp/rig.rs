//! Joint chain of the desk lamp.
//!
//! Each joint swings back and forth around a fixed axis. Joints are chained
//! by position only: a joint's pivot follows the tip of the previous joint,
//! its rotation does not.

use crate::config::LampConfig;
use crate::geometry::{Point3, Vector3};
use nalgebra as na;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Vertical gap between a joint tip and the pivot of the next joint.
pub const JOINT_LIFT: f64 = 0.15;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum JointSlot {
    Lower,
    Upper,
    Shade,
}

impl JointSlot {
    pub const ALL: [JointSlot; 3] = [JointSlot::Lower, JointSlot::Upper, JointSlot::Shade];

    fn index(self) -> usize {
        match self {
            JointSlot::Lower => 0,
            JointSlot::Upper => 1,
            JointSlot::Shade => 2,
        }
    }

    fn previous(self) -> Option<JointSlot> {
        match self {
            JointSlot::Lower => None,
            JointSlot::Upper => Some(JointSlot::Lower),
            JointSlot::Shade => Some(JointSlot::Upper),
        }
    }
}

/// Oscillating revolute joint.
///
/// The angle grows by `speed * dt` per step for `period` steps, then shrinks
/// for `period` steps, and so on.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Joint {
    pub axis: na::Unit<Vector3>,
    /// Arm vector from pivot to tip at angle zero
    pub arm: Vector3,
    pub angle: f64,
    pub speed: f64,
    pub period: u32,
    counter: u32,
    forward: bool,
}

impl Joint {
    pub fn new(axis: na::Unit<Vector3>, arm: Vector3, speed: f64, period: u32) -> Self {
        Self { axis, arm, angle: 0.0, speed, period, counter: 0, forward: true }
    }

    pub fn step(&mut self, dt: f64) {
        if self.counter >= self.period {
            self.forward = !self.forward;
            self.counter = 0;
            debug!("Joint reversed at angle {:.3}", self.angle);
        }
        let delta = self.speed * dt;
        self.angle += if self.forward { delta } else { -delta };
        self.counter += 1;
    }

    pub fn is_forward(&self) -> bool {
        self.forward
    }

    pub fn rotation(&self) -> na::Rotation3<f64> {
        na::Rotation3::from_axis_angle(&self.axis, self.angle)
    }

    /// Arm vector at the current angle.
    pub fn reach(&self) -> Vector3 {
        self.rotation() * self.arm
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rig {
    /// Pivot of the lower arm
    pub base: Point3,
    joints: [Joint; 3],
}

impl Rig {
    pub fn new(base: Point3, lower: Joint, upper: Joint, shade: Joint) -> Self {
        Self { base, joints: [lower, upper, shade] }
    }

    /// Lower arm swinging about Z, upper arm and shade about X.
    pub fn desk_lamp(config: &LampConfig) -> Self {
        Self::new(
            Point3::new(0.0, 0.17, 0.0),
            Joint::new(Vector3::z_axis(), Vector3::new(0.0, 2.0, 0.0), 1.0, config.swing_period),
            Joint::new(Vector3::x_axis(), Vector3::new(0.0, 2.0, 0.0), 1.0, config.upper_swing_period),
            Joint::new(
                Vector3::x_axis(),
                Vector3::new(0.0, 0.5, 0.0),
                config.shade_speed,
                config.swing_period,
            ),
        )
    }

    pub fn joint(&self, slot: JointSlot) -> &Joint {
        &self.joints[slot.index()]
    }

    pub fn joint_mut(&mut self, slot: JointSlot) -> &mut Joint {
        &mut self.joints[slot.index()]
    }

    pub fn step(&mut self, dt: f64) {
        for joint in &mut self.joints {
            joint.step(dt);
        }
    }

    pub fn pivot(&self, slot: JointSlot) -> Point3 {
        match slot.previous() {
            None => self.base,
            Some(prev) => self.tip(prev) + Vector3::y() * JOINT_LIFT,
        }
    }

    pub fn tip(&self, slot: JointSlot) -> Point3 {
        self.pivot(slot) + self.joint(slot).reach()
    }
}
