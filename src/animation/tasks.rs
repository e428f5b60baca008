use cgmath::Rad;

use super::traits::{AnimationTask, CameraGuard};
use crate::gfx::{camera::CameraSlot, scene::SceneNode};

/// Horizontal axis a patrol runs along
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    X,
    Z,
}

/// Back-and-forth motion inside `[low, high]` at a constant speed
///
/// The direction is corrected before each step: at or past `high` the node
/// heads down, at or past `low` it heads up.
#[derive(Debug, Clone)]
pub struct PatrolTask {
    axis: Axis,
    low: f32,
    high: f32,
    speed: f32,
}

impl PatrolTask {
    pub fn new(axis: Axis, low: f32, high: f32, speed: f32) -> Self {
        Self {
            axis,
            low,
            high,
            speed,
        }
    }

    /// Current signed speed
    pub fn speed(&self) -> f32 {
        self.speed
    }
}

impl AnimationTask for PatrolTask {
    fn name(&self) -> &str {
        "patrol"
    }

    fn animate(&mut self, node: &mut SceneNode) {
        let coord = match self.axis {
            Axis::X => &mut node.transform.position.x,
            Axis::Z => &mut node.transform.position.z,
        };

        if *coord >= self.high {
            self.speed = -self.speed.abs();
        } else if *coord <= self.low {
            self.speed = self.speed.abs();
        }
        *coord += self.speed;
    }
}

/// Yaw nudges, only visible from the orbit camera
///
/// Each trigger arms one increment for the next frame. An armed nudge is
/// dropped if that frame is skipped. In continuous mode the increment is also
/// applied on every frame the guard allows.
#[derive(Debug, Clone)]
pub struct SpinTask {
    step: f32,
    armed: u32,
    continuous: bool,
}

impl SpinTask {
    pub fn new(step: f32) -> Self {
        Self {
            step,
            armed: 0,
            continuous: false,
        }
    }

    pub fn continuous(mut self, continuous: bool) -> Self {
        self.continuous = continuous;
        self
    }

    pub fn armed(&self) -> u32 {
        self.armed
    }
}

impl AnimationTask for SpinTask {
    fn name(&self) -> &str {
        "spin"
    }

    fn guard(&self) -> CameraGuard {
        CameraGuard::WhileActive(CameraSlot::Orbit)
    }

    fn animate(&mut self, node: &mut SceneNode) {
        let turns = self.armed + u32::from(self.continuous);
        node.transform.rotation.y += Rad(self.step * turns as f32);
        self.armed = 0;
    }

    fn trigger(&mut self) {
        self.armed += 1;
    }

    fn skip(&mut self) {
        if self.armed > 0 {
            log::debug!("spin nudge dropped, orbit camera not active");
            self.armed = 0;
        }
    }
}

/// Constant roll around the node's z axis
#[derive(Debug, Clone)]
pub struct RollTask {
    step: f32,
}

impl RollTask {
    pub fn new(step: f32) -> Self {
        Self { step }
    }
}

impl AnimationTask for RollTask {
    fn name(&self) -> &str {
        "roll"
    }

    fn animate(&mut self, node: &mut SceneNode) {
        node.transform.rotation.z += Rad(self.step);
    }
}
