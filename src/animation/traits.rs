//! Per-frame animation interface
//!
//! An animation task mutates one scene node each frame. The scheduler looks
//! the node up by name, checks the task's camera guard, and only then hands
//! the node to [`AnimationTask::animate`].

use crate::gfx::{camera::CameraSlot, scene::SceneNode};

/// Camera precondition for running a task on a given frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CameraGuard {
    Always,
    WhileActive(CameraSlot),
    WhileInactive(CameraSlot),
}

impl CameraGuard {
    pub fn allows(self, active: CameraSlot) -> bool {
        match self {
            CameraGuard::Always => true,
            CameraGuard::WhileActive(slot) => slot == active,
            CameraGuard::WhileInactive(slot) => slot != active,
        }
    }
}

pub trait AnimationTask {
    /// Task name for logging
    fn name(&self) -> &str;

    fn guard(&self) -> CameraGuard {
        CameraGuard::Always
    }

    /// Advance the target node by one frame
    fn animate(&mut self, node: &mut SceneNode);

    /// A bound key was pressed
    fn trigger(&mut self) {}

    /// The frame passed without [`animate`](AnimationTask::animate) being
    /// called, because the guard failed or the target is not loaded yet
    fn skip(&mut self) {}
}
