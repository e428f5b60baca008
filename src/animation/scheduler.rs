//! Runs the registered animation tasks once per frame

use winit::keyboard::KeyCode;

use super::traits::AnimationTask;
use crate::gfx::{
    camera::CameraSlot,
    scene::{NodeId, SceneGraph},
};

/// A node looked up by name, which may not have arrived yet
///
/// Deferred content attaches after the first frames have run, so the target
/// stays unresolved until a node with the name shows up. Lookups are cached
/// once they succeed.
#[derive(Debug, Clone)]
pub struct NodeTarget {
    name: String,
    id: Option<NodeId>,
    reported_missing: bool,
}

impl NodeTarget {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            id: None,
            reported_missing: false,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn resolve(&mut self, scene: &SceneGraph) -> Option<NodeId> {
        if let Some(id) = self.id.filter(|id| scene.get(*id).is_some()) {
            return Some(id);
        }

        self.id = scene.find_by_name(&self.name);
        match self.id {
            Some(id) => {
                log::debug!("animation target {} resolved to node {}", self.name, id.index());
            }
            None if !self.reported_missing => {
                log::debug!("animation target {} not in scene yet", self.name);
                self.reported_missing = true;
            }
            None => {}
        }
        self.id
    }
}

struct ScheduledTask {
    task: Box<dyn AnimationTask>,
    target: NodeTarget,
    trigger: Option<KeyCode>,
}

/// Ordered list of animation tasks and their targets
#[derive(Default)]
pub struct AnimationScheduler {
    tasks: Vec<ScheduledTask>,
}

impl AnimationScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run `task` on the node named `target` every frame
    pub fn schedule(&mut self, target: &str, task: impl AnimationTask + 'static) -> &mut Self {
        self.push(target, Box::new(task), None)
    }

    /// Like [`schedule`](Self::schedule), and also forward presses of `key`
    /// to [`AnimationTask::trigger`]
    pub fn schedule_on_key(
        &mut self,
        target: &str,
        key: KeyCode,
        task: impl AnimationTask + 'static,
    ) -> &mut Self {
        self.push(target, Box::new(task), Some(key))
    }

    fn push(
        &mut self,
        target: &str,
        task: Box<dyn AnimationTask>,
        trigger: Option<KeyCode>,
    ) -> &mut Self {
        log::debug!("scheduled {} on {}", task.name(), target);
        self.tasks.push(ScheduledTask {
            task,
            target: NodeTarget::new(target),
            trigger,
        });
        self
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Forward a key press to every task bound to it
    ///
    /// Returns whether any task was bound to `key`.
    pub fn handle_key(&mut self, key: KeyCode) -> bool {
        let mut handled = false;
        for scheduled in self.tasks.iter_mut().filter(|s| s.trigger == Some(key)) {
            scheduled.task.trigger();
            handled = true;
        }
        handled
    }

    /// Advance every task by one frame
    pub fn run(&mut self, scene: &mut SceneGraph, active: CameraSlot) {
        for scheduled in &mut self.tasks {
            if !scheduled.task.guard().allows(active) {
                scheduled.task.skip();
                continue;
            }

            let node = scheduled
                .target
                .resolve(scene)
                .and_then(|id| scene.get_mut(id));
            match node {
                Some(node) => scheduled.task.animate(node),
                None => scheduled.task.skip(),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::animation::tasks::{Axis, PatrolTask, RollTask, SpinTask};
    use crate::gfx::scene::{NodeTree, SceneNode};
    use cgmath::Rad;

    fn scheduler() -> AnimationScheduler {
        let mut scheduler = AnimationScheduler::new();
        scheduler
            .schedule("VACUUM", PatrolTask::new(Axis::X, -2.4, 2.4, 0.01))
            .schedule_on_key("BURGER", KeyCode::KeyS, SpinTask::new(0.05))
            .schedule("MSG", RollTask::new(0.05));
        scheduler
    }

    #[test]
    fn test_missing_targets_are_noops() {
        let mut scene = SceneGraph::new();
        let mut scheduler = scheduler();
        for _ in 0..3 {
            scheduler.run(&mut scene, CameraSlot::Closeup);
        }
        assert!(scene.is_empty());
    }

    #[test]
    fn test_late_target_starts_rolling_once_attached() {
        let mut scene = SceneGraph::new();
        let mut scheduler = scheduler();
        scheduler.run(&mut scene, CameraSlot::Closeup);

        let msg = scene.attach(None, NodeTree::new(SceneNode::empty().named("MSG")));
        scheduler.run(&mut scene, CameraSlot::Closeup);
        scheduler.run(&mut scene, CameraSlot::Closeup);

        let rotation = scene.get(msg).expect("msg").transform.rotation;
        assert!((rotation.z.0 - 0.1).abs() < 1e-6);
    }

    #[test]
    fn test_patrol_runs_under_either_camera() {
        let mut scene = SceneGraph::new();
        let vacuum = scene.add(None, SceneNode::empty().named("VACUUM").at(1.0, 0.0, 1.0));
        let mut scheduler = scheduler();

        scheduler.run(&mut scene, CameraSlot::Closeup);
        scheduler.run(&mut scene, CameraSlot::Orbit);
        let x = scene.get(vacuum).expect("vacuum").transform.position.x;
        assert!((x - 1.02).abs() < 1e-6);
    }

    #[test]
    fn test_spin_nudge_needs_orbit_camera() {
        let mut scene = SceneGraph::new();
        let burger = scene.add(None, SceneNode::empty().named("BURGER"));
        let mut scheduler = scheduler();

        assert!(scheduler.handle_key(KeyCode::KeyS));
        scheduler.run(&mut scene, CameraSlot::Closeup);
        assert_eq!(scene.get(burger).expect("burger").transform.rotation.y, Rad(0.0));

        // The dropped nudge does not carry over to the orbit camera
        scheduler.run(&mut scene, CameraSlot::Orbit);
        assert_eq!(scene.get(burger).expect("burger").transform.rotation.y, Rad(0.0));

        scheduler.handle_key(KeyCode::KeyS);
        scheduler.run(&mut scene, CameraSlot::Orbit);
        assert_eq!(scene.get(burger).expect("burger").transform.rotation.y, Rad(0.05));
    }

    #[test]
    fn test_unbound_key_is_not_handled() {
        let mut scheduler = scheduler();
        assert!(!scheduler.handle_key(KeyCode::KeyQ));
        assert_eq!(scheduler.len(), 3);
    }
}
