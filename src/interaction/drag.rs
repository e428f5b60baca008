//! Click-to-pick, click-to-drop dragging of tagged scene nodes
//!
//! The first pick event over a draggable node picks it up; every frame the
//! node follows the pointer across drop surfaces; the next pick event puts it
//! down where it is. Picking only works through the closeup camera.

use crate::gfx::{
    camera::{Camera, CameraManager, CameraSlot},
    picking::pick,
    scene::{NodeId, SceneGraph},
};

use super::pointer::Ndc;

/// Current drag state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DragSession {
    #[default]
    Idle,
    Dragging(NodeId),
}

/// What a pick event did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PickOutcome {
    /// The orbit camera is active, picking is off
    Ignored,
    /// Nothing draggable is nearest under the pointer
    Missed,
    PickedUp(NodeId),
    Dropped(NodeId),
}

#[derive(Debug, Default)]
pub struct DragController {
    session: DragSession,
}

impl DragController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn session(&self) -> DragSession {
        self.session
    }

    pub fn dragged(&self) -> Option<NodeId> {
        match self.session {
            DragSession::Dragging(node) => Some(node),
            DragSession::Idle => None,
        }
    }

    pub fn is_dragging(&self) -> bool {
        self.dragged().is_some()
    }

    /// Handle a discrete pick event at `ndc`
    ///
    /// Only acts while the closeup camera is selected. While dragging, any
    /// pick drops the node. While idle, the node nearest under the pointer is
    /// picked up if it is draggable.
    pub fn on_pick(&mut self, ndc: Ndc, cameras: &CameraManager, scene: &SceneGraph) -> PickOutcome {
        if !cameras.is_selected(CameraSlot::Closeup) {
            return PickOutcome::Ignored;
        }

        if let DragSession::Dragging(node) = self.session {
            self.session = DragSession::Idle;
            log::info!("drop draggable {}", display_name(scene, node));
            return PickOutcome::Dropped(node);
        }

        let hits = pick(ndc, &cameras.closeup, scene);
        let nearest = hits
            .first()
            .and_then(|hit| scene.get(hit.node).map(|node| (hit.node, node)));

        match nearest {
            Some((id, node)) if node.tags.draggable => {
                self.session = DragSession::Dragging(id);
                log::info!("found draggable {}", node.display_name());
                PickOutcome::PickedUp(id)
            }
            Some((_, node)) => {
                log::debug!("nearest hit {} is not draggable", node.display_name());
                PickOutcome::Missed
            }
            None => {
                log::debug!("pick at ({:.3}, {:.3}) hit nothing", ndc.x, ndc.y);
                PickOutcome::Missed
            }
        }
    }

    /// Per-frame tracking of the dragged node
    ///
    /// Casts from `ndc` through `camera` and, for every hit on a drop surface
    /// in distance order, moves the node's x and z to the hit point. The
    /// farthest drop-surface hit therefore wins. The y coordinate is never
    /// touched. Returns whether the node moved.
    pub fn update(&mut self, ndc: Ndc, camera: &dyn Camera, scene: &mut SceneGraph) -> bool {
        let DragSession::Dragging(dragged) = self.session else {
            return false;
        };

        let drop_points: Vec<_> = pick(ndc, camera, scene)
            .into_iter()
            .filter(|hit| {
                scene
                    .get(hit.node)
                    .is_some_and(|node| node.tags.drop_surface)
            })
            .map(|hit| hit.point)
            .collect();

        let Some(node) = scene.get_mut(dragged) else {
            return false;
        };

        for point in &drop_points {
            node.transform.position.x = point.x;
            node.transform.position.z = point.z;
        }

        !drop_points.is_empty()
    }
}

fn display_name(scene: &SceneGraph, id: NodeId) -> &str {
    scene
        .get(id)
        .map(|node| node.display_name())
        .unwrap_or("<missing>")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gfx::{
        camera::{CameraController, FixedCamera, OrbitCamera},
        geometry::{generate_cuboid, generate_sphere},
        scene::SceneNode,
    };

    struct Fixture {
        scene: SceneGraph,
        cameras: CameraManager,
        orange: NodeId,
        cover: NodeId,
        board: NodeId,
    }

    /// Closeup camera looks straight down at a table top; the orange sits on
    /// the center ray.
    fn fixture(selected: CameraSlot) -> Fixture {
        let mut scene = SceneGraph::new();
        let cover = scene.add(
            None,
            SceneNode::mesh(generate_cuboid(1.3, 0.05, 1.3), [1.0; 4])
                .named("COVER")
                .at(0.0, 0.325, 0.0)
                .drop_surface(),
        );
        let orange = scene.add(
            None,
            SceneNode::mesh(generate_sphere(0.05, 16, 12), [1.0, 0.65, 0.0, 1.0])
                .named("ORANGE")
                .at(0.0, 0.4, 0.0)
                .draggable(),
        );
        let board = scene.add(
            None,
            SceneNode::mesh(generate_cuboid(0.3, 0.05, 0.2), [1.0; 4])
                .named("BOARD")
                .at(0.4, 0.375, 0.0),
        );

        let cameras = CameraManager::new(
            OrbitCamera::looking_at([5.0, 5.0, 5.0], [0.0, 0.0, 0.0], 1.0),
            FixedCamera::looking_at([0.0, 2.0, 0.001], [0.0, 0.0, 0.0], 1.0),
            CameraController::new(0.005, 0.1),
            selected,
        );

        Fixture {
            scene,
            cameras,
            orange,
            cover,
            board,
        }
    }

    #[test]
    fn test_pick_with_orbit_camera_never_starts_drag() {
        let mut f = fixture(CameraSlot::Orbit);
        let mut drag = DragController::new();

        assert_eq!(drag.on_pick(Ndc::CENTER, &f.cameras, &f.scene), PickOutcome::Ignored);
        assert_eq!(drag.session(), DragSession::Idle);

        // Dropping is also disabled while orbiting
        f.cameras.toggle();
        drag.on_pick(Ndc::CENTER, &f.cameras, &f.scene);
        f.cameras.toggle();
        assert_eq!(drag.on_pick(Ndc::CENTER, &f.cameras, &f.scene), PickOutcome::Ignored);
        assert_eq!(drag.dragged(), Some(f.orange));
    }

    #[test]
    fn test_pick_draggable_then_drop() {
        let f = fixture(CameraSlot::Closeup);
        let mut drag = DragController::new();

        assert_eq!(
            drag.on_pick(Ndc::CENTER, &f.cameras, &f.scene),
            PickOutcome::PickedUp(f.orange)
        );
        assert_eq!(drag.session(), DragSession::Dragging(f.orange));

        assert_eq!(
            drag.on_pick(Ndc::new(0.9, 0.9), &f.cameras, &f.scene),
            PickOutcome::Dropped(f.orange)
        );
        assert_eq!(drag.session(), DragSession::Idle);
    }

    #[test]
    fn test_pick_non_draggable_stays_idle() {
        let f = fixture(CameraSlot::Closeup);
        let mut drag = DragController::new();

        // Off to the side the nearest hit is the bare table cover
        let ndc = Ndc::new(-0.2, 0.0);
        assert_eq!(drag.on_pick(ndc, &f.cameras, &f.scene), PickOutcome::Missed);
        assert_eq!(drag.session(), DragSession::Idle);

        // Pointing at empty space also misses
        assert_eq!(
            drag.on_pick(Ndc::new(0.99, 0.99), &f.cameras, &f.scene),
            PickOutcome::Missed
        );
    }

    #[test]
    fn test_drag_follows_drop_surface_and_keeps_height() {
        let mut f = fixture(CameraSlot::Closeup);
        let mut drag = DragController::new();
        drag.on_pick(Ndc::CENTER, &f.cameras, &f.scene);

        let ndc = Ndc::new(-0.2, 0.1);
        let expected = pick(ndc, &f.cameras.closeup, &f.scene)
            .into_iter()
            .find(|hit| hit.node == f.cover)
            .expect("pointer over the cover")
            .point;

        for _ in 0..3 {
            assert!(drag.update(ndc, &f.cameras.closeup, &mut f.scene));
            let orange = f.scene.get(f.orange).expect("orange");
            assert_eq!(orange.transform.position.x, expected.x);
            assert_eq!(orange.transform.position.z, expected.z);
            assert_eq!(orange.transform.position.y, 0.4);
        }
    }

    #[test]
    fn test_drop_surface_behind_other_hit_still_moves_node() {
        let mut f = fixture(CameraSlot::Closeup);
        let mut drag = DragController::new();
        drag.on_pick(Ndc::CENTER, &f.cameras, &f.scene);

        // Aim through the cutting board; the cover beneath it is still hit
        let board_ndc = Ndc::new(0.26, 0.0);
        let hits = pick(board_ndc, &f.cameras.closeup, &f.scene);
        assert_eq!(hits.first().map(|hit| hit.node), Some(f.board));

        assert!(drag.update(board_ndc, &f.cameras.closeup, &mut f.scene));
        let cover_hit = hits
            .iter()
            .find(|hit| hit.node == f.cover)
            .expect("cover behind board");
        let orange = f.scene.get(f.orange).expect("orange");
        assert_eq!(orange.transform.position.x, cover_hit.point.x);
    }

    #[test]
    fn test_no_drop_surface_leaves_position() {
        let mut f = fixture(CameraSlot::Closeup);
        let mut drag = DragController::new();
        drag.on_pick(Ndc::CENTER, &f.cameras, &f.scene);
        let before = f.scene.get(f.orange).expect("orange").transform.position;

        assert!(!drag.update(Ndc::new(0.99, 0.99), &f.cameras.closeup, &mut f.scene));
        assert_eq!(f.scene.get(f.orange).expect("orange").transform.position, before);
    }

    #[test]
    fn test_update_while_idle_is_noop() {
        let mut f = fixture(CameraSlot::Closeup);
        let mut drag = DragController::new();
        assert!(!drag.update(Ndc::CENTER, &f.cameras.closeup, &mut f.scene));
    }
}
