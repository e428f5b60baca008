//! The per-frame loop and input dispatch
//!
//! [`FrameDriver`] owns all interaction state: the scene graph, both cameras,
//! the pointer caches, the drag session and the animation schedule. Input
//! handlers and [`FrameDriver::tick`] are called from the same thread and
//! never overlap.

use winit::event::{DeviceEvent, KeyEvent};

use crate::{
    animation::AnimationScheduler,
    config::{KeyBindings, KitchenConfig},
    content::kitchen::{build_kitchen, kitchen_cameras, kitchen_schedule},
    gfx::{
        camera::{Camera, CameraManager, CameraSlot},
        scene::{NodeId, NodeTree, SceneGraph},
    },
    interaction::{DragSession, InputEvent, InteractionContext, PickOutcome, Viewport},
};

/// Draws one frame of the scene through a camera
pub trait FrameRenderer {
    fn render(&mut self, scene: &SceneGraph, camera: &dyn Camera);

    /// The output surface changed size
    fn resize(&mut self, _width: u32, _height: u32) {}
}

pub struct FrameDriver {
    scene: SceneGraph,
    cameras: CameraManager,
    interaction: InteractionContext,
    animations: AnimationScheduler,
    keys: KeyBindings,
    frames: u64,
}

impl FrameDriver {
    pub fn new(
        scene: SceneGraph,
        mut cameras: CameraManager,
        animations: AnimationScheduler,
        keys: KeyBindings,
        viewport: Viewport,
    ) -> Self {
        cameras.resize_projection(viewport.width(), viewport.height());
        Self {
            scene,
            cameras,
            interaction: InteractionContext::new(viewport),
            animations,
            keys,
            frames: 0,
        }
    }

    /// The stock kitchen with its cameras and animations
    pub fn kitchen(config: &KitchenConfig, viewport: Viewport) -> Self {
        Self::new(
            build_kitchen(),
            kitchen_cameras(config, viewport),
            kitchen_schedule(config),
            config.keys,
            viewport,
        )
    }

    pub fn scene(&self) -> &SceneGraph {
        &self.scene
    }

    pub fn cameras(&self) -> &CameraManager {
        &self.cameras
    }

    pub fn interaction(&self) -> &InteractionContext {
        &self.interaction
    }

    pub fn drag_session(&self) -> DragSession {
        self.interaction.drag.session()
    }

    pub fn viewport(&self) -> Viewport {
        self.interaction.viewport
    }

    /// Number of frames rendered so far
    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn handle_input(&mut self, event: InputEvent) {
        match event {
            InputEvent::PointerMoved { x, y } => {
                self.interaction.pointer.movement = self.interaction.viewport.to_ndc(x, y);
            }
            InputEvent::Pick { x, y } => {
                let ndc = self.interaction.viewport.to_ndc(x, y);
                self.interaction.pointer.click = ndc;
                let outcome = self.interaction.drag.on_pick(ndc, &self.cameras, &self.scene);
                if outcome == PickOutcome::Ignored {
                    log::debug!("pick ignored while orbiting");
                }
            }
            InputEvent::KeyPressed { key, repeat } => {
                if key == self.keys.toggle_camera {
                    // Holding the key must not flicker between cameras
                    if !repeat {
                        self.cameras.toggle();
                    }
                } else if self.animations.handle_key(key) {
                    log::debug!("{key:?} forwarded to animations");
                }
            }
        }
    }

    /// Raw device input for the orbit controls
    pub fn process_device_event(&mut self, event: &DeviceEvent) {
        self.cameras.process_event(event);
    }

    /// Modifier tracking for the orbit controls
    pub fn process_keyboard_event(&mut self, event: &KeyEvent) {
        self.cameras.process_keyboard_event(event);
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        let viewport = Viewport::new(width, height);
        self.interaction.viewport = viewport;
        self.cameras
            .resize_projection(viewport.width(), viewport.height());
    }

    /// Attach a deferred model at the root of the scene
    pub fn attach_content(&mut self, tree: NodeTree) -> NodeId {
        let name = tree.node.display_name().to_string();
        let count = tree.len();
        let id = self.scene.attach(None, tree);
        log::info!("attached {name} ({count} nodes)");
        id
    }

    /// Run one frame: drag tracking, animations, orbit controls, render
    pub fn tick(&mut self, renderer: &mut dyn FrameRenderer) {
        self.interaction.drag.update(
            self.interaction.pointer.movement,
            &self.cameras.closeup,
            &mut self.scene,
        );
        self.animations
            .run(&mut self.scene, self.cameras.selected());
        self.cameras.update();

        renderer.render(&self.scene, self.cameras.active());
        self.frames += 1;
    }

    pub fn selected_camera(&self) -> CameraSlot {
        self.cameras.selected()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::kitchen::{MSG, ORANGE, PLATE, VACUUM};
    use crate::gfx::scene::SceneNode;
    use cgmath::{Point3, Vector3, Vector4};
    use winit::keyboard::KeyCode;

    /// Headless renderer that remembers what each frame looked like
    #[derive(Default)]
    struct RecordingRenderer {
        watch: Option<&'static str>,
        eyes: Vec<Point3<f32>>,
        watched: Vec<Option<Vector3<f32>>>,
    }

    impl RecordingRenderer {
        fn watching(name: &'static str) -> Self {
            Self {
                watch: Some(name),
                ..Self::default()
            }
        }
    }

    impl FrameRenderer for RecordingRenderer {
        fn render(&mut self, scene: &SceneGraph, camera: &dyn Camera) {
            self.eyes.push(camera.eye());
            let position = self
                .watch
                .and_then(|name| scene.find_by_name(name))
                .and_then(|id| scene.get(id))
                .map(|node| node.transform.position);
            self.watched.push(position);
        }
    }

    fn driver() -> FrameDriver {
        FrameDriver::kitchen(&KitchenConfig::default(), Viewport::new(800, 800))
    }

    fn position(driver: &FrameDriver, name: &str) -> Vector3<f32> {
        let id = driver.scene().find_by_name(name).expect(name);
        driver.scene().get(id).expect(name).transform.position
    }

    /// Window pixel under which `world` appears through the closeup camera
    fn screen_point(driver: &FrameDriver, world: [f32; 3]) -> (f64, f64) {
        let camera = &driver.cameras().closeup;
        let clip = camera.projection_matrix()
            * camera.view_matrix()
            * Vector4::new(world[0], world[1], world[2], 1.0);
        let (ndc_x, ndc_y) = (clip.x / clip.w, clip.y / clip.w);
        let viewport = driver.viewport();
        (
            ((ndc_x + 1.0) / 2.0 * viewport.width() as f32) as f64,
            ((1.0 - ndc_y) / 2.0 * viewport.height() as f32) as f64,
        )
    }

    fn press(key: KeyCode) -> InputEvent {
        InputEvent::KeyPressed { key, repeat: false }
    }

    #[test]
    fn test_orange_pick_drag_drop() {
        let mut driver = driver();
        let mut renderer = RecordingRenderer::watching(ORANGE);

        let (x, y) = screen_point(&driver, [0.05, 0.4, 0.4]);
        driver.handle_input(InputEvent::Pick { x, y });
        let orange = driver.scene().find_by_name(ORANGE).expect("orange");
        assert_eq!(driver.drag_session(), DragSession::Dragging(orange));

        let (x, y) = screen_point(&driver, [0.3, 0.35, -0.2]);
        driver.handle_input(InputEvent::PointerMoved { x, y });
        driver.tick(&mut renderer);
        driver.tick(&mut renderer);

        let moved = position(&driver, ORANGE);
        assert!((moved.x - 0.3).abs() < 1e-3, "x = {}", moved.x);
        assert!((moved.z + 0.2).abs() < 1e-3, "z = {}", moved.z);
        assert_eq!(moved.y, 0.4);
        // The frame that moved the orange also rendered it there
        assert_eq!(renderer.watched.first().copied().flatten(), Some(moved));

        driver.handle_input(InputEvent::Pick { x: 0.0, y: 0.0 });
        assert_eq!(driver.drag_session(), DragSession::Idle);
        assert_eq!(position(&driver, ORANGE), moved);

        // Once dropped, pointer movement leaves the orange alone
        driver.handle_input(InputEvent::PointerMoved { x: 400.0, y: 400.0 });
        driver.tick(&mut renderer);
        assert_eq!(position(&driver, ORANGE), moved);
    }

    #[test]
    fn test_plate_is_draggable_too() {
        let mut driver = driver();
        let (x, y) = screen_point(&driver, [0.4, 0.36, 0.4]);
        driver.handle_input(InputEvent::Pick { x, y });
        let plate = driver.scene().find_by_name(PLATE).expect("plate");
        assert_eq!(driver.drag_session(), DragSession::Dragging(plate));
    }

    #[test]
    fn test_pick_ignored_under_orbit_camera() {
        let mut driver = driver();
        driver.handle_input(press(KeyCode::Space));
        assert_eq!(driver.selected_camera(), CameraSlot::Orbit);

        let (x, y) = screen_point(&driver, [0.05, 0.4, 0.4]);
        driver.handle_input(InputEvent::Pick { x, y });
        assert_eq!(driver.drag_session(), DragSession::Idle);
    }

    #[test]
    fn test_camera_toggle_only_on_designated_key() {
        let mut driver = driver();
        let mut renderer = RecordingRenderer::default();

        driver.handle_input(press(KeyCode::KeyA));
        driver.handle_input(press(KeyCode::Enter));
        assert_eq!(driver.selected_camera(), CameraSlot::Closeup);
        assert!(!driver.cameras().controller.is_enabled());

        driver.handle_input(press(KeyCode::Space));
        driver.tick(&mut renderer);
        assert_eq!(driver.selected_camera(), CameraSlot::Orbit);
        assert!(driver.cameras().controller.is_enabled());

        driver.handle_input(InputEvent::KeyPressed {
            key: KeyCode::Space,
            repeat: true,
        });
        assert_eq!(driver.selected_camera(), CameraSlot::Orbit);

        driver.handle_input(press(KeyCode::Space));
        driver.tick(&mut renderer);
        assert_eq!(driver.selected_camera(), CameraSlot::Closeup);

        // Each frame renders through the camera selected before it
        let orbit_eye = renderer.eyes[0];
        assert!((orbit_eye.x - 5.0).abs() < 1e-3 && (orbit_eye.y - 5.0).abs() < 1e-3);
        assert_eq!(renderer.eyes[1], Point3::new(0.0, 1.0, 1.0));
    }

    #[test]
    fn test_early_frames_tolerate_missing_content() {
        let mut driver = driver();
        let mut renderer = RecordingRenderer::watching(MSG);

        driver.handle_input(press(KeyCode::KeyS));
        for _ in 0..5 {
            driver.tick(&mut renderer);
        }
        assert_eq!(driver.frames(), 5);
        assert!(renderer.watched.iter().all(Option::is_none));

        let msg = driver.attach_content(NodeTree::new(SceneNode::empty().named(MSG)));
        driver.tick(&mut renderer);
        let roll = driver.scene().get(msg).expect("msg").transform.rotation.z;
        assert!((roll.0 - 0.05).abs() < 1e-6);
    }

    #[test]
    fn test_vacuum_patrols_every_frame() {
        let mut driver = driver();
        let mut renderer = RecordingRenderer::default();
        let start = position(&driver, VACUUM).x;

        for _ in 0..10 {
            driver.tick(&mut renderer);
        }
        assert!((position(&driver, VACUUM).x - (start + 0.1)).abs() < 1e-4);
    }

    #[test]
    fn test_resize_updates_mapping_and_cameras() {
        let mut driver = driver();
        driver.resize(1600, 800);
        assert_eq!(driver.viewport(), Viewport::new(1600, 800));
        assert_eq!(driver.cameras().orbit.projection.aspect, 2.0);

        driver.resize(0, 0);
        assert_eq!(driver.viewport(), Viewport::new(1, 1));
    }
}
