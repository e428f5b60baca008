//! The stock kitchen scene
//!
//! A room with a table in the middle. The table cover is the drop surface,
//! the plate and the orange on it can be dragged around. Larger props load
//! in the background (see [`deferred_models`]).

use std::f32::consts::{FRAC_PI_2, PI};

use crate::{
    animation::{AnimationScheduler, PatrolTask, RollTask, SpinTask},
    config::KitchenConfig,
    gfx::{
        camera::{CameraController, CameraManager, CameraSlot, FixedCamera, OrbitCamera},
        geometry::{generate_cuboid, generate_cylinder, generate_plane, generate_sphere},
        scene::{SceneGraph, SceneNode},
    },
    interaction::Viewport,
};

use super::loader::DeferredModel;

pub const TABLE_COVER: &str = "TABLE_COVER";
pub const PLATE: &str = "PLATE";
pub const ORANGE: &str = "ORANGE";
pub const VACUUM: &str = "VACUUM";
pub const BURGER: &str = "BURGER";
pub const MSG: &str = "MSG";

const WALL: [f32; 4] = [0.96, 0.93, 0.86, 1.0];
const WOOD: [f32; 4] = [0.55, 0.35, 0.2, 1.0];
const WHITE: [f32; 4] = [1.0, 1.0, 1.0, 1.0];
const STEEL: [f32; 4] = [0.6, 0.62, 0.65, 1.0];

/// Build the part of the kitchen that is available immediately
pub fn build_kitchen() -> SceneGraph {
    let mut scene = SceneGraph::new();

    // Shells are hit from the inside, which picking reports as the exit point
    scene.add(
        None,
        SceneNode::mesh(generate_cuboid(5.0, 3.5, 5.0), WALL)
            .named("ROOM")
            .at(0.0, 1.0, 0.0),
    );
    scene.add(
        None,
        SceneNode::mesh(generate_cuboid(15.0, 10.0, 15.0), [0.53, 0.81, 0.92, 1.0])
            .named("SKYBOX"),
    );

    scene.add(
        None,
        SceneNode::mesh(generate_plane(5.0, 5.0), [0.45, 0.45, 0.45, 1.0])
            .named("FLOOR")
            .rotated(-FRAC_PI_2, 0.0, 0.0),
    );
    scene.add(
        None,
        SceneNode::mesh(generate_plane(5.0, 5.0), WALL)
            .named("CEILING")
            .at(0.0, 2.5, 0.0)
            .rotated(FRAC_PI_2, 0.0, 0.0),
    );
    scene.add(
        None,
        SceneNode::mesh(generate_plane(15.0, 15.0), [0.3, 0.6, 0.25, 1.0])
            .named("GRASS")
            .at(0.0, -0.8, 0.0)
            .rotated(-FRAC_PI_2, 0.0, 0.0),
    );

    add_table(&mut scene);
    add_lamps(&mut scene);

    scene.add(
        None,
        SceneNode::mesh(generate_cylinder(0.2, 0.2, 0.1, 32, false), STEEL)
            .named(VACUUM)
            .at(1.0, 0.0, 1.0),
    );

    log::debug!("kitchen built with {} nodes", scene.len());
    scene
}

fn add_table(scene: &mut SceneGraph) {
    scene.add(
        None,
        SceneNode::mesh(generate_cuboid(1.2, 0.4, 1.2), WOOD)
            .named("TABLE")
            .at(0.0, 0.1, 0.0),
    );
    scene.add(
        None,
        SceneNode::mesh(generate_cuboid(1.3, 0.05, 1.3), [0.85, 0.2, 0.2, 1.0])
            .named(TABLE_COVER)
            .at(0.0, 0.325, 0.0)
            .drop_surface(),
    );

    scene.add(
        None,
        SceneNode::mesh(generate_cylinder(0.1, 0.1, 0.05, 32, false), WHITE)
            .named(PLATE)
            .at(0.4, 0.35, 0.4)
            .draggable(),
    );
    scene.add(
        None,
        SceneNode::mesh(generate_sphere(0.05, 32, 16), [1.0, 0.55, 0.0, 1.0])
            .named(ORANGE)
            .at(0.05, 0.4, 0.4)
            .draggable(),
    );

    scene.add(
        None,
        SceneNode::mesh(generate_cuboid(0.3, 0.05, 0.2), [0.76, 0.6, 0.42, 1.0])
            .named("CUTTING_BOARD")
            .at(-0.2, 0.35, 0.3),
    );
    scene.add(
        None,
        SceneNode::mesh(generate_cylinder(0.05, 0.05, 0.1, 32, true), WHITE)
            .named("CUP")
            .at(0.2, 0.42, 0.4),
    );
    scene.add(
        None,
        SceneNode::mesh(generate_cylinder(0.05, 0.05, 0.01, 32, false), WHITE)
            .named("CUP_BASE")
            .at(0.2, 0.35, 0.4),
    );
}

fn add_lamps(scene: &mut SceneGraph) {
    scene.add(
        None,
        SceneNode::mesh(generate_cylinder(0.05, 0.05, 1.0, 16, false), STEEL)
            .named("STAND")
            .at(-1.5, 1.99, 1.5),
    );

    for (index, (x, z)) in [(1.5, 1.5), (-1.5, -1.5)].into_iter().enumerate() {
        scene.add(None, SceneNode::empty().named(format!("LIGHT_{}", index + 1)).at(x, 2.4, z));
        scene.add(
            None,
            SceneNode::mesh(generate_sphere(0.05, 16, 12), [1.0, 1.0, 0.85, 1.0])
                .named(format!("BULB_{}", index + 1))
                .at(x, 2.47, z),
        );
    }
}

/// Props that load after start-up
pub fn deferred_models(config: &KitchenConfig) -> Vec<DeferredModel> {
    let dir = &config.model_dir;
    vec![
        DeferredModel::placard("TEXT", "Fuioyohhh", 0.2, 0.05).at(0.0, 1.7, -2.5),
        DeferredModel::placard(MSG, "MSG", 0.2, 0.05)
            .at(-1.5, 1.7, -2.5)
            .colored([0.9, 0.2, 0.2, 1.0]),
        DeferredModel::obj("OVEN", dir.join("oven.obj"), [0.6, 0.6, 0.6])
            .at(-2.0, 0.2, -2.0)
            .scaled(0.2),
        DeferredModel::obj(BURGER, dir.join("burger.obj"), [0.2, 0.15, 0.2])
            .at(-1.5, 1.4, 1.5)
            .rotated_y(FRAC_PI_2)
            .scaled(0.2)
            .colored([0.8, 0.5, 0.2, 1.0]),
        DeferredModel::obj("SHELF", dir.join("shelf.obj"), [1.0, 1.6, 0.4])
            .at(-1.5, 0.0, -1.9)
            .rotated_y(1.5 * PI)
            .scaled(0.05)
            .colored(WOOD),
        DeferredModel::obj("FRIDGE", dir.join("fridge.obj"), [0.8, 1.8, 0.7])
            .at(1.0, 0.6, -2.1)
            .scaled(0.3),
    ]
}

/// Orbit and closeup cameras, starting on the closeup
pub fn kitchen_cameras(config: &KitchenConfig, viewport: Viewport) -> CameraManager {
    let aspect = viewport.aspect();
    let orbit = OrbitCamera::looking_at(config.orbit_camera.eye, config.orbit_camera.target, aspect);
    let closeup =
        FixedCamera::looking_at(config.closeup_camera.eye, config.closeup_camera.target, aspect);

    let controls = &config.orbit_controls;
    let mut controller = CameraController::new(controls.rotate_speed, controls.zoom_speed);
    if let Some(damping) = controls.damping {
        controller = controller.with_damping(damping);
    }

    CameraManager::new(orbit, closeup, controller, CameraSlot::Closeup)
}

/// Vacuum patrol, burger spin and the rolling message
pub fn kitchen_schedule(config: &KitchenConfig) -> AnimationScheduler {
    let patrol = &config.patrol;
    let mut scheduler = AnimationScheduler::new();
    scheduler
        .schedule(
            VACUUM,
            PatrolTask::new(patrol.axis, patrol.low, patrol.high, patrol.speed),
        )
        .schedule_on_key(
            BURGER,
            config.keys.spin,
            SpinTask::new(config.spin_step).continuous(config.spin_continuous),
        )
        .schedule(MSG, RollTask::new(config.roll_step));
    scheduler
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kitchen_tags() {
        let scene = build_kitchen();
        let tagged = |name: &str| {
            let id = scene.find_by_name(name).expect(name);
            scene.get(id).expect(name).tags
        };

        assert!(tagged(PLATE).draggable);
        assert!(tagged(ORANGE).draggable);
        assert!(tagged(TABLE_COVER).drop_surface);
        assert!(!tagged(TABLE_COVER).draggable);
        assert!(!tagged(VACUUM).draggable);
    }

    #[test]
    fn test_animation_targets_arrive_later() {
        let scene = build_kitchen();
        let deferred: Vec<_> = deferred_models(&KitchenConfig::default())
            .into_iter()
            .map(|model| model.name)
            .collect();

        assert!(scene.find_by_name(VACUUM).is_some());
        for name in [BURGER, MSG] {
            assert!(scene.find_by_name(name).is_none());
            assert!(deferred.iter().any(|n| n == name));
        }
    }

    #[test]
    fn test_cameras_start_on_closeup_with_controls_off() {
        let cameras = kitchen_cameras(&KitchenConfig::default(), Viewport::new(1280, 720));
        assert!(cameras.is_selected(CameraSlot::Closeup));
        assert!(!cameras.controller.is_enabled());
        assert_eq!(cameras.closeup.projection.aspect, 1280.0 / 720.0);
    }

    #[test]
    fn test_schedule_has_three_tasks() {
        assert_eq!(kitchen_schedule(&KitchenConfig::default()).len(), 3);
    }
}
