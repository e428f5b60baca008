//! Tunable constants for the kitchen scene
//!
//! Everything has a default matching the stock scene. [`KitchenApp`] exposes
//! builder setters for the fields an embedder is likely to change.
//!
//! [`KitchenApp`]: crate::app::KitchenApp

use std::path::PathBuf;

use winit::keyboard::KeyCode;

use crate::animation::Axis;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyBindings {
    /// Swaps between the orbit and closeup cameras
    pub toggle_camera: KeyCode,
    /// Arms one spin nudge
    pub spin: KeyCode,
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self {
            toggle_camera: KeyCode::Space,
            spin: KeyCode::KeyS,
        }
    }
}

/// Eye and look-at target of a camera
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraPlacement {
    pub eye: [f32; 3],
    pub target: [f32; 3],
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PatrolConfig {
    pub axis: Axis,
    pub low: f32,
    pub high: f32,
    pub speed: f32,
}

impl Default for PatrolConfig {
    fn default() -> Self {
        Self {
            axis: Axis::X,
            low: -2.4,
            high: 2.4,
            speed: 0.01,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrbitControlConfig {
    pub rotate_speed: f32,
    pub zoom_speed: f32,
    /// `None` applies pointer motion immediately
    pub damping: Option<f32>,
}

impl Default for OrbitControlConfig {
    fn default() -> Self {
        Self {
            rotate_speed: 0.005,
            zoom_speed: 0.5,
            damping: Some(0.25),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct KitchenConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
    pub clear_color: wgpu::Color,
    pub keys: KeyBindings,
    pub patrol: PatrolConfig,
    /// Yaw added per spin nudge, radians
    pub spin_step: f32,
    /// Keep spinning every frame while the orbit camera is active
    pub spin_continuous: bool,
    /// Z rotation added to the message placard each frame, radians
    pub roll_step: f32,
    pub orbit_controls: OrbitControlConfig,
    pub orbit_camera: CameraPlacement,
    pub closeup_camera: CameraPlacement,
    /// Directory holding the OBJ files for deferred models
    pub model_dir: PathBuf,
}

impl Default for KitchenConfig {
    fn default() -> Self {
        Self {
            title: "Kitchenette".to_string(),
            width: 1280,
            height: 720,
            clear_color: wgpu::Color {
                r: 0.53,
                g: 0.81,
                b: 0.92,
                a: 1.0,
            },
            keys: KeyBindings::default(),
            patrol: PatrolConfig::default(),
            spin_step: 0.05,
            spin_continuous: false,
            roll_step: 0.05,
            orbit_controls: OrbitControlConfig::default(),
            orbit_camera: CameraPlacement {
                eye: [5.0, 5.0, 5.0],
                target: [0.0, 0.0, 0.0],
            },
            closeup_camera: CameraPlacement {
                eye: [0.0, 1.0, 1.0],
                target: [0.0, 0.0, 0.0],
            },
            model_dir: PathBuf::from("assets/models"),
        }
    }
}
