pub mod camera_controller;
pub mod camera_utils;
pub mod fixed_camera;
pub mod orbit_camera;

// Re-export main types
pub use camera_controller::CameraController;
pub use camera_utils::{Camera, CameraManager, CameraSlot, CameraUniform, Projection};
pub use fixed_camera::FixedCamera;
pub use orbit_camera::OrbitCamera;
