use cgmath::{Deg, Matrix4, Point3, Rad, SquareMatrix};
use winit::event::{DeviceEvent, KeyEvent};

use super::{
    camera_controller::CameraController, fixed_camera::FixedCamera, orbit_camera::OrbitCamera,
};

#[rustfmt::skip]
pub const OPENGL_TO_WGPU_MATRIX: cgmath::Matrix4<f32> = cgmath::Matrix4::new(
    1.0, 0.0, 0.0, 0.0,
    0.0, 1.0, 0.0, 0.0,
    0.0, 0.0, 0.5, 0.5,
    0.0, 0.0, 0.0, 1.0,
);

/// A viewpoint that can be rendered through and picked from
pub trait Camera {
    /// Camera position in world space
    fn eye(&self) -> Point3<f32>;

    fn view_matrix(&self) -> Matrix4<f32>;

    /// Perspective projection in OpenGL convention (NDC z in -1..1)
    fn projection_matrix(&self) -> Matrix4<f32>;

    /// View-projection remapped to wgpu's 0..1 depth range
    fn build_view_projection_matrix(&self) -> Matrix4<f32> {
        OPENGL_TO_WGPU_MATRIX * self.projection_matrix() * self.view_matrix()
    }
}

/// Perspective projection parameters shared by both cameras
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projection {
    pub aspect: f32,
    pub fovy: Rad<f32>,
    pub znear: f32,
    pub zfar: f32,
}

impl Projection {
    pub fn new(aspect: f32) -> Self {
        Self {
            aspect,
            fovy: Deg(75.0).into(),
            znear: 0.1,
            zfar: 1000.0,
        }
    }

    pub fn matrix(&self) -> Matrix4<f32> {
        cgmath::perspective(self.fovy, self.aspect, self.znear, self.zfar)
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        self.aspect = width.max(1) as f32 / height.max(1) as f32;
    }
}

/// The two registered viewpoints
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CameraSlot {
    /// Free camera driven by orbit controls
    Orbit,
    /// Fixed framing over the table, the only view that allows dragging
    Closeup,
}

impl CameraSlot {
    pub fn other(self) -> Self {
        match self {
            CameraSlot::Orbit => CameraSlot::Closeup,
            CameraSlot::Closeup => CameraSlot::Orbit,
        }
    }
}

/// Owns both cameras and tracks which one is selected
///
/// Orbit controls are enabled exactly when the orbit camera is selected; the
/// invariant is established on construction and kept by [`toggle`].
///
/// [`toggle`]: CameraManager::toggle
pub struct CameraManager {
    pub orbit: OrbitCamera,
    pub closeup: FixedCamera,
    pub controller: CameraController,
    selected: CameraSlot,
}

impl CameraManager {
    pub fn new(
        orbit: OrbitCamera,
        closeup: FixedCamera,
        mut controller: CameraController,
        selected: CameraSlot,
    ) -> Self {
        controller.set_enabled(selected == CameraSlot::Orbit);
        Self {
            orbit,
            closeup,
            controller,
            selected,
        }
    }

    pub fn selected(&self) -> CameraSlot {
        self.selected
    }

    pub fn is_selected(&self, slot: CameraSlot) -> bool {
        self.selected == slot
    }

    /// Swap to the other camera and flip orbit controls to match
    pub fn toggle(&mut self) -> CameraSlot {
        self.selected = self.selected.other();
        self.controller
            .set_enabled(self.selected == CameraSlot::Orbit);
        log::info!("camera change: {:?}", self.selected);
        self.selected
    }

    /// The camera frames are rendered through
    pub fn active(&self) -> &dyn Camera {
        self.camera(self.selected)
    }

    pub fn camera(&self, slot: CameraSlot) -> &dyn Camera {
        match slot {
            CameraSlot::Orbit => &self.orbit,
            CameraSlot::Closeup => &self.closeup,
        }
    }

    pub fn resize_projection(&mut self, width: u32, height: u32) {
        self.orbit.resize_projection(width, height);
        self.closeup.resize_projection(width, height);
    }

    pub fn process_event(&mut self, event: &DeviceEvent) {
        self.controller.process_events(event);
    }

    pub fn process_keyboard_event(&mut self, event: &KeyEvent) {
        self.controller.process_keyed_events(event);
    }

    /// Advance orbit controls (damping) by one frame
    pub fn update(&mut self) {
        self.controller.update(&mut self.orbit);
    }

    /// Uniform data for the selected camera
    pub fn uniform(&self) -> CameraUniform {
        CameraUniform::from_camera(self.active())
    }
}

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable, Debug)]
pub struct CameraUniform {
    /// The eye position of the camera in homogenous coordinates.
    ///
    /// Homogenous coordinates are used to fullfill the 16 byte alignment requirement.
    pub view_position: [f32; 4],

    /// Contains the view projection matrix.
    pub view_proj: [[f32; 4]; 4],
}

impl CameraUniform {
    pub fn from_camera(camera: &dyn Camera) -> Self {
        let eye = camera.eye();
        Self {
            view_position: [eye.x, eye.y, eye.z, 1.0],
            view_proj: convert_matrix4_to_array(camera.build_view_projection_matrix()),
        }
    }
}

impl Default for CameraUniform {
    /// Creates a default [CameraUniform].
    fn default() -> Self {
        Self {
            view_position: [0.0; 4],
            view_proj: convert_matrix4_to_array(Matrix4::identity()),
        }
    }
}

pub fn convert_matrix4_to_array(matrix4: Matrix4<f32>) -> [[f32; 4]; 4] {
    matrix4.into()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn manager(selected: CameraSlot) -> CameraManager {
        CameraManager::new(
            OrbitCamera::looking_at([5.0, 5.0, 5.0], [0.0, 0.0, 0.0], 1.5),
            FixedCamera::looking_at([0.0, 1.0, 1.0], [0.0, 0.0, 0.0], 1.5),
            CameraController::new(0.005, 0.1),
            selected,
        )
    }

    #[test]
    fn test_construction_establishes_controls_invariant() {
        assert!(!manager(CameraSlot::Closeup).controller.is_enabled());
        assert!(manager(CameraSlot::Orbit).controller.is_enabled());
    }

    #[test]
    fn test_toggle_alternates_camera_and_controls() {
        let mut cameras = manager(CameraSlot::Closeup);

        assert_eq!(cameras.toggle(), CameraSlot::Orbit);
        assert!(cameras.controller.is_enabled());

        assert_eq!(cameras.toggle(), CameraSlot::Closeup);
        assert!(!cameras.controller.is_enabled());

        assert_eq!(cameras.toggle(), CameraSlot::Orbit);
        assert!(cameras.is_selected(CameraSlot::Orbit));
    }

    #[test]
    fn test_active_follows_selection() {
        let mut cameras = manager(CameraSlot::Closeup);
        assert_eq!(cameras.active().eye(), Point3::new(0.0, 1.0, 1.0));

        cameras.toggle();
        let eye = cameras.active().eye();
        assert!((eye.x - 5.0).abs() < 1e-4 && (eye.y - 5.0).abs() < 1e-4);
    }

    #[test]
    fn test_resize_updates_both_cameras() {
        let mut cameras = manager(CameraSlot::Closeup);
        cameras.resize_projection(1000, 500);
        assert_eq!(cameras.orbit.projection.aspect, 2.0);
        assert_eq!(cameras.closeup.projection.aspect, 2.0);
    }

    #[test]
    fn test_uniform_carries_eye() {
        let cameras = manager(CameraSlot::Closeup);
        let uniform = cameras.uniform();
        assert_eq!(uniform.view_position, [0.0, 1.0, 1.0, 1.0]);
    }
}
