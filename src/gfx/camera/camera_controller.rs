use winit::{
    dpi::PhysicalPosition,
    event::{DeviceEvent, ElementState, KeyEvent, MouseScrollDelta},
    keyboard::{KeyCode, PhysicalKey},
};

use super::orbit_camera::OrbitCamera;

/// Motion below this is treated as settled
const SETTLE_EPSILON: f32 = 1e-5;

/// Orbit controls for the free camera
///
/// Drag rotates, shift + drag pans, the wheel zooms. Input is accumulated
/// and applied in [`update`](CameraController::update) once per frame. With
/// damping, only a fraction of the pending motion is applied each frame so
/// the camera eases out after the pointer stops.
pub struct CameraController {
    pub rotate_speed: f32,
    pub zoom_speed: f32,
    pub pan_speed: f32,
    /// Fraction of pending motion applied per frame; `None` applies it all
    pub damping_factor: Option<f32>,
    enabled: bool,
    is_shift_held: bool,
    is_mouse_pressed: bool,
    pending_rotation: (f32, f32),
    pending_pan: (f32, f32),
    pending_zoom: f32,
}

impl CameraController {
    pub fn new(rotate_speed: f32, zoom_speed: f32) -> Self {
        Self {
            rotate_speed,
            zoom_speed,
            pan_speed: 0.01,
            damping_factor: None,
            enabled: true,
            is_shift_held: false,
            is_mouse_pressed: false,
            pending_rotation: (0.0, 0.0),
            pending_pan: (0.0, 0.0),
            pending_zoom: 0.0,
        }
    }

    pub fn with_damping(mut self, factor: f32) -> Self {
        self.damping_factor = Some(factor.clamp(0.01, 1.0));
        self
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Disabling drops any motion still in flight
    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
        if !enabled {
            self.is_mouse_pressed = false;
            self.pending_rotation = (0.0, 0.0);
            self.pending_pan = (0.0, 0.0);
            self.pending_zoom = 0.0;
        }
    }

    pub fn process_events(&mut self, event: &DeviceEvent) {
        match event {
            DeviceEvent::Button {
                button: 0, // Left Mouse Button
                state,
            } => self.on_button(*state == ElementState::Pressed),
            DeviceEvent::MouseWheel { delta } => {
                let scroll_amount = -match delta {
                    MouseScrollDelta::LineDelta(_, scroll) => *scroll,
                    MouseScrollDelta::PixelDelta(PhysicalPosition { y: scroll, .. }) => {
                        *scroll as f32
                    }
                };
                self.on_scroll(scroll_amount);
            }
            DeviceEvent::MouseMotion { delta } => self.on_motion(delta.0 as f32, delta.1 as f32),
            _ => (),
        }
    }

    pub fn process_keyed_events(&mut self, event: &KeyEvent) {
        if let KeyEvent {
            physical_key: PhysicalKey::Code(KeyCode::ShiftLeft | KeyCode::ShiftRight),
            state,
            ..
        } = event
        {
            self.is_shift_held = *state == ElementState::Pressed;
        }
    }

    pub fn on_button(&mut self, pressed: bool) {
        self.is_mouse_pressed = self.enabled && pressed;
    }

    pub fn on_shift(&mut self, held: bool) {
        self.is_shift_held = held;
    }

    /// Pointer motion in pixels; ignored unless the button is held
    pub fn on_motion(&mut self, dx: f32, dy: f32) {
        if !self.enabled || !self.is_mouse_pressed {
            return;
        }

        if self.is_shift_held {
            // SHIFT + DRAG = PAN (move focus point)
            self.pending_pan.0 += -dx * self.pan_speed;
            self.pending_pan.1 += dy * self.pan_speed;
        } else {
            // NORMAL DRAG = ROTATE (orbit around focus)
            self.pending_rotation.0 += -dx * self.rotate_speed;
            self.pending_rotation.1 += dy * self.rotate_speed;
        }
    }

    /// Wheel lines (positive zooms out)
    pub fn on_scroll(&mut self, amount: f32) {
        if self.enabled {
            self.pending_zoom += amount * self.zoom_speed;
        }
    }

    /// Returns true if currently panning
    pub fn is_panning(&self) -> bool {
        self.is_mouse_pressed && self.is_shift_held
    }

    /// Returns true if currently rotating
    pub fn is_rotating(&self) -> bool {
        self.is_mouse_pressed && !self.is_shift_held
    }

    /// Whether any motion is still waiting to be applied
    pub fn is_settled(&self) -> bool {
        self.pending_rotation.0.abs() < SETTLE_EPSILON
            && self.pending_rotation.1.abs() < SETTLE_EPSILON
            && self.pending_pan.0.abs() < SETTLE_EPSILON
            && self.pending_pan.1.abs() < SETTLE_EPSILON
            && self.pending_zoom.abs() < SETTLE_EPSILON
    }

    /// Apply this frame's share of pending motion to `camera`
    pub fn update(&mut self, camera: &mut OrbitCamera) {
        if !self.enabled || self.is_settled() {
            return;
        }

        let share = self.damping_factor.unwrap_or(1.0);

        let yaw = self.pending_rotation.0 * share;
        let pitch = self.pending_rotation.1 * share;
        let pan = (self.pending_pan.0 * share, self.pending_pan.1 * share);
        let zoom = self.pending_zoom * share;

        camera.add_yaw(yaw);
        camera.add_pitch(pitch);
        if pan != (0.0, 0.0) {
            camera.pan(pan);
        }
        if zoom != 0.0 {
            camera.add_distance(zoom);
        }

        self.pending_rotation.0 -= yaw;
        self.pending_rotation.1 -= pitch;
        self.pending_pan.0 -= pan.0;
        self.pending_pan.1 -= pan.1;
        self.pending_zoom -= zoom;

        if self.is_settled() {
            self.pending_rotation = (0.0, 0.0);
            self.pending_pan = (0.0, 0.0);
            self.pending_zoom = 0.0;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn camera() -> OrbitCamera {
        OrbitCamera::looking_at([5.0, 5.0, 5.0], [0.0, 0.0, 0.0], 1.0)
    }

    #[test]
    fn test_drag_rotates_on_update() {
        let mut controller = CameraController::new(0.005, 0.1);
        let mut camera = camera();
        let yaw = camera.yaw;

        controller.on_button(true);
        controller.on_motion(-100.0, 0.0);
        assert!(controller.is_rotating());
        // Nothing moves until the frame update
        assert_eq!(camera.yaw, yaw);

        controller.update(&mut camera);
        assert!((camera.yaw - (yaw + 0.5)).abs() < 1e-5);
        assert!(controller.is_settled());
    }

    #[test]
    fn test_motion_without_button_is_ignored() {
        let mut controller = CameraController::new(0.005, 0.1);
        controller.on_motion(50.0, 50.0);
        assert!(controller.is_settled());
    }

    #[test]
    fn test_damping_eases_out_over_frames() {
        let mut controller = CameraController::new(0.005, 0.1).with_damping(0.25);
        let mut camera = camera();
        let yaw = camera.yaw;

        controller.on_button(true);
        controller.on_motion(-100.0, 0.0);
        controller.on_button(false);

        controller.update(&mut camera);
        let first_step = camera.yaw - yaw;
        assert!((first_step - 0.125).abs() < 1e-5);

        controller.update(&mut camera);
        let second_step = camera.yaw - yaw - first_step;
        assert!(second_step < first_step && second_step > 0.0);
        assert!(!controller.is_settled());

        for _ in 0..200 {
            controller.update(&mut camera);
        }
        assert!(controller.is_settled());
        assert!((camera.yaw - (yaw + 0.5)).abs() < 1e-3);
    }

    #[test]
    fn test_disabled_controls_ignore_input_and_drop_pending() {
        let mut controller = CameraController::new(0.005, 0.1).with_damping(0.1);
        let mut camera = camera();
        let eye = camera.eye;

        controller.on_button(true);
        controller.on_motion(-100.0, 20.0);
        controller.set_enabled(false);
        controller.update(&mut camera);
        assert_eq!(camera.eye, eye);

        controller.on_button(true);
        controller.on_motion(10.0, 10.0);
        controller.on_scroll(3.0);
        assert!(controller.is_settled());
    }

    #[test]
    fn test_shift_drag_pans() {
        let mut controller = CameraController::new(0.005, 0.1);
        let mut camera = camera();

        controller.on_shift(true);
        controller.on_button(true);
        assert!(controller.is_panning());
        controller.on_motion(10.0, 0.0);
        controller.update(&mut camera);
        assert!(camera.target != cgmath::Vector3::new(0.0, 0.0, 0.0));
    }
}
