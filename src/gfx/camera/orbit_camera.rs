use super::camera_utils::{Camera, Projection};
use cgmath::*;

#[derive(Debug, Clone, Copy)]
pub struct OrbitCamera {
    pub distance: f32,
    pub pitch: f32,
    pub yaw: f32,
    pub eye: Vector3<f32>,
    pub target: Vector3<f32>,
    pub up: Vector3<f32>,
    pub bounds: OrbitCameraBounds,
    pub projection: Projection,
}

impl Camera for OrbitCamera {
    fn eye(&self) -> Point3<f32> {
        Point3::from_vec(self.eye)
    }

    fn view_matrix(&self) -> Matrix4<f32> {
        Matrix4::look_at_rh(Point3::from_vec(self.eye), Point3::from_vec(self.target), self.up)
    }

    fn projection_matrix(&self) -> Matrix4<f32> {
        self.projection.matrix()
    }
}

impl OrbitCamera {
    pub fn new(distance: f32, pitch: f32, yaw: f32, target: Vector3<f32>, aspect: f32) -> Self {
        let mut camera = Self {
            distance,
            pitch,
            yaw,
            eye: Vector3::zero(), // Will be auto-calculted in `update()` nevertheless.
            target,
            up: Vector3::unit_y(),
            bounds: OrbitCameraBounds::default(),
            projection: Projection::new(aspect),
        };
        camera.update();
        camera
    }

    /// Place the camera at `eye` orbiting around `target`
    pub fn looking_at(eye: [f32; 3], target: [f32; 3], aspect: f32) -> Self {
        let target = Vector3::from(target);
        let offset = Vector3::from(eye) - target;
        let distance = offset.magnitude().max(f32::EPSILON);
        let pitch = (offset.y / distance).clamp(-1.0, 1.0).asin();
        let yaw = offset.x.atan2(offset.z);
        Self::new(distance, pitch, yaw, target, aspect)
    }

    pub fn set_distance(&mut self, distance: f32) {
        self.distance = distance.clamp(
            self.bounds.min_distance.unwrap_or(f32::EPSILON),
            self.bounds.max_distance.unwrap_or(f32::MAX),
        );
        self.update();
    }

    pub fn add_distance(&mut self, delta: f32) {
        let corrected_zoom = f32::log10(self.distance.max(1.1)) * delta;
        self.set_distance(self.distance + corrected_zoom);
    }

    pub fn set_pitch(&mut self, pitch: f32) {
        self.pitch = pitch.clamp(self.bounds.min_pitch, self.bounds.max_pitch);
        self.update();
    }

    pub fn add_pitch(&mut self, delta: f32) {
        self.set_pitch(self.pitch + delta);
    }

    pub fn set_yaw(&mut self, yaw: f32) {
        let mut bounded_yaw = yaw;
        if let Some(min_yaw) = self.bounds.min_yaw {
            bounded_yaw = bounded_yaw.clamp(min_yaw, f32::MAX);
        }
        if let Some(max_yaw) = self.bounds.max_yaw {
            bounded_yaw = bounded_yaw.clamp(f32::MIN, max_yaw);
        }
        self.yaw = bounded_yaw;
        self.update();
    }

    pub fn add_yaw(&mut self, delta: f32) {
        self.set_yaw(self.yaw + delta);
    }

    /// Pans the focus point relative to the current view direction
    /// delta.0 = horizontal pan (left/right relative to camera view)
    /// delta.1 = vertical pan (up/down relative to camera view)
    pub fn pan(&mut self, delta: (f32, f32)) {
        let forward = (self.target - self.eye).normalize();
        let right = forward.cross(self.up).normalize();
        let up = right.cross(forward).normalize();

        // Scale by distance for a consistent feel at all zoom levels
        let pan_scale = self.distance * 0.1;

        self.target += (right * delta.0 + up * delta.1) * pan_scale;
        self.update();
    }

    /// Updates the camera after changing `distance`, `pitch`, `yaw` or `target`.
    fn update(&mut self) {
        self.eye =
            calculate_cartesian_eye_position(self.pitch, self.yaw, self.distance, self.target);
    }

    pub fn resize_projection(&mut self, width: u32, height: u32) {
        self.projection.resize(width, height);
    }
}

#[derive(Debug, Clone, Copy)]
pub struct OrbitCameraBounds {
    pub min_distance: Option<f32>,
    pub max_distance: Option<f32>,
    pub min_pitch: f32,
    pub max_pitch: f32,
    pub min_yaw: Option<f32>,
    pub max_yaw: Option<f32>,
}

impl Default for OrbitCameraBounds {
    fn default() -> Self {
        Self {
            min_distance: Some(0.5),
            max_distance: Some(16.0),
            min_pitch: -std::f32::consts::PI / 2.0 + 0.01,
            max_pitch: std::f32::consts::PI / 2.0 - 0.01,
            min_yaw: None,
            max_yaw: None,
        }
    }
}

fn calculate_cartesian_eye_position(
    pitch: f32,
    yaw: f32,
    distance: f32,
    target: Vector3<f32>,
) -> Vector3<f32> {
    Vector3::new(
        distance * yaw.sin() * pitch.cos(),
        distance * pitch.sin(),
        distance * yaw.cos() * pitch.cos(),
    ) + target
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_looking_at_reproduces_eye() {
        let camera = OrbitCamera::looking_at([5.0, 5.0, 5.0], [0.0, 0.0, 0.0], 1.0);
        assert!((camera.eye - Vector3::new(5.0, 5.0, 5.0)).magnitude() < 1e-4);
        assert!((camera.distance - 75f32.sqrt()).abs() < 1e-4);
    }

    #[test]
    fn test_pitch_is_clamped() {
        let mut camera = OrbitCamera::looking_at([5.0, 5.0, 5.0], [0.0, 0.0, 0.0], 1.0);
        camera.add_pitch(10.0);
        assert_eq!(camera.pitch, camera.bounds.max_pitch);
    }

    #[test]
    fn test_distance_is_clamped() {
        let mut camera = OrbitCamera::looking_at([5.0, 5.0, 5.0], [0.0, 0.0, 0.0], 1.0);
        camera.set_distance(100.0);
        assert_eq!(camera.distance, 16.0);
        assert!((camera.eye.magnitude() - 16.0).abs() < 1e-3);
    }

    #[test]
    fn test_pan_moves_target_and_keeps_distance() {
        let mut camera = OrbitCamera::looking_at([0.0, 0.0, 5.0], [0.0, 0.0, 0.0], 1.0);
        camera.pan((1.0, 0.0));
        assert!(camera.target.x > 0.0);
        assert!(((camera.eye - camera.target).magnitude() - 5.0).abs() < 1e-4);
    }
}
