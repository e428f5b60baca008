use cgmath::{Matrix4, Point3, Vector3};

use super::camera_utils::{Camera, Projection};

/// A camera parked at one spot looking at one point
///
/// Used for the closeup view over the table. It never moves; only its
/// aspect ratio follows the window.
#[derive(Debug, Clone, Copy)]
pub struct FixedCamera {
    pub eye: Point3<f32>,
    pub target: Point3<f32>,
    pub up: Vector3<f32>,
    pub projection: Projection,
}

impl FixedCamera {
    pub fn looking_at(eye: [f32; 3], target: [f32; 3], aspect: f32) -> Self {
        Self {
            eye: eye.into(),
            target: target.into(),
            up: Vector3::unit_y(),
            projection: Projection::new(aspect),
        }
    }

    pub fn resize_projection(&mut self, width: u32, height: u32) {
        self.projection.resize(width, height);
    }
}

impl Camera for FixedCamera {
    fn eye(&self) -> Point3<f32> {
        self.eye
    }

    fn view_matrix(&self) -> Matrix4<f32> {
        Matrix4::look_at_rh(self.eye, self.target, self.up)
    }

    fn projection_matrix(&self) -> Matrix4<f32> {
        self.projection.matrix()
    }
}
