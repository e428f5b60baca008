//! # Ray Picking
//!
//! Converts a pointer position in normalized device coordinates into a world
//! space ray and intersects it with every mesh in the scene graph.
//!
//! ## How it works
//!
//! 1. **NDC to Ray**: un-project the near and far plane points through the
//!    inverse view-projection of the camera
//! 2. **Ray-Node Intersection**: move the ray into each node's local space and
//!    test it against the node's local bounding box
//! 3. **Ordering**: collect every hit and sort by distance from the camera
//!
//! All hits are returned, not only the nearest one. Callers that only care
//! about the closest node look at the first element.
//!
//! ## Usage
//!
//! ```rust
//! use kitchenette::gfx::camera::FixedCamera;
//! use kitchenette::gfx::geometry::generate_cuboid;
//! use kitchenette::gfx::picking::pick;
//! use kitchenette::gfx::scene::{SceneGraph, SceneNode};
//! use kitchenette::interaction::Ndc;
//!
//! let mut scene = SceneGraph::new();
//! scene.add(None, SceneNode::mesh(generate_cuboid(1.0, 1.0, 1.0), [1.0; 4]).named("BOX"));
//!
//! let camera = FixedCamera::looking_at([0.0, 0.0, 5.0], [0.0, 0.0, 0.0], 1.0);
//! let hits = pick(Ndc::CENTER, &camera, &scene);
//! assert_eq!(hits.len(), 1);
//! ```

use cgmath::{InnerSpace, Matrix4, Point3, SquareMatrix, Transform, Vector3};

use crate::gfx::{
    camera::Camera,
    scene::{NodeId, SceneGraph},
};
use crate::interaction::Ndc;

/// A 3D ray for intersection testing
#[derive(Debug, Clone, Copy)]
pub struct Ray {
    /// Ray origin point
    pub origin: Point3<f32>,
    /// Ray direction (normalized)
    pub direction: Vector3<f32>,
}

impl Ray {
    /// Create a new ray
    pub fn new(origin: Point3<f32>, direction: Vector3<f32>) -> Self {
        Self {
            origin,
            direction: direction.normalize(),
        }
    }

    /// Build the world-space ray through `ndc` as seen from `camera`
    ///
    /// The origin is the camera eye. The direction runs from the un-projected
    /// near plane point to the un-projected far plane point.
    pub fn from_ndc(ndc: Ndc, camera: &dyn Camera) -> Self {
        let view_proj = camera.projection_matrix() * camera.view_matrix();
        let inv_view_proj = view_proj.invert().unwrap_or(Matrix4::identity());

        let near = inv_view_proj.transform_point(Point3::new(ndc.x, ndc.y, -1.0));
        let far = inv_view_proj.transform_point(Point3::new(ndc.x, ndc.y, 1.0));

        Ray::new(camera.eye(), far - near)
    }

    /// Get a point along the ray at distance t
    pub fn point_at(&self, t: f32) -> Point3<f32> {
        self.origin + self.direction * t
    }

    /// Express this ray in the space described by `matrix`
    pub fn transformed(&self, matrix: &Matrix4<f32>) -> Self {
        Ray::new(
            matrix.transform_point(self.origin),
            matrix.transform_vector(self.direction),
        )
    }
}

/// Axis-aligned bounding box for intersection testing
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    /// Minimum corner of the bounding box
    pub min: Vector3<f32>,
    /// Maximum corner of the bounding box
    pub max: Vector3<f32>,
}

impl Aabb {
    /// Create a new bounding box
    pub fn new(min: Vector3<f32>, max: Vector3<f32>) -> Self {
        Self { min, max }
    }

    /// Create a bounding box from a set of vertices
    pub fn from_vertices(vertices: &[[f32; 3]]) -> Self {
        let Some(first) = vertices.first() else {
            return Self::new(Vector3::new(0.0, 0.0, 0.0), Vector3::new(0.0, 0.0, 0.0));
        };

        let mut min = Vector3::new(first[0], first[1], first[2]);
        let mut max = min;

        for vertex in vertices.iter().skip(1) {
            min.x = min.x.min(vertex[0]);
            min.y = min.y.min(vertex[1]);
            min.z = min.z.min(vertex[2]);
            max.x = max.x.max(vertex[0]);
            max.y = max.y.max(vertex[1]);
            max.z = max.z.max(vertex[2]);
        }

        Self::new(min, max)
    }

    /// Slab test against `ray`
    ///
    /// Returns the ray parameter of the entry point, or of the exit point when
    /// the ray starts inside the box. `None` if the box is missed or lies
    /// entirely behind the origin.
    pub fn intersect_ray(&self, ray: &Ray) -> Option<f32> {
        let mut t_near = f32::NEG_INFINITY;
        let mut t_far = f32::INFINITY;

        for axis in 0..3 {
            let origin = ray.origin[axis];
            let direction = ray.direction[axis];
            let (min, max) = (self.min[axis], self.max[axis]);

            if direction.abs() < f32::EPSILON {
                if origin < min || origin > max {
                    return None;
                }
                continue;
            }

            let inv = 1.0 / direction;
            let mut t0 = (min - origin) * inv;
            let mut t1 = (max - origin) * inv;
            if t0 > t1 {
                std::mem::swap(&mut t0, &mut t1);
            }

            t_near = t_near.max(t0);
            t_far = t_far.min(t1);
            if t_near > t_far {
                return None;
            }
        }

        if t_far < 0.0 {
            return None;
        }

        Some(if t_near >= 0.0 { t_near } else { t_far })
    }
}

/// One ray hit against a scene node
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Intersection {
    /// The mesh node that was hit
    pub node: NodeId,
    /// World space intersection point
    pub point: Point3<f32>,
    /// Distance from the camera to `point`
    pub distance: f32,
}

/// Cast a ray through `ndc` and return every mesh hit, nearest first
///
/// Walks the whole hierarchy, so nodes nested inside loaded models are found
/// as well as top-level props. Nodes without a mesh are never hit. An empty
/// vector just means nothing is under the pointer.
pub fn pick(ndc: Ndc, camera: &dyn Camera, scene: &SceneGraph) -> Vec<Intersection> {
    let ray = Ray::from_ndc(ndc, camera);
    let mut hits = Vec::new();

    scene.walk(|id, node, world| {
        let Some(mesh) = node.mesh.as_ref() else {
            return;
        };
        // Degenerate (zero-scale) nodes cannot be hit
        let Some(to_local) = world.invert() else {
            return;
        };

        let local_ray = ray.transformed(&to_local);
        if let Some(t) = mesh.bounds().intersect_ray(&local_ray) {
            let point = world.transform_point(local_ray.point_at(t));
            hits.push(Intersection {
                node: id,
                point,
                distance: (point - ray.origin).magnitude(),
            });
        }
    });

    hits.sort_by(|a, b| a.distance.total_cmp(&b.distance));
    hits
}
