//! # Procedural Geometry Generation
//!
//! Generators for the handful of primitive shapes the kitchen is built from,
//! so the scene does not depend on model files for basic props.
//!
//! ## Supported Primitives
//!
//! - **Cuboid**: box with independent width, height and depth
//! - **Plane**: flat rectangle in the XY plane, facing +Z
//! - **Cylinder**: tapered cylinder along Y, optionally open-ended
//! - **Sphere**: UV sphere with configurable resolution
//!
//! ## Usage
//!
//! ```rust
//! use kitchenette::gfx::geometry::{generate_cuboid, generate_sphere};
//!
//! let table_top = generate_cuboid(1.3, 0.05, 1.3);
//! let orange = generate_sphere(0.05, 16, 12);
//! assert_eq!(table_top.triangle_count(), 12);
//! assert!(orange.bounds().max.x <= 0.05 + f32::EPSILON);
//! ```

pub mod primitives;

pub use primitives::*;

use crate::gfx::picking::Aabb;

/// Generated geometry ready for GPU upload and ray picking
#[derive(Debug, Clone)]
pub struct GeometryData {
    /// Vertex positions (x, y, z)
    pub vertices: Vec<[f32; 3]>,
    /// Normal vectors (x, y, z)
    pub normals: Vec<[f32; 3]>,
    /// Triangle indices (counter-clockwise winding)
    pub indices: Vec<u32>,
}

impl GeometryData {
    /// Create a new empty geometry data structure
    pub fn new() -> Self {
        Self {
            vertices: Vec::new(),
            normals: Vec::new(),
            indices: Vec::new(),
        }
    }

    /// Build geometry from the flat position/normal/index arrays `tobj` hands back
    pub fn from_flat(positions: &[f32], normals: &[f32], indices: Vec<u32>) -> Self {
        let vertices: Vec<[f32; 3]> = positions
            .chunks_exact(3)
            .map(|p| [p[0], p[1], p[2]])
            .collect();

        let normals = if !normals.is_empty() && normals.len() == positions.len() {
            normals.chunks_exact(3).map(|n| [n[0], n[1], n[2]]).collect()
        } else {
            smooth_normals(&vertices, &indices)
        };

        Self {
            vertices,
            normals,
            indices,
        }
    }

    /// Get the number of vertices in this geometry
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Get the number of triangles in this geometry
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Local-space bounding box of all vertices
    pub fn bounds(&self) -> Aabb {
        Aabb::from_vertices(&self.vertices)
    }

    /// Interleave into the vertex format used by the renderer
    pub fn to_scene_format(&self) -> (Vec<crate::gfx::scene::vertex::Vertex3D>, Vec<u32>) {
        use crate::gfx::scene::vertex::Vertex3D;

        let vertices: Vec<Vertex3D> = self
            .vertices
            .iter()
            .enumerate()
            .map(|(i, position)| Vertex3D {
                position: *position,
                normal: self.normals.get(i).copied().unwrap_or([0.0, 1.0, 0.0]),
            })
            .collect();

        (vertices, self.indices.clone())
    }
}

impl Default for GeometryData {
    fn default() -> Self {
        Self::new()
    }
}

/// Per-vertex normals averaged from the faces that share each vertex
fn smooth_normals(vertices: &[[f32; 3]], indices: &[u32]) -> Vec<[f32; 3]> {
    let mut normals = vec![[0.0f32; 3]; vertices.len()];

    for triangle in indices.chunks_exact(3) {
        let [i0, i1, i2] = [triangle[0], triangle[1], triangle[2]].map(|i| i as usize);
        let (Some(v0), Some(v1), Some(v2)) = (vertices.get(i0), vertices.get(i1), vertices.get(i2))
        else {
            continue;
        };

        let edge1 = [v1[0] - v0[0], v1[1] - v0[1], v1[2] - v0[2]];
        let edge2 = [v2[0] - v0[0], v2[1] - v0[1], v2[2] - v0[2]];
        let face_normal = [
            edge1[1] * edge2[2] - edge1[2] * edge2[1],
            edge1[2] * edge2[0] - edge1[0] * edge2[2],
            edge1[0] * edge2[1] - edge1[1] * edge2[0],
        ];

        for index in [i0, i1, i2] {
            for axis in 0..3 {
                normals[index][axis] += face_normal[axis];
            }
        }
    }

    normals.into_iter().map(primitives::normalize).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_normals_are_computed_from_faces() {
        // One triangle in the XZ plane, wound counter-clockwise seen from +Y
        let positions = [0.0, 0.0, 0.0, 0.0, 0.0, 1.0, 1.0, 0.0, 0.0];
        let geometry = GeometryData::from_flat(&positions, &[], vec![0, 1, 2]);

        assert_eq!(geometry.vertex_count(), 3);
        for normal in &geometry.normals {
            assert!((normal[1] - 1.0).abs() < 1e-6, "normal {normal:?}");
        }
    }

    #[test]
    fn test_bounds_cover_all_vertices() {
        let positions = [-1.0, 0.0, 2.0, 3.0, -4.0, 0.5];
        let geometry = GeometryData::from_flat(&positions, &[], vec![]);
        let bounds = geometry.bounds();
        assert_eq!(bounds.min, cgmath::Vector3::new(-1.0, -4.0, 0.5));
        assert_eq!(bounds.max, cgmath::Vector3::new(3.0, 0.0, 2.0));
    }
}
