//! # Primitive Shape Generation
//!
//! All shapes are centered at the origin in a Y-up coordinate system and are
//! generated with outward normals.

use super::GeometryData;
use std::f32::consts::PI;

/// Generate a box with the given extents
///
/// Spans `-width/2..width/2` on X, `-height/2..height/2` on Y and
/// `-depth/2..depth/2` on Z. Each face has its own four vertices so normals
/// stay flat.
pub fn generate_cuboid(width: f32, height: f32, depth: f32) -> GeometryData {
    let mut data = GeometryData::new();

    let (hx, hy, hz) = (width * 0.5, height * 0.5, depth * 0.5);

    #[rustfmt::skip]
    let positions = [
        // Front face
        [-hx, -hy,  hz], [ hx, -hy,  hz], [ hx,  hy,  hz], [-hx,  hy,  hz],
        // Back face
        [-hx, -hy, -hz], [-hx,  hy, -hz], [ hx,  hy, -hz], [ hx, -hy, -hz],
        // Left face
        [-hx, -hy, -hz], [-hx, -hy,  hz], [-hx,  hy,  hz], [-hx,  hy, -hz],
        // Right face
        [ hx, -hy,  hz], [ hx, -hy, -hz], [ hx,  hy, -hz], [ hx,  hy,  hz],
        // Top face
        [-hx,  hy,  hz], [ hx,  hy,  hz], [ hx,  hy, -hz], [-hx,  hy, -hz],
        // Bottom face
        [-hx, -hy, -hz], [ hx, -hy, -hz], [ hx, -hy,  hz], [-hx, -hy,  hz],
    ];

    let face_normals = [
        [0.0, 0.0, 1.0],
        [0.0, 0.0, -1.0],
        [-1.0, 0.0, 0.0],
        [1.0, 0.0, 0.0],
        [0.0, 1.0, 0.0],
        [0.0, -1.0, 0.0],
    ];

    data.vertices = positions.to_vec();
    for normal in face_normals {
        data.normals.extend_from_slice(&[normal; 4]);
    }

    for face in 0..6u32 {
        let base = face * 4;
        data.indices
            .extend_from_slice(&[base, base + 1, base + 2, base + 2, base + 3, base]);
    }

    data
}

/// Generate a plane in the XY plane facing +Z
///
/// Matches the orientation of a freshly built floor or wall panel; rotate the
/// owning node by a quarter turn around X to lay it flat.
pub fn generate_plane(width: f32, height: f32) -> GeometryData {
    let mut data = GeometryData::new();

    let (hx, hy) = (width * 0.5, height * 0.5);

    data.vertices = vec![[-hx, -hy, 0.0], [hx, -hy, 0.0], [hx, hy, 0.0], [-hx, hy, 0.0]];
    data.normals = vec![[0.0, 0.0, 1.0]; 4];
    data.indices = vec![0, 1, 2, 2, 3, 0];

    data
}

/// Generate a UV sphere of the given radius
///
/// # Arguments
/// * `radius` - Sphere radius
/// * `longitude_segments` - Number of vertical segments (longitude lines)
/// * `latitude_segments` - Number of horizontal segments (latitude lines)
pub fn generate_sphere(radius: f32, longitude_segments: u32, latitude_segments: u32) -> GeometryData {
    let mut data = GeometryData::new();

    let long_segs = longitude_segments.max(3);
    let lat_segs = latitude_segments.max(2);

    for lat in 0..=lat_segs {
        let theta = lat as f32 * PI / lat_segs as f32;
        let (sin_theta, cos_theta) = theta.sin_cos();

        for long in 0..=long_segs {
            let phi = long as f32 * 2.0 * PI / long_segs as f32;
            let (sin_phi, cos_phi) = phi.sin_cos();

            let normal = [sin_theta * cos_phi, cos_theta, sin_theta * sin_phi];
            data.vertices
                .push([normal[0] * radius, normal[1] * radius, normal[2] * radius]);
            data.normals.push(normal);
        }
    }

    for lat in 0..lat_segs {
        for long in 0..long_segs {
            let first = lat * (long_segs + 1) + long;
            let second = first + long_segs + 1;

            data.indices.extend_from_slice(&[first, second, first + 1]);
            data.indices.extend_from_slice(&[second, second + 1, first + 1]);
        }
    }

    data
}

/// Generate a (possibly tapered) cylinder along the Y axis
///
/// # Arguments
/// * `radius_top` - Radius of the top rim
/// * `radius_bottom` - Radius of the bottom rim
/// * `height` - Extent along Y, centered on the origin
/// * `segments` - Number of radial segments
/// * `open_ended` - Skip the two caps (cups, pipes)
pub fn generate_cylinder(
    radius_top: f32,
    radius_bottom: f32,
    height: f32,
    segments: u32,
    open_ended: bool,
) -> GeometryData {
    let mut data = GeometryData::new();

    let segs = segments.max(3);
    let half_height = height * 0.5;
    let slope = (radius_bottom - radius_top) / height.max(f32::EPSILON);

    for i in 0..=segs {
        let angle = i as f32 * 2.0 * PI / segs as f32;
        let (sin_a, cos_a) = angle.sin_cos();
        let normal = normalize([sin_a, slope, cos_a]);

        data.vertices
            .push([radius_bottom * sin_a, -half_height, radius_bottom * cos_a]);
        data.normals.push(normal);

        data.vertices
            .push([radius_top * sin_a, half_height, radius_top * cos_a]);
        data.normals.push(normal);
    }

    for i in 0..segs {
        let bottom_current = i * 2;
        let top_current = bottom_current + 1;
        let bottom_next = (i + 1) * 2;
        let top_next = bottom_next + 1;

        data.indices
            .extend_from_slice(&[bottom_current, bottom_next, top_current]);
        data.indices
            .extend_from_slice(&[top_current, bottom_next, top_next]);
    }

    if open_ended {
        return data;
    }

    for (y, radius, ny) in [(half_height, radius_top, 1.0), (-half_height, radius_bottom, -1.0)] {
        let center = data.vertices.len() as u32;
        data.vertices.push([0.0, y, 0.0]);
        data.normals.push([0.0, ny, 0.0]);

        for i in 0..=segs {
            let angle = i as f32 * 2.0 * PI / segs as f32;
            let (sin_a, cos_a) = angle.sin_cos();
            data.vertices.push([radius * sin_a, y, radius * cos_a]);
            data.normals.push([0.0, ny, 0.0]);
        }

        for i in 0..segs {
            let current = center + 1 + i;
            let next = current + 1;
            if ny > 0.0 {
                data.indices.extend_from_slice(&[center, current, next]);
            } else {
                data.indices.extend_from_slice(&[center, next, current]);
            }
        }
    }

    data
}

pub(crate) fn normalize(v: [f32; 3]) -> [f32; 3] {
    let length = (v[0] * v[0] + v[1] * v[1] + v[2] * v[2]).sqrt();
    if length > 0.0 {
        [v[0] / length, v[1] / length, v[2] / length]
    } else {
        v
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cuboid_generation() {
        let cuboid = generate_cuboid(1.2, 0.4, 1.2);
        assert_eq!(cuboid.vertex_count(), 24);
        assert_eq!(cuboid.triangle_count(), 12);
        assert_eq!(cuboid.normals.len(), cuboid.vertices.len());

        let bounds = cuboid.bounds();
        assert!((bounds.max.x - 0.6).abs() < 1e-6);
        assert!((bounds.min.y + 0.2).abs() < 1e-6);
    }

    #[test]
    fn test_plane_is_flat_in_z() {
        let plane = generate_plane(5.0, 5.0);
        assert_eq!(plane.triangle_count(), 2);
        assert!(plane.vertices.iter().all(|v| v[2] == 0.0));
    }

    #[test]
    fn test_sphere_radius() {
        let sphere = generate_sphere(0.05, 8, 6);
        assert_eq!(sphere.vertices.len(), sphere.normals.len());
        for v in &sphere.vertices {
            let r = (v[0] * v[0] + v[1] * v[1] + v[2] * v[2]).sqrt();
            assert!((r - 0.05).abs() < 1e-5);
        }
    }

    #[test]
    fn test_open_ended_cylinder_has_no_caps() {
        let closed = generate_cylinder(0.05, 0.05, 0.1, 32, false);
        let open = generate_cylinder(0.05, 0.05, 0.1, 32, true);
        assert_eq!(open.triangle_count(), 64);
        assert_eq!(closed.triangle_count(), 128);
        assert!(open.indices.iter().all(|&i| (i as usize) < open.vertex_count()));
    }
}
