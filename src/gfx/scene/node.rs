use cgmath::{Euler, Matrix4, Quaternion, Rad, Vector3};

use crate::gfx::{geometry::GeometryData, picking::Aabb};

/// Handle to a node stored in a [`SceneGraph`](super::SceneGraph)
///
/// Ids are never reused: the graph only grows, so an id stays valid for the
/// lifetime of the graph that issued it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(crate) usize);

impl NodeId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// Position, rotation and scale relative to the parent node
///
/// Rotation is stored as XYZ Euler angles so animations can add to a single
/// axis (yaw, roll) without touching the others.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub position: Vector3<f32>,
    pub rotation: Euler<Rad<f32>>,
    pub scale: Vector3<f32>,
}

impl Transform {
    pub fn identity() -> Self {
        Self {
            position: Vector3::new(0.0, 0.0, 0.0),
            rotation: Euler::new(Rad(0.0), Rad(0.0), Rad(0.0)),
            scale: Vector3::new(1.0, 1.0, 1.0),
        }
    }

    /// Local matrix, T * R * S
    pub fn matrix(&self) -> Matrix4<f32> {
        let t = Matrix4::from_translation(self.position);
        let r = Matrix4::from(Quaternion::from(self.rotation));
        let s = Matrix4::from_nonuniform_scale(self.scale.x, self.scale.y, self.scale.z);
        t * r * s
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::identity()
    }
}

/// Interaction capabilities attached to a node
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NodeTags {
    /// May be picked up by the drag controller
    pub draggable: bool,
    /// Accepts the horizontal position of a dragged node
    pub drop_surface: bool,
}

/// Renderable geometry with a flat base color
#[derive(Debug, Clone)]
pub struct Mesh {
    geometry: GeometryData,
    color: [f32; 4],
    bounds: Aabb,
}

impl Mesh {
    pub fn new(geometry: GeometryData, color: [f32; 4]) -> Self {
        let bounds = geometry.bounds();
        Self {
            geometry,
            color,
            bounds,
        }
    }

    pub fn geometry(&self) -> &GeometryData {
        &self.geometry
    }

    pub fn color(&self) -> [f32; 4] {
        self.color
    }

    /// Local-space bounds used for picking
    pub fn bounds(&self) -> Aabb {
        self.bounds
    }
}

/// A single entity in the scene graph
///
/// Built with chained setters by the content code, then handed to the graph.
///
/// ```rust
/// use kitchenette::gfx::geometry::generate_sphere;
/// use kitchenette::gfx::scene::SceneNode;
///
/// let orange = SceneNode::mesh(generate_sphere(0.05, 16, 12), [1.0, 0.65, 0.0, 1.0])
///     .named("ORANGE")
///     .at(0.05, 0.4, 0.4)
///     .draggable();
/// assert!(orange.tags.draggable);
/// ```
#[derive(Debug, Clone, Default)]
pub struct SceneNode {
    pub name: Option<String>,
    pub transform: Transform,
    pub tags: NodeTags,
    pub mesh: Option<Mesh>,
}

impl SceneNode {
    /// A grouping or marker node with no geometry
    pub fn empty() -> Self {
        Self::default()
    }

    /// A node that renders `geometry` and can be hit by picking
    pub fn mesh(geometry: GeometryData, color: [f32; 4]) -> Self {
        Self {
            mesh: Some(Mesh::new(geometry, color)),
            ..Self::default()
        }
    }

    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn at(mut self, x: f32, y: f32, z: f32) -> Self {
        self.transform.position = Vector3::new(x, y, z);
        self
    }

    /// Set XYZ Euler rotation in radians
    pub fn rotated(mut self, x: f32, y: f32, z: f32) -> Self {
        self.transform.rotation = Euler::new(Rad(x), Rad(y), Rad(z));
        self
    }

    pub fn scaled(mut self, scale: f32) -> Self {
        self.transform.scale = Vector3::new(scale, scale, scale);
        self
    }

    pub fn draggable(mut self) -> Self {
        self.tags.draggable = true;
        self
    }

    pub fn drop_surface(mut self) -> Self {
        self.tags.drop_surface = true;
        self
    }

    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or("<unnamed>")
    }
}

/// A detached hierarchy waiting to be attached to a graph
///
/// Loaded models arrive in this shape and are attached in one step.
#[derive(Debug, Clone)]
pub struct NodeTree {
    pub node: SceneNode,
    pub children: Vec<NodeTree>,
}

impl NodeTree {
    pub fn new(node: SceneNode) -> Self {
        Self {
            node,
            children: Vec::new(),
        }
    }

    pub fn with_child(mut self, child: NodeTree) -> Self {
        self.children.push(child);
        self
    }

    /// Number of nodes in this tree, root included
    pub fn len(&self) -> usize {
        1 + self.children.iter().map(NodeTree::len).sum::<usize>()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cgmath::{Point3, Transform as _};

    #[test]
    fn test_transform_applies_scale_then_rotation_then_translation() {
        let node = SceneNode::empty()
            .at(1.0, 2.0, 3.0)
            .rotated(0.0, std::f32::consts::FRAC_PI_2, 0.0)
            .scaled(2.0);

        let p = node.transform.matrix().transform_point(Point3::new(1.0, 0.0, 0.0));
        // (1,0,0) -> scaled (2,0,0) -> yaw 90deg (0,0,-2) -> translated
        assert!((p.x - 1.0).abs() < 1e-5);
        assert!((p.y - 2.0).abs() < 1e-5);
        assert!((p.z - 1.0).abs() < 1e-5);
    }

    #[test]
    fn test_tags_default_to_inert() {
        let node = SceneNode::empty();
        assert_eq!(node.tags, NodeTags::default());
        assert!(!node.tags.draggable && !node.tags.drop_surface);
        assert_eq!(node.display_name(), "<unnamed>");
    }

    #[test]
    fn test_tree_len_counts_descendants() {
        let tree = NodeTree::new(SceneNode::empty())
            .with_child(NodeTree::new(SceneNode::empty()).with_child(NodeTree::new(SceneNode::empty())))
            .with_child(NodeTree::new(SceneNode::empty()));
        assert_eq!(tree.len(), 4);
    }
}
