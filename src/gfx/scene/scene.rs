use std::collections::HashMap;

use cgmath::{Matrix4, SquareMatrix};

use super::node::{NodeId, NodeTree, SceneNode};

struct Entry {
    node: SceneNode,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

/// Hierarchical scene graph
///
/// Nodes live in an arena and are addressed by [`NodeId`]. The graph only
/// grows: content is added up front or attached later as it finishes
/// loading, and nothing is ever removed, so ids handed out stay valid.
pub struct SceneGraph {
    entries: Vec<Entry>,
    roots: Vec<NodeId>,
    names: HashMap<String, NodeId>,
}

impl SceneGraph {
    /// Creates an empty scene
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            roots: Vec::new(),
            names: HashMap::new(),
        }
    }

    /// Adds `node` under `parent`, or as a root when `parent` is `None`
    ///
    /// An unknown parent id is treated as `None`.
    pub fn add(&mut self, parent: Option<NodeId>, node: SceneNode) -> NodeId {
        let id = NodeId(self.entries.len());
        let parent = parent.filter(|p| p.0 < self.entries.len());

        // First node registered under a name keeps it
        if let Some(name) = &node.name {
            self.names.entry(name.clone()).or_insert(id);
        }

        match parent {
            Some(p) => self.entries[p.0].children.push(id),
            None => self.roots.push(id),
        }

        self.entries.push(Entry {
            node,
            parent,
            children: Vec::new(),
        });

        id
    }

    /// Attaches a detached hierarchy, returning the id of its root
    pub fn attach(&mut self, parent: Option<NodeId>, tree: NodeTree) -> NodeId {
        let NodeTree { node, children } = tree;
        let id = self.add(parent, node);
        for child in children {
            self.attach(Some(id), child);
        }
        id
    }

    pub fn get(&self, id: NodeId) -> Option<&SceneNode> {
        self.entries.get(id.0).map(|entry| &entry.node)
    }

    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut SceneNode> {
        self.entries.get_mut(id.0).map(|entry| &mut entry.node)
    }

    /// Looks up a node by display name, searching the whole hierarchy
    pub fn find_by_name(&self, name: &str) -> Option<NodeId> {
        self.names.get(name).copied()
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.entries.get(id.0).and_then(|entry| entry.parent)
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.entries
            .get(id.0)
            .map(|entry| entry.children.as_slice())
            .unwrap_or(&[])
    }

    pub fn roots(&self) -> &[NodeId] {
        &self.roots
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// World matrix of `id`, composed from its ancestors' local transforms
    pub fn world_matrix(&self, id: NodeId) -> Matrix4<f32> {
        let mut matrix = Matrix4::identity();
        let mut current = Some(id);
        while let Some(node_id) = current {
            let Some(entry) = self.entries.get(node_id.0) else {
                break;
            };
            matrix = entry.node.transform.matrix() * matrix;
            current = entry.parent;
        }
        matrix
    }

    /// Depth-first visit of every node with its world matrix
    ///
    /// Parents are always visited before their children.
    pub fn walk<F>(&self, mut visit: F)
    where
        F: FnMut(NodeId, &SceneNode, &Matrix4<f32>),
    {
        let mut stack: Vec<(NodeId, Matrix4<f32>)> = self
            .roots
            .iter()
            .rev()
            .map(|&id| (id, Matrix4::identity()))
            .collect();

        while let Some((id, parent_world)) = stack.pop() {
            let entry = &self.entries[id.0];
            let world = parent_world * entry.node.transform.matrix();
            visit(id, &entry.node, &world);

            for &child in entry.children.iter().rev() {
                stack.push((child, world));
            }
        }
    }
}

impl Default for SceneGraph {
    fn default() -> Self {
        Self::new()
    }
}
