//! # Scene Graph
//!
//! The hierarchy of nodes the interaction core reads and mutates. Content code
//! builds nodes with their tags already attached; the core only changes
//! positions and rotations.
//!
//! ## Key Components
//!
//! - [`SceneGraph`] - Arena of nodes with parent/child links and name lookup
//! - [`SceneNode`] - Transform, capability tags, optional mesh and name
//! - [`NodeTree`] - Detached hierarchy, the shape loaded models arrive in
//! - [`Vertex3D`] - Vertex layout uploaded to the GPU
//!
//! ## Usage
//!
//! ```rust
//! use kitchenette::gfx::scene::{SceneGraph, SceneNode};
//!
//! let mut scene = SceneGraph::new();
//! let cover = scene.add(None, SceneNode::empty().named("COVER").drop_surface());
//! assert_eq!(scene.find_by_name("COVER"), Some(cover));
//! ```

pub mod node;
pub mod scene;
pub mod vertex;

// Re-export main types
pub use node::{Mesh, NodeId, NodeTags, NodeTree, SceneNode, Transform};
pub use scene::SceneGraph;
pub use vertex::Vertex3D;
