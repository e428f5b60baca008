//! # Graphics Module
//!
//! Scene graph, cameras, ray picking and the wgpu renderer.
//!
//! - **Scene** ([`scene`]) - named node hierarchy with transforms, meshes and interaction tags
//! - **Geometry** ([`geometry`]) - CPU-side triangle meshes and primitive generators
//! - **Camera System** ([`camera`]) - orbit and fixed close-up cameras behind one selector
//! - **Picking** ([`picking`]) - pointer rays against scene node bounds
//! - **Rendering** ([`rendering`]) - forward renderer drawing every mesh node
//! - **Resources** ([`resources`]) - global uniforms and depth textures
//!
//! The renderer is created by [`KitchenApp`](crate::KitchenApp); everything
//! else runs without a GPU:
//!
//! ```
//! use kitchenette::gfx::{geometry, scene::{SceneGraph, SceneNode}};
//!
//! let mut scene = SceneGraph::new();
//! scene.add(
//!     None,
//!     SceneNode::mesh(geometry::generate_cuboid(1.0, 1.0, 1.0), [1.0, 0.0, 0.0, 1.0]).named("CUBE"),
//! );
//! assert!(scene.find_by_name("CUBE").is_some());
//! ```

pub mod camera;
pub mod geometry;
pub mod picking;
pub mod rendering;
pub mod resources;
pub mod scene;

// Re-export commonly used types
pub use camera::orbit_camera::OrbitCamera;
pub use rendering::render_engine::RenderEngine;
