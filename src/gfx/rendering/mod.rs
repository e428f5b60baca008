pub mod gpu_mesh;
pub mod render_engine;
pub mod render_pass_ext;

pub use gpu_mesh::{GpuMesh, NodeUniform};
pub use render_engine::{RenderEngine, RenderError};
