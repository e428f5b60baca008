//! Render pass extension for drawing uploaded meshes

use wgpu::RenderPass;

use super::gpu_mesh::GpuMesh;

pub trait DrawMesh<'a> {
    /// Bind the mesh's node uniform at `slot` and issue its indexed draw
    fn draw_mesh(&mut self, mesh: &'a GpuMesh, slot: u32);
}

impl<'a> DrawMesh<'a> for RenderPass<'a> {
    fn draw_mesh(&mut self, mesh: &'a GpuMesh, slot: u32) {
        self.set_bind_group(slot, &mesh.bind_group, &[]);
        self.set_vertex_buffer(0, mesh.vertex_buffer.slice(..));
        self.set_index_buffer(mesh.index_buffer.slice(..), wgpu::IndexFormat::Uint32);
        self.draw_indexed(0..mesh.index_count, 0, 0..1);
    }
}
