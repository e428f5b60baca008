use cgmath::Matrix4;
use wgpu::util::DeviceExt;

use crate::{
    gfx::{camera::camera_utils::convert_matrix4_to_array, scene::Mesh},
    wgpu_utils::{binding_types, UniformBuffer},
};

/// Per-node uniform, bound to slot 1
///
/// MUST match the `NodeUniform` struct in `shader.wgsl`.
#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct NodeUniform {
    pub model: [[f32; 4]; 4],
    pub color: [f32; 4],
}

/// GPU copy of one scene node's mesh
pub struct GpuMesh {
    pub vertex_buffer: wgpu::Buffer,
    pub index_buffer: wgpu::Buffer,
    pub index_count: u32,
    uniform: UniformBuffer<NodeUniform>,
    pub bind_group: wgpu::BindGroup,
}

impl GpuMesh {
    pub fn new(
        device: &wgpu::Device,
        layout: &wgpu::BindGroupLayout,
        mesh: &Mesh,
        world: Matrix4<f32>,
        label: &str,
    ) -> Self {
        let (vertices, indices) = mesh.geometry().to_scene_format();

        let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(&format!("{label} Vertex Buffer")),
            contents: bytemuck::cast_slice(&vertices),
            usage: wgpu::BufferUsages::VERTEX,
        });
        let index_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(&format!("{label} Index Buffer")),
            contents: bytemuck::cast_slice(&indices),
            usage: wgpu::BufferUsages::INDEX,
        });

        let uniform = UniformBuffer::new_with_data(
            device,
            &NodeUniform {
                model: convert_matrix4_to_array(world),
                color: mesh.color(),
            },
        );
        let bind_group = binding_types::single_uniform_bind_group(
            device,
            layout,
            uniform.binding_resource(),
            &format!("{label} Bind Group"),
        );

        Self {
            vertex_buffer,
            index_buffer,
            index_count: indices.len() as u32,
            uniform,
            bind_group,
        }
    }

    /// Upload this frame's world matrix and colour
    pub fn update(&mut self, queue: &wgpu::Queue, world: Matrix4<f32>, color: [f32; 4]) {
        self.uniform.update_content(
            queue,
            NodeUniform {
                model: convert_matrix4_to_array(world),
                color,
            },
        );
    }
}
