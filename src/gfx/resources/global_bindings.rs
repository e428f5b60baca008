//! Global uniform bindings for camera and light data
//!
//! One uniform buffer shared by every draw, bound to slot 0.

use crate::{
    gfx::camera::CameraUniform,
    wgpu_utils::{binding_types, uniform_buffer::UniformBuffer},
};

/// Global uniform buffer content
///
/// MUST match the `Globals` struct in `shader.wgsl`.
#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct GlobalUBOContent {
    view_position: [f32; 4],
    view_proj: [[f32; 4]; 4],
    light_positions: [[f32; 4]; 2],
    /// x: ambient term, yzw unused
    ambient: [f32; 4],
}

/// The two ceiling lights
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct LightConfig {
    pub positions: [[f32; 3]; 2],
    pub ambient: f32,
}

impl Default for LightConfig {
    fn default() -> Self {
        Self {
            positions: [[1.5, 2.4, 1.5], [-1.5, 2.4, -1.5]],
            ambient: 0.35,
        }
    }
}

pub type GlobalUBO = UniformBuffer<GlobalUBOContent>;

/// Write camera and light data for the coming frame
pub fn update_global_ubo(
    ubo: &mut GlobalUBO,
    queue: &wgpu::Queue,
    camera: CameraUniform,
    light: LightConfig,
) {
    let [a, b] = light.positions;
    let content = GlobalUBOContent {
        view_position: camera.view_position,
        view_proj: camera.view_proj,
        light_positions: [[a[0], a[1], a[2], 1.0], [b[0], b[1], b[2], 1.0]],
        ambient: [light.ambient, 0.0, 0.0, 0.0],
    };

    ubo.update_content(queue, content);
}

/// Layout and bind group for the global uniforms
pub struct GlobalBindings {
    bind_group_layout: wgpu::BindGroupLayout,
    bind_group: wgpu::BindGroup,
}

impl GlobalBindings {
    pub fn new(device: &wgpu::Device, ubo: &GlobalUBO) -> Self {
        let bind_group_layout = binding_types::single_uniform_layout(device, "Globals Bind Group");
        let bind_group = binding_types::single_uniform_bind_group(
            device,
            &bind_group_layout,
            ubo.binding_resource(),
            "Global Bind Group",
        );

        GlobalBindings {
            bind_group_layout,
            bind_group,
        }
    }

    pub fn bind_group_layout(&self) -> &wgpu::BindGroupLayout {
        &self.bind_group_layout
    }

    pub fn bind_group(&self) -> &wgpu::BindGroup {
        &self.bind_group
    }
}
