//! WGPU forward renderer for the scene graph
//!
//! Every mesh node is drawn once per frame with its world matrix and flat
//! colour. GPU buffers are created the first frame a node is seen and kept
//! for the lifetime of the engine; node ids are never reused, so the cache
//! never goes stale.

use std::{collections::HashMap, iter, sync::Arc};

use cgmath::Matrix4;
use thiserror::Error;
use wgpu::{DepthStencilState, RenderPipeline, TextureFormat};

use crate::{
    frame::FrameRenderer,
    gfx::{
        camera::{Camera, CameraUniform},
        resources::{
            global_bindings::update_global_ubo, GlobalBindings, GlobalUBO, LightConfig,
            TextureResource,
        },
        scene::{NodeId, SceneGraph, Vertex3D},
    },
    wgpu_utils::binding_types,
};

use super::{gpu_mesh::GpuMesh, render_pass_ext::DrawMesh};

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("failed to create window surface")]
    CreateSurface(#[from] wgpu::CreateSurfaceError),

    #[error("no suitable graphics adapter")]
    RequestAdapter(#[from] wgpu::RequestAdapterError),

    #[error("failed to open graphics device")]
    RequestDevice(#[from] wgpu::RequestDeviceError),

    #[error("surface reports no supported formats")]
    NoSurfaceFormat,
}

pub struct RenderEngine {
    surface: wgpu::Surface<'static>,
    device: Arc<wgpu::Device>,
    queue: Arc<wgpu::Queue>,
    config: wgpu::SurfaceConfiguration,
    depth_texture: TextureResource,
    format: TextureFormat,

    pipeline: RenderPipeline,

    global_ubo: GlobalUBO,
    global_bindings: GlobalBindings,
    node_layout: wgpu::BindGroupLayout,
    light: LightConfig,
    clear_color: wgpu::Color,

    meshes: HashMap<NodeId, GpuMesh>,
    failed: bool,
}

impl RenderEngine {
    pub async fn new(
        window: impl Into<wgpu::SurfaceTarget<'static>>,
        width: u32,
        height: u32,
        clear_color: wgpu::Color,
    ) -> Result<RenderEngine, RenderError> {
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::all(),
            ..Default::default()
        });
        let surface = instance.create_surface(window)?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::default(),
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await?;
        log::info!("using adapter {:?}", adapter.get_info().name);

        let (device, queue) = adapter
            .request_device(&wgpu::DeviceDescriptor {
                label: Some("WGPU Device"),
                required_features: wgpu::Features::default(),
                required_limits: wgpu::Limits {
                    max_texture_dimension_2d: 4096,
                    ..wgpu::Limits::downlevel_defaults()
                },
                memory_hints: wgpu::MemoryHints::default(),
                trace: wgpu::Trace::Off,
            })
            .await?;

        let surface_capabilities = surface.get_capabilities(&adapter);
        let format = surface_capabilities
            .formats
            .iter()
            .copied()
            .find(|f| !f.is_srgb())
            .or_else(|| surface_capabilities.formats.first().copied())
            .ok_or(RenderError::NoSurfaceFormat)?;

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width: width.max(1),
            height: height.max(1),
            present_mode: wgpu::PresentMode::AutoVsync,
            alpha_mode: surface_capabilities
                .alpha_modes
                .first()
                .copied()
                .unwrap_or(wgpu::CompositeAlphaMode::Auto),
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);
        let depth_texture =
            TextureResource::create_depth_texture(&device, &config, "depth_texture");

        let global_ubo = GlobalUBO::new(&device);
        let global_bindings = GlobalBindings::new(&device, &global_ubo);
        let node_layout = binding_types::single_uniform_layout(&device, "Node Bind Group");

        let pipeline = create_mesh_pipeline(
            &device,
            format,
            &[global_bindings.bind_group_layout(), &node_layout],
        );

        log::info!("renderer ready at {}x{} ({format:?})", config.width, config.height);

        Ok(RenderEngine {
            device: device.into(),
            config,
            format,
            surface,
            queue: queue.into(),
            pipeline,
            depth_texture,
            global_ubo,
            global_bindings,
            node_layout,
            light: LightConfig::default(),
            clear_color,
            meshes: HashMap::new(),
            failed: false,
        })
    }

    /// Draw `scene` through `camera`
    ///
    /// A lost or outdated surface is reconfigured and the frame skipped.
    pub fn render_scene(
        &mut self,
        scene: &SceneGraph,
        camera: &dyn Camera,
    ) -> Result<(), wgpu::SurfaceError> {
        update_global_ubo(
            &mut self.global_ubo,
            &self.queue,
            CameraUniform::from_camera(camera),
            self.light,
        );
        let draws = self.prepare(scene);

        let surface_texture = match self.surface.get_current_texture() {
            Ok(texture) => texture,
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                log::warn!("surface lost, reconfiguring");
                self.surface.configure(&self.device, &self.config);
                return Ok(());
            }
            Err(err) => return Err(err),
        };

        let surface_texture_view = surface_texture
            .texture
            .create_view(&wgpu::TextureViewDescriptor {
                format: Some(self.format),
                ..Default::default()
            });
        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Render Encoder"),
            });

        {
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Render Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &surface_texture_view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(self.clear_color),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.depth_texture.view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                occlusion_query_set: None,
                timestamp_writes: None,
            });

            render_pass.set_pipeline(&self.pipeline);
            render_pass.set_bind_group(0, self.global_bindings.bind_group(), &[]);

            for id in &draws {
                if let Some(mesh) = self.meshes.get(id) {
                    render_pass.draw_mesh(mesh, 1);
                }
            }
        }

        self.queue.submit(iter::once(encoder.finish()));
        surface_texture.present();
        Ok(())
    }

    /// Upload new meshes and this frame's node uniforms
    ///
    /// Returns the nodes to draw, in traversal order.
    fn prepare(&mut self, scene: &SceneGraph) -> Vec<NodeId> {
        let mut visible: Vec<(NodeId, Matrix4<f32>)> = Vec::new();
        scene.walk(|id, node, world| {
            if node
                .mesh
                .as_ref()
                .is_some_and(|mesh| mesh.geometry().triangle_count() > 0)
            {
                visible.push((id, *world));
            }
        });

        for (id, world) in &visible {
            let Some(node) = scene.get(*id) else {
                continue;
            };
            let Some(mesh) = node.mesh.as_ref() else {
                continue;
            };

            match self.meshes.get_mut(id) {
                Some(gpu_mesh) => gpu_mesh.update(&self.queue, *world, mesh.color()),
                None => {
                    log::debug!("uploading mesh for {}", node.display_name());
                    let gpu_mesh = GpuMesh::new(
                        &self.device,
                        &self.node_layout,
                        mesh,
                        *world,
                        node.display_name(),
                    );
                    self.meshes.insert(*id, gpu_mesh);
                }
            }
        }

        visible.into_iter().map(|(id, _)| id).collect()
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }

        self.config.width = width;
        self.config.height = height;
        self.surface.configure(&self.device, &self.config);

        self.depth_texture =
            TextureResource::create_depth_texture(&self.device, &self.config, "depth_texture");
    }

    pub fn set_light(&mut self, light: LightConfig) {
        self.light = light;
    }

    pub fn surface_size(&self) -> (u32, u32) {
        (self.config.width, self.config.height)
    }

    /// Set once the device can no longer render
    pub fn has_failed(&self) -> bool {
        self.failed
    }

    pub fn device(&self) -> &wgpu::Device {
        &self.device
    }
}

impl FrameRenderer for RenderEngine {
    fn render(&mut self, scene: &SceneGraph, camera: &dyn Camera) {
        match self.render_scene(scene, camera) {
            Ok(()) => {}
            Err(wgpu::SurfaceError::Timeout) => log::warn!("surface timeout, frame skipped"),
            Err(err @ wgpu::SurfaceError::OutOfMemory) => {
                log::error!("render failed: {err}");
                self.failed = true;
            }
            Err(err) => log::warn!("render failed: {err}"),
        }
    }

    fn resize(&mut self, width: u32, height: u32) {
        RenderEngine::resize(self, width, height);
    }
}

fn create_mesh_pipeline(
    device: &wgpu::Device,
    format: TextureFormat,
    bind_group_layouts: &[&wgpu::BindGroupLayout],
) -> RenderPipeline {
    let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
        label: Some("Shader"),
        source: wgpu::ShaderSource::Wgsl(include_str!("shader.wgsl").into()),
    });

    let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
        label: Some("Mesh Pipeline Layout"),
        bind_group_layouts,
        push_constant_ranges: &[],
    });

    device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
        label: Some("Mesh Pipeline"),
        layout: Some(&pipeline_layout),
        vertex: wgpu::VertexState {
            module: &shader,
            entry_point: Some("vs_main"),
            buffers: &[Vertex3D::desc()],
            compilation_options: Default::default(),
        },
        primitive: wgpu::PrimitiveState {
            topology: wgpu::PrimitiveTopology::TriangleList,
            strip_index_format: None,
            front_face: wgpu::FrontFace::Ccw,
            // Room and skybox are seen from inside
            cull_mode: None,
            polygon_mode: wgpu::PolygonMode::Fill,
            conservative: false,
            unclipped_depth: false,
        },
        depth_stencil: Some(DepthStencilState {
            format: TextureResource::DEPTH_FORMAT,
            depth_write_enabled: true,
            depth_compare: wgpu::CompareFunction::Less,
            stencil: wgpu::StencilState::default(),
            bias: wgpu::DepthBiasState::default(),
        }),
        multisample: wgpu::MultisampleState {
            count: 1,
            mask: !0,
            alpha_to_coverage_enabled: false,
        },
        fragment: Some(wgpu::FragmentState {
            module: &shader,
            entry_point: Some("fs_main"),
            targets: &[Some(wgpu::ColorTargetState {
                format,
                blend: Some(wgpu::BlendState::REPLACE),
                write_mask: wgpu::ColorWrites::ALL,
            })],
            compilation_options: Default::default(),
        }),
        multiview: None,
        cache: None,
    })
}
