use crate::meshes::{self, Vertex};
use crate::shaders;
use crate::uniforms::FrameUniforms;
use orrery_assets::{AssetError, AssetStore, MeshAsset, TextureAsset};
use orrery_common::FrameContext;
use orrery_render::{frame_plan, ConstantSlot, Drawable};
use orrery_scene::Scene;
use wgpu::util::DeviceExt;

const BACKGROUND: wgpu::Color = wgpu::Color {
    r: 0.025,
    g: 0.025,
    b: 0.025,
    a: 1.0,
};

/// Vertex/index buffers for one mesh.
struct GpuMesh {
    vertex_buffer: wgpu::Buffer,
    index_buffer: wgpu::Buffer,
    index_count: u32,
    index_format: wgpu::IndexFormat,
}

/// GPU state for one loaded game object.
struct GpuObject {
    mesh: GpuMesh,
    /// None means the object is untextured and uses the white fallback.
    bind_group: Option<wgpu::BindGroup>,
}

/// wgpu-based demo renderer.
///
/// Owns the built-in shapes, the per-object GPU resources, and the single
/// uniform buffer that every draw rewrites. Each draw is submitted right
/// after its uniform upload; see `render`.
pub struct WgpuRenderer {
    mesh_pipeline: wgpu::RenderPipeline,
    line_pipeline: wgpu::RenderPipeline,
    uniform_buffer: wgpu::Buffer,
    bind_group_layout: wgpu::BindGroupLayout,
    sampler: wgpu::Sampler,
    fallback_bind_group: wgpu::BindGroup,
    /// Texture shown on the built-in cubes when the app provides one.
    default_bind_group: Option<wgpu::BindGroup>,
    cube: GpuMesh,
    pyramid: GpuMesh,
    line_vertex_buffer: wgpu::Buffer,
    line_vertex_count: u32,
    objects: Vec<GpuObject>,
    slot: ConstantSlot<FrameUniforms>,
    depth_texture: wgpu::TextureView,
    surface_format: wgpu::TextureFormat,
}

impl WgpuRenderer {
    pub fn new(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        surface_format: wgpu::TextureFormat,
        width: u32,
        height: u32,
    ) -> Self {
        let slot = ConstantSlot::new(FrameUniforms::default());
        let uniform_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("frame_uniform_buffer"),
            contents: slot.bytes(),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });

        let bind_group_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("frame_bind_group_layout"),
            entries: &[
                wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::VERTEX_FRAGMENT,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: false,
                        min_binding_size: None,
                    },
                    count: None,
                },
                wgpu::BindGroupLayoutEntry {
                    binding: 1,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Texture {
                        sample_type: wgpu::TextureSampleType::Float { filterable: true },
                        view_dimension: wgpu::TextureViewDimension::D2,
                        multisampled: false,
                    },
                    count: None,
                },
                wgpu::BindGroupLayoutEntry {
                    binding: 2,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                    count: None,
                },
            ],
        });

        let sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("bilinear_sampler"),
            address_mode_u: wgpu::AddressMode::Repeat,
            address_mode_v: wgpu::AddressMode::Repeat,
            address_mode_w: wgpu::AddressMode::ClampToEdge,
            mag_filter: wgpu::FilterMode::Linear,
            min_filter: wgpu::FilterMode::Linear,
            mipmap_filter: wgpu::FilterMode::Linear,
            ..Default::default()
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("frame_pipeline_layout"),
            bind_group_layouts: &[&bind_group_layout],
            push_constant_ranges: &[],
        });

        let vertex_layout = wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Vertex>() as u64,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &wgpu::vertex_attr_array![
                0 => Float32x3,
                1 => Float32x3,
                2 => Float32x2,
            ],
        };

        let mesh_shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("mesh_shader"),
            source: wgpu::ShaderSource::Wgsl(shaders::MESH_SHADER.into()),
        });

        let mesh_pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("mesh_pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &mesh_shader,
                entry_point: Some("vs_main"),
                compilation_options: Default::default(),
                buffers: std::slice::from_ref(&vertex_layout),
            },
            fragment: Some(wgpu::FragmentState {
                module: &mesh_shader,
                entry_point: Some("fs_main"),
                compilation_options: Default::default(),
                targets: &[Some(wgpu::ColorTargetState {
                    format: surface_format,
                    blend: Some(wgpu::BlendState::REPLACE),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                // Imported meshes and the built-ins disagree on winding,
                // so nothing is culled.
                cull_mode: None,
                ..Default::default()
            },
            depth_stencil: Some(wgpu::DepthStencilState {
                format: wgpu::TextureFormat::Depth32Float,
                depth_write_enabled: true,
                depth_compare: wgpu::CompareFunction::Less,
                stencil: Default::default(),
                bias: Default::default(),
            }),
            multisample: Default::default(),
            multiview: None,
            cache: None,
        });

        let line_shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("line_shader"),
            source: wgpu::ShaderSource::Wgsl(shaders::LINE_SHADER.into()),
        });

        let line_pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("line_pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &line_shader,
                entry_point: Some("vs_line"),
                compilation_options: Default::default(),
                buffers: std::slice::from_ref(&vertex_layout),
            },
            fragment: Some(wgpu::FragmentState {
                module: &line_shader,
                entry_point: Some("fs_line"),
                compilation_options: Default::default(),
                targets: &[Some(wgpu::ColorTargetState {
                    format: surface_format,
                    blend: Some(wgpu::BlendState::REPLACE),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::LineList,
                ..Default::default()
            },
            depth_stencil: Some(wgpu::DepthStencilState {
                format: wgpu::TextureFormat::Depth32Float,
                depth_write_enabled: true,
                depth_compare: wgpu::CompareFunction::Less,
                stencil: Default::default(),
                bias: Default::default(),
            }),
            multisample: Default::default(),
            multiview: None,
            cache: None,
        });

        // Built-in geometry.
        let (cube_verts, cube_indices) = meshes::cube();
        let cube = Self::upload_u16_mesh(device, "cube", &cube_verts, &cube_indices);
        let (pyramid_verts, pyramid_indices) = meshes::pyramid();
        let pyramid = Self::upload_u16_mesh(device, "pyramid", &pyramid_verts, &pyramid_indices);

        let line_verts = meshes::line();
        let line_vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("line_vertex_buffer"),
            contents: bytemuck::cast_slice(&line_verts),
            usage: wgpu::BufferUsages::VERTEX,
        });

        // 1x1 white texture for untextured draws.
        let white = TextureAsset {
            name: "white".into(),
            width: 1,
            height: 1,
            pixels: vec![255, 255, 255, 255],
        };
        let white_view = Self::create_texture(device, queue, &white);
        let fallback_bind_group = Self::create_bind_group(
            device,
            &bind_group_layout,
            &uniform_buffer,
            &white_view,
            &sampler,
            "fallback_bind_group",
        );

        let depth_texture = Self::create_depth_texture(device, width, height);

        Self {
            mesh_pipeline,
            line_pipeline,
            uniform_buffer,
            bind_group_layout,
            sampler,
            fallback_bind_group,
            default_bind_group: None,
            cube,
            pyramid,
            line_vertex_buffer,
            line_vertex_count: line_verts.len() as u32,
            objects: Vec::new(),
            slot,
            depth_texture,
            surface_format,
        }
    }

    pub fn resize(&mut self, device: &wgpu::Device, width: u32, height: u32) {
        self.depth_texture = Self::create_depth_texture(device, width, height);
    }

    pub fn surface_format(&self) -> wgpu::TextureFormat {
        self.surface_format
    }

    /// Install the texture shown on the built-in cubes.
    pub fn set_default_texture(
        &mut self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        texture: &TextureAsset,
    ) {
        let view = Self::create_texture(device, queue, texture);
        self.default_bind_group = Some(Self::create_bind_group(
            device,
            &self.bind_group_layout,
            &self.uniform_buffer,
            &view,
            &self.sampler,
            "default_texture_bind_group",
        ));
    }

    /// Create GPU resources for every object in the scene.
    ///
    /// Must be called before `render` whenever the object list changes.
    /// A missing asset is a setup failure and aborts the upload.
    pub fn upload_scene(
        &mut self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        scene: &Scene,
        store: &AssetStore,
    ) -> Result<(), AssetError> {
        self.objects.clear();
        for object in &scene.objects {
            let mesh = Self::upload_mesh(device, store.get_mesh(object.mesh())?);
            let bind_group = match object.texture() {
                Some(id) => {
                    let view = Self::create_texture(device, queue, store.get_texture(id)?);
                    Some(Self::create_bind_group(
                        device,
                        &self.bind_group_layout,
                        &self.uniform_buffer,
                        &view,
                        &self.sampler,
                        "object_bind_group",
                    ))
                }
                None => None,
            };
            self.objects.push(GpuObject { mesh, bind_group });
        }
        tracing::debug!(objects = self.objects.len(), "scene uploaded");
        Ok(())
    }

    /// Render one frame.
    ///
    /// The draw list comes from `frame_plan`. Every command rewrites the
    /// one uniform buffer and is submitted before the next command's
    /// write, so the GPU always reads the state written for that draw;
    /// `wgpu` applies `write_buffer` at submission, which is why each
    /// draw gets its own submission instead of sharing one encoder.
    pub fn render(
        &mut self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        view: &wgpu::TextureView,
        scene: &Scene,
        ctx: &FrameContext,
    ) {
        let base = FrameUniforms::frame_base(scene, ctx);

        // Clear both targets before the per-draw passes load them.
        let mut encoder = device.create_command_encoder(&wgpu::CommandEncoderDescriptor {
            label: Some("clear_encoder"),
        });
        self.begin_pass(&mut encoder, view, true);
        queue.submit(std::iter::once(encoder.finish()));

        for command in frame_plan(scene) {
            self.slot
                .write(base.for_draw(command.world, command.has_texture));
            queue.write_buffer(&self.uniform_buffer, 0, self.slot.bytes());

            let mut encoder = device.create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("draw_encoder"),
            });
            {
                let mut pass = self.begin_pass(&mut encoder, view, false);
                match command.drawable {
                    Drawable::Cube => {
                        let bind_group = self
                            .default_bind_group
                            .as_ref()
                            .unwrap_or(&self.fallback_bind_group);
                        Self::draw_mesh(&mut pass, &self.mesh_pipeline, bind_group, &self.cube);
                    }
                    Drawable::Pyramid => {
                        Self::draw_mesh(
                            &mut pass,
                            &self.mesh_pipeline,
                            &self.fallback_bind_group,
                            &self.pyramid,
                        );
                    }
                    Drawable::Line => {
                        pass.set_pipeline(&self.line_pipeline);
                        pass.set_bind_group(0, &self.fallback_bind_group, &[]);
                        pass.set_vertex_buffer(0, self.line_vertex_buffer.slice(..));
                        pass.draw(0..self.line_vertex_count, 0..1);
                    }
                    Drawable::Object(index) => {
                        // upload_scene keeps this list in step with the scene.
                        let Some(object) = self.objects.get(index) else {
                            tracing::warn!(index, "object not uploaded, skipping draw");
                            continue;
                        };
                        let bind_group = object
                            .bind_group
                            .as_ref()
                            .unwrap_or(&self.fallback_bind_group);
                        Self::draw_mesh(&mut pass, &self.mesh_pipeline, bind_group, &object.mesh);
                    }
                }
            }
            queue.submit(std::iter::once(encoder.finish()));
        }
    }

    fn draw_mesh<'a>(
        pass: &mut wgpu::RenderPass<'a>,
        pipeline: &'a wgpu::RenderPipeline,
        bind_group: &'a wgpu::BindGroup,
        mesh: &'a GpuMesh,
    ) {
        pass.set_pipeline(pipeline);
        pass.set_bind_group(0, bind_group, &[]);
        pass.set_vertex_buffer(0, mesh.vertex_buffer.slice(..));
        pass.set_index_buffer(mesh.index_buffer.slice(..), mesh.index_format);
        pass.draw_indexed(0..mesh.index_count, 0, 0..1);
    }

    /// Begin a pass over the frame's color and depth targets. The clear
    /// pass wipes both; every later pass loads what is already there.
    fn begin_pass<'a>(
        &self,
        encoder: &'a mut wgpu::CommandEncoder,
        view: &wgpu::TextureView,
        clear: bool,
    ) -> wgpu::RenderPass<'a> {
        let (color_load, depth_load) = pass_load_ops(clear);
        encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("frame_pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: color_load,
                    store: wgpu::StoreOp::Store,
                },
            })],
            depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                view: &self.depth_texture,
                depth_ops: Some(wgpu::Operations {
                    load: depth_load,
                    store: wgpu::StoreOp::Store,
                }),
                stencil_ops: None,
            }),
            ..Default::default()
        })
    }

    fn upload_u16_mesh(
        device: &wgpu::Device,
        name: &str,
        vertices: &[Vertex],
        indices: &[u16],
    ) -> GpuMesh {
        GpuMesh {
            vertex_buffer: device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some(&format!("{name}_vertex_buffer")),
                contents: bytemuck::cast_slice(vertices),
                usage: wgpu::BufferUsages::VERTEX,
            }),
            index_buffer: device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some(&format!("{name}_index_buffer")),
                contents: bytemuck::cast_slice(indices),
                usage: wgpu::BufferUsages::INDEX,
            }),
            index_count: indices.len() as u32,
            index_format: wgpu::IndexFormat::Uint16,
        }
    }

    fn upload_mesh(device: &wgpu::Device, mesh: &MeshAsset) -> GpuMesh {
        let vertices: Vec<Vertex> = mesh
            .vertices
            .iter()
            .map(|v| Vertex {
                position: v.position,
                normal: v.normal,
                texcoord: v.texcoord,
            })
            .collect();
        GpuMesh {
            vertex_buffer: device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("object_vertex_buffer"),
                contents: bytemuck::cast_slice(&vertices),
                usage: wgpu::BufferUsages::VERTEX,
            }),
            index_buffer: device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("object_index_buffer"),
                contents: bytemuck::cast_slice(&mesh.indices),
                usage: wgpu::BufferUsages::INDEX,
            }),
            index_count: mesh.index_count(),
            index_format: wgpu::IndexFormat::Uint32,
        }
    }

    fn create_texture(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        texture: &TextureAsset,
    ) -> wgpu::TextureView {
        let size = wgpu::Extent3d {
            width: texture.width,
            height: texture.height,
            depth_or_array_layers: 1,
        };
        let gpu_texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some(&texture.name),
            size,
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: wgpu::TextureFormat::Rgba8UnormSrgb,
            usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
            view_formats: &[],
        });
        queue.write_texture(
            wgpu::TexelCopyTextureInfo {
                texture: &gpu_texture,
                mip_level: 0,
                origin: wgpu::Origin3d::ZERO,
                aspect: wgpu::TextureAspect::All,
            },
            &texture.pixels,
            wgpu::TexelCopyBufferLayout {
                offset: 0,
                bytes_per_row: Some(4 * texture.width),
                rows_per_image: Some(texture.height),
            },
            size,
        );
        gpu_texture.create_view(&wgpu::TextureViewDescriptor::default())
    }

    fn create_bind_group(
        device: &wgpu::Device,
        layout: &wgpu::BindGroupLayout,
        uniform_buffer: &wgpu::Buffer,
        texture_view: &wgpu::TextureView,
        sampler: &wgpu::Sampler,
        label: &str,
    ) -> wgpu::BindGroup {
        device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some(label),
            layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: uniform_buffer.as_entire_binding(),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::TextureView(texture_view),
                },
                wgpu::BindGroupEntry {
                    binding: 2,
                    resource: wgpu::BindingResource::Sampler(sampler),
                },
            ],
        })
    }

    fn create_depth_texture(device: &wgpu::Device, width: u32, height: u32) -> wgpu::TextureView {
        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some("depth_texture"),
            size: wgpu::Extent3d {
                width: width.max(1),
                height: height.max(1),
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: wgpu::TextureFormat::Depth32Float,
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            view_formats: &[],
        });
        texture.create_view(&Default::default())
    }
}

/// Load operations for the color and depth attachments of one pass.
fn pass_load_ops(clear: bool) -> (wgpu::LoadOp<wgpu::Color>, wgpu::LoadOp<f32>) {
    if clear {
        (wgpu::LoadOp::Clear(BACKGROUND), wgpu::LoadOp::Clear(1.0))
    } else {
        (wgpu::LoadOp::Load, wgpu::LoadOp::Load)
    }
}
