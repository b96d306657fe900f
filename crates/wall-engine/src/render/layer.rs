use std::borrow::Cow;
use std::collections::HashMap;

use bytemuck::{Pod, Zeroable};
use cgmath::{Matrix4, Vector3};
use wgpu::util::DeviceExt;

use crate::coords::Size;
use crate::math;
use crate::resources::{Texture, TextureId};
use crate::scene::{LayerQuad, SceneComposition};

use super::{RenderCtx, RenderTarget};

/// Built-in layer shader; a `layer.wgsl` in the shaders directory replaces it.
pub const DEFAULT_LAYER_SHADER: &str = include_str!("shaders/layer.wgsl");

/// Depth of every layer quad in layer eye space, inside the `(0.1, 1000)` volume.
const LAYER_DEPTH: f32 = -1.0;

/// Full transform for one layer quad: unit quad → layer pixels → clip space.
pub fn layer_transform(model: &Matrix4<f32>, quad: &LayerQuad<'_>) -> Matrix4<f32> {
    math::opengl_to_wgpu()
        * *model
        * Matrix4::from_translation(Vector3::new(quad.origin.x, quad.origin.y, LAYER_DEPTH))
        * Matrix4::from_nonuniform_scale(quad.size.x, quad.size.y, 1.0)
}

/// Largest size with both sides at most `max`, keeping the aspect ratio.
fn fit_within(size: Size, max: u32) -> Size {
    let max = max.max(1);
    if size.width <= max && size.height <= max {
        return size;
    }
    let (w, h) = (u64::from(size.width), u64::from(size.height));
    let scaled = |num: u64, den: u64| ((num * u64::from(max)) / den).max(1) as u32;
    if w >= h {
        Size::new(max, scaled(h, w))
    } else {
        Size::new(scaled(w, h), max)
    }
}

#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
struct LayerUniform {
    transform: [[f32; 4]; 4],
}

#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
struct QuadVertex {
    pos: [f32; 2], // 0..1, doubles as uv
}

impl QuadVertex {
    const ATTRS: [wgpu::VertexAttribute; 1] = wgpu::vertex_attr_array![0 => Float32x2];

    fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<QuadVertex>() as u64,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRS,
        }
    }
}

const QUAD_VERTICES: [QuadVertex; 4] = [
    QuadVertex { pos: [0.0, 0.0] },
    QuadVertex { pos: [1.0, 0.0] },
    QuadVertex { pos: [1.0, 1.0] },
    QuadVertex { pos: [0.0, 1.0] },
];

const QUAD_INDICES: [u16; 6] = [0, 1, 2, 0, 2, 3];

/// GPU state for one layer node.
struct CachedLayer {
    texture_id: TextureId,
    _texture: wgpu::Texture,
    ubo: wgpu::Buffer,
    bind_group: wgpu::BindGroup,
}

/// Textured-quad renderer for scene layers.
///
/// Layers are drawn in composition order without depth testing. Uploaded
/// textures are cached per node and re-uploaded only when the node's
/// background changes identity.
pub struct LayerRenderer {
    shader_source: Cow<'static, str>,

    pipeline_format: Option<wgpu::TextureFormat>,
    pipeline: Option<wgpu::RenderPipeline>,
    bind_group_layout: Option<wgpu::BindGroupLayout>,
    sampler: Option<wgpu::Sampler>,

    quad_vbo: Option<wgpu::Buffer>,
    quad_ibo: Option<wgpu::Buffer>,

    layers: HashMap<String, CachedLayer>,
}

impl Default for LayerRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl LayerRenderer {
    pub fn new() -> Self {
        Self::with_shader(DEFAULT_LAYER_SHADER)
    }

    /// Renderer using `source` as WGSL. The module must expose `vs_main` and
    /// `fs_main` with the built-in bindings.
    pub fn with_shader(source: impl Into<Cow<'static, str>>) -> Self {
        Self {
            shader_source: source.into(),
            pipeline_format: None,
            pipeline: None,
            bind_group_layout: None,
            sampler: None,
            quad_vbo: None,
            quad_ibo: None,
            layers: HashMap::new(),
        }
    }

    /// Records draws for every visible layer of `scene` into `target`.
    pub fn render(
        &mut self,
        ctx: &RenderCtx<'_>,
        target: &mut RenderTarget<'_>,
        scene: &SceneComposition,
    ) {
        if ctx.area.is_empty() {
            return;
        }

        self.ensure_pipeline(ctx);
        self.ensure_sampler(ctx);
        self.ensure_static_buffers(ctx);

        // Drop GPU state of nodes that left the scene.
        self.layers.retain(|name, _| scene.node(name).is_some());

        let mut drawn: Vec<&str> = Vec::new();
        for (node, layer) in scene.layers() {
            let Some(quad) = layer.quad() else { continue };
            self.ensure_layer(ctx, node.name(), quad.texture);

            let Some(cached) = self.layers.get(node.name()) else { continue };
            let uniform = LayerUniform {
                transform: layer_transform(node.model_matrix(), &quad).into(),
            };
            ctx.queue.write_buffer(&cached.ubo, 0, bytemuck::bytes_of(&uniform));
            drawn.push(node.name());
        }

        if drawn.is_empty() {
            return;
        }

        let Some(pipeline) = self.pipeline.as_ref() else { return };
        let Some(quad_vbo) = self.quad_vbo.as_ref() else { return };
        let Some(quad_ibo) = self.quad_ibo.as_ref() else { return };

        let mut rpass = target.encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("wall layer pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: target.color_view,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Load,
                    store: wgpu::StoreOp::Store,
                },
                depth_slice: None,
            })],
            depth_stencil_attachment: None,
            timestamp_writes: None,
            occlusion_query_set: None,
            multiview_mask: None,
        });

        let area = ctx.area;
        rpass.set_viewport(
            area.x as f32,
            area.y as f32,
            area.width as f32,
            area.height as f32,
            0.0,
            1.0,
        );
        rpass.set_pipeline(pipeline);
        rpass.set_vertex_buffer(0, quad_vbo.slice(..));
        rpass.set_index_buffer(quad_ibo.slice(..), wgpu::IndexFormat::Uint16);

        for name in drawn {
            let Some(cached) = self.layers.get(name) else { continue };
            rpass.set_bind_group(0, &cached.bind_group, &[]);
            rpass.draw_indexed(0..6, 0, 0..1);
        }
    }

    fn ensure_pipeline(&mut self, ctx: &RenderCtx<'_>) {
        if self.pipeline_format == Some(ctx.surface_format) && self.pipeline.is_some() {
            return;
        }

        let shader = ctx.device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("wall layer shader"),
            source: wgpu::ShaderSource::Wgsl(self.shader_source.clone()),
        });

        let bind_group_layout =
            ctx.device
                .create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                    label: Some("wall layer bgl"),
                    entries: &[
                        wgpu::BindGroupLayoutEntry {
                            binding: 0,
                            visibility: wgpu::ShaderStages::VERTEX,
                            ty: wgpu::BindingType::Buffer {
                                ty: wgpu::BufferBindingType::Uniform,
                                has_dynamic_offset: false,
                                min_binding_size: wgpu::BufferSize::new(
                                    std::mem::size_of::<LayerUniform>() as u64,
                                ),
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

        let pipeline_layout =
            ctx.device
                .create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
                    label: Some("wall layer pipeline layout"),
                    bind_group_layouts: &[&bind_group_layout],
                    immediate_size: 0,
                });

        let pipeline = ctx.device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("wall layer pipeline"),
            layout: Some(&pipeline_layout),

            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                compilation_options: Default::default(),
                buffers: &[QuadVertex::layout()],
            },

            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_main"),
                compilation_options: Default::default(),
                targets: &[Some(wgpu::ColorTargetState {
                    format: ctx.surface_format,
                    // Decoded images carry straight alpha.
                    blend: Some(wgpu::BlendState::ALPHA_BLENDING),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
            }),

            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                strip_index_format: None,
                front_face: wgpu::FrontFace::Ccw,
                cull_mode: None,
                polygon_mode: wgpu::PolygonMode::Fill,
                unclipped_depth: false,
                conservative: false,
            },

            depth_stencil: None,
            multisample: wgpu::MultisampleState::default(),
            multiview_mask: None,
            cache: None,
        });

        self.pipeline_format = Some(ctx.surface_format);
        self.pipeline = Some(pipeline);
        self.bind_group_layout = Some(bind_group_layout);

        // Bind groups reference the old layout.
        self.layers.clear();
    }

    fn ensure_sampler(&mut self, ctx: &RenderCtx<'_>) {
        if self.sampler.is_some() {
            return;
        }
        self.sampler = Some(ctx.device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("wall layer sampler"),
            address_mode_u: wgpu::AddressMode::ClampToEdge,
            address_mode_v: wgpu::AddressMode::ClampToEdge,
            address_mode_w: wgpu::AddressMode::ClampToEdge,
            mag_filter: wgpu::FilterMode::Linear,
            min_filter: wgpu::FilterMode::Linear,
            mipmap_filter: wgpu::MipmapFilterMode::Nearest,
            ..Default::default()
        }));
    }

    fn ensure_static_buffers(&mut self, ctx: &RenderCtx<'_>) {
        if self.quad_vbo.is_some() && self.quad_ibo.is_some() {
            return;
        }

        self.quad_vbo = Some(ctx.device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("wall layer quad vbo"),
            contents: bytemuck::cast_slice(&QUAD_VERTICES),
            usage: wgpu::BufferUsages::VERTEX,
        }));

        self.quad_ibo = Some(ctx.device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("wall layer quad ibo"),
            contents: bytemuck::cast_slice(&QUAD_INDICES),
            usage: wgpu::BufferUsages::INDEX,
        }));
    }

    /// Uploads `texture` for node `name` unless the cached upload already matches.
    fn ensure_layer(&mut self, ctx: &RenderCtx<'_>, name: &str, texture: &Texture) {
        if self
            .layers
            .get(name)
            .is_some_and(|c| c.texture_id == texture.id())
        {
            return;
        }

        let Some(bgl) = self.bind_group_layout.as_ref() else { return };
        let Some(sampler) = self.sampler.as_ref() else { return };

        let max_side = ctx.device.limits().max_texture_dimension_2d;
        let size = fit_within(texture.size(), max_side);
        let downscaled;
        let pixels: &[u8] = if size == texture.size() {
            texture.pixels()
        } else {
            let full = texture.size();
            log::warn!(
                "layer `{name}`: background {}x{} exceeds the {max_side}px texture limit; uploading {}x{}",
                full.width,
                full.height,
                size.width,
                size.height
            );
            downscaled = image::imageops::resize(
                texture.image(),
                size.width,
                size.height,
                image::imageops::FilterType::Triangle,
            );
            downscaled.as_raw()
        };

        let extent = wgpu::Extent3d {
            width: size.width,
            height: size.height,
            depth_or_array_layers: 1,
        };

        let gpu_texture = ctx.device.create_texture(&wgpu::TextureDescriptor {
            label: Some("wall layer texture"),
            size: extent,
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: wgpu::TextureFormat::Rgba8UnormSrgb,
            usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
            view_formats: &[],
        });

        ctx.queue.write_texture(
            wgpu::TexelCopyTextureInfo {
                aspect: wgpu::TextureAspect::All,
                texture: &gpu_texture,
                mip_level: 0,
                origin: wgpu::Origin3d::ZERO,
            },
            pixels,
            wgpu::TexelCopyBufferLayout {
                offset: 0,
                bytes_per_row: Some(4 * size.width),
                rows_per_image: Some(size.height),
            },
            extent,
        );

        let view = gpu_texture.create_view(&wgpu::TextureViewDescriptor::default());

        let ubo = ctx.device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("wall layer ubo"),
            size: std::mem::size_of::<LayerUniform>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let bind_group = ctx.device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("wall layer bind group"),
            layout: bgl,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: ubo.as_entire_binding(),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::TextureView(&view),
                },
                wgpu::BindGroupEntry {
                    binding: 2,
                    resource: wgpu::BindingResource::Sampler(sampler),
                },
            ],
        });

        log::debug!(
            "layer `{name}`: uploaded texture {:?} ({}x{})",
            texture.id(),
            size.width,
            size.height
        );

        self.layers.insert(
            name.to_string(),
            CachedLayer {
                texture_id: texture.id(),
                _texture: gpu_texture,
                ubo,
                bind_group,
            },
        );
    }
}
