use std::num::NonZeroU64;

use lib_app::AppContext;
use lib_gpu::{
    AddressMode, BindGroupLayout, BindGroupLayoutDescriptor, BindGroupLayoutEntry, BindingType,
    BlendState, Buffer, BufferBindingType, BufferInitDescriptor, BufferUsages, ColorTargetState,
    ColorWrites, Device, DeviceExt, FilterMode, FragmentState, FrontFace, MultisampleState,
    PipelineCompilationOptions, PipelineLayout, PipelineLayoutDescriptor, PolygonMode,
    PrimitiveState, PrimitiveTopology, Queue, RenderPipeline, RenderPipelineDescriptor, Sampler,
    SamplerBindingType, SamplerDescriptor, ShaderModule, ShaderStages, TextureFormat,
    TextureSampleType, TextureViewDimension, VertexState, include_wgsl,
};
use lib_math::Mat4;

mod camera;
mod font;
mod pass;
mod quad;
mod quad_buffer;
mod texture;
pub use camera::*;
pub use font::{Font, glyph_source, measure_text};
pub use pass::*;
pub use quad::*;
pub use texture::*;

use quad_buffer::QuadBuffer;

const QUAD_CAP: usize = 1024;
const CAMERA_CAP: usize = 8;

/// Batched 2D drawing into render targets and the window surface.
#[derive(Debug)]
pub struct Renderer {
    vertex_buf: Buffer,
    index_buf: Buffer,
    quad_buf: QuadBuffer,
    quad_vec: Vec<Quad>,
    camera_buf: CameraBuffer,
    camera_vec: Vec<Mat4>,
    camera_layout: BindGroupLayout,
    texture_layout: BindGroupLayout,
    sampler: Sampler,
    target_pipeline: RenderPipeline,
    surface_pipeline: RenderPipeline,
    white: Texture,
}

#[derive(Debug, Clone, Copy)]
pub struct RendererContext<'a> {
    pub device: &'a Device,
    pub queue: &'a Queue,
    pub surface_format: TextureFormat,
}

impl Renderer {
    pub fn new(ctx: RendererContext<'_>) -> Self {
        let vertex_buf = ctx.device.create_buffer_init(&BufferInitDescriptor {
            label: Some("renderer vertex buffer"),
            contents: bytemuck::cast_slice(&CORNERS),
            usage: BufferUsages::VERTEX,
        });

        let index_buf = ctx.device.create_buffer_init(&BufferInitDescriptor {
            label: Some("renderer index buffer"),
            contents: bytemuck::cast_slice(&CORNER_INDICES),
            usage: BufferUsages::INDEX,
        });

        let camera_layout = ctx
            .device
            .create_bind_group_layout(&BindGroupLayoutDescriptor {
                label: Some("renderer camera bind group layout"),
                entries: &[BindGroupLayoutEntry {
                    binding: 0,
                    ty: BindingType::Buffer {
                        ty: BufferBindingType::Uniform,
                        has_dynamic_offset: true,
                        min_binding_size: NonZeroU64::new(size_of::<Mat4>() as u64),
                    },
                    count: None,
                    visibility: ShaderStages::VERTEX,
                }],
            });

        let texture_layout = ctx
            .device
            .create_bind_group_layout(&BindGroupLayoutDescriptor {
                label: Some("renderer texture bind group layout"),
                entries: &[
                    BindGroupLayoutEntry {
                        binding: 0,
                        ty: BindingType::Texture {
                            sample_type: TextureSampleType::Float { filterable: false },
                            view_dimension: TextureViewDimension::D2,
                            multisampled: false,
                        },
                        count: None,
                        visibility: ShaderStages::FRAGMENT,
                    },
                    BindGroupLayoutEntry {
                        binding: 1,
                        ty: BindingType::Sampler(SamplerBindingType::NonFiltering),
                        count: None,
                        visibility: ShaderStages::FRAGMENT,
                    },
                ],
            });

        let sampler = ctx.device.create_sampler(&SamplerDescriptor {
            label: Some("renderer sampler"),
            address_mode_u: AddressMode::ClampToEdge,
            address_mode_v: AddressMode::ClampToEdge,
            address_mode_w: AddressMode::ClampToEdge,
            anisotropy_clamp: 1,
            border_color: None,
            compare: None,
            lod_max_clamp: 32.0,
            lod_min_clamp: 0.0,
            mag_filter: FilterMode::Nearest,
            min_filter: FilterMode::Nearest,
            mipmap_filter: FilterMode::Nearest,
        });

        let shader = ctx
            .device
            .create_shader_module(include_wgsl!("sprite.wgsl"));

        let pipeline_layout = ctx
            .device
            .create_pipeline_layout(&PipelineLayoutDescriptor {
                label: Some("renderer pipeline layout"),
                bind_group_layouts: &[&camera_layout, &texture_layout],
                push_constant_ranges: &[],
            });

        let target_pipeline = create_pipeline(
            "renderer target pipeline",
            TEXTURE_FORMAT,
            &pipeline_layout,
            &shader,
            ctx,
        );

        let surface_pipeline = create_pipeline(
            "renderer surface pipeline",
            ctx.surface_format,
            &pipeline_layout,
            &shader,
            ctx,
        );

        let white = texture::solid_texture([255; 4], &texture_layout, &sampler, ctx);

        tracing::debug!(surface_format = ?ctx.surface_format, "created renderer");

        Self {
            vertex_buf,
            index_buf,
            quad_buf: QuadBuffer::new(QUAD_CAP, ctx),
            quad_vec: Vec::with_capacity(QUAD_CAP),
            camera_buf: CameraBuffer::new(CAMERA_CAP, &camera_layout, ctx),
            camera_vec: Vec::with_capacity(CAMERA_CAP),
            camera_layout,
            texture_layout,
            sampler,
            target_pipeline,
            surface_pipeline,
            white,
        }
    }
}

fn create_pipeline(
    label: &str,
    format: TextureFormat,
    layout: &PipelineLayout,
    shader: &ShaderModule,
    ctx: RendererContext<'_>,
) -> RenderPipeline {
    ctx.device
        .create_render_pipeline(&RenderPipelineDescriptor {
            label: Some(label),
            cache: None,
            depth_stencil: None,
            layout: Some(layout),
            multiview: None,
            primitive: PrimitiveState {
                front_face: FrontFace::Ccw,
                conservative: false,
                cull_mode: None,
                polygon_mode: PolygonMode::Fill,
                strip_index_format: None,
                topology: PrimitiveTopology::TriangleList,
                unclipped_depth: false,
            },
            vertex: VertexState {
                module: shader,
                entry_point: None,
                compilation_options: PipelineCompilationOptions::default(),
                buffers: &[CORNER_BUFFER_LAYOUT, QUAD_BUFFER_LAYOUT],
            },
            fragment: Some(FragmentState {
                module: shader,
                targets: &[Some(ColorTargetState {
                    blend: Some(BlendState::ALPHA_BLENDING),
                    format,
                    write_mask: ColorWrites::all(),
                })],
                entry_point: None,
                compilation_options: PipelineCompilationOptions::default(),
            }),
            multisample: MultisampleState::default(),
        })
}

impl<'a> From<AppContext<'a>> for RendererContext<'a> {
    fn from(value: AppContext<'a>) -> Self {
        Self {
            device: value.device,
            queue: value.queue,
            surface_format: value.surface_format,
        }
    }
}
