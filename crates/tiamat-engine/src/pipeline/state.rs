use winit::dpi::PhysicalSize;

use crate::device::DEPTH_FORMAT;
use crate::error::FatalError;
use crate::mesh::TransformUniform;
use crate::shader::{CompiledShader, ShaderStage};

use super::VertexLayout;

/// The one render pipeline of the harness: bound shader programs, input
/// layout, triangle-list assembly, and depth testing against the shared
/// depth-stencil target.
///
/// Built once at startup; failure (malformed module, signature mismatch) is
/// fatal — there is no fallback program.
pub struct PipelineState {
    pipeline: wgpu::RenderPipeline,
    bind_group_layout: wgpu::BindGroupLayout,
    viewport: PhysicalSize<u32>,
}

impl PipelineState {
    pub fn build(
        device: &wgpu::Device,
        surface_format: wgpu::TextureFormat,
        vs: &CompiledShader,
        ps: &CompiledShader,
        layout: &VertexLayout,
        viewport: PhysicalSize<u32>,
    ) -> Result<Self, FatalError> {
        if vs.stage != ShaderStage::Vertex || ps.stage != ShaderStage::Pixel {
            return Err(FatalError::Config(format!(
                "pipeline given shaders for the wrong stages ({}, {})",
                vs.stage, ps.stage
            )));
        }

        layout.validate()?;

        // Signature mismatches between the vertex shader's declared inputs
        // and the layout surface here, through the validation scope.
        let error_scope = device.push_error_scope(wgpu::ErrorFilter::Validation);

        let bind_group_layout =
            device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                label: Some("tiamat transform bgl"),
                entries: &[wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::VERTEX,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: false,
                        min_binding_size: Some(
                            std::num::NonZeroU64::new(
                                std::mem::size_of::<TransformUniform>() as u64
                            )
                            .unwrap(),
                        ),
                    },
                    count: None,
                }],
            });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("tiamat pipeline layout"),
            bind_group_layouts: &[&bind_group_layout],
            immediate_size: 0,
        });

        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("tiamat pipeline"),
            layout: Some(&pipeline_layout),

            vertex: wgpu::VertexState {
                module: &vs.module,
                entry_point: Some(&vs.entry_point),
                compilation_options: Default::default(),
                buffers: &[layout.buffer_layout()],
            },

            fragment: Some(wgpu::FragmentState {
                module: &ps.module,
                entry_point: Some(&ps.entry_point),
                compilation_options: Default::default(),
                targets: &[Some(wgpu::ColorTargetState {
                    format: surface_format,
                    blend: None,
                    write_mask: wgpu::ColorWrites::ALL,
                })],
            }),

            // Triangle list is the only supported topology.
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                strip_index_format: None,
                front_face: wgpu::FrontFace::Ccw,
                cull_mode: None,
                polygon_mode: wgpu::PolygonMode::Fill,
                unclipped_depth: false,
                conservative: false,
            },

            depth_stencil: Some(wgpu::DepthStencilState {
                format: DEPTH_FORMAT,
                depth_write_enabled: true,
                depth_compare: wgpu::CompareFunction::Less,
                stencil: wgpu::StencilState::default(),
                bias: wgpu::DepthBiasState::default(),
            }),

            multisample: wgpu::MultisampleState::default(),
            multiview_mask: None,
            cache: None,
        });

        if let Some(err) = pollster::block_on(error_scope.pop()) {
            return Err(FatalError::resource("building render pipeline", err));
        }

        Ok(Self {
            pipeline,
            bind_group_layout,
            viewport,
        })
    }

    pub fn pipeline(&self) -> &wgpu::RenderPipeline {
        &self.pipeline
    }

    pub fn bind_group_layout(&self) -> &wgpu::BindGroupLayout {
        &self.bind_group_layout
    }

    /// Full-target viewport dimensions set on every pass.
    pub fn viewport(&self) -> PhysicalSize<u32> {
        self.viewport
    }
}
