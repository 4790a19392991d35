use crate::device::Gpu;
use crate::error::FatalError;
use crate::frame::FramePlan;
use crate::mesh::{Mesh, Transform, TransformBuffer, Vertex};
use crate::pipeline::{PipelineState, VertexLayout};
use crate::shader::{self, ShaderSource};

/// Everything a frame draws with: the pipeline, the static geometry, and
/// the bound transform buffer.
pub struct Renderer {
    pipeline: PipelineState,
    mesh: Mesh,
    transforms: TransformBuffer,
    bind_group: wgpu::BindGroup,
}

impl Renderer {
    /// One-time setup against an initialized device.
    ///
    /// Order matters and is part of the contract: both shader stages are
    /// compiled and the pipeline built before any vertex/index/constant
    /// buffer is created, so a compile failure never leaves partial
    /// geometry resources behind.
    pub fn create(
        gpu: &Gpu<'_>,
        vs_source: &ShaderSource,
        ps_source: &ShaderSource,
        vertices: &[Vertex],
        indices: &[u32],
        transform: &Transform,
    ) -> Result<Self, FatalError> {
        let device = gpu.device();

        let vs = shader::compile(device, vs_source)?;
        let ps = shader::compile(device, ps_source)?;

        let layout = VertexLayout::standard();
        let pipeline =
            PipelineState::build(device, gpu.surface_format(), &vs, &ps, &layout, gpu.size())?;

        let mesh = Mesh::upload(device, vertices, indices)?;
        let transforms = TransformBuffer::new(device, transform)?;

        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("tiamat transform bind group"),
            layout: pipeline.bind_group_layout(),
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: transforms.buffer().as_entire_binding(),
            }],
        });

        Ok(Self {
            pipeline,
            mesh,
            transforms,
            bind_group,
        })
    }

    /// Overwrites the whole transform buffer (the scene here is static, so
    /// this runs once at startup; a moving camera would call it per frame).
    pub fn update_transform(&self, gpu: &Gpu<'_>, transform: &Transform) {
        self.transforms.update(gpu.queue(), transform);
    }

    /// Executes one frame plan: clear color + depth, the plan's indexed
    /// draws in order, then present.
    pub fn render_frame(&self, gpu: &Gpu<'_>, plan: &FramePlan) -> Result<(), FatalError> {
        let mut frame = gpu.begin_frame()?;
        let [r, g, b] = plan.clear_rgb();

        // Pass scope: the encoder is moved into present() afterwards.
        {
            let mut rpass = frame.encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("tiamat frame pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &frame.view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color {
                            r: r as f64,
                            g: g as f64,
                            b: b as f64,
                            a: 1.0,
                        }),
                        store: wgpu::StoreOp::Store,
                    },
                    depth_slice: None,
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: gpu.depth_view(),
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(0),
                        store: wgpu::StoreOp::Store,
                    }),
                }),
                timestamp_writes: None,
                occlusion_query_set: None,
                multiview_mask: None,
            });

            let viewport = self.pipeline.viewport();
            rpass.set_viewport(
                0.0,
                0.0,
                viewport.width as f32,
                viewport.height as f32,
                0.0,
                1.0,
            );

            rpass.set_pipeline(self.pipeline.pipeline());
            rpass.set_bind_group(0, &self.bind_group, &[]);
            rpass.set_vertex_buffer(0, self.mesh.vertex_buffer().slice(..));
            rpass.set_index_buffer(self.mesh.index_buffer().slice(..), wgpu::IndexFormat::Uint32);

            for range in plan.draws() {
                rpass.draw_indexed(range.first_index..range.end(), 0, 0..1);
            }
        }

        gpu.present(frame);
        Ok(())
    }
}
