use bytemuck::{Pod, Zeroable};
use glam::{Mat4, Vec3};
use wgpu::util::DeviceExt;

use crate::error::FatalError;

/// CPU-side camera state, combined into the view matrix.
#[derive(Debug, Clone)]
pub struct Camera {
    pub eye: Vec3,
    pub target: Vec3,
    pub up: Vec3,
}

impl Camera {
    pub fn view(&self) -> Mat4 {
        Mat4::look_at_lh(self.eye, self.target, self.up)
    }
}

/// Left-handed perspective projection with a 0..1 depth range, matching the
/// depth clear value of 1.0 (far plane).
pub fn perspective(fov_y_radians: f32, aspect: f32, near: f32, far: f32) -> Mat4 {
    Mat4::perspective_lh(fov_y_radians, aspect, near, far)
}

/// World/view/projection state combined into one matrix per object.
///
/// Computed once at startup here (the scene is static); a system with
/// camera motion would recompute and re-upload per frame.
#[derive(Debug, Clone)]
pub struct Transform {
    pub world: Mat4,
    pub view: Mat4,
    pub projection: Mat4,
}

impl Transform {
    /// Combined world x view x projection matrix, in column-vector
    /// convention (`projection * view * world`).
    pub fn wvp(&self) -> Mat4 {
        self.projection * self.view * self.world
    }

    /// Shader-facing form of the combined matrix.
    ///
    /// The matrix is transposed exactly once before upload; the vertex
    /// shader multiplies row-vector style (`pos * wvp`) to compensate.
    /// Skipping the transpose, or applying it twice, silently corrupts
    /// rendered geometry with no error signal.
    pub fn to_uniform(&self) -> TransformUniform {
        TransformUniform {
            wvp: self.wvp().transpose().to_cols_array_2d(),
        }
    }
}

/// GPU-facing uniform block: the combined transform, transposed.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct TransformUniform {
    pub wvp: [[f32; 4]; 4],
}

/// The per-object constant buffer holding [`TransformUniform`].
///
/// Mutation overwrites the whole buffer; partial updates are not supported.
pub struct TransformBuffer {
    buffer: wgpu::Buffer,
}

impl TransformBuffer {
    pub fn new(device: &wgpu::Device, transform: &Transform) -> Result<Self, FatalError> {
        let uniform = transform.to_uniform();
        let buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("tiamat transform buffer"),
            contents: bytemuck::bytes_of(&uniform),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });
        Ok(Self { buffer })
    }

    /// Whole-buffer overwrite with a freshly combined transform.
    pub fn update(&self, queue: &wgpu::Queue, transform: &Transform) {
        let uniform = transform.to_uniform();
        queue.write_buffer(&self.buffer, 0, bytemuck::bytes_of(&uniform));
    }

    pub fn buffer(&self) -> &wgpu::Buffer {
        &self.buffer
    }
}
