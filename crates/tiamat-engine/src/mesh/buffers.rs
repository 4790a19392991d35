use wgpu::util::DeviceExt;

use crate::error::FatalError;

use super::Vertex;

/// Checks index-buffer referential integrity: every index must reference an
/// existing vertex.
pub fn validate_indices(indices: &[u32], vertex_count: usize) -> Result<(), FatalError> {
    if let Some(&bad) = indices.iter().find(|&&i| i as usize >= vertex_count) {
        return Err(FatalError::Config(format!(
            "index {bad} out of range for {vertex_count} vertices"
        )));
    }
    Ok(())
}

/// Immutable GPU-resident geometry: one vertex buffer and one shared index
/// buffer of 32-bit indices, uploaded once at startup.
pub struct Mesh {
    vertex_buffer: wgpu::Buffer,
    index_buffer: wgpu::Buffer,
    vertex_count: u32,
    index_count: u32,
}

impl Mesh {
    /// Uploads static geometry. There is no update path afterwards.
    pub fn upload(
        device: &wgpu::Device,
        vertices: &[Vertex],
        indices: &[u32],
    ) -> Result<Self, FatalError> {
        if vertices.is_empty() || indices.is_empty() {
            return Err(FatalError::Config(
                "mesh requires at least one vertex and one index".to_string(),
            ));
        }
        validate_indices(indices, vertices.len())?;

        let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("tiamat vertex buffer"),
            contents: bytemuck::cast_slice(vertices),
            usage: wgpu::BufferUsages::VERTEX,
        });

        let index_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("tiamat index buffer"),
            contents: bytemuck::cast_slice(indices),
            usage: wgpu::BufferUsages::INDEX,
        });

        log::debug!(
            "uploaded mesh: {} vertices, {} indices",
            vertices.len(),
            indices.len()
        );

        Ok(Self {
            vertex_buffer,
            index_buffer,
            vertex_count: vertices.len() as u32,
            index_count: indices.len() as u32,
        })
    }

    pub fn vertex_buffer(&self) -> &wgpu::Buffer {
        &self.vertex_buffer
    }

    pub fn index_buffer(&self) -> &wgpu::Buffer {
        &self.index_buffer
    }

    pub fn vertex_count(&self) -> u32 {
        self.vertex_count
    }

    pub fn index_count(&self) -> u32 {
        self.index_count
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ── referential integrity ─────────────────────────────────────────────

    #[test]
    fn in_range_indices_pass() {
        assert!(validate_indices(&[0, 1, 2, 2, 1, 3], 4).is_ok());
    }

    #[test]
    fn index_equal_to_vertex_count_is_rejected() {
        let err = validate_indices(&[0, 1, 4], 4).expect_err("4 is out of range");
        assert!(matches!(err, FatalError::Config(_)));
    }

    #[test]
    fn empty_index_list_trivially_passes() {
        assert!(validate_indices(&[], 0).is_ok());
    }

    #[test]
    fn rejection_names_the_offending_index() {
        let err = validate_indices(&[7], 4).expect_err("7 is out of range");
        assert!(err.to_string().contains('7'));
    }
}
