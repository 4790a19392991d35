use crate::error::FatalError;
use crate::mesh::Vertex;

/// Input layout: the fixed mapping from per-vertex byte offsets to the
/// shader-visible attributes (position: 3xf32, color: 4xf32).
///
/// This description, the vertex buffer's stride, and the vertex shader's
/// declared inputs must all agree; a mismatch is undefined behavior at the
/// API level, so it is checked up front and treated as a fatal
/// configuration error.
pub struct VertexLayout {
    attributes: [wgpu::VertexAttribute; 2],
    stride: u64,
}

impl VertexLayout {
    /// The one layout this harness supports.
    pub fn standard() -> Self {
        Self {
            attributes: wgpu::vertex_attr_array![0 => Float32x3, 1 => Float32x4],
            stride: Vertex::STRIDE,
        }
    }

    /// Cross-checks the declared offsets/formats against the `Vertex`
    /// record's actual memory layout.
    pub fn validate(&self) -> Result<(), FatalError> {
        let position_offset = std::mem::offset_of!(Vertex, position) as u64;
        let color_offset = std::mem::offset_of!(Vertex, color) as u64;
        let record_size = std::mem::size_of::<Vertex>() as u64;

        if self.attributes[0].offset != position_offset
            || self.attributes[0].format != wgpu::VertexFormat::Float32x3
        {
            return Err(FatalError::Config(format!(
                "input layout position attribute does not match Vertex (offset {}, expected {})",
                self.attributes[0].offset, position_offset
            )));
        }

        if self.attributes[1].offset != color_offset
            || self.attributes[1].format != wgpu::VertexFormat::Float32x4
        {
            return Err(FatalError::Config(format!(
                "input layout color attribute does not match Vertex (offset {}, expected {})",
                self.attributes[1].offset, color_offset
            )));
        }

        if self.stride != record_size {
            return Err(FatalError::Config(format!(
                "vertex stride {} does not match Vertex size {}",
                self.stride, record_size
            )));
        }

        Ok(())
    }

    /// wgpu-facing buffer layout view over this description.
    pub fn buffer_layout(&self) -> wgpu::VertexBufferLayout<'_> {
        wgpu::VertexBufferLayout {
            array_stride: self.stride,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &self.attributes,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ── layout reconstruction ─────────────────────────────────────────────

    #[test]
    fn standard_layout_matches_vertex_record() {
        VertexLayout::standard().validate().expect("layout must match Vertex");
    }

    #[test]
    fn position_starts_the_record() {
        let layout = VertexLayout::standard();
        assert_eq!(layout.attributes[0].offset, 0);
        assert_eq!(layout.attributes[0].format, wgpu::VertexFormat::Float32x3);
    }

    #[test]
    fn color_follows_position_at_twelve_bytes() {
        let layout = VertexLayout::standard();
        assert_eq!(layout.attributes[1].offset, 12);
        assert_eq!(layout.attributes[1].format, wgpu::VertexFormat::Float32x4);
    }

    #[test]
    fn stride_is_twenty_eight_bytes() {
        assert_eq!(VertexLayout::standard().stride, 28);
    }

    #[test]
    fn corrupted_stride_is_rejected() {
        let mut layout = VertexLayout::standard();
        layout.stride = 32;
        assert!(matches!(layout.validate(), Err(FatalError::Config(_))));
    }

    #[test]
    fn corrupted_offset_is_rejected() {
        let mut layout = VertexLayout::standard();
        layout.attributes[1].offset = 16;
        assert!(matches!(layout.validate(), Err(FatalError::Config(_))));
    }
}
