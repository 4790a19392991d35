use bytemuck::{Pod, Zeroable};

/// Interleaved per-vertex record: position then color.
///
/// The byte layout is load-bearing: the input layout's offsets and the
/// vertex buffer's stride both derive from this struct, so it stays
/// `repr(C)` with no padding (3 + 4 floats = 28 bytes).
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 3],
    pub color: [f32; 4],
}

impl Vertex {
    /// Byte stride of one record in the vertex buffer.
    pub const STRIDE: u64 = std::mem::size_of::<Vertex>() as u64;

    pub const fn new(position: [f32; 3], color: [f32; 4]) -> Self {
        Self { position, color }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn position_is_at_offset_zero() {
        assert_eq!(std::mem::offset_of!(Vertex, position), 0);
    }

    #[test]
    fn color_is_at_offset_twelve() {
        assert_eq!(std::mem::offset_of!(Vertex, color), 12);
    }

    #[test]
    fn record_is_twenty_eight_bytes() {
        assert_eq!(std::mem::size_of::<Vertex>(), 28);
        assert_eq!(Vertex::STRIDE, 28);
    }
}
