//! Static geometry and the per-object transform buffer.
//!
//! Vertex and index data are immutable for the process lifetime; the
//! transform (constant) buffer is the single channel by which CPU-side
//! transform state reaches the vertex shader.

mod buffers;
mod transform;
mod vertex;

pub use buffers::{validate_indices, Mesh};
pub use transform::{perspective, Camera, Transform, TransformBuffer, TransformUniform};
pub use vertex::Vertex;
