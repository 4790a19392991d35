//! Fixed pipeline state.
//!
//! Binds the compiled shader programs, the vertex input layout, and the
//! rasterizer configuration that together define how geometry is interpreted
//! and rasterized. Triangle lists are the only supported topology and the
//! viewport always covers the full render target.

mod layout;
mod state;

pub use layout::VertexLayout;
pub use state::PipelineState;
