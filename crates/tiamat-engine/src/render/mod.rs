//! GPU-side frame rendering.
//!
//! Assembles the fixed pipeline plus the scene's buffers in the one valid
//! order (shaders before any buffer exists) and executes frame plans
//! against the device.

mod renderer;

pub use renderer::Renderer;
