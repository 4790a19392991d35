//! GPU device + presentation surface ownership.
//!
//! This module is responsible for:
//! - creating the wgpu Instance/Adapter/Device/Queue
//! - configuring the Surface (swapchain) at a fixed resolution
//! - allocating the depth-stencil target that matches it
//! - acquiring back-buffers and presenting finished frames
//!
//! Resize and device-lost recovery are deliberately absent: the pipeline is
//! configured once at startup and assumed static for the process lifetime.

mod gpu;

pub use gpu::{DisplayInit, Frame, Gpu, DEPTH_FORMAT};
