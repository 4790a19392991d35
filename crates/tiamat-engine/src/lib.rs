//! Tiamat engine crate.
//!
//! A minimal real-time rendering harness: one window, one GPU device, static
//! geometry and shaders uploaded once at startup, and a frame loop that
//! clears, draws indexed geometry with depth testing, and presents.

pub mod core;
pub mod device;
pub mod error;
pub mod frame;
pub mod input;
pub mod mesh;
pub mod pipeline;
pub mod render;
pub mod shader;
pub mod time;
pub mod window;

pub mod logging;
