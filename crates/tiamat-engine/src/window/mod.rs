//! Window + runtime loop.
//!
//! Owns the `winit` EventLoop and the single fixed-size window, translates
//! platform events into the typed [`crate::input::Event`] stream, and feeds
//! the frame-loop driver.

mod runtime;

pub use runtime::{Runtime, RuntimeConfig};
