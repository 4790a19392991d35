//! Engine-facing application contract.
//!
//! The stable interface between the window runtime and the binary: one-time
//! resource setup once the device exists, then one callback per rendered
//! frame.

mod app;
mod ctx;

pub use app::{App, AppControl};
pub use ctx::FrameCtx;
