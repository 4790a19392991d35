use crate::device::Gpu;
use crate::error::FatalError;

use super::ctx::FrameCtx;

/// Control directive returned by the per-frame callback.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum AppControl {
    Continue,
    Exit,
}

/// Application contract implemented by the binary.
pub trait App {
    /// Called exactly once, after the window and device exist and before
    /// the first frame. All shader compilation and buffer uploads belong
    /// here; a fatal error aborts startup.
    fn on_ready(&mut self, gpu: &Gpu<'_>) -> Result<(), FatalError>;

    /// Called once per rendering-state iteration with that frame's plan.
    /// A fatal error terminates the loop and surfaces to the caller.
    fn on_frame(&mut self, ctx: &mut FrameCtx<'_, '_>) -> Result<AppControl, FatalError>;
}
