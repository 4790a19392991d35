use crate::device::Gpu;
use crate::frame::FramePlan;
use crate::time::FrameTime;

/// Per-frame context passed to [`super::App::on_frame`].
///
/// Lifetimes:
/// - `'a` is the duration of the callback invocation
/// - `'w` is the window-borrow lifetime carried by `Gpu<'w>`
pub struct FrameCtx<'a, 'w> {
    pub gpu: &'a Gpu<'w>,
    pub plan: &'a FramePlan,
    pub time: FrameTime,
}
