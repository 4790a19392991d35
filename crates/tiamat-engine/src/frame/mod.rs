//! Frame loop driver and per-frame plan.
//!
//! The driver is pure CPU state: the Idle/Rendering/Terminated machine, the
//! animated clear color, and the scene's draw ranges. Executing a plan
//! against the GPU lives in [`crate::render`].

mod driver;
mod plan;
mod pulse;

pub use driver::{LoopDriver, LoopState, Pump};
pub use plan::{DrawRange, FrameCmd, FramePlan};
pub use pulse::ClearPulse;
