//! Input events consumed by the frame loop.
//!
//! The public surface is platform-agnostic: the window runtime translates
//! platform events into [`Event`]s, and handling policy lives in an
//! explicit [`EventDispatch`] table rather than a process-wide callback.

mod dispatch;
mod types;

pub use dispatch::{EventDispatch, Reaction};
pub use types::{Event, Key};
