//! Frame timing.
//!
//! The clock observes frame cadence for diagnostics; it never paces frames
//! (presentation's sync interval is the only throttle).

mod frame_clock;

pub use frame_clock::{FrameClock, FrameTime};
