//! Platform abstraction layer
//!
//! Handles the parts of a frame that come from the outside world:
//! - Time (monotonic frame clock, fixed-step accumulator)
//! - Input (held keys to tick input, restart edge detection)

pub mod input;
pub mod time;

pub use input::{Controls, KeyState};
pub use time::{FixedStep, FrameClock};
