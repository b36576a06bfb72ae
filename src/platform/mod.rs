//! Platform abstraction layer
//!
//! Glue between the host and the simulation:
//! - Pointer input events, folded into one `TickInput` per tick
//! - Tick pacing against the wall clock

pub mod input;
pub mod time;

pub use input::{Autopilot, PointerEvent, PointerState};
pub use time::FramePacer;
