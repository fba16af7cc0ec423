//! Time subsystem.
//!
//! One `FrameClock` per render loop; call `tick()` once per presented frame
//! to obtain the delta time handed to `World::update`.

mod frame_clock;

pub use frame_clock::{FrameClock, FrameTime};
