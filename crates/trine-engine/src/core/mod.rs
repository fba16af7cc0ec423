//! Core engine-facing contracts.
//!
//! This module defines the interface between the runtime (platform loop) and
//! the application, plus the loop's exit condition.

mod app;
mod ctx;
mod exit;

pub use app::{App, AppControl};
pub use ctx::{FrameCtx, WindowCtx};
pub use exit::should_exit;
