//! Window + runtime loop.
//!
//! Owns the `winit` EventLoop and the `GlContext`, and drives the `App`.

mod runtime;

pub use runtime::{Runtime, RuntimeConfig, RuntimeCtx};
