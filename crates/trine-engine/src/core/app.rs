use anyhow::Result;
use winit::event::WindowEvent;

use super::ctx::{FrameCtx, WindowCtx};

/// Control directive returned by app callbacks.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum AppControl {
    Continue,
    Exit,
}

/// Application contract implemented by higher layers.
pub trait App {
    /// Called once, after the context is current and before the first frame.
    ///
    /// An error here aborts the runtime.
    fn on_start(&mut self, gl: &glow::Context, window: WindowCtx<'_>) -> Result<()>;

    /// Called for raw window events, after the runtime has updated input state.
    fn on_window_event(&mut self, event: &WindowEvent) -> AppControl {
        let _ = event;
        AppControl::Continue
    }

    /// Called once per frame. The runtime presents afterwards.
    fn on_frame(&mut self, ctx: &mut FrameCtx<'_>) -> AppControl;

    /// Called once when the loop stops, while the context is still current.
    fn on_exit(&mut self, gl: &glow::Context) {
        let _ = gl;
    }
}
