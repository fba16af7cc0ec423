use glow::HasContext;
use winit::window::Window;

use crate::input::InputState;
use crate::time::FrameTime;
use crate::window::RuntimeCtx;

/// Window handle and immutable window metadata.
#[derive(Clone, Copy)]
pub struct WindowCtx<'a> {
    pub window: &'a Window,
}

impl<'a> WindowCtx<'a> {
    /// Returns the drawable size as `(width, height)` in physical pixels.
    pub fn physical_size(&self) -> (u32, u32) {
        let size = self.window.inner_size();
        (size.width, size.height)
    }

    pub fn aspect_ratio(&self) -> f32 {
        let (w, h) = self.physical_size();
        crate::camera::aspect_ratio(w, h)
    }
}

/// Per-frame context passed to `core::App::on_frame`.
pub struct FrameCtx<'a> {
    pub window: WindowCtx<'a>,
    pub gl: &'a glow::Context,
    pub input: &'a InputState,
    pub time: FrameTime,
    pub runtime: &'a mut RuntimeCtx,
}

impl<'a> FrameCtx<'a> {
    /// Clears the color and depth buffers of the default framebuffer.
    pub fn clear(&self) {
        unsafe {
            self.gl.clear(glow::COLOR_BUFFER_BIT | glow::DEPTH_BUFFER_BIT);
        }
    }
}
