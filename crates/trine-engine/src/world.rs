//! World hook driven by the frame loop.

use crate::camera::Camera;

/// Per-frame simulation and rendering hook.
///
/// The frame loop calls `update` with the raw frame delta, recomputes the
/// camera view, then calls `render`. Both default to doing nothing.
pub trait World {
    fn update(&mut self, dt: f32) {
        let _ = dt;
    }

    fn render(&self, gl: &glow::Context, camera: &Camera) {
        let _ = (gl, camera);
    }
}

/// The empty world.
impl World for () {}
