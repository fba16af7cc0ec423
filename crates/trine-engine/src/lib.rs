//! trine engine crate.
//!
//! Window, OpenGL context and frame loop plumbing for the triangle demo:
//! context creation and loader checks, shader program building, static
//! geometry upload, a fixed camera and the `World` hook.

pub mod core;
pub mod device;
pub mod input;
pub mod time;
pub mod window;

pub mod camera;
pub mod geometry;
pub mod logging;
pub mod shader;
pub mod world;
