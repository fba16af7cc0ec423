//! Shader program building.
//!
//! Reads GLSL sources from disk, compiles a vertex and a fragment stage,
//! links them and surfaces every compiler and linker message through `log`.

mod backend;
mod builder;
mod error;
mod source;

pub use backend::{Diagnostics, ShaderBackend, StageKind};
pub use builder::{load_shaders, ShaderPolicy};
pub use error::ShaderError;
pub use source::read_source;
