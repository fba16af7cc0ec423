use std::path::PathBuf;

use super::StageKind;

#[derive(Debug, thiserror::Error)]
pub enum ShaderError {
    /// The driver refused to create a shader or program object.
    #[error("failed to create {what}: {reason}")]
    Create { what: &'static str, reason: String },

    #[error("failed to compile {} shader {}:\n{log}", .kind.label(), .path.display())]
    Compile {
        kind: StageKind,
        path: PathBuf,
        log: String,
    },

    #[error("failed to link shader program:\n{log}")]
    Link { log: String },
}
