use std::path::Path;

use super::{read_source, Diagnostics, ShaderBackend, ShaderError, StageKind};

/// What to do when a stage fails to compile or the program fails to link.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub enum ShaderPolicy {
    /// Log the diagnostics and hand back the program anyway. Drawing with a
    /// broken program renders nothing, but the loop keeps running, which is
    /// convenient while editing shaders.
    #[default]
    Permissive,

    /// Release everything and return an error.
    Strict,
}

/// Builds a program from a vertex and a fragment shader file.
///
/// Both info logs and the link log are fetched and logged whether or not the
/// step succeeded. The stage objects are deleted before returning; only the
/// program survives.
pub fn load_shaders<B: ShaderBackend>(
    backend: &B,
    vertex_path: &Path,
    fragment_path: &Path,
    policy: ShaderPolicy,
) -> Result<B::Program, ShaderError> {
    let vertex = create_stage(backend, StageKind::Vertex)?;
    let fragment = match create_stage(backend, StageKind::Fragment) {
        Ok(stage) => stage,
        Err(e) => {
            backend.delete_stage(vertex);
            return Err(e);
        }
    };

    let result = build(backend, vertex, fragment, vertex_path, fragment_path, policy);

    backend.delete_stage(vertex);
    backend.delete_stage(fragment);

    result
}

fn create_stage<B: ShaderBackend>(backend: &B, kind: StageKind) -> Result<B::Stage, ShaderError> {
    backend.create_stage(kind).map_err(|reason| ShaderError::Create {
        what: match kind {
            StageKind::Vertex => "vertex shader",
            StageKind::Fragment => "fragment shader",
        },
        reason,
    })
}

fn build<B: ShaderBackend>(
    backend: &B,
    vertex: B::Stage,
    fragment: B::Stage,
    vertex_path: &Path,
    fragment_path: &Path,
    policy: ShaderPolicy,
) -> Result<B::Program, ShaderError> {
    let mut first_failure = None;

    for (stage, kind, path) in [
        (vertex, StageKind::Vertex, vertex_path),
        (fragment, StageKind::Fragment, fragment_path),
    ] {
        log::info!("Compiling {} shader: {}", kind.label(), path.display());

        let source = read_source(path);
        let diagnostics = backend.compile_stage(stage, &source);
        report(&format!("{} shader {}", kind.label(), path.display()), &diagnostics);

        if !diagnostics.success && first_failure.is_none() {
            first_failure = Some(ShaderError::Compile {
                kind,
                path: path.to_path_buf(),
                log: diagnostics.log,
            });
        }
    }

    log::info!("Linking program");

    let program = backend.create_program().map_err(|reason| ShaderError::Create {
        what: "program",
        reason,
    })?;

    let diagnostics = backend.link_program(program, &[vertex, fragment]);
    report("program", &diagnostics);

    if !diagnostics.success && first_failure.is_none() {
        first_failure = Some(ShaderError::Link {
            log: diagnostics.log,
        });
    }

    match (policy, first_failure) {
        (ShaderPolicy::Strict, Some(err)) => {
            backend.delete_program(program);
            Err(err)
        }
        (ShaderPolicy::Permissive, Some(err)) => {
            log::warn!("continuing with an unusable program: {err}");
            Ok(program)
        }
        (_, None) => Ok(program),
    }
}

fn report(what: &str, diagnostics: &Diagnostics) {
    let log = diagnostics.log.trim();

    match (diagnostics.success, log.is_empty()) {
        (true, true) => log::debug!("{what}: ok"),
        (true, false) => log::warn!("{what}:\n{log}"),
        (false, true) => log::error!("{what}: failed without a log"),
        (false, false) => log::error!("{what}:\n{log}"),
    }
}
