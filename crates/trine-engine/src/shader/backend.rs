use glow::HasContext;

/// Pipeline stage a shader object is compiled for.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum StageKind {
    Vertex,
    Fragment,
}

impl StageKind {
    pub fn gl_enum(self) -> u32 {
        match self {
            StageKind::Vertex => glow::VERTEX_SHADER,
            StageKind::Fragment => glow::FRAGMENT_SHADER,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            StageKind::Vertex => "vertex",
            StageKind::Fragment => "fragment",
        }
    }
}

/// Status and info log of a compile or link step.
#[derive(Debug, Clone, Default, Eq, PartialEq)]
pub struct Diagnostics {
    pub success: bool,
    pub log: String,
}

/// The handful of GL calls the program builder needs.
///
/// Implemented for `glow::Context`. Keeping the builder behind this trait lets
/// it run without a driver.
pub trait ShaderBackend {
    type Stage: Copy;
    type Program: Copy;

    fn create_stage(&self, kind: StageKind) -> Result<Self::Stage, String>;

    /// Uploads `source`, compiles, and returns the compile status and info log.
    fn compile_stage(&self, stage: Self::Stage, source: &str) -> Diagnostics;

    fn delete_stage(&self, stage: Self::Stage);

    fn create_program(&self) -> Result<Self::Program, String>;

    /// Attaches `stages`, links, detaches them again and returns the link
    /// status and info log.
    fn link_program(&self, program: Self::Program, stages: &[Self::Stage]) -> Diagnostics;

    fn delete_program(&self, program: Self::Program);
}

impl ShaderBackend for glow::Context {
    type Stage = glow::Shader;
    type Program = glow::Program;

    fn create_stage(&self, kind: StageKind) -> Result<glow::Shader, String> {
        unsafe { self.create_shader(kind.gl_enum()) }
    }

    fn compile_stage(&self, stage: glow::Shader, source: &str) -> Diagnostics {
        unsafe {
            self.shader_source(stage, source);
            self.compile_shader(stage);
            Diagnostics {
                success: self.get_shader_compile_status(stage),
                log: self.get_shader_info_log(stage),
            }
        }
    }

    fn delete_stage(&self, stage: glow::Shader) {
        unsafe { self.delete_shader(stage) }
    }

    fn create_program(&self) -> Result<glow::Program, String> {
        unsafe { HasContext::create_program(self) }
    }

    fn link_program(&self, program: glow::Program, stages: &[glow::Shader]) -> Diagnostics {
        unsafe {
            for &stage in stages {
                self.attach_shader(program, stage);
            }

            HasContext::link_program(self, program);

            let diagnostics = Diagnostics {
                success: self.get_program_link_status(program),
                log: self.get_program_info_log(program),
            };

            for &stage in stages {
                self.detach_shader(program, stage);
            }

            diagnostics
        }
    }

    fn delete_program(&self, program: glow::Program) {
        unsafe { HasContext::delete_program(self, program) }
    }
}
