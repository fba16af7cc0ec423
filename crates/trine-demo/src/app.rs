use std::path::PathBuf;

use anyhow::Result;
use glow::HasContext;

use trine_engine::camera::Camera;
use trine_engine::core::{App, AppControl, FrameCtx, WindowCtx};
use trine_engine::geometry::{VertexArray, VertexBuffer, TRIANGLE};
use trine_engine::shader::{load_shaders, ShaderPolicy};
use trine_engine::world::World;

/// Shader sources, relative to the working directory.
pub const VERTEX_SHADER: &str = "shaders/BasicVertexShader.vertexshader";
pub const FRAGMENT_SHADER: &str = "shaders/BasicFragmentShader.fragmentshader";

/// Name of the view-projection uniform in the vertex shader.
const MVP_UNIFORM: &str = "MVP";

/// GL objects created in `on_start`, released in `on_exit`.
struct Resources {
    vao: VertexArray,
    program: glow::Program,
    triangle: VertexBuffer,
    camera: Camera,
}

/// Draws one red triangle every frame and drives a `World`.
pub struct TriangleApp<W: World = ()> {
    vertex_shader: PathBuf,
    fragment_shader: PathBuf,
    policy: ShaderPolicy,
    world: W,
    resources: Option<Resources>,
}

impl TriangleApp {
    pub fn new() -> Self {
        Self::with_world(())
    }
}

impl Default for TriangleApp {
    fn default() -> Self {
        Self::new()
    }
}

impl<W: World> TriangleApp<W> {
    pub fn with_world(world: W) -> Self {
        Self {
            vertex_shader: PathBuf::from(VERTEX_SHADER),
            fragment_shader: PathBuf::from(FRAGMENT_SHADER),
            policy: ShaderPolicy::Permissive,
            world,
            resources: None,
        }
    }
}

impl<W: World> App for TriangleApp<W> {
    fn on_start(&mut self, gl: &glow::Context, window: WindowCtx<'_>) -> Result<()> {
        let vao = VertexArray::new(gl)?;
        let program = load_shaders(gl, &self.vertex_shader, &self.fragment_shader, self.policy)?;
        let triangle = VertexBuffer::upload(gl, &TRIANGLE)?;

        let mut camera = Camera::new(window.aspect_ratio());
        camera.bind(gl, program, MVP_UNIFORM);

        unsafe { gl.clear_color(0.0, 0.0, 0.0, 1.0) };

        self.resources = Some(Resources {
            vao,
            program,
            triangle,
            camera,
        });

        Ok(())
    }

    fn on_frame(&mut self, ctx: &mut FrameCtx<'_>) -> AppControl {
        let Some(res) = self.resources.as_mut() else {
            return AppControl::Exit;
        };
        let gl = ctx.gl;

        ctx.clear();

        unsafe { gl.use_program(Some(res.program)) };
        res.vao.bind(gl);
        res.camera.set_aspect(ctx.window.aspect_ratio());
        res.camera.upload(gl);
        res.triangle.draw(gl);

        self.world.update(ctx.time.dt);
        res.camera.update_view();
        self.world.render(gl, &res.camera);

        if ctx.time.frame_index % 600 == 0 {
            log::debug!("frame {} dt {:.4}s", ctx.time.frame_index, ctx.time.dt);
        }

        AppControl::Continue
    }

    fn on_exit(&mut self, gl: &glow::Context) {
        let Some(res) = self.resources.take() else {
            return;
        };

        unsafe {
            gl.use_program(None);
            gl.delete_program(res.program);
        }
        res.triangle.delete(gl);
        res.vao.delete(gl);
    }
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use trine_engine::geometry::POSITION_ATTRIBUTE;
    use trine_engine::shader::read_source;

    use super::*;

    fn workspace_file(relative: &str) -> PathBuf {
        Path::new(env!("CARGO_MANIFEST_DIR")).join("../..").join(relative)
    }

    #[test]
    fn default_app_reads_the_basic_shaders() {
        let app = TriangleApp::new();
        assert_eq!(app.vertex_shader, Path::new(VERTEX_SHADER));
        assert_eq!(app.fragment_shader, Path::new(FRAGMENT_SHADER));
        assert_eq!(app.policy, ShaderPolicy::Permissive);
        assert!(app.resources.is_none());
    }

    #[test]
    fn vertex_shader_matches_the_buffer_layout() {
        let source = read_source(&workspace_file(VERTEX_SHADER));
        assert!(source.contains(&format!("layout(location = {POSITION_ATTRIBUTE}) in vec3")));
        assert!(source.contains(&format!("uniform mat4 {MVP_UNIFORM};")));
    }

    #[test]
    fn fragment_shader_writes_a_color() {
        let source = read_source(&workspace_file(FRAGMENT_SHADER));
        assert!(source.starts_with("\n#version 330 core"));
        assert!(source.contains("out vec3 color;"));
    }
}
