use anyhow::{ensure, Context, Result};
use glow::HasContext;

/// Floats per vertex: tightly packed `vec3` positions.
pub const POSITION_COMPONENTS: usize = 3;

/// Attribute slot the vertex shader reads positions from (`layout(location = 0)`).
pub const POSITION_ATTRIBUTE: u32 = 0;

/// Vertex array object.
///
/// A core profile refuses to draw without one bound, even when all attribute
/// state is set per draw.
#[derive(Debug)]
pub struct VertexArray {
    vao: glow::VertexArray,
}

impl VertexArray {
    /// Creates a VAO and leaves it bound.
    pub fn new(gl: &glow::Context) -> Result<Self> {
        let vao = unsafe { gl.create_vertex_array() }
            .map_err(anyhow::Error::msg)
            .context("failed to create vertex array")?;

        unsafe { gl.bind_vertex_array(Some(vao)) };

        Ok(Self { vao })
    }

    pub fn bind(&self, gl: &glow::Context) {
        unsafe { gl.bind_vertex_array(Some(self.vao)) };
    }

    pub fn delete(self, gl: &glow::Context) {
        unsafe {
            gl.bind_vertex_array(None);
            gl.delete_vertex_array(self.vao);
        }
    }
}

/// GPU-resident position data, uploaded once with `STATIC_DRAW`.
#[derive(Debug)]
pub struct VertexBuffer {
    buffer: glow::Buffer,
    vertex_count: i32,
}

impl VertexBuffer {
    /// Uploads `positions` (`x, y, z` per vertex).
    pub fn upload(gl: &glow::Context, positions: &[f32]) -> Result<Self> {
        let vertex_count = vertex_count(positions)?;

        let buffer = unsafe { gl.create_buffer() }
            .map_err(anyhow::Error::msg)
            .context("failed to create vertex buffer")?;

        unsafe {
            gl.bind_buffer(glow::ARRAY_BUFFER, Some(buffer));
            gl.buffer_data_u8_slice(
                glow::ARRAY_BUFFER,
                bytemuck::cast_slice(positions),
                glow::STATIC_DRAW,
            );
        }

        log::debug!("uploaded {vertex_count} vertices ({} bytes)", size_of_val(positions));

        Ok(Self {
            buffer,
            vertex_count,
        })
    }

    /// Draws the buffer as a triangle list with the currently bound program.
    pub fn draw(&self, gl: &glow::Context) {
        unsafe {
            gl.enable_vertex_attrib_array(POSITION_ATTRIBUTE);
            gl.bind_buffer(glow::ARRAY_BUFFER, Some(self.buffer));
            gl.vertex_attrib_pointer_f32(
                POSITION_ATTRIBUTE,
                POSITION_COMPONENTS as i32,
                glow::FLOAT,
                false,
                0,
                0,
            );

            gl.draw_arrays(glow::TRIANGLES, 0, self.vertex_count);
            gl.disable_vertex_attrib_array(POSITION_ATTRIBUTE);
        }
    }

    pub fn delete(self, gl: &glow::Context) {
        unsafe { gl.delete_buffer(self.buffer) };
    }
}

fn vertex_count(positions: &[f32]) -> Result<i32> {
    ensure!(
        positions.len() % POSITION_COMPONENTS == 0,
        "position data length {} is not a multiple of {POSITION_COMPONENTS}",
        positions.len()
    );

    i32::try_from(positions.len() / POSITION_COMPONENTS).context("too many vertices for one draw call")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::TRIANGLE;

    #[test]
    fn triangle_has_three_vertices() {
        assert_eq!(vertex_count(&TRIANGLE).unwrap(), 3);
    }

    #[test]
    fn partial_vertex_is_rejected() {
        let err = vertex_count(&[0.0; 7]).unwrap_err();
        assert!(err.to_string().contains("not a multiple of 3"));
    }

    #[test]
    fn empty_data_is_zero_vertices() {
        assert_eq!(vertex_count(&[]).unwrap(), 0);
    }

    #[test]
    fn upload_bytes_are_tightly_packed() {
        let bytes: &[u8] = bytemuck::cast_slice(&TRIANGLE);
        assert_eq!(bytes.len(), 36);
        assert_eq!(&bytes[0..4], &(-1.0f32).to_ne_bytes());
    }
}
