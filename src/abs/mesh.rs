//! Mesh management module.
//!
//! This module defines the [`Mesh`] struct for geometry that is rebuilt while the program
//! runs, such as the batched quads of the widget layer. Vertices should implement the
//! [`Vertex`] trait.

use std::sync::Arc;

use glow::HasContext;

use crate::abs::ShaderProgram;

/// Trait that defines the necessary methods for a vertex.
pub trait Vertex: bytemuck::Pod {
    /// Sets up the vertex attribute pointers for the vertex, looking the attributes up on
    /// `program`.
    fn vertex_attribs(gl: &glow::Context, program: &ShaderProgram);

    /// Disables what [`Vertex::vertex_attribs`] enabled.
    fn disable_attribs(gl: &glow::Context, program: &ShaderProgram);
}

/// Represents a mesh stored on the GPU side.
pub struct Mesh {
    gl: Arc<glow::Context>,
    draw_mode: u32,
    vbo: glow::Buffer,
    ebo: glow::Buffer,
    index_count: usize,
}

impl Mesh {
    /// Creates a new mesh from the given vertex and index data.
    pub fn new<V: Vertex>(
        gl: &Arc<glow::Context>,
        vertices: &[V],
        indices: &[u32],
        draw_mode: u32,
    ) -> anyhow::Result<Self> {
        unsafe {
            let vbo = gl.create_buffer().map_err(anyhow::Error::msg)?;
            let ebo = gl.create_buffer().map_err(anyhow::Error::msg)?;

            let mut mesh = Self {
                gl: Arc::clone(gl),
                draw_mode,
                vbo,
                ebo,
                index_count: 0,
            };
            mesh.update(vertices, indices);
            Ok(mesh)
        }
    }

    /// Updates the mesh.
    pub fn update<V: Vertex>(&mut self, vertices: &[V], indices: &[u32]) {
        unsafe {
            self.index_count = indices.len();

            self.gl.bind_buffer(glow::ARRAY_BUFFER, Some(self.vbo));
            self.gl.buffer_data_u8_slice(
                glow::ARRAY_BUFFER,
                bytemuck::cast_slice(vertices),
                glow::DYNAMIC_DRAW,
            );

            self.gl.bind_buffer(glow::ELEMENT_ARRAY_BUFFER, Some(self.ebo));
            self.gl.buffer_data_u8_slice(
                glow::ELEMENT_ARRAY_BUFFER,
                bytemuck::cast_slice(indices),
                glow::DYNAMIC_DRAW,
            );

            self.gl.bind_buffer(glow::ARRAY_BUFFER, None);
            self.gl.bind_buffer(glow::ELEMENT_ARRAY_BUFFER, None);
        }
    }

    /// Draws the mesh with `program`, which must be in use. A vertex array object, if the
    /// backend needs one, must be bound by the caller.
    pub fn draw<V: Vertex>(&self, program: &ShaderProgram) {
        unsafe {
            self.gl.bind_buffer(glow::ARRAY_BUFFER, Some(self.vbo));
            self.gl.bind_buffer(glow::ELEMENT_ARRAY_BUFFER, Some(self.ebo));
            V::vertex_attribs(&self.gl, program);
            self.gl.draw_elements(
                self.draw_mode,
                self.index_count as i32,
                glow::UNSIGNED_INT,
                0,
            );
            V::disable_attribs(&self.gl, program);
            self.gl.bind_buffer(glow::ARRAY_BUFFER, None);
        }
    }
}

impl Drop for Mesh {
    fn drop(&mut self) {
        unsafe {
            self.gl.delete_buffer(self.vbo);
            self.gl.delete_buffer(self.ebo);
        }
    }
}
