//! Static GPU buffers.
//!
//! A [`GeometryBuffer`] is uploaded once and never written again. [`IndexedGeometry`] ties a
//! set of attribute buffers to the attribute locations of a program, the way a canvas hands
//! named arrays (`position`, `color`, ...) to its shader.

use std::sync::Arc;

use glow::HasContext;

use crate::abs::ShaderProgram;

/// An immutable buffer of `f32` attributes or `u32` indices.
pub struct GeometryBuffer {
    gl: Arc<glow::Context>,
    id: glow::Buffer,
    target: u32,
    components: i32,
    len: usize,
}

impl GeometryBuffer {
    /// Uploads vertex attributes with `components` floats per vertex.
    pub fn attribute(
        gl: &Arc<glow::Context>,
        data: &[f32],
        components: i32,
    ) -> anyhow::Result<Self> {
        Self::upload(
            gl,
            glow::ARRAY_BUFFER,
            bytemuck::cast_slice(data),
            components,
            data.len(),
        )
    }

    /// Uploads triangle indices.
    pub fn indices(gl: &Arc<glow::Context>, data: &[u32]) -> anyhow::Result<Self> {
        Self::upload(
            gl,
            glow::ELEMENT_ARRAY_BUFFER,
            bytemuck::cast_slice(data),
            1,
            data.len(),
        )
    }

    fn upload(
        gl: &Arc<glow::Context>,
        target: u32,
        bytes: &[u8],
        components: i32,
        len: usize,
    ) -> anyhow::Result<Self> {
        unsafe {
            let id = gl.create_buffer().map_err(anyhow::Error::msg)?;
            gl.bind_buffer(target, Some(id));
            gl.buffer_data_u8_slice(target, bytes, glow::STATIC_DRAW);
            gl.bind_buffer(target, None);

            Ok(Self {
                gl: Arc::clone(gl),
                id,
                target,
                components,
                len,
            })
        }
    }

    /// Number of values (not vertices) in the buffer.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn bind(&self) {
        unsafe {
            self.gl.bind_buffer(self.target, Some(self.id));
        }
    }

    /// Feeds this buffer to the attribute at `location`.
    fn bind_attribute(&self, location: u32) {
        unsafe {
            self.bind();
            self.gl.enable_vertex_attrib_array(location);
            self.gl
                .vertex_attrib_pointer_f32(location, self.components, glow::FLOAT, false, 0, 0);
        }
    }
}

impl Drop for GeometryBuffer {
    fn drop(&mut self) {
        unsafe {
            self.gl.delete_buffer(self.id);
        }
    }
}

/// Attribute buffers bound to a program's inputs, drawn as an indexed triangle list.
pub struct IndexedGeometry {
    gl: Arc<glow::Context>,
    vao: Option<glow::VertexArray>,
    attributes: Vec<(u32, GeometryBuffer)>,
    indices: GeometryBuffer,
}

impl IndexedGeometry {
    /// Binds every `(name, buffer)` pair to the attribute `name` of `program`.
    ///
    /// Attributes the program does not use (or that the compiler optimized away) are dropped.
    /// With `use_vertex_array` the bindings are recorded once in a vertex array object,
    /// otherwise they are re-established on every draw.
    pub fn new(
        gl: &Arc<glow::Context>,
        program: &ShaderProgram,
        attributes: Vec<(&str, GeometryBuffer)>,
        indices: GeometryBuffer,
        use_vertex_array: bool,
    ) -> anyhow::Result<Self> {
        let attributes = attributes
            .into_iter()
            .filter_map(|(name, buffer)| match program.attrib_location(name) {
                Some(location) => Some((location, buffer)),
                None => {
                    log::debug!("attribute '{name}' is not used by the program");
                    None
                }
            })
            .collect();

        let mut geometry = Self {
            gl: Arc::clone(gl),
            vao: None,
            attributes,
            indices,
        };

        if use_vertex_array {
            unsafe {
                let vao = gl.create_vertex_array().map_err(anyhow::Error::msg)?;
                gl.bind_vertex_array(Some(vao));
                geometry.bind_inputs();
                gl.bind_vertex_array(None);
                gl.bind_buffer(glow::ARRAY_BUFFER, None);
                gl.bind_buffer(glow::ELEMENT_ARRAY_BUFFER, None);
                geometry.vao = Some(vao);
            }
        }

        Ok(geometry)
    }

    fn bind_inputs(&self) {
        for (location, buffer) in &self.attributes {
            buffer.bind_attribute(*location);
        }
        self.indices.bind();
    }

    /// Draws all triangles. The program must be in use.
    pub fn draw(&self) {
        unsafe {
            match self.vao {
                Some(vao) => self.gl.bind_vertex_array(Some(vao)),
                None => self.bind_inputs(),
            }
            self.gl.draw_elements(
                glow::TRIANGLES,
                self.indices.len() as i32,
                glow::UNSIGNED_INT,
                0,
            );
            match self.vao {
                Some(_) => self.gl.bind_vertex_array(None),
                None => {
                    for (location, _) in &self.attributes {
                        self.gl.disable_vertex_attrib_array(*location);
                    }
                }
            }
        }
    }

    /// Number of indices drawn per call.
    pub fn index_count(&self) -> usize {
        self.indices.len()
    }
}

impl Drop for IndexedGeometry {
    fn drop(&mut self) {
        if let Some(vao) = self.vao {
            unsafe {
                self.gl.delete_vertex_array(vao);
            }
        }
    }
}
