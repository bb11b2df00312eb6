//! The UI renderer for the demo window.

use std::sync::Arc;

use glam::{Mat4, Vec2, Vec4};
use glcanvas_core::{Backend, BitmapFont, ProgramKind};
use glow::HasContext;

use crate::{
    abs::{Mesh, ShaderProgram, Texture},
    render::ui::UIVertex,
};

/// How the pixels of a [`DrawCommand`] are colored.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum UIRenderMode {
    /// A flat color.
    Color(Vec4),
    /// The glyph atlas, tinted with the given color.
    Text(Vec4),
}

/// A draw command for rendering a UI rectangle.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DrawCommand {
    /// Top-left and bottom-right corners in window pixels.
    pub rect: [Vec2; 2],
    /// Atlas coordinates of the top-left and bottom-right corners. Unused by
    /// [`UIRenderMode::Color`].
    pub uv_rect: [Vec2; 2],
    pub mode: UIRenderMode,
}

impl DrawCommand {
    pub fn solid(rect: [Vec2; 2], color: Vec4) -> Self {
        Self {
            rect,
            uv_rect: [Vec2::ZERO; 2],
            mode: UIRenderMode::Color(color),
        }
    }
}

/// Orthographic projection with the origin in the top-left corner of the window.
pub fn window_projection(width: u32, height: u32) -> Mat4 {
    Mat4::orthographic_rh_gl(0.0, width as f32, height as f32, 0.0, -1.0, 1.0)
}

/// Vertices and indices of one rectangle whose first vertex lands at `base_index`.
fn quad(rect: [Vec2; 2], uv_rect: [Vec2; 2], base_index: u32) -> ([UIVertex; 4], [u32; 6]) {
    let [min, max] = rect;
    let [uv_min, uv_max] = uv_rect;
    let vertices = [
        UIVertex {
            position: [max.x, min.y],
            uv: [uv_max.x, uv_min.y],
        },
        UIVertex {
            position: [min.x, min.y],
            uv: [uv_min.x, uv_min.y],
        },
        UIVertex {
            position: [min.x, max.y],
            uv: [uv_min.x, uv_max.y],
        },
        UIVertex {
            position: [max.x, max.y],
            uv: [uv_max.x, uv_max.y],
        },
    ];
    let indices = [
        base_index,
        base_index + 1,
        base_index + 2,
        base_index,
        base_index + 2,
        base_index + 3,
    ];
    (vertices, indices)
}

/// The UI renderer for rendering 2D elements on the screen.
///
/// Consecutive commands with the same [`UIRenderMode`] are batched into one draw call.
pub struct UIRenderer {
    gl: Arc<glow::Context>,
    shader_program: ShaderProgram,
    pub projection_matrix: Mat4,
    vao: Option<glow::VertexArray>,
    mesh: Mesh,
    glyph_atlas: Texture,
    batch_mode: Option<UIRenderMode>,
    vertices: Vec<UIVertex>,
    indices: Vec<u32>,
}

impl UIRenderer {
    /// Creates a new UI renderer for a `width`×`height` window and uploads the glyph atlas.
    pub fn new(
        gl: &Arc<glow::Context>,
        backend: Backend,
        width: u32,
        height: u32,
    ) -> anyhow::Result<Self> {
        let shader_program = ShaderProgram::build(gl, backend, ProgramKind::Ui)?;
        let mesh = Mesh::new::<UIVertex>(gl, &[], &[], glow::TRIANGLES)?;
        let vao = if backend.has_vertex_arrays() {
            Some(unsafe { gl.create_vertex_array().map_err(anyhow::Error::msg)? })
        } else {
            None
        };

        let glyph_atlas = Texture::from_image(gl, backend, BitmapFont::default().atlas_image()?)?;
        glyph_atlas.set_nearest_filtering();

        Ok(Self {
            gl: Arc::clone(gl),
            shader_program,
            projection_matrix: window_projection(width, height),
            vao,
            mesh,
            glyph_atlas,
            batch_mode: None,
            vertices: Vec::new(),
            indices: Vec::new(),
        })
    }

    /// Adds a draw command to the UI renderer.
    pub fn add_command(&mut self, command: DrawCommand) {
        if self.batch_mode.is_some_and(|mode| mode != command.mode) {
            self.finish();
        }
        self.batch_mode = Some(command.mode);

        let (vertices, indices) = quad(command.rect, command.uv_rect, self.vertices.len() as u32);
        self.vertices.extend_from_slice(&vertices);
        self.indices.extend_from_slice(&indices);
    }

    /// Draws and clears the current batch.
    pub fn finish(&mut self) {
        self.draw_batch();
        self.vertices.clear();
        self.indices.clear();
        self.batch_mode = None;
    }

    fn draw_batch(&mut self) {
        let Some(mode) = self.batch_mode else {
            return;
        };
        if self.indices.is_empty() {
            return;
        }

        self.mesh.update(&self.vertices, &self.indices);

        self.shader_program.use_program();
        self.shader_program
            .set_uniform("u_projection", self.projection_matrix);

        let text = match mode {
            UIRenderMode::Color(color) => {
                self.shader_program.set_uniform("u_solid", 1);
                self.shader_program.set_uniform("u_color", color);
                false
            }
            UIRenderMode::Text(color) => {
                self.shader_program.set_uniform("u_solid", 0);
                self.shader_program.set_uniform("u_color", color);
                self.glyph_atlas.bind(0);
                self.shader_program.set_uniform("u_glyphs", 0);
                true
            }
        };

        unsafe {
            if text {
                self.gl.enable(glow::BLEND);
                self.gl
                    .blend_func(glow::SRC_ALPHA, glow::ONE_MINUS_SRC_ALPHA);
            }
            if self.vao.is_some() {
                self.gl.bind_vertex_array(self.vao);
            }
        }
        self.mesh.draw::<UIVertex>(&self.shader_program);
        unsafe {
            if self.vao.is_some() {
                self.gl.bind_vertex_array(None);
            }
            if text {
                self.gl.disable(glow::BLEND);
            }
        }
    }
}

impl Drop for UIRenderer {
    fn drop(&mut self) {
        if let Some(vao) = self.vao {
            unsafe {
                self.gl.delete_vertex_array(vao);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quad_covers_rect_with_two_triangles() {
        let uv_rect = [Vec2::new(0.25, 0.5), Vec2::new(0.5, 0.75)];
        let (vertices, indices) = quad([Vec2::new(1.0, 2.0), Vec2::new(5.0, 8.0)], uv_rect, 4);
        assert_eq!(vertices[0].position, [5.0, 2.0]);
        assert_eq!(vertices[1].position, [1.0, 2.0]);
        assert_eq!(vertices[2].position, [1.0, 8.0]);
        assert_eq!(vertices[3].position, [5.0, 8.0]);
        assert_eq!(indices, [4, 5, 6, 4, 6, 7]);

        // The top edge of the rect samples the top edge of the glyph cell.
        assert_eq!(vertices[1].uv, [0.25, 0.5]);
        assert_eq!(vertices[3].uv, [0.5, 0.75]);
    }

    #[test]
    fn test_solid_command_uses_color_mode() {
        let command = DrawCommand::solid([Vec2::ZERO, Vec2::ONE], Vec4::X);
        assert_eq!(command.mode, UIRenderMode::Color(Vec4::X));
        assert_ne!(command.mode, UIRenderMode::Text(Vec4::X));
    }

    #[test]
    fn test_window_projection_maps_corners() {
        let projection = window_projection(1000, 800);
        let top_left = projection.project_point3(glam::Vec3::ZERO);
        let bottom_right = projection.project_point3(glam::Vec3::new(1000.0, 800.0, 0.0));
        assert!((top_left.x + 1.0).abs() < 1e-6 && (top_left.y - 1.0).abs() < 1e-6);
        assert!((bottom_right.x - 1.0).abs() < 1e-6 && (bottom_right.y + 1.0).abs() < 1e-6);
    }
}
