//! All UI related utilities.
//!
//! This module contains the widgets the demo window is built from (panels, rows, columns,
//! buttons and labels) and a UI renderer that batches their solid rectangles and glyphs.

use glow::HasContext;

use crate::abs::{ShaderProgram, Vertex};

/// A corner of a UI rectangle in window pixels, with its glyph atlas coordinate.
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct UIVertex {
    pub position: [f32; 2],
    pub uv: [f32; 2],
}

const UI_ATTRIBUTES: [(&str, i32); 2] = [("position", 0), ("uv", 2)];

impl Vertex for UIVertex {
    fn vertex_attribs(gl: &glow::Context, program: &ShaderProgram) {
        let stride = std::mem::size_of::<UIVertex>() as i32;
        for (name, offset) in UI_ATTRIBUTES {
            // Solid-only programs may optimize `uv` away.
            let Some(location) = program.attrib_location(name) else {
                continue;
            };
            unsafe {
                gl.enable_vertex_attrib_array(location);
                gl.vertex_attrib_pointer_f32(
                    location,
                    2,
                    glow::FLOAT,
                    false,
                    stride,
                    offset * std::mem::size_of::<f32>() as i32,
                );
            }
        }
    }

    fn disable_attribs(gl: &glow::Context, program: &ShaderProgram) {
        for (name, _) in UI_ATTRIBUTES {
            if let Some(location) = program.attrib_location(name) {
                unsafe {
                    gl.disable_vertex_attrib_array(location);
                }
            }
        }
    }
}

pub mod uirenderer;
pub mod widgets;
