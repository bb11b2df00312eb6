//! Module to work with OpenGL framebuffers.
//!
//! This module provides the [`OffscreenTarget`], a framebuffer with a color texture attached
//! that a full-screen quad can be drawn into. The target is transient: after its pass it is
//! turned into the texture it rendered, and the framebuffer object goes away.

use std::sync::Arc;

use anyhow::{Context, bail};
use glcanvas_core::StateGuard;
use glow::HasContext;

use crate::abs::{GlState, IndexedGeometry, ShaderProgram, Texture};

/// Owns a framebuffer object.
struct Framebuffer {
    gl: Arc<glow::Context>,
    fbo: glow::Framebuffer,
}

impl Drop for Framebuffer {
    fn drop(&mut self) {
        unsafe {
            self.gl.delete_framebuffer(self.fbo);
        }
    }
}

/// A framebuffer rendering into a destination texture.
pub struct OffscreenTarget {
    state: GlState,
    framebuffer: Framebuffer,
    color_tex: Texture,
}

impl OffscreenTarget {
    /// Creates a target with a `width`×`height` RGBA color texture.
    pub fn new(gl: &Arc<glow::Context>, width: u32, height: u32) -> anyhow::Result<Self> {
        let color_tex = Texture::empty(gl, width, height).context("offscreen color texture")?;
        unsafe {
            let fbo = gl.create_framebuffer().map_err(anyhow::Error::msg)?;
            let framebuffer = Framebuffer {
                gl: Arc::clone(gl),
                fbo,
            };

            gl.bind_framebuffer(glow::FRAMEBUFFER, Some(fbo));
            gl.framebuffer_texture_2d(
                glow::FRAMEBUFFER,
                glow::COLOR_ATTACHMENT0,
                glow::TEXTURE_2D,
                Some(color_tex.id()),
                0,
            );
            gl.bind_framebuffer(glow::FRAMEBUFFER, None);

            Ok(Self {
                state: GlState::new(gl),
                framebuffer,
                color_tex,
            })
        }
    }

    /// Draws `quad` with `program`, sampling `source` on unit 0, into the destination texture.
    ///
    /// Viewport, scissor box, depth and stencil testing and the framebuffer binding are the
    /// same after this call as before it, whether it succeeds or not.
    pub fn render(
        &self,
        program: &ShaderProgram,
        quad: &IndexedGeometry,
        source: &Texture,
    ) -> anyhow::Result<()> {
        let gl = &self.framebuffer.gl;
        let _guard = StateGuard::offscreen(
            &self.state,
            self.color_tex.width() as i32,
            self.color_tex.height() as i32,
        );

        unsafe {
            gl.bind_framebuffer(glow::FRAMEBUFFER, Some(self.framebuffer.fbo));
            let status = gl.check_framebuffer_status(glow::FRAMEBUFFER);
            if status != glow::FRAMEBUFFER_COMPLETE {
                bail!("offscreen framebuffer incomplete (status {status:#x})");
            }

            gl.clear_color(0.0, 0.0, 0.0, 0.0);
            gl.clear(glow::COLOR_BUFFER_BIT);
        }

        program.use_program();
        source.bind(0);
        program.set_uniform("source", 0);
        quad.draw();

        log::debug!(
            "rendered {}x{} offscreen copy",
            self.color_tex.width(),
            self.color_tex.height()
        );
        Ok(())
    }

    /// Releases the framebuffer and returns the rendered texture with fresh mipmaps.
    pub fn into_texture(self) -> Texture {
        let Self {
            framebuffer,
            color_tex,
            ..
        } = self;
        drop(framebuffer);
        color_tex.generate_mipmaps();
        color_tex
    }
}
