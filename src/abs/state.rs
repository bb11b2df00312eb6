//! Render state queries on a live context, for use with [`glcanvas_core::StateGuard`].

use std::sync::Arc;

use glcanvas_core::{Capability, Rect, RenderState};
use glow::HasContext;

fn capability(cap: Capability) -> u32 {
    match cap {
        Capability::DepthTest => glow::DEPTH_TEST,
        Capability::StencilTest => glow::STENCIL_TEST,
        Capability::ScissorTest => glow::SCISSOR_TEST,
    }
}

/// The [`RenderState`] of an OpenGL context.
#[derive(Clone)]
pub struct GlState {
    gl: Arc<glow::Context>,
}

impl GlState {
    pub fn new(gl: &Arc<glow::Context>) -> Self {
        Self { gl: Arc::clone(gl) }
    }

    fn rect(&self, parameter: u32) -> Rect {
        let mut values = [0; 4];
        unsafe {
            self.gl.get_parameter_i32_slice(parameter, &mut values);
        }
        Rect::new(values[0], values[1], values[2], values[3])
    }
}

impl RenderState for GlState {
    fn viewport(&self) -> Rect {
        self.rect(glow::VIEWPORT)
    }

    fn set_viewport(&self, rect: Rect) {
        unsafe {
            self.gl.viewport(rect.x, rect.y, rect.width, rect.height);
        }
    }

    fn scissor(&self) -> Rect {
        self.rect(glow::SCISSOR_BOX)
    }

    fn set_scissor(&self, rect: Rect) {
        unsafe {
            self.gl.scissor(rect.x, rect.y, rect.width, rect.height);
        }
    }

    fn is_enabled(&self, cap: Capability) -> bool {
        unsafe { self.gl.is_enabled(capability(cap)) }
    }

    fn set_enabled(&self, cap: Capability, enabled: bool) {
        unsafe {
            if enabled {
                self.gl.enable(capability(cap));
            } else {
                self.gl.disable(capability(cap));
            }
        }
    }

    fn bind_default_framebuffer(&self) {
        unsafe {
            self.gl.bind_framebuffer(glow::FRAMEBUFFER, None);
        }
    }
}
