//! SDL2 and OpenGL application management.
//!
//! This module defines the [`App`] struct which encapsulates the SDL2
//! and OpenGL context necessary for creating a windowed application.

use std::sync::Arc;

use anyhow::Context;
use glcanvas_core::Backend;

/// The [`App`] struct encapsulates the SDL2 and OpenGL context.
pub struct App {
    pub sdl: sdl2::Sdl,
    pub video_subsystem: sdl2::VideoSubsystem,
    pub window: sdl2::video::Window,
    pub gl_context: sdl2::video::GLContext,
    pub gl: Arc<glow::Context>,
    pub event_pump: sdl2::EventPump,
    pub backend: Backend,
}

impl App {
    /// Creates a new [`App`] instance with the specified title, width and height, and a
    /// context speaking `backend`.
    pub fn new(
        title: &str,
        width: u32,
        height: u32,
        backend: Backend,
        vsync: bool,
    ) -> anyhow::Result<Self> {
        let sdl = sdl2::init().map_err(anyhow::Error::msg)?;
        let video_subsystem = sdl.video().map_err(anyhow::Error::msg)?;

        let gl_attr = video_subsystem.gl_attr();
        gl_attr.set_context_profile(if backend.is_gles() {
            sdl2::video::GLProfile::GLES
        } else {
            sdl2::video::GLProfile::Core
        });
        let (major, minor) = backend.context_version();
        gl_attr.set_context_version(major, minor);
        gl_attr.set_depth_size(24);
        gl_attr.set_stencil_size(8);

        let window = video_subsystem
            .window(title, width, height)
            .opengl()
            .allow_highdpi()
            .position_centered()
            .build()
            .context("failed to create window")?;
        let gl_context = window
            .gl_create_context()
            .map_err(anyhow::Error::msg)
            .with_context(|| format!("failed to create {backend} context"))?;
        window
            .gl_make_current(&gl_context)
            .map_err(anyhow::Error::msg)?;

        let interval = if vsync {
            sdl2::video::SwapInterval::VSync
        } else {
            sdl2::video::SwapInterval::Immediate
        };
        if let Err(e) = video_subsystem.gl_set_swap_interval(interval) {
            log::warn!("could not set swap interval: {e}");
        }

        let gl = unsafe {
            glow::Context::from_loader_function(|s| {
                video_subsystem.gl_get_proc_address(s) as *const _
            })
        };
        let event_pump = sdl.event_pump().map_err(anyhow::Error::msg)?;
        let gl = Arc::new(gl);

        let (drawable_width, drawable_height) = window.drawable_size();
        log::info!(
            "created {width}x{height} window ({drawable_width}x{drawable_height} pixels) with an {backend} context"
        );

        Ok(Self {
            sdl,
            video_subsystem,
            window,
            gl_context,
            gl,
            event_pump,
            backend,
        })
    }
}
