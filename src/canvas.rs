//! The rotating cube canvas.
//!
//! [`CubeCanvas`] owns everything one canvas draws with: its shader program, the cube
//! geometry, an optional texture and the tilt of the cube. Whether the cube is textured, and
//! whether its texture is sampled through an offscreen copy, is chosen with [`CanvasOptions`].

use std::{path::Path, sync::Arc};

use anyhow::Context;
use glam::Vec4;
use glcanvas_core::{Backend, CubeTransform, ProgramKind, geometry, load_image};
use glow::HasContext;

use crate::abs::{GeometryBuffer, IndexedGeometry, OffscreenTarget, ShaderProgram, Texture};

/// What a [`CubeCanvas`] draws.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CanvasOptions {
    /// Sample a texture with the corner colors as coordinates.
    pub textured: bool,
    /// Sample an offscreen copy of the texture rather than the texture itself.
    pub offscreen: bool,
}

/// A canvas drawing a cube spinning around the Y axis.
pub struct CubeCanvas {
    gl: Arc<glow::Context>,
    program: ShaderProgram,
    cube: IndexedGeometry,
    texture: Option<Texture>,
    transform: CubeTransform,
    background: Vec4,
    width: u32,
    height: u32,
}

impl CubeCanvas {
    /// Builds the canvas program and uploads its geometry and, for textured canvases, the
    /// image at `texture_path`.
    ///
    /// Fails when the program does not build or a buffer cannot be allocated. A texture that
    /// is missing or cannot be decoded only leaves the canvas without a texture.
    pub fn new(
        gl: &Arc<glow::Context>,
        backend: Backend,
        options: CanvasOptions,
        texture_path: &Path,
        width: u32,
        height: u32,
    ) -> anyhow::Result<Self> {
        let kind = if options.textured {
            ProgramKind::TexturedCube
        } else {
            ProgramKind::ColorCube
        };
        let program = ShaderProgram::build(gl, backend, kind)?;

        let colors: &[f32] = if options.textured {
            &geometry::TEXTURED_CUBE_COLORS
        } else {
            &geometry::CUBE_COLORS
        };
        let cube = IndexedGeometry::new(
            gl,
            &program,
            vec![
                (
                    "position",
                    GeometryBuffer::attribute(gl, &geometry::CUBE_POSITIONS, 3)?,
                ),
                ("color", GeometryBuffer::attribute(gl, colors, 3)?),
            ],
            GeometryBuffer::indices(gl, &geometry::CUBE_INDICES)?,
            backend.has_vertex_arrays(),
        )
        .context("cube geometry")?;

        let texture = if options.textured {
            load_texture(gl, backend, texture_path, options.offscreen)
        } else {
            None
        };

        log::info!(
            "created {width}x{height} {} canvas{}",
            kind.name(),
            if texture.is_some() { " with texture" } else { "" }
        );

        Ok(Self {
            gl: Arc::clone(gl),
            program,
            cube,
            texture,
            transform: CubeTransform::new(),
            background: Vec4::new(0.0, 0.0, 0.0, 1.0),
            width,
            height,
        })
    }

    /// Tilts the cube around the X axis by `angle` radians.
    pub fn set_rotation(&mut self, angle: f32) {
        self.transform.set_rotation(angle);
    }

    pub fn set_background_color(&mut self, color: Vec4) {
        self.background = color;
    }

    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Clears the canvas to its background color and draws the cube at `time` seconds.
    ///
    /// The viewport and scissor box must already cover the canvas.
    pub fn draw_contents(&self, time: f32) {
        let background = self.background;
        unsafe {
            self.gl
                .clear_color(background.x, background.y, background.z, background.w);
            self.gl
                .clear(glow::COLOR_BUFFER_BIT | glow::DEPTH_BUFFER_BIT);
        }

        self.program.use_program();
        self.program.set_uniform(
            "mvp",
            self.transform.mvp(self.width, self.height, time),
        );
        if let Some(texture) = &self.texture {
            texture.bind(0);
            self.program.set_uniform("image", 0);
        }
        self.cube.draw();
        log::trace!("drew {} cube indices", self.cube.index_count());
    }
}

/// Loads the canvas texture, optionally replacing it by an offscreen copy.
///
/// Every failure is logged and yields `None`.
fn load_texture(
    gl: &Arc<glow::Context>,
    backend: Backend,
    path: &Path,
    offscreen: bool,
) -> Option<Texture> {
    let image = match load_image(path) {
        Ok(Some(image)) => image,
        Ok(None) => {
            log::info!("no texture at {}, drawing without one", path.display());
            return None;
        }
        Err(e) => {
            log::warn!("skipping texture: {e}");
            return None;
        }
    };

    let texture = match Texture::from_image(gl, backend, image) {
        Ok(texture) => texture,
        Err(e) => {
            log::warn!("failed to upload {}: {e:#}", path.display());
            return None;
        }
    };

    if !offscreen {
        return Some(texture);
    }

    match offscreen_copy(gl, backend, &texture) {
        Ok(copy) => Some(copy),
        Err(e) => {
            log::warn!("offscreen copy failed, sampling the texture directly: {e:#}");
            Some(texture)
        }
    }
}

/// Renders `source` through a full-screen quad into a new texture of the same size.
fn offscreen_copy(
    gl: &Arc<glow::Context>,
    backend: Backend,
    source: &Texture,
) -> anyhow::Result<Texture> {
    let program = ShaderProgram::build(gl, backend, ProgramKind::Blit)?;
    let quad = IndexedGeometry::new(
        gl,
        &program,
        vec![(
            "position",
            GeometryBuffer::attribute(gl, &geometry::QUAD_POSITIONS, 2)?,
        )],
        GeometryBuffer::indices(gl, &geometry::QUAD_INDICES)?,
        backend.has_vertex_arrays(),
    )?;

    let target = OffscreenTarget::new(gl, source.width(), source.height())?;
    target.render(&program, &quad, source)?;
    Ok(target.into_texture())
}
