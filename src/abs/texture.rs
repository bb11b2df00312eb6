//! Structs and functions for handling textures.
//!
//! The module provides the [`Texture`] struct which is a CPU representation of a GPU texture.

use std::sync::Arc;

use glcanvas_core::{Backend, DecodedImage, PixelFormat};
use glow::HasContext;

/// The upload format for `format` on `backend`.
///
/// OpenGL ES 2.0 has no one- and two-channel color formats and uses the luminance formats
/// instead.
pub fn gl_format(format: PixelFormat, backend: Backend) -> u32 {
    match (format, backend) {
        (PixelFormat::Red, Backend::Gles2) => glow::LUMINANCE,
        (PixelFormat::Rg, Backend::Gles2) => glow::LUMINANCE_ALPHA,
        (PixelFormat::Red, _) => glow::RED,
        (PixelFormat::Rg, _) => glow::RG,
        (PixelFormat::Rgb, _) => glow::RGB,
        (PixelFormat::Rgba, _) => glow::RGBA,
    }
}

/// Represents a texture stored on the GPU side.
pub struct Texture {
    gl: Arc<glow::Context>,
    id: glow::Texture,
    width: u32,
    height: u32,
}

impl Texture {
    /// Uploads a decoded image, generates its mipmaps and sets linear filtering with repeat
    /// wrapping.
    ///
    /// The image is consumed: its pixel buffer is released as soon as the upload is done.
    pub fn from_image(
        gl: &Arc<glow::Context>,
        backend: Backend,
        image: DecodedImage,
    ) -> anyhow::Result<Self> {
        let format = gl_format(image.format(), backend);
        unsafe {
            let texture = gl.create_texture().map_err(anyhow::Error::msg)?;
            gl.bind_texture(glow::TEXTURE_2D, Some(texture));
            gl.pixel_store_i32(glow::UNPACK_ALIGNMENT, 1);
            gl.tex_image_2d(
                glow::TEXTURE_2D,
                0,
                format as i32,
                image.width() as i32,
                image.height() as i32,
                0,
                format,
                glow::UNSIGNED_BYTE,
                glow::PixelUnpackData::Slice(Some(image.pixels())),
            );
            gl.pixel_store_i32(glow::UNPACK_ALIGNMENT, 4);
            gl.generate_mipmap(glow::TEXTURE_2D);
            set_sampling(gl);
            gl.bind_texture(glow::TEXTURE_2D, None);

            Ok(Self {
                gl: Arc::clone(gl),
                id: texture,
                width: image.width(),
                height: image.height(),
            })
        }
    }

    /// Creates an uninitialized RGBA texture to render into.
    pub fn empty(gl: &Arc<glow::Context>, width: u32, height: u32) -> anyhow::Result<Self> {
        unsafe {
            let texture = gl.create_texture().map_err(anyhow::Error::msg)?;
            gl.bind_texture(glow::TEXTURE_2D, Some(texture));
            gl.tex_image_2d(
                glow::TEXTURE_2D,
                0,
                glow::RGBA as i32,
                width as i32,
                height as i32,
                0,
                glow::RGBA,
                glow::UNSIGNED_BYTE,
                glow::PixelUnpackData::Slice(None),
            );
            set_sampling(gl);
            gl.bind_texture(glow::TEXTURE_2D, None);

            Ok(Self {
                gl: Arc::clone(gl),
                id: texture,
                width,
                height,
            })
        }
    }

    /// Returns the width of the texture.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Returns the height of the texture.
    pub fn height(&self) -> u32 {
        self.height
    }

    pub(super) fn id(&self) -> glow::Texture {
        self.id
    }

    /// Rebuilds the mipmap chain from level 0.
    pub fn generate_mipmaps(&self) {
        unsafe {
            self.gl.bind_texture(glow::TEXTURE_2D, Some(self.id));
            self.gl.generate_mipmap(glow::TEXTURE_2D);
            self.gl.bind_texture(glow::TEXTURE_2D, None);
        }
    }

    /// Switches to nearest-neighbour sampling, for pixel-exact atlases.
    pub fn set_nearest_filtering(&self) {
        unsafe {
            self.gl.bind_texture(glow::TEXTURE_2D, Some(self.id));
            for filter in [glow::TEXTURE_MIN_FILTER, glow::TEXTURE_MAG_FILTER] {
                self.gl
                    .tex_parameter_i32(glow::TEXTURE_2D, filter, glow::NEAREST as i32);
            }
            self.gl.bind_texture(glow::TEXTURE_2D, None);
        }
    }

    /// Binds the texture to the specified texture unit.
    pub fn bind(&self, unit: u32) {
        unsafe {
            self.gl.active_texture(glow::TEXTURE0 + unit);
            self.gl.bind_texture(glow::TEXTURE_2D, Some(self.id));
        }
    }
}

impl Drop for Texture {
    fn drop(&mut self) {
        unsafe {
            self.gl.delete_texture(self.id);
        }
    }
}

unsafe fn set_sampling(gl: &glow::Context) {
    unsafe {
        gl.tex_parameter_i32(
            glow::TEXTURE_2D,
            glow::TEXTURE_MIN_FILTER,
            glow::LINEAR as i32,
        );
        gl.tex_parameter_i32(
            glow::TEXTURE_2D,
            glow::TEXTURE_MAG_FILTER,
            glow::LINEAR as i32,
        );
        gl.tex_parameter_i32(glow::TEXTURE_2D, glow::TEXTURE_WRAP_S, glow::REPEAT as i32);
        gl.tex_parameter_i32(glow::TEXTURE_2D, glow::TEXTURE_WRAP_T, glow::REPEAT as i32);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_follows_channel_count() {
        assert_eq!(gl_format(PixelFormat::Red, Backend::Gl33), glow::RED);
        assert_eq!(gl_format(PixelFormat::Rg, Backend::Gles3), glow::RG);
        assert_eq!(gl_format(PixelFormat::Rgb, Backend::Gl33), glow::RGB);
        assert_eq!(gl_format(PixelFormat::Rgba, Backend::Gles2), glow::RGBA);
    }

    #[test]
    fn test_gles2_uses_luminance_formats() {
        assert_eq!(gl_format(PixelFormat::Red, Backend::Gles2), glow::LUMINANCE);
        assert_eq!(gl_format(PixelFormat::Rg, Backend::Gles2), glow::LUMINANCE_ALPHA);
        assert_eq!(gl_format(PixelFormat::Rgb, Backend::Gles2), glow::RGB);
    }
}
