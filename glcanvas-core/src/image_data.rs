//! Image decoding for texture uploads.
//!
//! The decoded buffer keeps the channel count of the source file and the texture format is
//! derived from that count alone.

use std::path::{Path, PathBuf};

use image::DynamicImage;
use thiserror::Error;

/// The pixel layout of a decoded image, one byte per channel.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PixelFormat {
    Red,
    Rg,
    Rgb,
    Rgba,
}

impl PixelFormat {
    /// Picks the format for an image with `channels` channels.
    pub fn from_channel_count(channels: u8) -> Result<Self, ImageError> {
        match channels {
            1 => Ok(PixelFormat::Red),
            2 => Ok(PixelFormat::Rg),
            3 => Ok(PixelFormat::Rgb),
            4 => Ok(PixelFormat::Rgba),
            n => Err(ImageError::UnsupportedChannels(n)),
        }
    }

    pub fn channel_count(self) -> u8 {
        match self {
            PixelFormat::Red => 1,
            PixelFormat::Rg => 2,
            PixelFormat::Rgb => 3,
            PixelFormat::Rgba => 4,
        }
    }
}

#[derive(Debug, Error)]
pub enum ImageError {
    #[error("failed to decode {}: {source}", path.display())]
    Decode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
    #[error("unsupported channel count {0}")]
    UnsupportedChannels(u8),
    #[error("pixel buffer holds {actual} bytes, expected {expected}")]
    SizeMismatch { expected: usize, actual: usize },
}

/// A decoded image ready for upload.
#[derive(Debug, Clone, PartialEq)]
pub struct DecodedImage {
    width: u32,
    height: u32,
    format: PixelFormat,
    pixels: Vec<u8>,
}

impl DecodedImage {
    /// Wraps tightly packed 8-bit pixel data.
    ///
    /// On error the buffer is dropped here.
    pub fn from_raw(
        width: u32,
        height: u32,
        channels: u8,
        pixels: Vec<u8>,
    ) -> Result<Self, ImageError> {
        let format = PixelFormat::from_channel_count(channels)?;
        let expected = width as usize * height as usize * channels as usize;
        if pixels.len() != expected {
            return Err(ImageError::SizeMismatch {
                expected,
                actual: pixels.len(),
            });
        }
        Ok(Self {
            width,
            height,
            format,
            pixels,
        })
    }

    /// Converts a decoded image to 8 bits per channel, keeping its channel count.
    pub fn from_dynamic(image: DynamicImage) -> Result<Self, ImageError> {
        let (width, height) = (image.width(), image.height());
        let format = PixelFormat::from_channel_count(image.color().channel_count())?;
        let pixels = match format {
            PixelFormat::Red => image.into_luma8().into_raw(),
            PixelFormat::Rg => image.into_luma_alpha8().into_raw(),
            PixelFormat::Rgb => image.into_rgb8().into_raw(),
            PixelFormat::Rgba => image.into_rgba8().into_raw(),
        };
        Ok(Self {
            width,
            height,
            format,
            pixels,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn format(&self) -> PixelFormat {
        self.format
    }

    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }
}

/// Loads the image at `path`.
///
/// A file that does not exist is not an error: `Ok(None)` is returned and the caller goes on
/// without a texture.
pub fn load_image(path: &Path) -> Result<Option<DecodedImage>, ImageError> {
    if !path.exists() {
        return Ok(None);
    }

    log::info!("Loading {}", path.display());
    let image = image::open(path).map_err(|source| ImageError::Decode {
        path: path.to_path_buf(),
        source,
    })?;
    DecodedImage::from_dynamic(image).map(Some)
}
