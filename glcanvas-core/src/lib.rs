//! The core of the glcanvas demo. This crate contains everything that does not
//! need a live OpenGL context: the shader source table, the shader build
//! sequence, image decoding, the bitmap font, render state scoping, transforms, the static
//! geometry and configuration.
//!
//! The `glcanvas` binary provides the GL implementations of the traits
//! defined here ([`shader::ShaderBackend`] and [`state::RenderState`]).

pub mod backend;
pub mod config;
pub mod font;
pub mod geometry;
pub mod image_data;
pub mod shader;
pub mod state;
pub mod transform;

pub use backend::{Backend, ProgramKind, ShaderSources};
pub use config::{Config, ConfigError};
pub use font::BitmapFont;
pub use image_data::{DecodedImage, ImageError, PixelFormat, load_image};
pub use shader::{ShaderBackend, ShaderError, ShaderStage, build_program};
pub use state::{Capability, Rect, RenderState, StateGuard};
pub use transform::CubeTransform;
