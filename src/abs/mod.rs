//! This module contains the thin wrappers around the OpenGL object model used by the demo:
//! application setup, shaders, buffers, meshes, textures, framebuffers and render state.

pub mod app;
pub mod buffer;
pub mod framebuffer;
pub mod mesh;
pub mod shader;
pub mod state;
pub mod texture;

pub use app::*;
pub use buffer::*;
pub use framebuffer::*;
pub use mesh::*;
pub use shader::*;
pub use state::*;
pub use texture::*;
