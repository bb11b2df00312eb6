//! Graphics backends and the shader text written for each of them.
//!
//! Every [`ProgramKind`] exists once per [`Backend`]. The backend is picked once
//! at startup (see [`crate::Config`]) and all programs are then built from the
//! matching row of the table.

use serde::{Deserialize, Serialize};

/// The OpenGL dialect a context speaks.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Backend {
    /// Desktop OpenGL 3.3, core profile.
    #[default]
    Gl33,
    /// OpenGL ES 3.0.
    Gles3,
    /// OpenGL ES 2.0.
    Gles2,
}

impl Backend {
    pub const ALL: [Backend; 3] = [Backend::Gl33, Backend::Gles3, Backend::Gles2];

    /// The `(major, minor)` context version to request.
    pub fn context_version(self) -> (u8, u8) {
        match self {
            Backend::Gl33 => (3, 3),
            Backend::Gles3 => (3, 0),
            Backend::Gles2 => (2, 0),
        }
    }

    pub fn is_gles(self) -> bool {
        matches!(self, Backend::Gles3 | Backend::Gles2)
    }

    /// Whether vertex array objects are part of the core API.
    pub fn has_vertex_arrays(self) -> bool {
        !matches!(self, Backend::Gles2)
    }

    /// Returns the shader sources of `kind` for this backend.
    pub fn sources(self, kind: ProgramKind) -> ShaderSources {
        SOURCES[self as usize][kind as usize]
    }
}

impl std::fmt::Display for Backend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Backend::Gl33 => "OpenGL 3.3 core",
            Backend::Gles3 => "OpenGL ES 3.0",
            Backend::Gles2 => "OpenGL ES 2.0",
        })
    }
}

/// The programs the demo builds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ProgramKind {
    /// Cube shaded with per-vertex colors.
    ColorCube,
    /// Cube sampling a texture with its vertex colors as coordinates.
    TexturedCube,
    /// Full-screen quad copying one texture into the bound framebuffer.
    Blit,
    /// Flat colored 2D quads of the widget layer.
    Ui,
}

impl ProgramKind {
    pub const ALL: [ProgramKind; 4] = [
        ProgramKind::ColorCube,
        ProgramKind::TexturedCube,
        ProgramKind::Blit,
        ProgramKind::Ui,
    ];

    /// An identifying name, used in log messages.
    pub fn name(self) -> &'static str {
        match self {
            ProgramKind::ColorCube => "a_simple_shader",
            ProgramKind::TexturedCube => "a_simple_texture_shader",
            ProgramKind::Blit => "offscreen_blit_shader",
            ProgramKind::Ui => "ui_shader",
        }
    }
}

/// Vertex and fragment source of one program.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ShaderSources {
    pub vertex: &'static str,
    pub fragment: &'static str,
}

macro_rules! sources {
    ($backend:literal, $name:literal) => {
        ShaderSources {
            vertex: include_str!(concat!("shaders/", $backend, "/", $name, ".vert.glsl")),
            fragment: include_str!(concat!("shaders/", $backend, "/", $name, ".frag.glsl")),
        }
    };
}

macro_rules! backend_row {
    ($backend:literal) => {
        [
            sources!($backend, "cube"),
            sources!($backend, "textured"),
            sources!($backend, "blit"),
            sources!($backend, "ui"),
        ]
    };
}

// Rows follow `Backend`, columns follow `ProgramKind`.
const SOURCES: [[ShaderSources; 4]; 3] = [
    backend_row!("gl33"),
    backend_row!("gles3"),
    backend_row!("gles2"),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_program_has_sources_for_every_backend() {
        for backend in Backend::ALL {
            for kind in ProgramKind::ALL {
                let sources = backend.sources(kind);
                assert!(sources.vertex.contains("void main"), "{backend:?} {kind:?}");
                assert!(sources.fragment.contains("void main"), "{backend:?} {kind:?}");
                assert!(sources.vertex.contains("position"), "{backend:?} {kind:?}");
            }
        }
    }

    #[test]
    fn test_version_directives_match_backend() {
        for kind in ProgramKind::ALL {
            assert!(Backend::Gl33.sources(kind).vertex.starts_with("#version 330"));
            assert!(Backend::Gles3.sources(kind).fragment.starts_with("#version 300 es"));
            assert!(!Backend::Gles2.sources(kind).vertex.contains("#version"));
            assert!(Backend::Gles2.sources(kind).fragment.contains("gl_FragColor"));
        }
    }

    #[test]
    fn test_table_rows_are_not_mixed_up() {
        assert_ne!(
            Backend::Gl33.sources(ProgramKind::ColorCube),
            Backend::Gl33.sources(ProgramKind::TexturedCube)
        );
        assert!(Backend::Gl33.sources(ProgramKind::Blit).fragment.contains("source"));
        assert!(Backend::Gles2.sources(ProgramKind::Ui).fragment.contains("u_color"));
        assert!(Backend::Gles3.sources(ProgramKind::Ui).fragment.contains("u_glyphs"));
    }

    #[test]
    fn test_blit_copies_without_flipping() {
        for backend in Backend::ALL {
            let vertex = backend.sources(ProgramKind::Blit).vertex;
            assert!(vertex.contains("uv = position * 0.5 + 0.5;"), "{backend:?}");
            assert!(!vertex.contains("0.5 - position.y"), "{backend:?}");
        }
    }

    #[test]
    fn test_backend_deserializes_from_lowercase_name() {
        let backend: Backend = serde_json::from_str("\"gles2\"").unwrap();
        assert_eq!(backend, Backend::Gles2);
        assert!(backend.is_gles());
        assert!(!backend.has_vertex_arrays());
        assert_eq!(Backend::default().context_version(), (3, 3));
    }
}
