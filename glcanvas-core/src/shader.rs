//! The shader build sequence.
//!
//! [`build_program`] compiles a vertex and a fragment stage and links them into one program.
//! It is generic over [`ShaderBackend`] so that the sequence (and in particular the handling
//! of each failure) does not depend on a live context.

use thiserror::Error;

/// A programmable pipeline stage.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ShaderStage {
    Vertex,
    Fragment,
}

impl std::fmt::Display for ShaderStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            ShaderStage::Vertex => "vertex",
            ShaderStage::Fragment => "fragment",
        })
    }
}

#[derive(Debug, Error)]
pub enum ShaderError {
    #[error("failed to create {stage} shader object: {reason}")]
    CreateShader { stage: ShaderStage, reason: String },
    #[error("failed to compile {stage} shader:\n{log}")]
    Compile { stage: ShaderStage, log: String },
    #[error("failed to create program: {0}")]
    CreateProgram(String),
    #[error("failed to link program:\n{log}")]
    Link { log: String },
}

impl ShaderError {
    /// The compiler or linker diagnostic, if the driver produced one.
    pub fn log(&self) -> Option<&str> {
        match self {
            ShaderError::Compile { log, .. } | ShaderError::Link { log } => Some(log),
            _ => None,
        }
    }
}

/// Something that can compile shader stages and link them.
///
/// Stage objects release themselves when dropped. A failed compile or link must not leave an
/// object behind.
pub trait ShaderBackend {
    type Shader;
    type Program;

    /// Compiles a single stage.
    fn compile_stage(&self, stage: ShaderStage, source: &str) -> Result<Self::Shader, ShaderError>;

    /// Links compiled stages into a program.
    fn link_program(&self, stages: &[&Self::Shader]) -> Result<Self::Program, ShaderError>;
}

/// Compiles both stages and links them.
///
/// The fragment stage is only compiled once the vertex stage succeeded, and linking only
/// happens when both compiled. Stage objects are dropped before returning on every path.
/// Failures are logged with their diagnostic text under `name`.
pub fn build_program<B: ShaderBackend>(
    backend: &B,
    name: &str,
    vertex: &str,
    fragment: &str,
) -> Result<B::Program, ShaderError> {
    let result = compile_and_link(backend, vertex, fragment);
    match &result {
        Ok(_) => log::debug!("built shader program '{name}'"),
        Err(err) => log::error!("shader program '{name}': {err}"),
    }
    result
}

fn compile_and_link<B: ShaderBackend>(
    backend: &B,
    vertex: &str,
    fragment: &str,
) -> Result<B::Program, ShaderError> {
    let vert = backend.compile_stage(ShaderStage::Vertex, vertex)?;
    let frag = backend.compile_stage(ShaderStage::Fragment, fragment)?;
    backend.link_program(&[&vert, &frag])
}

#[cfg(test)]
mod tests {
    use std::{cell::RefCell, rc::Rc};

    use super::*;

    type Events = Rc<RefCell<Vec<String>>>;

    struct FakeShader {
        stage: ShaderStage,
        events: Events,
    }

    impl Drop for FakeShader {
        fn drop(&mut self) {
            self.events.borrow_mut().push(format!("delete {}", self.stage));
        }
    }

    /// Rejects stages without an entry point and programs whose stages mention `unlinkable`.
    struct FakeCompiler {
        events: Events,
        sources: RefCell<Vec<String>>,
    }

    impl FakeCompiler {
        fn new() -> Self {
            Self {
                events: Rc::default(),
                sources: RefCell::default(),
            }
        }

        fn events(&self) -> Vec<String> {
            self.events.borrow().clone()
        }
    }

    impl ShaderBackend for FakeCompiler {
        type Shader = FakeShader;
        type Program = u32;

        fn compile_stage(
            &self,
            stage: ShaderStage,
            source: &str,
        ) -> Result<FakeShader, ShaderError> {
            self.events.borrow_mut().push(format!("compile {stage}"));
            if !source.contains("void main") {
                return Err(ShaderError::Compile {
                    stage,
                    log: "0:1(1): error: function `main' is undefined".to_string(),
                });
            }
            self.sources.borrow_mut().push(source.to_string());
            Ok(FakeShader {
                stage,
                events: Rc::clone(&self.events),
            })
        }

        fn link_program(&self, stages: &[&FakeShader]) -> Result<u32, ShaderError> {
            self.events.borrow_mut().push(format!("link {}", stages.len()));
            if self.sources.borrow().iter().any(|s| s.contains("unlinkable")) {
                return Err(ShaderError::Link {
                    log: "error: unresolved varying".to_string(),
                });
            }
            Ok(7)
        }
    }

    const VERT: &str = "void main() { gl_Position = vec4(0.0); }";
    const FRAG: &str = "void main() { gl_FragColor = vec4(1.0); }";

    #[test]
    fn test_successful_build_releases_stages() {
        let compiler = FakeCompiler::new();
        let program = build_program(&compiler, "ok", VERT, FRAG).unwrap();
        assert_eq!(program, 7);
        assert_eq!(
            compiler.events(),
            [
                "compile vertex",
                "compile fragment",
                "link 2",
                "delete fragment",
                "delete vertex"
            ]
        );
    }

    #[test]
    fn test_malformed_vertex_source_stops_before_link() {
        let compiler = FakeCompiler::new();
        let err = build_program(&compiler, "broken", "gl_Position = ;", FRAG).unwrap_err();
        assert!(matches!(
            err,
            ShaderError::Compile {
                stage: ShaderStage::Vertex,
                ..
            }
        ));
        assert!(!err.log().unwrap().is_empty());
        assert_eq!(compiler.events(), ["compile vertex"]);
    }

    #[test]
    fn test_fragment_failure_releases_vertex_stage() {
        let compiler = FakeCompiler::new();
        let err = build_program(&compiler, "broken", VERT, "out vec4 c;").unwrap_err();
        assert!(matches!(
            err,
            ShaderError::Compile {
                stage: ShaderStage::Fragment,
                ..
            }
        ));
        assert_eq!(
            compiler.events(),
            ["compile vertex", "compile fragment", "delete vertex"]
        );
    }

    #[test]
    fn test_link_failure_reports_log_and_releases_stages() {
        let compiler = FakeCompiler::new();
        let vert = "// unlinkable\nvoid main() {}";
        let err = build_program(&compiler, "unlinkable", vert, FRAG).unwrap_err();
        assert_eq!(err.log(), Some("error: unresolved varying"));
        assert!(err.to_string().starts_with("failed to link program"));
        let events = compiler.events();
        assert_eq!(events[2], "link 2");
        assert!(events.contains(&"delete vertex".to_string()));
        assert!(events.contains(&"delete fragment".to_string()));
    }
}
