//! OpenGL Shaders
//!
//! This module defines the [`Shader`] and [`ShaderProgram`] structs for managing OpenGL shaders.
//! This module also provides the [`Uniform`] trait for setting uniform variables in shader
//! programs.
//!
//! Programs are built through [`glcanvas_core::build_program`]; [`GlCompiler`] is the bridge
//! that lets that sequence drive a real context.

use std::sync::Arc;

use glam::{Mat4, Vec4};
use glcanvas_core::{Backend, ProgramKind, ShaderBackend, ShaderError, ShaderStage};
use glow::HasContext;

const EMPTY_LOG: &str = "(the driver returned no diagnostic output)";

fn stage_type(stage: ShaderStage) -> u32 {
    match stage {
        ShaderStage::Vertex => glow::VERTEX_SHADER,
        ShaderStage::Fragment => glow::FRAGMENT_SHADER,
    }
}

fn non_empty(log: String) -> String {
    if log.trim().is_empty() {
        EMPTY_LOG.to_string()
    } else {
        log
    }
}

/// Represents an individual OpenGL shader.
pub struct Shader {
    gl: Arc<glow::Context>,
    id: glow::Shader,
}

impl Shader {
    /// Compiles a new shader from the given source code.
    pub fn new(
        gl: &Arc<glow::Context>,
        stage: ShaderStage,
        source: &str,
    ) -> Result<Self, ShaderError> {
        unsafe {
            let shader = gl
                .create_shader(stage_type(stage))
                .map_err(|reason| ShaderError::CreateShader { stage, reason })?;
            gl.shader_source(shader, source);
            gl.compile_shader(shader);

            if !gl.get_shader_compile_status(shader) {
                let log = gl.get_shader_info_log(shader);
                gl.delete_shader(shader);
                return Err(ShaderError::Compile {
                    stage,
                    log: non_empty(log),
                });
            }

            Ok(Self {
                gl: Arc::clone(gl),
                id: shader,
            })
        }
    }
}

impl Drop for Shader {
    fn drop(&mut self) {
        unsafe {
            self.gl.delete_shader(self.id);
        }
    }
}

/// Represents a uniform variable in a shader program.
pub trait Uniform {
    /// Sets the value of the uniform variable in the given shader program.
    fn set_uniform(&self, gl: &glow::Context, program: glow::Program, name: &str);
}

impl Uniform for i32 {
    fn set_uniform(&self, gl: &glow::Context, program: glow::Program, name: &str) {
        unsafe {
            let location = gl.get_uniform_location(program, name);
            if let Some(loc) = location {
                gl.uniform_1_i32(Some(&loc), *self);
            }
        }
    }
}

impl Uniform for Vec4 {
    fn set_uniform(&self, gl: &glow::Context, program: glow::Program, name: &str) {
        unsafe {
            let location = gl.get_uniform_location(program, name);
            if let Some(loc) = location {
                gl.uniform_4_f32(Some(&loc), self.x, self.y, self.z, self.w);
            }
        }
    }
}

impl Uniform for Mat4 {
    fn set_uniform(&self, gl: &glow::Context, program: glow::Program, name: &str) {
        unsafe {
            let location = gl.get_uniform_location(program, name);
            if let Some(loc) = location {
                gl.uniform_matrix_4_f32_slice(Some(&loc), false, self.as_ref());
            }
        }
    }
}

/// Represents an OpenGL shader program composed of multiple shaders.
pub struct ShaderProgram {
    gl: Arc<glow::Context>,
    id: glow::Program,
}

impl ShaderProgram {
    /// Links a new shader program from the given shaders.
    pub fn new(gl: &Arc<glow::Context>, shaders: &[&Shader]) -> Result<Self, ShaderError> {
        unsafe {
            let program = gl.create_program().map_err(ShaderError::CreateProgram)?;

            for shader in shaders {
                gl.attach_shader(program, shader.id);
            }

            gl.link_program(program);

            if !gl.get_program_link_status(program) {
                let log = gl.get_program_info_log(program);
                gl.delete_program(program);
                return Err(ShaderError::Link {
                    log: non_empty(log),
                });
            }

            for shader in shaders {
                gl.detach_shader(program, shader.id);
            }

            Ok(Self {
                gl: Arc::clone(gl),
                id: program,
            })
        }
    }

    /// Builds the program `kind` from the sources of `backend`.
    pub fn build(
        gl: &Arc<glow::Context>,
        backend: Backend,
        kind: ProgramKind,
    ) -> Result<Self, ShaderError> {
        let sources = backend.sources(kind);
        glcanvas_core::build_program(
            &GlCompiler(gl),
            kind.name(),
            sources.vertex,
            sources.fragment,
        )
    }

    /// Binds the shader program for use.
    pub fn use_program(&self) {
        unsafe {
            self.gl.use_program(Some(self.id));
        }
    }

    /// Sets a uniform variable in the shader program. The program must be in use.
    pub fn set_uniform<T: Uniform>(&self, name: &str, value: T) {
        value.set_uniform(&self.gl, self.id, name);
    }

    /// Location of the vertex attribute `name`, if the program uses it.
    pub fn attrib_location(&self, name: &str) -> Option<u32> {
        unsafe { self.gl.get_attrib_location(self.id, name) }
    }
}

impl Drop for ShaderProgram {
    fn drop(&mut self) {
        unsafe {
            self.gl.delete_program(self.id);
        }
    }
}

/// Compiles and links on a live context.
pub struct GlCompiler<'a>(pub &'a Arc<glow::Context>);

impl ShaderBackend for GlCompiler<'_> {
    type Shader = Shader;
    type Program = ShaderProgram;

    fn compile_stage(&self, stage: ShaderStage, source: &str) -> Result<Shader, ShaderError> {
        Shader::new(self.0, stage, source)
    }

    fn link_program(&self, stages: &[&Shader]) -> Result<ShaderProgram, ShaderError> {
        ShaderProgram::new(self.0, stages)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_driver_log_is_replaced() {
        assert_eq!(non_empty(String::new()), EMPTY_LOG);
        assert_eq!(non_empty("\n".to_string()), EMPTY_LOG);
        assert_eq!(non_empty("0:3: syntax error".to_string()), "0:3: syntax error");
    }

    #[test]
    fn test_stage_types() {
        assert_eq!(stage_type(ShaderStage::Vertex), glow::VERTEX_SHADER);
        assert_eq!(stage_type(ShaderStage::Fragment), glow::FRAGMENT_SHADER);
    }

    #[test]
    fn test_uniforms_are_passed_by_value() {
        fn accepts<T: Uniform + Copy>(_: T) {}
        accepts(0i32);
        accepts(Vec4::ONE);
        accepts(Mat4::IDENTITY);
    }
}
