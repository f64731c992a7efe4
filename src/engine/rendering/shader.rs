use std::fs;
use std::path::{Path, PathBuf};

use glow::HasContext;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ShaderError {
    #[error("could not read shader {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("shader compile error: {log}")]
    Compile { log: String },
    #[error("shader program link error: {log}")]
    Link { log: String },
    #[error("device error: {0}")]
    Device(String),
}

/// A single compiled shader stage. On a compile failure the driver's info log
/// is surfaced in the error and the stage is deleted.
pub struct Shader {
    shader: glow::Shader,
}

impl Shader {
    pub fn from_source(gl: &glow::Context, stage: u32, source: &str) -> Result<Self, ShaderError> {
        unsafe {
            let shader = gl.create_shader(stage).map_err(ShaderError::Device)?;
            gl.shader_source(shader, source);
            gl.compile_shader(shader);
            if !gl.get_shader_compile_status(shader) {
                let log = gl.get_shader_info_log(shader);
                gl.delete_shader(shader);
                log::error!("shader compile error: {}", log);
                return Err(ShaderError::Compile { log });
            }
            Ok(Self { shader })
        }
    }

    pub fn from_file(gl: &glow::Context, stage: u32, path: &Path) -> Result<Self, ShaderError> {
        let source = fs::read_to_string(path).map_err(|source| ShaderError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_source(gl, stage, &source)
    }

    pub fn raw(&self) -> glow::Shader {
        self.shader
    }
}
