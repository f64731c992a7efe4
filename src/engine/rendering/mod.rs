pub mod shader;
pub mod shader_program;

pub use shader::{Shader, ShaderError};
pub use shader_program::{ShaderProgram, MAX_TEXTURE_UNITS};
