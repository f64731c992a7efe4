//! objview: a small OpenGL model viewer.
//!
//! Parses OBJ-style geometry and material files into meshes, flattens the
//! face-indexed data into GPU-ready vertex streams and draws every loaded
//! object with a Phong point-light shader.

pub mod engine;
pub mod program;

pub use program::Program;
