use std::collections::HashMap;
use std::path::Path;

use glow::HasContext;
use nalgebra::{Matrix4, Vector3};

use super::shader::{Shader, ShaderError};
use crate::engine::components::material::Material;

/// Number of fixed texture slots the binding protocol supports.
pub const MAX_TEXTURE_UNITS: u32 = 4;

/// A linked shader program with a uniform registry.
///
/// Uniform names are declared once with `use_uniform`, which performs the one
/// and only device location query for that name; every later `set_uniform_*`
/// call reads the cached location. Setting a name that was never declared is
/// a programming error and panics.
pub struct ShaderProgram {
    program: glow::Program,
    shaders: Vec<glow::Shader>,
    uniform_locations: HashMap<String, Option<glow::UniformLocation>>,
    texture_units: HashMap<String, u32>,
}

impl ShaderProgram {
    pub fn new(gl: &glow::Context) -> Result<Self, ShaderError> {
        let program = unsafe { gl.create_program().map_err(ShaderError::Device)? };
        Ok(Self {
            program,
            shaders: Vec::new(),
            uniform_locations: HashMap::new(),
            texture_units: HashMap::new(),
        })
    }

    pub fn attach(&mut self, gl: &glow::Context, shader: Shader) {
        unsafe {
            gl.attach_shader(self.program, shader.raw());
        }
        self.shaders.push(shader.raw());
    }

    /// Compile a stage from a file and attach it.
    pub fn load_shader(
        &mut self,
        gl: &glow::Context,
        stage: u32,
        path: &Path,
    ) -> Result<(), ShaderError> {
        let shader = Shader::from_file(gl, stage, path)?;
        self.attach(gl, shader);
        Ok(())
    }

    /// Link the program. The attached stages are deleted after a successful
    /// link; a failure surfaces the driver's info log and leaves the program
    /// unusable.
    pub fn link(&mut self, gl: &glow::Context) -> Result<(), ShaderError> {
        unsafe {
            gl.link_program(self.program);
            if !gl.get_program_link_status(self.program) {
                let log = gl.get_program_info_log(self.program);
                log::error!("could not link shader program: {}", log);
                return Err(ShaderError::Link { log });
            }
            for shader in self.shaders.drain(..) {
                gl.delete_shader(shader);
            }
        }
        Ok(())
    }

    pub fn use_program(&self, gl: &glow::Context) {
        unsafe {
            gl.use_program(Some(self.program));
        }
    }

    pub fn raw(&self) -> glow::Program {
        self.program
    }

    /// Declare a uniform this program will set later. Queries the device for
    /// the location exactly once and caches the result, including the "not an
    /// active uniform" case the linker may produce.
    pub fn use_uniform(&mut self, gl: &glow::Context, uniform: &str) {
        let location = unsafe { gl.get_uniform_location(self.program, uniform) };
        if location.is_none() {
            log::warn!("uniform `{}` has no active location in the program", uniform);
        }
        self.uniform_locations.insert(uniform.to_string(), location);
    }

    pub fn has_uniform(&self, uniform: &str) -> bool {
        self.uniform_locations.contains_key(uniform)
    }

    fn location(&self, uniform: &str) -> Option<&glow::UniformLocation> {
        match self.uniform_locations.get(uniform) {
            Some(location) => location.as_ref(),
            None => panic!("uniform `{uniform}` was never declared with use_uniform"),
        }
    }

    pub fn set_uniform_1i(&self, gl: &glow::Context, uniform: &str, value: i32) {
        unsafe {
            gl.uniform_1_i32(self.location(uniform), value);
        }
    }

    pub fn set_uniform_1f(&self, gl: &glow::Context, uniform: &str, value: f32) {
        unsafe {
            gl.uniform_1_f32(self.location(uniform), value);
        }
    }

    pub fn set_uniform_vec3(&self, gl: &glow::Context, uniform: &str, value: &Vector3<f32>) {
        unsafe {
            gl.uniform_3_f32(self.location(uniform), value.x, value.y, value.z);
        }
    }

    pub fn set_uniform_mat4(&self, gl: &glow::Context, uniform: &str, matrix: &Matrix4<f32>) {
        unsafe {
            gl.uniform_matrix_4_f32_slice(self.location(uniform), false, matrix.as_slice());
        }
    }

    /// Assign a texture unit to a sampler uniform. Only the four fixed slots
    /// are supported; anything else is rejected and the sampler keeps its
    /// previous assignment.
    pub fn set_uniform_texture_index(&mut self, gl: &glow::Context, uniform: &str, unit: u32) {
        if unit >= MAX_TEXTURE_UNITS {
            log::error!(
                "texture unit {} is out of range (0..{}), `{}` not assigned",
                unit,
                MAX_TEXTURE_UNITS,
                uniform
            );
            return;
        }
        self.texture_units.insert(uniform.to_string(), unit);
        self.set_uniform_1i(gl, uniform, unit as i32);
    }

    /// Push a material's state into the declared uniforms.
    ///
    /// Colors and transparency are set for every registered name. The map
    /// flags are force-disabled first and only re-enabled for a map that
    /// actually binds, so a material without a texture never inherits the
    /// previous draw call's bindings or flags.
    pub fn set_uniforms_from_material(&self, gl: &glow::Context, material: &Material) {
        self.set_registered_vec3(gl, "diffuseColor", &material.diffuse_color);
        self.set_registered_vec3(gl, "ambientColor", &material.ambient_color);
        self.set_registered_vec3(gl, "specularColor", &material.specular_color);
        self.set_registered_1f(gl, "transparency", material.d);

        self.set_registered_1i(gl, "useDiffuseMap", 0);
        self.set_registered_1i(gl, "useSpecularMap", 0);

        if let Some((unit, texture)) = self.map_binding("diffuseMap", material.diffuse_texture()) {
            unsafe {
                gl.active_texture(glow::TEXTURE0 + unit);
                gl.bind_texture(glow::TEXTURE_2D, Some(texture));
            }
            self.set_registered_1i(gl, "useDiffuseMap", 1);
        }
        if let Some((unit, texture)) = self.map_binding("specularMap", material.specular_texture())
        {
            unsafe {
                gl.active_texture(glow::TEXTURE0 + unit);
                gl.bind_texture(glow::TEXTURE_2D, Some(texture));
            }
            self.set_registered_1i(gl, "useSpecularMap", 1);
        }
    }

    /// A map uniform binds iff the name was declared, the material owns a
    /// loaded texture and a texture unit was assigned to the name.
    fn map_binding(
        &self,
        uniform: &str,
        texture: Option<glow::Texture>,
    ) -> Option<(u32, glow::Texture)> {
        if !self.uniform_locations.contains_key(uniform) {
            return None;
        }
        let unit = *self.texture_units.get(uniform)?;
        Some((unit, texture?))
    }

    fn set_registered_1i(&self, gl: &glow::Context, uniform: &str, value: i32) {
        if let Some(Some(location)) = self.uniform_locations.get(uniform) {
            unsafe {
                gl.uniform_1_i32(Some(location), value);
            }
        }
    }

    fn set_registered_1f(&self, gl: &glow::Context, uniform: &str, value: f32) {
        if let Some(Some(location)) = self.uniform_locations.get(uniform) {
            unsafe {
                gl.uniform_1_f32(Some(location), value);
            }
        }
    }

    fn set_registered_vec3(&self, gl: &glow::Context, uniform: &str, value: &Vector3<f32>) {
        if let Some(Some(location)) = self.uniform_locations.get(uniform) {
            unsafe {
                gl.uniform_3_f32(Some(location), value.x, value.y, value.z);
            }
        }
    }

    /// Dump the program's active attributes and uniforms to the log.
    pub fn log_interface(&self, gl: &glow::Context) {
        unsafe {
            let attributes = gl.get_active_attributes(self.program);
            log::debug!("active attributes: {}", attributes);
            for i in 0..attributes {
                if let Some(attribute) = gl.get_active_attribute(self.program, i) {
                    let location = gl.get_attrib_location(self.program, &attribute.name);
                    log::debug!(
                        "  {}) type: 0x{:x}, name: {}, location: {:?}",
                        i,
                        attribute.atype,
                        attribute.name,
                        location
                    );
                }
            }

            let uniforms = gl.get_active_uniforms(self.program);
            log::debug!("active uniforms: {}", uniforms);
            for i in 0..uniforms {
                if let Some(uniform) = gl.get_active_uniform(self.program, i) {
                    let location = gl.get_uniform_location(self.program, &uniform.name);
                    log::debug!(
                        "  {}) type: 0x{:x}, name: {}, location: {:?}",
                        i,
                        uniform.utype,
                        uniform.name,
                        location
                    );
                }
            }
        }
    }

    /// Delete the device program.
    pub fn release(&self, gl: &glow::Context) {
        unsafe {
            gl.delete_program(self.program);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::num::NonZeroU32;

    fn bare_program() -> ShaderProgram {
        ShaderProgram {
            program: glow::NativeProgram(NonZeroU32::new(1).unwrap()),
            shaders: Vec::new(),
            uniform_locations: HashMap::new(),
            texture_units: HashMap::new(),
        }
    }

    fn texture(id: u32) -> glow::Texture {
        glow::NativeTexture(NonZeroU32::new(id).unwrap())
    }

    #[test]
    #[should_panic(expected = "never declared")]
    fn setting_an_undeclared_uniform_fails_fast() {
        let program = bare_program();
        program.location("model");
    }

    #[test]
    fn declared_but_inactive_uniform_is_a_registered_no_op() {
        let mut program = bare_program();
        program.uniform_locations.insert("model".to_string(), None);
        assert!(program.has_uniform("model"));
        assert!(program.location("model").is_none());
    }

    #[test]
    fn map_binding_requires_declaration_unit_and_texture() {
        let mut program = bare_program();

        // Not declared at all.
        assert!(program.map_binding("diffuseMap", Some(texture(7))).is_none());

        // Declared, but no texture unit assigned.
        program
            .uniform_locations
            .insert("diffuseMap".to_string(), None);
        assert!(program.map_binding("diffuseMap", Some(texture(7))).is_none());

        // Declared and assigned, but the material has no texture handle.
        program.texture_units.insert("diffuseMap".to_string(), 0);
        assert!(program.map_binding("diffuseMap", None).is_none());

        // All three conditions hold.
        assert_eq!(
            program.map_binding("diffuseMap", Some(texture(7))),
            Some((0, texture(7)))
        );
    }
}
