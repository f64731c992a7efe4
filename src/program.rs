use glow::HasContext;
use nalgebra::{Point3, Vector3};
use thiserror::Error;

use crate::engine::components::camera::{perspective, Camera};
use crate::engine::components::mesh::MeshError;
use crate::engine::components::object::Object;
use crate::engine::components::point_light::PointLight;
use crate::engine::config::PathConfig;
use crate::engine::loaders::obj_loader::{LoadError, ObjLoader};
use crate::engine::rendering::shader::ShaderError;
use crate::engine::rendering::shader_program::ShaderProgram;

const CAMERA_SPEED: f32 = 1.0; // units per second
const OBJECT_SPIN_SPEED: f32 = 10.0; // degrees per second about +Y

#[derive(Debug, Error)]
pub enum ProgramError {
    #[error(transparent)]
    Load(#[from] LoadError),
    #[error(transparent)]
    Shader(#[from] ShaderError),
    #[error(transparent)]
    Mesh(#[from] MeshError),
    #[error("device error: {0}")]
    Device(String),
}

/// Movement keys the window loop forwards each frame.
#[derive(Debug, Default, Clone, Copy)]
pub struct InputState {
    pub left: bool,
    pub right: bool,
    pub forward: bool,
    pub backward: bool,
    pub up: bool,
    pub down: bool,
}

/// Owns the GL context and everything drawn with it: the Phong shader
/// program, the loaded objects, one point light and the camera.
pub struct Program {
    gl: glow::Context,
    shader_program: ShaderProgram,
    objects: Vec<Object>,
    light: PointLight,
    camera: Camera,
}

impl Program {
    pub fn new(gl: glow::Context, config: &PathConfig) -> Result<Self, ProgramError> {
        let loader = ObjLoader::new();
        let geometry = config.models.join("scene.obj");
        let material = config.models.join("scene.mtl");
        let mut objects = loader.load_objects(&geometry, Some(&material))?;

        let mut shader_program = ShaderProgram::new(&gl)?;
        shader_program.load_shader(&gl, glow::VERTEX_SHADER, &config.shaders.join("phong_vs.glsl"))?;
        shader_program.load_shader(
            &gl,
            glow::FRAGMENT_SHADER,
            &config.shaders.join("phong_fs.glsl"),
        )?;
        shader_program.link(&gl)?;
        shader_program.log_interface(&gl);

        for name in [
            "view",
            "proj",
            "model",
            "lightPosition_world",
            "lightDiffuse",
            "lightSpecular",
            "lightAmbient",
            "ambientColor",
            "diffuseColor",
            "specularColor",
            "transparency",
            "useDiffuseMap",
            "useSpecularMap",
            "diffuseMap",
            "specularMap",
        ] {
            shader_program.use_uniform(&gl, name);
        }

        let camera = Camera::new(Point3::new(0.0, 0.5, 3.0), Point3::origin());
        let light = PointLight::with_colors(
            Vector3::new(1.0, 1.0, 1.0),
            Vector3::new(0.9, 0.9, 0.9),
            Vector3::new(1.0, 1.0, 1.0),
            Vector3::new(0.2, 0.2, 0.2),
        );

        shader_program.use_program(&gl);
        shader_program.set_uniform_texture_index(&gl, "diffuseMap", 0);
        shader_program.set_uniform_texture_index(&gl, "specularMap", 1);

        for object in objects.iter_mut() {
            object.compute_vertices()?;
            object.create_vao(&gl).map_err(ProgramError::Device)?;
            object
                .material_mut()
                .create_textures(&gl)
                .map_err(ProgramError::Device)?;
        }

        unsafe {
            gl.clear_color(0.6, 0.6, 0.6, 1.0);
            gl.enable(glow::DEPTH_TEST);
            gl.enable(glow::CULL_FACE);
            gl.cull_face(glow::BACK);
            gl.front_face(glow::CCW);
        }

        log::info!("program initialized with {} objects", objects.len());

        Ok(Self {
            gl,
            shader_program,
            objects,
            light,
            camera,
        })
    }

    /// Move the camera according to the keys held down this frame.
    pub fn apply_input(&mut self, input: &InputState, delta_time: f32) {
        let step = CAMERA_SPEED * delta_time;
        let mut delta = Vector3::zeros();
        if input.left {
            delta.x -= step;
        }
        if input.right {
            delta.x += step;
        }
        if input.forward {
            delta.z -= step;
        }
        if input.backward {
            delta.z += step;
        }
        if input.up {
            delta.y += step;
        }
        if input.down {
            delta.y -= step;
        }
        if delta != Vector3::zeros() {
            self.camera.translate(delta);
        }
    }

    /// Draw one frame: refresh the camera and light uniforms, spin each
    /// object a little and issue one draw call per object.
    pub fn render(&mut self, width: u32, height: u32, delta_time: f32) {
        unsafe {
            self.gl.viewport(0, 0, width as i32, height as i32);
            self.gl.clear(glow::COLOR_BUFFER_BIT | glow::DEPTH_BUFFER_BIT);
        }

        self.shader_program.use_program(&self.gl);

        let aspect = width as f32 / height.max(1) as f32;
        let projection = perspective(67.0, aspect, 0.1, 100.0);
        self.shader_program.set_uniform_mat4(&self.gl, "proj", &projection);
        self.shader_program
            .set_uniform_mat4(&self.gl, "view", &self.camera.view_matrix());

        self.shader_program
            .set_uniform_vec3(&self.gl, "lightPosition_world", self.light.position());
        self.shader_program
            .set_uniform_vec3(&self.gl, "lightDiffuse", self.light.diffuse_color());
        self.shader_program
            .set_uniform_vec3(&self.gl, "lightSpecular", self.light.specular_color());
        self.shader_program
            .set_uniform_vec3(&self.gl, "lightAmbient", self.light.ambient_color());

        let spin = (OBJECT_SPIN_SPEED * delta_time).to_radians();
        for object in self.objects.iter_mut() {
            object.rotate_axis_angle(spin, Vector3::y());
            self.shader_program
                .set_uniform_mat4(&self.gl, "model", object.retrieve_model_matrix());
            self.shader_program
                .set_uniforms_from_material(&self.gl, object.material());
            unsafe {
                self.gl.bind_vertex_array(object.vao());
                self.gl
                    .draw_arrays(glow::TRIANGLES, 0, object.vertices_number() as i32);
            }
        }

        unsafe {
            self.gl.bind_vertex_array(None);
        }
    }

    /// Release every device resource this program created.
    pub fn cleanup(&mut self) {
        for object in self.objects.iter_mut() {
            object.release(&self.gl);
        }
        self.shader_program.release(&self.gl);
    }
}
