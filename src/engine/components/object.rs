use glow::HasContext;
use nalgebra::{Matrix4, Unit, UnitQuaternion, Vector3};

use super::material::Material;
use super::mesh::{FlatVertices, Mesh, MeshError};

/// A drawable scene entity: one mesh, one material and a local transform.
///
/// The model matrix is cached and lazily recomputed; every transform mutator
/// marks it dirty. Device buffers are created once from the flattened vertex
/// streams and released explicitly on teardown.
#[derive(Debug)]
pub struct Object {
    mesh: Mesh,
    material: Material,

    flat: FlatVertices,

    positions_vbo: Option<glow::Buffer>,
    normals_vbo: Option<glow::Buffer>,
    uvs_vbo: Option<glow::Buffer>,
    vao: Option<glow::VertexArray>,

    position: Vector3<f32>,
    rotation: UnitQuaternion<f32>,
    scale: Vector3<f32>,
    model_matrix: Matrix4<f32>,
    model_matrix_dirty: bool,
}

impl Object {
    pub fn new() -> Self {
        Self {
            mesh: Mesh::new(),
            material: Material::new(),
            flat: FlatVertices::default(),
            positions_vbo: None,
            normals_vbo: None,
            uvs_vbo: None,
            vao: None,
            position: Vector3::zeros(),
            rotation: UnitQuaternion::identity(),
            scale: Vector3::new(1.0, 1.0, 1.0),
            model_matrix: Matrix4::identity(),
            model_matrix_dirty: true,
        }
    }

    pub fn set_mesh(&mut self, mesh: Mesh) {
        if !mesh.has_normals() {
            log::info!("loaded object does not have any normals");
        }
        if !mesh.has_uvs() {
            log::info!("loaded object does not have any texture coordinates");
        }
        self.mesh = mesh;
    }

    pub fn mesh(&self) -> &Mesh {
        &self.mesh
    }

    pub fn set_material(&mut self, material: Material) {
        self.material = material;
    }

    pub fn material(&self) -> &Material {
        &self.material
    }

    pub fn material_mut(&mut self) -> &mut Material {
        &mut self.material
    }

    /// Flatten the mesh into the per-corner streams the device consumes.
    /// Replaces any previously computed streams.
    pub fn compute_vertices(&mut self) -> Result<(), MeshError> {
        self.flat = self.mesh.flatten()?;
        Ok(())
    }

    pub fn flat_vertices(&self) -> &FlatVertices {
        &self.flat
    }

    pub fn vertices_number(&self) -> usize {
        self.mesh.triangles_number() * 3
    }

    pub fn triangles_number(&self) -> usize {
        self.mesh.triangles_number()
    }

    /// Create one vertex buffer per present attribute stream, upload the
    /// flattened data and record the attribute layout in a vertex array.
    /// Attribute 0 is the position; the normal takes 1 when present and the
    /// uv stream takes the next free slot.
    pub fn create_vao(&mut self, gl: &glow::Context) -> Result<(), String> {
        unsafe {
            self.positions_vbo = Some(gl.create_buffer()?);
            self.update_positions_vbo(gl);

            if self.mesh.has_normals() {
                self.normals_vbo = Some(gl.create_buffer()?);
                self.update_normals_vbo(gl);
            }
            if self.mesh.has_uvs() {
                self.uvs_vbo = Some(gl.create_buffer()?);
                self.update_uvs_vbo(gl);
            }

            let vao = gl.create_vertex_array()?;
            self.vao = Some(vao);
            gl.bind_vertex_array(Some(vao));

            gl.bind_buffer(glow::ARRAY_BUFFER, self.positions_vbo);
            gl.vertex_attrib_pointer_f32(0, 3, glow::FLOAT, false, 0, 0);
            if let Some(vbo) = self.normals_vbo {
                gl.bind_buffer(glow::ARRAY_BUFFER, Some(vbo));
                gl.vertex_attrib_pointer_f32(1, 3, glow::FLOAT, false, 0, 0);
            }
            if let Some(vbo) = self.uvs_vbo {
                gl.bind_buffer(glow::ARRAY_BUFFER, Some(vbo));
                let location = if self.mesh.has_normals() { 2 } else { 1 };
                gl.vertex_attrib_pointer_f32(location, 2, glow::FLOAT, false, 0, 0);
            }

            gl.enable_vertex_attrib_array(0);
            if self.mesh.has_normals() || self.mesh.has_uvs() {
                gl.enable_vertex_attrib_array(1);
            }
            if self.mesh.has_normals() && self.mesh.has_uvs() {
                gl.enable_vertex_attrib_array(2);
            }

            gl.bind_vertex_array(None);
        }
        Ok(())
    }

    /// Re-upload every attribute stream into its existing buffer.
    pub fn update_vao(&self, gl: &glow::Context) {
        self.update_positions_vbo(gl);
        self.update_normals_vbo(gl);
        self.update_uvs_vbo(gl);
    }

    fn update_positions_vbo(&self, gl: &glow::Context) {
        if self.positions_vbo.is_some() {
            unsafe {
                gl.bind_buffer(glow::ARRAY_BUFFER, self.positions_vbo);
                gl.buffer_data_u8_slice(
                    glow::ARRAY_BUFFER,
                    bytemuck::cast_slice(&self.flat.positions),
                    glow::STATIC_DRAW,
                );
            }
        }
    }

    fn update_normals_vbo(&self, gl: &glow::Context) {
        if self.normals_vbo.is_some() {
            unsafe {
                gl.bind_buffer(glow::ARRAY_BUFFER, self.normals_vbo);
                gl.buffer_data_u8_slice(
                    glow::ARRAY_BUFFER,
                    bytemuck::cast_slice(&self.flat.normals),
                    glow::STATIC_DRAW,
                );
            }
        }
    }

    fn update_uvs_vbo(&self, gl: &glow::Context) {
        if self.uvs_vbo.is_some() {
            unsafe {
                gl.bind_buffer(glow::ARRAY_BUFFER, self.uvs_vbo);
                gl.buffer_data_u8_slice(
                    glow::ARRAY_BUFFER,
                    bytemuck::cast_slice(&self.flat.uvs),
                    glow::STATIC_DRAW,
                );
            }
        }
    }

    pub fn vao(&self) -> Option<glow::VertexArray> {
        self.vao
    }

    /// Delete the vertex array, the attribute buffers and the material's
    /// textures.
    pub fn release(&mut self, gl: &glow::Context) {
        unsafe {
            if let Some(vao) = self.vao.take() {
                gl.delete_vertex_array(vao);
            }
            for vbo in [
                self.positions_vbo.take(),
                self.normals_vbo.take(),
                self.uvs_vbo.take(),
            ]
            .into_iter()
            .flatten()
            {
                gl.delete_buffer(vbo);
            }
        }
        self.material.release(gl);
    }

    pub fn set_position(&mut self, position: Vector3<f32>) {
        self.position = position;
        self.model_matrix_dirty = true;
    }

    pub fn position(&self) -> &Vector3<f32> {
        &self.position
    }

    pub fn translate(&mut self, translation: Vector3<f32>) {
        self.position += translation;
        self.model_matrix_dirty = true;
    }

    pub fn set_rotation(&mut self, rotation: UnitQuaternion<f32>) {
        self.rotation = rotation;
        self.model_matrix_dirty = true;
    }

    /// Compose a new rotation on top of the current one. The new rotation is
    /// applied in world space after the existing rotation.
    pub fn rotate(&mut self, rotation: UnitQuaternion<f32>) {
        self.rotation = rotation * self.rotation;
        self.model_matrix_dirty = true;
    }

    pub fn rotate_axis_angle(&mut self, angle: f32, axis: Vector3<f32>) {
        self.rotate(UnitQuaternion::from_axis_angle(
            &Unit::new_normalize(axis),
            angle,
        ));
    }

    pub fn set_scale(&mut self, scale: Vector3<f32>) {
        self.scale = scale;
        self.model_matrix_dirty = true;
    }

    /// Component-wise multiply the current scale.
    pub fn re_scale(&mut self, scale: Vector3<f32>) {
        self.scale.component_mul_assign(&scale);
        self.model_matrix_dirty = true;
    }

    /// Return the model matrix, recomputing it only when a mutator ran since
    /// the last call. Composition is translation * rotation * scale.
    pub fn retrieve_model_matrix(&mut self) -> &Matrix4<f32> {
        if self.model_matrix_dirty {
            self.model_matrix = Matrix4::new_translation(&self.position)
                * self.rotation.to_homogeneous()
                * Matrix4::new_nonuniform_scaling(&self.scale);
            self.model_matrix_dirty = false;
        }
        &self.model_matrix
    }
}

impl Default for Object {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::super::mesh::{Corner, Triangle};
    use super::*;
    use approx::assert_relative_eq;
    use nalgebra::Vector4;
    use std::f32::consts::FRAC_PI_2;

    #[test]
    fn model_matrix_starts_as_identity_placement() {
        let mut object = Object::new();
        assert_eq!(*object.retrieve_model_matrix(), Matrix4::identity());
    }

    #[test]
    fn retrieve_does_not_recompute_without_mutation() {
        let mut object = Object::new();
        object.translate(Vector3::new(1.0, 2.0, 3.0));
        let first = *object.retrieve_model_matrix();
        assert!(!object.model_matrix_dirty);
        let second = *object.retrieve_model_matrix();
        assert_eq!(first, second);
    }

    #[test]
    fn every_mutator_marks_the_cache_dirty() {
        let mut object = Object::new();
        object.retrieve_model_matrix();

        object.set_position(Vector3::new(1.0, 0.0, 0.0));
        assert!(object.model_matrix_dirty);
        object.retrieve_model_matrix();

        object.rotate_axis_angle(0.1, Vector3::y());
        assert!(object.model_matrix_dirty);
        object.retrieve_model_matrix();

        object.re_scale(Vector3::new(2.0, 2.0, 2.0));
        assert!(object.model_matrix_dirty);
    }

    #[test]
    fn composition_order_is_translation_rotation_scale() {
        let mut object = Object::new();
        object.set_position(Vector3::new(1.0, 2.0, 3.0));
        object.set_scale(Vector3::new(2.0, 2.0, 2.0));
        object.set_rotation(UnitQuaternion::from_axis_angle(
            &Vector3::z_axis(),
            FRAC_PI_2,
        ));

        // (1, 0, 0) scales to (2, 0, 0), rotates to (0, 2, 0), then
        // translates to (1, 4, 3).
        let mapped = object.retrieve_model_matrix() * Vector4::new(1.0, 0.0, 0.0, 1.0);
        assert_relative_eq!(mapped.x, 1.0, epsilon = 1e-5);
        assert_relative_eq!(mapped.y, 4.0, epsilon = 1e-5);
        assert_relative_eq!(mapped.z, 3.0, epsilon = 1e-5);
    }

    #[test]
    fn rotate_applies_the_new_rotation_after_the_current_one() {
        let first = UnitQuaternion::from_axis_angle(&Vector3::y_axis(), 0.3);
        let second = UnitQuaternion::from_axis_angle(&Vector3::x_axis(), 0.7);

        let mut object = Object::new();
        object.set_rotation(first);
        object.rotate(second);

        let expected = second * first;
        let composed = object.retrieve_model_matrix();
        assert_relative_eq!(
            *composed,
            expected.to_homogeneous(),
            epsilon = 1e-5
        );
    }

    #[test]
    fn re_scale_composes_component_wise() {
        let mut object = Object::new();
        object.set_scale(Vector3::new(2.0, 1.0, 1.0));
        object.re_scale(Vector3::new(3.0, 2.0, 1.0));
        let matrix = object.retrieve_model_matrix();
        assert_relative_eq!(matrix[(0, 0)], 6.0);
        assert_relative_eq!(matrix[(1, 1)], 2.0);
        assert_relative_eq!(matrix[(2, 2)], 1.0);
    }

    #[test]
    fn vertices_number_follows_the_mesh() {
        let mut mesh = Mesh::new();
        mesh.add_position(Vector3::zeros());
        mesh.add_triangle(Triangle::new([
            Corner { position: 0, normal: None, uv: None }; 3
        ]));
        let mut object = Object::new();
        object.set_mesh(mesh);
        assert_eq!(object.vertices_number(), 3);
    }
}
