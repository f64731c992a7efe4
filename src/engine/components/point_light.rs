use nalgebra::Vector3;

/// A single point light with separate diffuse, specular and ambient colors.
#[derive(Debug, Clone)]
pub struct PointLight {
    position: Vector3<f32>,
    diffuse: Vector3<f32>,
    specular: Vector3<f32>,
    ambient: Vector3<f32>,
}

impl PointLight {
    pub fn new(position: Vector3<f32>) -> Self {
        Self {
            position,
            diffuse: Vector3::zeros(),
            specular: Vector3::zeros(),
            ambient: Vector3::zeros(),
        }
    }

    pub fn with_colors(
        position: Vector3<f32>,
        diffuse: Vector3<f32>,
        specular: Vector3<f32>,
        ambient: Vector3<f32>,
    ) -> Self {
        Self {
            position,
            diffuse,
            specular,
            ambient,
        }
    }

    pub fn set_position(&mut self, position: Vector3<f32>) {
        self.position = position;
    }

    pub fn set_colors(
        &mut self,
        diffuse: Vector3<f32>,
        specular: Vector3<f32>,
        ambient: Vector3<f32>,
    ) {
        self.diffuse = diffuse;
        self.specular = specular;
        self.ambient = ambient;
    }

    pub fn position(&self) -> &Vector3<f32> {
        &self.position
    }

    pub fn diffuse_color(&self) -> &Vector3<f32> {
        &self.diffuse
    }

    pub fn specular_color(&self) -> &Vector3<f32> {
        &self.specular
    }

    pub fn ambient_color(&self) -> &Vector3<f32> {
        &self.ambient
    }
}

impl Default for PointLight {
    fn default() -> Self {
        Self::new(Vector3::zeros())
    }
}
