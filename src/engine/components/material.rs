use std::path::{Path, PathBuf};

use glow::HasContext;
use image::RgbaImage;
use nalgebra::Vector3;

/// Surface shading coefficients plus optional texture maps.
///
/// A material is copied by value into every object that uses it; each copy
/// uploads and releases its own device textures. A texture handle is only
/// ever set after a decoded image existed for the matching map path, so
/// "handle set, path empty" cannot occur.
#[derive(Debug, Clone)]
pub struct Material {
    /// Opacity.
    pub d: f32,
    /// Specular exponent.
    pub ns: f32,
    /// Index of refraction.
    pub ni: f32,
    /// Legacy coefficient, parsed but unused by the shader.
    pub km: f32,

    pub ambient_color: Vector3<f32>,
    pub diffuse_color: Vector3<f32>,
    pub specular_color: Vector3<f32>,

    pub diffuse_map: Option<PathBuf>,
    pub specular_map: Option<PathBuf>,

    diffuse_image: Option<RgbaImage>,
    specular_image: Option<RgbaImage>,

    diffuse_texture: Option<glow::Texture>,
    specular_texture: Option<glow::Texture>,
}

impl Material {
    pub fn new() -> Self {
        Self {
            d: 1.0,
            ns: 0.0,
            ni: 0.0,
            km: 0.0,
            ambient_color: Vector3::zeros(),
            diffuse_color: Vector3::zeros(),
            specular_color: Vector3::zeros(),
            diffuse_map: None,
            specular_map: None,
            diffuse_image: None,
            specular_image: None,
            diffuse_texture: None,
            specular_texture: None,
        }
    }

    /// Reset every field to its default. Device handles are forgotten, not
    /// released; use `release` for materials that reached the device.
    pub fn clear(&mut self) {
        *self = Self::new();
    }

    /// Eagerly decode the referenced map images, forcing RGBA. A failed
    /// decode is reported and leaves that map without pixels, which in turn
    /// keeps its texture handle unset.
    pub fn load_images(&mut self) {
        self.diffuse_image = Self::decode(self.diffuse_map.as_deref());
        self.specular_image = Self::decode(self.specular_map.as_deref());
    }

    fn decode(path: Option<&Path>) -> Option<RgbaImage> {
        let path = path?;
        match image::open(path) {
            Ok(decoded) => Some(decoded.to_rgba8()),
            Err(e) => {
                log::error!("cannot load the texture {}: {}", path.display(), e);
                None
            }
        }
    }

    /// Upload every decoded image into a device texture, reusing an existing
    /// handle when one was created before.
    pub fn create_textures(&mut self, gl: &glow::Context) -> Result<(), String> {
        if let Some(image) = &self.diffuse_image {
            self.diffuse_texture = Some(Self::upload(gl, self.diffuse_texture, image)?);
        }
        if let Some(image) = &self.specular_image {
            self.specular_texture = Some(Self::upload(gl, self.specular_texture, image)?);
        }
        Ok(())
    }

    fn upload(
        gl: &glow::Context,
        existing: Option<glow::Texture>,
        image: &RgbaImage,
    ) -> Result<glow::Texture, String> {
        unsafe {
            let texture = match existing {
                Some(texture) => texture,
                None => gl.create_texture()?,
            };
            gl.bind_texture(glow::TEXTURE_2D, Some(texture));
            gl.tex_image_2d(
                glow::TEXTURE_2D,
                0,
                glow::RGBA as i32,
                image.width() as i32,
                image.height() as i32,
                0,
                glow::RGBA,
                glow::UNSIGNED_BYTE,
                glow::PixelUnpackData::Slice(Some(image.as_raw())),
            );
            gl.tex_parameter_i32(glow::TEXTURE_2D, glow::TEXTURE_WRAP_S, glow::REPEAT as i32);
            gl.tex_parameter_i32(glow::TEXTURE_2D, glow::TEXTURE_WRAP_T, glow::REPEAT as i32);
            gl.tex_parameter_i32(glow::TEXTURE_2D, glow::TEXTURE_MIN_FILTER, glow::NEAREST as i32);
            gl.tex_parameter_i32(glow::TEXTURE_2D, glow::TEXTURE_MAG_FILTER, glow::NEAREST as i32);
            gl.bind_texture(glow::TEXTURE_2D, None);
            Ok(texture)
        }
    }

    /// Delete the device textures this material owns.
    pub fn release(&mut self, gl: &glow::Context) {
        unsafe {
            if let Some(texture) = self.diffuse_texture.take() {
                gl.delete_texture(texture);
            }
            if let Some(texture) = self.specular_texture.take() {
                gl.delete_texture(texture);
            }
        }
    }

    pub fn diffuse_texture(&self) -> Option<glow::Texture> {
        self.diffuse_texture
    }

    pub fn specular_texture(&self) -> Option<glow::Texture> {
        self.specular_texture
    }

    pub fn has_diffuse_texture(&self) -> bool {
        self.diffuse_texture.is_some()
    }

    pub fn has_specular_texture(&self) -> bool {
        self.specular_texture.is_some()
    }
}

impl Default for Material {
    fn default() -> Self {
        Self::new()
    }
}
