use std::collections::HashMap;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};
use std::str::SplitWhitespace;

use nalgebra::{Vector2, Vector3};
use thiserror::Error;

use crate::engine::components::material::Material;
use crate::engine::components::mesh::{Corner, Mesh, Triangle};
use crate::engine::components::object::Object;

/// Materials parsed from a material file, keyed by `newmtl` name.
pub type MaterialTable = HashMap<String, Material>;

/// How malformed numeric tokens are treated.
///
/// `Lenient` coerces them to a default and logs a warning, matching the
/// historical behavior of stream-extraction parsers; `Strict` fails the load.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ParseMode {
    #[default]
    Lenient,
    Strict,
}

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("could not open {path}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error("line {line}: malformed numeric token `{token}`")]
    Malformed { line: usize, token: String },
    #[error("line {line}: face corner `{corner}` carries no position index")]
    MissingPosition { line: usize, corner: String },
    #[error("line {line}: index {index} references data from a previous object")]
    StaleIndex { line: usize, index: usize },
    #[error("line {line}: face with fewer than 3 corners")]
    ShortFace { line: usize },
}

/// Per-stream index bookkeeping for multi-object files. `offsets` holds the
/// highest global index the previous completed sub-object consumed;
/// `high_water` tracks the running maximum of the current one.
#[derive(Debug, Clone, Copy, Default)]
struct StreamOffsets {
    position: usize,
    uv: usize,
    normal: usize,
}

/// A face corner as written in the file: 1-based indices, global to the file.
struct RawCorner {
    position: usize,
    uv: Option<usize>,
    normal: Option<usize>,
}

/// Parser for the line-oriented geometry and material text formats.
///
/// Directives: `v`, `vt`, `vn`, `f` (triangles only, corner forms `p`,
/// `p/t`, `p//n`, `p/t/n`), `o`, `usemtl`; unrecognized directives are
/// skipped for forward compatibility. File indices are 1-based and global;
/// each sub-object's mesh receives locally 0-based indices.
#[derive(Debug, Default)]
pub struct ObjLoader {
    mode: ParseMode,
}

impl ObjLoader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_mode(mode: ParseMode) -> Self {
        Self { mode }
    }

    /// Load a whole geometry file into a single mesh.
    pub fn load_geometry(&self, path: &Path, mesh: &mut Mesh) -> Result<(), LoadError> {
        let file = File::open(path).map_err(|source| LoadError::Open {
            path: path.to_path_buf(),
            source,
        })?;
        log::info!("load model {}", path.display());
        self.load_geometry_from(BufReader::new(file), mesh)?;
        log::info!(
            "unique vertices: {}, normals: {}, uvs: {}, triangles: {}",
            mesh.positions_number(),
            mesh.normals_number(),
            mesh.uvs_number(),
            mesh.triangles_number()
        );
        Ok(())
    }

    /// Load a multi-object geometry file, one `Object` per `o` block. When a
    /// material file is given its table is parsed first and `usemtl` names
    /// resolve against it; a missing material file degrades to geometry-only.
    pub fn load_objects(
        &self,
        geometry_path: &Path,
        material_path: Option<&Path>,
    ) -> Result<Vec<Object>, LoadError> {
        let materials = match material_path {
            Some(path) => match self.load_materials(path) {
                Ok(table) => Some(table),
                Err(e) => {
                    log::error!("could not load the material file: {}", e);
                    None
                }
            },
            None => None,
        };

        let file = File::open(geometry_path).map_err(|source| LoadError::Open {
            path: geometry_path.to_path_buf(),
            source,
        })?;
        log::info!("load model geometry {}", geometry_path.display());
        self.load_objects_from(BufReader::new(file), materials.as_ref())
    }

    /// Parse a material file into a table and eagerly decode every referenced
    /// texture image.
    pub fn load_materials(&self, path: &Path) -> Result<MaterialTable, LoadError> {
        let file = File::open(path).map_err(|source| LoadError::Open {
            path: path.to_path_buf(),
            source,
        })?;
        log::info!("load model material {}", path.display());
        let folder = path.parent().unwrap_or_else(|| Path::new(""));
        let mut table = self.load_materials_from(BufReader::new(file), folder)?;
        for material in table.values_mut() {
            material.load_images();
        }
        Ok(table)
    }

    pub fn load_geometry_from<R: BufRead>(
        &self,
        reader: R,
        mesh: &mut Mesh,
    ) -> Result<(), LoadError> {
        let offsets = StreamOffsets::default();
        let mut high_water = StreamOffsets::default();

        for (number, line) in reader.lines().enumerate() {
            let line = line?;
            let number = number + 1;
            let mut tokens = line.split_whitespace();
            match tokens.next() {
                Some("v") => mesh.add_position(self.parse_vec3(&mut tokens, number)?),
                Some("vt") => mesh.add_uv(self.parse_vec2(&mut tokens, number)?),
                Some("vn") => mesh.add_normal(self.parse_vec3(&mut tokens, number)?),
                Some("f") => {
                    if let Some(triangle) =
                        self.parse_face(&mut tokens, number, &offsets, &mut high_water)?
                    {
                        mesh.add_triangle(triangle);
                    }
                }
                _ => {} // unrecognized directives are skipped
            }
        }
        Ok(())
    }

    pub fn load_objects_from<R: BufRead>(
        &self,
        reader: R,
        materials: Option<&MaterialTable>,
    ) -> Result<Vec<Object>, LoadError> {
        let mut objects = Vec::new();
        let mut mesh = Mesh::new();
        let mut material_name = String::new();
        let mut object_count = 0usize;

        // Offsets freeze at the previous object's high-water mark; indices in
        // the current object localize against them.
        let mut offsets = StreamOffsets::default();
        let mut high_water = StreamOffsets::default();

        for (number, line) in reader.lines().enumerate() {
            let line = line?;
            let number = number + 1;
            let mut tokens = line.split_whitespace();
            match tokens.next() {
                Some("o") => {
                    if object_count != 0 {
                        offsets = high_water;
                        objects.push(finish_object(&mut mesh, &mut material_name, materials));
                    }
                    object_count += 1;
                }
                Some("v") => mesh.add_position(self.parse_vec3(&mut tokens, number)?),
                Some("vt") => mesh.add_uv(self.parse_vec2(&mut tokens, number)?),
                Some("vn") => mesh.add_normal(self.parse_vec3(&mut tokens, number)?),
                Some("f") => {
                    if let Some(triangle) =
                        self.parse_face(&mut tokens, number, &offsets, &mut high_water)?
                    {
                        mesh.add_triangle(triangle);
                    }
                }
                Some("usemtl") => {
                    if let Some(name) = tokens.next() {
                        material_name = name.to_string();
                    }
                }
                _ => {}
            }
        }
        if object_count != 0 {
            objects.push(finish_object(&mut mesh, &mut material_name, materials));
        }

        log::info!("objects loaded: {}", object_count);
        Ok(objects)
    }

    pub fn load_materials_from<R: BufRead>(
        &self,
        reader: R,
        folder: &Path,
    ) -> Result<MaterialTable, LoadError> {
        let mut table = MaterialTable::new();
        let mut material = Material::new();
        let mut name = String::new();
        let mut count = 0usize;

        for (number, line) in reader.lines().enumerate() {
            let line = line?;
            let number = number + 1;
            let mut tokens = line.split_whitespace();
            match tokens.next() {
                Some("newmtl") => {
                    if count != 0 {
                        table.insert(
                            std::mem::take(&mut name),
                            std::mem::replace(&mut material, Material::new()),
                        );
                    }
                    name = tokens.next().unwrap_or_default().to_string();
                    count += 1;
                }
                Some("d") => material.d = self.parse_f32(tokens.next(), number)?,
                Some("Ns") => material.ns = self.parse_f32(tokens.next(), number)?,
                Some("Ni") => material.ni = self.parse_f32(tokens.next(), number)?,
                Some("Km") => material.km = self.parse_f32(tokens.next(), number)?,
                Some("Ka") => material.ambient_color = self.parse_vec3(&mut tokens, number)?,
                Some("Kd") => material.diffuse_color = self.parse_vec3(&mut tokens, number)?,
                Some("Ks") => material.specular_color = self.parse_vec3(&mut tokens, number)?,
                Some("map_Kd") => {
                    if let Some(file) = tokens.next() {
                        material.diffuse_map = Some(folder.join(file));
                    }
                }
                Some("map_Ks") => {
                    // A bare `map_Ks` falls back to the diffuse map path.
                    material.specular_map = match tokens.next() {
                        Some(file) => Some(folder.join(file)),
                        None => material.diffuse_map.clone(),
                    };
                }
                _ => {}
            }
        }
        if count != 0 {
            table.insert(name, material);
        }

        log::info!("loaded materials: {}", count);
        Ok(table)
    }

    fn parse_face(
        &self,
        tokens: &mut SplitWhitespace,
        line: usize,
        offsets: &StreamOffsets,
        high_water: &mut StreamOffsets,
    ) -> Result<Option<Triangle>, LoadError> {
        let mut corners = [Corner {
            position: 0,
            normal: None,
            uv: None,
        }; 3];

        for corner in corners.iter_mut() {
            let Some(token) = tokens.next() else {
                return match self.mode {
                    ParseMode::Lenient => {
                        log::warn!("line {}: face with fewer than 3 corners skipped", line);
                        Ok(None)
                    }
                    ParseMode::Strict => Err(LoadError::ShortFace { line }),
                };
            };
            let raw = self.parse_corner(token, line)?;

            high_water.position = high_water.position.max(raw.position);
            if let Some(uv) = raw.uv {
                high_water.uv = high_water.uv.max(uv);
            }
            if let Some(normal) = raw.normal {
                high_water.normal = high_water.normal.max(normal);
            }

            let Some(position) = localize(raw.position, offsets.position) else {
                return match self.mode {
                    ParseMode::Lenient => {
                        log::warn!(
                            "line {}: index {} references a previous object, face skipped",
                            line,
                            raw.position
                        );
                        Ok(None)
                    }
                    ParseMode::Strict => Err(LoadError::StaleIndex {
                        line,
                        index: raw.position,
                    }),
                };
            };
            *corner = Corner {
                position,
                uv: raw.uv.and_then(|uv| localize(uv, offsets.uv)),
                normal: raw.normal.and_then(|normal| localize(normal, offsets.normal)),
            };
        }

        Ok(Some(Triangle::new(corners)))
    }

    /// Split a face corner token on `/`. An empty sub-field stays absent and
    /// is never recorded as the value of the neighboring field.
    fn parse_corner(&self, token: &str, line: usize) -> Result<RawCorner, LoadError> {
        let mut fields = [None; 3]; // position, uv, normal in file order
        for (slot, field) in token.splitn(3, '/').enumerate() {
            if field.is_empty() {
                continue;
            }
            match field.parse::<i64>() {
                Ok(index) if index > 0 => fields[slot] = Some(index as usize),
                Ok(index) => {
                    log::warn!(
                        "line {}: non-positive index {} in `{}` treated as absent",
                        line,
                        index,
                        token
                    );
                }
                Err(_) => match self.mode {
                    ParseMode::Lenient => {
                        log::warn!(
                            "line {}: malformed index `{}` in `{}` treated as absent",
                            line,
                            field,
                            token
                        );
                    }
                    ParseMode::Strict => {
                        return Err(LoadError::Malformed {
                            line,
                            token: field.to_string(),
                        })
                    }
                },
            }
        }

        let Some(position) = fields[0] else {
            return Err(LoadError::MissingPosition {
                line,
                corner: token.to_string(),
            });
        };
        Ok(RawCorner {
            position,
            uv: fields[1],
            normal: fields[2],
        })
    }

    fn parse_vec3(
        &self,
        tokens: &mut SplitWhitespace,
        line: usize,
    ) -> Result<Vector3<f32>, LoadError> {
        Ok(Vector3::new(
            self.parse_f32(tokens.next(), line)?,
            self.parse_f32(tokens.next(), line)?,
            self.parse_f32(tokens.next(), line)?,
        ))
    }

    fn parse_vec2(
        &self,
        tokens: &mut SplitWhitespace,
        line: usize,
    ) -> Result<Vector2<f32>, LoadError> {
        Ok(Vector2::new(
            self.parse_f32(tokens.next(), line)?,
            self.parse_f32(tokens.next(), line)?,
        ))
    }

    fn parse_f32(&self, token: Option<&str>, line: usize) -> Result<f32, LoadError> {
        let Some(token) = token else {
            return match self.mode {
                ParseMode::Lenient => {
                    log::warn!("line {}: missing numeric token, using 0", line);
                    Ok(0.0)
                }
                ParseMode::Strict => Err(LoadError::Malformed {
                    line,
                    token: String::new(),
                }),
            };
        };
        match token.parse::<f32>() {
            Ok(value) => Ok(value),
            Err(_) => match self.mode {
                ParseMode::Lenient => {
                    log::warn!("line {}: malformed numeric token `{}`, using 0", line, token);
                    Ok(0.0)
                }
                ParseMode::Strict => Err(LoadError::Malformed {
                    line,
                    token: token.to_string(),
                }),
            },
        }
    }
}

/// Convert a 1-based global index into a 0-based index local to the current
/// sub-object. `None` when the index points into a previous object's data.
fn localize(global: usize, offset: usize) -> Option<usize> {
    global.checked_sub(offset + 1)
}

/// Materialize the accumulated mesh as an object, attaching the pending
/// material by name, and reset both for the next sub-object.
fn finish_object(
    mesh: &mut Mesh,
    material_name: &mut String,
    materials: Option<&MaterialTable>,
) -> Object {
    let mut object = Object::new();
    object.set_mesh(std::mem::take(mesh));
    if let Some(table) = materials {
        if !material_name.is_empty() {
            match table.get(material_name.as_str()) {
                Some(material) => object.set_material(material.clone()),
                None => log::warn!("material `{}` not found in the material table", material_name),
            }
        }
    }
    material_name.clear();
    object
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::io::Cursor;

    fn loader() -> ObjLoader {
        ObjLoader::new()
    }

    #[test]
    fn geometry_indices_convert_from_one_based() {
        let source = "\
v 0 0 0
v 1 0 0
v 0 1 0
vn 0 0 1
vt 0.5 0.5
f 1/1/1 2/1/1 3/1/1
";
        let mut mesh = Mesh::new();
        loader()
            .load_geometry_from(Cursor::new(source), &mut mesh)
            .unwrap();
        assert_eq!(mesh.positions_number(), 3);
        let triangle = mesh.triangles()[0];
        assert_eq!(triangle.corners[0].position, 0);
        assert_eq!(triangle.corners[2].position, 2);
        assert_eq!(triangle.corners[0].normal, Some(0));
        assert_eq!(triangle.corners[0].uv, Some(0));
    }

    #[test]
    fn empty_subfields_stay_absent() {
        let source = "\
v 0 0 0
v 1 0 0
v 0 1 0
vn 0 0 1
f 1//1 2//1 3//1
";
        let mut mesh = Mesh::new();
        loader()
            .load_geometry_from(Cursor::new(source), &mut mesh)
            .unwrap();
        let corner = mesh.triangles()[0].corners[0];
        assert_eq!(corner.uv, None);
        assert_eq!(corner.normal, Some(0));
    }

    #[test]
    fn position_uv_form_leaves_normal_absent() {
        let source = "\
v 0 0 0
v 1 0 0
v 0 1 0
vt 0 0
vt 1 0
vt 0 1
f 1/1 2/2 3/3
";
        let mut mesh = Mesh::new();
        loader()
            .load_geometry_from(Cursor::new(source), &mut mesh)
            .unwrap();
        let corner = mesh.triangles()[0].corners[1];
        assert_eq!(corner.uv, Some(1));
        assert_eq!(corner.normal, None);
    }

    #[test]
    fn unrecognized_directives_are_skipped() {
        let source = "\
# comment line
mtllib scene.mtl
s off
g group1
v 0 0 0
";
        let mut mesh = Mesh::new();
        loader()
            .load_geometry_from(Cursor::new(source), &mut mesh)
            .unwrap();
        assert_eq!(mesh.positions_number(), 1);
        assert_eq!(mesh.triangles_number(), 0);
    }

    #[test]
    fn lenient_mode_defaults_malformed_numbers_to_zero() {
        let source = "v 1.0 oops 3.0\n";
        let mut mesh = Mesh::new();
        loader()
            .load_geometry_from(Cursor::new(source), &mut mesh)
            .unwrap();
        assert_eq!(mesh.positions_number(), 1);
    }

    #[test]
    fn strict_mode_rejects_malformed_numbers() {
        let source = "v 1.0 oops 3.0\n";
        let mut mesh = Mesh::new();
        let result = ObjLoader::with_mode(ParseMode::Strict)
            .load_geometry_from(Cursor::new(source), &mut mesh);
        assert!(matches!(
            result,
            Err(LoadError::Malformed { line: 1, .. })
        ));
    }

    #[test]
    fn corner_without_position_index_is_an_error() {
        let source = "\
v 0 0 0
vn 0 0 1
f //1 //1 //1
";
        let mut mesh = Mesh::new();
        let result = loader().load_geometry_from(Cursor::new(source), &mut mesh);
        assert!(matches!(result, Err(LoadError::MissingPosition { .. })));
    }

    // End-to-end scenario: 4 positions, 4 `p//n` triangles, no uvs.
    #[test]
    fn single_mesh_flattens_to_the_expected_stream_sizes() {
        let source = "\
v 0 0 0
v 1 0 0
v 0 1 0
v 0 0 1
vn 0 0 1
vn 0 1 0
f 1//1 2//1 3//1
f 1//1 2//2 4//2
f 2//1 3//1 4//1
f 1//2 3//2 4//2
";
        let mut mesh = Mesh::new();
        loader()
            .load_geometry_from(Cursor::new(source), &mut mesh)
            .unwrap();
        assert_eq!(mesh.positions_number(), 4);
        assert_eq!(mesh.uvs_number(), 0);
        assert!(mesh.normals_number() >= 1);
        assert_eq!(mesh.triangles_number(), 4);

        let flat = mesh.flatten().unwrap();
        assert_eq!(flat.positions.len(), 4 * 3 * 3);
        assert_eq!(flat.normals.len(), 4 * 3 * 3);
        assert_eq!(flat.uvs.len(), 0);
    }

    // End-to-end scenario: two `o` blocks with global position numbering.
    #[test]
    fn second_object_gets_local_zero_based_indices() {
        let source = "\
o first
v 0 0 0
v 1 0 0
v 0 1 0
v 1 1 0
f 1 2 3
f 2 4 3
o second
v 2 0 0
v 3 0 0
v 2 1 0
v 3 1 0
f 5 6 7
f 6 8 7
";
        let objects = loader()
            .load_objects_from(Cursor::new(source), None)
            .unwrap();
        assert_eq!(objects.len(), 2);

        let second = objects[1].mesh();
        assert_eq!(second.positions_number(), 4);
        for triangle in second.triangles() {
            for corner in &triangle.corners {
                assert!(corner.position < 4);
            }
        }
        // Both objects flatten cleanly: every adjusted index is in range.
        assert!(objects[0].mesh().flatten().is_ok());
        assert!(second.flatten().is_ok());
    }

    #[test]
    fn offsets_advance_independently_per_attribute_stream() {
        // The first object consumes 3 positions, 1 normal and no uvs; the
        // second object's indices must localize against those exact maxima.
        let source = "\
o first
v 0 0 0
v 1 0 0
v 0 1 0
vn 0 0 1
f 1//1 2//1 3//1
o second
v 0 0 1
v 1 0 1
v 0 1 1
vn 0 1 0
vn 1 0 0
vt 0 0
vt 1 1
f 4/1/2 5/2/3 6/1/2
";
        let objects = loader()
            .load_objects_from(Cursor::new(source), None)
            .unwrap();
        assert_eq!(objects.len(), 2);

        let second = objects[1].mesh();
        assert_eq!(second.positions_number(), 3);
        assert_eq!(second.normals_number(), 2);
        assert_eq!(second.uvs_number(), 2);

        let triangle = second.triangles()[0];
        assert_eq!(triangle.corners[0].position, 0);
        assert_eq!(triangle.corners[0].normal, Some(0));
        assert_eq!(triangle.corners[0].uv, Some(0));
        assert_eq!(triangle.corners[1].position, 1);
        assert_eq!(triangle.corners[1].normal, Some(1));
        assert_eq!(triangle.corners[1].uv, Some(1));
        assert!(second.flatten().is_ok());
    }

    #[test]
    fn file_without_object_directives_yields_no_objects() {
        let source = "\
v 0 0 0
v 1 0 0
v 0 1 0
f 1 2 3
";
        let objects = loader()
            .load_objects_from(Cursor::new(source), None)
            .unwrap();
        assert!(objects.is_empty());
    }

    #[test]
    fn stale_index_is_rejected_in_strict_mode() {
        let source = "\
o first
v 0 0 0
v 1 0 0
v 0 1 0
f 1 2 3
o second
v 0 0 1
v 1 0 1
v 0 1 1
f 1 5 6
";
        let result = ObjLoader::with_mode(ParseMode::Strict)
            .load_objects_from(Cursor::new(source), None);
        assert!(matches!(
            result,
            Err(LoadError::StaleIndex { index: 1, .. })
        ));

        // Lenient mode drops the face instead.
        let objects = loader()
            .load_objects_from(Cursor::new(source), None)
            .unwrap();
        assert_eq!(objects[1].mesh().triangles_number(), 0);
    }

    #[test]
    fn usemtl_attaches_the_named_material_per_object() {
        let mut red = Material::new();
        red.diffuse_color = Vector3::new(1.0, 0.0, 0.0);
        let mut table = MaterialTable::new();
        table.insert("Red".to_string(), red);

        let source = "\
o plain
v 0 0 0
v 1 0 0
v 0 1 0
f 1 2 3
o tinted
usemtl Red
v 0 0 1
v 1 0 1
v 0 1 1
f 4 5 6
";
        let objects = loader()
            .load_objects_from(Cursor::new(source), Some(&table))
            .unwrap();
        assert_eq!(objects.len(), 2);
        assert_eq!(objects[0].material().diffuse_color, Vector3::zeros());
        assert_eq!(
            objects[1].material().diffuse_color,
            Vector3::new(1.0, 0.0, 0.0)
        );
    }

    // End-to-end scenario: one material block, color only.
    #[test]
    fn material_block_parses_color_without_maps() {
        let source = "\
newmtl Red
Kd 1 0 0
";
        let table = loader()
            .load_materials_from(Cursor::new(source), Path::new("assets/models"))
            .unwrap();
        let red = &table["Red"];
        assert_eq!(red.diffuse_color, Vector3::new(1.0, 0.0, 0.0));
        assert!(red.diffuse_map.is_none());
        assert!(!red.has_diffuse_texture());
    }

    #[test]
    fn material_table_flushes_each_block_once() {
        let source = "\
newmtl First
d 0.5
Ns 10
newmtl Second
Ka 0.1 0.2 0.3
Ni 1.5
Km 0.25
";
        let table = loader()
            .load_materials_from(Cursor::new(source), Path::new(""))
            .unwrap();
        assert_eq!(table.len(), 2);
        assert_relative_eq!(table["First"].d, 0.5);
        assert_relative_eq!(table["First"].ns, 10.0);
        // The second block starts from defaults again.
        assert_relative_eq!(table["Second"].d, 1.0);
        assert_relative_eq!(table["Second"].ni, 1.5);
        assert_relative_eq!(table["Second"].km, 0.25);
        assert_eq!(
            table["Second"].ambient_color,
            Vector3::new(0.1, 0.2, 0.3)
        );
    }

    #[test]
    fn map_paths_resolve_against_the_material_folder() {
        let source = "\
newmtl Wood
map_Kd wood.png
map_Ks wood_spec.png
";
        let table = loader()
            .load_materials_from(Cursor::new(source), Path::new("assets/models"))
            .unwrap();
        let wood = &table["Wood"];
        assert_eq!(
            wood.diffuse_map.as_deref(),
            Some(Path::new("assets/models/wood.png"))
        );
        assert_eq!(
            wood.specular_map.as_deref(),
            Some(Path::new("assets/models/wood_spec.png"))
        );
    }

    #[test]
    fn bare_specular_map_falls_back_to_the_diffuse_path() {
        let source = "\
newmtl Wood
map_Kd wood.png
map_Ks
";
        let table = loader()
            .load_materials_from(Cursor::new(source), Path::new("assets/models"))
            .unwrap();
        let wood = &table["Wood"];
        assert_eq!(wood.specular_map, wood.diffuse_map);
        assert!(wood.specular_map.is_some());
    }

    #[test]
    fn missing_geometry_file_is_reported() {
        let result = loader().load_objects(Path::new("does/not/exist.obj"), None);
        assert!(matches!(result, Err(LoadError::Open { .. })));
    }
}
