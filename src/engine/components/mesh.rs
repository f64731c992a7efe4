use nalgebra::{Vector2, Vector3};
use thiserror::Error;

/// One vertex reference within a triangle.
///
/// Indices are 0-based into the owning mesh's attribute arrays. A position
/// index is always present; the normal and uv indices are absent when the
/// face line omitted them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Corner {
    pub position: usize,
    pub normal: Option<usize>,
    pub uv: Option<usize>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Triangle {
    pub corners: [Corner; 3],
}

impl Triangle {
    pub fn new(corners: [Corner; 3]) -> Self {
        Self { corners }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum MeshError {
    #[error("triangle {triangle}, corner {corner}: position index {index} out of range ({len} positions)")]
    PositionOutOfRange {
        triangle: usize,
        corner: usize,
        index: usize,
        len: usize,
    },
    #[error("triangle {triangle}, corner {corner}: mesh has normals but the corner carries no normal index")]
    MissingNormal { triangle: usize, corner: usize },
    #[error("triangle {triangle}, corner {corner}: normal index {index} out of range ({len} normals)")]
    NormalOutOfRange {
        triangle: usize,
        corner: usize,
        index: usize,
        len: usize,
    },
    #[error("triangle {triangle}, corner {corner}: mesh has uvs but the corner carries no uv index")]
    MissingUv { triangle: usize, corner: usize },
    #[error("triangle {triangle}, corner {corner}: uv index {index} out of range ({len} uvs)")]
    UvOutOfRange {
        triangle: usize,
        corner: usize,
        index: usize,
        len: usize,
    },
}

/// The non-indexed vertex stream the device consumes: three corners per
/// triangle, in triangle insertion order. Normals and uvs stay empty when the
/// source mesh carries none.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FlatVertices {
    pub positions: Vec<f32>,
    pub normals: Vec<f32>,
    pub uvs: Vec<f32>,
}

/// Indexed triangle mesh as parsed from a geometry file.
///
/// Attribute arrays are append-only during the parse; insertion order is
/// index identity. `clear` resets everything when a multi-object file starts
/// the next sub-object.
#[derive(Debug, Clone, Default)]
pub struct Mesh {
    positions: Vec<Vector3<f32>>,
    normals: Vec<Vector3<f32>>,
    uvs: Vec<Vector2<f32>>,
    triangles: Vec<Triangle>,
}

impl Mesh {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_position(&mut self, position: Vector3<f32>) {
        self.positions.push(position);
    }

    pub fn add_normal(&mut self, normal: Vector3<f32>) {
        self.normals.push(normal);
    }

    pub fn add_uv(&mut self, uv: Vector2<f32>) {
        self.uvs.push(uv);
    }

    pub fn add_triangle(&mut self, triangle: Triangle) {
        self.triangles.push(triangle);
    }

    pub fn clear(&mut self) {
        self.positions.clear();
        self.normals.clear();
        self.uvs.clear();
        self.triangles.clear();
    }

    pub fn positions_number(&self) -> usize {
        self.positions.len()
    }

    pub fn normals_number(&self) -> usize {
        self.normals.len()
    }

    pub fn uvs_number(&self) -> usize {
        self.uvs.len()
    }

    pub fn triangles_number(&self) -> usize {
        self.triangles.len()
    }

    pub fn has_normals(&self) -> bool {
        !self.normals.is_empty()
    }

    pub fn has_uvs(&self) -> bool {
        !self.uvs.is_empty()
    }

    pub fn triangles(&self) -> &[Triangle] {
        &self.triangles
    }

    /// Expand the indexed triangles into flat per-corner attribute streams.
    ///
    /// Positions always come out as `triangles * 9` floats; normals and uvs
    /// only when the mesh carries them (`triangles * 9` and `triangles * 6`
    /// floats respectively). No deduplication, no reordering. Calling this
    /// twice on an unchanged mesh yields identical output.
    pub fn flatten(&self) -> Result<FlatVertices, MeshError> {
        let mut flat = FlatVertices {
            positions: Vec::with_capacity(self.triangles.len() * 9),
            normals: Vec::with_capacity(if self.has_normals() { self.triangles.len() * 9 } else { 0 }),
            uvs: Vec::with_capacity(if self.has_uvs() { self.triangles.len() * 6 } else { 0 }),
        };

        for (t, triangle) in self.triangles.iter().enumerate() {
            for (c, corner) in triangle.corners.iter().enumerate() {
                let position = self.positions.get(corner.position).ok_or(
                    MeshError::PositionOutOfRange {
                        triangle: t,
                        corner: c,
                        index: corner.position,
                        len: self.positions.len(),
                    },
                )?;
                flat.positions.extend_from_slice(&[position.x, position.y, position.z]);

                if self.has_normals() {
                    let index = corner
                        .normal
                        .ok_or(MeshError::MissingNormal { triangle: t, corner: c })?;
                    let normal =
                        self.normals
                            .get(index)
                            .ok_or(MeshError::NormalOutOfRange {
                                triangle: t,
                                corner: c,
                                index,
                                len: self.normals.len(),
                            })?;
                    flat.normals.extend_from_slice(&[normal.x, normal.y, normal.z]);
                }

                if self.has_uvs() {
                    let index = corner
                        .uv
                        .ok_or(MeshError::MissingUv { triangle: t, corner: c })?;
                    let uv = self.uvs.get(index).ok_or(MeshError::UvOutOfRange {
                        triangle: t,
                        corner: c,
                        index,
                        len: self.uvs.len(),
                    })?;
                    flat.uvs.extend_from_slice(&[uv.x, uv.y]);
                }
            }
        }

        Ok(flat)
    }
}
