//! CPU side mesh data.
//!
//! This module turns parsed OBJ files into interleaved vertex and index buffers ready to be
//! uploaded to the GPU, and provides a few built-in shapes.

use fxhash::FxHashMap;
use glam::{Vec2, Vec3, vec2, vec3};

use crate::obj::{FaceCorner, ObjData, ObjError, ObjErrorKind};

/// A single interleaved vertex as laid out in the vertex buffer.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[repr(C)]
pub struct MeshVertex {
    pub position: Vec3,
    pub normal: Vec3,
    pub uv: Vec2,
}

/// Vertex and triangle index buffers of a mesh.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MeshData {
    pub vertices: Vec<MeshVertex>,
    pub indices: Vec<u32>,
}

/// Key identifying the attribute combination a face corner uses for its position.
type AttributeKey = (Option<usize>, Option<usize>);

impl MeshData {
    /// Builds vertex and index buffers from a textured OBJ.
    ///
    /// The vertex buffer starts with one vertex per OBJ position. A position referenced by faces
    /// with different `(texcoord, normal)` pairs is duplicated once per extra pair, so every
    /// vertex carries exactly one normal and one uv. Reusing an existing pair rewrites that
    /// vertex's normal and uv with the corner's attributes.
    pub fn from_obj(obj: &ObjData) -> Result<Self, ObjError> {
        let mut vertices: Vec<MeshVertex> = obj
            .positions
            .iter()
            .map(|&position| MeshVertex {
                position,
                ..Default::default()
            })
            .collect();
        let mut indices = Vec::with_capacity(obj.faces.len() * 3);

        // OBJ position index -> (texcoord index, normal index) -> vertex buffer index
        let mut variants: FxHashMap<usize, FxHashMap<AttributeKey, u32>> = FxHashMap::default();

        for face in &obj.faces {
            for corner in &face.corners {
                let (normal, uv) = corner_attributes(obj, corner, face.line)?;
                let key = (corner.texcoord, corner.normal);
                let seen = variants.entry(corner.position).or_insert_with(|| {
                    let mut seed = FxHashMap::default();
                    seed.insert(key, corner.position as u32);
                    seed
                });

                let index = match seen.get(&key) {
                    Some(&index) => {
                        let vertex = &mut vertices[index as usize];
                        vertex.normal = normal;
                        vertex.uv = uv;
                        index
                    }
                    None => {
                        let index = vertices.len() as u32;
                        vertices.push(MeshVertex {
                            position: obj.positions[corner.position],
                            normal,
                            uv,
                        });
                        seen.insert(key, index);
                        index
                    }
                };
                indices.push(index);
            }
        }

        log::debug!(
            "Built mesh with {} vertices ({} positions) and {} triangles",
            vertices.len(),
            obj.positions.len(),
            indices.len() / 3
        );

        Ok(Self { vertices, indices })
    }

    /// Builds buffers from the positions of an OBJ only, ignoring texcoords and normals.
    pub fn positions_only(obj: &ObjData) -> Result<Self, ObjError> {
        let vertices = obj
            .positions
            .iter()
            .map(|&position| MeshVertex {
                position,
                ..Default::default()
            })
            .collect();
        let mut indices = Vec::with_capacity(obj.faces.len() * 3);
        for face in &obj.faces {
            for corner in &face.corners {
                check_index(corner.position, obj.positions.len(), "position", face.line)?;
                indices.push(corner.position as u32);
            }
        }
        Ok(Self { vertices, indices })
    }

    /// Number of triangles described by the index buffer.
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// A unit square in the `z = 0.5` plane with a fold towards `-z`.
    pub fn square() -> Self {
        Self::untextured(
            &[
                vec3(0.5, -0.5, 0.5),
                vec3(-0.5, -0.5, 0.5),
                vec3(0.5, 0.5, 0.5),
                vec3(-0.5, 0.5, 0.5),
                vec3(0.5, 0.5, -0.5),
                vec3(-0.5, 0.5, -0.5),
            ],
            &[0, 2, 3, 0, 3, 1],
        )
    }

    /// A unit cube centered on the origin, without normals or uvs.
    pub fn cube() -> Self {
        Self::untextured(
            &[
                vec3(0.5, 0.5, -0.5),
                vec3(-0.5, 0.5, -0.5),
                vec3(-0.5, -0.5, -0.5),
                vec3(0.5, -0.5, -0.5),
                vec3(0.5, 0.5, 0.5),
                vec3(-0.5, 0.5, 0.5),
                vec3(-0.5, -0.5, 0.5),
                vec3(0.5, -0.5, 0.5),
            ],
            &[
                0, 1, 2, 0, 2, 3, 4, 0, 3, 4, 3, 7, 5, 4, 7, 5, 7, 6, 1, 5, 6, 1, 6, 2, 4, 5, 1, 4,
                1, 0, 2, 6, 7, 2, 7, 3,
            ],
        )
    }

    /// A single triangle facing `+z` with texture coordinates.
    pub fn textured_triangle() -> Self {
        let vertex = |position: Vec3, uv: Vec2| MeshVertex {
            position,
            normal: Vec3::Z,
            uv,
        };
        Self {
            vertices: vec![
                vertex(vec3(-0.5, -0.5, 0.0), vec2(0.0, 0.0)),
                vertex(vec3(0.0, 0.5, 0.0), vec2(0.5, 1.0)),
                vertex(vec3(0.5, -0.5, 0.0), vec2(1.0, 0.0)),
            ],
            indices: vec![0, 1, 2],
        }
    }

    fn untextured(positions: &[Vec3], indices: &[u32]) -> Self {
        Self {
            vertices: positions
                .iter()
                .map(|&position| MeshVertex {
                    position,
                    ..Default::default()
                })
                .collect(),
            indices: indices.to_vec(),
        }
    }
}

/// Looks up the normal and uv of a face corner, defaulting missing attributes to zero.
fn corner_attributes(
    obj: &ObjData,
    corner: &FaceCorner,
    line: usize,
) -> Result<(Vec3, Vec2), ObjError> {
    check_index(corner.position, obj.positions.len(), "position", line)?;
    let normal = match corner.normal {
        Some(index) => {
            check_index(index, obj.normals.len(), "normal", line)?;
            obj.normals[index]
        }
        None => Vec3::ZERO,
    };
    let uv = match corner.texcoord {
        Some(index) => {
            check_index(index, obj.texcoords.len(), "texcoord", line)?;
            obj.texcoords[index]
        }
        None => Vec2::ZERO,
    };
    Ok((normal, uv))
}

fn check_index(
    index: usize,
    count: usize,
    attribute: &'static str,
    line: usize,
) -> Result<(), ObjError> {
    if index < count {
        Ok(())
    } else {
        Err(ObjError::new(
            line,
            ObjErrorKind::IndexOutOfRange {
                attribute,
                index: index as i64 + 1,
                count,
            },
        ))
    }
}
