//! Meshes built face by face instead of by tessellating a surface.
//!
//! These are plain triangle lists: there is no strip, no grid and no
//! finite-difference frame. Normals come from the faces themselves or from
//! the caller.

use super::core::{Point3, Vec3};
use super::mesh::SurfaceMesh;

/// Outward axis, first in-plane axis and second in-plane axis of each cube
/// face. The first in-plane axis is also the face tangent.
const CUBE_FACES: [[Vec3; 3]; 6] = [
    [Vec3::X, Vec3::Y, Vec3::Z],
    [Vec3::Y, Vec3::Z, Vec3::X],
    [Vec3::Z, Vec3::X, Vec3::Y],
    [Vec3::new(0.0, 0.0, -1.0), Vec3::new(-1.0, 0.0, 0.0), Vec3::Y],
    [Vec3::new(0.0, -1.0, 0.0), Vec3::new(0.0, 0.0, -1.0), Vec3::X],
    [Vec3::new(-1.0, 0.0, 0.0), Vec3::new(0.0, -1.0, 0.0), Vec3::Z],
];

/// Axis-aligned cube spanning `[-1, 1]` on every axis.
///
/// Each face has its own four vertices so normals, tangents and UVs stay flat
/// per face: 24 vertices and 12 triangles in total, wound counter-clockwise
/// around the outward normal.
#[must_use]
pub fn cube_mesh() -> SurfaceMesh {
    let mut mesh = SurfaceMesh::with_capacity(24);
    mesh.indices.reserve(36);

    for (face, [normal, s, t]) in (0u32..).zip(CUBE_FACES) {
        let corners = [normal - s - t, normal + s - t, normal + s + t, normal - s + t];
        let uvs = [[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 1.0]];

        for (corner, uv) in corners.into_iter().zip(uvs) {
            mesh.positions.push(corner.to_array());
            mesh.normals.push(normal.to_array());
            mesh.tangents.push([s.x, s.y, s.z, 0.0]);
            mesh.uvs.push(uv);
        }

        let base = face * 4;
        mesh.indices.extend_from_slice(&[base, base + 1, base + 2, base + 3, base, base + 2]);
    }

    mesh
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PolyhedronError {
    #[error("polyhedron has {normals} normals for {vertices} vertices")]
    NormalCountMismatch { normals: usize, vertices: usize },
    #[error("triangle {triangle} references vertex {index} of {vertices}")]
    IndexOutOfBounds {
        triangle: usize,
        index: u32,
        vertices: usize,
    },
    #[error("vertex {index} is not finite")]
    NonFiniteVertex { index: usize },
}

/// Caller-supplied triangle mesh.
///
/// Normals are optional. When given there must be one per vertex; they are
/// normalised when the mesh is built. When omitted, each vertex gets the
/// area-weighted average of the normals of the triangles around it.
#[derive(Debug, Clone, PartialEq)]
pub struct Polyhedron {
    vertices: Vec<Point3>,
    triangles: Vec<[u32; 3]>,
    normals: Vec<Vec3>,
}

impl Polyhedron {
    /// Checks the input and builds a polyhedron. Pass an empty `normals` to
    /// have them computed from the faces.
    pub fn new(
        vertices: Vec<Point3>,
        triangles: Vec<[u32; 3]>,
        normals: Vec<Vec3>,
    ) -> Result<Self, PolyhedronError> {
        if !normals.is_empty() && normals.len() != vertices.len() {
            log::error!(
                "polyhedron: {} normals do not match {} vertices",
                normals.len(),
                vertices.len()
            );
            return Err(PolyhedronError::NormalCountMismatch {
                normals: normals.len(),
                vertices: vertices.len(),
            });
        }
        if let Some(index) = vertices.iter().position(|p| !p.is_finite()) {
            return Err(PolyhedronError::NonFiniteVertex { index });
        }
        for (triangle, corners) in triangles.iter().enumerate() {
            if let Some(&index) = corners.iter().find(|&&i| i as usize >= vertices.len()) {
                return Err(PolyhedronError::IndexOutOfBounds {
                    triangle,
                    index,
                    vertices: vertices.len(),
                });
            }
        }

        Ok(Self {
            vertices,
            triangles,
            normals,
        })
    }

    #[must_use]
    pub fn vertices(&self) -> &[Point3] {
        &self.vertices
    }

    #[must_use]
    pub fn triangles(&self) -> &[[u32; 3]] {
        &self.triangles
    }

    #[must_use]
    pub fn has_normals(&self) -> bool {
        !self.normals.is_empty()
    }

    /// Builds the mesh. Tangents and UVs are zero; a polyhedron carries no
    /// parameterisation.
    #[must_use]
    pub fn to_mesh(&self) -> SurfaceMesh {
        let normals = if self.has_normals() {
            self.normals
                .iter()
                .map(|n| n.normalized_or_zero().to_array())
                .collect()
        } else {
            face_weighted_normals(&self.vertices, &self.triangles)
        };

        let n = self.vertices.len();
        SurfaceMesh {
            positions: self.vertices.iter().map(|p| p.to_array()).collect(),
            normals,
            tangents: vec![[0.0; 4]; n],
            uvs: vec![[0.0; 2]; n],
            indices: self.triangles.as_flattened().to_vec(),
        }
    }
}

/// Sum of the (area-scaled) face normals around each vertex, normalised.
/// Vertices that touch no face, or only degenerate ones, keep a zero normal.
fn face_weighted_normals(vertices: &[Point3], triangles: &[[u32; 3]]) -> Vec<[f64; 3]> {
    let mut sums = vec![Vec3::ZERO; vertices.len()];

    for &[a, b, c] in triangles {
        let (a, b, c) = (a as usize, b as usize, c as usize);
        let face = (vertices[b] - vertices[a]).cross(vertices[c] - vertices[a]);
        sums[a] = sums[a] + face;
        sums[b] = sums[b] + face;
        sums[c] = sums[c] + face;
    }

    sums.into_iter()
        .map(|n| n.normalized_or_zero().to_array())
        .collect()
}
