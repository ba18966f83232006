use super::metrics::GeomMetrics;
use super::tessellation::StripTessellationOptions;

/// Renderable output of a surface build.
///
/// The four attribute buffers are parallel: entry `i` of each describes
/// vertex `i`. `indices` is a triangle list (three entries per triangle).
/// For tessellated surfaces it is expanded from a single continuous triangle
/// strip.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SurfaceMesh {
    pub positions: Vec<[f64; 3]>,
    pub normals: Vec<[f64; 3]>,
    /// Tangent along increasing `u`. The fourth component is unused and is
    /// always `0.0`; it exists for vertex formats that expect a 4-vector.
    /// Zero when the mesh carries no tangent information.
    pub tangents: Vec<[f64; 4]>,
    /// For tessellated surfaces, the unclamped grid coordinate each vertex was
    /// requested at.
    pub uvs: Vec<[f64; 2]>,
    pub indices: Vec<u32>,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MeshValidationError {
    #[error("mesh indices are not a triangle list (len % 3 != 0)")]
    NotTriangleList,
    #[error("mesh has invalid vertex coordinates (NaN/Inf)")]
    InvalidVertices,
    #[error("mesh has out-of-bounds vertex indices")]
    IndexOutOfBounds,
    #[error("mesh attribute buffers do not match vertex count")]
    AttributeLengthMismatch,
}

impl SurfaceMesh {
    /// Creates an empty mesh with room for `vertex_count` vertices.
    #[must_use]
    pub fn with_capacity(vertex_count: usize) -> Self {
        Self {
            positions: Vec::with_capacity(vertex_count),
            normals: Vec::with_capacity(vertex_count),
            tangents: Vec::with_capacity(vertex_count),
            uvs: Vec::with_capacity(vertex_count),
            indices: Vec::new(),
        }
    }

    #[must_use]
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    /// Returns true if any vertex position contains NaN or Inf values.
    #[must_use]
    pub fn has_invalid_vertices(&self) -> bool {
        self.positions
            .iter()
            .any(|p| !p[0].is_finite() || !p[1].is_finite() || !p[2].is_finite())
    }

    /// Returns true if all vertex indices are within bounds.
    #[must_use]
    pub fn has_valid_indices(&self) -> bool {
        let n = self.positions.len();
        self.indices.iter().all(|&i| (i as usize) < n)
    }

    #[must_use]
    pub fn has_triangle_indices(&self) -> bool {
        self.indices.len() % 3 == 0
    }

    /// Returns true if every attribute buffer matches `positions.len()`.
    #[must_use]
    pub fn has_valid_attribute_lengths(&self) -> bool {
        let n = self.positions.len();
        self.normals.len() == n && self.tangents.len() == n && self.uvs.len() == n
    }

    pub fn validate(&self) -> Result<(), MeshValidationError> {
        if !self.has_triangle_indices() {
            return Err(MeshValidationError::NotTriangleList);
        }
        if self.has_invalid_vertices() {
            return Err(MeshValidationError::InvalidVertices);
        }
        if !self.has_valid_indices() {
            return Err(MeshValidationError::IndexOutOfBounds);
        }
        if !self.has_valid_attribute_lengths() {
            return Err(MeshValidationError::AttributeLengthMismatch);
        }
        Ok(())
    }

    /// Indices of vertices whose normal is exactly zero (unresolved singularities).
    #[must_use]
    pub fn singular_vertices(&self) -> Vec<usize> {
        self.normals
            .iter()
            .enumerate()
            .filter(|(_, n)| n[0] == 0.0 && n[1] == 0.0 && n[2] == 0.0)
            .map(|(i, _)| i)
            .collect()
    }

    /// Returns the position buffer as a flat slice: `[x0, y0, z0, x1, y1, z1, ...]`.
    #[must_use]
    pub fn positions_flat(&self) -> &[f64] {
        self.positions.as_flattened()
    }

    #[must_use]
    pub fn normals_flat(&self) -> &[f64] {
        self.normals.as_flattened()
    }

    /// Returns the tangent buffer as a flat slice: `[tx0, ty0, tz0, 0, tx1, ...]`.
    #[must_use]
    pub fn tangents_flat(&self) -> &[f64] {
        self.tangents.as_flattened()
    }

    #[must_use]
    pub fn uvs_flat(&self) -> &[f64] {
        self.uvs.as_flattened()
    }
}

/// Per-build state: the tessellation options in effect and the timing
/// collector. Create one per build; nothing in it carries over between meshes.
#[derive(Debug, Default)]
pub struct GeomContext {
    pub options: StripTessellationOptions,
    pub metrics: GeomMetrics,
}

impl GeomContext {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_options(options: StripTessellationOptions) -> Self {
        Self {
            options,
            metrics: GeomMetrics::default(),
        }
    }
}
