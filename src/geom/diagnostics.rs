//! Diagnostics for mesh builds.
//!
//! Every build reports how many vertices needed special handling when their
//! tangent frame was estimated:
//!
//! - `axis_fixup_count`: a collapsed parameter axis was resampled a quarter
//!   turn away (typical at poles).
//! - `pole_fallback_count`: the normal was averaged from nearby samples.
//! - `unresolved_vertex_count`: no normal could be recovered; the vertex
//!   carries a zero normal.
//!
//! # Example
//!
//! ```ignore
//! use shape_engine::geom::{mesh_surface_strip, Resolution};
//!
//! let (mesh, diagnostics) = mesh_surface_strip(&surface, Resolution::default())?;
//! if !diagnostics.is_clean() {
//!     for warning in &diagnostics.warnings {
//!         eprintln!("warning: {warning}");
//!     }
//! }
//! ```

use std::fmt;

use super::mesh::SurfaceMesh;

#[derive(Debug, Default, Clone, PartialEq)]
pub struct MeshDiagnostics {
    /// Total number of vertices in the mesh.
    pub vertex_count: usize,

    /// Total number of triangles, including the degenerate row bridges of a strip.
    pub triangle_count: usize,

    /// Vertices where a collapsed axis was resampled.
    pub axis_fixup_count: usize,

    /// Vertices whose normal came from the pole-averaging fallback.
    pub pole_fallback_count: usize,

    /// Vertices left with a zero normal.
    pub unresolved_vertex_count: usize,

    /// Human-readable notes about unresolved vertices.
    pub warnings: Vec<String>,
}

impl MeshDiagnostics {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Counts for a mesh that was built directly rather than tessellated.
    /// Zero normals are reported as unresolved.
    #[must_use]
    pub fn from_mesh(mesh: &SurfaceMesh) -> Self {
        let mut diagnostics = Self {
            vertex_count: mesh.vertex_count(),
            triangle_count: mesh.triangle_count(),
            unresolved_vertex_count: mesh.singular_vertices().len(),
            ..Self::default()
        };
        if diagnostics.unresolved_vertex_count > 0 {
            diagnostics.add_warning(format!(
                "{} vertices have no normal",
                diagnostics.unresolved_vertex_count
            ));
        }
        diagnostics
    }

    /// Returns `true` when every vertex received a usable normal.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.unresolved_vertex_count == 0 && self.warnings.is_empty()
    }

    pub fn add_warning(&mut self, warning: impl Into<String>) {
        self.warnings.push(warning.into());
    }

    /// Short summary suitable for logging: `"V:{vertices} T:{triangles} [issues...]"`.
    #[must_use]
    pub fn summary(&self) -> String {
        let mut parts = vec![format!("V:{} T:{}", self.vertex_count, self.triangle_count)];

        if self.axis_fixup_count > 0 {
            parts.push(format!("axis-fixup:{}", self.axis_fixup_count));
        }
        if self.pole_fallback_count > 0 {
            parts.push(format!("pole-fallback:{}", self.pole_fallback_count));
        }
        if self.unresolved_vertex_count > 0 {
            parts.push(format!("unresolved:{}", self.unresolved_vertex_count));
        }

        parts.join(" ")
    }
}

impl fmt::Display for MeshDiagnostics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Mesh Diagnostics:")?;
        writeln!(f, "  Vertices: {}", self.vertex_count)?;
        writeln!(f, "  Triangles: {}", self.triangle_count)?;

        if self.axis_fixup_count > 0 || self.pole_fallback_count > 0 {
            writeln!(f, "  Singularities:")?;
            if self.axis_fixup_count > 0 {
                writeln!(f, "    - Axis fix-ups: {}", self.axis_fixup_count)?;
            }
            if self.pole_fallback_count > 0 {
                writeln!(f, "    - Pole fallbacks: {}", self.pole_fallback_count)?;
            }
        }

        if self.unresolved_vertex_count > 0 {
            writeln!(f, "  Unresolved normals: {}", self.unresolved_vertex_count)?;
        }

        if !self.warnings.is_empty() {
            writeln!(f, "  Warnings:")?;
            for warning in &self.warnings {
                writeln!(f, "    - {warning}")?;
            }
        }

        Ok(())
    }
}
