//! Triangle-strip tessellation of parametric surfaces.
//!
//! The `(u, v)` unit square is cut into `u_count x v_count` cells and walked
//! row by row in a zigzag: even rows run `u` from 0 to 1, odd rows from 1
//! back to 0. Each column contributes a vertex on the row's lower edge and one
//! on its upper edge, and the end of every row repeats its last lower-edge
//! vertex so the strip continues into the next row without a seam. The whole
//! surface is therefore a single strip of
//! `(u_count + 1) * 2 * v_count + v_count` vertices.
//!
//! ```ignore
//! use shape_engine::geom::{Point3, build_mesh};
//!
//! let plane = |u: f64, v: f64| Point3::new(2.0 * u - 1.0, 2.0 * v - 1.0, 0.0);
//! let mesh = build_mesh(30, 30, &plane)?;
//! assert_eq!(mesh.indices.len(), 3 * (mesh.positions.len() - 2));
//! ```

use super::diagnostics::MeshDiagnostics;
use super::frame::{FrameOptions, estimate_frame_with_options};
use super::mesh::{GeomContext, SurfaceMesh};
use super::metrics::TimingBucket;
use super::surface::{SamplingOptions, Surface, sample_surface_with_options};
use super::triangulation::triangulate_strip;

/// Tessellation density: number of cells along `u` and along `v`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Resolution {
    pub u_count: usize,
    pub v_count: usize,
}

impl Default for Resolution {
    fn default() -> Self {
        Self {
            u_count: 30,
            v_count: 30,
        }
    }
}

impl Resolution {
    #[must_use]
    pub const fn new(u_count: usize, v_count: usize) -> Self {
        Self { u_count, v_count }
    }

    pub fn validate(self) -> Result<(), TessellationError> {
        if self.u_count == 0 || self.v_count == 0 {
            return Err(TessellationError::InvalidResolution {
                u_count: self.u_count,
                v_count: self.v_count,
            });
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TessellationError {
    #[error("tessellation counts must be positive (got {u_count} x {v_count})")]
    InvalidResolution { u_count: usize, v_count: usize },
    #[error("strip of {vertex_count} vertices cannot be indexed with u32")]
    TooManyVertices { vertex_count: usize },
    #[error("strip vertex count for {u_count} x {v_count} overflows usize")]
    VertexCountOverflow { u_count: usize, v_count: usize },
}

/// Options for [`mesh_surface_strip_with_context`].
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct StripTessellationOptions {
    pub sampling: SamplingOptions,
    pub frame: FrameOptions,
}

/// Number of vertices in the strip for `resolution`, or `None` on overflow.
#[must_use]
pub fn strip_vertex_count(resolution: Resolution) -> Option<usize> {
    let row = resolution.u_count.checked_add(1)?.checked_mul(2)?.checked_add(1)?;
    row.checked_mul(resolution.v_count)
}

/// Zigzag walk over the grid, yielding the `(u, v)` of each strip vertex in
/// emission order.
///
/// Coordinates are computed from integer row/column positions, so row ends
/// land exactly on `0.0` and `1.0`.
#[derive(Debug, Clone)]
pub struct StripCursor {
    u_count: usize,
    v_count: usize,
    row: usize,
    step: usize,
    phase: StripPhase,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum StripPhase {
    Lower,
    Upper,
    Bridge,
}

impl StripCursor {
    #[must_use]
    pub fn new(resolution: Resolution) -> Self {
        Self {
            u_count: resolution.u_count,
            v_count: resolution.v_count,
            row: 0,
            step: 0,
            phase: StripPhase::Lower,
        }
    }
}

impl Iterator for StripCursor {
    type Item = (f64, f64);

    fn next(&mut self) -> Option<Self::Item> {
        if self.u_count == 0 || self.row >= self.v_count {
            return None;
        }

        let col = if self.row % 2 == 0 {
            self.step
        } else {
            self.u_count - self.step
        };
        let u = col as f64 / self.u_count as f64;
        let v_low = self.row as f64 / self.v_count as f64;
        let v_high = (self.row + 1) as f64 / self.v_count as f64;

        let item = match self.phase {
            StripPhase::Lower | StripPhase::Bridge => (u, v_low),
            StripPhase::Upper => (u, v_high),
        };

        self.phase = match self.phase {
            StripPhase::Lower => StripPhase::Upper,
            StripPhase::Upper if self.step < self.u_count => {
                self.step += 1;
                StripPhase::Lower
            }
            StripPhase::Upper => StripPhase::Bridge,
            StripPhase::Bridge => {
                self.row += 1;
                self.step = 0;
                StripPhase::Lower
            }
        };

        Some(item)
    }
}

/// Builds the strip mesh of `surface` with the default options.
///
/// This is the entry point hosts call on initialization or when shape
/// parameters change; the returned mesh shares nothing with the builder.
pub fn build_mesh<S: Surface + ?Sized>(
    u_count: usize,
    v_count: usize,
    surface: &S,
) -> Result<SurfaceMesh, TessellationError> {
    mesh_surface_strip(surface, Resolution::new(u_count, v_count)).map(|(mesh, _)| mesh)
}

pub fn mesh_surface_strip<S: Surface + ?Sized>(
    surface: &S,
    resolution: Resolution,
) -> Result<(SurfaceMesh, MeshDiagnostics), TessellationError> {
    let mut ctx = GeomContext::new();
    mesh_surface_strip_with_context(surface, resolution, &mut ctx)
}

pub fn mesh_surface_strip_with_context<S: Surface + ?Sized>(
    surface: &S,
    resolution: Resolution,
    ctx: &mut GeomContext,
) -> Result<(SurfaceMesh, MeshDiagnostics), TessellationError> {
    resolution.validate()?;

    let Some(vertex_count) = strip_vertex_count(resolution) else {
        return Err(TessellationError::VertexCountOverflow {
            u_count: resolution.u_count,
            v_count: resolution.v_count,
        });
    };
    if u32::try_from(vertex_count).is_err() {
        return Err(TessellationError::TooManyVertices { vertex_count });
    }

    let options = ctx.options;
    let div_u = 1.0 / resolution.u_count as f64;
    let div_v = 1.0 / resolution.v_count as f64;

    let mut mesh = SurfaceMesh::with_capacity(vertex_count);
    let mut diagnostics = MeshDiagnostics::new();

    for (u, v) in StripCursor::new(resolution) {
        let position = ctx.metrics.time(TimingBucket::SurfaceSampling, || {
            sample_surface_with_options(surface, u, v, options.sampling)
        });
        let estimate = ctx.metrics.time(TimingBucket::FrameEstimation, || {
            estimate_frame_with_options(surface, u, v, div_u, div_v, options.frame)
        });

        if estimate.axis_fixup {
            diagnostics.axis_fixup_count += 1;
        }
        if estimate.pole_fallback {
            diagnostics.pole_fallback_count += 1;
        }
        if estimate.is_unresolved() {
            diagnostics.unresolved_vertex_count += 1;
            log::warn!(
                "zero normal at ({u}, {v}), tangents {:?}, {:?}",
                estimate.frame.u_tangent,
                estimate.frame.v_tangent
            );
        }

        let frame = estimate.frame;
        mesh.positions.push(position.to_array());
        mesh.normals.push(frame.normal.to_array());
        let [tx, ty, tz] = frame.u_tangent.to_array();
        mesh.tangents.push([tx, ty, tz, 0.0]);
        mesh.uvs.push([u, v]);
    }

    mesh.indices = ctx
        .metrics
        .time(TimingBucket::Triangulation, || triangulate_strip(vertex_count));

    debug_assert_eq!(mesh.positions.len(), vertex_count);

    diagnostics.vertex_count = mesh.vertex_count();
    diagnostics.triangle_count = mesh.triangle_count();
    if diagnostics.unresolved_vertex_count > 0 {
        diagnostics.add_warning(format!(
            "{} vertices have no recoverable normal",
            diagnostics.unresolved_vertex_count
        ));
    }

    log::debug!(
        "strip mesh {}x{}: {}",
        resolution.u_count,
        resolution.v_count,
        diagnostics.summary()
    );

    Ok((mesh, diagnostics))
}
