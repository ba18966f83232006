mod core;
mod diagnostics;
mod extrusion;
mod frame;
mod mesh;
mod metrics;
mod polyhedron;
mod revolve;
mod spline;
mod surface;
mod tessellation;
mod triangulation;

pub use core::{Point3, Tolerance, Vec3};
pub use diagnostics::MeshDiagnostics;
pub use extrusion::{ExtrudedSurface, ExtrusionPath, ExtrusionProfile};
pub use frame::{
    FrameEstimate, FrameOptions, SurfaceFrame, estimate_frame, estimate_frame_with_options,
};
pub use mesh::{GeomContext, MeshValidationError, SurfaceMesh};
pub use metrics::{GeomMetrics, GeomTimingReport, TimingBucket};
pub use polyhedron::{Polyhedron, PolyhedronError, cube_mesh};
pub use revolve::{ProfileCurve, RevolvedSurface};
pub use spline::{
    Spline, SplineError, SplineOptions, build_spline, build_spline_with_options, key_tangents,
    sample_points,
};
pub use surface::{SamplingOptions, Surface, sample_surface, sample_surface_with_options};
pub use tessellation::{
    Resolution, StripCursor, StripTessellationOptions, TessellationError, build_mesh,
    mesh_surface_strip, mesh_surface_strip_with_context, strip_vertex_count,
};
pub use triangulation::triangulate_strip;

#[cfg(test)]
mod tests;
