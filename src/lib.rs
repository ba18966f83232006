#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod geom;
pub mod shapes;

use std::fmt;

use geom::{
    GeomContext, MeshDiagnostics, Point3, Polyhedron, PolyhedronError, Resolution, SplineError,
    SurfaceMesh, TessellationError, Vec3, build_spline,
};
use serde::Serialize;
use shapes::{Shape, ShapeError, ShapeKind};
use wasm_bindgen::prelude::*;

#[macro_export]
macro_rules! debug_log {
    ($($t:tt)*) => {{
        #[cfg(feature = "debug_logs")]
        {
            #[cfg(target_arch = "wasm32")]
            {
                ::web_sys::console::log_1(&::wasm_bindgen::JsValue::from_str(&format!($($t)*)));
            }
            #[cfg(not(target_arch = "wasm32"))]
            {
                println!("{}", format!($($t)*));
            }
        }
    }};
}

cfg_if::cfg_if! {
    if #[cfg(all(feature = "console_error_panic_hook", target_arch = "wasm32"))] {
        #[wasm_bindgen(start)]
        pub fn initialize() {
            console_error_panic_hook::set_once();
            init_logger();
        }
    } else {
        #[wasm_bindgen(start)]
        pub fn initialize() {
            // no-op fallback when panic hook is disabled
            init_logger();
        }
    }
}

#[cfg(feature = "debug_logs")]
fn init_logger() {
    use log::LevelFilter;
    use wasm_bindgen_console_logger::DEFAULT_LOGGER;
    log::set_logger(&DEFAULT_LOGGER).expect("error initializing logger");
    log::set_max_level(LevelFilter::Debug);
    debug_log!("shape-engine {} logger ready", env!("CARGO_PKG_VERSION"));
}

#[cfg(not(feature = "debug_logs"))]
fn init_logger() {
    // no-op fallback when debug logs are disabled
}

#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error("unknown shape `{0}`")]
    UnknownShape(String),
    #[error("point buffer length {len} is not a multiple of 3")]
    InvalidPointBuffer { len: usize },
    #[error("triangle buffer length {len} is not a multiple of 3")]
    InvalidTriangleBuffer { len: usize },
    #[error(transparent)]
    Tessellation(#[from] TessellationError),
    #[error(transparent)]
    Spline(#[from] SplineError),
    #[error(transparent)]
    Polyhedron(#[from] PolyhedronError),
    #[error(transparent)]
    Shape(#[from] ShapeError),
}

/// Mesh buffers as handed to the renderer, flattened so each one maps onto a
/// typed array: three floats per position and normal, four per tangent, two
/// per UV.
#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct MeshExport {
    pub shape: &'static str,
    pub vertex_count: usize,
    pub positions: Vec<f64>,
    pub normals: Vec<f64>,
    pub tangents: Vec<f64>,
    pub uvs: Vec<f64>,
    pub indices: Vec<u32>,
    pub unresolved_vertex_count: usize,
}

impl MeshExport {
    fn new(kind: ShapeKind, mesh: &SurfaceMesh, diagnostics: &MeshDiagnostics) -> Self {
        Self {
            shape: kind.name(),
            vertex_count: mesh.vertex_count(),
            positions: mesh.positions_flat().to_vec(),
            normals: mesh.normals_flat().to_vec(),
            tangents: mesh.tangents_flat().to_vec(),
            uvs: mesh.uvs_flat().to_vec(),
            indices: mesh.indices.clone(),
            unresolved_vertex_count: diagnostics.unresolved_vertex_count,
        }
    }
}

/// Public entry point for consumers.
///
/// Every build starts from scratch; the engine only remembers the default
/// resolution. Deciding when to rebuild is up to the host.
#[wasm_bindgen]
#[derive(Debug, Clone)]
pub struct Engine {
    resolution: Resolution,
}

impl Default for Engine {
    fn default() -> Self {
        Self::new()
    }
}

#[wasm_bindgen]
impl Engine {
    #[wasm_bindgen(constructor)]
    pub fn new() -> Engine {
        Engine {
            resolution: Resolution::default(),
        }
    }

    /// Sets the grid used by shapes without a fixed resolution of their own.
    #[wasm_bindgen]
    pub fn set_resolution(&mut self, u_count: u32, v_count: u32) -> Result<(), JsValue> {
        let resolution = Resolution::new(u_count as usize, v_count as usize);
        resolution.validate().map_err(to_js_error)?;
        self.resolution = resolution;
        Ok(())
    }

    #[wasm_bindgen]
    pub fn shape_names(&self) -> Vec<String> {
        ShapeKind::ALL
            .iter()
            .map(|kind| kind.name().to_owned())
            .collect()
    }

    /// Builds the named shape and returns its [`MeshExport`].
    #[wasm_bindgen]
    pub fn build_shape(&self, name: &str) -> Result<JsValue, JsValue> {
        let export = self.export_for(name).map_err(to_js_error)?;
        serde_wasm_bindgen::to_value(&export).map_err(to_js_error)
    }

    /// Builds a polyhedron from flat `x, y, z` vertices, flat triangle
    /// indices and optional flat normals (empty to derive them from the
    /// faces), and returns its [`MeshExport`].
    #[wasm_bindgen]
    pub fn build_polyhedron(
        &self,
        vertices: &[f64],
        triangles: &[u32],
        normals: &[f64],
    ) -> Result<JsValue, JsValue> {
        let export = self
            .export_polyhedron(vertices, triangles, normals)
            .map_err(to_js_error)?;
        serde_wasm_bindgen::to_value(&export).map_err(to_js_error)
    }

    /// Builds a spline through `points` (flat `x, y, z` triples) and returns
    /// the point at `t` as `[x, y, z]`.
    #[wasm_bindgen]
    pub fn sample_spline(&self, points: &[f64], t: f64) -> Result<Vec<f64>, JsValue> {
        let point = sample_flat_spline(points, t).map_err(to_js_error)?;
        Ok(point.to_array().to_vec())
    }
}

impl Engine {
    #[must_use]
    pub fn resolution(&self) -> Resolution {
        self.resolution
    }

    /// Resolves `name` and meshes the shape: a strip for parametric shapes,
    /// a face-built mesh for the cube and the polyhedron.
    pub fn mesh_for(
        &self,
        name: &str,
    ) -> Result<(ShapeKind, SurfaceMesh, MeshDiagnostics), EngineError> {
        let kind =
            ShapeKind::from_name(name).ok_or_else(|| EngineError::UnknownShape(name.to_owned()))?;
        let shape = Shape::new(kind)?;
        let (mesh, diagnostics) = self.mesh_shape(&shape)?;
        Ok((kind, mesh, diagnostics))
    }

    /// Meshes an already constructed shape at the engine's resolution.
    pub fn mesh_shape(&self, shape: &Shape) -> Result<(SurfaceMesh, MeshDiagnostics), EngineError> {
        let mut ctx = GeomContext::new();
        ctx.metrics.begin();
        let built = shape.build(self.resolution, &mut ctx)?;
        if let Some(report) = ctx.metrics.end() {
            log::debug!("{}: built in {:.3} ms", shape.kind(), report.total_ms());
        }
        Ok(built)
    }

    pub fn export_for(&self, name: &str) -> Result<MeshExport, EngineError> {
        let (kind, mesh, diagnostics) = self.mesh_for(name)?;
        Ok(MeshExport::new(kind, &mesh, &diagnostics))
    }

    /// Native counterpart of `build_polyhedron`.
    pub fn export_polyhedron(
        &self,
        vertices: &[f64],
        triangles: &[u32],
        normals: &[f64],
    ) -> Result<MeshExport, EngineError> {
        if triangles.len() % 3 != 0 {
            return Err(EngineError::InvalidTriangleBuffer {
                len: triangles.len(),
            });
        }
        let polyhedron = Polyhedron::new(
            flat_points(vertices)?,
            triangles
                .chunks_exact(3)
                .map(|t| [t[0], t[1], t[2]])
                .collect(),
            flat_points(normals)?.into_iter().map(Vec3::from).collect(),
        )?;
        let shape = Shape::from(polyhedron);
        let (mesh, diagnostics) = self.mesh_shape(&shape)?;
        Ok(MeshExport::new(shape.kind(), &mesh, &diagnostics))
    }
}

fn flat_points(points: &[f64]) -> Result<Vec<Point3>, EngineError> {
    if points.len() % 3 != 0 {
        return Err(EngineError::InvalidPointBuffer { len: points.len() });
    }
    Ok(points
        .chunks_exact(3)
        .map(|c| Point3::new(c[0], c[1], c[2]))
        .collect())
}

fn sample_flat_spline(points: &[f64], t: f64) -> Result<Point3, EngineError> {
    let keys = flat_points(points)?;
    Ok(build_spline(&keys)?.sample(t))
}

fn to_js_error<E: fmt::Display>(error: E) -> JsValue {
    js_error(&error.to_string())
}

fn js_error(message: &str) -> JsValue {
    #[cfg(target_arch = "wasm32")]
    {
        wasm_bindgen::JsError::new(message).into()
    }
    #[cfg(not(target_arch = "wasm32"))]
    {
        let _ = message;
        JsValue::NULL
    }
}

#[cfg(test)]
mod tests {
    use super::{Engine, EngineError, sample_flat_spline};
    use crate::geom::{Point3, PolyhedronError, Resolution, strip_vertex_count};

    #[test]
    fn engine_starts_with_default_resolution() {
        let engine = Engine::new();
        assert_eq!(engine.resolution(), Resolution::new(30, 30));
        assert_eq!(engine.shape_names().len(), 10);
        assert!(engine.shape_names().iter().any(|name| name == "Cup"));
    }

    #[test]
    fn set_resolution_rejects_zero_counts() {
        let mut engine = Engine::new();
        assert!(engine.set_resolution(0, 4).is_err());
        assert_eq!(engine.resolution(), Resolution::default());
        assert!(engine.set_resolution(6, 4).is_ok());
        assert_eq!(engine.resolution(), Resolution::new(6, 4));
    }

    #[test]
    fn export_uses_shape_resolution() {
        let mut engine = Engine::new();
        engine.set_resolution(5, 7).unwrap();

        let square = engine.export_for("square").unwrap();
        assert_eq!(square.shape, "Square");
        assert_eq!(square.vertex_count, strip_vertex_count(Resolution::new(5, 7)).unwrap());

        let disk = engine.export_for("Disk").unwrap();
        assert_eq!(disk.vertex_count, strip_vertex_count(Resolution::new(10, 1)).unwrap());

        let cube = engine.export_for("cube").unwrap();
        assert_eq!(cube.vertex_count, 24);
    }

    #[test]
    fn export_buffers_are_flat() {
        let engine = Engine::new();
        let cube = engine.export_for("Cube").unwrap();
        assert_eq!(cube.positions.len(), 3 * cube.vertex_count);
        assert_eq!(cube.normals.len(), 3 * cube.vertex_count);
        assert_eq!(cube.tangents.len(), 4 * cube.vertex_count);
        assert_eq!(cube.uvs.len(), 2 * cube.vertex_count);
        // first face is +X
        assert_eq!(&cube.normals[..3], &[1.0, 0.0, 0.0]);
    }

    #[test]
    fn polyhedron_buffers_are_validated() {
        let engine = Engine::new();
        let vertices = [0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0, 0.0];

        let export = engine.export_polyhedron(&vertices, &[0, 1, 2], &[]).unwrap();
        assert_eq!(export.shape, "Polyhedron");
        assert_eq!(export.normals, vec![0.0, 0.0, 1.0, 0.0, 0.0, 1.0, 0.0, 0.0, 1.0]);

        assert!(matches!(
            engine.export_polyhedron(&vertices, &[0, 1], &[]),
            Err(EngineError::InvalidTriangleBuffer { len: 2 })
        ));
        assert!(matches!(
            engine.export_polyhedron(&vertices, &[0, 1, 2], &[0.0, 0.0, 1.0]),
            Err(EngineError::Polyhedron(PolyhedronError::NormalCountMismatch {
                normals: 1,
                vertices: 3
            }))
        ));
    }

    #[test]
    fn unknown_shape_is_an_error() {
        let engine = Engine::new();
        assert!(matches!(
            engine.mesh_for("dodecahedron"),
            Err(EngineError::UnknownShape(name)) if name == "dodecahedron"
        ));
    }

    #[test]
    fn js_entry_points_report_build_errors() {
        let engine = Engine::new();
        assert!(engine.build_shape("dodecahedron").is_err());
        assert!(engine.build_polyhedron(&[0.0, 1.0], &[], &[]).is_err());
        assert!(engine.sample_spline(&[], 0.5).is_err());
    }

    #[test]
    fn flat_spline_buffer_is_validated() {
        assert!(matches!(
            sample_flat_spline(&[0.0, 1.0], 0.5),
            Err(EngineError::InvalidPointBuffer { len: 2 })
        ));
        assert!(matches!(sample_flat_spline(&[], 0.5), Err(EngineError::Spline(_))));

        let mid = sample_flat_spline(&[0.0, 0.0, 0.0, 2.0, 4.0, 0.0], 0.5).unwrap();
        assert!((mid.x - 1.0).abs() < 1e-12);
        assert!((mid.y - 2.0).abs() < 1e-12);
        assert_eq!(Point3::new(mid.x, mid.y, 0.0), mid);
    }
}
