//! Catalog of ready-made shapes.
//!
//! Most shapes are a [`Surface`] built by composition: flat shapes are plain
//! formulas, round ones wrap a profile in [`RevolvedSurface`], and the knot
//! sweeps a section along a path with [`ExtrudedSurface`]. These are
//! tessellated as a strip. The cube and the polyhedron are built face by face.

use std::f64::consts::{PI, TAU};
use std::fmt;

use noise::{NoiseFn, Perlin};

use crate::geom::{
    ExtrudedSurface, GeomContext, MeshDiagnostics, Point3, Polyhedron, PolyhedronError,
    ProfileCurve, Resolution, RevolvedSurface, Spline, SplineError, Surface, SurfaceMesh,
    TessellationError, Vec3, build_spline, cube_mesh, mesh_surface_strip_with_context,
};

/// Seed for the noisy square. Fixed so repeated builds give the same mesh.
const NOISE_SEED: u32 = 0;

/// Profile keys `(r, z)` of the cup, from the centre of the base, out along the
/// foot, up the stem and bowl, over the rim and back down the inside.
const CUP_KEYS: [[f64; 2]; 16] = [
    [0.001, -1.0],
    [0.5, -1.0],
    [0.45, -0.95],
    [0.15, -0.9],
    [0.09, -0.85],
    [0.05, -0.6],
    [0.1, 0.0],
    [0.2, 0.1],
    [0.4, 0.2],
    [0.6, 0.5],
    [0.5, 0.98],
    [0.48, 1.0],
    [0.46, 0.98],
    [0.55, 0.5],
    [0.35, 0.3],
    [0.001, 0.2],
];

/// Regular tetrahedron inscribed in the `[-1, 1]` cube, used for the catalog
/// polyhedron. Triangles wind counter-clockwise seen from outside.
const TETRAHEDRON_VERTICES: [[f64; 3]; 4] = [
    [1.0, 1.0, 1.0],
    [1.0, -1.0, -1.0],
    [-1.0, 1.0, -1.0],
    [-1.0, -1.0, 1.0],
];
const TETRAHEDRON_TRIANGLES: [[u32; 3]; 4] = [[0, 1, 2], [0, 3, 1], [0, 2, 3], [1, 3, 2]];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShapeKind {
    Square,
    NoisySquare,
    Sphere,
    Torus,
    Disk,
    OpenCylinder,
    Cup,
    Knot,
    Cube,
    Polyhedron,
}

impl ShapeKind {
    pub const ALL: [ShapeKind; 10] = [
        ShapeKind::Square,
        ShapeKind::NoisySquare,
        ShapeKind::Sphere,
        ShapeKind::Torus,
        ShapeKind::Disk,
        ShapeKind::OpenCylinder,
        ShapeKind::Cup,
        ShapeKind::Knot,
        ShapeKind::Cube,
        ShapeKind::Polyhedron,
    ];

    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::Square => "Square",
            Self::NoisySquare => "NoisySquare",
            Self::Sphere => "Sphere",
            Self::Torus => "Torus",
            Self::Disk => "Disk",
            Self::OpenCylinder => "OpenCylinder",
            Self::Cup => "Cup",
            Self::Knot => "Knot",
            Self::Cube => "Cube",
            Self::Polyhedron => "Polyhedron",
        }
    }

    /// True for shapes tessellated as a strip from a [`Surface`].
    #[must_use]
    pub fn is_parametric(&self) -> bool {
        !matches!(self, Self::Cube | Self::Polyhedron)
    }

    /// Looks a shape up by name, ignoring case, spaces, `_` and `-`
    /// (`"open cylinder"` and `"open_cylinder"` both find
    /// [`ShapeKind::OpenCylinder`]).
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        let key = normalize_name(name);
        Self::ALL
            .into_iter()
            .find(|kind| normalize_name(kind.name()) == key)
    }
}

impl fmt::Display for ShapeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

fn normalize_name(name: &str) -> String {
    name.chars()
        .filter(|c| !c.is_whitespace() && *c != '_' && *c != '-')
        .flat_map(char::to_lowercase)
        .collect()
}

/// Unit sphere profile, optionally cut off below the latitude `cut_off`
/// (0 keeps the whole sphere, 0.5 leaves the upper hemisphere).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SphereProfile {
    pub cut_off: f64,
}

impl ProfileCurve for SphereProfile {
    fn point_at(&self, t: f64) -> Point3 {
        let phi = PI * (self.cut_off.max(t) - 0.5);
        Point3::xy(phi.cos(), phi.sin())
    }
}

/// Circle of radius `radius` centred at distance 1 from the axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TorusProfile {
    pub radius: f64,
}

impl ProfileCurve for TorusProfile {
    fn point_at(&self, t: f64) -> Point3 {
        let phi = TAU * t;
        Point3::xy(1.0 - self.radius * phi.cos(), -self.radius * phi.sin())
    }
}

/// Radial line in the `z = 0` plane. Starts just off the axis so the centre
/// is not a pole.
fn disk_profile(t: f64) -> Point3 {
    Point3::xy(t + 0.001, 0.0)
}

fn cylinder_profile(t: f64) -> Point3 {
    Point3::xy(1.0, 2.0 * t - 1.0)
}

fn knot_path(v: f64) -> Point3 {
    let v = v * 2.0 * TAU;
    let r = 1.0 + (1.5 * v).cos() / 5.0;
    Point3::new((1.5 * v).sin() / 2.0, r * v.cos(), r * v.sin())
}

/// Circular tube section whose radius pulses three times along the path.
fn knot_section(u: f64, v: f64) -> Point3 {
    let radius = 0.15 + 0.06 * (3.0 * TAU * v).cos();
    let angle = u * TAU;
    Point3::xy(radius * angle.cos(), radius * angle.sin())
}

type CurveFn = fn(f64) -> Point3;
type SectionFn = fn(f64, f64) -> Point3;

/// Vertex directions double as the tetrahedron's per-vertex normals; they are
/// normalised when the mesh is built.
fn tetrahedron() -> Result<Polyhedron, PolyhedronError> {
    Polyhedron::new(
        TETRAHEDRON_VERTICES.map(Point3::from).to_vec(),
        TETRAHEDRON_TRIANGLES.to_vec(),
        TETRAHEDRON_VERTICES.map(Vec3::from).to_vec(),
    )
}

#[derive(Debug, thiserror::Error)]
pub enum ShapeError {
    #[error(transparent)]
    Spline(#[from] SplineError),
    #[error(transparent)]
    Polyhedron(#[from] PolyhedronError),
}

/// A parametric shape with its parameters, ready to tessellate.
#[derive(Debug, Clone)]
pub enum ParametricShape {
    Square,
    NoisySquare(Perlin),
    Sphere(RevolvedSurface<SphereProfile>),
    Torus(RevolvedSurface<TorusProfile>),
    Disk {
        surface: RevolvedSurface<CurveFn>,
        segments: usize,
    },
    OpenCylinder {
        surface: RevolvedSurface<CurveFn>,
        segments: usize,
    },
    Cup(RevolvedSurface<Spline>),
    Knot(ExtrudedSurface<SectionFn, CurveFn>),
}

impl ParametricShape {
    #[must_use]
    pub fn noisy_square(seed: u32) -> Self {
        Self::NoisySquare(Perlin::new(seed))
    }

    #[must_use]
    pub fn sphere(cut_off: f64) -> Self {
        Self::Sphere(RevolvedSurface::new(SphereProfile {
            cut_off: cut_off.clamp(0.0, 1.0),
        }))
    }

    #[must_use]
    pub fn torus(radius: f64) -> Self {
        Self::Torus(RevolvedSurface::new(TorusProfile { radius }))
    }

    /// Flat disk made of `segments` wedges.
    #[must_use]
    pub fn disk(segments: usize) -> Self {
        Self::Disk {
            surface: RevolvedSurface::new(disk_profile as CurveFn),
            segments,
        }
    }

    /// Uncapped cylinder of radius 1 and height 2, `segments` facets around.
    #[must_use]
    pub fn open_cylinder(segments: usize) -> Self {
        Self::OpenCylinder {
            surface: RevolvedSurface::new(cylinder_profile as CurveFn),
            segments,
        }
    }

    pub fn cup() -> Result<Self, SplineError> {
        let keys: Vec<Point3> = CUP_KEYS.iter().copied().map(Point3::from).collect();
        Ok(Self::Cup(RevolvedSurface::new(build_spline(&keys)?)))
    }

    #[must_use]
    pub fn knot() -> Self {
        Self::Knot(ExtrudedSurface::new(knot_section as SectionFn, knot_path as CurveFn))
    }

    #[must_use]
    pub fn kind(&self) -> ShapeKind {
        match self {
            Self::Square => ShapeKind::Square,
            Self::NoisySquare(_) => ShapeKind::NoisySquare,
            Self::Sphere(_) => ShapeKind::Sphere,
            Self::Torus(_) => ShapeKind::Torus,
            Self::Disk { .. } => ShapeKind::Disk,
            Self::OpenCylinder { .. } => ShapeKind::OpenCylinder,
            Self::Cup(_) => ShapeKind::Cup,
            Self::Knot(_) => ShapeKind::Knot,
        }
    }

    /// The grid this shape is meant to be built with.
    ///
    /// Disks and open cylinders are a single row of `segments` cells; every
    /// other shape uses `fallback`.
    #[must_use]
    pub fn resolution(&self, fallback: Resolution) -> Resolution {
        match self {
            Self::Disk { segments, .. } | Self::OpenCylinder { segments, .. } => {
                Resolution::new(*segments, 1)
            }
            _ => fallback,
        }
    }
}

impl Surface for ParametricShape {
    fn point_at(&self, u: f64, v: f64) -> Point3 {
        match self {
            Self::Square => Point3::new(2.0 * u - 1.0, 2.0 * v - 1.0, 0.0),
            Self::NoisySquare(perlin) => Point3::new(
                2.0 * u - 1.0,
                2.0 * v - 1.0,
                0.5 * perlin.get([3.0 * u, 3.0 * v, 0.5]),
            ),
            Self::Sphere(surface) => surface.point_at(u, v),
            Self::Torus(surface) => surface.point_at(u, v),
            Self::Disk { surface, .. } | Self::OpenCylinder { surface, .. } => {
                surface.point_at(u, v)
            }
            Self::Cup(surface) => surface.point_at(u, v),
            Self::Knot(surface) => surface.point_at(u, v),
        }
    }
}

/// Any catalog shape: a parametric surface, or a mesh built face by face.
#[derive(Debug, Clone)]
pub enum Shape {
    Parametric(ParametricShape),
    Cube,
    Polyhedron(Polyhedron),
}

impl From<ParametricShape> for Shape {
    fn from(shape: ParametricShape) -> Self {
        Self::Parametric(shape)
    }
}

impl From<Polyhedron> for Shape {
    fn from(polyhedron: Polyhedron) -> Self {
        Self::Polyhedron(polyhedron)
    }
}

impl Shape {
    /// Builds `kind` with its default parameters.
    pub fn new(kind: ShapeKind) -> Result<Self, ShapeError> {
        Ok(match kind {
            ShapeKind::Square => ParametricShape::Square.into(),
            ShapeKind::NoisySquare => ParametricShape::noisy_square(NOISE_SEED).into(),
            ShapeKind::Sphere => ParametricShape::sphere(0.0).into(),
            ShapeKind::Torus => ParametricShape::torus(0.3).into(),
            ShapeKind::Disk => ParametricShape::disk(10).into(),
            ShapeKind::OpenCylinder => ParametricShape::open_cylinder(10).into(),
            ShapeKind::Cup => ParametricShape::cup()?.into(),
            ShapeKind::Knot => ParametricShape::knot().into(),
            ShapeKind::Cube => Self::Cube,
            ShapeKind::Polyhedron => tetrahedron()?.into(),
        })
    }

    #[must_use]
    pub fn kind(&self) -> ShapeKind {
        match self {
            Self::Parametric(shape) => shape.kind(),
            Self::Cube => ShapeKind::Cube,
            Self::Polyhedron(_) => ShapeKind::Polyhedron,
        }
    }

    #[must_use]
    pub fn as_parametric(&self) -> Option<&ParametricShape> {
        match self {
            Self::Parametric(shape) => Some(shape),
            Self::Cube | Self::Polyhedron(_) => None,
        }
    }

    /// The strip grid for parametric shapes; `None` for face-built ones.
    #[must_use]
    pub fn resolution(&self, fallback: Resolution) -> Option<Resolution> {
        self.as_parametric().map(|shape| shape.resolution(fallback))
    }

    /// Meshes the shape. Parametric shapes are tessellated as a strip at
    /// their own resolution (or `fallback`); the rest are built directly.
    pub fn build(
        &self,
        fallback: Resolution,
        ctx: &mut GeomContext,
    ) -> Result<(SurfaceMesh, MeshDiagnostics), TessellationError> {
        let mesh = match self {
            Self::Parametric(shape) => {
                return mesh_surface_strip_with_context(shape, shape.resolution(fallback), ctx);
            }
            Self::Cube => cube_mesh(),
            Self::Polyhedron(polyhedron) => polyhedron.to_mesh(),
        };
        let diagnostics = MeshDiagnostics::from_mesh(&mesh);
        log::debug!("{} mesh: {}", self.kind(), diagnostics.summary());
        Ok((mesh, diagnostics))
    }
}
