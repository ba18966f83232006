//! Cross-sections swept along a path.
//!
//! The profile is a planar function of both parameters, so a cross-section
//! may change along the path. The frame at each path point is built from the
//! forward difference of the path and the fixed `+X` direction:
//!
//! - `dz`: direction to the path point a small step ahead
//! - `dx`: `+X`
//! - `dy`: `dx x dz`, normalized
//!
//! The profile's `x` maps to `dx` and its `y` to `dy`. The frame is not
//! orthonormal when the path tangent has an `X` component; paths that run
//! along `X` produce a collapsed `dy`.

use super::core::{Point3, Vec3};
use super::surface::Surface;

/// Cross-section `(u, v) -> (x, y)`; `u` runs around the section and `v`
/// along the path.
pub trait ExtrusionProfile {
    fn section_at(&self, u: f64, v: f64) -> Point3;
}

impl<F> ExtrusionProfile for F
where
    F: Fn(f64, f64) -> Point3,
{
    fn section_at(&self, u: f64, v: f64) -> Point3 {
        self(u, v)
    }
}

/// Spine curve `v -> point`.
pub trait ExtrusionPath {
    fn path_at(&self, v: f64) -> Point3;
}

impl<F> ExtrusionPath for F
where
    F: Fn(f64) -> Point3,
{
    fn path_at(&self, v: f64) -> Point3 {
        self(v)
    }
}

#[derive(Debug, Clone)]
pub struct ExtrudedSurface<Pr, Pa> {
    profile: Pr,
    path: Pa,
    /// Parameter distance to the point used for the path direction.
    pub path_step: f64,
}

impl<Pr: ExtrusionProfile, Pa: ExtrusionPath> ExtrudedSurface<Pr, Pa> {
    #[must_use]
    pub fn new(profile: Pr, path: Pa) -> Self {
        Self {
            profile,
            path,
            path_step: 0.001,
        }
    }

    #[must_use]
    pub fn with_path_step(mut self, path_step: f64) -> Self {
        self.path_step = path_step;
        self
    }
}

impl<Pr: ExtrusionProfile, Pa: ExtrusionPath> Surface for ExtrudedSurface<Pr, Pa> {
    fn point_at(&self, u: f64, v: f64) -> Point3 {
        let section = self.profile.section_at(u, v);
        let origin = self.path.path_at(v);
        let ahead = self.path.path_at(v + self.path_step);

        let dz = (ahead - origin).normalized_or_zero();
        let dx = Vec3::X;
        let dy = dx.cross(dz).normalized_or_zero();

        origin + dx * section.x + dy * section.y
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn straight_path_along_z_keeps_section_axes() {
        let surface = ExtrudedSurface::new(
            |u: f64, _v: f64| Point3::xy(u, 2.0 * u),
            |v: f64| Point3::new(0.0, 0.0, v),
        );
        let p = surface.point_at(0.5, 0.25);
        // +X cross +Z = -Y
        assert!((p.x - 0.5).abs() < 1e-9);
        assert!((p.y + 1.0).abs() < 1e-9);
        assert!((p.z - 0.25).abs() < 1e-9);
    }

    #[test]
    fn path_along_x_collapses_section_y() {
        let surface = ExtrudedSurface::new(
            |_u: f64, _v: f64| Point3::xy(0.0, 1.0),
            |v: f64| Point3::new(v, 0.0, 0.0),
        );
        assert_eq!(surface.point_at(0.3, 0.5), Point3::new(0.5, 0.0, 0.0));
    }
}
