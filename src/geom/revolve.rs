//! Surfaces of revolution around the Z axis.
//!
//! A profile maps `v` to a planar point `(r, z)` stored in `x`/`y`. The
//! surface sweeps that profile once around the axis as `u` runs from 0 to 1,
//! clockwise when viewed from `+Z`:
//!
//! ```text
//! theta = -2 pi u
//! P(u, v) = (r cos theta, r sin theta, z)
//! ```

use std::f64::consts::TAU;

use super::core::Point3;
use super::spline::Spline;
use super::surface::Surface;

/// A planar curve `t -> (x, y)` used as a revolution or extrusion profile.
pub trait ProfileCurve {
    fn point_at(&self, t: f64) -> Point3;
}

impl<F> ProfileCurve for F
where
    F: Fn(f64) -> Point3,
{
    fn point_at(&self, t: f64) -> Point3 {
        self(t)
    }
}

impl ProfileCurve for Spline {
    fn point_at(&self, t: f64) -> Point3 {
        self.sample(t)
    }
}

#[derive(Debug, Clone)]
pub struct RevolvedSurface<P> {
    profile: P,
}

impl<P: ProfileCurve> RevolvedSurface<P> {
    #[must_use]
    pub fn new(profile: P) -> Self {
        Self { profile }
    }

    #[must_use]
    pub fn profile(&self) -> &P {
        &self.profile
    }
}

impl<P: ProfileCurve> Surface for RevolvedSurface<P> {
    fn point_at(&self, u: f64, v: f64) -> Point3 {
        let profile = self.profile.point_at(v);
        let theta = -TAU * u;
        Point3::new(profile.x * theta.cos(), profile.x * theta.sin(), profile.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn revolving_constant_radius_gives_circle() {
        let surface = RevolvedSurface::new(|_t: f64| Point3::xy(2.0, 0.5));
        let p = surface.point_at(0.25, 0.3);
        assert!(p.x.abs() < 1e-12);
        assert!((p.y + 2.0).abs() < 1e-12);
        assert_eq!(p.z, 0.5);
    }

    #[test]
    fn splines_are_profiles() {
        let spline = Spline::from_points(vec![Point3::xy(1.0, 0.0), Point3::xy(1.0, 2.0)]);
        let surface = RevolvedSurface::new(spline);
        let p = surface.point_at(0.0, 0.5);
        assert!((p.x - 1.0).abs() < 1e-12);
        assert!((p.z - 1.0).abs() < 1e-12);
    }
}
