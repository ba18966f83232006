//! Finite-difference tangent frames for parametric surfaces.
//!
//! Tangents are central differences taken a fraction of one grid cell away
//! from the sample point. Two kinds of degeneracy are handled:
//!
//! - **Collapsed axis**: moving one parameter does not move the point (the
//!   cap of a sphere, the tip of a cone). The collapsed pair is resampled a
//!   quarter turn around the other parameter, which yields a usable proxy
//!   tangent.
//! - **Zero normal**: if the cross product still vanishes, the normal is the
//!   running average of the normals at four nearby parameter locations.
//!
//! A normal that is still zero after both steps is reported as such; the
//! mesher counts it but does not fail.
//!
//! The fix-up does not orient the result: a revolved sphere gets `-Z` at both
//! poles, so the north pole normal points into the sphere.

use super::core::{Tolerance, Vec3};
use super::surface::Surface;

/// Tunable constants for [`estimate_frame_with_options`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameOptions {
    /// Finite-difference step is `div / derivative_divisor` along each axis.
    pub derivative_divisor: f64,
    /// Pole-averaging samples sit `div / pole_offset_divisor` away from the vertex.
    pub pole_offset_divisor: f64,
    /// Parameter shift used to resample a collapsed axis.
    pub seam_offset: f64,
    /// Forward/backward samples closer than this are considered identical.
    pub degenerate_tolerance: Tolerance,
}

impl Default for FrameOptions {
    fn default() -> Self {
        Self {
            derivative_divisor: 200.0,
            pole_offset_divisor: 100.0,
            seam_offset: 0.25,
            degenerate_tolerance: Tolerance::ZERO_LENGTH,
        }
    }
}

/// Unit tangents along `u` and `v` and the surface normal `v x u`.
///
/// Any of the three may be [`Vec3::ZERO`] when the surface is degenerate at
/// the sampled location.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SurfaceFrame {
    pub u_tangent: Vec3,
    pub v_tangent: Vec3,
    pub normal: Vec3,
}

/// A frame together with the degeneracy handling that produced it.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct FrameEstimate {
    pub frame: SurfaceFrame,
    /// A collapsed axis was resampled a quarter turn away.
    pub axis_fixup: bool,
    /// The normal came from averaging nearby samples.
    pub pole_fallback: bool,
}

impl FrameEstimate {
    /// True when no usable normal could be recovered.
    #[must_use]
    pub fn is_unresolved(&self) -> bool {
        self.frame.normal == Vec3::ZERO
    }
}

/// Estimates the tangent frame of `surface` at `(u, v)` with default options.
///
/// `div_u` and `div_v` are the grid spacings of the mesh being built; the
/// difference steps scale with them.
#[must_use]
pub fn estimate_frame<S: Surface + ?Sized>(
    surface: &S,
    u: f64,
    v: f64,
    div_u: f64,
    div_v: f64,
) -> FrameEstimate {
    estimate_frame_with_options(surface, u, v, div_u, div_v, FrameOptions::default())
}

#[must_use]
pub fn estimate_frame_with_options<S: Surface + ?Sized>(
    surface: &S,
    u: f64,
    v: f64,
    div_u: f64,
    div_v: f64,
    options: FrameOptions,
) -> FrameEstimate {
    let (mut frame, axis_fixup) = difference_frame(surface, u, v, div_u, div_v, options);

    let mut pole_fallback = false;
    if frame.normal == Vec3::ZERO {
        frame.normal = average_pole_normal(surface, u, v, div_u, div_v, options);
        pole_fallback = true;
    }

    FrameEstimate {
        frame,
        axis_fixup,
        pole_fallback,
    }
}

/// Central-difference frame, resampling a collapsed axis when needed.
fn difference_frame<S: Surface + ?Sized>(
    surface: &S,
    u: f64,
    v: f64,
    div_u: f64,
    div_v: f64,
    options: FrameOptions,
) -> (SurfaceFrame, bool) {
    let eu = div_u / options.derivative_divisor;
    let ev = div_v / options.derivative_divisor;
    let tol = options.degenerate_tolerance;

    let mut pu = surface.point_at(u + eu, v);
    let mut nu = surface.point_at(u - eu, v);
    let mut pv = surface.point_at(u, v + ev);
    let mut nv = surface.point_at(u, v - ev);

    let mut fixed = false;
    if tol.is_zero_vec3(pu - nu) {
        let shifted_u = (u + options.seam_offset).rem_euclid(1.0);
        pu = surface.point_at(shifted_u, v + ev);
        nu = surface.point_at(shifted_u, v - ev);
        fixed = true;
    }
    if tol.is_zero_vec3(pv - nv) {
        let shifted_v = (v + options.seam_offset).rem_euclid(1.0);
        pv = surface.point_at(u + eu, shifted_v);
        nv = surface.point_at(u - eu, shifted_v);
        fixed = true;
    }

    let u_tangent = (pu - nu).normalized_or_zero();
    let v_tangent = (pv - nv).normalized_or_zero();
    let normal = v_tangent.cross(u_tangent).normalized_or_zero();

    (
        SurfaceFrame {
            u_tangent,
            v_tangent,
            normal,
        },
        fixed,
    )
}

fn average_pole_normal<S: Surface + ?Sized>(
    surface: &S,
    u: f64,
    v: f64,
    div_u: f64,
    div_v: f64,
    options: FrameOptions,
) -> Vec3 {
    let du = div_u / options.pole_offset_divisor;
    let dv = div_v / options.pole_offset_divisor;
    let nearby = [
        (u + du, v + dv),
        (u + du, v - dv),
        (u - du, v - dv),
        (u - du, v + dv),
    ];

    let mut average = Vec3::ZERO;
    for (i, (su, sv)) in nearby.into_iter().enumerate() {
        let (frame, _) = difference_frame(
            surface,
            su.clamp(0.0, 1.0),
            sv.clamp(0.0, 1.0),
            div_u,
            div_v,
            options,
        );
        let count = i as f64;
        average = average * (count / (count + 1.0)) + frame.normal / (count + 1.0);
    }

    average.normalized_or_zero()
}
