//! Parametric surfaces and the clamped sampler used by the strip mesher.
//!
//! A [`Surface`] maps normalized coordinates `(u, v)` to a point in model
//! space. Any `Fn(f64, f64) -> Point3` closure is a surface, so shapes can be
//! written either as named types or as inline formulas:
//!
//! ```ignore
//! use shape_engine::geom::{Point3, Surface};
//!
//! let plane = |u: f64, v: f64| Point3::new(2.0 * u - 1.0, 2.0 * v - 1.0, 0.0);
//! assert_eq!(plane.point_at(0.5, 0.5), Point3::ORIGIN);
//! ```

use super::core::Point3;

/// A mapping from two normalized parameters to a 3D point.
///
/// Implementations must return finite points for `u` and `v` in `[0, 1]`.
/// Finite differencing in [`super::frame`] also evaluates slightly outside
/// that range (by a fraction of one grid cell), so formulas should extend
/// smoothly past the domain edges where possible.
pub trait Surface {
    fn point_at(&self, u: f64, v: f64) -> Point3;
}

impl<F> Surface for F
where
    F: Fn(f64, f64) -> Point3,
{
    fn point_at(&self, u: f64, v: f64) -> Point3 {
        self(u, v)
    }
}

/// Clamping applied to emitted vertex positions.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SamplingOptions {
    /// Upper bound for `v`. Kept just below 1 so the end of a profile curve
    /// (often a seam or a repeated key) is never sampled exactly.
    pub max_v: f64,
}

impl Default for SamplingOptions {
    fn default() -> Self {
        Self { max_v: 0.999 }
    }
}

/// Evaluates `surface` with `u` clamped to `[0, 1]` and `v` clamped to
/// `[0, options.max_v]`.
#[must_use]
pub fn sample_surface_with_options<S: Surface + ?Sized>(
    surface: &S,
    u: f64,
    v: f64,
    options: SamplingOptions,
) -> Point3 {
    surface.point_at(clamp_unit(u, 1.0), clamp_unit(v, options.max_v))
}

/// Evaluates `surface` with the default clamp (`u` in `[0, 1]`, `v` in `[0, 0.999]`).
#[must_use]
pub fn sample_surface<S: Surface + ?Sized>(surface: &S, u: f64, v: f64) -> Point3 {
    sample_surface_with_options(surface, u, v, SamplingOptions::default())
}

fn clamp_unit(value: f64, max: f64) -> f64 {
    if value.is_nan() {
        return 0.0;
    }
    value.clamp(0.0, max)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn identity_surface(u: f64, v: f64) -> Point3 {
        Point3::new(u, v, 0.0)
    }

    #[test]
    fn sampler_clamps_u_to_unit_interval() {
        assert_eq!(sample_surface(&identity_surface, -0.5, 0.5).x, 0.0);
        assert_eq!(sample_surface(&identity_surface, 1.5, 0.5).x, 1.0);
        assert_eq!(sample_surface(&identity_surface, 0.25, 0.5).x, 0.25);
    }

    #[test]
    fn sampler_never_reaches_v_one() {
        assert_eq!(sample_surface(&identity_surface, 0.5, 1.0).y, 0.999);
        assert_eq!(sample_surface(&identity_surface, 0.5, -1.0).y, 0.0);
        assert_eq!(sample_surface(&identity_surface, 0.5, 0.998).y, 0.998);
    }

    #[test]
    fn sampler_respects_custom_v_bound() {
        let options = SamplingOptions { max_v: 1.0 };
        let p = sample_surface_with_options(&identity_surface, 0.5, 1.0, options);
        assert_eq!(p.y, 1.0);
    }

    #[test]
    fn trait_objects_can_be_sampled() {
        let boxed: Box<dyn Surface> = Box::new(identity_surface);
        let p = sample_surface(&*boxed, 0.1, 2.0);
        assert_eq!(p, Point3::new(0.1, 0.999, 0.0));
    }
}
