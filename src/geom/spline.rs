//! Smooth polylines through sparse control points.
//!
//! [`build_spline`] turns a handful of keys into a dense polyline by cubic
//! Hermite interpolation between consecutive keys; [`Spline::sample`] then
//! maps a normalized parameter onto that polyline in constant time. The pair
//! is meant for profile curves: a shape builds its spline once and samples it
//! for every `v` of every mesh build.
//!
//! # Tangents
//!
//! For three or more keys the tangent `D[n]` at each key is:
//!
//! - first key: `(3 k[1] - 2 k[0] - k[2]) / 3`
//! - last key: `(2 k[last] - 3 k[last-1] + k[last-2]) / 3`
//! - interior: the neighbouring chords blended by the length of the
//!   *opposite* chord, `(L[n] (k[n] - k[n-1]) + L[n-1] (k[n+1] - k[n])) / (L[n-1] + L[n])`
//!
//! When the first and last keys coincide the two end tangents are replaced by
//! their average, so a closed profile has no kink at the seam.
//!
//! ```ignore
//! use shape_engine::geom::{Point3, build_spline};
//!
//! let spline = build_spline(&[Point3::xy(1.0, 0.2), Point3::xy(0.2, 1.0)])?;
//! assert_eq!(spline.len(), 11);
//! let mid = spline.sample(0.5);
//! ```

use super::core::{Point3, Tolerance, Vec3};

/// Resampling parameters for [`build_spline_with_options`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SplineOptions {
    /// Points emitted per key interval (the final key is appended once).
    /// Values below 1 are treated as 1.
    pub segments_per_key: usize,
    /// Scale applied to key tangents before interpolation; values below 1
    /// reduce overshoot between closely spaced keys.
    pub tangent_damping: f64,
}

impl Default for SplineOptions {
    fn default() -> Self {
        Self {
            segments_per_key: 10,
            tangent_damping: 0.9,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SplineError {
    #[error("spline needs at least one control point")]
    Empty,
    #[error("control point {index} is not finite")]
    NonFiniteControlPoint { index: usize },
}

/// A resampled curve. Built once, then only read.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Spline {
    points: Vec<Point3>,
}

impl Spline {
    /// Wraps an already resampled point sequence.
    #[must_use]
    pub fn from_points(points: Vec<Point3>) -> Self {
        Self { points }
    }

    #[must_use]
    pub fn points(&self) -> &[Point3] {
        &self.points
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Point at normalized parameter `t`; see [`sample_points`].
    #[must_use]
    pub fn sample(&self, t: f64) -> Point3 {
        sample_points(&self.points, t)
    }
}

/// Builds a spline through `keys` with the default options.
pub fn build_spline(keys: &[Point3]) -> Result<Spline, SplineError> {
    build_spline_with_options(keys, SplineOptions::default())
}

pub fn build_spline_with_options(
    keys: &[Point3],
    options: SplineOptions,
) -> Result<Spline, SplineError> {
    if keys.is_empty() {
        return Err(SplineError::Empty);
    }
    if let Some(index) = keys.iter().position(|p| !p.is_finite()) {
        return Err(SplineError::NonFiniteControlPoint { index });
    }

    let segments = options.segments_per_key.max(1);
    let points = match keys.len() {
        1 => keys.to_vec(),
        2 => (0..=segments)
            .map(|i| keys[0].lerp(keys[1], i as f64 / segments as f64))
            .collect(),
        _ => hermite_resample(keys, segments, options.tangent_damping),
    };

    log::debug!("spline: {} keys -> {} points", keys.len(), points.len());
    Ok(Spline { points })
}

fn hermite_resample(keys: &[Point3], segments: usize, damping: f64) -> Vec<Point3> {
    let tangents = key_tangents(keys);
    let mut points = Vec::with_capacity((keys.len() - 1) * segments + 1);

    for n in 0..keys.len() - 1 {
        let m0 = tangents[n] * damping;
        let m1 = tangents[n + 1] * damping;
        for i in 0..segments {
            let s = i as f64 / segments as f64;
            points.push(hermite_point(keys[n], m0, keys[n + 1], m1, s));
        }
    }
    points.push(keys[keys.len() - 1]);

    points
}

/// Cubic Hermite segment from `p0` (tangent `m0`) to `p1` (tangent `m1`) at `s` in `[0, 1]`.
fn hermite_point(p0: Point3, m0: Vec3, p1: Point3, m1: Vec3, s: f64) -> Point3 {
    let s2 = s * s;
    let s3 = s2 * s;

    let h00 = 2.0 * s3 - 3.0 * s2 + 1.0;
    let h10 = s3 - 2.0 * s2 + s;
    let h01 = -2.0 * s3 + 3.0 * s2;
    let h11 = s3 - s2;

    let v = p0.to_vec3() * h00 + m0 * h10 + p1.to_vec3() * h01 + m1 * h11;
    Point3::from(v)
}

/// Tangent estimate at every key, before damping.
///
/// With fewer than three keys there is nothing to extrapolate from: a single
/// key gets a zero tangent and two keys share their chord.
#[must_use]
pub fn key_tangents(keys: &[Point3]) -> Vec<Vec3> {
    match keys.len() {
        0 => return Vec::new(),
        1 => return vec![Vec3::ZERO],
        2 => {
            let chord = keys[1] - keys[0];
            return vec![chord, chord];
        }
        _ => {}
    }

    let k = |i: usize| keys[i].to_vec3();
    let last = keys.len() - 1;
    let chords: Vec<f64> = keys.windows(2).map(|w| w[0].distance_to(w[1])).collect();

    let mut tangents = Vec::with_capacity(keys.len());
    tangents.push((k(1) * 3.0 - k(0) * 2.0 - k(2)) / 3.0);
    for n in 1..last {
        let before = chords[n - 1];
        let after = chords[n];
        let total = before + after;
        if total > 0.0 {
            tangents.push((after * (k(n) - k(n - 1)) + before * (k(n + 1) - k(n))) / total);
        } else {
            tangents.push(Vec3::ZERO);
        }
    }
    tangents.push((k(last) * 2.0 - k(last - 1) * 3.0 + k(last - 2)) / 3.0);

    if Tolerance::DEFAULT.approx_eq_point3(keys[0], keys[last]) {
        let seam = (tangents[0] + tangents[last]) / 2.0;
        tangents[0] = seam;
        tangents[last] = seam;
    }

    tangents
}

/// Point at normalized parameter `t` along a resampled polyline.
///
/// `t` is clamped to `[0, 0.999]` (non-finite values count as 0) and mapped
/// linearly onto point indices, so samples are spaced by index rather than by
/// arc length. An empty sequence yields the origin and a single point is
/// returned as-is.
#[must_use]
pub fn sample_points(points: &[Point3], t: f64) -> Point3 {
    let t = if t.is_finite() { t.clamp(0.0, 0.999) } else { 0.0 };
    match points {
        [] => Point3::ORIGIN,
        [only] => *only,
        _ => {
            let index = (points.len() - 1) as f64 * t;
            let whole = index.floor();
            let i = whole as usize;
            points[i].lerp(points[i + 1], index - whole)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hermite_basis_hits_endpoints() {
        let p0 = Point3::new(0.0, 0.0, 0.0);
        let p1 = Point3::new(1.0, 2.0, 3.0);
        let m = Vec3::new(5.0, -5.0, 1.0);
        assert_eq!(hermite_point(p0, m, p1, m, 0.0), p0);
        let end = hermite_point(p0, m, p1, m, 1.0);
        assert!(Tolerance::DEFAULT.approx_eq_point3(end, p1));
    }

    #[test]
    fn hermite_output_length_is_segments_per_interval_plus_one() {
        let keys = [
            Point3::xy(0.0, 0.0),
            Point3::xy(1.0, 1.0),
            Point3::xy(2.0, 0.0),
            Point3::xy(3.0, 1.0),
        ];
        let spline = build_spline(&keys).unwrap();
        assert_eq!(spline.len(), 3 * 10 + 1);

        let coarse = build_spline_with_options(
            &keys,
            SplineOptions {
                segments_per_key: 0,
                ..Default::default()
            },
        )
        .unwrap();
        assert_eq!(coarse.points(), &keys);
    }

    #[test]
    fn key_tangents_use_endpoint_extrapolation() {
        let keys = [Point3::xy(0.0, 0.0), Point3::xy(1.0, 0.0), Point3::xy(2.0, 0.0)];
        let tangents = key_tangents(&keys);
        let tol = Tolerance::new(1e-12);
        assert!(tol.approx_eq_vec3(tangents[0], Vec3::new(1.0 / 3.0, 0.0, 0.0)));
        assert!(tol.approx_eq_vec3(tangents[1], Vec3::new(1.0, 0.0, 0.0)));
        assert!(tol.approx_eq_vec3(tangents[2], Vec3::new(1.0 / 3.0, 0.0, 0.0)));
    }

    #[test]
    fn interior_tangent_weights_by_opposite_chord() {
        let keys = [Point3::xy(0.0, 0.0), Point3::xy(1.0, 0.0), Point3::xy(1.0, 3.0)];
        let d = key_tangents(&keys)[1];
        // (3 * (1, 0) + 1 * (0, 3)) / 4
        assert!(Tolerance::new(1e-12).approx_eq_vec3(d, Vec3::new(0.75, 0.75, 0.0)));
    }

    #[test]
    fn coincident_keys_give_zero_interior_tangent() {
        let p = Point3::xy(1.0, 1.0);
        let keys = [Point3::xy(0.0, 0.0), p, p, p, Point3::xy(2.0, 0.0)];
        assert_eq!(key_tangents(&keys)[2], Vec3::ZERO);
    }

    #[test]
    fn sample_handles_degenerate_sequences() {
        assert_eq!(sample_points(&[], 0.5), Point3::ORIGIN);
        let only = Point3::new(1.0, 2.0, 3.0);
        assert_eq!(sample_points(&[only], 0.7), only);
        assert_eq!(Spline::default().sample(0.3), Point3::ORIGIN);
    }

    #[test]
    fn sample_clamps_and_rejects_nan() {
        let pts = [Point3::xy(0.0, 0.0), Point3::xy(1.0, 0.0)];
        assert_eq!(sample_points(&pts, -2.0), pts[0]);
        assert_eq!(sample_points(&pts, f64::NAN), pts[0]);
        let end = sample_points(&pts, 5.0);
        assert!((end.x - 0.999).abs() < 1e-12);
    }

    #[test]
    fn build_rejects_empty_and_non_finite_keys() {
        assert_eq!(build_spline(&[]), Err(SplineError::Empty));
        assert_eq!(
            build_spline(&[Point3::xy(0.0, 0.0), Point3::xy(f64::NAN, 1.0)]),
            Err(SplineError::NonFiniteControlPoint { index: 1 })
        );
    }
}
