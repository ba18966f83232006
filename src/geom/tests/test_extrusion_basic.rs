use super::super::*;
use std::f64::consts::TAU;

const RADIUS: f64 = 0.25;

fn circle(u: f64, _v: f64) -> Point3 {
    Point3::xy(RADIUS * (TAU * u).cos(), RADIUS * (TAU * u).sin())
}

fn vertical(v: f64) -> Point3 {
    Point3::new(0.0, 0.0, 3.0 * v)
}

#[test]
fn straight_tube_keeps_constant_radius() {
    let tube = ExtrudedSurface::new(circle, vertical);
    let (mesh, diagnostics) = mesh_surface_strip(&tube, Resolution::new(16, 8)).unwrap();

    assert!(diagnostics.is_clean());
    for p in &mesh.positions {
        let r = (p[0] * p[0] + p[1] * p[1]).sqrt();
        assert!((r - RADIUS).abs() < 1e-9);
        assert!((0.0..=3.0).contains(&p[2]));
    }
}

#[test]
fn straight_tube_normals_are_radial() {
    let tube = ExtrudedSurface::new(circle, vertical);
    let mesh = build_mesh(16, 4, &tube).unwrap();

    for (p, n) in mesh.positions.iter().zip(&mesh.normals) {
        let n = Vec3::from(*n);
        let radial = Vec3::new(p[0], p[1], 0.0).normalized_or_zero();
        assert!((n.length() - 1.0).abs() < 1e-9);
        assert!(n.z.abs() < 1e-6);
        assert!(n.dot(radial).abs() > 0.999);
    }
}

#[test]
fn section_y_maps_against_world_y_on_a_z_path() {
    let tube = ExtrudedSurface::new(circle, vertical);
    // u = 0.25 puts the section point at (0, RADIUS); dy = X x Z = -Y
    let p = tube.point_at(0.25, 0.5);
    assert!(Tolerance::DEFAULT.approx_eq_point3(p, Point3::new(0.0, -RADIUS, 1.5)));
}

#[test]
fn path_step_is_configurable() {
    let bent = |v: f64| Point3::new(0.0, v * v, v);
    let near = ExtrudedSurface::new(circle, bent);
    let far = ExtrudedSurface::new(circle, bent).with_path_step(0.5);

    assert_eq!(near.path_step, 0.001);
    let (a, b) = (near.point_at(0.25, 0.5), far.point_at(0.25, 0.5));
    assert_ne!(a, b);
    // the section's x axis is fixed, so x does not depend on the step
    assert_eq!(a.x, b.x);
}

#[test]
fn varying_section_follows_v() {
    let taper = |u: f64, v: f64| {
        let r = 0.5 * (1.0 - v) + 0.1;
        Point3::xy(r * (TAU * u).cos(), r * (TAU * u).sin())
    };
    let cone = ExtrudedSurface::new(taper, vertical);
    let bottom = cone.point_at(0.0, 0.0);
    let top = cone.point_at(0.0, 1.0);
    assert!((bottom.x - 0.6).abs() < 1e-12);
    assert!((top.x - 0.1).abs() < 1e-12);
}
