use super::super::*;
use std::f64::consts::{PI, TAU};

fn sphere_profile(t: f64) -> Point3 {
    let phi = PI * (t - 0.5);
    Point3::xy(phi.cos(), phi.sin())
}

fn torus_profile(t: f64) -> Point3 {
    let phi = TAU * t;
    Point3::xy(1.0 - 0.3 * phi.cos(), -0.3 * phi.sin())
}

#[test]
fn revolved_sphere_has_unit_radius_and_resolved_poles() {
    let sphere = RevolvedSurface::new(sphere_profile);
    let (mesh, diagnostics) = mesh_surface_strip(&sphere, Resolution::new(24, 16)).unwrap();

    for p in &mesh.positions {
        assert!((Vec3::from(*p).length() - 1.0).abs() < 1e-9);
    }
    assert!(diagnostics.axis_fixup_count > 0);
    assert_eq!(diagnostics.unresolved_vertex_count, 0);
    assert!(mesh.singular_vertices().is_empty());
}

#[test]
fn south_pole_normals_align_with_axis() {
    let sphere = RevolvedSurface::new(sphere_profile);
    let mesh = build_mesh(30, 30, &sphere).unwrap();

    let down = Vec3::new(0.0, 0.0, -1.0);
    let mut pole_vertices = 0;
    for (uv, n) in mesh.uvs.iter().zip(&mesh.normals) {
        if uv[1] == 0.0 {
            pole_vertices += 1;
            assert!(Vec3::from(*n).dot(down) > 0.95, "normal {n:?} at {uv:?}");
        }
    }
    assert_eq!(pole_vertices, 31 + 1);
}

#[test]
fn sphere_normals_and_tangents_are_unit_length() {
    let sphere = RevolvedSurface::new(sphere_profile);
    let mesh = build_mesh(12, 12, &sphere).unwrap();
    for (n, t) in mesh.normals.iter().zip(&mesh.tangents) {
        assert!((Vec3::from(*n).length() - 1.0).abs() < 1e-9);
        assert!((Vec3::new(t[0], t[1], t[2]).length() - 1.0).abs() < 1e-9);
    }
}

#[test]
fn torus_needs_no_singularity_handling() {
    let torus = RevolvedSurface::new(torus_profile);
    let (mesh, diagnostics) = mesh_surface_strip(&torus, Resolution::new(20, 12)).unwrap();

    assert!(diagnostics.is_clean());
    assert_eq!(diagnostics.axis_fixup_count, 0);
    assert_eq!(diagnostics.pole_fallback_count, 0);
    for p in &mesh.positions {
        let r = (p[0] * p[0] + p[1] * p[1]).sqrt();
        assert!((0.7 - 1e-9..=1.3 + 1e-9).contains(&r));
    }
}

#[test]
fn revolution_runs_clockwise_from_plus_x() {
    let cylinder = RevolvedSurface::new(|t: f64| Point3::xy(1.0, 2.0 * t - 1.0));
    let tol = Tolerance::new(1e-12);
    assert!(tol.approx_eq_point3(cylinder.point_at(0.0, 0.5), Point3::new(1.0, 0.0, 0.0)));
    assert!(tol.approx_eq_point3(cylinder.point_at(0.25, 0.5), Point3::new(0.0, -1.0, 0.0)));
    assert!(tol.approx_eq_point3(cylinder.point_at(0.5, 1.0), Point3::new(-1.0, 0.0, 1.0)));
}

#[test]
fn flat_disk_normals_are_vertical() {
    let disk = RevolvedSurface::new(|t: f64| Point3::xy(t + 0.001, 0.0));
    let (mesh, diagnostics) = mesh_surface_strip(&disk, Resolution::new(10, 1)).unwrap();

    assert!(diagnostics.is_clean());
    for n in &mesh.normals {
        assert!(Tolerance::LOOSE.approx_eq_vec3(Vec3::from(*n), Vec3::new(0.0, 0.0, -1.0)));
    }
}

#[test]
fn spline_profiles_revolve() {
    let keys = [
        Point3::xy(0.5, -1.0),
        Point3::xy(0.8, 0.0),
        Point3::xy(0.5, 1.0),
    ];
    let vase = RevolvedSurface::new(build_spline(&keys).unwrap());
    let (mesh, diagnostics) = mesh_surface_strip(&vase, Resolution::new(4, 4)).unwrap();

    // at this density the top row still differences across distinct spline points
    assert!(diagnostics.is_clean());
    mesh.validate().unwrap();
    assert!(Tolerance::DEFAULT.approx_eq_point3(
        Point3::from(mesh.positions[0]),
        Point3::new(0.5, 0.0, -1.0)
    ));
}
