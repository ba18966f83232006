use super::super::*;

fn plane(u: f64, v: f64) -> Point3 {
    Point3::new(2.0 * u - 1.0, 2.0 * v - 1.0, 0.0)
}

#[test]
fn buffer_lengths_follow_closed_form() {
    for (u_count, v_count) in [(1, 1), (2, 3), (7, 4), (30, 30)] {
        let mesh = build_mesh(u_count, v_count, &plane).expect("plane should tessellate");
        let expected = (u_count + 1) * 2 * v_count + v_count;

        assert_eq!(mesh.positions.len(), expected);
        assert_eq!(mesh.normals.len(), expected);
        assert_eq!(mesh.tangents.len(), expected);
        assert_eq!(mesh.uvs.len(), expected);
        assert_eq!(mesh.indices.len(), 3 * (expected - 2));
        assert!(mesh.indices.iter().all(|&i| (i as usize) < expected));
    }
}

#[test]
fn uvs_zigzag_and_land_exactly_on_row_ends() {
    let mesh = build_mesh(3, 2, &plane).unwrap();
    let row = (3 + 1) * 2 + 1;

    assert_eq!(mesh.uvs[0], [0.0, 0.0]);
    assert_eq!(mesh.uvs[1], [0.0, 0.5]);
    // last lower/upper pair of row 0, then the bridge
    assert_eq!(mesh.uvs[row - 3], [1.0, 0.0]);
    assert_eq!(mesh.uvs[row - 2], [1.0, 0.5]);
    assert_eq!(mesh.uvs[row - 1], [1.0, 0.0]);
    // row 1 runs back from u = 1
    assert_eq!(mesh.uvs[row], [1.0, 0.5]);
    assert_eq!(mesh.uvs[row + 1], [1.0, 1.0]);
    assert_eq!(mesh.uvs[2 * row - 1], [0.0, 0.5]);
}

#[test]
fn bridge_vertex_repeats_last_lower_vertex() {
    let mesh = build_mesh(4, 3, &plane).unwrap();
    let row = (4 + 1) * 2 + 1;
    for r in 0..3 {
        let bridge = (r + 1) * row - 1;
        assert_eq!(mesh.positions[bridge], mesh.positions[bridge - 2]);
        assert_eq!(mesh.normals[bridge], mesh.normals[bridge - 2]);
    }
}

#[test]
fn emitted_positions_are_clamped_below_v_one() {
    let mesh = build_mesh(2, 2, &plane).unwrap();
    let top = mesh
        .uvs
        .iter()
        .position(|uv| uv[1] == 1.0)
        .expect("grid reaches v = 1");
    assert!((mesh.positions[top][1] - 0.998).abs() < 1e-12);
    assert_eq!(mesh.uvs[top][1], 1.0);
}

#[test]
fn custom_sampling_bound_is_honored() {
    let options = StripTessellationOptions {
        sampling: SamplingOptions { max_v: 1.0 },
        ..Default::default()
    };
    let mut ctx = GeomContext::with_options(options);
    let (mesh, _) =
        mesh_surface_strip_with_context(&plane, Resolution::new(2, 2), &mut ctx).unwrap();
    let max_y = mesh
        .positions
        .iter()
        .map(|p| p[1])
        .fold(f64::NEG_INFINITY, f64::max);
    assert_eq!(max_y, 1.0);
}

#[test]
fn plane_has_uniform_normals_and_no_singularities() {
    let (mesh, diagnostics) = mesh_surface_strip(&plane, Resolution::new(9, 5)).unwrap();

    assert!(diagnostics.is_clean());
    assert_eq!(diagnostics.axis_fixup_count, 0);
    assert_eq!(diagnostics.pole_fallback_count, 0);
    for n in &mesh.normals {
        assert!(Tolerance::DEFAULT.approx_eq_vec3(Vec3::from(*n), Vec3::new(0.0, 0.0, -1.0)));
    }
    for t in &mesh.tangents {
        assert!(Tolerance::DEFAULT.approx_eq_vec3(Vec3::new(t[0], t[1], t[2]), Vec3::X));
        assert_eq!(t[3], 0.0);
    }
}

#[test]
fn builds_are_independent() {
    let first = build_mesh(6, 6, &plane).unwrap();
    let second = build_mesh(6, 6, &plane).unwrap();
    assert_eq!(first, second);
}

#[test]
fn zero_resolution_is_rejected_before_sampling() {
    let panicking = |_u: f64, _v: f64| -> Point3 { panic!("surface must not be sampled") };
    assert!(matches!(
        mesh_surface_strip(&panicking, Resolution::new(3, 0)),
        Err(TessellationError::InvalidResolution { u_count: 3, v_count: 0 })
    ));
}
