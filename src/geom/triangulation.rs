/// Expands a triangle strip of `vertex_count` vertices into a triangle list.
///
/// Triangle `i` uses `(i, i + 1, i + 2)` for even `i` and `(i + 1, i, i + 2)`
/// for odd `i`, so every face keeps the winding of the first one. Fewer than
/// three vertices produce no triangles.
///
/// Callers are responsible for `vertex_count` fitting in a `u32` index.
#[must_use]
pub fn triangulate_strip(vertex_count: usize) -> Vec<u32> {
    let triangle_count = vertex_count.saturating_sub(2);
    let mut indices = Vec::with_capacity(triangle_count * 3);

    for i in 0..triangle_count {
        let a = i as u32;
        if i % 2 == 0 {
            indices.extend_from_slice(&[a, a + 1, a + 2]);
        } else {
            indices.extend_from_slice(&[a + 1, a, a + 2]);
        }
    }

    indices
}
