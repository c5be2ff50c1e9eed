//! Procedural mesh sources for benchmarks and testing.
//!
//! These generators produce deterministic, resolution-configurable
//! cloth sheets at the import boundary, with correct winding order
//! and UV coordinates.

use crate::mesh::MeshSource;

/// Generates a flat rectangular quad grid in the XY plane,
/// triangulated two triangles per quad.
///
/// The grid spans `[-width/2, width/2]` in X and
/// `[-height/2, height/2]` in Y, centered at the origin at Z=0.
///
/// # Arguments
/// - `cols` — Number of quads along X (vertex count = cols + 1).
/// - `rows` — Number of quads along Y (vertex count = rows + 1).
/// - `width` — Total width in meters.
/// - `height` — Total height in meters.
///
/// A zero quad count is clamped to one, so the smallest sheet this
/// produces is a single quad.
pub fn quad_grid(cols: usize, rows: usize, width: f32, height: f32) -> MeshSource {
    let cols = cols.max(1);
    let rows = rows.max(1);
    let verts_x = cols + 1;
    let verts_y = rows + 1;

    let half_w = width / 2.0;
    let half_h = height / 2.0;

    let mut positions = Vec::with_capacity(verts_x * verts_y);
    let mut tex_coords = Vec::with_capacity(verts_x * verts_y);
    for j in 0..verts_y {
        for i in 0..verts_x {
            let u = i as f32 / cols as f32;
            let v = j as f32 / rows as f32;
            positions.push([-half_w + u * width, half_h - v * height, 0.0]);
            tex_coords.push([u, v]);
        }
    }

    let mut faces = Vec::with_capacity(cols * rows * 2);
    for j in 0..rows {
        for i in 0..cols {
            let top_left = (j * verts_x + i) as u32;
            let top_right = top_left + 1;
            let bot_left = top_left + verts_x as u32;
            let bot_right = bot_left + 1;

            faces.push(vec![top_left, bot_left, top_right]);
            faces.push(vec![top_right, bot_left, bot_right]);
        }
    }

    MeshSource {
        positions,
        faces,
        tex_coords: Some(tex_coords),
    }
}

/// A single triangle in the XY plane — the smallest valid cloth patch,
/// used by assembly tests.
pub fn single_triangle() -> MeshSource {
    MeshSource {
        positions: vec![[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]],
        faces: vec![vec![0, 1, 2]],
        tex_coords: Some(vec![[0.0, 0.0], [1.0, 0.0], [0.0, 1.0]]),
    }
}
