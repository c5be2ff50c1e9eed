//! Face and vertex normal computation.
//!
//! Face normals use Newell's method, which is exact for planar
//! polygons and well-behaved for the slightly non-planar quads a
//! deforming cloth produces. The unnormalized Newell vector has
//! magnitude 2x the polygon area, so accumulating it per vertex and
//! normalizing afterwards yields area-weighted vertex normals.

use weft_math::Vec3;
use weft_types::constants::NORMAL_EPSILON;

/// Unnormalized Newell normal of a polygon (magnitude = 2 x area).
pub fn newell_normal(points: &[Vec3]) -> Vec3 {
    let mut normal = Vec3::ZERO;
    for i in 0..points.len() {
        let current = points[i];
        let next = points[(i + 1) % points.len()];
        normal.x += (current.y - next.y) * (current.z + next.z);
        normal.y += (current.z - next.z) * (current.x + next.x);
        normal.z += (current.x - next.x) * (current.y + next.y);
    }
    normal
}

/// Normalizes `v`, mapping degenerate (near-zero) vectors to zero
/// instead of amplifying noise into a unit direction.
pub fn normalize_or_zero(v: Vec3) -> Vec3 {
    let len_sq = v.length_squared();
    if len_sq > NORMAL_EPSILON {
        v / len_sq.sqrt()
    } else {
        Vec3::ZERO
    }
}
