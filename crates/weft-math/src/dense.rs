//! Dense 3x3 helpers for per-block Jacobian construction.
//!
//! These are the small value-type operations the force/Jacobian
//! computation combines into block contributions: the cross-product
//! operator for rotational terms, and the strict tolerance checks
//! used as assembly-correctness assertions.

use glam::{Mat3, Vec3};
use weft_types::constants::CHECK_TOLERANCE;

/// Returns the skew-symmetric cross-product operator `S(v)`,
/// satisfying `skew_symmetric(v) * x == v.cross(x)` for all `x`.
///
/// ```text
///        [  0   -vz   vy ]
/// S(v) = [  vz   0   -vx ]
///        [ -vy   vx   0  ]
/// ```
///
/// Used to linearize rotational force terms (angular velocity and
/// Coriolis-like contributions) into 3x3 Jacobian blocks.
#[inline]
pub fn skew_symmetric(v: Vec3) -> Mat3 {
    Mat3::from_cols(
        Vec3::new(0.0, v.z, -v.y),
        Vec3::new(-v.z, 0.0, v.x),
        Vec3::new(v.y, -v.x, 0.0),
    )
}

/// Returns true iff all corresponding entries of `a` and `b` differ
/// by at most `tolerance`.
///
/// Validation predicate for debug builds; never errors. The default
/// tolerance is [`CHECK_TOLERANCE`] — strict enough that this means
/// "equal up to floating-point noise", not an engineering comparison.
pub fn mat3_identical(a: &Mat3, b: &Mat3, tolerance: f32) -> bool {
    let a = a.to_cols_array();
    let b = b.to_cols_array();
    a.iter().zip(b.iter()).all(|(x, y)| (x - y).abs() <= tolerance)
}

/// `mat3_identical` with the default strict tolerance.
pub fn mat3_identical_strict(a: &Mat3, b: &Mat3) -> bool {
    mat3_identical(a, b, CHECK_TOLERANCE)
}

/// Returns true iff `|m[i][j] - m[j][i]| <= tolerance` for all i, j.
pub fn mat3_symmetrical(m: &Mat3, tolerance: f32) -> bool {
    mat3_identical(m, &m.transpose(), tolerance)
}

/// `mat3_symmetrical` with the default strict tolerance.
pub fn mat3_symmetrical_strict(m: &Mat3) -> bool {
    mat3_symmetrical(m, CHECK_TOLERANCE)
}

/// Total-order maximum. Returns `a` when the arguments are equal,
/// so repeated reductions are deterministic.
#[inline]
pub fn scalar_max(a: f32, b: f32) -> f32 {
    if a >= b {
        a
    } else {
        b
    }
}

/// Total-order minimum. Returns `a` when the arguments are equal.
#[inline]
pub fn scalar_min(a: f32, b: f32) -> f32 {
    if a <= b {
        a
    } else {
        b
    }
}
