//! # weft-math
//!
//! Linear algebra for the Weft implicit cloth core.
//!
//! Provides:
//! - Re-exports of `glam` types (`Vec3`, `Mat3`, etc.)
//! - A CSR sparse matrix with diagonal views and validation predicates
//! - A block (3x3-per-vertex-pair) assembly matrix for force Jacobians
//! - Dense 3x3 helpers (skew-symmetric operator, tolerance checks)
//! - The sparse Cholesky solver boundary (trait + faer implementation)

pub mod block;
pub mod dense;
pub mod solver;
pub mod sparse;

// Re-export glam types as the canonical math types for Weft.
pub use glam::{Mat3, Mat4, Quat, Vec2, Vec3, Vec4};

pub use block::BlockMatrix;
pub use solver::{CholeskySolver, SparseSolver};
pub use sparse::{DiagonalView, SparseMatrix};
