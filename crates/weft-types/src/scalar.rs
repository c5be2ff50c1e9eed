//! Scalar type alias for the simulation.
//!
//! `f32` matches the reference formulation and keeps mesh buffers
//! directly uploadable to rendering collaborators. The sparse
//! Cholesky backend promotes to `f64` internally where it matters.

/// The floating-point type used throughout the core.
pub type Scalar = f32;
