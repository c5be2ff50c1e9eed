//! Error types for the Weft core.
//!
//! All crates return `WeftResult<T>` from fallible operations.
//! Validation predicates (symmetry/identity checks) are deliberately
//! not represented here — they return plain booleans.

use thiserror::Error;

/// Unified error type for the Weft core.
#[derive(Debug, Error)]
pub enum WeftError {
    /// Source mesh topology cannot be represented (non-manifold edge,
    /// degenerate face). Fatal at load time; no partial mesh is retained.
    #[error("Import failed: {0}")]
    Import(String),

    /// A flat buffer had the wrong length for the mesh or matrix it
    /// was applied to. Fatal to the call; the caller must not proceed.
    #[error("Dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    /// A block coordinate fell outside the valid vertex range.
    /// Indicates an assembly-logic bug upstream, not a runtime condition.
    #[error("Block index {index} out of range (bound: {bound})")]
    IndexOutOfRange { index: usize, bound: usize },

    /// Sparse factorization or solve failed at the solver boundary.
    #[error("Solver error: {0}")]
    Solver(String),
}

/// Convenience alias for `Result<T, WeftError>`.
pub type WeftResult<T> = Result<T, WeftError>;
