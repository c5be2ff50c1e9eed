//! # weft-types
//!
//! Shared types, entity handles, error types, and numeric constants
//! for the Weft cloth simulation core.
//!
//! This crate has zero domain logic — it defines the vocabulary
//! that all other Weft crates share.

pub mod constants;
pub mod error;
pub mod handles;
pub mod scalar;

pub use error::{WeftError, WeftResult};
pub use handles::{EdgeHandle, FaceHandle, HalfedgeHandle, VertexHandle};
pub use scalar::Scalar;
