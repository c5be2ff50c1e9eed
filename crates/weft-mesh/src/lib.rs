//! # weft-mesh
//!
//! Half-edge surface mesh model for the Weft implicit cloth core.
//!
//! ## Key Types
//!
//! - [`SurfaceMesh`] — The mesh model: topology, index mappings, and
//!   per-entity property storage (positions, normals, planar coords).
//! - [`HalfedgeMesh`] — The underlying array-based half-edge kernel.
//! - [`MeshSource`] — The import boundary: positions, polygon faces,
//!   optional texture coordinates from an external asset loader.
//! - [`IndexMap`] — Stable handle ↔ dense-index bijections that define
//!   the block layout of the assembled implicit system.

pub mod export;
pub mod generators;
pub mod halfedge;
pub mod index_map;
pub mod mesh;
pub mod normals;
pub mod properties;

pub use export::{FaceRenderBuffers, VertexRenderBuffers};
pub use halfedge::HalfedgeMesh;
pub use index_map::IndexMap;
pub use mesh::{MeshSource, SurfaceMesh};
pub use properties::PropertySet;
