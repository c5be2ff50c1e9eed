//! Strongly-typed handles for mesh entities.
//!
//! Newtype wrappers prevent accidental mixing of vertex handles
//! with face or edge handles. A handle stays valid (and is never
//! reused) for as long as the entity it names exists; it doubles
//! as the key into the property registry and, through the index
//! mappings, into the global degree-of-freedom numbering.

use serde::{Deserialize, Serialize};

/// Handle to a vertex of a half-edge mesh.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct VertexHandle(pub u32);

/// Handle to a face (polygon) of a half-edge mesh.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FaceHandle(pub u32);

/// Handle to an undirected edge of a half-edge mesh.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EdgeHandle(pub u32);

/// Handle to a single directed half-edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct HalfedgeHandle(pub u32);

impl VertexHandle {
    /// Returns the raw index as `usize` for array indexing.
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl FaceHandle {
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl EdgeHandle {
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }

    /// The two half-edges of edge `e` are stored at slots `2e` and `2e + 1`.
    #[inline]
    pub fn halfedge(self, side: u32) -> HalfedgeHandle {
        HalfedgeHandle(self.0 * 2 + (side & 1))
    }
}

impl HalfedgeHandle {
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }

    /// The oppositely-directed half-edge of the same edge.
    #[inline]
    pub fn twin(self) -> HalfedgeHandle {
        HalfedgeHandle(self.0 ^ 1)
    }

    /// The undirected edge this half-edge belongs to.
    #[inline]
    pub fn edge(self) -> EdgeHandle {
        EdgeHandle(self.0 / 2)
    }
}

impl From<u32> for VertexHandle {
    fn from(val: u32) -> Self {
        Self(val)
    }
}

impl From<u32> for FaceHandle {
    fn from(val: u32) -> Self {
        Self(val)
    }
}

impl From<u32> for EdgeHandle {
    fn from(val: u32) -> Self {
        Self(val)
    }
}

impl From<u32> for HalfedgeHandle {
    fn from(val: u32) -> Self {
        Self(val)
    }
}
