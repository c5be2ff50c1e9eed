//! Handle ↔ dense-index bijections.
//!
//! Scatter-add assembly needs every mesh entity numbered into a dense
//! integer range `[0, count)`. The mapping is rebuilt once per
//! topology change and is stable across all property accesses within
//! that topology epoch; the vertex mapping in particular defines the
//! block row/column layout of the global sparse matrix (vertex `i`
//! owns scalar rows/columns `[3i, 3i + 3)`).

use std::collections::HashMap;
use std::hash::Hash;

use weft_types::{EdgeHandle, FaceHandle, HalfedgeHandle, VertexHandle};

/// A mesh entity handle usable as an index-map and property key.
pub trait Handle: Copy + Eq + Hash {
    fn from_raw(raw: u32) -> Self;
    fn index(self) -> usize;
}

impl Handle for VertexHandle {
    fn from_raw(raw: u32) -> Self {
        Self(raw)
    }
    fn index(self) -> usize {
        self.0 as usize
    }
}

impl Handle for FaceHandle {
    fn from_raw(raw: u32) -> Self {
        Self(raw)
    }
    fn index(self) -> usize {
        self.0 as usize
    }
}

impl Handle for EdgeHandle {
    fn from_raw(raw: u32) -> Self {
        Self(raw)
    }
    fn index(self) -> usize {
        self.0 as usize
    }
}

impl Handle for HalfedgeHandle {
    fn from_raw(raw: u32) -> Self {
        Self(raw)
    }
    fn index(self) -> usize {
        self.0 as usize
    }
}

/// A one-to-one mapping between entity handles and `[0, count)`.
///
/// Read-only for callers: the domain only changes on a topology
/// rebuild, never per timestep.
#[derive(Debug, Clone)]
pub struct IndexMap<H: Handle> {
    handles: Vec<H>,
    indices: HashMap<H, u32>,
}

impl<H: Handle> IndexMap<H> {
    /// Builds the mapping over the given handles, numbering them in
    /// iteration order.
    pub fn from_handles(handles: impl Iterator<Item = H>) -> Self {
        let handles: Vec<H> = handles.collect();
        let indices = handles
            .iter()
            .enumerate()
            .map(|(i, &h)| (h, i as u32))
            .collect();
        Self { handles, indices }
    }

    /// Number of mapped entities.
    #[inline]
    pub fn len(&self) -> usize {
        self.handles.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.handles.is_empty()
    }

    /// Dense index of a handle, or `None` for a handle outside this
    /// topology epoch.
    pub fn index_of(&self, handle: H) -> Option<u32> {
        self.indices.get(&handle).copied()
    }

    /// Handle at a dense index.
    pub fn handle_at(&self, index: u32) -> H {
        self.handles[index as usize]
    }

    /// Handles in dense-index order.
    pub fn handles(&self) -> &[H] {
        &self.handles
    }
}
