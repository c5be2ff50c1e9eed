//! Dense per-entity property storage.
//!
//! A strongly-typed registry replacing duck-typed property-map
//! lookup: each property is a name mapped to a dense `Vec<Vec3>`
//! indexed by the entity's dense index, default-filled over all live
//! entities at add time and kept hole-free for the life of the mesh.
//! 3D vectors cover every property this core stores (positions,
//! predicted/last positions, normals, planar coordinates).

use std::collections::HashMap;
use std::marker::PhantomData;

use weft_math::Vec3;

use crate::index_map::Handle;

/// Named `Vec3` properties for one entity kind (vertex, face, edge).
///
/// The phantom handle parameter keeps vertex properties from being
/// read with face handles and vice versa.
#[derive(Debug, Clone)]
pub struct PropertySet<H: Handle> {
    /// Number of live entities; every property vector has this length.
    len: usize,
    properties: HashMap<String, Vec<Vec3>>,
    _entity: PhantomData<H>,
}

impl<H: Handle> PropertySet<H> {
    /// Creates an empty registry for `len` entities.
    pub fn new(len: usize) -> Self {
        Self {
            len,
            properties: HashMap::new(),
            _entity: PhantomData,
        }
    }

    /// Number of entities each property covers.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Capability check: does a property of this name exist?
    pub fn has_property(&self, name: &str) -> bool {
        self.properties.contains_key(name)
    }

    /// Adds a property default-filled over all entities. If the
    /// property already exists it is left untouched (matching
    /// add-if-absent property-map semantics).
    pub fn add_property(&mut self, name: &str, default: Vec3) {
        if !self.properties.contains_key(name) {
            self.properties.insert(name.to_string(), vec![default; self.len]);
        }
    }

    /// Removes a property. Returns true if it existed.
    pub fn remove_property(&mut self, name: &str) -> bool {
        self.properties.remove(name).is_some()
    }

    /// Dense read access in entity-index order.
    pub fn values(&self, name: &str) -> Option<&[Vec3]> {
        self.properties.get(name).map(Vec::as_slice)
    }

    /// Dense write access in entity-index order.
    pub fn values_mut(&mut self, name: &str) -> Option<&mut [Vec3]> {
        self.properties.get_mut(name).map(Vec::as_mut_slice)
    }

    /// Value for one entity.
    pub fn value(&self, name: &str, handle: H) -> Option<Vec3> {
        self.properties.get(name).map(|v| v[handle.index()])
    }

    /// Sets the value for one entity. No-op if the property does not
    /// exist; call `add_property` first.
    pub fn set_value(&mut self, name: &str, handle: H, value: Vec3) {
        if let Some(values) = self.properties.get_mut(name) {
            values[handle.index()] = value;
        }
    }

    /// Names of all registered properties.
    pub fn property_names(&self) -> impl Iterator<Item = &str> {
        self.properties.keys().map(String::as_str)
    }
}
