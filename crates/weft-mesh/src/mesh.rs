//! The mesh model: topology, index mappings, and property storage.
//!
//! [`SurfaceMesh`] is what the timestep driver talks to. It owns a
//! half-edge kernel outright (no shared global mesh state), the dense
//! index mappings that define the block layout of the implicit
//! system, and the per-vertex/per-face property registry (current,
//! last and predicted positions, normals, planar coordinates).
//!
//! Lifecycle: `import` fixes the topology; `add_positions_property`
//! seeds the integration state; from then on the driver mutates
//! positions every timestep and the topology never changes.

use serde::{Deserialize, Serialize};
use weft_math::{Mat4, Vec3};
use weft_types::{EdgeHandle, FaceHandle, VertexHandle, WeftError, WeftResult};

use crate::halfedge::HalfedgeMesh;
use crate::index_map::IndexMap;
use crate::normals::{newell_normal, normalize_or_zero};
use crate::properties::PropertySet;

/// Per-vertex 2D texture coordinates from the asset loader.
pub const PROP_TEX_COORDS: &str = "v:texture_coordinates";
/// Per-vertex 3D planar (rest-state) coordinates lifted from UVs.
pub const PROP_PLANAR_COORDS: &str = "v:planar_coordinates";
/// Per-vertex normals; valid only after `recompute_normals`.
pub const PROP_VERTEX_NORMALS: &str = "v:vertex_normals";
/// Per-vertex positions at the end of the previous timestep.
pub const PROP_LAST_POSITIONS: &str = "v:last_positions";
/// Per-vertex predicted positions for the current timestep.
pub const PROP_PREDICT_POSITIONS: &str = "v:predict_positions";
/// Per-face normals; valid only after `recompute_normals`.
pub const PROP_FACE_NORMALS: &str = "f:face_normals";

/// Import-boundary mesh data from an external asset-loading
/// collaborator: raw positions, polygon connectivity, optional UVs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MeshSource {
    /// Vertex positions.
    pub positions: Vec<[f32; 3]>,
    /// Faces as vertex-index loops; arbitrary polygon degree.
    pub faces: Vec<Vec<u32>>,
    /// Optional per-vertex texture coordinates (same length as
    /// `positions` when present).
    pub tex_coords: Option<Vec<[f32; 2]>>,
}

/// The simulated surface: half-edge topology plus property storage.
///
/// Handle raw indices coincide with the dense indices of the current
/// topology epoch (the kernel is append-only and import is the only
/// construction path), which is the invariant that lets the property
/// registry index its vectors directly by handle.
#[derive(Debug, Clone)]
pub struct SurfaceMesh {
    kernel: HalfedgeMesh,
    vertex_indices: IndexMap<VertexHandle>,
    face_indices: IndexMap<FaceHandle>,
    edge_indices: IndexMap<EdgeHandle>,
    vertex_props: PropertySet<VertexHandle>,
    face_props: PropertySet<FaceHandle>,
}

impl SurfaceMesh {
    /// Builds the mesh model from an external mesh representation.
    ///
    /// Fails with `Import` if the source connectivity is non-manifold
    /// or otherwise unrepresentable, or if the texture-coordinate
    /// array does not match the vertex count. No partial mesh is
    /// retained on failure.
    pub fn import(source: &MeshSource) -> WeftResult<Self> {
        if let Some(tex) = &source.tex_coords {
            if tex.len() != source.positions.len() {
                return Err(WeftError::Import(format!(
                    "texture coordinate count {} does not match vertex count {}",
                    tex.len(),
                    source.positions.len()
                )));
            }
        }

        let mut kernel = HalfedgeMesh::new();
        let handles: Vec<VertexHandle> = source
            .positions
            .iter()
            .map(|&[x, y, z]| kernel.add_vertex(Vec3::new(x, y, z)))
            .collect();

        for face in &source.faces {
            let loop_vertices: Vec<VertexHandle> = face
                .iter()
                .map(|&i| {
                    handles.get(i as usize).copied().ok_or_else(|| {
                        WeftError::Import(format!("face references missing vertex {i}"))
                    })
                })
                .collect::<WeftResult<_>>()?;
            kernel.add_face(&loop_vertices)?;
        }

        let vertex_indices = IndexMap::from_handles(kernel.vertices());
        let face_indices = IndexMap::from_handles(kernel.faces());
        let edge_indices = IndexMap::from_handles(kernel.edges());

        let mut vertex_props = PropertySet::new(kernel.vertex_count());
        vertex_props.add_property(PROP_VERTEX_NORMALS, Vec3::ZERO);
        if let Some(tex) = &source.tex_coords {
            vertex_props.add_property(PROP_TEX_COORDS, Vec3::ZERO);
            let values = vertex_props
                .values_mut(PROP_TEX_COORDS)
                .expect("property added above");
            for (value, &[u, v]) in values.iter_mut().zip(tex.iter()) {
                *value = Vec3::new(u, v, 0.0);
            }
        }

        let mut face_props = PropertySet::new(kernel.face_count());
        face_props.add_property(PROP_FACE_NORMALS, Vec3::ZERO);

        log::debug!(
            "imported surface mesh: {} vertices, {} faces, {} edges ({} boundary)",
            kernel.vertex_count(),
            kernel.face_count(),
            kernel.edge_count(),
            kernel.boundary_edge_count(),
        );

        Ok(Self {
            kernel,
            vertex_indices,
            face_indices,
            edge_indices,
            vertex_props,
            face_props,
        })
    }

    // ─── Counts & topology access ────────────────────────────

    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.kernel.vertex_count()
    }

    #[inline]
    pub fn face_count(&self) -> usize {
        self.kernel.face_count()
    }

    #[inline]
    pub fn edge_count(&self) -> usize {
        self.kernel.edge_count()
    }

    /// The underlying half-edge kernel (read-only).
    pub fn kernel(&self) -> &HalfedgeMesh {
        &self.kernel
    }

    // ─── Index mappings ──────────────────────────────────────

    /// Vertex → dense index bijection. Defines the block row/column
    /// layout of the assembled system: vertex `i` owns scalar
    /// rows/columns `[3i, 3i + 3)`.
    pub fn vertices_to_indices(&self) -> &IndexMap<VertexHandle> {
        &self.vertex_indices
    }

    pub fn faces_to_indices(&self) -> &IndexMap<FaceHandle> {
        &self.face_indices
    }

    pub fn edges_to_indices(&self) -> &IndexMap<EdgeHandle> {
        &self.edge_indices
    }

    // ─── Properties ──────────────────────────────────────────

    pub fn vertex_properties(&self) -> &PropertySet<VertexHandle> {
        &self.vertex_props
    }

    pub fn vertex_properties_mut(&mut self) -> &mut PropertySet<VertexHandle> {
        &mut self.vertex_props
    }

    pub fn face_properties(&self) -> &PropertySet<FaceHandle> {
        &self.face_props
    }

    pub fn face_properties_mut(&mut self) -> &mut PropertySet<FaceHandle> {
        &mut self.face_props
    }

    // ─── Positions ───────────────────────────────────────────

    /// Current vertex positions as a flat vector of length 3V,
    /// ordered by the vertex index mapping. Read-only snapshot.
    pub fn positions(&self) -> Vec<f32> {
        let count = self.vertex_count();
        let mut flat = Vec::with_capacity(count * 3);
        for i in 0..count {
            let p = self.kernel.point(self.vertex_indices.handle_at(i as u32));
            flat.push(p.x);
            flat.push(p.y);
            flat.push(p.z);
        }
        flat
    }

    /// Writes back vertex positions in vertex-index order.
    ///
    /// Fails with `DimensionMismatch` unless the input has length 3V;
    /// the mesh is untouched in that case.
    pub fn set_positions(&mut self, positions: &[f32]) -> WeftResult<()> {
        let expected = self.vertex_count() * 3;
        if positions.len() != expected {
            return Err(WeftError::DimensionMismatch {
                expected,
                actual: positions.len(),
            });
        }
        for (i, chunk) in positions.chunks_exact(3).enumerate() {
            let handle = self.vertex_indices.handle_at(i as u32);
            self.kernel
                .set_point(handle, Vec3::new(chunk[0], chunk[1], chunk[2]));
        }
        Ok(())
    }

    /// Position of a single vertex.
    #[inline]
    pub fn position(&self, vertex: VertexHandle) -> Vec3 {
        self.kernel.point(vertex)
    }

    /// Seeds the "last position" and "predicted position" properties
    /// from the current positions.
    ///
    /// Idempotent under unchanged topology: calling again simply
    /// re-seeds both properties from the current positions.
    pub fn add_positions_property(&mut self) {
        self.vertex_props.add_property(PROP_LAST_POSITIONS, Vec3::ZERO);
        self.vertex_props.add_property(PROP_PREDICT_POSITIONS, Vec3::ZERO);
        for handle in self.kernel.vertices() {
            let p = self.kernel.point(handle);
            self.vertex_props.set_value(PROP_LAST_POSITIONS, handle, p);
            self.vertex_props.set_value(PROP_PREDICT_POSITIONS, handle, p);
        }
    }

    /// Positions at the end of the previous timestep, or `None`
    /// before `add_positions_property`.
    pub fn last_positions(&self) -> Option<&[Vec3]> {
        self.vertex_props.values(PROP_LAST_POSITIONS)
    }

    pub fn last_positions_mut(&mut self) -> Option<&mut [Vec3]> {
        self.vertex_props.values_mut(PROP_LAST_POSITIONS)
    }

    /// Predicted positions for the current timestep.
    pub fn predicted_positions(&self) -> Option<&[Vec3]> {
        self.vertex_props.values(PROP_PREDICT_POSITIONS)
    }

    pub fn predicted_positions_mut(&mut self) -> Option<&mut [Vec3]> {
        self.vertex_props.values_mut(PROP_PREDICT_POSITIONS)
    }

    // ─── Normals ─────────────────────────────────────────────

    /// Recomputes face and vertex normals from current positions.
    ///
    /// Must be called after any position mutation before normals are
    /// read; normals are not kept valid otherwise.
    pub fn recompute_normals(&mut self) {
        let vertex_count = self.vertex_count();
        let mut accumulated = vec![Vec3::ZERO; vertex_count];

        for face in self.kernel.faces() {
            let loop_vertices = self.kernel.face_vertices(face);
            let points: Vec<Vec3> = loop_vertices.iter().map(|&v| self.kernel.point(v)).collect();

            let newell = newell_normal(&points);
            self.face_props
                .set_value(PROP_FACE_NORMALS, face, normalize_or_zero(newell));

            // Area-weighted accumulation: the unnormalized Newell
            // vector carries the face area as its magnitude.
            for &v in &loop_vertices {
                accumulated[v.index()] += newell;
            }
        }

        let normals = self
            .vertex_props
            .values_mut(PROP_VERTEX_NORMALS)
            .expect("seeded at import");
        for (normal, sum) in normals.iter_mut().zip(accumulated) {
            *normal = normalize_or_zero(sum);
        }
    }

    /// Vertex normals in vertex-index order (zero until
    /// `recompute_normals` has run).
    pub fn vertex_normals(&self) -> &[Vec3] {
        self.vertex_props
            .values(PROP_VERTEX_NORMALS)
            .expect("seeded at import")
    }

    /// Face normals in face-index order.
    pub fn face_normals(&self) -> &[Vec3] {
        self.face_props
            .values(PROP_FACE_NORMALS)
            .expect("seeded at import")
    }

    // ─── Transforms ──────────────────────────────────────────

    /// Applies a homogeneous affine transform to every vertex
    /// position in place. Normals are not recomputed; that remains
    /// the caller's responsibility.
    pub fn affine(&mut self, transform: &Mat4) {
        for handle in self.kernel.vertices() {
            let p = self.kernel.point(handle);
            let transformed = transform.transform_point3(p);
            self.kernel.set_point(handle, transformed);
        }
    }

    // ─── Planar coordinates ──────────────────────────────────

    /// Lifts imported 2D texture coordinates into the 3D planar
    /// (rest-state) coordinate property used by the stretch/shear
    /// force model. Returns false (and does nothing) when the source
    /// mesh carried no texture coordinates.
    pub fn use_tex_coords_as_planar(&mut self) -> bool {
        if !self.vertex_props.has_property(PROP_TEX_COORDS) {
            log::warn!("no texture coordinates imported; planar coordinates unavailable");
            return false;
        }
        self.vertex_props.add_property(PROP_PLANAR_COORDS, Vec3::ZERO);
        let tex: Vec<Vec3> = self
            .vertex_props
            .values(PROP_TEX_COORDS)
            .expect("checked above")
            .to_vec();
        let planar = self
            .vertex_props
            .values_mut(PROP_PLANAR_COORDS)
            .expect("added above");
        planar.copy_from_slice(&tex);
        true
    }

    /// Planar coordinates, or `None` before `use_tex_coords_as_planar`.
    pub fn planar_coords(&self) -> Option<&[Vec3]> {
        self.vertex_props.values(PROP_PLANAR_COORDS)
    }
}
