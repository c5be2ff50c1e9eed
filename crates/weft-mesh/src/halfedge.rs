//! Array-based half-edge kernel.
//!
//! Twin half-edges are stored adjacently: edge `e` owns the half-edge
//! pair at slots `2e` and `2e + 1`, so twin lookup is an index XOR and
//! edges never need their own array. Faces may have arbitrary degree
//! (polygons, not just triangles); each face links its half-edges into
//! a cycle via `next`.
//!
//! Topology is append-only in this core: once a mesh is imported the
//! handle set is fixed for the lifetime of the simulation, which is
//! what makes handles usable as stable property keys and
//! degree-of-freedom indices.

use std::collections::HashMap;

use weft_math::Vec3;
use weft_types::{EdgeHandle, FaceHandle, HalfedgeHandle, VertexHandle, WeftError, WeftResult};

#[derive(Debug, Clone)]
struct Vertex {
    point: Vec3,
    /// One outgoing half-edge, if the vertex is used by any face.
    halfedge: Option<HalfedgeHandle>,
}

#[derive(Debug, Clone)]
struct Halfedge {
    /// Target vertex.
    to: VertexHandle,
    /// Incident face; `None` for boundary half-edges.
    face: Option<FaceHandle>,
    /// Next half-edge in the face cycle; set when a face claims this half-edge.
    next: Option<HalfedgeHandle>,
}

#[derive(Debug, Clone)]
struct Face {
    /// First half-edge of the face cycle.
    halfedge: HalfedgeHandle,
    /// Number of vertices (= half-edges) in the cycle.
    degree: u32,
}

/// A polygonal surface mesh in half-edge representation.
#[derive(Debug, Clone, Default)]
pub struct HalfedgeMesh {
    vertices: Vec<Vertex>,
    halfedges: Vec<Halfedge>,
    faces: Vec<Face>,
    /// Canonical (min, max) vertex pair → edge, for twin pairing.
    edge_map: HashMap<(u32, u32), EdgeHandle>,
}

impl HalfedgeMesh {
    pub fn new() -> Self {
        Self::default()
    }

    // ─── Counts ──────────────────────────────────────────────

    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    #[inline]
    pub fn face_count(&self) -> usize {
        self.faces.len()
    }

    #[inline]
    pub fn edge_count(&self) -> usize {
        self.halfedges.len() / 2
    }

    #[inline]
    pub fn halfedge_count(&self) -> usize {
        self.halfedges.len()
    }

    // ─── Construction ────────────────────────────────────────

    /// Appends a vertex and returns its handle. Handles are assigned
    /// in insertion order and never reused.
    pub fn add_vertex(&mut self, point: Vec3) -> VertexHandle {
        let handle = VertexHandle(self.vertices.len() as u32);
        self.vertices.push(Vertex {
            point,
            halfedge: None,
        });
        handle
    }

    /// Adds a polygonal face over an ordered vertex loop.
    ///
    /// Fails with `Import` on:
    /// - degree < 3 or a repeated vertex in the loop
    /// - a vertex handle that does not exist
    /// - a non-manifold edge (an edge already bounded by two faces)
    ///
    /// The mesh is not mutated on failure.
    pub fn add_face(&mut self, loop_vertices: &[VertexHandle]) -> WeftResult<FaceHandle> {
        let n = loop_vertices.len();
        if n < 3 {
            return Err(WeftError::Import(format!(
                "face degree {n} is below the minimum of 3"
            )));
        }
        for &v in loop_vertices {
            if v.index() >= self.vertices.len() {
                return Err(WeftError::Import(format!(
                    "face references missing vertex {}",
                    v.0
                )));
            }
        }
        for i in 0..n {
            for j in (i + 1)..n {
                if loop_vertices[i] == loop_vertices[j] {
                    return Err(WeftError::Import(format!(
                        "face repeats vertex {}",
                        loop_vertices[i].0
                    )));
                }
            }
        }

        // Manifoldness pre-check before any mutation: every directed
        // edge of the loop must be free (nonexistent, or existing as
        // an unclaimed boundary half-edge).
        for i in 0..n {
            let from = loop_vertices[i];
            let to = loop_vertices[(i + 1) % n];
            if let Some(he) = self.find_halfedge(from, to) {
                if self.halfedges[he.index()].face.is_some() {
                    return Err(WeftError::Import(format!(
                        "non-manifold edge ({}, {}): already bounded by two faces",
                        from.0, to.0
                    )));
                }
            }
        }

        // Collect (creating where needed) the directed half-edges.
        let mut face_halfedges = Vec::with_capacity(n);
        for i in 0..n {
            let from = loop_vertices[i];
            let to = loop_vertices[(i + 1) % n];
            let he = match self.find_halfedge(from, to) {
                Some(he) => he,
                None => self.create_edge(from, to),
            };
            face_halfedges.push(he);
        }

        // Claim the half-edges and link the face cycle.
        let face = FaceHandle(self.faces.len() as u32);
        for i in 0..n {
            let he = face_halfedges[i];
            let next = face_halfedges[(i + 1) % n];
            let entry = &mut self.halfedges[he.index()];
            entry.face = Some(face);
            entry.next = Some(next);

            let from = loop_vertices[i];
            let vertex = &mut self.vertices[from.index()];
            if vertex.halfedge.is_none() {
                vertex.halfedge = Some(he);
            }
        }

        self.faces.push(Face {
            halfedge: face_halfedges[0],
            degree: n as u32,
        });
        Ok(face)
    }

    /// Creates the half-edge pair for a new edge (from → to) and
    /// returns the forward half-edge.
    fn create_edge(&mut self, from: VertexHandle, to: VertexHandle) -> HalfedgeHandle {
        let edge = EdgeHandle((self.halfedges.len() / 2) as u32);
        let forward = HalfedgeHandle(self.halfedges.len() as u32);
        self.halfedges.push(Halfedge {
            to,
            face: None,
            next: None,
        });
        self.halfedges.push(Halfedge {
            to: from,
            face: None,
            next: None,
        });
        self.edge_map.insert(Self::edge_key(from, to), edge);
        forward
    }

    #[inline]
    fn edge_key(a: VertexHandle, b: VertexHandle) -> (u32, u32) {
        if a.0 < b.0 { (a.0, b.0) } else { (b.0, a.0) }
    }

    // ─── Queries ─────────────────────────────────────────────

    /// One outgoing half-edge of a vertex, or `None` for an isolated
    /// vertex.
    pub fn vertex_halfedge(&self, vertex: VertexHandle) -> Option<HalfedgeHandle> {
        self.vertices[vertex.index()].halfedge
    }

    /// The directed half-edge from `from` to `to`, if that edge exists.
    pub fn find_halfedge(&self, from: VertexHandle, to: VertexHandle) -> Option<HalfedgeHandle> {
        let edge = *self.edge_map.get(&Self::edge_key(from, to))?;
        let forward = edge.halfedge(0);
        if self.halfedges[forward.index()].to == to {
            Some(forward)
        } else {
            Some(forward.twin())
        }
    }

    /// The edge connecting two vertices, if present.
    pub fn find_edge(&self, a: VertexHandle, b: VertexHandle) -> Option<EdgeHandle> {
        self.edge_map.get(&Self::edge_key(a, b)).copied()
    }

    /// The two endpoint vertices of an edge.
    pub fn edge_vertices(&self, edge: EdgeHandle) -> [VertexHandle; 2] {
        let forward = edge.halfedge(0);
        [
            self.halfedges[forward.twin().index()].to,
            self.halfedges[forward.index()].to,
        ]
    }

    /// True if the edge lies on the mesh boundary (at most one
    /// incident face).
    pub fn is_boundary_edge(&self, edge: EdgeHandle) -> bool {
        let forward = edge.halfedge(0);
        self.halfedges[forward.index()].face.is_none()
            || self.halfedges[forward.twin().index()].face.is_none()
    }

    /// Number of boundary edges.
    pub fn boundary_edge_count(&self) -> usize {
        self.edges().filter(|&e| self.is_boundary_edge(e)).count()
    }

    /// True if the mesh is closed (no boundary edges).
    pub fn is_closed(&self) -> bool {
        self.boundary_edge_count() == 0
    }

    /// Face degree (vertex count of the polygon).
    pub fn face_degree(&self, face: FaceHandle) -> usize {
        self.faces[face.index()].degree as usize
    }

    /// The half-edge cycle of a face, in loop order.
    pub fn face_halfedges(&self, face: FaceHandle) -> Vec<HalfedgeHandle> {
        let entry = &self.faces[face.index()];
        let mut cycle = Vec::with_capacity(entry.degree as usize);
        let mut current = entry.halfedge;
        for _ in 0..entry.degree {
            cycle.push(current);
            // Face cycles are fully linked at add_face time.
            current = self.halfedges[current.index()]
                .next
                .unwrap_or(entry.halfedge);
        }
        cycle
    }

    /// The vertex loop of a face, in the order the face was added.
    pub fn face_vertices(&self, face: FaceHandle) -> Vec<VertexHandle> {
        self.face_halfedges(face)
            .iter()
            .map(|he| self.halfedges[he.twin().index()].to)
            .collect()
    }

    // ─── Positions ───────────────────────────────────────────

    #[inline]
    pub fn point(&self, vertex: VertexHandle) -> Vec3 {
        self.vertices[vertex.index()].point
    }

    #[inline]
    pub fn set_point(&mut self, vertex: VertexHandle, point: Vec3) {
        self.vertices[vertex.index()].point = point;
    }

    // ─── Iterators ───────────────────────────────────────────

    pub fn vertices(&self) -> impl Iterator<Item = VertexHandle> {
        (0..self.vertices.len() as u32).map(VertexHandle)
    }

    pub fn faces(&self) -> impl Iterator<Item = FaceHandle> {
        (0..self.faces.len() as u32).map(FaceHandle)
    }

    pub fn edges(&self) -> impl Iterator<Item = EdgeHandle> {
        (0..(self.halfedges.len() / 2) as u32).map(EdgeHandle)
    }
}
