//! Flat-buffer exporters for the rendering collaborator.
//!
//! Pure projections of current mesh state into the parallel float
//! buffers a rasterizer uploads: vertex-indexed position/normal
//! arrays with a fan-triangulated element buffer, and face-indexed
//! barycenter/normal arrays for face-centric drawing (normal glyphs,
//! debug views). Nothing here mutates the mesh.

use crate::mesh::SurfaceMesh;

/// Vertex-indexed render buffers: parallel position and normal
/// arrays (3 floats per vertex, vertex-index order) plus a triangle
/// element buffer.
#[derive(Debug, Clone)]
pub struct VertexRenderBuffers {
    pub positions: Vec<f32>,
    pub normals: Vec<f32>,
    /// Triangle indices into the vertex arrays; polygon faces are
    /// fan-triangulated.
    pub elements: Vec<u32>,
}

/// Face-indexed render buffers: barycenters and face normals
/// (3 floats per face, face-index order).
#[derive(Debug, Clone)]
pub struct FaceRenderBuffers {
    pub barycenters: Vec<f32>,
    pub normals: Vec<f32>,
}

impl SurfaceMesh {
    /// Exports vertex positions, vertex normals, and a triangle
    /// element buffer.
    ///
    /// Call `recompute_normals` first if positions changed since the
    /// last normal pass; otherwise the normal buffer is stale.
    pub fn export_pos_norm_buffer(&self) -> VertexRenderBuffers {
        let positions = self.positions();

        let normals_src = self.vertex_normals();
        let mut normals = Vec::with_capacity(normals_src.len() * 3);
        for n in normals_src {
            normals.push(n.x);
            normals.push(n.y);
            normals.push(n.z);
        }

        let vertex_map = self.vertices_to_indices();
        let mut elements = Vec::new();
        for i in 0..self.face_count() {
            let face = self.faces_to_indices().handle_at(i as u32);
            let loop_indices: Vec<u32> = self
                .kernel()
                .face_vertices(face)
                .iter()
                .map(|&v| vertex_map.index_of(v).unwrap_or(v.0))
                .collect();
            // Fan triangulation around the first loop vertex.
            for k in 1..loop_indices.len() - 1 {
                elements.push(loop_indices[0]);
                elements.push(loop_indices[k]);
                elements.push(loop_indices[k + 1]);
            }
        }

        VertexRenderBuffers {
            positions,
            normals,
            elements,
        }
    }

    /// Exports per-face barycenters and normals.
    pub fn export_face_norm_buffer(&self) -> FaceRenderBuffers {
        let face_count = self.face_count();
        let mut barycenters = Vec::with_capacity(face_count * 3);
        let mut normals = Vec::with_capacity(face_count * 3);

        let face_normals = self.face_normals();
        for i in 0..face_count {
            let face = self.faces_to_indices().handle_at(i as u32);
            let loop_vertices = self.kernel().face_vertices(face);
            let mut barycenter = weft_math::Vec3::ZERO;
            for &v in &loop_vertices {
                barycenter += self.position(v);
            }
            barycenter /= loop_vertices.len() as f32;

            barycenters.push(barycenter.x);
            barycenters.push(barycenter.y);
            barycenters.push(barycenter.z);

            let n = face_normals[i];
            normals.push(n.x);
            normals.push(n.y);
            normals.push(n.z);
        }

        FaceRenderBuffers {
            barycenters,
            normals,
        }
    }
}
