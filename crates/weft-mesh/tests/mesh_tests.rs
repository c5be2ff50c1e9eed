//! Integration tests for weft-mesh.

use weft_math::{Mat3, Mat4, Vec3};
use weft_math::block::BlockMatrix;
use weft_mesh::generators::{quad_grid, single_triangle};
use weft_mesh::mesh::{MeshSource, SurfaceMesh};
use weft_types::constants::CHECK_TOLERANCE;
use weft_types::WeftError;

fn import(source: &MeshSource) -> SurfaceMesh {
    let _ = env_logger::builder().is_test(true).try_init();
    SurfaceMesh::import(source).expect("import failed")
}

// ─── Import & Topology Tests ──────────────────────────────────

#[test]
fn import_single_triangle() {
    let mesh = import(&single_triangle());
    assert_eq!(mesh.vertex_count(), 3);
    assert_eq!(mesh.face_count(), 1);
    assert_eq!(mesh.edge_count(), 3);
    assert_eq!(mesh.kernel().boundary_edge_count(), 3);
    assert!(!mesh.kernel().is_closed());
}

#[test]
fn import_quad_grid() {
    let mesh = import(&quad_grid(2, 2, 1.0, 1.0));
    assert_eq!(mesh.vertex_count(), 9);
    assert_eq!(mesh.face_count(), 8);
    // Euler characteristic of a disk: V - E + F = 1.
    assert_eq!(mesh.edge_count(), 16);
    assert_eq!(mesh.kernel().boundary_edge_count(), 8);
}

#[test]
fn quad_grid_clamps_zero_resolution() {
    // Degenerate quad counts clamp to a single quad instead of
    // producing NaN positions.
    let source = quad_grid(0, 0, 1.0, 1.0);
    assert_eq!(source.positions.len(), 4);
    assert_eq!(source.faces.len(), 2);
    for p in &source.positions {
        assert!(p.iter().all(|c| c.is_finite()), "position = {p:?}");
    }
    let mesh = import(&source);
    assert_eq!(mesh.vertex_count(), 4);
}

#[test]
fn import_polygon_face() {
    // A single quad face — arbitrary polygon degree is supported.
    let source = MeshSource {
        positions: vec![
            [0.0, 0.0, 0.0],
            [1.0, 0.0, 0.0],
            [1.0, 1.0, 0.0],
            [0.0, 1.0, 0.0],
        ],
        faces: vec![vec![0, 1, 2, 3]],
        tex_coords: None,
    };
    let mesh = import(&source);
    assert_eq!(mesh.face_count(), 1);
    assert_eq!(mesh.edge_count(), 4);
    assert_eq!(mesh.kernel().face_degree(weft_types::FaceHandle(0)), 4);
}

#[test]
fn import_rejects_non_manifold_edge() {
    // Three faces around the edge (0, 1).
    let source = MeshSource {
        positions: vec![
            [0.0, 0.0, 0.0],
            [1.0, 0.0, 0.0],
            [0.0, 1.0, 0.0],
            [0.0, -1.0, 0.0],
            [0.0, 0.0, 1.0],
        ],
        faces: vec![vec![0, 1, 2], vec![1, 0, 3], vec![0, 1, 4]],
        tex_coords: None,
    };
    let err = SurfaceMesh::import(&source).unwrap_err();
    assert!(matches!(err, WeftError::Import(_)), "got {err:?}");
}

#[test]
fn import_rejects_degenerate_faces() {
    let positions = vec![[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]];

    let repeated = MeshSource {
        positions: positions.clone(),
        faces: vec![vec![0, 1, 1]],
        tex_coords: None,
    };
    assert!(SurfaceMesh::import(&repeated).is_err());

    let too_small = MeshSource {
        positions: positions.clone(),
        faces: vec![vec![0, 1]],
        tex_coords: None,
    };
    assert!(SurfaceMesh::import(&too_small).is_err());

    let out_of_range = MeshSource {
        positions,
        faces: vec![vec![0, 1, 9]],
        tex_coords: None,
    };
    assert!(SurfaceMesh::import(&out_of_range).is_err());
}

#[test]
fn import_rejects_mismatched_tex_coords() {
    let mut source = single_triangle();
    source.tex_coords = Some(vec![[0.0, 0.0]]);
    assert!(SurfaceMesh::import(&source).is_err());
}

// ─── Index Mapping Tests ──────────────────────────────────────

#[test]
fn index_maps_are_bijections() {
    let mesh = import(&quad_grid(3, 2, 1.0, 1.0));

    let vertices = mesh.vertices_to_indices();
    assert_eq!(vertices.len(), mesh.vertex_count());
    for i in 0..vertices.len() as u32 {
        assert_eq!(vertices.index_of(vertices.handle_at(i)), Some(i));
    }

    let faces = mesh.faces_to_indices();
    assert_eq!(faces.len(), mesh.face_count());
    for i in 0..faces.len() as u32 {
        assert_eq!(faces.index_of(faces.handle_at(i)), Some(i));
    }

    let edges = mesh.edges_to_indices();
    assert_eq!(edges.len(), mesh.edge_count());
    for i in 0..edges.len() as u32 {
        assert_eq!(edges.index_of(edges.handle_at(i)), Some(i));
    }
}

// ─── Position Tests ───────────────────────────────────────────

#[test]
fn positions_round_trip_is_identity() {
    let mut mesh = import(&quad_grid(2, 2, 1.0, 1.0));
    let before = mesh.positions();
    assert_eq!(before.len(), mesh.vertex_count() * 3);
    mesh.set_positions(&before).unwrap();
    assert_eq!(mesh.positions(), before);
}

#[test]
fn set_positions_rejects_wrong_length() {
    let mut mesh = import(&single_triangle());
    let err = mesh.set_positions(&[0.0; 8]).unwrap_err();
    match err {
        WeftError::DimensionMismatch { expected, actual } => {
            assert_eq!(expected, 9);
            assert_eq!(actual, 8);
        }
        other => panic!("unexpected error: {other:?}"),
    }
    // Failed call leaves the mesh untouched.
    assert_eq!(mesh.positions().len(), 9);
}

#[test]
fn add_positions_property_seeds_and_reseeds() {
    let mut mesh = import(&single_triangle());
    assert!(mesh.last_positions().is_none());

    mesh.add_positions_property();
    let current = mesh.positions();
    let last = mesh.last_positions().unwrap().to_vec();
    let predicted = mesh.predicted_positions().unwrap().to_vec();
    for (i, p) in last.iter().enumerate() {
        assert_eq!(p.x, current[i * 3]);
        assert_eq!(p.y, current[i * 3 + 1]);
        assert_eq!(p.z, current[i * 3 + 2]);
    }
    assert_eq!(last, predicted);

    // Move vertices, re-seed: both properties track the new positions.
    let moved: Vec<f32> = current.iter().map(|x| x + 1.0).collect();
    mesh.set_positions(&moved).unwrap();
    mesh.add_positions_property();
    let reseeded = mesh.last_positions().unwrap();
    assert_eq!(reseeded[0].x, last[0].x + 1.0);
}

// ─── Normal Tests ─────────────────────────────────────────────

#[test]
fn recompute_normals_flat_grid() {
    let mut mesh = import(&quad_grid(2, 2, 1.0, 1.0));
    mesh.recompute_normals();

    for n in mesh.vertex_normals() {
        assert!((*n - Vec3::Z).length() < 1e-6, "normal = {n:?}");
    }
    for n in mesh.face_normals() {
        assert!((*n - Vec3::Z).length() < 1e-6, "face normal = {n:?}");
    }
}

#[test]
fn degenerate_normals_map_to_zero() {
    use weft_mesh::normals::{newell_normal, normalize_or_zero};

    // A collapsed (zero-area) loop yields the zero vector, not a
    // noise-amplified unit direction.
    let collapsed = [Vec3::ZERO, Vec3::ZERO, Vec3::ZERO];
    assert_eq!(normalize_or_zero(newell_normal(&collapsed)), Vec3::ZERO);
    assert_eq!(normalize_or_zero(Vec3::splat(1e-8)), Vec3::ZERO);

    // Well-formed input still normalizes.
    let n = normalize_or_zero(Vec3::new(0.0, 0.0, 3.0));
    assert!((n - Vec3::Z).length() < 1e-6);
}

#[test]
fn normals_follow_position_updates() {
    let mut mesh = import(&single_triangle());
    mesh.recompute_normals();
    assert!((mesh.vertex_normals()[0] - Vec3::Z).length() < 1e-6);

    // Rotate the triangle into the XZ plane; normals must follow
    // only after an explicit recompute.
    let rotation = Mat4::from_rotation_x(std::f32::consts::FRAC_PI_2);
    mesh.affine(&rotation);
    assert!((mesh.vertex_normals()[0] - Vec3::Z).length() < 1e-6);

    mesh.recompute_normals();
    let expected = rotation.transform_vector3(Vec3::Z);
    assert!((mesh.vertex_normals()[0] - expected).length() < 1e-5);
}

// ─── Transform Tests ──────────────────────────────────────────

#[test]
fn affine_translates_positions() {
    let mut mesh = import(&single_triangle());
    let before = mesh.positions();
    mesh.affine(&Mat4::from_translation(Vec3::new(1.0, 2.0, 3.0)));
    let after = mesh.positions();
    for i in 0..mesh.vertex_count() {
        assert!((after[i * 3] - before[i * 3] - 1.0).abs() < 1e-6);
        assert!((after[i * 3 + 1] - before[i * 3 + 1] - 2.0).abs() < 1e-6);
        assert!((after[i * 3 + 2] - before[i * 3 + 2] - 3.0).abs() < 1e-6);
    }
}

// ─── Planar Coordinate Tests ──────────────────────────────────

#[test]
fn tex_coords_lift_to_planar() {
    let mut mesh = import(&single_triangle());
    assert!(mesh.planar_coords().is_none());
    assert!(mesh.use_tex_coords_as_planar());

    let planar = mesh.planar_coords().unwrap();
    assert_eq!(planar.len(), 3);
    assert_eq!(planar[1], Vec3::new(1.0, 0.0, 0.0));
    assert_eq!(planar[2], Vec3::new(0.0, 1.0, 0.0));
}

#[test]
fn planar_lift_without_tex_coords() {
    let mut source = single_triangle();
    source.tex_coords = None;
    let mut mesh = import(&source);
    assert!(!mesh.use_tex_coords_as_planar());
    assert!(mesh.planar_coords().is_none());
}

// ─── Export Tests ─────────────────────────────────────────────

#[test]
fn export_vertex_buffers() {
    let mut mesh = import(&single_triangle());
    mesh.recompute_normals();
    let buffers = mesh.export_pos_norm_buffer();
    assert_eq!(buffers.positions.len(), 9);
    assert_eq!(buffers.normals.len(), 9);
    assert_eq!(buffers.elements.len(), 3);
    // One triangle over vertex indices {0, 1, 2}.
    let mut elements = buffers.elements.clone();
    elements.sort_unstable();
    assert_eq!(elements, vec![0, 1, 2]);
}

#[test]
fn export_quad_fan_triangulates() {
    let source = MeshSource {
        positions: vec![
            [0.0, 0.0, 0.0],
            [1.0, 0.0, 0.0],
            [1.0, 1.0, 0.0],
            [0.0, 1.0, 0.0],
        ],
        faces: vec![vec![0, 1, 2, 3]],
        tex_coords: None,
    };
    let mut mesh = import(&source);
    mesh.recompute_normals();
    let buffers = mesh.export_pos_norm_buffer();
    // One quad → two triangles.
    assert_eq!(buffers.elements.len(), 6);
}

#[test]
fn export_face_buffers() {
    let mut mesh = import(&single_triangle());
    mesh.recompute_normals();
    let buffers = mesh.export_face_norm_buffer();
    assert_eq!(buffers.barycenters.len(), 3);
    assert_eq!(buffers.normals.len(), 3);
    // Barycenter of the unit triangle.
    assert!((buffers.barycenters[0] - 1.0 / 3.0).abs() < 1e-6);
    assert!((buffers.barycenters[1] - 1.0 / 3.0).abs() < 1e-6);
    assert!((buffers.normals[2] - 1.0).abs() < 1e-6);
}

// ─── Assembly Integration (mesh + block matrix) ───────────────

#[test]
fn single_triangle_assembly_scenario() {
    let mesh = import(&single_triangle());
    let vertex_count = mesh.vertices_to_indices().len();
    assert_eq!(vertex_count, 3);

    let mut matrix = BlockMatrix::new(vertex_count);
    assert_eq!(matrix.dim(), 9);

    // Diagonal mass-like blocks plus an explicit zero coupling block.
    matrix.add_block33(0, 0, &Mat3::IDENTITY).unwrap();
    matrix.add_block33(1, 1, &Mat3::IDENTITY).unwrap();
    matrix.add_block33(2, 2, &Mat3::IDENTITY).unwrap();
    matrix.add_block33(0, 1, &Mat3::ZERO).unwrap();

    let sparse = matrix.to_sparse();
    assert_eq!(sparse.rows, 9);
    assert!(sparse.is_symmetric(CHECK_TOLERANCE));
    assert!((sparse.trace() - 9.0).abs() < 1e-6);

    // A one-sided nonzero coupling breaks symmetry until its
    // transposed counterpart is scattered too.
    let coupling = Mat3::from_diagonal(Vec3::new(0.5, 0.5, 0.5));
    matrix.add_block33(0, 1, &coupling).unwrap();
    assert!(!matrix.is_symmetric(CHECK_TOLERANCE));
    assert!(!matrix.to_sparse().is_symmetric(CHECK_TOLERANCE));

    matrix.add_block33(1, 0, &coupling.transpose()).unwrap();
    assert!(matrix.is_symmetric(CHECK_TOLERANCE));
    assert!(matrix.to_sparse().is_symmetric(CHECK_TOLERANCE));
}
