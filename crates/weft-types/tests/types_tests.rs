//! Integration tests for weft-types.

use weft_types::{EdgeHandle, FaceHandle, HalfedgeHandle, VertexHandle, WeftError};

// ─── Handle Tests ─────────────────────────────────────────────

#[test]
fn vertex_handle_index() {
    let h = VertexHandle(42);
    assert_eq!(h.index(), 42);
}

#[test]
fn handles_are_not_interchangeable() {
    // Compile-time guarantee — these types are distinct.
    let _v = VertexHandle(0);
    let _f = FaceHandle(0);
    let _e = EdgeHandle(0);
    let _h = HalfedgeHandle(0);
}

#[test]
fn edge_halfedge_pairing() {
    let edge = EdgeHandle(3);
    let forward = edge.halfedge(0);
    let backward = edge.halfedge(1);
    assert_eq!(forward, HalfedgeHandle(6));
    assert_eq!(backward, HalfedgeHandle(7));
    assert_eq!(forward.twin(), backward);
    assert_eq!(backward.twin(), forward);
    assert_eq!(forward.edge(), edge);
    assert_eq!(backward.edge(), edge);
}

#[test]
fn handles_are_serializable() {
    let h = VertexHandle(100);
    let json = serde_json::to_string(&h).unwrap();
    let deserialized: VertexHandle = serde_json::from_str(&json).unwrap();
    assert_eq!(h, deserialized);
}

// ─── Error Tests ──────────────────────────────────────────────

#[test]
fn import_error_display() {
    let err = WeftError::Import("non-manifold edge (3, 7)".into());
    assert!(err.to_string().contains("non-manifold edge"));
}

#[test]
fn dimension_mismatch_display() {
    let err = WeftError::DimensionMismatch {
        expected: 27,
        actual: 26,
    };
    let msg = err.to_string();
    assert!(msg.contains("27"));
    assert!(msg.contains("26"));
}

#[test]
fn index_out_of_range_display() {
    let err = WeftError::IndexOutOfRange {
        index: 9,
        bound: 9,
    };
    assert!(err.to_string().contains("out of range"));
}
