//! Block assembly matrix for the implicit system.
//!
//! The global operator of a Baraff–Bridson style solve is a
//! `3V x 3V` matrix organized as a `V x V` grid of 3x3 blocks, one
//! block per interacting vertex pair. Force/Jacobian computation
//! produces one 3x3 contribution per vertex pair per element;
//! contributions targeting the same pair (two triangles sharing an
//! edge, for instance) must sum. This module provides the
//! scatter-add accumulation and the compression into CSR form for
//! the solver boundary.

use std::collections::HashMap;

use glam::Mat3;
use serde::{Deserialize, Serialize};
use weft_types::constants::{BLOCK_DIM, CHECK_TOLERANCE};
use weft_types::{WeftError, WeftResult};

use crate::dense::mat3_identical;
use crate::sparse::SparseMatrix;

/// A sparse `V x V` grid of accumulating 3x3 blocks.
///
/// Block row/column indices are vertex indices from the mesh's
/// vertex index mapping; vertex `i` owns scalar rows and columns
/// `[3i, 3i + 3)` of the compressed matrix. Untouched blocks are
/// implicitly zero.
///
/// Exclusively owned by the timestep driver for the duration of one
/// assembly pass; there is no partial-matrix visibility guarantee.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BlockMatrix {
    block_count: usize,
    blocks: HashMap<(u32, u32), Mat3>,
}

impl BlockMatrix {
    /// Creates an empty (all-zero) block matrix for `block_count`
    /// vertices, i.e. global dimension `3 * block_count`.
    pub fn new(block_count: usize) -> Self {
        Self {
            block_count,
            blocks: HashMap::new(),
        }
    }

    /// Number of block rows/columns (the vertex count V).
    #[inline]
    pub fn block_count(&self) -> usize {
        self.block_count
    }

    /// Global scalar dimension (3V).
    #[inline]
    pub fn dim(&self) -> usize {
        self.block_count * BLOCK_DIM
    }

    /// Number of touched blocks.
    pub fn stored_blocks(&self) -> usize {
        self.blocks.len()
    }

    /// Accumulates a 3x3 block at block coordinate
    /// (`block_row`, `block_col`).
    ///
    /// Adds, never overwrites: repeated calls at the same coordinate
    /// sum, so per-element contributions can be scattered in any
    /// order. Fails with `IndexOutOfRange` if either index is
    /// outside `[0, V)` — that is an assembly-logic bug upstream,
    /// and the caller must abandon the partially built matrix.
    pub fn add_block33(&mut self, block_row: usize, block_col: usize, block: &Mat3) -> WeftResult<()> {
        if block_row >= self.block_count {
            return Err(WeftError::IndexOutOfRange {
                index: block_row,
                bound: self.block_count,
            });
        }
        if block_col >= self.block_count {
            return Err(WeftError::IndexOutOfRange {
                index: block_col,
                bound: self.block_count,
            });
        }

        let key = (block_row as u32, block_col as u32);
        *self.blocks.entry(key).or_insert(Mat3::ZERO) += *block;
        Ok(())
    }

    /// Returns the accumulated block at (i, j), or `None` if the
    /// block was never touched.
    pub fn block(&self, block_row: usize, block_col: usize) -> Option<Mat3> {
        self.blocks.get(&(block_row as u32, block_col as u32)).copied()
    }

    /// Returns true iff the assembled operator is symmetric within
    /// `tolerance`, treating untouched blocks as zero.
    ///
    /// Mass and stiffness operators in this formulation are symmetric
    /// by construction, so a failure here indicates a sign error in
    /// the Jacobian computation. Validation only; never errors.
    pub fn is_symmetric(&self, tolerance: f32) -> bool {
        self.blocks.iter().all(|(&(i, j), block)| {
            let counterpart = self
                .blocks
                .get(&(j, i))
                .copied()
                .unwrap_or(Mat3::ZERO);
            mat3_identical(block, &counterpart.transpose(), tolerance)
        })
    }

    /// `is_symmetric` with the default strict tolerance.
    pub fn is_symmetric_strict(&self) -> bool {
        self.is_symmetric(CHECK_TOLERANCE)
    }

    /// Compresses the accumulated blocks into a CSR matrix for the
    /// solver boundary.
    ///
    /// Zero scalar entries inside touched blocks are dropped; the
    /// validation predicates treat unstored entries as zero, so this
    /// does not change comparison semantics.
    pub fn to_sparse(&self) -> SparseMatrix {
        let mut triplets = Vec::with_capacity(self.blocks.len() * BLOCK_DIM * BLOCK_DIM);
        for (&(bi, bj), block) in &self.blocks {
            let base_row = bi as usize * BLOCK_DIM;
            let base_col = bj as usize * BLOCK_DIM;
            for c in 0..BLOCK_DIM {
                let col = block.col(c);
                for r in 0..BLOCK_DIM {
                    let v = col[r];
                    if v != 0.0 {
                        triplets.push((base_row + r, base_col + c, v));
                    }
                }
            }
        }
        SparseMatrix::from_triplets(self.dim(), self.dim(), &triplets)
    }
}
