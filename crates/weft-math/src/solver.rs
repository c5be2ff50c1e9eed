//! Linear solve stage of the implicit step.
//!
//! After scatter-add assembly the implicit system is a symmetric
//! positive-definite `3V x 3V` operator over the vertex degrees of
//! freedom. [`SparseSolver`] is the seam between assembly and
//! integration: factorize once per topology/timestep configuration,
//! then back-substitute a fresh right-hand side every step.
//!
//! [`CholeskySolver`] backs the seam with faer's sparse LLᵀ. Because
//! the operator is symmetric, only its upper triangle is handed to
//! faer; the factorization runs in f64 while the mesh-facing slices
//! stay f32.

use faer::Side;
use faer::linalg::solvers::Solve;
use faer::sparse::linalg::solvers::{Llt, SymbolicLlt};
use faer::sparse::{SparseColMat, Triplet};
use weft_types::constants::BLOCK_DIM;
use weft_types::{WeftError, WeftResult};

use crate::block::BlockMatrix;
use crate::sparse::SparseMatrix;

/// Factorize-then-solve interface for the assembled implicit system.
pub trait SparseSolver {
    /// Factorizes a symmetric positive-definite operator. The
    /// factorization is cached and reused by every subsequent
    /// [`solve`](SparseSolver::solve) until the next call.
    fn factorize(&mut self, matrix: &SparseMatrix) -> WeftResult<()>;

    /// Back-substitutes `rhs` through the cached factorization into
    /// `solution`. Both slices carry one f32 per scalar degree of
    /// freedom.
    fn solve(&self, rhs: &[f32], solution: &mut [f32]) -> WeftResult<()>;

    /// True once a factorization is cached.
    fn is_factorized(&self) -> bool;
}

/// Sparse LLᵀ solver over the vertex degrees of freedom.
pub struct CholeskySolver {
    llt: Option<Llt<usize, f64>>,
    /// Scalar degrees of freedom (3 per vertex); 0 until factorized.
    dofs: usize,
}

impl CholeskySolver {
    pub fn new() -> Self {
        Self { llt: None, dofs: 0 }
    }

    /// Scalar dimension of the factorized system, 0 before the first
    /// successful factorization.
    #[inline]
    pub fn dof_count(&self) -> usize {
        self.dofs
    }

    /// Compresses an assembled block operator and factorizes it in
    /// one step.
    pub fn factorize_blocks(&mut self, blocks: &BlockMatrix) -> WeftResult<()> {
        self.factorize(&blocks.to_sparse())
    }

    /// Projects the upper triangle of a symmetric CSR operator into
    /// the f64 CSC layout faer factorizes from. Sub-diagonal entries
    /// are dropped here, not read by faer under [`Side::Upper`].
    fn upper_csc(matrix: &SparseMatrix) -> WeftResult<SparseColMat<usize, f64>> {
        let upper: Vec<Triplet<usize, usize, f64>> = matrix
            .iter()
            .filter(|&(row, col, _)| row <= col)
            .map(|(row, col, val)| Triplet {
                row,
                col,
                val: f64::from(val),
            })
            .collect();

        SparseColMat::try_new_from_triplets(matrix.rows, matrix.cols, &upper)
            .map_err(|e| WeftError::Solver(format!("CSC assembly rejected the operator: {e:?}")))
    }
}

impl Default for CholeskySolver {
    fn default() -> Self {
        Self::new()
    }
}

impl SparseSolver for CholeskySolver {
    fn factorize(&mut self, matrix: &SparseMatrix) -> WeftResult<()> {
        if matrix.rows != matrix.cols {
            return Err(WeftError::DimensionMismatch {
                expected: matrix.rows,
                actual: matrix.cols,
            });
        }
        // The system is blocked 3 scalar rows per vertex; anything
        // else never came out of assembly.
        if matrix.rows == 0 || matrix.rows % BLOCK_DIM != 0 {
            return Err(WeftError::Solver(format!(
                "operator dimension {} is not a positive multiple of {BLOCK_DIM}",
                matrix.rows
            )));
        }

        let csc = Self::upper_csc(matrix)?;

        let symbolic = SymbolicLlt::try_new(csc.symbolic().as_ref(), Side::Upper)
            .map_err(|e| WeftError::Solver(format!("fill-in analysis failed: {e:?}")))?;
        let numeric = Llt::try_new_with_symbolic(symbolic, csc.as_ref(), Side::Upper)
            .map_err(|e| WeftError::Solver(format!("operator is not positive definite: {e:?}")))?;

        self.dofs = matrix.rows;
        self.llt = Some(numeric);
        Ok(())
    }

    fn solve(&self, rhs: &[f32], solution: &mut [f32]) -> WeftResult<()> {
        let llt = self
            .llt
            .as_ref()
            .ok_or_else(|| WeftError::Solver("solve called before factorize".into()))?;

        for len in [rhs.len(), solution.len()] {
            if len != self.dofs {
                return Err(WeftError::DimensionMismatch {
                    expected: self.dofs,
                    actual: len,
                });
            }
        }

        let b = faer::Mat::from_fn(self.dofs, 1, |i, _| f64::from(rhs[i]));
        let x = llt.solve(&b);
        for (i, out) in solution.iter_mut().enumerate() {
            *out = x[(i, 0)] as f32;
        }
        Ok(())
    }

    fn is_factorized(&self) -> bool {
        self.llt.is_some()
    }
}
