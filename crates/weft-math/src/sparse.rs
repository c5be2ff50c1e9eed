//! Sparse matrix representation.
//!
//! Provides a CSR (Compressed Sparse Row) matrix used as the
//! compressed form of the assembled implicit system, plus diagonal
//! extraction for the Jacobi preconditioner and the tolerance-based
//! validation predicates used to sanity-check assembly.

use serde::{Deserialize, Serialize};
use weft_types::constants::CHECK_TOLERANCE;

/// Compressed Sparse Row (CSR) matrix.
///
/// Stores a sparse matrix in row-major order. This is the standard
/// format for handing an assembled operator to sparse linear algebra
/// backends (faer, SuiteSparse).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SparseMatrix {
    /// Number of rows.
    pub rows: usize,
    /// Number of columns.
    pub cols: usize,
    /// Row pointer array (length = rows + 1).
    /// `row_ptr[i]..row_ptr[i+1]` are the indices into `col_idx` and `values`
    /// for non-zeros in row `i`.
    pub row_ptr: Vec<usize>,
    /// Column indices of non-zero entries, sorted within each row.
    pub col_idx: Vec<usize>,
    /// Non-zero values.
    pub values: Vec<f32>,
}

impl SparseMatrix {
    /// Creates an empty matrix with the given dimensions.
    pub fn new(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            row_ptr: vec![0; rows + 1],
            col_idx: Vec::new(),
            values: Vec::new(),
        }
    }

    /// Returns the number of stored entries.
    pub fn nnz(&self) -> usize {
        self.values.len()
    }

    /// Creates a matrix from triplets (row, col, value).
    ///
    /// Triplets may arrive in any order; duplicate coordinates are
    /// summed, which gives triplet assembly the scatter-add semantics
    /// finite-element accumulation needs.
    pub fn from_triplets(rows: usize, cols: usize, triplets: &[(usize, usize, f32)]) -> Self {
        // Size each row, then prefix-sum the counts into row_ptr.
        let mut row_counts = vec![0usize; rows];
        for &(r, _, _) in triplets {
            row_counts[r] += 1;
        }

        let mut row_ptr = vec![0usize; rows + 1];
        for i in 0..rows {
            row_ptr[i + 1] = row_ptr[i] + row_counts[i];
        }

        let nnz = row_ptr[rows];
        let mut col_idx = vec![0usize; nnz];
        let mut values = vec![0.0f32; nnz];

        // Scatter, advancing a write position per row.
        let mut cursor = row_ptr[..rows].to_vec();
        for &(r, c, v) in triplets {
            let pos = cursor[r];
            col_idx[pos] = c;
            values[pos] = v;
            cursor[r] += 1;
        }

        // Rows hold a handful of entries; insertion sort keeps the
        // columns ordered in place.
        for i in 0..rows {
            let start = row_ptr[i];
            let end = row_ptr[i + 1];
            let slice = &mut col_idx[start..end];
            let val_slice = &mut values[start..end];

            for j in 1..slice.len() {
                let mut k = j;
                while k > 0 && slice[k - 1] > slice[k] {
                    slice.swap(k - 1, k);
                    val_slice.swap(k - 1, k);
                    k -= 1;
                }
            }
        }

        let mut matrix = Self {
            rows,
            cols,
            row_ptr,
            col_idx,
            values,
        };
        matrix.sum_duplicates();
        matrix
    }

    /// Merges adjacent duplicate column entries within each row,
    /// summing their values. Requires rows to be sorted by column.
    fn sum_duplicates(&mut self) {
        let mut new_row_ptr = vec![0usize; self.rows + 1];
        let mut write = 0usize;

        for i in 0..self.rows {
            let start = self.row_ptr[i];
            let end = self.row_ptr[i + 1];
            let mut read = start;
            while read < end {
                let col = self.col_idx[read];
                let mut sum = self.values[read];
                read += 1;
                while read < end && self.col_idx[read] == col {
                    sum += self.values[read];
                    read += 1;
                }
                self.col_idx[write] = col;
                self.values[write] = sum;
                write += 1;
            }
            new_row_ptr[i + 1] = write;
        }

        self.col_idx.truncate(write);
        self.values.truncate(write);
        self.row_ptr = new_row_ptr;
    }

    /// Returns the entry at (row, col), or 0.0 if it is not stored.
    pub fn get(&self, row: usize, col: usize) -> f32 {
        let start = self.row_ptr[row];
        let end = self.row_ptr[row + 1];
        match self.col_idx[start..end].binary_search(&col) {
            Ok(pos) => self.values[start + pos],
            Err(_) => 0.0,
        }
    }

    /// Iterates over stored entries as `(row, col, value)`.
    pub fn iter(&self) -> impl Iterator<Item = (usize, usize, f32)> + '_ {
        (0..self.rows).flat_map(move |r| {
            (self.row_ptr[r]..self.row_ptr[r + 1]).map(move |idx| (r, self.col_idx[idx], self.values[idx]))
        })
    }

    /// Sum of the main diagonal.
    pub fn trace(&self) -> f32 {
        (0..self.rows.min(self.cols)).map(|i| self.get(i, i)).sum()
    }

    /// Returns a read-only view of the main diagonal.
    pub fn diagonal(&self) -> DiagonalView<'_> {
        DiagonalView { matrix: self }
    }

    /// Entrywise comparison against `other` within `tolerance`,
    /// treating entries absent from either matrix as zero.
    ///
    /// A validation predicate: never errors, returns false on any
    /// dimension mismatch. The default tolerance at call sites is
    /// [`CHECK_TOLERANCE`].
    pub fn approx_eq(&self, other: &SparseMatrix, tolerance: f32) -> bool {
        if self.rows != other.rows || self.cols != other.cols {
            return false;
        }
        for (r, c, v) in self.iter() {
            if (v - other.get(r, c)).abs() > tolerance {
                return false;
            }
        }
        // Entries stored only in `other`
        for (r, c, v) in other.iter() {
            if (v - self.get(r, c)).abs() > tolerance {
                return false;
            }
        }
        true
    }

    /// Returns true iff `|A[i][j] - A[j][i]| <= tolerance` for all
    /// entries. Non-square matrices are never symmetric.
    ///
    /// Every stored entry is visited, so an entry missing its
    /// transposed counterpart is compared against zero.
    pub fn is_symmetric(&self, tolerance: f32) -> bool {
        if self.rows != self.cols {
            return false;
        }
        self.iter().all(|(r, c, v)| (v - self.get(c, r)).abs() <= tolerance)
    }

    /// `is_symmetric` with the default strict tolerance.
    pub fn is_symmetric_strict(&self) -> bool {
        self.is_symmetric(CHECK_TOLERANCE)
    }
}

/// Extracts the main diagonal of `source` into a new `size x size`
/// sparse matrix.
///
/// The result has stored entries only where the source diagonal is
/// nonzero, which makes it directly usable as a Jacobi (diagonal)
/// preconditioner. Applying the extraction twice is idempotent.
pub fn diagonal_matrix(source: &SparseMatrix, size: usize) -> SparseMatrix {
    let n = size.min(source.rows).min(source.cols);
    let mut triplets = Vec::with_capacity(n);
    for i in 0..n {
        let v = source.get(i, i);
        if v != 0.0 {
            triplets.push((i, i, v));
        }
    }
    SparseMatrix::from_triplets(size, size, &triplets)
}

/// Read-only projection of a sparse matrix's main diagonal.
///
/// Borrowed from the source matrix; use [`DiagonalView::to_sparse`]
/// to materialize it into a standalone matrix.
#[derive(Debug, Clone, Copy)]
pub struct DiagonalView<'a> {
    matrix: &'a SparseMatrix,
}

impl DiagonalView<'_> {
    /// Length of the diagonal (min of the source dimensions).
    pub fn len(&self) -> usize {
        self.matrix.rows.min(self.matrix.cols)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The i-th diagonal entry (0.0 when unstored).
    pub fn get(&self, i: usize) -> f32 {
        self.matrix.get(i, i)
    }

    /// Iterates over all diagonal entries, including zeros.
    pub fn iter(&self) -> impl Iterator<Item = f32> + '_ {
        (0..self.len()).map(move |i| self.get(i))
    }

    /// Materializes the view into a standalone sparse matrix sized
    /// to the diagonal length.
    pub fn to_sparse(&self) -> SparseMatrix {
        diagonal_matrix(self.matrix, self.len())
    }
}
