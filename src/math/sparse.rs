//! Sparse assembly and direct solve, used once the reduced system exceeds
//! [`crate::config::SolverConfig::SPARSE_DOF_THRESHOLD`] free DOFs.

use nalgebra::{DMatrix, DVector};
use nalgebra_sparse::{CooMatrix, CsrMatrix};

/// Incremental COO-based sparse matrix assembly.
pub struct SparseMatrixBuilder {
    size: usize,
    entries: Vec<(usize, usize, f64)>,
}

impl SparseMatrixBuilder {
    pub fn new(size: usize) -> Self {
        let estimated_nnz = size * 60;
        Self {
            size,
            entries: Vec::with_capacity(estimated_nnz),
        }
    }

    #[inline]
    pub fn add(&mut self, row: usize, col: usize, value: f64) {
        if value != 0.0 {
            self.entries.push((row, col, value));
        }
    }

    /// Scatters a small element matrix into the builder using its global DOF
    /// indices.
    pub fn add_element_matrix<const N: usize>(&mut self, dofs: &[usize; N], k_elem: &nalgebra::SMatrix<f64, N, N>) {
        for (i, &di) in dofs.iter().enumerate() {
            for (j, &dj) in dofs.iter().enumerate() {
                self.add(di, dj, k_elem[(i, j)]);
            }
        }
    }

    pub fn to_csr(&self) -> CsrMatrix<f64> {
        let mut coo = CooMatrix::new(self.size, self.size);
        for &(row, col, val) in &self.entries {
            coo.push(row, col, val);
        }
        CsrMatrix::from(&coo)
    }

    pub fn to_dense(&self) -> DMatrix<f64> {
        let mut mat = DMatrix::zeros(self.size, self.size);
        for &(row, col, val) in &self.entries {
            mat[(row, col)] += val;
        }
        mat
    }

    pub fn nnz(&self) -> usize {
        self.entries.len()
    }

    pub fn sparsity(&self) -> f64 {
        let total = (self.size * self.size) as f64;
        1.0 - (self.entries.len() as f64 / total)
    }
}

/// Profile (variable-bandwidth) Cholesky factorization for symmetric
/// positive-definite systems, suited to the banded connectivity of a frame
/// structure: each row stores only the span from its leftmost non-zero
/// column to the diagonal.
pub struct ProfileCholesky {
    size: usize,
    profile: Vec<Vec<f64>>,
    row_start: Vec<usize>,
}

impl ProfileCholesky {
    pub fn from_csr(csr: &CsrMatrix<f64>) -> Self {
        let size = csr.nrows();

        // row_start[row] is the leftmost column with a non-zero entry at
        // or below the diagonal in that row; defaults to the diagonal
        // itself for an otherwise-empty row.
        let mut row_start: Vec<usize> = (0..size).collect();
        for (row, col, _) in csr.triplet_iter() {
            if col < row && col < row_start[row] {
                row_start[row] = col;
            }
        }

        let mut profile: Vec<Vec<f64>> = row_start
            .iter()
            .enumerate()
            .map(|(row, &start)| vec![0.0; row - start + 1])
            .collect();

        for (row, col, &val) in csr.triplet_iter() {
            if col <= row && col >= row_start[row] {
                profile[row][col - row_start[row]] += val;
            }
        }

        Self { size, profile, row_start }
    }

    /// Reads `L[row, col]` (or its mirror above the diagonal), zero outside
    /// the stored profile.
    fn entry(&self, row: usize, col: usize) -> f64 {
        let (r, c) = if col > row { (col, row) } else { (row, col) };
        if c < self.row_start[r] {
            0.0
        } else {
            self.profile[r][c - self.row_start[r]]
        }
    }

    /// Factorizes `K = L·L^T` in place, row by row. Returns `Err` on a
    /// non-positive pivot, signaling the caller to fall back to a dense
    /// least-squares solve.
    pub fn factorize(&mut self) -> Result<(), &'static str> {
        for row in 0..self.size {
            let start = self.row_start[row];

            for col in start..row {
                let overlap_from = start.max(self.row_start[col]);
                let dot: f64 = (overlap_from..col).map(|k| self.entry(row, k) * self.entry(col, k)).sum();

                let pivot = self.entry(col, col);
                if pivot.abs() < 1e-15 {
                    return Err("zero pivot during profile factorization");
                }

                let slot = col - start;
                self.profile[row][slot] = (self.profile[row][slot] - dot) / pivot;
            }

            let diag_sum: f64 = (start..row).map(|k| self.entry(row, k).powi(2)).sum();
            let diag = self.profile[row][row - start] - diag_sum;
            if diag <= 0.0 {
                return Err("matrix is not positive definite");
            }
            self.profile[row][row - start] = diag.sqrt();
        }
        Ok(())
    }

    pub fn solve(&self, rhs: &DVector<f64>) -> DVector<f64> {
        let mut x = rhs.clone();
        self.forward_substitute(&mut x);
        self.back_substitute(&mut x);
        x
    }

    fn forward_substitute(&self, x: &mut DVector<f64>) {
        for row in 0..self.size {
            let start = self.row_start[row];
            let dot: f64 = (start..row).map(|col| self.entry(row, col) * x[col]).sum();
            x[row] = (x[row] - dot) / self.entry(row, row);
        }
    }

    fn back_substitute(&self, x: &mut DVector<f64>) {
        for row in (0..self.size).rev() {
            x[row] /= self.entry(row, row);
            let start = self.row_start[row];
            for col in start..row {
                x[col] -= self.entry(row, col) * x[row];
            }
        }
    }
}
