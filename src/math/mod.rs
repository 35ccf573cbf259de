//! Dense linear algebra helpers for the global stiffness solve.

pub mod sparse;

use nalgebra::{DMatrix, DVector};

pub type Mat = DMatrix<f64>;
pub type Vec = DVector<f64>;

/// Solves `a·x = b` with a dense LU factorization, falling back to a
/// minimum-norm least-squares solution if `a` is numerically singular.
/// Returns the solution and whether the fallback was used.
pub fn solve_dense(a: &Mat, b: &Vec) -> (Vec, bool) {
    let lu = a.clone().lu();
    if let Some(x) = lu.solve(b) {
        return (x, false);
    }
    (least_squares(a, b), true)
}

/// Minimum-norm least-squares solution via the Moore-Penrose pseudoinverse,
/// used when the reduced stiffness matrix is singular (e.g. an
/// under-restrained structure).
pub fn least_squares(a: &Mat, b: &Vec) -> Vec {
    let svd = a.clone().svd(true, true);
    svd.solve(b, 1e-10).unwrap_or_else(|_| Vec::zeros(a.ncols()))
}
