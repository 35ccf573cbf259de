//! Free/restrained DOF partitioning and the reduced linear solve.

use crate::assemble::GlobalStiffness;
use crate::error::FrameError;
use crate::math::sparse::{ProfileCholesky, SparseMatrixBuilder};
use crate::math::{least_squares, solve_dense};
use crate::mesh::MeshedModel;
use nalgebra::{DMatrix, DVector};
use std::collections::HashMap;

/// Global DOF indices that are not restrained by a support, in ascending
/// order.
pub fn free_dofs(meshed: &MeshedModel) -> Vec<usize> {
    let mut free = Vec::with_capacity(meshed.solver_joints.len() * 6);
    for (node_idx, joint) in meshed.solver_joints.iter().enumerate() {
        for local_dof in 0..6 {
            if !joint.is_restrained(local_dof) {
                free.push(node_idx * 6 + local_dof);
            }
        }
    }
    free
}

/// Solves `K_ff · u_f = F_f` for the free DOFs and returns the full
/// displacement vector, zero at every restrained DOF. Falls back to a
/// minimum-norm least-squares solution when the reduced system is singular.
pub fn solve_system(
    stiffness: &GlobalStiffness,
    f: &DVector<f64>,
    free: &[usize],
    log: &mut Vec<String>,
) -> DVector<f64> {
    let dof_count = stiffness.dof_count();
    let mut u = DVector::zeros(dof_count);

    if free.is_empty() {
        return u;
    }

    let f_reduced = DVector::from_iterator(free.len(), free.iter().map(|&i| f[i]));

    let u_reduced = match stiffness {
        GlobalStiffness::Dense(k) => {
            let k_reduced = reduced_dense(k, free);
            let (x, fell_back) = solve_dense(&k_reduced, &f_reduced);
            if fell_back {
                log.push(format!("warning: {}", FrameError::SingularSystem));
            }
            x
        }
        GlobalStiffness::Sparse(k) => {
            let index_map: HashMap<usize, usize> =
                free.iter().enumerate().map(|(i, &g)| (g, i)).collect();
            let mut builder = SparseMatrixBuilder::new(free.len());
            for (row, col, &val) in k.triplet_iter() {
                if let (Some(&r), Some(&c)) = (index_map.get(&row), index_map.get(&col)) {
                    builder.add(r, c, val);
                }
            }
            let csr_reduced = builder.to_csr();
            let mut cholesky = ProfileCholesky::from_csr(&csr_reduced);
            match cholesky.factorize() {
                Ok(()) => cholesky.solve(&f_reduced),
                Err(reason) => {
                    log.push(format!(
                        "warning: {} ({reason}), using dense least-squares fallback",
                        FrameError::SingularSystem
                    ));
                    let dense_reduced = builder.to_dense();
                    least_squares(&dense_reduced, &f_reduced)
                }
            }
        }
    };

    for (i, &global_idx) in free.iter().enumerate() {
        u[global_idx] = u_reduced[i];
    }
    u
}

fn reduced_dense(k: &DMatrix<f64>, free: &[usize]) -> DMatrix<f64> {
    let n = free.len();
    let mut reduced = DMatrix::zeros(n, n);
    for (i, &gi) in free.iter().enumerate() {
        for (j, &gj) in free.iter().enumerate() {
            reduced[(i, j)] = k[(gi, gj)];
        }
    }
    reduced
}
