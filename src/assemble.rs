//! Global stiffness assembly and load vector construction.

use crate::config::SolverConfig;
use crate::element::{block_transformation, local_axes, local_stiffness, to_global};
use crate::error::{FrameError, FrameResult};
use crate::loads::{Direction, DistributedFrameLoad, LoadCase, PointLoad};
use crate::math::sparse::SparseMatrixBuilder;
use crate::mesh::MeshedModel;
use crate::model::StructuralModel;
use nalgebra::{DMatrix, DVector, Vector3};
use nalgebra_sparse::CsrMatrix;

const GRAVITY: f64 = 9.81;

/// The assembled global stiffness, in whichever representation the DOF
/// count selected.
pub enum GlobalStiffness {
    Dense(DMatrix<f64>),
    Sparse(CsrMatrix<f64>),
}

impl GlobalStiffness {
    pub fn dof_count(&self) -> usize {
        match self {
            GlobalStiffness::Dense(m) => m.nrows(),
            GlobalStiffness::Sparse(m) => m.nrows(),
        }
    }

    /// `K·u`, used for the unreduced reaction residual.
    pub fn matvec(&self, u: &DVector<f64>) -> DVector<f64> {
        match self {
            GlobalStiffness::Dense(m) => m * u,
            GlobalStiffness::Sparse(m) => {
                let mut y = DVector::zeros(m.nrows());
                for (row, col, val) in m.triplet_iter() {
                    y[row] += val * u[col];
                }
                y
            }
        }
    }
}

/// Assembles the global stiffness matrix for a meshed model. Dense storage
/// is used unless sparse is enabled in config AND the DOF count exceeds
/// [`SolverConfig::SPARSE_DOF_THRESHOLD`].
///
/// A frame with a missing section or material, or a degenerate length, is
/// logged and skipped — that element simply contributes no stiffness. But
/// if every element in the model fails this way, there is no structure left
/// to solve, and the first such error is returned so the caller can report
/// the whole analysis as failed rather than solving a meaningless all-zero
/// system.
pub fn assemble_stiffness(
    meshed: &MeshedModel,
    model: &StructuralModel,
    cfg: &SolverConfig,
    log: &mut Vec<String>,
) -> FrameResult<GlobalStiffness> {
    let dof_count = meshed.solver_joints.len() * 6;
    let use_sparse = cfg.use_sparse_solver && dof_count > SolverConfig::SPARSE_DOF_THRESHOLD;

    let mut builder = SparseMatrixBuilder::new(dof_count);
    let mut assembled_count = 0usize;
    let mut first_error: Option<FrameError> = None;

    for frame in &meshed.solver_frames {
        let Some(section_id) = &frame.section_id else {
            continue;
        };
        let Some(section) = model.section(section_id) else {
            let err = FrameError::MissingSection {
                frame_id: frame.id,
                section_id: section_id.clone(),
            };
            log.push(format!("warning: {err}"));
            first_error.get_or_insert(err);
            continue;
        };
        let Some(material) = model.material(&section.material_id) else {
            let err = FrameError::MissingMaterial {
                section_id: section.id.clone(),
                material_id: section.material_id.clone(),
            };
            log.push(format!("warning: {err}"));
            first_error.get_or_insert(err);
            continue;
        };

        let idx_i = meshed.joint_index[&frame.joint_i];
        let idx_j = meshed.joint_index[&frame.joint_j];
        let joint_i = &meshed.solver_joints[idx_i];
        let joint_j = &meshed.solver_joints[idx_j];

        let k_local = match local_stiffness(frame.id, joint_i, joint_j, section, material) {
            Ok(k) => k,
            Err(e) => {
                log.push(format!("warning: {e}"));
                first_error.get_or_insert(e);
                continue;
            }
        };
        let r = match local_axes(joint_i, joint_j, frame.orientation) {
            Ok(r) => r,
            Err(e) => {
                log.push(format!("warning: {e}"));
                first_error.get_or_insert(e);
                continue;
            }
        };
        let t = block_transformation(&r);
        let k_global = to_global(&k_local, &t);

        let mut dofs = [0usize; 12];
        for n in 0..6 {
            dofs[n] = idx_i * 6 + n;
            dofs[6 + n] = idx_j * 6 + n;
        }
        builder.add_element_matrix(&dofs, &k_global);
        assembled_count += 1;
    }

    if assembled_count == 0 && !meshed.solver_frames.is_empty() {
        if let Some(err) = first_error {
            return Err(err);
        }
    }

    if use_sparse {
        log.push(format!("using sparse matrix solver (DOF={dof_count})"));
        Ok(GlobalStiffness::Sparse(builder.to_csr()))
    } else {
        log.push(format!("using dense matrix solver (DOF={dof_count})"));
        Ok(GlobalStiffness::Dense(builder.to_dense()))
    }
}

fn dof_index(node_idx: usize, local_dof: usize) -> usize {
    node_idx * 6 + local_dof
}

/// Builds the global load vector (newtons / newton-metres) for one load
/// case: point loads, self-weight, and distributed frame loads, each
/// scaled by its pattern factor.
pub fn build_load_vector(
    meshed: &MeshedModel,
    model: &StructuralModel,
    load_case: &LoadCase,
    log: &mut Vec<String>,
) -> DVector<f64> {
    let dof_count = meshed.solver_joints.len() * 6;
    let mut f = DVector::zeros(dof_count);

    for factor in &load_case.patterns {
        let Some(pattern) = model.patterns.iter().find(|p| p.id == factor.pattern_id) else {
            continue;
        };
        let scale = factor.scale;

        if pattern.self_weight {
            apply_self_weight(meshed, model, scale, &mut f, log);
        }

        for load in &model.point_loads {
            if load.pattern_id == pattern.id {
                apply_point_load(meshed, load, scale, &mut f);
            }
        }

        for load in &model.distributed_loads {
            if load.pattern_id == pattern.id {
                apply_distributed_load(meshed, model, load, scale, &mut f, log);
            }
        }
    }

    for shell_pressure in &model.shell_pressures {
        log.push(format!(
            "warning: shell pressure on shell {} ignored (shells carry no stiffness)",
            shell_pressure.shell_id
        ));
    }

    f
}

fn apply_self_weight(
    meshed: &MeshedModel,
    model: &StructuralModel,
    scale: f64,
    f: &mut DVector<f64>,
    log: &mut Vec<String>,
) {
    for frame in &meshed.solver_frames {
        let Some(section_id) = &frame.section_id else {
            continue;
        };
        let Some(section) = model.section(section_id) else {
            continue;
        };
        let Some(material) = model.material(&section.material_id) else {
            let err = FrameError::MissingMaterial {
                section_id: section.id.clone(),
                material_id: section.material_id.clone(),
            };
            log.push(format!("warning: {err} (self-weight)"));
            continue;
        };

        let idx_i = meshed.joint_index[&frame.joint_i];
        let idx_j = meshed.joint_index[&frame.joint_j];
        let joint_i = &meshed.solver_joints[idx_i];
        let joint_j = &meshed.solver_joints[idx_j];
        let length = joint_i.distance_to(joint_j);

        let w = material.rho * section.a * GRAVITY;
        let total_weight = w * length;
        let nodal_load = (total_weight / 2.0) * scale;

        f[dof_index(idx_i, 1)] -= nodal_load;
        f[dof_index(idx_j, 1)] -= nodal_load;
    }
}

fn apply_point_load(meshed: &MeshedModel, load: &PointLoad, scale: f64, f: &mut DVector<f64>) {
    let Some(&idx) = meshed.joint_index.get(&load.joint_id) else {
        return;
    };
    let components = load.as_array();
    for (n, value) in components.iter().enumerate() {
        f[dof_index(idx, n)] += value * scale * 1000.0;
    }
}

fn apply_distributed_load(
    meshed: &MeshedModel,
    model: &StructuralModel,
    load: &DistributedFrameLoad,
    scale: f64,
    f: &mut DVector<f64>,
    log: &mut Vec<String>,
) {
    let Some(frame) = model.frame(load.frame_id) else {
        return;
    };
    let Some(chain) = meshed.frame_mapping.get(&load.frame_id) else {
        return;
    };
    let Some(start_joint) = model.joint(frame.joint_i) else {
        return;
    };
    let Some(end_joint) = model.joint(frame.joint_j) else {
        return;
    };

    let total_length = start_joint.distance_to(end_joint);
    if total_length < 1e-9 {
        log.push(format!(
            "warning: frame {} has zero length, distributed load skipped",
            frame.id
        ));
        return;
    }

    let start_pos = Vector3::new(start_joint.x, start_joint.y, start_joint.z);

    for window in chain.windows(2) {
        let idx_a = window[0];
        let idx_b = window[1];
        let node_a = &meshed.solver_joints[idx_a];
        let node_b = &meshed.solver_joints[idx_b];

        let dist_a = (Vector3::new(node_a.x, node_a.y, node_a.z) - start_pos).norm();
        let dist_b = (Vector3::new(node_b.x, node_b.y, node_b.z) - start_pos).norm();

        let ratio_a = dist_a / total_length;
        let ratio_b = dist_b / total_length;

        if ratio_b <= load.start_distance || ratio_a >= load.end_distance {
            continue;
        }

        let active_start = ratio_a.max(load.start_distance);
        let active_end = ratio_b.min(load.end_distance);

        let load_range = (load.end_distance - load.start_distance).max(1e-4);
        let w_start = load.start_magnitude
            + (load.end_magnitude - load.start_magnitude) * ((active_start - load.start_distance) / load_range);
        let w_end = load.start_magnitude
            + (load.end_magnitude - load.start_magnitude) * ((active_end - load.start_distance) / load_range);

        let w_avg = (w_start + w_end) / 2.0;
        let segment_len = (active_end - active_start) * total_length;
        let total_force = w_avg * segment_len * scale * 1000.0;

        let direction = resolve_direction(load.direction, start_joint, end_joint, frame.orientation);

        let f_node = total_force / 2.0;
        f[dof_index(idx_a, 0)] += direction.x * f_node;
        f[dof_index(idx_a, 1)] += direction.y * f_node;
        f[dof_index(idx_a, 2)] += direction.z * f_node;

        f[dof_index(idx_b, 0)] += direction.x * f_node;
        f[dof_index(idx_b, 1)] += direction.y * f_node;
        f[dof_index(idx_b, 2)] += direction.z * f_node;
    }
}

/// Resolves a load direction to a unit vector in global coordinates.
///
/// `Local*` uses its own local-axis convention (an "up"-vector construction
/// with a fallback when the member is near-vertical), distinct from both
/// [`crate::element::local_axes`] and [`crate::post::segment_forces`]'s
/// rotation — the three are not interchangeable even though they all
/// describe "the local frame" of the same member.
fn resolve_direction(
    direction: Direction,
    start_joint: &crate::model::Joint,
    end_joint: &crate::model::Joint,
    orientation: f64,
) -> Vector3<f64> {
    match direction {
        Direction::GlobalX => Vector3::new(1.0, 0.0, 0.0),
        Direction::GlobalY => Vector3::new(0.0, 1.0, 0.0),
        Direction::GlobalZ => Vector3::new(0.0, 0.0, 1.0),
        Direction::Gravity => Vector3::new(0.0, -1.0, 0.0),
        Direction::LocalX | Direction::LocalY | Direction::LocalZ => {
            let length = start_joint.distance_to(end_joint);
            if length < 1e-9 {
                return Vector3::zeros();
            }
            let lx = Vector3::new(
                (end_joint.x - start_joint.x) / length,
                (end_joint.y - start_joint.y) / length,
                (end_joint.z - start_joint.z) / length,
            );

            let up = if lx.y.abs() > 0.99 {
                Vector3::new(1.0, 0.0, 0.0)
            } else {
                Vector3::new(0.0, 1.0, 0.0)
            };

            let lz = lx.cross(&up).normalize();
            let ly = lz.cross(&lx);

            let rad = orientation.to_radians();
            let (s, c) = rad.sin_cos();

            let ly_rot = ly * c + lz * s;
            let lz_rot = -ly * s + lz * c;

            match direction {
                Direction::LocalX => lx,
                Direction::LocalY => ly_rot,
                Direction::LocalZ => lz_rot,
                _ => unreachable!(),
            }
        }
    }
}
