//! Post-processing: displacement extraction, internal force recovery, and
//! reaction computation.

use crate::assemble::GlobalStiffness;
use crate::mesh::MeshedModel;
use crate::model::{FrameSection, Joint, Material, StructuralModel};
use crate::results::{DetailedFrameResult, FrameForces, JointDisplacement, JointReaction};
use nalgebra::{DVector, Matrix3, Vector3};
use std::collections::HashMap;

const DEGENERATE_SEGMENT_LENGTH: f64 = 1e-4;

/// Reads the six DOFs of `node_idx` out of the full solution vector.
fn node_dofs(u_full: &DVector<f64>, node_idx: usize) -> [f64; 6] {
    let base = node_idx * 6;
    [
        u_full[base],
        u_full[base + 1],
        u_full[base + 2],
        u_full[base + 3],
        u_full[base + 4],
        u_full[base + 5],
    ]
}

fn displacement_at(joint_id: i64, dofs: &[f64; 6]) -> JointDisplacement {
    JointDisplacement {
        joint_id,
        ux: dofs[0],
        uy: dofs[1],
        uz: dofs[2],
        rx: dofs[3],
        ry: dofs[4],
        rz: dofs[5],
    }
}

/// Displacements at every original joint of the model.
pub fn extract_joint_displacements(
    model: &StructuralModel,
    meshed: &MeshedModel,
    u_full: &DVector<f64>,
) -> Vec<JointDisplacement> {
    model
        .joints
        .iter()
        .filter_map(|joint| {
            meshed
                .joint_index
                .get(&joint.id)
                .map(|&idx| displacement_at(joint.id, &node_dofs(u_full, idx)))
        })
        .collect()
}

/// Reaction at every original joint, computed from the full (unreduced)
/// residual `K·u - F` so restrained and nominally-free DOFs are both
/// reported correctly.
pub fn compute_reactions(
    model: &StructuralModel,
    meshed: &MeshedModel,
    stiffness: &GlobalStiffness,
    u_full: &DVector<f64>,
    f_full: &DVector<f64>,
) -> Vec<JointReaction> {
    let residual = stiffness.matvec(u_full) - f_full;

    model
        .joints
        .iter()
        .filter_map(|joint| {
            meshed.joint_index.get(&joint.id).map(|&idx| {
                let base = idx * 6;
                JointReaction {
                    joint_id: joint.id,
                    fx: residual[base] / 1000.0,
                    fy: residual[base + 1] / 1000.0,
                    fz: residual[base + 2] / 1000.0,
                    mx: residual[base + 3] / 1000.0,
                    my: residual[base + 4] / 1000.0,
                    mz: residual[base + 5] / 1000.0,
                }
            })
        })
        .collect()
}

/// The bespoke local-axis rotation used for internal force recovery. Its
/// vertical-member threshold and orientation handling differ from
/// [`crate::element::local_axes`]; the two are not interchangeable.
fn segment_axes(joint_a: &Joint, joint_b: &Joint, orientation_deg: f64, length: f64) -> Matrix3<f64> {
    let cx = (joint_b.x - joint_a.x) / length;
    let cy = (joint_b.y - joint_a.y) / length;
    let cz = (joint_b.z - joint_a.z) / length;

    let beta = orientation_deg.to_radians();
    let (s, c) = beta.sin_cos();

    let mut r = Matrix3::zeros();

    if cx.abs() < 0.001 && cz.abs() < 0.001 {
        if cy > 0.0 {
            r[(0, 1)] = 1.0;
            r[(1, 0)] = -c;
            r[(1, 2)] = s;
            r[(2, 0)] = s;
            r[(2, 2)] = c;
        } else {
            r[(0, 1)] = -1.0;
            r[(1, 0)] = c;
            r[(1, 2)] = s;
            r[(2, 0)] = -s;
            r[(2, 2)] = c;
        }
    } else {
        let c1 = (cx * cx + cz * cz).sqrt();
        r[(0, 0)] = cx;
        r[(0, 1)] = cy;
        r[(0, 2)] = cz;
        r[(1, 0)] = (-cx * cy * c - cz * s) / c1;
        r[(1, 1)] = c1 * c;
        r[(1, 2)] = (-cy * cz * c + cx * s) / c1;
        r[(2, 0)] = (cx * cy * s - cz * c) / c1;
        r[(2, 1)] = -c1 * s;
        r[(2, 2)] = (cy * cz * s + cx * c) / c1;
    }

    r
}

fn transform3(v: Vector3<f64>, r: &Matrix3<f64>) -> Vector3<f64> {
    r * v
}

/// Internal forces at the start and end of one sub-segment, in kN/kN·m.
pub fn segment_forces(
    joint_a: &Joint,
    joint_b: &Joint,
    u_a: &[f64; 6],
    u_b: &[f64; 6],
    section: &FrameSection,
    material: &Material,
    orientation_deg: f64,
) -> (FrameForces, FrameForces) {
    let length = joint_a.distance_to(joint_b);
    if length < DEGENERATE_SEGMENT_LENGTH {
        return (FrameForces::default(), FrameForces::default());
    }

    let r = segment_axes(joint_a, joint_b, orientation_deg, length);

    let u_a_trans = transform3(Vector3::new(u_a[0], u_a[1], u_a[2]), &r);
    let r_a_trans = transform3(Vector3::new(u_a[3], u_a[4], u_a[5]), &r);
    let u_b_trans = transform3(Vector3::new(u_b[0], u_b[1], u_b[2]), &r);
    let r_b_trans = transform3(Vector3::new(u_b[3], u_b[4], u_b[5]), &r);

    let e = material.e_pa();
    let g = material.g_pa();
    let a = section.a;
    let ix = section.j;
    let iy = section.iy;
    let iz = section.iz;

    let l2 = length * length;
    let l3 = l2 * length;

    let k_bz1 = 12.0 * e * iz / l3;
    let k_bz2 = 6.0 * e * iz / l2;
    let k_bz3 = 4.0 * e * iz / length;
    let k_bz4 = 2.0 * e * iz / length;

    let k_by1 = 12.0 * e * iy / l3;
    let k_by2 = 6.0 * e * iy / l2;
    let k_by3 = 4.0 * e * iy / length;
    let k_by4 = 2.0 * e * iy / length;

    let p = (e * a / length) * (u_b_trans.x - u_a_trans.x);
    let t = (g * ix / length) * (r_b_trans.x - r_a_trans.x);

    let fy_a = k_bz1 * u_a_trans.y + k_bz2 * r_a_trans.z - k_bz1 * u_b_trans.y + k_bz2 * r_b_trans.z;
    let mz_a = k_bz2 * u_a_trans.y + k_bz3 * r_a_trans.z - k_bz2 * u_b_trans.y + k_bz4 * r_b_trans.z;
    let mz_b = k_bz2 * u_a_trans.y + k_bz4 * r_a_trans.z - k_bz2 * u_b_trans.y + k_bz3 * r_b_trans.z;

    let v2 = fy_a;
    let m3_start = -mz_a;
    let m3_end = mz_b;

    let fz_a = k_by1 * u_a_trans.z - k_by2 * r_a_trans.y - k_by1 * u_b_trans.z - k_by2 * r_b_trans.y;
    let my_a = -k_by2 * u_a_trans.z + k_by3 * r_a_trans.y + k_by2 * u_b_trans.z + k_by4 * r_b_trans.y;
    let my_b = k_by2 * u_a_trans.z + k_by4 * r_a_trans.y - k_by2 * u_b_trans.z + k_by3 * r_b_trans.y;

    let v3 = fz_a;
    let m2_start = my_a;
    let m2_end = -my_b;

    let start = FrameForces {
        p: p / 1000.0,
        v2: v2 / 1000.0,
        v3: v3 / 1000.0,
        t: t / 1000.0,
        m2: m2_start / 1000.0,
        m3: m3_start / 1000.0,
    };
    let end = FrameForces {
        p: p / 1000.0,
        v2: v2 / 1000.0,
        v3: v3 / 1000.0,
        t: t / 1000.0,
        m2: m2_end / 1000.0,
        m3: m3_end / 1000.0,
    };
    (start, end)
}

/// Builds per-station displacements and internal forces for every original
/// frame.
pub fn build_detailed_results(
    model: &StructuralModel,
    meshed: &MeshedModel,
    u_full: &DVector<f64>,
) -> HashMap<String, DetailedFrameResult> {
    let mut results = HashMap::new();

    for (&orig_id, chain) in &meshed.frame_mapping {
        let n_stations = chain.len();
        let stations: Vec<f64> = (0..n_stations)
            .map(|i| i as f64 / (n_stations - 1).max(1) as f64)
            .collect();

        let displacements: Vec<JointDisplacement> = chain
            .iter()
            .map(|&idx| {
                let joint_id = meshed.solver_joints[idx].id;
                displacement_at(joint_id, &node_dofs(u_full, idx))
            })
            .collect();

        let mut forces = vec![FrameForces::default(); n_stations];

        let Some(frame) = model.frame(orig_id) else {
            continue;
        };
        let Some(section_id) = &frame.section_id else {
            continue;
        };
        let Some(section) = model.section(section_id) else {
            continue;
        };
        let Some(material) = model.material(&section.material_id) else {
            continue;
        };

        for i in 0..chain.len().saturating_sub(1) {
            let idx_a = chain[i];
            let idx_b = chain[i + 1];
            let joint_a = &meshed.solver_joints[idx_a];
            let joint_b = &meshed.solver_joints[idx_b];
            let u_a = node_dofs(u_full, idx_a);
            let u_b = node_dofs(u_full, idx_b);

            let (start, end) = segment_forces(joint_a, joint_b, &u_a, &u_b, section, material, frame.orientation);

            forces[i] = start;
            if i == chain.len() - 2 {
                forces[i + 1] = end;
            }
        }

        results.insert(
            orig_id.to_string(),
            DetailedFrameResult {
                stations,
                displacements,
                forces,
            },
        );
    }

    results
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Material;

    fn steel() -> Material {
        Material::new("steel", 200_000.0, 80_000.0, 0.3, 7850.0)
    }

    #[test]
    fn degenerate_segment_yields_zero_forces() {
        let a = Joint::new(1, 0.0, 0.0, 0.0);
        let b = Joint::new(2, 1e-6, 0.0, 0.0);
        let section = FrameSection::new("s", "steel", 0.01, 8e-6, 8e-6, 1e-5);
        let (start, end) = segment_forces(&a, &b, &[0.0; 6], &[0.0; 6], &section, &steel(), 0.0);
        assert_eq!(start.p, 0.0);
        assert_eq!(end.m3, 0.0);
    }

    #[test]
    fn vertical_member_sign_flips_with_direction() {
        let up_a = Joint::new(1, 0.0, 0.0, 0.0);
        let up_b = Joint::new(2, 0.0, 5.0, 0.0);
        let r_up = segment_axes(&up_a, &up_b, 0.0, 5.0);
        assert!((r_up[(0, 1)] - 1.0).abs() < 1e-10);

        let down_b = Joint::new(2, 0.0, -5.0, 0.0);
        let r_down = segment_axes(&up_a, &down_b, 0.0, 5.0);
        assert!((r_down[(0, 1)] + 1.0).abs() < 1e-10);
    }
}
