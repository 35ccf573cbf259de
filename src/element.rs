//! Local stiffness and local-to-global transformation for a 3D prismatic
//! frame element.

use crate::error::{FrameError, FrameResult};
use crate::model::{FrameSection, Joint, Material};
use nalgebra::{Matrix3, SMatrix};

pub type Mat12 = SMatrix<f64, 12, 12>;

const DEGENERATE_LENGTH: f64 = 1e-6;

/// Element length between two joints, in metres.
pub fn element_length(joint_i: &Joint, joint_j: &Joint) -> f64 {
    joint_i.distance_to(joint_j)
}

/// 12×12 local stiffness matrix for a prismatic Euler-Bernoulli frame
/// element. DOF order per node is `(ux, uy, uz, rx, ry, rz)`; node I
/// occupies rows/cols 0..6, node J 6..12.
///
/// `Iz` governs bending that couples `uy`/`rz`; `Iy` governs bending that
/// couples `uz`/`ry`, with the sign pattern mirrored relative to the `Iz`
/// block to satisfy the right-hand rule about local y.
pub fn local_stiffness(
    frame_id: i64,
    joint_i: &Joint,
    joint_j: &Joint,
    section: &FrameSection,
    material: &Material,
) -> FrameResult<Mat12> {
    let length = element_length(joint_i, joint_j);
    if length < DEGENERATE_LENGTH {
        return Err(FrameError::DegenerateElement { frame_id, length });
    }

    let e = material.e_pa();
    let g = material.g_pa();
    let a = section.a;
    let iy = section.iy;
    let iz = section.iz;
    let j = section.j;

    let mut k = Mat12::zeros();

    let ea_l = e * a / length;
    k[(0, 0)] = ea_l;
    k[(0, 6)] = -ea_l;
    k[(6, 0)] = -ea_l;
    k[(6, 6)] = ea_l;

    let gj_l = g * j / length;
    k[(3, 3)] = gj_l;
    k[(3, 9)] = -gj_l;
    k[(9, 3)] = -gj_l;
    k[(9, 9)] = gj_l;

    let l2 = length * length;
    let l3 = l2 * length;
    let eiz_l3 = 12.0 * e * iz / l3;
    let eiz_l2 = 6.0 * e * iz / l2;
    let eiz_l4 = 4.0 * e * iz / length;
    let eiz_l2_2 = 2.0 * e * iz / length;

    k[(1, 1)] = eiz_l3;
    k[(1, 5)] = eiz_l2;
    k[(1, 7)] = -eiz_l3;
    k[(1, 11)] = eiz_l2;

    k[(5, 1)] = eiz_l2;
    k[(5, 5)] = eiz_l4;
    k[(5, 7)] = -eiz_l2;
    k[(5, 11)] = eiz_l2_2;

    k[(7, 1)] = -eiz_l3;
    k[(7, 5)] = -eiz_l2;
    k[(7, 7)] = eiz_l3;
    k[(7, 11)] = -eiz_l2;

    k[(11, 1)] = eiz_l2;
    k[(11, 5)] = eiz_l2_2;
    k[(11, 7)] = -eiz_l2;
    k[(11, 11)] = eiz_l4;

    let eiy_l3 = 12.0 * e * iy / l3;
    let eiy_l2 = 6.0 * e * iy / l2;
    let eiy_l4 = 4.0 * e * iy / length;
    let eiy_l2_2 = 2.0 * e * iy / length;

    k[(2, 2)] = eiy_l3;
    k[(2, 4)] = -eiy_l2;
    k[(2, 8)] = -eiy_l3;
    k[(2, 10)] = -eiy_l2;

    k[(4, 2)] = -eiy_l2;
    k[(4, 4)] = eiy_l4;
    k[(4, 8)] = eiy_l2;
    k[(4, 10)] = eiy_l2_2;

    k[(8, 2)] = -eiy_l3;
    k[(8, 4)] = eiy_l2;
    k[(8, 8)] = eiy_l3;
    k[(8, 10)] = eiy_l2;

    k[(10, 2)] = -eiy_l2;
    k[(10, 4)] = eiy_l2_2;
    k[(10, 8)] = eiy_l2;
    k[(10, 10)] = eiy_l4;

    Ok(k)
}

/// 3×3 direction-cosine matrix `[local_x; local_y; local_z]` for an element
/// running from `joint_i` to `joint_j`, rotated by `orientation_deg` about
/// local x. Vertical members (`|cy| > 0.99`) use a special-case local y.
pub fn local_axes(joint_i: &Joint, joint_j: &Joint, orientation_deg: f64) -> FrameResult<Matrix3<f64>> {
    let length = element_length(joint_i, joint_j);
    if length < DEGENERATE_LENGTH {
        return Err(FrameError::InternalError("zero-length element in local_axes".into()));
    }

    let dx = joint_j.x - joint_i.x;
    let dy = joint_j.y - joint_i.y;
    let dz = joint_j.z - joint_i.z;

    let cx = dx / length;
    let cy = dy / length;
    let cz = dz / length;

    let (mut lyx, mut lyy, mut lyz): (f64, f64, f64);
    if cy.abs() > 0.99 {
        lyx = 1.0;
        lyy = 0.0;
        lyz = 0.0;
    } else {
        let temp = (cx * cx + cz * cz).sqrt();
        lyx = -cx * cy / temp;
        lyy = temp;
        lyz = -cz * cy / temp;
    }

    let mut lzx = cy * lyz - cz * lyy;
    let mut lzy = cz * lyx - cx * lyz;
    let mut lzz = cx * lyy - cy * lyx;

    if orientation_deg.abs() > 1e-6 {
        let theta = orientation_deg.to_radians();
        let (sin_t, cos_t) = theta.sin_cos();

        let lyx_new = cos_t * lyx - sin_t * lzx;
        let lyy_new = cos_t * lyy - sin_t * lzy;
        let lyz_new = cos_t * lyz - sin_t * lzz;

        let lzx_new = sin_t * lyx + cos_t * lzx;
        let lzy_new = sin_t * lyy + cos_t * lzy;
        let lzz_new = sin_t * lyz + cos_t * lzz;

        lyx = lyx_new;
        lyy = lyy_new;
        lyz = lyz_new;
        lzx = lzx_new;
        lzy = lzy_new;
        lzz = lzz_new;
    }

    Ok(Matrix3::new(cx, cy, cz, lyx, lyy, lyz, lzx, lzy, lzz))
}

/// Replicates a 3×3 rotation into the four diagonal blocks of a 12×12
/// transformation matrix.
pub fn block_transformation(r: &Matrix3<f64>) -> Mat12 {
    let mut t = Mat12::zeros();
    for block in 0..4 {
        let offset = block * 3;
        for row in 0..3 {
            for col in 0..3 {
                t[(offset + row, offset + col)] = r[(row, col)];
            }
        }
    }
    t
}

/// `Kg = T^T K_local T`.
pub fn to_global(local_k: &Mat12, t: &Mat12) -> Mat12 {
    t.transpose() * local_k * t
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{FrameSection, Joint, Material};

    fn steel() -> Material {
        Material::new("steel", 200_000.0, 80_000.0, 0.3, 7850.0)
    }

    fn section() -> FrameSection {
        FrameSection::new("sec", "steel", 0.01, 8.33e-6, 8.33e-6, 1.0e-5)
    }

    #[test]
    fn rejects_degenerate_element() {
        let a = Joint::new(1, 0.0, 0.0, 0.0);
        let b = Joint::new(2, 1e-8, 0.0, 0.0);
        let err = local_stiffness(1, &a, &b, &section(), &steel()).unwrap_err();
        assert!(matches!(err, FrameError::DegenerateElement { .. }));
    }

    #[test]
    fn local_stiffness_is_symmetric() {
        let a = Joint::new(1, 0.0, 0.0, 0.0);
        let b = Joint::new(2, 4.0, 0.0, 0.0);
        let k = local_stiffness(1, &a, &b, &section(), &steel()).unwrap();
        for r in 0..12 {
            for c in 0..12 {
                assert!((k[(r, c)] - k[(c, r)]).abs() < 1e-6);
            }
        }
    }

    #[test]
    fn horizontal_member_local_y_is_global_y() {
        let a = Joint::new(1, 0.0, 0.0, 0.0);
        let b = Joint::new(2, 10.0, 0.0, 0.0);
        let r = local_axes(&a, &b, 0.0).unwrap();
        assert!((r[(1, 0)] - 0.0).abs() < 1e-10);
        assert!((r[(1, 1)] - 1.0).abs() < 1e-10);
    }

    #[test]
    fn vertical_member_uses_special_case_local_y() {
        let a = Joint::new(1, 0.0, 0.0, 0.0);
        let b = Joint::new(2, 0.0, 10.0, 0.0);
        let r = local_axes(&a, &b, 0.0).unwrap();
        assert!((r[(1, 0)] - 1.0).abs() < 1e-10);
    }

    #[test]
    fn global_stiffness_is_symmetric() {
        let a = Joint::new(1, 0.0, 0.0, 0.0);
        let b = Joint::new(2, 4.0, 3.0, 0.0);
        let k = local_stiffness(1, &a, &b, &section(), &steel()).unwrap();
        let r = local_axes(&a, &b, 0.0).unwrap();
        let t = block_transformation(&r);
        let kg = to_global(&k, &t);
        for row in 0..12 {
            for col in 0..12 {
                assert!((kg[(row, col)] - kg[(col, row)]).abs() < 1e-4);
            }
        }
    }
}
