//! Subdivides each frame into equal sub-frames for the solver.

use crate::model::{Frame, Joint, StructuralModel};
use std::collections::HashMap;

/// A fully meshed model: original joints plus synthetic interior joints in
/// a dedicated index space, the sub-frames the solver actually assembles,
/// and the mapping from an original frame id to its ordered solver joints.
pub struct MeshedModel {
    pub solver_joints: Vec<Joint>,
    pub solver_frames: Vec<Frame>,
    pub frame_mapping: HashMap<i64, Vec<usize>>,
    /// index of each solver joint keyed by joint id, for O(1) lookup.
    pub joint_index: HashMap<i64, usize>,
}

impl MeshedModel {
    pub fn joint_at(&self, id: i64) -> Option<&Joint> {
        self.joint_index.get(&id).map(|&i| &self.solver_joints[i])
    }
}

/// Subdivides every frame of `model` into `segments` equal sub-frames. The
/// model is expected to have already gone through intersection
/// preprocessing. `segments` is NOT clamped here; callers pass
/// `SolverConfig::clamped_segments()`.
pub fn mesh_model(model: &StructuralModel, segments: u32) -> MeshedModel {
    let n = segments.max(1) as usize;

    let mut solver_joints: Vec<Joint> = model.joints.clone();
    let mut joint_index: HashMap<i64, usize> = solver_joints
        .iter()
        .enumerate()
        .map(|(i, j)| (j.id, i))
        .collect();

    let mut next_synthetic_id = solver_joints.iter().map(|j| j.id).max().unwrap_or(0) + 1;
    let mut solver_frames: Vec<Frame> = Vec::new();
    let mut frame_mapping: HashMap<i64, Vec<usize>> = HashMap::new();
    let mut next_solver_frame_id = model.frames.iter().map(|f| f.id).max().unwrap_or(0) + 1;

    for frame in &model.frames {
        let ji = *joint_index.get(&frame.joint_i).expect("frame references unknown joint_i");
        let jj = *joint_index.get(&frame.joint_j).expect("frame references unknown joint_j");
        let start = solver_joints[ji].coords();
        let end = solver_joints[jj].coords();

        let mut chain = Vec::with_capacity(n + 1);
        chain.push(ji);

        for step in 1..n {
            let t = step as f64 / n as f64;
            let x = start[0] + (end[0] - start[0]) * t;
            let y = start[1] + (end[1] - start[1]) * t;
            let z = start[2] + (end[2] - start[2]) * t;
            let id = next_synthetic_id;
            next_synthetic_id += 1;
            let idx = solver_joints.len();
            solver_joints.push(Joint::new(id, x, y, z));
            joint_index.insert(id, idx);
            chain.push(idx);
        }
        chain.push(jj);

        for w in chain.windows(2) {
            let sub = Frame {
                id: next_solver_frame_id,
                joint_i: solver_joints[w[0]].id,
                joint_j: solver_joints[w[1]].id,
                section_id: frame.section_id.clone(),
                orientation: frame.orientation,
                offset_y: frame.offset_y,
                offset_z: frame.offset_z,
            };
            solver_frames.push(sub);
            next_solver_frame_id += 1;
        }

        frame_mapping.insert(frame.id, chain);
    }

    MeshedModel {
        solver_joints,
        solver_frames,
        frame_mapping,
        joint_index,
    }
}
