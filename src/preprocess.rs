//! Intersection preprocessing: split frames at T-junctions and crossings
//! so every physical contact between frames becomes an explicit joint.

use crate::geom::{point_on_segment, segment_intersection, DEFAULT_TOLERANCE};
use crate::model::{Frame, Joint, StructuralModel};
use nalgebra::Vector3;
use std::collections::HashMap;

fn coords(joints: &HashMap<i64, &Joint>, id: i64) -> Vector3<f64> {
    let j = joints[&id];
    Vector3::new(j.x, j.y, j.z)
}

fn add_split(
    frame_splits: &mut HashMap<i64, Vec<(f64, Vector3<f64>)>>,
    frames: &[Frame],
    joints_map: &HashMap<i64, &Joint>,
    f_id: i64,
    pt: Vector3<f64>,
) {
    let entry = frame_splits.entry(f_id).or_default();
    if entry.iter().any(|(_, existing)| (pt - existing).norm() < DEFAULT_TOLERANCE) {
        return;
    }
    let frame = match frames.iter().find(|f| f.id == f_id) {
        Some(f) => f,
        None => return,
    };
    let start = coords(joints_map, frame.joint_i);
    let end = coords(joints_map, frame.joint_j);
    let length = (end - start).norm();
    let t = if length > 0.0 {
        (pt - start).norm() / length
    } else {
        0.0
    };
    entry.push((t, pt));
}

/// Detects intersections between frames and other frames or joints, splits
/// frames at the discovered points, and inserts new joints where needed.
/// Re-running on an already-preprocessed model is a no-op.
pub fn preprocess_intersections(model: &mut StructuralModel) {
    let joints_map: HashMap<i64, &Joint> = model.joints.iter().map(|j| (j.id, j)).collect();
    let mut next_joint_id = model.joints.iter().map(|j| j.id).max().unwrap_or(0) + 1;

    let mut frame_splits: HashMap<i64, Vec<(f64, Vector3<f64>)>> = HashMap::new();
    let frames_snapshot = model.frames.clone();

    // A. node-on-frame (T-junctions)
    for j in &model.joints {
        let j_coords = Vector3::new(j.x, j.y, j.z);
        for f in &frames_snapshot {
            if f.joint_i == j.id || f.joint_j == j.id {
                continue;
            }
            let start = coords(&joints_map, f.joint_i);
            let end = coords(&joints_map, f.joint_j);
            if point_on_segment(j_coords, start, end, DEFAULT_TOLERANCE) {
                add_split(&mut frame_splits, &frames_snapshot, &joints_map, f.id, j_coords);
            }
        }
    }

    // B. frame-frame crossings
    for i in 0..frames_snapshot.len() {
        for k in (i + 1)..frames_snapshot.len() {
            let f1 = &frames_snapshot[i];
            let f2 = &frames_snapshot[k];
            if f1.shares_endpoint(f2) {
                continue;
            }
            let p1s = coords(&joints_map, f1.joint_i);
            let p1e = coords(&joints_map, f1.joint_j);
            let p2s = coords(&joints_map, f2.joint_i);
            let p2e = coords(&joints_map, f2.joint_j);
            if let Some(pt) = segment_intersection(p1s, p1e, p2s, p2e, DEFAULT_TOLERANCE) {
                add_split(&mut frame_splits, &frames_snapshot, &joints_map, f1.id, pt);
                add_split(&mut frame_splits, &frames_snapshot, &joints_map, f2.id, pt);
            }
        }
    }

    if frame_splits.is_empty() {
        return;
    }

    let mut new_frames: Vec<Frame> = model
        .frames
        .iter()
        .filter(|f| !frame_splits.contains_key(&f.id))
        .cloned()
        .collect();

    let mut result_joints = model.joints.clone();
    let mut next_frame_id = model.frames.iter().map(|f| f.id).max().unwrap_or(0) + 1;

    for (f_id, mut splits) in frame_splits {
        let original = model.frames.iter().find(|f| f.id == f_id).unwrap().clone();
        splits.sort_by(|a, b| a.0.partial_cmp(&b.0).unwrap());

        let mut current_start = original.joint_i;

        for (_, pt) in &splits {
            let existing = result_joints
                .iter()
                .find(|j| (Vector3::new(j.x, j.y, j.z) - pt).norm() < DEFAULT_TOLERANCE);

            let mid_node_id = match existing {
                Some(j) => j.id,
                None => {
                    let id = next_joint_id;
                    result_joints.push(Joint::new(id, pt.x, pt.y, pt.z));
                    next_joint_id += 1;
                    id
                }
            };

            new_frames.push(split_segment(&original, next_frame_id, current_start, mid_node_id));
            next_frame_id += 1;
            current_start = mid_node_id;
        }

        new_frames.push(split_segment(&original, next_frame_id, current_start, original.joint_j));
        next_frame_id += 1;
    }

    model.joints = result_joints;
    model.frames = new_frames;
}

fn split_segment(original: &Frame, id: i64, joint_i: i64, joint_j: i64) -> Frame {
    Frame {
        id,
        joint_i,
        joint_j,
        section_id: original.section_id.clone(),
        orientation: original.orientation,
        offset_y: original.offset_y,
        offset_z: original.offset_z,
    }
}
