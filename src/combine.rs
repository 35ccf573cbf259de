//! Scaled superposition of previously-computed per-case results.

use crate::error::{FrameError, FrameResult};
use crate::loads::LoadCombination;
use crate::results::{AnalysisResults, DetailedFrameResult, FrameForces, JointDisplacement, JointReaction};
use std::collections::HashMap;

/// Combines the results of one or more already-analyzed load cases into a
/// single scaled superposition, as linear statics permits.
///
/// Every case id referenced by `combination` must already be a key of
/// `results`; this is checked up front, before any accumulation, so a
/// missing case never produces a partially-combined result.
pub fn combine(
    combination: &LoadCombination,
    results: &HashMap<String, AnalysisResults>,
    timestamp_ms: f64,
) -> FrameResult<AnalysisResults> {
    for case in &combination.cases {
        if !results.contains_key(&case.case_id) {
            return Err(FrameError::MissingCase(case.case_id.clone()));
        }
    }

    let mut log = vec![format!("combining results for {}...", combination.name)];

    let mut disp_map: HashMap<i64, JointDisplacement> = HashMap::new();
    let mut frame_map: HashMap<String, DetailedFrameResult> = HashMap::new();
    let mut reaction_map: HashMap<i64, JointReaction> = HashMap::new();

    for case in &combination.cases {
        let result = &results[&case.case_id];
        let scale = case.scale;

        for d in &result.displacements {
            let target = disp_map.entry(d.joint_id).or_insert_with(|| JointDisplacement::zero(d.joint_id));
            target.accumulate_scaled(d, scale);
        }

        for (fid, detail) in &result.frame_detailed_results {
            let target = frame_map.entry(fid.clone()).or_insert_with(|| DetailedFrameResult {
                stations: detail.stations.clone(),
                displacements: detail
                    .displacements
                    .iter()
                    .map(|jd| JointDisplacement::zero(jd.joint_id))
                    .collect(),
                forces: vec![FrameForces::default(); detail.forces.len()],
            });

            if target.forces.len() != detail.forces.len() {
                return Err(FrameError::IncompatibleStations {
                    frame_id: fid.parse().unwrap_or(0),
                });
            }

            for (i, d) in detail.displacements.iter().enumerate() {
                target.displacements[i].accumulate_scaled(d, scale);
            }
            for (i, f) in detail.forces.iter().enumerate() {
                target.forces[i].accumulate_scaled(f, scale);
            }
        }

        for r in &result.reactions {
            let target = reaction_map.entry(r.joint_id).or_insert_with(|| JointReaction::zero(r.joint_id));
            target.accumulate_scaled(r, scale);
        }
    }

    log.push("combination complete.".to_string());

    let mut combined = AnalysisResults {
        load_case_id: combination.id.clone(),
        case_name: combination.name.clone(),
        displacements: disp_map.into_values().collect(),
        frame_detailed_results: frame_map,
        reactions: reaction_map.into_values().collect(),
        is_valid: true,
        max_displacement: 0.0,
        timestamp_ms,
        log,
    };
    combined.recompute_max_displacement();

    Ok(combined)
}
