//! Top-level entry point: preprocess, mesh, assemble, solve, post-process.

use crate::assemble::{assemble_stiffness, build_load_vector};
use crate::config::SolverConfig;
use crate::error::{FrameError, FrameResult};
use crate::mesh::mesh_model;
use crate::model::StructuralModel;
use crate::post::{build_detailed_results, compute_reactions, extract_joint_displacements};
use crate::preprocess::preprocess_intersections;
use crate::results::AnalysisResults;
use crate::solve::{free_dofs, solve_system};

/// Runs a full analysis of `model` under the named load case.
///
/// Returns `Err(FrameError::UnknownLoadCase)` if `load_case_id` is not
/// defined anywhere in `model`. A structural failure that leaves nothing
/// to solve — every frame in the model referencing an unknown section or
/// material, or being degenerate — is instead captured in the returned
/// `AnalysisResults` via [`AnalysisResults::failed`], with `is_valid =
/// false` and the failure appended to its log, matching the reference
/// solver's error handling: a bad model does not panic the service, it
/// produces a labeled failed result. Issues affecting only some elements
/// (a single frame with a missing section, say) are logged and that
/// element is skipped; the rest of the analysis still runs.
pub fn analyze(model: &StructuralModel, load_case_id: &str, config: &SolverConfig, timestamp_ms: f64) -> FrameResult<AnalysisResults> {
    let Some(load_case) = find_load_case(model, load_case_id) else {
        return Err(FrameError::UnknownLoadCase(load_case_id.to_string()));
    };

    let mut log = Vec::new();
    let mut working_model = model.clone();

    if config.enable_intersection_check {
        log.push("running intersection detection...".to_string());
        preprocess_intersections(&mut working_model);
    } else {
        log.push("skipping intersection detection (disabled in config)".to_string());
    }

    log.push("starting analysis...".to_string());

    let segments = config.clamped_segments();
    let meshed = mesh_model(&working_model, segments);
    log.push(format!(
        "meshed model: {} -> {} joints, {} -> {} elements.",
        working_model.joints.len(),
        meshed.solver_joints.len(),
        working_model.frames.len(),
        meshed.solver_frames.len()
    ));

    let dof_count = meshed.solver_joints.len() * 6;
    log.push(format!("system DOF: {dof_count}"));

    let stiffness = match assemble_stiffness(&meshed, &working_model, config, &mut log) {
        Ok(stiffness) => stiffness,
        Err(e) => {
            log.push(format!("analysis failed: {e}"));
            return Ok(AnalysisResults::failed(load_case.id.clone(), timestamp_ms, log));
        }
    };
    let f = build_load_vector(&meshed, &working_model, load_case, &mut log);

    let free = free_dofs(&meshed);
    log.push(format!("solving system... (free DOF: {})", free.len()));
    let u_full = solve_system(&stiffness, &f, &free, &mut log);

    let displacements = extract_joint_displacements(&working_model, &meshed, &u_full);
    let frame_detailed_results = build_detailed_results(&working_model, &meshed, &u_full);

    log.push("calculating reactions...".to_string());
    let reactions = compute_reactions(&working_model, &meshed, &stiffness, &u_full, &f);

    log.push("analysis complete.".to_string());

    let mut results = AnalysisResults {
        load_case_id: load_case.id.clone(),
        case_name: load_case.display_name().to_string(),
        displacements,
        frame_detailed_results,
        reactions,
        is_valid: true,
        max_displacement: 0.0,
        timestamp_ms,
        log,
    };
    results.recompute_max_displacement();

    Ok(results)
}

fn find_load_case<'a>(model: &'a StructuralModel, load_case_id: &str) -> Option<&'a crate::loads::LoadCase> {
    model.load_case(load_case_id)
}
