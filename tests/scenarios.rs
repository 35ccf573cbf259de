//! End-to-end scenarios against closed-form beam theory and fundamental
//! solver invariants.

use framecore::assemble::{self, GlobalStiffness};
use framecore::mesh;
use framecore::prelude::*;
use framecore::preprocess;

fn steel() -> Material {
    Material::new("steel", 200_000.0, 80_000.0, 0.3, 7850.0)
}

/// joint 0: ux,uy,uz,rx restrained; joint 1: uy,uz,rx restrained.
/// Both allow rz (in-plane bending) free; rx is restrained at both ends to
/// suppress the unloaded torsional rigid-body mode.
fn simply_supported_beam(span: f64) -> (StructuralModel, f64, f64) {
    let mut model = StructuralModel::new();

    let a = 0.01;
    let iy = 8.33e-6;
    let iz = 8.33e-6;
    let j = 1.0e-5;

    model.joints.push(Joint {
        id: 1,
        x: 0.0,
        y: 0.0,
        z: 0.0,
        restraint: Some([true, true, true, true, false, false]),
    });
    model.joints.push(Joint {
        id: 2,
        x: span,
        y: 0.0,
        z: 0.0,
        restraint: Some([false, true, true, true, false, false]),
    });
    model.materials.push(steel());
    model.sections.push(FrameSection::new("sec", "steel", a, iy, iz, j));
    model.frames.push(Frame::new(1, 1, 2, "sec"));
    model.patterns.push(LoadPattern::new("udl"));
    model
        .distributed_loads
        .push(DistributedFrameLoad::uniform(1, "udl", 10.0, Direction::Gravity));
    model.load_cases.push(LoadCase::new("case1").with_pattern("udl", 1.0));

    (model, iy, iz)
}

#[test]
fn scenario_a_simply_supported_udl_beam() {
    let span = 5.0;
    let (model, _iy, iz) = simply_supported_beam(span);
    let config = SolverConfig {
        meshing_segments: 10,
        ..Default::default()
    };
    let results = analyze(&model, "case1", &config, 0.0).unwrap();
    assert!(results.is_valid);

    let e_pa = 200_000.0e6;
    let w = 10_000.0;
    let expected_midspan_uy = -5.0 * w * span.powi(4) / (384.0 * e_pa * iz);
    let expected_m3 = w * span * span / 8.0;

    let detailed = &results.frame_detailed_results["1"];
    let mid = detailed.displacements.len() / 2;
    let actual_uy = detailed.displacements[mid].uy;
    assert!(
        (actual_uy - expected_midspan_uy).abs() / expected_midspan_uy.abs() < 0.01,
        "expected {expected_midspan_uy}, got {actual_uy}"
    );

    let mid_force = detailed.forces.len() / 2;
    let actual_m3 = detailed.forces[mid_force].m3.abs();
    assert!(
        (actual_m3 - expected_m3).abs() / expected_m3 < 0.05,
        "expected {expected_m3}, got {actual_m3}"
    );

    for reaction in &results.reactions {
        assert!((reaction.fy.abs() - 25.0).abs() / 25.0 < 0.01);
    }
}

fn cantilever(length: f64) -> StructuralModel {
    let mut model = StructuralModel::new();
    model.joints.push(Joint::fixed(1, 0.0, 0.0, 0.0));
    model.joints.push(Joint::new(2, length, 0.0, 0.0));
    model.materials.push(steel());
    model
        .sections
        .push(FrameSection::new("sec", "steel", 0.01, 8.33e-6, 8.33e-6, 1.0e-5));
    model.frames.push(Frame::new(1, 1, 2, "sec"));
    model
}

#[test]
fn scenario_b_cantilever_tip_load() {
    let length = 2.0;
    let mut model = cantilever(length);
    model.patterns.push(LoadPattern::new("tip"));
    model.point_loads.push(PointLoad::force(2, "tip", 0.0, -10.0, 0.0));
    model.load_cases.push(LoadCase::new("case1").with_pattern("tip", 1.0));

    let config = SolverConfig::default();
    let results = analyze(&model, "case1", &config, 0.0).unwrap();
    assert!(results.is_valid);

    let e_pa = 200_000.0e6;
    let iz = 8.33e-6;
    let p = 10_000.0;
    let expected_tip_uy = -p * length.powi(3) / (3.0 * e_pa * iz);

    let tip = results.displacements.iter().find(|d| d.joint_id == 2).unwrap();
    assert!((tip.uy - expected_tip_uy).abs() / expected_tip_uy.abs() < 0.01);

    let fixed_reaction = results.reactions.iter().find(|r| r.joint_id == 1).unwrap();
    assert!((fixed_reaction.fy - 10.0).abs() < 0.01);

    let detailed = &results.frame_detailed_results["1"];
    let fixed_end_m3 = detailed.forces[0].m3.abs();
    assert!((fixed_end_m3 - 20.0).abs() / 20.0 < 0.02);
}

#[test]
fn scenario_c_self_weight_only_produces_vertical_displacement_only() {
    let mut model = cantilever(2.0);
    model.patterns.push(LoadPattern::self_weight("sw"));
    model.load_cases.push(LoadCase::new("case1").with_pattern("sw", 1.0));

    let config = SolverConfig::default();
    let results = analyze(&model, "case1", &config, 0.0).unwrap();
    assert!(results.is_valid);

    let tip = results.displacements.iter().find(|d| d.joint_id == 2).unwrap();
    assert!(tip.uy.abs() > 1e-12);
    assert!(tip.ux.abs() < 1e-12);
    assert!(tip.uz.abs() < 1e-12);

    let detailed = &results.frame_detailed_results["1"];
    for f in &detailed.forces {
        assert!(f.m2.abs() < 1e-9);
        assert!(f.v3.abs() < 1e-9);
        assert!(f.t.abs() < 1e-9);
    }
}

#[test]
fn scenario_d_crossing_frames_split_at_single_new_joint() {
    let mut model = StructuralModel::new();
    model.joints.push(Joint::new(1, 0.0, 0.0, 0.0));
    model.joints.push(Joint::new(2, 10.0, 0.0, 0.0));
    model.joints.push(Joint::new(3, 5.0, -5.0, 0.0));
    model.joints.push(Joint::new(4, 5.0, 5.0, 0.0));
    model.frames.push(Frame::new(1, 1, 2, "sec"));
    model.frames.push(Frame::new(2, 3, 4, "sec"));

    preprocess::preprocess_intersections(&mut model);
    assert_eq!(model.joints.len(), 5);
    assert_eq!(model.frames.len(), 4);

    let before = (model.joints.len(), model.frames.len());
    preprocess::preprocess_intersections(&mut model);
    assert_eq!((model.joints.len(), model.frames.len()), before);
}

#[test]
fn scenario_e_combination_matches_scaled_superposition() {
    let mut model = cantilever(2.0);
    model.patterns.push(LoadPattern::new("dead"));
    model.patterns.push(LoadPattern::new("live"));
    model.point_loads.push(PointLoad::force(2, "dead", 0.0, -5.0, 0.0));
    model.point_loads.push(PointLoad::force(2, "live", 0.0, -3.0, 0.0));
    model.load_cases.push(LoadCase::new("dl").with_pattern("dead", 1.0));
    model.load_cases.push(LoadCase::new("ll").with_pattern("live", 1.0));

    let config = SolverConfig::default();
    let dl_results = analyze(&model, "dl", &config, 0.0).unwrap();
    let ll_results = analyze(&model, "ll", &config, 0.0).unwrap();

    let mut results_map = std::collections::HashMap::new();
    results_map.insert("dl".to_string(), dl_results.clone());
    results_map.insert("ll".to_string(), ll_results.clone());

    let combo = LoadCombination::new("combo1", "1.2DL+1.6LL")
        .with_case("dl", 1.2)
        .with_case("ll", 1.6);
    let combined = combine(&combo, &results_map, 0.0).unwrap();

    let dl_tip = dl_results.displacements.iter().find(|d| d.joint_id == 2).unwrap();
    let ll_tip = ll_results.displacements.iter().find(|d| d.joint_id == 2).unwrap();
    let combined_tip = combined.displacements.iter().find(|d| d.joint_id == 2).unwrap();

    let expected = 1.2 * dl_tip.uy + 1.6 * ll_tip.uy;
    assert!((combined_tip.uy - expected).abs() / expected.abs() < 1e-9);
}

#[test]
fn scenario_f_fully_pinned_joint_has_zero_displacement() {
    let mut model = StructuralModel::new();
    model.joints.push(Joint::fixed(1, 0.0, 0.0, 0.0));
    model.joints.push(Joint::new(2, 4.0, 0.0, 0.0));
    model.materials.push(steel());
    model
        .sections
        .push(FrameSection::new("sec", "steel", 0.01, 8.33e-6, 8.33e-6, 1.0e-5));
    model.frames.push(Frame::new(1, 1, 2, "sec"));
    model.patterns.push(LoadPattern::new("dead"));
    model.point_loads.push(PointLoad::force(2, "dead", 0.0, -5.0, 0.0));
    model.load_cases.push(LoadCase::new("case1").with_pattern("dead", 1.0));

    let config = SolverConfig::default();
    let results = analyze(&model, "case1", &config, 0.0).unwrap();

    let fixed_disp = results.displacements.iter().find(|d| d.joint_id == 1).unwrap();
    for v in fixed_disp.as_array() {
        assert_eq!(v, 0.0);
    }
}

#[test]
fn determinism_repeated_runs_produce_identical_results() {
    let (model, _iy, _iz) = simply_supported_beam(5.0);
    let config = SolverConfig::default();

    let first = analyze(&model, "case1", &config, 0.0).unwrap();
    let second = analyze(&model, "case1", &config, 0.0).unwrap();

    assert_eq!(first.displacements.len(), second.displacements.len());
    for (a, b) in first.displacements.iter().zip(&second.displacements) {
        assert_eq!(a.joint_id, b.joint_id);
        assert_eq!(a.as_array(), b.as_array());
    }

    assert_eq!(first.reactions.len(), second.reactions.len());
    for (a, b) in first.reactions.iter().zip(&second.reactions) {
        assert_eq!(a.joint_id, b.joint_id);
        assert_eq!(a.fx, b.fx);
        assert_eq!(a.fy, b.fy);
        assert_eq!(a.fz, b.fz);
    }

    assert_eq!(first.max_displacement, second.max_displacement);
}

#[test]
fn mesh_refinement_invariance_for_nodal_loads_only() {
    let mut model = cantilever(3.0);
    model.patterns.push(LoadPattern::new("tip"));
    model.point_loads.push(PointLoad::force(2, "tip", 0.0, -7.0, 0.0));
    model.load_cases.push(LoadCase::new("case1").with_pattern("tip", 1.0));

    let coarse_cfg = SolverConfig {
        meshing_segments: 1,
        ..Default::default()
    };
    let fine_cfg = SolverConfig {
        meshing_segments: 20,
        ..Default::default()
    };

    let coarse = analyze(&model, "case1", &coarse_cfg, 0.0).unwrap();
    let fine = analyze(&model, "case1", &fine_cfg, 0.0).unwrap();

    let coarse_tip = coarse.displacements.iter().find(|d| d.joint_id == 2).unwrap();
    let fine_tip = fine.displacements.iter().find(|d| d.joint_id == 2).unwrap();

    assert!((coarse_tip.uy - fine_tip.uy).abs() / coarse_tip.uy.abs() < 1e-9);
}

#[test]
fn linearity_scaling_loads_scales_displacements_and_reactions() {
    let mut model = cantilever(2.0);
    model.patterns.push(LoadPattern::new("base"));
    model.point_loads.push(PointLoad::force(2, "base", 0.0, -4.0, 0.0));
    model.load_cases.push(LoadCase::new("base").with_pattern("base", 1.0));
    model.load_cases.push(LoadCase::new("scaled").with_pattern("base", 2.5));

    let config = SolverConfig::default();
    let base = analyze(&model, "base", &config, 0.0).unwrap();
    let scaled = analyze(&model, "scaled", &config, 0.0).unwrap();

    let base_tip = base.displacements.iter().find(|d| d.joint_id == 2).unwrap();
    let scaled_tip = scaled.displacements.iter().find(|d| d.joint_id == 2).unwrap();
    let expected_uy = base_tip.uy * 2.5;
    assert!((scaled_tip.uy - expected_uy).abs() / expected_uy.abs() < 1e-9);

    let base_reaction = base.reactions.iter().find(|r| r.joint_id == 1).unwrap();
    let scaled_reaction = scaled.reactions.iter().find(|r| r.joint_id == 1).unwrap();
    let expected_fy = base_reaction.fy * 2.5;
    assert!((scaled_reaction.fy - expected_fy).abs() / expected_fy.abs() < 1e-9);
}

#[test]
fn assembled_global_stiffness_is_symmetric_for_multi_element_model() {
    let mut model = StructuralModel::new();
    model.materials.push(steel());
    model.sections.push(FrameSection::rectangular("col", "steel", 0.3, 0.3));
    model.joints.push(Joint::fixed(1, 0.0, 0.0, 0.0));
    model.joints.push(Joint::new(2, 0.0, 3.0, 0.0));
    model.joints.push(Joint::new(3, 4.0, 3.0, 0.0));
    model.frames.push(Frame::new(1, 1, 2, "col"));
    model.frames.push(Frame::new(2, 2, 3, "col").with_orientation(15.0));

    let config = SolverConfig::default();
    let meshed = mesh::mesh_model(&model, config.clamped_segments());
    let mut log = Vec::new();
    let stiffness = assemble::assemble_stiffness(&meshed, &model, &config, &mut log).unwrap();

    let GlobalStiffness::Dense(k) = stiffness else {
        panic!("expected dense assembly for a small model");
    };

    for i in 0..k.nrows() {
        for j in 0..k.ncols() {
            assert!((k[(i, j)] - k[(j, i)]).abs() < 1e-6, "K not symmetric at ({i},{j})");
        }
    }
}

#[test]
fn equilibrium_reactions_balance_applied_loads() {
    let (model, _iy, _iz) = simply_supported_beam(6.0);
    let config = SolverConfig {
        meshing_segments: 4,
        ..Default::default()
    };
    let results = analyze(&model, "case1", &config, 0.0).unwrap();

    let total_reaction_fy: f64 = results.reactions.iter().map(|r| r.fy).sum();
    let w = 10.0;
    let span = 6.0;
    let total_applied = w * span;
    assert!((total_reaction_fy - total_applied).abs() < 1e-6 * total_applied.max(1.0));
}
