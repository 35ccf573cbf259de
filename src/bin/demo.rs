//! Demo: a simply supported steel beam under a uniform gravity load.

use anyhow::Result;
use framecore::prelude::*;

fn main() -> Result<()> {
    env_logger::init();

    println!("=== framecore demo: simply supported beam ===\n");

    let mut model = StructuralModel::new();

    model
        .materials
        .push(Material::new("steel", 200_000.0, 80_000.0, 0.3, 7850.0));
    model
        .sections
        .push(FrameSection::rectangular("w1", "steel", 0.2, 0.4));

    let span = 10.0;
    model.joints.push(Joint::pinned(1, 0.0, 0.0, 0.0));
    model.joints.push(Joint::pinned(2, span, 0.0, 0.0));
    model.frames.push(Frame::new(1, 1, 2, "w1"));

    model.patterns.push(LoadPattern::new("udl"));
    model.distributed_loads.push(DistributedFrameLoad::uniform(
        1,
        "udl",
        -10.0,
        Direction::GlobalY,
    ));
    model
        .load_cases
        .push(LoadCase::new("case1").with_pattern("udl", 1.0));

    let config = SolverConfig::default();
    let results = analyze(&model, "case1", &config, 0.0)?;

    log::info!("analysis valid: {}", results.is_valid);
    println!("max displacement: {:.6} m", results.max_displacement);

    for reaction in &results.reactions {
        println!(
            "joint {}: Fy = {:.3} kN",
            reaction.joint_id, reaction.fy
        );
    }

    if let Some(detailed) = results.frame_detailed_results.get("1") {
        let mid = detailed.forces.len() / 2;
        println!("midspan moment M3 = {:.3} kN*m", detailed.forces[mid].m3);
    }

    for line in &results.log {
        println!("log: {line}");
    }

    Ok(())
}
