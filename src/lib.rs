//! A native Rust 3D linear-elastic finite element solver for framed
//! (beam/column) structures.
//!
//! The pipeline is: intersection preprocessing, meshing into equal
//! sub-frames, stiffness assembly, a direct linear solve on the free DOFs,
//! and post-processing into per-station displacements, internal forces,
//! and reactions. [`combine`] then superposes already-analyzed load cases
//! into a combination result.
//!
//! ## Example
//! ```rust
//! use framecore::prelude::*;
//!
//! let mut model = StructuralModel::new();
//! model.joints.push(Joint::fixed(1, 0.0, 0.0, 0.0));
//! model.joints.push(Joint::new(2, 4.0, 0.0, 0.0));
//! model.materials.push(Material::new("steel", 200_000.0, 80_000.0, 0.3, 7850.0));
//! model.sections.push(FrameSection::rectangular("w1", "steel", 0.2, 0.3));
//! model.frames.push(Frame::new(1, 1, 2, "w1"));
//! model.patterns.push(LoadPattern::new("dead"));
//! model.point_loads.push(PointLoad::force(2, "dead", 0.0, -10.0, 0.0));
//! model.load_cases.push(LoadCase::new("case1").with_pattern("dead", 1.0));
//!
//! let config = SolverConfig::default();
//! let results = framecore::analyze(&model, "case1", &config, 0.0).unwrap();
//! assert!(results.is_valid);
//! ```

pub mod analyze;
pub mod assemble;
pub mod combine;
pub mod config;
pub mod element;
pub mod error;
pub mod geom;
pub mod loads;
pub mod math;
pub mod mesh;
pub mod model;
pub mod post;
pub mod preprocess;
pub mod results;
pub mod solve;

pub use analyze::analyze;
pub use combine::combine;

pub mod prelude {
    pub use crate::config::SolverConfig;
    pub use crate::error::{FrameError, FrameResult};
    pub use crate::loads::{
        CaseFactor, DistributedFrameLoad, Direction, LoadCase, LoadCombination, LoadPattern,
        PatternFactor, PointLoad,
    };
    pub use crate::model::{Frame, FrameSection, Joint, Material, Shell, ShellPressure, StructuralModel};
    pub use crate::results::{AnalysisResults, DetailedFrameResult, FrameForces, JointDisplacement, JointReaction};
    pub use crate::{analyze, combine};
}
