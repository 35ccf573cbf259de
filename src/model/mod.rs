//! The structural model: the caller-facing data the solver consumes.

mod frame;
mod joint;
mod material;
mod section;
mod shell;

pub use frame::Frame;
pub use joint::{Joint, RestraintMask};
pub use material::Material;
pub use section::FrameSection;
pub use shell::{Shell, ShellPressure};

use crate::loads::{DistributedFrameLoad, LoadCase, LoadCombination, LoadPattern, PointLoad};
use serde::{Deserialize, Serialize};

/// The full input to an analysis: geometry, sections, materials, shells,
/// and the load patterns that a load case may reference.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StructuralModel {
    #[serde(default)]
    pub joints: Vec<Joint>,
    #[serde(default)]
    pub frames: Vec<Frame>,
    #[serde(default)]
    pub materials: Vec<Material>,
    #[serde(default)]
    pub sections: Vec<FrameSection>,
    #[serde(default)]
    pub shells: Vec<Shell>,
    #[serde(default)]
    pub patterns: Vec<LoadPattern>,
    #[serde(default)]
    pub point_loads: Vec<PointLoad>,
    #[serde(default)]
    pub distributed_loads: Vec<DistributedFrameLoad>,
    #[serde(default)]
    pub shell_pressures: Vec<crate::model::shell::ShellPressure>,
    #[serde(default)]
    pub load_cases: Vec<LoadCase>,
    #[serde(default)]
    pub load_combinations: Vec<LoadCombination>,
}

impl StructuralModel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn joint(&self, id: i64) -> Option<&Joint> {
        self.joints.iter().find(|j| j.id == id)
    }

    pub fn frame(&self, id: i64) -> Option<&Frame> {
        self.frames.iter().find(|f| f.id == id)
    }

    pub fn section(&self, id: &str) -> Option<&FrameSection> {
        self.sections.iter().find(|s| s.id == id)
    }

    pub fn material(&self, id: &str) -> Option<&Material> {
        self.materials.iter().find(|m| m.id == id)
    }

    pub fn load_case(&self, id: &str) -> Option<&LoadCase> {
        self.load_cases.iter().find(|lc| lc.id == id)
    }

    pub fn next_joint_id(&self) -> i64 {
        self.joints.iter().map(|j| j.id).max().unwrap_or(0) + 1
    }

    pub fn next_frame_id(&self) -> i64 {
        self.frames.iter().map(|f| f.id).max().unwrap_or(0) + 1
    }
}
