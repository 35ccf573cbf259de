//! Frame (beam/column) element definitions.

use serde::{Deserialize, Serialize};

/// A 3D prismatic frame element between two joints.
///
/// `section_id` is nullable: a frame with no section contributes no
/// stiffness, which is how the preprocessor represents a geometric
/// connector that never carries load. `offset_y`/`offset_z` are carried
/// for round-tripping but not consumed by the stiffness path (rigid
/// offsets are out of scope).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Frame {
    pub id: i64,
    pub joint_i: i64,
    pub joint_j: i64,
    pub section_id: Option<String>,
    /// Rotation about the local x-axis, degrees.
    #[serde(default)]
    pub orientation: f64,
    #[serde(default)]
    pub offset_y: f64,
    #[serde(default)]
    pub offset_z: f64,
}

impl Frame {
    pub fn new(id: i64, joint_i: i64, joint_j: i64, section_id: impl Into<String>) -> Self {
        Self {
            id,
            joint_i,
            joint_j,
            section_id: Some(section_id.into()),
            orientation: 0.0,
            offset_y: 0.0,
            offset_z: 0.0,
        }
    }

    pub fn with_orientation(mut self, degrees: f64) -> Self {
        self.orientation = degrees;
        self
    }

    pub fn shares_endpoint(&self, other: &Frame) -> bool {
        self.joint_i == other.joint_i
            || self.joint_i == other.joint_j
            || self.joint_j == other.joint_i
            || self.joint_j == other.joint_j
    }
}
