//! Point loads applied directly to joints.

use serde::{Deserialize, Serialize};

/// A six-component concentrated load attached to a joint. Force
/// components are kN, moment components kN·m.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PointLoad {
    pub joint_id: i64,
    pub pattern_id: String,
    pub fx: f64,
    pub fy: f64,
    pub fz: f64,
    pub mx: f64,
    pub my: f64,
    pub mz: f64,
}

impl PointLoad {
    pub fn force(joint_id: i64, pattern_id: impl Into<String>, fx: f64, fy: f64, fz: f64) -> Self {
        Self {
            joint_id,
            pattern_id: pattern_id.into(),
            fx,
            fy,
            fz,
            mx: 0.0,
            my: 0.0,
            mz: 0.0,
        }
    }

    pub fn as_array(&self) -> [f64; 6] {
        [self.fx, self.fy, self.fz, self.mx, self.my, self.mz]
    }
}
