//! Output types produced by `analyze` and `combine`.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Displacement at a joint: translations in metres, rotations in radians.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JointDisplacement {
    pub joint_id: i64,
    pub ux: f64,
    pub uy: f64,
    pub uz: f64,
    pub rx: f64,
    pub ry: f64,
    pub rz: f64,
}

impl JointDisplacement {
    pub fn zero(joint_id: i64) -> Self {
        Self {
            joint_id,
            ..Default::default()
        }
    }

    pub fn translation_magnitude(&self) -> f64 {
        (self.ux.powi(2) + self.uy.powi(2) + self.uz.powi(2)).sqrt()
    }

    pub fn as_array(&self) -> [f64; 6] {
        [self.ux, self.uy, self.uz, self.rx, self.ry, self.rz]
    }

    pub fn accumulate_scaled(&mut self, other: &JointDisplacement, scale: f64) {
        self.ux += other.ux * scale;
        self.uy += other.uy * scale;
        self.uz += other.uz * scale;
        self.rx += other.rx * scale;
        self.ry += other.ry * scale;
        self.rz += other.rz * scale;
    }
}

/// Support reaction at a joint: forces in kN, moments in kN·m.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JointReaction {
    pub joint_id: i64,
    pub fx: f64,
    pub fy: f64,
    pub fz: f64,
    pub mx: f64,
    pub my: f64,
    pub mz: f64,
}

impl JointReaction {
    pub fn zero(joint_id: i64) -> Self {
        Self {
            joint_id,
            ..Default::default()
        }
    }

    pub fn accumulate_scaled(&mut self, other: &JointReaction, scale: f64) {
        self.fx += other.fx * scale;
        self.fy += other.fy * scale;
        self.fz += other.fz * scale;
        self.mx += other.mx * scale;
        self.my += other.my * scale;
        self.mz += other.mz * scale;
    }
}

/// Internal forces at a station: axial/shear/torsion in kN, moments in kN·m.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct FrameForces {
    pub p: f64,
    pub v2: f64,
    pub v3: f64,
    pub t: f64,
    pub m2: f64,
    pub m3: f64,
}

impl FrameForces {
    pub fn accumulate_scaled(&mut self, other: &FrameForces, scale: f64) {
        self.p += other.p * scale;
        self.v2 += other.v2 * scale;
        self.v3 += other.v3 * scale;
        self.t += other.t * scale;
        self.m2 += other.m2 * scale;
        self.m3 += other.m3 * scale;
    }
}

/// Per-station displacements and internal forces along one original frame.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DetailedFrameResult {
    pub stations: Vec<f64>,
    pub displacements: Vec<JointDisplacement>,
    pub forces: Vec<FrameForces>,
}

/// The result of one `analyze` or `combine` call.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResults {
    pub load_case_id: String,
    pub case_name: String,
    pub displacements: Vec<JointDisplacement>,
    pub frame_detailed_results: HashMap<String, DetailedFrameResult>,
    pub reactions: Vec<JointReaction>,
    pub is_valid: bool,
    pub max_displacement: f64,
    pub timestamp_ms: f64,
    pub log: Vec<String>,
}

impl AnalysisResults {
    pub fn failed(load_case_id: impl Into<String>, timestamp_ms: f64, log: Vec<String>) -> Self {
        Self {
            load_case_id: load_case_id.into(),
            case_name: String::new(),
            displacements: Vec::new(),
            frame_detailed_results: HashMap::new(),
            reactions: Vec::new(),
            is_valid: false,
            max_displacement: 0.0,
            timestamp_ms,
            log,
        }
    }

    pub fn recompute_max_displacement(&mut self) {
        self.max_displacement = self
            .displacements
            .iter()
            .map(|d| d.translation_magnitude())
            .fold(0.0, f64::max);
    }
}
