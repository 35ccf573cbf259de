//! Distributed (line) loads on frames.

use super::direction::Direction;
use serde::{Deserialize, Serialize};

/// A trapezoidal distributed load over a fractional span of a frame.
///
/// `start_distance`/`end_distance` are fractions in `[0, 1]` of the
/// *original* (pre-mesh) frame length. `start_magnitude`/`end_magnitude`
/// are kN/m and may differ to express a trapezoidal (or, when equal,
/// uniform) load.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DistributedFrameLoad {
    pub frame_id: i64,
    pub pattern_id: String,
    pub start_distance: f64,
    pub end_distance: f64,
    pub start_magnitude: f64,
    pub end_magnitude: f64,
    pub direction: Direction,
}

impl DistributedFrameLoad {
    pub fn uniform(
        frame_id: i64,
        pattern_id: impl Into<String>,
        magnitude: f64,
        direction: Direction,
    ) -> Self {
        Self {
            frame_id,
            pattern_id: pattern_id.into(),
            start_distance: 0.0,
            end_distance: 1.0,
            start_magnitude: magnitude,
            end_magnitude: magnitude,
            direction,
        }
    }

    pub fn is_uniform(&self) -> bool {
        (self.start_magnitude - self.end_magnitude).abs() < 1e-12
    }
}
