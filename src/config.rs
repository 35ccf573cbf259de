//! Solver configuration surface.

use serde::{Deserialize, Serialize};

const MIN_SEGMENTS: u32 = 1;
const MAX_SEGMENTS: u32 = 20;

/// Runtime knobs for a single `analyze` call.
///
/// Deserialized directly from a caller's request; out-of-range
/// `meshing_segments` is clamped rather than rejected, matching the
/// reference solver's `min(max(n, 1), 20)`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SolverConfig {
    #[serde(default = "default_segments")]
    pub meshing_segments: u32,
    #[serde(default = "default_true")]
    pub enable_intersection_check: bool,
    #[serde(default = "default_true")]
    pub use_sparse_solver: bool,
}

fn default_segments() -> u32 {
    6
}

fn default_true() -> bool {
    true
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            meshing_segments: default_segments(),
            enable_intersection_check: true,
            use_sparse_solver: true,
        }
    }
}

impl SolverConfig {
    /// Segment count clamped into the supported range.
    pub fn clamped_segments(&self) -> u32 {
        self.meshing_segments.clamp(MIN_SEGMENTS, MAX_SEGMENTS)
    }

    /// DOF threshold above which the sparse path is used when enabled.
    pub const SPARSE_DOF_THRESHOLD: usize = 100;
}
