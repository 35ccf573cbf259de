//! Error types for the solver pipeline.

use thiserror::Error;

/// Errors produced while analyzing or combining structural results.
///
/// Variants split into two groups: per-element issues that the pipeline
/// logs and routes around (`MissingSection`, `MissingMaterial`), and
/// structural failures that prevent producing any result at all.
#[derive(Debug, Error)]
pub enum FrameError {
    #[error("load case '{0}' is not defined on the model")]
    UnknownLoadCase(String),

    #[error("frame {frame_id} has degenerate length {length:.3e} m")]
    DegenerateElement { frame_id: i64, length: f64 },

    #[error("frame {frame_id} references unknown section '{section_id}'")]
    MissingSection { frame_id: i64, section_id: String },

    #[error("section '{section_id}' references unknown material '{material_id}'")]
    MissingMaterial {
        section_id: String,
        material_id: String,
    },

    #[error("global stiffness matrix is singular; falling back to least squares")]
    SingularSystem,

    #[error("combination references incompatible station counts for frame {frame_id}")]
    IncompatibleStations { frame_id: i64 },

    #[error("combination references unknown load case '{0}'")]
    MissingCase(String),

    #[error("internal solver error: {0}")]
    InternalError(String),
}

pub type FrameResult<T> = Result<T, FrameError>;
