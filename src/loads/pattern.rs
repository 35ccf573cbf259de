//! Load patterns.

use serde::{Deserialize, Serialize};

/// A named load definition. `self_weight` marks a pattern whose only
/// content is the structure's own weight, lumped at element endpoints
/// by the assembler — no point or distributed loads need to be attached
/// to a self-weight pattern for it to contribute.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoadPattern {
    pub id: String,
    #[serde(default)]
    pub self_weight: bool,
}

impl LoadPattern {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            self_weight: false,
        }
    }

    pub fn self_weight(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            self_weight: true,
        }
    }
}
