//! Load cases: a weighted sum of load patterns, solved as one linear system.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PatternFactor {
    pub pattern_id: String,
    pub scale: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoadCase {
    pub id: String,
    pub name: Option<String>,
    #[serde(default)]
    pub patterns: Vec<PatternFactor>,
}

impl LoadCase {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: None,
            patterns: Vec::new(),
        }
    }

    pub fn with_pattern(mut self, pattern_id: impl Into<String>, scale: f64) -> Self {
        self.patterns.push(PatternFactor {
            pattern_id: pattern_id.into(),
            scale,
        });
        self
    }

    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or(&self.id)
    }
}
