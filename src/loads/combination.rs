//! Load combinations: a weighted sum of already-analyzed load cases.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CaseFactor {
    pub case_id: String,
    pub scale: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoadCombination {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub cases: Vec<CaseFactor>,
}

impl LoadCombination {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            cases: Vec::new(),
        }
    }

    pub fn with_case(mut self, case_id: impl Into<String>, scale: f64) -> Self {
        self.cases.push(CaseFactor {
            case_id: case_id.into(),
            scale,
        });
        self
    }
}
