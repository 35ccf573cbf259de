//! Shell element schema.
//!
//! Four-node shells are accepted on the model so a persistence or
//! transport layer can round-trip them, but they contribute no
//! stiffness in this core: the assembler logs a warning and skips any
//! `Shell` or `ShellPressure` it encounters.

use serde::{Deserialize, Serialize};

/// A four-node quadrilateral shell, carried for schema compatibility only.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Shell {
    pub id: i64,
    pub joint_i: i64,
    pub joint_j: i64,
    pub joint_m: i64,
    pub joint_n: i64,
    pub thickness: f64,
    pub material_id: String,
}

/// A pressure load applied to a shell's face, carried but not assembled.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShellPressure {
    pub shell_id: i64,
    pub pattern_id: String,
    /// Pressure magnitude, kN/m², positive toward local +z.
    pub magnitude: f64,
}
