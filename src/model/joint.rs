//! Joint (node) definitions.

use serde::{Deserialize, Serialize};

/// Boolean restraint mask on the six DOFs of a joint: `[ux, uy, uz, rx, ry, rz]`.
pub type RestraintMask = [bool; 6];

/// A point in 3D space, with an optional restraint mask.
///
/// A joint with no mask is fully free. Coordinates are in metres.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Joint {
    pub id: i64,
    pub x: f64,
    pub y: f64,
    pub z: f64,
    #[serde(default)]
    pub restraint: Option<RestraintMask>,
}

impl Joint {
    pub fn new(id: i64, x: f64, y: f64, z: f64) -> Self {
        Self {
            id,
            x,
            y,
            z,
            restraint: None,
        }
    }

    pub fn fixed(id: i64, x: f64, y: f64, z: f64) -> Self {
        Self {
            id,
            x,
            y,
            z,
            restraint: Some([true; 6]),
        }
    }

    pub fn pinned(id: i64, x: f64, y: f64, z: f64) -> Self {
        Self {
            id,
            x,
            y,
            z,
            restraint: Some([true, true, true, false, false, false]),
        }
    }

    pub fn coords(&self) -> [f64; 3] {
        [self.x, self.y, self.z]
    }

    pub fn distance_to(&self, other: &Joint) -> f64 {
        let dx = other.x - self.x;
        let dy = other.y - self.y;
        let dz = other.z - self.z;
        (dx * dx + dy * dy + dz * dz).sqrt()
    }

    /// Whether the given local DOF index (0..6) is restrained.
    pub fn is_restrained(&self, dof: usize) -> bool {
        self.restraint.map(|m| m[dof]).unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unrestrained_by_default() {
        let j = Joint::new(1, 0.0, 0.0, 0.0);
        for dof in 0..6 {
            assert!(!j.is_restrained(dof));
        }
    }

    #[test]
    fn pinned_frees_rotations_only() {
        let j = Joint::pinned(1, 0.0, 0.0, 0.0);
        assert!(j.is_restrained(0));
        assert!(!j.is_restrained(3));
    }

    #[test]
    fn distance_matches_pythagoras() {
        let a = Joint::new(1, 0.0, 0.0, 0.0);
        let b = Joint::new(2, 3.0, 4.0, 0.0);
        assert!((a.distance_to(&b) - 5.0).abs() < 1e-10);
    }
}
