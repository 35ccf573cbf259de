//! Material properties.

use serde::{Deserialize, Serialize};

/// Isotropic linear-elastic material.
///
/// Wire units are MPa for both moduli and kg/m³ for density; the
/// element library converts to SI (Pa) at the point of use.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Material {
    pub id: String,
    /// Elastic modulus, MPa.
    pub e: f64,
    /// Shear modulus, MPa.
    pub g: f64,
    /// Poisson's ratio.
    pub nu: f64,
    /// Mass density, kg/m³.
    pub rho: f64,
}

impl Material {
    pub fn new(id: impl Into<String>, e: f64, g: f64, nu: f64, rho: f64) -> Self {
        Self {
            id: id.into(),
            e,
            g,
            nu,
            rho,
        }
    }

    pub fn is_valid(&self) -> bool {
        self.e > 0.0 && self.g > 0.0 && self.nu >= 0.0 && self.nu < 0.5
    }

    /// Elastic modulus in pascals.
    pub fn e_pa(&self) -> f64 {
        self.e * 1.0e6
    }

    /// Shear modulus in pascals.
    pub fn g_pa(&self) -> f64 {
        self.g * 1.0e6
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn converts_mpa_to_pa() {
        let steel = Material::new("steel", 200_000.0, 80_000.0, 0.3, 7850.0);
        assert!((steel.e_pa() - 200e9).abs() < 1.0);
        assert!((steel.g_pa() - 80e9).abs() < 1.0);
    }

    #[test]
    fn rejects_invalid_poisson_ratio() {
        let bad = Material::new("bad", 200_000.0, 80_000.0, 0.5, 7850.0);
        assert!(!bad.is_valid());
    }
}
