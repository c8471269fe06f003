//! Material budget of the tracker, used by multiple-scattering and dE/dx code.

use crate::constants::SILICON_WIDTH;

/// Radiation length of silicon (mm).
pub const SILICON_RADIATION_LENGTH: f64 = 93.6;
/// Carbon-fibre backing thickness (mm).
pub const CARBON_THICKNESS: f64 = 0.5;
/// Rohacell foam thickness (mm).
pub const ROHACELL_THICKNESS: f64 = 2.5;
/// Empirical scale of the Z/A x thickness product, tuned on simulation.
pub const MATERIAL_SCALE: f64 = 0.97;

/// Exponent of the power-law effective-Z composite.
const ZEFF_EXPONENT: f64 = 2.94;

/// Rohacell composition as (mass fraction, Z).
const ROHACELL: [(f64, f64); 4] = [(0.0784, 1.0), (0.645, 6.0), (0.0838, 7.0), (0.1912, 8.0)];

/// Effective atomic number of a compound, `(Σ wᵢ Zᵢ^p)^(1/p)` with p = 2.94.
#[must_use]
pub fn effective_z(composition: &[(f64, f64)]) -> f64 {
    composition
        .iter()
        .map(|&(fraction, z)| fraction * z.powf(ZEFF_EXPONENT))
        .sum::<f64>()
        .powf(1.0 / ZEFF_EXPONENT)
}

/// Effective atomic number of Rohacell.
#[must_use]
pub fn rohacell_effective_z() -> f64 {
    effective_z(&ROHACELL)
}

/// Σ Z/A x thickness of one module traversal: two silicon layers and the
/// carbon backing. The Rohacell term carries zero weight in the tuned model.
#[must_use]
pub fn z_over_a_times_thickness() -> f64 {
    let silicon = 14.0 * 2.0 * SILICON_WIDTH / 28.0855;
    let rohacell = 0.0 * (rohacell_effective_z() * ROHACELL_THICKNESS / 12.0588);
    let carbon = 6.0 * CARBON_THICKNESS / 12.0107;
    MATERIAL_SCALE * (silicon + rohacell + carbon)
}

/// Detector material constants, evaluated once with the geometry.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize)]
pub struct Material {
    /// Silicon radiation length (mm).
    pub silicon_radiation_length: f64,
    /// Effective Z of the Rohacell support.
    pub rohacell_effective_z: f64,
    /// Σ Z/A x thickness per module.
    pub z_over_a_times_thickness: f64,
}

impl Default for Material {
    fn default() -> Self {
        Self {
            silicon_radiation_length: SILICON_RADIATION_LENGTH,
            rohacell_effective_z: rohacell_effective_z(),
            z_over_a_times_thickness: z_over_a_times_thickness(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_single_element_effective_z() {
        assert_relative_eq!(effective_z(&[(1.0, 14.0)]), 14.0, epsilon = 1e-12);
    }

    #[test]
    fn test_rohacell_between_carbon_and_oxygen() {
        let z = rohacell_effective_z();
        assert!(z > 6.0 && z < 8.0, "effective Z {z}");
    }

    #[test]
    fn test_z_over_a_product() {
        let expected = 0.97 * (14.0 * 0.64 / 28.0855 + 3.0 / 12.0107);
        assert_relative_eq!(z_over_a_times_thickness(), expected, epsilon = 1e-12);
    }
}
