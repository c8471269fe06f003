//! Fixed detector dimensions, survey values and reconstruction constants.
//!
//! All lengths are in millimetres and angles in radians unless noted.
#![allow(clippy::unreadable_literal)]

use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

/// Number of detection layers.
pub const NLAYR: usize = 8;
/// Number of layers per region (stereo pair).
pub const NSLAYR: usize = 2;
/// Number of regions.
pub const NREG: usize = NLAYR / NSLAYR;
/// Strips per sensor.
pub const NSTRIP: usize = 256;
/// Largest sector count of any layer.
pub const MAXNUMSECT: usize = 24;

/// Sector count per region; both layers of a region share it.
pub const SECTORS_PER_REGION: [usize; NREG] = [10, 14, 18, 24];

/// Strip pitch.
pub const PITCH: f64 = 0.156;
/// Stereo angle between the two layers of a region (3°).
pub const STEREO_ANGLE: f64 = 3.0 * PI / 180.0;
/// Silicon sensor thickness.
pub const SILICON_WIDTH: f64 = 0.320;
/// Transverse width of the active sensor area.
pub const ACTIVE_SENSOR_WIDTH: f64 = 40.052;
/// Radial gap between the two layers of a region.
pub const LAYER_GAP: f64 = 3.547;
/// Longitudinal length of the active area of one sensor.
pub const ACTIVE_SENSOR_LENGTH: f64 = 109.955;
/// Total longitudinal length of one sensor.
pub const TOTAL_SENSOR_LENGTH: f64 = 111.625;
/// Gap between neighbouring sensors of a module.
pub const MICROGAP: f64 = 0.112;
/// Inactive length between the active areas of neighbouring sensors.
pub const DEAD_ZONE_LENGTH: f64 = TOTAL_SENSOR_LENGTH - ACTIVE_SENSOR_LENGTH;
/// Three sensors with their inter-sensor dead zones and gaps.
pub const MODULE_LENGTH: f64 =
    3.0 * ACTIVE_SENSOR_LENGTH + 2.0 * DEAD_ZONE_LENGTH + 2.0 * MICROGAP;
/// Rotation of the module local z axis (90°).
pub const LOCAL_Z_AXIS_ROTATION: f64 = PI / 2.0;
/// Fraction of the sensor thickness between the survey plane and the module reference.
pub const MODULE_POSITION_FACTOR: f64 = 0.5;

/// Surveyed module plane radius per layer, before the thickness correction.
pub const SURVEY_RADIUS: [f64; NLAYR] = [
    65.285, 68.832, 92.945, 96.492, 120.365, 123.912, 161.275, 164.822,
];

/// Surveyed upstream edge of the modules per region.
pub const SURVEY_Z: [f64; NREG] = [-219.856, -180.490, -141.530, -83.406];

/// Returns the sector count of a 1-based layer, or `None` for an unknown layer.
#[inline]
#[must_use]
pub fn sectors_in_layer(layer: usize) -> Option<usize> {
    region_of_layer(layer).map(|region| SECTORS_PER_REGION[region - 1])
}

/// Returns the 1-based region of a 1-based layer.
#[inline]
#[must_use]
pub fn region_of_layer(layer: usize) -> Option<usize> {
    (1..=NLAYR).contains(&layer).then(|| (layer + 1) / NSLAYR)
}

/// True for the inner (odd) layer of a stereo pair.
#[inline]
#[must_use]
pub fn is_inner_layer(layer: usize) -> bool {
    layer % 2 == 1
}

/// Constants consumed by the downstream pattern recognition and fit.
///
/// Values are the defaults used in production; they are carried here so the
/// whole reconstruction reads them from one place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReconstructionConstants {
    /// Transverse beam-spot constraint.
    pub rho_vertex_constraint: f64,
    /// Longitudinal beam-spot constraint.
    pub z_vertex_constraint: f64,
    /// Speed of light in mm/ns, converting radius to momentum in GeV/c.
    pub light_velocity: f64,
    /// Minimum radius of curvature for helical candidates.
    pub min_radius_of_curvature: f64,
    /// Minimum deposited energy per strip (GeV).
    pub min_edep: f64,
    /// Strip intersection tolerance.
    pub intersection_tolerance: f64,
    /// Minimum sum of strip numbers for a valid strip intersection.
    pub strip_sum_min: u32,
    /// Maximum sum of strip numbers for a valid strip intersection.
    pub strip_sum_max: u32,
    /// Azimuthal window between region 1 and regions 2..4 crosses (degrees).
    pub phi_cuts_deg: [f64; 3],
    /// Radius cut for candidate selection.
    pub radius_cut: f64,
    /// dr/dz cut for candidate selection.
    pub drdz_cut: f64,
    /// Maximum chi2 of the circle fit.
    pub circle_fit_max_chi2: f64,
    /// Number of iterations of the track fit.
    pub fit_iterations: usize,
    /// Maximum crosses per event.
    pub max_crosses: usize,
    /// Maximum crosses per module.
    pub max_crosses_in_module: usize,
    /// Maximum number of track candidates.
    pub max_candidates: usize,
    /// Minimum residual for cosmic tracks.
    pub cosmics_min_residual: f64,
    /// Minimum longitudinal residual for cosmic tracks.
    pub cosmics_min_residual_z: f64,
    /// Trajectory to module fiducial edge tolerance.
    pub module_edge_tolerance: f64,
    /// Maximum transverse distance between trajectory and cross.
    pub max_dist_to_traj_xy: f64,
    /// Inner radius of the central time-of-flight detector.
    pub ctof_inner_radius: f64,
    /// Particle identification cutoff.
    pub pid_cutoff: f64,
    /// Tolerated radial misalignment (mm).
    pub radial_misalignment_tolerance: f64,
    /// ADC resolution in bits.
    pub adc_bits: u32,
}

impl Default for ReconstructionConstants {
    fn default() -> Self {
        Self {
            rho_vertex_constraint: 0.1,
            z_vertex_constraint: 0.5,
            light_velocity: 0.000299792458,
            min_radius_of_curvature: 200.0,
            min_edep: 0.020,
            intersection_tolerance: 10.0,
            strip_sum_min: 70,
            strip_sum_max: 350,
            phi_cuts_deg: [35.0, 35.0, 35.0],
            radius_cut: 100.0,
            drdz_cut: 150.0,
            circle_fit_max_chi2: 600.0,
            fit_iterations: 4,
            max_crosses: 50,
            max_crosses_in_module: 25,
            max_candidates: 200,
            cosmics_min_residual: 2.0,
            cosmics_min_residual_z: 20.0,
            module_edge_tolerance: 1.0,
            max_dist_to_traj_xy: 5.0,
            ctof_inner_radius: 250.0,
            pid_cutoff: 2.6,
            radial_misalignment_tolerance: 0.750,
            adc_bits: 3,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_layer_to_region() {
        assert_eq!(region_of_layer(1), Some(1));
        assert_eq!(region_of_layer(2), Some(1));
        assert_eq!(region_of_layer(7), Some(4));
        assert_eq!(region_of_layer(8), Some(4));
        assert_eq!(region_of_layer(0), None);
        assert_eq!(region_of_layer(9), None);
    }

    #[test]
    fn test_sector_counts_shared_by_pairs() {
        let counts: Vec<_> = (1..=NLAYR).filter_map(sectors_in_layer).collect();
        assert_eq!(counts, vec![10, 10, 14, 14, 18, 18, 24, 24]);
        assert_eq!(counts.iter().max(), Some(&MAXNUMSECT));
    }

    #[test]
    fn test_module_length() {
        assert_relative_eq!(DEAD_ZONE_LENGTH, 1.67, epsilon = 1e-9);
        assert_relative_eq!(
            MODULE_LENGTH,
            3.0 * 109.955 + 2.0 * 1.67 + 2.0 * 0.112,
            epsilon = 1e-9
        );
    }
}
