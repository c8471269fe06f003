//! The static tracker geometry.
//!
//! A [`Geometry`] is built once from a [`GeometryConfig`] and never mutated
//! afterwards; share it behind an `Arc` with every consumer.
//!
//! Layer, sector and region indices are 1-based throughout, matching the
//! detector numbering.
#![allow(clippy::cast_precision_loss)]

use crate::config::GeometryConfig;
use crate::constants::{
    is_inner_layer, region_of_layer, ReconstructionConstants, ACTIVE_SENSOR_LENGTH,
    DEAD_ZONE_LENGTH, MODULE_POSITION_FACTOR, NLAYR, NREG, NSLAYR, SECTORS_PER_REGION,
    SILICON_WIDTH, SURVEY_RADIUS, SURVEY_Z,
};
use crate::footprint::{CylindricalFootprint, ModuleFootprint, ModuleFrame};
use crate::material::Material;
use crate::mesh::ModuleSurface;
use crate::{Error, Result};
use std::f64::consts::PI;

/// Number of longitudinal boundaries per module: 3 active spans and 2 dead zones.
pub const Z_BOUNDARIES: usize = 6;

/// Faces per module surface.
pub const FACES_PER_MODULE: usize = 2 * (Z_BOUNDARIES - 1);

/// Fixed detector layout and derived constants.
#[derive(Debug, Clone)]
pub struct Geometry {
    config: GeometryConfig,
    sectors_per_layer: [usize; NLAYR],
    z0: [f64; NLAYR],
    phi0: [f64; NLAYR],
    module_radius: Vec<Vec<f64>>,
    cross_radius: [f64; NREG],
    surfaces: Vec<Vec<ModuleSurface>>,
    solenoid_scale: f64,
    material: Material,
    reconstruction: ReconstructionConstants,
}

impl Geometry {
    /// Builds the geometry with the default cylindrical module footprint.
    #[must_use]
    pub fn new(config: &GeometryConfig) -> Self {
        Self::with_footprint(config, &CylindricalFootprint::default())
    }

    /// Builds the geometry, taking module corners from `footprint`.
    #[must_use]
    pub fn with_footprint(config: &GeometryConfig, footprint: &dyn ModuleFootprint) -> Self {
        let sectors_per_layer: [usize; NLAYR] =
            std::array::from_fn(|i| SECTORS_PER_REGION[i / NSLAYR]);

        // Centre the local frame on the active area of the first sensor
        let z0: [f64; NLAYR] =
            std::array::from_fn(|i| SURVEY_Z[i / NSLAYR] + 0.5 * DEAD_ZONE_LENGTH);

        // The installed tracker is rotated by 180 degrees in azimuth with
        // respect to the simulated one
        let rotation = if config.simulation { 0.0 } else { 180.0 };
        let phi0 = [(90.0_f64 + rotation).to_radians(); NLAYR];

        let module_radius: Vec<Vec<f64>> = (1..=NLAYR)
            .map(|layer| {
                let offset = MODULE_POSITION_FACTOR * SILICON_WIDTH;
                let radius = if is_inner_layer(layer) {
                    SURVEY_RADIUS[layer - 1] - offset
                } else {
                    SURVEY_RADIUS[layer - 1] + offset
                };
                vec![radius; sectors_per_layer[layer - 1]]
            })
            .collect();

        let cross_radius: [f64; NREG] = std::array::from_fn(|r| module_radius[r * NSLAYR][0]);

        let surfaces = (1..=NLAYR)
            .map(|layer| {
                let nsect = sectors_per_layer[layer - 1];
                (1..=nsect)
                    .map(|sector| {
                        let frame = ModuleFrame {
                            layer,
                            sector,
                            radius: module_radius[layer - 1][sector - 1],
                            phi: sector_phi(phi0[layer - 1], nsect, sector),
                            z0: z0[layer - 1],
                        };
                        let (origin, end) = footprint.corners(&frame);
                        ModuleSurface::from_corners(
                            layer,
                            sector,
                            origin,
                            end,
                            &z_boundaries(origin.z),
                        )
                    })
                    .collect()
            })
            .collect();

        let geometry = Self {
            config: *config,
            sectors_per_layer,
            z0,
            phi0,
            module_radius,
            cross_radius,
            surfaces,
            solenoid_scale: config.solenoid_scale(),
            material: Material::default(),
            reconstruction: ReconstructionConstants::default(),
        };

        log::info!(
            "geometry constants loaded: {} modules, cosmics: {}, simulation: {}",
            geometry.module_count(),
            config.cosmics,
            config.simulation
        );
        geometry
    }

    /// Configuration the geometry was built from.
    #[must_use]
    pub fn config(&self) -> &GeometryConfig {
        &self.config
    }

    /// Sector counts indexed by `layer - 1`.
    #[must_use]
    pub fn sectors_per_layer(&self) -> &[usize; NLAYR] {
        &self.sectors_per_layer
    }

    /// Number of sectors of a layer.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidLayer`] for an unknown layer.
    pub fn sectors(&self, layer: usize) -> Result<usize> {
        Ok(self.sectors_per_layer[layer_index(layer)?])
    }

    /// Longitudinal position of the layer's local frame.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidLayer`] for an unknown layer.
    pub fn z0(&self, layer: usize) -> Result<f64> {
        Ok(self.z0[layer_index(layer)?])
    }

    /// Azimuth of the first sector's mid plane.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidLayer`] for an unknown layer.
    pub fn phi0(&self, layer: usize) -> Result<f64> {
        Ok(self.phi0[layer_index(layer)?])
    }

    /// Azimuth of a module's mid plane.
    ///
    /// # Errors
    ///
    /// Returns an error for an unknown layer or sector.
    pub fn module_phi(&self, layer: usize, sector: usize) -> Result<f64> {
        let l = self.sector_index(layer, sector)?.0;
        Ok(sector_phi(self.phi0[l], self.sectors_per_layer[l], sector))
    }

    /// Distance of a module from the beam axis.
    ///
    /// # Errors
    ///
    /// Returns an error for an unknown layer or sector.
    pub fn module_radius(&self, layer: usize, sector: usize) -> Result<f64> {
        let (l, s) = self.sector_index(layer, sector)?;
        Ok(self.module_radius[l][s])
    }

    /// Radius at which crosses of a region are placed.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidRegion`] for an unknown region.
    pub fn cross_radius(&self, region: usize) -> Result<f64> {
        region
            .checked_sub(1)
            .and_then(|r| self.cross_radius.get(r))
            .copied()
            .ok_or(Error::InvalidRegion(region))
    }

    /// Per-region cross radius table, indexed by `region - 1`.
    #[must_use]
    pub fn cross_radii(&self) -> &[f64; NREG] {
        &self.cross_radius
    }

    /// Triangulated surface of one module.
    ///
    /// # Errors
    ///
    /// Returns an error for an unknown layer or sector.
    pub fn module_surface(&self, layer: usize, sector: usize) -> Result<&ModuleSurface> {
        let (l, s) = self.sector_index(layer, sector)?;
        Ok(&self.surfaces[l][s])
    }

    /// All module surfaces of a layer, ordered by sector.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidLayer`] for an unknown layer.
    pub fn layer_surfaces(&self, layer: usize) -> Result<&[ModuleSurface]> {
        Ok(&self.surfaces[layer_index(layer)?])
    }

    /// Iterates over every module surface, layer by layer.
    pub fn surfaces(&self) -> impl Iterator<Item = &ModuleSurface> {
        self.surfaces.iter().flatten()
    }

    /// Total number of modules.
    #[must_use]
    pub fn module_count(&self) -> usize {
        self.sectors_per_layer.iter().sum()
    }

    /// Total number of faces over all module surfaces.
    #[must_use]
    pub fn face_count(&self) -> usize {
        self.surfaces().map(ModuleSurface::len).sum()
    }

    /// Solenoid field scale.
    #[must_use]
    pub fn solenoid_scale(&self) -> f64 {
        self.solenoid_scale
    }

    /// Material constants.
    #[must_use]
    pub fn material(&self) -> &Material {
        &self.material
    }

    /// Reconstruction constants.
    #[must_use]
    pub fn reconstruction(&self) -> &ReconstructionConstants {
        &self.reconstruction
    }

    fn sector_index(&self, layer: usize, sector: usize) -> Result<(usize, usize)> {
        let l = layer_index(layer)?;
        if sector == 0 || sector > self.sectors_per_layer[l] {
            return Err(Error::InvalidSector { layer, sector });
        }
        Ok((l, sector - 1))
    }
}

fn layer_index(layer: usize) -> Result<usize> {
    region_of_layer(layer)
        .map(|_| layer - 1)
        .ok_or(Error::InvalidLayer(layer))
}

fn sector_phi(phi0: f64, nsect: usize, sector: usize) -> f64 {
    phi0 + 2.0 * PI * (sector - 1) as f64 / nsect as f64
}

/// Longitudinal boundaries of the three active spans and two dead zones,
/// starting at the module origin.
fn z_boundaries(origin_z: f64) -> [f64; Z_BOUNDARIES] {
    [
        origin_z,
        origin_z + ACTIVE_SENSOR_LENGTH,
        origin_z + ACTIVE_SENSOR_LENGTH + DEAD_ZONE_LENGTH,
        origin_z + 2.0 * ACTIVE_SENSOR_LENGTH + DEAD_ZONE_LENGTH,
        origin_z + 2.0 * ACTIVE_SENSOR_LENGTH + 2.0 * DEAD_ZONE_LENGTH,
        origin_z + 3.0 * ACTIVE_SENSOR_LENGTH + 2.0 * DEAD_ZONE_LENGTH,
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_sector_counts() {
        let geometry = Geometry::new(&GeometryConfig::default());
        assert_eq!(geometry.sectors_per_layer(), &[10, 10, 14, 14, 18, 18, 24, 24]);
        assert_eq!(geometry.module_count(), 132);
        assert_eq!(geometry.face_count(), 132 * FACES_PER_MODULE);
    }

    #[test]
    fn test_radii_alternate_with_layer_parity() {
        let geometry = Geometry::new(&GeometryConfig::default());
        assert_relative_eq!(geometry.module_radius(1, 1).unwrap(), 65.285 - 0.16, epsilon = 1e-12);
        assert_relative_eq!(geometry.module_radius(2, 10).unwrap(), 68.832 + 0.16, epsilon = 1e-12);
        assert_relative_eq!(geometry.module_radius(7, 24).unwrap(), 161.275 - 0.16, epsilon = 1e-12);
        assert_relative_eq!(geometry.module_radius(8, 1).unwrap(), 164.822 + 0.16, epsilon = 1e-12);
    }

    #[test]
    fn test_cross_radius_is_inner_layer_radius() {
        let geometry = Geometry::new(&GeometryConfig::default());
        assert_relative_eq!(geometry.cross_radius(2).unwrap(), 92.785, epsilon = 1e-12);
        for region in 1..=NREG {
            assert_eq!(
                geometry.cross_radius(region).unwrap(),
                geometry.module_radius(2 * region - 1, 1).unwrap()
            );
        }
        assert!(matches!(geometry.cross_radius(0), Err(Error::InvalidRegion(0))));
        assert!(matches!(geometry.cross_radius(5), Err(Error::InvalidRegion(5))));
    }

    #[test]
    fn test_z0_centres_active_region() {
        let geometry = Geometry::new(&GeometryConfig::default());
        assert_relative_eq!(geometry.z0(1).unwrap(), -219.856 + 0.835, epsilon = 1e-9);
        assert_relative_eq!(geometry.z0(8).unwrap(), -83.406 + 0.835, epsilon = 1e-9);
    }

    #[test]
    fn test_phi0_rotation_convention() {
        let hardware = Geometry::new(&GeometryConfig::default());
        let simulation = Geometry::new(&GeometryConfig::new().with_simulation(true));
        for layer in 1..=NLAYR {
            assert_relative_eq!(simulation.phi0(layer).unwrap(), PI / 2.0, epsilon = 1e-12);
            assert_relative_eq!(hardware.phi0(layer).unwrap(), 3.0 * PI / 2.0, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_invalid_indices() {
        let geometry = Geometry::new(&GeometryConfig::default());
        assert!(matches!(geometry.sectors(0), Err(Error::InvalidLayer(0))));
        assert!(matches!(geometry.z0(9), Err(Error::InvalidLayer(9))));
        assert!(matches!(
            geometry.module_radius(1, 11),
            Err(Error::InvalidSector { layer: 1, sector: 11 })
        ));
        assert!(matches!(
            geometry.module_surface(3, 0),
            Err(Error::InvalidSector { layer: 3, sector: 0 })
        ));
    }

    #[test]
    fn test_z_boundaries_increasing() {
        let z = z_boundaries(-100.0);
        assert!(z.windows(2).all(|w| w[1] > w[0]));
        assert_relative_eq!(z[5] - z[0], 3.0 * ACTIVE_SENSOR_LENGTH + 2.0 * DEAD_ZONE_LENGTH);
    }
}
