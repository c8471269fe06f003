//! Planar footprint of a module: where its two transverse edges sit in the
//! lab frame.

use crate::constants::{ACTIVE_SENSOR_WIDTH, MODULE_LENGTH};
use crate::vector::Point3;

/// Placement of one module in its layer, as seen by a footprint provider.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ModuleFrame {
    /// 1-based layer.
    pub layer: usize,
    /// 1-based sector.
    pub sector: usize,
    /// Distance of the module plane from the beam axis.
    pub radius: f64,
    /// Azimuth of the module plane normal.
    pub phi: f64,
    /// Upstream z of the module local frame.
    pub z0: f64,
}

/// Provides the corner points of a module's planar footprint.
///
/// `corners` returns `(origin, end)`: the origin corner carries the upstream z
/// of the module, the end corner the downstream z. The two x-y positions are
/// the transverse edges of the module plane.
pub trait ModuleFootprint: Send + Sync {
    /// Returns the origin and end corners of the module.
    fn corners(&self, frame: &ModuleFrame) -> (Point3, Point3);
}

/// Flat modules tangent to a cylinder, centred on the module azimuth.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CylindricalFootprint {
    /// Full transverse width of the module.
    pub width: f64,
    /// Longitudinal length of the module.
    pub length: f64,
}

impl Default for CylindricalFootprint {
    fn default() -> Self {
        Self {
            width: ACTIVE_SENSOR_WIDTH,
            length: MODULE_LENGTH,
        }
    }
}

impl ModuleFootprint for CylindricalFootprint {
    fn corners(&self, frame: &ModuleFrame) -> (Point3, Point3) {
        let (sin, cos) = frame.phi.sin_cos();
        let half = 0.5 * self.width;
        let (xc, yc) = (frame.radius * cos, frame.radius * sin);

        let origin = Point3::new(xc + half * sin, yc - half * cos, frame.z0);
        let end = Point3::new(xc - half * sin, yc + half * cos, frame.z0 + self.length);
        (origin, end)
    }
}
