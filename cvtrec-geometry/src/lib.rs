//! cvtrec-geometry: static geometry of the central strip tracker.
//!
//! This crate provides the fixed detector layout (sector counts, module radii,
//! azimuthal and longitudinal placement), triangulated module surfaces for
//! trajectory intersection, and the numeric tables used downstream.
//!
//! # Key Components
//!
//! - [`Geometry`] - Immutable layout built once from a [`GeometryConfig`]
//! - [`GeometryLoader`] - Thread-safe build-once guard
//! - [`ModuleSurface`] - Triangle mesh of one module
//! - [`inverse_landau`] - Energy-loss straggling lookup
//!

pub mod constants;
mod config;
mod error;
pub mod footprint;
pub mod landau;
mod loader;
pub mod material;
pub mod mesh;
mod model;
mod vector;

pub use config::{FieldConfiguration, GeometryConfig};
pub use constants::ReconstructionConstants;
pub use error::{Error, Result};
pub use footprint::{CylindricalFootprint, ModuleFootprint, ModuleFrame};
pub use landau::inverse_landau;
pub use loader::{load, loaded, GeometryLoader};
pub use material::Material;
pub use mesh::{ModuleSurface, Triangle};
pub use model::{Geometry, FACES_PER_MODULE, Z_BOUNDARIES};
pub use vector::{Point3, Vector3};
