//! cvtrec-core: cross (space-point) reconstruction for the central tracker.
//!
//! This crate combines one azimuth-measuring and one longitudinal-measuring
//! cluster of a region into a 3-D point with propagated errors, keeps the
//! hit -> cluster -> cross -> track association chain, and defines the
//! azimuthal ordering used by pattern recognition.
//!

pub mod cluster;
pub mod cross;
mod error;
pub mod event;
pub mod hit;
pub mod maker;
pub mod ordering;

pub use cluster::{Cluster, Measurement};
pub use cross::{ClusterPair, Cross, CrossState};
pub use error::{Error, Result};
pub use event::{process_events, Event};
pub use hit::{HitAssociation, StripHit};
pub use maker::find_crosses;
pub use ordering::{is_azimuth_sorted, sort_by_azimuth};

// Re-export geometry types for convenience
pub use cvtrec_geometry::{Geometry, GeometryConfig, Point3, Vector3};
