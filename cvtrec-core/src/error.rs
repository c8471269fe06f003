//! Error types for cvtrec-core.

use thiserror::Error;

/// Result type alias for cross reconstruction.
pub type Result<T> = std::result::Result<T, Error>;

/// Core error types.
///
/// All variants except [`Error::Geometry`] are precondition violations: they
/// abort the processing of one cross and leave the rest of the event intact.
#[derive(Error, Debug)]
pub enum Error {
    /// The cross has no clusters attached yet.
    #[error("cross {cross}: clusters not attached")]
    ClustersNotAttached { cross: u32 },

    /// The cross point has not been computed yet.
    #[error("cross {cross}: point not computed")]
    PointNotComputed { cross: u32 },

    /// A cluster was attached in the wrong role.
    #[error("cluster {cluster} is a {found} measurement, expected {expected}")]
    WrongMeasurement {
        cluster: u32,
        expected: &'static str,
        found: &'static str,
    },

    /// A cluster does not belong to the cross's sector and region.
    #[error(
        "cluster {cluster} (sector {cluster_sector}, region {cluster_region}) \
         does not match cross (sector {sector}, region {region})"
    )]
    ClusterMismatch {
        cluster: u32,
        cluster_sector: usize,
        cluster_region: usize,
        sector: usize,
        region: usize,
    },

    /// Cluster index outside the event's cluster list.
    #[error("unknown cluster index: {0}")]
    UnknownCluster(usize),

    /// Cross index outside the event's cross list.
    #[error("unknown cross index: {0}")]
    UnknownCross(usize),

    /// Geometry lookup error.
    #[error("geometry error: {0}")]
    Geometry(#[from] cvtrec_geometry::Error),
}
