//! Single-layer cluster measurements.
//!
//! Clusters are formed upstream from adjacent strip hits; here they are
//! consumed as one position measurement plus the hits they own.

use crate::hit::StripHit;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// The coordinate a cluster measures.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Measurement {
    /// Azimuth of the strip plane (rad).
    Azimuth { phi: f64, error: f64 },
    /// Longitudinal coordinate (mm).
    Longitudinal { z: f64, error: f64 },
}

impl Measurement {
    /// Kind name of [`Measurement::Azimuth`].
    pub const AZIMUTH: &'static str = "azimuth";
    /// Kind name of [`Measurement::Longitudinal`].
    pub const LONGITUDINAL: &'static str = "longitudinal";

    /// Human-readable kind, used in error messages.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Azimuth { .. } => Self::AZIMUTH,
            Self::Longitudinal { .. } => Self::LONGITUDINAL,
        }
    }
}

/// A cluster of strip hits in one layer of a region.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Cluster {
    /// Cluster id, unique within the event.
    pub id: u32,
    /// 1-based sector.
    pub sector: usize,
    /// 1-based region.
    pub region: usize,
    /// Position measurement.
    pub measurement: Measurement,
    /// Hits belonging to this cluster.
    #[cfg_attr(feature = "serde", serde(default))]
    pub hits: Vec<StripHit>,
    /// Id of the cross built from this cluster.
    #[cfg_attr(feature = "serde", serde(default))]
    pub associated_cross_id: Option<u32>,
    /// Id of the track the cross was assigned to.
    #[cfg_attr(feature = "serde", serde(default))]
    pub associated_track_id: Option<u32>,
}

impl Cluster {
    /// Creates an empty cluster.
    #[must_use]
    pub fn new(id: u32, sector: usize, region: usize, measurement: Measurement) -> Self {
        Self {
            id,
            sector,
            region,
            measurement,
            hits: Vec::new(),
            associated_cross_id: None,
            associated_track_id: None,
        }
    }

    /// Creates an azimuth-measuring cluster.
    #[must_use]
    pub fn azimuthal(id: u32, sector: usize, region: usize, phi: f64, error: f64) -> Self {
        Self::new(id, sector, region, Measurement::Azimuth { phi, error })
    }

    /// Creates a longitudinal-measuring cluster.
    #[must_use]
    pub fn longitudinal(id: u32, sector: usize, region: usize, z: f64, error: f64) -> Self {
        Self::new(id, sector, region, Measurement::Longitudinal { z, error })
    }

    /// Adds hits to the cluster.
    #[must_use]
    pub fn with_hits(mut self, hits: impl IntoIterator<Item = StripHit>) -> Self {
        self.hits.extend(hits);
        self
    }

    /// Adds a hit to the cluster.
    pub fn push(&mut self, hit: StripHit) {
        self.hits.push(hit);
    }

    /// Returns the number of hits in the cluster.
    #[must_use]
    pub fn len(&self) -> usize {
        self.hits.len()
    }

    /// Returns true if the cluster has no hits.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.hits.is_empty()
    }

    /// Returns an iterator over the hits.
    pub fn iter(&self) -> impl Iterator<Item = &StripHit> {
        self.hits.iter()
    }

    /// Azimuth and its error, for azimuth-measuring clusters.
    #[must_use]
    pub fn phi(&self) -> Option<(f64, f64)> {
        match self.measurement {
            Measurement::Azimuth { phi, error } => Some((phi, error)),
            Measurement::Longitudinal { .. } => None,
        }
    }

    /// Longitudinal coordinate and its error, for longitudinal-measuring clusters.
    #[must_use]
    pub fn z(&self) -> Option<(f64, f64)> {
        match self.measurement {
            Measurement::Longitudinal { z, error } => Some((z, error)),
            Measurement::Azimuth { .. } => None,
        }
    }

    /// Total deposited energy of the hits.
    #[must_use]
    pub fn total_energy(&self) -> f64 {
        self.hits.iter().map(|hit| hit.energy).sum()
    }
}
