//! Crosses: 3-D space points built from two clusters of one region.
//!
//! A cross references its clusters by index into the event's cluster list, so
//! several candidate crosses can share a cluster while the event keeps sole
//! ownership of the cluster and hit records.
//!
//! Lifecycle: `Created -> ClustersAttached -> PointComputed`, after which the
//! track association may be set and propagated any number of times.

use crate::cluster::{Cluster, Measurement};
use crate::{Error, Result};
use cvtrec_geometry::{Geometry, Point3, Vector3};
use std::cmp::Ordering;
use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Indices of the two clusters forming a cross.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ClusterPair {
    /// Azimuth-measuring cluster.
    pub angle: usize,
    /// Longitudinal-measuring cluster; its region selects the cross radius.
    pub longitudinal: usize,
}

impl ClusterPair {
    /// Both indices, angle cluster first.
    #[must_use]
    pub fn indices(&self) -> [usize; 2] {
        [self.angle, self.longitudinal]
    }
}

/// Processing stage of a cross.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CrossState {
    /// Identity only.
    Created,
    /// Both clusters attached, point not yet computed.
    ClustersAttached,
    /// Point and point error available.
    PointComputed,
}

/// A reconstructed space point.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Cross {
    sector: usize,
    region: usize,
    id: u32,
    clusters: Option<ClusterPair>,
    point: Option<Point3>,
    point_error: Option<Vector3>,
    direction: Option<Vector3>,
    direction_error: Option<Vector3>,
    associated_track_id: Option<u32>,
}

impl Cross {
    /// Creates a cross with its identity only.
    #[must_use]
    pub fn new(sector: usize, region: usize, id: u32) -> Self {
        Self {
            sector,
            region,
            id,
            clusters: None,
            point: None,
            point_error: None,
            direction: None,
            direction_error: None,
            associated_track_id: None,
        }
    }

    /// 1-based sector.
    #[must_use]
    pub fn sector(&self) -> usize {
        self.sector
    }

    /// 1-based region.
    #[must_use]
    pub fn region(&self) -> usize {
        self.region
    }

    /// Cross id.
    #[must_use]
    pub fn id(&self) -> u32 {
        self.id
    }

    /// Renumbers the cross.
    pub fn set_id(&mut self, id: u32) {
        self.id = id;
    }

    /// Current stage of the cross.
    #[must_use]
    pub fn state(&self) -> CrossState {
        match (self.clusters, self.point) {
            (None, _) => CrossState::Created,
            (Some(_), None) => CrossState::ClustersAttached,
            (Some(_), Some(_)) => CrossState::PointComputed,
        }
    }

    /// Indices of the attached clusters.
    #[must_use]
    pub fn clusters(&self) -> Option<ClusterPair> {
        self.clusters
    }

    /// Attaches the azimuth-measuring and longitudinal-measuring clusters,
    /// given as indices into `clusters`.
    ///
    /// Any previously computed point is discarded.
    ///
    /// # Errors
    ///
    /// Fails if an index is out of range, a cluster measures the wrong
    /// coordinate, or a cluster lies in another sector or region.
    pub fn attach_clusters(
        &mut self,
        clusters: &[Cluster],
        angle: usize,
        longitudinal: usize,
    ) -> Result<()> {
        let angle_cluster = clusters.get(angle).ok_or(Error::UnknownCluster(angle))?;
        let z_cluster = clusters
            .get(longitudinal)
            .ok_or(Error::UnknownCluster(longitudinal))?;

        if !matches!(angle_cluster.measurement, Measurement::Azimuth { .. }) {
            return Err(wrong_measurement(angle_cluster, Measurement::AZIMUTH));
        }
        if !matches!(z_cluster.measurement, Measurement::Longitudinal { .. }) {
            return Err(wrong_measurement(z_cluster, Measurement::LONGITUDINAL));
        }
        for cluster in [angle_cluster, z_cluster] {
            self.check_identity(cluster)?;
        }

        self.clusters = Some(ClusterPair {
            angle,
            longitudinal,
        });
        self.point = None;
        self.point_error = None;
        Ok(())
    }

    fn check_identity(&self, cluster: &Cluster) -> Result<()> {
        if cluster.sector == self.sector && cluster.region == self.region {
            Ok(())
        } else {
            Err(Error::ClusterMismatch {
                cluster: cluster.id,
                cluster_sector: cluster.sector,
                cluster_region: cluster.region,
                sector: self.sector,
                region: self.region,
            })
        }
    }

    /// Computes the point and its per-axis error from the attached clusters.
    ///
    /// The point lies on the region's cross radius `R` at the measured azimuth:
    /// `x = R cos(phi)`, `y = R sin(phi)`. Errors are propagated to first order
    /// in phi with `R` exact; the z error is taken from the longitudinal cluster.
    ///
    /// # Errors
    ///
    /// Fails if no clusters are attached, the attached indices are not valid
    /// for `clusters` (out of range, wrong measurement kind, or another sector
    /// or region), or the region has no cross radius.
    pub fn compute_point(&mut self, clusters: &[Cluster], geometry: &Geometry) -> Result<Point3> {
        let pair = self
            .clusters
            .ok_or(Error::ClustersNotAttached { cross: self.id })?;
        let angle_cluster = clusters
            .get(pair.angle)
            .ok_or(Error::UnknownCluster(pair.angle))?;
        let z_cluster = clusters
            .get(pair.longitudinal)
            .ok_or(Error::UnknownCluster(pair.longitudinal))?;

        // The cluster list may have changed since attachment
        for cluster in [angle_cluster, z_cluster] {
            self.check_identity(cluster)?;
        }

        let (phi, phi_error) = angle_cluster
            .phi()
            .ok_or_else(|| wrong_measurement(angle_cluster, Measurement::AZIMUTH))?;
        let (z, z_error) = z_cluster
            .z()
            .ok_or_else(|| wrong_measurement(z_cluster, Measurement::LONGITUDINAL))?;
        let r = geometry.cross_radius(z_cluster.region)?;

        let (sin, cos) = phi.sin_cos();
        let point = Point3::new(r * cos, r * sin, z);
        let error = Vector3::new(-r * sin * phi_error, r * cos * phi_error, z_error);

        self.point = Some(point);
        self.point_error = Some(error);
        Ok(point)
    }

    /// The cross position, once computed.
    #[must_use]
    pub fn point(&self) -> Option<Point3> {
        self.point
    }

    /// Per-axis uncertainty of the position, once computed.
    #[must_use]
    pub fn point_error(&self) -> Option<Vector3> {
        self.point_error
    }

    /// Azimuth of the cross position, once computed.
    #[must_use]
    pub fn azimuth(&self) -> Option<f64> {
        self.point.map(|p| p.phi())
    }

    /// Unit direction set by the track fit.
    #[must_use]
    pub fn direction(&self) -> Option<Vector3> {
        self.direction
    }

    /// Direction uncertainty set by the track fit.
    #[must_use]
    pub fn direction_error(&self) -> Option<Vector3> {
        self.direction_error
    }

    /// Stores the fitted direction and its error.
    pub fn set_direction(&mut self, direction: Vector3, error: Vector3) {
        self.direction = Some(direction);
        self.direction_error = Some(error);
    }

    /// Forgets the fitted direction, e.g. before a refit.
    pub fn clear_direction(&mut self) {
        self.direction = None;
        self.direction_error = None;
    }

    /// Track the cross belongs to.
    #[must_use]
    pub fn associated_track_id(&self) -> Option<u32> {
        self.associated_track_id
    }

    /// Assigns the cross to a track, or clears the assignment.
    pub fn set_associated_track_id(&mut self, track_id: Option<u32>) {
        self.associated_track_id = track_id;
    }

    /// Writes the cross identity and track id onto both clusters and every hit
    /// they own. Calling it again with an unchanged track id changes nothing.
    ///
    /// # Errors
    ///
    /// Fails if the point has not been computed, or the attached indices are
    /// not valid for `clusters`.
    pub fn propagate_association(&self, clusters: &mut [Cluster]) -> Result<()> {
        let pair = self
            .clusters
            .ok_or(Error::ClustersNotAttached { cross: self.id })?;
        if self.point.is_none() {
            return Err(Error::PointNotComputed { cross: self.id });
        }
        if let Some(&bad) = pair.indices().iter().find(|&&i| i >= clusters.len()) {
            return Err(Error::UnknownCluster(bad));
        }

        for index in pair.indices() {
            let cluster = &mut clusters[index];
            cluster.associated_cross_id = Some(self.id);
            cluster.associated_track_id = self.associated_track_id;

            let cluster_id = cluster.id;
            for hit in &mut cluster.hits {
                hit.association.cluster_id = Some(cluster_id);
                hit.association.cross_id = Some(self.id);
                hit.association.track_id = self.associated_track_id;
            }
        }
        Ok(())
    }

    /// Azimuth ordering for candidate enumeration.
    ///
    /// Crosses sort by decreasing azimuth; crosses without a point sort last.
    /// Equal azimuths (`-0.0` and `+0.0` included) fall back to id, then
    /// region, then sector, so the order is total and reproducible regardless
    /// of the sort algorithm.
    #[must_use]
    pub fn azimuth_cmp(&self, other: &Self) -> Ordering {
        let by_azimuth = match (self.azimuth(), other.azimuth()) {
            // Adding +0.0 folds -0.0 into +0.0
            (Some(a), Some(b)) => (b + 0.0).total_cmp(&(a + 0.0)),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        };
        by_azimuth
            .then_with(|| self.id.cmp(&other.id))
            .then_with(|| self.region.cmp(&other.region))
            .then_with(|| self.sector.cmp(&other.sector))
    }
}

fn wrong_measurement(cluster: &Cluster, expected: &'static str) -> Error {
    Error::WrongMeasurement {
        cluster: cluster.id,
        expected,
        found: cluster.measurement.kind(),
    }
}

impl fmt::Display for Cross {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "cross: id {} track ", self.id)?;
        match self.associated_track_id {
            Some(track) => write!(f, "{track}")?,
            None => f.write_str("-")?,
        }
        write!(f, " sector {} region {} point ", self.sector, self.region)?;
        match self.point {
            Some(point) => write!(f, "{point}"),
            None => f.write_str("(unset)"),
        }
    }
}
