//! Per-event processing.
//!
//! An [`Event`] owns its clusters (and through them its hits) and the crosses
//! built from them. Events never share mutable state, so a batch of events is
//! processed in parallel without locking.

use crate::cluster::Cluster;
use crate::cross::Cross;
use crate::maker::find_crosses;
use crate::{Error, Result};
use cvtrec_geometry::Geometry;
use rayon::prelude::*;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Clusters and crosses of one triggered event.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Event {
    /// Event number.
    pub number: u64,
    /// Clusters of the event.
    #[cfg_attr(feature = "serde", serde(default))]
    pub clusters: Vec<Cluster>,
    /// Crosses built from the clusters, in azimuth order.
    #[cfg_attr(feature = "serde", serde(default))]
    pub crosses: Vec<Cross>,
}

impl Event {
    /// Creates an event from its clusters.
    #[must_use]
    pub fn new(number: u64, clusters: Vec<Cluster>) -> Self {
        Self {
            number,
            clusters,
            crosses: Vec::new(),
        }
    }

    /// Rebuilds the crosses of the event and returns how many were found.
    pub fn reconstruct_crosses(&mut self, geometry: &Geometry) -> usize {
        self.crosses = find_crosses(&self.clusters, geometry);
        self.crosses.len()
    }

    /// Looks up a cross by id.
    #[must_use]
    pub fn cross(&self, id: u32) -> Option<&Cross> {
        self.crosses.iter().find(|cross| cross.id() == id)
    }

    /// Assigns the cross at `index` to a track and propagates the association
    /// to its clusters and hits.
    ///
    /// # Errors
    ///
    /// Fails for an unknown cross index or a cross whose point is not computed.
    pub fn assign_track(&mut self, index: usize, track_id: u32) -> Result<()> {
        let cross = self
            .crosses
            .get_mut(index)
            .ok_or(Error::UnknownCross(index))?;
        cross.set_associated_track_id(Some(track_id));
        cross.propagate_association(&mut self.clusters)
    }

    /// Re-propagates the association of every cross.
    ///
    /// A cross that cannot propagate is skipped with a warning; the others
    /// are still propagated.
    ///
    /// # Errors
    ///
    /// Returns the first failure once every cross has been visited.
    pub fn propagate_associations(&mut self) -> Result<()> {
        let mut first_error = None;
        for cross in &self.crosses {
            if let Err(e) = cross.propagate_association(&mut self.clusters) {
                log::warn!(
                    "event {}: skipping association of cross {}: {e}",
                    self.number,
                    cross.id()
                );
                first_error.get_or_insert(e);
            }
        }
        first_error.map_or(Ok(()), Err)
    }
}

/// Builds crosses for every event in parallel; returns the total cross count.
pub fn process_events(events: &mut [Event], geometry: &Geometry) -> usize {
    events
        .par_iter_mut()
        .map(|event| event.reconstruct_crosses(geometry))
        .sum()
}
