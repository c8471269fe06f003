//! Strip hits and their association records.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Back-references written onto a hit once it is part of a cross.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct HitAssociation {
    /// Id of the cluster owning the hit.
    pub cluster_id: Option<u32>,
    /// Id of the cross built from that cluster.
    pub cross_id: Option<u32>,
    /// Id of the track the cross was assigned to.
    pub track_id: Option<u32>,
}

/// A single fired strip.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct StripHit {
    /// Hit id, unique within the event.
    pub id: u32,
    /// 1-based sector.
    pub sector: usize,
    /// 1-based layer.
    pub layer: usize,
    /// Strip number.
    pub strip: u32,
    /// Deposited energy (GeV).
    pub energy: f64,
    /// Association written by cross propagation.
    #[cfg_attr(feature = "serde", serde(default))]
    pub association: HitAssociation,
}

impl StripHit {
    /// Creates an unassociated hit.
    #[must_use]
    pub fn new(id: u32, sector: usize, layer: usize, strip: u32, energy: f64) -> Self {
        Self {
            id,
            sector,
            layer,
            strip,
            energy,
            association: HitAssociation::default(),
        }
    }

    /// True once the hit has been assigned to a track.
    #[inline]
    #[must_use]
    pub fn is_on_track(&self) -> bool {
        self.association.track_id.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_hit_is_unassociated() {
        let hit = StripHit::new(4, 2, 3, 128, 0.035);
        assert_eq!(hit.association, HitAssociation::default());
        assert!(!hit.is_on_track());
        assert_eq!(hit.strip, 128);
    }
}
