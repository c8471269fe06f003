//! Cross finding: pairing clusters of the two layers of a region.

use crate::cluster::{Cluster, Measurement};
use crate::cross::Cross;
use crate::ordering::sort_by_azimuth;
use cvtrec_geometry::Geometry;

/// Builds every cross candidate of an event.
///
/// Each azimuth-measuring cluster is paired with each longitudinal-measuring
/// cluster of the same sector and region. Crosses are numbered from 1 in
/// pairing order, then returned sorted by azimuth. A candidate whose point
/// cannot be computed is dropped with a warning; the others are unaffected.
#[must_use]
pub fn find_crosses(clusters: &[Cluster], geometry: &Geometry) -> Vec<Cross> {
    let mut crosses = Vec::new();
    let mut next_id = 1u32;

    let indexed = |want_azimuth: bool| {
        clusters.iter().enumerate().filter(move |(_, c)| {
            matches!(c.measurement, Measurement::Azimuth { .. }) == want_azimuth
        })
    };

    for (angle_idx, angle) in indexed(true) {
        for (z_idx, longitudinal) in indexed(false) {
            if angle.sector != longitudinal.sector || angle.region != longitudinal.region {
                continue;
            }

            let mut cross = Cross::new(angle.sector, angle.region, next_id);
            let built = cross
                .attach_clusters(clusters, angle_idx, z_idx)
                .and_then(|()| cross.compute_point(clusters, geometry));
            match built {
                Ok(_) => {
                    crosses.push(cross);
                    next_id += 1;
                }
                Err(e) => log::warn!(
                    "dropping cross candidate from clusters {} and {}: {e}",
                    angle.id,
                    longitudinal.id
                ),
            }
        }
    }

    sort_by_azimuth(&mut crosses);
    crosses
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ordering::is_azimuth_sorted;
    use crate::CrossState;
    use cvtrec_geometry::GeometryConfig;

    #[test]
    fn test_pairs_within_sector_and_region() {
        let geometry = Geometry::new(&GeometryConfig::default());
        let clusters = vec![
            Cluster::azimuthal(1, 1, 1, 0.3, 0.01),
            Cluster::azimuthal(2, 1, 1, 0.4, 0.01),
            Cluster::longitudinal(3, 1, 1, 10.0, 0.2),
            // Other sector: no partner
            Cluster::longitudinal(4, 2, 1, 20.0, 0.2),
            // Other region: no partner
            Cluster::azimuthal(5, 1, 2, 0.5, 0.01),
        ];

        let crosses = find_crosses(&clusters, &geometry);
        assert_eq!(crosses.len(), 2);
        assert!(is_azimuth_sorted(&crosses));
        assert!(crosses.iter().all(|c| c.state() == CrossState::PointComputed));

        // Higher azimuth first
        assert_eq!(crosses[0].clusters().unwrap().angle, 1);
        assert_eq!(crosses[1].clusters().unwrap().angle, 0);
        assert_eq!(crosses[0].id(), 2);
    }

    #[test]
    fn test_invalid_region_is_dropped() {
        let geometry = Geometry::new(&GeometryConfig::default());
        let clusters = vec![
            Cluster::azimuthal(1, 1, 9, 0.3, 0.01),
            Cluster::longitudinal(2, 1, 9, 10.0, 0.2),
            Cluster::azimuthal(3, 1, 4, 0.3, 0.01),
            Cluster::longitudinal(4, 1, 4, 10.0, 0.2),
        ];

        let crosses = find_crosses(&clusters, &geometry);
        assert_eq!(crosses.len(), 1);
        assert_eq!(crosses[0].region(), 4);
        assert_eq!(crosses[0].id(), 1);
    }

    #[test]
    fn test_no_clusters() {
        let geometry = Geometry::new(&GeometryConfig::default());
        assert!(find_crosses(&[], &geometry).is_empty());
    }
}
