#![allow(clippy::float_cmp, clippy::cast_precision_loss)]
use cvtrec_core::{
    is_azimuth_sorted, process_events, sort_by_azimuth, Cluster, Cross, CrossState, Error, Event,
    StripHit,
};
use cvtrec_geometry::{Geometry, GeometryConfig};
use std::cmp::Ordering;

fn geometry() -> Geometry {
    Geometry::new(&GeometryConfig::default())
}

fn built_cross(geometry: &Geometry, id: u32, sector: usize, region: usize, phi: f64) -> Cross {
    let clusters = [
        Cluster::azimuthal(1, sector, region, phi, 0.01),
        Cluster::longitudinal(2, sector, region, 5.0, 0.1),
    ];
    let mut cross = Cross::new(sector, region, id);
    cross.attach_clusters(&clusters, 0, 1).unwrap();
    cross.compute_point(&clusters, geometry).unwrap();
    cross
}

#[test]
fn test_region2_point_matches_cylinder() {
    let geometry = geometry();
    let phi = 30.0_f64.to_radians();
    let clusters = vec![
        Cluster::azimuthal(1, 4, 2, phi, 0.01),
        Cluster::longitudinal(2, 4, 2, 50.0, 0.2),
    ];

    let mut cross = Cross::new(4, 2, 1);
    cross.attach_clusters(&clusters, 0, 1).unwrap();
    let point = cross.compute_point(&clusters, &geometry).unwrap();

    let r = geometry.cross_radius(2).unwrap();
    assert_eq!(point.x, r * phi.cos());
    assert_eq!(point.y, r * phi.sin());
    assert_eq!(point.z, 50.0);

    let error = cross.point_error().unwrap();
    assert_eq!(error.x, -r * phi.sin() * 0.01);
    assert_eq!(error.y, r * phi.cos() * 0.01);
    assert_eq!(error.z, 0.2);
}

#[test]
fn test_association_reaches_every_hit() {
    let geometry = geometry();
    let mut clusters = vec![
        Cluster::azimuthal(10, 2, 1, 0.7, 0.01).with_hits([
            StripHit::new(1, 2, 1, 100, 0.02),
            StripHit::new(2, 2, 1, 101, 0.03),
        ]),
        Cluster::longitudinal(11, 2, 1, -30.0, 0.3).with_hits([
            StripHit::new(3, 2, 2, 55, 0.02),
            StripHit::new(4, 2, 2, 56, 0.01),
        ]),
    ];

    let mut cross = Cross::new(2, 1, 3);
    cross.attach_clusters(&clusters, 0, 1).unwrap();
    cross.compute_point(&clusters, &geometry).unwrap();
    cross.set_associated_track_id(Some(7));
    cross.propagate_association(&mut clusters).unwrap();

    let snapshot = clusters.clone();
    for cluster in &clusters {
        assert_eq!(cluster.associated_cross_id, Some(3));
        assert_eq!(cluster.associated_track_id, Some(7));
        for hit in &cluster.hits {
            assert_eq!(hit.association.cluster_id, Some(cluster.id));
            assert_eq!(hit.association.cross_id, Some(3));
            assert_eq!(hit.association.track_id, Some(7));
            assert!(hit.is_on_track());
        }
    }

    cross.propagate_association(&mut clusters).unwrap();
    assert_eq!(clusters, snapshot);
}

#[test]
fn test_unbuilt_cross_cannot_propagate() {
    let mut clusters = vec![Cluster::azimuthal(1, 1, 1, 0.1, 0.01)];
    let cross = Cross::new(1, 1, 4);
    assert!(matches!(
        cross.propagate_association(&mut clusters),
        Err(Error::ClustersNotAttached { cross: 4 })
    ));
    assert_eq!(cross.state(), CrossState::Created);
}

fn ordering_sample(geometry: &Geometry) -> Vec<Cross> {
    let base = 0.4_f64;
    let below = f64::from_bits(base.to_bits() - 1);
    let above = f64::from_bits(base.to_bits() + 1);

    vec![
        built_cross(geometry, 1, 1, 1, base),
        built_cross(geometry, 2, 1, 1, below),
        built_cross(geometry, 3, 1, 1, above),
        built_cross(geometry, 4, 2, 2, base),
        built_cross(geometry, 4, 1, 2, base),
        built_cross(geometry, 5, 3, 3, -2.5),
        built_cross(geometry, 6, 3, 4, 3.0),
        Cross::new(1, 1, 7),
        Cross::new(2, 1, 8),
    ]
}

#[test]
fn test_azimuth_order_is_total() {
    let geometry = geometry();
    let sample = ordering_sample(&geometry);

    for (i, a) in sample.iter().enumerate() {
        assert_eq!(a.azimuth_cmp(a), Ordering::Equal);
        for (j, b) in sample.iter().enumerate() {
            assert_eq!(a.azimuth_cmp(b), b.azimuth_cmp(a).reverse());
            if i != j {
                assert_ne!(a.azimuth_cmp(b), Ordering::Equal, "{a} vs {b}");
            }
            for c in &sample {
                if a.azimuth_cmp(b).is_le() && b.azimuth_cmp(c).is_le() {
                    assert!(a.azimuth_cmp(c).is_le(), "{a} / {b} / {c}");
                }
            }
        }
    }
}

#[test]
fn test_sort_is_reproducible() {
    let geometry = geometry();
    let identity = |crosses: &[Cross]| -> Vec<(u32, usize, usize)> {
        crosses
            .iter()
            .map(|c| (c.id(), c.region(), c.sector()))
            .collect()
    };

    let mut reference = ordering_sample(&geometry);
    sort_by_azimuth(&mut reference);
    assert!(is_azimuth_sorted(&reference));
    let expected = identity(&reference);

    sort_by_azimuth(&mut reference);
    assert_eq!(identity(&reference), expected);

    let mut reversed = ordering_sample(&geometry);
    reversed.reverse();
    sort_by_azimuth(&mut reversed);
    assert_eq!(identity(&reversed), expected);

    for shift in 1..reference.len() {
        let mut rotated = ordering_sample(&geometry);
        rotated.rotate_left(shift);
        sort_by_azimuth(&mut rotated);
        assert_eq!(identity(&rotated), expected);
    }

    // Crosses without a point come last
    let tail: Vec<_> = reference[reference.len() - 2..].iter().map(Cross::id).collect();
    assert_eq!(tail, vec![7, 8]);
}

#[test]
fn test_process_events_batch() {
    let geometry = geometry();
    let mut events: Vec<Event> = (0..32u64)
        .map(|n| {
            let sector = (n % 10) as usize + 1;
            let mut clusters = vec![
                Cluster::azimuthal(1, sector, 1, 0.1, 0.01),
                Cluster::azimuthal(2, sector, 1, 0.2, 0.01),
                Cluster::longitudinal(3, sector, 1, 1.0, 0.1),
            ];
            if n % 2 == 0 {
                clusters.push(Cluster::longitudinal(4, sector, 1, 2.0, 0.1));
            }
            Event::new(n, clusters)
        })
        .collect();

    let total = process_events(&mut events, &geometry);
    assert_eq!(total, 16 * 4 + 16 * 2);
    for event in &events {
        assert!(is_azimuth_sorted(&event.crosses));
        let mut ids: Vec<_> = event.crosses.iter().map(Cross::id).collect();
        ids.sort_unstable();
        assert_eq!(ids, (1..=event.crosses.len() as u32).collect::<Vec<_>>());
    }
}
