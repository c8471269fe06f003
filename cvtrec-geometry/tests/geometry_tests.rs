#![allow(clippy::float_cmp, clippy::cast_precision_loss)]
use cvtrec_geometry::constants::{MODULE_LENGTH, NLAYR};
use cvtrec_geometry::{
    Geometry, GeometryConfig, GeometryLoader, ModuleFootprint, ModuleFrame, Point3,
    FACES_PER_MODULE,
};
use std::sync::{Arc, Barrier};
use std::thread;

fn assert_same_layout(a: &Geometry, b: &Geometry) {
    assert_eq!(a.sectors_per_layer(), b.sectors_per_layer());
    assert_eq!(a.cross_radii(), b.cross_radii());
    assert_eq!(a.face_count(), b.face_count());
    for layer in 1..=NLAYR {
        for sector in 1..=a.sectors(layer).unwrap() {
            assert_eq!(
                a.module_radius(layer, sector).unwrap(),
                b.module_radius(layer, sector).unwrap()
            );
            assert_eq!(
                a.module_surface(layer, sector).unwrap(),
                b.module_surface(layer, sector).unwrap()
            );
        }
    }
}

#[test]
fn test_concurrent_load_builds_once() {
    const CALLERS: usize = 16;
    let loader = Arc::new(GeometryLoader::new());
    let barrier = Arc::new(Barrier::new(CALLERS));
    let config = GeometryConfig::default();

    let handles: Vec<_> = (0..CALLERS)
        .map(|_| {
            let loader = Arc::clone(&loader);
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                barrier.wait();
                loader.load(&config)
            })
        })
        .collect();

    let results: Vec<Arc<Geometry>> = handles.into_iter().map(|h| h.join().unwrap()).collect();

    assert_eq!(loader.builds(), 1);
    assert!(loader.is_loaded());
    for geometry in &results {
        assert!(Arc::ptr_eq(geometry, &results[0]));
    }

    let reference = Geometry::new(&config);
    assert_same_layout(&results[0], &reference);
}

#[test]
fn test_every_module_has_ten_coplanar_faces() {
    let geometry = Geometry::new(&GeometryConfig::default());

    for surface in geometry.surfaces() {
        assert_eq!(surface.len(), FACES_PER_MODULE);
        assert_eq!(surface.len(), 10);

        // The module plane contains the beam direction and the transverse edge
        let first = surface.faces[0].vertices;
        let edge = first[1] - first[0];
        let normal = edge.cross(&cvtrec_geometry::Vector3::Z);
        let scale = normal.norm();
        assert!(scale > 0.0);

        for (i, face) in surface.faces.iter().enumerate() {
            // z interval of this face pair
            let interval = i / 2;
            let z_near = surface.faces[2 * interval].vertices[0].z;
            let z_far = surface.faces[2 * interval].vertices[2].z;
            assert!(z_far > z_near);

            for vertex in face.vertices {
                let distance = (vertex - first[0]).dot(&normal) / scale;
                assert!(
                    distance.abs() < 1e-9,
                    "layer {} sector {} face {i}: vertex off plane by {distance}",
                    surface.layer,
                    surface.sector
                );
                assert!(vertex.z >= z_near - 1e-9 && vertex.z <= z_far + 1e-9);
            }
            assert!(face.area() > 0.0);
        }
    }
}

#[test]
fn test_consecutive_intervals_share_boundaries() {
    let geometry = Geometry::new(&GeometryConfig::new().with_simulation(true));
    let surface = geometry.module_surface(5, 7).unwrap();
    for interval in 1..5 {
        let previous_far = surface.faces[2 * (interval - 1)].vertices[2].z;
        let near = surface.faces[2 * interval].vertices[0].z;
        assert_eq!(previous_far, near);
    }
}

#[test]
fn test_radial_line_hits_its_module() {
    let geometry = Geometry::new(&GeometryConfig::default());
    for layer in 1..=NLAYR {
        for sector in 1..=geometry.sectors(layer).unwrap() {
            let phi = geometry.module_phi(layer, sector).unwrap();
            let radius = geometry.module_radius(layer, sector).unwrap();
            let z = geometry.z0(layer).unwrap() + 10.0;
            let start = Point3::new(0.0, 0.0, z);
            let end = Point3::new(2.0 * radius * phi.cos(), 2.0 * radius * phi.sin(), z);

            let hit = geometry
                .module_surface(layer, sector)
                .unwrap()
                .intersect_segment(start, end)
                .expect("radial line crosses the module centre");
            assert!((hit.rho() - radius).abs() < 1e-6);
        }
    }
}

#[test]
fn test_mesh_topology_independent_of_config() {
    let hardware = Geometry::new(&GeometryConfig::default());
    let cosmics = Geometry::new(&GeometryConfig::new().with_simulation(true).with_cosmics(true));
    assert_eq!(hardware.face_count(), cosmics.face_count());
    assert_eq!(hardware.sectors_per_layer(), cosmics.sectors_per_layer());
    assert_eq!(hardware.cross_radii(), cosmics.cross_radii());
    assert_eq!(cosmics.solenoid_scale(), 0.0);
    assert_eq!(hardware.solenoid_scale(), 1.0);
}

struct OffsetFootprint;

impl ModuleFootprint for OffsetFootprint {
    fn corners(&self, frame: &ModuleFrame) -> (Point3, Point3) {
        let x = frame.radius;
        let y = frame.sector as f64;
        (
            Point3::new(x, y, frame.z0),
            Point3::new(x, y + 1.0, frame.z0 + MODULE_LENGTH),
        )
    }
}

#[test]
fn test_injected_footprint() {
    let geometry = Geometry::with_footprint(&GeometryConfig::default(), &OffsetFootprint);
    let surface = geometry.module_surface(2, 3).unwrap();
    let radius = geometry.module_radius(2, 3).unwrap();
    for face in &surface.faces {
        for vertex in face.vertices {
            assert_eq!(vertex.x, radius);
            assert!(vertex.y == 3.0 || vertex.y == 4.0);
        }
    }
    assert_eq!(surface.faces[0].vertices[0].z, geometry.z0(2).unwrap());
}
