//! Triangulated module surfaces.
//!
//! Each module is a flat rectangle spanned by its two transverse corner lines
//! (parallel to the beam axis), cut longitudinally at the active/dead-zone
//! boundaries. Every interval contributes two triangles.

use crate::vector::{Point3, Vector3};
use serde::Serialize;

/// Tolerance used by the intersection tests.
const INTERSECTION_EPSILON: f64 = 1e-12;

/// A single triangular face.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Triangle {
    /// Vertices in winding order.
    pub vertices: [Point3; 3],
}

impl Triangle {
    /// Creates a triangle from three vertices.
    #[must_use]
    pub fn new(a: Point3, b: Point3, c: Point3) -> Self {
        Self {
            vertices: [a, b, c],
        }
    }

    /// Unnormalized face normal `(b - a) x (c - a)`.
    #[must_use]
    pub fn normal(&self) -> Vector3 {
        let [a, b, c] = self.vertices;
        (b - a).cross(&(c - a))
    }

    /// Face area.
    #[must_use]
    pub fn area(&self) -> f64 {
        0.5 * self.normal().norm()
    }

    /// Intersects the ray `origin + t * direction` (t >= 0) with the face.
    ///
    /// Returns the ray parameter of the hit, if any. Rays parallel to the face
    /// never intersect.
    #[must_use]
    pub fn intersect_ray(&self, origin: Point3, direction: Vector3) -> Option<f64> {
        let [a, b, c] = self.vertices;
        let edge1 = b - a;
        let edge2 = c - a;
        let p = direction.cross(&edge2);
        let det = edge1.dot(&p);
        if det.abs() < INTERSECTION_EPSILON {
            return None;
        }
        let inv_det = 1.0 / det;
        let s = origin - a;
        let u = s.dot(&p) * inv_det;
        if !(0.0..=1.0).contains(&u) {
            return None;
        }
        let q = s.cross(&edge1);
        let v = direction.dot(&q) * inv_det;
        if v < 0.0 || u + v > 1.0 {
            return None;
        }
        let t = edge2.dot(&q) * inv_det;
        (t >= 0.0).then_some(t)
    }

    /// Intersects the segment `start..end` with the face.
    #[must_use]
    pub fn intersect_segment(&self, start: Point3, end: Point3) -> Option<Point3> {
        let direction = end - start;
        self.intersect_ray(start, direction)
            .filter(|&t| t <= 1.0)
            .map(|t| start + direction * t)
    }
}

/// Triangulated surface of one module.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ModuleSurface {
    /// 1-based layer.
    pub layer: usize,
    /// 1-based sector.
    pub sector: usize,
    /// Faces, two per longitudinal interval, ordered by increasing z.
    pub faces: Vec<Triangle>,
}

impl ModuleSurface {
    /// Builds the surface from the two transverse corner lines of the module
    /// and the increasing longitudinal boundaries.
    ///
    /// `origin` and `end` only contribute their x and y.
    #[must_use]
    pub fn from_corners(
        layer: usize,
        sector: usize,
        origin: Point3,
        end: Point3,
        z_boundaries: &[f64],
    ) -> Self {
        let mut faces = Vec::with_capacity(2 * z_boundaries.len().saturating_sub(1));
        for pair in z_boundaries.windows(2) {
            let (near, far) = (pair[0], pair[1]);
            let p1 = Point3::new(origin.x, origin.y, near);
            let p2 = Point3::new(end.x, end.y, near);
            let p3 = Point3::new(origin.x, origin.y, far);
            let p4 = Point3::new(end.x, end.y, far);

            faces.push(Triangle::new(p1, p2, p4));
            faces.push(Triangle::new(p1, p3, p4));
        }
        Self {
            layer,
            sector,
            faces,
        }
    }

    /// Number of faces.
    #[must_use]
    pub fn len(&self) -> usize {
        self.faces.len()
    }

    /// True if the surface has no faces.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.faces.is_empty()
    }

    /// Total area of the surface.
    #[must_use]
    pub fn area(&self) -> f64 {
        self.faces.iter().map(Triangle::area).sum()
    }

    /// Returns the intersection of the segment with the surface closest to
    /// `start`, if any.
    #[must_use]
    pub fn intersect_segment(&self, start: Point3, end: Point3) -> Option<Point3> {
        self.faces
            .iter()
            .filter_map(|face| face.intersect_segment(start, end))
            .min_by(|a, b| start.distance(a).total_cmp(&start.distance(b)))
    }
}
