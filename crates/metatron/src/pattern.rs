//! Metatron's Cube geometry.
//!
//! A diagram is a center circle, an inner ring of six circles at one
//! diameter from the center, and an outer ring at two diameters. Every
//! ring is a complete graph on its six points, and each outer point is
//! tied to the two inner points at index offsets +2 and +4.
//!
//! Nothing here draws. The functions return explicit point and segment
//! collections so they can be checked without any surface.

use std::f64::consts::PI;
use crate::geometry::{Circle, Point, Segment};

/// Angular spacing between neighbouring ring points.
pub const RING_STEP: f64 = PI / 3.0;

/// Number of points in a ring.
pub const RING_SIZE: usize = 6;

/// Index offsets linking outer point `k` to the inner ring.
pub const CROSS_OFFSETS: [usize; 2] = [2, 4];

/// Six points at equal spacing around a shared center.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ring {
    /// Points in index order; point `i` sits at `rotation + i * 60°`.
    pub points: [Point; RING_SIZE],
}

impl Ring {
    /// All 15 pairs of the ring's complete graph.
    ///
    /// Pairs come out as (0,1), (0,2) ... (0,5), (1,2) ... (4,5).
    pub fn edges(&self) -> impl Iterator<Item = Segment> + '_ {
        (0..RING_SIZE).flat_map(move |i| {
            ((i + 1)..RING_SIZE).map(move |j| Segment::new(self.points[i], self.points[j]))
        })
    }

    /// Circles centered on each ring point.
    pub fn circles(&self, diameter: f64) -> impl Iterator<Item = Circle> + '_ {
        self.points.iter().map(move |p| Circle::new(*p, diameter))
    }
}

/// Everything needed to lay out one copy of the diagram.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PatternParameters {
    pub center: Point,
    /// Circle diameter, also the inner ring radius.
    pub diameter: f64,
    /// Rotation offset of ring point 0, in radians.
    pub rotation: f64,
    pub show_circles: bool,
}

impl PatternParameters {
    pub fn new(center: Point, diameter: f64, rotation: f64, show_circles: bool) -> Self {
        Self { center, diameter, rotation, show_circles }
    }
}

/// One fully computed copy of the diagram.
#[derive(Debug, Clone, PartialEq)]
pub struct Diagram {
    pub center_circle: Circle,
    pub inner: Ring,
    pub outer: Ring,
    /// The 12 outer-to-inner links, two per outer point.
    pub cross: Vec<Segment>,
    pub diameter: f64,
    pub show_circles: bool,
}

impl Diagram {
    /// Circles to draw: center, inner ring, outer ring.
    ///
    /// Empty when circles are switched off.
    pub fn circles(&self) -> Vec<Circle> {
        if !self.show_circles {
            return Vec::new();
        }
        std::iter::once(self.center_circle)
            .chain(self.inner.circles(self.diameter))
            .chain(self.outer.circles(self.diameter))
            .collect()
    }

    /// Every segment of the diagram: inner edges, outer edges, then cross links.
    pub fn segments(&self) -> Vec<Segment> {
        self.inner
            .edges()
            .chain(self.outer.edges())
            .chain(self.cross.iter().copied())
            .collect()
    }
}

/// Compute the six points of a ring.
///
/// Point `i` sits at `rotation_offset + i * 60°` and `distance` from `center`.
pub fn compute_ring(center: Point, distance: f64, rotation_offset: f64) -> Ring {
    let points = std::array::from_fn(|i| center.offset(distance, rotation_offset + i as f64 * RING_STEP));
    Ring { points }
}

/// Link each outer point to the inner points at offsets +2 and +4.
///
/// Yields 12 segments ordered by outer index, each segment running
/// from the outer point to the inner point.
pub fn cross_connect(inner: &Ring, outer: &Ring) -> Vec<Segment> {
    let mut segments = Vec::with_capacity(RING_SIZE * CROSS_OFFSETS.len());
    for k in 0..RING_SIZE {
        for offset in CROSS_OFFSETS {
            segments.push(Segment::new(outer.points[k], inner.points[(k + offset) % RING_SIZE]));
        }
    }
    segments
}

/// Compute one complete copy of the diagram.
///
/// Both rings share the same rotation, so outer point `k` lies on the ray
/// through inner point `k`. Degenerate diameters (zero or negative) still
/// produce a full set of circles and segments.
pub fn compute_diagram(params: &PatternParameters) -> Diagram {
    let inner = compute_ring(params.center, params.diameter, params.rotation);
    let outer = compute_ring(params.center, params.diameter * 2.0, params.rotation);
    let cross = cross_connect(&inner, &outer);

    Diagram {
        center_circle: Circle::new(params.center, params.diameter),
        inner,
        outer,
        cross,
        diameter: params.diameter,
        show_circles: params.show_circles,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    fn unordered_unique(segments: &[Segment]) -> usize {
        let mut unique: Vec<Segment> = Vec::new();
        for s in segments {
            if !unique.iter().any(|u| u.same_as(s, EPS)) {
                unique.push(*s);
            }
        }
        unique.len()
    }

    fn normalize(angle: f64) -> f64 {
        let two_pi = 2.0 * PI;
        ((angle % two_pi) + two_pi) % two_pi
    }

    #[test]
    fn ring_points_sit_on_radius() {
        for &(distance, rotation) in &[(100.0, 0.0), (37.5, 0.3), (1.0, -2.0), (250.0, PI / 6.0)] {
            let center = Point::new(12.0, -4.0);
            let ring = compute_ring(center, distance, rotation);
            assert_eq!(ring.points.len(), 6);
            for p in &ring.points {
                assert!((p.distance(center) - distance).abs() < EPS);
            }
        }
    }

    #[test]
    fn ring_points_are_sixty_degrees_apart() {
        let center = Point::new(0.0, 0.0);
        let ring = compute_ring(center, 100.0, 0.4);
        for i in 0..RING_SIZE {
            let a = ring.points[i].angle_from(center);
            let b = ring.points[(i + 1) % RING_SIZE].angle_from(center);
            let separation = normalize(b - a);
            assert!((separation - RING_STEP).abs() < EPS, "step {} was {}", i, separation);
        }
        assert!((normalize(ring.points[0].angle_from(center)) - 0.4).abs() < EPS);
    }

    #[test]
    fn ring_edges_form_complete_graph() {
        for &(distance, rotation) in &[(100.0, 0.0), (5.0, 1.0), (42.0, PI)] {
            let ring = compute_ring(Point::new(50.0, 50.0), distance, rotation);
            let edges: Vec<Segment> = ring.edges().collect();
            assert_eq!(edges.len(), 15);
            assert_eq!(unordered_unique(&edges), 15);
        }
    }

    #[test]
    fn cross_links_use_plus_two_and_plus_four() {
        let center = Point::new(0.0, 0.0);
        let params = PatternParameters::new(center, 100.0, 0.0, true);
        let diagram = compute_diagram(&params);
        assert_eq!(diagram.cross.len(), 12);

        for k in 0..RING_SIZE {
            let outer = diagram.outer.points[k];
            let linked: Vec<usize> = diagram
                .cross
                .iter()
                .filter(|s| s.a.approx_eq(outer, EPS))
                .map(|s| {
                    diagram
                        .inner
                        .points
                        .iter()
                        .position(|p| p.approx_eq(s.b, EPS))
                        .expect("cross segment should end on an inner point")
                })
                .collect();
            assert_eq!(linked, vec![(k + 2) % 6, (k + 4) % 6], "outer index {}", k);
        }
    }

    #[test]
    fn cross_links_match_concrete_coordinates() {
        // Rotation 0, distance 100: outer[0] = (200, 0), inner[2] at 120°, inner[4] at 240°
        let params = PatternParameters::new(Point::new(0.0, 0.0), 100.0, 0.0, true);
        let diagram = compute_diagram(&params);
        let half_root3 = 3.0_f64.sqrt() / 2.0;

        assert!(diagram.cross[0].a.approx_eq(Point::new(200.0, 0.0), EPS));
        assert!(diagram.cross[0].b.approx_eq(Point::new(-50.0, 100.0 * half_root3), EPS));
        assert!(diagram.cross[1].b.approx_eq(Point::new(-50.0, -100.0 * half_root3), EPS));
    }

    #[test]
    fn rings_are_aligned() {
        let center = Point::new(3.0, 3.0);
        let diagram = compute_diagram(&PatternParameters::new(center, 20.0, 0.7, true));
        for k in 0..RING_SIZE {
            let a = diagram.inner.points[k].angle_from(center);
            let b = diagram.outer.points[k].angle_from(center);
            assert!((a - b).abs() < EPS);
            assert!((diagram.outer.points[k].distance(center) - 40.0).abs() < EPS);
        }
    }

    #[test]
    fn diagram_totals() {
        let params = PatternParameters::new(Point::new(500.0, 500.0), 80.0, PI / 6.0, true);
        let diagram = compute_diagram(&params);
        assert_eq!(diagram.segments().len(), 42);
        assert_eq!(diagram.circles().len(), 13);
        assert_eq!(diagram.circles()[0].center, params.center);
        assert!(diagram.circles().iter().all(|c| c.diameter == 80.0));
    }

    #[test]
    fn hidden_circles_keep_segments() {
        let shown = compute_diagram(&PatternParameters::new(Point::new(0.0, 0.0), 10.0, 0.2, true));
        let hidden = compute_diagram(&PatternParameters::new(Point::new(0.0, 0.0), 10.0, 0.2, false));
        assert!(hidden.circles().is_empty());
        assert_eq!(hidden.segments(), shown.segments());
    }

    #[test]
    fn degenerate_diameter_still_draws() {
        let diagram = compute_diagram(&PatternParameters::new(Point::new(1.0, 2.0), 0.0, 0.0, true));
        assert_eq!(diagram.segments().len(), 42);
        assert_eq!(diagram.circles().len(), 13);
        assert!(diagram.segments().iter().all(|s| s.length() == 0.0));
    }
}
