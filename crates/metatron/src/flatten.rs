//! Plotter output - everything becomes straight polylines.
//!
//! Pen plotters only draw straight moves, so circles are flattened into
//! short line segments. A circle is four cubic Bézier quarter arcs, each
//! flattened with lyon_geom to the requested tolerance.

use std::f64::consts::FRAC_PI_2;

use lyon_geom::{CubicBezierSegment, point};

use crate::color::Color;
use crate::geometry::Point;
use crate::render::Surface;

/// Control point distance for a quarter-circle cubic, as a fraction of radius.
const KAPPA: f64 = 0.552_284_749_830_793_6;

/// Default flattening tolerance in surface units.
/// 0.1 is good for plotters (sub-pixel accuracy at typical scales).
pub const DEFAULT_TOLERANCE: f64 = 0.1;

const MIN_TOLERANCE: f64 = 1e-3;

/// All polylines drawn with one pen color.
#[derive(Debug, Clone, PartialEq)]
pub struct PenLayer {
    pub color: Color,
    pub polylines: Vec<Vec<Point>>,
}

/// Surface that turns draw calls into per-color polylines.
#[derive(Debug, Clone)]
pub struct PolylineSurface {
    tolerance: f64,
    layers: Vec<PenLayer>,
}

impl PolylineSurface {
    pub fn new(tolerance: f64) -> Self {
        Self {
            tolerance: tolerance.max(MIN_TOLERANCE),
            layers: Vec::new(),
        }
    }

    pub fn tolerance(&self) -> f64 {
        self.tolerance
    }

    pub fn layers(&self) -> &[PenLayer] {
        &self.layers
    }

    /// Total number of polylines across all layers.
    pub fn polyline_count(&self) -> usize {
        self.layers.iter().map(|l| l.polylines.len()).sum()
    }

    fn push(&mut self, polyline: Vec<Point>) {
        if self.layers.is_empty() {
            self.layers.push(PenLayer { color: Color::BLACK, polylines: Vec::new() });
        }
        if let Some(layer) = self.layers.last_mut() {
            layer.polylines.push(polyline);
        }
    }
}

impl Default for PolylineSurface {
    fn default() -> Self {
        Self::new(DEFAULT_TOLERANCE)
    }
}

impl Surface for PolylineSurface {
    fn set_color(&mut self, color: Color) {
        // Reuse a layer for the same pen so plotters don't swap needlessly
        if let Some(pos) = self.layers.iter().position(|l| l.color == color) {
            let layer = self.layers.remove(pos);
            self.layers.push(layer);
        } else {
            self.layers.push(PenLayer { color, polylines: Vec::new() });
        }
    }

    fn draw_circle(&mut self, center: Point, diameter: f64) {
        let polyline = flatten_circle(center, diameter / 2.0, self.tolerance);
        self.push(polyline);
    }

    fn draw_line(&mut self, a: Point, b: Point) {
        self.push(vec![a, b]);
    }
}

/// Flatten a circle into a closed polyline (first point repeated at the end).
///
/// Starts at angle 0 and runs in the direction of increasing angle.
pub fn flatten_circle(center: Point, radius: f64, tolerance: f64) -> Vec<Point> {
    let radius = radius.abs();
    if radius == 0.0 {
        return vec![center, center];
    }

    let tolerance = tolerance.max(MIN_TOLERANCE);
    let handle = KAPPA * radius;
    let start = center.offset(radius, 0.0);
    let mut points = vec![start];

    for quarter in 0..4 {
        let a0 = quarter as f64 * FRAC_PI_2;
        let a1 = a0 + FRAC_PI_2;
        let p0 = center.offset(radius, a0);
        let p3 = center.offset(radius, a1);

        // Tangent at angle a is (-sin a, cos a)
        let curve = CubicBezierSegment {
            from: point(p0.x, p0.y),
            ctrl1: point(p0.x - handle * a0.sin(), p0.y + handle * a0.cos()),
            ctrl2: point(p3.x + handle * a1.sin(), p3.y - handle * a1.cos()),
            to: point(p3.x, p3.y),
        };

        curve.for_each_flattened(tolerance, &mut |segment| {
            points.push(Point::new(segment.to.x, segment.to.y));
        });
    }

    // Close exactly on the start point
    if let Some(last) = points.last_mut() {
        *last = start;
    }
    points
}
