//! Core geometry types for metatron.
//!
//! ## Rust Lesson #3: Structs & Derives
//!
//! Everything here is a small `Copy` value. The `#[derive(...)]` macro
//! auto-generates the boilerplate:
//! - `Debug` = printable with `{:?}`
//! - `Clone` + `Copy` = duplicated implicitly on assignment (cheap stack values)
//! - `PartialEq` = comparable with `==`

/// A 2D point with x,y coordinates in surface units.
///
/// Surfaces use screen space: y grows downward.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

/// A line segment between two points.
///
/// Segments are unordered: `a -> b` and `b -> a` draw the same stroke.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    pub a: Point,
    pub b: Point,
}

/// A circle given by its center and diameter.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Circle {
    pub center: Point,
    pub diameter: f64,
}

/// A rectangular drawing region: the imageable area of a canvas or page.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Area {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

// ============================================================================
// IMPLEMENTATIONS
// ============================================================================

impl Point {
    #[inline]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Distance to another point.
    #[inline]
    pub fn distance(&self, other: Point) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }

    /// The point at `distance` from this one along `angle` (radians).
    ///
    /// Angle 0 points along +x. With y growing downward, positive angles
    /// turn clockwise on screen.
    #[inline]
    pub fn offset(&self, distance: f64, angle: f64) -> Point {
        Point::new(
            self.x + distance * angle.cos(),
            self.y + distance * angle.sin(),
        )
    }

    /// Angle (radians) of the vector from `origin` to this point.
    #[inline]
    pub fn angle_from(&self, origin: Point) -> f64 {
        (self.y - origin.y).atan2(self.x - origin.x)
    }

    /// Approximate equality, for comparing computed coordinates.
    #[inline]
    pub fn approx_eq(&self, other: Point, tolerance: f64) -> bool {
        (self.x - other.x).abs() <= tolerance && (self.y - other.y).abs() <= tolerance
    }
}

impl Segment {
    #[inline]
    pub fn new(a: Point, b: Point) -> Self {
        Self { a, b }
    }

    /// Length of the segment.
    #[inline]
    pub fn length(&self) -> f64 {
        self.a.distance(self.b)
    }

    /// Compare as an unordered pair of endpoints.
    pub fn same_as(&self, other: &Segment, tolerance: f64) -> bool {
        (self.a.approx_eq(other.a, tolerance) && self.b.approx_eq(other.b, tolerance))
            || (self.a.approx_eq(other.b, tolerance) && self.b.approx_eq(other.a, tolerance))
    }
}

impl Circle {
    #[inline]
    pub fn new(center: Point, diameter: f64) -> Self {
        Self { center, diameter }
    }

    #[inline]
    pub fn radius(&self) -> f64 {
        self.diameter / 2.0
    }
}

impl Area {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self { x, y, width, height }
    }

    /// An area of the given size anchored at the origin.
    pub fn from_size(width: f64, height: f64) -> Self {
        Self::new(0.0, 0.0, width, height)
    }

    /// Center of the area. Diagrams are always drawn around this point.
    #[inline]
    pub fn center(&self) -> Point {
        Point::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    /// The shorter of the two sides.
    #[inline]
    pub fn min_side(&self) -> f64 {
        self.width.min(self.height)
    }

    /// Shrink the area by `margin` on every side. Never goes below zero size.
    pub fn inset(&self, margin: f64) -> Area {
        Area::new(
            self.x + margin,
            self.y + margin,
            (self.width - 2.0 * margin).max(0.0),
            (self.height - 2.0 * margin).max(0.0),
        )
    }
}
