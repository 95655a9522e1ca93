//! A surface that records draw calls instead of drawing.
//!
//! Used by the renderer tests and for the JSON export of a render.

use crate::color::Color;
use crate::geometry::{Point, Segment};
use crate::render::Surface;

/// One recorded draw call.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DrawOp {
    SetColor(Color),
    Circle { center: Point, diameter: f64 },
    Line { a: Point, b: Point },
}

/// Ordered list of every call made on the surface.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DrawList {
    pub ops: Vec<DrawOp>,
}

impl DrawList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn circle_count(&self) -> usize {
        self.ops.iter().filter(|op| matches!(op, DrawOp::Circle { .. })).count()
    }

    pub fn line_count(&self) -> usize {
        self.ops.iter().filter(|op| matches!(op, DrawOp::Line { .. })).count()
    }

    pub fn color_changes(&self) -> usize {
        self.ops.iter().filter(|op| matches!(op, DrawOp::SetColor(_))).count()
    }

    /// All recorded lines, in draw order.
    pub fn lines(&self) -> Vec<Segment> {
        self.ops
            .iter()
            .filter_map(|op| match op {
                DrawOp::Line { a, b } => Some(Segment::new(*a, *b)),
                _ => None,
            })
            .collect()
    }
}

impl Surface for DrawList {
    fn set_color(&mut self, color: Color) {
        self.ops.push(DrawOp::SetColor(color));
    }

    fn draw_circle(&mut self, center: Point, diameter: f64) {
        self.ops.push(DrawOp::Circle { center, diameter });
    }

    fn draw_line(&mut self, a: Point, b: Point) {
        self.ops.push(DrawOp::Line { a, b });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn records_calls_in_order() {
        let mut list = DrawList::new();
        list.draw_line(Point::new(0.0, 0.0), Point::new(1.0, 1.0));
        list.set_color(Color::RED);
        list.draw_circle(Point::new(0.0, 0.0), 2.0);
        list.set_color(Color::BLUE);
        list.draw_line(Point::new(0.0, 0.0), Point::new(1.0, 1.0));
        list.draw_line(Point::new(1.0, 1.0), Point::new(2.0, 2.0));

        assert_eq!(list.ops[1], DrawOp::SetColor(Color::RED));
        assert_eq!(list.ops[2], DrawOp::Circle { center: Point::new(0.0, 0.0), diameter: 2.0 });
        assert_eq!(list.lines()[2], Segment::new(Point::new(1.0, 1.0), Point::new(2.0, 2.0)));
        assert_eq!(list.line_count(), 3);
        assert_eq!(list.circle_count(), 1);
        assert_eq!(list.color_changes(), 2);
    }
}
