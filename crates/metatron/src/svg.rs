//! SVG output - a [`Surface`] that builds an SVG document.
//!
//! Draw calls are buffered per stroke color and written out with
//! quick-xml when [`SvgSurface::finish`] is called. Each color change
//! opens a new `<g stroke="...">` group, so one copy of the diagram maps
//! to one group.

use quick_xml::Writer;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, Event};

use crate::color::Color;
use crate::error::{Error, Result};
use crate::geometry::Point;
use crate::render::Surface;

const SVG_NS: &str = "http://www.w3.org/2000/svg";

/// Default stroke width in surface units.
pub const DEFAULT_STROKE_WIDTH: f64 = 1.0;

#[derive(Debug, Clone, Copy, PartialEq)]
enum Shape {
    Circle { center: Point, diameter: f64 },
    Line { a: Point, b: Point },
}

#[derive(Debug, Clone, PartialEq)]
struct Group {
    color: Color,
    shapes: Vec<Shape>,
}

/// Surface that collects draw calls into an SVG document.
#[derive(Debug, Clone)]
pub struct SvgSurface {
    width: f64,
    height: f64,
    background: Option<Color>,
    stroke_width: f64,
    origin: Option<Point>,
    groups: Vec<Group>,
}

impl SvgSurface {
    /// A transparent canvas of the given size, black 1-unit strokes.
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            background: None,
            stroke_width: DEFAULT_STROKE_WIDTH,
            origin: None,
            groups: Vec::new(),
        }
    }

    /// Fill the canvas with a solid color behind the drawing.
    pub fn with_background(mut self, color: Color) -> Self {
        self.background = Some(color);
        self
    }

    pub fn with_stroke_width(mut self, stroke_width: f64) -> Self {
        self.stroke_width = stroke_width;
        self
    }

    /// Draw everything relative to `origin` instead of the canvas corner.
    ///
    /// The drawing is wrapped in a `translate` group, so a diagram laid out
    /// inside an imageable area can be placed on the page as a whole.
    pub fn with_origin(mut self, origin: Point) -> Self {
        self.origin = Some(origin);
        self
    }

    fn push(&mut self, shape: Shape) {
        if self.groups.is_empty() {
            self.groups.push(Group { color: Color::BLACK, shapes: Vec::new() });
        }
        if let Some(group) = self.groups.last_mut() {
            group.shapes.push(shape);
        }
    }

    /// Write the SVG document.
    pub fn finish(&self) -> Result<String> {
        let mut writer = Writer::new_with_indent(Vec::new(), b' ', 2);

        emit(&mut writer, Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;

        let mut root = BytesStart::new("svg");
        root.push_attribute(("xmlns", SVG_NS));
        root.push_attribute(("width", num(self.width).as_str()));
        root.push_attribute(("height", num(self.height).as_str()));
        root.push_attribute((
            "viewBox",
            format!("0 0 {} {}", num(self.width), num(self.height)).as_str(),
        ));
        emit(&mut writer, Event::Start(root))?;

        if let Some(background) = self.background {
            let mut rect = BytesStart::new("rect");
            rect.push_attribute(("width", "100%"));
            rect.push_attribute(("height", "100%"));
            rect.push_attribute(("fill", background.to_hex().as_str()));
            emit(&mut writer, Event::Empty(rect))?;
        }

        if let Some(origin) = self.origin {
            let mut g = BytesStart::new("g");
            g.push_attribute((
                "transform",
                format!("translate({} {})", num(origin.x), num(origin.y)).as_str(),
            ));
            emit(&mut writer, Event::Start(g))?;
        }

        for group in self.groups.iter().filter(|g| !g.shapes.is_empty()) {
            let mut g = BytesStart::new("g");
            g.push_attribute(("stroke", group.color.to_hex().as_str()));
            g.push_attribute(("stroke-width", num(self.stroke_width).as_str()));
            g.push_attribute(("fill", "none"));
            g.push_attribute(("stroke-linecap", "round"));
            emit(&mut writer, Event::Start(g))?;

            for shape in &group.shapes {
                emit(&mut writer, Event::Empty(shape_element(shape)))?;
            }

            emit(&mut writer, Event::End(BytesEnd::new("g")))?;
        }

        if self.origin.is_some() {
            emit(&mut writer, Event::End(BytesEnd::new("g")))?;
        }

        emit(&mut writer, Event::End(BytesEnd::new("svg")))?;

        let mut svg = String::from_utf8(writer.into_inner()).map_err(|e| Error::Svg(e.to_string()))?;
        svg.push('\n');
        Ok(svg)
    }
}

impl Surface for SvgSurface {
    fn set_color(&mut self, color: Color) {
        match self.groups.last_mut() {
            // Nothing drawn in the current color yet, just recolor it
            Some(group) if group.shapes.is_empty() => group.color = color,
            _ => self.groups.push(Group { color, shapes: Vec::new() }),
        }
    }

    fn draw_circle(&mut self, center: Point, diameter: f64) {
        self.push(Shape::Circle { center, diameter });
    }

    fn draw_line(&mut self, a: Point, b: Point) {
        self.push(Shape::Line { a, b });
    }
}

fn shape_element(shape: &Shape) -> BytesStart<'static> {
    match shape {
        Shape::Circle { center, diameter } => {
            let mut el = BytesStart::new("circle");
            el.push_attribute(("cx", num(center.x).as_str()));
            el.push_attribute(("cy", num(center.y).as_str()));
            el.push_attribute(("r", num((diameter / 2.0).abs()).as_str()));
            el
        }
        Shape::Line { a, b } => {
            let mut el = BytesStart::new("line");
            el.push_attribute(("x1", num(a.x).as_str()));
            el.push_attribute(("y1", num(a.y).as_str()));
            el.push_attribute(("x2", num(b.x).as_str()));
            el.push_attribute(("y2", num(b.y).as_str()));
            el
        }
    }
}

fn emit(writer: &mut Writer<Vec<u8>>, event: Event<'_>) -> Result<()> {
    writer.write_event(event).map_err(|e| Error::Svg(e.to_string()))
}

/// Two decimals is sub-pixel at any sane output size.
fn num(value: f64) -> String {
    format!("{:.2}", value)
}
