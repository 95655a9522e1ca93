//! Drawing diagrams onto a surface.
//!
//! The renderer knows nothing about pixels, files or windows. A host hands
//! it something that implements [`Surface`] plus a [`RenderConfig`], and
//! the renderer issues `set_color` / `draw_circle` / `draw_line` calls.
//!
//! ## Copies
//!
//! Up to four copies of the diagram are drawn, each rotated a further 15°.
//! The requested copy count picks a step through four rotation slots:
//!
//! | copies | step | slots drawn |
//! |--------|------|-------------|
//! | 1      | 4    | 0           |
//! | 2      | 2    | 0, 2        |
//! | 4      | 1    | 0, 1, 2, 3  |
//!
//! Any other count falls back to a step of 1 (four copies).

use std::f64::consts::PI;

use crate::color::{Color, ColorPolicy};
use crate::geometry::{Area, Point};
use crate::pattern::{compute_diagram, Diagram, PatternParameters};

/// Rotation between neighbouring copy slots (15°).
pub const ANGLE_STEP: f64 = PI / 12.0;

/// Rotation of ring point 0 for the first copy (30°).
pub const DEFAULT_ROTATION: f64 = PI / 6.0;

/// Number of rotation slots the copy loop walks through.
pub const COPY_SLOTS: usize = 4;

/// Something the renderer can draw on.
///
/// ## Rust Lesson #12: Traits
///
/// A trait is an interface. SVG writers, plotters, rasterisers and test
/// recorders all implement these three methods and the renderer never
/// needs to know which one it is talking to.
pub trait Surface {
    /// Stroke color for everything drawn after this call.
    fn set_color(&mut self, color: Color);

    /// Stroke a circle outline.
    fn draw_circle(&mut self, center: Point, diameter: f64);

    /// Stroke a straight line.
    fn draw_line(&mut self, a: Point, b: Point);
}

impl<S: Surface + ?Sized> Surface for &mut S {
    fn set_color(&mut self, color: Color) {
        (**self).set_color(color);
    }

    fn draw_circle(&mut self, center: Point, diameter: f64) {
        (**self).draw_circle(center, diameter);
    }

    fn draw_line(&mut self, a: Point, b: Point) {
        (**self).draw_line(a, b);
    }
}

/// Map a requested copy count to the slot step of the copy loop.
///
/// 1 → 4, 2 → 2, 4 → 1. Anything else behaves like 4 copies.
pub fn angle_step_multiplier(copy_count: u32) -> usize {
    match copy_count {
        1 => 4,
        2 => 2,
        _ => 1,
    }
}

/// Number of copies actually drawn for a requested count.
pub fn copies_drawn(copy_count: u32) -> usize {
    COPY_SLOTS.div_ceil(angle_step_multiplier(copy_count))
}

/// How the circle diameter is derived from the usable drawing area.
///
/// A fully expanded diagram spans roughly five diameters: the outer ring
/// sits two diameters out and its circles reach half a diameter beyond.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum ScalePolicy {
    /// Interactive display, leaves a small margin: `min(w, h) / 5.2`.
    #[default]
    Screen,
    /// Printed page, fills the imageable area: `min(w, h) / 5`.
    Print,
    /// Fixed diameter regardless of area.
    Fixed(f64),
}

impl ScalePolicy {
    pub const SCREEN_DIVISOR: f64 = 5.2;
    pub const PRINT_DIVISOR: f64 = 5.0;

    /// Diameter for a drawing area.
    pub fn diameter(&self, area: &Area) -> f64 {
        match self {
            ScalePolicy::Screen => area.min_side() / Self::SCREEN_DIVISOR,
            ScalePolicy::Print => area.min_side() / Self::PRINT_DIVISOR,
            ScalePolicy::Fixed(diameter) => *diameter,
        }
    }
}

/// Rotation and color for one drawn copy.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CopyPlan {
    /// Position in draw order (0-based).
    pub index: usize,
    /// Rotation slot the copy occupies (0..4).
    pub slot: usize,
    /// Absolute rotation in radians.
    pub rotation: f64,
    pub color: Color,
}

/// How many copies to draw and with which rotations and colors.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderPlan {
    pub copy_count: u32,
    pub palette: [Color; 4],
    pub base_rotation: f64,
    pub angle_step: f64,
}

impl RenderPlan {
    pub fn new(copy_count: u32, colors: ColorPolicy, base_rotation: f64) -> Self {
        Self {
            copy_count,
            palette: colors.palette(),
            base_rotation,
            angle_step: ANGLE_STEP,
        }
    }

    /// Slot step for this plan's copy count.
    pub fn multiplier(&self) -> usize {
        angle_step_multiplier(self.copy_count)
    }

    /// The copies to draw, in draw order.
    ///
    /// Copy `j` sits in slot `j * multiplier` and takes `palette[j]`.
    pub fn copies(&self) -> Vec<CopyPlan> {
        (0..COPY_SLOTS)
            .step_by(self.multiplier())
            .enumerate()
            .map(|(index, slot)| CopyPlan {
                index,
                slot,
                rotation: self.base_rotation + slot as f64 * self.angle_step,
                color: self.palette[index],
            })
            .collect()
    }
}

/// Everything a host chooses before rendering.
///
/// Rebuilt by the host whenever a toggle changes. The renderer keeps no
/// state of its own between calls.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderConfig {
    /// Requested copies: 1, 2 or 4. Other values draw four copies.
    pub copy_count: u32,
    pub show_circles: bool,
    /// Rotation of the first copy, in radians.
    pub base_rotation: f64,
    /// Usable drawing area. The diagram is centered in it.
    pub area: Area,
    pub colors: ColorPolicy,
    pub scale: ScalePolicy,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            copy_count: 1,
            show_circles: true,
            base_rotation: DEFAULT_ROTATION,
            area: Area::from_size(1000.0, 1000.0),
            colors: ColorPolicy::default(),
            scale: ScalePolicy::Screen,
        }
    }
}

impl RenderConfig {
    /// Circle diameter for this config's area and scale policy.
    pub fn diameter(&self) -> f64 {
        self.scale.diameter(&self.area)
    }

    pub fn center(&self) -> Point {
        self.area.center()
    }

    pub fn plan(&self) -> RenderPlan {
        RenderPlan::new(self.copy_count, self.colors, self.base_rotation)
    }
}

/// What a render call issued.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct RenderSummary {
    pub copies: usize,
    pub circles: usize,
    pub segments: usize,
    pub diameter: f64,
}

/// Render the diagram copies described by `config` onto `surface`.
pub fn render<S: Surface + ?Sized>(surface: &mut S, config: &RenderConfig) -> RenderSummary {
    render_copies(
        surface,
        config.center(),
        config.diameter(),
        config.show_circles,
        &config.plan(),
    )
}

/// Render every copy of `plan` around `center` with a fixed diameter.
pub fn render_copies<S: Surface + ?Sized>(
    surface: &mut S,
    center: Point,
    diameter: f64,
    show_circles: bool,
    plan: &RenderPlan,
) -> RenderSummary {
    let mut summary = RenderSummary { diameter, ..Default::default() };

    for copy in plan.copies() {
        surface.set_color(copy.color);
        let diagram = compute_diagram(&PatternParameters::new(center, diameter, copy.rotation, show_circles));
        let (circles, segments) = draw_diagram(surface, &diagram);
        summary.copies += 1;
        summary.circles += circles;
        summary.segments += segments;
    }

    log::debug!(
        "rendered {} copies (step {}): {} circles, {} segments, diameter {:.2}",
        summary.copies,
        plan.multiplier(),
        summary.circles,
        summary.segments,
        diameter
    );

    summary
}

/// Draw one computed diagram. Returns (circles, segments) drawn.
///
/// Circles go first (center, inner ring, outer ring), then the inner
/// edges, outer edges and cross links.
pub fn draw_diagram<S: Surface + ?Sized>(surface: &mut S, diagram: &Diagram) -> (usize, usize) {
    let circles = diagram.circles();
    for c in &circles {
        surface.draw_circle(c.center, c.diameter);
    }

    let segments = diagram.segments();
    for s in &segments {
        surface.draw_line(s.a, s.b);
    }

    (circles.len(), segments.len())
}
