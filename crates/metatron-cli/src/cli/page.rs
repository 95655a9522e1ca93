//! Page command: printable single-page output.
//!
//! The diagram fills the imageable area of the page (paper size minus
//! margins) using the print scale policy, in one ink color with a hairline
//! stroke. It is laid out in imageable-area coordinates and moved onto the
//! page by the area's origin. `--plot` emits pen-plotter polylines instead
//! of SVG.

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Args, ValueEnum};
use serde::Serialize;

use metatron::flatten::DEFAULT_TOLERANCE;
use metatron::{
    render, Area, Color, ColorPolicy, Point, PolylineSurface, RenderConfig, ScalePolicy, SvgSurface,
};

use super::common::{
    check_finite, check_positive, svg_to_png, to_json, write_output, JsonPenLayer, JsonSummary,
    PatternArgs, Settings,
};

/// Points per inch.
const PT_PER_INCH: f64 = 72.0;

/// Default stroke width for printed output, in points.
pub const PRINT_STROKE_WIDTH: f64 = 0.4;

/// Paper sizes in points (portrait).
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Paper {
    /// 8.5" × 11"
    Letter,
    /// 8.5" × 14"
    Legal,
    /// 210mm × 297mm
    A4,
    /// 297mm × 420mm
    A3,
}

impl Paper {
    pub fn size(&self) -> (f64, f64) {
        let mm = PT_PER_INCH / 25.4;
        match self {
            Paper::Letter => (8.5 * PT_PER_INCH, 11.0 * PT_PER_INCH),
            Paper::Legal => (8.5 * PT_PER_INCH, 14.0 * PT_PER_INCH),
            Paper::A4 => (210.0 * mm, 297.0 * mm),
            Paper::A3 => (297.0 * mm, 420.0 * mm),
        }
    }
}

#[derive(Args, Debug, Clone)]
pub struct PageArgs {
    #[command(flatten)]
    pub pattern: PatternArgs,

    /// Paper size
    #[arg(long, value_enum, default_value_t = Paper::Letter)]
    pub paper: Paper,

    /// Page margin in points on every side
    #[arg(long, default_value_t = 72.0)]
    pub margin: f64,

    /// Rotate the page to landscape
    #[arg(long)]
    pub landscape: bool,

    /// Ink color
    #[arg(long, default_value = "black")]
    pub ink: String,

    /// Line width in points (default: 0.4)
    #[arg(short = 'w', long)]
    pub stroke_width: Option<f64>,

    /// Output file (stdout if omitted)
    #[arg(short = 'o', long)]
    pub output: Option<PathBuf>,

    /// Also generate PNG output
    #[arg(long)]
    pub png: Option<PathBuf>,

    /// PNG scale factor
    #[arg(long, default_value_t = 2.0)]
    pub png_scale: f64,

    /// Emit plotter polylines as JSON instead of SVG
    #[arg(long, conflicts_with = "png")]
    pub plot: bool,

    /// Curve flattening tolerance for --plot, in points
    #[arg(long, default_value_t = DEFAULT_TOLERANCE)]
    pub tolerance: f64,
}

/// A page and the imageable area inside its margins.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageLayout {
    pub width: f64,
    pub height: f64,
    pub imageable: Area,
}

impl PageLayout {
    pub fn new(paper: Paper, landscape: bool, margin: f64) -> Self {
        let (w, h) = paper.size();
        let (width, height) = if landscape { (h, w) } else { (w, h) };
        Self {
            width,
            height,
            imageable: Area::from_size(width, height).inset(margin),
        }
    }

    /// Top-left corner of the imageable area on the page.
    pub fn origin(&self) -> Point {
        Point::new(self.imageable.x, self.imageable.y)
    }
}

/// Build the render config for a printed page.
///
/// Coordinates are relative to the imageable area's top-left corner.
pub fn page_config(settings: &Settings, imageable: Area, ink: Color) -> RenderConfig {
    RenderConfig {
        copy_count: settings.copies,
        show_circles: settings.show_circles,
        base_rotation: settings.rotation(),
        area: Area::from_size(imageable.width, imageable.height),
        colors: ColorPolicy::Monochrome(ink),
        scale: ScalePolicy::Print,
    }
}

/// Plotter output for one page.
///
/// Polylines are relative to `origin`, the imageable area's corner.
#[derive(Serialize)]
struct JsonPlot {
    width: f64,
    height: f64,
    origin: [f64; 2],
    tolerance: f64,
    summary: JsonSummary,
    layers: Vec<JsonPenLayer>,
}

/// Execute the page command.
pub fn cmd_page(args: &PageArgs) -> Result<()> {
    let settings = args.pattern.resolve()?;
    let ink = Color::parse(&args.ink).context("invalid ink color")?;

    let margin = check_finite("margin", args.margin)?;
    if margin < 0.0 {
        bail!("margin must not be negative, got {}", margin);
    }
    let stroke_width = settings.stroke_width(args.stroke_width, PRINT_STROKE_WIDTH)?;
    let png_scale = check_positive("PNG scale", args.png_scale)?;
    let tolerance = check_positive("tolerance", args.tolerance)?;

    let layout = PageLayout::new(args.paper, args.landscape, margin);
    if layout.imageable.width <= 0.0 || layout.imageable.height <= 0.0 {
        bail!(
            "margin {} leaves no imageable area on a {:.0}x{:.0} page",
            margin,
            layout.width,
            layout.height
        );
    }

    let config = page_config(&settings, layout.imageable, ink);
    log::debug!("page {:?}, imageable {:?}", args.paper, layout.imageable);

    if args.plot {
        let mut surface = PolylineSurface::new(tolerance);
        let summary = render(&mut surface, &config);
        let origin = layout.origin();
        let plot = JsonPlot {
            width: layout.width,
            height: layout.height,
            origin: [origin.x, origin.y],
            tolerance: surface.tolerance(),
            summary: summary.into(),
            layers: surface.layers().iter().map(JsonPenLayer::from).collect(),
        };
        log::info!("{} polylines for the plotter", surface.polyline_count());
        return write_output(args.output.as_deref(), &to_json(&plot)?);
    }

    let mut surface = SvgSurface::new(layout.width, layout.height)
        .with_background(Color::WHITE)
        .with_stroke_width(stroke_width)
        .with_origin(layout.origin());
    let summary = render(&mut surface, &config);
    log::info!(
        "page with {} copies, diameter {:.2}pt",
        summary.copies,
        summary.diameter
    );

    let svg = surface.finish()?;
    if args.output.is_some() || args.png.is_none() {
        write_output(args.output.as_deref(), &svg)?;
    }
    if let Some(png) = &args.png {
        svg_to_png(&svg, png, layout.width, layout.height, png_scale)?;
    }

    Ok(())
}
