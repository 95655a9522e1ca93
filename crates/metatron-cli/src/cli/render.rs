//! Render command: screen-style output.
//!
//! Sizes the diagram for an interactive canvas (a little margin around the
//! drawing) and paints it on a background matching the color mode.

use std::path::PathBuf;

use anyhow::{bail, Result};
use clap::{Args, ValueEnum};

use metatron::svg::DEFAULT_STROKE_WIDTH;
use metatron::{render, Area, ColorMode, DrawList, RenderConfig, ScalePolicy, SvgSurface};

use super::common::{
    check_finite, check_positive, svg_to_png, to_json, write_output, JsonDrawList, PatternArgs, Settings,
};

/// Color mode as a command-line value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ModeArg {
    /// Black background, one color per copy
    Dark,
    /// White background, black lines
    Light,
}

impl From<ModeArg> for ColorMode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::Dark => ColorMode::Dark,
            ModeArg::Light => ColorMode::Light,
        }
    }
}

#[derive(Args, Debug, Clone)]
pub struct RenderArgs {
    #[command(flatten)]
    pub pattern: PatternArgs,

    /// Color mode (default: dark)
    #[arg(short = 'm', long, value_enum)]
    pub mode: Option<ModeArg>,

    /// Canvas width (default: 1000)
    #[arg(long)]
    pub width: Option<f64>,

    /// Canvas height (default: 1000)
    #[arg(long)]
    pub height: Option<f64>,

    /// Space reserved at the top of the canvas
    #[arg(long)]
    pub top_offset: Option<f64>,

    /// Line width (default: 1.0)
    #[arg(short = 'w', long)]
    pub stroke_width: Option<f64>,

    /// Output SVG file (stdout if omitted)
    #[arg(short = 'o', long)]
    pub output: Option<PathBuf>,

    /// Also generate PNG output
    #[arg(long)]
    pub png: Option<PathBuf>,

    /// PNG scale factor
    #[arg(long, default_value_t = 1.0)]
    pub png_scale: f64,

    /// Emit the draw calls as JSON instead of SVG
    #[arg(long, conflicts_with = "png")]
    pub json: bool,
}

/// Canvas size after merging flags with the scene's `canvas` block.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CanvasSize {
    pub width: f64,
    pub height: f64,
    /// Space reserved above the drawing area.
    pub top_offset: f64,
}

/// Resolve and validate the canvas: flags first, then the scene, then 1000x1000.
pub fn resolve_canvas(
    settings: &Settings,
    width: Option<f64>,
    height: Option<f64>,
    top_offset: Option<f64>,
) -> Result<CanvasSize> {
    let canvas = settings.scene.canvas.clone().unwrap_or_default();
    let width = check_positive("canvas width", width.unwrap_or(canvas.width))?;
    let height = check_positive("canvas height", height.unwrap_or(canvas.height))?;
    let top_offset = check_finite("top offset", top_offset.unwrap_or(canvas.top_offset))?;

    if top_offset < 0.0 || top_offset >= height {
        bail!("top offset {} must be between 0 and the canvas height {}", top_offset, height);
    }

    Ok(CanvasSize { width, height, top_offset })
}

/// Build the render config for a canvas with a reserved top strip.
///
/// The usable area is everything below `top_offset`; the diagram is
/// centered in it and sized with the screen policy.
pub fn screen_config(settings: &Settings, width: f64, height: f64, top_offset: f64) -> RenderConfig {
    RenderConfig {
        copy_count: settings.copies,
        show_circles: settings.show_circles,
        base_rotation: settings.rotation(),
        area: Area::new(0.0, top_offset, width, height - top_offset),
        colors: settings.color_policy(),
        scale: ScalePolicy::Screen,
    }
}

/// Execute the render command.
pub fn cmd_render(args: &RenderArgs) -> Result<()> {
    let mut settings = args.pattern.resolve()?;
    if let Some(mode) = args.mode {
        settings.mode = mode.into();
    }

    let canvas = resolve_canvas(&settings, args.width, args.height, args.top_offset)?;
    let png_scale = check_positive("PNG scale", args.png_scale)?;
    let (width, height) = (canvas.width, canvas.height);

    let config = screen_config(&settings, width, height, canvas.top_offset);
    let background = settings.mode.background();

    if args.json {
        let mut list = DrawList::new();
        let summary = render(&mut list, &config);
        let json = to_json(&JsonDrawList::new(width, height, background, summary, &list))?;
        return write_output(args.output.as_deref(), &json);
    }

    let stroke_width = settings.stroke_width(args.stroke_width, DEFAULT_STROKE_WIDTH)?;

    let mut surface = SvgSurface::new(width, height)
        .with_background(background)
        .with_stroke_width(stroke_width);
    let summary = render(&mut surface, &config);
    log::info!(
        "{} {} with {} segments and {} circles (diameter {:.2})",
        summary.copies,
        if summary.copies == 1 { "copy" } else { "copies" },
        summary.segments,
        summary.circles,
        summary.diameter
    );

    let svg = surface.finish()?;

    // PNG-only runs skip the SVG on stdout
    if args.output.is_some() || args.png.is_none() {
        write_output(args.output.as_deref(), &svg)?;
    }
    if let Some(png) = &args.png {
        svg_to_png(&svg, png, width, height, png_scale)?;
    }

    Ok(())
}
