//! Common utilities shared across CLI commands.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use anyhow::{anyhow, bail, Context, Result};
use clap::Args;
use serde::Serialize;

use metatron::{
    parse_palette, Color, ColorMode, ColorPolicy, DrawList, DrawOp, PenLayer, RenderSummary,
    DEFAULT_PALETTE,
};

use super::scene::Scene;

/// Default rotation of the first copy, in degrees.
pub const DEFAULT_ROTATION_DEGREES: f64 = 30.0;

/// Pattern options shared by every command.
#[derive(Args, Debug, Clone, Default)]
pub struct PatternArgs {
    /// Number of copies: 1, 2 or 4 (anything else draws 4)
    #[arg(short = 'n', long)]
    pub copies: Option<u32>,

    /// Draw only the connecting lines
    #[arg(long)]
    pub no_circles: bool,

    /// Rotation of the first copy in degrees (default: 30)
    #[arg(short = 'r', long, allow_hyphen_values = true)]
    pub rotation: Option<f64>,

    /// Four comma-separated colors for multi-color mode
    #[arg(long, value_delimiter = ',')]
    pub palette: Option<Vec<String>>,

    /// YAML scene file; command-line flags override its values
    #[arg(short = 'c', long)]
    pub config: Option<PathBuf>,
}

/// Pattern settings after merging scene file and flags.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub copies: u32,
    pub show_circles: bool,
    pub mode: ColorMode,
    pub rotation_degrees: f64,
    pub palette: [Color; 4],
    pub stroke_width: Option<f64>,
    pub scene: Scene,
}

impl PatternArgs {
    /// Load the scene file (if any) and apply flags on top of it.
    pub fn resolve(&self) -> Result<Settings> {
        let scene = match &self.config {
            Some(path) => Scene::load(path)?,
            None => Scene::default(),
        };
        self.resolve_with(scene)
    }

    /// Apply flags on top of an already loaded scene.
    pub fn resolve_with(&self, scene: Scene) -> Result<Settings> {
        let mode = match &scene.mode {
            Some(name) => ColorMode::from_name(name)
                .ok_or_else(|| anyhow!("unknown color mode '{}' (expected dark or light)", name))?,
            None => ColorMode::default(),
        };

        let palette = match self.palette.as_ref().or(scene.palette.as_ref()) {
            Some(names) => parse_palette(names.as_slice()).context("invalid palette")?,
            None => DEFAULT_PALETTE,
        };

        let rotation_degrees = self.rotation.or(scene.rotation).unwrap_or(DEFAULT_ROTATION_DEGREES);
        check_finite("rotation", rotation_degrees)?;
        let stroke_width = scene
            .stroke_width
            .map(|w| check_positive("scene stroke width", w))
            .transpose()?;

        let copies = self.copies.or(scene.copies).unwrap_or(1);
        if !matches!(copies, 1 | 2 | 4) {
            log::warn!("copy count {} is not 1, 2 or 4; drawing 4 copies", copies);
        }

        Ok(Settings {
            copies,
            show_circles: !self.no_circles && scene.show_circles.unwrap_or(true),
            mode,
            rotation_degrees,
            palette,
            stroke_width,
            scene,
        })
    }
}

impl Settings {
    /// Color policy for on-screen style output.
    pub fn color_policy(&self) -> ColorPolicy {
        match self.mode {
            ColorMode::Dark => ColorPolicy::MultiColor(self.palette),
            ColorMode::Light => ColorMode::Light.policy(),
        }
    }

    pub fn rotation(&self) -> f64 {
        self.rotation_degrees.to_radians()
    }

    /// Stroke width from the flag, then the scene, then the command default.
    pub fn stroke_width(&self, flag: Option<f64>, default: f64) -> Result<f64> {
        match flag {
            Some(width) => check_positive("stroke width", width),
            None => Ok(self.stroke_width.unwrap_or(default)),
        }
    }
}

/// Reject NaN and infinite values for a numeric option.
pub fn check_finite(name: &str, value: f64) -> Result<f64> {
    if !value.is_finite() {
        bail!("{} must be a finite number, got {}", name, value);
    }
    Ok(value)
}

/// Reject anything that is not a finite number above zero.
pub fn check_positive(name: &str, value: f64) -> Result<f64> {
    if !(value.is_finite() && value > 0.0) {
        bail!("{} must be a positive number, got {}", name, value);
    }
    Ok(value)
}

/// Write text to a file, or stdout when no path is given.
pub fn write_output(path: Option<&Path>, content: &str) -> Result<()> {
    match path {
        Some(path) => {
            fs::write(path, content).with_context(|| format!("failed to write {}", path.display()))?;
            log::info!("wrote {} ({} bytes)", path.display(), content.len());
        }
        None => {
            let mut stdout = io::stdout().lock();
            stdout.write_all(content.as_bytes()).context("failed to write to stdout")?;
            stdout.flush().context("failed to flush stdout")?;
        }
    }
    Ok(())
}

/// Rasterise SVG content to a PNG file using resvg.
///
/// Returns the pixel size written.
pub fn svg_to_png(svg: &str, path: &Path, width: f64, height: f64, scale: f64) -> Result<(u32, u32)> {
    use resvg::usvg;
    use tiny_skia::Pixmap;

    let options = usvg::Options::default();
    let tree = usvg::Tree::from_str(svg, &options).map_err(|e| anyhow!("failed to parse generated SVG: {}", e))?;

    let pixmap_width = (width * scale).round().max(1.0) as u32;
    let pixmap_height = (height * scale).round().max(1.0) as u32;

    let mut pixmap = Pixmap::new(pixmap_width, pixmap_height)
        .ok_or_else(|| anyhow!("could not create {}x{} pixmap", pixmap_width, pixmap_height))?;

    let transform = tiny_skia::Transform::from_scale(scale as f32, scale as f32);
    resvg::render(&tree, transform, &mut pixmap.as_mut());

    pixmap
        .save_png(path)
        .map_err(|e| anyhow!("failed to write {}: {}", path.display(), e))?;

    log::info!("wrote {} ({}x{})", path.display(), pixmap_width, pixmap_height);
    Ok((pixmap_width, pixmap_height))
}

// ============================================================================
// JSON output
// ============================================================================

/// Render totals in JSON output.
#[derive(Serialize)]
pub struct JsonSummary {
    pub copies: usize,
    pub circles: usize,
    pub segments: usize,
    pub diameter: f64,
}

impl From<RenderSummary> for JsonSummary {
    fn from(s: RenderSummary) -> Self {
        Self {
            copies: s.copies,
            circles: s.circles,
            segments: s.segments,
            diameter: s.diameter,
        }
    }
}

/// One draw call in JSON output.
#[derive(Serialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum JsonOp {
    SetColor { color: String },
    Circle { cx: f64, cy: f64, diameter: f64 },
    Line { x1: f64, y1: f64, x2: f64, y2: f64 },
}

impl From<&DrawOp> for JsonOp {
    fn from(op: &DrawOp) -> Self {
        match op {
            DrawOp::SetColor(color) => JsonOp::SetColor { color: color.to_hex() },
            DrawOp::Circle { center, diameter } => JsonOp::Circle {
                cx: center.x,
                cy: center.y,
                diameter: *diameter,
            },
            DrawOp::Line { a, b } => JsonOp::Line { x1: a.x, y1: a.y, x2: b.x, y2: b.y },
        }
    }
}

/// A full render as a list of draw calls.
#[derive(Serialize)]
pub struct JsonDrawList {
    pub width: f64,
    pub height: f64,
    pub background: String,
    pub summary: JsonSummary,
    pub ops: Vec<JsonOp>,
}

impl JsonDrawList {
    pub fn new(width: f64, height: f64, background: Color, summary: RenderSummary, list: &DrawList) -> Self {
        Self {
            width,
            height,
            background: background.to_hex(),
            summary: summary.into(),
            ops: list.ops.iter().map(JsonOp::from).collect(),
        }
    }
}

/// Plotter polylines for one pen.
#[derive(Serialize)]
pub struct JsonPenLayer {
    pub color: String,
    pub polylines: Vec<Vec<[f64; 2]>>,
}

impl From<&PenLayer> for JsonPenLayer {
    fn from(layer: &PenLayer) -> Self {
        Self {
            color: layer.color.to_hex(),
            polylines: layer
                .polylines
                .iter()
                .map(|line| line.iter().map(|p| [p.x, p.y]).collect())
                .collect(),
        }
    }
}

/// Serialise any JSON output with pretty formatting.
pub fn to_json<T: Serialize>(value: &T) -> Result<String> {
    let mut json = serde_json::to_string_pretty(value).context("failed to serialise JSON")?;
    json.push('\n');
    Ok(json)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_override_scene() {
        let scene = Scene::from_yaml("copies: 2\nrotation: 10\nshow_circles: true\n").unwrap();
        let args = PatternArgs { copies: Some(4), no_circles: true, ..Default::default() };
        let settings = args.resolve_with(scene).unwrap();
        assert_eq!(settings.copies, 4);
        assert!(!settings.show_circles);
        assert_eq!(settings.rotation_degrees, 10.0);
    }

    #[test]
    fn defaults_without_scene() {
        let settings = PatternArgs::default().resolve_with(Scene::default()).unwrap();
        assert_eq!(settings.copies, 1);
        assert!(settings.show_circles);
        assert_eq!(settings.mode, ColorMode::Dark);
        assert_eq!(settings.rotation_degrees, DEFAULT_ROTATION_DEGREES);
        assert_eq!(settings.color_policy(), ColorPolicy::MultiColor(DEFAULT_PALETTE));
    }

    #[test]
    fn light_mode_is_monochrome() {
        let scene = Scene::from_yaml("mode: light\n").unwrap();
        let settings = PatternArgs::default().resolve_with(scene).unwrap();
        assert_eq!(settings.color_policy(), ColorPolicy::Monochrome(Color::BLACK));
    }

    #[test]
    fn bad_palette_is_rejected() {
        let args = PatternArgs {
            palette: Some(vec!["red".into(), "nope".into(), "blue".into(), "green".into()]),
            ..Default::default()
        };
        assert!(args.resolve_with(Scene::default()).is_err());
    }

    #[test]
    fn bad_mode_is_rejected() {
        let scene = Scene::from_yaml("mode: sepia\n").unwrap();
        assert!(PatternArgs::default().resolve_with(scene).is_err());
    }

    #[test]
    fn non_finite_rotation_is_rejected() {
        let args = PatternArgs { rotation: Some(f64::NAN), ..Default::default() };
        assert!(args.resolve_with(Scene::default()).is_err());

        let scene = Scene::from_yaml("rotation: .inf\n").unwrap();
        assert!(PatternArgs::default().resolve_with(scene).is_err());
    }

    #[test]
    fn scene_stroke_width_must_be_positive() {
        for yaml in ["stroke_width: 0\n", "stroke_width: -1\n", "stroke_width: .nan\n"] {
            let scene = Scene::from_yaml(yaml).unwrap();
            assert!(PatternArgs::default().resolve_with(scene).is_err(), "{}", yaml);
        }
    }

    #[test]
    fn stroke_width_prefers_flag_then_scene() {
        let scene = Scene::from_yaml("stroke_width: 3.0\n").unwrap();
        let settings = PatternArgs::default().resolve_with(scene).unwrap();
        assert_eq!(settings.stroke_width(None, 0.4).unwrap(), 3.0);
        assert_eq!(settings.stroke_width(Some(0.25), 0.4).unwrap(), 0.25);
        assert!(settings.stroke_width(Some(f64::NAN), 0.4).is_err());

        let plain = PatternArgs::default().resolve_with(Scene::default()).unwrap();
        assert_eq!(plain.stroke_width(None, 0.4).unwrap(), 0.4);
    }

    #[test]
    fn numeric_checks() {
        assert_eq!(check_finite("x", -3.0).unwrap(), -3.0);
        assert!(check_finite("x", f64::NAN).is_err());
        assert!(check_finite("x", f64::NEG_INFINITY).is_err());
        assert_eq!(check_positive("x", 0.5).unwrap(), 0.5);
        assert!(check_positive("x", 0.0).is_err());
        let err = check_positive("width", f64::NAN).unwrap_err();
        assert!(err.to_string().contains("width must be a positive number"));
    }

    #[test]
    fn json_ops_are_tagged() {
        let op = JsonOp::from(&DrawOp::SetColor(Color::RED));
        let json = serde_json::to_string(&op).unwrap();
        assert_eq!(json, r##"{"op":"set_color","color":"#ff0000"}"##);
    }
}
