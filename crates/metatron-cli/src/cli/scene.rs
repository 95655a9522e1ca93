//! Scene files: YAML presets for a render.
//!
//! Every field is optional; anything left out falls back to the command
//! defaults, and command-line flags win over anything set here.
//!
//! ```yaml
//! copies: 4
//! show_circles: true
//! mode: dark          # dark | light
//! rotation: 30        # degrees
//! palette: [blue, red, yellow, green]
//! stroke_width: 1.0
//! canvas: { width: 1000, height: 1000, top_offset: 0 }
//! ```

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// A saved set of render options.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Scene {
    /// Number of copies (1, 2 or 4)
    #[serde(default)]
    pub copies: Option<u32>,

    /// Whether to draw the circles as well as the lines
    #[serde(default)]
    pub show_circles: Option<bool>,

    /// Color mode name ("dark" or "light")
    #[serde(default)]
    pub mode: Option<String>,

    /// Rotation of the first copy in degrees
    #[serde(default)]
    pub rotation: Option<f64>,

    /// Four colors for multi-color mode
    #[serde(default)]
    pub palette: Option<Vec<String>>,

    /// Stroke width in canvas units
    #[serde(default)]
    pub stroke_width: Option<f64>,

    /// Canvas size for screen-style output
    #[serde(default)]
    pub canvas: Option<Canvas>,
}

/// Canvas configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Canvas {
    #[serde(default = "default_side")]
    pub width: f64,

    #[serde(default = "default_side")]
    pub height: f64,

    /// Space reserved above the drawing area (e.g. for a control strip)
    #[serde(default)]
    pub top_offset: f64,
}

fn default_side() -> f64 {
    1000.0
}

impl Default for Canvas {
    fn default() -> Self {
        Self {
            width: default_side(),
            height: default_side(),
            top_offset: 0.0,
        }
    }
}

impl Scene {
    /// Load a scene from a YAML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("failed to read scene file {}", path.display()))?;
        let scene = Self::from_yaml(&content)
            .with_context(|| format!("failed to parse scene file {}", path.display()))?;
        log::debug!("loaded scene from {}: {:?}", path.display(), scene);
        Ok(scene)
    }

    /// Parse a scene from YAML text. An empty document is an empty scene.
    pub fn from_yaml(content: &str) -> Result<Self> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(content)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_full_scene() {
        let yaml = r##"
copies: 4
show_circles: false
mode: light
rotation: 45
palette: [black, white, "#ff0000", green]
stroke_width: 0.5
canvas:
  width: 800
  height: 600
  top_offset: 40
"##;
        let scene = Scene::from_yaml(yaml).unwrap();
        assert_eq!(scene.copies, Some(4));
        assert_eq!(scene.show_circles, Some(false));
        assert_eq!(scene.mode.as_deref(), Some("light"));
        assert_eq!(scene.rotation, Some(45.0));
        assert_eq!(scene.palette.as_ref().map(|p| p.len()), Some(4));
        assert_eq!(scene.stroke_width, Some(0.5));
        let canvas = scene.canvas.unwrap();
        assert_eq!((canvas.width, canvas.height, canvas.top_offset), (800.0, 600.0, 40.0));
    }

    #[test]
    fn canvas_fields_default() {
        let scene = Scene::from_yaml("canvas: { width: 300 }").unwrap();
        assert_eq!(scene.canvas, Some(Canvas { width: 300.0, height: 1000.0, top_offset: 0.0 }));
    }

    #[test]
    fn empty_document_is_default() {
        assert_eq!(Scene::from_yaml("").unwrap(), Scene::default());
        assert_eq!(Scene::from_yaml("   \n").unwrap(), Scene::default());
    }

    #[test]
    fn rejects_wrong_types() {
        assert!(Scene::from_yaml("copies: lots").is_err());
    }

    #[test]
    fn missing_file_is_an_error() {
        let err = Scene::load("/definitely/not/here.yaml").unwrap_err();
        assert!(err.to_string().contains("failed to read scene file"));
    }
}
