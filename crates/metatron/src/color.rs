//! Stroke colors and the policies that assign them to diagram copies.

use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};

/// An opaque 8-bit RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const WHITE: Color = Color::rgb(255, 255, 255);
    pub const BLUE: Color = Color::rgb(0, 0, 255);
    pub const RED: Color = Color::rgb(255, 0, 0);
    pub const YELLOW: Color = Color::rgb(255, 255, 0);
    pub const GREEN: Color = Color::rgb(0, 255, 0);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// `#rrggbb` form, as written into SVG attributes.
    pub fn to_hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    /// Parse a CSS color: named colors, `#rgb`, `#rrggbb` or `rgb(...)`.
    ///
    /// Alpha is ignored; strokes are always opaque.
    pub fn parse(text: &str) -> Result<Color> {
        let parsed = svgtypes::Color::from_str(text.trim())
            .map_err(|_| Error::InvalidColor(text.to_string()))?;
        Ok(Color::rgb(parsed.red, parsed.green, parsed.blue))
    }
}

impl FromStr for Color {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Color::parse(s)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

/// Palette cycled through by multi-color rendering, one entry per copy.
pub const DEFAULT_PALETTE: [Color; 4] = [Color::BLUE, Color::RED, Color::YELLOW, Color::GREEN];

/// Parse exactly four colors into a palette.
pub fn parse_palette<S: AsRef<str>>(names: &[S]) -> Result<[Color; 4]> {
    if names.len() != 4 {
        return Err(Error::PaletteSize(names.len()));
    }
    let mut palette = DEFAULT_PALETTE;
    for (slot, name) in palette.iter_mut().zip(names) {
        *slot = Color::parse(name.as_ref())?;
    }
    Ok(palette)
}

/// How stroke colors are assigned to copies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorPolicy {
    /// Every copy uses the same color.
    Monochrome(Color),
    /// Copy `j` uses `palette[j]`.
    MultiColor([Color; 4]),
}

impl ColorPolicy {
    /// Color for the `copy`-th drawn copy (0-based).
    ///
    /// At most four copies are ever drawn; larger indices wrap.
    pub fn color_for(&self, copy: usize) -> Color {
        match self {
            ColorPolicy::Monochrome(color) => *color,
            ColorPolicy::MultiColor(palette) => palette[copy % palette.len()],
        }
    }

    /// The four per-copy colors this policy produces.
    pub fn palette(&self) -> [Color; 4] {
        std::array::from_fn(|j| self.color_for(j))
    }
}

impl Default for ColorPolicy {
    fn default() -> Self {
        ColorMode::Dark.policy()
    }
}

/// Background-driven color scheme chosen by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ColorMode {
    /// Black background, one palette color per copy.
    #[default]
    Dark,
    /// White background, black ink for every copy.
    Light,
}

impl ColorMode {
    pub fn background(&self) -> Color {
        match self {
            ColorMode::Dark => Color::BLACK,
            ColorMode::Light => Color::WHITE,
        }
    }

    pub fn policy(&self) -> ColorPolicy {
        match self {
            ColorMode::Dark => ColorPolicy::MultiColor(DEFAULT_PALETTE),
            ColorMode::Light => ColorPolicy::Monochrome(Color::BLACK),
        }
    }

    /// Parse from a name ("dark"/"black", "light"/"white").
    pub fn from_name(name: &str) -> Option<ColorMode> {
        match name.to_lowercase().as_str() {
            "dark" | "black" | "color" => Some(ColorMode::Dark),
            "light" | "white" | "mono" => Some(ColorMode::Light),
            _ => None,
        }
    }
}
