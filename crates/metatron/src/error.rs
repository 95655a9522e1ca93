//! Error type for metatron.
//!
//! Geometry and rendering never fail. Errors only come from the edges:
//! parsing user-supplied colors and serialising output documents.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    #[error("invalid color '{0}'")]
    InvalidColor(String),

    #[error("palette needs exactly 4 colors, got {0}")]
    PaletteSize(usize),

    #[error("SVG write error: {0}")]
    Svg(String),
}

pub type Result<T> = std::result::Result<T, Error>;
