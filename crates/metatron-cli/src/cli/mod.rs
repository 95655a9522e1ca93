//! CLI command implementations.
//!
//! - `render` - Screen-style SVG/PNG/JSON output
//! - `page` - Printable page output, or plotter polylines
//! - `info` - Describe the copies a render would draw

pub mod common;
pub mod info;
pub mod page;
pub mod render;
pub mod scene;

pub use info::{cmd_info, InfoArgs};
pub use page::{cmd_page, PageArgs};
pub use render::{cmd_render, RenderArgs};
