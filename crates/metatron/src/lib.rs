//! # metatron
//!
//! Geometry and rendering for Metatron's Cube diagrams: a center circle,
//! two hexagonal rings of circles, and the 42 straight lines that tie
//! them together, optionally repeated at 15° offsets in distinct colors.
//!
//! ## Rust Lesson #7: Modules
//!
//! - `mod foo;` = load from `foo.rs` or `foo/mod.rs`
//! - `pub mod foo;` = also export it publicly
//! - `pub use foo::Bar;` = re-export Bar at this level
//!
//! ```
//! use metatron::{render, DrawList, RenderConfig};
//!
//! let mut list = DrawList::new();
//! let summary = render(&mut list, &RenderConfig { copy_count: 2, ..Default::default() });
//! assert_eq!(summary.segments, 2 * 42);
//! ```

pub mod color;
pub mod error;
pub mod flatten;
pub mod geometry;
pub mod pattern;
pub mod record;
pub mod render;
pub mod svg;

// Re-export common types at crate root for convenience.
pub use color::{parse_palette, Color, ColorMode, ColorPolicy, DEFAULT_PALETTE};
pub use error::{Error, Result};
pub use flatten::{flatten_circle, PenLayer, PolylineSurface};
pub use geometry::{Area, Circle, Point, Segment};
pub use pattern::{compute_diagram, compute_ring, Diagram, PatternParameters, Ring};
pub use record::{DrawList, DrawOp};
pub use render::{
    angle_step_multiplier, copies_drawn, render, render_copies, CopyPlan, RenderConfig,
    RenderPlan, RenderSummary, ScalePolicy, Surface, ANGLE_STEP, DEFAULT_ROTATION,
};
pub use svg::SvgSurface;
