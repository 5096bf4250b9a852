//! Handwriting stroke normalization, pagination, and vector page
//! composition.
//!
//! The pipeline turns raw text plus an external stroke generator into
//! paginated vector page documents: text is sanitized, wrapped, and
//! budget-checked; each display line's raw offset samples are decoded,
//! denoised, baseline-aligned, oriented, and placed; a per-page composer
//! stacks background, ruled grid, margin guides, and stroke paths into an
//! immutable document serializable as SVG. Bitmap preview lives in the
//! `inkstream-raster` backend crate.

#![cfg_attr(
    not(test),
    deny(
        clippy::expect_used,
        clippy::unwrap_used,
        clippy::panic,
        clippy::todo,
        clippy::unimplemented
    )
)]

pub mod color;
pub mod config;
pub mod engine;
pub mod generator;
pub mod output;
pub mod page;
pub mod stroke;
pub mod svg;
pub mod wrap;

pub use color::{Color, ColorError};
pub use config::{LineStyle, OverflowPolicy, PageStyle, Settings};
pub use engine::{ComposeEngine, EngineError};
pub use generator::{GenerationError, StrokeGenerator};
pub use output::{write_svg_pages, BatchError};
pub use page::{
    DrawCommand, LineCommand, PageComposer, PathCommand, PathSegment, RectCommand, VectorDocument,
};
pub use stroke::{normalize, GlyphSample, Stroke, StrokePoint, MIN_MOVEMENT};
pub use svg::{svg_string, write_svg};
pub use wrap::{
    check_line_budget, paginate, truncate_to_budget, wrap_text, Overflow, WrapError, WrapMode,
};
