//! Bitmap preview backend for `inkstream` vector documents.
//!
//! Renders finalized pages into an RGB framebuffer with fit-inside
//! scaling, and schedules regeneration off the interactive thread with a
//! coalescing single-worker queue.

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

mod framebuffer;
mod render;
mod scheduler;

pub use framebuffer::Framebuffer;
pub use render::{
    draw_document, render_preview, RasterError, Viewfit, MIN_VIEWPORT_PX, PREVIEW_MARGIN_PX,
};
pub use scheduler::{PreviewScheduler, RegenerateResult};
