//! instafit fits photographs onto fixed-aspect-ratio canvases in parallel batches.
//!
//! A batch resolves one target ratio from its first image (clamped to a supported range), then
//! every image is padded, not cropped, onto a canvas of that ratio:
//!
//! - background color, optionally overlaid with an ambient fill (a scaled copy of the image)
//! - the photograph itself, centered and unscaled
//! - a stack of anchored watermark overlays
//!
//! Entry points are [`run_batch`] for whole folders and [`run_job`] / [`compose`] for single
//! images.
#![forbid(unsafe_code)]

mod assets;
mod effects;
mod foundation;
mod layout;
mod render;

/// Batch options and their defaults.
pub mod config;

pub use crate::assets::color::{background_color, named_color, parse_color};
pub use crate::assets::decode::{ChannelMode, Raster, decode_image, probe_dimensions, read_image};
pub use crate::assets::watermark::{WatermarkConfig, WatermarkSpec};
pub use crate::config::BatchConfig;
pub use crate::effects::composite::{PremulRgba8, draw_over, over};
pub use crate::foundation::core::{AspectRatio, RATIO_EPSILON, Rgb8};
pub use crate::foundation::error::{ErrorKind, FitError, FitResult};
pub use crate::layout::placement::{Anchor, InsetMode, place_watermark};
pub use crate::layout::resolver::{SupportedRange, resolve_ratio};
pub use crate::render::batch::{BatchReport, discover_inputs, run_batch};
pub use crate::render::compositor::{
    CanvasJob, JPEG_QUALITY, JobResult, canvas_size, compose, fit_within, run_job, write_jpeg,
};
